//! Unit vectors and 3×3 rotation matrices for frame changes.
//!
//! Rotations follow the IAU/SOFA convention: `Matrix3::rot_z(a)` rotates the
//! reference frame (not the vector) by `a` about the z axis.

use super::angles::{atan2_deg, cos_deg, normalize_degrees, sin_deg};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Unit vector from spherical longitude/latitude in degrees.
    pub fn from_spherical_deg(lon: f64, lat: f64) -> Self {
        let (cl, sl) = (cos_deg(lat), sin_deg(lat));
        Self::new(cl * cos_deg(lon), cl * sin_deg(lon), sl)
    }

    /// Spherical longitude in `[0, 360)` and latitude in `[-90, 90]`, degrees.
    ///
    /// Latitude uses `atan2` against the equatorial projection, which stays
    /// accurate near the poles where `asin` would not.
    pub fn to_spherical_deg(&self) -> (f64, f64) {
        let rho = (self.x * self.x + self.y * self.y).sqrt();
        let lon = if rho == 0.0 {
            0.0
        } else {
            normalize_degrees(atan2_deg(self.y, self.x))
        };
        (lon, atan2_deg(self.z, rho))
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3(pub [[f64; 3]; 3]);

impl Matrix3 {
    pub const IDENTITY: Matrix3 = Matrix3([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// Frame rotation about the x axis by `angle` degrees.
    pub fn rot_x(angle: f64) -> Self {
        let (s, c) = (sin_deg(angle), cos_deg(angle));
        Matrix3([[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]])
    }

    /// Frame rotation about the y axis by `angle` degrees.
    pub fn rot_y(angle: f64) -> Self {
        let (s, c) = (sin_deg(angle), cos_deg(angle));
        Matrix3([[c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c]])
    }

    /// Frame rotation about the z axis by `angle` degrees.
    pub fn rot_z(angle: f64) -> Self {
        let (s, c) = (sin_deg(angle), cos_deg(angle));
        Matrix3([[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn mul(&self, other: &Matrix3) -> Matrix3 {
        let a = &self.0;
        let b = &other.0;
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        Matrix3(out)
    }

    pub fn transpose(&self) -> Matrix3 {
        let m = &self.0;
        Matrix3([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    pub fn apply(&self, v: &Vector3) -> Vector3 {
        let m = &self.0;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }
}
