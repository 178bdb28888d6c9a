//! Shared numeric utilities: angle normalisation, small rotation algebra and
//! the atmospheric refraction models.

pub mod angles;
pub mod refraction;
pub mod spherical;

pub use angles::*;
pub use refraction::RefractionModel;
pub use spherical::{Matrix3, Vector3};
