//! Service layer: the visibility engine and its collaborators.
//!
//! Every function here is a pure computation over (site, instant, target).
//! `batch` and `cache` sit on top of `visibility` for the table/plot refresh
//! path; `lunar` and `separation` feed the session and observation views.

pub mod batch;
pub mod cache;
pub mod lunar;
pub mod separation;
pub mod transform;
pub mod visibility;

pub use batch::compute_batch;
pub use cache::VisibilityCache;
pub use lunar::{compute_moon_state, geocentric_moon_state};
pub use separation::{separation, separation_degrees};
pub use transform::{apparent_place, hour_angle, to_horizontal, to_horizontal_refracted};
pub use visibility::{VisibilityEngine, SIDEREAL_DAY};
