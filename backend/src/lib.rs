//! # Observation-log astronomy engine
//!
//! Visibility and Moon calculations for an amateur-astronomy observation log.
//!
//! Given an observer site and an instant, the crate answers the questions an
//! observing log needs: when does a catalog object next transit, rise and
//! set, where is it in the sky right now, how bright is the Moon, and how far
//! is a target from it.
//!
//! ## Features
//!
//! - **Time scales**: Gregorian ⇄ Julian Date, UTC → TAI → TT and UT1 with
//!   configurable leap seconds and DUT1
//! - **Coordinates**: J2000 catalog positions to apparent place of date
//!   (precession and nutation), hour angle and horizontal coordinates with
//!   optional atmospheric refraction
//! - **Visibility**: next transit, rise and set, with circumpolar and
//!   never-rising targets reported as such
//! - **Moon**: position, illuminated fraction and phase from a low-precision
//!   analytical model, with topocentric parallax
//! - **Separation**: great-circle distance between two sky positions
//!
//! ## Architecture
//!
//! - [`time`]: calendar and time-scale conversions, sidereal time
//! - [`models`]: value types shared by every layer
//! - [`services`]: the calculations themselves
//! - [`config`]: TOML configuration with environment overrides
//! - [`routes`]: table rows and plot data built from engine results
//! - [`core`]: angle helpers, rotation matrices and refraction
//!
//! Unknown catalog coordinates are not errors: they flow through as
//! [`models::Visibility::Unavailable`] and [`models::Separation::Undefined`].

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time;

pub use error::{AstroError, AstroResult};
