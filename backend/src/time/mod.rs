//! Time system: calendar ⇄ Julian Date, UTC → TAI/TT/UT1 offsets, sidereal
//! time and the slowly varying Earth-orientation angles (precession,
//! nutation) that depend on them.

pub mod julian;
pub mod nutation;
pub mod precession;
pub mod scales;
pub mod sidereal;

pub use julian::{from_julian_date, to_julian_date, CalendarDate, JulianDate};
pub use scales::{apply_dut1_offset, apply_leap_second_offset, tai_to_tt, TimeCorrections};
pub use sidereal::{
    equation_of_equinoxes, gast_degrees, gmst_degrees, local_apparent_sidereal_time,
    SIDEREAL_RATE_DEG_PER_DAY,
};
