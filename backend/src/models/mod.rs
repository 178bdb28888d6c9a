pub mod coordinates;
pub mod frame;
pub mod location;
pub mod lunar;
pub mod macros;
pub mod separation;
pub mod time;
pub mod visibility;

pub use coordinates::*;
pub use frame::*;
pub use location::*;
pub use lunar::*;
pub use macros::{ObjectId, ObservationId, SessionId};
pub use separation::*;
pub use time::*;
pub use visibility::*;
