//! Domain types for the trip planner.
//!
//! These are the normalized, engine-independent forms of what the
//! routing service returns. Everything downstream of the routing
//! adapter (ranking, decoding, formatting) works on these types only.

mod coord;
mod journey;
mod leg;

pub use coord::Coord;
pub use journey::{Journey, JourneySummary, RouteResult};
pub use leg::{Leg, StopRef, TransferLeg, TripLeg, WalkLeg};
