//! Domain types for the direct-bus lookup.
//!
//! This module contains the core domain model types that represent
//! validated transit data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod route;
mod stop;

pub use route::{Direction, DirectedSequences, DirectedStopEntry, InvalidRouteCode, RouteCode};
pub use stop::{InvalidStopId, Stop, StopId};
