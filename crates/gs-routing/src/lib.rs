//! `gs-routing` — taxi routes over admissible legs.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`router`]  | `Router` trait, `RouteRequest`, `Route`, `DijkstraRouter`    |
//! | [`planner`] | `RoutePlanner` (cache + reroute), `RerouteReason`            |
//! | [`runway`]  | `active_runway_end` (wind-based runway end selection)        |
//! | [`error`]   | `RoutingError`, `RoutingResult<T>`                           |

pub mod error;
pub mod planner;
pub mod router;
pub mod runway;


pub use error::{RoutingError, RoutingResult};
pub use planner::{PlannerStats, RerouteReason, RerouteRequest, RoutePlanner};
pub use router::{DijkstraRouter, Route, RouteRequest, Router};
pub use runway::active_runway_end;
