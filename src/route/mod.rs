//! Route extraction.
//!
//! Given anchor values for some columns, [`find_routes`] enumerates the
//! leaves still reachable and the free branch decisions leading to each.
//! [`select_route`] then turns the route closest to a target value into
//! per-column ranges.

pub mod anchors;
pub mod constraints;
pub mod finder;
pub mod path;

pub use anchors::Anchors;
pub use constraints::{closest_route, select_route, select_route_from_paths, Bound, ConstraintMap};
pub use finder::find_routes;
pub use path::{PathToken, Route};
