//! # gpsned - GPS waypoints to local meters
//!
//! Converts GPS coordinates, given as decimal degrees or as
//! degrees-minutes-seconds strings, into a displacement in meters north and
//! east of an origin, for use as a navigation waypoint.
//!
//! ## Features
//!
//! - **DMS parsing**: `N40-15-28.34` style strings to signed decimal degrees
//! - **Mixed inputs**: each coordinate may be decimal or DMS, independently
//! - **Altitude units**: meters, or feet via a unit flag
//! - **Flat-earth model**: spherical Earth, local tangent plane around the origin
//!
//! ## Quick Start
//!
//! ```
//! use gpsned::{to_local_meters, CoordinateInput};
//!
//! let waypoint = to_local_meters(
//!     &CoordinateInput::Decimal(40.25787274333326),
//!     &CoordinateInput::Decimal(-111.65480308234692),
//!     -20.0,
//!     &CoordinateInput::dms("N40-15-25.38"),
//!     &CoordinateInput::dms("W111-39-15.19"),
//!     -20.0,
//!     0, // altitudes in meters
//! )?;
//!
//! println!("north {:.1}m, east {:.1}m", waypoint.north, waypoint.east);
//! # Ok::<(), gpsned::GpsnedError>(())
//! ```
//!
//! ## Output
//!
//! [`LocalDisplacement`] holds `north`, `east`, `altitude` and `distance`, all
//! in meters. `altitude` is the target altitude itself, not the change from the
//! origin; the change is folded into `distance`.
//!
//! ## Accuracy
//!
//! The conversion assumes a sphere of radius [`EARTH_RADIUS`] and a flat
//! tangent plane at the origin. It is meant for waypoints a few kilometers
//! apart; expect growing error over longer legs and near the poles.

pub mod converter;
pub mod displacement;
pub mod dms;
pub mod error;
pub mod input;

// Re-export main types at crate root for convenience
pub use converter::{to_local_meters, WaypointConverter, WaypointConverterBuilder, WaypointInput};
pub use displacement::{local_displacement, GeodeticPoint, LocalDisplacement, EARTH_RADIUS};
pub use dms::{decimal_degrees, Dms, Hemisphere};
pub use error::{GpsnedError, Result};
pub use input::{AltitudeUnit, CoordinateInput, FEET_TO_METERS};
