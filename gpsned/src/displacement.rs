//! Flat-earth conversion of geodetic points to local displacements.
//!
//! This module provides [`local_displacement`], which turns an origin and a
//! target point into meters north and east of the origin plus the straight-line
//! distance between them.
//!
//! # Model
//!
//! The Earth is treated as a sphere of radius [`EARTH_RADIUS`] and the area
//! around the origin as a flat tangent plane:
//!
//! - North: `Δlat · π/180 · R`
//! - East: `Δlon · π/180 · R · cos(origin_lat)`
//! - Distance: `√(north² + east² + Δalt²)`
//!
//! Errors grow with the distance between the points and with latitude; there
//! is no correction for the Earth's oblateness. Inputs are not range-checked.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS: f64 = 6_371_008.0;

/// A position given by latitude, longitude and altitude.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeodeticPoint {
    /// Latitude in decimal degrees, nominally -90° (south) to 90° (north).
    pub latitude: f64,
    /// Longitude in decimal degrees, nominally -180° (west) to 180° (east).
    pub longitude: f64,
    /// Altitude in meters, positive up.
    pub altitude: f64,
}

impl GeodeticPoint {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Displacement from this point to `target` on the mean-radius sphere.
    ///
    /// Same as [`local_displacement`]`(self, target)`.
    pub fn displacement_to(&self, target: &GeodeticPoint) -> LocalDisplacement {
        local_displacement(self, target)
    }
}

impl Display for GeodeticPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}m)",
            self.latitude, self.longitude, self.altitude
        )
    }
}

/// Local displacement from an origin to a target, in meters.
///
/// Note the third field: `altitude` is the target's altitude as given, not the
/// change in altitude and not a "down" component. The altitude change still
/// enters [`distance`](Self::distance).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalDisplacement {
    /// Meters north of the origin (negative is south).
    pub north: f64,
    /// Meters east of the origin (negative is west).
    pub east: f64,
    /// Target altitude in meters.
    pub altitude: f64,
    /// Straight-line distance from origin to target in meters, including the
    /// altitude change.
    pub distance: f64,
}

impl LocalDisplacement {
    /// The displacement as `[north, east, altitude, distance]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.north, self.east, self.altitude, self.distance]
    }

    /// Distance over the ground, ignoring altitude.
    pub fn horizontal_distance(&self) -> f64 {
        self.north.hypot(self.east)
    }
}

impl From<LocalDisplacement> for [f64; 4] {
    fn from(d: LocalDisplacement) -> Self {
        d.to_array()
    }
}

impl Display for LocalDisplacement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "N {:.3}m, E {:.3}m, alt {:.3}m, dist {:.3}m",
            self.north, self.east, self.altitude, self.distance
        )
    }
}

/// Convert two geodetic points into a local displacement.
///
/// # Arguments
///
/// * `origin` - Reference point; its latitude sets the east-west scale
/// * `target` - Point to express relative to `origin`
///
/// # Examples
///
/// ```
/// use gpsned::{local_displacement, GeodeticPoint};
///
/// let origin = GeodeticPoint::new(0.0, 0.0, 0.0);
/// let target = GeodeticPoint::new(0.001, 0.0, 0.0);
///
/// let d = local_displacement(&origin, &target);
/// assert!((d.north - 111.195).abs() < 1e-3);
/// assert_eq!(d.east, 0.0);
/// assert!((d.distance - d.north).abs() < 1e-9);
/// ```
pub fn local_displacement(origin: &GeodeticPoint, target: &GeodeticPoint) -> LocalDisplacement {
    local_displacement_with_radius(origin, target, EARTH_RADIUS)
}

/// [`local_displacement`] on a sphere of the given `radius` (meters).
pub fn local_displacement_with_radius(
    origin: &GeodeticPoint,
    target: &GeodeticPoint,
    radius: f64,
) -> LocalDisplacement {
    // Radius of the latitude circle through the origin
    let cross_radius = origin.latitude.to_radians().cos() * radius;

    let north = (target.latitude - origin.latitude).to_radians() * radius;
    let east = (target.longitude - origin.longitude).to_radians() * cross_radius;
    let altitude_change = target.altitude - origin.altitude;

    let distance = (north * north + east * east + altitude_change * altitude_change).sqrt();

    LocalDisplacement {
        north,
        east,
        altitude: target.altitude,
        distance,
    }
}
