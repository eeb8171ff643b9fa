//! Waypoint conversion from mixed-format GPS inputs to local meters.
//!
//! This module provides [`to_local_meters`], the one-call conversion, and
//! [`WaypointConverter`], its configurable form.
//!
//! # Configuration
//!
//! ```
//! use gpsned::{AltitudeUnit, CoordinateInput, WaypointConverter};
//!
//! let converter = WaypointConverter::builder()
//!     .altitude_unit(AltitudeUnit::Feet)
//!     .build();
//!
//! let d = converter.convert(
//!     &CoordinateInput::dms("N40-15-28.34"),
//!     &CoordinateInput::Decimal(-111.6548),
//!     4600.0,
//!     &CoordinateInput::Decimal(40.2570),
//!     &CoordinateInput::dms("W111-39-15.19"),
//!     4700.0,
//! )?;
//! assert!(d.distance > 0.0);
//! # Ok::<(), gpsned::GpsnedError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::displacement::{
    local_displacement_with_radius, GeodeticPoint, LocalDisplacement, EARTH_RADIUS,
};
use crate::error::{GpsnedError, Result};
use crate::input::{AltitudeUnit, CoordinateInput, FEET_TO_METERS};

/// Environment variable selecting the altitude unit.
pub const ENV_ALTITUDE_UNIT: &str = "GPSNED_ALTITUDE_UNIT";
/// Environment variable overriding the feet to meters factor.
pub const ENV_FEET_TO_METERS: &str = "GPSNED_FEET_TO_METERS";
/// Environment variable overriding the sphere radius in meters.
pub const ENV_EARTH_RADIUS: &str = "GPSNED_EARTH_RADIUS";

/// The inputs describing one waypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointInput {
    pub latitude: CoordinateInput,
    pub longitude: CoordinateInput,
    /// Altitude in the converter's [`AltitudeUnit`].
    pub altitude: f64,
}

impl WaypointInput {
    pub fn new(
        latitude: impl Into<CoordinateInput>,
        longitude: impl Into<CoordinateInput>,
        altitude: f64,
    ) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
            altitude,
        }
    }
}

/// Converts waypoints to local displacements with a fixed configuration.
///
/// # Example
///
/// ```
/// use gpsned::{WaypointConverter, WaypointInput};
///
/// let converter = WaypointConverter::new();
/// let origin = WaypointInput::new(40.25787274333326, -111.65480308234692, -20.0);
/// let route = [
///     WaypointInput::new(40.257049176511316, -111.65421836078167, -20.0),
///     WaypointInput::new(40.2580, -111.6540, -30.0),
/// ];
///
/// let legs = converter.convert_batch(&origin, &route)?;
/// assert_eq!(legs.len(), 2);
/// assert!(legs[0].north < 0.0 && legs[0].east > 0.0);
/// # Ok::<(), gpsned::GpsnedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaypointConverter {
    altitude_unit: AltitudeUnit,
    feet_to_meters: f64,
    earth_radius: f64,
}

impl Default for WaypointConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl WaypointConverter {
    /// Converter with altitudes in meters on the mean-radius sphere.
    pub fn new() -> Self {
        WaypointConverterBuilder::new().build()
    }

    /// Create a builder for more configuration options.
    pub fn builder() -> WaypointConverterBuilder {
        WaypointConverterBuilder::new()
    }

    pub fn altitude_unit(&self) -> AltitudeUnit {
        self.altitude_unit
    }

    pub fn feet_to_meters(&self) -> f64 {
        self.feet_to_meters
    }

    pub fn earth_radius(&self) -> f64 {
        self.earth_radius
    }

    /// Convert a target waypoint to a displacement from an origin.
    ///
    /// Each horizontal input is resolved independently, so DMS and decimal
    /// inputs can be mixed freely. Altitudes are in this converter's unit.
    ///
    /// # Errors
    ///
    /// Returns the first DMS parse error among the four horizontal inputs.
    pub fn convert(
        &self,
        origin_lat: &CoordinateInput,
        origin_lon: &CoordinateInput,
        origin_alt: f64,
        target_lat: &CoordinateInput,
        target_lon: &CoordinateInput,
        target_alt: f64,
    ) -> Result<LocalDisplacement> {
        let origin = self.resolve_parts(origin_lat, origin_lon, origin_alt)?;
        let target = self.resolve_parts(target_lat, target_lon, target_alt)?;
        Ok(self.displacement(&origin, &target))
    }

    /// [`convert`](Self::convert) taking bundled waypoint inputs.
    pub fn convert_points(
        &self,
        origin: &WaypointInput,
        target: &WaypointInput,
    ) -> Result<LocalDisplacement> {
        let origin = self.resolve(origin)?;
        let target = self.resolve(target)?;
        Ok(self.displacement(&origin, &target))
    }

    /// Convert a sequence of targets against one origin.
    ///
    /// The origin is resolved once. Results are in input order.
    ///
    /// # Errors
    ///
    /// Stops at the first target that fails to resolve.
    pub fn convert_batch(
        &self,
        origin: &WaypointInput,
        targets: &[WaypointInput],
    ) -> Result<Vec<LocalDisplacement>> {
        let origin = self.resolve(origin)?;

        targets
            .iter()
            .enumerate()
            .map(|(index, target)| {
                let target = self.resolve(target).map_err(|e| {
                    tracing::debug!(index, error = %e, "Failed to resolve waypoint");
                    e
                })?;
                Ok(self.displacement(&origin, &target))
            })
            .collect()
    }

    /// Resolve waypoint inputs to a point in decimal degrees and meters.
    pub fn resolve(&self, input: &WaypointInput) -> Result<GeodeticPoint> {
        self.resolve_parts(&input.latitude, &input.longitude, input.altitude)
    }

    fn resolve_parts(
        &self,
        latitude: &CoordinateInput,
        longitude: &CoordinateInput,
        altitude: f64,
    ) -> Result<GeodeticPoint> {
        Ok(GeodeticPoint {
            latitude: resolve_coordinate("latitude", latitude)?,
            longitude: resolve_coordinate("longitude", longitude)?,
            altitude: self
                .altitude_unit
                .to_meters(altitude, self.feet_to_meters),
        })
    }

    fn displacement(&self, origin: &GeodeticPoint, target: &GeodeticPoint) -> LocalDisplacement {
        let displacement = local_displacement_with_radius(origin, target, self.earth_radius);
        tracing::debug!(
            origin = %origin,
            destination = %target,
            displacement = %displacement,
            "Converted waypoint to local meters"
        );
        displacement
    }
}

fn resolve_coordinate(axis: &'static str, input: &CoordinateInput) -> Result<f64> {
    let value = input.to_decimal_degrees()?;
    tracing::debug!(
        axis,
        format = input.format_name(),
        input = %input,
        value,
        "Resolved coordinate"
    );
    Ok(value)
}

/// Convert GPS inputs for an origin and a target into local meters.
///
/// # Arguments
///
/// * `origin_lat`, `origin_lon` - Origin coordinates (decimal or DMS)
/// * `origin_alt` - Origin altitude
/// * `target_lat`, `target_lon` - Target coordinates (decimal or DMS)
/// * `target_alt` - Target altitude
/// * `altitude_unit_flag` - `0` if altitudes are meters, anything else for feet
///   (converted with [`FEET_TO_METERS`])
///
/// # Returns
///
/// The target as meters north and east of the origin, the target altitude in
/// meters, and the straight-line distance.
///
/// # Example
///
/// ```
/// use gpsned::{to_local_meters, CoordinateInput};
///
/// let d = to_local_meters(
///     &CoordinateInput::Decimal(0.0),
///     &CoordinateInput::Decimal(0.0),
///     100.0,
///     &CoordinateInput::dms("N0-0-3.6"),
///     &CoordinateInput::Decimal(0.0),
///     100.0,
///     1,
/// )?;
/// assert!((d.north - 111.195).abs() < 1e-3);
/// assert!((d.altitude - 30.5).abs() < 1e-9);
/// # Ok::<(), gpsned::GpsnedError>(())
/// ```
#[allow(clippy::too_many_arguments)]
pub fn to_local_meters(
    origin_lat: &CoordinateInput,
    origin_lon: &CoordinateInput,
    origin_alt: f64,
    target_lat: &CoordinateInput,
    target_lon: &CoordinateInput,
    target_alt: f64,
    altitude_unit_flag: i64,
) -> Result<LocalDisplacement> {
    WaypointConverter::builder()
        .altitude_unit(AltitudeUnit::from_flag(altitude_unit_flag))
        .build()
        .convert(
            origin_lat, origin_lon, origin_alt, target_lat, target_lon, target_alt,
        )
}

/// Builder for [`WaypointConverter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaypointConverterBuilder {
    altitude_unit: AltitudeUnit,
    feet_to_meters: f64,
    earth_radius: f64,
}

impl Default for WaypointConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WaypointConverterBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            altitude_unit: AltitudeUnit::Meters,
            feet_to_meters: FEET_TO_METERS,
            earth_radius: EARTH_RADIUS,
        }
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `GPSNED_ALTITUDE_UNIT` | `meters`/`m`/`0` or `feet`/`ft`/non-zero flag | meters |
    /// | `GPSNED_FEET_TO_METERS` | Feet to meters factor | 0.305 |
    /// | `GPSNED_EARTH_RADIUS` | Sphere radius in meters | 6371008.0 |
    ///
    /// # Example
    ///
    /// ```bash
    /// export GPSNED_ALTITUDE_UNIT=feet
    /// export GPSNED_FEET_TO_METERS=0.3048
    /// ```
    ///
    /// ```ignore
    /// use gpsned::WaypointConverterBuilder;
    ///
    /// let converter = WaypointConverterBuilder::from_env()?.build();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`GpsnedError::InvalidConfig`] if a variable is set but cannot be
    /// parsed, or if the factor or radius is not a finite positive number.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::new();

        if let Some(unit) = env_value::<AltitudeUnit>(ENV_ALTITUDE_UNIT)? {
            builder.altitude_unit = unit;
        }
        if let Some(factor) = env_positive(ENV_FEET_TO_METERS)? {
            builder.feet_to_meters = factor;
        }
        if let Some(radius) = env_positive(ENV_EARTH_RADIUS)? {
            builder.earth_radius = radius;
        }

        Ok(builder)
    }

    /// Set the unit of altitudes passed to the converter.
    ///
    /// Default is meters.
    pub fn altitude_unit(mut self, unit: AltitudeUnit) -> Self {
        self.altitude_unit = unit;
        self
    }

    /// Set the factor applied to altitudes given in feet.
    ///
    /// Default is [`FEET_TO_METERS`] (0.305).
    pub fn feet_to_meters(mut self, factor: f64) -> Self {
        self.feet_to_meters = factor;
        self
    }

    /// Set the sphere radius used for the conversion.
    ///
    /// Default is [`EARTH_RADIUS`].
    pub fn earth_radius(mut self, radius: f64) -> Self {
        self.earth_radius = radius;
        self
    }

    /// Build the [`WaypointConverter`].
    pub fn build(self) -> WaypointConverter {
        WaypointConverter {
            altitude_unit: self.altitude_unit,
            feet_to_meters: self.feet_to_meters,
            earth_radius: self.earth_radius,
        }
    }
}

/// Read and parse an optional environment variable.
fn env_value<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| GpsnedError::InvalidConfig { key, value }),
        Err(_) => Ok(None),
    }
}

/// Read an optional environment variable that must be finite and positive.
fn env_positive(key: &'static str) -> Result<Option<f64>> {
    match env_value::<f64>(key)? {
        Some(v) if !(v.is_finite() && v > 0.0) => Err(GpsnedError::InvalidConfig {
            key,
            value: v.to_string(),
        }),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: f64) -> CoordinateInput {
        CoordinateInput::Decimal(value)
    }

    #[test]
    fn test_to_local_meters_decimal() {
        let d = to_local_meters(&dec(0.0), &dec(0.0), 0.0, &dec(0.001), &dec(0.0), 0.0, 0)
            .unwrap();
        let expected = 0.001_f64.to_radians() * EARTH_RADIUS;
        assert!((d.north - expected).abs() < 1e-9);
        assert_eq!(d.east, 0.0);
        assert!((d.distance - expected).abs() < 1e-9);
    }

    #[test]
    fn test_feet_flag_matches_meters() {
        let feet = to_local_meters(
            &dec(40.0),
            &dec(-111.0),
            100.0,
            &dec(40.001),
            &dec(-111.001),
            200.0,
            1,
        )
        .unwrap();
        let meters = to_local_meters(
            &dec(40.0),
            &dec(-111.0),
            30.5,
            &dec(40.001),
            &dec(-111.001),
            61.0,
            0,
        )
        .unwrap();

        assert!((feet.north - meters.north).abs() < 1e-9);
        assert!((feet.east - meters.east).abs() < 1e-9);
        assert!((feet.altitude - meters.altitude).abs() < 1e-9);
        assert!((feet.distance - meters.distance).abs() < 1e-9);
    }

    #[test]
    fn test_any_nonzero_flag_is_feet() {
        let d = to_local_meters(&dec(0.0), &dec(0.0), 0.0, &dec(0.0), &dec(0.0), 1000.0, 7)
            .unwrap();
        assert!((d.altitude - 305.0).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_formats_resolve_independently() {
        let mixed = to_local_meters(
            &CoordinateInput::dms("N40-15-0"),
            &dec(-111.5),
            0.0,
            &dec(40.26),
            &CoordinateInput::dms("W111-30-36"),
            0.0,
            0,
        )
        .unwrap();
        let decimal = to_local_meters(
            &dec(40.25),
            &dec(-111.5),
            0.0,
            &dec(40.26),
            &dec(-111.51),
            0.0,
            0,
        )
        .unwrap();

        assert!((mixed.north - decimal.north).abs() < 1e-6);
        assert!((mixed.east - decimal.east).abs() < 1e-6);
    }

    #[test]
    fn test_bad_dms_propagates() {
        let result = to_local_meters(
            &CoordinateInput::dms("N90-90-76.45"),
            &CoordinateInput::dms("Q45-67-23.54"),
            20.0,
            &dec(-40.257049176511316),
            &dec(111.65421836078167),
            20.0,
            0,
        );
        assert!(matches!(
            result,
            Err(GpsnedError::UnrecognizedHemisphere { .. })
        ));

        let result = to_local_meters(
            &dec(0.0),
            &dec(0.0),
            0.0,
            &CoordinateInput::dms("S10-5"),
            &dec(0.0),
            0.0,
            0,
        );
        assert!(matches!(result, Err(GpsnedError::InvalidFormat { .. })));
    }

    #[test]
    fn test_builder_defaults() {
        let converter = WaypointConverter::new();
        assert_eq!(converter.altitude_unit(), AltitudeUnit::Meters);
        assert_eq!(converter.feet_to_meters(), FEET_TO_METERS);
        assert_eq!(converter.earth_radius(), EARTH_RADIUS);
        assert_eq!(converter, WaypointConverter::default());
    }

    #[test]
    fn test_builder_overrides() {
        let converter = WaypointConverter::builder()
            .altitude_unit(AltitudeUnit::Feet)
            .feet_to_meters(0.3048)
            .earth_radius(6_378_137.0)
            .build();

        let d = converter
            .convert(&dec(0.0), &dec(0.0), 0.0, &dec(0.0), &dec(0.001), 1000.0)
            .unwrap();
        assert!((d.altitude - 304.8).abs() < 1e-9);
        assert!((d.east - 0.001_f64.to_radians() * 6_378_137.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_points_matches_convert() {
        let converter = WaypointConverter::new();
        let origin = WaypointInput::new(CoordinateInput::dms("N40-15-28.34"), -111.6548, 10.0);
        let target = WaypointInput::new(40.2570, CoordinateInput::dms("W111-39-15.19"), 25.0);

        let a = converter.convert_points(&origin, &target).unwrap();
        let b = converter
            .convert(
                &origin.latitude,
                &origin.longitude,
                origin.altitude,
                &target.latitude,
                &target.longitude,
                target.altitude,
            )
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_convert_batch() {
        let converter = WaypointConverter::new();
        let origin = WaypointInput::new(10.0, 20.0, 0.0);
        let targets = vec![
            WaypointInput::new(10.0, 20.0, 0.0),
            WaypointInput::new(10.001, 20.0, 0.0),
            WaypointInput::new(CoordinateInput::dms("S10-0-0"), 20.0, 0.0),
        ];

        let results = converter.convert_batch(&origin, &targets).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].distance, 0.0);
        assert!(results[1].north > 0.0);
        assert!(results[2].north < 0.0);
    }

    #[test]
    fn test_convert_batch_stops_on_error() {
        let converter = WaypointConverter::new();
        let origin = WaypointInput::new(10.0, 20.0, 0.0);
        let targets = vec![
            WaypointInput::new(10.001, 20.0, 0.0),
            WaypointInput::new(CoordinateInput::dms("N10-0"), 20.0, 0.0),
        ];

        assert!(matches!(
            converter.convert_batch(&origin, &targets),
            Err(GpsnedError::InvalidFormat { .. })
        ));
        assert!(converter.convert_batch(&origin, &[]).unwrap().is_empty());
    }

    // All environment manipulation lives in one test so parallel tests in this
    // binary never observe each other's variables.
    #[test]
    fn test_from_env() {
        let keys = [ENV_ALTITUDE_UNIT, ENV_FEET_TO_METERS, ENV_EARTH_RADIUS];
        let originals: Vec<Option<String>> =
            keys.iter().map(|k| std::env::var(k).ok()).collect();

        // Defaults when unset
        for key in keys {
            std::env::remove_var(key);
        }
        let builder = WaypointConverterBuilder::from_env().unwrap();
        assert_eq!(builder, WaypointConverterBuilder::new());

        // Values when set
        std::env::set_var(ENV_ALTITUDE_UNIT, "feet");
        std::env::set_var(ENV_FEET_TO_METERS, "0.3048");
        std::env::set_var(ENV_EARTH_RADIUS, " 6378137 ");
        let converter = WaypointConverterBuilder::from_env().unwrap().build();
        assert_eq!(converter.altitude_unit(), AltitudeUnit::Feet);
        assert_eq!(converter.feet_to_meters(), 0.3048);
        assert_eq!(converter.earth_radius(), 6_378_137.0);

        // Unit flag form
        std::env::set_var(ENV_ALTITUDE_UNIT, "0");
        let builder = WaypointConverterBuilder::from_env().unwrap();
        assert_eq!(builder.altitude_unit, AltitudeUnit::Meters);

        // Unparseable values are rejected
        std::env::set_var(ENV_EARTH_RADIUS, "large");
        assert_eq!(
            WaypointConverterBuilder::from_env(),
            Err(GpsnedError::InvalidConfig {
                key: ENV_EARTH_RADIUS,
                value: "large".to_string()
            })
        );

        // Parseable but not a usable radius or factor
        std::env::set_var(ENV_EARTH_RADIUS, "NaN");
        assert_eq!(
            WaypointConverterBuilder::from_env(),
            Err(GpsnedError::InvalidConfig {
                key: ENV_EARTH_RADIUS,
                value: "NaN".to_string()
            })
        );
        for bad in ["-5", "0", "inf"] {
            std::env::set_var(ENV_EARTH_RADIUS, bad);
            assert!(matches!(
                WaypointConverterBuilder::from_env(),
                Err(GpsnedError::InvalidConfig {
                    key: ENV_EARTH_RADIUS,
                    ..
                })
            ));
        }
        std::env::remove_var(ENV_EARTH_RADIUS);
        for bad in ["-5", "NaN", "-inf"] {
            std::env::set_var(ENV_FEET_TO_METERS, bad);
            assert!(matches!(
                WaypointConverterBuilder::from_env(),
                Err(GpsnedError::InvalidConfig {
                    key: ENV_FEET_TO_METERS,
                    ..
                })
            ));
        }
        std::env::set_var(ENV_FEET_TO_METERS, "0.3048");

        std::env::set_var(ENV_ALTITUDE_UNIT, "furlongs");
        assert!(matches!(
            WaypointConverterBuilder::from_env(),
            Err(GpsnedError::InvalidConfig {
                key: ENV_ALTITUDE_UNIT,
                ..
            })
        ));

        // Restore original values
        for (key, original) in keys.iter().zip(originals) {
            match original {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}
