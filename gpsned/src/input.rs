//! Caller-facing coordinate and altitude inputs.
//!
//! A horizontal coordinate arrives either as decimal degrees or as a DMS
//! string. [`CoordinateInput`] makes that choice explicit at the call site.
//! Text from outside the program (config files, JSON, user input) is
//! classified once through [`FromStr`] or `serde`, never re-sniffed later.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::dms::decimal_degrees;
use crate::error::{GpsnedError, Result};

/// Feet to meters factor applied when altitudes are given in feet.
///
/// This is the rounded factor `0.305`, not the exact `0.3048`. Converted
/// altitudes come out about 0.07% high (0.2 m per 1000 ft).
pub const FEET_TO_METERS: f64 = 0.305;

/// One horizontal coordinate (latitude or longitude) as supplied by a caller.
///
/// Serializes untagged: `Decimal` as a number, `Dms` as its text. On the way
/// back in, strings are classified by content (see [`FromStr`]), so a `Dms`
/// holding text without a hemisphere letter, such as
/// `CoordinateInput::dms("40.25")`, deserializes as `Decimal(40.25)` rather
/// than failing as it would when resolved directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    /// Signed decimal degrees.
    Decimal(f64),
    /// A `{N|S|E|W}DD-MM-SS.SS` string, parsed on resolution.
    Dms(String),
}

impl CoordinateInput {
    /// Wrap a DMS string.
    pub fn dms(text: impl Into<String>) -> Self {
        CoordinateInput::Dms(text.into())
    }

    /// Resolve to signed decimal degrees.
    ///
    /// # Errors
    ///
    /// Propagates DMS parse errors; a `Decimal` input never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use gpsned::CoordinateInput;
    ///
    /// assert_eq!(CoordinateInput::Decimal(-40.25).to_decimal_degrees().unwrap(), -40.25);
    /// assert_eq!(CoordinateInput::dms("S40-15-0").to_decimal_degrees().unwrap(), -40.25);
    /// ```
    pub fn to_decimal_degrees(&self) -> Result<f64> {
        match self {
            CoordinateInput::Decimal(value) => Ok(*value),
            CoordinateInput::Dms(text) => decimal_degrees(text),
        }
    }

    /// Short label of the input format, used in log events.
    pub fn format_name(&self) -> &'static str {
        match self {
            CoordinateInput::Decimal(_) => "decimal",
            CoordinateInput::Dms(_) => "dms",
        }
    }
}

impl From<f64> for CoordinateInput {
    fn from(value: f64) -> Self {
        CoordinateInput::Decimal(value)
    }
}

impl Display for CoordinateInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateInput::Decimal(value) => write!(f, "{}", value),
            CoordinateInput::Dms(text) => write!(f, "{}", text),
        }
    }
}

impl FromStr for CoordinateInput {
    type Err = GpsnedError;

    /// Classify free-form text.
    ///
    /// Text containing any of `N`, `S`, `E`, `W` is treated as DMS (and is not
    /// validated until resolved); anything else must parse as a decimal number.
    ///
    /// # Examples
    ///
    /// ```
    /// use gpsned::CoordinateInput;
    ///
    /// let lat: CoordinateInput = "N40-15-28.34".parse().unwrap();
    /// assert_eq!(lat, CoordinateInput::dms("N40-15-28.34"));
    ///
    /// let lon: CoordinateInput = "-111.6548".parse().unwrap();
    /// assert_eq!(lon, CoordinateInput::Decimal(-111.6548));
    ///
    /// assert!("forty".parse::<CoordinateInput>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        if s.contains(['N', 'S', 'E', 'W']) {
            return Ok(CoordinateInput::Dms(s.to_string()));
        }

        s.trim()
            .parse::<f64>()
            .map(CoordinateInput::Decimal)
            .map_err(|_| GpsnedError::invalid_format(s, "not a decimal number or DMS string"))
    }
}

/// Wire shape accepted by [`CoordinateInput`]'s `Deserialize`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for CoordinateInput {
    /// Numbers become `Decimal`; strings are classified like [`FromStr`].
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match RawCoordinate::deserialize(deserializer)? {
            RawCoordinate::Number(value) => Ok(CoordinateInput::Decimal(value)),
            RawCoordinate::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Unit of the altitudes handed to the converter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AltitudeUnit {
    #[default]
    Meters,
    Feet,
}

impl AltitudeUnit {
    /// Interpret a numeric unit flag: `0` is meters, anything else is feet.
    pub fn from_flag(flag: i64) -> Self {
        if flag == 0 {
            AltitudeUnit::Meters
        } else {
            AltitudeUnit::Feet
        }
    }

    /// Convert an altitude in this unit to meters.
    ///
    /// `feet_to_meters` is the factor applied to feet; meters pass through.
    pub fn to_meters(self, altitude: f64, feet_to_meters: f64) -> f64 {
        match self {
            AltitudeUnit::Meters => altitude,
            AltitudeUnit::Feet => altitude * feet_to_meters,
        }
    }
}

impl FromStr for AltitudeUnit {
    type Err = GpsnedError;

    /// Accepts `m`/`meters`/`metres`, `ft`/`feet`, or an integer unit flag.
    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        match value.to_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(AltitudeUnit::Meters),
            "ft" | "foot" | "feet" => Ok(AltitudeUnit::Feet),
            other => other
                .parse::<i64>()
                .map(AltitudeUnit::from_flag)
                .map_err(|_| {
                    GpsnedError::invalid_format(s, "expected meters, feet or a unit flag")
                }),
        }
    }
}
