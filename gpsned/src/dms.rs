//! Degrees-minutes-seconds (DMS) coordinate parsing and formatting.
//!
//! # Format
//!
//! DMS coordinates follow the convention `{N|S|E|W}{deg}-{min}-{sec}`:
//!
//! - The leading hemisphere letter carries the sign (N/E positive, S/W negative)
//! - Degrees, minutes and seconds are non-negative magnitudes
//! - Seconds may be fractional (e.g., `N40-15-28.34`)
//!
//! Letters and spaces around the numeric body are ignored, so `"N 40-15-28.34"`
//! and `"40-15-28.34N"` with a leading `N` parse the same way. Field values are
//! not range-checked: `N10-75-0` is accepted and yields `11.25`.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GpsnedError, Result};

/// Seconds printed by [`Dms`]'s `Display` when no precision is given.
const DEFAULT_SECONDS_PRECISION: usize = 2;

/// Hemisphere indicator of a DMS coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Map a hemisphere letter to a [`Hemisphere`].
    ///
    /// Matching is case-sensitive; only uppercase `N`, `S`, `E`, `W` are accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use gpsned::dms::Hemisphere;
    ///
    /// assert_eq!(Hemisphere::from_letter('S'), Some(Hemisphere::South));
    /// assert_eq!(Hemisphere::from_letter('s'), None);
    /// ```
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }

    /// `1.0` for north and east, `-1.0` for south and west.
    pub fn sign(self) -> f64 {
        match self {
            Hemisphere::North | Hemisphere::East => 1.0,
            Hemisphere::South | Hemisphere::West => -1.0,
        }
    }
}

impl TryFrom<char> for Hemisphere {
    type Error = GpsnedError;

    fn try_from(letter: char) -> Result<Self> {
        Hemisphere::from_letter(letter).ok_or_else(|| GpsnedError::UnrecognizedHemisphere {
            input: letter.to_string(),
        })
    }
}

impl Display for Hemisphere {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Which horizontal axis a decimal value belongs to.
///
/// Used to pick N/S or E/W when formatting a decimal value as DMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Latitude,
    Longitude,
}

/// A coordinate in degrees-minutes-seconds form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    /// Hemisphere carrying the sign of the coordinate.
    pub hemisphere: Hemisphere,
    /// Whole degrees (magnitude).
    pub degrees: f64,
    /// Minutes (magnitude).
    pub minutes: f64,
    /// Seconds (magnitude), possibly fractional.
    pub seconds: f64,
}

impl Dms {
    pub fn new(hemisphere: Hemisphere, degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self {
            hemisphere,
            degrees,
            minutes,
            seconds,
        }
    }

    /// Signed decimal degrees: `sign * (d + m/60 + s/3600)`.
    pub fn to_decimal(&self) -> f64 {
        self.hemisphere.sign() * (self.degrees + self.minutes / 60.0 + self.seconds / 3600.0)
    }

    /// Split a signed decimal-degree value into DMS components.
    ///
    /// Zero maps to the positive hemisphere of the axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use gpsned::dms::{Axis, Dms, Hemisphere};
    ///
    /// let dms = Dms::from_decimal(-45.5, Axis::Longitude);
    /// assert_eq!(dms.hemisphere, Hemisphere::West);
    /// assert_eq!(dms.degrees, 45.0);
    /// assert_eq!(dms.minutes, 30.0);
    /// assert_eq!(dms.to_string(), "W45-30-0.00");
    /// ```
    pub fn from_decimal(value: f64, axis: Axis) -> Self {
        let hemisphere = match (axis, value < 0.0) {
            (Axis::Latitude, false) => Hemisphere::North,
            (Axis::Latitude, true) => Hemisphere::South,
            (Axis::Longitude, false) => Hemisphere::East,
            (Axis::Longitude, true) => Hemisphere::West,
        };

        let magnitude = value.abs();
        let degrees = magnitude.trunc();
        let total_minutes = (magnitude - degrees) * 60.0;
        let minutes = total_minutes.trunc();
        let seconds = (total_minutes - minutes) * 60.0;

        Self {
            hemisphere,
            degrees,
            minutes,
            seconds,
        }
    }
}

impl FromStr for Dms {
    type Err = GpsnedError;

    fn from_str(s: &str) -> Result<Self> {
        // Report the whole input, not just the offending letter
        let hemisphere = match s.chars().next().map(Hemisphere::try_from) {
            Some(Ok(hemisphere)) => hemisphere,
            _ => {
                return Err(GpsnedError::UnrecognizedHemisphere {
                    input: s.to_string(),
                })
            }
        };

        let body = s.trim_matches(|c| matches!(c, 'N' | 'S' | 'E' | 'W' | ' '));

        // At most three fields: anything past the second hyphen stays in the
        // seconds field and fails to parse there.
        let mut fields = body.splitn(3, '-');
        let degrees = parse_field(s, fields.next(), "degrees")?;
        let minutes = parse_field(s, fields.next(), "minutes")?;
        let seconds = parse_field(s, fields.next(), "seconds")?;

        Ok(Self {
            hemisphere,
            degrees,
            minutes,
            seconds,
        })
    }
}

impl Display for Dms {
    /// Formats as `{letter}{deg}-{min}-{sec}`.
    ///
    /// Seconds use the formatter's precision, or two decimals by default.
    /// Seconds that round up to 60 carry into minutes, and minutes that reach
    /// 60 through that carry roll into degrees.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_SECONDS_PRECISION);
        let scale = 10f64.powi(precision as i32);

        let mut degrees = self.degrees;
        let mut minutes = self.minutes;
        let mut seconds = (self.seconds * scale).round() / scale;

        // Only carry overflow produced by rounding; out-of-range fields that
        // were parsed as-is are printed as-is.
        if seconds >= 60.0 && self.seconds < 60.0 {
            seconds = 0.0;
            minutes += 1.0;
            if minutes >= 60.0 && self.minutes < 60.0 {
                minutes = 0.0;
                degrees += 1.0;
            }
        }

        write!(
            f,
            "{}{}-{}-{:.*}",
            self.hemisphere.letter(),
            degrees,
            minutes,
            precision,
            seconds
        )
    }
}

fn parse_field(input: &str, field: Option<&str>, name: &str) -> Result<f64> {
    let field = field
        .ok_or_else(|| GpsnedError::invalid_format(input, format!("missing {} field", name)))?;

    field.trim().parse::<f64>().map_err(|_| {
        GpsnedError::invalid_format(input, format!("{} field {:?} is not a number", name, field))
    })
}

/// Convert a DMS string to signed decimal degrees.
///
/// # Arguments
///
/// * `text` - Coordinate in `{N|S|E|W}DD-MM-SS.SS` form
///
/// # Errors
///
/// - [`GpsnedError::UnrecognizedHemisphere`] if the first character is not `N`, `S`, `E` or `W`
/// - [`GpsnedError::InvalidFormat`] if there are fewer than three fields or a field is not numeric
///
/// # Examples
///
/// ```
/// use gpsned::dms::decimal_degrees;
///
/// assert_eq!(decimal_degrees("N10-0-0").unwrap(), 10.0);
/// assert_eq!(decimal_degrees("W45-30-0").unwrap(), -45.5);
/// assert!(decimal_degrees("X10-0-0").is_err());
/// assert!(decimal_degrees("N10-0").is_err());
/// ```
pub fn decimal_degrees(text: &str) -> Result<f64> {
    let value = text.parse::<Dms>()?.to_decimal();
    tracing::trace!(input = text, value, "parsed DMS coordinate");
    Ok(value)
}
