//! # Units Module
//!
//! Fixed-point quantities used by the engine.
//!
//! Credits, marks and grade points are stored as integer hundredths. No
//! floating-point arithmetic happens in the engine; `f64` only appears at the
//! serialization edge.

use crate::error::{Result, SgpaError};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Hundredths per whole unit.
pub const SCALE: u64 = 100;

/// Upper bound for marks, in hundredths.
pub const MAX_MARKS: u16 = 10_000;

/// Upper bound for a grade point, in hundredths.
pub const MAX_GRADE_POINT: u16 = 400;

// =============================================================================
// DECIMAL PARSING / FORMATTING
// =============================================================================

/// Parse a non-negative decimal with at most two fractional digits into
/// hundredths.
///
/// Accepts `"3"`, `"1.5"`, `"0.75"`, `".5"` and `"2."`. Rejects signs,
/// exponents and a third decimal place.
pub fn parse_hundredths(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    let invalid = || SgpaError::InvalidNumber(input.trim().to_string());

    let (whole, frac) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if frac.len() > 2
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !frac.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let whole_value: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let frac_value: u64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
        _ => frac.parse().map_err(|_| invalid())?,
    };

    whole_value
        .checked_mul(SCALE)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(invalid)
}

/// Format hundredths with exactly two decimal places (`375` -> `"3.75"`).
pub fn format_hundredths(value: u64) -> String {
    format!("{}.{:02}", value / SCALE, value % SCALE)
}

/// Format hundredths without trailing zeros (`300` -> `"3"`, `150` -> `"1.5"`).
pub fn format_compact(value: u64) -> String {
    let whole = value / SCALE;
    let frac = value % SCALE;
    if frac == 0 {
        whole.to_string()
    } else if frac % 10 == 0 {
        format!("{}.{}", whole, frac / 10)
    } else {
        format!("{}.{:02}", whole, frac)
    }
}

/// The only place hundredths become a float.
#[allow(clippy::float_arithmetic)]
pub(crate) fn hundredths_to_f64(value: u64) -> f64 {
    value as f64 / SCALE as f64
}

/// Serde visitor that reads a JSON number or numeric string as hundredths.
///
/// Floats are taken through their shortest decimal representation, so `1.5`
/// becomes `150` exactly.
struct HundredthsVisitor;

impl Visitor<'_> for HundredthsVisitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative number with at most two decimal places")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<u64, E> {
        v.checked_mul(SCALE)
            .ok_or_else(|| E::custom(SgpaError::InvalidNumber(v.to_string())))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<u64, E> {
        let unsigned =
            u64::try_from(v).map_err(|_| E::custom(SgpaError::InvalidNumber(v.to_string())))?;
        self.visit_u64(unsigned)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<u64, E> {
        parse_hundredths(&v.to_string()).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<u64, E> {
        parse_hundredths(v).map_err(E::custom)
    }
}

// =============================================================================
// CREDITS
// =============================================================================

/// Course credits in hundredths. Zero is a valid (incomplete) value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Credits(u64);

impl Credits {
    /// Zero credits.
    pub const ZERO: Self = Self(0);

    /// Create from hundredths (`150` is 1.5 credits).
    #[must_use]
    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths)
    }

    /// Create from a whole number of credits.
    #[must_use]
    pub const fn whole(credits: u64) -> Self {
        Self(credits.saturating_mul(SCALE))
    }

    /// Raw value in hundredths.
    #[must_use]
    pub const fn hundredths(self) -> u64 {
        self.0
    }

    /// Whether the course carries any credit.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl FromStr for Credits {
    type Err = SgpaError;

    fn from_str(s: &str) -> Result<Self> {
        parse_hundredths(s).map(Self)
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_compact(self.0))
    }
}

impl Serialize for Credits {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(hundredths_to_f64(self.0))
    }
}

impl<'de> Deserialize<'de> for Credits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(HundredthsVisitor).map(Self)
    }
}

// =============================================================================
// MARKS
// =============================================================================

/// Examination marks in hundredths, bounded to 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Marks(u16);

impl Marks {
    /// Create from hundredths, rejecting anything above 100.
    pub fn from_hundredths(hundredths: u64) -> Result<Self> {
        u16::try_from(hundredths)
            .ok()
            .filter(|v| *v <= MAX_MARKS)
            .map(Self)
            .ok_or_else(|| SgpaError::MarksOutOfRange(format_compact(hundredths)))
    }

    /// Create from whole marks.
    pub fn whole(marks: u64) -> Result<Self> {
        Self::from_hundredths(marks.saturating_mul(SCALE))
    }

    /// Raw value in hundredths.
    #[must_use]
    pub const fn hundredths(self) -> u16 {
        self.0
    }
}

impl FromStr for Marks {
    type Err = SgpaError;

    fn from_str(s: &str) -> Result<Self> {
        parse_hundredths(s).and_then(Self::from_hundredths)
    }
}

impl fmt::Display for Marks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_compact(u64::from(self.0)))
    }
}

impl Serialize for Marks {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(hundredths_to_f64(u64::from(self.0)))
    }
}

impl<'de> Deserialize<'de> for Marks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let hundredths = deserializer.deserialize_any(HundredthsVisitor)?;
        Self::from_hundredths(hundredths).map_err(de::Error::custom)
    }
}

// =============================================================================
// GRADE POINT
// =============================================================================

/// A grade point (or SGPA threshold) in hundredths, 0.00-4.00.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GradePoint(u16);

impl GradePoint {
    /// 0.00
    pub const ZERO: Self = Self(0);

    /// 4.00
    pub const MAX: Self = Self(MAX_GRADE_POINT);

    /// Create from hundredths, clamped to 4.00.
    #[must_use]
    pub const fn from_hundredths(hundredths: u16) -> Self {
        if hundredths > MAX_GRADE_POINT {
            Self(MAX_GRADE_POINT)
        } else {
            Self(hundredths)
        }
    }

    /// Raw value in hundredths.
    #[must_use]
    pub const fn hundredths(self) -> u16 {
        self.0
    }
}

impl fmt::Display for GradePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_hundredths(u64::from(self.0)))
    }
}

impl Serialize for GradePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(hundredths_to_f64(u64::from(self.0)))
    }
}

// =============================================================================
// TESTS
// =============================================================================
