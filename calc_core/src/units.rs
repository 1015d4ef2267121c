//! # Unit Types
//!
//! Lightweight newtype wrappers for the length units a takeoff deals with.
//! Room dimensions are stored as plain `f64` centimeters (the unit every
//! formula is written in); these wrappers exist at the edges where callers
//! think in meters.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Centimeters, Meters};
//!
//! let length: Centimeters = Meters(4.25).into();
//! assert_eq!(length.0, 425.0);
//! ```

use serde::{Deserialize, Serialize};

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl SquareMeters {
    /// Area of a rectangle given its sides in centimeters
    pub fn from_sides_cm(a: Centimeters, b: Centimeters) -> Self {
        SquareMeters((a.0 * b.0) / 10_000.0)
    }
}

impl std::fmt::Display for Centimeters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} cm", self.0)
    }
}

impl std::fmt::Display for SquareMeters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} m²", self.0)
    }
}
