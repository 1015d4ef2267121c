//! # Room Quantity Calculation
//!
//! Converts one room's measurements into the eight material counts of a
//! suspended gypsum-board ceiling.
//!
//! ## Inputs
//!
//! All measurements are in centimeters:
//! - `length_cm` (B) and `width_cm` (C) of the room, both > 0
//! - `drop_cm` (D), how far the new ceiling hangs below the structural slab
//!
//! ## Formulas
//!
//! "Round up" is the ceiling function, applied once to each final expression:
//!
//! ```text
//! H = 2 × (B + C)
//! G = ⌈ (C/60 − 1) × (B/40 − 1) × (D − 5) / 300 ⌉
//! E = ⌈ (B/40 − 1) × (C/300) + G ⌉
//! F = ⌈ (C/60 − 1) × (B/300) × 2 + H/300 ⌉
//! I = ⌈ (B × C) / (300 × 120) ⌉
//! J =   (E − G) × 300 / 50            (not rounded)
//! K = ⌈ ((E − G) + (I − 1) + H/300) × 300 / 15 ⌉
//! L = ⌈ (C/60 − 1) × (B/40 − 1) × 6 ⌉
//! ```
//!
//! G feeds E, J and K, so it is computed first. The helper for each of those
//! formulas takes its upstream values as arguments, which makes the order a
//! data dependency rather than a statement-order convention.
//!
//! Undersized rooms and drops of 5 cm or less are valid input: they produce
//! zero or negative counts, which are returned unchanged.
//!
//! There is no upper bound on length or width. Inputs large enough to
//! overflow `f64` inside a formula (sides around 1e155 cm) are accepted:
//! G and E come out infinite and J and K become NaN, since they subtract G
//! from E. Callers taking untrusted input should bound it themselves.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::room::{calculate, RoomDimensions};
//!
//! let room = RoomDimensions::new(400.0, 500.0, 50.0);
//! let q = calculate(&room).unwrap();
//!
//! assert_eq!(q.hanger, 10.0);
//! assert_eq!(q.main_channel, 25.0);
//! assert_eq!(q.concrete_screw, 90.0);
//! ```

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::materials::Material;
use crate::units::{Centimeters, Meters, SquareMeters};

/// Furring channel spacing (cm)
const FURRING_SPACING_CM: f64 = 60.0;
/// Main channel / hanger spacing along the length (cm)
const MAIN_SPACING_CM: f64 = 40.0;
/// Stock length of channels and angles (cm)
const STOCK_LENGTH_CM: f64 = 300.0;
/// Gypsum board sheet width (cm); sheets are `STOCK_LENGTH_CM` long
const BOARD_WIDTH_CM: f64 = 120.0;
/// Drop taken up by the hanger fittings themselves (cm)
const HANGER_FITTING_CM: f64 = 5.0;
/// Anchor spacing along a main channel (cm)
const ANCHOR_SPACING_CM: f64 = 50.0;
/// Gypsum screw spacing (cm)
const SCREW_SPACING_CM: f64 = 15.0;
/// Clips per furring/main channel crossing
const CLIPS_PER_CROSSING: f64 = 6.0;

/// Measurements of a single room.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length_cm": 400.0,
///   "width_cm": 500.0,
///   "drop_cm": 50.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    /// Room length B (cm)
    pub length_cm: f64,

    /// Room width C (cm)
    pub width_cm: f64,

    /// Ceiling drop D below the structural ceiling (cm)
    pub drop_cm: f64,
}

impl RoomDimensions {
    /// Create dimensions from centimeter values
    pub fn new(length_cm: f64, width_cm: f64, drop_cm: f64) -> Self {
        RoomDimensions {
            length_cm,
            width_cm,
            drop_cm,
        }
    }

    /// Create dimensions from meter values
    pub fn from_meters(length: Meters, width: Meters, drop: Meters) -> Self {
        RoomDimensions {
            length_cm: Centimeters::from(length).0,
            width_cm: Centimeters::from(width).0,
            drop_cm: Centimeters::from(drop).0,
        }
    }

    /// Validate input parameters.
    ///
    /// Every dimension must be finite; length and width must be positive.
    /// The drop may be any finite value.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("length_cm", self.length_cm),
            ("width_cm", self.width_cm),
            ("drop_cm", self.drop_cm),
        ] {
            if !value.is_finite() {
                return Err(CalcError::invalid_dimension(
                    field,
                    value.to_string(),
                    "Dimension must be a finite number",
                ));
            }
        }
        if self.length_cm <= 0.0 {
            return Err(CalcError::invalid_dimension(
                "length_cm",
                self.length_cm.to_string(),
                "Length must be positive",
            ));
        }
        if self.width_cm <= 0.0 {
            return Err(CalcError::invalid_dimension(
                "width_cm",
                self.width_cm.to_string(),
                "Width must be positive",
            ));
        }
        Ok(())
    }

    /// Ceiling area
    pub fn area(&self) -> SquareMeters {
        SquareMeters::from_sides_cm(Centimeters(self.length_cm), Centimeters(self.width_cm))
    }
}

/// Material counts for one room (or, summed, for a whole project).
///
/// Every field except `perimeter` and `concrete_screw` is a rounded-up
/// integer. `perimeter` is a linear measure in centimeters and keeps whatever
/// fraction the inputs had. `concrete_screw` is never rounded but is always
/// integral because it is `(E − G) × 6` over integers.
///
/// ## JSON Example
///
/// ```json
/// {
///   "perimeter": 1800.0,
///   "main_channel": 25.0,
///   "furring_channel": 26.0,
///   "hanger": 10.0,
///   "board": 6.0,
///   "concrete_screw": 90.0,
///   "gypsum_screw": 520.0,
///   "clip": 396.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoomQuantities {
    /// H: perimeter wall angle length (cm)
    pub perimeter: f64,
    /// E: main C channel pieces
    pub main_channel: f64,
    /// F: furring channel pieces
    pub furring_channel: f64,
    /// G: ceiling hangers
    pub hanger: f64,
    /// I: gypsum board sheets
    pub board: f64,
    /// J: concrete screws (anchors)
    pub concrete_screw: f64,
    /// K: gypsum screws
    pub gypsum_screw: f64,
    /// L: connection clips
    pub clip: f64,
}

impl RoomQuantities {
    /// All-zero quantities
    pub fn zero() -> Self {
        RoomQuantities::default()
    }

    /// Look up a quantity by material
    pub fn get(&self, material: Material) -> f64 {
        match material {
            Material::Perimeter => self.perimeter,
            Material::MainChannel => self.main_channel,
            Material::FurringChannel => self.furring_channel,
            Material::Hanger => self.hanger,
            Material::Board => self.board,
            Material::ConcreteScrew => self.concrete_screw,
            Material::GypsumScrew => self.gypsum_screw,
            Material::Clip => self.clip,
        }
    }

    /// Mutable access to a quantity by material
    pub fn get_mut(&mut self, material: Material) -> &mut f64 {
        match material {
            Material::Perimeter => &mut self.perimeter,
            Material::MainChannel => &mut self.main_channel,
            Material::FurringChannel => &mut self.furring_channel,
            Material::Hanger => &mut self.hanger,
            Material::Board => &mut self.board,
            Material::ConcreteScrew => &mut self.concrete_screw,
            Material::GypsumScrew => &mut self.gypsum_screw,
            Material::Clip => &mut self.clip,
        }
    }

    /// Materials whose count came out below zero (undersized rooms, low drops)
    pub fn negative_materials(&self) -> Vec<Material> {
        Material::ALL
            .iter()
            .copied()
            .filter(|m| self.get(*m) < 0.0)
            .collect()
    }
}

impl Add for RoomQuantities {
    type Output = RoomQuantities;

    fn add(mut self, rhs: RoomQuantities) -> RoomQuantities {
        self += rhs;
        self
    }
}

impl AddAssign for RoomQuantities {
    fn add_assign(&mut self, rhs: RoomQuantities) {
        for m in Material::ALL {
            *self.get_mut(m) += rhs.get(m);
        }
    }
}

impl<'a> Sum<&'a RoomQuantities> for RoomQuantities {
    fn sum<I: Iterator<Item = &'a RoomQuantities>>(iter: I) -> Self {
        iter.fold(RoomQuantities::zero(), |acc, q| acc + *q)
    }
}

/// Smallest integer not less than `value`.
///
/// `-0.0` is folded to `0.0` so slightly negative sub-unit results read as 0.
fn round_up(value: f64) -> f64 {
    value.ceil() + 0.0
}

fn perimeter(b: f64, c: f64) -> f64 {
    2.0 * (b + c)
}

fn hanger(b: f64, c: f64, d: f64) -> f64 {
    round_up(
        ((c / FURRING_SPACING_CM) - 1.0) * ((b / MAIN_SPACING_CM) - 1.0) * (d - HANGER_FITTING_CM)
            / STOCK_LENGTH_CM,
    )
}

fn main_channel(b: f64, c: f64, hanger: f64) -> f64 {
    round_up((((b / MAIN_SPACING_CM) - 1.0) * (c / STOCK_LENGTH_CM)) + hanger)
}

fn furring_channel(b: f64, c: f64, perimeter: f64) -> f64 {
    round_up(
        (((c / FURRING_SPACING_CM) - 1.0) * (b / STOCK_LENGTH_CM) * 2.0)
            + (perimeter / STOCK_LENGTH_CM),
    )
}

fn board(b: f64, c: f64) -> f64 {
    round_up((b * c) / (STOCK_LENGTH_CM * BOARD_WIDTH_CM))
}

/// Anchors: exact, never rounded. Integral whenever both inputs are.
fn concrete_screw(main_channel: f64, hanger: f64) -> f64 {
    (main_channel - hanger) * STOCK_LENGTH_CM / ANCHOR_SPACING_CM
}

fn gypsum_screw(main_channel: f64, hanger: f64, board: f64, perimeter: f64) -> f64 {
    round_up(
        ((main_channel - hanger) + (board - 1.0) + (perimeter / STOCK_LENGTH_CM)) * STOCK_LENGTH_CM
            / SCREW_SPACING_CM,
    )
}

fn clip(b: f64, c: f64) -> f64 {
    round_up(((c / FURRING_SPACING_CM) - 1.0) * ((b / MAIN_SPACING_CM) - 1.0) * CLIPS_PER_CROSSING)
}

/// Calculate the material quantities for one room.
///
/// # Arguments
///
/// * `input` - Room measurements in centimeters
///
/// # Returns
///
/// * `Ok(RoomQuantities)` - The eight material counts
/// * `Err(CalcError::InvalidDimension)` - A dimension is non-finite, or length/width ≤ 0
pub fn calculate(input: &RoomDimensions) -> CalcResult<RoomQuantities> {
    input.validate()?;

    let b = input.length_cm;
    let c = input.width_cm;
    let d = input.drop_cm;

    let h = perimeter(b, c);
    // G must exist before E, J and K
    let g = hanger(b, c, d);
    let e = main_channel(b, c, g);
    let f = furring_channel(b, c, h);
    let i = board(b, c);
    let j = concrete_screw(e, g);
    let k = gypsum_screw(e, g, i, h);
    let l = clip(b, c);

    let quantities = RoomQuantities {
        perimeter: h,
        main_channel: e,
        furring_channel: f,
        hanger: g,
        board: i,
        concrete_screw: j,
        gypsum_screw: k,
        clip: l,
    };

    debug!(
        length_cm = b,
        width_cm = c,
        drop_cm = d,
        ?quantities,
        "calculated room quantities"
    );

    let negative = quantities.negative_materials();
    if !negative.is_empty() {
        warn!(
            length_cm = b,
            width_cm = c,
            drop_cm = d,
            ?negative,
            "room produced negative material counts"
        );
    }

    Ok(quantities)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(h: f64, g: f64, e: f64, f: f64, i: f64, j: f64, k: f64, l: f64) -> RoomQuantities {
        RoomQuantities {
            perimeter: h,
            main_channel: e,
            furring_channel: f,
            hanger: g,
            board: i,
            concrete_screw: j,
            gypsum_screw: k,
            clip: l,
        }
    }

    #[test]
    fn test_standard_room() {
        let result = calculate(&RoomDimensions::new(400.0, 500.0, 50.0)).unwrap();
        assert_eq!(result, q(1800.0, 10.0, 25.0, 26.0, 6.0, 90.0, 520.0, 396.0));
    }

    #[test]
    fn test_reference_sheet_room() {
        // 4 m x 3 m, 20 cm drop
        let result = calculate(&RoomDimensions::new(400.0, 300.0, 20.0)).unwrap();
        assert_eq!(result, q(1400.0, 2.0, 11.0, 16.0, 4.0, 54.0, 334.0, 216.0));
    }

    #[test]
    fn test_rejects_zero_length() {
        let err = calculate(&RoomDimensions::new(0.0, 300.0, 20.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DIMENSION");
        assert!(matches!(
            err,
            CalcError::InvalidDimension { ref field, .. } if field == "length_cm"
        ));
    }

    #[test]
    fn test_rejects_negative_width() {
        let err = calculate(&RoomDimensions::new(400.0, -10.0, 20.0)).unwrap_err();
        assert!(matches!(
            err,
            CalcError::InvalidDimension { ref field, .. } if field == "width_cm"
        ));
    }

    #[test]
    fn test_rejects_nan_drop() {
        let err = calculate(&RoomDimensions::new(400.0, 300.0, f64::NAN)).unwrap_err();
        assert!(matches!(err, CalcError::InvalidDimension { ref field, .. } if field == "drop_cm"));
    }

    #[test]
    fn test_rejects_infinite_inputs() {
        assert!(calculate(&RoomDimensions::new(f64::INFINITY, 300.0, 20.0)).is_err());
        assert!(calculate(&RoomDimensions::new(400.0, f64::NEG_INFINITY, 20.0)).is_err());
        assert!(calculate(&RoomDimensions::new(400.0, 300.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn test_low_drop_is_not_an_error() {
        // Drop below the hanger fitting allowance: G goes negative, no error
        let result = calculate(&RoomDimensions::new(400.0, 500.0, 2.0)).unwrap();
        // (500/60 - 1) * 9 * (-3) / 300 = -0.66.. -> 0
        assert_eq!(result.hanger, 0.0);
        assert!(result.hanger.is_sign_positive());

        let result = calculate(&RoomDimensions::new(400.0, 500.0, -100.0)).unwrap();
        // 66 * -105 / 300 = -23.1 -> -23
        assert_eq!(result.hanger, -23.0);
        assert_eq!(result.main_channel, -8.0);
        assert_eq!(result.concrete_screw, 90.0);
    }

    #[test]
    fn test_tiny_room_passes_negatives_through() {
        // 20 x 30 cm: both module terms are negative
        let result = calculate(&RoomDimensions::new(20.0, 30.0, 50.0)).unwrap();
        // (0.5 - 1) * (0.5 - 1) * 6 = 1.5 -> 2
        assert_eq!(result.clip, 2.0);
        // (-0.5) * 0.1 + G
        assert_eq!(result.hanger, 1.0);
        assert_eq!(result.main_channel, 1.0);
        assert_eq!(result.board, 1.0);

        // 20 x 120 cm: one factor negative, one positive
        let result = calculate(&RoomDimensions::new(20.0, 120.0, 50.0)).unwrap();
        // (2 - 1) * (0.5 - 1) * 6 = -3
        assert_eq!(result.clip, -3.0);
        assert!(result.negative_materials().contains(&Material::Clip));
    }

    #[test]
    fn test_concrete_screws_always_integral() {
        let lengths = [1.0, 37.5, 120.0, 333.3, 400.0, 612.7, 1000.0, 2450.5];
        let widths = [1.0, 59.9, 60.0, 300.0, 451.25, 500.0, 1200.0];
        let drops = [-40.0, 0.0, 5.0, 7.3, 20.0, 50.0, 133.7];

        for &b in &lengths {
            for &c in &widths {
                for &d in &drops {
                    let r = calculate(&RoomDimensions::new(b, c, d)).unwrap();
                    assert_eq!(r.hanger.fract(), 0.0);
                    assert_eq!(r.main_channel.fract(), 0.0);
                    assert_eq!(r.concrete_screw.fract(), 0.0, "J not integral for {b}x{c}x{d}");
                    assert_eq!(r.concrete_screw, (r.main_channel - r.hanger) * 6.0);
                }
            }
        }
    }

    #[test]
    fn test_hanger_feeds_downstream_formulas() {
        let (b, c, d) = (400.0, 500.0, 50.0);
        let g = hanger(b, c, d);
        assert_eq!(g, 10.0);

        let h = perimeter(b, c);
        let i = board(b, c);
        let e = main_channel(b, c, g);
        assert_eq!(e, 25.0);

        // E computed while G is still unset
        let e_early = main_channel(b, c, 0.0);
        assert_eq!(e_early, 15.0);

        // G is integral, so ceil(x + G) = ceil(x) + G and E - G does not
        // depend on G. J and K only agree if E and G come from the same pass.
        assert_eq!(concrete_screw(e_early, 0.0), concrete_screw(e, g));
        assert_eq!(gypsum_screw(e_early, 0.0, i, h), gypsum_screw(e, g, i, h));

        // Mixing a stale E with the real G breaks both
        assert_eq!(concrete_screw(e_early, g), 30.0);
        assert_eq!(gypsum_screw(e_early, g, i, h), 320.0);

        let full = calculate(&RoomDimensions::new(b, c, d)).unwrap();
        let stale = RoomQuantities {
            main_channel: e_early,
            concrete_screw: concrete_screw(e_early, g),
            gypsum_screw: gypsum_screw(e_early, g, i, h),
            ..full
        };
        assert_ne!(stale.main_channel, full.main_channel);
        assert_ne!(stale, full);
        assert_eq!(full.main_channel, 25.0);
        assert_eq!(full.concrete_screw, 90.0);
        assert_eq!(full.gypsum_screw, 520.0);
    }

    #[test]
    fn test_huge_inputs_overflow_without_panicking() {
        let r = calculate(&RoomDimensions::new(1e200, 1e200, 50.0)).unwrap();
        assert!(r.hanger.is_infinite());
        assert!(r.main_channel.is_infinite());
        // inf - inf
        assert!(r.concrete_screw.is_nan());
        assert!(r.gypsum_screw.is_nan());
        assert!(r.perimeter.is_finite());
    }

    #[test]
    fn test_rounding_applies_to_whole_expression() {
        // K = ceil((9 + 3 + 4.67) * 20) = ceil(333.3) = 334.
        // Rounding H/300 up on its own first would give (9 + 3 + 5) * 20 = 340.
        let (e, g, i, h) = (11.0, 2.0, 4.0, 1400.0);
        assert_eq!(gypsum_screw(e, g, i, h), 334.0);

        let r = calculate(&RoomDimensions::new(300.0, 300.0, 20.0)).unwrap();
        assert_eq!(r.furring_channel, 12.0);
        assert_eq!(r.gypsum_screw, 260.0);
    }

    #[test]
    fn test_fractional_perimeter_kept() {
        let r = calculate(&RoomDimensions::new(400.25, 500.0, 50.0)).unwrap();
        assert_eq!(r.perimeter, 1800.5);
    }

    #[test]
    fn test_from_meters() {
        let dims = RoomDimensions::from_meters(Meters(4.0), Meters(5.0), Meters(0.5));
        assert_eq!(dims, RoomDimensions::new(400.0, 500.0, 50.0));
        assert_eq!(dims.area().0, 20.0);
    }

    #[test]
    fn test_get_by_material() {
        let r = calculate(&RoomDimensions::new(400.0, 500.0, 50.0)).unwrap();
        assert_eq!(r.get(Material::Hanger), 10.0);
        assert_eq!(r.get(Material::Perimeter), 1800.0);
        assert_eq!(r.get(Material::Clip), 396.0);
    }

    #[test]
    fn test_add_is_componentwise() {
        let a = calculate(&RoomDimensions::new(400.0, 500.0, 50.0)).unwrap();
        let b = calculate(&RoomDimensions::new(400.0, 300.0, 20.0)).unwrap();
        let sum = a + b;
        for m in Material::ALL {
            assert_eq!(sum.get(m), a.get(m) + b.get(m));
        }
    }

    #[test]
    fn test_serialization() {
        let dims = RoomDimensions::new(400.0, 300.0, 20.0);
        let json = serde_json::to_string(&dims).unwrap();
        let roundtrip: RoomDimensions = serde_json::from_str(&json).unwrap();
        assert_eq!(dims, roundtrip);

        let result = calculate(&dims).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("\"gypsum_screw\": 334.0"));
    }
}
