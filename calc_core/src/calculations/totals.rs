//! # Project Totals
//!
//! Sums per-room quantities into project totals.
//!
//! The rounded fields are whole numbers, so any summation order gives the same
//! result. The perimeter can carry fractions, where floating-point addition
//! is order-sensitive, so every field is summed over its values in ascending
//! order. A permuted room list therefore yields bit-identical totals.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::room::{calculate, RoomDimensions};
//! use calc_core::calculations::totals::aggregate;
//!
//! let a = calculate(&RoomDimensions::new(400.0, 500.0, 50.0)).unwrap();
//! let b = calculate(&RoomDimensions::new(400.0, 300.0, 20.0)).unwrap();
//!
//! let totals = aggregate([&a, &b]);
//! assert_eq!(totals.board, 10.0);
//! assert_eq!(totals.gypsum_screw, 854.0);
//! ```

use tracing::debug;

use crate::calculations::room::RoomQuantities;
use crate::materials::Material;

/// Project-wide material totals; the same eight fields as a single room.
pub type ProjectTotals = RoomQuantities;

/// Sum room quantities componentwise.
///
/// An empty input yields all-zero totals.
pub fn aggregate<'a, I>(rooms: I) -> ProjectTotals
where
    I: IntoIterator<Item = &'a RoomQuantities>,
{
    let rooms: Vec<&RoomQuantities> = rooms.into_iter().collect();
    let mut totals = ProjectTotals::zero();

    for material in Material::ALL {
        let mut values: Vec<f64> = rooms.iter().map(|q| q.get(material)).collect();
        values.sort_by(f64::total_cmp);
        // Start from +0.0 so an all-negative-zero column still sums to 0
        *totals.get_mut(material) = values.into_iter().fold(0.0, |acc, v| acc + v);
    }

    debug!(room_count = rooms.len(), ?totals, "aggregated project totals");
    totals
}
