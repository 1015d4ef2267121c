//! # Takeoff Calculations
//!
//! Each calculation follows the pattern:
//!
//! - an input type (JSON-serializable)
//! - a result type (JSON-serializable)
//! - a pure function from one to the other, returning `CalcResult`
//!
//! ## Available Calculations
//!
//! - [`room`] - Material quantities for a single room
//! - [`totals`] - Componentwise sum of many rooms

pub mod room;
pub mod totals;

// Re-export commonly used types
pub use room::{calculate, RoomDimensions, RoomQuantities};
pub use totals::{aggregate, ProjectTotals};
