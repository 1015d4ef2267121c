//! # calc_core - Suspended Ceiling Takeoff Engine
//!
//! `calc_core` estimates material quantities for suspended gypsum-board
//! ceilings. Three room measurements go in, eight material counts come out;
//! rooms sum into project totals, and totals combine with a price table into
//! a cost breakdown. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Injected Prices**: No global settings; the price table is an argument
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::{aggregate, calculate, price_breakdown, Material, PriceTable, RoomDimensions};
//!
//! let living = calculate(&RoomDimensions::new(400.0, 500.0, 50.0)).unwrap();
//! let bedroom = calculate(&RoomDimensions::new(400.0, 300.0, 20.0)).unwrap();
//! let totals = aggregate([&living, &bedroom]);
//!
//! let prices = PriceTable::new().with_price(Material::Board, 30.0).unwrap();
//! let costs = price_breakdown(&totals, &prices);
//! assert_eq!(costs.grand_total, 300.0);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Room calculator and project aggregation
//! - [`pricing`] - Price tables and cost breakdowns
//! - [`project`] - Optional room-list container with metadata and settings
//! - [`materials`] - The eight ceiling materials and their letter codes
//! - [`units`] - Length unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod materials;
pub mod pricing;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{aggregate, calculate, ProjectTotals, RoomDimensions, RoomQuantities};
pub use errors::{CalcError, CalcResult};
pub use materials::Material;
pub use pricing::{price_breakdown, CostBreakdown, CostLine, PriceTable};
pub use project::{Project, ProjectMetadata, ProjectSettings, RoomEntry};
