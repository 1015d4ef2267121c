//! # Project Data Structures
//!
//! The `Project` struct is an optional container for callers that want the
//! engine to hold their room list. It is plain data: serializable with serde,
//! with no file handling of its own.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, project name, client, timestamps)
//! ├── settings: ProjectSettings (unit prices)
//! └── rooms: Vec<RoomEntry> (dimensions + computed quantities, insertion order)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::project::Project;
//! use calc_core::calculations::room::RoomDimensions;
//! use calc_core::materials::Material;
//!
//! let mut project = Project::new("Villa Renovation", "ACME Corp");
//! project.add_room("Living room", RoomDimensions::new(400.0, 500.0, 50.0)).unwrap();
//! project.set_price(Material::Board, 30.0).unwrap();
//!
//! assert_eq!(project.totals().board, 6.0);
//! assert_eq!(project.cost_breakdown().grand_total, 180.0);
//! ```

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::calculations::room::{calculate, RoomDimensions, RoomQuantities};
use crate::calculations::totals::{aggregate, ProjectTotals};
use crate::errors::CalcResult;
use crate::materials::Material;
use crate::pricing::{price_breakdown, CostBreakdown, PriceTable};

/// Current schema version for serialized projects
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, project name, client)
    pub meta: ProjectMetadata,

    /// Project settings (unit prices)
    pub settings: ProjectSettings,

    /// Rooms in the order they were added
    rooms: Vec<RoomEntry>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `project_name` - Name of the job
    /// * `client` - Client name
    ///
    /// # Example
    ///
    /// ```rust
    /// use calc_core::project::Project;
    ///
    /// let project = Project::new("Office Fit-out", "Client Corp");
    /// assert_eq!(project.meta.client, "Client Corp");
    /// assert_eq!(project.room_count(), 0);
    /// ```
    pub fn new(project_name: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                project_name: project_name.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: ProjectSettings::default(),
            rooms: Vec::new(),
        }
    }

    /// Validate and calculate a room, then append it.
    ///
    /// Returns the UUID assigned to the room. An invalid room is rejected
    /// and the room list is left unchanged.
    pub fn add_room(
        &mut self,
        label: impl Into<String>,
        dimensions: RoomDimensions,
    ) -> CalcResult<Uuid> {
        let quantities = calculate(&dimensions)?;
        let id = Uuid::new_v4();
        let label = label.into();
        debug!(%id, label = %label, "adding room to project");
        self.rooms.push(RoomEntry {
            id,
            label,
            dimensions,
            quantities,
        });
        self.touch();
        Ok(id)
    }

    /// Remove a room by UUID.
    ///
    /// Returns the removed room if it existed.
    pub fn remove_room(&mut self, id: &Uuid) -> Option<RoomEntry> {
        let index = self.rooms.iter().position(|r| &r.id == id)?;
        let room = self.rooms.remove(index);
        self.touch();
        Some(room)
    }

    /// Get a room by UUID.
    pub fn room(&self, id: &Uuid) -> Option<&RoomEntry> {
        self.rooms.iter().find(|r| &r.id == id)
    }

    /// All rooms, in insertion order.
    pub fn rooms(&self) -> &[RoomEntry] {
        &self.rooms
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Sum of every room's quantities.
    pub fn totals(&self) -> ProjectTotals {
        aggregate(self.rooms.iter().map(|r| &r.quantities))
    }

    /// Cost breakdown of the current totals at the project's prices.
    pub fn cost_breakdown(&self) -> CostBreakdown {
        price_breakdown(&self.totals(), &self.settings.prices)
    }

    /// Set a unit price in the project settings.
    pub fn set_price(&mut self, material: Material, price: f64) -> CalcResult<()> {
        self.settings.prices.set_price(material, price)?;
        self.touch();
        Ok(())
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "")
    }
}

/// A room with its measurements and the quantities computed from them.
///
/// Deserializing a room re-validates its dimensions and recomputes its
/// quantities, so stored quantities are never trusted. A room whose
/// dimensions fail validation fails to load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomEntry {
    pub id: Uuid,

    /// User label (e.g., "Kitchen", "R-3")
    pub label: String,

    pub dimensions: RoomDimensions,

    /// Computed from `dimensions` when the room is added or loaded
    pub quantities: RoomQuantities,
}

impl<'de> Deserialize<'de> for RoomEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct StoredRoom {
            id: Uuid,
            label: String,
            dimensions: RoomDimensions,
            quantities: Option<RoomQuantities>,
        }

        let stored = StoredRoom::deserialize(deserializer)?;
        let quantities = calculate(&stored.dimensions).map_err(D::Error::custom)?;
        if stored.quantities.is_some_and(|q| q != quantities) {
            warn!(
                id = %stored.id,
                label = %stored.label,
                "stored room quantities were stale, recomputed"
            );
        }

        Ok(RoomEntry {
            id: stored.id,
            label: stored.label,
            dimensions: stored.dimensions,
            quantities,
        })
    }
}

/// Project metadata stored in the header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the job
    pub project_name: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Project settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Unit prices used by [`Project::cost_breakdown`]
    pub prices: PriceTable,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        ProjectSettings {
            prices: PriceTable::with_defaults(),
        }
    }
}
