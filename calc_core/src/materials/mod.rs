//! # Ceiling Materials
//!
//! The eight materials counted for a suspended gypsum-board ceiling. Each one
//! carries the single-letter code used on takeoff sheets, which is also how it
//! serializes, so price tables read as `{"E": 12.5, "I": 30.0}`.
//!
//! | Code | Material | Priced |
//! |------|----------|--------|
//! | I | Gypsum board | yes |
//! | E | Main C channel | yes |
//! | F | Furring channel | yes |
//! | G | Ceiling hanger | no |
//! | H | Perimeter wall angle | no |
//! | J | Concrete screw (anchor) | yes |
//! | K | Gypsum screw | yes |
//! | L | Connection clip | yes |
//!
//! ## Example
//!
//! ```rust
//! use calc_core::materials::Material;
//!
//! let m = Material::from_str_flexible("main channel").unwrap();
//! assert_eq!(m, Material::MainChannel);
//! assert_eq!(m.code(), 'E');
//! assert!(!Material::Hanger.is_priced());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// A material line in the ceiling assembly.
///
/// Variant order is the display order of the materials table, and is the
/// iteration order of any `BTreeMap` keyed by `Material`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Material {
    /// Gypsum board sheets (I)
    #[serde(rename = "I")]
    Board,
    /// Main C channel (E)
    #[serde(rename = "E")]
    MainChannel,
    /// Furring channel (F)
    #[serde(rename = "F")]
    FurringChannel,
    /// Ceiling hanger (G)
    #[serde(rename = "G")]
    Hanger,
    /// Perimeter wall angle (H)
    #[serde(rename = "H")]
    Perimeter,
    /// Concrete screw / anchor into the structural ceiling (J)
    #[serde(rename = "J")]
    ConcreteScrew,
    /// Screws fastening boards to channels (K)
    #[serde(rename = "K")]
    GypsumScrew,
    /// Connection clip (L)
    #[serde(rename = "L")]
    Clip,
}

impl Material {
    /// All materials, in display order
    pub const ALL: [Material; 8] = [
        Material::Board,
        Material::MainChannel,
        Material::FurringChannel,
        Material::Hanger,
        Material::Perimeter,
        Material::ConcreteScrew,
        Material::GypsumScrew,
        Material::Clip,
    ];

    /// Materials that are purchased and therefore priced.
    ///
    /// Hangers and the perimeter angle are structural/intermediate counts and
    /// never appear in a cost breakdown.
    pub const PRICED: [Material; 6] = [
        Material::Board,
        Material::MainChannel,
        Material::FurringChannel,
        Material::ConcreteScrew,
        Material::GypsumScrew,
        Material::Clip,
    ];

    /// Single-letter takeoff code
    pub fn code(&self) -> char {
        match self {
            Material::Board => 'I',
            Material::MainChannel => 'E',
            Material::FurringChannel => 'F',
            Material::Hanger => 'G',
            Material::Perimeter => 'H',
            Material::ConcreteScrew => 'J',
            Material::GypsumScrew => 'K',
            Material::Clip => 'L',
        }
    }

    /// Look up a material by its letter code (case-insensitive)
    pub fn from_code(code: char) -> CalcResult<Self> {
        Material::ALL
            .iter()
            .copied()
            .find(|m| m.code() == code.to_ascii_uppercase())
            .ok_or_else(|| CalcError::material_not_found(code.to_string()))
    }

    /// Parse from a letter code or a common name
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Material::from_code(c);
        }
        match trimmed.to_lowercase().replace(['-', '_'], " ").as_str() {
            "board" | "gypsum board" | "boards" => Ok(Material::Board),
            "main channel" | "main c channel" | "mainchannel" => Ok(Material::MainChannel),
            "furring channel" | "furring" | "furringchannel" => Ok(Material::FurringChannel),
            "hanger" | "hangers" | "ceiling hanger" => Ok(Material::Hanger),
            "perimeter" | "wall angle" | "perimeter angle" => Ok(Material::Perimeter),
            "concrete screw" | "concrete screws" | "anchor" | "anchors" => {
                Ok(Material::ConcreteScrew)
            }
            "gypsum screw" | "gypsum screws" => Ok(Material::GypsumScrew),
            "clip" | "clips" | "connection clip" => Ok(Material::Clip),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    /// Whether this material appears in a cost breakdown
    pub fn is_priced(&self) -> bool {
        !matches!(self, Material::Hanger | Material::Perimeter)
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Material::Board => "Gypsum Board",
            Material::MainChannel => "Main C Channel",
            Material::FurringChannel => "Furring Channel",
            Material::Hanger => "Ceiling Hanger",
            Material::Perimeter => "Perimeter Wall Angle",
            Material::ConcreteScrew => "Concrete Screws",
            Material::GypsumScrew => "Gypsum Screws",
            Material::Clip => "Connection Clips",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_unique() {
        let mut codes: Vec<char> = Material::ALL.iter().map(|m| m.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 8);
    }

    #[test]
    fn test_from_code_roundtrip() {
        for m in Material::ALL {
            assert_eq!(Material::from_code(m.code()).unwrap(), m);
            assert_eq!(Material::from_code(m.code().to_ascii_lowercase()).unwrap(), m);
        }
        assert!(Material::from_code('Z').is_err());
    }

    #[test]
    fn test_from_str_flexible() {
        assert_eq!(Material::from_str_flexible("K").unwrap(), Material::GypsumScrew);
        assert_eq!(
            Material::from_str_flexible("furring-channel").unwrap(),
            Material::FurringChannel
        );
        assert_eq!(Material::from_str_flexible("Anchors").unwrap(), Material::ConcreteScrew);
        let err = Material::from_str_flexible("rebar").unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_priced_set() {
        assert_eq!(Material::PRICED.len(), 6);
        assert!(Material::PRICED.iter().all(|m| m.is_priced()));
        assert!(!Material::Hanger.is_priced());
        assert!(!Material::Perimeter.is_priced());
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&Material::MainChannel).unwrap();
        assert_eq!(json, "\"E\"");
        let back: Material = serde_json::from_str("\"L\"").unwrap();
        assert_eq!(back, Material::Clip);
    }
}
