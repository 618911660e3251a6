//! # Catalog
//!
//! The categorical options a structure is built from. Each option is a
//! closed enum with a canonical id (used in JSON and permalinks) and a
//! display label (used in lead text and quote sheets).
//!
//! Free-form strings from forms or query strings are mapped onto these enums
//! once, at the boundary, via `from_str_flexible`. Business logic never
//! inspects raw strings.
//!
//! ## Example
//!
//! ```rust
//! use shade_core::catalog::{Finish, Infill};
//!
//! assert_eq!(Infill::from_str_flexible("Slats (Medium)").unwrap(), Infill::SlatsMedium);
//! assert_eq!(Finish::from_str_flexible("hdg").unwrap(), Finish::Hdg);
//! assert_eq!(Finish::Hdg.id(), "HDG");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ShadeError, ShadeResult};

/// Lowercase and strip everything but letters and digits, so that
/// `"Slats (Medium)"`, `"slats_medium"` and `"SlatsMedium"` compare equal.
fn option_key(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

// ============================================================================
// Style
// ============================================================================

/// Roof / post topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Style {
    /// Freestanding single-slope roof
    #[default]
    Mono,
    /// Freestanding two-slope roof with a ridge
    Gable,
    /// Single-slope roof ledgered to a wall on the back side
    AttachedMono,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Mono, Style::Gable, Style::AttachedMono];

    /// Canonical id (`"Mono"`, `"Gable"`, `"AttachedMono"`)
    pub fn id(&self) -> &'static str {
        match self {
            Style::Mono => "Mono",
            Style::Gable => "Gable",
            Style::AttachedMono => "AttachedMono",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Style::Mono => "Freestanding Mono",
            Style::Gable => "Freestanding Gable",
            Style::AttachedMono => "Attached Mono",
        }
    }

    /// Whether one side of the structure is carried by an existing wall
    pub fn is_attached(&self) -> bool {
        matches!(self, Style::AttachedMono)
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> ShadeResult<Self> {
        match option_key(s).as_str() {
            "mono" | "freestandingmono" | "monoslope" => Ok(Style::Mono),
            "gable" | "freestandinggable" => Ok(Style::Gable),
            "attachedmono" | "attached" => Ok(Style::AttachedMono),
            _ => Err(ShadeError::unknown_option("style", s)),
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ============================================================================
// Infill
// ============================================================================

/// Roof infill between the beams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Infill {
    #[default]
    None,
    /// Slats at ~12" spacing
    SlatsOpen,
    /// Slats at ~6" spacing
    SlatsMedium,
    /// Slats at ~4" spacing
    SlatsTight,
    PanelsPerforated,
    PanelsSolid,
}

impl Infill {
    pub const ALL: [Infill; 6] = [
        Infill::None,
        Infill::SlatsOpen,
        Infill::SlatsMedium,
        Infill::SlatsTight,
        Infill::PanelsPerforated,
        Infill::PanelsSolid,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Infill::None => "None",
            Infill::SlatsOpen => "SlatsOpen",
            Infill::SlatsMedium => "SlatsMedium",
            Infill::SlatsTight => "SlatsTight",
            Infill::PanelsPerforated => "PanelsPerforated",
            Infill::PanelsSolid => "PanelsSolid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Infill::None => "None",
            Infill::SlatsOpen => "Slats (Open)",
            Infill::SlatsMedium => "Slats (Medium)",
            Infill::SlatsTight => "Slats (Tight)",
            Infill::PanelsPerforated => "Panels (Perforated)",
            Infill::PanelsSolid => "Panels (Solid)",
        }
    }

    /// Center-to-center slat spacing in feet, `None` for non-slat infill
    pub fn slat_spacing_ft(&self) -> Option<f64> {
        match self {
            Infill::SlatsOpen => Some(1.0),
            Infill::SlatsMedium => Some(0.5),
            Infill::SlatsTight => Some(0.33),
            Infill::None | Infill::PanelsPerforated | Infill::PanelsSolid => None,
        }
    }

    pub fn is_panel(&self) -> bool {
        matches!(self, Infill::PanelsPerforated | Infill::PanelsSolid)
    }

    /// Tight slats and panels load the beams enough to need reinforcement
    /// on wide spans.
    pub fn is_heavy(&self) -> bool {
        *self == Infill::SlatsTight || self.is_panel()
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> ShadeResult<Self> {
        match option_key(s).as_str() {
            "none" | "noinfill" | "openroof" => Ok(Infill::None),
            "slatsopen" | "open" => Ok(Infill::SlatsOpen),
            "slatsmedium" | "medium" | "slats" => Ok(Infill::SlatsMedium),
            "slatstight" | "tight" => Ok(Infill::SlatsTight),
            "panelsperforated" | "perforated" | "perforatedpanels" => Ok(Infill::PanelsPerforated),
            "panelssolid" | "solid" | "solidpanels" => Ok(Infill::PanelsSolid),
            _ => Err(ShadeError::unknown_option("infill", s)),
        }
    }
}

impl std::fmt::Display for Infill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ============================================================================
// Finish
// ============================================================================

/// Surface coating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Finish {
    #[default]
    Black,
    White,
    Bronze,
    /// Hot-dip galvanized
    #[serde(rename = "HDG")]
    Hdg,
}

impl Finish {
    pub const ALL: [Finish; 4] = [Finish::Black, Finish::White, Finish::Bronze, Finish::Hdg];

    pub fn id(&self) -> &'static str {
        match self {
            Finish::Black => "Black",
            Finish::White => "White",
            Finish::Bronze => "Bronze",
            Finish::Hdg => "HDG",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Finish::Black => "Black",
            Finish::White => "White",
            Finish::Bronze => "Bronze",
            Finish::Hdg => "Hot-Dip Galvanized",
        }
    }

    /// Preview color as a hex string
    pub fn color_hex(&self) -> &'static str {
        match self {
            Finish::Black => "#17181a",
            Finish::White => "#f8f8f8",
            Finish::Bronze => "#3b2a20",
            Finish::Hdg => "#9aa0a6",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> ShadeResult<Self> {
        match option_key(s).as_str() {
            "black" => Ok(Finish::Black),
            "white" => Ok(Finish::White),
            "bronze" => Ok(Finish::Bronze),
            "hdg" | "galvanized" | "hotdipgalvanized" => Ok(Finish::Hdg),
            _ => Err(ShadeError::unknown_option("finish", s)),
        }
    }
}

impl std::fmt::Display for Finish {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ============================================================================
// Anchor
// ============================================================================

/// Foundation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Anchor {
    /// Base plates bolted to an existing slab
    #[default]
    Slab,
    /// Poured concrete footings
    Footings,
}

impl Anchor {
    pub const ALL: [Anchor; 2] = [Anchor::Slab, Anchor::Footings];

    pub fn id(&self) -> &'static str {
        match self {
            Anchor::Slab => "Slab",
            Anchor::Footings => "Footings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Anchor::Slab => "Slab-mounted base plates",
            Anchor::Footings => "Poured footings",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> ShadeResult<Self> {
        match option_key(s).as_str() {
            "slab" | "slabmount" | "baseplate" | "baseplates" => Ok(Anchor::Slab),
            "footings" | "footing" | "piers" => Ok(Anchor::Footings),
            _ => Err(ShadeError::unknown_option("anchor", s)),
        }
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ============================================================================
// Size presets
// ============================================================================

/// A common footprint offered as a one-click starting point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizePreset {
    pub span_ft: f64,
    pub depth_ft: f64,
}

pub const SIZE_PRESETS: [SizePreset; 4] = [
    SizePreset { span_ft: 10.0, depth_ft: 10.0 },
    SizePreset { span_ft: 12.0, depth_ft: 12.0 },
    SizePreset { span_ft: 12.0, depth_ft: 20.0 },
    SizePreset { span_ft: 20.0, depth_ft: 20.0 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infill_spellings() {
        for raw in ["SlatsMedium", "Slats (Medium)", "slats_medium", "medium", "SLATS-MEDIUM"] {
            assert_eq!(Infill::from_str_flexible(raw).unwrap(), Infill::SlatsMedium, "{raw}");
        }
        assert_eq!(Infill::from_str_flexible("Slats (Tight)").unwrap(), Infill::SlatsTight);
        assert_eq!(Infill::from_str_flexible("none").unwrap(), Infill::None);
        assert!(Infill::from_str_flexible("lattice").is_err());
    }

    #[test]
    fn test_ids_parse_back() {
        for style in Style::ALL {
            assert_eq!(Style::from_str_flexible(style.id()).unwrap(), style);
        }
        for infill in Infill::ALL {
            assert_eq!(Infill::from_str_flexible(infill.id()).unwrap(), infill);
            assert_eq!(Infill::from_str_flexible(infill.label()).unwrap(), infill);
        }
        for finish in Finish::ALL {
            assert_eq!(Finish::from_str_flexible(finish.id()).unwrap(), finish);
        }
        for anchor in Anchor::ALL {
            assert_eq!(Anchor::from_str_flexible(anchor.id()).unwrap(), anchor);
        }
    }

    #[test]
    fn test_serde_ids_match_canonical_ids() {
        for finish in Finish::ALL {
            let json = serde_json::to_string(&finish).unwrap();
            assert_eq!(json, format!("\"{}\"", finish.id()));
        }
        for infill in Infill::ALL {
            let json = serde_json::to_string(&infill).unwrap();
            assert_eq!(json, format!("\"{}\"", infill.id()));
        }
        for style in Style::ALL {
            let json = serde_json::to_string(&style).unwrap();
            assert_eq!(json, format!("\"{}\"", style.id()));
        }
    }

    #[test]
    fn test_unknown_options_are_errors() {
        assert!(Style::from_str_flexible("Dome").is_err());
        assert!(Finish::from_str_flexible("Chrome").is_err());
        assert!(Anchor::from_str_flexible("").is_err());
    }

    #[test]
    fn test_slat_spacing_ordering() {
        let open = Infill::SlatsOpen.slat_spacing_ft().unwrap();
        let medium = Infill::SlatsMedium.slat_spacing_ft().unwrap();
        let tight = Infill::SlatsTight.slat_spacing_ft().unwrap();
        assert!(open > medium && medium > tight);
        assert!(Infill::None.slat_spacing_ft().is_none());
        assert!(Infill::PanelsSolid.is_panel());
    }

    #[test]
    fn test_heavy_infills() {
        let heavy: Vec<Infill> = Infill::ALL.into_iter().filter(Infill::is_heavy).collect();
        assert_eq!(heavy, vec![Infill::SlatsTight, Infill::PanelsPerforated, Infill::PanelsSolid]);
    }
}
