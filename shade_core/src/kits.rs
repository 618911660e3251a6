//! # Prefab Kits
//!
//! Fixed-size kits sold off the shelf, priced from a base price plus
//! per-option adjustments:
//!
//! ```text
//! total = (base + roof + color + height + mount + panels + Σ add-ons) × quantity
//! ```
//!
//! Quoting never fails. An unknown kit id falls back to the first kit and
//! unknown option ids add nothing; both are reported in [`KitQuote::ignored`].
//!
//! ## Example
//!
//! ```rust
//! use shade_core::kits::{quote_kit, KitSelection};
//! use shade_core::units::Usd;
//!
//! let selection = KitSelection {
//!     kit: "cafe-cover-20x20".to_string(),
//!     roof: Some("louvered".to_string()),
//!     addons: vec!["led".to_string()],
//!     ..KitSelection::default()
//! };
//! let quote = quote_kit(&selection);
//! assert_eq!(quote.total, Usd(8900.0 + 2400.0 + 120.0 + 260.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::config::RawStructureConfig;
use crate::units::Usd;

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kit {
    pub id: &'static str,
    pub name: &'static str,
    pub base_price: Usd,
    pub span_ft: f64,
    pub depth_ft: f64,
    /// Offered clearance range, for display
    pub clearance: &'static str,
}

impl Kit {
    /// The kit footprint as builder input, for "customize this kit".
    pub fn as_config(&self) -> RawStructureConfig {
        RawStructureConfig {
            span: Some(self.span_ft),
            depth: Some(self.depth_ft),
            ..RawStructureConfig::default()
        }
    }

    /// `10 ft × 10 ft`
    pub fn footprint(&self) -> String {
        format!("{} ft × {} ft", self.span_ft, self.depth_ft)
    }
}

pub const KITS: [Kit; 5] = [
    Kit {
        id: "patio-pro-10x10",
        name: "Patio Pro 10×10",
        base_price: Usd(2950.0),
        span_ft: 10.0,
        depth_ft: 10.0,
        clearance: "8–10 ft options",
    },
    Kit {
        id: "poolside-pavilion-12x12",
        name: "Poolside Pavilion 12×12",
        base_price: Usd(3800.0),
        span_ft: 12.0,
        depth_ft: 12.0,
        clearance: "9–10 ft options",
    },
    Kit {
        id: "cafe-cover-20x20",
        name: "Café Cover 20×20",
        base_price: Usd(8900.0),
        span_ft: 20.0,
        depth_ft: 20.0,
        clearance: "10–12 ft options",
    },
    Kit {
        id: "market-pavilion-20x24",
        name: "Market Pavilion 20×24",
        base_price: Usd(11500.0),
        span_ft: 20.0,
        depth_ft: 24.0,
        clearance: "10–12 ft options",
    },
    Kit {
        id: "grand-pavilion-24x30",
        name: "Grand Pavilion 24×30",
        base_price: Usd(18900.0),
        span_ft: 24.0,
        depth_ft: 30.0,
        clearance: "10–12 ft options",
    },
];

/// One priced choice within an option group
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KitOption {
    pub id: &'static str,
    pub label: &'static str,
    pub price_adj: Usd,
}

const fn opt(id: &'static str, label: &'static str, price_adj: f64) -> KitOption {
    KitOption {
        id,
        label,
        price_adj: Usd(price_adj),
    }
}

/// A single-choice option group
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionGroup {
    /// Group name used in line items and `ignored` entries
    pub name: &'static str,
    pub options: &'static [KitOption],
    /// Choice used when the selection leaves the group unset
    pub default_id: &'static str,
}

impl OptionGroup {
    pub fn find(&self, id: &str) -> Option<&'static KitOption> {
        let id = id.trim();
        self.options.iter().find(|o| o.id.eq_ignore_ascii_case(id))
    }
}

pub const ROOF: OptionGroup = OptionGroup {
    name: "roof",
    default_id: "corrugated",
    options: &[
        opt("corrugated", "Corrugated Steel", 0.0),
        opt("poly", "Polycarbonate Panels", -300.0),
        opt("sail", "Shade Sail Fabric", -800.0),
        opt("louvered", "Louvered Steel (Premium)", 2400.0),
    ],
};

pub const COLOR: OptionGroup = OptionGroup {
    name: "color",
    default_id: "black",
    options: &[
        opt("black", "Black (Standard)", 0.0),
        opt("charcoal", "Charcoal (Standard)", 0.0),
        opt("bronze", "Bronze (Standard)", 0.0),
        opt("white", "White (Standard)", 0.0),
        opt("ral", "Custom RAL (Premium)", 450.0),
    ],
};

pub const HEIGHT: OptionGroup = OptionGroup {
    name: "height",
    default_id: "10",
    options: &[
        opt("8", "8 ft", -100.0),
        opt("9", "9 ft", 0.0),
        opt("10", "10 ft", 120.0),
        opt("11", "11 ft", 240.0),
        opt("12", "12 ft", 360.0),
    ],
};

pub const MOUNT: OptionGroup = OptionGroup {
    name: "mount",
    default_id: "concrete",
    options: &[
        opt("concrete", "Concrete Anchor Plates", 0.0),
        opt("surface", "Surface-Mount Base Plates", 120.0),
        opt("inground", "In-Ground Post Mount", 280.0),
    ],
};

pub const PANELS: OptionGroup = OptionGroup {
    name: "panels",
    default_id: "none",
    options: &[
        opt("none", "No Side Panels", 0.0),
        opt("privacy", "Decorative Privacy Screens", 550.0),
        opt("wind", "Solid Windbreak Panels", 780.0),
        opt("curtain", "Removable Fabric Curtains", 420.0),
    ],
};

/// Add-ons are multi-select; there is no default.
pub const ADDONS: OptionGroup = OptionGroup {
    name: "addon",
    default_id: "",
    options: &[
        opt("led", "LED Lighting Kit", 260.0),
        opt("fan", "Ceiling Fan Mount Kit", 180.0),
        opt("sign", "Signage Mount", 95.0),
        opt("anchors", "Extra Anchoring Kit (High-Wind)", 160.0),
    ],
};

pub fn find_kit(id: &str) -> Option<&'static Kit> {
    let id = id.trim();
    KITS.iter().find(|k| k.id.eq_ignore_ascii_case(id))
}

// ============================================================================
// Quote
// ============================================================================

/// Kit and option ids as chosen by the customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitSelection {
    pub kit: String,
    pub roof: Option<String>,
    pub color: Option<String>,
    /// Clearance in whole feet, as an id (`"10"`)
    pub height: Option<String>,
    pub mount: Option<String>,
    pub panels: Option<String>,
    pub addons: Vec<String>,
    /// 0 is treated as 1
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    /// `"base"`, or the option group name
    pub group: &'static str,
    pub label: &'static str,
    pub amount: Usd,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KitQuote {
    pub kit: Kit,
    pub line_items: Vec<LineItem>,
    /// Base plus adjustments for one kit
    pub unit_total: Usd,
    pub quantity: u32,
    pub total: Usd,
    /// `group: id` for every id that was not recognized
    pub ignored: Vec<String>,
}

/// Price a kit selection.
pub fn quote_kit(selection: &KitSelection) -> KitQuote {
    let mut ignored = Vec::new();

    let kit = match find_kit(&selection.kit) {
        Some(kit) => *kit,
        None => {
            if !selection.kit.trim().is_empty() {
                ignored.push(format!("kit: {}", selection.kit));
            }
            KITS[0]
        }
    };

    let mut line_items = vec![LineItem {
        group: "base",
        label: kit.name,
        amount: kit.base_price,
    }];

    let singles = [
        (&ROOF, &selection.roof),
        (&COLOR, &selection.color),
        (&HEIGHT, &selection.height),
        (&MOUNT, &selection.mount),
        (&PANELS, &selection.panels),
    ];
    for (group, chosen) in singles {
        let id = chosen.as_deref().unwrap_or(group.default_id);
        match group.find(id) {
            Some(option) => line_items.push(LineItem {
                group: group.name,
                label: option.label,
                amount: option.price_adj,
            }),
            None => ignored.push(format!("{}: {}", group.name, id)),
        }
    }

    let mut seen: Vec<&'static str> = Vec::new();
    for id in &selection.addons {
        match ADDONS.find(id) {
            Some(option) if seen.contains(&option.id) => {}
            Some(option) => {
                seen.push(option.id);
                line_items.push(LineItem {
                    group: ADDONS.name,
                    label: option.label,
                    amount: option.price_adj,
                });
            }
            None => ignored.push(format!("{}: {}", ADDONS.name, id)),
        }
    }

    let unit_total = line_items.iter().fold(Usd::ZERO, |acc, item| acc + item.amount);
    let quantity = selection.quantity.max(1);

    if !ignored.is_empty() {
        tracing::debug!(?ignored, "unrecognized kit options");
    }

    KitQuote {
        kit,
        line_items,
        unit_total,
        quantity,
        total: unit_total * quantity as f64,
        ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    #[test]
    fn test_defaults_price_base_plus_standard_height() {
        let quote = quote_kit(&KitSelection {
            kit: "patio-pro-10x10".to_string(),
            ..KitSelection::default()
        });
        assert_eq!(quote.kit.id, "patio-pro-10x10");
        assert_eq!(quote.line_items.len(), 6);
        assert_eq!(quote.unit_total, Usd(2950.0 + 120.0));
        assert_eq!(quote.quantity, 1);
        assert!(quote.ignored.is_empty());
    }

    #[test]
    fn test_full_selection() {
        let quote = quote_kit(&KitSelection {
            kit: "poolside-pavilion-12x12".to_string(),
            roof: Some("louvered".to_string()),
            color: Some("RAL".to_string()),
            height: Some("12".to_string()),
            mount: Some("inground".to_string()),
            panels: Some("wind".to_string()),
            addons: vec!["led".to_string(), "fan".to_string()],
            quantity: 2,
        });
        // 3800 + 2400 + 450 + 360 + 280 + 780 + 260 + 180
        assert_eq!(quote.unit_total, Usd(8510.0));
        assert_eq!(quote.total, Usd(17020.0));
        assert_eq!(quote.line_items.len(), 8);
    }

    #[test]
    fn test_negative_adjustments() {
        let quote = quote_kit(&KitSelection {
            kit: "patio-pro-10x10".to_string(),
            roof: Some("sail".to_string()),
            height: Some("8".to_string()),
            ..KitSelection::default()
        });
        assert_eq!(quote.unit_total, Usd(2950.0 - 800.0 - 100.0));
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let quote = quote_kit(&KitSelection {
            kit: "moon-base".to_string(),
            roof: Some("thatch".to_string()),
            addons: vec!["hot-tub".to_string(), "sign".to_string()],
            quantity: 0,
            ..KitSelection::default()
        });
        assert_eq!(quote.kit.id, KITS[0].id);
        assert_eq!(quote.quantity, 1);
        assert_eq!(quote.ignored, vec!["kit: moon-base", "roof: thatch", "addon: hot-tub"]);
        assert_eq!(quote.unit_total, Usd(2950.0 + 120.0 + 95.0));
        assert_eq!(quote.total, quote.unit_total);
    }

    #[test]
    fn test_duplicate_addons_count_once() {
        let quote = quote_kit(&KitSelection {
            kit: "patio-pro-10x10".to_string(),
            addons: vec!["led".to_string(), "LED".to_string()],
            ..KitSelection::default()
        });
        assert_eq!(quote.unit_total, Usd(2950.0 + 120.0 + 260.0));
    }

    #[test]
    fn test_kit_as_config_normalizes() {
        let kit = find_kit("grand-pavilion-24x30").unwrap();
        let out = normalize(&kit.as_config());
        assert_eq!(out.config.span_ft, 24.0);
        assert_eq!(out.config.depth_ft, 30.0);
        assert_eq!(out.config.bays, 3);
        assert_eq!(kit.footprint(), "24 ft × 30 ft");
    }

    #[test]
    fn test_group_defaults_exist() {
        for group in [ROOF, COLOR, HEIGHT, MOUNT, PANELS] {
            assert!(group.find(group.default_id).is_some(), "{}", group.name);
        }
    }
}
