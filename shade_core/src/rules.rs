//! # Catalog Rules
//!
//! The tunable guardrails the normalizer enforces: size limits, offered
//! heights, the depth → bay breakpoints, engineering-review thresholds, the
//! reinforcement span and which finishes / infills each style is sold with.
//!
//! [`CatalogRules::default()`] is the shipping rule set. Alternate rule sets
//! can be loaded from a settings file (see [`crate::file_io`]) and passed to
//! [`crate::normalize::normalize_with`].

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::catalog::{Finish, Infill, Style};

/// Shared read-only copy of the default rules
pub static DEFAULT_RULES: Lazy<CatalogRules> = Lazy::new(CatalogRules::default);

/// Hard size limits (ft)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    pub min_span_ft: f64,
    pub max_span_ft: f64,
    pub min_depth_ft: f64,
    pub max_depth_ft: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            min_span_ft: 8.0,
            max_span_ft: 24.0,
            min_depth_ft: 8.0,
            max_depth_ft: 30.0,
        }
    }
}

/// One step of the depth → bay table: depths up to and including
/// `max_depth_ft` use `bays` bays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BayBreakpoint {
    pub max_depth_ft: f64,
    pub bays: u32,
}

/// Conservative thresholds above which a configuration is flagged for
/// engineering review. Comparisons are strict (`>`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewThresholds {
    pub span_ft: f64,
    pub depth_ft: f64,
    pub height_ft: f64,
}

impl Default for ReviewThresholds {
    fn default() -> Self {
        ReviewThresholds {
            span_ft: 18.0,
            depth_ft: 20.0,
            height_ft: 12.0,
        }
    }
}

impl ReviewThresholds {
    pub fn exceeded(&self, span_ft: f64, depth_ft: f64, height_ft: f64) -> bool {
        span_ft > self.span_ft || depth_ft > self.depth_ft || height_ft > self.height_ft
    }
}

/// Options sold with one style. The first entry of each list is the
/// replacement used when a disallowed option is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleAvailability {
    pub style: Style,
    pub finishes: Vec<Finish>,
    pub infills: Vec<Infill>,
}

/// Complete normalizer rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRules {
    pub limits: Limits,

    /// Heights offered (ft)
    pub heights_ft: Vec<f64>,

    /// Height used when the requested one is not offered
    pub default_height_ft: f64,

    /// Ascending by `max_depth_ft`; depths beyond the last step use
    /// `max_bays`.
    pub bay_breakpoints: Vec<BayBreakpoint>,
    pub max_bays: u32,

    pub review: ReviewThresholds,

    /// Heavy infill at or beyond this span needs reinforcement (ft)
    #[serde(default = "default_reinforcement_span_ft")]
    pub reinforcement_span_ft: f64,

    pub availability: Vec<StyleAvailability>,
}

fn default_reinforcement_span_ft() -> f64 {
    16.0
}

impl Default for CatalogRules {
    fn default() -> Self {
        CatalogRules {
            limits: Limits::default(),
            heights_ft: vec![8.0, 10.0, 12.0],
            default_height_ft: 10.0,
            bay_breakpoints: vec![
                BayBreakpoint { max_depth_ft: 12.0, bays: 1 },
                BayBreakpoint { max_depth_ft: 20.0, bays: 2 },
            ],
            max_bays: 3,
            review: ReviewThresholds::default(),
            reinforcement_span_ft: default_reinforcement_span_ft(),
            availability: vec![
                StyleAvailability {
                    style: Style::Mono,
                    finishes: Finish::ALL.to_vec(),
                    infills: Infill::ALL.to_vec(),
                },
                // Solid panels trap heat under a ridge
                StyleAvailability {
                    style: Style::Gable,
                    finishes: Finish::ALL.to_vec(),
                    infills: vec![
                        Infill::None,
                        Infill::SlatsOpen,
                        Infill::SlatsMedium,
                        Infill::SlatsTight,
                        Infill::PanelsPerforated,
                    ],
                },
                // Wall ledgers ship powder coated only
                StyleAvailability {
                    style: Style::AttachedMono,
                    finishes: vec![Finish::Black, Finish::White, Finish::Bronze],
                    infills: Infill::ALL.to_vec(),
                },
            ],
        }
    }
}

impl CatalogRules {
    /// Bay count for a depth.
    pub fn bays_for_depth(&self, depth_ft: f64) -> u32 {
        self.bay_breakpoints
            .iter()
            .find(|step| depth_ft <= step.max_depth_ft)
            .map(|step| step.bays)
            .unwrap_or(self.max_bays)
    }

    /// Inclusive: a 16 ft span with tight slats is reinforced.
    pub fn needs_reinforcement(&self, span_ft: f64, infill: Infill) -> bool {
        infill.is_heavy() && span_ft >= self.reinforcement_span_ft
    }

    pub fn is_height_offered(&self, height_ft: f64) -> bool {
        self.heights_ft.iter().any(|h| *h == height_ft)
    }

    /// Availability entry for a style, if the rule set lists one.
    pub fn availability_for(&self, style: Style) -> Option<&StyleAvailability> {
        self.availability.iter().find(|a| a.style == style)
    }

    /// Finishes sold with `style`; every finish when the style is unlisted.
    pub fn finishes_for(&self, style: Style) -> &[Finish] {
        const ALL: &[Finish] = &Finish::ALL;
        match self.availability_for(style) {
            Some(a) if !a.finishes.is_empty() => a.finishes.as_slice(),
            _ => ALL,
        }
    }

    /// Infills sold with `style`; every infill when the style is unlisted.
    pub fn infills_for(&self, style: Style) -> &[Infill] {
        const ALL: &[Infill] = &Infill::ALL;
        match self.availability_for(style) {
            Some(a) if !a.infills.is_empty() => a.infills.as_slice(),
            _ => ALL,
        }
    }
}
