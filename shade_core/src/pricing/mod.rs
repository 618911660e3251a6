//! # Pricing Estimator
//!
//! Budgetary pricing for a normalized [`StructureConfig`]. The model is
//! linear:
//!
//! - **Frame**: perimeter × base rate, scaled by style, height above the
//!   10 ft baseline, extra bays and finish.
//! - **Infill**: plan area × the infill's per-sq-ft rate.
//! - **Anchoring**: post count × the anchor's per-post allowance.
//! - **Reinforcement**: a flat allowance when heavy infill sits on a wide
//!   span (see [`crate::rules::CatalogRules::needs_reinforcement`]).
//!
//! The budget range is the subtotal ± a fixed spread. Freight is priced
//! separately by ZIP zone (see [`freight`]). All arithmetic is `f64`;
//! money is rounded to the increment (default $50) only on output.
//!
//! Rates live in [`PricingTables`], an explicit value rather than module
//! globals, so alternate tables can be tested or loaded from a settings file.
//!
//! ## Example
//!
//! ```rust
//! use shade_core::config::StructureConfig;
//! use shade_core::pricing::estimate;
//!
//! let config = StructureConfig::default(); // 12×12 Mono, 10 ft, Black, slab
//! let price = estimate(&config, Some("84101"));
//!
//! assert!(price.budget_low < price.budget_high);
//! assert_eq!(price.breakdown.posts, 4);
//! assert!(price.freight_low.is_some());
//! ```

pub mod freight;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::catalog::{Anchor, Finish, Infill, Style};
use crate::config::StructureConfig;
use crate::normalize::{review_flags, ReviewFlags};
use crate::rules::DEFAULT_RULES;
use crate::units::Usd;

pub use freight::{freight_range, zone_for_zip, FreightMeta, FreightTables, FreightZone};

/// Shared read-only copy of the default tables
pub static DEFAULT_TABLES: Lazy<PricingTables> = Lazy::new(PricingTables::default);

// ============================================================================
// Rate tables
// ============================================================================

/// Frame complexity multiplier per style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleRates {
    pub mono: f64,
    pub gable: f64,
    pub attached_mono: f64,
}

impl StyleRates {
    pub fn get(&self, style: Style) -> f64 {
        match style {
            Style::Mono => self.mono,
            Style::Gable => self.gable,
            Style::AttachedMono => self.attached_mono,
        }
    }
}

/// Frame multiplier per finish (Black is the baseline)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinishRates {
    pub black: f64,
    pub white: f64,
    pub bronze: f64,
    pub hdg: f64,
}

impl FinishRates {
    pub fn get(&self, finish: Finish) -> f64 {
        match finish {
            Finish::Black => self.black,
            Finish::White => self.white,
            Finish::Bronze => self.bronze,
            Finish::Hdg => self.hdg,
        }
    }
}

/// Infill cost per square foot of plan area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfillRates {
    pub none: f64,
    pub slats_open: f64,
    pub slats_medium: f64,
    pub slats_tight: f64,
    pub panels_perforated: f64,
    pub panels_solid: f64,
}

impl InfillRates {
    pub fn get(&self, infill: Infill) -> f64 {
        match infill {
            Infill::None => self.none,
            Infill::SlatsOpen => self.slats_open,
            Infill::SlatsMedium => self.slats_medium,
            Infill::SlatsTight => self.slats_tight,
            Infill::PanelsPerforated => self.panels_perforated,
            Infill::PanelsSolid => self.panels_solid,
        }
    }
}

/// Foundation allowance per post
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorRates {
    pub slab: f64,
    pub footings: f64,
}

impl AnchorRates {
    pub fn get(&self, anchor: Anchor) -> f64 {
        match anchor {
            Anchor::Slab => self.slab,
            Anchor::Footings => self.footings,
        }
    }
}

/// Fabrication lead time (weeks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadTimeRules {
    pub base_min_weeks: u32,
    pub base_max_weeks: u32,
    /// Added to the max for galvanizing
    pub hdg_extra_weeks: u32,
    /// Added to the max when engineering review is required
    pub review_extra_weeks: u32,
}

impl Default for LeadTimeRules {
    fn default() -> Self {
        LeadTimeRules {
            base_min_weeks: 3,
            base_max_weeks: 4,
            hdg_extra_weeks: 1,
            review_extra_weeks: 1,
        }
    }
}

/// Every tunable number the estimator uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTables {
    /// Frame cost per linear foot of perimeter ($)
    pub base_rate_per_linear_ft: f64,
    pub style_multipliers: StyleRates,

    pub height_baseline_ft: f64,
    /// Fractional uplift per foot above the baseline
    pub height_uplift_per_ft: f64,

    /// Fractional surcharge per bay beyond the first
    pub bay_surcharge: f64,

    pub finish_multipliers: FinishRates,
    pub infill_rates_per_sqft: InfillRates,
    pub anchor_per_post: AnchorRates,

    /// Flat beam reinforcement allowance for heavy infill on wide spans ($)
    #[serde(default = "default_reinforcement")]
    pub reinforcement: f64,

    /// Budget range half-width as a fraction of the subtotal
    pub budget_spread: f64,

    /// Monetary outputs are multiples of this ($)
    pub rounding_increment: f64,

    pub freight: FreightTables,
    pub lead_time: LeadTimeRules,
}

fn default_reinforcement() -> f64 {
    600.0
}

impl Default for PricingTables {
    fn default() -> Self {
        PricingTables {
            base_rate_per_linear_ft: 95.0,
            style_multipliers: StyleRates {
                mono: 1.0,
                gable: 1.15,
                attached_mono: 0.9,
            },
            height_baseline_ft: 10.0,
            height_uplift_per_ft: 0.04,
            bay_surcharge: 0.12,
            finish_multipliers: FinishRates {
                black: 1.0,
                white: 1.03,
                bronze: 1.05,
                hdg: 1.15,
            },
            infill_rates_per_sqft: InfillRates {
                none: 0.0,
                slats_open: 6.0,
                slats_medium: 9.0,
                slats_tight: 12.0,
                panels_perforated: 15.0,
                panels_solid: 18.0,
            },
            anchor_per_post: AnchorRates {
                slab: 175.0,
                footings: 425.0,
            },
            reinforcement: default_reinforcement(),
            budget_spread: 0.10,
            rounding_increment: 50.0,
            freight: FreightTables::default(),
            lead_time: LeadTimeRules::default(),
        }
    }
}

// ============================================================================
// Estimate
// ============================================================================

/// Rounded cost components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub frame: Usd,
    pub infill: Usd,
    pub anchoring: Usd,
    #[serde(default)]
    pub reinforcement: Usd,
    pub posts: u32,
}

/// Fabrication lead time range (weeks)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadWeeks {
    pub min: u32,
    pub max: u32,
}

/// Budgetary estimate for one configuration and ZIP.
///
/// ## JSON Example
///
/// ```json
/// {
///   "budget_low": 4750.0,
///   "budget_high": 5800.0,
///   "breakdown": { "frame": 4550.0, "infill": 0.0, "anchoring": 700.0, "reinforcement": 0.0, "posts": 4 },
///   "freight_low": 600.0,
///   "freight_high": 900.0,
///   "freight_meta": { "zone": "A", "area": 144.0 },
///   "lead_weeks": { "min": 3, "max": 4 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub budget_low: Usd,
    pub budget_high: Usd,
    pub breakdown: CostBreakdown,

    /// `None` when no usable ZIP was given
    pub freight_low: Option<Usd>,
    pub freight_high: Option<Usd>,
    pub freight_meta: Option<FreightMeta>,

    pub lead_weeks: LeadWeeks,
}

impl PriceEstimate {
    /// `$4,750–$5,800`
    pub fn budget_label(&self) -> String {
        format!("{}–{}", self.budget_low, self.budget_high)
    }

    /// `$600–$900`, or `None` without a freight estimate
    pub fn freight_label(&self) -> Option<String> {
        match (self.freight_low, self.freight_high) {
            (Some(low), Some(high)) => Some(format!("{}–{}", low, high)),
            _ => None,
        }
    }

    /// `3–4 weeks`
    pub fn lead_time_label(&self) -> String {
        format!("{}–{} weeks", self.lead_weeks.min, self.lead_weeks.max)
    }
}

/// Posts needed for a style and bay count.
///
/// Freestanding frames carry a pair of posts on every bay line (`bays + 1`
/// lines); attached frames drop the wall-side line.
pub fn post_count(style: Style, bays: u32) -> u32 {
    let bays = bays.max(1);
    if style.is_attached() {
        2 * bays
    } else {
        4 + 2 * (bays - 1)
    }
}

/// Unrounded frame cost
pub fn frame_cost(config: &StructureConfig, tables: &PricingTables) -> Usd {
    let height_over = (config.height_ft - tables.height_baseline_ft).max(0.0);
    let extra_bays = config.bays.saturating_sub(1) as f64;

    Usd(config.perimeter_ft() * tables.base_rate_per_linear_ft)
        * tables.style_multipliers.get(config.style)
        * (1.0 + tables.height_uplift_per_ft * height_over)
        * (1.0 + tables.bay_surcharge * extra_bays)
        * tables.finish_multipliers.get(config.finish)
}

/// Unrounded infill cost
pub fn infill_cost(config: &StructureConfig, tables: &PricingTables) -> Usd {
    Usd(config.area_sqft() * tables.infill_rates_per_sqft.get(config.infill))
}

/// Unrounded anchoring cost
pub fn anchoring_cost(config: &StructureConfig, tables: &PricingTables) -> Usd {
    let posts = post_count(config.style, config.bays);
    Usd(posts as f64 * tables.anchor_per_post.get(config.anchor))
}

/// Lead time for a configuration.
pub fn lead_weeks(config: &StructureConfig, engineer_review: bool, rules: &LeadTimeRules) -> LeadWeeks {
    let mut max = rules.base_max_weeks;
    if config.finish == Finish::Hdg {
        max += rules.hdg_extra_weeks;
    }
    if engineer_review {
        max += rules.review_extra_weeks;
    }
    LeadWeeks {
        min: rules.base_min_weeks,
        max: max.max(rules.base_min_weeks),
    }
}

/// Estimate with the default tables.
pub fn estimate(config: &StructureConfig, zip: Option<&str>) -> PriceEstimate {
    estimate_with(config, zip, &DEFAULT_TABLES)
}

/// Estimate with explicit tables.
///
/// Flags come from the default rules; use [`estimate_with_review`] when
/// they come from custom rules.
pub fn estimate_with(config: &StructureConfig, zip: Option<&str>, tables: &PricingTables) -> PriceEstimate {
    estimate_with_review(config, zip, tables, review_flags(config, &DEFAULT_RULES))
}

/// Estimate with explicit tables and the normalizer's flags.
pub fn estimate_with_review(
    config: &StructureConfig,
    zip: Option<&str>,
    tables: &PricingTables,
    flags: ReviewFlags,
) -> PriceEstimate {
    let increment = tables.rounding_increment;

    let frame = frame_cost(config, tables);
    let infill = infill_cost(config, tables);
    let anchoring = anchoring_cost(config, tables);
    let reinforcement = if flags.reinforcement {
        Usd(tables.reinforcement)
    } else {
        Usd::ZERO
    };
    let subtotal = frame + infill + anchoring + reinforcement;

    tracing::debug!(
        frame = frame.0,
        infill = infill.0,
        anchoring = anchoring.0,
        reinforcement = reinforcement.0,
        subtotal = subtotal.0,
        "structure priced"
    );

    let freight = freight_range(config, zip, &tables.freight);

    PriceEstimate {
        budget_low: (subtotal * (1.0 - tables.budget_spread)).round_to(increment),
        budget_high: (subtotal * (1.0 + tables.budget_spread)).round_to(increment),
        breakdown: CostBreakdown {
            frame: frame.round_to(increment),
            infill: infill.round_to(increment),
            anchoring: anchoring.round_to(increment),
            reinforcement: reinforcement.round_to(increment),
            posts: post_count(config.style, config.bays),
        },
        freight_low: freight.map(|f| f.low.round_to(increment)),
        freight_high: freight.map(|f| f.high.round_to(increment)),
        freight_meta: freight.map(|f| f.meta),
        lead_weeks: lead_weeks(config, flags.engineer_review, &tables.lead_time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawStructureConfig;
    use crate::normalize::normalize;
    use proptest::prelude::*;

    fn config(span: f64, depth: f64, height: f64) -> StructureConfig {
        normalize(&RawStructureConfig {
            span: Some(span),
            depth: Some(depth),
            height: Some(height),
            ..RawStructureConfig::default()
        })
        .config
    }

    #[test]
    fn test_post_count() {
        assert_eq!(post_count(Style::Mono, 1), 4);
        assert_eq!(post_count(Style::Gable, 2), 6);
        assert_eq!(post_count(Style::Mono, 3), 8);
        assert_eq!(post_count(Style::AttachedMono, 1), 2);
        assert_eq!(post_count(Style::AttachedMono, 3), 6);
        assert_eq!(post_count(Style::Mono, 0), 4);
    }

    #[test]
    fn test_basic_12x12_scenario() {
        let price = estimate(&StructureConfig::default(), None);

        // Frame: 48 lf × $95 = $4,560; anchoring: 4 × $175 = $700
        assert_eq!(price.breakdown.frame, Usd(4550.0));
        assert_eq!(price.breakdown.infill, Usd(0.0));
        assert_eq!(price.breakdown.anchoring, Usd(700.0));
        assert_eq!(price.breakdown.posts, 4);

        // Subtotal $5,260 ± 10%
        assert_eq!(price.budget_low, Usd(4750.0));
        assert_eq!(price.budget_high, Usd(5800.0));
        assert!(price.budget_low < price.budget_high);
        assert_eq!(price.lead_weeks, LeadWeeks { min: 3, max: 4 });
    }

    #[test]
    fn test_deeper_structure_costs_more() {
        let shallow = config(12.0, 12.0, 10.0);
        let deep = config(12.0, 24.0, 10.0);
        assert_eq!(deep.bays, 3);
        let a = estimate(&shallow, None);
        let b = estimate(&deep, None);
        assert!(b.budget_low > a.budget_low);
        assert_eq!(b.breakdown.posts, 8);
    }

    #[test]
    fn test_infill_rates_increase_with_density() {
        let tables = PricingTables::default();
        let base = StructureConfig::default();
        let costs: Vec<f64> = [Infill::None, Infill::SlatsOpen, Infill::SlatsMedium, Infill::SlatsTight]
            .into_iter()
            .map(|infill| infill_cost(&StructureConfig { infill, ..base }, &tables).0)
            .collect();
        assert_eq!(costs[0], 0.0);
        assert!(costs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_finish_and_style_multipliers() {
        let tables = PricingTables::default();
        let base = StructureConfig::default();
        let black = frame_cost(&base, &tables).0;
        let hdg = frame_cost(&StructureConfig { finish: Finish::Hdg, ..base }, &tables).0;
        let white = frame_cost(&StructureConfig { finish: Finish::White, ..base }, &tables).0;
        assert!(hdg > white && white > black);

        let gable = frame_cost(&StructureConfig { style: Style::Gable, ..base }, &tables).0;
        let attached = frame_cost(&StructureConfig { style: Style::AttachedMono, ..base }, &tables).0;
        assert!(gable > black && black > attached);
    }

    #[test]
    fn test_height_uplift_only_above_baseline() {
        let tables = PricingTables::default();
        let at_8 = frame_cost(&config(12.0, 12.0, 8.0), &tables).0;
        let at_10 = frame_cost(&config(12.0, 12.0, 10.0), &tables).0;
        let at_12 = frame_cost(&config(12.0, 12.0, 12.0), &tables).0;
        assert_eq!(at_8, at_10);
        assert!((at_12 / at_10 - 1.08).abs() < 1e-9);
    }

    #[test]
    fn test_reinforcement_allowance_at_wide_spans() {
        for infill in [Infill::SlatsTight, Infill::PanelsPerforated, Infill::PanelsSolid] {
            let at = |span: f64| StructureConfig {
                span_ft: span,
                infill,
                ..StructureConfig::default()
            };
            let wide = estimate(&at(16.0), None);
            let narrow = estimate(&at(15.99), None);
            assert_eq!(wide.breakdown.reinforcement, Usd(600.0), "{infill}");
            assert_eq!(narrow.breakdown.reinforcement, Usd(0.0), "{infill}");
            assert!(wide.budget_low > narrow.budget_low);
        }

        let medium = StructureConfig {
            span_ft: 24.0,
            infill: Infill::SlatsMedium,
            ..StructureConfig::default()
        };
        assert_eq!(estimate(&medium, None).breakdown.reinforcement, Usd(0.0));
    }

    #[test]
    fn test_reinforcement_amount_is_tunable() {
        let config = StructureConfig {
            span_ft: 20.0,
            infill: Infill::PanelsSolid,
            ..StructureConfig::default()
        };
        let tables = PricingTables {
            reinforcement: 1000.0,
            ..PricingTables::default()
        };
        let base = estimate(&config, None);
        let price = estimate_with(&config, None, &tables);
        assert_eq!(price.breakdown.reinforcement, Usd(1000.0));
        assert!(price.budget_high > base.budget_high);

        let flags = ReviewFlags::default();
        let unflagged = estimate_with_review(&config, None, &tables, flags);
        assert_eq!(unflagged.breakdown.reinforcement, Usd(0.0));
    }

    #[test]
    fn test_freight_gating() {
        let config = StructureConfig::default();
        for zip in [None, Some(""), Some("1234"), Some("123")] {
            let price = estimate(&config, zip);
            assert!(price.freight_low.is_none(), "{zip:?}");
            assert!(price.freight_high.is_none());
            assert!(price.freight_meta.is_none());
            assert!(price.freight_label().is_none());
        }
        let price = estimate(&config, Some("12345"));
        assert_eq!(price.freight_low, Some(Usd(600.0)));
        assert_eq!(price.freight_high, Some(Usd(900.0)));
        assert_eq!(price.freight_meta.unwrap().zone, FreightZone::A);
    }

    #[test]
    fn test_lead_time_adders() {
        let rules = LeadTimeRules::default();
        let hdg = StructureConfig {
            finish: Finish::Hdg,
            ..StructureConfig::default()
        };
        assert_eq!(lead_weeks(&hdg, false, &rules), LeadWeeks { min: 3, max: 5 });
        assert_eq!(lead_weeks(&hdg, true, &rules), LeadWeeks { min: 3, max: 6 });
        let big = config(20.0, 12.0, 10.0);
        assert_eq!(estimate(&big, None).lead_weeks.max, 5);
    }

    #[test]
    fn test_alternate_tables() {
        let tables = PricingTables {
            base_rate_per_linear_ft: 0.0,
            anchor_per_post: AnchorRates { slab: 100.0, footings: 100.0 },
            rounding_increment: 100.0,
            ..PricingTables::default()
        };
        let price = estimate_with(&StructureConfig::default(), None, &tables);
        assert_eq!(price.breakdown.frame, Usd(0.0));
        assert_eq!(price.breakdown.anchoring, Usd(400.0));
        assert_eq!(price.budget_low, Usd(400.0));
    }

    #[test]
    fn test_labels() {
        let price = estimate(&StructureConfig::default(), Some("12345"));
        assert_eq!(price.budget_label(), "$4,750–$5,800");
        assert_eq!(price.freight_label().unwrap(), "$600–$900");
        assert_eq!(price.lead_time_label(), "3–4 weeks");
    }

    fn any_config() -> impl Strategy<Value = StructureConfig> {
        (
            prop::sample::select(Style::ALL.to_vec()),
            8.0f64..=24.0,
            8.0f64..=30.0,
            prop::sample::select(vec![8.0, 10.0, 12.0]),
            prop::sample::select(Infill::ALL.to_vec()),
            prop::sample::select(Finish::ALL.to_vec()),
            prop::sample::select(Anchor::ALL.to_vec()),
        )
            .prop_map(|(style, span, depth, height, infill, finish, anchor)| {
                normalize(&RawStructureConfig {
                    style: Some(style.id().to_string()),
                    span: Some(span),
                    depth: Some(depth),
                    height: Some(height),
                    bays: None,
                    infill: Some(infill.id().to_string()),
                    finish: Some(finish.id().to_string()),
                    anchor: Some(anchor.id().to_string()),
                })
                .config
            })
    }

    proptest! {
        #[test]
        fn money_is_rounded(config in any_config(), zip in "[0-9]{5}") {
            let price = estimate(&config, Some(zip.as_str()));
            let b = price.breakdown;
            for amount in [price.budget_low, price.budget_high, b.frame, b.infill, b.anchoring, b.reinforcement] {
                prop_assert!(amount.is_multiple_of(50.0), "{:?}", amount);
            }
            prop_assert!(price.freight_low.unwrap().is_multiple_of(50.0));
            prop_assert!(price.freight_high.unwrap().is_multiple_of(50.0));
            prop_assert!(price.budget_low < price.budget_high);
        }

        #[test]
        fn larger_span_never_cheaper(config in any_config(), extra in 0.0f64..16.0) {
            let wider = StructureConfig { span_ft: (config.span_ft + extra).min(24.0), ..config };
            let a = estimate(&config, None);
            let b = estimate(&wider, None);
            prop_assert!(b.budget_low >= a.budget_low);
            prop_assert!(b.budget_high >= a.budget_high);
        }

        #[test]
        fn larger_depth_never_cheaper(config in any_config(), extra in 0.0f64..22.0) {
            let raw = RawStructureConfig {
                depth: Some((config.depth_ft + extra).min(30.0)),
                ..RawStructureConfig::from(&config)
            };
            let deeper = normalize(&raw).config;
            let a = estimate(&config, None);
            let b = estimate(&deeper, None);
            prop_assert!(b.budget_low >= a.budget_low);
            prop_assert!(b.budget_high >= a.budget_high);
        }

        #[test]
        fn taller_never_cheaper_frame(config in any_config()) {
            let tables = PricingTables::default();
            let taller = StructureConfig { height_ft: config.height_ft + 2.0, ..config };
            prop_assert!(frame_cost(&taller, &tables).0 >= frame_cost(&config, &tables).0);
        }
    }
}
