//! # Configuration Normalizer
//!
//! Turns whatever the caller sent into a buildable [`StructureConfig`].
//! Invalid input is never rejected: each repair is applied deterministically
//! and described in a human-readable note for the UI to show.
//!
//! Repairs, in order:
//!
//! 1. Missing fields take defaults (Mono, 12×12, 10 ft, 1 bay, no infill,
//!    Black, slab). Unrecognized option strings and non-finite numbers are
//!    reset to the default with a note.
//! 2. Span and depth are clamped to the catalog limits.
//! 3. Heights that are not offered fall back to the default height.
//! 4. Bays are recomputed from the depth.
//! 5. Finish and infill are checked against what the style is sold with.
//! 6. The engineer-review flag is raised past the review thresholds, and
//!    heavy infill on a wide span is flagged for reinforcement.
//!
//! Flags describe the configuration rather than a repair, so they are
//! reported as `advisories` and leave `notes` empty for an already valid
//! configuration.
//!
//! Run it on every configuration change; it is cheap and has no side effects.
//!
//! ## Example
//!
//! ```rust
//! use shade_core::config::RawStructureConfig;
//! use shade_core::normalize::normalize;
//!
//! let raw = RawStructureConfig {
//!     span: Some(30.0),
//!     depth: Some(24.0),
//!     ..RawStructureConfig::default()
//! };
//!
//! let out = normalize(&raw);
//! assert_eq!(out.config.span_ft, 24.0);
//! assert_eq!(out.config.bays, 3);
//! assert!(out.flags.engineer_review);
//! assert!(out.notes.contains(&"Span adjusted to 24 ft.".to_string()));
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{Anchor, Finish, Infill, Style};
use crate::config::{RawStructureConfig, StructureConfig};
use crate::errors::ShadeResult;
use crate::rules::{CatalogRules, DEFAULT_RULES};

/// Advisory flags raised by normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewFlags {
    /// The configuration exceeds conservative structural thresholds and may
    /// need a professional engineer's sign-off.
    pub engineer_review: bool,

    /// Tight slats or panels on a wide span; the estimate includes a
    /// reinforcement allowance.
    #[serde(default)]
    pub reinforcement: bool,
}

/// Output of [`normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Normalized {
    pub config: StructureConfig,

    /// One entry per repair, in the order they were applied
    pub notes: Vec<String>,

    pub flags: ReviewFlags,

    /// Human-readable text for advisory flags, see [`advisories`]
    pub advisories: Vec<String>,

    /// True iff the canonical form of `config` differs from the input in
    /// any field (missing fields and alternate spellings included).
    pub changed: bool,
}

/// Normalize with the default catalog rules.
pub fn normalize(raw: &RawStructureConfig) -> Normalized {
    normalize_with(raw, &DEFAULT_RULES)
}

/// Normalize with an explicit rule set.
pub fn normalize_with(raw: &RawStructureConfig, rules: &CatalogRules) -> Normalized {
    let defaults = StructureConfig {
        height_ft: rules.default_height_ft,
        ..StructureConfig::default()
    };
    let mut notes = Vec::new();

    // 1) defaults and boundary parsing
    let style = option_or_default(
        raw.style.as_deref(),
        Style::from_str_flexible,
        defaults.style,
        "Style",
        &mut notes,
    );
    let anchor = option_or_default(
        raw.anchor.as_deref(),
        Anchor::from_str_flexible,
        defaults.anchor,
        "Anchoring",
        &mut notes,
    );
    let span_in = number_or_default(raw.span, defaults.span_ft, "Span", &mut notes);
    let depth_in = number_or_default(raw.depth, defaults.depth_ft, "Depth", &mut notes);
    let height_in = number_or_default(raw.height, defaults.height_ft, "Height", &mut notes);

    // 2) clamp span/depth
    let limits = &rules.limits;
    let span_ft = clamp(span_in, limits.min_span_ft, limits.max_span_ft);
    let depth_ft = clamp(depth_in, limits.min_depth_ft, limits.max_depth_ft);
    if span_ft != span_in {
        push_note(&mut notes, format!("Span adjusted to {} ft.", span_ft));
    }
    if depth_ft != depth_in {
        push_note(&mut notes, format!("Depth adjusted to {} ft.", depth_ft));
    }

    // 3) offered heights only
    let height_ft = if rules.is_height_offered(height_in) {
        height_in
    } else {
        push_note(
            &mut notes,
            format!("Height normalized to {} ft.", rules.default_height_ft),
        );
        rules.default_height_ft
    };

    // 4) bays follow depth
    let bays_in = raw.bays.unwrap_or(defaults.bays);
    let bays = rules.bays_for_depth(depth_ft);
    if bays != bays_in {
        push_note(
            &mut notes,
            format!("Bays set to {} based on {} ft depth.", bays, depth_ft),
        );
    }

    // 5) availability for the style
    let finish = available_option(
        raw.finish.as_deref(),
        Finish::from_str_flexible,
        defaults.finish,
        rules.finishes_for(style),
        "Finish",
        &mut notes,
    );
    let infill = available_option(
        raw.infill.as_deref(),
        Infill::from_str_flexible,
        defaults.infill,
        rules.infills_for(style),
        "Infill",
        &mut notes,
    );

    let config = StructureConfig {
        style,
        span_ft,
        depth_ft,
        height_ft,
        bays,
        infill,
        finish,
        anchor,
    };

    // 6) flags
    let flags = review_flags(&config, rules);
    let advisories = advisories(&config, flags);

    let changed = RawStructureConfig::from(&config) != *raw;

    Normalized {
        config,
        notes,
        flags,
        advisories,
        changed,
    }
}

/// Flags for a normalized configuration under `rules`.
pub fn review_flags(config: &StructureConfig, rules: &CatalogRules) -> ReviewFlags {
    ReviewFlags {
        engineer_review: rules.review.exceeded(config.span_ft, config.depth_ft, config.height_ft),
        reinforcement: rules.needs_reinforcement(config.span_ft, config.infill),
    }
}

/// Messages for the advisory flags. Engineering review is left to the
/// caller's warning banner.
pub fn advisories(config: &StructureConfig, flags: ReviewFlags) -> Vec<String> {
    let mut out = Vec::new();
    if flags.reinforcement {
        let what = if config.infill.is_panel() {
            "Panels"
        } else {
            "Tight slat spacing"
        };
        out.push(format!(
            "{} at this {} ft span may require reinforcement (included in estimate).",
            what, config.span_ft
        ));
    }
    out
}

/// `min(max(v, lo), hi)`; unlike `f64::clamp` this never panics on a
/// misconfigured `lo > hi`.
fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

fn push_note(notes: &mut Vec<String>, note: String) {
    tracing::debug!(note = %note, "configuration repaired");
    notes.push(note);
}

fn number_or_default(value: Option<f64>, default: f64, field: &str, notes: &mut Vec<String>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        Some(_) => {
            push_note(notes, format!("{} was not a number; using {} ft.", field, default));
            default
        }
        None => default,
    }
}

fn option_or_default<T: Copy + std::fmt::Display>(
    value: Option<&str>,
    parse: fn(&str) -> ShadeResult<T>,
    default: T,
    field: &str,
    notes: &mut Vec<String>,
) -> T {
    match value.map(parse) {
        Some(Ok(parsed)) => parsed,
        Some(Err(_)) => {
            push_note(notes, format!("{} reset to {}.", field, default));
            default
        }
        None => default,
    }
}

/// Parse a categorical option and make sure the style offers it. Anything
/// unrecognized or unavailable becomes the first allowed value.
fn available_option<T: Copy + PartialEq + std::fmt::Display + Default>(
    value: Option<&str>,
    parse: fn(&str) -> ShadeResult<T>,
    default: T,
    allowed: &[T],
    field: &str,
    notes: &mut Vec<String>,
) -> T {
    let requested = match value {
        Some(s) => parse(s).ok(),
        None => Some(default),
    };
    match requested {
        Some(option) if allowed.contains(&option) => option,
        _ => {
            let fallback = allowed.first().copied().unwrap_or_default();
            push_note(notes, format!("{} adjusted to {} for this product.", field, fallback));
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw(config: &StructureConfig) -> RawStructureConfig {
        RawStructureConfig::from(config)
    }

    #[test]
    fn test_empty_input_gets_defaults() {
        let out = normalize(&RawStructureConfig::default());
        assert_eq!(out.config, StructureConfig::default());
        assert!(out.notes.is_empty());
        assert!(!out.flags.engineer_review);
        assert!(out.changed, "missing fields count as changes");
    }

    #[test]
    fn test_basic_scenario() {
        let input = RawStructureConfig {
            style: Some("Mono".to_string()),
            span: Some(12.0),
            depth: Some(12.0),
            height: Some(10.0),
            bays: None,
            infill: Some("None".to_string()),
            finish: Some("Black".to_string()),
            anchor: Some("Slab".to_string()),
        };
        let out = normalize(&input);
        assert_eq!(out.config.bays, 1);
        assert!(!out.flags.engineer_review);
        assert!(out.notes.is_empty());
    }

    #[test]
    fn test_clamping_notes() {
        let input = RawStructureConfig {
            span: Some(40.0),
            depth: Some(4.0),
            ..RawStructureConfig::default()
        };
        let out = normalize(&input);
        assert_eq!(out.config.span_ft, 24.0);
        assert_eq!(out.config.depth_ft, 8.0);
        assert_eq!(out.notes[0], "Span adjusted to 24 ft.");
        assert_eq!(out.notes[1], "Depth adjusted to 8 ft.");
    }

    #[test]
    fn test_in_range_values_produce_no_clamp_note() {
        let input = RawStructureConfig {
            span: Some(8.0),
            depth: Some(12.0),
            ..RawStructureConfig::default()
        };
        let out = normalize(&input);
        assert_eq!(out.config.span_ft, 8.0);
        assert!(out.notes.is_empty());
    }

    #[test]
    fn test_height_not_offered() {
        let input = RawStructureConfig {
            height: Some(9.0),
            ..RawStructureConfig::default()
        };
        let out = normalize(&input);
        assert_eq!(out.config.height_ft, 10.0);
        assert_eq!(out.notes, vec!["Height normalized to 10 ft.".to_string()]);
    }

    #[test]
    fn test_non_numeric_values_are_missing() {
        let input = RawStructureConfig {
            span: Some(f64::NAN),
            depth: Some(f64::INFINITY),
            ..RawStructureConfig::default()
        };
        let out = normalize(&input);
        assert_eq!(out.config.span_ft, 12.0);
        assert_eq!(out.config.depth_ft, 12.0);
        assert_eq!(out.notes.len(), 2);
        assert!(out.notes[0].starts_with("Span was not a number"));
    }

    #[test]
    fn test_bay_boundaries() {
        for (depth, bays) in [(12.0, 1), (12.01, 2), (20.0, 2), (20.01, 3), (30.0, 3)] {
            let input = RawStructureConfig {
                depth: Some(depth),
                ..RawStructureConfig::default()
            };
            assert_eq!(normalize(&input).config.bays, bays, "depth {depth}");
        }
    }

    #[test]
    fn test_bays_are_never_user_set() {
        let input = RawStructureConfig {
            depth: Some(24.0),
            bays: Some(1),
            ..RawStructureConfig::default()
        };
        let out = normalize(&input);
        assert_eq!(out.config.bays, 3);
        assert_eq!(out.notes, vec!["Bays set to 3 based on 24 ft depth.".to_string()]);
    }

    #[test]
    fn test_engineer_review_boundaries() {
        let flagged = |span: f64, depth: f64, height: f64| {
            let input = RawStructureConfig {
                span: Some(span),
                depth: Some(depth),
                height: Some(height),
                ..RawStructureConfig::default()
            };
            normalize(&input).flags.engineer_review
        };
        assert!(!flagged(18.0, 12.0, 10.0));
        assert!(flagged(18.01, 12.0, 10.0));
        assert!(flagged(19.0, 12.0, 10.0));
        assert!(!flagged(12.0, 20.0, 10.0));
        assert!(flagged(12.0, 20.01, 10.0));
        assert!(!flagged(12.0, 12.0, 12.0));
    }

    #[test]
    fn test_reinforcement_boundary_per_infill() {
        for infill in [Infill::SlatsTight, Infill::PanelsPerforated, Infill::PanelsSolid] {
            let at = |span: f64| {
                normalize(&RawStructureConfig {
                    span: Some(span),
                    infill: Some(infill.id().to_string()),
                    ..RawStructureConfig::default()
                })
            };
            let wide = at(16.0);
            assert!(wide.flags.reinforcement, "{infill}");
            assert!(wide.notes.is_empty());
            assert_eq!(wide.advisories.len(), 1);
            assert!(wide.advisories[0].contains("may require reinforcement (included in estimate)"));

            let narrow = at(15.99);
            assert!(!narrow.flags.reinforcement, "{infill}");
            assert!(narrow.advisories.is_empty());
        }

        let tight = normalize(&RawStructureConfig {
            span: Some(20.0),
            infill: Some("SlatsTight".to_string()),
            ..RawStructureConfig::default()
        });
        assert_eq!(
            tight.advisories,
            vec!["Tight slat spacing at this 20 ft span may require reinforcement (included in estimate).".to_string()]
        );
    }

    #[test]
    fn test_light_infill_never_reinforced() {
        for infill in [Infill::None, Infill::SlatsOpen, Infill::SlatsMedium] {
            let out = normalize(&RawStructureConfig {
                span: Some(24.0),
                infill: Some(infill.id().to_string()),
                ..RawStructureConfig::default()
            });
            assert!(!out.flags.reinforcement, "{infill}");
            assert!(out.advisories.is_empty());
        }
    }

    #[test]
    fn test_height_threshold_uses_configured_heights() {
        let rules = CatalogRules {
            heights_ft: vec![8.0, 10.0, 12.0, 14.0],
            ..CatalogRules::default()
        };
        let input = RawStructureConfig {
            height: Some(14.0),
            ..RawStructureConfig::default()
        };
        let out = normalize_with(&input, &rules);
        assert_eq!(out.config.height_ft, 14.0);
        assert!(out.flags.engineer_review);
    }

    #[test]
    fn test_availability_replacement() {
        let input = RawStructureConfig {
            style: Some("AttachedMono".to_string()),
            finish: Some("HDG".to_string()),
            ..RawStructureConfig::default()
        };
        let out = normalize(&input);
        assert_eq!(out.config.finish, Finish::Black);
        assert_eq!(out.notes, vec!["Finish adjusted to Black for this product.".to_string()]);

        let input = RawStructureConfig {
            style: Some("Gable".to_string()),
            infill: Some("PanelsSolid".to_string()),
            ..RawStructureConfig::default()
        };
        let out = normalize(&input);
        assert_eq!(out.config.infill, Infill::None);
        assert_eq!(out.notes, vec!["Infill adjusted to None for this product.".to_string()]);
    }

    #[test]
    fn test_every_style_finish_pair_ends_in_set() {
        let rules = CatalogRules::default();
        for style in Style::ALL {
            let allowed = rules.finishes_for(style);
            for finish in Finish::ALL {
                let input = RawStructureConfig {
                    style: Some(style.id().to_string()),
                    finish: Some(finish.id().to_string()),
                    ..RawStructureConfig::default()
                };
                let out = normalize(&input);
                assert!(allowed.contains(&out.config.finish));
                if !allowed.contains(&finish) {
                    assert_eq!(out.config.finish, allowed[0]);
                } else {
                    assert_eq!(out.config.finish, finish);
                }
            }
            let allowed = rules.infills_for(style);
            for infill in Infill::ALL {
                let input = RawStructureConfig {
                    style: Some(style.id().to_string()),
                    infill: Some(infill.id().to_string()),
                    ..RawStructureConfig::default()
                };
                let out = normalize(&input);
                assert!(allowed.contains(&out.config.infill));
                if !allowed.contains(&infill) {
                    assert_eq!(out.config.infill, allowed[0]);
                }
            }
        }
    }

    #[test]
    fn test_unknown_strings_are_repaired() {
        let input = RawStructureConfig {
            style: Some("Dome".to_string()),
            finish: Some("Chrome".to_string()),
            infill: Some("lattice".to_string()),
            anchor: Some("helical".to_string()),
            ..RawStructureConfig::default()
        };
        let out = normalize(&input);
        assert_eq!(out.config.style, Style::Mono);
        assert_eq!(out.config.anchor, Anchor::Slab);
        assert_eq!(out.config.finish, Finish::Black);
        assert_eq!(out.config.infill, Infill::None);
        assert_eq!(
            out.notes,
            vec![
                "Style reset to Mono.".to_string(),
                "Anchoring reset to Slab.".to_string(),
                "Finish adjusted to Black for this product.".to_string(),
                "Infill adjusted to None for this product.".to_string(),
            ]
        );
    }

    #[test]
    fn test_alternate_spelling_is_accepted_but_marks_changed() {
        let mut input = raw(&StructureConfig::default());
        input.infill = Some("Slats (Medium)".to_string());
        let out = normalize(&input);
        assert_eq!(out.config.infill, Infill::SlatsMedium);
        assert!(out.notes.is_empty());
        assert!(out.changed);
    }

    #[test]
    fn test_normalized_config_is_unchanged() {
        let config = StructureConfig {
            style: Style::Gable,
            span_ft: 16.0,
            depth_ft: 18.0,
            height_ft: 12.0,
            bays: 2,
            infill: Infill::SlatsTight,
            finish: Finish::Bronze,
            anchor: Anchor::Footings,
        };
        let out = normalize(&raw(&config));
        assert_eq!(out.config, config);
        assert!(out.notes.is_empty());
        assert!(out.flags.reinforcement);
        assert!(!out.changed);
    }

    fn option_text() -> impl Strategy<Value = Option<String>> {
        prop::option::of(prop_oneof![
            Just("Mono".to_string()),
            Just("Gable".to_string()),
            Just("AttachedMono".to_string()),
            Just("HDG".to_string()),
            Just("Bronze".to_string()),
            Just("White".to_string()),
            Just("Slats (Tight)".to_string()),
            Just("PanelsSolid".to_string()),
            Just("Footings".to_string()),
            "[a-z]{0,8}",
        ])
    }

    fn option_number() -> impl Strategy<Value = Option<f64>> {
        prop::option::of(prop_oneof![
            -10.0f64..60.0,
            Just(f64::NAN),
            Just(10.0),
            Just(12.0),
        ])
    }

    fn any_raw() -> impl Strategy<Value = RawStructureConfig> {
        (
            option_text(),
            option_number(),
            option_number(),
            option_number(),
            prop::option::of(0u32..6),
            option_text(),
            option_text(),
            option_text(),
        )
            .prop_map(|(style, span, depth, height, bays, infill, finish, anchor)| RawStructureConfig {
                style,
                span,
                depth,
                height,
                bays,
                infill,
                finish,
                anchor,
            })
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(input in any_raw()) {
            let first = normalize(&input);
            let second = normalize(&raw(&first.config));
            prop_assert_eq!(second.config, first.config);
            prop_assert!(second.notes.is_empty());
            prop_assert!(!second.changed);
            prop_assert_eq!(second.flags, first.flags);
            prop_assert_eq!(second.advisories, first.advisories);
        }

        #[test]
        fn normalized_fields_respect_rules(input in any_raw()) {
            let rules = CatalogRules::default();
            let out = normalize(&input);
            let c = out.config;
            prop_assert!(c.span_ft >= rules.limits.min_span_ft && c.span_ft <= rules.limits.max_span_ft);
            prop_assert!(c.depth_ft >= rules.limits.min_depth_ft && c.depth_ft <= rules.limits.max_depth_ft);
            prop_assert!(rules.is_height_offered(c.height_ft));
            prop_assert_eq!(c.bays, rules.bays_for_depth(c.depth_ft));
            prop_assert!(rules.finishes_for(c.style).contains(&c.finish));
            prop_assert!(rules.infills_for(c.style).contains(&c.infill));
            prop_assert_eq!(
                out.flags.engineer_review,
                c.span_ft > 18.0 || c.depth_ft > 20.0 || c.height_ft > 12.0
            );
        }

        #[test]
        fn oversize_span_clamps_to_max(span in 24.0001f64..1000.0) {
            let input = RawStructureConfig { span: Some(span), ..RawStructureConfig::default() };
            prop_assert_eq!(normalize(&input).config.span_ft, 24.0);
        }

        #[test]
        fn undersize_depth_clamps_to_min(depth in -100.0f64..7.9999) {
            let input = RawStructureConfig { depth: Some(depth), ..RawStructureConfig::default() };
            prop_assert_eq!(normalize(&input).config.depth_ft, 8.0);
        }
    }
}
