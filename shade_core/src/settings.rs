//! # Engine Settings
//!
//! Every tunable the engine uses, in one serializable document: the
//! normalizer's [`CatalogRules`] and the estimator's [`PricingTables`].
//! Settings files are plain JSON or TOML (see [`crate::file_io`]).
//!
//! ```text
//! EngineSettings
//! ├── version / modified
//! ├── rules: CatalogRules (limits, heights, bays, review, availability)
//! └── pricing: PricingTables (rates, freight zones, rounding, lead time)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{RawStructureConfig, StructureConfig};
use crate::normalize::{normalize_with, review_flags, Normalized};
use crate::pricing::{estimate_with_review, PriceEstimate, PricingTables};
use crate::rules::CatalogRules;

/// Current schema version for settings files
pub const SCHEMA_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Schema version the file was written with
    pub version: String,

    /// When the settings were last changed
    pub modified: DateTime<Utc>,

    pub rules: CatalogRules,
    pub pricing: PricingTables,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            version: SCHEMA_VERSION.to_string(),
            modified: Utc::now(),
            rules: CatalogRules::default(),
            pricing: PricingTables::default(),
        }
    }
}

impl EngineSettings {
    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Normalize under these rules.
    pub fn normalize(&self, raw: &RawStructureConfig) -> Normalized {
        normalize_with(raw, &self.rules)
    }

    /// Estimate under these tables, with the review and reinforcement flags
    /// judged by these rules.
    pub fn estimate(&self, config: &StructureConfig, zip: Option<&str>) -> PriceEstimate {
        estimate_with_review(config, zip, &self.pricing, review_flags(config, &self.rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ReviewThresholds;

    #[test]
    fn test_default_settings_version() {
        let settings = EngineSettings::default();
        assert_eq!(settings.version, SCHEMA_VERSION);
        assert_eq!(settings.rules, CatalogRules::default());
    }

    #[test]
    fn test_custom_review_threshold_drives_lead_time() {
        let settings = EngineSettings {
            rules: CatalogRules {
                review: ReviewThresholds {
                    span_ft: 10.0,
                    ..ReviewThresholds::default()
                },
                ..CatalogRules::default()
            },
            ..EngineSettings::default()
        };
        let normalized = settings.normalize(&RawStructureConfig::default());
        assert!(normalized.flags.engineer_review);

        let price = settings.estimate(&normalized.config, None);
        assert_eq!(price.lead_weeks.max, 5);
    }

    #[test]
    fn test_custom_reinforcement_span() {
        let settings = EngineSettings {
            rules: CatalogRules {
                reinforcement_span_ft: 12.0,
                ..CatalogRules::default()
            },
            ..EngineSettings::default()
        };
        let raw = RawStructureConfig {
            infill: Some("SlatsTight".to_string()),
            ..RawStructureConfig::default()
        };
        let normalized = settings.normalize(&raw);
        assert!(normalized.flags.reinforcement);

        let price = settings.estimate(&normalized.config, None);
        assert_eq!(price.breakdown.reinforcement.0, settings.pricing.reinforcement);
    }

    #[test]
    fn test_touch_moves_modified_forward() {
        let mut settings = EngineSettings::default();
        let before = settings.modified;
        settings.touch();
        assert!(settings.modified >= before);
    }
}
