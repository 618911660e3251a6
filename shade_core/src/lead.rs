//! # Lead Submission
//!
//! Everything a sales lead carries: the contact form, the normalized
//! configuration, its price, the normalizer's notes and flags and a
//! permalink back to the builder. [`build_spec_text`] renders the plain-text
//! block that goes into the lead email.
//!
//! ## Example
//!
//! ```rust
//! use shade_core::config::RawStructureConfig;
//! use shade_core::lead::{build_spec_text, LeadContact, LeadSubmission};
//!
//! let contact = LeadContact {
//!     name: "Dana Ruiz".to_string(),
//!     zip: "84101".to_string(),
//!     ..LeadContact::default()
//! };
//! let lead = LeadSubmission::new(contact, &RawStructureConfig::default(), None).unwrap();
//!
//! let text = build_spec_text(&lead);
//! assert!(text.starts_with("==== ShadeKits Builder Request ===="));
//! assert!(text.contains("• Name: Dana Ruiz"));
//! assert!(text.contains("• Email: —"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{RawStructureConfig, StructureConfig};
use crate::errors::ShadeResult;
use crate::normalize::{normalize, Normalized, ReviewFlags};
use crate::permalink::share_url;
use crate::pricing::{estimate_with_review, PriceEstimate, DEFAULT_TABLES};
use crate::settings::EngineSettings;

/// Placeholder for contact fields left blank
const MISSING: &str = "—";

/// Contact form. Blank fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// City/State
    pub city: String,
    pub zip: String,
    pub use_case: String,
}

impl LeadContact {
    /// Trimmed ZIP, `None` when blank
    pub fn zip(&self) -> Option<&str> {
        let zip = self.zip.trim();
        (!zip.is_empty()).then_some(zip)
    }
}

/// A complete, priced lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub reference: Uuid,
    pub created: DateTime<Utc>,
    pub contact: LeadContact,
    pub config: StructureConfig,
    pub pricing: PriceEstimate,
    pub notes: Vec<String>,
    pub flags: ReviewFlags,
    #[serde(default)]
    pub advisories: Vec<String>,
    pub permalink: Option<String>,
}

impl LeadSubmission {
    /// Normalize `raw` with the default rules, price it for the contact's
    /// ZIP and link it from `permalink_base` when given.
    pub fn new(
        contact: LeadContact,
        raw: &RawStructureConfig,
        permalink_base: Option<&str>,
    ) -> ShadeResult<LeadSubmission> {
        let normalized = normalize(raw);
        let pricing = estimate_with_review(
            &normalized.config,
            contact.zip(),
            &DEFAULT_TABLES,
            normalized.flags,
        );
        Self::assemble(contact, normalized, pricing, permalink_base)
    }

    /// Same as [`LeadSubmission::new`] under loaded settings.
    pub fn with_settings(
        contact: LeadContact,
        raw: &RawStructureConfig,
        permalink_base: Option<&str>,
        settings: &EngineSettings,
    ) -> ShadeResult<LeadSubmission> {
        let normalized = settings.normalize(raw);
        let pricing = estimate_with_review(
            &normalized.config,
            contact.zip(),
            &settings.pricing,
            normalized.flags,
        );
        Self::assemble(contact, normalized, pricing, permalink_base)
    }

    fn assemble(
        contact: LeadContact,
        normalized: Normalized,
        pricing: PriceEstimate,
        permalink_base: Option<&str>,
    ) -> ShadeResult<LeadSubmission> {
        let permalink = permalink_base
            .map(|base| share_url(base, &normalized.config))
            .transpose()?;

        let lead = LeadSubmission {
            reference: Uuid::new_v4(),
            created: Utc::now(),
            contact,
            config: normalized.config,
            pricing,
            notes: normalized.notes,
            flags: normalized.flags,
            advisories: normalized.advisories,
            permalink,
        };
        tracing::info!(reference = %lead.reference, budget = %lead.pricing.budget_label(), "lead created");
        Ok(lead)
    }
}

fn or_missing(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() {
        MISSING
    } else {
        value
    }
}

/// Plain-text request block for the lead email.
pub fn build_spec_text(lead: &LeadSubmission) -> String {
    let contact = &lead.contact;
    let config = &lead.config;
    let pricing = &lead.pricing;
    let mut lines: Vec<String> = Vec::new();

    lines.push("==== ShadeKits Builder Request ====".to_string());
    lines.push(String::new());

    lines.push("Contact".to_string());
    lines.push(format!("• Name: {}", or_missing(&contact.name)));
    lines.push(format!("• Email: {}", or_missing(&contact.email)));
    lines.push(format!("• Phone: {}", or_missing(&contact.phone)));
    lines.push(format!("• City/State: {}", or_missing(&contact.city)));
    lines.push(format!("• ZIP: {}", or_missing(&contact.zip)));
    lines.push(format!("• Use case: {}", or_missing(&contact.use_case)));
    lines.push(String::new());

    lines.push("Configuration".to_string());
    lines.push(format!("• Style: {}", config.style.label()));
    lines.push(format!("• Size: {}", config.size_label()));
    lines.push(format!("• Bays: {}", config.bays));
    lines.push(format!("• Height: {} ft", config.height_ft));
    lines.push(format!("• Infill: {}", config.infill.label()));
    lines.push(format!("• Finish: {}", config.finish.label()));
    lines.push(format!("• Anchoring: {}", config.anchor.label()));
    lines.push(String::new());

    let breakdown = &pricing.breakdown;
    lines.push("Budget".to_string());
    lines.push(format!("• Budget range: {}", pricing.budget_label()));
    lines.push(format!(
        "• Breakdown: frame {}, infill {}, anchoring {}",
        breakdown.frame, breakdown.infill, breakdown.anchoring
    ));
    if breakdown.reinforcement.0 > 0.0 {
        lines.push(format!("• Reinforcement: {}", breakdown.reinforcement));
    }
    lines.push(format!("• Posts: {}", breakdown.posts));
    lines.push(format!("• Lead time: {}", pricing.lead_time_label()));
    lines.push(String::new());

    lines.push("Freight".to_string());
    match pricing.freight_label() {
        Some(label) => {
            lines.push(format!("• Freight estimate: {}", label));
            if let Some(meta) = &pricing.freight_meta {
                lines.push(format!("• Zone: {}, plan area: {} sqft", meta.zone, meta.area.0));
            }
        }
        None => lines.push("• Freight estimate: Entered ZIP was missing—please collect.".to_string()),
    }
    lines.push(String::new());

    if !lead.notes.is_empty() || !lead.advisories.is_empty() {
        lines.push("Notes / Rules".to_string());
        lines.extend(lead.notes.iter().chain(&lead.advisories).map(|n| format!("• {}", n)));
        lines.push(String::new());
    }
    if lead.flags.engineer_review {
        lines.push("⚠ Engineering review may be required for this configuration.".to_string());
        lines.push(String::new());
    }

    if let Some(permalink) = &lead.permalink {
        lines.push("Permalink to this concept".to_string());
        lines.push(permalink.clone());
        lines.push(String::new());
    }

    lines.push("==== End ====".to_string());
    lines.join("\n")
}
