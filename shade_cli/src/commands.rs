//! Subcommand implementations. Each returns the text to print so reports
//! can be tested without capturing stdout.

use std::fs;

use serde::Serialize;
use shade_core::catalog::SIZE_PRESETS;
use shade_core::config::{RawStructureConfig, StructureConfig};
use shade_core::errors::{ShadeError, ShadeResult};
use shade_core::file_io::save_settings;
use shade_core::geometry::{bounding_box, build_geometry, BoundingBox, Placement};
use shade_core::kits::{quote_kit, KitQuote, KITS};
use shade_core::lead::{build_spec_text, LeadSubmission};
use shade_core::normalize::{Normalized, ReviewFlags};
use shade_core::pdf::render_quote_pdf;
use shade_core::permalink::share_url;
use shade_core::pricing::PriceEstimate;
use shade_core::settings::EngineSettings;

use crate::cli::{ConfigArgs, KitArgs, LeadArgs, PresetsArgs, QuoteArgs, SettingsArgs};

const RULE: &str = "═══════════════════════════════════════";

fn to_json<T: Serialize>(value: &T) -> ShadeResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| ShadeError::serialization(e.to_string()))
}

// ============================================================================
// quote
// ============================================================================

#[derive(Debug, Serialize)]
pub struct QuoteOutput {
    pub config: StructureConfig,
    pub notes: Vec<String>,
    pub flags: ReviewFlags,
    pub advisories: Vec<String>,
    pub changed: bool,
    pub pricing: PriceEstimate,
    pub permalink: String,
}

pub fn build_quote(args: &QuoteArgs, settings: &EngineSettings) -> ShadeResult<QuoteOutput> {
    let Normalized {
        config,
        notes,
        flags,
        advisories,
        changed,
    } = settings.normalize(&args.config.to_raw());
    let pricing = settings.estimate(&config, args.zip.as_deref());
    let permalink = share_url(&args.base_url, &config)?;

    Ok(QuoteOutput {
        config,
        notes,
        flags,
        advisories,
        changed,
        pricing,
        permalink,
    })
}

pub fn run_quote(args: &QuoteArgs, settings: &EngineSettings, json: bool) -> ShadeResult<String> {
    let quote = build_quote(args, settings)?;
    if json {
        to_json(&quote)
    } else {
        Ok(quote_report(&quote))
    }
}

pub fn quote_report(quote: &QuoteOutput) -> String {
    let config = &quote.config;
    let pricing = &quote.pricing;
    let breakdown = &pricing.breakdown;
    let mut out = Vec::new();

    out.push(RULE.to_string());
    out.push("  SHADEKITS QUOTE".to_string());
    out.push(RULE.to_string());
    out.push(String::new());
    out.push("Configuration:".to_string());
    out.push(format!("  Style:     {}", config.style.label()));
    out.push(format!(
        "  Size:      {} ({} bay{})",
        config.size_label(),
        config.bays,
        if config.bays == 1 { "" } else { "s" }
    ));
    out.push(format!("  Height:    {} ft", config.height_ft));
    out.push(format!("  Infill:    {}", config.infill.label()));
    out.push(format!("  Finish:    {}", config.finish.label()));
    out.push(format!("  Anchoring: {}", config.anchor.label()));
    out.push(String::new());

    if !quote.notes.is_empty() {
        out.push("Adjustments:".to_string());
        out.extend(quote.notes.iter().map(|n| format!("  • {}", n)));
        out.push(String::new());
    }
    if !quote.advisories.is_empty() {
        out.push("Advisories:".to_string());
        out.extend(quote.advisories.iter().map(|a| format!("  • {}", a)));
        out.push(String::new());
    }
    if quote.flags.engineer_review {
        out.push("⚠ Engineering review may be required for this configuration.".to_string());
        out.push(String::new());
    }

    out.push("Budget:".to_string());
    out.push(format!("  Range:     {}", pricing.budget_label()));
    out.push(format!("  Frame:     {}", breakdown.frame));
    out.push(format!("  Infill:    {}", breakdown.infill));
    out.push(format!("  Anchoring: {} ({} posts)", breakdown.anchoring, breakdown.posts));
    if quote.flags.reinforcement {
        out.push(format!("  Reinforce: {}", breakdown.reinforcement));
    }
    match (pricing.freight_label(), &pricing.freight_meta) {
        (Some(label), Some(meta)) => out.push(format!("  Freight:   {} (zone {})", label, meta.zone)),
        _ => out.push("  Freight:   enter a ZIP for a freight estimate".to_string()),
    }
    out.push(format!("  Lead time: {}", pricing.lead_time_label()));
    out.push(String::new());

    out.push("Permalink:".to_string());
    out.push(format!("  {}", quote.permalink));

    out.join("\n")
}

// ============================================================================
// lead
// ============================================================================

pub fn run_lead(args: &LeadArgs, settings: &EngineSettings, json: bool) -> ShadeResult<String> {
    let lead = LeadSubmission::with_settings(
        args.contact(),
        &args.quote.config.to_raw(),
        Some(args.quote.base_url.as_str()),
        settings,
    )?;

    if let Some(path) = &args.pdf {
        let bytes = render_quote_pdf(&lead)?;
        fs::write(path, bytes)
            .map_err(|e| ShadeError::file_error("write pdf", path.display().to_string(), e.to_string()))?;
        tracing::info!(path = %path.display(), "quote sheet written");
    }

    if json {
        to_json(&lead)
    } else {
        Ok(build_spec_text(&lead))
    }
}

// ============================================================================
// geometry
// ============================================================================

#[derive(Debug, Serialize)]
pub struct GeometryOutput {
    pub config: StructureConfig,
    pub bounding_box: Option<BoundingBox>,
    pub parts: Vec<Placement>,
}

pub fn run_geometry(args: &ConfigArgs, settings: &EngineSettings) -> ShadeResult<String> {
    let config = settings.normalize(&args.to_raw()).config;
    let parts = build_geometry(&config);
    to_json(&GeometryOutput {
        config,
        bounding_box: bounding_box(&parts),
        parts,
    })
}

// ============================================================================
// kit
// ============================================================================

pub fn run_kit(args: &KitArgs, json: bool) -> ShadeResult<String> {
    if args.list {
        return if json { to_json(&KITS) } else { Ok(kit_list()) };
    }
    let quote = quote_kit(&args.selection());
    if json {
        to_json(&quote)
    } else {
        Ok(kit_report(&quote))
    }
}

fn kit_list() -> String {
    KITS.iter()
        .map(|kit| {
            format!(
                "{:<26} {:<26} {:>8}  {}, {}",
                kit.id,
                kit.name,
                kit.base_price.to_string(),
                kit.footprint(),
                kit.clearance
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn kit_report(quote: &KitQuote) -> String {
    let mut out = vec![
        RULE.to_string(),
        format!("  {}", quote.kit.name.to_uppercase()),
        RULE.to_string(),
        String::new(),
    ];
    for item in &quote.line_items {
        out.push(format!("  {:<8} {:<34} {:>9}", item.group, item.label, item.amount.to_string()));
    }
    out.push(String::new());
    out.push(format!("  Unit total: {}", quote.unit_total));
    out.push(format!("  Quantity:   {}", quote.quantity));
    out.push(format!("  Total:      {}", quote.total));
    if !quote.ignored.is_empty() {
        out.push(String::new());
        out.push(format!("  Ignored: {}", quote.ignored.join(", ")));
    }
    out.join("\n")
}

// ============================================================================
// presets
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PresetQuote {
    pub config: StructureConfig,
    pub pricing: PriceEstimate,
}

pub fn preset_quotes(zip: Option<&str>, settings: &EngineSettings) -> Vec<PresetQuote> {
    SIZE_PRESETS
        .iter()
        .map(|preset| {
            let raw = RawStructureConfig {
                span: Some(preset.span_ft),
                depth: Some(preset.depth_ft),
                ..RawStructureConfig::default()
            };
            let config = settings.normalize(&raw).config;
            let pricing = settings.estimate(&config, zip);
            PresetQuote { config, pricing }
        })
        .collect()
}

pub fn run_presets(args: &PresetsArgs, settings: &EngineSettings, json: bool) -> ShadeResult<String> {
    let quotes = preset_quotes(args.zip.as_deref(), settings);
    if json {
        return to_json(&quotes);
    }
    Ok(quotes
        .iter()
        .map(|q| {
            let freight = q.pricing.freight_label().unwrap_or_else(|| "-".to_string());
            format!(
                "{:<10} {} bay{}  {:<16} freight {}",
                q.config.size_label(),
                q.config.bays,
                if q.config.bays == 1 { " " } else { "s" },
                q.pricing.budget_label(),
                freight
            )
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

// ============================================================================
// settings
// ============================================================================

pub fn run_settings(args: &SettingsArgs, settings: &EngineSettings) -> ShadeResult<String> {
    match &args.write {
        Some(path) => {
            save_settings(settings, path)?;
            Ok(format!("Settings written to {}", path.display()))
        }
        None => to_json(settings),
    }
}
