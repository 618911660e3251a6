//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use shade_core::config::RawStructureConfig;
use shade_core::lead::LeadContact;
use shade_core::kits::KitSelection;
use shade_core::permalink::from_query;

/// Base URL for permalinks when `--base-url` is not given
pub const DEFAULT_BASE_URL: &str = "https://shadekits.com/builder";

#[derive(Parser, Debug)]
#[command(
    name = "shade_cli",
    version,
    about = "ShadeKits configurator - normalize, price and share steel pergola designs",
    long_about = "Normalize steel pergola configurations, estimate budget and freight,\n\
                  build lead requests and quote sheets, and price prefab kits."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More log output (-v for debug, -vv for trace). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Load rules and rates from a settings file (.json or .toml).
    #[arg(long, value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,

    /// Print machine-readable JSON instead of the text report.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize a configuration and estimate its price.
    Quote(QuoteArgs),

    /// Build a lead request (text block, JSON or PDF quote sheet).
    Lead(LeadArgs),

    /// Print preview geometry for a configuration as JSON.
    Geometry(ConfigArgs),

    /// Price a prefab kit, or list the kits.
    Kit(KitArgs),

    /// Price the common starting sizes with everything else at defaults.
    Presets(PresetsArgs),

    /// Print the effective settings, or write them to a file.
    Settings(SettingsArgs),
}

/// Structure configuration as flags and/or a permalink query string.
///
/// Flags override values from `--query`; anything left unset is filled by
/// the normalizer.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Permalink query string, e.g. "style=Gable&span=16&depth=20".
    #[arg(long, value_name = "QS")]
    pub query: Option<String>,

    /// Mono, Gable or AttachedMono.
    #[arg(long)]
    pub style: Option<String>,

    /// Width along the front (ft).
    #[arg(long)]
    pub span: Option<f64>,

    /// Front-to-back distance (ft).
    #[arg(long)]
    pub depth: Option<f64>,

    /// Clearance (ft): 8, 10 or 12.
    #[arg(long)]
    pub height: Option<f64>,

    /// None, SlatsOpen, SlatsMedium, SlatsTight, PanelsPerforated, PanelsSolid.
    #[arg(long)]
    pub infill: Option<String>,

    /// Black, White, Bronze or HDG.
    #[arg(long)]
    pub finish: Option<String>,

    /// Slab or Footings.
    #[arg(long)]
    pub anchor: Option<String>,

    /// Requested bays (recomputed from depth).
    #[arg(long)]
    pub bays: Option<u32>,
}

impl ConfigArgs {
    pub fn to_raw(&self) -> RawStructureConfig {
        let base = self.query.as_deref().map(from_query).unwrap_or_default();
        let flags = RawStructureConfig {
            style: self.style.clone(),
            span: self.span,
            depth: self.depth,
            height: self.height,
            bays: self.bays,
            infill: self.infill.clone(),
            finish: self.finish.clone(),
            anchor: self.anchor.clone(),
        };
        base.merged(&flags)
    }
}

#[derive(Args, Debug)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Delivery ZIP for the freight estimate.
    #[arg(long)]
    pub zip: Option<String>,

    /// Builder page the permalink points at.
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

#[derive(Args, Debug)]
pub struct LeadArgs {
    #[command(flatten)]
    pub quote: QuoteArgs,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// City/State.
    #[arg(long)]
    pub city: Option<String>,

    #[arg(long = "use-case")]
    pub use_case: Option<String>,

    /// Also write the quote sheet PDF here.
    #[arg(long, value_name = "PATH")]
    pub pdf: Option<PathBuf>,
}

impl LeadArgs {
    pub fn contact(&self) -> LeadContact {
        LeadContact {
            name: self.name.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
            city: self.city.clone().unwrap_or_default(),
            zip: self.quote.zip.clone().unwrap_or_default(),
            use_case: self.use_case.clone().unwrap_or_default(),
        }
    }
}

#[derive(Args, Debug)]
pub struct KitArgs {
    /// List the kits and exit.
    #[arg(long)]
    pub list: bool,

    /// Kit id, e.g. "patio-pro-10x10".
    #[arg(long, required_unless_present = "list")]
    pub kit: Option<String>,

    #[arg(long)]
    pub roof: Option<String>,

    #[arg(long)]
    pub color: Option<String>,

    /// Clearance in feet (8-12).
    #[arg(long)]
    pub height: Option<String>,

    #[arg(long)]
    pub mount: Option<String>,

    #[arg(long)]
    pub panels: Option<String>,

    /// Add-on id; repeat for several.
    #[arg(long = "addon", action = ArgAction::Append)]
    pub addons: Vec<String>,

    #[arg(long, default_value_t = 1)]
    pub qty: u32,
}

impl KitArgs {
    pub fn selection(&self) -> KitSelection {
        KitSelection {
            kit: self.kit.clone().unwrap_or_default(),
            roof: self.roof.clone(),
            color: self.color.clone(),
            height: self.height.clone(),
            mount: self.mount.clone(),
            panels: self.panels.clone(),
            addons: self.addons.clone(),
            quantity: self.qty,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct PresetsArgs {
    /// Delivery ZIP for the freight estimate.
    #[arg(long)]
    pub zip: Option<String>,
}

#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Write the effective settings to this file (.json or .toml).
    #[arg(long, value_name = "PATH")]
    pub write: Option<PathBuf>,
}
