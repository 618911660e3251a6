//! # shade_core - Steel Pergola Configurator Engine
//!
//! `shade_core` is the engine behind the ShadeKits builder: it turns whatever
//! a customer or caller sends into a buildable steel pergola configuration and
//! prices it. All inputs and outputs are JSON-serializable, so the same engine
//! serves a web form, a CLI or an API.
//!
//! ## Design Philosophy
//!
//! - **Never fails on bad input**: the normalizer repairs and explains
//! - **Stateless**: pure functions over explicit rule and rate tables
//! - **Typed boundary**: free text is parsed into enums once, at the edge
//! - **Rich Errors**: structured error types for the I/O edges
//!
//! ## Quick Start
//!
//! ```rust
//! use shade_core::config::RawStructureConfig;
//! use shade_core::normalize::normalize;
//! use shade_core::pricing::estimate;
//!
//! let raw = RawStructureConfig {
//!     style: Some("Gable".to_string()),
//!     depth: Some(24.0),
//!     ..RawStructureConfig::default()
//! };
//!
//! let out = normalize(&raw);
//! let price = estimate(&out.config, Some("84101"));
//! println!("{} ({} posts)", price.budget_label(), price.breakdown.posts);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Styles, infills, finishes, anchors
//! - [`config`] - Raw and normalized configurations
//! - [`rules`] - Limits, heights, bay breakpoints, availability
//! - [`normalize`] - Input repair with notes and review flags
//! - [`pricing`] - Budget, breakdown, freight and lead time
//! - [`permalink`] - Query-string encoding for share links
//! - [`lead`] - Lead submissions and the request text block
//! - [`geometry`] - Renderer-agnostic preview primitives
//! - [`kits`] - Prefab kit catalog and quotes
//! - [`pdf`] - Quote sheet rendering
//! - [`settings`] / [`file_io`] - Tunables and their files
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod catalog;
pub mod config;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod kits;
pub mod lead;
pub mod normalize;
pub mod pdf;
pub mod permalink;
pub mod pricing;
pub mod rules;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use config::{RawStructureConfig, StructureConfig};
pub use errors::{ShadeError, ShadeResult};
pub use file_io::{load_settings, save_settings};
pub use normalize::{normalize, Normalized};
pub use pricing::{estimate, PriceEstimate};
pub use settings::EngineSettings;
