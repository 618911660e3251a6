//! # Permalinks
//!
//! Query-string encoding of a configuration for shareable links:
//!
//! ```text
//! style=Gable&span=16&depth=20&height=10&infill=SlatsMedium&finish=Bronze&anchor=Footings&bays=2
//! ```
//!
//! The only compatibility promise is round-trip fidelity: encoding a
//! normalized config and decoding it (then normalizing) yields the same
//! config. Decoding is lenient. Unknown keys are ignored and values that
//! are empty or not numbers count as missing, so the normalizer fills them.
//!
//! ## Example
//!
//! ```rust
//! use shade_core::config::StructureConfig;
//! use shade_core::normalize::normalize;
//! use shade_core::permalink::{from_query, to_query};
//!
//! let config = StructureConfig::default();
//! let qs = to_query(&config);
//! assert_eq!(qs, "style=Mono&span=12&depth=12&height=10&infill=None&finish=Black&anchor=Slab&bays=1");
//!
//! let decoded = normalize(&from_query(&qs));
//! assert_eq!(decoded.config, config);
//! assert!(!decoded.changed);
//! ```

use url::form_urlencoded;
use url::Url;

use crate::config::{parse_count, RawStructureConfig, StructureConfig};
use crate::errors::{ShadeError, ShadeResult};

/// Encode a config as a query string (no leading `?`).
pub fn to_query(config: &StructureConfig) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("style", config.style.id())
        .append_pair("span", &config.span_ft.to_string())
        .append_pair("depth", &config.depth_ft.to_string())
        .append_pair("height", &config.height_ft.to_string())
        .append_pair("infill", config.infill.id())
        .append_pair("finish", config.finish.id())
        .append_pair("anchor", config.anchor.id())
        .append_pair("bays", &config.bays.to_string())
        .finish()
}

/// Decode a query string (a leading `?` is allowed) into raw input for the
/// normalizer. When a key repeats, the first occurrence wins.
pub fn from_query(query: &str) -> RawStructureConfig {
    let query = query.trim().trim_start_matches('?');
    let mut raw = RawStructureConfig::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "style" => set_once(&mut raw.style, value.to_string()),
            "infill" => set_once(&mut raw.infill, value.to_string()),
            "finish" => set_once(&mut raw.finish, value.to_string()),
            "anchor" => set_once(&mut raw.anchor, value.to_string()),
            "span" => set_number(&mut raw.span, value),
            "depth" => set_number(&mut raw.depth, value),
            "height" => set_number(&mut raw.height, value),
            "bays" => {
                if raw.bays.is_none() {
                    raw.bays = parse_count(value);
                }
            }
            other => tracing::trace!(key = other, "ignoring unknown permalink key"),
        }
    }

    raw
}

/// Full share link: `base` with its query replaced by the encoded config.
pub fn share_url(base: &str, config: &StructureConfig) -> ShadeResult<String> {
    let mut url = Url::parse(base)
        .map_err(|e| ShadeError::invalid_input("permalink base", base, e.to_string()))?;
    url.set_query(Some(&to_query(config)));
    Ok(url.into())
}

fn set_once(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

fn set_number(slot: &mut Option<f64>, value: &str) {
    if slot.is_none() {
        *slot = value.parse::<f64>().ok().filter(|v| v.is_finite());
    }
}
