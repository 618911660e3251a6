//! # Structure Configuration
//!
//! Two shapes of the same value:
//!
//! - [`RawStructureConfig`] - whatever the form, query string or API caller
//!   sent. Every field is optional and categorical fields are free text.
//! - [`StructureConfig`] - the strictly typed, normalized configuration that
//!   the estimator, geometry builder and lead text consume. Only
//!   [`crate::normalize`] produces one from raw input.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "style": "Mono",
//!   "span": 12.0,
//!   "depth": 12.0,
//!   "height": 10.0,
//!   "bays": 1,
//!   "infill": "None",
//!   "finish": "Black",
//!   "anchor": "Slab"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{Anchor, Finish, Infill, Style};

/// Normalized structure configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureConfig {
    pub style: Style,

    /// Width along the front face (ft)
    #[serde(rename = "span")]
    pub span_ft: f64,

    /// Front-to-back distance (ft)
    #[serde(rename = "depth")]
    pub depth_ft: f64,

    /// Clearance under the beam (ft)
    #[serde(rename = "height")]
    pub height_ft: f64,

    /// Structural bays along the depth, always derived from `depth_ft`
    pub bays: u32,

    pub infill: Infill,
    pub finish: Finish,
    pub anchor: Anchor,
}

impl StructureConfig {
    /// Plan area (sq ft)
    pub fn area_sqft(&self) -> f64 {
        self.span_ft * self.depth_ft
    }

    /// Plan perimeter (linear ft)
    pub fn perimeter_ft(&self) -> f64 {
        2.0 * (self.span_ft + self.depth_ft)
    }

    /// Short size string such as `12×20 ft`
    pub fn size_label(&self) -> String {
        format!("{}×{} ft", self.span_ft, self.depth_ft)
    }
}

impl Default for StructureConfig {
    fn default() -> Self {
        StructureConfig {
            style: Style::Mono,
            span_ft: 12.0,
            depth_ft: 12.0,
            height_ft: 10.0,
            bays: 1,
            infill: Infill::None,
            finish: Finish::Black,
            anchor: Anchor::Slab,
        }
    }
}

/// Unvalidated configuration as received from a caller.
///
/// Deserialization never fails on a field's value. Numbers may arrive as
/// JSON numbers or numeric strings (`"16"`). Blank strings and `null` are
/// missing. Anything else reads as NaN, which the normalizer replaces with
/// the default and notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStructureConfig {
    pub style: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub span: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub depth: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub height: Option<f64>,
    /// Whole numbers only, `2` or `2.0`; anything else is missing
    #[serde(deserialize_with = "lenient::count")]
    pub bays: Option<u32>,
    pub infill: Option<String>,
    pub finish: Option<String>,
    pub anchor: Option<String>,
}

impl RawStructureConfig {
    /// Overlay every field that is set in `patch`, like a form update.
    pub fn merged(&self, patch: &RawStructureConfig) -> RawStructureConfig {
        RawStructureConfig {
            style: patch.style.clone().or_else(|| self.style.clone()),
            span: patch.span.or(self.span),
            depth: patch.depth.or(self.depth),
            height: patch.height.or(self.height),
            bays: patch.bays.or(self.bays),
            infill: patch.infill.clone().or_else(|| self.infill.clone()),
            finish: patch.finish.clone().or_else(|| self.finish.clone()),
            anchor: patch.anchor.clone().or_else(|| self.anchor.clone()),
        }
    }
}

impl From<&StructureConfig> for RawStructureConfig {
    /// The canonical raw form: every field present, canonical ids.
    fn from(config: &StructureConfig) -> Self {
        RawStructureConfig {
            style: Some(config.style.id().to_string()),
            span: Some(config.span_ft),
            depth: Some(config.depth_ft),
            height: Some(config.height_ft),
            bays: Some(config.bays),
            infill: Some(config.infill.id().to_string()),
            finish: Some(config.finish.id().to_string()),
            anchor: Some(config.anchor.id().to_string()),
        }
    }
}

impl From<StructureConfig> for RawStructureConfig {
    fn from(config: StructureConfig) -> Self {
        RawStructureConfig::from(&config)
    }
}

/// Whole non-negative count from text (`"2"` or `"2.0"`)
pub(crate) fn parse_count(value: &str) -> Option<u32> {
    value
        .parse::<u32>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().and_then(whole_count))
}

fn whole_count(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64)
        .then_some(value as u32)
}

/// Field readers for form-style payloads
mod lenient {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Loose>::deserialize(deserializer)? {
            None => None,
            Some(Loose::Number(v)) => Some(v),
            Some(Loose::Text(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    Some(s.parse().unwrap_or(f64::NAN))
                }
            }
            Some(Loose::Other(_)) => Some(f64::NAN),
        })
    }

    pub fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Loose>::deserialize(deserializer)? {
            Some(Loose::Number(v)) => super::whole_count(v),
            Some(Loose::Text(s)) => super::parse_count(s.trim()),
            Some(Loose::Other(_)) | None => None,
        })
    }
}
