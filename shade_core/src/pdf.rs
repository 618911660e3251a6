//! # PDF Generation Module
//!
//! Renders a one-page quote sheet for a [`LeadSubmission`] using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected via `{{PLACEHOLDER}}` substitution before compilation,
//!   in a single pass so inserted text is never scanned again, and escaped
//!   so customer text cannot inject markup
//! - Fonts come from `typst-assets`; nothing is read from disk
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use shade_core::config::RawStructureConfig;
//! use shade_core::lead::{LeadContact, LeadSubmission};
//! use shade_core::pdf::render_quote_pdf;
//!
//! let lead = LeadSubmission::new(LeadContact::default(), &RawStructureConfig::default(), None)?;
//! let pdf_bytes = render_quote_pdf(&lead)?;
//! std::fs::write("quote.pdf", pdf_bytes).unwrap();
//! # Ok::<(), shade_core::errors::ShadeError>(())
//! ```

use chrono::{Datelike, Utc};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::errors::{ShadeError, ShadeResult};
use crate::lead::LeadSubmission;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    main: Source,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    fn load_fonts() -> Vec<Font> {
        typst_assets::fonts()
            .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
            .collect()
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(now.year(), now.month() as u8, now.day() as u8)
    }
}

// ============================================================================
// Template
// ============================================================================

const QUOTE_TEMPLATE: &str = r##"
#set page(
  paper: "us-letter",
  margin: (top: 0.9in, bottom: 0.9in, left: 0.9in, right: 0.9in),
  header: align(right)[
    #text(size: 9pt, fill: gray)[ShadeKits Budgetary Quote]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr),
      align(left)[#text(size: 9pt)[Ref: {{REFERENCE}}]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(size: 10.5pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Steel Pergola Quote Sheet]
    #v(4pt)
    #text(size: 13pt)[{{STYLE}} · {{SIZE}}]
  ]
]

#v(10pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 20pt,
  [
    *Contact*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      row-gutter: 2pt,
      [Name:], [{{NAME}}],
      [Email:], [{{EMAIL}}],
      [Phone:], [{{PHONE}}],
      [City/State:], [{{CITY}}],
      [ZIP:], [{{ZIP}}],
      [Use case:], [{{USE_CASE}}],
    )
  ],
  [
    *Configuration*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      row-gutter: 2pt,
      [Style:], [{{STYLE}}],
      [Size:], [{{SIZE}}],
      [Bays:], [{{BAYS}}],
      [Height:], [{{HEIGHT}}],
      [Infill:], [{{INFILL}}],
      [Finish:], [{{FINISH}}],
      [Anchoring:], [{{ANCHOR}}],
    )
  ]
)

#v(12pt)
#line(length: 100%, stroke: 0.5pt)
#v(6pt)

== Budget

#table(
  columns: (1fr, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right),
  table.header([*Item*], [*Amount*]),
  [Frame], [{{FRAME}}],
  [Infill], [{{INFILL_COST}}],
  [Anchoring ({{POSTS}} posts)], [{{ANCHORING}}],
{{REINFORCEMENT_ROW}}
  [*Budget range*], [*{{BUDGET}}*],
  [Freight], [{{FREIGHT}}],
  [Lead time], [{{LEAD_TIME}}],
)

#v(10pt)

{{NOTES}}

{{REVIEW}}

#v(10pt)
*Permalink:* {{PERMALINK}}

#v(20pt)
#line(length: 100%, stroke: 0.5pt)
#v(6pt)
#text(size: 9pt, fill: gray)[
  Budgetary pricing only. Final pricing follows site review and engineering. \
  Freight is estimated by ZIP zone and plan area.
]
"##;

const REVIEW_BLOCK: &str = r##"#block(width: 100%, fill: rgb("#fff3cd"), inset: 10pt, radius: 4pt)[
  *Engineering review may be required for this configuration.*
]"##;

// ============================================================================
// PDF Rendering
// ============================================================================

/// Render the quote sheet for a lead.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(ShadeError::RenderFailed)` - Typst compilation or PDF export failed
pub fn render_quote_pdf(lead: &LeadSubmission) -> ShadeResult<Vec<u8>> {
    let source = fill_template(lead);

    let world = PdfWorld::new(source);
    let warned = typst::compile(&world);
    if !warned.warnings.is_empty() {
        tracing::debug!(warnings = warned.warnings.len(), "typst compiled with warnings");
    }

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        ShadeError::render_failed("compile", error_msgs.join("; "))
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        ShadeError::render_failed("export", error_msgs.join("; "))
    })?;

    tracing::info!(reference = %lead.reference, bytes = pdf_bytes.len(), "quote sheet rendered");
    Ok(pdf_bytes)
}

fn fill_template(lead: &LeadSubmission) -> String {
    let contact = &lead.contact;
    let config = &lead.config;
    let pricing = &lead.pricing;
    let breakdown = &pricing.breakdown;

    let text = |s: &str| {
        let s = s.trim();
        if s.is_empty() {
            "—".to_string()
        } else {
            escape_typst(s)
        }
    };

    let freight = match (pricing.freight_label(), &pricing.freight_meta) {
        (Some(label), Some(meta)) => format!("{} (zone {})", label, meta.zone),
        (Some(label), None) => label,
        _ => "ZIP needed".to_string(),
    };

    let permalink = match &lead.permalink {
        Some(url) => format!("#link(\"{}\")", escape_typst_str(url)),
        None => "—".to_string(),
    };

    let reinforcement_row = if lead.flags.reinforcement {
        format!(
            "  [Reinforcement], [{}],",
            escape_typst(&breakdown.reinforcement.to_string())
        )
    } else {
        String::new()
    };

    let values = [
        ("REFERENCE", lead.reference.to_string()),
        ("DATE", lead.created.format("%Y-%m-%d").to_string()),
        ("NAME", text(&contact.name)),
        ("EMAIL", text(&contact.email)),
        ("PHONE", text(&contact.phone)),
        ("CITY", text(&contact.city)),
        ("ZIP", text(&contact.zip)),
        ("USE_CASE", text(&contact.use_case)),
        ("STYLE", escape_typst(config.style.label())),
        ("SIZE", escape_typst(&config.size_label())),
        ("BAYS", config.bays.to_string()),
        ("HEIGHT", format!("{} ft", config.height_ft)),
        ("INFILL", escape_typst(config.infill.label())),
        ("FINISH", escape_typst(config.finish.label())),
        ("ANCHOR", escape_typst(config.anchor.label())),
        ("FRAME", escape_typst(&breakdown.frame.to_string())),
        ("INFILL_COST", escape_typst(&breakdown.infill.to_string())),
        ("ANCHORING", escape_typst(&breakdown.anchoring.to_string())),
        ("POSTS", breakdown.posts.to_string()),
        ("REINFORCEMENT_ROW", reinforcement_row),
        ("BUDGET", escape_typst(&pricing.budget_label())),
        ("FREIGHT", escape_typst(&freight)),
        ("LEAD_TIME", escape_typst(&pricing.lead_time_label())),
        ("NOTES", build_notes(lead.notes.iter().chain(&lead.advisories))),
        ("REVIEW", if lead.flags.engineer_review { REVIEW_BLOCK.to_string() } else { String::new() }),
        ("PERMALINK", permalink),
    ];
    substitute(QUOTE_TEMPLATE, &values)
}

/// Replace each `{{KEY}}` in `template` with its value. Unknown keys are
/// left as written.
fn substitute(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let found = after.find("}}").and_then(|end| {
            let key = &after[..end];
            values.iter().find(|(k, _)| *k == key).map(|(_, value)| (end, value))
        });
        match found {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// `== Notes` heading and one bullet per note, or nothing
fn build_notes<'a>(notes: impl Iterator<Item = &'a String>) -> String {
    let items: Vec<String> = notes.map(|n| format!("- {}", escape_typst(n))).collect();
    if items.is_empty() {
        return String::new();
    }
    format!("== Notes\n\n{}\n", items.join("\n"))
}

/// Escape special Typst markup characters in user-provided text
fn escape_typst(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '*' | '_' | '#' | '$' | '@' | '<' | '>' | '\\' | '`' | '[' | ']' | '=' | '~' | '/'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape for a Typst string literal
fn escape_typst_str(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
