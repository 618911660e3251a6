//! # Geometry Builder
//!
//! Renderer-agnostic box primitives for previewing a configuration. One
//! parametric builder covers every style; a 3D viewer, an SVG elevation or
//! a snapshot tool all consume the same placement list.
//!
//! Coordinates are feet with the origin at the front-left corner on the
//! ground: `x` runs along the span, `y` is up and `z` runs back along the
//! depth. An attached structure's wall is the `z = depth` side.

use serde::Serialize;

use crate::catalog::Style;
use crate::config::StructureConfig;

/// Post section (ft, square)
pub const POST: f64 = 0.333;
/// Beam section (ft, square)
pub const BEAM: f64 = 0.333;
/// Slat thickness along the depth (ft)
pub const SLAT_THICK: f64 = 0.15;
/// Slat height above the beams (ft)
pub const SLAT_HEIGHT: f64 = 0.12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PartKind {
    Post,
    Beam,
    Ridge,
    Slat,
    Panel,
}

/// One axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub kind: PartKind,
    /// Box center `[x, y, z]`
    pub center: [f64; 3],
    /// Box extents `[x, y, z]`
    pub size: [f64; 3],
    /// Finish color (hex)
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }
}

/// Build every part of the structure.
///
/// Post count always equals [`crate::pricing::post_count`].
pub fn build_geometry(config: &StructureConfig) -> Vec<Placement> {
    let span = config.span_ft;
    let depth = config.depth_ft;
    let height = config.height_ft;
    let bays = config.bays.max(1);
    let attached = config.style.is_attached();
    let color = config.finish.color_hex();

    let part = |kind, center, size| Placement {
        kind,
        center,
        size,
        color,
    };
    let mut parts = Vec::new();

    // Posts: a pair on every bay line; attached frames skip the wall line
    let lines = if attached { bays } else { bays + 1 };
    for line in 0..lines {
        let z = bay_line_z(line, bays, depth);
        for x in [POST / 2.0, span - POST / 2.0] {
            parts.push(part(PartKind::Post, [x, height / 2.0, z], [POST, height, POST]));
        }
    }

    // Perimeter beams; the wall ledger replaces the back beam
    let y_beam = height + BEAM / 2.0;
    parts.push(part(PartKind::Beam, [span / 2.0, y_beam, POST / 2.0], [span, BEAM, BEAM]));
    if !attached {
        parts.push(part(
            PartKind::Beam,
            [span / 2.0, y_beam, depth - POST / 2.0],
            [span, BEAM, BEAM],
        ));
    }
    for x in [POST / 2.0, span - POST / 2.0] {
        parts.push(part(PartKind::Beam, [x, y_beam, depth / 2.0], [BEAM, BEAM, depth]));
    }

    if config.style == Style::Gable {
        parts.push(part(
            PartKind::Ridge,
            [span / 2.0, y_beam + BEAM, depth / 2.0],
            [span, BEAM, BEAM],
        ));
    }

    if let Some(gap) = config.infill.slat_spacing_ft() {
        let y = y_beam + SLAT_HEIGHT / 2.0;
        for z in slat_positions(depth, gap) {
            parts.push(part(PartKind::Slat, [span / 2.0, y, z], [span - POST, SLAT_HEIGHT, SLAT_THICK]));
        }
    } else if config.infill.is_panel() {
        let bay_depth = depth / bays as f64;
        let y = y_beam + BEAM / 2.0 + SLAT_THICK / 2.0;
        for bay in 0..bays {
            let z = (bay as f64 + 0.5) * bay_depth;
            parts.push(part(
                PartKind::Panel,
                [span / 2.0, y, z],
                [span - POST, SLAT_THICK, bay_depth - BEAM],
            ));
        }
    }

    tracing::trace!(parts = parts.len(), "geometry built");
    parts
}

/// Post line `line` of `bays + 1`, inset at the ends so posts stay inside
/// the footprint.
fn bay_line_z(line: u32, bays: u32, depth: f64) -> f64 {
    if line == 0 {
        POST / 2.0
    } else if line >= bays {
        depth - POST / 2.0
    } else {
        depth * line as f64 / bays as f64
    }
}

/// Slat centers from `POST + gap/2` up to `depth - POST`.
fn slat_positions(depth: f64, gap: f64) -> Vec<f64> {
    let start = POST + gap / 2.0;
    let end = depth - POST;
    if gap <= 0.0 || start > end {
        return Vec::new();
    }
    // Counted, not accumulated, so float drift cannot add or drop a slat
    let count = ((end - start) / gap + 1e-9).floor() as usize + 1;
    (0..count).map(|i| start + i as f64 * gap).collect()
}

/// Min/max corners over all parts, `None` for an empty list.
pub fn bounding_box(parts: &[Placement]) -> Option<BoundingBox> {
    let first = parts.first()?;
    let mut min = first.center;
    let mut max = first.center;
    for p in parts {
        for axis in 0..3 {
            let half = p.size[axis] / 2.0;
            min[axis] = min[axis].min(p.center[axis] - half);
            max[axis] = max[axis].max(p.center[axis] + half);
        }
    }
    Some(BoundingBox { min, max })
}
