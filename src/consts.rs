//! Shared numeric and string constants for the editor crate.

// ── Units ───────────────────────────────────────────────────────

/// CSS pixels per physical centimetre used when sizing the canvas from cm.
pub const PX_PER_CM: f64 = 28.35;

// ── Grid ────────────────────────────────────────────────────────

/// Every n-th grid line is drawn as a major line.
pub const GRID_MAJOR_EVERY: u32 = 5;

/// Smallest grid spacing drawn, in canvas units; finer grids are skipped.
pub const MIN_GRID_SPACING: f64 = 1.0;

/// Upper bound on grid lines per axis, beyond the line at zero.
pub const MAX_GRID_LINES: u32 = 2000;

/// Stroke width of a minor grid line, in canvas units.
pub const GRID_MINOR_WIDTH: f64 = 0.5;

/// Stroke width of a major grid line, in canvas units.
pub const GRID_MAJOR_WIDTH: f64 = 1.0;

// ── Markup ──────────────────────────────────────────────────────

/// XML namespace for SVG elements.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Attribute carrying the owning shape id on interactive nodes.
pub const ATTR_SHAPE_ID: &str = "data-shape-id";

/// Attribute carrying the vertex index on handle nodes.
pub const ATTR_VERTEX: &str = "data-vertex";
