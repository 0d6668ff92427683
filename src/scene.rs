//! Scene description: what the editor draws, independent of the browser.
//!
//! [`build`] turns the shape collection into an ordered list of [`Node`]s.
//! The DOM renderer and the SVG exporter both read the same tags and
//! attributes from this list, so the exported file matches what is on screen.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::config::EditorConfig;
use crate::consts::{
    ATTR_SHAPE_ID, ATTR_VERTEX, GRID_MAJOR_EVERY, GRID_MAJOR_WIDTH, GRID_MINOR_WIDTH, MAX_GRID_LINES, MIN_GRID_SPACING,
    SVG_NS,
};
use crate::doc::{Shape, ShapeId, ShapeStore};
use crate::hit::Target;
use crate::transform::Point;

/// One drawable element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Background grid line.
    GridLine { from: Point, to: Point, major: bool },
    /// Filled polygon for a shape.
    Body {
        shape_id: ShapeId,
        points: Vec<Point>,
        fill: String,
        stroke: String,
        stroke_width: f64,
    },
    /// Draggable marker on one vertex.
    Handle {
        shape_id: ShapeId,
        index: usize,
        center: Point,
        radius: f64,
        fill: String,
        stroke: String,
    },
    /// Centered label text.
    Label {
        shape_id: ShapeId,
        at: Point,
        text: String,
        font_size: f64,
        font_family: String,
        color: String,
    },
}

impl Node {
    /// SVG element name.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::GridLine { .. } => "line",
            Self::Body { .. } => "polygon",
            Self::Handle { .. } => "circle",
            Self::Label { .. } => "text",
        }
    }

    /// Pointer-down target, for nodes that start a drag.
    #[must_use]
    pub fn target(&self) -> Option<Target> {
        match self {
            Self::Body { shape_id, .. } => Some(Target::body(*shape_id)),
            Self::Handle { shape_id, index, .. } => Some(Target::vertex(*shape_id, *index)),
            Self::GridLine { .. } | Self::Label { .. } => None,
        }
    }

    /// Text content (labels only).
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Label { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Attributes in a stable order.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::GridLine { from, to, major } => {
                let width = if *major { GRID_MAJOR_WIDTH } else { GRID_MINOR_WIDTH };
                vec![
                    ("x1", from.x.to_string()),
                    ("y1", from.y.to_string()),
                    ("x2", to.x.to_string()),
                    ("y2", to.y.to_string()),
                    ("stroke", "#CCCCCC".to_owned()),
                    ("stroke-width", width.to_string()),
                    ("pointer-events", "none".to_owned()),
                ]
            }
            Self::Body { shape_id, points, fill, stroke, stroke_width } => vec![
                ("points", format_points(points)),
                ("fill", fill.clone()),
                ("stroke", stroke.clone()),
                ("stroke-width", stroke_width.to_string()),
                ("cursor", "move".to_owned()),
                (ATTR_SHAPE_ID, shape_id.to_string()),
            ],
            Self::Handle { shape_id, index, center, radius, fill, stroke } => vec![
                ("cx", center.x.to_string()),
                ("cy", center.y.to_string()),
                ("r", radius.to_string()),
                ("fill", fill.clone()),
                ("stroke", stroke.clone()),
                ("cursor", "pointer".to_owned()),
                (ATTR_SHAPE_ID, shape_id.to_string()),
                (ATTR_VERTEX, index.to_string()),
            ],
            Self::Label { shape_id, at, font_size, font_family, color, .. } => vec![
                ("x", at.x.to_string()),
                ("y", at.y.to_string()),
                ("text-anchor", "middle".to_owned()),
                ("dominant-baseline", "middle".to_owned()),
                ("font-size", font_size.to_string()),
                ("font-family", font_family.clone()),
                ("fill", color.clone()),
                ("pointer-events", "none".to_owned()),
                ("style", "user-select: none".to_owned()),
                (ATTR_SHAPE_ID, shape_id.to_string()),
            ],
        }
    }
}

/// The full ordered scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<Node>,
}

/// Build the scene for every shape, in collection order.
///
/// Layer order: grid (if enabled), then per shape its body, its handles and
/// its label. Handles follow their body so they win pointer hits over it.
#[must_use]
pub fn build(store: &ShapeStore, config: &EditorConfig) -> Scene {
    let mut nodes = Vec::with_capacity(store.len() * 2 + store.point_count());
    if config.show_grid {
        push_grid(&mut nodes, config);
    }
    for shape in store.shapes() {
        push_shape(&mut nodes, shape, config);
    }
    Scene { width: config.width, height: config.height, nodes }
}

fn push_shape(nodes: &mut Vec<Node>, shape: &Shape, config: &EditorConfig) {
    nodes.push(Node::Body {
        shape_id: shape.id,
        points: shape.points.clone(),
        fill: shape.color.clone(),
        stroke: shape.stroke.clone(),
        stroke_width: shape.stroke_width,
    });

    if shape.show_vertices {
        for (index, p) in shape.points.iter().enumerate() {
            nodes.push(Node::Handle {
                shape_id: shape.id,
                index,
                center: *p,
                radius: config.handle_radius,
                fill: config.handle_fill.clone(),
                stroke: config.handle_stroke.clone(),
            });
        }
    }

    if shape.show_label {
        if let Some(at) = shape.label_center() {
            nodes.push(Node::Label {
                shape_id: shape.id,
                at,
                text: shape.label_text(),
                font_size: config.label_font_size,
                font_family: config.label_font_family.clone(),
                color: config.label_color.clone(),
            });
        }
    }
}

fn push_grid(nodes: &mut Vec<Node>, config: &EditorConfig) {
    let step = config.grid_spacing;
    if !(step.is_finite() && step >= MIN_GRID_SPACING) {
        return;
    }

    for i in 0..=MAX_GRID_LINES {
        let x = f64::from(i) * step;
        if x > config.width {
            break;
        }
        nodes.push(Node::GridLine {
            from: Point::new(x, 0.0),
            to: Point::new(x, config.height),
            major: i % GRID_MAJOR_EVERY == 0,
        });
    }

    for j in 0..=MAX_GRID_LINES {
        let y = f64::from(j) * step;
        if y > config.height {
            break;
        }
        nodes.push(Node::GridLine {
            from: Point::new(0.0, y),
            to: Point::new(config.width, y),
            major: j % GRID_MAJOR_EVERY == 0,
        });
    }
}

fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================
// SVG export
// =============================================================

impl Scene {
    /// Standalone SVG markup sized in pixels.
    #[must_use]
    pub fn to_svg(&self) -> String {
        self.markup(&self.width.to_string(), &self.height.to_string())
    }

    /// Standalone SVG markup sized in physical centimetres; the `viewBox`
    /// stays in pixels so the drawing scales to the page.
    #[must_use]
    pub fn to_svg_physical(&self, width_cm: f64, height_cm: f64) -> String {
        self.markup(&format!("{width_cm:.2}cm"), &format!("{height_cm:.2}cm"))
    }

    fn markup(&self, width: &str, height: &str) -> String {
        let mut out = format!(
            "<svg xmlns=\"{SVG_NS}\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {} {}\">",
            self.width, self.height
        );
        for node in &self.nodes {
            out.push('<');
            out.push_str(node.tag());
            for (name, value) in node.attributes() {
                out.push_str(&format!(" {name}=\"{}\"", escape_xml(&value)));
            }
            match node.text() {
                Some(text) => {
                    out.push('>');
                    out.push_str(&escape_xml(text));
                    out.push_str(&format!("</{}>", node.tag()));
                }
                None => out.push_str("/>"),
            }
        }
        out.push_str("</svg>");
        out
    }
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
