//! Vector scene graph produced by the layout engines.
//!
//! A scene is a flat, paint-ordered list of rectangles and text labels
//! inside one group translated by the plot margins.  It carries no state of
//! its own: hover styling is already resolved by the engine that built it.

use std::fmt::Write as _;

/// Identifies an interactive cell by the position of its record in the
/// input dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub usize);

/// Insets between the canvas edge and the plotting region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    /// Width and height left for plotting inside a `width × height` canvas.
    pub fn bounds(&self, width: f64, height: f64) -> (f64, f64) {
        (width - self.left - self.right, height - self.top - self.bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_svg(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    /// `Some` for heatmap cells, which react to the pointer.
    pub cell: Option<CellId>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rx: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

impl RectShape {
    /// Half-open containment: the right and bottom edges belong to the
    /// neighbour.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub anchor: TextAnchor,
    pub font_size: f64,
    pub bold: bool,
    pub fill: Option<String>,
    pub font_family: Option<String>,
}

impl TextLabel {
    pub fn new(x: f64, y: f64, text: impl Into<String>, anchor: TextAnchor, font_size: f64) -> Self {
        TextLabel {
            x,
            y,
            text: text.into(),
            anchor,
            font_size,
            bold: false,
            fill: None,
            font_family: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Rect(RectShape),
    Text(TextLabel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    /// Fixed logical viewport; the caller scales it to the screen.
    pub view_box: Option<(f64, f64)>,
    /// Translation applied to every element (left and top margins).
    pub origin: (f64, f64),
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn new(width: f64, height: f64, origin: (f64, f64)) -> Self {
        Scene {
            width,
            height,
            view_box: None,
            origin,
            elements: Vec::new(),
        }
    }

    pub fn push_rect(&mut self, rect: RectShape) {
        self.elements.push(Element::Rect(rect));
    }

    pub fn push_text(&mut self, label: TextLabel) {
        self.elements.push(Element::Text(label));
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectShape> {
        self.elements.iter().filter_map(|e| match e {
            Element::Rect(r) => Some(r),
            Element::Text(_) => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextLabel> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(t) => Some(t),
            Element::Rect(_) => None,
        })
    }

    /// The rectangle drawn for `cell`, if any.
    pub fn cell_rect(&self, cell: CellId) -> Option<&RectShape> {
        self.rects().find(|r| r.cell == Some(cell))
    }

    /// Topmost interactive cell under the canvas point `(x, y)`.
    ///
    /// Coordinates are in canvas units (view-box units when the scene has a
    /// view box).  Later elements paint over earlier ones, so the search runs
    /// back to front.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<CellId> {
        let (lx, ly) = (x - self.origin.0, y - self.origin.1);
        self.elements.iter().rev().find_map(|e| match e {
            Element::Rect(r) if r.contains(lx, ly) => r.cell,
            _ => None,
        })
    }

    pub fn to_svg(&self) -> String {
        self.to_svg_with_overlay("")
    }

    /// Serialize to a standalone SVG document, appending `overlay` (already
    /// SVG markup, canvas coordinates) after the plot group.
    pub fn to_svg_with_overlay(&self, overlay: &str) -> String {
        let mut out = String::new();
        match self.view_box {
            Some((w, h)) => {
                let _ = writeln!(
                    out,
                    r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}">"#
                );
            }
            None => {
                let _ = writeln!(
                    out,
                    r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
                    self.width, self.height
                );
            }
        }
        let _ = writeln!(
            out,
            r#"  <g transform="translate({},{})">"#,
            self.origin.0, self.origin.1
        );
        for element in &self.elements {
            match element {
                Element::Rect(r) => write_rect(&mut out, r),
                Element::Text(t) => write_text(&mut out, t),
            }
        }
        out.push_str("  </g>\n");
        out.push_str(overlay);
        out.push_str("</svg>\n");
        out
    }
}

fn write_rect(out: &mut String, r: &RectShape) {
    let cursor = if r.cell.is_some() { r#" cursor="pointer""# } else { "" };
    let _ = writeln!(
        out,
        r#"    <rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" stroke="{}" stroke-width="{}"{cursor}/>"#,
        r.x,
        r.y,
        r.width,
        r.height,
        r.rx,
        escape_xml(&r.fill),
        escape_xml(&r.stroke),
        r.stroke_width,
    );
}

fn write_text(out: &mut String, t: &TextLabel) {
    let mut attrs = format!(
        r#"x="{}" y="{}" text-anchor="{}" dominant-baseline="middle" font-size="{}""#,
        t.x,
        t.y,
        t.anchor.as_svg(),
        t.font_size
    );
    if t.bold {
        attrs.push_str(r#" font-weight="bold""#);
    }
    if let Some(fill) = &t.fill {
        let _ = write!(attrs, r#" fill="{}""#, escape_xml(fill));
    }
    if let Some(family) = &t.font_family {
        let _ = write!(attrs, r#" font-family="{}""#, escape_xml(family));
    }
    let _ = writeln!(out, "    <text {attrs}>{}</text>", escape_xml(&t.text));
}

/// Escape text for use in SVG content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(id: usize, x: f64, y: f64) -> RectShape {
        RectShape {
            cell: Some(CellId(id)),
            x,
            y,
            width: 10.0,
            height: 10.0,
            rx: 5.0,
            fill: "rgb(1, 2, 3)".into(),
            stroke: "white".into(),
            stroke_width: 1.0,
        }
    }

    #[test]
    fn test_hit_test_respects_origin_and_paint_order() {
        let mut scene = Scene::new(100.0, 100.0, (50.0, 10.0));
        scene.push_rect(cell(0, 0.0, 0.0));
        scene.push_rect(cell(1, 5.0, 5.0));
        assert_eq!(scene.hit_test(52.0, 12.0), Some(CellId(0)));
        // overlap: the later rect is on top
        assert_eq!(scene.hit_test(57.0, 17.0), Some(CellId(1)));
        assert_eq!(scene.hit_test(2.0, 2.0), None);
        assert_eq!(scene.hit_test(90.0, 90.0), None);
    }

    #[test]
    fn test_hit_test_ignores_labels() {
        let mut scene = Scene::new(100.0, 100.0, (0.0, 0.0));
        scene.push_text(TextLabel::new(5.0, 5.0, "Mon", TextAnchor::End, 10.0));
        assert_eq!(scene.hit_test(5.0, 5.0), None);
    }

    #[test]
    fn test_svg_output() {
        let mut scene = Scene::new(200.0, 100.0, (50.0, 10.0));
        scene.push_rect(cell(0, 1.0, 2.0));
        scene.push_text(TextLabel::new(-5.0, 7.0, "Q&A <Mon>", TextAnchor::End, 10.0));
        let svg = scene.to_svg();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">"#));
        assert!(svg.contains(r#"<g transform="translate(50,10)">"#));
        assert!(svg.contains(r#"fill="rgb(1, 2, 3)""#));
        assert!(svg.contains(r#"cursor="pointer""#));
        assert!(svg.contains("Q&amp;A &lt;Mon&gt;"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_svg_view_box() {
        let mut scene = Scene::new(400.0, 250.0, (50.0, 20.0));
        scene.view_box = Some((800.0, 400.0));
        assert!(scene.to_svg().contains(r#"viewBox="0 0 800 400""#));
    }
}
