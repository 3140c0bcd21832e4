//! Rendering sink abstraction and the SVG surface.

use std::fmt::Write as _;

use sketchboard_shared::domain::{BrushWidth, Color, Point, Stroke};

use crate::store::InProgressStroke;

/// Drawing surface the canvas is painted onto
pub trait RenderSink {
    /// Erase everything painted so far
    fn clear_surface(&mut self);

    /// Paint the whole surface with the background color
    fn fill_background(&mut self);

    fn draw_line(&mut self, from: Point, to: Point, color: &Color, width: BrushWidth);

    /// Connected line through `points`; a single point is drawn as a dot
    fn draw_polyline(&mut self, points: &[Point], color: &Color, width: BrushWidth);

    /// Serialized image of the current surface
    fn export_image(&self) -> String;
}

/// Repaint the surface from scratch.
///
/// Strokes are replayed in the given order, the stroke in progress (if any) last.
pub fn redraw<R: RenderSink + ?Sized>(
    sink: &mut R,
    strokes: &[Stroke],
    in_progress: Option<&InProgressStroke>,
) {
    sink.clear_surface();
    sink.fill_background();
    for stroke in strokes {
        sink.draw_polyline(stroke.points(), stroke.color(), stroke.width());
    }
    if let Some(stroke) = in_progress {
        sink.draw_polyline(&stroke.points, &stroke.color, stroke.width);
    }
}

/// In-memory surface exported as an SVG document.
///
/// Keeps every primitive painted since the last `clear_surface`.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    background: Color,
    elements: Vec<String>,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let mut surface = Self {
            width,
            height,
            background,
            elements: Vec::new(),
        };
        surface.fill_background();
        surface
    }

    /// Number of primitives currently painted, background included
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

impl RenderSink for SvgSurface {
    fn clear_surface(&mut self) {
        self.elements.clear();
    }

    fn fill_background(&mut self) {
        self.elements.push(format!(
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            self.width,
            self.height,
            escape_attr(self.background.as_str())
        ));
    }

    fn draw_line(&mut self, from: Point, to: Point, color: &Color, width: BrushWidth) {
        self.elements.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            escape_attr(color.as_str()),
            width.value()
        ));
    }

    fn draw_polyline(&mut self, points: &[Point], color: &Color, width: BrushWidth) {
        match points {
            [] => {}
            [dot] => self.elements.push(format!(
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                dot.x,
                dot.y,
                width.value() / 2.0,
                escape_attr(color.as_str())
            )),
            _ => {
                let mut coords = String::new();
                for (i, point) in points.iter().enumerate() {
                    if i > 0 {
                        coords.push(' ');
                    }
                    let _ = write!(coords, "{},{}", point.x, point.y);
                }
                self.elements.push(format!(
                    r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
                    coords,
                    escape_attr(color.as_str()),
                    width.value()
                ));
            }
        }
    }

    fn export_image(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{1}" viewBox="0 0 {0} {1}">"#,
            self.width, self.height
        );
        svg.push('\n');
        for element in &self.elements {
            svg.push_str("  ");
            svg.push_str(element);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Sink that records every call, for assertions in tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub calls: Vec<RenderCall>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RenderCall {
    ClearSurface,
    FillBackground,
    Line { from: Point, to: Point, color: String },
    Polyline { points: Vec<Point>, color: String },
}

#[cfg(test)]
impl RecordingSink {
    pub fn polylines(&self) -> Vec<&[Point]> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::Polyline { points, .. } => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl RenderSink for RecordingSink {
    fn clear_surface(&mut self) {
        self.calls.push(RenderCall::ClearSurface);
    }

    fn fill_background(&mut self) {
        self.calls.push(RenderCall::FillBackground);
    }

    fn draw_line(&mut self, from: Point, to: Point, color: &Color, _width: BrushWidth) {
        self.calls.push(RenderCall::Line {
            from,
            to,
            color: color.as_str().to_string(),
        });
    }

    fn draw_polyline(&mut self, points: &[Point], color: &Color, _width: BrushWidth) {
        self.calls.push(RenderCall::Polyline {
            points: points.to_vec(),
            color: color.as_str().to_string(),
        });
    }

    fn export_image(&self) -> String {
        format!("{} calls", self.calls.len())
    }
}

#[cfg(test)]
mod tests {
    use sketchboard_shared::domain::{ParticipantId, StrokeId};

    use super::*;

    fn stroke(id: &str, points: Vec<Point>) -> Stroke {
        Stroke::new(
            ParticipantId::new("alice".to_string()).unwrap(),
            StrokeId::new(id.to_string()).unwrap(),
            Color::black(),
            BrushWidth::new(4.0).unwrap(),
            points,
        )
        .unwrap()
    }

    #[test]
    fn test_redraw_clears_then_replays_in_order() {
        // テスト項目: 再描画は背景で塗り直した後、stroke を挿入順に折れ線で描く
        // given (前提条件):
        let mut sink = RecordingSink::default();
        let strokes = vec![
            stroke("s-1", vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]),
            stroke("s-2", vec![Point::new(5.0, 5.0)]),
        ];

        // when (操作):
        redraw(&mut sink, &strokes, None);

        // then (期待する結果):
        assert_eq!(sink.calls[0], RenderCall::ClearSurface);
        assert_eq!(sink.calls[1], RenderCall::FillBackground);
        assert_eq!(
            sink.polylines(),
            vec![
                &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)][..],
                &[Point::new(5.0, 5.0)][..]
            ]
        );
    }

    #[test]
    fn test_svg_surface_exports_painted_primitives() {
        // テスト項目: SVG サーフェスは背景・線・点を SVG 要素として書き出す
        // given (前提条件):
        let mut surface = SvgSurface::new(800, 600, Color::white());

        // when (操作):
        surface.draw_line(
            Point::new(10.0, 10.0),
            Point::new(20.0, 20.0),
            &Color::black(),
            BrushWidth::default(),
        );
        surface.draw_polyline(&[Point::new(3.0, 4.0)], &Color::black(), BrushWidth::default());
        let svg = surface.export_image();

        // then (期待する結果):
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r##"<rect x="0" y="0" width="800" height="600" fill="#fff"/>"##));
        assert!(svg.contains(r#"x1="10" y1="10" x2="20" y2="20""#));
        assert!(svg.contains(r#"<circle cx="3" cy="4" r="2.5""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_svg_surface_clear_drops_previous_elements() {
        // テスト項目: clear_surface 後は以前の描画が残らない
        // given (前提条件):
        let mut surface = SvgSurface::new(100, 100, Color::white());
        surface.draw_polyline(
            &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            &Color::black(),
            BrushWidth::default(),
        );

        // when (操作):
        redraw(&mut surface, &[], None);

        // then (期待する結果):
        assert_eq!(surface.element_count(), 1);
        assert!(!surface.export_image().contains("polyline"));
    }

    #[test]
    fn test_svg_attributes_are_escaped() {
        // テスト項目: 色文字列の特殊文字は属性用にエスケープされる
        // given (前提条件):
        let mut surface = SvgSurface::new(10, 10, Color::white());
        let color = Color::new(r#"red" onload="x"#).unwrap();

        // when (操作):
        surface.draw_polyline(&[Point::new(1.0, 1.0)], &color, BrushWidth::default());

        // then (期待する結果):
        assert!(surface.export_image().contains("red&quot; onload=&quot;x"));
    }
}
