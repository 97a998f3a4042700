//! Output handed to whatever draws the session.
//!
//! The core never touches a canvas. It builds a [`Frame`] of plain values and
//! passes it to a [`Renderer`] in one piece.

use crate::contour::{ContourSegment, LegendEntry, LevelStyle};
use crate::dataset::Point;
use crate::mapper::PixelPoint;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Color {
    /// Hue in degrees, saturation and lightness in percent.
    Hsla { h: f64, s: f64, l: f64, a: f64 },
    Rgba { r: u8, g: u8, b: u8, a: f64 },
}

impl Color {
    pub const PATH: Color = Color::Rgba { r: 255, g: 0, b: 255, a: 0.8 };
    pub const DATA: Color = Color::Rgba { r: 0, g: 255, b: 255, a: 1.0 };

    pub fn level(style: &LevelStyle, alpha: f64) -> Self {
        Color::Hsla {
            h: style.hue,
            s: 100.0,
            l: 50.0,
            a: alpha,
        }
    }
}

/// Primitives understood by the drawing surface.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum DrawCommand {
    Line {
        from: PixelPoint,
        to: PixelPoint,
        color: Color,
        width: f64,
    },
    Circle {
        center: PixelPoint,
        radius: f64,
        fill: Color,
    },
    Text {
        at: PixelPoint,
        text: String,
        fill: Color,
    },
}

impl DrawCommand {
    pub fn contour(segment: &ContourSegment, style: &LevelStyle) -> Self {
        DrawCommand::Line {
            from: segment.p1,
            to: segment.p2,
            color: Color::level(style, LevelStyle::STROKE_ALPHA),
            width: 1.0,
        }
    }

    pub fn legend(entry: &LegendEntry) -> Self {
        DrawCommand::Text {
            at: entry.anchor,
            text: entry.label.clone(),
            fill: Color::level(&entry.style, LevelStyle::LEGEND_ALPHA),
        }
    }
}

/// Values shown as text next to the panels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CurrentState {
    pub w: f64,
    pub b: f64,
    pub loss: f64,
    pub best_w: f64,
    pub best_b: f64,
}

/// The line drawn over the scatter chart, in data coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RegressionLine {
    pub start: Point,
    pub end: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PathSegment {
    pub from: PixelPoint,
    pub to: PixelPoint,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub generation: u64,
    pub state: CurrentState,
    pub points: Vec<Point>,
    pub regression_line: RegressionLine,
    pub surface: Vec<DrawCommand>,
    pub profile: Vec<DrawCommand>,
}

pub trait Renderer {
    fn draw_chart(&mut self, points: &[Point], line: &RegressionLine);

    fn draw_surface(&mut self, commands: &[DrawCommand]);

    fn draw_profile(&mut self, _commands: &[DrawCommand]) {}

    fn show_state(&mut self, _state: &CurrentState) {}

    fn render(&mut self, frame: &Frame) {
        self.draw_chart(&frame.points, &frame.regression_line);
        self.draw_surface(&frame.surface);
        self.draw_profile(&frame.profile);
        self.show_state(&frame.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contour_command_uses_level_hue() {
        let style = LevelStyle::new(2.0, 2);
        let segment = ContourSegment {
            p1: PixelPoint::new(3.0, 4.0),
            p2: PixelPoint::new(4.0, 4.0),
            level: 2.0,
            index: 2,
        };

        match DrawCommand::contour(&segment, &style) {
            DrawCommand::Line { from, to, color, .. } => {
                assert_eq!(from, segment.p1);
                assert_eq!(to, segment.p2);
                assert_eq!(
                    color,
                    Color::Hsla {
                        h: 240.0,
                        s: 100.0,
                        l: 50.0,
                        a: 0.5
                    }
                );
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn test_legend_command_is_opaque() {
        let entry = LegendEntry {
            label: "Loss: 4".to_string(),
            anchor: PixelPoint::new(240.0, 230.0),
            style: LevelStyle::new(4.0, 3),
        };

        match DrawCommand::legend(&entry) {
            DrawCommand::Text { text, fill, .. } => {
                assert_eq!(text, "Loss: 4");
                assert!(matches!(fill, Color::Hsla { a, .. } if a == 1.0));
            }
            other => panic!("expected text, got {:?}", other),
        }
    }
}
