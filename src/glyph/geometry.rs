//! Deterministic vector rendering of glyphs.
//!
//! Rendering produces an abstract [`Drawing`] (line segments and circle
//! outlines in glyph-local coordinates) that any presentation layer can
//! rasterize. It is a pure function of the glyph: no randomness, no side
//! effects, and rendering the same glyph twice yields an identical stroke
//! list.
//!
//! ## Coordinate system
//!
//! The baseline sits at `y = 0`, the upper band extends to `+1.0`, the lower
//! band to `-1.0`. One glyph slot is `1.0` wide with the left vertical at
//! `x = 0` and the center at `x = 0.5`. Lower-band strokes start a small gap
//! below the baseline; every gapped vertical gets a short bridge tick
//! reconnecting it to the baseline.

use serde::{Deserialize, Serialize};

use crate::glyph::component::Component;
use crate::glyph::glyph::Glyph;

/// Layout constants shared by glyph and chain rendering.
pub mod layout {
    /// y of the shared baseline.
    pub const BASELINE_Y: f64 = 0.0;
    /// Full-height tip of the upper band.
    pub const FULL_UP: f64 = 1.0;
    /// Full-height tip of the lower band.
    pub const FULL_DOWN: f64 = -1.0;
    /// Half-height tip of the upper band.
    pub const HALF_UP: f64 = 0.5;
    /// Half-height tip of the lower band.
    pub const HALF_DOWN: f64 = -0.5;
    /// x of the left vertical within a slot.
    pub const LEFT_X: f64 = 0.0;
    /// x of the center vertical within a slot.
    pub const CENTER_X: f64 = 0.5;
    /// x of the right diamond reference point (mirror of the left tip).
    pub const RIGHT_X: f64 = 1.0;
    /// Gap between the baseline and lower-band stroke starts.
    pub const LOWER_GAP: f64 = 0.1;
    /// Radius of the lower-band circle.
    pub const CIRCLE_RADIUS: f64 = 0.05;
    /// Offset of the circle center below the lower full tip.
    pub const CIRCLE_OFFSET: f64 = -0.05;
    /// Width of one glyph slot in a chain.
    pub const SLOT_WIDTH: f64 = 1.0;
    /// Spacing between slots (zero: verticals of adjacent slots coincide).
    pub const SLOT_SPACING: f64 = 0.0;
}

/// A point in glyph coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One drawn primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stroke {
    /// A straight line segment.
    Line { from: Point, to: Point },
    /// An unfilled circle outline.
    Circle { center: Point, radius: f64 },
}

/// An ordered list of strokes. Stroke order follows rendering order and is
/// deterministic; duplicate strokes are permitted (the cross-band bridge rule
/// can re-draw a tick a gapped vertical already drew).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub strokes: Vec<Stroke>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, from: Point, to: Point) {
        self.strokes.push(Stroke::Line { from, to });
    }

    fn circle(&mut self, center: Point, radius: f64) {
        self.strokes.push(Stroke::Circle { center, radius });
    }

    /// Bounding box as `(min, max)`, or `None` for an empty drawing.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut extend = |p: Point, r: f64| {
            min.x = min.x.min(p.x - r);
            min.y = min.y.min(p.y - r);
            max.x = max.x.max(p.x + r);
            max.y = max.y.max(p.y + r);
        };
        for stroke in &self.strokes {
            match *stroke {
                Stroke::Line { from, to } => {
                    extend(from, 0.0);
                    extend(to, 0.0);
                }
                Stroke::Circle { center, radius } => extend(center, radius),
            }
        }
        if self.strokes.is_empty() {
            None
        } else {
            Some((min, max))
        }
    }

    /// Serialize as a standalone SVG document (y axis flipped so the upper
    /// band points up on screen).
    pub fn to_svg(&self) -> String {
        const SCALE: f64 = 100.0;
        const MARGIN: f64 = 0.2;

        let (min, max) = self
            .bounds()
            .unwrap_or((Point::new(0.0, 0.0), Point::new(0.0, 0.0)));
        let width = (max.x - min.x + 2.0 * MARGIN) * SCALE;
        let height = (max.y - min.y + 2.0 * MARGIN) * SCALE;
        let tx = |x: f64| (x - min.x + MARGIN) * SCALE;
        let ty = |y: f64| (max.y - y + MARGIN) * SCALE;

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" \
             viewBox=\"0 0 {width:.1} {height:.1}\">\n"
        );
        for stroke in &self.strokes {
            match *stroke {
                Stroke::Line { from, to } => {
                    svg.push_str(&format!(
                        "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" \
                         stroke=\"black\" stroke-width=\"3\"/>\n",
                        tx(from.x),
                        ty(from.y),
                        tx(to.x),
                        ty(to.y),
                    ));
                }
                Stroke::Circle { center, radius } => {
                    svg.push_str(&format!(
                        "  <circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{:.1}\" \
                         stroke=\"black\" stroke-width=\"3\" fill=\"none\"/>\n",
                        tx(center.x),
                        ty(center.y),
                        radius * SCALE,
                    ));
                }
            }
        }
        svg.push_str("</svg>\n");
        svg
    }
}

/// Render a single glyph: a one-slot baseline plus the glyph's strokes.
///
/// An all-inactive glyph draws only the baseline.
pub fn render_glyph(glyph: &Glyph) -> Drawing {
    use layout::*;

    let mut drawing = Drawing::new();
    drawing.line(
        Point::new(LEFT_X, BASELINE_Y),
        Point::new(LEFT_X + SLOT_WIDTH, BASELINE_Y),
    );
    draw_glyph_at(glyph, 0.0, &mut drawing);
    drawing
}

/// Draw one glyph's strokes (no baseline) at a horizontal slot offset.
pub(crate) fn draw_glyph_at(glyph: &Glyph, x_offset: f64, drawing: &mut Drawing) {
    use layout::*;

    let left = x_offset + LEFT_X;
    let center = x_offset + CENTER_X;
    let right = x_offset + RIGHT_X;

    // Upper verticals sit directly on the baseline.
    if glyph.is_active(Component::UpperLeftVertical) {
        drawing.line(Point::new(left, BASELINE_Y), Point::new(left, HALF_UP));
    }
    if glyph.is_active(Component::UpperCenterVertical) {
        drawing.line(Point::new(center, BASELINE_Y), Point::new(center, FULL_UP));
    }

    // Lower verticals start a gap below the baseline; each gets a bridge
    // tick reconnecting it to the baseline.
    if glyph.is_active(Component::LowerLeftVertical) {
        drawing.line(
            Point::new(left, BASELINE_Y),
            Point::new(left, BASELINE_Y - LOWER_GAP),
        );
        drawing.line(
            Point::new(left, BASELINE_Y - LOWER_GAP),
            Point::new(left, HALF_DOWN),
        );
    }
    if glyph.is_active(Component::LowerCenterVertical) {
        drawing.line(
            Point::new(center, BASELINE_Y),
            Point::new(center, BASELINE_Y - LOWER_GAP),
        );
        drawing.line(
            Point::new(center, BASELINE_Y - LOWER_GAP),
            Point::new(center, FULL_DOWN),
        );
    }

    // Upper diamond. Corners: left tip, center tip, right reference (the
    // mirror of the left tip), base point under the center on the baseline.
    {
        let left_tip = Point::new(left, HALF_UP);
        let center_tip = Point::new(center, FULL_UP);
        let right_ref = Point::new(right, HALF_UP);
        let base = Point::new(center, BASELINE_Y);

        if glyph.is_active(Component::UpperDiamondLowerLeft) {
            drawing.line(left_tip, base);
        }
        if glyph.is_active(Component::UpperDiamondUpperLeft) {
            drawing.line(left_tip, center_tip);
        }
        if glyph.is_active(Component::UpperDiamondUpperRight) {
            drawing.line(center_tip, right_ref);
        }
        if glyph.is_active(Component::UpperDiamondLowerRight) {
            drawing.line(base, right_ref);
            // The edge lands on the baseline under the center; when the
            // lower center vertical is active (and thus gapped), re-draw the
            // center bridge tick so the two visually connect. This coupling
            // applies only to this edge/band pair.
            if glyph.is_active(Component::LowerCenterVertical) {
                drawing.line(
                    Point::new(center, BASELINE_Y),
                    Point::new(center, BASELINE_Y - LOWER_GAP),
                );
            }
        }
    }

    // Lower diamond mirrors the upper one, but the edge-to-corner assignment
    // is swapped relative to the upper band: "lower left" runs tip-to-tip
    // and "upper left" runs tip-to-base. The swap keeps stroke continuity
    // with the upper band and is intentional.
    {
        let left_tip = Point::new(left, HALF_DOWN);
        let center_tip = Point::new(center, FULL_DOWN);
        let right_ref = Point::new(right, HALF_DOWN);
        let base = Point::new(center, BASELINE_Y - LOWER_GAP);

        if glyph.is_active(Component::LowerDiamondLowerLeft) {
            drawing.line(left_tip, center_tip);
        }
        if glyph.is_active(Component::LowerDiamondUpperLeft) {
            drawing.line(left_tip, base);
        }
        if glyph.is_active(Component::LowerDiamondUpperRight) {
            drawing.line(base, right_ref);
        }
        if glyph.is_active(Component::LowerDiamondLowerRight) {
            drawing.line(center_tip, right_ref);
        }
    }

    if glyph.is_active(Component::LowerCircle) {
        drawing.circle(
            Point::new(center, FULL_DOWN + CIRCLE_OFFSET),
            CIRCLE_RADIUS,
        );
    }
}
