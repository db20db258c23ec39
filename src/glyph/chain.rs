//! Ordered glyph sequences on a shared baseline.
//!
//! A chain is how a word looks: glyphs rendered left to right in contiguous
//! slots over one continuous baseline. Order is semantically significant —
//! reversing a chain yields a different word.

use crate::glyph::geometry::{self, Drawing, Point, layout};
use crate::glyph::glyph::Glyph;

/// An ordered (possibly empty) sequence of glyphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    glyphs: Vec<Glyph>,
}

impl Chain {
    pub fn new(glyphs: Vec<Glyph>) -> Self {
        Self { glyphs }
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Total drawn width: contiguous slots, zero spacing.
    pub fn width(&self) -> f64 {
        self.glyphs.len() as f64 * (layout::SLOT_WIDTH + layout::SLOT_SPACING)
    }

    /// Render the chain: one continuous baseline spanning every slot, then
    /// each glyph at its slot offset. An empty chain renders a zero-length
    /// baseline and nothing else.
    pub fn render(&self) -> Drawing {
        let mut drawing = Drawing::new();
        drawing.strokes.push(geometry::Stroke::Line {
            from: Point::new(0.0, layout::BASELINE_Y),
            to: Point::new(self.width(), layout::BASELINE_Y),
        });
        for (slot, glyph) in self.glyphs.iter().enumerate() {
            let x_offset = slot as f64 * (layout::SLOT_WIDTH + layout::SLOT_SPACING);
            geometry::draw_glyph_at(glyph, x_offset, &mut drawing);
        }
        drawing
    }
}

impl FromIterator<Glyph> for Chain {
    fn from_iter<I: IntoIterator<Item = Glyph>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
