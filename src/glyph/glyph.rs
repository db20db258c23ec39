//! A glyph as a set of active components.
//!
//! The activation table always covers the full 13-component vocabulary;
//! activation is idempotent and there is no deactivation operation. Two
//! glyphs compare equal iff their active-component sets are equal, regardless
//! of activation order.

use std::collections::BTreeSet;

use crate::glyph::component::Component;
use crate::glyph::GlyphResult;

/// One symbol of the script: a total mapping from every vocabulary component
/// to active/inactive. The all-inactive glyph is valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Glyph {
    active: [bool; Component::COUNT],
}

impl Glyph {
    /// A glyph with every component inactive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a component. Idempotent.
    pub fn activate(&mut self, component: Component) {
        self.active[component.index()] = true;
    }

    /// Activate a component by its canonical name.
    ///
    /// Fails with [`GlyphError::UnknownComponent`] for names outside the
    /// vocabulary, leaving the glyph unmodified.
    pub fn activate_name(&mut self, name: &str) -> GlyphResult<()> {
        let component = Component::from_name(name)?;
        self.activate(component);
        Ok(())
    }

    /// Activate all four upper-band diamond edges.
    pub fn activate_upper_diamond(&mut self) {
        self.activate(Component::UpperDiamondLowerLeft);
        self.activate(Component::UpperDiamondUpperLeft);
        self.activate(Component::UpperDiamondUpperRight);
        self.activate(Component::UpperDiamondLowerRight);
    }

    /// Activate all four lower-band diamond edges.
    pub fn activate_lower_diamond(&mut self) {
        self.activate(Component::LowerDiamondLowerLeft);
        self.activate(Component::LowerDiamondUpperLeft);
        self.activate(Component::LowerDiamondUpperRight);
        self.activate(Component::LowerDiamondLowerRight);
    }

    /// Whether a component is active.
    pub fn is_active(&self, component: Component) -> bool {
        self.active[component.index()]
    }

    /// True if no component is active.
    pub fn is_empty(&self) -> bool {
        !self.active.iter().any(|&a| a)
    }

    /// Active components in canonical vocabulary order.
    pub fn active_components(&self) -> Vec<Component> {
        Component::ALL
            .iter()
            .copied()
            .filter(|c| self.is_active(*c))
            .collect()
    }

    /// Active components as an unordered set: the glyph's comparison key.
    pub fn active_set(&self) -> BTreeSet<Component> {
        self.active_components().into_iter().collect()
    }

    /// Rebuild a glyph from a collection of components.
    pub fn from_components<I>(components: I) -> Self
    where
        I: IntoIterator<Item = Component>,
    {
        let mut glyph = Glyph::new();
        for c in components {
            glyph.activate(c);
        }
        glyph
    }

    /// Rebuild a glyph from canonical component names, failing on the first
    /// name outside the vocabulary.
    pub fn from_names<'a, I>(names: I) -> GlyphResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut glyph = Glyph::new();
        for name in names {
            glyph.activate_name(name)?;
        }
        Ok(glyph)
    }
}
