//! The closed stroke-component vocabulary.
//!
//! Every glyph in the script is built from the same 13 stroke primitives,
//! split into an upper and a lower band around a shared baseline. The set is
//! fixed: it is an enum, not a runtime-extensible registry, and lookups by
//! name go through an explicit table with an `UnknownComponent` failure
//! branch.

use serde::{Deserialize, Serialize};

use crate::glyph::GlyphError;

/// Which half of the glyph a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// Above the baseline.
    Upper,
    /// Below the baseline.
    Lower,
}

/// One stroke primitive of the script.
///
/// Serialized by its canonical screaming-snake name, matching the on-disk
/// catalog format (e.g. `"UPPER_LEFT_VERTICAL"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Component {
    UpperLeftVertical,
    UpperCenterVertical,
    UpperDiamondLowerLeft,
    UpperDiamondUpperLeft,
    UpperDiamondUpperRight,
    UpperDiamondLowerRight,
    LowerLeftVertical,
    LowerCenterVertical,
    LowerDiamondLowerLeft,
    LowerDiamondUpperLeft,
    LowerDiamondUpperRight,
    LowerDiamondLowerRight,
    LowerCircle,
}

impl Component {
    /// Number of components in the vocabulary.
    pub const COUNT: usize = 13;

    /// Every component, in canonical order. The order is stable and doubles
    /// as the index space for [`crate::glyph::Glyph`]'s activation table.
    pub const ALL: [Component; Self::COUNT] = [
        Component::UpperLeftVertical,
        Component::UpperCenterVertical,
        Component::UpperDiamondLowerLeft,
        Component::UpperDiamondUpperLeft,
        Component::UpperDiamondUpperRight,
        Component::UpperDiamondLowerRight,
        Component::LowerLeftVertical,
        Component::LowerCenterVertical,
        Component::LowerDiamondLowerLeft,
        Component::LowerDiamondUpperLeft,
        Component::LowerDiamondUpperRight,
        Component::LowerDiamondLowerRight,
        Component::LowerCircle,
    ];

    /// Canonical name as stored in catalog files.
    pub fn name(&self) -> &'static str {
        match self {
            Component::UpperLeftVertical => "UPPER_LEFT_VERTICAL",
            Component::UpperCenterVertical => "UPPER_CENTER_VERTICAL",
            Component::UpperDiamondLowerLeft => "UPPER_DIAMOND_LOWER_LEFT",
            Component::UpperDiamondUpperLeft => "UPPER_DIAMOND_UPPER_LEFT",
            Component::UpperDiamondUpperRight => "UPPER_DIAMOND_UPPER_RIGHT",
            Component::UpperDiamondLowerRight => "UPPER_DIAMOND_LOWER_RIGHT",
            Component::LowerLeftVertical => "LOWER_LEFT_VERTICAL",
            Component::LowerCenterVertical => "LOWER_CENTER_VERTICAL",
            Component::LowerDiamondLowerLeft => "LOWER_DIAMOND_LOWER_LEFT",
            Component::LowerDiamondUpperLeft => "LOWER_DIAMOND_UPPER_LEFT",
            Component::LowerDiamondUpperRight => "LOWER_DIAMOND_UPPER_RIGHT",
            Component::LowerDiamondLowerRight => "LOWER_DIAMOND_LOWER_RIGHT",
            Component::LowerCircle => "LOWER_CIRCLE",
        }
    }

    /// Look up a component by its canonical name.
    pub fn from_name(name: &str) -> Result<Component, GlyphError> {
        Component::ALL
            .iter()
            .copied()
            .find(|c| c.name() == name)
            .ok_or_else(|| GlyphError::UnknownComponent {
                name: name.to_string(),
            })
    }

    /// Which band this component draws into.
    pub fn band(&self) -> Band {
        match self {
            Component::UpperLeftVertical
            | Component::UpperCenterVertical
            | Component::UpperDiamondLowerLeft
            | Component::UpperDiamondUpperLeft
            | Component::UpperDiamondUpperRight
            | Component::UpperDiamondLowerRight => Band::Upper,
            _ => Band::Lower,
        }
    }

    /// Position in [`Component::ALL`]; used as the activation-table index.
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_has_13_components() {
        assert_eq!(Component::ALL.len(), 13);
        assert_eq!(Component::COUNT, 13);
    }

    #[test]
    fn names_round_trip() {
        for c in Component::ALL {
            assert_eq!(Component::from_name(c.name()).unwrap(), c);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = Component::from_name("MIDDLE_SQUIGGLE").unwrap_err();
        assert!(matches!(err, GlyphError::UnknownComponent { .. }));
    }

    #[test]
    fn band_partition() {
        let upper = Component::ALL.iter().filter(|c| c.band() == Band::Upper).count();
        let lower = Component::ALL.iter().filter(|c| c.band() == Band::Lower).count();
        assert_eq!(upper, 6);
        assert_eq!(lower, 7); // lower band carries the circle
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&Component::UpperDiamondLowerRight).unwrap();
        assert_eq!(json, "\"UPPER_DIAMOND_LOWER_RIGHT\"");
        let back: Component = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Component::UpperDiamondLowerRight);
    }

    #[test]
    fn indices_match_all_order() {
        for (i, c) in Component::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }
}
