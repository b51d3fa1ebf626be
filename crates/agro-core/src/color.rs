//! Stable species colors derived from the label text.

use crate::SpeciesKind;

/// Greens used for tree species.
pub const TREE_PALETTE: [&str; 8] = [
    "#065f46", "#047857", "#059669", "#0f766e", "#04724d", "#166534", "#14532d", "#1b4332",
];

/// Warm tones used for crop species.
pub const CROP_PALETTE: [&str; 8] = [
    "#f97316", "#f59e0b", "#eab308", "#a3e635", "#4ade80", "#22c55e", "#84cc16", "#d946ef",
];

/// Color for a tree cell without a label.
pub const DEFAULT_TREE_COLOR: &str = "#166534";
/// Color for a crop cell without a label.
pub const DEFAULT_CROP_COLOR: &str = "#22c55e";

/// 32-bit rolling hash (`h * 31 + unit`) over the UTF-16 code units of `label`.
fn label_hash(label: &str) -> u32 {
    let h = label
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
    h.unsigned_abs()
}

/// Deterministic hex color for a species label.
///
/// The same `(label, kind)` always maps to the same palette entry, so views
/// and legends agree without sharing a color registry. Distinct labels may
/// collide.
pub fn color_for(label: &str, kind: SpeciesKind) -> &'static str {
    let palette = match kind {
        SpeciesKind::Tree => &TREE_PALETTE,
        SpeciesKind::Crop => &CROP_PALETTE,
    };
    if label.is_empty() {
        return match kind {
            SpeciesKind::Tree => DEFAULT_TREE_COLOR,
            SpeciesKind::Crop => DEFAULT_CROP_COLOR,
        };
    }
    palette[(label_hash(label) % palette.len() as u32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_labels() {
        assert_eq!(label_hash("Neem"), 2_423_999);
        assert_eq!(color_for("Neem", SpeciesKind::Tree), "#1b4332");
        assert_eq!(color_for("Neem", SpeciesKind::Crop), "#d946ef");
        assert_eq!(color_for("Millet", SpeciesKind::Crop), "#22c55e");
        assert_eq!(color_for("Date Palm", SpeciesKind::Tree), "#04724d");
    }

    #[test]
    fn empty_label_uses_kind_default() {
        assert_eq!(color_for("", SpeciesKind::Tree), DEFAULT_TREE_COLOR);
        assert_eq!(color_for("", SpeciesKind::Crop), DEFAULT_CROP_COLOR);
    }

    #[test]
    fn hash_wraps_instead_of_overflowing() {
        let long = "Mahogany".repeat(64);
        let _ = color_for(&long, SpeciesKind::Tree);
    }

    proptest! {
        #[test]
        fn stays_in_kind_palette(label in ".{0,40}") {
            let t = color_for(&label, SpeciesKind::Tree);
            let c = color_for(&label, SpeciesKind::Crop);
            prop_assert!(TREE_PALETTE.contains(&t));
            prop_assert!(CROP_PALETTE.contains(&c));
            prop_assert_eq!(t, color_for(&label, SpeciesKind::Tree));
        }
    }
}
