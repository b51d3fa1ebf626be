//! Fixed layout templates applied from the area-selection view.

use crate::species::editor_options;
use agro_core::{Cell, PlantingGrid, SpeciesKind, SpeciesRecommendation};

/// Edge of the border template grid.
pub const BORDER_TEMPLATE_SIZE: usize = 30;

/// Square grid of the first crop option with a ring of boundary trees.
///
/// Border trees cycle through the tree options by `(row + col)`.
pub fn border_template(rec: &SpeciesRecommendation) -> PlantingGrid {
    let trees = editor_options(rec, SpeciesKind::Tree);
    let crops = editor_options(rec, SpeciesKind::Crop);
    let n = BORDER_TEMPLATE_SIZE;
    let mut grid = PlantingGrid::filled(n, n, Cell::crop(crops[0].as_str()));
    for r in 0..n {
        for c in 0..n {
            let border = r == 0 || c == 0 || r == n - 1 || c == n - 1;
            if !border {
                continue;
            }
            if let Some(cell) = grid.get_mut(r, c) {
                *cell = Cell::tree(trees[(r + c) % trees.len()].as_str());
            }
        }
    }
    grid
}
