//! Planting grid synthesis.

use agro_core::{Cell, FarmParameters, Investment, PlantingGrid, Soil, MAX_AREA_ACRES};
use rand::Rng;

/// Smallest generated grid edge.
pub const MIN_GRID_SIZE: usize = 6;

/// Grid edge for a plot: `max(6, round(sqrt(area) * 6))`.
///
/// Non-positive or non-finite areas get the minimum grid; areas above
/// [`MAX_AREA_ACRES`] get the grid of the cap.
pub fn grid_size(area: f64) -> usize {
    let area = if area.is_finite() {
        area.min(MAX_AREA_ACRES)
    } else {
        0.0
    };
    let n = (area.sqrt() * MIN_GRID_SIZE as f64).round();
    if n.is_finite() && n > MIN_GRID_SIZE as f64 {
        n as usize
    } else {
        MIN_GRID_SIZE
    }
}

/// Nominal tree spacing in meters.
pub fn tree_spacing_m(soil: Soil) -> usize {
    match soil {
        Soil::Clay => 10,
        Soil::Sandy => 8,
        Soil::Loam => 9,
    }
}

/// Lattice step between tree candidates: half the spacing, rounded up at .5.
pub fn placement_step(soil: Soil) -> usize {
    (tree_spacing_m(soil) + 1) / 2
}

/// Probability that a lattice point receives a tree.
pub fn tree_density(investment: Investment) -> f64 {
    match investment {
        Investment::Low => 0.6,
        Investment::Medium => 0.8,
        Investment::High => 1.0,
    }
}

/// Build a fully planted square grid for the plot.
///
/// Trees go on the spacing lattice, each lattice point accepted when a
/// uniform draw from `rng` falls below the investment density. Every other
/// cell is filled with a crop chosen by `(row * 3 + col) mod crops`.
pub fn synthesize_grid<R: Rng + ?Sized>(
    trees: &[String],
    crops: &[String],
    params: &FarmParameters,
    rng: &mut R,
) -> PlantingGrid {
    let n = grid_size(params.area);
    let mut grid = PlantingGrid::new(n, n);
    let step = placement_step(params.soil);
    let density = tree_density(params.investment);

    for r in (0..n).step_by(step) {
        for c in (0..n).step_by(step) {
            let accepted = rng.gen::<f64>() < density;
            if !accepted || trees.is_empty() {
                continue;
            }
            if let Some(cell) = grid.get_mut(r, c) {
                *cell = Cell::tree(trees[(r + c) % trees.len()].as_str());
            }
        }
    }

    for r in 0..n {
        for c in 0..n {
            let Some(cell) = grid.get_mut(r, c) else {
                continue;
            };
            if !cell.is_empty() {
                continue;
            }
            *cell = match crops.len() {
                0 => Cell::crop(""),
                len => Cell::crop(crops[(r * 3 + c) % len].as_str()),
            };
        }
    }
    grid
}
