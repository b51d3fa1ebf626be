//! Rule-based tips for improving a layout.

use agro_core::{CellKind, EconomicProjection, FarmParameters, PlantingGrid};
use serde::Serialize;
use std::fmt;

/// One layout tip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    /// Plot under two acres.
    SmallPlotQuickHarvest,
    /// Plot over five acres.
    TimberBorder,
    /// Trees cover less than 15% of cells.
    MoreTreeCover,
    /// One crop covers more than half of all cells.
    Diversify { crop: String },
    /// ROI below 30%.
    RaiseRoi,
    /// ROI above 80%.
    CoverCrops,
    /// Nothing else applied.
    Balanced,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::SmallPlotQuickHarvest => f.write_str(
                "Small plots benefit from high-value quick harvests like Banana, Papaya, or leafy greens on at least 40% of the grid.",
            ),
            Suggestion::TimberBorder => f.write_str(
                "Dedicate 15-20% of the outer grid to long-term timber trees (Teak, Mahogany) for future lump-sum income while keeping the interior for cash crops.",
            ),
            Suggestion::MoreTreeCover => f.write_str(
                "Increase tree cover along boundaries with nitrogen fixers (Subabul, Drumstick) to boost soil fertility and microclimate resilience.",
            ),
            Suggestion::Diversify { crop } => write!(
                f,
                "Diversify crops: {crop} occupies over half the field. Add legumes or spices to reduce risk and improve prices."
            ),
            Suggestion::RaiseRoi => f.write_str(
                "ROI is moderate; convert a few low-yield cells to premium crops (Turmeric, Okra) or intensive vegetables with drip irrigation.",
            ),
            Suggestion::CoverCrops => f.write_str(
                "Strong ROI: set aside 10% of cells for cover crops (Sweet Potato, Green Gram) to maintain soil without sacrificing profit.",
            ),
            Suggestion::Balanced => f.write_str(
                "Current mix is balanced. Keep rotating legumes after harvest to sustain soil health and profit margins.",
            ),
        }
    }
}

/// Most frequent labeled crop; ties go to the label seen first.
fn dominant_crop(grid: &PlantingGrid) -> Option<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for cell in grid.cells() {
        if cell.kind == CellKind::Tree || cell.label.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(label, _)| *label == cell.label) {
            Some((_, n)) => *n += 1,
            None => counts.push((cell.label.as_str(), 1)),
        }
    }
    counts
        .into_iter()
        .fold(None, |best, (label, n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((label, n)),
        })
}

/// Tips for the current grid, in display order.
pub fn advise(
    grid: &PlantingGrid,
    params: &FarmParameters,
    economics: &EconomicProjection,
) -> Vec<Suggestion> {
    let mut tips = Vec::new();
    let total = grid.len().max(1) as f64;
    let area = if params.area.is_finite() && params.area != 0.0 {
        params.area
    } else {
        1.0
    };
    let tree_cells = grid.count(CellKind::Tree);
    let tree_share = tree_cells as f64 / total;
    let crop_share = (grid.len() - tree_cells) as f64 / total;

    if area < 2.0 {
        tips.push(Suggestion::SmallPlotQuickHarvest);
    } else if area > 5.0 {
        tips.push(Suggestion::TimberBorder);
    }

    if tree_share < 0.15 {
        tips.push(Suggestion::MoreTreeCover);
    }
    if crop_share > 0.7 {
        if let Some((crop, n)) = dominant_crop(grid) {
            if n as f64 / total > 0.5 {
                tips.push(Suggestion::Diversify {
                    crop: crop.to_string(),
                });
            }
        }
    }

    if economics.roi < 30 {
        tips.push(Suggestion::RaiseRoi);
    } else if economics.roi > 80 {
        tips.push(Suggestion::CoverCrops);
    }

    if tips.is_empty() {
        tips.push(Suggestion::Balanced);
    }
    tips
}
