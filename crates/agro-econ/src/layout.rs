//! Cell-by-cell economics for an arbitrary (possibly hand-edited) grid.

use crate::tables::EconomicsTables;
use crate::{acres, investment_factor, round_half_up};
use agro_core::{CellKind, EconomicProjection, FarmParameters, PlantingGrid, PROJECTION_YEARS};
use rust_decimal::Decimal;
use tracing::debug;

/// Share of mature yield reached in each projection year.
pub fn maturity_curve() -> [Decimal; PROJECTION_YEARS] {
    [
        Decimal::ZERO,
        Decimal::new(35, 2),
        Decimal::new(55, 2),
        Decimal::new(75, 2),
        Decimal::ONE,
    ]
}

const OPERATIONS_PER_ACRE: i64 = 4_500;
const MIN_OPERATIONS: i64 = 2_000;

/// Acreage used by the layout model: zero or non-finite means one acre,
/// anything smaller than 0.01 acre is raised to it and anything above
/// [`agro_core::MAX_AREA_ACRES`] is lowered to the cap.
pub fn effective_area(area: f64) -> Decimal {
    let area = if area.is_finite() && area != 0.0 {
        area
    } else {
        1.0
    };
    acres(area.max(0.01))
}

/// Intermediate totals behind a layout projection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutBreakdown {
    pub tree_cells: usize,
    pub crop_cells: usize,
    /// Planted cost after the investment factor.
    pub planting_cost: Decimal,
    /// Flat operations overhead.
    pub operations: Decimal,
    /// Total cost.
    pub cost: Decimal,
    /// Gross mature yield.
    pub yield_value: Decimal,
    /// ROI before the non-negative clamp, floored at -100.
    pub signed_roi: i64,
}

/// Sum the grid against `tables`. Returns `None` for an empty grid.
pub fn layout_breakdown(
    tables: &EconomicsTables,
    grid: &PlantingGrid,
    params: &FarmParameters,
) -> Option<LayoutBreakdown> {
    if grid.is_empty() {
        return None;
    }
    let area = effective_area(params.area);
    let cell_area = area / Decimal::from(grid.len().max(1));
    let factor = investment_factor(params.investment);

    let mut planted = Decimal::ZERO;
    let mut yield_value = Decimal::ZERO;
    let mut tree_cells = 0;
    for cell in grid.cells() {
        if cell.kind == CellKind::Tree {
            tree_cells += 1;
        }
        let rates = tables.rates_for(cell);
        planted += rates.cost_per_acre * cell_area;
        yield_value += rates.yield_per_acre * cell_area;
    }

    let planting_cost = planted * factor;
    let operations = (area * Decimal::from(OPERATIONS_PER_ACRE) * factor)
        .max(Decimal::from(MIN_OPERATIONS));
    let cost = planting_cost + operations;
    let signed_roi = if cost > Decimal::ZERO {
        round_half_up((yield_value - cost) / cost * Decimal::from(100)).max(-100)
    } else {
        0
    };

    Some(LayoutBreakdown {
        tree_cells,
        crop_cells: grid.len() - tree_cells,
        planting_cost,
        operations,
        cost,
        yield_value,
        signed_roi,
    })
}

impl LayoutBreakdown {
    /// Projection reported to callers. ROI is clamped at zero.
    pub fn projection(&self) -> EconomicProjection {
        let upkeep_rate = Decimal::new(8, 2);
        let mut income_yearly = [0i64; PROJECTION_YEARS];
        for (year, factor) in maturity_curve().iter().enumerate() {
            income_yearly[year] = if year == 0 {
                round_half_up(-self.cost)
            } else {
                let gross = self.yield_value * factor;
                let upkeep = self.cost * upkeep_rate * factor;
                round_half_up(gross - upkeep)
            };
        }
        EconomicProjection {
            cost: round_half_up(self.cost),
            yield_value: round_half_up(self.yield_value),
            income_yearly,
            roi: self.signed_roi.max(0),
        }
    }
}

/// Recompute economics for `grid` with custom reference tables.
pub fn recalculate_with(
    tables: &EconomicsTables,
    grid: &PlantingGrid,
    params: &FarmParameters,
) -> EconomicProjection {
    match layout_breakdown(tables, grid, params) {
        Some(b) => {
            debug!(
                rows = grid.rows(),
                cols = grid.cols(),
                trees = b.tree_cells,
                crops = b.crop_cells,
                signed_roi = b.signed_roi,
                "layout economics recalculated"
            );
            b.projection()
        }
        None => EconomicProjection::zero(),
    }
}

/// Recompute economics for `grid` with the built-in reference tables.
///
/// Deterministic: identical inputs always give identical output.
pub fn recalculate(grid: &PlantingGrid, params: &FarmParameters) -> EconomicProjection {
    recalculate_with(EconomicsTables::builtin(), grid, params)
}
