#![deny(warnings)]

//! In-memory planning session.
//!
//! The session holds one immutable [`PlanState`] behind an `Arc`. Every
//! operation derives a complete new state (grid and economics computed from
//! the same edited grid) and only then replaces the published one, so
//! readers never observe a grid paired with stale economics.

use agro_core::{
    validate_params, Cell, EconomicProjection, FarmParameters, GridError, LegendEntry,
    PlanSnapshot, PlannerConfig, PlantingGrid, SpeciesKind, SpeciesRecommendation,
};
use agro_econ::EconomicsTables;
use agro_planner::{advise, border_template, editor_options, generate_plan, Suggestion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Smallest acreage change that triggers a new plan from the area selector.
pub const AREA_CHANGE_THRESHOLD: f64 = 0.01;

/// Everything the views read: inputs plus the derived plan.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanState {
    pub params: FarmParameters,
    pub recommendation: SpeciesRecommendation,
    pub grid: PlantingGrid,
    pub economics: EconomicProjection,
}

/// A single cell repaint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEdit {
    pub row: usize,
    pub col: usize,
    pub kind: SpeciesKind,
    /// Species to plant; `None` picks the first option for `kind`.
    #[serde(default)]
    pub label: Option<String>,
}

impl CellEdit {
    pub fn new(row: usize, col: usize, kind: SpeciesKind, label: Option<String>) -> Self {
        Self {
            row,
            col,
            kind,
            label,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl PlanState {
    /// State before any plan has been generated.
    pub fn initial(params: FarmParameters) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn from_plan(params: FarmParameters, plan: PlanSnapshot) -> Self {
        Self {
            params,
            recommendation: plan.recommendation,
            grid: plan.grid,
            economics: plan.economics,
        }
    }

    pub fn snapshot(&self) -> PlanSnapshot {
        PlanSnapshot {
            recommendation: self.recommendation.clone(),
            grid: self.grid.clone(),
            economics: self.economics.clone(),
        }
    }

    /// New state with `grid` and economics recalculated from it.
    pub fn with_grid(&self, grid: PlantingGrid, tables: &EconomicsTables) -> Self {
        let economics = agro_econ::recalculate_with(tables, &grid, &self.params);
        Self {
            params: self.params,
            recommendation: self.recommendation.clone(),
            grid,
            economics,
        }
    }

    /// New state with one cell repainted.
    pub fn painted(&self, edit: &CellEdit, tables: &EconomicsTables) -> Result<Self, EditError> {
        let label = match &edit.label {
            Some(label) => label.clone(),
            None => editor_options(&self.recommendation, edit.kind)
                .into_iter()
                .next()
                .unwrap_or_default(),
        };
        let grid = self
            .grid
            .with_cell(edit.row, edit.col, Cell::planted(edit.kind, label))?;
        Ok(self.with_grid(grid, tables))
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        self.grid.legend()
    }

    pub fn advice(&self) -> Vec<Suggestion> {
        advise(&self.grid, &self.params, &self.economics)
    }
}

/// Single-user planning session.
pub struct PlanningSession {
    state: Arc<PlanState>,
    rng: ChaCha8Rng,
    tables: Arc<EconomicsTables>,
}

impl PlanningSession {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            state: Arc::new(PlanState::initial(config.params)),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            tables: Arc::new(EconomicsTables::builtin().clone()),
        }
    }

    /// Replace the reference tables used for recalculation.
    pub fn with_tables(mut self, tables: EconomicsTables) -> Self {
        self.tables = Arc::new(tables);
        self
    }

    pub fn state(&self) -> &PlanState {
        &self.state
    }

    /// Shared handle to the current state; stays valid after later edits.
    pub fn snapshot(&self) -> Arc<PlanState> {
        Arc::clone(&self.state)
    }

    pub fn tables(&self) -> &EconomicsTables {
        &self.tables
    }

    fn publish(&mut self, next: PlanState) -> &PlanState {
        self.state = Arc::new(next);
        &self.state
    }

    /// Generate a fresh plan for `params` and publish it.
    pub fn submit(&mut self, params: FarmParameters) -> &PlanState {
        let plan = generate_plan(&params, &mut self.rng);
        info!(
            area = params.area,
            soil = %params.soil,
            climate = %params.climate,
            investment = %params.investment,
            size = plan.grid.rows(),
            "plan submitted"
        );
        self.publish(PlanState::from_plan(params, plan))
    }

    /// Repaint one cell and publish the recalculated state.
    pub fn paint(&mut self, edit: &CellEdit) -> Result<&PlanState, EditError> {
        let next = self.state.painted(edit, &self.tables)?;
        debug!(row = edit.row, col = edit.col, kind = %edit.kind, roi = next.economics.roi, "cell painted");
        Ok(self.publish(next))
    }

    /// Apply a drag stroke. Cells are painted in order, each edit
    /// recalculating economics over the whole grid; repeated cells are
    /// painted once. Nothing is published if any edit is out of bounds.
    pub fn paint_stroke(&mut self, edits: &[CellEdit]) -> Result<&PlanState, EditError> {
        let mut seen = HashSet::new();
        let mut next = (*self.state).clone();
        for edit in edits {
            if !seen.insert((edit.row, edit.col)) {
                continue;
            }
            next = next.painted(edit, &self.tables)?;
        }
        debug!(cells = seen.len(), roi = next.economics.roi, "stroke painted");
        Ok(self.publish(next))
    }

    /// Feed a measured plot size from the area selector.
    ///
    /// Returns `true` when the acreage changed enough to regenerate the plan.
    /// Plots that fail [`validate_params`] (zero, non-finite or over the
    /// acreage cap) are ignored.
    pub fn set_area_m2(&mut self, m2: f64) -> bool {
        let acres = agro_geo::m2_to_acres(m2);
        if (acres - self.state.params.area).abs() < AREA_CHANGE_THRESHOLD {
            return false;
        }
        let params = FarmParameters {
            area: acres,
            ..self.state.params
        };
        if let Err(err) = validate_params(&params) {
            warn!(m2, %err, "selected area ignored");
            return false;
        }
        self.submit(params);
        true
    }

    /// Replace the grid with the boundary-tree template.
    pub fn apply_border_template(&mut self) -> &PlanState {
        let grid = border_template(&self.state.recommendation);
        let next = self.state.with_grid(grid, &self.tables);
        info!(cost = next.economics.cost, "border template applied");
        self.publish(next)
    }
}
