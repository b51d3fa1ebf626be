//! Per-species reference economics.
//!
//! The built-in tables are constructed once and never mutated. A YAML
//! document with the same shape can replace them at startup.

use agro_core::{Cell, CellKind, SpeciesKind};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Cost and gross yield for one acre of a species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRates {
    pub cost_per_acre: Decimal,
    pub yield_per_acre: Decimal,
}

impl SpeciesRates {
    pub fn new(cost_per_acre: i64, yield_per_acre: i64) -> Self {
        Self {
            cost_per_acre: Decimal::from(cost_per_acre),
            yield_per_acre: Decimal::from(yield_per_acre),
        }
    }
}

/// Rates keyed by species name with a fallback entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Used for any label not listed in `species`.
    pub default: SpeciesRates,
    #[serde(default)]
    pub species: BTreeMap<String, SpeciesRates>,
}

impl RateTable {
    fn from_rows(rows: &[(&str, i64, i64)], default: SpeciesRates) -> Self {
        let species = rows
            .iter()
            .map(|&(name, cost, yld)| (name.to_string(), SpeciesRates::new(cost, yld)))
            .collect();
        Self { default, species }
    }

    /// Rates for `label`, or the default entry.
    pub fn lookup(&self, label: &str) -> SpeciesRates {
        self.species.get(label).copied().unwrap_or(self.default)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.species.contains_key(label)
    }

    fn validate(&self, kind: SpeciesKind) -> Result<(), TableError> {
        let negative = |r: &SpeciesRates| {
            r.cost_per_acre < Decimal::ZERO || r.yield_per_acre < Decimal::ZERO
        };
        if negative(&self.default) {
            return Err(TableError::NegativeRate {
                kind,
                label: "default".to_string(),
            });
        }
        for (label, rates) in &self.species {
            if negative(rates) {
                return Err(TableError::NegativeRate {
                    kind,
                    label: label.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Tree and crop reference tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EconomicsTables {
    pub trees: RateTable,
    pub crops: RateTable,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("io error: {0}")]
    Io(String),
    #[error("invalid table document: {0}")]
    Parse(String),
    #[error("{kind} rate for {label:?} is negative")]
    NegativeRate { kind: SpeciesKind, label: String },
}

impl From<std::io::Error> for TableError {
    fn from(e: std::io::Error) -> Self {
        TableError::Io(e.to_string())
    }
}

const TREE_RATES: [(&str, i64, i64); 16] = [
    ("Neem", 28_000, 65_000),
    ("Tamarind", 32_000, 82_000),
    ("Mango", 40_000, 110_000),
    ("Guava", 38_000, 98_000),
    ("Jackfruit", 42_000, 115_000),
    ("Teak", 50_000, 140_000),
    ("Eucalyptus", 36_000, 90_000),
    ("Mahogany", 52_000, 150_000),
    ("Subabul", 30_000, 70_000),
    ("Jamun", 34_000, 80_000),
    ("Casuarina", 35_000, 78_000),
    ("Acacia", 32_000, 72_000),
    ("Date Palm", 48_000, 130_000),
    ("Sisal", 25_000, 60_000),
    ("Babool", 26_000, 62_000),
    ("Drumstick", 30_000, 75_000),
];

const CROP_RATES: [(&str, i64, i64); 24] = [
    ("Turmeric", 65_000, 140_000),
    ("Banana", 90_000, 190_000),
    ("Pigeon Pea", 32_000, 52_000),
    ("Millet", 28_000, 48_000),
    ("Okra", 36_000, 62_000),
    ("Papaya", 75_000, 160_000),
    ("Sweet Potato", 35_000, 70_000),
    ("Sesame", 26_000, 43_000),
    ("Pulses", 30_000, 52_000),
    ("Pearl Millet", 27_000, 45_000),
    ("Cluster Bean", 26_000, 42_000),
    ("Groundnut", 38_000, 68_000),
    ("Wheat", 42_000, 72_000),
    ("Mustard", 31_000, 56_000),
    ("Chickpea", 32_000, 58_000),
    ("Barley", 30_000, 52_000),
    ("Potato", 60_000, 120_000),
    ("Lentil", 33_000, 60_000),
    ("Maize", 35_000, 64_000),
    ("Soybean", 36_000, 65_000),
    ("Sunflower", 37_000, 68_000),
    ("Green Gram", 31_000, 56_000),
    ("Cabbage", 45_000, 90_000),
    ("Spinach", 28_000, 52_000),
];

static BUILTIN: Lazy<EconomicsTables> = Lazy::new(|| EconomicsTables {
    trees: RateTable::from_rows(&TREE_RATES, SpeciesRates::new(32_000, 75_000)),
    crops: RateTable::from_rows(&CROP_RATES, SpeciesRates::new(34_000, 60_000)),
});

impl EconomicsTables {
    /// Process-wide built-in tables.
    pub fn builtin() -> &'static EconomicsTables {
        &BUILTIN
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, TableError> {
        let tables: EconomicsTables =
            serde_yaml::from_str(text).map_err(|e| TableError::Parse(e.to_string()))?;
        tables.trees.validate(SpeciesKind::Tree)?;
        tables.crops.validate(SpeciesKind::Crop)?;
        Ok(tables)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn table(&self, kind: SpeciesKind) -> &RateTable {
        match kind {
            SpeciesKind::Tree => &self.trees,
            SpeciesKind::Crop => &self.crops,
        }
    }

    /// Rates for a grid cell. Anything that is not a tree, empty cells
    /// included, is priced from the crop table.
    pub fn rates_for(&self, cell: &Cell) -> SpeciesRates {
        match cell.kind {
            CellKind::Tree => self.trees.lookup(&cell.label),
            CellKind::Crop | CellKind::Empty => self.crops.lookup(&cell.label),
        }
    }
}
