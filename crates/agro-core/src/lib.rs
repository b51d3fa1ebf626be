#![deny(warnings)]

//! Core domain models and invariants for the agroforestry planner.
//!
//! This crate defines the serializable farm parameters, planting grid and
//! projection types shared by the planner, the economics models and the
//! session layer, together with opt-in validation helpers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

mod color;
mod grid;

pub use color::{color_for, CROP_PALETTE, DEFAULT_CROP_COLOR, DEFAULT_TREE_COLOR, TREE_PALETTE};
pub use grid::{Cell, CellKind, GridError, LegendEntry, PlantingGrid, EMPTY_CELL_COLOR};

/// Largest farm accepted by [`validate_params`], in acres.
///
/// Keeps generated grids bounded (600×600 cells at the ceiling).
pub const MAX_AREA_ACRES: f64 = 10_000.0;

/// Soil type of the plot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Soil {
    #[default]
    Loam,
    Clay,
    Sandy,
}

/// Annual rainfall band. Carried through planning but not yet used by any model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rainfall {
    Low,
    #[default]
    Moderate,
    High,
}

/// Climate zone of the plot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Climate {
    #[default]
    Tropical,
    Arid,
    Temperate,
    Moderate,
}

/// Capital the farmer is willing to commit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Investment {
    Low,
    #[default]
    Medium,
    High,
}

/// Species category used for palettes and reference-table lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeciesKind {
    Tree,
    Crop,
}

impl Soil {
    pub const ALL: [Soil; 3] = [Soil::Loam, Soil::Clay, Soil::Sandy];

    pub fn as_str(self) -> &'static str {
        match self {
            Soil::Loam => "loam",
            Soil::Clay => "clay",
            Soil::Sandy => "sandy",
        }
    }

    /// Parse a form value, falling back to loam for anything unrecognized.
    pub fn from_label_or_default(label: &str) -> Self {
        label.parse().unwrap_or(Soil::Loam)
    }
}

impl Rainfall {
    pub const ALL: [Rainfall; 3] = [Rainfall::Low, Rainfall::Moderate, Rainfall::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Rainfall::Low => "low",
            Rainfall::Moderate => "moderate",
            Rainfall::High => "high",
        }
    }

    pub fn from_label_or_default(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl Climate {
    pub const ALL: [Climate; 4] = [
        Climate::Tropical,
        Climate::Arid,
        Climate::Temperate,
        Climate::Moderate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Climate::Tropical => "tropical",
            Climate::Arid => "arid",
            Climate::Temperate => "temperate",
            Climate::Moderate => "moderate",
        }
    }

    /// Parse a form value, falling back to the moderate zone's crop list.
    pub fn from_label_or_default(label: &str) -> Self {
        label.parse().unwrap_or(Climate::Moderate)
    }
}

impl Investment {
    pub const ALL: [Investment; 3] = [Investment::Low, Investment::Medium, Investment::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Investment::Low => "low",
            Investment::Medium => "medium",
            Investment::High => "high",
        }
    }

    pub fn from_label_or_default(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl SpeciesKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SpeciesKind::Tree => "tree",
            SpeciesKind::Crop => "crop",
        }
    }
}

fn unknown(field: &'static str, value: &str) -> ValidationError {
    ValidationError::UnknownVariant {
        field,
        value: value.to_string(),
    }
}

impl FromStr for Soil {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loam" => Ok(Soil::Loam),
            "clay" => Ok(Soil::Clay),
            "sandy" => Ok(Soil::Sandy),
            _ => Err(unknown("soil", s)),
        }
    }
}

impl FromStr for Rainfall {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Rainfall::Low),
            "moderate" => Ok(Rainfall::Moderate),
            "high" => Ok(Rainfall::High),
            _ => Err(unknown("rainfall", s)),
        }
    }
}

impl FromStr for Climate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tropical" => Ok(Climate::Tropical),
            "arid" => Ok(Climate::Arid),
            "temperate" => Ok(Climate::Temperate),
            "moderate" => Ok(Climate::Moderate),
            _ => Err(unknown("climate", s)),
        }
    }
}

impl FromStr for Investment {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Investment::Low),
            "medium" => Ok(Investment::Medium),
            "high" => Ok(Investment::High),
            _ => Err(unknown("investment", s)),
        }
    }
}

impl FromStr for SpeciesKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(SpeciesKind::Tree),
            "crop" => Ok(SpeciesKind::Crop),
            _ => Err(unknown("kind", s)),
        }
    }
}

impl fmt::Display for Soil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Rainfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Climate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Investment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SpeciesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs collected from the farmer for one planning cycle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmParameters {
    /// Plot size in acres (> 0 for meaningful output).
    pub area: f64,
    /// Soil type; selects tree candidates and spacing.
    pub soil: Soil,
    /// Rainfall band (currently informational only).
    pub rainfall: Rainfall,
    /// Climate zone; selects crop candidates.
    pub climate: Climate,
    /// Investment level; drives tree density and cost factors.
    pub investment: Investment,
}

impl Default for FarmParameters {
    fn default() -> Self {
        Self {
            area: 1.0,
            soil: Soil::default(),
            rainfall: Rainfall::default(),
            climate: Climate::default(),
            investment: Investment::default(),
        }
    }
}

/// Species mix suggested for a plot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecommendation {
    /// Up to six tree species, in reference order.
    pub trees: Vec<String>,
    /// Up to six crop species, in reference order.
    pub crops: Vec<String>,
    /// Intercropping pattern descriptions.
    pub patterns: Vec<String>,
}

impl SpeciesRecommendation {
    /// Candidates of one kind.
    pub fn species(&self, kind: SpeciesKind) -> &[String] {
        match kind {
            SpeciesKind::Tree => &self.trees,
            SpeciesKind::Crop => &self.crops,
        }
    }
}

/// Number of points in every income curve (year 0 through year 4).
pub const PROJECTION_YEARS: usize = 5;

/// Multi-year financial projection in whole currency units.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicProjection {
    /// Total upfront cost.
    pub cost: i64,
    /// Gross revenue at full maturity.
    #[serde(rename = "yield")]
    pub yield_value: i64,
    /// Net cash flow per year, year 0 first.
    pub income_yearly: [i64; PROJECTION_YEARS],
    /// Return on investment in percent.
    pub roi: i64,
}

impl EconomicProjection {
    /// The projection reported for an empty layout.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Consistent output of one planning run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub recommendation: SpeciesRecommendation,
    pub grid: PlantingGrid,
    pub economics: EconomicProjection,
}

/// Planner configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Seed for the tree placement RNG.
    #[serde(default = "default_seed")]
    pub rng_seed: u64,
    /// Farm parameters used when none are given on the command line.
    #[serde(default)]
    pub params: FarmParameters,
    /// Optional YAML file replacing the built-in species economics.
    #[serde(default)]
    pub tables: Option<PathBuf>,
}

fn default_seed() -> u64 {
    42
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            rng_seed: default_seed(),
            params: FarmParameters::default(),
            tables: None,
        }
    }
}

/// Validation errors for farm inputs.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Numeric field must be finite.
    #[error("non-finite numeric value encountered")]
    NonFinite,
    /// Area must be strictly positive.
    #[error("farm area must be > 0")]
    NonPositiveArea,
    /// Area above the supported ceiling.
    #[error("farm area {0} exceeds the supported maximum of 10000 acres")]
    AreaTooLarge(f64),
    /// Enumerated field received an unknown value.
    #[error("unknown {field} value: {value:?}")]
    UnknownVariant { field: &'static str, value: String },
}

/// Validate farm parameters.
///
/// The planner itself tolerates any input; this is the stricter contract
/// applied at input boundaries that want to reject degenerate plots.
pub fn validate_params(p: &FarmParameters) -> Result<(), ValidationError> {
    if !p.area.is_finite() {
        return Err(ValidationError::NonFinite);
    }
    if p.area <= 0.0 {
        return Err(ValidationError::NonPositiveArea);
    }
    if p.area > MAX_AREA_ACRES {
        return Err(ValidationError::AreaTooLarge(p.area));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_match_initial_form() {
        let p = FarmParameters::default();
        assert_eq!(p.area, 1.0);
        assert_eq!(p.soil, Soil::Loam);
        assert_eq!(p.rainfall, Rainfall::Moderate);
        assert_eq!(p.climate, Climate::Tropical);
        assert_eq!(p.investment, Investment::Medium);
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        assert_eq!("Clay".parse::<Soil>(), Ok(Soil::Clay));
        assert_eq!(
            "peat".parse::<Soil>(),
            Err(ValidationError::UnknownVariant {
                field: "soil",
                value: "peat".to_string()
            })
        );
        assert!("polar".parse::<Climate>().is_err());
        assert!("bush".parse::<SpeciesKind>().is_err());
    }

    #[test]
    fn lenient_parse_uses_fallback_lists() {
        assert_eq!(Soil::from_label_or_default("peat"), Soil::Loam);
        assert_eq!(Climate::from_label_or_default("polar"), Climate::Moderate);
        assert_eq!(Investment::from_label_or_default("huge"), Investment::Medium);
        assert_eq!(Rainfall::from_label_or_default(""), Rainfall::Moderate);
        assert_eq!(Climate::from_label_or_default("arid"), Climate::Arid);
    }

    #[test]
    fn params_serde_uses_form_names() {
        let p = FarmParameters {
            area: 2.5,
            soil: Soil::Sandy,
            rainfall: Rainfall::High,
            climate: Climate::Arid,
            investment: Investment::Low,
        };
        let s = serde_json::to_string(&p).unwrap();
        assert!(s.contains("\"soil\":\"sandy\""));
        assert!(s.contains("\"investment\":\"low\""));
        let back: FarmParameters = serde_json::from_str(&s).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn projection_serializes_yield_and_income_keys() {
        let e = EconomicProjection {
            cost: 10,
            yield_value: 20,
            income_yearly: [-10, 1, 2, 3, 4],
            roi: 5,
        };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["yield"], 20);
        assert_eq!(v["incomeYearly"][0], -10);
        assert_eq!(EconomicProjection::zero().income_yearly, [0; 5]);
    }

    #[test]
    fn config_from_partial_yaml() {
        let cfg: PlannerConfig =
            serde_yaml::from_str("params:\n  area: 3\n  soil: clay\n").unwrap();
        assert_eq!(cfg.rng_seed, 42);
        assert_eq!(cfg.params.area, 3.0);
        assert_eq!(cfg.params.soil, Soil::Clay);
        assert_eq!(cfg.params.climate, Climate::Tropical);
        assert!(cfg.tables.is_none());
    }

    #[test]
    fn validation_rejects_degenerate_area() {
        let mut p = FarmParameters::default();
        assert!(validate_params(&p).is_ok());
        p.area = 0.0;
        assert_eq!(validate_params(&p), Err(ValidationError::NonPositiveArea));
        p.area = f64::NAN;
        assert_eq!(validate_params(&p), Err(ValidationError::NonFinite));
        p.area = MAX_AREA_ACRES * 2.0;
        assert!(matches!(
            validate_params(&p),
            Err(ValidationError::AreaTooLarge(_))
        ));
    }

    proptest! {
        #[test]
        fn positive_area_is_valid(area in 0.001f64..MAX_AREA_ACRES) {
            let p = FarmParameters { area, ..FarmParameters::default() };
            prop_assert!(validate_params(&p).is_ok());
        }

        #[test]
        fn display_parses_back(i in 0usize..4) {
            let c = Climate::ALL[i];
            prop_assert_eq!(c.to_string().parse::<Climate>().unwrap(), c);
            let s = Soil::ALL[i % 3];
            prop_assert_eq!(s.to_string().parse::<Soil>().unwrap(), s);
        }
    }
}
