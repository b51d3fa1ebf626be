//! Quick per-acre estimate attached to a newly generated plan.
//!
//! Independent of grid contents: only acreage, investment level and the
//! number of recommended species matter.

use crate::{acres, round_half_up};
use agro_core::{EconomicProjection, FarmParameters, Investment, PROJECTION_YEARS};
use rust_decimal::Decimal;

/// Yield multiplier per projection year.
pub const YEAR_MULTIPLIERS: [i64; PROJECTION_YEARS] = [0, 0, 1, 2, 3];

/// Establishment cost per acre.
pub fn base_cost_per_acre(investment: Investment) -> Decimal {
    Decimal::from(match investment {
        Investment::Low => 15_000,
        Investment::Medium => 30_000,
        Investment::High => 60_000,
    })
}

/// Flat yield bonus for the investment level.
pub fn yield_bonus(investment: Investment) -> Decimal {
    Decimal::from(match investment {
        Investment::Low => 2_000,
        Investment::Medium => 5_000,
        Investment::High => 8_000,
    })
}

const TREE_COST_PER_SPECIES_ACRE: i64 = 500;
const CROP_COST_PER_SPECIES_ACRE: i64 = 800;
const YIELD_PER_ACRE: i64 = 12_000;

/// Estimate economics for a plan with `tree_count` tree and `crop_count`
/// crop species.
///
/// Year 0 carries the whole outlay and is floored at zero like every other
/// year; later years deduct 10% of cost as maintenance. Negative or
/// non-finite areas are treated as zero acres, and areas above
/// [`agro_core::MAX_AREA_ACRES`] are priced at the cap.
pub fn estimate(
    params: &FarmParameters,
    tree_count: usize,
    crop_count: usize,
) -> EconomicProjection {
    let area = acres(params.area.max(0.0));
    let cost_raw = base_cost_per_acre(params.investment) * area
        + Decimal::from(TREE_COST_PER_SPECIES_ACRE) * Decimal::from(tree_count) * area
        + Decimal::from(CROP_COST_PER_SPECIES_ACRE) * Decimal::from(crop_count) * area;
    let cost = round_half_up(cost_raw);
    let yield_value =
        round_half_up(Decimal::from(YIELD_PER_ACRE) * area + yield_bonus(params.investment));

    let cost_d = Decimal::from(cost);
    let yield_d = Decimal::from(yield_value);
    let mut income_yearly = [0i64; PROJECTION_YEARS];
    for (year, m) in YEAR_MULTIPLIERS.iter().enumerate() {
        let deduction = if year == 0 {
            cost_d
        } else {
            cost_d * Decimal::new(1, 1)
        };
        let net = (yield_d * Decimal::from(*m) - deduction).max(Decimal::ZERO);
        income_yearly[year] = round_half_up(net);
    }

    let last = Decimal::from(income_yearly[PROJECTION_YEARS - 1]);
    let roi = round_half_up((last - cost_d) / cost_d.max(Decimal::ONE) * Decimal::from(100));

    EconomicProjection {
        cost,
        yield_value,
        income_yearly,
        roi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_core::{Climate, Rainfall, Soil};
    use proptest::prelude::*;

    fn params(area: f64, investment: Investment) -> FarmParameters {
        FarmParameters {
            area,
            soil: Soil::Loam,
            rainfall: Rainfall::Moderate,
            climate: Climate::Tropical,
            investment,
        }
    }

    #[test]
    fn one_acre_medium() {
        let e = estimate(&params(1.0, Investment::Medium), 6, 6);
        assert_eq!(e.cost, 37_800);
        assert_eq!(e.yield_value, 17_000);
        assert_eq!(e.income_yearly, [0, 0, 13_220, 30_220, 47_220]);
        assert_eq!(e.roi, 25);
    }

    #[test]
    fn high_investment_can_show_negative_roi() {
        let e = estimate(&params(2.5, Investment::High), 6, 6);
        assert_eq!(e.cost, 169_500);
        assert_eq!(e.yield_value, 38_000);
        assert_eq!(e.income_yearly, [0, 0, 21_050, 59_050, 97_050]);
        assert_eq!(e.roi, -43);
    }

    #[test]
    fn fractional_maintenance_rounds() {
        // cost 15000*0.3 + 500*3*0.3 + 800*2*0.3 = 5430; yield 5600.
        let e = estimate(&params(0.3, Investment::Low), 3, 2);
        assert_eq!(e.cost, 5_430);
        assert_eq!(e.yield_value, 5_600);
        assert_eq!(e.income_yearly[2], 5_057);
    }

    #[test]
    fn degenerate_area_is_floored() {
        let e = estimate(&params(-4.0, Investment::Medium), 6, 6);
        assert_eq!(e.cost, 0);
        assert_eq!(e.yield_value, 5_000);
        assert_eq!(e.roi, 1_500_000);
        let nan = estimate(&params(f64::NAN, Investment::Low), 6, 6);
        assert_eq!(nan.cost, 0);
    }

    #[test]
    fn huge_area_is_priced_at_cap() {
        let capped = estimate(&params(agro_core::MAX_AREA_ACRES, Investment::High), 6, 6);
        for area in [1e25, 1e26, f64::MAX] {
            let e = estimate(&params(area, Investment::High), 6, 6);
            assert_eq!(e, capped);
        }
        // (60000 + 500*6 + 800*6) * 10000
        assert_eq!(capped.cost, 678_000_000);
    }

    proptest! {
        #[test]
        fn income_never_negative(area in 0.01f64..500.0, inv in 0usize..3, t in 0usize..7, c in 0usize..7) {
            let e = estimate(&params(area, Investment::ALL[inv]), t, c);
            prop_assert!(e.cost >= 0);
            prop_assert!(e.income_yearly.iter().all(|&v| v >= 0));
            prop_assert_eq!(e.income_yearly[0], 0);
            prop_assert_eq!(e.income_yearly[1], 0);
        }
    }
}
