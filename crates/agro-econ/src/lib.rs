#![deny(warnings)]

//! Economic models for agroforestry plans.
//!
//! Two deliberately independent models live here:
//! - [`coarse`]: the quick per-acre estimate attached to a freshly generated
//!   plan. It only looks at the farm parameters and species counts.
//! - [`layout`]: the cell-by-cell projection used after a grid is edited,
//!   driven by the per-species reference [`tables`].
//!
//! They disagree on the same grid; callers pick the one matching their
//! moment in the planning flow.

use agro_core::{Investment, MAX_AREA_ACRES};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

pub mod coarse;
pub mod layout;
pub mod tables;

pub use coarse::estimate;
pub use layout::{layout_breakdown, recalculate, recalculate_with, LayoutBreakdown};
pub use tables::{EconomicsTables, RateTable, SpeciesRates, TableError};

/// Round to the nearest integer, halves towards positive infinity.
///
/// Saturates at the `i64` range.
pub fn round_half_up(value: Decimal) -> i64 {
    let r = (value + Decimal::new(5, 1)).floor();
    r.to_i64().unwrap_or(if r.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Multiplier applied to planted cost in the layout model.
pub fn investment_factor(investment: Investment) -> Decimal {
    match investment {
        Investment::Low => Decimal::new(9, 1),
        Investment::Medium => Decimal::ONE,
        Investment::High => Decimal::new(12, 1),
    }
}

/// Convert an acreage to decimal; non-finite values become zero and
/// anything above [`MAX_AREA_ACRES`] is capped so money math cannot overflow.
pub(crate) fn acres(area: f64) -> Decimal {
    if !area.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(area.min(MAX_AREA_ACRES)).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_half_up(Decimal::new(25, 1)), 3);
        assert_eq!(round_half_up(Decimal::new(-25, 1)), -2);
        assert_eq!(round_half_up(Decimal::new(-26, 1)), -3);
        assert_eq!(round_half_up(Decimal::new(24, 1)), 2);
        assert_eq!(round_half_up(Decimal::ZERO), 0);
    }

    #[test]
    fn investment_factors() {
        assert_eq!(investment_factor(Investment::Low), Decimal::new(9, 1));
        assert_eq!(investment_factor(Investment::Medium), Decimal::ONE);
        assert_eq!(investment_factor(Investment::High), Decimal::new(12, 1));
    }

    #[test]
    fn non_finite_acres_are_zero() {
        assert_eq!(acres(f64::NAN), Decimal::ZERO);
        assert_eq!(acres(2.5), Decimal::new(25, 1));
    }

    proptest! {
        #[test]
        fn rounding_within_half(units in -1_000_000i64..1_000_000, frac in 0u32..100) {
            let v = Decimal::new(units * 100 + frac as i64, 2);
            let r = Decimal::from(round_half_up(v));
            prop_assert!((r - v).abs() <= Decimal::new(5, 1));
        }
    }
}
