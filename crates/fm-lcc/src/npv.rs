//! Present value of operating cost over the plant lifetime.
//!
//! ```text
//! NPV = Σ_{y=1..N} (E·(1+e)^y + M·(1+i)^y) / (1+r)^y
//! ```
//!
//! `E` annual energy cost, `M` annual maintenance, `e` electricity
//! escalation, `i` maintenance inflation, `r` discount rate. Year 1 is
//! already escalated once.

use crate::config::Economics;

/// Cash flow of one year of operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YearlyOpex {
    pub year: u32,
    pub energy_cost: f64,
    pub maintenance_cost: f64,
    /// Sum of both, discounted to year 0
    pub discounted: f64,
}

/// Escalated and discounted cash flows for years `1..=lifetime`.
pub fn opex_schedule(
    annual_energy_cost: f64,
    annual_maintenance: f64,
    economics: &Economics,
) -> Vec<YearlyOpex> {
    (1..=economics.lifetime_years)
        .map(|year| {
            let y = year as i32;
            let energy_cost = annual_energy_cost * (1.0 + economics.electricity_escalation).powi(y);
            let maintenance_cost =
                annual_maintenance * (1.0 + economics.maintenance_inflation).powi(y);
            let discount = (1.0 + economics.discount_rate).powi(y);
            YearlyOpex {
                year,
                energy_cost,
                maintenance_cost,
                discounted: fm_core::safe_div(energy_cost + maintenance_cost, discount, 0.0),
            }
        })
        .collect()
}

/// Net present value of operating cost.
pub fn npv_opex(annual_energy_cost: f64, annual_maintenance: f64, economics: &Economics) -> f64 {
    opex_schedule(annual_energy_cost, annual_maintenance, economics)
        .iter()
        .map(|y| y.discounted)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_cash_flow_sums_nominally() {
        let economics = Economics {
            lifetime_years: 10,
            discount_rate: 0.0,
            electricity_escalation: 0.0,
            maintenance_inflation: 0.0,
            ..Economics::default()
        };
        assert!((npv_opex(100.0, 10.0, &economics) - 1100.0).abs() < 1e-9);
    }

    #[test]
    fn first_year_is_escalated() {
        let economics = Economics::default();
        let schedule = opex_schedule(1000.0, 100.0, &economics);
        assert_eq!(schedule.len(), 30);
        assert_eq!(schedule[0].year, 1);
        assert!((schedule[0].energy_cost - 1020.0).abs() < 1e-9);
        assert!((schedule[0].maintenance_cost - 102.0).abs() < 1e-9);
    }

    #[test]
    fn escalation_matches_geometric_series() {
        let economics = Economics::default();
        let g: f64 = 1.02;
        let expected = 1000.0 * g * (g.powi(30) - 1.0) / (g - 1.0);
        assert!((npv_opex(1000.0, 0.0, &economics) - expected).abs() < 1e-6);
    }

    #[test]
    fn discounting_reduces_present_value() {
        let discounted = Economics {
            discount_rate: 0.08,
            ..Economics::default()
        };
        let base = npv_opex(1000.0, 100.0, &Economics::default());
        let npv = npv_opex(1000.0, 100.0, &discounted);
        assert!(npv < base);
        // escalation and discount cancel year by year
        let cancel = Economics {
            discount_rate: 0.02,
            ..Economics::default()
        };
        assert!((npv_opex(1000.0, 100.0, &cancel) - 30.0 * 1100.0).abs() < 1e-6);
    }
}
