use energy_domain::{
    domain::{FinancialAssumptions, RoiEstimate, UsageTable, UtilityColumn},
    AnalysisError,
};

/// Fixed retrofit heuristic: average consumption drops by one fifth.
pub const ASSUMED_SAVINGS_FRACTION: f64 = 0.20;

/// Savings, ROI and payback for a retrofit against mean electricity use.
///
/// Fails with `DivisionByZero` when the investment is zero (ROI undefined) or
/// the estimated saving is zero (payback undefined).
pub fn estimate_roi(
    table: &UsageTable,
    assumptions: &FinancialAssumptions,
) -> Result<RoiEstimate, AnalysisError> {
    let mean_kwh = table
        .mean(UtilityColumn::Electricity)
        .ok_or(AnalysisError::EmptyTable)?;

    let saving_kwh = mean_kwh * ASSUMED_SAVINGS_FRACTION;
    let annual_saving_usd = saving_kwh * assumptions.electricity_price_usd_per_kwh;

    if assumptions.investment_cost_usd == 0.0 {
        return Err(AnalysisError::DivisionByZero("ROI percent"));
    }
    if annual_saving_usd == 0.0 {
        return Err(AnalysisError::DivisionByZero("payback years"));
    }

    Ok(RoiEstimate {
        saving_kwh,
        annual_saving_usd,
        roi_percent: annual_saving_usd / assumptions.investment_cost_usd * 100.0,
        payback_years: assumptions.investment_cost_usd / annual_saving_usd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures;

    fn assumptions(
        investment_cost_usd: f64,
        electricity_price_usd_per_kwh: f64,
    ) -> FinancialAssumptions {
        FinancialAssumptions {
            investment_cost_usd,
            electricity_price_usd_per_kwh,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn constant_consumption_scenario() {
        let table = fixtures::table(&[(1000.0, 0.0); 12]);
        let roi = estimate_roi(&table, &assumptions(30_000.0, 0.18)).expect("estimate");

        assert!(approx(roi.saving_kwh, 200.0));
        assert!(approx(roi.annual_saving_usd, 36.0));
        assert!(approx(roi.roi_percent, 0.12));
        assert!((roi.payback_years - 833.333_333).abs() < 1e-3);
    }

    #[test]
    fn uses_mean_over_all_rows() {
        let table = fixtures::table(&[(500.0, 0.0), (1500.0, 0.0)]);
        let roi = estimate_roi(&table, &assumptions(1_000.0, 1.0)).expect("estimate");
        assert!(approx(roi.saving_kwh, 200.0));
        assert!(approx(roi.payback_years, 5.0));
    }

    #[test]
    fn empty_table_fails() {
        let res = estimate_roi(&UsageTable::default(), &assumptions(30_000.0, 0.18));
        assert_eq!(res, Err(AnalysisError::EmptyTable));
    }

    #[test]
    fn zero_investment_is_division_by_zero() {
        let table = fixtures::table(&[(1000.0, 0.0)]);
        let res = estimate_roi(&table, &assumptions(0.0, 0.18));
        assert!(matches!(res, Err(AnalysisError::DivisionByZero(_))));
    }

    #[test]
    fn zero_saving_is_division_by_zero() {
        let table = fixtures::table(&[(1000.0, 0.0)]);
        assert!(matches!(
            estimate_roi(&table, &assumptions(30_000.0, 0.0)),
            Err(AnalysisError::DivisionByZero(_))
        ));

        let idle = fixtures::table(&[(0.0, 0.0)]);
        assert!(matches!(
            estimate_roi(&idle, &assumptions(30_000.0, 0.18)),
            Err(AnalysisError::DivisionByZero(_))
        ));
    }
}
