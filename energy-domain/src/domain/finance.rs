/// User-supplied inputs for the ROI estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinancialAssumptions {
    pub investment_cost_usd: f64,
    pub electricity_price_usd_per_kwh: f64,
}
