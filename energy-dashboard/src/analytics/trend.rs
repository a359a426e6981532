use energy_domain::{
    domain::{TrendPoint, TrendSeries, UsageTable, UtilityColumn, UtilitySeries},
    AnalysisError,
};

/// Per-column `(timestamp, value)` series in table order, no resampling.
pub fn extract_trend(table: &UsageTable) -> Result<TrendSeries, AnalysisError> {
    if table.is_empty() {
        return Err(AnalysisError::EmptyTable);
    }

    let series = UtilityColumn::ALL
        .iter()
        .map(|&column| UtilitySeries {
            column,
            points: table
                .records()
                .iter()
                .map(|r| TrendPoint {
                    timestamp: r.timestamp,
                    value: r.value(column),
                })
                .collect(),
        })
        .collect();

    Ok(TrendSeries { series })
}
