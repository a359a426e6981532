use energy_domain::{
    domain::{CompositionSlice, CompositionSnapshot, UsageTable, UtilityColumn},
    AnalysisError,
};

/// Labeled utility values of the latest row (maximum timestamp).
pub fn latest_composition(table: &UsageTable) -> Result<CompositionSnapshot, AnalysisError> {
    let latest = table.latest().ok_or(AnalysisError::EmptyTable)?;

    Ok(CompositionSnapshot {
        timestamp: latest.timestamp,
        slices: UtilityColumn::ALL
            .iter()
            .map(|&column| CompositionSlice {
                column,
                label: column.label(),
                value: latest.value(column),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::at;
    use time::macros::datetime;

    #[test]
    fn composition_uses_max_timestamp_regardless_of_upload_order() {
        let newest = datetime!(2024-06-01 00:00:00 UTC);
        let orders = [
            vec![
                at(datetime!(2024-01-01 00:00:00 UTC), 1.0),
                at(newest, 600.0),
                at(datetime!(2024-03-01 00:00:00 UTC), 3.0),
            ],
            vec![
                at(newest, 600.0),
                at(datetime!(2024-03-01 00:00:00 UTC), 3.0),
                at(datetime!(2024-01-01 00:00:00 UTC), 1.0),
            ],
        ];

        for rows in orders {
            let snapshot = latest_composition(&UsageTable::from_records(rows)).expect("rows");
            assert_eq!(snapshot.timestamp, newest);
            let labels: Vec<&str> = snapshot.slices.iter().map(|s| s.label).collect();
            assert_eq!(labels, vec!["Electricity", "Gas", "Water", "CO2"]);
            assert_eq!(snapshot.slices[0].value, 600.0);
            assert_eq!(snapshot.slices[3].value, 0.6);
        }
    }

    #[test]
    fn zero_row_is_a_degenerate_but_valid_snapshot() {
        let table = UsageTable::from_records(vec![at(datetime!(2024-01-01 00:00:00 UTC), 0.0)]);
        let snapshot = latest_composition(&table).expect("rows");
        assert_eq!(snapshot.total(), 0.0);
    }

    #[test]
    fn composition_of_empty_table_fails() {
        assert_eq!(
            latest_composition(&UsageTable::default()),
            Err(AnalysisError::EmptyTable)
        );
    }
}
