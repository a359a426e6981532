//! Pure computations over a normalized `UsageTable`.
//!
//! Each function returns its own `Result` so a failing section never affects
//! the others.

pub mod co2;
pub mod composition;
pub mod recommendations;
pub mod roi;
pub mod trend;

pub use co2::{classify_annual_co2, grade_co2, MONTHS_PER_YEAR};
pub use composition::latest_composition;
pub use recommendations::RECOMMENDATIONS;
pub use roi::{estimate_roi, ASSUMED_SAVINGS_FRACTION};
pub use trend::extract_trend;

#[cfg(test)]
pub(crate) mod fixtures {
    use energy_domain::domain::{UsageRecord, UsageTable};
    use time::{Duration, OffsetDateTime};

    /// Monthly-ish rows starting 2024-01-01, one per `(electricity, co2)` pair.
    pub fn table(rows: &[(f64, f64)]) -> UsageTable {
        let start = time::macros::datetime!(2024-01-01 00:00:00 UTC);
        UsageTable::from_records(
            rows.iter()
                .enumerate()
                .map(|(i, &(electricity_kwh, co2_tons))| UsageRecord {
                    timestamp: start + Duration::days(31 * i as i64),
                    electricity_kwh,
                    gas_m3: 10.0,
                    water_tons: 5.0,
                    co2_tons,
                })
                .collect(),
        )
    }

    pub fn at(ts: OffsetDateTime, electricity_kwh: f64) -> UsageRecord {
        UsageRecord {
            timestamp: ts,
            electricity_kwh,
            gas_m3: electricity_kwh / 10.0,
            water_tons: electricity_kwh / 100.0,
            co2_tons: electricity_kwh / 1000.0,
        }
    }
}
