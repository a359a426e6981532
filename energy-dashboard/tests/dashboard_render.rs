use energy_dashboard::{
    analytics, sources, Dashboard, DashboardInput, Section,
};
use energy_domain::{
    domain::{BuildingProfile, FinancialAssumptions, Grade},
    AnalysisError, TableError,
};

const YEAR_OF_READINGS: &str = "\
timestamp,electricity_kwh,gas_m3,water_tons,co2_tons,meter
2023-07-01,1180,240,410,58,main
2023-01-01,1520,910,380,66,main
2023-04-01,1010,520,395,49,main
2023-10-01,1090,480,400,52,main
2023-02-01,1460,860,372,63,main
2023-03-01,1250,700,390,57,main
2023-05-01,980,410,402,46,main
2023-06-01,1100,260,415,51,main
2023-08-01,1210,230,420,60,main
2023-09-01,1060,300,405,50,main
2023-11-01,1300,690,388,59,main
2023-12-01,1490,880,377,65,main
";

fn input(upload: Option<&[u8]>) -> DashboardInput {
    DashboardInput {
        building: BuildingProfile::new("New York, NY", 100_000.0),
        assumptions: FinancialAssumptions {
            investment_cost_usd: 30_000.0,
            electricity_price_usd_per_kwh: 0.18,
        },
        upload: upload.map(<[u8]>::to_vec),
    }
}

#[test]
fn full_year_upload_renders_every_section() {
    let view = Dashboard.render(&input(Some(YEAR_OF_READINGS.as_bytes())));
    let charts = view.charts.as_ref().expect("charts for an upload");

    let snapshot = charts.composition.ready().expect("composition");
    assert_eq!(snapshot.slices[0].value, 1490.0);

    let trend = charts.trend.ready().expect("trend");
    assert!(trend
        .series
        .iter()
        .all(|s| s.points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)));
    assert_eq!(trend.series[0].points.len(), 12);

    // mean co2 = 676 / 12, annualized = 676
    let co2 = view.co2.ready().expect("co2");
    assert!((co2.annual_co2_tons - 676.0).abs() < 1e-9);
    assert_eq!(co2.grade, Grade::C);

    let roi = view.roi.ready().expect("roi");
    let mean_kwh = 14_650.0 / 12.0;
    assert!((roi.annual_saving_usd - mean_kwh * 0.2 * 0.18).abs() < 1e-9);
}

#[test]
fn normalized_table_survives_a_round_trip() {
    let table = sources::normalize(YEAR_OF_READINGS.as_bytes()).expect("valid table");
    let again = sources::normalize(&sources::to_csv(&table).expect("csv")).expect("valid table");
    assert_eq!(table, again);
}

#[test]
fn missing_column_yields_no_table() {
    let raw = b"timestamp,electricity_kwh,gas_m3,water_tons\n2023-01-01,1,1,1\n";
    assert_eq!(
        sources::normalize(raw),
        Err(TableError::MissingColumn("co2_tons"))
    );
}

#[test]
fn empty_table_fails_every_analysis_but_not_the_page() {
    let raw = b"timestamp,electricity_kwh,gas_m3,water_tons,co2_tons\n";
    let table = sources::normalize(raw).expect("header-only table is valid");
    let assumptions = input(None).assumptions;

    assert_eq!(analytics::extract_trend(&table), Err(AnalysisError::EmptyTable));
    assert_eq!(analytics::latest_composition(&table), Err(AnalysisError::EmptyTable));
    assert_eq!(analytics::estimate_roi(&table, &assumptions), Err(AnalysisError::EmptyTable));
    assert_eq!(analytics::grade_co2(&table), Err(AnalysisError::EmptyTable));

    let view = Dashboard.render(&input(Some(raw)));
    assert!(matches!(view.roi, Section::Unavailable { .. }));
    assert!(matches!(view.co2, Section::Unavailable { .. }));
    assert_eq!(view.recommendations, analytics::RECOMMENDATIONS.to_vec());
}
