use anyhow::{bail, Context, Result};
use energy_dashboard::{
    config::AppConfig,
    observability,
    pipeline::{Dashboard, DashboardInput},
    presentation::{present, TextPresenter},
    sinks::{HttpUploadGateway, UploadGateway, UploadOutcome, DEFAULT_FILE_NAME},
};
use std::{env, fs, path::Path, str::FromStr};

/// Render the dashboard for a CSV file as a text report.
///
/// Usage:
///   dashboard_report <csv_file_path> [--upload]
///
/// Controls default to the config file and can be overridden with
/// DASHBOARD_ADDRESS, DASHBOARD_FLOOR_AREA, DASHBOARD_INVESTMENT and
/// DASHBOARD_ELECTRICITY_PRICE.
#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: dashboard_report <csv_file_path> [--upload]");
    }
    let file_path = Path::new(&args[1]);
    let upload = args[2..].iter().any(|a| a == "--upload");

    let cfg = AppConfig::load()?;
    let defaults = &cfg.defaults;

    let mut building = defaults.building();
    if let Ok(address) = env::var("DASHBOARD_ADDRESS") {
        building.address = address;
    }
    building.floor_area_sqft = env_number("DASHBOARD_FLOOR_AREA", building.floor_area_sqft)?;

    let mut assumptions = defaults.assumptions();
    assumptions.investment_cost_usd =
        env_number("DASHBOARD_INVESTMENT", assumptions.investment_cost_usd)?;
    assumptions.electricity_price_usd_per_kwh = env_number(
        "DASHBOARD_ELECTRICITY_PRICE",
        assumptions.electricity_price_usd_per_kwh,
    )?;

    let bytes = fs::read(file_path)
        .with_context(|| format!("failed to read {}", file_path.display()))?;

    let outcome = if upload {
        let gateway = HttpUploadGateway::from_config(&cfg.backend)?;
        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_FILE_NAME);
        let res = gateway.upload(file_name, bytes.clone()).await;
        Some(UploadOutcome::from(&res))
    } else {
        None
    };

    let input = DashboardInput {
        building,
        assumptions,
        upload: Some(bytes),
    };
    let view = Dashboard.render(&input);
    print!("{}", present(&view, outcome.as_ref(), TextPresenter::new()));

    Ok(())
}

fn env_number<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {name} '{raw}': {e}")),
        Err(_) => Ok(default),
    }
}
