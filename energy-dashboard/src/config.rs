use serde::Deserialize;
use std::{fs, path::Path, time::Duration};

use energy_domain::domain::{BuildingProfile, FinancialAssumptions};

const DEFAULT_CONFIG_PATH: &str = "dashboard-config.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub upload_url: String,
    /// Read endpoint of the same backend; not called by the dashboard yet.
    pub data_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            upload_url: "https://bldgsaas-back-v1.onrender.com/energy/upload".to_string(),
            data_url: "https://bldgsaas-back-v1.onrender.com/energy/data".to_string(),
            timeout_secs: 30,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Initial values of the user controls.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub address: String,
    pub floor_area_sqft: f64,
    pub investment_usd: f64,
    pub electricity_price_usd_per_kwh: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            address: "New York, NY".to_string(),
            floor_area_sqft: 100_000.0,
            investment_usd: 30_000.0,
            electricity_price_usd_per_kwh: 0.18,
        }
    }
}

impl DefaultsConfig {
    pub fn building(&self) -> BuildingProfile {
        BuildingProfile::new(self.address.clone(), self.floor_area_sqft)
    }

    pub fn assumptions(&self) -> FinancialAssumptions {
        FinancialAssumptions {
            investment_cost_usd: self.investment_usd,
            electricity_price_usd_per_kwh: self.electricity_price_usd_per_kwh,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub server: ServerConfig,
    pub defaults: DefaultsConfig,
    pub metrics: Option<MetricsConfig>,
}

impl AppConfig {
    /// Load from `DASHBOARD_CONFIG`, or `dashboard-config.toml` when unset.
    ///
    /// A missing default file falls back to built-in values; an explicitly
    /// named file must exist.
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        match env::var("DASHBOARD_CONFIG") {
            Ok(path) => Self::from_file(&path),
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config {}: {e}", path.display()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let cfg: AppConfig = toml::from_str(contents)?;
        Ok(cfg)
    }
}
