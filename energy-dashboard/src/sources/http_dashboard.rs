use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use energy_domain::domain::{BuildingProfile, FinancialAssumptions};

use crate::{
    config::AppConfig,
    pipeline::{Dashboard, DashboardInput, DashboardView},
    presentation::{present, TextPresenter},
    sinks::{UploadGateway, UploadOutcome, DEFAULT_FILE_NAME},
};

#[derive(Clone)]
struct SharedState {
    config: Arc<AppConfig>,
    gateway: Arc<dyn UploadGateway>,
}

/// HTTP entry point of the dashboard.
///
/// Every request is one full interaction: the body holds the raw CSV and the
/// query string holds the user controls. Nothing is kept between requests.
pub struct HttpDashboardSource {
    state: SharedState,
}

/// User controls; anything omitted falls back to the configured defaults.
#[derive(Debug, Default, serde::Deserialize)]
struct ControlsQuery {
    address: Option<String>,
    floor_area_sqft: Option<f64>,
    investment_usd: Option<f64>,
    electricity_price: Option<f64>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct UploadQuery {
    file_name: Option<String>,
}

impl HttpDashboardSource {
    pub fn new(config: Arc<AppConfig>, gateway: Arc<dyn UploadGateway>) -> Self {
        Self {
            state: SharedState { config, gateway },
        }
    }

    pub fn router(&self) -> Router {
        let max_body_bytes = self.state.config.server.max_body_bytes;
        Router::new()
            .route("/health", get(|| async { "ok" }))
            .route("/dashboard", post(dashboard_json))
            .route("/dashboard/report", post(dashboard_report))
            .route("/upload", post(upload_to_backend))
            .layer(DefaultBodyLimit::max(max_body_bytes))
            .with_state(self.state.clone())
    }

    pub async fn serve(self, bind_addr: &str) -> anyhow::Result<()> {
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid server.bind_addr '{bind_addr}': {e}"))?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, "dashboard listening");
        axum::serve(listener, self.router().into_make_service()).await?;
        Ok(())
    }
}

fn dashboard_input(config: &AppConfig, q: ControlsQuery, body: Bytes) -> DashboardInput {
    let defaults = &config.defaults;
    DashboardInput {
        building: BuildingProfile::new(
            q.address.unwrap_or_else(|| defaults.address.clone()),
            q.floor_area_sqft.unwrap_or(defaults.floor_area_sqft),
        ),
        assumptions: FinancialAssumptions {
            investment_cost_usd: q.investment_usd.unwrap_or(defaults.investment_usd),
            electricity_price_usd_per_kwh: q
                .electricity_price
                .unwrap_or(defaults.electricity_price_usd_per_kwh),
        },
        upload: (!body.is_empty()).then(|| body.to_vec()),
    }
}

async fn dashboard_json(
    State(state): State<SharedState>,
    Query(q): Query<ControlsQuery>,
    body: Bytes,
) -> Json<DashboardView> {
    let input = dashboard_input(&state.config, q, body);
    Json(Dashboard.render(&input))
}

async fn dashboard_report(
    State(state): State<SharedState>,
    Query(q): Query<ControlsQuery>,
    body: Bytes,
) -> String {
    let input = dashboard_input(&state.config, q, body);
    present(&Dashboard.render(&input), None, TextPresenter::new())
}

async fn upload_to_backend(
    State(state): State<SharedState>,
    Query(q): Query<UploadQuery>,
    body: Bytes,
) -> (StatusCode, Json<UploadOutcome>) {
    if body.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(UploadOutcome {
                success: false,
                status: None,
                message: "No file uploaded.".to_string(),
            }),
        );
    }

    let file_name = q.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME);
    let res = state.gateway.upload(file_name, body.to_vec()).await;
    let code = if res.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    (code, Json(UploadOutcome::from(&res)))
}
