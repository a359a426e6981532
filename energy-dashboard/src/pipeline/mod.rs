use std::fmt::Display;

use energy_domain::domain::{
    BuildingProfile, Co2Grade, CompositionSnapshot, FinancialAssumptions, RoiEstimate,
    TrendSeries, UsageTable,
};
use serde::Serialize;

use crate::{
    analytics,
    sources::{self, RawPreview},
};

pub const PREVIEW_ROWS: usize = 5;

pub const ROI_FALLBACK: &str = "Upload data to estimate ROI.";
pub const CO2_FALLBACK: &str = "No CO₂ data available.";

/// Everything one interaction provides. Rebuilt from scratch on every pass.
#[derive(Debug, Clone)]
pub struct DashboardInput {
    pub building: BuildingProfile,
    pub assumptions: FinancialAssumptions,
    /// Raw bytes of the uploaded CSV, if any.
    pub upload: Option<Vec<u8>>,
}

/// Outcome of one dashboard section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Section<T> {
    Ready(T),
    Unavailable { message: String },
}

impl<T> Section<T> {
    fn from_result<E: Display>(
        section: &'static str,
        res: Result<T, E>,
        fallback: impl FnOnce(&E) -> String,
    ) -> Self {
        match res {
            Ok(v) => Section::Ready(v),
            Err(e) => {
                tracing::warn!(section, error = %e, "dashboard section unavailable");
                metrics::counter!("dashboard_section_unavailable_total", "section" => section)
                    .increment(1);
                Section::Unavailable {
                    message: fallback(&e),
                }
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(v) => Some(v),
            Section::Unavailable { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingPanel {
    pub address: String,
    pub floor_area_sqft: f64,
    pub climate_zone: &'static str,
}

impl From<&BuildingProfile> for BuildingPanel {
    fn from(b: &BuildingProfile) -> Self {
        Self {
            address: b.address.clone(),
            floor_area_sqft: b.floor_area_sqft,
            climate_zone: b.climate_zone(),
        }
    }
}

/// Trend and composition charts, present only when a file was uploaded.
///
/// The preview is read from the raw bytes, so it survives a table that fails
/// validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Charts {
    pub preview: Section<RawPreview>,
    pub trend: Section<TrendSeries>,
    pub composition: Section<CompositionSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub building: BuildingPanel,
    pub charts: Option<Charts>,
    pub roi: Section<RoiEstimate>,
    pub co2: Section<Co2Grade>,
    pub recommendations: Vec<&'static str>,
}

/// One full top-to-bottom recomputation of the page.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dashboard;

impl Dashboard {
    pub fn render(&self, input: &DashboardInput) -> DashboardView {
        metrics::counter!("dashboard_renders_total").increment(1);

        let table = input.upload.as_deref().map(|raw| {
            let res = sources::normalize(raw);
            match &res {
                Ok(t) => tracing::info!(
                    rows = t.len(),
                    fingerprint = %sources::fingerprint(raw),
                    "usage table normalized"
                ),
                Err(e) => tracing::warn!(error = %e, "usage table rejected"),
            }
            res
        });

        let charts = input.upload.as_deref().zip(table.as_ref()).map(|(raw, res)| {
            let preview = Section::from_result(
                "preview",
                sources::preview(raw, PREVIEW_ROWS),
                chart_fallback,
            );
            match res {
                Ok(t) => chart_sections(preview, t),
                Err(e) => {
                    let message = chart_fallback(e);
                    Charts {
                        preview,
                        trend: Section::Unavailable {
                            message: message.clone(),
                        },
                        composition: Section::Unavailable { message },
                    }
                }
            }
        });

        let usable = table.as_ref().and_then(|res| res.as_ref().ok());

        let roi = match usable {
            Some(t) => Section::from_result(
                "roi",
                analytics::estimate_roi(t, &input.assumptions),
                |_| ROI_FALLBACK.to_string(),
            ),
            None => Section::Unavailable {
                message: ROI_FALLBACK.to_string(),
            },
        };

        let co2 = match usable {
            Some(t) => Section::from_result("co2", analytics::grade_co2(t), |_| {
                CO2_FALLBACK.to_string()
            }),
            None => Section::Unavailable {
                message: CO2_FALLBACK.to_string(),
            },
        };

        DashboardView {
            building: BuildingPanel::from(&input.building),
            charts,
            roi,
            co2,
            recommendations: analytics::RECOMMENDATIONS.to_vec(),
        }
    }
}

fn chart_sections(preview: Section<RawPreview>, table: &UsageTable) -> Charts {
    Charts {
        preview,
        trend: Section::from_result("trend", analytics::extract_trend(table), chart_fallback),
        composition: Section::from_result(
            "composition",
            analytics::latest_composition(table),
            chart_fallback,
        ),
    }
}

fn chart_fallback<E: Display>(e: &E) -> String {
    format!("Could not render chart: {e}")
}
