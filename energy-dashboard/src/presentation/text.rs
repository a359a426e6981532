use std::fmt::Write;

use energy_domain::domain::{
    Co2Grade, CompositionSnapshot, RoiEstimate, TrendSeries, UtilityColumn,
};
use time::{macros::format_description, OffsetDateTime};

use super::Presenter;
use crate::{
    pipeline::{BuildingPanel, Section},
    sinks::UploadOutcome,
    sources::RawPreview,
};

const TITLE: &str = "Building Energy Dashboard";

/// Plain-text report, one block per section.
#[derive(Debug)]
pub struct TextPresenter {
    out: String,
}

impl TextPresenter {
    pub fn new() -> Self {
        let mut out = String::new();
        let _ = writeln!(out, "{TITLE}");
        let _ = writeln!(out, "{}", "=".repeat(TITLE.len()));
        Self { out }
    }

    fn heading(&mut self, title: &str) {
        let _ = writeln!(self.out, "\n## {title}");
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    fn table_header(&mut self) {
        let _ = write!(self.out, "{:<16}", "timestamp");
        for column in UtilityColumn::ALL {
            let _ = write!(self.out, " {:>16}", column.header());
        }
        self.out.push('\n');
    }

    fn table_row(&mut self, timestamp: OffsetDateTime, values: [f64; 4]) {
        let _ = write!(self.out, "{:<16}", format_timestamp(timestamp));
        for v in values {
            let _ = write!(self.out, " {v:>16.2}");
        }
        self.out.push('\n');
    }
}

impl Default for TextPresenter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_else(|_| ts.to_string())
}

impl Presenter for TextPresenter {
    type Output = String;

    fn building(&mut self, panel: &BuildingPanel) {
        self.heading("Building Info");
        self.line(&format!("Address: {}", panel.address));
        self.line(&format!("Floor Area (sqft): {:.0}", panel.floor_area_sqft));
        self.line(&format!("Climate Zone: {}", panel.climate_zone));
    }

    fn preview(&mut self, preview: &Section<RawPreview>) {
        self.heading("Uploaded Data (first rows)");
        match preview {
            Section::Ready(p) => {
                self.line(&p.headers.join(" | "));
                for row in &p.rows {
                    self.line(&row.join(" | "));
                }
            }
            Section::Unavailable { message } => self.line(message),
        }
    }

    fn upload(&mut self, outcome: &UploadOutcome) {
        self.line(&outcome.message);
    }

    fn trend(&mut self, trend: &Section<TrendSeries>) {
        self.heading("Monthly Energy Usage Trends");
        match trend {
            Section::Ready(trend) => {
                self.table_header();
                let len = trend.series.first().map_or(0, |s| s.points.len());
                for i in 0..len {
                    let timestamp = trend.series[0].points[i].timestamp;
                    let values = UtilityColumn::ALL.map(|c| {
                        trend
                            .get(c)
                            .and_then(|s| s.points.get(i))
                            .map_or(f64::NAN, |p| p.value)
                    });
                    self.table_row(timestamp, values);
                }
            }
            Section::Unavailable { message } => self.line(message),
        }
    }

    fn composition(&mut self, composition: &Section<CompositionSnapshot>) {
        self.heading("Utility Use Composition (latest month)");
        match composition {
            Section::Ready(snapshot) => {
                self.line(&format!("As of {}", format_timestamp(snapshot.timestamp)));
                for slice in &snapshot.slices {
                    let mut line = format!("{:<12} {:>12.2}", slice.label, slice.value);
                    if let Some(pct) = snapshot.share_percent(slice.column) {
                        line.push_str(&format!(" ({pct:.1}%)"));
                    }
                    self.line(&line);
                }
            }
            Section::Unavailable { message } => self.line(message),
        }
    }

    fn roi(&mut self, roi: &Section<RoiEstimate>) {
        self.heading("Financial Impact Summary");
        match roi {
            Section::Ready(roi) => {
                self.line(&format!("Annual Saving ($): {:.2}", roi.annual_saving_usd));
                self.line(&format!("ROI (%): {:.2}", roi.roi_percent));
                self.line(&format!("Payback Period (yrs): {:.2}", roi.payback_years));
            }
            Section::Unavailable { message } => self.line(message),
        }
    }

    fn co2(&mut self, co2: &Section<Co2Grade>) {
        self.heading("CO₂ Benchmark Grade");
        match co2 {
            Section::Ready(g) => self.line(&format!(
                "Annual CO₂: {:.0} tons → Grade {}",
                g.annual_co2_tons, g.grade
            )),
            Section::Unavailable { message } => self.line(message),
        }
    }

    fn recommendations(&mut self, items: &[&str]) {
        self.heading("Energy Efficiency Recommendations");
        for item in items {
            self.line(&format!("- {item}"));
        }
    }

    fn finish(self) -> String {
        self.out
    }
}
