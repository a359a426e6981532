use std::fmt;

use time::OffsetDateTime;

use super::usage::UtilityColumn;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrendPoint {
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub timestamp: OffsetDateTime,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UtilitySeries {
    pub column: UtilityColumn,
    pub points: Vec<TrendPoint>,
}

/// Per-row values of every utility column, in table order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrendSeries {
    pub series: Vec<UtilitySeries>,
}

impl TrendSeries {
    pub fn get(&self, column: UtilityColumn) -> Option<&UtilitySeries> {
        self.series.iter().find(|s| s.column == column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompositionSlice {
    pub column: UtilityColumn,
    pub label: &'static str,
    pub value: f64,
}

/// The latest row's utility values, labeled for a proportion chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompositionSnapshot {
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub timestamp: OffsetDateTime,
    pub slices: Vec<CompositionSlice>,
}

impl CompositionSnapshot {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Share of the total in percent; `None` when the row sums to zero.
    pub fn share_percent(&self, column: UtilityColumn) -> Option<f64> {
        let total = self.total();
        if total == 0.0 {
            return None;
        }
        self.slices
            .iter()
            .find(|s| s.column == column)
            .map(|s| s.value / total * 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoiEstimate {
    pub saving_kwh: f64,
    pub annual_saving_usd: f64,
    pub roi_percent: f64,
    pub payback_years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Co2Grade {
    pub annual_co2_tons: f64,
    pub grade: Grade,
}
