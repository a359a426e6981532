use time::OffsetDateTime;

/// One of the four tracked consumption/emission metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UtilityColumn {
    Electricity,
    Gas,
    Water,
    Co2,
}

impl UtilityColumn {
    pub const ALL: [UtilityColumn; 4] = [
        UtilityColumn::Electricity,
        UtilityColumn::Gas,
        UtilityColumn::Water,
        UtilityColumn::Co2,
    ];

    /// CSV header name for this column.
    pub fn header(self) -> &'static str {
        match self {
            Self::Electricity => "electricity_kwh",
            Self::Gas => "gas_m3",
            Self::Water => "water_tons",
            Self::Co2 => "co2_tons",
        }
    }

    /// Human-readable label used in composition views.
    pub fn label(self) -> &'static str {
        match self {
            Self::Electricity => "Electricity",
            Self::Gas => "Gas",
            Self::Water => "Water",
            Self::Co2 => "CO2",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsageRecord {
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub timestamp: OffsetDateTime,
    pub electricity_kwh: f64,
    pub gas_m3: f64,
    pub water_tons: f64,
    pub co2_tons: f64,
}

impl UsageRecord {
    pub fn value(&self, column: UtilityColumn) -> f64 {
        match column {
            UtilityColumn::Electricity => self.electricity_kwh,
            UtilityColumn::Gas => self.gas_m3,
            UtilityColumn::Water => self.water_tons,
            UtilityColumn::Co2 => self.co2_tons,
        }
    }
}

/// Schema-checked usage rows, always sorted non-decreasing by timestamp.
///
/// The only way to build a table is through [`UsageTable::from_records`],
/// which sorts, so "latest" always means the maximum timestamp rather than
/// upload order. Rows sharing a timestamp keep their upload order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UsageTable {
    records: Vec<UsageRecord>,
}

impl UsageTable {
    pub fn from_records(mut records: Vec<UsageRecord>) -> Self {
        records.sort_by_key(|r| r.timestamp);
        Self { records }
    }

    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Row with the maximum timestamp.
    pub fn latest(&self) -> Option<&UsageRecord> {
        self.records.last()
    }

    pub fn values(&self, column: UtilityColumn) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(move |r| r.value(column))
    }

    /// Arithmetic mean of a column, `None` for an empty table.
    pub fn mean(&self, column: UtilityColumn) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let sum: f64 = self.values(column).sum();
        Some(sum / self.records.len() as f64)
    }
}
