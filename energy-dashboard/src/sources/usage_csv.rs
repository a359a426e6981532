use csv::{Reader, StringRecord};
use energy_domain::{
    domain::{UsageRecord, UsageTable, UtilityColumn},
    TableError,
};
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, Month,
    OffsetDateTime, PrimitiveDateTime,
};

use serde::Serialize;

pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Parse an uploaded CSV into a sorted, schema-checked `UsageTable`.
///
/// Expected header columns (by name, extra columns are ignored):
/// - timestamp (see [`parse_timestamp`] for accepted forms)
/// - electricity_kwh
/// - gas_m3
/// - water_tons
/// - co2_tons
///
/// A single bad row rejects the whole table.
pub fn normalize(raw: &[u8]) -> Result<UsageTable, TableError> {
    let res = read_table(raw);
    if let Err(e) = &res {
        metrics::counter!("usage_csv_parse_errors_total").increment(1);
        tracing::debug!(error = %e, "rejected usage CSV");
    }
    res
}

fn read_table(raw: &[u8]) -> Result<UsageTable, TableError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(raw);
    let headers = read_headers(&mut rdr)?;
    let layout = ColumnLayout::resolve(&headers)?;

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record =
            result.map_err(|e| TableError::Parse(format!("failed to read CSV record: {e}")))?;
        records.push(layout.record(&record, idx + 1)?);
    }

    Ok(UsageTable::from_records(records))
}

fn read_headers(rdr: &mut Reader<&[u8]>) -> Result<StringRecord, TableError> {
    let headers = rdr
        .headers()
        .map_err(|e| TableError::Parse(format!("failed to read CSV headers: {e}")))?;
    // Blank lines are skipped, so `\n\n` lands here as well as an empty body.
    if headers.is_empty() {
        return Err(TableError::Parse("no header row".to_string()));
    }
    Ok(headers.clone())
}

/// Leading rows of an upload as sent: every column, upload order, cells trimmed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawPreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read up to `limit` rows without validating the schema.
///
/// Only fails when the bytes are not a readable CSV at all, so a table that
/// [`normalize`] rejects can still be shown.
pub fn preview(raw: &[u8], limit: usize) -> Result<RawPreview, TableError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(raw);
    let headers = read_headers(&mut rdr)?;

    let mut rows = Vec::new();
    for result in rdr.records().take(limit) {
        let record =
            result.map_err(|e| TableError::Parse(format!("failed to read CSV record: {e}")))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawPreview {
        headers: headers.iter().map(str::to_string).collect(),
        rows,
    })
}

/// Header positions of the required columns.
struct ColumnLayout {
    timestamp: usize,
    utilities: [usize; 4],
}

impl ColumnLayout {
    fn resolve(headers: &StringRecord) -> Result<Self, TableError> {
        let find = |name: &'static str| -> Result<usize, TableError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(TableError::MissingColumn(name))
        };

        let timestamp = find(TIMESTAMP_COLUMN)?;
        let mut utilities = [0; 4];
        for (slot, column) in utilities.iter_mut().zip(UtilityColumn::ALL) {
            *slot = find(column.header())?;
        }

        Ok(Self {
            timestamp,
            utilities,
        })
    }

    fn record(&self, record: &StringRecord, row: usize) -> Result<UsageRecord, TableError> {
        let ts_str = record.get(self.timestamp).unwrap_or("");
        let timestamp = parse_timestamp(ts_str).ok_or_else(|| TableError::TimestampFormat {
            row,
            value: ts_str.to_string(),
        })?;

        let mut values = [0.0; 4];
        for ((value, idx), column) in values
            .iter_mut()
            .zip(self.utilities)
            .zip(UtilityColumn::ALL)
        {
            let raw = record.get(idx).unwrap_or("");
            *value = raw.parse().map_err(|_| TableError::InvalidNumber {
                row,
                column: column.header(),
                value: raw.to_string(),
            })?;
        }
        let [electricity_kwh, gas_m3, water_tons, co2_tons] = values;

        Ok(UsageRecord {
            timestamp,
            electricity_kwh,
            gas_m3,
            water_tons,
            co2_tons,
        })
    }
}

/// Parse a timestamp cell. Values without an offset are taken as UTC.
///
/// Accepted forms, tried in order:
/// - RFC 3339 (`2024-01-31T08:00:00Z`, `2024-01-31T08:00:00+02:00`)
/// - `2024-01-31 08:00:00` / `2024-01-31T08:00:00`
/// - `2024-01-31 08:00`
/// - `2024-01-31`
/// - `2024-01` (first day of the month)
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(ts) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(ts);
    }

    let datetime_formats = [
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]"),
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = PrimitiveDateTime::parse(s, fmt) {
            return Some(dt.assume_utc());
        }
    }

    if let Ok(date) = Date::parse(s, format_description!("[year]-[month]-[day]")) {
        return Some(date.midnight().assume_utc());
    }

    parse_year_month(s).map(|date| date.midnight().assume_utc())
}

fn parse_year_month(s: &str) -> Option<Date> {
    let (year, month) = s.split_once('-')?;
    if year.len() != 4 || month.is_empty() || month.len() > 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month = Month::try_from(month.parse::<u8>().ok()?).ok()?;
    Date::from_calendar_date(year, month, 1).ok()
}

/// Canonical CSV form of a table: required columns only, RFC 3339 timestamps.
///
/// Feeding the output back through [`normalize`] yields an identical table.
pub fn to_csv(table: &UsageTable) -> Result<Vec<u8>, TableError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    let mut header = vec![TIMESTAMP_COLUMN];
    header.extend(UtilityColumn::ALL.iter().map(|c| c.header()));
    wtr.write_record(&header)
        .map_err(|e| TableError::Parse(format!("failed to write CSV header: {e}")))?;

    for r in table.records() {
        let ts = r
            .timestamp
            .format(&Rfc3339)
            .map_err(|e| TableError::Parse(format!("failed to format timestamp: {e}")))?;
        let mut row = vec![ts];
        row.extend(UtilityColumn::ALL.iter().map(|c| r.value(*c).to_string()));
        wtr.write_record(&row)
            .map_err(|e| TableError::Parse(format!("failed to write CSV record: {e}")))?;
    }

    wtr.into_inner()
        .map_err(|e| TableError::Parse(format!("failed to flush CSV writer: {e}")))
}
