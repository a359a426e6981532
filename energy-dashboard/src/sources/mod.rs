pub mod http_dashboard;
pub mod usage_csv;

pub use http_dashboard::HttpDashboardSource;
pub use usage_csv::{normalize, parse_timestamp, preview, to_csv, RawPreview};

/// Short content hash of an upload, used to correlate log lines.
pub fn fingerprint(raw: &[u8]) -> String {
    let hex = blake3::hash(raw).to_hex();
    hex.as_str()[..16].to_string()
}
