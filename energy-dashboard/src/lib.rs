pub mod analytics;
pub mod config;
pub mod metrics_server;
pub mod observability;
pub mod pipeline;
pub mod presentation;
pub mod sinks;
pub mod sources;

pub use pipeline::{Dashboard, DashboardInput, DashboardView, Section};
