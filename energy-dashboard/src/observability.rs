use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or does not parse.
pub const DEFAULT_DIRECTIVES: &str = "warn,energy_dashboard=info,energy_domain=info";

fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global `fmt` subscriber.
///
/// Logs go to stderr so the text report on stdout stays clean. Calling this a
/// second time leaves the first subscriber in place.
pub fn init_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let res = tracing_subscriber::fmt()
        .with_env_filter(build_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Err(e) = res {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }
}
