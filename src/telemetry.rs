//! Telemetry helpers for hosts embedding `panel-chart-rs`.
//!
//! The converters only emit `tracing` events; installing a subscriber is left
//! to the host. `init_default_tracing` is a convenience for tools and tests.

/// Installs a compact, env-filtered `tracing` subscriber when the `telemetry`
/// feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when the feature is disabled or a global subscriber was
/// already installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("panel_chart=info")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
