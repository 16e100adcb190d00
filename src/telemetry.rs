//! Opt-in tracing setup for applications embedding `timebox`.
//!
//! Box lifecycle and mode changes log at `debug`, per-gesture geometry and
//! filter passes at `trace`. Hosts may install their own subscriber instead.

/// Installs a compact fmt subscriber honoring `RUST_LOG`, falling back to `info`.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_default_directive("info")
}

/// Like [`init_default_tracing`] but with a caller-chosen fallback directive,
/// e.g. `"timebox=trace"` to follow every gesture step.
#[must_use]
pub fn init_tracing_with_default_directive(directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directive;
        false
    }
}
