//! Opt-in `tracing` setup for hosts of `chart-options-tree`.
//!
//! Store attachment is logged at `trace`, value substitutions and slot
//! overwrites at `debug`, dropped defaults sections at `warn`. Hosts with
//! their own subscriber need nothing from this module.

/// Filter used when `RUST_LOG` is not set: only this crate's warnings.
pub const DEFAULT_FILTER: &str = "chart_options_tree=warn";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_FILTER`] when the variable is absent or invalid.
///
/// Returns `false` without the `telemetry` feature or when a global subscriber
/// is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
        install(filter)
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Same as [`init_default_tracing`] with explicit filter directives such as
/// `"chart_options_tree::core::node=trace"`. Invalid directives are rejected
/// with `false`.
#[must_use]
pub fn init_tracing_with_filter(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        match tracing_subscriber::EnvFilter::try_new(directives) {
            Ok(filter) => install(filter),
            Err(_) => false,
        }
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}

#[cfg(feature = "telemetry")]
fn install(filter: tracing_subscriber::EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::{init_default_tracing, init_tracing_with_filter};

    #[test]
    fn second_initialization_is_refused() {
        let _ = init_tracing_with_filter("chart_options_tree=debug");
        assert!(!init_default_tracing());
        assert!(!init_tracing_with_filter("chart_options_tree=trace"));
    }
}
