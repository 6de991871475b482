//! Diagnostic logging.
//!
//! Operator-facing output goes to stdout and is never routed through here.
//! `tracing` events are only emitted when `--verbose` is passed or
//! `RUST_LOG` is set; otherwise no subscriber is installed.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used for `--verbose`.
const VERBOSE_FILTER: &str = "licgen=debug";

/// Pick the event filter, or `None` when diagnostics are off.
fn filter(verbose: bool, rust_log: Option<&str>) -> Option<EnvFilter> {
    if verbose {
        return Some(EnvFilter::new(VERBOSE_FILTER));
    }
    rust_log
        .filter(|v| !v.trim().is_empty())
        .map(EnvFilter::new)
}

/// Install the stderr subscriber if diagnostics are requested.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool, env: &crate::env::Env) {
    let rust_log = env.var("RUST_LOG").ok();
    let Some(filter) = filter(verbose, rust_log.as_deref()) else {
        return;
    };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_without_flag_or_rust_log() {
        assert!(filter(false, None).is_none());
        assert!(filter(false, Some("  ")).is_none());
    }

    #[test]
    fn verbose_enables_debug_for_crate() {
        let f = filter(true, None).unwrap();
        assert_eq!(f.to_string(), VERBOSE_FILTER);
    }

    #[test]
    fn rust_log_is_respected() {
        let f = filter(false, Some("warn")).unwrap();
        assert_eq!(f.to_string(), "warn");
    }

    #[test]
    fn init_twice_does_not_panic() {
        let env = crate::env::Env::mock(Vec::<(&str, &str)>::new());
        init(true, &env);
        init(true, &env);
    }
}
