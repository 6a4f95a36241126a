//! Logging setup
//!
//! Log events go to stderr so they never mix with the `Creating`/`Skipping`
//! report printed on stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging
///
/// `RUST_LOG` takes precedence. Otherwise only warnings are shown, or debug
/// output from this crate when `verbose` is set. Calling this more than once
/// is harmless; later calls keep the first subscriber.
///
/// # Example
///
/// ```rust,no_run
/// scaffold_kit::observability::init(false);
/// tracing::info!("scaffolding started");
/// ```
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,scaffold_kit=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(verbose)
                .with_writer(std::io::stderr),
        )
        .try_init();

    if result.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
