//! Tracing subscriber setup.

use std::sync::Once;

/// Environment variable holding the log filter, e.g.
/// `WRAPCK_LOG=wrapck_analysis=trace`.
pub const LOG_ENV: &str = "WRAPCK_LOG";

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical stderr subscriber when [`LOG_ENV`] is set.
///
/// Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var_os(LOG_ENV).is_none() {
            return;
        }
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
        let tree = tracing_tree::HierarchicalLayer::new(2)
            .with_writer(std::io::stderr)
            .with_targets(true)
            .with_indent_lines(true);
        // Another subscriber may already be installed (tests).
        let _ = tracing_subscriber::registry().with(tree).with(filter).try_init();
    });
}
