pub mod build_info;

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "transfer_booking=info";

/// Installs the global subscriber. Logs go to stderr so script output on
/// stdout stays clean; `RUST_LOG` adds or overrides directives.
pub fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = DEFAULT_DIRECTIVE.parse() {
        filter = filter.add_directive(directive);
    }
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
