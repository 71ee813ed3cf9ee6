//! Logging setup for the `nutrion` binary.
//!
//! Logs go to stderr so the nutrition breakdown on stdout can be piped.
//! `RUST_LOG` beats everything; otherwise the `[logging]` section and the
//! `--verbose` / `--json-logs` flags decide.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Directives used with `--verbose`. reqwest and hyper stay at info so the
/// request body (base64 image data) never floods the terminal.
const VERBOSE_DIRECTIVES: &str = "debug,hyper=info,reqwest=info";

/// Levels accepted in `logging.level`.
const LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Filter directives for our own crates at `level`; dependencies stay at warn.
fn directives(level: &str, verbose: bool) -> String {
    if verbose {
        return VERBOSE_DIRECTIVES.to_string();
    }
    let level = level.trim().to_ascii_lowercase();
    let level = if LEVELS.contains(&level.as_str()) {
        level
    } else {
        "info".to_string()
    };
    format!("warn,nutrion={level},nutrion_core={level}")
}

/// Install the global subscriber.
pub fn init(level: &str, verbose: bool, json_format: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level, verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    if json_format {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Initialize from the `[logging]` section; CLI flags win.
pub fn init_from_config(config: &nutrion_core::Config, verbose: bool, json_logs: bool) {
    let json_format = json_logs || config.logging.format.eq_ignore_ascii_case("json");
    init(&config.logging.level, verbose, json_format);
}
