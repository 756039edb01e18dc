use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "fundraiser_registry=info";

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Filter directive used when `RUST_LOG` is unset. `--verbose` wins over the
/// configured level.
pub fn cli_directive(verbose: bool, level: Option<&str>) -> String {
    if verbose {
        return "fundraiser_registry=debug,info".to_string();
    }
    level
        .map(|l| format!("fundraiser_registry={}", l))
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
}

pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(env_filter(&cli_directive(verbose, level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// JSON lines on stderr, for when the output is collected by another tool.
pub fn init_json_logger(level: Option<&str>) {
    tracing_subscriber::registry()
        .with(env_filter(&cli_directive(false, level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .json(),
        )
        .init();
}
