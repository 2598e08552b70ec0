use bstree::cli::Cli;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if let Err(e) = cli.run() {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

/// Logs go to stderr so they don't interleave with the session on stdout.
/// `RUST_LOG` overrides the level picked by `-d`.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    tracing::debug!(verbosity, "logging initialised");
}
