//! Echolot CLI - build, validate and sign provenance records.

use clap::Parser;
use echolot_cli::commands;
use echolot_cli::{Cli, Command, Config, Formatter};
use echolot_domain::RunId;
use tracing::Instrument;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let run_id = RunId::new();
    let span = tracing::info_span!("run", run_id = %run_id);

    if let Err(e) = run(cli).instrument(span).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for command output.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> echolot_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Build(args) => commands::execute_build(args, &config, &formatter).await,
        Command::Validate(args) => commands::execute_validate(args, &config, &formatter).await,
        Command::BuildFromCommons(args) => {
            commands::execute_build_from_commons(args, &config, &formatter).await
        }
        Command::Sign(args) => commands::execute_sign(args, &config, &formatter).await,
        Command::Info(args) => commands::execute_info(args, &config, &formatter).await,
    }
}
