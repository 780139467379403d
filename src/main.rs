//! Main entry point for the tubegrab CLI

use clap::Parser;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tubegrab::cli::{create_progress_callback, Args, OutputFormatter, VerbosityLevel};
use tubegrab::core::{DownloadOrchestrator, InterruptHandle, RunOutcome, TerminalPrompt};
use tubegrab::download::HttpTransfer;
use tubegrab::platform::{InnerTubeProvider, PlatformClient};
use tubegrab::TubeError;

// Exits through `process::exit` so a stdin reader still blocked after
// Ctrl-C cannot hold up runtime shutdown.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!("Starting tubegrab with args: {:?}", args);

    let formatter = Arc::new(OutputFormatter::new(args.verbosity_level()));

    // Ctrl-C while no prompt is waiting ends the run right away
    let interrupts = InterruptHandle::new();
    let on_interrupt = formatter.clone();
    let _listener = interrupts.spawn_listener(move || {
        on_interrupt.abandon_progress();
        on_interrupt.error(&TubeError::Cancelled.to_string());
        std::process::exit(TubeError::Cancelled.exit_code());
    });

    let code = match run(&args, formatter.clone(), interrupts).await {
        Ok(outcome) => {
            formatter.print_outcome(&outcome);
            0
        }
        Err(e) => {
            formatter.abandon_progress();
            formatter.error(&e.to_string());
            if e.is_validation() {
                formatter.info("Run with --help for usage.");
            }
            e.exit_code()
        }
    };

    std::process::exit(code);
}

async fn run(
    args: &Args,
    formatter: Arc<OutputFormatter>,
    interrupts: InterruptHandle,
) -> Result<RunOutcome, TubeError> {
    let config = args.to_run_config()?;
    info!("Running {:?} into {}", config.mode, config.destination.display());

    let client = PlatformClient::with_config(args.http_config())?;
    let transfer =
        HttpTransfer::new(client.clone()).with_progress_callback(create_progress_callback(formatter));
    let provider = InnerTubeProvider::new(client.clone());

    let prompt = TerminalPrompt::new(interrupts)
        .with_quiet(args.verbosity_level() == VerbosityLevel::Quiet);

    let mut orchestrator = DownloadOrchestrator::new(provider, transfer, client, prompt);
    orchestrator.run(&config).await
}

/// Initialize logging system
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(verbose)
                .with_line_number(verbose)
                .compact(),
        )
        .init();
}
