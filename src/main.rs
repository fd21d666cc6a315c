//! packet-sniffer - captures raw Ethernet frames and prints decoded headers.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use packet_sniffer::capture;
use packet_sniffer::{
    CancellationToken, CaptureConfig, CaptureError, CaptureLoop, ConsoleReporter, FrameDecoder,
    ObserverRegistry,
};

#[derive(Parser)]
#[command(name = "packet-sniffer")]
#[command(about = "Network packet sniffer")]
struct Cli {
    /// Interface to capture Ethernet frames on (captures on all by default)
    #[arg(short, long)]
    interface: Option<String>,

    /// Output packet data during capture
    #[arg(short, long)]
    data: bool,

    /// List available network interfaces and exit
    #[arg(short, long)]
    list_interfaces: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list_interfaces {
        for iface in capture::list_interfaces() {
            println!("{}", iface);
        }
        return ExitCode::SUCCESS;
    }

    let config = CaptureConfig::new(cli.interface, cli.data, cli.verbose).with_env_overrides();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.tracing_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&config) {
        Ok(frames) => {
            tracing::info!("Captured {} frames", frames);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CaptureConfig) -> anyhow::Result<u64> {
    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())?;

    let mut registry = ObserverRegistry::new();
    registry.register(Box::new(
        ConsoleReporter::new().with_display_data(config.display_data),
    ));

    let mut capture = CaptureLoop::open(
        config.interface.as_deref(),
        FrameDecoder::new(),
        registry,
        cancel,
    )
    .map_err(|e| match e {
        CaptureError::InsufficientPermissions => anyhow::anyhow!(
            "Permission denied. This application requires administrator privileges to run."
        ),
        other => other.into(),
    })?;

    // Observers do the rendering; the loop only has to be driven.
    for _ in capture.by_ref() {}

    if let Some(e) = capture.last_error() {
        anyhow::bail!(
            "capture stopped after {} frames: {}",
            capture.frames_captured(),
            e
        );
    }

    Ok(capture.frames_captured())
}
