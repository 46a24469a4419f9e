#![forbid(unsafe_code)]

mod config;
mod error;
mod fingerprint;
mod jsonrpc;
mod params;
mod session;
mod session_log;
mod stdio;

use clap::Parser;
use config::{Cli, Settings};
use session::Session;
use session_log::SessionLog;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(filter: &str) {
    // stdout carries the protocol; logs must stay on stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::resolve(Cli::parse())?;
    init_tracing(&settings.log_filter);

    let registry = tm_datasets::open(settings.datasets.as_deref())?;
    let log = SessionLog::new(&settings.state_dir);
    info!(
        version = config::VERSION,
        data_source = settings.data_source.as_str(),
        uploaded_cap = settings.policy.uploaded_cap,
        select_stride = settings.policy.select_stride,
        session_log = %log.path().display(),
        "console started"
    );

    let mut session = Session::new(registry, settings.policy, settings.data_source, log);
    let outcome = stdio::run_stdio(&mut session);
    let reason = match &outcome {
        Ok(()) => "eof".to_string(),
        Err(err) => format!("error: {err}"),
    };
    session.log_mut().note_exit(&reason);
    info!(exit = %reason, "console stopped");
    outcome
}
