use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use factcheck_stream::{
    api::AnalysisClient,
    config::Config,
    pipeline::StageStatus,
    session::{AnalysisEngine, Session},
};

/// Submit text to the fact-check analysis service and render the verified
/// result as it is reconstructed from the event stream.
#[derive(Debug, Parser)]
#[command(name = "factcheck-stream", version, about)]
struct Cli {
    /// Text to analyze; reads stdin when neither TEXT nor --file is given
    text: Option<String>,

    /// Read the text to analyze from a file
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let text = read_input(&cli)?;
    if text.trim().is_empty() {
        anyhow::bail!("no text to analyze");
    }

    let client = AnalysisClient::new(&config.service, config.request.clone())
        .context("failed to build analysis client")?;
    let engine = AnalysisEngine::new(client);

    info!(base_url = %config.service.base_url, "Analysis client initialized");

    // Render stage progress from published snapshots until the session
    // reaches a terminal state.
    let mut snapshots = engine.subscribe();
    let progress = tokio::spawn(async move {
        let mut printed = vec![StageStatus::Pending; 3];
        while snapshots.changed().await.is_ok() {
            let session = snapshots.borrow_and_update().clone();
            for (i, stage) in session.stages.stages().iter().enumerate() {
                if printed.get(i) != Some(&stage.status) {
                    match stage.status {
                        StageStatus::Active => eprintln!("... {}", stage.name),
                        StageStatus::Completed => eprintln!(" ok {}", stage.name),
                        StageStatus::Pending => {}
                    }
                    printed[i] = stage.status;
                }
            }
            if session.is_terminal() {
                break;
            }
        }
    });

    // Ctrl-C cancels the run; the session fails and keeps partial results.
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    let outcome = engine.analyze(&text, cancel).await;
    if engine.session().is_terminal() {
        let _ = progress.await;
    } else {
        progress.abort();
    }

    match outcome {
        Ok(Some(session)) => {
            render(&session);
            Ok(())
        }
        Ok(None) => {
            eprintln!("nothing to analyze");
            Ok(())
        }
        Err(e) => {
            render(&engine.session());
            Err(e.into())
        }
    }
}

/// Resolve the text to analyze from argument, file, or stdin.
fn read_input(cli: &Cli) -> anyhow::Result<String> {
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }
    if let Some(path) = &cli.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;
    Ok(buffer)
}

/// Print the reconstructed result to stdout.
fn render(session: &Session) {
    if let Some(error) = &session.error {
        eprintln!("analysis failed: {}", error);
    }

    if !session.result.report.is_empty() {
        println!("Verification report");
        println!("-------------------");
        for entry in &session.result.report {
            println!("[{}] {}", entry.status, entry.claim);
            if let Some(reason) = &entry.reason {
                println!("    reason: {}", reason);
            }
            if let Some(evidence) = entry.display_evidence() {
                println!("    evidence: {}", evidence);
            }
            if let Some(correction) = entry.correction.as_deref().filter(|c| !c.is_empty()) {
                println!("    correction: {}", correction);
            }
            if let Some(source) = entry.source.as_deref().filter(|s| !s.is_empty()) {
                println!("    source: {}", source);
            }
        }
        println!();
    }

    if !session.result.final_text.is_empty() {
        println!("Verified text");
        println!("-------------");
        println!("{}", session.result.final_text);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        factcheck_stream::config::LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        factcheck_stream::config::LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
