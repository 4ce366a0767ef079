//! CLI binary for the AI security analyst: send one artifact to an LLM and
//! save the analysis in the current working directory.

use analyst_core::artifact::ArtifactPath;
use analyst_core::config::AnalystConfig;
use analyst_core::error::AnalystError;
use analyst_core::output::{output_path_for, write_analysis};
use analyst_llm::{CompletionClient, KeyringSecretStore, PipelineConfig, SecretStore, run_pipeline};
use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(
    name = "ai-analyst",
    version,
    about = "Purple-team triage of a security artifact (text or PDF) via an LLM"
)]
struct Cli {
    /// Artifact to analyze (log, report, PDF, ...)
    artifact: Option<PathBuf>,
}

fn main() -> ExitCode {
    let start = Instant::now();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let Some(artifact) = cli.artifact else {
        println!("ERROR: Missing artifact file path argument.");
        return ExitCode::FAILURE;
    };

    match cmd_analyze(&artifact, Path::new("."), &KeyringSecretStore, start) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            match e.downcast_ref::<AnalystError>() {
                Some(analyst_err) => eprintln!("{analyst_err}"),
                None => eprintln!("ERROR: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Analyze one artifact. Config is read from, and output written to, `work_dir`.
/// Returns the console report on success.
fn cmd_analyze(
    artifact_path: &Path,
    work_dir: &Path,
    store: &dyn SecretStore,
    start: Instant,
) -> Result<String> {
    let config = AnalystConfig::load(work_dir)?;

    let client = CompletionClient::from_secret_store(store, &config)?;

    let artifact = ArtifactPath::new(artifact_path);
    let report = run_pipeline(
        &artifact,
        &PipelineConfig {
            service: &client,
            max_prompt_chars: config.prompt.max_chars,
            show_progress: std::io::stderr().is_terminal(),
        },
    )?;
    tracing::debug!(
        artifact_chars = report.artifact_chars,
        prompt_chars = report.prompt_chars,
        "pipeline finished"
    );

    Ok(finish_run(
        report.result.text(),
        &artifact,
        work_dir,
        start.elapsed(),
    ))
}

/// Report timing and write the analysis file. A failed write is reported, never propagated.
fn finish_run(analysis: &str, artifact: &ArtifactPath, out_dir: &Path, elapsed: Duration) -> String {
    let output = output_path_for(artifact, out_dir);
    let mut report = format!(
        "AI analysis took {:.1} seconds, output written to {}.\n",
        elapsed.as_secs_f64(),
        output.display()
    );

    if let Err(e) = write_analysis(&output, analysis) {
        report.push_str(&format!("ERROR: unable to output results to file, {e}\n"));
    } else {
        tracing::debug!(path = %output.display(), "analysis written");
    }

    report
}
