//! Analysis pipeline: load the artifact, build the prompt, send it once.
//!
//! Each stage is a pure function of its input plus injected configuration;
//! nothing is retained between runs and nothing is retried.

use crate::progress::WaitSpinner;
use crate::provider::{AnalysisResult, CompletionService};
use analyst_core::artifact::{ArtifactLoader, ArtifactPath};
use analyst_core::error::Result;
use analyst_core::prompt::PromptBuilder;

/// Configuration for a single analysis run.
pub struct PipelineConfig<'a> {
    pub service: &'a dyn CompletionService,
    pub max_prompt_chars: usize,
    /// Draw a spinner on stderr while waiting for the service.
    pub show_progress: bool,
}

/// Result of a completed analysis run.
#[derive(Debug)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub artifact_chars: usize,
    pub prompt_chars: usize,
}

/// Run the full pipeline for one artifact.
pub fn run_pipeline(artifact: &ArtifactPath, config: &PipelineConfig<'_>) -> Result<AnalysisReport> {
    let text = ArtifactLoader::new().load(artifact)?;
    let artifact_chars = text.chars().count();

    let prompt = PromptBuilder::new(config.max_prompt_chars).build(&text)?;
    let prompt_chars = prompt.char_len();

    let spinner = if config.show_progress {
        WaitSpinner::new(&format!("Waiting for {}", config.service.model_name()))
    } else {
        WaitSpinner::hidden()
    };
    let outcome = config.service.complete(&prompt);
    spinner.finish();

    let result = outcome?;
    tracing::debug!(
        artifact_chars,
        prompt_chars,
        response_chars = result.text().chars().count(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        result,
        artifact_chars,
        prompt_chars,
    })
}
