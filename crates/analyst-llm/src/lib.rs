//! Remote half of the AI security analyst.
//!
//! # Architecture
//!
//! - **provider**: `CompletionService` trait and the blocking OpenAI Responses client
//! - **secret**: credential retrieval from the OS keyring
//! - **pipeline**: load artifact → build prompt → single completion call
//! - **progress**: terminal spinner via `indicatif`

pub mod pipeline;
pub mod progress;
pub mod provider;
pub mod secret;

pub use pipeline::{AnalysisReport, PipelineConfig, run_pipeline};
pub use provider::{AnalysisResult, CompletionClient, CompletionService};
pub use secret::{Credential, KeyringSecretStore, SecretStore, StaticSecretStore, fetch_credential};
