//! Core of the AI security analyst: artifact loading, prompt construction,
//! configuration, and the closed error taxonomy shared by the whole pipeline.
//!
//! Provides [`artifact::ArtifactLoader`] (PDF and text extraction),
//! [`prompt::PromptBuilder`] (fixed analyst template with a size guard), and
//! [`output`] helpers for naming and writing the `<stem>_ANALYSIS.txt` file.

pub mod artifact;
pub mod config;
pub mod error;
pub mod output;
pub mod prompt;

pub use artifact::{ArtifactKind, ArtifactLoader, ArtifactPath};
pub use config::AnalystConfig;
pub use error::{AnalystError, ErrorKind, Result};
pub use prompt::{Prompt, PromptBuilder};
