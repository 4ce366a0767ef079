//! Closed error taxonomy shared by every stage of the analysis pipeline.
//!
//! Each stage catches its library-specific failures at the boundary and
//! re-surfaces them as one of these variants, so no `lopdf`, `ureq` or
//! `keyring` error type ever reaches the caller.

/// Marker prefixed to every user-facing failure message.
pub const ERROR_MARKER: &str = "OpenAI ERROR";

/// Errors produced while loading, prompting, or calling the completion service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalystError {
    #[error("OpenAI ERROR: Artifact file path does not exist ({0}).")]
    NotFound(String),
    #[error("OpenAI ERROR: Unable to read text from artifact file ({0})")]
    Extraction(String),
    #[error("OpenAI ERROR: prompt is too long, may exceed API limit ({len} > {max} characters)")]
    PromptTooLarge { len: usize, max: usize },
    #[error("OpenAI ERROR: {0}")]
    Configuration(String),
    #[error("OpenAI ERROR: issue with key ({0})")]
    Auth(String),
    #[error("OpenAI ERROR: rate limit exceeded ({0})")]
    RateLimit(String),
    #[error("OpenAI ERROR: {0}")]
    Transport(String),
    #[error("OpenAI ERROR: LLM response was empty")]
    EmptyResponse,
}

/// Message-free discriminant of [`AnalystError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Extraction,
    PromptTooLarge,
    Configuration,
    Auth,
    RateLimit,
    Transport,
    EmptyResponse,
}

impl AnalystError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Extraction(_) => ErrorKind::Extraction,
            Self::PromptTooLarge { .. } => ErrorKind::PromptTooLarge,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Auth(_) => ErrorKind::Auth,
            Self::RateLimit(_) => ErrorKind::RateLimit,
            Self::Transport(_) => ErrorKind::Transport,
            Self::EmptyResponse => ErrorKind::EmptyResponse,
        }
    }
}

pub type Result<T, E = AnalystError> = std::result::Result<T, E>;
