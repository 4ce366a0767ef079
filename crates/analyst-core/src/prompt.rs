//! Analyst prompt template and the size guard around it.

use crate::error::{AnalystError, Result};

/// Largest prompt the pipeline will send, in characters.
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 100_000;

/// Fixed instructions placed ahead of the artifact contents.
pub const ANALYST_INSTRUCTIONS: &str = "\
You are an AI Security Analyst on a purple team.

Analyze the following security artifact and help a human analyst by:
- Identifying suspicious or malicious behavior
- Highlighting vulnerabilities or misconfigurations
- Correlating possible attacker activity or attack paths
- Calling out unknown or anomalous behavior
- Recommending next investigative steps

Respond with:
1) Executive summary
2) Key findings (severity + reasoning)
3) Possible attack paths or correlations
4) Gaps / assumptions
5) Recommended next steps

Artifact contents:
";

/// A rendered prompt, guaranteed to be within the configured size bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders [`ANALYST_INSTRUCTIONS`] around artifact text.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder {
    max_chars: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PROMPT_CHARS)
    }
}

impl PromptBuilder {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Render the prompt, refusing (never truncating) when it exceeds the bound.
    pub fn build(&self, artifact_text: &str) -> Result<Prompt> {
        let mut rendered = String::with_capacity(ANALYST_INSTRUCTIONS.len() + artifact_text.len());
        rendered.push_str(ANALYST_INSTRUCTIONS);
        rendered.push_str(artifact_text);
        let rendered = rendered.trim();

        let len = rendered.chars().count();
        if len > self.max_chars {
            return Err(AnalystError::PromptTooLarge {
                len,
                max: self.max_chars,
            });
        }

        tracing::debug!(chars = len, max = self.max_chars, "built prompt");
        Ok(Prompt(rendered.to_string()))
    }
}
