//! External summarization boundary
//!
//! Shells out to a user-configured command (e.g. a Gemini or Claude
//! CLI wrapper) with a prompt built from one location's stage history.
//! The service is opaque: one blocking invocation, no retry. Callers
//! are expected to turn every error into fallback text.

use std::process::{Command, Stdio};

use thiserror::Error;

use crate::core::location::Location;

/// Fallback shown when summarization is unavailable or fails
pub const FALLBACK_TEXT: &str = "Component history analysis is unavailable.";

/// Errors that can occur at the summarization boundary
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("No insight command configured. Set insight_command in the config or CET_INSIGHT_COMMAND")]
    NotConfigured,

    #[error("Insight command not found: {command}")]
    CommandNotFound { command: String },

    #[error("Insight command failed: {message}")]
    CommandFailed { message: String },

    #[error("Insight command produced no output")]
    EmptyOutput,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Client for the external summarization command
pub struct InsightClient {
    command: Option<String>,
}

impl InsightClient {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }

    /// Build the analysis prompt from a snapshot of one location's
    /// stage history
    pub fn build_prompt(location: &Location) -> String {
        let snapshot = serde_json::to_string_pretty(&location.stages)
            .unwrap_or_else(|_| "{}".to_string());

        format!(
            "Analyze the following hardware component lifecycle for location {loc} \
             (project {project}).\n\
             Data: {snapshot}\n\n\
             Tasks:\n\
             1. Summarize the major changes between stages.\n\
             2. Explain if there were value shifts (e.g., resistor resistance changes).\n\
             3. Note any config-specific variations.\n\n\
             Keep the tone professional and engineering-focused. Use bullet points.",
            loc = location.location,
            project = location.project,
            snapshot = snapshot,
        )
    }

    /// Run the configured command with the prompt as its final
    /// argument and return its stdout
    pub fn summarize(&self, location: &Location) -> Result<String, InsightError> {
        let command = self.command.as_deref().ok_or(InsightError::NotConfigured)?;

        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or(InsightError::NotConfigured)?;
        let args: Vec<&str> = parts.collect();

        let prompt = Self::build_prompt(location);

        let output = Command::new(program)
            .args(&args)
            .arg(&prompt)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    InsightError::CommandNotFound {
                        command: program.to_string(),
                    }
                } else {
                    InsightError::IoError(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InsightError::CommandFailed {
                message: stderr.trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(InsightError::EmptyOutput);
        }
        Ok(text)
    }
}
