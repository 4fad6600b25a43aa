use super::LogExtractor;
use crate::error::{HeatError, Result};
use log::debug;
use std::path::Path;
use std::process::Command;

/// Runs `git log` and returns its short committer dates.
#[derive(Debug, Clone, Default)]
pub struct GitCliExtractor {
    program: Option<String>,
}

impl GitCliExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific `git` executable instead of the one on `PATH`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }
}

impl LogExtractor for GitCliExtractor {
    fn extract(&self, repo: &Path, author: &str) -> Result<Vec<String>> {
        let program = self.program.as_deref().unwrap_or("git");
        debug!("running {program} log in {}", repo.display());

        let output = Command::new(program)
            .arg("-C")
            .arg(repo)
            .args([
                "log",
                "--all",
                &format!("--author={author}"),
                "--pretty=format:%cd",
                "--date=short",
            ])
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HeatError::GitRepo(format!(
                "git log failed in {}: {}",
                repo.display(),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect())
    }
}
