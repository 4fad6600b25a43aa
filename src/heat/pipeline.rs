use super::aggregate::merge;
use super::bucket::bucket_dates;
use super::grid::Grid;
use crate::error::{HeatError, Result};
use crate::git::{repository_name, LogExtractor};
use crate::model::BucketCounts;
use crate::render::Renderer;
use crate::window::{dates_in_window, Window};
use console::style;
use indicatif::ProgressBar;
use log::{debug, warn};
use std::path::{Path, PathBuf};

pub const SUMMARY_FILE: &str = "summary_heatmap.png";

/// What happens when one repository fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// The first failure aborts the whole run.
    #[default]
    FailFast,
    /// Record the failure and move on to the next repository.
    ContinueOnError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The author has no commits in the repository.
    NoCommits,
    /// The author has commits, none of them inside the window.
    NoCommitsInWindow,
    Reported { grid: Grid, artifact: PathBuf },
    Failed { error: String },
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::NoCommits => "no_commits",
            Outcome::NoCommitsInWindow => "no_commits_in_window",
            Outcome::Reported { .. } => "reported",
            Outcome::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryResult {
    pub name: String,
    pub path: PathBuf,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub window: Window,
    pub repositories: Vec<RepositoryResult>,
    pub totals: BucketCounts,
    pub summary: Option<Grid>,
    pub summary_artifact: Option<PathBuf>,
}

impl Report {
    pub fn count(&self, label: &str) -> usize {
        self.repositories
            .iter()
            .filter(|r| r.outcome.label() == label)
            .count()
    }
}

/// Runs extraction, windowing, bucketing and rendering over a set of
/// repositories and accumulates the cross-repository totals.
pub struct Pipeline<'a> {
    extractor: &'a dyn LogExtractor,
    renderer: &'a dyn Renderer,
    author: String,
    output_dir: PathBuf,
    window: Window,
    policy: ErrorPolicy,
    progress: ProgressBar,
    console: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        extractor: &'a dyn LogExtractor,
        renderer: &'a dyn Renderer,
        author: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            extractor,
            renderer,
            author: author.into(),
            output_dir: output_dir.into(),
            window: Window::ending_today(),
            policy: ErrorPolicy::default(),
            progress: ProgressBar::hidden(),
            console: false,
        }
    }

    /// Fix the window instead of taking it from the local clock.
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Print per-repository status lines.
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Process every repository in order, then render the summary if any
    /// repository contributed commits.
    pub fn run<I, P>(&self, repos: I) -> Result<Report>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut totals = BucketCounts::new();
        let mut repositories = Vec::new();

        for path in repos {
            let path = path.as_ref();
            let name = repository_name(path);
            self.progress.set_message(format!("Processing {name}"));

            let outcome = match self.process_repository(&name, path) {
                Ok((outcome, counts)) => {
                    merge(&mut totals, &counts);
                    outcome
                }
                Err(e) => match self.policy {
                    ErrorPolicy::FailFast => {
                        return Err(HeatError::Repository {
                            name,
                            source: Box::new(e),
                        });
                    }
                    ErrorPolicy::ContinueOnError => {
                        warn!("{name}: {e}");
                        self.say(format!(
                            "{} {}: {e}",
                            style("Failed").red().bold(),
                            style(&name).bold()
                        ));
                        Outcome::Failed { error: e.to_string() }
                    }
                },
            };

            self.progress.inc(1);
            repositories.push(RepositoryResult {
                name,
                path: path.to_path_buf(),
                outcome,
            });
        }

        let (summary, summary_artifact) = if totals.is_empty() {
            debug!("no repository had commits in the window, skipping summary");
            (None, None)
        } else {
            let grid = Grid::from_counts(&totals);
            let artifact = self.artifact_path(SUMMARY_FILE)?;
            let title = format!(
                "Summary of Git Changes Across All Repositories by {}",
                self.author
            );
            self.renderer.render(&grid, &title, &artifact)?;
            (Some(grid), Some(artifact))
        };

        Ok(Report {
            window: self.window,
            repositories,
            totals,
            summary,
            summary_artifact,
        })
    }

    /// Run one repository through the pipeline. Skipped repositories come
    /// back with empty counts.
    pub fn process_repository(&self, name: &str, path: &Path) -> Result<(Outcome, BucketCounts)> {
        self.say(format!("Processing repository: {}", style(name).bold()));

        let raw = self.extractor.extract(path, &self.author)?;
        debug!("{name}: {} raw commit dates", raw.len());
        if raw.is_empty() {
            self.skip(format!(
                "No commits found for author: {} in repository: {name}",
                self.author
            ));
            return Ok((Outcome::NoCommits, BucketCounts::new()));
        }

        let dates = dates_in_window(&raw, &self.window)?;
        if dates.is_empty() {
            self.skip(format!(
                "No commits found in the past 12 months for author: {} in repository: {name}",
                self.author
            ));
            return Ok((Outcome::NoCommitsInWindow, BucketCounts::new()));
        }

        let counts = bucket_dates(&dates);
        let grid = Grid::from_counts(&counts);
        let artifact = self.artifact_path(&format!("{name}_heatmap.png"))?;
        let title = format!("Git Changes in {name} by {}", self.author);
        self.renderer.render(&grid, &title, &artifact)?;
        debug!("{name}: wrote {}", artifact.display());

        Ok((Outcome::Reported { grid, artifact }, counts))
    }

    fn skip(&self, message: String) {
        debug!("{message}");
        self.say(style(message).yellow().to_string());
    }

    fn say(&self, message: String) {
        if !self.console {
            return;
        }
        if self.progress.is_hidden() {
            println!("{message}");
        } else {
            self.progress.println(message);
        }
    }

    fn artifact_path(&self, file_name: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(self.output_dir.join(file_name))
    }
}
