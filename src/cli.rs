use crate::git::{find_repositories, GitCliExtractor, GixExtractor, LogExtractor};
use crate::heat::{output_json, output_summary, ErrorPolicy, Pipeline};
use crate::render::png::{PngRenderer, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "gheat")]
#[command(about = "Weekday-by-month commit heatmaps for every git repository under a directory")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Directory to scan for git repositories")]
    pub repo_dir: PathBuf,

    #[arg(help = "Author name or email, matched like `git log --author`")]
    pub author: String,

    #[arg(long, help = "Directory for the PNG heatmaps [default: directory of the executable]")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, value_enum, help = "How commit dates are read", default_value_t = Backend::Gix)]
    pub backend: Backend,

    #[arg(long, help = "Keep going when a repository fails and report failures at the end")]
    pub continue_on_error: bool,

    #[arg(long, help = "Print the report as JSON")]
    pub json: bool,

    #[arg(long, help = "Image width in pixels", default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    #[arg(long, help = "Image height in pixels", default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Read the object database in-process
    Gix,
    /// Run the `git` executable
    Git,
}

impl Cli {
    /// Parse arguments; usage errors exit with status 1.
    pub fn parse() -> Self {
        match <Self as Parser>::try_parse() {
            Ok(cli) => cli,
            Err(e) => match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
                _ => {
                    let _ = e.print();
                    std::process::exit(1);
                }
            },
        }
    }

    pub fn execute(self) -> Result<()> {
        init_logging(self.verbose);

        let output_dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => default_output_dir()?,
        };
        debug!("writing heatmaps to {}", output_dir.display());

        let repos = find_repositories(&self.repo_dir)
            .with_context(|| format!("Failed to scan {}", self.repo_dir.display()))?;

        let extractor: Box<dyn LogExtractor> = match self.backend {
            Backend::Gix => Box::new(GixExtractor::new()),
            Backend::Git => Box::new(GitCliExtractor::new()),
        };
        let renderer = PngRenderer::new(self.width, self.height);
        let policy = if self.continue_on_error {
            ErrorPolicy::ContinueOnError
        } else {
            ErrorPolicy::FailFast
        };

        let progress = if self.json {
            ProgressBar::hidden()
        } else {
            println!("Analyzing Git logs for author: {}", self.author);
            scanning_spinner(repos.len())
        };

        let pipeline = Pipeline::new(extractor.as_ref(), &renderer, &self.author, output_dir)
            .with_policy(policy)
            .with_progress(progress.clone())
            .with_console(!self.json);

        let report = pipeline.run(&repos);
        progress.finish_and_clear();
        let report = report.context("Failed to build heatmaps")?;

        if self.json {
            output_json(&report, &self.author)?;
        } else {
            output_summary(&report)?;
        }

        Ok(())
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).try_init();
}

fn default_output_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    Ok(exe
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".")))
}

fn scanning_spinner(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} Scanning repositories [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
