use chrono::{Month, NaiveDate, Weekday};
use gheat::git::LogExtractor;
use gheat::heat::{ErrorPolicy, Grid, Outcome, Pipeline, SUMMARY_FILE};
use gheat::model::BucketKey;
use gheat::render::Renderer;
use gheat::window::Window;
use gheat::{HeatError, Result};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[derive(Default)]
struct StubExtractor {
    logs: HashMap<PathBuf, Vec<String>>,
    broken: Vec<PathBuf>,
}

impl StubExtractor {
    fn with(mut self, repo: &str, dates: &[&str]) -> Self {
        self.logs.insert(
            PathBuf::from(repo),
            dates.iter().map(|d| d.to_string()).collect(),
        );
        self
    }

    fn broken(mut self, repo: &str) -> Self {
        self.broken.push(PathBuf::from(repo));
        self
    }
}

impl LogExtractor for StubExtractor {
    fn extract(&self, repo: &Path, _author: &str) -> Result<Vec<String>> {
        if self.broken.iter().any(|b| b == repo) {
            return Err(HeatError::GitRepo(format!("corrupt: {}", repo.display())));
        }
        Ok(self.logs.get(repo).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
struct RecordingRenderer {
    calls: RefCell<Vec<(String, PathBuf, Grid)>>,
}

impl Renderer for RecordingRenderer {
    fn render(&self, grid: &Grid, title: &str, path: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((title.to_string(), path.to_path_buf(), *grid));
        Ok(())
    }
}

fn window() -> Window {
    Window::trailing(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap())
}

fn key(weekday: Weekday, month: Month) -> BucketKey {
    BucketKey::new(weekday, month)
}

#[test]
fn two_repositories_feed_the_summary() {
    let out = tempdir().unwrap();
    // 2024-06-07, 2024-06-14, 2024-06-21 are Fridays, 2024-07-01 a Monday.
    let extractor = StubExtractor::default()
        .with("/src/alpha", &["2024-06-07", "2024-06-14", "2024-06-21"])
        .with("/src/beta", &["2024-06-07", "2024-06-28", "2024-07-01"]);
    let renderer = RecordingRenderer::default();

    let report = Pipeline::new(&extractor, &renderer, "dev@example.com", out.path())
        .with_window(window())
        .run(["/src/alpha", "/src/beta"])
        .unwrap();

    let summary = report.summary.expect("summary grid");
    assert_eq!(summary.get(&key(Weekday::Fri, Month::June)), 5);
    assert_eq!(summary.get(&key(Weekday::Mon, Month::July)), 1);
    assert_eq!(summary.total(), 6);
    assert_eq!(report.totals.total(), 6);
    assert_eq!(report.summary_artifact, Some(out.path().join(SUMMARY_FILE)));

    let calls = renderer.calls.borrow();
    let titles: Vec<&str> = calls.iter().map(|(t, _, _)| t.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Git Changes in alpha by dev@example.com",
            "Git Changes in beta by dev@example.com",
            "Summary of Git Changes Across All Repositories by dev@example.com",
        ]
    );
    assert_eq!(calls[0].1, out.path().join("alpha_heatmap.png"));
    assert_eq!(calls[1].1, out.path().join("beta_heatmap.png"));
    assert_eq!(calls[2].2, summary);

    let per_repo: u64 = report
        .repositories
        .iter()
        .map(|r| match &r.outcome {
            Outcome::Reported { grid, .. } => grid.total(),
            _ => 0,
        })
        .sum();
    assert_eq!(per_repo, summary.total());
}

#[test]
fn repository_grid_counts_only_window_commits() {
    let out = tempdir().unwrap();
    let extractor =
        StubExtractor::default().with("/src/alpha", &["2024-07-15", "2019-07-15", "2024-07-16"]);
    let renderer = RecordingRenderer::default();

    let report = Pipeline::new(&extractor, &renderer, "dev", out.path())
        .with_window(window())
        .run(["/src/alpha"])
        .unwrap();

    match &report.repositories[0].outcome {
        Outcome::Reported { grid, artifact } => {
            assert_eq!(grid.total(), 2);
            assert_eq!(grid.get(&key(Weekday::Mon, Month::July)), 1);
            assert_eq!(grid.get(&key(Weekday::Tue, Month::July)), 1);
            assert_eq!(artifact, &out.path().join("alpha_heatmap.png"));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn no_commits_contributes_nothing() {
    let out = tempdir().unwrap();
    let extractor = StubExtractor::default();
    let renderer = RecordingRenderer::default();

    let report = Pipeline::new(&extractor, &renderer, "dev", out.path())
        .with_window(window())
        .run(["/src/empty"])
        .unwrap();

    assert_eq!(report.repositories[0].outcome, Outcome::NoCommits);
    assert_eq!(report.repositories[0].name, "empty");
    assert!(report.totals.is_empty());
    assert_eq!(report.summary, None);
    assert_eq!(report.summary_artifact, None);
    assert!(renderer.calls.borrow().is_empty());
}

#[test]
fn commits_outside_window_contribute_nothing() {
    let out = tempdir().unwrap();
    let extractor = StubExtractor::default().with("/src/old", &["2020-01-01", "2023-08-05"]);
    let renderer = RecordingRenderer::default();

    let report = Pipeline::new(&extractor, &renderer, "dev", out.path())
        .with_window(window())
        .run(["/src/old"])
        .unwrap();

    assert_eq!(report.repositories[0].outcome, Outcome::NoCommitsInWindow);
    assert_eq!(report.summary, None);
    assert!(renderer.calls.borrow().is_empty());
}

#[test]
fn skipped_repositories_do_not_block_the_summary() {
    let out = tempdir().unwrap();
    let extractor = StubExtractor::default()
        .with("/src/old", &["2020-01-01"])
        .with("/src/live", &["2024-07-31"]);
    let renderer = RecordingRenderer::default();

    let report = Pipeline::new(&extractor, &renderer, "dev", out.path())
        .with_window(window())
        .run(["/src/empty", "/src/old", "/src/live"])
        .unwrap();

    assert_eq!(report.count("no_commits"), 1);
    assert_eq!(report.count("no_commits_in_window"), 1);
    assert_eq!(report.count("reported"), 1);
    assert_eq!(report.summary.map(|g| g.total()), Some(1));
    assert_eq!(renderer.calls.borrow().len(), 2);
}

#[test]
fn fail_fast_aborts_on_first_failure() {
    let out = tempdir().unwrap();
    let extractor = StubExtractor::default()
        .with("/src/alpha", &["2024-07-31"])
        .broken("/src/bad");
    let renderer = RecordingRenderer::default();

    let err = Pipeline::new(&extractor, &renderer, "dev", out.path())
        .with_window(window())
        .run(["/src/alpha", "/src/bad", "/src/gamma"])
        .unwrap_err();

    match err {
        HeatError::Repository { name, source } => {
            assert_eq!(name, "bad");
            assert!(matches!(*source, HeatError::GitRepo(_)));
        }
        other => panic!("unexpected error {other:?}"),
    }
    // alpha rendered before the failure, the summary never was.
    assert_eq!(renderer.calls.borrow().len(), 1);
}

#[test]
fn continue_on_error_records_failures() {
    let out = tempdir().unwrap();
    let extractor = StubExtractor::default()
        .with("/src/alpha", &["2024-07-31"])
        .with("/src/garbled", &["2024-07-31", "not-a-date"])
        .broken("/src/bad");
    let renderer = RecordingRenderer::default();

    let report = Pipeline::new(&extractor, &renderer, "dev", out.path())
        .with_window(window())
        .with_policy(ErrorPolicy::ContinueOnError)
        .run(["/src/bad", "/src/garbled", "/src/alpha"])
        .unwrap();

    assert_eq!(report.count("failed"), 2);
    assert!(matches!(
        &report.repositories[1].outcome,
        Outcome::Failed { error } if error.contains("not-a-date")
    ));
    assert_eq!(report.summary.map(|g| g.total()), Some(1));
}

#[test]
fn malformed_date_fails_the_run_by_default() {
    let out = tempdir().unwrap();
    let extractor = StubExtractor::default().with("/src/garbled", &["31/07/2024"]);
    let renderer = RecordingRenderer::default();

    let err = Pipeline::new(&extractor, &renderer, "dev", out.path())
        .with_window(window())
        .run(["/src/garbled"])
        .unwrap_err();

    assert!(matches!(
        err,
        HeatError::Repository { ref source, .. } if matches!(**source, HeatError::InvalidDate(_))
    ));
}

#[test]
fn summary_is_independent_of_repository_order() {
    let extractor = StubExtractor::default()
        .with("/src/a", &["2024-07-01", "2024-05-05"])
        .with("/src/b", &["2024-07-01"])
        .with("/src/c", &["2024-02-29", "2024-05-12"]);

    let orders = [
        ["/src/a", "/src/b", "/src/c"],
        ["/src/c", "/src/a", "/src/b"],
        ["/src/b", "/src/c", "/src/a"],
    ];

    let summaries: Vec<Grid> = orders
        .iter()
        .map(|order| {
            let out = tempdir().unwrap();
            let renderer = RecordingRenderer::default();
            Pipeline::new(&extractor, &renderer, "dev", out.path())
                .with_window(window())
                .run(order)
                .unwrap()
                .summary
                .unwrap()
        })
        .collect();

    assert_eq!(summaries[0], summaries[1]);
    assert_eq!(summaries[1], summaries[2]);
    assert_eq!(summaries[0].total(), 5);
}
