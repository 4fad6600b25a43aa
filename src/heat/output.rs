use super::grid::{Grid, COLUMNS};
use super::pipeline::{Outcome, Report};
use crate::model::{
    month_name, weekday_name, RepositoryOutput, ReportOutput, WindowOutput, MONTHS, SCHEMA_VERSION,
    WEEKDAYS,
};
use crate::window::WINDOW_DAYS;
use anyhow::Result;
use chrono::Utc;
use console::style;

pub fn to_output(report: &Report, author: &str) -> ReportOutput {
    let repositories = report
        .repositories
        .iter()
        .map(|r| {
            let (grid, artifact, error) = match &r.outcome {
                Outcome::Reported { grid, artifact } => {
                    (Some(grid), Some(artifact.to_string_lossy().to_string()), None)
                }
                Outcome::Failed { error } => (None, None, Some(error.clone())),
                Outcome::NoCommits | Outcome::NoCommitsInWindow => (None, None, None),
            };
            RepositoryOutput {
                name: r.name.clone(),
                path: r.path.to_string_lossy().to_string(),
                outcome: r.outcome.label().to_string(),
                commit_count: grid.map_or(0, Grid::total),
                artifact,
                error,
                grid: grid.map(Grid::to_rows),
            }
        })
        .collect();

    ReportOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        author: author.to_string(),
        window: WindowOutput {
            start: report.window.start,
            end: report.window.end,
            days: WINDOW_DAYS,
        },
        weekdays: WEEKDAYS.iter().map(|w| weekday_name(*w).to_string()).collect(),
        months: MONTHS.iter().map(|m| month_name(*m).to_string()).collect(),
        repositories,
        summary: report.summary.as_ref().map(Grid::to_rows),
        summary_artifact: report
            .summary_artifact
            .as_ref()
            .map(|p| p.to_string_lossy().to_string()),
    }
}

pub fn output_json(report: &Report, author: &str) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&to_output(report, author))?);
    Ok(())
}

pub fn output_summary(report: &Report) -> Result<()> {
    println!();
    println!("Processed {} repositories.", report.repositories.len());
    println!(
        "  {} reported, {} without commits, {} without commits in window, {} failed",
        style(report.count("reported")).green(),
        style(report.count("no_commits")).dim(),
        style(report.count("no_commits_in_window")).dim(),
        style(report.count("failed")).red()
    );

    for r in &report.repositories {
        if let Outcome::Failed { error } = &r.outcome {
            println!("  {} {}: {}", style("✗").red(), r.name, error);
        }
    }

    let Some(grid) = &report.summary else {
        println!("No data to display");
        return Ok(());
    };

    println!(
        "\n{} ({} to {})",
        style("Commit Activity Heatmap").bold(),
        report.window.start,
        report.window.end
    );

    let max = grid.max();
    let header: String = Grid::column_names()
        .map(|m| format!("{:>4}", m.chars().take(3).collect::<String>()))
        .collect();
    println!("{:<10}{header}", "");
    println!("{}", "─".repeat(10 + 4 * COLUMNS));

    for (weekday, counts) in grid.rows() {
        let cells: String = counts
            .iter()
            .map(|count| format!("{:>4}", intensity_char(*count, max)))
            .collect();
        let total: u64 = counts.iter().sum();
        println!("{weekday:<10}{} {:>5}", style(cells).green(), total);
    }

    println!("\n{}", style("Legend").bold());
    println!("  {} commits intensity (max {max})", style("▁▃▅▇█").green());
    if let Some(path) = &report.summary_artifact {
        println!("  summary written to {}", style(path.display()).dim());
    }

    Ok(())
}

fn intensity_char(count: u64, max: u64) -> &'static str {
    if count == 0 || max == 0 {
        return "·";
    }
    match ((count as f64 / max as f64) * 5.0) as u32 {
        0 | 1 => "▁",
        2 => "▃",
        3 => "▅",
        4 => "▇",
        _ => "█",
    }
}
