use super::LogExtractor;
use crate::error::{HeatError, Result};
use chrono::DateTime;
use gix::ObjectId;
use log::debug;
use regex::Regex;
use std::collections::{HashSet, VecDeque};
use std::path::Path;

/// Reads commits straight from the object database with gix.
///
/// Walks everything reachable from `HEAD` and from every reference, the same
/// set `git log --all` visits, and reports each matching commit once. The
/// author is a regular expression tested against `Name <email>`, as with
/// `git log --author`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GixExtractor;

impl GixExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LogExtractor for GixExtractor {
    fn extract(&self, repo_path: &Path, author: &str) -> Result<Vec<String>> {
        let pattern = Regex::new(author)?;
        let repo = gix::open(repo_path)?;
        let tips = reference_tips(&repo)?;
        debug!("{}: {} reference tips", repo_path.display(), tips.len());

        let mut dates = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = tips.into_iter().collect();

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }
            // Parents past a shallow boundary are not in the object database.
            if !repo.has_object(commit_id) {
                debug!("{}: commit {commit_id} not present, skipping", repo_path.display());
                continue;
            }

            let commit = repo.find_commit(commit_id)?;
            for pid in commit.parent_ids() {
                stack.push_back(pid.into());
            }

            let signature = commit.author()?;
            let ident = format!("{} <{}>", signature.name, signature.email);
            if !pattern.is_match(&ident) {
                continue;
            }

            let time = commit.time()?;
            let local = DateTime::from_timestamp(time.seconds + i64::from(time.offset), 0)
                .ok_or_else(|| HeatError::InvalidDate(format!("Invalid timestamp: {}", time.seconds)))?;
            dates.push(local.date_naive().format("%Y-%m-%d").to_string());
        }

        Ok(dates)
    }
}

/// Commit ids that `HEAD` and all references peel to. Refs that end at a
/// non-commit object (a tagged tree or blob) are skipped.
fn reference_tips(repo: &gix::Repository) -> Result<Vec<ObjectId>> {
    let mut tips = Vec::new();

    if let Ok(id) = repo.head_id() {
        tips.push(id.detach());
    }

    let platform = repo
        .references()
        .map_err(|e| HeatError::GitRepo(format!("Cannot read references: {e}")))?;
    let all = platform
        .all()
        .map_err(|e| HeatError::GitRepo(format!("Cannot iterate references: {e}")))?;

    for reference in all {
        let mut reference =
            reference.map_err(|e| HeatError::GitRepo(format!("Invalid reference: {e}")))?;
        let id = match reference.peel_to_id_in_place() {
            Ok(id) => id,
            Err(e) => {
                debug!("skipping reference {}: {e}", reference.name().as_bstr());
                continue;
            }
        };
        if id.object()?.try_into_commit().is_ok() {
            tips.push(id.detach());
        }
    }

    Ok(tips)
}
