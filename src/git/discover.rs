use crate::error::{HeatError, Result};
use ignore::WalkBuilder;
use log::{debug, warn};
use std::path::{Component, Path, PathBuf};

const GIT_DIR: &str = ".git";

/// Every directory under `root` (including `root`) that holds a `.git` entry.
///
/// `.git` directories are never entered, but work trees are, so a repository
/// nested inside another one is reported on its own. Directories that cannot
/// be read are logged and skipped.
pub fn find_repositories<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(HeatError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Not a directory: {}", root.display()),
        )));
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| entry.file_name() != GIT_DIR)
        .build();

    let mut repos = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_dir()) {
            continue;
        }
        if entry.path().join(GIT_DIR).exists() {
            debug!("found repository at {}", entry.path().display());
            repos.push(entry.into_path());
        }
    }

    Ok(repos)
}

/// Final path component used to name a repository's artifact.
pub fn repository_name(path: &Path) -> String {
    let named = match path.components().next_back() {
        Some(Component::Normal(_)) => None,
        _ => path.canonicalize().ok(),
    };
    named
        .as_deref()
        .unwrap_or(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
