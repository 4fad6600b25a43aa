pub mod command;
pub mod discover;
pub mod repo;

pub use command::GitCliExtractor;
pub use discover::{find_repositories, repository_name};
pub use repo::GixExtractor;

use crate::error::Result;
use std::path::Path;

/// Source of raw commit dates for one author in one repository.
///
/// Each returned line starts with a `YYYY-MM-DD` date. Order is unspecified
/// and an author without commits yields an empty vector.
pub trait LogExtractor {
    fn extract(&self, repo: &Path, author: &str) -> Result<Vec<String>>;
}
