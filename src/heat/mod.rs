pub mod aggregate;
pub mod bucket;
pub mod grid;
pub mod output;
pub mod pipeline;

pub use aggregate::{merge, merge_all};
pub use bucket::bucket_dates;
pub use grid::Grid;
pub use output::{output_json, output_summary, to_output};
pub use pipeline::{ErrorPolicy, Outcome, Pipeline, Report, RepositoryResult, SUMMARY_FILE};
