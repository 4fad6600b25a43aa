pub mod cli;
pub mod error;
pub mod git;
pub mod heat;
pub mod model;
pub mod render;
pub mod window;

pub use error::{HeatError, Result};
