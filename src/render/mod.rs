pub mod font;
pub mod png;

pub use png::PngRenderer;

use crate::error::Result;
use crate::heat::Grid;
use std::path::Path;

/// Turns a grid into an image artifact at `path`.
pub trait Renderer {
    fn render(&self, grid: &Grid, title: &str, path: &Path) -> Result<()>;
}
