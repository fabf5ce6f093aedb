//! CLI command implementations

pub mod capture;
pub mod flip;
pub mod render;

use anyhow::{Context, Result};
use morph_core::{DVec2, PixelBuffer};
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    morph_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &PixelBuffer) -> Result<()> {
    morph_io::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Load guide points from path
pub fn load_points(path: &Path) -> Result<Vec<DVec2>> {
    morph_io::read_points(path)
        .with_context(|| format!("Failed to read guide points: {}", path.display()))
}

/// Save guide points to path
pub fn save_points(path: &Path, points: &[DVec2]) -> Result<()> {
    morph_io::write_points(path, points)
        .with_context(|| format!("Failed to write guide points: {}", path.display()))
}
