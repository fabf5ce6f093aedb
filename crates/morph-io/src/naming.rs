//! Derived file names.

use std::path::{Path, PathBuf};

/// Extension of guide point files.
pub const LINES_EXTENSION: &str = "dat";

/// Guide point file that belongs to `image`: same path, `.dat` extension.
///
/// ```rust
/// use morph_io::naming::lines_path_for;
/// use std::path::Path;
///
/// assert_eq!(lines_path_for("faces/alice.png"), Path::new("faces/alice.dat"));
/// ```
pub fn lines_path_for<P: AsRef<Path>>(image: P) -> PathBuf {
    image.as_ref().with_extension(LINES_EXTENSION)
}

/// Output path of frame `index` (zero-based): `<prefix><index + 1>.png`.
///
/// ```rust
/// use morph_io::naming::frame_path;
/// use std::path::Path;
///
/// assert_eq!(frame_path("out/morph", 0), Path::new("out/morph1.png"));
/// ```
pub fn frame_path(prefix: &str, index: usize) -> PathBuf {
    PathBuf::from(format!("{prefix}{}.png", index + 1))
}
