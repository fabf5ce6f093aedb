//! Integration tests for the line morphing crates.
//!
//! End-to-end checks across `morph-core`, `morph-ops` and `morph-io`:
//! the sampling and warp properties, the 2x2 reference scenario, and a
//! full render through files on disk.
