//! sandfill-test - Regression test framework for sandfill
//!
//! Each regression test creates a [`RegParams`], records comparisons with
//! `compare_values` / `compare_rasters` / `compare_strings`, and asserts on
//! `cleanup()`.
//!
//! # Usage
//!
//! ```ignore
//! use sandfill_test::RegParams;
//!
//! let mut rp = RegParams::new("segment");
//! rp.compare_values(64.0, region.pixels.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"; display mode
//!   writes intermediate rasters to `tests/regout`

mod error;
mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use fixtures::{framed_raster, raster_from_ascii, square_points};
pub use params::{RegParams, RegTestMode};

/// Route `log` output through the test harness.
///
/// Safe to call from every test; only the first call installs the logger.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // sandfill-test is at crates/sandfill-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
