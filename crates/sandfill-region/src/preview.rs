//! Segmentation preview
//!
//! Paints each region in its current color and each remaining border in its
//! own color over opaque black.

use crate::error::RegionResult;
use crate::region::{BorderRegion, Region};
use sandfill_core::{Raster, RasterMut, Rgba};

/// Render regions and borders into a new raster.
///
/// # Errors
///
/// Returns an error if the size is zero or a pixel lies outside it.
pub fn render_preview(
    width: u32,
    height: u32,
    regions: &[Region],
    borders: &[BorderRegion],
) -> RegionResult<Raster> {
    let mut preview = RasterMut::new_filled(width, height, Rgba::BLACK)?;
    for region in regions {
        for &p in &region.pixels {
            preview.set_at(p, region.color)?;
        }
    }
    for border in borders {
        for &p in &border.pixels {
            preview.set_at(p, border.color)?;
        }
    }
    Ok(preview.into())
}
