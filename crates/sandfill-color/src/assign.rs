//! Nearest-palette color assignment

use crate::error::{ColorError, ColorResult};
use crate::palette::NamedPalette;
use sandfill_core::Rgba;
use sandfill_region::Region;

/// Find the palette entry closest to `color` in RGB space.
///
/// Ties go to the entry that comes first in palette order. Returns `None`
/// for an empty palette.
pub fn nearest_color<P: NamedPalette + ?Sized>(palette: &P, color: Rgba) -> Option<(String, Rgba)> {
    let mut best: Option<(String, Rgba, u32)> = None;
    for name in palette.names() {
        let Some(candidate) = palette.color_by_name(&name) else {
            continue;
        };
        let d = color.distance_sq(candidate);
        if best.as_ref().is_none_or(|(_, _, bd)| d < *bd) {
            best = Some((name, candidate, d));
        }
    }
    best.map(|(name, c, _)| (name, c))
}

/// Replace a region's color with the nearest palette entry.
///
/// The region gets the entry's exact color and name.
///
/// # Errors
///
/// Returns [`ColorError::EmptyPalette`] if the palette has no colors.
pub fn assign_nearest_color<P: NamedPalette + ?Sized>(
    region: &mut Region,
    palette: &P,
) -> ColorResult<()> {
    let (name, color) = nearest_color(palette, region.color).ok_or(ColorError::EmptyPalette)?;
    log::trace!("{} -> {} ({:?})", region.name, name, color);
    region.color = color;
    region.color_name = Some(name);
    Ok(())
}

/// Assign the nearest palette color to every region.
///
/// # Errors
///
/// Returns [`ColorError::EmptyPalette`] before touching any region if the
/// palette has no colors.
pub fn assign_colors<P: NamedPalette + ?Sized>(
    regions: &mut [Region],
    palette: &P,
) -> ColorResult<()> {
    if palette.names().is_empty() {
        return Err(ColorError::EmptyPalette);
    }
    for region in regions.iter_mut() {
        assign_nearest_color(region, palette)?;
    }
    log::debug!("assigned palette colors to {} regions", regions.len());
    Ok(())
}
