//! Raster fixtures shared by the regression tests

use crate::error::{TestError, TestResult};
use sandfill_core::{Point, Raster, RasterMut, Rgba};

/// A white `width` x `height` raster with a one-pixel black frame.
pub fn framed_raster(width: u32, height: u32) -> TestResult<Raster> {
    let mut raster = RasterMut::new_filled(width, height, Rgba::WHITE)?;
    for y in 0..height {
        for x in 0..width {
            if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                raster.set_rgba(x, y, Rgba::BLACK)?;
            }
        }
    }
    Ok(raster.into())
}

/// Build a raster from text rows, top row first.
///
/// `.` is white, `#` is black ink, a space is transparent, and `r`, `g`,
/// `b` are pure red, green and blue.
///
/// # Errors
///
/// Returns [`TestError::Fixture`] on ragged rows or unknown characters.
pub fn raster_from_ascii(rows: &[&str]) -> TestResult<Raster> {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
    let mut raster = RasterMut::new_filled(width, height, Rgba::TRANSPARENT)?;
    for (row, line) in rows.iter().enumerate() {
        if line.chars().count() as u32 != width {
            return Err(TestError::Fixture(format!("row {} has a different width", row)));
        }
        let y = height - 1 - row as u32;
        for (x, ch) in line.chars().enumerate() {
            let color = match ch {
                '.' => Rgba::WHITE,
                '#' => Rgba::BLACK,
                ' ' => Rgba::TRANSPARENT,
                'r' => Rgba::rgb(255, 0, 0),
                'g' => Rgba::rgb(0, 255, 0),
                'b' => Rgba::rgb(0, 0, 255),
                other => {
                    return Err(TestError::Fixture(format!("unknown pixel '{}'", other)));
                }
            };
            raster.set_rgba(x as u32, y, color)?;
        }
    }
    Ok(raster.into())
}

/// The points of a `size` x `size` square with lower-left corner `(x0, y0)`,
/// in row-major order.
pub fn square_points(x0: u32, y0: u32, size: u32) -> Vec<Point> {
    (y0..y0 + size)
        .flat_map(|y| (x0..x0 + size).map(move |x| Point::new(x, y)))
        .collect()
}
