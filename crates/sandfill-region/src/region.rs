//! Region and border entities

use sandfill_core::{Point, Rgba};

/// A maximal 4-connected set of fillable pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Sequential id in discovery order
    pub id: u32,
    /// Display name
    pub name: String,
    /// Member pixels, unique, in discovery order
    pub pixels: Vec<Point>,
    /// Assigned color (provisional until a palette is applied)
    pub color: Rgba,
    /// Palette entry name once a palette is applied
    pub color_name: Option<String>,
}

impl Region {
    /// Create a region with the default name `Region {id + 1}`.
    pub fn new(id: u32, pixels: Vec<Point>, color: Rgba) -> Self {
        Self {
            id,
            name: format!("Region {}", id + 1),
            pixels,
            color,
            color_name: None,
        }
    }

    /// Number of member pixels
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the region has no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Bounding box as `(min_x, min_y, max_x, max_y)`
    pub fn bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let first = self.pixels.first()?;
        Some(self.pixels.iter().fold(
            (first.x, first.y, first.x, first.y),
            |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
        ))
    }

    /// Mean x of all pixels and the lowest row.
    ///
    /// This is the origin of the weighted reveal.
    pub fn bottom_center(&self) -> Option<(f32, u32)> {
        let (_, min_y, _, _) = self.bounds()?;
        let sum: f64 = self.pixels.iter().map(|p| p.x as f64).sum();
        Some(((sum / self.pixels.len() as f64) as f32, min_y))
    }

    /// Center of the topmost row, the point a pour aims at.
    ///
    /// The x coordinate is the member pixel of the top row closest to the
    /// row's mean, so it always lies inside the region.
    pub fn top_center(&self) -> Option<Point> {
        let (_, _, _, max_y) = self.bounds()?;
        let mut top: Vec<u32> = self
            .pixels
            .iter()
            .filter(|p| p.y == max_y)
            .map(|p| p.x)
            .collect();
        top.sort_unstable();
        let mean = top.iter().map(|&x| x as f64).sum::<f64>() / top.len() as f64;
        let x = top
            .iter()
            .copied()
            .min_by(|&a, &b| (a as f64 - mean).abs().total_cmp(&(b as f64 - mean).abs()))?;
        Some(Point::new(x, max_y))
    }
}

/// A connected component of non-fillable, non-background pixels
#[derive(Debug, Clone, PartialEq)]
pub struct BorderRegion {
    /// Display name
    pub name: String,
    /// Member pixels in discovery order
    pub pixels: Vec<Point>,
    /// Color the retained pixels keep
    pub color: Rgba,
    /// Fraction of the border to hand to neighboring regions, in `[0, 1]`
    pub shrink_amount: f32,
}

impl BorderRegion {
    /// Number of member pixels
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(points: &[(u32, u32)]) -> Region {
        Region::new(0, points.iter().map(|&p| p.into()).collect(), Rgba::WHITE)
    }

    #[test]
    fn test_default_name() {
        assert_eq!(Region::new(4, vec![], Rgba::WHITE).name, "Region 5");
    }

    #[test]
    fn test_bounds_and_centers() {
        let r = region(&[(1, 0), (2, 0), (3, 0), (2, 1), (3, 1)]);
        assert_eq!(r.bounds(), Some((1, 0, 3, 1)));
        assert_eq!(r.bottom_center(), Some((2.2, 0)));
        // Top row is x = 2, 3 with mean 2.5; ties go to the smaller x
        assert_eq!(r.top_center(), Some(Point::new(2, 1)));
    }

    #[test]
    fn test_empty_region_has_no_center() {
        let r = region(&[]);
        assert!(r.is_empty());
        assert_eq!(r.bounds(), None);
        assert_eq!(r.top_center(), None);
    }
}
