//! Per-pixel ownership grid
//!
//! Segmentation and border resolution keep regions and borders as point
//! lists; `OwnerMap` is the dense inverse used for O(1) neighbor lookups.

use crate::error::{RegionError, RegionResult};
use crate::region::{BorderRegion, Region};
use sandfill_core::Point;

/// Owner of one pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Owner {
    /// Not part of any region or border
    #[default]
    Unowned,
    /// Index into the region list
    Region(usize),
    /// Index into the border list
    Border(usize),
}

/// Dense label grid over a `width` x `height` raster
#[derive(Debug, Clone)]
pub struct OwnerMap {
    width: u32,
    height: u32,
    cells: Vec<Owner>,
}

impl OwnerMap {
    /// Create a grid with every cell unowned.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Owner::Unowned; width as usize * height as usize],
        }
    }

    /// Label every region and border pixel.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::PixelOutOfBounds`] if a pixel lies outside the
    /// grid.
    pub fn from_parts(
        width: u32,
        height: u32,
        regions: &[Region],
        borders: &[BorderRegion],
    ) -> RegionResult<Self> {
        let mut map = Self::new(width, height);
        for (i, region) in regions.iter().enumerate() {
            for &p in &region.pixels {
                map.try_set(p, Owner::Region(i))?;
            }
        }
        for (i, border) in borders.iter().enumerate() {
            for &p in &border.pixels {
                map.try_set(p, Owner::Border(i))?;
            }
        }
        Ok(map)
    }

    /// Grid width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Owner of `p`; out-of-bounds points are unowned.
    #[inline]
    pub fn get(&self, p: Point) -> Owner {
        if p.x < self.width && p.y < self.height {
            self.cells[p.index(self.width)]
        } else {
            Owner::Unowned
        }
    }

    /// Set the owner of an in-bounds point.
    ///
    /// Out-of-bounds points are ignored.
    #[inline]
    pub fn set(&mut self, p: Point, owner: Owner) {
        if p.x < self.width && p.y < self.height {
            let i = p.index(self.width);
            self.cells[i] = owner;
        }
    }

    fn try_set(&mut self, p: Point, owner: Owner) -> RegionResult<()> {
        if p.x >= self.width || p.y >= self.height {
            return Err(RegionError::PixelOutOfBounds {
                x: p.x,
                y: p.y,
                width: self.width,
                height: self.height,
            });
        }
        self.set(p, owner);
        Ok(())
    }

    /// The 4-neighbors of `p` in scan order `+x, -x, +y, -y`.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> {
        p.neighbors4(self.width, self.height)
    }

    /// The region owning the most 4-neighbors of `p`.
    ///
    /// Ties go to the region encountered first in neighbor scan order.
    /// Returns `None` if no neighbor belongs to a region.
    pub fn majority_region(&self, p: Point) -> Option<usize> {
        // At most four candidates, in first-seen order
        let mut counts: Vec<(usize, u32)> = Vec::with_capacity(4);
        for n in self.neighbors(p) {
            if let Owner::Region(r) = self.get(n) {
                match counts.iter_mut().find(|(id, _)| *id == r) {
                    Some((_, c)) => *c += 1,
                    None => counts.push((r, 1)),
                }
            }
        }
        let mut best: Option<(usize, u32)> = None;
        for (r, c) in counts {
            if best.is_none_or(|(_, bc)| c > bc) {
                best = Some((r, c));
            }
        }
        best.map(|(r, _)| r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandfill_core::Rgba;

    #[test]
    fn test_from_parts_labels() {
        let regions = vec![Region::new(0, vec![Point::new(0, 0)], Rgba::WHITE)];
        let borders = vec![BorderRegion {
            name: "Border 1".into(),
            pixels: vec![Point::new(1, 0)],
            color: Rgba::BLACK,
            shrink_amount: 0.0,
        }];
        let map = OwnerMap::from_parts(3, 1, &regions, &borders).unwrap();
        assert_eq!(map.get(Point::new(0, 0)), Owner::Region(0));
        assert_eq!(map.get(Point::new(1, 0)), Owner::Border(0));
        assert_eq!(map.get(Point::new(2, 0)), Owner::Unowned);
        assert_eq!(map.get(Point::new(7, 7)), Owner::Unowned);
    }

    #[test]
    fn test_out_of_bounds_pixel_rejected() {
        let regions = vec![Region::new(0, vec![Point::new(5, 0)], Rgba::WHITE)];
        assert!(OwnerMap::from_parts(3, 1, &regions, &[]).is_err());
    }

    #[test]
    fn test_majority_tie_break() {
        let mut map = OwnerMap::new(3, 3);
        // +x neighbor region 1, -x neighbor region 0: tie, +x seen first
        map.set(Point::new(2, 1), Owner::Region(1));
        map.set(Point::new(0, 1), Owner::Region(0));
        assert_eq!(map.majority_region(Point::new(1, 1)), Some(1));

        // A second region-0 neighbor breaks the tie
        map.set(Point::new(1, 2), Owner::Region(0));
        assert_eq!(map.majority_region(Point::new(1, 1)), Some(0));

        assert_eq!(map.majority_region(Point::new(2, 2)), None);
    }
}
