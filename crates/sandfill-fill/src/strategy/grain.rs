//! Falling-grain automaton
//!
//! The region is cut into square blocks of `unit` pixels; a block belongs
//! to the fill mask when it holds at least one region pixel, and only
//! region pixels are ever painted.
//!
//! Grains enter at the spawn block (the top-row mask block nearest that
//! row's mean x) and fall one block per step: straight down if free, else
//! diagonally down-left or down-right in random order. A grain that cannot
//! move leaves the active list; it rejoins when a block it could fall into
//! is vacated.
//!
//! Spawns and steps are independent clocks in simulated time
//! (`dt * simulation_speed`) and are interleaved in time order, spawns
//! first on ties. Spawning stops once `ceil(target * total)` blocks are
//! occupied. When the spawn block is jammed with nothing left in motion,
//! the remaining quota is filled bottom-up in one go, so regions with
//! overhangs the grains cannot reach still complete.

use crate::config::GrainOptions;
use crate::error::FillResult;
use crate::state::FillState;
use log::{debug, trace};
use rand::{Rng, RngExt};
use sandfill_color::vary_rgb;
use sandfill_core::{Point, RasterMut, Rgba};
use sandfill_region::Region;

/// Block decomposition of a region
#[derive(Debug, Clone)]
pub struct BlockGrid {
    cols: u32,
    rows: u32,
    mask: Vec<bool>,
    pixels: Vec<Vec<Point>>,
    total: usize,
}

impl BlockGrid {
    /// Cut `region` into blocks of `unit` pixels.
    ///
    /// Blocks are aligned to the raster origin. Returns `None` for an empty
    /// region or a zero unit.
    pub fn from_region(region: &Region, unit: u32) -> Option<Self> {
        if unit == 0 {
            return None;
        }
        let (min_x, min_y, max_x, max_y) = region.bounds()?;
        let (bx0, by0) = (min_x / unit, min_y / unit);
        let cols = max_x / unit - bx0 + 1;
        let rows = max_y / unit - by0 + 1;
        let len = cols as usize * rows as usize;

        let mut mask = vec![false; len];
        let mut pixels = vec![Vec::new(); len];
        for &p in &region.pixels {
            let i = Point::new(p.x / unit - bx0, p.y / unit - by0).index(cols);
            mask[i] = true;
            pixels[i].push(p);
        }
        let total = mask.iter().filter(|&&m| m).count();
        Some(Self {
            cols,
            rows,
            mask,
            pixels,
            total,
        })
    }

    /// Grid width in blocks
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Grid height in blocks
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of cells, mask or not
    pub fn len(&self) -> usize {
        self.mask.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Number of mask blocks
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether block `i` belongs to the mask
    pub fn in_mask(&self, i: usize) -> bool {
        self.mask.get(i).copied().unwrap_or(false)
    }

    /// Region pixels inside block `i`
    pub fn block_pixels(&self, i: usize) -> &[Point] {
        self.pixels.get(i).map(Vec::as_slice).unwrap_or(&[])
    }

    fn index(&self, bx: u32, by: u32) -> usize {
        Point::new(bx, by).index(self.cols)
    }

    /// The block grains enter at.
    ///
    /// Top row, mask block nearest the rounded mean x of the row's mask
    /// blocks; ties go to the smaller x.
    pub fn spawn_block(&self) -> Option<usize> {
        let top = self.rows.checked_sub(1)?;
        let xs: Vec<u32> = (0..self.cols)
            .filter(|&bx| self.mask[self.index(bx, top)])
            .collect();
        if xs.is_empty() {
            return None;
        }
        let mean = xs.iter().map(|&x| x as f64).sum::<f64>() / xs.len() as f64;
        let target = mean.round() as i64;
        let bx = xs
            .iter()
            .copied()
            .min_by_key(|&x| (x as i64 - target).abs())?;
        Some(self.index(bx, top))
    }
}

/// Grain automaton state for one region
#[derive(Debug)]
pub struct GrainStrategy {
    grid: BlockGrid,
    color: Rgba,
    variation: f32,
    occupied: Vec<bool>,
    occupied_count: usize,
    tracked: Vec<bool>,
    spawn: usize,
    speed: f64,
    spawn_interval: f64,
    step_interval: f64,
    clock: f64,
    next_spawn: f64,
    next_step: f64,
}

impl GrainStrategy {
    /// Bind the automaton to `region`.
    ///
    /// The returned [`FillState`] has one cell per grid block. Returns
    /// `None` when the region has no pixels.
    pub fn new(region: &Region, options: &GrainOptions) -> Option<(Self, FillState)> {
        let grid = BlockGrid::from_region(region, options.unit)?;
        let spawn = grid.spawn_block()?;
        let len = grid.len();
        let spawn_interval = 1.0 / options.spawn_rate as f64;
        let step_interval = 1.0 / options.effective_step_rate() as f64;
        let strategy = Self {
            grid,
            color: region.color,
            variation: options.color_variation,
            occupied: vec![false; len],
            occupied_count: 0,
            tracked: vec![false; len],
            spawn,
            speed: options.simulation_speed as f64,
            spawn_interval,
            step_interval,
            clock: 0.0,
            next_spawn: spawn_interval,
            next_step: step_interval,
        };
        Some((strategy, FillState::new(region.id, len)))
    }

    /// The block decomposition
    pub fn grid(&self) -> &BlockGrid {
        &self.grid
    }

    /// Number of occupied blocks
    pub fn occupied_count(&self) -> usize {
        self.occupied_count
    }

    /// Raise the target; requests below the current target are ignored.
    pub fn request(&mut self, fill: &mut FillState, target: f32) {
        let target = target.clamp(0.0, 1.0);
        if target < fill.target_progress {
            debug!(
                "region {}: grain fill ignores lower target {} (at {})",
                fill.region_id, target, fill.target_progress
            );
            return;
        }
        fill.target_progress = target;
    }

    /// Whether grains are moving or could still be spawned.
    pub fn is_busy(&self, fill: &FillState) -> bool {
        !fill.active_particles.is_empty()
            || self.occupied_count < self.quota(fill.target_progress)
    }

    fn quota(&self, target: f32) -> usize {
        ((target as f64 * self.grid.total as f64).ceil() as usize).min(self.grid.total)
    }

    /// Run all spawn and step events due within `dt` seconds.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        fill: &mut FillState,
        staging: &mut RasterMut,
        rng: &mut R,
        dt: f32,
    ) -> FillResult<()> {
        let end = self.clock + dt as f64 * self.speed;
        let quota = self.quota(fill.target_progress);
        loop {
            let idle = fill.active_particles.is_empty()
                && (self.occupied_count >= quota || self.occupied[self.spawn]);
            if idle {
                break;
            }
            if self.next_spawn.min(self.next_step) > end {
                break;
            }
            if self.next_spawn <= self.next_step {
                self.spawn_grain(fill, staging, rng, quota)?;
                self.next_spawn += self.spawn_interval;
            } else {
                self.step(fill, staging, rng)?;
                self.next_step += self.step_interval;
            }
        }
        // Idle time does not bank events
        self.clock = end;
        self.next_spawn = self.next_spawn.max(end);
        self.next_step = self.next_step.max(end);

        if fill.active_particles.is_empty()
            && self.occupied[self.spawn]
            && self.occupied_count < quota
        {
            debug!(
                "region {}: spawn jammed at {}/{} blocks, topping off",
                fill.region_id, self.occupied_count, quota
            );
            self.top_off(fill, staging, rng, quota)?;
        }

        fill.current_progress = if self.occupied_count >= self.grid.total {
            1.0
        } else {
            (self.occupied_count as f32 / self.grid.total as f32).min(fill.target_progress)
        };
        Ok(())
    }

    fn spawn_grain<R: Rng + ?Sized>(
        &mut self,
        fill: &mut FillState,
        staging: &mut RasterMut,
        rng: &mut R,
        quota: usize,
    ) -> FillResult<()> {
        if self.occupied_count >= quota {
            return Ok(());
        }
        if self.occupied[self.spawn] {
            trace!("region {}: spawn block busy, grain dropped", fill.region_id);
            return Ok(());
        }
        self.occupy(self.spawn, fill, staging, rng)?;
        self.tracked[self.spawn] = true;
        fill.active_particles.push(self.spawn);
        Ok(())
    }

    fn step<R: Rng + ?Sized>(
        &mut self,
        fill: &mut FillState,
        staging: &mut RasterMut,
        rng: &mut R,
    ) -> FillResult<()> {
        let moving = std::mem::take(&mut fill.active_particles);
        let mut still_moving = Vec::with_capacity(moving.len());
        for from in moving {
            self.tracked[from] = false;
            let Some(to) = self.destination(from, rng) else {
                continue;
            };
            self.occupied[from] = false;
            self.occupied_count -= 1;
            let trail = vary_rgb(rng, self.color, self.variation);
            self.paint(from, trail, staging)?;
            self.occupy(to, fill, staging, rng)?;
            self.tracked[to] = true;
            still_moving.push(to);

            for above in self.above(from) {
                if self.occupied[above] && !self.tracked[above] {
                    self.tracked[above] = true;
                    still_moving.push(above);
                }
            }
        }
        fill.active_particles = still_moving;
        Ok(())
    }

    fn top_off<R: Rng + ?Sized>(
        &mut self,
        fill: &mut FillState,
        staging: &mut RasterMut,
        rng: &mut R,
        quota: usize,
    ) -> FillResult<()> {
        for i in 0..self.grid.len() {
            if self.occupied_count >= quota {
                break;
            }
            if self.grid.in_mask(i) && !self.occupied[i] {
                self.occupy(i, fill, staging, rng)?;
            }
        }
        Ok(())
    }

    fn occupy<R: Rng + ?Sized>(
        &mut self,
        block: usize,
        fill: &mut FillState,
        staging: &mut RasterMut,
        rng: &mut R,
    ) -> FillResult<()> {
        self.occupied[block] = true;
        self.occupied_count += 1;
        fill.settled_mask[block] = true;
        let color = vary_rgb(rng, self.color, self.variation);
        self.paint(block, color, staging)
    }

    fn paint(&self, block: usize, color: Rgba, staging: &mut RasterMut) -> FillResult<()> {
        for &p in self.grid.block_pixels(block) {
            staging.set_at(p, color)?;
        }
        Ok(())
    }

    fn is_free(&self, bx: u32, by: u32) -> bool {
        let i = self.grid.index(bx, by);
        self.grid.mask[i] && !self.occupied[i]
    }

    /// Where the grain at `from` falls next, if anywhere.
    fn destination<R: Rng + ?Sized>(&self, from: usize, rng: &mut R) -> Option<usize> {
        let Point { x: bx, y: by } = Point::from_index(from, self.grid.cols);
        let below = by.checked_sub(1)?;
        if self.is_free(bx, below) {
            return Some(self.grid.index(bx, below));
        }
        let left = bx.checked_sub(1);
        let right = (bx + 1 < self.grid.cols).then_some(bx + 1);
        let (first, second) = if rng.random_bool(0.5) {
            (left, right)
        } else {
            (right, left)
        };
        [first, second]
            .into_iter()
            .flatten()
            .find(|&x| self.is_free(x, below))
            .map(|x| self.grid.index(x, below))
    }

    /// Blocks whose grains could fall into `block`.
    fn above(&self, block: usize) -> impl Iterator<Item = usize> + use<> {
        let Point { x: bx, y: by } = Point::from_index(block, self.grid.cols);
        let cols = self.grid.cols;
        let rows = self.grid.rows;
        let up = by + 1;
        [Some(bx), bx.checked_sub(1), (bx + 1 < cols).then_some(bx + 1)]
            .into_iter()
            .flatten()
            .filter(move |_| up < rows)
            .map(move |x| Point::new(x, up).index(cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rect_region(x0: u32, y0: u32, w: u32, h: u32) -> Region {
        let pixels = (y0..y0 + h)
            .flat_map(|y| (x0..x0 + w).map(move |x| Point::new(x, y)))
            .collect();
        Region::new(0, pixels, Rgba::rgb(30, 90, 200))
    }

    #[test]
    fn test_grid_blocks() {
        let region = rect_region(3, 2, 5, 4);
        let grid = BlockGrid::from_region(&region, 2).unwrap();
        // x 3..=7 -> blocks 1..=3, y 2..=5 -> blocks 1..=2
        assert_eq!((grid.cols(), grid.rows()), (3, 2));
        assert_eq!(grid.total(), 6);
        // Block (0,0) covers x 2..=3, y 2..=3; only x = 3 is in the region
        assert_eq!(grid.block_pixels(0).len(), 2);
        assert_eq!(grid.block_pixels(4).len(), 4);
    }

    #[test]
    fn test_spawn_block_top_center() {
        let grid = BlockGrid::from_region(&rect_region(0, 0, 20, 20), 1).unwrap();
        // Mean x 9.5 rounds to 10
        assert_eq!(grid.spawn_block(), Some(19 * 20 + 10));
    }

    #[test]
    fn test_spawn_block_stays_in_mask() {
        // Two separated top pixels: mean x falls in the gap
        let mut pixels: Vec<Point> = (0..5).map(|x| Point::new(x, 0)).collect();
        pixels.push(Point::new(0, 1));
        pixels.push(Point::new(4, 1));
        let region = Region::new(0, pixels, Rgba::BLACK);
        let grid = BlockGrid::from_region(&region, 1).unwrap();
        let spawn = grid.spawn_block().unwrap();
        assert!(grid.in_mask(spawn));
        assert_eq!(spawn, 5);
    }

    #[test]
    fn test_single_column_stacks() {
        let region = rect_region(0, 0, 1, 5);
        let options = GrainOptions::new().with_spawn_rate(10.0);
        let (mut grain, mut fill) = GrainStrategy::new(&region, &options).unwrap();
        let mut staging = RasterMut::new_filled(1, 5, Rgba::WHITE).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        grain.request(&mut fill, 1.0);
        grain
            .advance(&mut fill, &mut staging, &mut rng, 0.1)
            .unwrap();
        // One spawn, then one step down
        assert_eq!(grain.occupied_count(), 1);
        assert_eq!(fill.active_particles, vec![3]);

        for _ in 0..40 {
            grain
                .advance(&mut fill, &mut staging, &mut rng, 0.1)
                .unwrap();
        }
        assert_eq!(fill.current_progress, 1.0);
        assert_eq!(fill.settled_count(), 5);
        assert!(fill.active_particles.is_empty());
        assert!(!grain.is_busy(&fill));
    }

    #[test]
    fn test_quota_limits_spawns() {
        let region = rect_region(0, 0, 4, 4);
        let (mut grain, mut fill) = GrainStrategy::new(&region, &GrainOptions::new()).unwrap();
        let mut staging = RasterMut::new_filled(4, 4, Rgba::WHITE).unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        grain.request(&mut fill, 0.3);
        for _ in 0..60 {
            grain
                .advance(&mut fill, &mut staging, &mut rng, 1.0 / 60.0)
                .unwrap();
        }
        // ceil(0.3 * 16) = 5
        assert_eq!(grain.occupied_count(), 5);
        assert_eq!(fill.current_progress, 0.3);

        grain.request(&mut fill, 0.1);
        assert_eq!(fill.target_progress, 0.3);
    }

    #[test]
    fn test_only_region_pixels_painted() {
        let region = rect_region(1, 0, 2, 2);
        let options = GrainOptions::new().with_unit(2);
        let (mut grain, mut fill) = GrainStrategy::new(&region, &options).unwrap();
        let mut staging = RasterMut::new_filled(4, 2, Rgba::WHITE).unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        grain.request(&mut fill, 1.0);
        grain.advance(&mut fill, &mut staging, &mut rng, 1.0).unwrap();
        assert_eq!(fill.current_progress, 1.0);
        assert_eq!(staging.get_rgba(0, 0), Some(Rgba::WHITE));
        assert_eq!(staging.get_rgba(3, 1), Some(Rgba::WHITE));
        assert_ne!(staging.get_rgba(1, 0), Some(Rgba::WHITE));
        assert_ne!(staging.get_rgba(2, 1), Some(Rgba::WHITE));
    }
}
