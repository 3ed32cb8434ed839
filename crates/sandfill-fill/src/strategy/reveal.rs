//! Weighted-distance reveal
//!
//! Pixels are ranked by `|x - cx| + (y - y0) / steepness`, measured from
//! the region's bottom center `(cx, y0)`. Lower ranks appear first, so the
//! fill rises from the bottom and spreads sideways; a higher steepness
//! makes it rise faster.
//!
//! Each request animates from the current progress to the new target over
//! `fill_duration`. After `t` seconds the first `round(count * progress)`
//! pixels of the ranking are shown. Lowering the target hides the tail of
//! the ranking again.

use crate::config::RevealOptions;
use crate::error::FillResult;
use crate::state::FillState;
use rand::Rng;
use sandfill_color::vary_hsv;
use sandfill_core::{Point, RasterMut, Rgba};
use sandfill_region::Region;

/// Region pixels in reveal order.
///
/// The sort is stable: equal distances keep the region's pixel order.
pub fn reveal_order(region: &Region, steepness: f32) -> Vec<Point> {
    let Some((cx, y0)) = region.bottom_center() else {
        return Vec::new();
    };
    let mut ranked: Vec<(f32, Point)> = region
        .pixels
        .iter()
        .map(|&p| {
            let dx = (p.x as f32 - cx).abs();
            let dy = p.y.saturating_sub(y0) as f32;
            (dx + dy / steepness, p)
        })
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.into_iter().map(|(_, p)| p).collect()
}

#[derive(Debug, Clone, Copy)]
struct Animation {
    start: f32,
    target: f32,
    elapsed: f32,
}

/// Reveal state for one region
#[derive(Debug)]
pub struct RevealStrategy {
    order: Vec<Point>,
    color: Rgba,
    base: Rgba,
    options: RevealOptions,
    animation: Option<Animation>,
    revealed: usize,
}

impl RevealStrategy {
    /// Bind a reveal to `region`.
    ///
    /// `base` is the color hidden pixels are painted with when the target
    /// drops. The returned [`FillState`] has one cell per region pixel, in
    /// reveal order.
    pub fn new(region: &Region, base: Rgba, options: &RevealOptions) -> (Self, FillState) {
        let order = reveal_order(region, options.steepness);
        let state = FillState::new(region.id, order.len());
        let strategy = Self {
            order,
            color: region.color,
            base,
            options: options.clone(),
            animation: None,
            revealed: 0,
        };
        (strategy, state)
    }

    /// Pixels in the order they appear
    pub fn order(&self) -> &[Point] {
        &self.order
    }

    /// Number of pixels currently shown
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Whether an animation is running
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Start animating toward `target`, clamped to `[0, 1]`.
    pub fn request(&mut self, fill: &mut FillState, target: f32) {
        let target = target.clamp(0.0, 1.0);
        fill.target_progress = target;
        self.animation = Some(Animation {
            start: fill.current_progress,
            target,
            elapsed: 0.0,
        });
    }

    /// Advance the animation by `dt` seconds and repaint changed pixels.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        fill: &mut FillState,
        staging: &mut RasterMut,
        rng: &mut R,
        dt: f32,
    ) -> FillResult<()> {
        let Some(mut anim) = self.animation else {
            return Ok(());
        };
        anim.elapsed += dt;
        let t = (anim.elapsed / self.options.fill_duration).min(1.0);
        let progress = if t >= 1.0 {
            self.animation = None;
            anim.target
        } else {
            self.animation = Some(anim);
            anim.start + (anim.target - anim.start) * self.options.easing.apply(t)
        };
        fill.current_progress = progress;
        self.show(fill, staging, rng, progress)
    }

    fn show<R: Rng + ?Sized>(
        &mut self,
        fill: &mut FillState,
        staging: &mut RasterMut,
        rng: &mut R,
        progress: f32,
    ) -> FillResult<()> {
        let count = self.order.len();
        let n = if progress >= 1.0 {
            count
        } else {
            ((count as f32 * progress).round() as usize).min(count)
        };
        if n > self.revealed {
            for i in self.revealed..n {
                let color = vary_hsv(rng, self.color, self.options.color_variation);
                staging.set_at(self.order[i], color)?;
                fill.settled_mask[i] = true;
            }
        } else {
            for &p in &self.order[n..self.revealed] {
                staging.set_at(p, self.base)?;
            }
        }
        self.revealed = n;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn block_region(w: u32, h: u32) -> Region {
        let pixels = (0..h)
            .flat_map(|y| (0..w).map(move |x| Point::new(x, y)))
            .collect();
        Region::new(0, pixels, Rgba::rgb(200, 40, 40))
    }

    #[test]
    fn test_order_starts_bottom_center() {
        let region = block_region(5, 4);
        let order = reveal_order(&region, 2.0);
        assert_eq!(order.len(), 20);
        assert_eq!(order[0], Point::new(2, 0));
        // Two rows up costs as much as one column over at steepness 2
        let pos = |p: Point| order.iter().position(|&q| q == p).unwrap();
        assert!(pos(Point::new(2, 1)) < pos(Point::new(1, 0)));
        assert!(pos(Point::new(1, 0)) < pos(Point::new(2, 3)));
    }

    #[test]
    fn test_order_is_stable_for_ties() {
        let region = block_region(5, 1);
        let order = reveal_order(&region, 2.0);
        // (1,0) and (3,0) tie; region order puts (1,0) first
        assert_eq!(
            order,
            vec![
                Point::new(2, 0),
                Point::new(1, 0),
                Point::new(3, 0),
                Point::new(0, 0),
                Point::new(4, 0)
            ]
        );
    }

    #[test]
    fn test_advance_reaches_target_exactly() {
        let region = block_region(4, 4);
        let (mut reveal, mut fill) =
            RevealStrategy::new(&region, Rgba::WHITE, &RevealOptions::new());
        let mut staging = RasterMut::new_filled(4, 4, Rgba::WHITE).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        reveal.request(&mut fill, 0.5);
        let mut last = 0.0;
        for _ in 0..30 {
            reveal.advance(&mut fill, &mut staging, &mut rng, 0.1).unwrap();
            assert!(fill.current_progress >= last);
            last = fill.current_progress;
        }
        assert_eq!(fill.current_progress, 0.5);
        assert_eq!(reveal.revealed(), 8);
        assert!(!reveal.is_animating());
        assert_eq!(fill.settled_count(), 8);
    }

    #[test]
    fn test_lower_target_hides_tail() {
        let region = block_region(4, 1);
        let options = RevealOptions::new().with_fill_duration(1.0);
        let (mut reveal, mut fill) = RevealStrategy::new(&region, Rgba::gray(230), &options);
        let mut staging = RasterMut::new_filled(4, 1, Rgba::gray(230)).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        reveal.request(&mut fill, 1.0);
        reveal.advance(&mut fill, &mut staging, &mut rng, 1.0).unwrap();
        assert_eq!(reveal.revealed(), 4);

        reveal.request(&mut fill, 0.25);
        reveal.advance(&mut fill, &mut staging, &mut rng, 1.0).unwrap();
        assert_eq!(reveal.revealed(), 1);
        let last = reveal.order()[3];
        assert_eq!(staging.get_rgba(last.x, last.y), Some(Rgba::gray(230)));
        // Cells that were shown stay marked
        assert_eq!(fill.settled_count(), 4);
    }
}
