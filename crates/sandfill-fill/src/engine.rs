//! The region fill engine
//!
//! [`RegionFillEngine`] owns the output frame and one slot per region. Each
//! slot moves through [`RegionState`]: `Locked` regions wait for the unlock
//! policy, `Idle` regions wait for a request, `Filling` regions advance on
//! every [`tick`](RegionFillEngine::tick) and `Complete` regions are done.
//!
//! All painting goes to a staging raster; a tick ends by publishing it, so
//! [`frame`](RegionFillEngine::frame) never shows a half-written tick.
//! Changes made between ticks (restart, unlock) appear with the next tick.

use crate::config::FillConfig;
use crate::error::{FillError, FillResult};
use crate::sink::RenderSink;
use crate::state::{FillState, RegionState};
use crate::strategy::StrategyRunner;
use crate::unlock::{SequentialUnlock, UnlockSequencer};
use log::{debug, error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sandfill_color::lighten;
use sandfill_core::{FrameBuffer, Raster, Rgba};
use sandfill_region::Region;
use std::collections::{HashMap, HashSet};

struct ActiveFill {
    runner: StrategyRunner,
    state: FillState,
}

struct RegionSlot {
    region: Region,
    state: RegionState,
    fill: Option<ActiveFill>,
}

/// Drives progressive fills over a set of regions
///
/// # Examples
///
/// ```
/// use sandfill_core::{Point, Rgba};
/// use sandfill_fill::{FillConfig, RegionFillEngine};
/// use sandfill_region::Region;
///
/// let pixels = vec![Point::new(0, 0), Point::new(1, 0)];
/// let region = Region::new(0, pixels, Rgba::rgb(255, 0, 0));
/// let mut engine = RegionFillEngine::new(2, 1, vec![region], FillConfig::default()).unwrap();
///
/// assert!(engine.request_fill(0, 1.0));
/// let mut completed = Vec::new();
/// for _ in 0..200 {
///     completed.extend(engine.tick(1.0 / 60.0));
/// }
/// assert_eq!(completed, vec![0]);
/// assert!(engine.is_complete(0));
/// ```
pub struct RegionFillEngine {
    config: FillConfig,
    slots: Vec<RegionSlot>,
    index: HashMap<u32, usize>,
    frame: FrameBuffer,
    backdrop: Option<Raster>,
    sequencer: Option<Box<dyn UnlockSequencer>>,
    rng: StdRng,
    origin: (f32, f32),
}

impl RegionFillEngine {
    /// Create an engine over `regions` on a `width` x `height` frame.
    ///
    /// When locking is enabled in `config`, a [`SequentialUnlock`] built
    /// from the locking options gates the regions.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the frame size is
    /// zero, two regions share an id or a region pixel lies outside the
    /// frame.
    pub fn new(
        width: u32,
        height: u32,
        regions: Vec<Region>,
        config: FillConfig,
    ) -> FillResult<Self> {
        config.validate()?;
        let frame = FrameBuffer::new(width, height, config.background)?;

        let mut index = HashMap::with_capacity(regions.len());
        for (i, region) in regions.iter().enumerate() {
            if index.insert(region.id, i).is_some() {
                return Err(FillError::DuplicateRegion(region.id));
            }
            if let Some(p) = region.pixels.iter().find(|p| p.x >= width || p.y >= height) {
                return Err(FillError::RegionOutOfBounds {
                    region_id: region.id,
                    x: p.x,
                    y: p.y,
                    width,
                    height,
                });
            }
        }

        let sequencer: Option<Box<dyn UnlockSequencer>> = if config.locking.enabled {
            Some(Box::new(SequentialUnlock::from_options(&config.locking)))
        } else {
            None
        };
        let slots = regions
            .into_iter()
            .map(|region| RegionSlot {
                region,
                state: RegionState::Idle,
                fill: None,
            })
            .collect();

        let mut engine = Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            slots,
            index,
            frame,
            backdrop: None,
            sequencer,
            origin: (0.0, 0.0),
        };
        engine.reset()?;
        info!(
            "fill engine ready: {}x{}, {} regions",
            width,
            height,
            engine.slots.len()
        );
        Ok(engine)
    }

    /// Draw `backdrop` under the regions instead of the background color.
    ///
    /// The frame adopts the backdrop's pixels-per-unit scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the backdrop size differs from the frame.
    pub fn with_backdrop(mut self, backdrop: &Raster) -> FillResult<Self> {
        if backdrop.width() != self.frame.width() || backdrop.height() != self.frame.height() {
            return Err(sandfill_core::Error::DimensionMismatch {
                expected: (self.frame.width(), self.frame.height()),
                actual: (backdrop.width(), backdrop.height()),
            }
            .into());
        }
        self.frame
            .staging_mut()
            .set_pixels_per_unit(backdrop.pixels_per_unit());
        self.backdrop = Some(backdrop.clone());
        self.reset()?;
        Ok(self)
    }

    /// Replace the unlock policy and re-lock the regions accordingly.
    pub fn with_sequencer(mut self, sequencer: Box<dyn UnlockSequencer>) -> FillResult<Self> {
        self.sequencer = Some(sequencer);
        self.reset()?;
        Ok(self)
    }

    /// Set the world position of the frame center.
    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = (x, y);
        self
    }

    /// Set the pixels-per-unit scale of the frame.
    pub fn with_pixels_per_unit(mut self, pixels_per_unit: f32) -> Self {
        self.frame
            .staging_mut()
            .set_pixels_per_unit(pixels_per_unit);
        self.frame.apply();
        self
    }

    /// Clear all progress, re-apply locking and repaint every region.
    fn reset(&mut self) -> FillResult<()> {
        let open: Option<HashSet<u32>> = match self.sequencer.as_mut() {
            Some(seq) => {
                let ids: Vec<u32> = self.slots.iter().map(|s| s.region.id).collect();
                Some(seq.initial_unlocked(&ids).into_iter().collect())
            }
            None => None,
        };
        for slot in &mut self.slots {
            slot.fill = None;
            slot.state = match &open {
                Some(open) if !open.contains(&slot.region.id) => RegionState::Locked,
                _ => RegionState::Idle,
            };
        }

        let background = self.config.background;
        match &self.backdrop {
            Some(backdrop) => self.frame.staging_mut().copy_from(backdrop)?,
            None => self.frame.staging_mut().fill(background),
        }
        for i in 0..self.slots.len() {
            self.paint_base(i)?;
        }
        self.frame.apply();
        Ok(())
    }

    fn base_color(&self, slot: &RegionSlot) -> Rgba {
        let locking = &self.config.locking;
        match slot.state {
            RegionState::Locked => locking.locked_color,
            _ => lighten(slot.region.color, locking.unlocked_lightness),
        }
    }

    /// Paint a region's resting color into the staging raster.
    fn paint_base(&mut self, i: usize) -> FillResult<()> {
        let color = self.base_color(&self.slots[i]);
        let staging = self.frame.staging_mut();
        for &p in &self.slots[i].region.pixels {
            staging.set_at(p, color)?;
        }
        Ok(())
    }

    /// Ask region `region_id` to fill to `target` (clamped to `[0, 1]`).
    ///
    /// Returns `false`, leaving everything unchanged, when the region is
    /// unknown, locked or has no pixels, or `target` is not finite.
    /// Requests to a complete region are accepted and ignored.
    pub fn request_fill(&mut self, region_id: u32, target: f32) -> bool {
        let Some(&i) = self.index.get(&region_id) else {
            warn!("fill request for unknown region {}", region_id);
            return false;
        };
        if !target.is_finite() {
            warn!("region {}: ignoring fill target {}", region_id, target);
            return false;
        }
        match self.slots[i].state {
            RegionState::Locked => {
                warn!("region {} is locked; fill request ignored", region_id);
                return false;
            }
            RegionState::Complete => {
                debug!("region {} already complete", region_id);
                return true;
            }
            RegionState::Idle | RegionState::Filling => {}
        }

        if self.slots[i].fill.is_none() {
            let base = self.base_color(&self.slots[i]);
            let strategy = self.config.strategy_for(region_id);
            let slot = &mut self.slots[i];
            match StrategyRunner::build(strategy, &slot.region, base, &self.config) {
                Some((runner, state)) => slot.fill = Some(ActiveFill { runner, state }),
                None => {
                    warn!("region {} has no pixels; fill request ignored", region_id);
                    return false;
                }
            }
            debug!("region {}: {:?} bound", region_id, strategy);
        }

        let slot = &mut self.slots[i];
        if let Some(active) = slot.fill.as_mut() {
            active.runner.request(&mut active.state, target);
        }
        slot.state = RegionState::Filling;
        debug!("region {}: fill target {}", region_id, target.clamp(0.0, 1.0));
        true
    }

    /// Advance every filling region by `dt` seconds and publish the frame.
    ///
    /// Non-positive or non-finite `dt` advances nothing but still publishes.
    /// Returns the regions that completed during this tick; each region is
    /// reported once.
    pub fn tick(&mut self, dt: f32) -> Vec<u32> {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let mut completed = Vec::new();
        let staging = self.frame.staging_mut();

        for slot in &mut self.slots {
            if slot.state != RegionState::Filling {
                continue;
            }
            let Some(active) = slot.fill.as_mut() else {
                continue;
            };
            if dt > 0.0 {
                if let Err(e) = active
                    .runner
                    .advance(&mut active.state, staging, &mut self.rng, dt)
                {
                    error!("region {}: fill step failed: {}", slot.region.id, e);
                    continue;
                }
            }
            if active.state.is_full() {
                slot.state = RegionState::Complete;
                info!("region {} ({}) complete", slot.region.id, slot.region.name);
                completed.push(slot.region.id);
            }
        }

        for &id in &completed {
            let opened = match self.sequencer.as_mut() {
                Some(seq) => seq.on_region_complete(id),
                None => Vec::new(),
            };
            for other in opened {
                self.unlock(other);
            }
        }

        self.frame.apply();
        completed
    }

    /// Drop a region's progress and repaint its resting color.
    ///
    /// A locked region stays locked. Returns `false` for an unknown region.
    pub fn restart(&mut self, region_id: u32) -> bool {
        let Some(&i) = self.index.get(&region_id) else {
            return false;
        };
        let slot = &mut self.slots[i];
        slot.fill = None;
        if slot.state != RegionState::Locked {
            slot.state = RegionState::Idle;
        }
        if let Err(e) = self.paint_base(i) {
            error!("region {}: repaint failed: {}", region_id, e);
        }
        debug!("region {} restarted", region_id);
        true
    }

    /// Open a locked region.
    ///
    /// Returns `false` if the region is unknown or not locked.
    pub fn unlock(&mut self, region_id: u32) -> bool {
        let Some(&i) = self.index.get(&region_id) else {
            return false;
        };
        if self.slots[i].state != RegionState::Locked {
            return false;
        }
        self.slots[i].state = RegionState::Idle;
        if let Err(e) = self.paint_base(i) {
            error!("region {}: repaint failed: {}", region_id, e);
        }
        info!("region {} unlocked", region_id);
        true
    }

    /// Current state of a region
    pub fn state(&self, region_id: u32) -> Option<RegionState> {
        self.index.get(&region_id).map(|&i| self.slots[i].state)
    }

    pub fn is_complete(&self, region_id: u32) -> bool {
        self.state(region_id) == Some(RegionState::Complete)
    }

    pub fn is_locked(&self, region_id: u32) -> bool {
        self.state(region_id) == Some(RegionState::Locked)
    }

    /// Current progress of a region; 0 before its first request.
    pub fn progress(&self, region_id: u32) -> Option<f32> {
        let slot = &self.slots[*self.index.get(&region_id)?];
        Some(
            slot.fill
                .as_ref()
                .map(|a| a.state.current_progress)
                .unwrap_or(0.0),
        )
    }

    /// Fill state of a region that has received a request
    pub fn fill_state(&self, region_id: u32) -> Option<&FillState> {
        let slot = &self.slots[*self.index.get(&region_id)?];
        slot.fill.as_ref().map(|a| &a.state)
    }

    /// Whether any region would still change on the next tick
    pub fn is_animating(&self) -> bool {
        self.slots.iter().any(|slot| {
            slot.state == RegionState::Filling
                && slot
                    .fill
                    .as_ref()
                    .is_some_and(|a| a.runner.is_busy(&a.state))
        })
    }

    pub fn region(&self, region_id: u32) -> Option<&Region> {
        self.index.get(&region_id).map(|&i| &self.slots[i].region)
    }

    /// Regions in engine order
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.slots.iter().map(|s| &s.region)
    }

    /// World position a pour into `region_id` should aim at.
    ///
    /// This is the center of the region's top-center pixel.
    pub fn pour_target(&self, region_id: u32) -> Option<(f32, f32)> {
        let top = self.region(region_id)?.top_center()?;
        let (x, y) = self
            .frame
            .front()
            .pixel_to_world(top.x as f32 + 0.5, top.y as f32 + 0.5);
        Some((x + self.origin.0, y + self.origin.1))
    }

    /// The last published frame
    pub fn frame(&self) -> &Raster {
        self.frame.front()
    }

    /// Number of frames published so far
    pub fn generation(&self) -> u64 {
        self.frame.generation()
    }

    pub fn config(&self) -> &FillConfig {
        &self.config
    }

    /// Hand the last published frame to `sink`.
    pub fn present<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        let frame = self.frame.front();
        sink.present(frame, self.origin, frame.pixels_per_unit());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LockingOptions;
    use crate::sink::LatestFrame;
    use crate::strategy::FillStrategy;
    use sandfill_core::Point;

    fn strip_regions(count: u32, width: u32) -> Vec<Region> {
        (0..count)
            .map(|i| {
                let pixels = (0..width).map(|x| Point::new(x, i)).collect();
                Region::new(i, pixels, Rgba::rgb(0, 0, 255))
            })
            .collect()
    }

    #[test]
    fn test_rejects_bad_regions() {
        let mut regions = strip_regions(2, 4);
        regions[1].id = 0;
        assert!(matches!(
            RegionFillEngine::new(4, 2, regions, FillConfig::default()),
            Err(FillError::DuplicateRegion(0))
        ));

        let regions = strip_regions(3, 4);
        assert!(matches!(
            RegionFillEngine::new(4, 2, regions, FillConfig::default()),
            Err(FillError::RegionOutOfBounds { region_id: 2, .. })
        ));
    }

    #[test]
    fn test_initial_frame_is_lightened() {
        let engine = RegionFillEngine::new(4, 2, strip_regions(1, 4), FillConfig::default())
            .unwrap();
        let frame = engine.frame();
        let expected = lighten(Rgba::rgb(0, 0, 255), 0.7);
        assert_eq!(frame.get_rgba(0, 0), Some(expected));
        assert!(expected.r > 170 && expected.b == 255);
        assert_eq!(frame.get_rgba(0, 1), Some(Rgba::BLACK));
    }

    #[test]
    fn test_unknown_and_non_finite_requests() {
        let mut engine = RegionFillEngine::new(4, 1, strip_regions(1, 4), FillConfig::default())
            .unwrap();
        assert!(!engine.request_fill(9, 1.0));
        assert!(!engine.request_fill(0, f32::NAN));
        assert_eq!(engine.state(0), Some(RegionState::Idle));
    }

    #[test]
    fn test_empty_region_is_skipped() {
        let regions = vec![Region::new(0, Vec::new(), Rgba::WHITE)];
        let mut engine = RegionFillEngine::new(2, 2, regions, FillConfig::default()).unwrap();
        assert!(!engine.request_fill(0, 1.0));
        assert!(engine.tick(0.5).is_empty());
        assert_eq!(engine.state(0), Some(RegionState::Idle));
    }

    #[test]
    fn test_writes_publish_on_tick() {
        let mut engine = RegionFillEngine::new(4, 1, strip_regions(1, 4), FillConfig::default())
            .unwrap();
        let before = engine.frame().clone();
        engine.request_fill(0, 1.0);
        assert_eq!(engine.frame().data(), before.data());
        let generation = engine.generation();
        engine.tick(5.0);
        assert_eq!(engine.generation(), generation + 1);
        assert_ne!(engine.frame().data(), before.data());
    }

    #[test]
    fn test_locking_gates_requests() {
        let config = FillConfig::new().with_locking(
            LockingOptions::new()
                .with_enabled(true)
                .with_initial_unlocked(1),
        );
        let mut engine = RegionFillEngine::new(3, 3, strip_regions(3, 3), config).unwrap();
        assert!(!engine.is_locked(0));
        assert!(engine.is_locked(1));
        assert_eq!(engine.frame().get_rgba(0, 1), Some(Rgba::gray(77)));

        assert!(!engine.request_fill(1, 1.0));
        assert!(engine.fill_state(1).is_none());

        assert!(engine.request_fill(0, 1.0));
        let completed = engine.tick(3.0);
        assert_eq!(completed, vec![0]);
        assert!(!engine.is_locked(1));
        assert!(engine.is_locked(2));
        let open = lighten(Rgba::rgb(0, 0, 255), 0.7);
        assert_eq!(engine.frame().get_rgba(0, 1), Some(open));
    }

    #[test]
    fn test_restart_resets_progress() {
        let config = FillConfig::new().with_strategy(FillStrategy::GrainAutomaton);
        let mut engine = RegionFillEngine::new(4, 1, strip_regions(1, 4), config).unwrap();
        engine.request_fill(0, 1.0);
        engine.tick(1.0);
        assert!(engine.is_complete(0));

        assert!(engine.restart(0));
        assert_eq!(engine.state(0), Some(RegionState::Idle));
        assert_eq!(engine.progress(0), Some(0.0));
        engine.tick(0.0);
        let open = lighten(Rgba::rgb(0, 0, 255), 0.7);
        assert_eq!(engine.frame().get_rgba(2, 0), Some(open));
        assert!(!engine.restart(42));
    }

    #[test]
    fn test_present_hands_over_frame() {
        let engine = RegionFillEngine::new(4, 2, strip_regions(1, 4), FillConfig::default())
            .unwrap()
            .with_pixels_per_unit(2.0)
            .with_origin(1.0, -1.0);
        let mut sink = LatestFrame::new();
        engine.present(&mut sink);
        assert_eq!(sink.presents(), 1);
        assert_eq!(sink.origin(), (1.0, -1.0));
        assert_eq!(sink.pixels_per_unit(), 2.0);
        assert_eq!(sink.frame().map(|f| f.width()), Some(4));

        let mut seen = 0;
        let mut closure = |frame: &Raster, _: (f32, f32), _: f32| seen = frame.height();
        engine.present(&mut closure);
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_pour_target_is_top_center() {
        let engine = RegionFillEngine::new(4, 2, strip_regions(2, 4), FillConfig::default())
            .unwrap()
            .with_pixels_per_unit(1.0);
        // Region 1 is row 1; its top center is (1, 1) -> pixel center (1.5, 1.5)
        assert_eq!(engine.pour_target(1), Some((-0.5, 0.5)));
    }
}
