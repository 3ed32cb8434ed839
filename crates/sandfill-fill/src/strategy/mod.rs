//! Fill strategies
//!
//! Two ways to bring a region from its base color to its final color:
//!
//! - [`RevealStrategy`]: pixels appear in an order weighted toward the
//!   bottom center, animated over a fixed duration
//! - [`GrainStrategy`]: a falling-sand automaton over blocks of pixels
//!
//! Both report through the shared [`FillState`] contract. The engine picks
//! one per region from [`FillConfig::strategy_for`](crate::FillConfig::strategy_for).

mod grain;
mod reveal;

pub use grain::{BlockGrid, GrainStrategy};
pub use reveal::{RevealStrategy, reveal_order};

use crate::config::FillConfig;
use crate::error::FillResult;
use crate::state::FillState;
use rand::Rng;
use sandfill_core::{RasterMut, Rgba};
use sandfill_region::Region;

/// Strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillStrategy {
    /// Weighted-distance reveal with easing
    #[default]
    WeightedReveal,
    /// Falling-grain automaton
    GrainAutomaton,
}

/// A live strategy bound to one region
#[derive(Debug)]
pub(crate) enum StrategyRunner {
    Reveal(RevealStrategy),
    Grain(GrainStrategy),
}

impl StrategyRunner {
    /// Bind `strategy` to `region`.
    ///
    /// Returns `None` for a region without pixels.
    pub(crate) fn build(
        strategy: FillStrategy,
        region: &Region,
        base: Rgba,
        config: &FillConfig,
    ) -> Option<(Self, FillState)> {
        if region.is_empty() {
            return None;
        }
        match strategy {
            FillStrategy::WeightedReveal => {
                let (runner, state) = RevealStrategy::new(region, base, &config.reveal);
                Some((StrategyRunner::Reveal(runner), state))
            }
            FillStrategy::GrainAutomaton => GrainStrategy::new(region, &config.grain)
                .map(|(runner, state)| (StrategyRunner::Grain(runner), state)),
        }
    }

    pub(crate) fn request(&mut self, fill: &mut FillState, target: f32) {
        match self {
            StrategyRunner::Reveal(r) => r.request(fill, target),
            StrategyRunner::Grain(g) => g.request(fill, target),
        }
    }

    pub(crate) fn advance<R: Rng + ?Sized>(
        &mut self,
        fill: &mut FillState,
        staging: &mut RasterMut,
        rng: &mut R,
        dt: f32,
    ) -> FillResult<()> {
        match self {
            StrategyRunner::Reveal(r) => r.advance(fill, staging, rng, dt),
            StrategyRunner::Grain(g) => g.advance(fill, staging, rng, dt),
        }
    }

    /// Whether another tick could still change the frame.
    pub(crate) fn is_busy(&self, fill: &FillState) -> bool {
        match self {
            StrategyRunner::Reveal(r) => r.is_animating(),
            StrategyRunner::Grain(g) => g.is_busy(fill),
        }
    }
}
