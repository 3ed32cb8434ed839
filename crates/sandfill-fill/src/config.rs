//! Fill engine configuration
//!
//! Every knob of the engine lives in [`FillConfig`], split by concern:
//! [`RevealOptions`] for the weighted reveal, [`GrainOptions`] for the grain
//! automaton and [`LockingOptions`] for unlock gating. All option structs
//! follow the same builder pattern and are checked by
//! [`FillConfig::validate`] when the engine is built.

use crate::easing::Easing;
use crate::error::{FillError, FillResult};
use crate::strategy::FillStrategy;
use sandfill_core::Rgba;
use std::collections::HashMap;

fn require_positive(name: &str, value: f32) -> FillResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FillError::InvalidParameters(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

fn require_unit(name: &str, value: f32) -> FillResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FillError::InvalidParameters(format!(
            "{} {} outside [0, 1]",
            name, value
        )))
    }
}

/// Options for the weighted reveal
#[derive(Debug, Clone)]
pub struct RevealOptions {
    /// Seconds for one request's animation
    pub fill_duration: f32,
    /// HSV variation applied to each revealed pixel
    pub color_variation: f32,
    /// Divisor on the vertical distance; higher values rise faster
    pub steepness: f32,
    /// Progress curve over the animation
    pub easing: Easing,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            fill_duration: 2.0,
            color_variation: 0.4,
            steepness: 2.0,
            easing: Easing::EaseInOut,
        }
    }
}

impl RevealOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the animation duration in seconds
    pub fn with_fill_duration(mut self, seconds: f32) -> Self {
        self.fill_duration = seconds;
        self
    }

    /// Set the per-pixel color variation
    pub fn with_color_variation(mut self, variation: f32) -> Self {
        self.color_variation = variation;
        self
    }

    /// Set the reveal steepness
    pub fn with_steepness(mut self, steepness: f32) -> Self {
        self.steepness = steepness;
        self
    }

    /// Set the easing curve
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn validate(&self) -> FillResult<()> {
        require_positive("fill_duration", self.fill_duration)?;
        require_positive("steepness", self.steepness)?;
        require_unit("reveal color_variation", self.color_variation)
    }
}

/// Options for the grain automaton
#[derive(Debug, Clone)]
pub struct GrainOptions {
    /// Grains spawned per simulated second
    pub spawn_rate: f32,
    /// Automaton steps per simulated second; `None` uses `spawn_rate`
    pub step_rate: Option<f32>,
    /// Multiplier from wall-clock to simulated time
    pub simulation_speed: f32,
    /// Shared RGB offset range for grain colors
    pub color_variation: f32,
    /// Block edge in pixels
    pub unit: u32,
}

impl Default for GrainOptions {
    fn default() -> Self {
        Self {
            spawn_rate: 3000.0,
            step_rate: None,
            simulation_speed: 1.0,
            color_variation: 0.1,
            unit: 1,
        }
    }
}

impl GrainOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spawn rate in grains per second
    pub fn with_spawn_rate(mut self, rate: f32) -> Self {
        self.spawn_rate = rate;
        self
    }

    /// Set an explicit step rate in steps per second
    pub fn with_step_rate(mut self, rate: f32) -> Self {
        self.step_rate = Some(rate);
        self
    }

    /// Set the simulation speed multiplier
    pub fn with_simulation_speed(mut self, speed: f32) -> Self {
        self.simulation_speed = speed;
        self
    }

    /// Set the grain color variation
    pub fn with_color_variation(mut self, variation: f32) -> Self {
        self.color_variation = variation;
        self
    }

    /// Set the block size in pixels
    pub fn with_unit(mut self, unit: u32) -> Self {
        self.unit = unit;
        self
    }

    /// Steps per second actually used
    pub fn effective_step_rate(&self) -> f32 {
        self.step_rate.unwrap_or(self.spawn_rate)
    }

    pub fn validate(&self) -> FillResult<()> {
        require_positive("spawn_rate", self.spawn_rate)?;
        if let Some(rate) = self.step_rate {
            require_positive("step_rate", rate)?;
        }
        require_positive("simulation_speed", self.simulation_speed)?;
        require_unit("grain color_variation", self.color_variation)?;
        if self.unit == 0 {
            return Err(FillError::InvalidParameters(
                "unit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Options for unlock gating
#[derive(Debug, Clone)]
pub struct LockingOptions {
    /// Start with most regions locked
    pub enabled: bool,
    /// Number of regions open from the start
    pub initial_unlocked: usize,
    /// Unlock order by region id; empty means region order
    pub unlock_sequence: Vec<u32>,
    /// Color shown over locked regions
    pub locked_color: Rgba,
    /// Blend toward white for open, unfilled regions
    pub unlocked_lightness: f32,
}

impl Default for LockingOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            initial_unlocked: 3,
            unlock_sequence: Vec::new(),
            locked_color: Rgba::from_unit(0.3, 0.3, 0.3, 1.0),
            unlocked_lightness: 0.7,
        }
    }
}

impl LockingOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable locking
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set how many regions start unlocked
    pub fn with_initial_unlocked(mut self, count: usize) -> Self {
        self.initial_unlocked = count;
        self
    }

    /// Set the unlock order
    pub fn with_unlock_sequence(mut self, sequence: Vec<u32>) -> Self {
        self.unlock_sequence = sequence;
        self
    }

    /// Set the locked overlay color
    pub fn with_locked_color(mut self, color: Rgba) -> Self {
        self.locked_color = color;
        self
    }

    /// Set the lightening of open regions
    pub fn with_unlocked_lightness(mut self, amount: f32) -> Self {
        self.unlocked_lightness = amount;
        self
    }

    pub fn validate(&self) -> FillResult<()> {
        require_unit("unlocked_lightness", self.unlocked_lightness)
    }
}

/// Complete engine configuration
#[derive(Debug, Clone)]
pub struct FillConfig {
    /// Strategy for regions without an override
    pub strategy: FillStrategy,
    /// Per-region strategy overrides
    pub region_strategies: HashMap<u32, FillStrategy>,
    pub reveal: RevealOptions,
    pub grain: GrainOptions,
    pub locking: LockingOptions,
    /// Frame color outside every region when no backdrop is set
    pub background: Rgba,
    /// Seed for all color jitter and grain choices
    pub seed: u64,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            strategy: FillStrategy::default(),
            region_strategies: HashMap::new(),
            reveal: RevealOptions::default(),
            grain: GrainOptions::default(),
            locking: LockingOptions::default(),
            background: Rgba::BLACK,
            seed: 0,
        }
    }
}

impl FillConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default strategy
    pub fn with_strategy(mut self, strategy: FillStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Override the strategy of one region
    pub fn with_region_strategy(mut self, region_id: u32, strategy: FillStrategy) -> Self {
        self.region_strategies.insert(region_id, strategy);
        self
    }

    /// Set reveal options
    pub fn with_reveal(mut self, reveal: RevealOptions) -> Self {
        self.reveal = reveal;
        self
    }

    /// Set grain options
    pub fn with_grain(mut self, grain: GrainOptions) -> Self {
        self.grain = grain;
        self
    }

    /// Set locking options
    pub fn with_locking(mut self, locking: LockingOptions) -> Self {
        self.locking = locking;
        self
    }

    /// Set the background color
    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Strategy used for `region_id`
    pub fn strategy_for(&self, region_id: u32) -> FillStrategy {
        self.region_strategies
            .get(&region_id)
            .copied()
            .unwrap_or(self.strategy)
    }

    /// Validate all option groups.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::InvalidParameters`] naming the first bad value.
    pub fn validate(&self) -> FillResult<()> {
        self.reveal.validate()?;
        self.grain.validate()?;
        self.locking.validate()
    }
}
