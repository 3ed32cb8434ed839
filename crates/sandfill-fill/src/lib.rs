//! sandfill-fill - Progressive region fills for sandfill
//!
//! The [`RegionFillEngine`] animates regions from their resting color to
//! their final color, one request at a time, and publishes a frame per
//! tick.
//!
//! # Strategies
//!
//! - [`FillStrategy::WeightedReveal`]: pixels appear outward from the
//!   region's bottom center over an eased animation
//! - [`FillStrategy::GrainAutomaton`]: falling grains pile up block by
//!   block
//!
//! # Gating
//!
//! An [`UnlockSequencer`] can keep regions locked until others complete;
//! [`PieceQuotas`] turns collected color pieces into fill targets.
//!
//! # Examples
//!
//! ```
//! use sandfill_core::{Point, Rgba};
//! use sandfill_fill::{FillConfig, FillStrategy, GrainOptions, RegionFillEngine};
//! use sandfill_region::Region;
//!
//! let pixels = (0..4).flat_map(|y| (0..4).map(move |x| Point::new(x, y))).collect();
//! let region = Region::new(0, pixels, Rgba::rgb(240, 200, 60));
//! let config = FillConfig::new()
//!     .with_strategy(FillStrategy::GrainAutomaton)
//!     .with_grain(GrainOptions::new().with_spawn_rate(200.0));
//!
//! let mut engine = RegionFillEngine::new(4, 4, vec![region], config).unwrap();
//! engine.request_fill(0, 1.0);
//! while !engine.is_complete(0) {
//!     engine.tick(1.0 / 60.0);
//! }
//! assert_eq!(engine.progress(0), Some(1.0));
//! ```

pub mod config;
pub mod easing;
pub mod engine;
pub mod error;
pub mod quota;
pub mod sink;
pub mod state;
pub mod strategy;
pub mod unlock;

pub use config::{FillConfig, GrainOptions, LockingOptions, RevealOptions};
pub use easing::Easing;
pub use engine::RegionFillEngine;
pub use error::{FillError, FillResult};
pub use quota::{Delivery, PieceQuota, PieceQuotas};
pub use sink::{LatestFrame, RenderSink};
pub use state::{FillState, RegionState};
pub use strategy::{BlockGrid, FillStrategy, GrainStrategy, RevealStrategy, reveal_order};
pub use unlock::{SequentialUnlock, UnlockSequencer};
