//! Unlock policies
//!
//! An [`UnlockSequencer`] decides which regions start open and which region
//! opens when another completes. The engine calls it; it never touches
//! engine state itself.

use crate::config::LockingOptions;

/// Decides the unlock order of regions
pub trait UnlockSequencer {
    /// Regions open at start, given all region ids in engine order.
    fn initial_unlocked(&mut self, region_ids: &[u32]) -> Vec<u32>;

    /// Regions to open after `region_id` completes.
    fn on_region_complete(&mut self, region_id: u32) -> Vec<u32>;
}

/// Opens regions one at a time along a fixed order
///
/// The first `initial` entries of the order start open. The n-th
/// completion opens entry `initial + n - 1`. Without an explicit sequence
/// the order is the engine's region order.
#[derive(Debug, Clone)]
pub struct SequentialUnlock {
    initial: usize,
    sequence: Vec<u32>,
    order: Vec<u32>,
    completed: usize,
}

impl SequentialUnlock {
    /// Create a sequencer; an empty `sequence` follows region order.
    pub fn new(initial: usize, sequence: Vec<u32>) -> Self {
        Self {
            initial,
            sequence,
            order: Vec::new(),
            completed: 0,
        }
    }

    /// Create a sequencer from locking options.
    pub fn from_options(options: &LockingOptions) -> Self {
        Self::new(options.initial_unlocked, options.unlock_sequence.clone())
    }

    /// Number of completions seen
    pub fn completed(&self) -> usize {
        self.completed
    }
}

impl UnlockSequencer for SequentialUnlock {
    fn initial_unlocked(&mut self, region_ids: &[u32]) -> Vec<u32> {
        self.order = if self.sequence.is_empty() {
            region_ids.to_vec()
        } else {
            self.sequence.clone()
        };
        self.completed = 0;
        self.order.iter().take(self.initial).copied().collect()
    }

    fn on_region_complete(&mut self, _region_id: u32) -> Vec<u32> {
        self.completed += 1;
        self.order
            .get(self.initial + self.completed - 1)
            .map(|&id| vec![id])
            .unwrap_or_default()
    }
}
