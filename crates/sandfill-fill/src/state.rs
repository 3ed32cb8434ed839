//! Per-region runtime state

/// Lifecycle of one region inside the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    /// Gated by the unlock policy; fill requests are rejected
    Locked,
    /// Waiting for a fill request
    Idle,
    /// Advancing toward its target progress
    Filling,
    /// Fully filled
    Complete,
}

/// Fill progress of one region
///
/// `settled_mask` has one entry per strategy cell: a region pixel in reveal
/// order for the weighted reveal, a block for the grain automaton. Entries
/// only ever turn on until the region is restarted.
#[derive(Debug, Clone, PartialEq)]
pub struct FillState {
    pub region_id: u32,
    /// Current progress in `[0, 1]`
    pub current_progress: f32,
    /// Requested progress in `[0, 1]`
    pub target_progress: f32,
    pub settled_mask: Vec<bool>,
    /// Cells holding in-flight grains, in processing order
    pub active_particles: Vec<usize>,
}

impl FillState {
    /// Fresh state with `cells` unsettled cells.
    pub fn new(region_id: u32, cells: usize) -> Self {
        Self {
            region_id,
            current_progress: 0.0,
            target_progress: 0.0,
            settled_mask: vec![false; cells],
            active_particles: Vec::new(),
        }
    }

    /// Number of settled cells
    pub fn settled_count(&self) -> usize {
        self.settled_mask.iter().filter(|&&s| s).count()
    }

    /// Whether the region has reached a full fill
    pub fn is_full(&self) -> bool {
        self.current_progress >= 1.0 && self.target_progress >= 1.0
    }
}
