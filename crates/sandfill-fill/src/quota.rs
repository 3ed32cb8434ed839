//! Piece quotas
//!
//! A region can be tied to a palette color name and a number of pieces.
//! Each delivered piece of that color raises the region's fill target by
//! one share, so the region completes with its last piece.

use crate::engine::RegionFillEngine;
use log::debug;

/// Pieces one region needs
#[derive(Debug, Clone, PartialEq)]
pub struct PieceQuota {
    pub region_id: u32,
    /// Palette name of the accepted color
    pub color_name: String,
    pub pieces_needed: u32,
    pub pieces_collected: u32,
}

impl PieceQuota {
    /// Quota with nothing collected yet
    pub fn new(region_id: u32, color_name: impl Into<String>, pieces_needed: u32) -> Self {
        Self {
            region_id,
            color_name: color_name.into(),
            pieces_needed,
            pieces_collected: 0,
        }
    }

    /// Collected share in `[0, 1]`; a quota needing no pieces is full.
    pub fn progress(&self) -> f32 {
        if self.pieces_needed == 0 {
            return 1.0;
        }
        (self.pieces_collected as f32 / self.pieces_needed as f32).min(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.pieces_collected >= self.pieces_needed
    }
}

/// Outcome of delivering one piece
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// The piece counted toward a region
    Accepted {
        region_id: u32,
        /// Fill target after this piece
        progress: f32,
        /// World position to aim the pour at
        pour_target: Option<(f32, f32)>,
    },
    /// The matching region is locked; nothing changed
    Locked { region_id: u32 },
    /// No open quota takes this color
    NoMatch,
}

/// Quotas for a set of regions
#[derive(Debug, Clone, Default)]
pub struct PieceQuotas {
    quotas: Vec<PieceQuota>,
}

impl PieceQuotas {
    pub fn new() -> Self {
        Self::default()
    }

    /// One quota per colored region of `engine`, each needing
    /// `pieces_needed` pieces.
    ///
    /// Regions without a color name are skipped.
    pub fn for_regions(engine: &RegionFillEngine, pieces_needed: u32) -> Self {
        engine
            .regions()
            .filter_map(|r| {
                r.color_name
                    .as_ref()
                    .map(|name| PieceQuota::new(r.id, name.clone(), pieces_needed))
            })
            .collect()
    }

    pub fn add(&mut self, quota: PieceQuota) {
        self.quotas.push(quota);
    }

    pub fn with_quota(mut self, quota: PieceQuota) -> Self {
        self.add(quota);
        self
    }

    pub fn quotas(&self) -> &[PieceQuota] {
        &self.quotas
    }

    pub fn get(&self, region_id: u32) -> Option<&PieceQuota> {
        self.quotas.iter().find(|q| q.region_id == region_id)
    }

    /// Deliver one piece of `color_name`.
    ///
    /// The piece goes to the first unfinished quota with that name. Its
    /// region's fill target is raised to the new collected share.
    pub fn deliver(&mut self, color_name: &str, engine: &mut RegionFillEngine) -> Delivery {
        let Some(quota) = self
            .quotas
            .iter_mut()
            .find(|q| q.color_name == color_name && !q.is_complete())
        else {
            debug!("no open quota for {}", color_name);
            return Delivery::NoMatch;
        };
        let region_id = quota.region_id;
        if engine.is_locked(region_id) {
            debug!("{} piece for locked region {}", color_name, region_id);
            return Delivery::Locked { region_id };
        }

        quota.pieces_collected += 1;
        let progress = quota.progress();
        engine.request_fill(region_id, progress);
        debug!(
            "region {}: {}/{} {} pieces",
            region_id, quota.pieces_collected, quota.pieces_needed, color_name
        );
        Delivery::Accepted {
            region_id,
            progress,
            pour_target: engine.pour_target(region_id),
        }
    }
}

impl FromIterator<PieceQuota> for PieceQuotas {
    fn from_iter<I: IntoIterator<Item = PieceQuota>>(iter: I) -> Self {
        Self {
            quotas: iter.into_iter().collect(),
        }
    }
}
