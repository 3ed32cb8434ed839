//! One-time preprocessing
//!
//! Turns a line-art raster into colored regions and resolved borders:
//! segmentation, border resolution, then palette assignment. The result
//! feeds a [`RegionFillEngine`].

use crate::error::{SandfillError, SandfillResult};
use log::{error, info, warn};
use sandfill_color::{NamedPalette, assign_colors};
use sandfill_core::Raster;
use sandfill_fill::{FillConfig, RegionFillEngine};
use sandfill_region::{
    BorderOptions, BorderRegion, Region, RegionError, RegionSet, SegmentOptions,
    remove_border_region, render_preview, resolve_borders, segment,
};

/// Options for [`prepare`]
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub segment: SegmentOptions,
    pub borders: BorderOptions,
    /// Snap region colors to the palette
    pub assign_colors: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            segment: SegmentOptions::default(),
            borders: BorderOptions::default(),
            assign_colors: true,
        }
    }
}

impl PipelineOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set segmentation options
    pub fn with_segment(mut self, segment: SegmentOptions) -> Self {
        self.segment = segment;
        self
    }

    /// Set border options
    pub fn with_borders(mut self, borders: BorderOptions) -> Self {
        self.borders = borders;
        self
    }

    /// Enable or disable palette assignment
    pub fn with_assign_colors(mut self, assign: bool) -> Self {
        self.assign_colors = assign;
        self
    }
}

/// Regions and borders ready to fill
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    pub width: u32,
    pub height: u32,
    pub regions: Vec<Region>,
    pub borders: Vec<BorderRegion>,
}

impl Prepared {
    /// Render regions and borders over black.
    pub fn preview(&self) -> SandfillResult<Raster> {
        Ok(render_preview(
            self.width,
            self.height,
            &self.regions,
            &self.borders,
        )?)
    }

    /// Hand one border's pixels to its neighboring regions.
    ///
    /// Returns `false` if `border_id` is out of range or nothing could be
    /// reassigned.
    pub fn remove_border_region(&mut self, border_id: usize) -> bool {
        remove_border_region(
            self.width,
            self.height,
            &mut self.regions,
            &mut self.borders,
            border_id,
        )
    }

    /// Snapshot for persistence
    pub fn to_region_set(&self) -> RegionSet {
        RegionSet::new(
            self.width,
            self.height,
            self.regions.clone(),
            self.borders.clone(),
        )
    }

    /// Restore from a persisted snapshot
    pub fn from_region_set(set: RegionSet) -> Self {
        Self {
            width: set.width,
            height: set.height,
            regions: set.regions,
            borders: set.borders,
        }
    }

    /// Build a fill engine over the regions.
    ///
    /// `backdrop` (usually the source raster) is drawn under the regions.
    pub fn into_engine(
        self,
        backdrop: Option<&Raster>,
        config: FillConfig,
    ) -> SandfillResult<RegionFillEngine> {
        let engine = RegionFillEngine::new(self.width, self.height, self.regions, config)?;
        Ok(match backdrop {
            Some(backdrop) => engine.with_backdrop(backdrop)?,
            None => engine,
        })
    }
}

/// Segment `raster`, resolve its borders and assign palette colors.
///
/// # Arguments
///
/// * `raster` - Line art; near-white opaque pixels are fillable
/// * `palette` - Colors regions snap to
/// * `options` - Segmentation, border and assignment options
///
/// # Errors
///
/// Returns [`SandfillError::Configuration`] for an empty palette (when
/// assignment is enabled) and [`RegionError::NoRegions`] when nothing is
/// fillable.
pub fn prepare<P: NamedPalette + ?Sized>(
    raster: &Raster,
    palette: &P,
    options: &PipelineOptions,
) -> SandfillResult<Prepared> {
    if options.assign_colors && palette.names().is_empty() {
        return Err(SandfillError::Configuration(
            "palette has no colors".to_string(),
        ));
    }
    options.borders.validate()?;

    let mut regions = segment(raster, &options.segment)?;
    if regions.is_empty() {
        warn!("no fillable regions in {}x{} raster", raster.width(), raster.height());
        return Err(RegionError::NoRegions.into());
    }
    let borders = resolve_borders(raster, &mut regions, &options.borders)?;
    if options.assign_colors {
        assign_colors(&mut regions, palette)?;
    }

    info!(
        "prepared {} regions and {} borders",
        regions.len(),
        borders.len()
    );
    Ok(Prepared {
        width: raster.width(),
        height: raster.height(),
        regions,
        borders,
    })
}

/// Holds the last successful preprocessing result
#[derive(Debug, Default)]
pub struct Pipeline {
    options: PipelineOptions,
    prepared: Option<Prepared>,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            prepared: None,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// The last successful result
    pub fn prepared(&self) -> Option<&Prepared> {
        self.prepared.as_ref()
    }

    /// Mutable access to the last result, for manual curation
    pub fn prepared_mut(&mut self) -> Option<&mut Prepared> {
        self.prepared.as_mut()
    }

    /// Take the last result out of the pipeline
    pub fn take(&mut self) -> Option<Prepared> {
        self.prepared.take()
    }

    /// Run [`prepare`] and keep the result.
    ///
    /// On error, including a missing raster or palette, the previous result
    /// is kept and the error is logged and returned.
    pub fn run<P: NamedPalette + ?Sized>(
        &mut self,
        raster: Option<&Raster>,
        palette: Option<&P>,
    ) -> SandfillResult<&Prepared> {
        let result = match (raster, palette) {
            (None, _) => Err(SandfillError::Configuration("no raster".to_string())),
            (_, None) => Err(SandfillError::Configuration("no palette".to_string())),
            (Some(raster), Some(palette)) => prepare(raster, palette, &self.options),
        };
        match result {
            Ok(prepared) => Ok(self.prepared.insert(prepared)),
            Err(e) => {
                error!("preprocessing failed: {}", e);
                Err(e)
            }
        }
    }

    /// Remove a border from the last result.
    ///
    /// Returns `false` if there is no result or the border does not exist.
    pub fn remove_border_region(&mut self, border_id: usize) -> bool {
        match self.prepared.as_mut() {
            Some(prepared) => prepared.remove_border_region(border_id),
            None => {
                warn!("no prepared regions; cannot remove border {}", border_id);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandfill_color::ColorLibrary;
    use sandfill_core::{RasterMut, Rgba};

    fn framed() -> Raster {
        let mut rm = RasterMut::new_filled(6, 6, Rgba::WHITE).unwrap();
        for i in 0..6 {
            for (x, y) in [(i, 0), (i, 5), (0, i), (5, i)] {
                rm.set_rgba(x, y, Rgba::BLACK).unwrap();
            }
        }
        rm.into()
    }

    #[test]
    fn test_prepare_framed() {
        let prepared =
            prepare(&framed(), &ColorLibrary::with_defaults(), &PipelineOptions::default())
                .unwrap();
        assert_eq!(prepared.regions.len(), 1);
        assert_eq!(prepared.regions[0].pixel_count(), 16);
        assert_eq!(prepared.borders.len(), 1);
        assert!(prepared.regions[0].color_name.is_some());
    }

    #[test]
    fn test_empty_palette_is_configuration_error() {
        let result = prepare(&framed(), &ColorLibrary::new(), &PipelineOptions::default());
        assert!(matches!(result, Err(SandfillError::Configuration(_))));

        let unassigned = PipelineOptions::new().with_assign_colors(false);
        assert!(prepare(&framed(), &ColorLibrary::new(), &unassigned).is_ok());
    }

    #[test]
    fn test_no_regions() {
        let black = Raster::new_filled(4, 4, Rgba::BLACK).unwrap();
        let result = prepare(&black, &ColorLibrary::with_defaults(), &PipelineOptions::default());
        assert!(matches!(
            result,
            Err(SandfillError::Region(RegionError::NoRegions))
        ));
    }

    #[test]
    fn test_failed_run_keeps_previous() {
        let palette = ColorLibrary::with_defaults();
        let mut pipeline = Pipeline::new(PipelineOptions::default());
        pipeline.run(Some(&framed()), Some(&palette)).unwrap();

        assert!(pipeline.run(None, Some(&palette)).is_err());
        assert!(pipeline.run::<ColorLibrary>(Some(&framed()), None).is_err());
        let black = Raster::new_filled(4, 4, Rgba::BLACK).unwrap();
        assert!(pipeline.run(Some(&black), Some(&palette)).is_err());

        assert_eq!(pipeline.prepared().map(|p| p.regions.len()), Some(1));
        assert!(!pipeline.remove_border_region(3));
        assert!(pipeline.remove_border_region(0));
        assert_eq!(pipeline.prepared().map(|p| p.borders.len()), Some(0));
    }
}
