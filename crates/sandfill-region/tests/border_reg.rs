//! Border resolution regression test
//!
//! The framed-square scenario: a 10x10 white raster with a one-pixel black
//! frame has one 64-pixel region and one 36-pixel border; full shrink hands
//! the whole frame to the region.
//!
//! Run with:
//! ```
//! cargo test -p sandfill-region --test border_reg
//! ```

use sandfill_region::{
    BorderOptions, RegionSet, SegmentOptions, detect_borders, redistribute_borders,
    remove_border_region, resolve_borders, segment,
};
use sandfill_test::{RegParams, framed_raster, init_logging, raster_from_ascii};
use std::collections::HashSet;

#[test]
fn border_reg() {
    init_logging();
    let mut rp = RegParams::new("border");
    let raster = framed_raster(10, 10).unwrap();

    // Test 1: detection without shrink
    let mut regions = segment(&raster, &SegmentOptions::default()).unwrap();
    let borders = resolve_borders(&raster, &mut regions, &BorderOptions::default()).unwrap();
    rp.compare_values(1.0, regions.len() as f64, 0.0);
    rp.compare_values(64.0, regions[0].pixel_count() as f64, 0.0);
    rp.compare_values(1.0, borders.len() as f64, 0.0);
    rp.compare_values(36.0, borders[0].pixel_count() as f64, 0.0);

    // Test 2: full shrink reassigns the whole frame
    let mut regions = segment(&raster, &SegmentOptions::default()).unwrap();
    let opts = BorderOptions::new().with_default_shrink(1.0);
    let borders = resolve_borders(&raster, &mut regions, &opts).unwrap();
    let remaining: usize = borders.iter().map(|b| b.pixel_count()).sum();
    rp.compare_values(0.0, remaining as f64, 0.0);
    rp.compare_values(100.0, regions[0].pixel_count() as f64, 0.0);
    let unique: HashSet<_> = regions[0].pixels.iter().collect();
    rp.compare_values(100.0, unique.len() as f64, 0.0);

    // Test 3: per-border override set between detection and redistribution
    let mut regions = segment(&raster, &SegmentOptions::default()).unwrap();
    let mut borders = detect_borders(&raster, &regions, &BorderOptions::default()).unwrap();
    borders[0].shrink_amount = 1.0;
    let moved =
        redistribute_borders(10, 10, &mut regions, &mut borders, &BorderOptions::default())
            .unwrap();
    rp.compare_values(36.0, moved as f64, 0.0);

    // Test 4: manual removal splits a wall between two rooms
    let rooms = raster_from_ascii(&[
        "#######",
        "#..#..#",
        "#..#..#",
        "#######",
    ])
    .unwrap();
    let mut regions = segment(&rooms, &SegmentOptions::default()).unwrap();
    let mut borders = resolve_borders(&rooms, &mut regions, &BorderOptions::default()).unwrap();
    rp.compare_values(2.0, regions.len() as f64, 0.0);
    rp.compare_values(1.0, borders.len() as f64, 0.0);
    let before: usize = regions.iter().map(|r| r.pixel_count()).sum();
    let ok = remove_border_region(7, 4, &mut regions, &mut borders, 0);
    let after: usize = regions.iter().map(|r| r.pixel_count()).sum();
    rp.compare_values(1.0, ok as u8 as f64, 0.0);
    rp.compare_values(0.0, borders.len() as f64, 0.0);
    rp.compare_values((before + 20) as f64, after as f64, 0.0);

    // Test 5: removing twice is a no-op
    let again = remove_border_region(7, 4, &mut regions, &mut borders, 0);
    rp.compare_values(0.0, again as u8 as f64, 0.0);

    // Test 6: the resolved lists survive serialization
    let set = RegionSet::new(7, 4, regions, borders);
    let bytes = set.write_to_bytes().unwrap();
    let restored = RegionSet::read_from_bytes(&bytes).unwrap();
    rp.compare_strings(&bytes, &restored.write_to_bytes().unwrap());

    assert!(rp.cleanup());
}
