//! Segmentation regression test
//!
//! Checks region discovery order, maximality and the partition of a
//! multi-region drawing, with and without partial border shrink.
//!
//! Run with:
//! ```
//! cargo test -p sandfill-region --test segment_reg
//! ```

use sandfill_core::Point;
use sandfill_region::{
    BorderOptions, PixelClass, PixelClassifier, SegmentOptions, render_preview, resolve_borders,
    segment,
};
use sandfill_test::{RegParams, init_logging, raster_from_ascii};
use std::collections::HashSet;

// Three rooms and a transparent corner
const DRAWING: &[&str] = &[
    "   ########",
    "   #..#...#",
    "####..#...#",
    "#..####...#",
    "#.........#",
    "###########",
];

#[test]
fn segment_reg() {
    init_logging();
    let mut rp = RegParams::new("segment");
    let raster = raster_from_ascii(DRAWING).unwrap();

    let regions = segment(&raster, &SegmentOptions::default()).unwrap();
    eprintln!("  {} regions", regions.len());

    // Bottom row first: the long bottom room (joined to the right room) is
    // found before the small top-left room.
    rp.compare_values(2.0, regions.len() as f64, 0.0);
    rp.compare_values(0.0, regions[0].id as f64, 0.0);
    rp.compare_values(1.0, (regions[0].pixels[0] == Point::new(1, 1)) as u8 as f64, 0.0);
    rp.compare_values(4.0, regions[1].pixel_count() as f64, 0.0);

    // Regions are disjoint and cover exactly the fillable pixels
    let classifier = PixelClassifier::default();
    let mut seen = HashSet::new();
    let mut duplicates = 0;
    for r in &regions {
        for &p in &r.pixels {
            if !seen.insert(p) {
                duplicates += 1;
            }
        }
    }
    let fillable = (0..raster.height())
        .flat_map(|y| (0..raster.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| classifier.classify_at(&raster, x, y) == PixelClass::Fillable)
        .count();
    rp.compare_values(0.0, duplicates as f64, 0.0);
    rp.compare_values(fillable as f64, seen.len() as f64, 0.0);

    // Partition of all non-background pixels after border resolution
    let mut regions = regions;
    let borders = resolve_borders(&raster, &mut regions, &BorderOptions::default()).unwrap();
    let opaque = (0..raster.height())
        .flat_map(|y| (0..raster.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| classifier.classify_at(&raster, x, y) != PixelClass::Background)
        .count();
    let owned: usize = regions.iter().map(|r| r.pixel_count()).sum::<usize>()
        + borders.iter().map(|b| b.pixel_count()).sum::<usize>();
    eprintln!("  {} borders, {} owned of {} opaque", borders.len(), owned, opaque);
    rp.compare_values(opaque as f64, owned as f64, 0.0);

    let preview = render_preview(raster.width(), raster.height(), &regions, &borders).unwrap();
    rp.write_raster(&preview, "preview").unwrap();
    rp.compare_values(
        1.0,
        (preview.get_at(Point::new(1, 1)) == Some(regions[0].color)) as u8 as f64,
        0.0,
    );

    // Partial shrinks: regions and borders stay disjoint and together cover
    // every non-background pixel
    let opaque: HashSet<Point> = (0..raster.height())
        .flat_map(|y| (0..raster.width()).map(move |x| Point::new(x, y)))
        .filter(|p| classifier.classify_at(&raster, p.x, p.y) != PixelClass::Background)
        .collect();
    for shrink in [0.25, 0.5, 0.75] {
        let mut regions = segment(&raster, &SegmentOptions::default()).unwrap();
        let opts = BorderOptions::new().with_default_shrink(shrink);
        let borders = resolve_borders(&raster, &mut regions, &opts).unwrap();

        let mut owned = HashSet::new();
        let mut overlaps = 0;
        let all = regions
            .iter()
            .flat_map(|r| r.pixels.iter())
            .chain(borders.iter().flat_map(|b| b.pixels.iter()));
        for &p in all {
            if !owned.insert(p) {
                overlaps += 1;
            }
        }
        eprintln!("  shrink {shrink}: {} owned, {overlaps} overlaps", owned.len());
        rp.compare_values(0.0, overlaps as f64, 0.0);
        rp.compare_values(1.0, (owned == opaque) as u8 as f64, 0.0);
    }

    assert!(rp.cleanup());
}
