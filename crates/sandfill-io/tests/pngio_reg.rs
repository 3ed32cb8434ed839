//! PNG I/O regression test
//!
//! Writes rasters to disk and memory and reads them back losslessly.
//!
//! Run with:
//! ```
//! cargo test -p sandfill-io --test pngio_reg
//! ```

use sandfill_core::{Raster, Rgba};
use sandfill_io::{IoError, read_png_mem, read_raster, write_png_mem, write_raster};
use sandfill_test::{RegParams, framed_raster, regout_dir};
use std::fs;

#[test]
fn pngio_reg() {
    let mut rp = RegParams::new("pngio");

    // Test 1: memory round trip of a framed line-art raster
    let framed = framed_raster(12, 9).unwrap();
    let bytes = write_png_mem(&framed).unwrap();
    let back = read_png_mem(&bytes).unwrap();
    eprintln!("  framed: {} bytes", bytes.len());
    rp.compare_rasters(&framed, &back);

    // Test 2: alpha survives
    let mut rm = framed.to_mut();
    rm.set_rgba(5, 5, Rgba::new(200, 100, 50, 0)).unwrap();
    let with_alpha: Raster = rm.into();
    let back = read_png_mem(&write_png_mem(&with_alpha).unwrap()).unwrap();
    rp.compare_values(0.0, back.get_rgba(5, 5).map_or(255.0, |c| c.a as f64), 0.0);

    // Test 3: file round trip
    let outdir = regout_dir();
    fs::create_dir_all(&outdir).expect("Failed to create output directory");
    let path = format!("{}/pngio.framed.png", outdir);
    write_raster(&framed, &path).unwrap();
    let from_file = read_raster(&path).unwrap();
    rp.compare_rasters(&framed, &from_file);

    // Test 4: unknown extension is rejected
    let bad = write_raster(&framed, format!("{}/pngio.framed.xyz", outdir));
    rp.compare_values(
        1.0,
        if matches!(bad, Err(IoError::UnsupportedFormat(_))) { 1.0 } else { 0.0 },
        0.0,
    );

    assert!(rp.cleanup());
}
