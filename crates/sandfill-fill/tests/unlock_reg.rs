//! Unlock gating regression test
//!
//! Four strips, two open at start, unlocked along an explicit sequence as
//! regions complete. Piece deliveries drive the fills.
//!
//! Run with:
//! ```
//! cargo test -p sandfill-fill --test unlock_reg
//! ```

use sandfill_core::{Point, Rgba};
use sandfill_fill::{
    Delivery, FillConfig, LockingOptions, PieceQuotas, RegionFillEngine, RegionState,
    UnlockSequencer,
};
use sandfill_region::Region;
use sandfill_test::{RegParams, init_logging};

const TICK: f32 = 1.0 / 60.0;

fn strips() -> Vec<Region> {
    let names = ["Red", "Blue", "Red", "Green"];
    (0..4)
        .map(|i| {
            let pixels = (0..6).map(|x| Point::new(x, i)).collect();
            let mut region = Region::new(i, pixels, Rgba::rgb(200, 60, 60));
            region.color_name = Some(names[i as usize].to_string());
            region
        })
        .collect()
}

fn run(engine: &mut RegionFillEngine, ticks: usize) -> Vec<u32> {
    (0..ticks).flat_map(|_| engine.tick(TICK)).collect()
}

/// Opens everything at once after the first completion.
struct OpenAllAfterFirst;

impl UnlockSequencer for OpenAllAfterFirst {
    fn initial_unlocked(&mut self, region_ids: &[u32]) -> Vec<u32> {
        region_ids.iter().take(1).copied().collect()
    }

    fn on_region_complete(&mut self, _region_id: u32) -> Vec<u32> {
        vec![1, 2, 3]
    }
}

#[test]
fn unlock_reg() {
    init_logging();
    let mut rp = RegParams::new("unlock");

    let locking = LockingOptions::new()
        .with_enabled(true)
        .with_initial_unlocked(2)
        .with_unlock_sequence(vec![3, 1, 0, 2]);
    let mut engine =
        RegionFillEngine::new(6, 4, strips(), FillConfig::new().with_locking(locking)).unwrap();

    // Test 1: initial gate
    let locked: Vec<u32> = (0..4).filter(|&id| engine.is_locked(id)).collect();
    rp.compare_values(2.0, locked.len() as f64, 0.0);
    rp.compare_values(1.0, (locked == vec![0, 2]) as u8 as f64, 0.0);
    rp.compare_values(0.0, engine.request_fill(0, 1.0) as u8 as f64, 0.0);
    rp.compare_values(
        1.0,
        (engine.state(0) == Some(RegionState::Locked)) as u8 as f64,
        0.0,
    );

    // Test 2: deliveries; region 0 takes no Red while locked
    let mut quotas = PieceQuotas::for_regions(&engine, 2);
    let d = quotas.deliver("Red", &mut engine);
    rp.compare_values(1.0, (d == Delivery::Locked { region_id: 0 }) as u8 as f64, 0.0);
    quotas.deliver("Green", &mut engine);
    let d = quotas.deliver("Green", &mut engine);
    rp.compare_values(
        1.0,
        matches!(d, Delivery::Accepted { region_id: 3, progress, pour_target: Some(_) } if progress == 1.0)
            as u8 as f64,
        0.0,
    );

    // Test 3: completing region 3 opens region 0 (third in sequence)
    let done = run(&mut engine, 180);
    rp.compare_values(1.0, (done == vec![3]) as u8 as f64, 0.0);
    rp.compare_values(0.0, engine.is_locked(0) as u8 as f64, 0.0);
    rp.compare_values(1.0, engine.is_locked(2) as u8 as f64, 0.0);

    // Test 4: completing region 1 opens region 2
    quotas.deliver("Blue", &mut engine);
    quotas.deliver("Blue", &mut engine);
    let done = run(&mut engine, 180);
    rp.compare_values(1.0, (done == vec![1]) as u8 as f64, 0.0);
    rp.compare_values(0.0, engine.is_locked(2) as u8 as f64, 0.0);

    // Test 5: a custom sequencer
    let mut engine = RegionFillEngine::new(6, 4, strips(), FillConfig::default())
        .unwrap()
        .with_sequencer(Box::new(OpenAllAfterFirst))
        .unwrap();
    rp.compare_values(3.0, (0..4).filter(|&id| engine.is_locked(id)).count() as f64, 0.0);
    engine.request_fill(0, 1.0);
    run(&mut engine, 180);
    rp.compare_values(0.0, (0..4).filter(|&id| engine.is_locked(id)).count() as f64, 0.0);
    // Unlocked regions show their lightened color
    let frame = engine.frame();
    rp.compare_values(
        1.0,
        (frame.get_rgba(0, 3) == Some(sandfill_color::lighten(Rgba::rgb(200, 60, 60), 0.7)))
            as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup());
}
