//! Grain color jitter
//!
//! Random helpers take any `Rng` so callers thread their own seeded
//! generator through.

use rand::{Rng, RngExt};
use sandfill_core::{Hsv, Rgba};

/// Symmetric offset in `[-half, half]`; zero when `half` is not positive.
#[inline]
fn offset<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    if half > 0.0 {
        rng.random_range(-half..=half)
    } else {
        0.0
    }
}

/// Perturb a color in HSV space.
///
/// Brightness moves by up to `variation / 2`, saturation by up to
/// `variation / 5`, and hue by up to 0.01 (wrapping). The result is opaque.
pub fn vary_hsv<R: Rng + ?Sized>(rng: &mut R, base: Rgba, variation: f32) -> Rgba {
    let hsv = base.to_hsv();
    let v = (hsv.v + offset(rng, variation * 0.5)).clamp(0.0, 1.0);
    let s = (hsv.s + offset(rng, variation * 0.2)).clamp(0.0, 1.0);
    let h = (hsv.h + offset(rng, 0.01)).rem_euclid(1.0);
    Hsv::new(h, s, v).to_rgba()
}

/// Shift r, g and b by one shared offset in `[-variation, variation]`.
///
/// The result is opaque.
pub fn vary_rgb<R: Rng + ?Sized>(rng: &mut R, base: Rgba, variation: f32) -> Rgba {
    let shared = offset(rng, variation);
    let shift = |c: u8| c as f32 / 255.0 + shared;
    Rgba::from_unit(shift(base.r), shift(base.g), shift(base.b), 1.0)
}

/// Blend a color toward white; `amount = 0` keeps it, `1` gives white.
pub fn lighten(color: Rgba, amount: f32) -> Rgba {
    color.lerp(Rgba::WHITE, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_offset_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let o = offset(&mut rng, 0.25);
            assert!((-0.25..=0.25).contains(&o));
        }
        assert_eq!(offset(&mut rng, 0.0), 0.0);
    }

    #[test]
    fn test_hsv_value_shift_bounded() {
        let mut rng = StdRng::seed_from_u64(4);
        let base = Rgba::rgb(0, 0, 128);
        let v0 = base.to_hsv().v;
        for _ in 0..200 {
            let v = vary_hsv(&mut rng, base, 0.2).to_hsv().v;
            assert!((v - v0).abs() <= 0.1 + 1.0 / 255.0);
        }
    }

    #[test]
    fn test_zero_variation_keeps_color() {
        let mut rng = StdRng::seed_from_u64(2);
        let base = Rgba::rgb(40, 90, 220);
        assert_eq!(vary_rgb(&mut rng, base, 0.0), base);
        let varied = vary_hsv(&mut rng, base, 0.0);
        // Only the tiny hue wobble remains
        assert!(varied.distance_sq(base) < 20 * 20);
    }

    #[test]
    fn test_rgb_shift_is_shared() {
        let mut rng = StdRng::seed_from_u64(3);
        let base = Rgba::gray(128);
        let c = vary_rgb(&mut rng, base, 0.1);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
        assert!((c.r as i32 - 128).abs() <= 26);
        assert_eq!(c.a, 255);
    }

    #[test]
    fn test_seeded_jitter_repeats() {
        let base = Rgba::rgb(200, 60, 60);
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        for _ in 0..10 {
            assert_eq!(vary_hsv(&mut a, base, 0.4), vary_hsv(&mut b, base, 0.4));
        }
    }

    #[test]
    fn test_lighten() {
        assert_eq!(lighten(Rgba::BLACK, 0.0), Rgba::BLACK);
        assert_eq!(lighten(Rgba::BLACK, 1.0), Rgba::WHITE);
        assert_eq!(lighten(Rgba::rgb(0, 100, 200), 0.5), Rgba::rgb(128, 178, 228));
    }
}
