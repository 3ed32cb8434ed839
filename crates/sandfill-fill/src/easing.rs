//! Easing curves for the reveal animation

/// Maps normalized animation time to normalized progress.
///
/// Every curve is monotonic on `[0, 1]` with `f(0) = 0` and `f(1) = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Smoothstep `t²(3 − 2t)`: slow start, slow finish
    #[default]
    EaseInOut,
    /// Quadratic, slow start
    EaseIn,
    /// Quadratic, slow finish
    EaseOut,
}

impl Easing {
    /// Evaluate the curve; `t` is clamped to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseInOut,
        Easing::EaseIn,
        Easing::EaseOut,
    ];

    #[test]
    fn test_endpoints() {
        for e in ALL {
            assert_eq!(e.apply(0.0), 0.0);
            assert_eq!(e.apply(1.0), 1.0);
            assert_eq!(e.apply(-3.0), 0.0);
            assert_eq!(e.apply(7.0), 1.0);
        }
    }

    #[test]
    fn test_monotonic() {
        for e in ALL {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = e.apply(i as f32 / 100.0);
                assert!(v >= prev, "{:?} decreased at {}", e, i);
                prev = v;
            }
        }
    }

    #[test]
    fn test_ease_in_out_midpoint() {
        assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
        assert!(Easing::EaseInOut.apply(0.1) < 0.1);
    }
}
