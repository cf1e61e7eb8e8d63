/// Easing curves mapping normalized time to normalized progress.
///
/// Outputs are not confined to `[0, 1]`: the back curves overshoot.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseOutQuad,
    EaseInBack,
    EaseInOutBack,
    Bounce,
}

const BACK: f64 = 1.70158;

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInBack => t * t * ((BACK + 1.0) * t - BACK),
            Easing::EaseInOutBack => {
                let s = BACK * 1.525;
                let t = t / 0.5;
                if t < 1.0 {
                    0.5 * (t * t * ((s + 1.0) * t - s))
                } else {
                    let t = t - 2.0;
                    0.5 * (t * t * ((s + 1.0) * t + s) + 2.0)
                }
            }
            Easing::Bounce => bounce(t),
        }
    }
}

fn bounce(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::EaseOutQuad,
        Easing::EaseInBack,
        Easing::EaseInOutBack,
        Easing::Bounce,
    ];

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn every_curve_starts_at_zero_and_ends_at_one() {
        for e in ALL {
            assert!(close(e.apply(0.0), 0.0), "{e:?} at 0");
            assert!(close(e.apply(1.0), 1.0), "{e:?} at 1");
        }
    }

    #[test]
    fn ease_out_quad_is_front_loaded() {
        assert!(close(Easing::EaseOutQuad.apply(0.5), 0.75));
    }

    #[test]
    fn ease_in_back_undershoots() {
        assert!(Easing::EaseInBack.apply(0.2) < 0.0);
    }

    #[test]
    fn ease_in_out_back_is_symmetric_at_midpoint() {
        assert!(close(Easing::EaseInOutBack.apply(0.5), 0.5));
    }

    #[test]
    fn bounce_segments_meet() {
        assert!(close(Easing::Bounce.apply(1.0 / 2.75), 1.0));
    }
}
