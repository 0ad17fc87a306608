use crate::foundation::core::fmt_num;

/// Timing curves as CSS names them. Everything but `Linear` is a unit cubic
/// Bezier, so the same control points drive both sampling and the emitted CSS.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    CubicBezier(f64, f64, f64, f64),
}

impl Ease {
    fn control_points(self) -> Option<[f64; 4]> {
        match self {
            Self::Linear => None,
            Self::Ease => Some([0.25, 0.1, 0.25, 1.0]),
            Self::EaseIn => Some([0.42, 0.0, 1.0, 1.0]),
            Self::EaseOut => Some([0.0, 0.0, 0.58, 1.0]),
            Self::EaseInOut => Some([0.42, 0.0, 0.58, 1.0]),
            Self::CubicBezier(x1, y1, x2, y2) => Some([x1, y1, x2, y2]),
        }
    }

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self.control_points() {
            None => t,
            Some([x1, y1, x2, y2]) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }

    /// CSS `animation-timing-function` equivalent.
    pub fn css(self) -> String {
        match self {
            Self::Linear => "linear".to_string(),
            Self::Ease => "ease".to_string(),
            Self::EaseIn => "ease-in".to_string(),
            Self::EaseOut => "ease-out".to_string(),
            Self::EaseInOut => "ease-in-out".to_string(),
            Self::CubicBezier(x1, y1, x2, y2) => format!(
                "cubic-bezier({}, {}, {}, {})",
                fmt_num(x1),
                fmt_num(y1),
                fmt_num(x2),
                fmt_num(y2)
            ),
        }
    }
}

/// Unit cubic Bezier timing curve through (0,0), (x1,y1), (x2,y2), (1,1),
/// evaluated at abscissa `x`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    fn coord(p1: f64, p2: f64, s: f64) -> f64 {
        let u = 1.0 - s;
        3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
    }
    fn slope(p1: f64, p2: f64, s: f64) -> f64 {
        let u = 1.0 - s;
        3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
    }

    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Newton first, bisection when the slope flattens out.
    let mut s = x;
    for _ in 0..8 {
        let err = coord(x1, x2, s) - x;
        if err.abs() < 1e-7 {
            return coord(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - err / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let v = coord(x1, x2, s);
        if (v - x).abs() < 1e-7 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    coord(y1, y2, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMED: [Ease; 5] = [
        Ease::Linear,
        Ease::Ease,
        Ease::EaseIn,
        Ease::EaseOut,
        Ease::EaseInOut,
    ];

    #[test]
    fn named_curves_pin_endpoints_and_rise() {
        for ease in NAMED {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
            let [a, b, c] = [0.25, 0.5, 0.75].map(|t| ease.apply(t));
            assert!(a < b && b < c, "{ease:?} not increasing");
        }
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let e = Ease::EaseInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((e.apply(0.2) + e.apply(0.8) - 1.0).abs() < 1e-6);
        assert!(e.apply(0.1) < 0.1);
    }

    #[test]
    fn custom_bezier_matches_named_equivalent() {
        let custom = Ease::CubicBezier(0.42, 0.0, 0.58, 1.0);
        for t in [0.1, 0.3, 0.6, 0.9] {
            assert_eq!(custom.apply(t), Ease::EaseInOut.apply(t));
        }
        assert_eq!(custom.css(), "cubic-bezier(0.42, 0, 0.58, 1)");
        assert_eq!(Ease::EaseInOut.css(), "ease-in-out");
    }
}
