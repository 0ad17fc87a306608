use crate::foundation::{
    core::fmt_num,
    error::{HeroError, HeroResult},
};

const REST_DELTA: f64 = 0.01;
const REST_SPEED: f64 = 0.01;
const SETTLE_STEP_SECS: f64 = 1.0 / 120.0;
const SETTLE_LIMIT_SECS: f64 = 60.0;

/// Damped harmonic oscillator released from rest at 0 and pulled towards 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
}

fn default_mass() -> f64 {
    1.0
}

impl Spring {
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
        }
    }

    pub fn validate(&self) -> HeroResult<()> {
        if !(self.stiffness > 0.0) {
            return Err(HeroError::animation("spring stiffness must be > 0"));
        }
        if !(self.damping >= 0.0) {
            return Err(HeroError::animation("spring damping must be >= 0"));
        }
        if !(self.mass > 0.0) {
            return Err(HeroError::animation("spring mass must be > 0"));
        }
        Ok(())
    }

    fn omega0(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Displacement from the target and its derivative at `t` seconds.
    fn state(&self, t: f64) -> (f64, f64) {
        let w0 = self.omega0();
        let zeta = self.damping_ratio();

        if (zeta - 1.0).abs() < 1e-9 {
            let a = -1.0;
            let b = -w0;
            let e = (-w0 * t).exp();
            let y = e * (a + b * t);
            let dy = e * (b - w0 * (a + b * t));
            (y, dy)
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let decay = zeta * w0;
            let a = -1.0;
            let b = -decay / wd;
            let e = (-decay * t).exp();
            let (s, c) = (wd * t).sin_cos();
            let y = e * (a * c + b * s);
            let dy = e * (-decay * (a * c + b * s) + wd * (b * c - a * s));
            (y, dy)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            let c1 = r2 / (r1 - r2);
            let c2 = -r1 / (r1 - r2);
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
        }
    }

    /// Normalized position at `t` seconds after release (0 at rest, 1 at target).
    pub fn progress(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        1.0 + self.state(t).0
    }

    pub fn velocity(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        self.state(t).1
    }

    /// First time (seconds) at which the spring is within rest thresholds.
    pub fn settle_time(&self) -> f64 {
        let mut t = SETTLE_STEP_SECS;
        while t < SETTLE_LIMIT_SECS {
            let (y, dy) = self.state(t);
            if y.abs() < REST_DELTA && dy.abs() < REST_SPEED {
                return t;
            }
            t += SETTLE_STEP_SECS;
        }
        SETTLE_LIMIT_SECS
    }

    /// CSS `linear()` easing that traces this spring over `settle_time()`.
    pub fn css_linear(&self, samples: usize) -> String {
        let samples = samples.max(2);
        let duration = self.settle_time();
        let mut stops = Vec::with_capacity(samples + 1);
        for i in 0..=samples {
            let t = duration * (i as f64) / (samples as f64);
            let v = if i == samples { 1.0 } else { self.progress(t) };
            stops.push(fmt_num(v));
        }
        format!("linear({})", stops.join(", "))
    }
}

/// Spring-driven transition of a scalar from `from` to `to`, released after `delay` seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringTween {
    pub from: f64,
    pub to: f64,
    pub delay: f64,
    pub spring: Spring,
}

impl SpringTween {
    pub fn validate(&self) -> HeroResult<()> {
        if !(self.delay >= 0.0) {
            return Err(HeroError::animation("spring delay must be >= 0"));
        }
        self.spring.validate()
    }

    pub fn sample(&self, t: f64) -> f64 {
        let p = self.spring.progress(t - self.delay);
        self.from + (self.to - self.from) * p
    }

    pub fn is_settled(&self, t: f64) -> bool {
        t - self.delay >= self.spring.settle_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRANCE: Spring = Spring::new(150.0, 25.0);

    #[test]
    fn starts_at_rest_and_settles_on_target() {
        for spring in [ENTRANCE, Spring::new(100.0, 10.0), Spring::new(100.0, 20.0)] {
            assert_eq!(spring.progress(0.0), 0.0);
            assert!(spring.progress(1e-4) < 0.01);
            let settle = spring.settle_time();
            assert!(settle < SETTLE_LIMIT_SECS);
            assert!((spring.progress(settle) - 1.0).abs() < REST_DELTA);
            assert!((spring.progress(settle + 5.0) - 1.0).abs() < REST_DELTA);
        }
    }

    #[test]
    fn entrance_spring_is_slightly_overdamped() {
        assert!(ENTRANCE.damping_ratio() > 1.0);
        let mut prev = 0.0;
        for i in 1..200 {
            let p = ENTRANCE.progress(i as f64 * 0.01);
            assert!(p >= prev);
            assert!(p <= 1.0);
            prev = p;
        }
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let bouncy = Spring::new(100.0, 4.0);
        let peak = (1..200)
            .map(|i| bouncy.progress(i as f64 * 0.01))
            .fold(0.0, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn critical_branch_is_continuous_with_neighbours() {
        let crit = Spring::new(100.0, 20.0);
        let near = Spring::new(100.0, 20.0001);
        for t in [0.05, 0.1, 0.3] {
            assert!((crit.progress(t) - near.progress(t)).abs() < 1e-3);
        }
    }

    #[test]
    fn velocity_matches_finite_difference() {
        let h = 1e-5;
        for spring in [ENTRANCE, Spring::new(100.0, 4.0)] {
            let t = 0.2;
            let fd = (spring.progress(t + h) - spring.progress(t - h)) / (2.0 * h);
            assert!((spring.velocity(t) - fd).abs() < 1e-3);
        }
    }

    #[test]
    fn tween_holds_until_delay() {
        let tween = SpringTween {
            from: 100.0,
            to: 0.0,
            delay: 0.5,
            spring: ENTRANCE,
        };
        assert_eq!(tween.sample(0.0), 100.0);
        assert_eq!(tween.sample(0.5), 100.0);
        assert!(tween.sample(0.7) < 100.0);
        assert!(tween.sample(10.0).abs() < 1.0);
        assert!(tween.is_settled(10.0));
        assert!(!tween.is_settled(0.6));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(Spring::new(0.0, 1.0).validate().is_err());
        assert!(Spring::new(1.0, -1.0).validate().is_err());
        assert!(ENTRANCE.validate().is_ok());
    }

    #[test]
    fn css_linear_runs_zero_to_one() {
        let css = ENTRANCE.css_linear(10);
        assert!(css.starts_with("linear(0, "));
        assert!(css.ends_with(", 1)"));
        assert_eq!(css.matches(',').count(), 10);
    }
}
