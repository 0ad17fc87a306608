use crate::{
    animation::ease::Ease,
    foundation::error::{HeroError, HeroResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Repeat {
    Once,
    Forever,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframes {
    pub values: Vec<f64>,
    /// Progress offsets in [0,1], one per value. Evenly spaced when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offsets: Option<Vec<f64>>,
}

impl Keyframes {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            offsets: None,
        }
    }

    pub fn validate(&self) -> HeroResult<()> {
        if self.values.is_empty() {
            return Err(HeroError::animation("keyframes must have at least one value"));
        }
        if let Some(offsets) = &self.offsets {
            if offsets.len() != self.values.len() {
                return Err(HeroError::animation(
                    "keyframe offsets must match the number of values",
                ));
            }
            if offsets.iter().any(|o| !(0.0..=1.0).contains(o)) {
                return Err(HeroError::animation("keyframe offsets must be in [0,1]"));
            }
            if !offsets.windows(2).all(|w| w[0] <= w[1]) {
                return Err(HeroError::animation("keyframe offsets must be sorted"));
            }
        }
        Ok(())
    }

    pub fn first(&self) -> f64 {
        self.values.first().copied().unwrap_or_default()
    }

    pub fn last(&self) -> f64 {
        self.values.last().copied().unwrap_or_default()
    }

    pub fn offset(&self, i: usize) -> f64 {
        match &self.offsets {
            Some(o) => o[i],
            None if self.values.len() <= 1 => 0.0,
            None => i as f64 / (self.values.len() - 1) as f64,
        }
    }

    /// Value at normalized progress `p`, easing each segment independently.
    pub fn at(&self, p: f64, ease: Ease) -> f64 {
        let n = self.values.len();
        if n == 0 {
            return 0.0;
        }
        if n == 1 || p <= self.offset(0) {
            return self.values[0];
        }
        if p >= self.offset(n - 1) {
            return self.values[n - 1];
        }

        let idx = (1..n).find(|&i| self.offset(i) > p).unwrap_or(n - 1);
        let (o0, o1) = (self.offset(idx - 1), self.offset(idx));
        let (a, b) = (self.values[idx - 1], self.values[idx]);
        let span = o1 - o0;
        if span <= 0.0 {
            return b;
        }
        let u = ease.apply((p - o0) / span);
        a + (b - a) * u
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timing {
    pub duration: f64, // seconds, > 0
    #[serde(default)]
    pub delay: f64,
    pub ease: Ease,
    pub repeat: Repeat,
    #[serde(default)]
    pub repeat_delay: f64,
}

impl Timing {
    pub fn validate(&self) -> HeroResult<()> {
        if !(self.duration > 0.0) {
            return Err(HeroError::animation("tween duration must be > 0"));
        }
        if !(self.delay >= 0.0) {
            return Err(HeroError::animation("tween delay must be >= 0"));
        }
        if !(self.repeat_delay >= 0.0) {
            return Err(HeroError::animation("tween repeat delay must be >= 0"));
        }
        Ok(())
    }

    /// Length of one iteration including the pause before the next one.
    pub fn cycle(&self) -> f64 {
        self.duration + self.repeat_delay
    }

    /// Normalized progress through the current iteration, or `None` while
    /// the tween has not started yet.
    pub fn progress(&self, t: f64) -> Option<f64> {
        let local = t - self.delay;
        if local < 0.0 {
            return None;
        }
        match self.repeat {
            Repeat::Once => Some((local / self.duration).min(1.0)),
            Repeat::Forever => {
                let pos = local % self.cycle();
                Some((pos / self.duration).min(1.0))
            }
        }
    }
}

/// Keyframed scalar animation with a repeat policy.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    pub keyframes: Keyframes,
    pub timing: Timing,
}

impl Tween {
    pub fn new(values: impl Into<Vec<f64>>, timing: Timing) -> Self {
        Self {
            keyframes: Keyframes::new(values),
            timing,
        }
    }

    pub fn validate(&self) -> HeroResult<()> {
        self.keyframes.validate()?;
        self.timing.validate()
    }

    pub fn sample(&self, t: f64) -> f64 {
        match self.timing.progress(t) {
            None => self.keyframes.first(),
            Some(p) => self.keyframes.at(p, self.timing.ease),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(duration: f64, repeat: Repeat) -> Timing {
        Timing {
            duration,
            delay: 0.0,
            ease: Ease::Linear,
            repeat,
            repeat_delay: 0.0,
        }
    }

    #[test]
    fn linear_two_keys_interpolates() {
        let tw = Tween::new([0.0, 10.0], timing(10.0, Repeat::Once));
        assert_eq!(tw.sample(5.0), 5.0);
        assert_eq!(tw.sample(20.0), 10.0);
    }

    #[test]
    fn even_offsets_for_three_keys() {
        let tw = Tween::new([0.3, 0.6, 0.3], timing(2.0, Repeat::Once));
        assert!((tw.sample(0.5) - 0.45).abs() < 1e-9);
        assert!((tw.sample(1.0) - 0.6).abs() < 1e-9);
        assert!((tw.sample(1.5) - 0.45).abs() < 1e-9);
    }

    #[test]
    fn forever_wraps_each_cycle() {
        let tw = Tween::new([0.0, 1.0], timing(4.0, Repeat::Forever));
        assert!((tw.sample(1.0) - 0.25).abs() < 1e-9);
        assert!((tw.sample(5.0) - 0.25).abs() < 1e-9);
        assert!((tw.sample(401.0) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn delay_holds_first_value() {
        let mut t = timing(1.0, Repeat::Forever);
        t.delay = 2.0;
        let tw = Tween::new([5.0, 7.0], t);
        assert_eq!(tw.sample(0.0), 5.0);
        assert_eq!(tw.sample(1.99), 5.0);
        assert!((tw.sample(2.5) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn repeat_delay_holds_last_value() {
        let mut t = timing(2.0, Repeat::Forever);
        t.repeat_delay = 3.0;
        let tw = Tween::new([1.0, 2.0], t);
        assert_eq!(tw.sample(3.0), 2.0);
        assert_eq!(tw.sample(4.9), 2.0);
        assert!((tw.sample(6.0) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn explicit_offsets_are_respected() {
        let tw = Tween {
            keyframes: Keyframes {
                values: vec![0.0, 1.0, 0.0],
                offsets: Some(vec![0.0, 0.2, 1.0]),
            },
            timing: timing(1.0, Repeat::Once),
        };
        assert!((tw.sample(0.1) - 0.5).abs() < 1e-9);
        assert!((tw.sample(0.6) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn validation_catches_bad_descriptors() {
        assert!(Tween::new(Vec::<f64>::new(), timing(1.0, Repeat::Once))
            .validate()
            .is_err());
        assert!(Tween::new([0.0], timing(0.0, Repeat::Once))
            .validate()
            .is_err());
        let unsorted = Tween {
            keyframes: Keyframes {
                values: vec![0.0, 1.0],
                offsets: Some(vec![0.8, 0.2]),
            },
            timing: timing(1.0, Repeat::Once),
        };
        assert!(unsorted.validate().is_err());
    }
}
