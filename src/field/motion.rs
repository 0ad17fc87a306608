use crate::{
    animation::{
        ease::Ease,
        tween::{Repeat, Timing, Tween},
    },
    field::generator::{Direction, PathDescriptor},
    foundation::{
        error::HeroResult,
        rng::{Rng64, stable_hash64},
    },
};

pub const MIN_LOOP_SECS: f64 = 20.0;
pub const MAX_LOOP_SECS: f64 = 30.0;

/// Animated properties of one path at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PathFrame {
    /// Visible fraction of the path, 0..1.
    pub path_length: f64,
    pub opacity: f64,
    /// Start of the visible dash along the path, 0..1.
    pub path_offset: f64,
}

impl PathFrame {
    /// State before the loop starts.
    pub const INITIAL: Self = Self {
        path_length: 0.3,
        opacity: 0.6,
        path_offset: 0.0,
    };
}

/// Three independent infinite linear loops sharing one randomized duration.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PathMotion {
    pub duration: f64,
    pub path_length: Tween,
    pub opacity: Tween,
    pub path_offset: Tween,
}

impl PathMotion {
    pub fn with_duration(duration: f64) -> Self {
        let timing = Timing {
            duration,
            delay: 0.0,
            ease: Ease::Linear,
            repeat: Repeat::Forever,
            repeat_delay: 0.0,
        };
        Self {
            duration,
            path_length: Tween::new([0.3, 1.0], timing),
            opacity: Tween::new([0.3, 0.6, 0.3], timing),
            path_offset: Tween::new([0.0, 1.0, 0.0], timing),
        }
    }

    /// Motion for `path`, with its loop duration drawn once in
    /// [MIN_LOOP_SECS, MAX_LOOP_SECS) from a stream keyed by field and path id.
    pub fn for_path(seed: u64, direction: Direction, path: &PathDescriptor) -> Self {
        let label = format!("{}/{}", direction.label(), path.id);
        let mut rng = Rng64::new(stable_hash64(seed, &label));
        Self::with_duration(rng.range_f64(MIN_LOOP_SECS, MAX_LOOP_SECS))
    }

    pub fn validate(&self) -> HeroResult<()> {
        self.path_length.validate()?;
        self.opacity.validate()?;
        self.path_offset.validate()
    }

    pub fn sample(&self, t: f64) -> PathFrame {
        if t < 0.0 {
            return PathFrame::INITIAL;
        }
        PathFrame {
            path_length: self.path_length.sample(t),
            opacity: self.opacity.sample(t),
            path_offset: self.path_offset.sample(t),
        }
    }
}
