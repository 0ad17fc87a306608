use std::time::Duration;

use crate::foundation::error::{HeroError, HeroResult};

pub use kurbo::{BezPath, Point, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> HeroResult<Self> {
        if den == 0 {
            return Err(HeroError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(HeroError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Wall-clock offset of `frame` from the start of the timeline.
    pub fn frame_time(self, frame: FrameIndex) -> HeroResult<Duration> {
        Duration::try_from_secs_f64(self.frames_to_secs(frame.0)).map_err(|_| {
            HeroError::validation(format!("frame {} is out of the timeline range", frame.0))
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn validate(self) -> HeroResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HeroError::validation("canvas width/height must be > 0"));
        }
        Ok(())
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba()` with the alpha channel replaced by `alpha` (clamped to 0..1).
    pub fn css_rgba(self, alpha: f64) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            fmt_num(alpha.clamp(0.0, 1.0))
        )
    }
}

/// Compact decimal formatting for SVG/CSS output: at most 4 fractional digits,
/// trailing zeros trimmed, no negative zero.
pub fn fmt_num(v: f64) -> String {
    let mut s = format!("{:.4}", v);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_rejects_zero_parts() {
        assert!(Fps::new(0, 1).is_err());
        assert!(Fps::new(30, 0).is_err());
    }

    #[test]
    fn frame_time_matches_fps() {
        let fps = Fps::new(30, 1).unwrap();
        assert_eq!(fps.frame_time(FrameIndex(60)).unwrap(), Duration::from_secs(2));
    }

    #[test]
    fn frame_time_out_of_range_is_error() {
        let fps = Fps::new(1, u32::MAX).unwrap();
        assert!(fps.frame_time(FrameIndex(u64::MAX)).is_err());
    }

    #[test]
    fn canvas_validate() {
        assert!(
            Canvas {
                width: 0,
                height: 10
            }
            .validate()
            .is_err()
        );
        assert!(
            Canvas {
                width: 10,
                height: 10
            }
            .validate()
            .is_ok()
        );
    }

    #[test]
    fn fmt_num_trims() {
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(-0.00001), "0");
        assert_eq!(fmt_num(0.123456), "0.1235");
    }

    #[test]
    fn color_formats() {
        let c = Rgba8::rgb(79, 70, 229);
        assert_eq!(c.hex(), "#4f46e5");
        assert_eq!(c.css_rgba(0.5), "rgba(79, 70, 229, 0.5)");
    }
}
