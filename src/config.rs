use std::{path::Path, time::Duration};

use anyhow::Context as _;

use crate::{
    field::generator::{DEFAULT_PATH_COUNT, Direction},
    foundation::{
        core::{Canvas, Fps, Rgba8},
        error::{HeroError, HeroResult},
    },
    title::reveal::PHASE_DELAY,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Stroke palette of a path field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Primary,
    Secondary,
}

impl ColorScheme {
    pub fn stroke(self, theme: Theme) -> Rgba8 {
        match (self, theme) {
            (Self::Primary, Theme::Light) => Rgba8::rgb(147, 51, 234), // purple-600
            (Self::Primary, Theme::Dark) => Rgba8::rgb(192, 132, 252), // purple-400
            (Self::Secondary, Theme::Light) => Rgba8::rgb(8, 145, 178), // cyan-600
            (Self::Secondary, Theme::Dark) => Rgba8::rgb(34, 211, 238), // cyan-400
        }
    }

    /// The scheme the landing page pairs with a field direction.
    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Right => Self::Primary,
            Direction::Left => Self::Secondary,
        }
    }
}

/// Colors for everything that is not a path stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: [Rgba8; 3],
    pub title_gradient: [Rgba8; 2],
    pub overlay_tint: [Rgba8; 2],
    pub dot: Rgba8,
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                // indigo-50 -> purple-50 -> blue-100
                background: [
                    Rgba8::rgb(238, 242, 255),
                    Rgba8::rgb(250, 245, 255),
                    Rgba8::rgb(219, 234, 254),
                ],
                // indigo-600 -> purple-600
                title_gradient: [Rgba8::rgb(79, 70, 229), Rgba8::rgb(147, 51, 234)],
                overlay_tint: [Rgba8::rgb(236, 72, 153), Rgba8::rgb(6, 182, 212)],
                dot: Rgba8::rgb(55, 48, 163),
            },
            Self::Dark => Palette {
                // indigo-950 -> purple-950 -> blue-900
                background: [
                    Rgba8::rgb(30, 27, 75),
                    Rgba8::rgb(59, 7, 100),
                    Rgba8::rgb(30, 58, 138),
                ],
                // indigo-400 -> purple-400
                title_gradient: [Rgba8::rgb(129, 140, 248), Rgba8::rgb(192, 132, 252)],
                overlay_tint: [Rgba8::rgb(236, 72, 153), Rgba8::rgb(6, 182, 212)],
                dot: Rgba8::rgb(55, 48, 163),
            },
        }
    }

    /// Alpha of the gradient overlay and the dot pattern.
    pub fn overlay_alpha(self) -> (f64, f64) {
        match self {
            Self::Light => (0.1, 0.05),
            Self::Dark => (0.2, 0.1),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Icons {
    pub icon: String,
    pub shortcut: String,
    pub apple: String,
}

impl Default for Icons {
    fn default() -> Self {
        Self {
            icon: "/favicon.ico".to_string(),
            shortcut: "/favicon.ico".to_string(),
            apple: "/favicon.ico".to_string(),
        }
    }
}

/// Static head metadata of the landing page.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub icons: Icons,
    pub generator: String,
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self {
            title: "xRouter".to_string(),
            description: "AI-Routed Futures".to_string(),
            icons: Icons::default(),
            generator: "xRouter.ai".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub title: String,
    pub path_count: usize,
    /// Seed for the per-path loop durations.
    pub seed: u64,
    pub canvas: Canvas,
    pub fps: Fps,
    pub theme: Theme,
    pub phase_delay_ms: u64,
    pub metadata: PageMetadata,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            title: "xRouter".to_string(),
            path_count: DEFAULT_PATH_COUNT,
            seed: 1,
            canvas: Canvas {
                width: 1280,
                height: 720,
            },
            fps: Fps { num: 30, den: 1 },
            theme: Theme::Light,
            phase_delay_ms: PHASE_DELAY.as_millis() as u64,
            metadata: PageMetadata::default(),
        }
    }
}

impl HeroConfig {
    pub fn from_json_str(s: &str) -> HeroResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_path(path: &Path) -> HeroResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> HeroResult<()> {
        self.canvas.validate()?;
        Fps::new(self.fps.num, self.fps.den)?;
        if self.metadata.title.trim().is_empty() {
            return Err(HeroError::validation("metadata title must be non-empty"));
        }
        Ok(())
    }

    pub fn phase_delay(&self) -> Duration {
        Duration::from_millis(self.phase_delay_ms)
    }
}
