//! Animated landing page hero for xRouter.
//!
//! The hero is two mirrored fields of flowing Bezier paths behind a title whose
//! letters rise in one by one and, two seconds after mount, start to pulse.
//!
//! # Pipeline overview
//!
//! 1. **Describe**: pure generators turn a direction/count into path geometry
//!    ([`generate`]) and a title into staggered letters ([`sequence`]).
//! 2. **Mount**: [`HeroScene::mount`] attaches per-path motion and the title
//!    component, whose phase timer lives on a [`Scheduler`].
//! 3. **Evaluate**: [`HeroScene::evaluate`] samples every animation at a point in
//!    time into an [`EvaluatedHero`].
//! 4. **Output**: an SVG frame ([`render_frame_svg`]), a PNG via [`Rasterizer`],
//!    or the live HTML page ([`render_document`]) driven by CSS keyframes
//!    generated from the same descriptors.
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod field;
pub mod foundation;
pub mod page;
pub mod render;
pub mod scene;
pub mod schedule;
pub mod title;

pub use animation::ease::Ease;
pub use animation::spring::{Spring, SpringTween};
pub use animation::tween::{Keyframes, Repeat, Timing, Tween};
pub use config::{ColorScheme, HeroConfig, Icons, PageMetadata, Palette, Theme};
pub use field::generator::{
    DEFAULT_PATH_COUNT, Direction, FIELD_VIEWBOX, PathDescriptor, generate,
};
pub use field::motion::{PathFrame, PathMotion};
pub use foundation::core::{BezPath, Canvas, Fps, FrameIndex, Point, Rgba8, Vec2};
pub use foundation::error::{HeroError, HeroResult};
pub use page::{render_document, write_document};
pub use render::raster::{FrameRgba, Rasterizer, write_png};
pub use render::svg::render_frame_svg;
pub use scene::{
    EvaluatedField, EvaluatedHero, EvaluatedPath, FieldInstance, HeroScene, evaluate_at,
};
pub use schedule::{Scheduler, TimerHandle};
pub use title::reveal::{
    EvaluatedWord, LetterFrame, LetterMotion, PHASE_DELAY, RevealPhase, TitleReveal,
};
pub use title::sequencer::{LetterUnit, Word, sequence};
