use std::time::Duration;

use crate::{
    animation::{
        ease::Ease,
        tween::{Repeat, Timing, Tween},
    },
    config::{ColorScheme, HeroConfig},
    field::{
        generator::{Direction, PathDescriptor, generate},
        motion::{PathFrame, PathMotion},
    },
    foundation::{core::Rgba8, error::HeroResult},
    schedule::Scheduler,
    title::reveal::{EvaluatedWord, RevealPhase, TitleReveal},
};

/// Fade-in of the title container.
pub const CONTAINER_FADE_SECS: f64 = 2.0;

/// One mounted path field with its per-path motion.
#[derive(Clone, Debug)]
pub struct FieldInstance {
    pub direction: Direction,
    pub scheme: ColorScheme,
    pub paths: Vec<PathDescriptor>,
    pub motions: Vec<PathMotion>,
}

impl FieldInstance {
    /// A field colored the way the landing page pairs it with `direction`.
    pub fn new(direction: Direction, count: usize, seed: u64) -> Self {
        Self::with_scheme(direction, ColorScheme::for_direction(direction), count, seed)
    }

    pub fn with_scheme(direction: Direction, scheme: ColorScheme, count: usize, seed: u64) -> Self {
        let paths = generate(direction, count);
        let motions = paths
            .iter()
            .map(|p| PathMotion::for_path(seed, direction, p))
            .collect();
        Self {
            direction,
            scheme,
            paths,
            motions,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedPath {
    pub id: usize,
    pub d: String,
    /// Arc length in field units, for dash patterns.
    pub length: f64,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    #[serde(flatten)]
    pub frame: PathFrame,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedField {
    pub direction: Direction,
    pub scheme: ColorScheme,
    pub stroke: Rgba8,
    pub paths: Vec<EvaluatedPath>,
}

/// Everything needed to draw the hero at one instant.
#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedHero {
    pub time_secs: f64,
    pub phase: RevealPhase,
    pub container_opacity: f64,
    pub fields: Vec<EvaluatedField>,
    pub words: Vec<EvaluatedWord>,
}

/// The mounted hero: two mirrored path fields behind the animated title.
#[derive(Debug)]
pub struct HeroScene {
    config: HeroConfig,
    fields: Vec<FieldInstance>,
    title: TitleReveal,
    container: Tween,
}

impl HeroScene {
    pub fn mount(config: HeroConfig, scheduler: &Scheduler) -> HeroResult<Self> {
        config.validate()?;

        let fields: Vec<FieldInstance> = [Direction::Right, Direction::Left]
            .into_iter()
            .map(|d| FieldInstance::new(d, config.path_count, config.seed))
            .collect();
        for field in &fields {
            for motion in &field.motions {
                motion.validate()?;
            }
        }

        let container = Tween::new(
            [0.0, 1.0],
            Timing {
                duration: CONTAINER_FADE_SECS,
                delay: 0.0,
                ease: Ease::EaseInOut,
                repeat: Repeat::Once,
                repeat_delay: 0.0,
            },
        );
        container.validate()?;

        let title = TitleReveal::mount_with_delay(&config.title, scheduler, config.phase_delay());
        tracing::debug!(
            paths = config.path_count,
            title = %config.title,
            "hero scene mounted"
        );

        Ok(Self {
            config,
            fields,
            title,
            container,
        })
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    pub fn fields(&self) -> &[FieldInstance] {
        &self.fields
    }

    pub fn title(&self) -> &TitleReveal {
        &self.title
    }

    pub fn unmount(self) {
        self.title.unmount();
    }

    #[tracing::instrument(skip(self))]
    pub fn evaluate(&self, now: Duration) -> EvaluatedHero {
        let t = now.saturating_sub(self.title.mounted_at()).as_secs_f64();
        let theme = self.config.theme;

        let fields = self
            .fields
            .iter()
            .map(|field| EvaluatedField {
                direction: field.direction,
                scheme: field.scheme,
                stroke: field.scheme.stroke(theme),
                paths: field
                    .paths
                    .iter()
                    .zip(&field.motions)
                    .map(|(p, m)| EvaluatedPath {
                        id: p.id,
                        d: p.curve_command(),
                        length: p.length(),
                        stroke_width: p.stroke_width,
                        stroke_opacity: p.stroke_opacity,
                        frame: m.sample(t),
                    })
                    .collect(),
            })
            .collect();

        EvaluatedHero {
            time_secs: t,
            phase: self.title.phase(),
            container_opacity: self.container.sample(t).clamp(0.0, 1.0),
            fields,
            words: self.title.sample(now),
        }
    }
}

/// Mount a scene on a fresh scheduler and evaluate it `at` after mount.
pub fn evaluate_at(config: &HeroConfig, at: Duration) -> HeroResult<EvaluatedHero> {
    let scheduler = Scheduler::new();
    let scene = HeroScene::mount(config.clone(), &scheduler)?;
    scheduler.advance_to(at);
    Ok(scene.evaluate(at))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mounts_two_mirrored_fields() {
        let sched = Scheduler::new();
        let scene = HeroScene::mount(HeroConfig::default(), &sched).unwrap();
        assert_eq!(scene.fields().len(), 2);
        assert_eq!(scene.fields()[0].direction, Direction::Right);
        assert_eq!(scene.fields()[0].scheme, ColorScheme::Primary);
        assert_eq!(scene.fields()[1].direction, Direction::Left);
        assert_eq!(scene.fields()[1].scheme, ColorScheme::Secondary);
        for f in scene.fields() {
            assert_eq!(f.paths.len(), 36);
            assert_eq!(f.motions.len(), 36);
        }
    }

    #[test]
    fn scheme_is_independent_of_direction() {
        let paired = FieldInstance::new(Direction::Left, 4, 7);
        let custom = FieldInstance::with_scheme(Direction::Left, ColorScheme::Primary, 4, 7);
        assert_eq!(paired.scheme, ColorScheme::Secondary);
        assert_eq!(custom.scheme, ColorScheme::Primary);
        assert_eq!(custom.direction, Direction::Left);
        for (a, b) in paired.paths.iter().zip(&custom.paths) {
            assert_eq!(a.curve_command(), b.curve_command());
        }
        for (a, b) in paired.motions.iter().zip(&custom.motions) {
            assert_eq!(a.duration, b.duration);
        }
    }

    #[test]
    fn evaluation_tracks_phase_and_fade() {
        let sched = Scheduler::new();
        let scene = HeroScene::mount(HeroConfig::default(), &sched).unwrap();

        let start = scene.evaluate(sched.now());
        assert_eq!(start.phase, RevealPhase::Entering);
        assert_eq!(start.container_opacity, 0.0);

        sched.advance_to(Duration::from_millis(1000));
        let mid = scene.evaluate(sched.now());
        assert!((mid.container_opacity - 0.5).abs() < 1e-6);

        sched.advance_to(Duration::from_millis(2500));
        let late = scene.evaluate(sched.now());
        assert_eq!(late.phase, RevealPhase::Pulsing);
        assert_eq!(late.container_opacity, 1.0);
    }

    #[test]
    fn evaluate_at_is_deterministic() {
        let cfg = HeroConfig::default();
        let at = Duration::from_millis(3300);
        let a = serde_json::to_string(&evaluate_at(&cfg, at).unwrap()).unwrap();
        let b = serde_json::to_string(&evaluate_at(&cfg, at).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_title_and_zero_paths_render_nothing() {
        let cfg = HeroConfig {
            title: String::new(),
            path_count: 0,
            ..HeroConfig::default()
        };
        let hero = evaluate_at(&cfg, Duration::from_secs(3)).unwrap();
        assert!(hero.words.is_empty());
        assert!(hero.fields.iter().all(|f| f.paths.is_empty()));
    }

    #[test]
    fn invalid_config_fails_to_mount() {
        let cfg = HeroConfig {
            canvas: crate::foundation::core::Canvas {
                width: 0,
                height: 0,
            },
            ..HeroConfig::default()
        };
        assert!(HeroScene::mount(cfg, &Scheduler::new()).is_err());
    }
}
