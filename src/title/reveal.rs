use std::{cell::Cell, rc::Rc, time::Duration};

use crate::{
    animation::{
        ease::Ease,
        spring::{Spring, SpringTween},
        tween::{Repeat, Timing, Tween},
    },
    foundation::core::Rgba8,
    schedule::{Scheduler, TimerHandle},
    title::sequencer::{LetterUnit, Word, sequence},
};

/// Delay between mount and the switch to the pulse animation.
pub const PHASE_DELAY: Duration = Duration::from_millis(2000);

pub const ENTRANCE_SPRING: Spring = Spring::new(150.0, 25.0);
pub const ENTRANCE_RISE_PX: f64 = 100.0;

pub const PULSE_DURATION_SECS: f64 = 2.0;
pub const PULSE_REPEAT_DELAY_SECS: f64 = 3.0;
pub const PULSE_SCALE: [f64; 5] = [1.0, 1.15, 1.0, 1.05, 1.0];
pub const PULSE_GLOW_RADIUS: [f64; 5] = [0.0, 15.0, 0.0, 10.0, 0.0];
pub const PULSE_GLOW_ALPHA: [f64; 5] = [0.0, 0.5, 0.0, 0.3, 0.0];
pub const GLOW_COLOR: Rgba8 = Rgba8::rgb(79, 70, 229);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RevealPhase {
    Entering,
    Pulsing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PhaseState {
    phase: RevealPhase,
    since: Duration,
}

/// Per-letter animation descriptors.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LetterMotion {
    pub rise: SpringTween,
    pub fade: SpringTween,
    /// Pulse tweens, timed relative to the phase flip.
    pub pulse_scale: Tween,
    pub pulse_glow_radius: Tween,
    pub pulse_glow_alpha: Tween,
}

impl LetterMotion {
    pub fn for_letter(letter: &LetterUnit) -> Self {
        let pulse = Timing {
            duration: PULSE_DURATION_SECS,
            delay: letter.pulse_delay,
            ease: Ease::EaseInOut,
            repeat: Repeat::Forever,
            repeat_delay: PULSE_REPEAT_DELAY_SECS,
        };
        Self {
            rise: SpringTween {
                from: ENTRANCE_RISE_PX,
                to: 0.0,
                delay: letter.reveal_delay,
                spring: ENTRANCE_SPRING,
            },
            fade: SpringTween {
                from: 0.0,
                to: 1.0,
                delay: letter.reveal_delay,
                spring: ENTRANCE_SPRING,
            },
            pulse_scale: Tween::new(PULSE_SCALE, pulse),
            pulse_glow_radius: Tween::new(PULSE_GLOW_RADIUS, pulse),
            pulse_glow_alpha: Tween::new(PULSE_GLOW_ALPHA, pulse),
        }
    }
}

/// Rendered state of one letter.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LetterFrame {
    pub character: char,
    pub word_index: usize,
    pub letter_index: usize,
    pub y_offset: f64,
    pub opacity: f64,
    pub scale: f64,
    pub glow_radius: f64,
    pub glow_alpha: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EvaluatedWord {
    pub text: String,
    pub letters: Vec<LetterFrame>,
}

/// A mounted title: owns its phase and the timer that flips it.
///
/// Dropping the component cancels the timer if it has not fired yet.
#[derive(Debug)]
pub struct TitleReveal {
    words: Vec<Word>,
    mounted_at: Duration,
    state: Rc<Cell<PhaseState>>,
    timer: TimerHandle,
}

impl TitleReveal {
    pub fn mount(title: &str, scheduler: &Scheduler) -> Self {
        Self::mount_with_delay(title, scheduler, PHASE_DELAY)
    }

    pub fn mount_with_delay(title: &str, scheduler: &Scheduler, phase_delay: Duration) -> Self {
        let mounted_at = scheduler.now();
        let state = Rc::new(Cell::new(PhaseState {
            phase: RevealPhase::Entering,
            since: mounted_at,
        }));

        let flip_at = mounted_at + phase_delay;
        let cell = Rc::clone(&state);
        let timer = scheduler.schedule_once(phase_delay, move || {
            if cell.get().phase == RevealPhase::Entering {
                cell.set(PhaseState {
                    phase: RevealPhase::Pulsing,
                    since: flip_at,
                });
                tracing::debug!(?flip_at, "title reveal switched to pulsing");
            }
        });

        let words = sequence(title);
        tracing::debug!(words = words.len(), ?mounted_at, "title reveal mounted");
        Self {
            words,
            mounted_at,
            state,
            timer,
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn mounted_at(&self) -> Duration {
        self.mounted_at
    }

    pub fn phase(&self) -> RevealPhase {
        self.state.get().phase
    }

    pub fn pulsing_since(&self) -> Option<Duration> {
        let s = self.state.get();
        (s.phase == RevealPhase::Pulsing).then_some(s.since)
    }

    pub fn is_timer_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Tear the component down, cancelling the pending phase timer.
    pub fn unmount(self) {
        let cancelled = self.timer.cancel();
        tracing::debug!(cancelled, "title reveal unmounted");
    }

    /// Letter states at absolute scheduler time `now`.
    pub fn sample(&self, now: Duration) -> Vec<EvaluatedWord> {
        let since_mount = now.saturating_sub(self.mounted_at).as_secs_f64();
        let pulse_clock = self
            .pulsing_since()
            .map(|since| now.saturating_sub(since).as_secs_f64());

        self.words
            .iter()
            .map(|word| EvaluatedWord {
                text: word.text.clone(),
                letters: word
                    .letters
                    .iter()
                    .map(|letter| sample_letter(letter, since_mount, pulse_clock))
                    .collect(),
            })
            .collect()
    }
}

fn sample_letter(letter: &LetterUnit, since_mount: f64, pulse_clock: Option<f64>) -> LetterFrame {
    let motion = LetterMotion::for_letter(letter);
    let (scale, glow_radius, glow_alpha) = match pulse_clock {
        Some(t) => (
            motion.pulse_scale.sample(t),
            motion.pulse_glow_radius.sample(t),
            motion.pulse_glow_alpha.sample(t),
        ),
        None => (1.0, 0.0, 0.0),
    };
    LetterFrame {
        character: letter.character,
        word_index: letter.word_index,
        letter_index: letter.letter_index,
        y_offset: motion.rise.sample(since_mount),
        opacity: motion.fade.sample(since_mount).clamp(0.0, 1.0),
        scale,
        glow_radius,
        glow_alpha,
    }
}
