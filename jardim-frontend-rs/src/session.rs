//! The lesson-progression state machine. All session fields live in one
//! owned [`SessionState`]; every transition goes through [`SessionState::step`],
//! which returns the next state plus the side effects the shell should
//! perform. Nothing in here talks to the DOM, audio, or timers directly.

use curriculum_utils::Word;
use rand::Rng;

use crate::effects::{Effect, ScheduledAction, SoundEffect, SpeechRequest, TimerAction};
use crate::exercise;
use crate::map;

/// Words per lesson. A level with a non-empty pool always yields this many
/// exercises because sampling is with replacement.
pub const EXERCISES_PER_LESSON: usize = 8;

/// Pause between showing the pictograph and speaking the word.
pub const SPEAK_WORD_DELAY_MS: u32 = 800;
/// Pause before the completed word is spoken back in full.
pub const SPEAK_COMPLETED_WORD_DELAY_MS: u32 = 500;
/// Pause between completing a word and the watering reward.
pub const FINISH_WORD_DELAY_MS: u32 = 1500;
/// How long the watering reward runs before the next exercise.
pub const IRRIGATION_DURATION_MS: u32 = 2000;

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Screen {
    Map,
    Exercise,
    Celebration,
}

/// User intents and timer callbacks, as seen by the reducer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    MapNodeTapped { node_index: usize },
    SyllableTapped { syllable: String },
    PictographTapped,
    ContinueTapped,
    TimerElapsed { action: TimerAction, epoch: u64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub screen: Screen,
    /// Highest map node the learner may enter. Never decreases.
    pub unlocked_node_index: usize,
    /// Completed lessons this session. Never decreases.
    pub streak_count: u32,
    pub active_exercises: Vec<Word>,
    pub exercise_index: usize,
    /// Shuffled tappable choices for the current word.
    pub option_pool: Vec<&'static str>,
    /// Correctly placed syllables so far, always a prefix of the current
    /// word's syllable sequence.
    pub matched_syllables: Vec<&'static str>,
    /// True while the watering reward between exercises is running.
    pub irrigating: bool,
    /// Bumped on every exercise setup and screen change. Scheduled
    /// continuations carry the epoch they were issued under and are dropped
    /// when it no longer matches.
    pub epoch: u64,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState {
            screen: Screen::Map,
            unlocked_node_index: 0,
            streak_count: 0,
            active_exercises: Vec::new(),
            exercise_index: 0,
            option_pool: Vec::new(),
            matched_syllables: Vec::new(),
            irrigating: false,
            epoch: 0,
        }
    }

    /// Apply one event. Consumes the state and hands back the next one along
    /// with the effect requests, so a stored-away copy of an old state can
    /// never be mutated by accident.
    pub fn step<R: Rng>(mut self, event: &SessionEvent, rng: &mut R) -> (Self, Vec<Effect>) {
        let mut effects = Vec::new();
        match event {
            SessionEvent::MapNodeTapped { node_index } => {
                self.enter_lesson(*node_index, rng, &mut effects)
            }
            SessionEvent::SyllableTapped { syllable } => {
                self.submit_syllable(syllable, &mut effects)
            }
            SessionEvent::PictographTapped => self.respeak_word(&mut effects),
            SessionEvent::ContinueTapped => self.close_celebration(),
            SessionEvent::TimerElapsed { action, epoch } => {
                self.timer_elapsed(*action, *epoch, rng, &mut effects)
            }
        }
        (self, effects)
    }

    /// The word under the learner's fingers, if the exercise screen is live.
    pub fn current_word(&self) -> Option<Word> {
        if self.screen != Screen::Exercise {
            return None;
        }
        self.active_exercises.get(self.exercise_index).copied()
    }

    pub fn word_complete(&self) -> bool {
        self.current_word()
            .is_some_and(|word| self.matched_syllables.len() == word.syllables.len())
    }

    /// Fraction of the current word already placed, in [0, 1].
    pub fn progress(&self) -> f32 {
        match self.current_word() {
            Some(word) if !word.syllables.is_empty() => {
                self.matched_syllables.len() as f32 / word.syllables.len() as f32
            }
            _ => 0.0,
        }
    }

    /// Growth stage of the garden plant, 0..=4.
    pub fn plant_stage(&self) -> u32 {
        (self.streak_count / 10).min(4)
    }

    fn enter_lesson<R: Rng>(&mut self, node_index: usize, rng: &mut R, effects: &mut Vec<Effect>) {
        if self.screen != Screen::Map {
            return;
        }
        // a locked node is a silent no-op, not an error
        if node_index > self.unlocked_node_index {
            return;
        }
        let Some(level) = map::node_level(node_index) else {
            return;
        };
        let exercises = exercise::sample_exercises(level, EXERCISES_PER_LESSON, rng);
        if exercises.is_empty() {
            log::warn!("level {:?} has no words to practice", level.id);
            return;
        }
        self.active_exercises = exercises;
        self.exercise_index = 0;
        self.screen = Screen::Exercise;
        self.setup_exercise(rng, effects);
    }

    fn setup_exercise<R: Rng>(&mut self, rng: &mut R, effects: &mut Vec<Effect>) {
        self.matched_syllables.clear();
        self.irrigating = false;
        self.epoch += 1;
        let Some(word) = self.current_word() else {
            return;
        };
        self.option_pool =
            exercise::build_option_pool(word, self.exercise_index, &self.active_exercises, rng);
        // give the learner a moment to look at the pictograph first
        effects.push(Effect::Schedule(ScheduledAction {
            delay_ms: SPEAK_WORD_DELAY_MS,
            action: TimerAction::SpeakWord,
            epoch: self.epoch,
        }));
    }

    fn submit_syllable(&mut self, tapped: &str, effects: &mut Vec<Effect>) {
        let Some(word) = self.current_word() else {
            return;
        };
        // the completion window: the word is done, later taps mean nothing
        let Some(&expected) = word.syllables.get(self.matched_syllables.len()) else {
            return;
        };

        effects.push(Effect::Sound(SoundEffect::Tap));
        effects.push(Effect::Speak(SpeechRequest::syllable(tapped)));

        if tapped != expected {
            // nothing was appended, so there is nothing to roll back
            effects.push(Effect::Sound(SoundEffect::Error));
            return;
        }

        self.matched_syllables.push(expected);

        if self.word_complete() {
            effects.push(Effect::Sound(SoundEffect::Success));
            effects.push(Effect::Schedule(ScheduledAction {
                delay_ms: SPEAK_COMPLETED_WORD_DELAY_MS,
                action: TimerAction::SpeakWord,
                epoch: self.epoch,
            }));
            effects.push(Effect::Schedule(ScheduledAction {
                delay_ms: FINISH_WORD_DELAY_MS,
                action: TimerAction::FinishWord,
                epoch: self.epoch,
            }));
        }
    }

    fn respeak_word(&mut self, effects: &mut Vec<Effect>) {
        if let Some(word) = self.current_word() {
            effects.push(Effect::Speak(SpeechRequest::word_slowly(&word)));
        }
    }

    fn timer_elapsed<R: Rng>(
        &mut self,
        action: TimerAction,
        epoch: u64,
        rng: &mut R,
        effects: &mut Vec<Effect>,
    ) {
        if epoch != self.epoch {
            log::debug!(
                "dropping stale {action:?} timer (issued at epoch {epoch}, now {})",
                self.epoch
            );
            return;
        }
        match action {
            TimerAction::SpeakWord => {
                if let Some(word) = self.current_word() {
                    effects.push(Effect::Speak(SpeechRequest::word(&word)));
                }
            }
            TimerAction::FinishWord => self.finish_word(effects),
            TimerAction::EndIrrigation => self.advance_exercise(rng, effects),
        }
    }

    fn finish_word(&mut self, effects: &mut Vec<Effect>) {
        if !self.word_complete() {
            return;
        }
        self.irrigating = true;
        effects.push(Effect::Sound(SoundEffect::Irrigation));
        effects.push(Effect::Schedule(ScheduledAction {
            delay_ms: IRRIGATION_DURATION_MS,
            action: TimerAction::EndIrrigation,
            epoch: self.epoch,
        }));
    }

    fn advance_exercise<R: Rng>(&mut self, rng: &mut R, effects: &mut Vec<Effect>) {
        self.irrigating = false;
        if self.exercise_index + 1 < self.active_exercises.len() {
            self.exercise_index += 1;
            self.setup_exercise(rng, effects);
        } else {
            self.screen = Screen::Celebration;
            self.epoch += 1;
            effects.push(Effect::Sound(SoundEffect::Celebration));
        }
    }

    fn close_celebration(&mut self) {
        if self.screen != Screen::Celebration {
            return;
        }
        self.streak_count += 1;
        // unlocking saturates at the final node; there is nothing past it
        self.unlocked_node_index = (self.unlocked_node_index + 1).min(map::MAP_NODE_COUNT - 1);
        self.screen = Screen::Map;
        self.epoch += 1;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new()
    }
}
