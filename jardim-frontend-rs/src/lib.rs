#![deny(clippy::string_slice)]

mod effects;
mod exercise;
mod map;
mod session;
pub mod simulation;
mod snapshot;
mod utils;

pub use effects::{Effect, ScheduledAction, SoundEffect, SpeechRate, SpeechRequest, TimerAction};
pub use map::{MAP_NODE_COUNT, NodeIcon, NodeStatus};
pub use session::{
    EXERCISES_PER_LESSON, FINISH_WORD_DELAY_MS, IRRIGATION_DURATION_MS,
    SPEAK_COMPLETED_WORD_DELAY_MS, SPEAK_WORD_DELAY_MS, Screen, SessionEvent, SessionState,
};
pub use simulation::LessonSimulation;
pub use snapshot::{ExerciseView, MapNodeView, ViewSnapshot};

use std::cell::RefCell;
use std::sync::LazyLock;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn get_available_levels() -> Vec<curriculum_utils::LevelSummary> {
    curriculum_utils::CURRICULUM
        .iter()
        .map(|level| level.summary())
        .collect()
}

// putting this inside LOGGER means the logger gets initialized at most once
static LOGGER: LazyLock<()> = LazyLock::new(|| {
    utils::set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    {
        wasm_logger::init(wasm_logger::Config::default());
        log::info!("Logging initialized");
    }
});

#[derive(Debug, thiserror::Error)]
pub enum GardenError {
    #[error("invalid curriculum: {0}")]
    Curriculum(#[from] curriculum_utils::CurriculumError),
}

impl From<GardenError> for JsValue {
    fn from(error: GardenError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

/// Frontend facade for the JS shell: owns the session state, the seeded RNG,
/// and the queue of effect requests the shell performs.
#[wasm_bindgen]
pub struct Garden {
    session: RefCell<SessionState>,
    rng: RefCell<ChaCha8Rng>,
    pending: RefCell<Vec<Effect>>,
    effect_sink: Option<js_sys::Function>,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl Garden {
    /// The shell passes a seed (anything, Date.now() is fine) and usually an
    /// effect sink; effects are pushed into the sink as they happen. Without
    /// a sink they accumulate until `drain_effects`.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(seed: u64, effect_sink: Option<js_sys::Function>) -> Result<Garden, GardenError> {
        *LOGGER;

        curriculum_utils::validate(curriculum_utils::CURRICULUM)?;

        Ok(Garden {
            session: RefCell::new(SessionState::new()),
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
            pending: RefCell::new(Vec::new()),
            effect_sink,
        })
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn tap_map_node(&self, node_index: usize) {
        self.dispatch(SessionEvent::MapNodeTapped { node_index });
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn tap_syllable_option(&self, syllable: String) {
        self.dispatch(SessionEvent::SyllableTapped { syllable });
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn tap_pictograph(&self) {
        self.dispatch(SessionEvent::PictographTapped);
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn tap_continue(&self) {
        self.dispatch(SessionEvent::ContinueTapped);
    }

    /// Callback for `Effect::Schedule`: the shell's setTimeout lands here with
    /// the action and the epoch it was issued under.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn timer_fired(&self, action: TimerAction, epoch: u64) {
        self.dispatch(SessionEvent::TimerElapsed { action, epoch });
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot::project(&self.session.borrow())
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn streak_count(&self) -> u32 {
        self.session.borrow().streak_count
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn unlocked_node_index(&self) -> usize {
        self.session.borrow().unlocked_node_index
    }

    /// Effects queued since the last drain. Only useful without a sink.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn drain_effects(&self) -> Vec<Effect> {
        self.pending.borrow_mut().drain(..).collect()
    }
}

impl Garden {
    fn dispatch(&self, event: SessionEvent) {
        // flushed on every exit path from this method
        let _flusher = FlushEffects::new(self);

        let state = self.session.take();
        let (state, effects) = state.step(&event, &mut *self.rng.borrow_mut());
        *self.session.borrow_mut() = state;
        self.pending.borrow_mut().extend(effects);
    }

    fn flush_effects(&self) {
        let Some(sink) = &self.effect_sink else {
            return;
        };
        // drain before calling out so a sink callback that re-enters a tap
        // method doesn't hit a double borrow
        let effects: Vec<Effect> = self.pending.borrow_mut().drain(..).collect();
        for effect in effects {
            #[cfg(target_arch = "wasm32")]
            {
                match serde_wasm_bindgen::to_value(&effect) {
                    Ok(value) => {
                        let _ = sink.call1(&JsValue::NULL, &value);
                    }
                    Err(e) => log::error!("failed to serialize effect {effect:?}: {e}"),
                }
            }
            #[cfg(not(target_arch = "wasm32"))]
            let _ = (sink, effect);
        }
    }
}

/// A simple struct that flushes queued effects when dropped. This is useful if
/// you want to ensure you don't forget to flush, regardless of the code path a
/// function takes.
struct FlushEffects<'a> {
    garden: &'a Garden,
}

impl<'a> FlushEffects<'a> {
    fn new(garden: &'a Garden) -> Self {
        Self { garden }
    }
}

impl Drop for FlushEffects<'_> {
    fn drop(&mut self) {
        self.garden.flush_effects();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn garden() -> Garden {
        Garden::new(11, None).expect("shipped curriculum must validate")
    }

    #[test]
    fn facade_walks_the_state_machine() {
        let garden = garden();
        assert_eq!(garden.snapshot().screen, Screen::Map);

        garden.tap_map_node(0);
        let snapshot = garden.snapshot();
        assert_eq!(snapshot.screen, Screen::Exercise);
        let exercise = snapshot.exercise.unwrap();
        assert_eq!(exercise.total, EXERCISES_PER_LESSON);

        // the setup must have queued the delayed speak request
        let effects = garden.drain_effects();
        assert!(effects.iter().any(|effect| matches!(
            effect,
            Effect::Schedule(ScheduledAction { action: TimerAction::SpeakWord, .. })
        )));
    }

    #[test]
    fn locked_node_tap_through_the_facade_is_ignored() {
        let garden = garden();
        garden.tap_map_node(5);
        assert_eq!(garden.snapshot().screen, Screen::Map);
        assert!(garden.drain_effects().is_empty());
    }

    #[test]
    fn same_seed_same_options() {
        let first = garden();
        let second = garden();
        first.tap_map_node(0);
        second.tap_map_node(0);
        assert_eq!(
            first.snapshot().exercise.unwrap().options,
            second.snapshot().exercise.unwrap().options
        );
    }

    #[test]
    fn get_available_levels_lists_the_curriculum() {
        let levels = get_available_levels();
        assert_eq!(levels.len(), curriculum_utils::CURRICULUM.len());
        assert_eq!(levels[0].id, "sementes");
    }
}
