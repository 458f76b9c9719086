//! Side-effect requests the controller hands to the JS shell. The shell owns
//! the actual Web Audio presets and SpeechSynthesis calls; the core only says
//! what it wants to hear.

use curriculum_utils::{Language, Word};

/// One-shot sound cues the shell's audio helper knows how to synthesize.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum SoundEffect {
    Tap,
    Error,
    Success,
    Irrigation,
    Celebration,
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum SpeechRate {
    Normal,
    Slow,
}

impl SpeechRate {
    /// Value for SpeechSynthesisUtterance.rate.
    pub fn value(&self) -> f32 {
        match self {
            SpeechRate::Normal => 0.8,
            SpeechRate::Slow => 0.4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct SpeechRequest {
    pub text: String,
    pub rate: SpeechRate,
    pub language: Language,
    /// Cancel whatever utterance is still playing before starting this one.
    pub interrupt: bool,
}

impl SpeechRequest {
    pub fn word(word: &Word) -> Self {
        SpeechRequest {
            text: word.spoken_form(),
            rate: SpeechRate::Normal,
            language: Language::Portuguese,
            interrupt: false,
        }
    }

    /// The slow re-speak for a pictograph tap. Interrupts, so an impatient
    /// learner tapping repeatedly hears the word once, from the start.
    pub fn word_slowly(word: &Word) -> Self {
        SpeechRequest {
            text: word.spoken_form(),
            rate: SpeechRate::Slow,
            language: Language::Portuguese,
            interrupt: true,
        }
    }

    pub fn syllable(syllable: &str) -> Self {
        SpeechRequest {
            text: syllable.to_lowercase(),
            rate: SpeechRate::Normal,
            language: Language::Portuguese,
            interrupt: false,
        }
    }
}

/// Delayed continuations. The shell performs these with setTimeout and calls
/// back into `timer_fired` with the action and epoch.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum TimerAction {
    /// Speak the current word at normal rate.
    SpeakWord,
    /// The completed-word pause is over; start watering the garden.
    FinishWord,
    /// Watering is done; advance to the next exercise or celebrate.
    EndIrrigation,
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledAction {
    pub delay_ms: u32,
    pub action: TimerAction,
    /// Epoch the continuation was issued under. A firing whose epoch no longer
    /// matches the live state is dropped instead of mutating a later exercise.
    pub epoch: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Effect {
    Sound(SoundEffect),
    Speak(SpeechRequest),
    Schedule(ScheduledAction),
}
