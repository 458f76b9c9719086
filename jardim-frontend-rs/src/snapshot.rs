//! Read-only projection of the session for the JS shell. The shell renders
//! whatever this says and nothing else; resolving the static catalog data
//! into owned strings happens here, at the boundary.

use crate::map::{self, NodeIcon, NodeStatus};
use crate::session::{Screen, SessionState};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub screen: Screen,
    pub streak_count: u32,
    pub plant_stage: u32,
    pub map_nodes: Vec<MapNodeView>,
    /// None while no word is current (the render-before-setup frame); the
    /// shell shows its loading placeholder instead of crashing.
    pub exercise: Option<ExerciseView>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct MapNodeView {
    pub index: usize,
    pub title: String,
    pub icon: NodeIcon,
    pub status: NodeStatus,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseView {
    pub emoji: String,
    /// How many answer slots to draw. The full word is never shown, only
    /// spoken.
    pub syllable_count: usize,
    pub matched_syllables: Vec<String>,
    pub options: Vec<String>,
    pub progress: f32,
    /// 1-based position for the "3 / 8" counter.
    pub position: usize,
    pub total: usize,
    pub irrigating: bool,
}

impl ViewSnapshot {
    pub fn project(state: &SessionState) -> Self {
        let map_nodes = map::map_nodes()
            .map(|node| MapNodeView {
                index: node.index,
                title: node.level.title.to_string(),
                icon: node.icon,
                status: map::node_status(node.index, state.unlocked_node_index),
            })
            .collect();

        let exercise = state.current_word().map(|word| ExerciseView {
            emoji: word.emoji.to_string(),
            syllable_count: word.syllable_count(),
            matched_syllables: state
                .matched_syllables
                .iter()
                .map(|syllable| syllable.to_string())
                .collect(),
            options: state
                .option_pool
                .iter()
                .map(|syllable| syllable.to_string())
                .collect(),
            progress: state.progress(),
            position: state.exercise_index + 1,
            total: state.active_exercises.len(),
            irrigating: state.irrigating,
        });

        ViewSnapshot {
            screen: state.screen,
            streak_count: state.streak_count,
            plant_stage: state.plant_stage(),
            map_nodes,
            exercise,
        }
    }
}
