//! The map trail: a fixed run of nodes cycling over the curriculum levels.

use curriculum_utils::{CURRICULUM, LessonLevel};

pub const MAP_NODE_COUNT: usize = 20;

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum NodeIcon {
    Star,
    Smile,
}

impl NodeIcon {
    fn for_index(index: usize) -> Self {
        if index % 2 == 0 { NodeIcon::Star } else { NodeIcon::Smile }
    }
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum NodeStatus {
    Locked,
    Active,
    Completed,
}

pub fn node_status(index: usize, unlocked_node_index: usize) -> NodeStatus {
    match index.cmp(&unlocked_node_index) {
        std::cmp::Ordering::Less => NodeStatus::Completed,
        std::cmp::Ordering::Equal => NodeStatus::Active,
        std::cmp::Ordering::Greater => NodeStatus::Locked,
    }
}

#[derive(Copy, Clone, Debug)]
pub struct MapNode {
    pub index: usize,
    pub level: &'static LessonLevel,
    pub icon: NodeIcon,
}

/// Level bound to a node. There are more nodes than levels, so levels repeat
/// along the trail.
pub fn node_level(index: usize) -> Option<&'static LessonLevel> {
    if index >= MAP_NODE_COUNT || CURRICULUM.is_empty() {
        return None;
    }
    Some(&CURRICULUM[index % CURRICULUM.len()])
}

pub fn map_nodes() -> impl Iterator<Item = MapNode> {
    (0..MAP_NODE_COUNT).filter_map(|index| {
        let level = node_level(index)?;
        Some(MapNode {
            index,
            level,
            icon: NodeIcon::for_index(index),
        })
    })
}
