use std::fmt;

use serde::{Deserialize, Serialize};

pub const META_DATA_STATE: &str = "SPRITE_META_DATA";
pub const DEFAULT_STATE: &str = "SPRITE_STATE_DEFAULT";
pub const ANIMATION_STATE_PREFIX: &str = "SPRITE_STATE_";

/// Parameters offered when adding to a state, in menu order.
pub const KNOWN_STATE_PARAMETERS: [&str; 16] = [
    "uri",
    "flipX",
    "sizeMultiplier",
    "sizeDivider",
    "frameDelay",
    "cropX",
    "cropY",
    "cropW",
    "cropH",
    "offsX",
    "offsY",
    "isChain",
    "usePrevious",
    "autoClose",
    "transparent",
    "walkMultiplier",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeTag {
    File,
    State,
    Parameter,
    Index,
    Value,
}

impl NodeTag {
    /// Tags a node of this kind may hold as direct children.
    pub fn allowed_children(self) -> &'static [NodeTag] {
        match self {
            NodeTag::File => &[NodeTag::State],
            NodeTag::State => &[NodeTag::Parameter, NodeTag::Index],
            NodeTag::Parameter => &[NodeTag::Value],
            NodeTag::Index => &[NodeTag::Index, NodeTag::Parameter],
            NodeTag::Value => &[],
        }
    }

    pub fn can_hold(self, child: NodeTag) -> bool {
        self.allowed_children().contains(&child)
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeTag::File => "File",
            NodeTag::State => "State",
            NodeTag::Parameter => "Parameter",
            NodeTag::Index => "Index",
            NodeTag::Value => "Value",
        };
        f.write_str(name)
    }
}

/// Array-of-object fields. Each element is an object of optional string
/// sub-fields drawn from a fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Credits,
    Fixtures,
    Spawn,
}

impl GroupKind {
    pub const ALL: [GroupKind; 3] = [GroupKind::Credits, GroupKind::Fixtures, GroupKind::Spawn];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "credits" => Some(GroupKind::Credits),
            "fixtures" => Some(GroupKind::Fixtures),
            "spawn" => Some(GroupKind::Spawn),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GroupKind::Credits => "credits",
            GroupKind::Fixtures => "fixtures",
            GroupKind::Spawn => "spawn",
        }
    }

    pub fn fields(self) -> &'static [&'static str] {
        match self {
            GroupKind::Credits => &["author", "description", "url"],
            GroupKind::Fixtures => &["x", "y", "w", "h"],
            GroupKind::Spawn => &["uri", "spawnX", "spawnY", "spawnExplode"],
        }
    }
}

/// Homogeneous string-list fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Actions,
    Flags,
}

impl ListKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "actions" => Some(ListKind::Actions),
            "flags" => Some(ListKind::Flags),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ListKind::Actions => "actions",
            ListKind::Flags => "flags",
        }
    }
}

/// How the next click on the preview image is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickMode {
    #[default]
    None,
    Color,
    X,
    Y,
}

/// Label of the `position`-th (zero based) element of a group.
pub fn group_element_label(position: usize) -> String {
    format!("[{}]", position + 1)
}
