use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use shared::{
    domain::{ListKind, NodeTag, DEFAULT_STATE, META_DATA_STATE},
    error::{SpriteError, SpriteResult},
};

use crate::tree::{NodeId, SpriteTree};

/// Serializes the tree as indented sprite JSON. Every scalar is written as a
/// JSON string.
pub fn write_json(tree: &SpriteTree) -> SpriteResult<String> {
    if tree.states().len() < 2 {
        return Err(SpriteError::Validation(format!(
            "Sprite requires at least {META_DATA_STATE} and {DEFAULT_STATE}!"
        )));
    }
    serde_json::to_string_pretty(&FileView { tree })
        .map_err(|err| SpriteError::Validation(format!("failed to encode sprite: {err}")))
}

struct FileView<'a> {
    tree: &'a SpriteTree,
}

struct StateView<'a> {
    tree: &'a SpriteTree,
    state: NodeId,
}

struct ListView<'a> {
    tree: &'a SpriteTree,
    parameter: NodeId,
}

struct GroupView<'a> {
    tree: &'a SpriteTree,
    container: NodeId,
}

struct ElementView<'a> {
    tree: &'a SpriteTree,
    element: NodeId,
}

impl SpriteTree {
    fn text(&self, id: NodeId) -> &str {
        self.label(id).unwrap_or_default()
    }

    fn first_value(&self, parameter: NodeId) -> Option<&str> {
        self.children(parameter).first().map(|value| self.text(*value))
    }
}

impl Serialize for FileView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let states = self.tree.states();
        let mut map = serializer.serialize_map(Some(states.len()))?;
        for state in states {
            map.serialize_entry(
                self.tree.text(*state),
                &StateView {
                    tree: self.tree,
                    state: *state,
                },
            )?;
        }
        map.end()
    }
}

impl Serialize for StateView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tree = self.tree;
        let mut map = serializer.serialize_map(None)?;
        for parameter in tree.children(self.state) {
            let parameter = *parameter;
            let name = tree.text(parameter);
            if tree.tag(parameter) == Some(NodeTag::Index) {
                map.serialize_entry(
                    name,
                    &GroupView {
                        tree,
                        container: parameter,
                    },
                )?;
            } else if ListKind::from_name(name).is_some() {
                if !tree.children(parameter).is_empty() {
                    map.serialize_entry(name, &ListView { tree, parameter })?;
                }
            } else {
                map.serialize_entry(name, tree.first_value(parameter).unwrap_or_default())?;
            }
        }
        map.end()
    }
}

impl Serialize for ListView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let values = self.tree.children(self.parameter);
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(self.tree.text(*value))?;
        }
        seq.end()
    }
}

impl Serialize for GroupView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let elements = self.tree.children(self.container);
        let mut seq = serializer.serialize_seq(Some(elements.len()))?;
        for element in elements {
            seq.serialize_element(&ElementView {
                tree: self.tree,
                element: *element,
            })?;
        }
        seq.end()
    }
}

impl Serialize for ElementView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for field in self.tree.children(self.element) {
            if let Some(value) = self.tree.first_value(*field) {
                map.serialize_entry(self.tree.text(*field), value)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "tests/writer_tests.rs"]
mod tests;
