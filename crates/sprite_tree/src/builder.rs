use shared::{
    document::{ParamValue, SpriteDocument},
    domain::{group_element_label, NodeTag},
    error::SpriteResult,
};
use tracing::{debug, warn};

use crate::tree::{NodeId, SpriteTree};

/// Parses sprite JSON and builds its tree. Nothing is returned unless the
/// whole document parsed, so callers can swap the result in atomically.
pub fn parse_sprite(file_name: &str, text: &str) -> SpriteResult<(SpriteDocument, SpriteTree)> {
    let document = SpriteDocument::from_json(file_name, text)?;
    for field in &document.ignored_fields {
        warn!(field = %field, "ignoring field not in the sprite schema");
    }
    let tree = build_tree(&document)?;
    debug!(
        file = file_name,
        states = tree.states().len(),
        nodes = tree.len(),
        "built sprite tree"
    );
    Ok((document, tree))
}

pub fn build_tree(document: &SpriteDocument) -> SpriteResult<SpriteTree> {
    let mut tree = SpriteTree::new(document.file_name.clone());
    for block in &document.blocks {
        let state = tree.add_state(block.name())?;
        for (name, value) in block.parameters() {
            append_parameter(&mut tree, state, &name, &value)?;
        }
    }
    Ok(tree)
}

fn append_parameter(
    tree: &mut SpriteTree,
    state: NodeId,
    name: &str,
    value: &ParamValue,
) -> SpriteResult<()> {
    match value {
        ParamValue::Scalar(text) => {
            let parameter = tree.append(state, NodeTag::Parameter, name)?;
            tree.append(parameter, NodeTag::Value, text.as_str())?;
        }
        ParamValue::List(items) => {
            let parameter = tree.append(state, NodeTag::Parameter, name)?;
            for item in items {
                tree.append(parameter, NodeTag::Value, item.as_str())?;
            }
        }
        ParamValue::Group(entries) => {
            let container = tree.append(state, NodeTag::Index, name)?;
            for (position, entry) in entries.iter().enumerate() {
                let element =
                    tree.append(container, NodeTag::Index, group_element_label(position))?;
                for (field, text) in entry {
                    let parameter = tree.append(element, NodeTag::Parameter, field.as_str())?;
                    tree.append(parameter, NodeTag::Value, text.as_str())?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/builder_tests.rs"]
mod tests;
