use shared::{
    domain::{GroupKind, ListKind, DEFAULT_STATE, META_DATA_STATE},
    error::SpriteResult,
};
use sprite_tree::SpriteTree;

/// Answers collected by the new-sprite wizard. Blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardInput {
    pub name: String,
    pub version: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub actions: Vec<String>,
    pub flags: Vec<String>,
    pub states: Vec<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// File node named after the sprite, the two required states, and whatever
/// metadata and extra states the wizard collected.
pub fn build_wizard_tree(input: &WizardInput) -> SpriteResult<SpriteTree> {
    let mut tree = SpriteTree::new(input.name.trim());
    let meta = tree.add_state(META_DATA_STATE)?;
    tree.add_state(DEFAULT_STATE)?;

    if let Some(version) = present(&input.version) {
        let parameter = tree.add_parameter(meta, "version")?;
        tree.set_value(parameter, version)?;
    }

    let credit = [
        ("author", present(&input.author)),
        ("description", present(&input.description)),
        ("url", present(&input.url)),
    ];
    if credit.iter().any(|(_, value)| value.is_some()) {
        let credits = tree.add_group(meta, GroupKind::Credits)?;
        let element = tree.add_group_element(credits)?;
        for (field, value) in credit {
            let (Some(value), Some(parameter)) = (value, tree.find_child(element, field)) else {
                continue;
            };
            tree.set_value(parameter, value)?;
        }
    }

    for (kind, items) in [
        (ListKind::Flags, &input.flags),
        (ListKind::Actions, &input.actions),
    ] {
        let items: Vec<&str> = items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .collect();
        if items.is_empty() {
            continue;
        }
        let parameter = tree.add_parameter(meta, kind.name())?;
        for item in items {
            tree.push_list_value(parameter, item)?;
        }
    }

    for state in &input.states {
        let state = state.trim();
        if state.is_empty() || tree.find_child(tree.root(), state).is_some() {
            continue;
        }
        tree.add_state(state)?;
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_labels(tree: &SpriteTree, path: &[&str]) -> Vec<String> {
        let id = tree.resolve_path(path).expect("path exists");
        tree.children(id)
            .iter()
            .map(|child| tree.label(*child).unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn minimal_wizard_produces_required_states_only() {
        let tree = build_wizard_tree(&WizardInput {
            name: "walker.spr".into(),
            ..Default::default()
        })
        .expect("tree");

        assert_eq!(tree.file_name(), "walker.spr");
        assert_eq!(child_labels(&tree, &[]), [META_DATA_STATE, DEFAULT_STATE]);
        assert!(child_labels(&tree, &[META_DATA_STATE]).is_empty());
    }

    #[test]
    fn full_wizard_fills_metadata_and_extra_states() {
        let tree = build_wizard_tree(&WizardInput {
            name: "walker.spr".into(),
            version: Some("1.0".into()),
            author: Some("avian".into()),
            description: Some("  ".into()),
            url: None,
            actions: vec!["walk".into(), "".into(), "jump".into()],
            flags: vec!["solid".into()],
            states: vec![
                "SPRITE_STATE_WALK_LEFT".into(),
                "SPRITE_STATE_DEFAULT".into(),
            ],
        })
        .expect("tree");

        assert_eq!(
            child_labels(&tree, &[]),
            [META_DATA_STATE, DEFAULT_STATE, "SPRITE_STATE_WALK_LEFT"]
        );
        assert_eq!(
            child_labels(&tree, &[META_DATA_STATE]),
            ["version", "credits", "flags", "actions"]
        );
        assert_eq!(
            child_labels(&tree, &[META_DATA_STATE, "credits", "[1]", "author"]),
            ["avian"]
        );
        let description = child_labels(&tree, &[META_DATA_STATE, "credits", "[1]", "description"]);
        assert!(description.is_empty());
        assert_eq!(
            child_labels(&tree, &[META_DATA_STATE, "actions"]),
            ["walk", "jump"]
        );
    }
}
