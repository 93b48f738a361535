use shared::{
    domain::{GroupKind, NodeTag},
    error::SpriteError,
};

use super::*;

fn sample_tree() -> (SpriteTree, NodeId, NodeId) {
    let mut tree = SpriteTree::new("walker.spr");
    let meta = tree.add_state("SPRITE_META_DATA").expect("meta");
    let default = tree.add_state("SPRITE_STATE_DEFAULT").expect("default");
    (tree, meta, default)
}

fn labels(tree: &SpriteTree, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .map(|id| tree.label(*id).unwrap_or_default().to_string())
        .collect()
}

#[test]
fn parameters_can_only_be_added_to_states() {
    let (mut tree, meta, _) = sample_tree();
    let version = tree.add_parameter(meta, "version").expect("param");

    let err = tree.add_parameter(version, "uri").expect_err("not a state");
    assert!(matches!(err, SpriteError::Selection { .. }));
    assert_eq!(
        err.to_string(),
        "Please select a STATE in the tree to add the parameter to."
    );
}

#[test]
fn scalar_parameter_holds_one_value() {
    let (mut tree, _, default) = sample_tree();
    let uri = tree.add_parameter(default, "uri").expect("param");
    tree.append(uri, NodeTag::Value, "a.png").expect("first value");

    let err = tree
        .append(uri, NodeTag::Value, "b.png")
        .expect_err("second value");
    assert!(matches!(err, SpriteError::Validation(_)));
}

#[test]
fn list_parameter_holds_many_values() {
    let (mut tree, meta, _) = sample_tree();
    let actions = tree.add_parameter(meta, "actions").expect("param");
    tree.push_list_value(actions, "walk").expect("walk");
    tree.push_list_value(actions, "jump").expect("jump");

    assert_eq!(labels(&tree, tree.children(actions)), ["walk", "jump"]);

    let version = tree.add_parameter(meta, "version").expect("param");
    assert!(tree.push_list_value(version, "x").is_err());
}

#[test]
fn value_nodes_are_leaves() {
    let (mut tree, meta, _) = sample_tree();
    let version = tree.add_parameter(meta, "version").expect("param");
    let value = tree.set_value(version, "1.0").expect("value");

    assert!(tree.append(value, NodeTag::Value, "nested").is_err());
}

#[test]
fn set_value_creates_then_overwrites() {
    let (mut tree, _, default) = sample_tree();
    let crop = tree.add_parameter(default, "cropX").expect("param");

    let value = tree.set_value(crop, "10").expect("create");
    assert_eq!(tree.label(value), Some("10"));

    let same = tree.set_value(crop, "12").expect("overwrite via parameter");
    assert_eq!(same, value);
    tree.set_value(value, "14").expect("overwrite via value");
    assert_eq!(labels(&tree, tree.children(crop)), ["14"]);

    assert!(tree.set_value(default, "nope").is_err());
}

#[test]
fn add_group_element_fills_fixed_sub_fields() {
    let (mut tree, meta, default) = sample_tree();
    let fixtures = tree.add_group(default, GroupKind::Fixtures).expect("group");
    let first = tree.add_group_element(fixtures).expect("[1]");
    let second = tree.add_group_element(first).expect("[2] from element");

    assert_eq!(labels(&tree, tree.children(fixtures)), ["[1]", "[2]"]);
    assert_eq!(labels(&tree, tree.children(second)), ["x", "y", "w", "h"]);

    let spawn = tree.add_group(meta, GroupKind::Spawn).expect("spawn");
    let entry = tree.add_group_element(spawn).expect("spawn entry");
    assert_eq!(
        labels(&tree, tree.children(entry)),
        ["uri", "spawnX", "spawnY", "spawnExplode"]
    );
}

#[test]
fn add_group_reuses_existing_container() {
    let (mut tree, meta, _) = sample_tree();
    let first = tree.add_group(meta, GroupKind::Credits).expect("credits");
    let again = tree.add_group(meta, GroupKind::Credits).expect("credits");
    assert_eq!(first, again);
    assert_eq!(tree.children(meta).len(), 1);
}

#[test]
fn removing_group_element_renumbers_siblings() {
    let (mut tree, meta, _) = sample_tree();
    let credits = tree.add_group(meta, GroupKind::Credits).expect("credits");
    let first = tree.add_group_element(credits).expect("[1]");
    tree.add_group_element(credits).expect("[2]");
    tree.add_group_element(credits).expect("[3]");
    let before = tree.len();

    tree.remove(first).expect("remove [1]");

    assert_eq!(labels(&tree, tree.children(credits)), ["[1]", "[2]"]);
    assert_eq!(tree.len(), before - 4);
    assert!(tree.node(first).is_none());
}

#[test]
fn group_element_labels_cannot_be_renamed() {
    let (mut tree, meta, _) = sample_tree();
    let credits = tree.add_group(meta, GroupKind::Credits).expect("credits");
    let element = tree.add_group_element(credits).expect("[1]");
    assert!(tree.rename(element, "[7]").is_err());
    tree.rename(meta, "SPRITE_META_DATA").expect("state rename");
}

#[test]
fn file_node_cannot_be_removed_but_tree_can_be_cleared() {
    let (mut tree, _, _) = sample_tree();
    assert!(tree.remove(tree.root()).is_err());

    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.file_name(), "walker.spr");
    assert_eq!(tree.len(), 1);
}

#[test]
fn states_move_within_bounds() {
    let (mut tree, meta, default) = sample_tree();
    assert!(!tree.move_up(meta).expect("move"));
    assert!(tree.move_down(meta).expect("move"));
    assert_eq!(tree.states(), [default, meta]);
    assert!(!tree.move_down(meta).expect("move"));
}

#[test]
fn increment_inserts_after_source_with_unique_name() {
    let (mut tree, _, default) = sample_tree();
    let walk = tree.add_state("SPRITE_STATE_WALK").expect("walk");
    tree.add_state("SPRITE_STATE_WALK_0").expect("walk_0");
    tree.move_up(walk).expect("move");
    tree.move_up(walk).expect("move");

    let next = tree.increment_state(walk).expect("increment");

    assert_eq!(tree.label(next), Some("SPRITE_STATE_WALK_1"));
    let position = tree.states().iter().position(|id| *id == next);
    assert_eq!(position, Some(1));
    assert!(tree.children(next).is_empty());
    assert!(tree.increment_state(tree.root()).is_err());
    assert!(tree.states().contains(&default));
}

#[test]
fn resolves_label_paths_and_full_paths() {
    let (mut tree, _, default) = sample_tree();
    let uri = tree.add_parameter(default, "uri").expect("param");
    let value = tree.set_value(uri, "a.png").expect("value");

    assert_eq!(
        tree.resolve_path(&["SPRITE_STATE_DEFAULT", "uri"]),
        Some(uri)
    );
    assert_eq!(tree.resolve_path(&["SPRITE_STATE_DEFAULT", "cropX"]), None);
    assert_eq!(
        tree.full_path(value),
        "walker.spr\\SPRITE_STATE_DEFAULT\\uri\\a.png"
    );
}

#[test]
fn removed_ids_are_reported_as_stale() {
    let (mut tree, meta, _) = sample_tree();
    tree.remove(meta).expect("remove");
    let err = tree.add_parameter(meta, "version").expect_err("stale");
    assert!(matches!(err, SpriteError::Selection { .. }));
}

#[test]
fn sibling_states_and_parameters_keep_unique_names() {
    let (mut tree, meta, default) = sample_tree();
    let err = tree
        .add_state("SPRITE_STATE_DEFAULT")
        .expect_err("duplicate state");
    assert!(matches!(err, SpriteError::Validation(_)));
    assert_eq!(tree.states().len(), 2);

    let uri = tree.add_parameter(default, "uri").expect("uri");
    let crop = tree.add_parameter(default, "cropX").expect("cropX");
    assert!(tree.add_parameter(default, "uri").is_err());
    assert!(tree.rename(crop, "uri").is_err());
    tree.rename(uri, "uri").expect("same name");
    tree.add_parameter(meta, "uri").expect("other state");
    assert!(tree.rename(meta, "SPRITE_STATE_DEFAULT").is_err());

    let actions = tree.add_parameter(meta, "actions").expect("actions");
    tree.push_list_value(actions, "walk").expect("walk");
    tree.push_list_value(actions, "walk").expect("repeated value");
}

#[test]
fn group_cannot_replace_a_plain_parameter_of_the_same_name() {
    let (mut tree, _, default) = sample_tree();
    let run = tree.add_state("SPRITE_STATE_RUN").expect("run");
    tree.append(run, NodeTag::Parameter, "fixtures")
        .expect("plain parameter");

    let err = tree
        .add_group(run, GroupKind::Fixtures)
        .expect_err("name taken");
    assert!(matches!(err, SpriteError::Validation(_)));
    assert_eq!(tree.children(run).len(), 1);
    tree.add_group(default, GroupKind::Fixtures).expect("free name");
}
