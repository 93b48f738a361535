use std::fmt::Write as _;

use crate::tree::SpriteTree;

/// Indented text rendering of the tree, one node per line as `Tag: label`.
pub fn render_outline(tree: &SpriteTree) -> String {
    let mut out = String::new();
    for (depth, id) in tree.walk() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        let _ = writeln!(
            out,
            "{:indent$}{}: {}",
            "",
            node.tag(),
            node.label(),
            indent = depth * 2
        );
    }
    out
}
