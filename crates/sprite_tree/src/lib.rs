//! Ordered, labelled editing tree for sprite definition files and the
//! mapping between that tree and sprite JSON.

mod builder;
mod naming;
mod outline;
mod tree;
mod writer;

pub use builder::{build_tree, parse_sprite};
pub use naming::next_state_name;
pub use outline::render_outline;
pub use tree::{Node, NodeId, SpriteTree};
pub use writer::write_json;
