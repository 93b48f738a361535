use shared::{
    domain::{group_element_label, GroupKind, ListKind, NodeTag},
    error::{SpriteError, SpriteResult},
};
use tracing::debug;

use crate::naming::next_state_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct Node {
    tag: NodeTag,
    label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn tag(&self) -> NodeTag {
        self.tag
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena-backed editing tree. The root is always a `File` node; removed
/// subtrees leave empty slots so ids handed out earlier never alias a
/// different node.
#[derive(Debug, Clone)]
pub struct SpriteTree {
    nodes: Vec<Option<Node>>,
    root: NodeId,
}

impl SpriteTree {
    pub fn new(file_name: impl Into<String>) -> Self {
        let root = Node {
            tag: NodeTag::File,
            label: file_name.into(),
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![Some(root)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn file_name(&self) -> &str {
        self.nodes[self.root.0]
            .as_ref()
            .map(Node::label)
            .unwrap_or_default()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn get(&self, id: NodeId) -> SpriteResult<&Node> {
        self.node(id).ok_or_else(|| {
            SpriteError::selection(&[], "The selected node no longer exists in the tree.")
        })
    }

    fn get_mut(&mut self, id: NodeId) -> SpriteResult<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| {
                SpriteError::selection(&[], "The selected node no longer exists in the tree.")
            })
    }

    pub fn tag(&self, id: NodeId) -> Option<NodeTag> {
        self.node(id).map(Node::tag)
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(Node::label)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or_default()
    }

    pub fn states(&self) -> &[NodeId] {
        self.children(self.root)
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.states().is_empty()
    }

    pub fn find_child(&self, parent: NodeId, label: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|child| self.label(*child) == Some(label))
    }

    /// Follows labels down from the root, e.g. `["SPRITE_STATE_DEFAULT", "uri"]`.
    pub fn resolve_path<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeId> {
        path.iter()
            .try_fold(self.root, |at, label| self.find_child(at, label.as_ref()))
    }

    /// Labels from the root down to `id`, joined with `\`.
    pub fn full_path(&self, id: NodeId) -> String {
        let mut labels = Vec::new();
        let mut at = Some(id);
        while let Some(current) = at {
            let Some(node) = self.node(current) else {
                break;
            };
            labels.push(node.label.as_str());
            at = node.parent;
        }
        labels.reverse();
        labels.join("\\")
    }

    /// Depth-first, pre-order walk yielding `(depth, id)`.
    pub fn walk(&self) -> Vec<(usize, NodeId)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(0, self.root)];
        while let Some((depth, id)) = stack.pop() {
            out.push((depth, id));
            for child in self.children(id).iter().rev() {
                stack.push((depth + 1, *child));
            }
        }
        out
    }

    /// True for `[n]` nodes, i.e. Index nodes directly under a group container.
    pub fn is_group_element(&self, id: NodeId) -> bool {
        self.tag(id) == Some(NodeTag::Index)
            && self
                .node(id)
                .and_then(Node::parent)
                .and_then(|parent| self.tag(parent))
                == Some(NodeTag::Index)
    }

    pub fn is_list_parameter(&self, id: NodeId) -> bool {
        self.tag(id) == Some(NodeTag::Parameter)
            && self.label(id).and_then(ListKind::from_name).is_some()
    }

    /// Checked insertion. Enforces the tag rules: a File holds States, a
    /// State holds Parameters and group containers, a container holds `[n]`
    /// elements, an element holds Parameters, and a scalar Parameter holds at
    /// most one Value.
    pub fn append(
        &mut self,
        parent: NodeId,
        tag: NodeTag,
        label: impl Into<String>,
    ) -> SpriteResult<NodeId> {
        let parent_tag = self.get(parent)?.tag;
        let allowed = if parent_tag == NodeTag::Index {
            if self.is_group_element(parent) {
                tag == NodeTag::Parameter
            } else {
                tag == NodeTag::Index
            }
        } else {
            parent_tag.can_hold(tag)
        };
        if !allowed {
            return Err(SpriteError::selection(
                &[parent_tag],
                format!("A {parent_tag} node cannot hold a {tag} node."),
            ));
        }
        if parent_tag == NodeTag::Parameter
            && !self.is_list_parameter(parent)
            && !self.children(parent).is_empty()
        {
            return Err(SpriteError::Validation(format!(
                "Parameter '{}' already holds a value.",
                self.label(parent).unwrap_or_default()
            )));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node {
            tag,
            label: label.into(),
            parent: Some(parent),
            children: Vec::new(),
        }));
        self.get_mut(parent)?.children.push(id);
        Ok(id)
    }

    fn ensure_unique_label(
        &self,
        parent: NodeId,
        label: &str,
        except: Option<NodeId>,
    ) -> SpriteResult<()> {
        let taken = self
            .children(parent)
            .iter()
            .any(|child| Some(*child) != except && self.label(*child) == Some(label));
        if taken {
            return Err(SpriteError::Validation(format!(
                "'{label}' already exists in '{}'.",
                self.label(parent).unwrap_or_default()
            )));
        }
        Ok(())
    }

    fn require(&self, id: NodeId, tags: &[NodeTag], message: &str) -> SpriteResult<&Node> {
        let node = self.get(id)?;
        if tags.contains(&node.tag) {
            Ok(node)
        } else {
            Err(SpriteError::selection(tags, message))
        }
    }

    /// State names are unique within the file.
    pub fn add_state(&mut self, name: impl Into<String>) -> SpriteResult<NodeId> {
        let name = name.into();
        self.ensure_unique_label(self.root, &name, None)?;
        self.append(self.root, NodeTag::State, name)
    }

    pub fn add_parameter(&mut self, state: NodeId, name: &str) -> SpriteResult<NodeId> {
        self.require(
            state,
            &[NodeTag::State],
            "Please select a STATE in the tree to add the parameter to.",
        )?;
        reject_group_name(name)?;
        self.ensure_unique_label(state, name, None)?;
        let id = self.append(state, NodeTag::Parameter, name)?;
        debug!(state = ?state, parameter = name, "added parameter");
        Ok(id)
    }

    /// Returns the existing container when the state already has one.
    pub fn add_group(&mut self, state: NodeId, kind: GroupKind) -> SpriteResult<NodeId> {
        self.require(
            state,
            &[NodeTag::State],
            "Please select a STATE in the tree to add the group to.",
        )?;
        if let Some(existing) = self.find_child(state, kind.name()) {
            if self.tag(existing) == Some(NodeTag::Index) {
                return Ok(existing);
            }
            return Err(SpriteError::Validation(format!(
                "'{}' already holds a plain value; delete it before adding the group.",
                kind.name()
            )));
        }
        self.append(state, NodeTag::Index, kind.name())
    }

    /// Appends `[n+1]` to the group that `index` is, or belongs to, with one
    /// empty Parameter per sub-field of that group.
    pub fn add_group_element(&mut self, index: NodeId) -> SpriteResult<NodeId> {
        self.require(
            index,
            &[NodeTag::Index],
            "Please select a group or group entry in the tree.",
        )?;
        let container = if self.is_group_element(index) {
            self.get(index)?.parent.unwrap_or(index)
        } else {
            index
        };
        let name = self.label(container).unwrap_or_default().to_string();
        let kind = GroupKind::from_name(&name).ok_or_else(|| {
            SpriteError::Validation(format!("'{name}' is not a credits, fixtures or spawn group."))
        })?;

        let label = group_element_label(self.children(container).len());
        let element = self.append(container, NodeTag::Index, label)?;
        for field in kind.fields() {
            self.append(element, NodeTag::Parameter, *field)?;
        }
        debug!(group = kind.name(), "added group element");
        Ok(element)
    }

    pub fn push_list_value(&mut self, parameter: NodeId, text: &str) -> SpriteResult<NodeId> {
        if !self.is_list_parameter(parameter) {
            return Err(SpriteError::selection(
                &[NodeTag::Parameter],
                "Please select an 'actions' or 'flags' parameter in the tree.",
            ));
        }
        self.append(parameter, NodeTag::Value, text)
    }

    /// Writes `text` into a Value node, or into the Value child of a
    /// Parameter (creating it when missing). Returns the Value node.
    pub fn set_value(&mut self, id: NodeId, text: &str) -> SpriteResult<NodeId> {
        let node = self.require(
            id,
            &[NodeTag::Parameter, NodeTag::Value],
            "Please select a valid Tree Node to place the value in.",
        )?;
        let target = match (node.tag, node.children.first().copied()) {
            (NodeTag::Value, _) => id,
            (_, Some(value)) => value,
            (_, None) => return self.append(id, NodeTag::Value, text),
        };
        self.get_mut(target)?.label = text.to_string();
        Ok(target)
    }

    /// Group element labels are derived from position and cannot be renamed.
    /// States and Parameters keep unique names among their siblings.
    pub fn rename(&mut self, id: NodeId, label: &str) -> SpriteResult<()> {
        let node = self.require(
            id,
            &[
                NodeTag::File,
                NodeTag::State,
                NodeTag::Parameter,
                NodeTag::Value,
            ],
            "Group entries cannot be renamed.",
        )?;
        let (tag, parent) = (node.tag, node.parent);
        if let (NodeTag::State | NodeTag::Parameter, Some(parent)) = (tag, parent) {
            if tag == NodeTag::Parameter && self.tag(parent) == Some(NodeTag::State) {
                reject_group_name(label)?;
            }
            self.ensure_unique_label(parent, label, Some(id))?;
        }
        self.get_mut(id)?.label = label.to_string();
        Ok(())
    }

    pub fn remove(&mut self, id: NodeId) -> SpriteResult<()> {
        let node = self.require(
            id,
            &[
                NodeTag::State,
                NodeTag::Parameter,
                NodeTag::Index,
                NodeTag::Value,
            ],
            "The file node cannot be deleted; clear the tree instead.",
        )?;
        let parent = node.parent;
        let relabel = self.is_group_element(id);

        if let Some(parent) = parent {
            self.get_mut(parent)?.children.retain(|child| *child != id);
            if relabel {
                self.relabel_elements(parent);
            }
        }

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(current.0).and_then(Option::take) {
                pending.extend(node.children);
            }
        }
        Ok(())
    }

    fn relabel_elements(&mut self, container: NodeId) {
        let elements = self.children(container).to_vec();
        for (position, element) in elements.into_iter().enumerate() {
            if let Some(node) = self.nodes.get_mut(element.0).and_then(Option::as_mut) {
                node.label = group_element_label(position);
            }
        }
    }

    /// Drops every state, keeping the file node.
    pub fn clear(&mut self) {
        let root = self.nodes[self.root.0].take();
        let label = root.map(|node| node.label).unwrap_or_default();
        *self = Self::new(label);
    }

    pub fn move_up(&mut self, state: NodeId) -> SpriteResult<bool> {
        self.shift_state(state, -1)
    }

    pub fn move_down(&mut self, state: NodeId) -> SpriteResult<bool> {
        self.shift_state(state, 1)
    }

    fn shift_state(&mut self, state: NodeId, delta: isize) -> SpriteResult<bool> {
        self.require(
            state,
            &[NodeTag::State],
            "Please select a STATE in the tree to move.",
        )?;
        let root = self.root;
        let siblings = &mut self.get_mut(root)?.children;
        let Some(position) = siblings.iter().position(|child| *child == state) else {
            return Ok(false);
        };
        let Some(target) = position.checked_add_signed(delta) else {
            return Ok(false);
        };
        if target >= siblings.len() {
            return Ok(false);
        }
        siblings.swap(position, target);
        Ok(true)
    }

    /// Inserts an empty state right after `state`, named by bumping its
    /// trailing number until the name is unused.
    pub fn increment_state(&mut self, state: NodeId) -> SpriteResult<NodeId> {
        let node = self.require(
            state,
            &[NodeTag::State],
            "Please select a STATE in the tree to increment.",
        )?;
        let mut name = next_state_name(&node.label);
        while self.find_child(self.root, &name).is_some() {
            name = next_state_name(&name);
        }

        let id = self.append(self.root, NodeTag::State, name.clone())?;
        let root = self.root;
        let siblings = &mut self.get_mut(root)?.children;
        siblings.pop();
        let position = siblings
            .iter()
            .position(|child| *child == state)
            .map_or(siblings.len(), |p| p + 1);
        siblings.insert(position, id);
        debug!(state = %name, "incremented state");
        Ok(id)
    }
}

/// Group fields are Index containers; a scalar Parameter may not take
/// their names.
fn reject_group_name(name: &str) -> SpriteResult<()> {
    match GroupKind::from_name(name) {
        Some(kind) => Err(SpriteError::Validation(format!(
            "'{}' is a group; add it as a group instead of a parameter.",
            kind.name()
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
