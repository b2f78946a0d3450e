//! Arena-backed layout tree with a single editing cursor.

use generational_arena::Arena;
use tracing::{debug, instrument};

use crate::domain::component::{Component, ComponentKind};
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node::{ensure_single_line, ComponentNode, NodeId, MAX_CHILDREN};
use crate::domain::position::PositionPath;

/// The root mirrors a single top-level scene node.
pub const ROOT_CAPACITY: usize = 1;

/// Layout tree rooted at an `AnchorPane`.
///
/// Nodes live in a generational arena; children lists own their subtrees and
/// parent links are plain handles. The cursor always points at a live node.
#[derive(Debug)]
pub struct ComponentTree {
    arena: Arena<ComponentNode>,
    root: NodeId,
    cursor: NodeId,
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentTree {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = NodeId(arena.insert(ComponentNode::new(
            Component::container(ComponentKind::AnchorPane),
            None,
        )));
        Self {
            arena,
            root,
            cursor: root,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    pub fn root_node(&self) -> &ComponentNode {
        &self.arena[self.root.0]
    }

    pub fn cursor_node(&self) -> &ComponentNode {
        &self.arena[self.cursor.0]
    }

    pub fn node(&self, id: NodeId) -> Option<&ComponentNode> {
        self.arena.get(id.0)
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        id == self.root
    }

    pub fn is_cursor(&self, id: NodeId) -> bool {
        id == self.cursor
    }

    fn capacity_of(&self, id: NodeId) -> usize {
        if self.is_root(id) {
            ROOT_CAPACITY
        } else {
            MAX_CHILDREN
        }
    }

    // ------------------------------------------------------------------
    // Cursor navigation
    // ------------------------------------------------------------------

    #[instrument(level = "trace", skip(self))]
    pub fn cursor_to_root(&mut self) {
        self.cursor = self.root;
    }

    /// Moves the cursor to its child at `index`.
    #[instrument(level = "debug", skip(self))]
    pub fn cursor_to_child(&mut self, index: usize) -> TreeResult<NodeId> {
        if self.is_root(self.cursor) && index != 0 {
            return Err(TreeError::invalid("the root only has a child at index 0"));
        }
        let node = self.cursor_node();
        let children = node.children().ok_or_else(|| {
            TreeError::invalid(format!("{} is a control and has no children", node.kind()))
        })?;
        let child = children.get(index).ok_or(TreeError::OutOfRange {
            index,
            count: children.len(),
        })?;
        self.cursor = child;
        Ok(child)
    }

    /// Moves the cursor up one level. Returns `false` at the root.
    #[instrument(level = "debug", skip(self))]
    pub fn cursor_to_parent(&mut self) -> bool {
        match self.cursor_node().parent() {
            Some(parent) => {
                self.cursor = parent;
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Inserts a new node at `index` among the cursor's children.
    ///
    /// Children at `index..` shift one slot right. Fails without touching
    /// the tree if the cursor is a control, if the root is given a non-zero
    /// index, if the control text spans lines, if `index` is past the end,
    /// or if the cursor is full.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, index: usize, component: Component) -> TreeResult<NodeId> {
        let cursor = self.cursor;
        let node = self.cursor_node();
        let count = node.child_count().ok_or_else(|| {
            TreeError::invalid(format!("{} is a control and cannot have children", node.kind()))
        })?;
        if self.is_root(cursor) && index != 0 {
            return Err(TreeError::invalid("the root only accepts a child at index 0"));
        }
        if let Some(text) = component.text() {
            ensure_single_line(text)?;
        }
        if index > count {
            return Err(TreeError::OutOfRange { index, count });
        }
        let capacity = self.capacity_of(cursor);
        if count >= capacity {
            return Err(TreeError::Full { capacity });
        }

        let id = NodeId(self.arena.insert(ComponentNode::new(component, Some(cursor))));
        let inserted = match self.arena[cursor.0].children_mut() {
            Some(children) => children.insert(index, id),
            None => Err(TreeError::invalid("cursor lost its children")),
        };
        if let Err(e) = inserted {
            self.arena.remove(id.0);
            return Err(e);
        }
        debug!("added {} at index {}", self.arena[id.0], index);
        Ok(id)
    }

    /// Removes the cursor's child at `index` together with its subtree.
    ///
    /// Later children shift one slot left. Returns the removed node.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_child(&mut self, index: usize) -> TreeResult<ComponentNode> {
        let cursor = self.cursor;
        let removed = match self.arena[cursor.0].children_mut() {
            Some(children) => children.remove(index)?,
            None => return Err(TreeError::OutOfRange { index, count: 0 }),
        };
        let node = self.remove_subtree(removed).ok_or_else(|| {
            TreeError::invalid("child handle did not resolve to a node")
        })?;
        debug!("deleted {} at index {}", node, index);
        Ok(node)
    }

    /// Replaces the text of the control under the cursor.
    #[instrument(level = "debug", skip(self, text))]
    pub fn set_text_at_cursor(&mut self, text: impl Into<String>) -> TreeResult<()> {
        let cursor = self.cursor;
        self.arena[cursor.0].set_text(text.into())
    }

    /// Writes a new node straight into `slot` of `parent`, bypassing the
    /// shifting insert. An occupied slot is overwritten and its old subtree
    /// dropped; a slot past the first free one is rejected.
    #[instrument(level = "debug", skip(self))]
    pub fn set_slot(
        &mut self,
        parent: NodeId,
        slot: usize,
        component: Component,
    ) -> TreeResult<NodeId> {
        let parent_node = self
            .node(parent)
            .ok_or_else(|| TreeError::invalid("parent is not part of this tree"))?;
        let count = parent_node.child_count().ok_or_else(|| {
            TreeError::invalid(format!(
                "{} is a control and cannot have children",
                parent_node.kind()
            ))
        })?;
        if self.is_root(parent) && slot != 0 {
            return Err(TreeError::invalid("the root only accepts a child at index 0"));
        }
        if let Some(text) = component.text() {
            ensure_single_line(text)?;
        }
        if slot >= MAX_CHILDREN {
            return Err(TreeError::Full {
                capacity: MAX_CHILDREN,
            });
        }
        if slot > count {
            return Err(TreeError::OutOfRange { index: slot, count });
        }

        let id = NodeId(self.arena.insert(ComponentNode::new(component, Some(parent))));
        let assigned = match self.arena[parent.0].children_mut() {
            Some(children) => children.assign(slot, id),
            None => Err(TreeError::invalid("parent lost its children")),
        };
        match assigned {
            Ok(Some(previous)) => {
                debug!("slot {} overwritten", slot);
                self.remove_subtree(previous);
                if self.node(self.cursor).is_none() {
                    self.cursor = self.root;
                }
            }
            Ok(None) => {}
            Err(e) => {
                self.arena.remove(id.0);
                return Err(e);
            }
        }
        Ok(id)
    }

    fn remove_subtree(&mut self, id: NodeId) -> Option<ComponentNode> {
        let doomed: Vec<NodeId> = self.visit(id).map(|(_, node_id, _)| node_id).collect();
        let mut removed = doomed.into_iter().filter_map(|node_id| self.arena.remove(node_id.0));
        let top = removed.next();
        removed.for_each(drop);
        top
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Number of parent hops from `id` to the root (root is 0).
    #[instrument(level = "trace", skip(self))]
    pub fn find_depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).and_then(ComponentNode::parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).and_then(ComponentNode::parent);
        }
        depth
    }

    /// Resolves the node that should parent a node placed at `position`.
    #[instrument(level = "trace", skip(self))]
    pub fn find_parent(&self, position: &PositionPath) -> Option<NodeId> {
        position.route().iter().try_fold(self.root, |current, &index| {
            self.node(current)?.children()?.get(index)
        })
    }

    /// Position path of a non-root node.
    #[instrument(level = "trace", skip(self))]
    pub fn path_to(&self, id: NodeId) -> Option<PositionPath> {
        let mut indices = Vec::new();
        let mut current = id;
        while let Some(parent) = self.node(current)?.parent() {
            indices.push(self.node(parent)?.children()?.position(current)?);
            current = parent;
        }
        if !self.is_root(current) {
            return None;
        }
        indices.reverse();
        let slot = indices.pop()?;
        Some(PositionPath::new(indices, slot))
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Lazy preorder walk of the subtree at `start`, yielding absolute depths.
    pub fn visit(&self, start: NodeId) -> Preorder<'_> {
        Preorder::new(self, start)
    }

    /// Lazy preorder walk of the whole tree.
    pub fn visit_all(&self) -> Preorder<'_> {
        self.visit(self.root)
    }
}

/// Preorder iterator over `(depth, id, node)`.
pub struct Preorder<'a> {
    tree: &'a ComponentTree,
    stack: Vec<(usize, NodeId)>,
}

impl<'a> Preorder<'a> {
    fn new(tree: &'a ComponentTree, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.node(start).is_some() {
            stack.push((tree.find_depth(start), start));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (usize, NodeId, &'a ComponentNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, id)) = self.stack.pop() {
            if let Some(node) = self.tree.node(id) {
                // Push children in reverse order for left-to-right traversal
                if let Some(children) = node.children() {
                    for &child in children.iter().rev() {
                        self.stack.push((depth + 1, child));
                    }
                }
                return Some((depth, id, node));
            }
        }
        None
    }
}
