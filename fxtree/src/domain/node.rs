//! Tree nodes and their bounded child storage.

use std::fmt;
use std::slice;

use generational_arena::Index;

use crate::domain::component::{Component, ComponentKind};
use crate::domain::error::{TreeError, TreeResult};

/// Maximum number of children any container may hold.
pub const MAX_CHILDREN: usize = 10;

pub const CURSOR_MARKER: &str = "==>";
pub const NODE_MARKER: &str = "+--";

/// Control text occupies the rest of one line in the positional format.
pub(crate) fn ensure_single_line(text: &str) -> TreeResult<()> {
    if text.contains(['\n', '\r']) {
        return Err(TreeError::invalid("control text cannot contain line breaks"));
    }
    Ok(())
}

/// Handle of a node inside its tree's arena.
///
/// Handles are generational: once a node is deleted its handle stops
/// resolving, even if the arena slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

/// Dense, fixed-capacity ordered list of child handles.
///
/// Children always occupy a prefix of the slots, so a hole cannot be
/// represented. Inserting shifts later children right; removing shifts
/// them left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildSlots {
    slots: Vec<NodeId>,
}

impl ChildSlots {
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(MAX_CHILDREN),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == MAX_CHILDREN
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.slots.get(index).copied()
    }

    pub fn iter(&self) -> slice::Iter<'_, NodeId> {
        self.slots.iter()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.slots
    }

    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.slots.iter().position(|&slot| slot == id)
    }

    /// Inserts at `index`, shifting `index..` one slot right.
    pub fn insert(&mut self, index: usize, id: NodeId) -> TreeResult<()> {
        if index > self.slots.len() {
            return Err(TreeError::OutOfRange {
                index,
                count: self.slots.len(),
            });
        }
        if self.is_full() {
            return Err(TreeError::Full {
                capacity: MAX_CHILDREN,
            });
        }
        self.slots.insert(index, id);
        Ok(())
    }

    /// Removes the child at `index`, closing the gap.
    pub fn remove(&mut self, index: usize) -> TreeResult<NodeId> {
        if index >= self.slots.len() {
            return Err(TreeError::OutOfRange {
                index,
                count: self.slots.len(),
            });
        }
        Ok(self.slots.remove(index))
    }

    /// Writes `id` directly into slot `index` without shifting.
    ///
    /// An occupied slot is overwritten and its previous occupant returned;
    /// the first free slot is appended to. Any further slot would leave a
    /// hole and is rejected.
    pub fn assign(&mut self, index: usize, id: NodeId) -> TreeResult<Option<NodeId>> {
        if index >= MAX_CHILDREN {
            return Err(TreeError::Full {
                capacity: MAX_CHILDREN,
            });
        }
        if index > self.slots.len() {
            return Err(TreeError::OutOfRange {
                index,
                count: self.slots.len(),
            });
        }
        if index == self.slots.len() {
            self.slots.push(id);
            Ok(None)
        } else {
            Ok(Some(std::mem::replace(&mut self.slots[index], id)))
        }
    }
}

impl<'a> IntoIterator for &'a ChildSlots {
    type Item = &'a NodeId;
    type IntoIter = slice::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Kind-dependent payload: controls carry text, containers carry children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBody {
    Control { text: String },
    Container { children: ChildSlots },
}

/// A node of the layout tree.
#[derive(Debug, Clone)]
pub struct ComponentNode {
    kind: ComponentKind,
    body: NodeBody,
    /// Back-reference only; ownership flows through the parent's children.
    parent: Option<NodeId>,
}

impl ComponentNode {
    pub(crate) fn new(component: Component, parent: Option<NodeId>) -> Self {
        let (kind, body) = match component {
            Component::Control { kind, text } => (kind, NodeBody::Control { text }),
            Component::Container { kind } => (
                kind,
                NodeBody::Container {
                    children: ChildSlots::new(),
                },
            ),
        };
        Self { kind, body, parent }
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn body(&self) -> &NodeBody {
        &self.body
    }

    pub fn is_control(&self) -> bool {
        matches!(self.body, NodeBody::Control { .. })
    }

    /// Text of a control; `None` for containers.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            NodeBody::Control { text } => Some(text),
            NodeBody::Container { .. } => None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children of a container; `None` for controls.
    pub fn children(&self) -> Option<&ChildSlots> {
        match &self.body {
            NodeBody::Container { children } => Some(children),
            NodeBody::Control { .. } => None,
        }
    }

    /// Number of children, or `None` if the node is a control.
    pub fn child_count(&self) -> Option<usize> {
        self.children().map(ChildSlots::len)
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut ChildSlots> {
        match &mut self.body {
            NodeBody::Container { children } => Some(children),
            NodeBody::Control { .. } => None,
        }
    }

    pub(crate) fn set_text(&mut self, new_text: String) -> TreeResult<()> {
        match &mut self.body {
            NodeBody::Control { text } => {
                ensure_single_line(&new_text)?;
                *text = new_text;
                Ok(())
            }
            NodeBody::Container { .. } => Err(TreeError::invalid(format!(
                "{} is a container and cannot hold text",
                self.kind
            ))),
        }
    }

    /// Outline form: cursor marker followed by the short form.
    pub fn tree_label(&self, at_cursor: bool) -> String {
        let marker = if at_cursor { CURSOR_MARKER } else { NODE_MARKER };
        format!("{marker}{self}")
    }
}

impl fmt::Display for ComponentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            NodeBody::Control { text } => write!(f, "{}: {}", self.kind, text),
            NodeBody::Container { .. } => write!(f, "{}", self.kind),
        }
    }
}
