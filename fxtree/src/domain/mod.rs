//! Domain layer: the layout tree and its invariants
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod component;
pub mod error;
pub mod node;
pub mod position;
pub mod tree;

pub use component::{Component, ComponentKind, UnknownKind};
pub use error::{TreeError, TreeResult};
pub use node::{ChildSlots, ComponentNode, NodeBody, NodeId, MAX_CHILDREN};
pub use position::{PositionError, PositionPath};
pub use tree::{ComponentTree, Preorder, ROOT_CAPACITY};
