//! Bounded-arity JavaFX layout trees.
//!
//! A [`ComponentTree`](domain::ComponentTree) is edited through a single
//! cursor, read from and written to a positional text format, and exported
//! as FXML for SceneBuilder.
//!
//! Layers, leaves first: `domain` (tree model), `codec` (file formats),
//! `config` (layered settings), `cli` (commands and the interactive shell).

pub mod cli;
pub mod codec;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{Component, ComponentKind, ComponentTree, NodeId, TreeError};
