//! Positional text format.
//!
//! Input lines look like `1-0-2 Label Some text`: a position path, a
//! component type and, for controls, the rest of the line as text. The
//! outline writer produces a tab-indented, cursor-marked dump that is meant
//! for reading by humans and cannot be loaded back. The annotated writer
//! emits the input format itself.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::codec::error::{CodecError, CodecResult, IoResultExt};
use crate::domain::{
    Component, ComponentKind, ComponentTree, PositionError, PositionPath, UnknownKind,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("missing component type")]
    MissingKind,

    #[error(transparent)]
    Position(#[from] PositionError),

    #[error(transparent)]
    Kind(#[from] UnknownKind),

    #[error("AnchorPane is implicit at the root and cannot be listed")]
    ImplicitRoot,

    #[error("{0} is a container and cannot carry text")]
    ContainerText(ComponentKind),
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub position: PositionPath,
    pub component: Component,
}

impl FromStr for Entry {
    type Err = EntryError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (position, rest) = line.split_once(' ').ok_or(EntryError::MissingKind)?;
        let position: PositionPath = position.parse()?;
        let (kind, text) = match rest.split_once(' ') {
            Some((kind, text)) => (kind, Some(text)),
            None => (rest, None),
        };
        let kind: ComponentKind = kind.parse()?;
        if kind == ComponentKind::AnchorPane {
            return Err(EntryError::ImplicitRoot);
        }
        let component = match text {
            Some(text) if kind.is_container() && !text.trim().is_empty() => {
                return Err(EntryError::ContainerText(kind))
            }
            Some(_) if kind.is_container() => Component::container(kind),
            Some(text) => Component::control(kind, text),
            None => Component::new(kind, String::new()),
        };
        Ok(Self {
            position,
            component,
        })
    }
}

/// Builds a fresh tree from position-annotated lines.
///
/// Every node is written straight into its parent's slot. A node's
/// ancestors must appear on earlier lines; blank lines are ignored.
#[instrument(level = "debug", skip(reader))]
pub fn read_tree<R: BufRead>(reader: R) -> CodecResult<ComponentTree> {
    let mut tree = ComponentTree::new();
    for (number, line) in reader.lines().enumerate() {
        let line_no = number + 1;
        let line = line.map_err(|e| match e.kind() {
            ErrorKind::InvalidData => CodecError::parse(line_no, e),
            _ => CodecError::io(format!("read line {line_no}"), e),
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let entry = line
            .parse::<Entry>()
            .map_err(|e| CodecError::parse(line_no, e))?;
        let parent = tree.find_parent(&entry.position).ok_or_else(|| {
            CodecError::parse(
                line_no,
                format!("no parent node for position {}", entry.position),
            )
        })?;
        tree.set_slot(parent, entry.position.slot(), entry.component)
            .map_err(|e| CodecError::parse(line_no, e))?;
    }
    debug!("read {} nodes", tree.node_count());
    Ok(tree)
}

/// Loads a tree from a positional text file.
#[instrument(level = "debug")]
pub fn load_tree(path: &Path) -> CodecResult<ComponentTree> {
    let file = File::open(path).with_path_context("open layout", path)?;
    read_tree(BufReader::new(file))
}

/// Writes the tab-indented outline, one node per line in preorder.
pub fn write_outline<W: Write>(tree: &ComponentTree, writer: &mut W) -> std::io::Result<()> {
    for (depth, id, node) in tree.visit_all() {
        writeln!(
            writer,
            "{}{}",
            "\t".repeat(depth),
            node.tree_label(tree.is_cursor(id))
        )?;
    }
    Ok(())
}

pub fn render_outline(tree: &ComponentTree) -> String {
    let mut buf = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_outline(tree, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

#[instrument(level = "debug", skip(tree))]
pub fn save_outline(tree: &ComponentTree, path: &Path) -> CodecResult<()> {
    let file = File::create(path).with_path_context("create outline", path)?;
    let mut writer = BufWriter::new(file);
    write_outline(tree, &mut writer).with_path_context("write outline", path)?;
    writer.flush().with_path_context("write outline", path)
}

/// Writes every node below the root in the input format, ancestors first.
pub fn write_annotated<W: Write>(tree: &ComponentTree, writer: &mut W) -> std::io::Result<()> {
    for (_, id, node) in tree.visit_all() {
        let Some(position) = tree.path_to(id) else {
            continue;
        };
        match node.text() {
            Some(text) if !text.is_empty() => {
                writeln!(writer, "{} {} {}", position, node.kind(), text)?
            }
            _ => writeln!(writer, "{} {}", position, node.kind())?,
        }
    }
    Ok(())
}

pub fn render_annotated(tree: &ComponentTree) -> String {
    let mut buf = Vec::new();
    let _ = write_annotated(tree, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
