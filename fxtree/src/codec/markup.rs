//! FXML export for SceneBuilder.
//!
//! The document is a fixed preamble, the root `AnchorPane` element, and the
//! preorder rendering of the root's single child. Every element line is
//! indented by its node depth in tabs.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, instrument};

use crate::codec::error::{CodecResult, IoResultExt};
use crate::domain::{ComponentKind, ComponentTree, NodeBody, NodeId};

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
pub const IMPORT_CONTROLS: &str = "<?import javafx.scene.control.*?>";
pub const IMPORT_LAYOUTS: &str = "<?import javafx.scene.layout.*?>";
pub const DEFAULT_NAMESPACE: &str = "http://javafx.com/fxml";

/// Identifier used when a TextArea's text has no word characters.
pub const FALLBACK_ID: &str = "textArea";

/// Export knobs, usually filled from `[export]` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupOptions {
    /// URI bound to the `fx` prefix on the root element
    pub namespace: String,
    /// Suffix repeated TextArea ids so each `fx:id` is unique in the document
    pub unique_ids: bool,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            unique_ids: true,
        }
    }
}

fn word_separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap())
}

fn with_initial(word: &str, upper: bool) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if upper => first.to_uppercase().chain(chars).collect(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Camel-case identifier derived from a TextArea's text.
///
/// `"  Enter your name: "` becomes `enterYourName`.
pub fn text_area_id(text: &str) -> String {
    let id: String = word_separator()
        .split(text.trim())
        .filter(|word| !word.is_empty())
        .enumerate()
        .map(|(i, word)| with_initial(word, i > 0))
        .collect();
    if id.is_empty() {
        FALLBACK_ID.to_string()
    } else {
        id
    }
}

/// Escapes a string for use inside a double-quoted XML attribute.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Renders one tree as an FXML document.
pub struct MarkupExporter<'a> {
    tree: &'a ComponentTree,
    options: &'a MarkupOptions,
    used_ids: HashSet<String>,
}

impl<'a> MarkupExporter<'a> {
    pub fn new(tree: &'a ComponentTree, options: &'a MarkupOptions) -> Self {
        Self {
            tree,
            options,
            used_ids: HashSet::new(),
        }
    }

    #[instrument(level = "debug", skip(self, writer))]
    pub fn write<W: Write>(mut self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{XML_DECLARATION}")?;
        writeln!(writer, "{IMPORT_CONTROLS}")?;
        writeln!(writer, "{IMPORT_LAYOUTS}")?;
        writeln!(
            writer,
            "<{} xmlns:fx=\"{}\">",
            ComponentKind::AnchorPane,
            escape_attribute(&self.options.namespace)
        )?;
        let tree = self.tree;
        if let Some(top) = tree.root_node().children().and_then(|c| c.get(0)) {
            self.write_node(writer, top)?;
        }
        writeln!(writer, "</{}>", ComponentKind::AnchorPane)
    }

    fn write_node<W: Write>(&mut self, writer: &mut W, id: NodeId) -> io::Result<()> {
        let tree = self.tree;
        let Some(node) = tree.node(id) else {
            return Ok(());
        };
        let indent = "\t".repeat(tree.find_depth(id));
        let kind = node.kind();
        match node.body() {
            NodeBody::Control { text } if kind == ComponentKind::TextArea => {
                let fx_id = self.claim_id(text_area_id(text));
                writeln!(
                    writer,
                    "{indent}<{kind} fx:id=\"{}\" text=\"{}\"/>",
                    escape_attribute(&fx_id),
                    escape_attribute(text)
                )
            }
            NodeBody::Control { text } => {
                writeln!(writer, "{indent}<{kind} text=\"{}\"/>", escape_attribute(text))
            }
            NodeBody::Container { children } => {
                writeln!(writer, "{indent}<{kind}>")?;
                for &child in children {
                    self.write_node(writer, child)?;
                }
                writeln!(writer, "{indent}</{kind}>")
            }
        }
    }

    fn claim_id(&mut self, base: String) -> String {
        if !self.options.unique_ids {
            return base;
        }
        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.used_ids.contains(&candidate) {
            candidate = format!("{base}{suffix}");
            suffix += 1;
        }
        self.used_ids.insert(candidate.clone());
        candidate
    }
}

pub fn write_markup<W: Write>(
    tree: &ComponentTree,
    options: &MarkupOptions,
    writer: &mut W,
) -> io::Result<()> {
    MarkupExporter::new(tree, options).write(writer)
}

pub fn render_markup(tree: &ComponentTree, options: &MarkupOptions) -> String {
    let mut buf = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_markup(tree, options, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

#[instrument(level = "debug", skip(tree, options))]
pub fn export_markup(tree: &ComponentTree, options: &MarkupOptions, path: &Path) -> CodecResult<()> {
    let file = File::create(path).with_path_context("create markup", path)?;
    let mut writer = BufWriter::new(file);
    write_markup(tree, options, &mut writer).with_path_context("write markup", path)?;
    writer.flush().with_path_context("write markup", path)?;
    debug!("exported {} nodes", tree.node_count());
    Ok(())
}

/// Reads an FXML file verbatim, normalising line endings to `\n`.
#[instrument(level = "debug")]
pub fn read_markup_file(path: &Path) -> CodecResult<String> {
    let content = fs::read_to_string(path).with_path_context("read markup", path)?;
    Ok(content.lines().map(|line| format!("{line}\n")).collect())
}
