//! Component kinds and the values used to create new nodes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The closed set of JavaFX components a layout tree can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Button,
    Label,
    TextArea,
    HBox,
    VBox,
    AnchorPane,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 6] = [
        ComponentKind::Button,
        ComponentKind::Label,
        ComponentKind::TextArea,
        ComponentKind::HBox,
        ComponentKind::VBox,
        ComponentKind::AnchorPane,
    ];

    /// Controls are leaves that carry text.
    pub fn is_control(self) -> bool {
        matches!(
            self,
            ComponentKind::Button | ComponentKind::Label | ComponentKind::TextArea
        )
    }

    /// Containers carry children and never text.
    pub fn is_container(self) -> bool {
        !self.is_control()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Button => "Button",
            ComponentKind::Label => "Label",
            ComponentKind::TextArea => "TextArea",
            ComponentKind::HBox => "HBox",
            ComponentKind::VBox => "VBox",
            ComponentKind::AnchorPane => "AnchorPane",
        }
    }

    /// Maps the single-letter shell shortcuts (H, V, T, B, L) to a kind.
    pub fn from_shortcut(letter: &str) -> Option<Self> {
        match letter.trim().to_ascii_uppercase().as_str() {
            "H" => Some(ComponentKind::HBox),
            "V" => Some(ComponentKind::VBox),
            "T" => Some(ComponentKind::TextArea),
            "B" => Some(ComponentKind::Button),
            "L" => Some(ComponentKind::Label),
            _ => None,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown component type: {0:?}")]
pub struct UnknownKind(pub String);

impl FromStr for ComponentKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// A detached component description, turned into a tree node on insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Control { kind: ComponentKind, text: String },
    Container { kind: ComponentKind },
}

impl Component {
    /// Builds a component of `kind`; `text` is kept only for controls.
    pub fn new(kind: ComponentKind, text: impl Into<String>) -> Self {
        if kind.is_control() {
            Component::Control {
                kind,
                text: text.into(),
            }
        } else {
            Component::Container { kind }
        }
    }

    pub fn control(kind: ComponentKind, text: impl Into<String>) -> Self {
        Self::new(kind, text)
    }

    pub fn container(kind: ComponentKind) -> Self {
        Self::new(kind, String::new())
    }

    pub fn button(text: impl Into<String>) -> Self {
        Self::new(ComponentKind::Button, text)
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::new(ComponentKind::Label, text)
    }

    pub fn text_area(text: impl Into<String>) -> Self {
        Self::new(ComponentKind::TextArea, text)
    }

    pub fn hbox() -> Self {
        Self::container(ComponentKind::HBox)
    }

    pub fn vbox() -> Self {
        Self::container(ComponentKind::VBox)
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Control { kind, .. } | Component::Container { kind } => *kind,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Component::Control { text, .. } => Some(text),
            Component::Container { .. } => None,
        }
    }
}
