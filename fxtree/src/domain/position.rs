//! Position paths: `1-i-j-...-slot` addresses of nodes below the root.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use thiserror::Error;

/// Segment that stands for the root in every position path.
pub const ROOT_SEGMENT: usize = 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("position path must name a node below the root: {0:?}")]
    TooShort(String),

    #[error("invalid index {segment:?} in position path {path:?}")]
    BadSegment { path: String, segment: String },

    #[error("position path must start at the root (1): {0:?}")]
    NotRooted(String),
}

/// Address of a node: the root segment, the child indices leading to the
/// parent, and the slot index inside that parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionPath {
    route: Vec<usize>,
    slot: usize,
}

impl PositionPath {
    pub fn new(route: Vec<usize>, slot: usize) -> Self {
        Self { route, slot }
    }

    /// Slot index inside the parent's children.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Child indices to follow from the root to reach the parent.
    pub fn route(&self) -> &[usize] {
        &self.route
    }
}

impl FromStr for PositionPath {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = s
            .split('-')
            .map(|segment| {
                segment
                    .parse::<usize>()
                    .map_err(|_| PositionError::BadSegment {
                        path: s.to_string(),
                        segment: segment.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        match segments.as_slice() {
            [] | [_] => Err(PositionError::TooShort(s.to_string())),
            [first, ..] if *first != ROOT_SEGMENT => Err(PositionError::NotRooted(s.to_string())),
            [_, route @ .., slot] => Ok(Self::new(route.to_vec(), *slot)),
        }
    }
}

impl fmt::Display for PositionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = std::iter::once(ROOT_SEGMENT)
            .chain(self.route.iter().copied())
            .chain(std::iter::once(self.slot));
        write!(f, "{}", segments.format("-"))
    }
}
