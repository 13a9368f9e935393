use std::fmt;

use serde::{Deserialize, Serialize};

/// Hierarchy level of an outline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Map a nesting depth onto a level. Depth 0 and 1 are `H1`, anything
    /// deeper than 3 collapses into `H3`.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A line (or paragraph start) recognised as a structural marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingCandidate {
    pub level: HeadingLevel,
    pub text: String,
    pub page: usize,
}

impl HeadingCandidate {
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: usize) -> Self {
        HeadingCandidate {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Final result for one document: a title plus headings in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStructure {
    pub title: String,
    pub outline: Vec<HeadingCandidate>,
}

/// Number of outline entries per level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
}

impl HeadingCounts {
    pub fn total(&self) -> usize {
        self.h1 + self.h2 + self.h3
    }
}

impl DocumentStructure {
    pub fn heading_counts(&self) -> HeadingCounts {
        self.outline
            .iter()
            .fold(HeadingCounts::default(), |mut counts, heading| {
                match heading.level {
                    HeadingLevel::H1 => counts.h1 += 1,
                    HeadingLevel::H2 => counts.h2 += 1,
                    HeadingLevel::H3 => counts.h3 += 1,
                }
                counts
            })
    }

    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}
