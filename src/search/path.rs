//! Node paths: the root-to-match key sequence returned by a search.

use crate::types::{ELLIPSIS, PATH_SEPARATOR};
use serde::{Serialize, Serializer};
use std::fmt;

/// Keys from the tree root down to a matched node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Key of the matched node
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// First and last segment joined by an ellipsis; single segments are unchanged.
    pub fn short(&self) -> String {
        match self.segments.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [first, .., last] => format!("{}{}{}", first, ELLIPSIS, last),
        }
    }

    /// Render in full or shortened form
    pub fn render(&self, short: bool) -> String {
        if short {
            self.short()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(PATH_SEPARATOR))
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<S: Into<String>> FromIterator<S> for NodePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
