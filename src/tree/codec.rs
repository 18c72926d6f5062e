//! JSON encoding for `TreeNode`
//!
//! A node is an object whose members are its children; a leaf is `{}`.
//! Decoding rejects any non-object value and duplicate keys at one level, so a
//! malformed document never produces a partial tree. Trees deeper than
//! `MAX_DEPTH` are refused in both directions, so whatever encodes also decodes.

use crate::error::SnapshotError;
use crate::tree::node::{TreeNode, MAX_DEPTH};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, child) in self.iter() {
            map.serialize_entry(key, child)?;
        }
        map.end()
    }
}

struct TreeNodeVisitor;

impl<'de> Visitor<'de> for TreeNodeVisitor {
    type Value = TreeNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of nested objects")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TreeNode, A::Error> {
        let mut node = TreeNode::new();
        while let Some(key) = access.next_key::<String>()? {
            let child = access.next_value::<TreeNode>()?;
            if node.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicate key `{}`", key)));
            }
            let _ = node.insert(key, child);
        }
        Ok(node)
    }
}

impl<'de> Deserialize<'de> for TreeNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TreeNodeVisitor)
    }
}

fn check_depth(tree: &TreeNode) -> Result<(), SnapshotError> {
    let depth = tree.depth();
    if depth > MAX_DEPTH {
        return Err(SnapshotError::TooDeep {
            depth,
            limit: MAX_DEPTH,
        });
    }
    Ok(())
}

/// Encode a tree as pretty-printed JSON
pub fn encode(tree: &TreeNode) -> Result<String, SnapshotError> {
    check_depth(tree)?;
    Ok(serde_json::to_string_pretty(tree)?)
}

/// Encode a tree as single-line JSON
pub fn encode_compact(tree: &TreeNode) -> Result<String, SnapshotError> {
    check_depth(tree)?;
    Ok(serde_json::to_string(tree)?)
}

/// Decode a tree from JSON text
pub fn decode(text: &str) -> Result<TreeNode, SnapshotError> {
    let tree: TreeNode = serde_json::from_str(text)?;
    check_depth(&tree)?;
    Ok(tree)
}
