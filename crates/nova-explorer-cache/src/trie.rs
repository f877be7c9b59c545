//! Prefix tree over filesystem-style paths.
//!
//! Paths are split on the platform separator and empty segments are skipped, so `/a//b/` and
//! `/a/b` address the same node. Every node owns its children outright; there are no parent
//! links since every operation walks down from the root.

use std::collections::HashMap;

use crate::error::InvalidPath;

#[derive(Debug)]
pub struct TrieNode<T> {
    segment: Option<String>,
    children: HashMap<String, TrieNode<T>>,
    payload: Option<T>,
}

impl<T> TrieNode<T> {
    fn root() -> Self {
        Self {
            segment: None,
            children: HashMap::new(),
            payload: None,
        }
    }

    fn new(segment: &str) -> Self {
        Self {
            segment: Some(segment.to_string()),
            children: HashMap::new(),
            payload: None,
        }
    }

    /// The path component this node represents; `None` for the root.
    pub fn segment(&self) -> Option<&str> {
        self.segment.as_deref()
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn child(&self, segment: &str) -> Option<&TrieNode<T>> {
        self.children.get(segment)
    }

    /// Direct children, in no particular order.
    pub fn children(&self) -> impl Iterator<Item = &TrieNode<T>> {
        self.children.values()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Drops every descendant of this node. The node keeps its own payload.
    ///
    /// Returns the number of direct children that were detached.
    pub fn remove_children(&mut self) -> usize {
        let detached = std::mem::take(&mut self.children);
        detached.len()
    }
}

#[derive(Debug)]
pub struct PathTrie<T> {
    root: TrieNode<T>,
}

impl<T> Default for PathTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PathTrie<T> {
    pub fn new() -> Self {
        Self {
            root: TrieNode::root(),
        }
    }

    /// Stores `payload` at `path`, creating intermediate nodes as needed.
    ///
    /// Returns the payload previously stored at `path`, if any.
    pub fn insert(&mut self, path: &str, payload: T) -> Result<Option<T>, InvalidPath> {
        let segments = split_segments(path)?;

        let mut node = &mut self.root;
        for segment in segments {
            node = node
                .children
                .entry(segment.to_string())
                .or_insert_with(|| TrieNode::new(segment));
        }
        Ok(node.payload.replace(payload))
    }

    /// Exact lookup. The returned node may be a pass-through node without a payload.
    pub fn find(&self, path: &str) -> Result<Option<&TrieNode<T>>, InvalidPath> {
        let segments = split_segments(path)?;

        let mut node = &self.root;
        for segment in segments {
            match node.children.get(segment) {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }
        Ok(Some(node))
    }

    pub fn find_mut(&mut self, path: &str) -> Result<Option<&mut TrieNode<T>>, InvalidPath> {
        let segments = split_segments(path)?;

        let mut node = &mut self.root;
        for segment in segments {
            match node.children.get_mut(segment) {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }
        Ok(Some(node))
    }

    /// Returns the deepest node on the way to `path` (including `path` itself) that carries a
    /// payload.
    ///
    /// The walk stops at the first segment with no matching child; nodes past that point can't
    /// exist. A path without segments has no ancestors and yields `None`.
    pub fn find_ancestor_node_with_data(&self, path: &str) -> Option<&TrieNode<T>> {
        let mut node = &self.root;
        let mut deepest = None;
        for segment in segments(path) {
            let Some(child) = node.children.get(segment) else {
                break;
            };
            node = child;
            if node.payload.is_some() {
                deepest = Some(node);
            }
        }
        deepest
    }

    /// Resets the trie to a single empty root.
    pub fn clear_all(&mut self) {
        self.root = TrieNode::root();
    }

    pub fn is_empty(&self) -> bool {
        !self.root.has_children() && self.root.payload.is_none()
    }

    /// Number of nodes carrying a payload. Walks the whole trie.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![&self.root];
        while let Some(node) = pending.pop() {
            if node.payload.is_some() {
                count += 1;
            }
            pending.extend(node.children.values());
        }
        count
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(std::path::is_separator)
        .filter(|segment| !segment.is_empty())
}

fn split_segments(path: &str) -> Result<Vec<&str>, InvalidPath> {
    let segments: Vec<&str> = segments(path).collect();
    if segments.is_empty() {
        return Err(InvalidPath::new(path));
    }
    Ok(segments)
}
