use std::collections::HashMap;
use std::rc::Rc;

use nova_explorer_path::ExplorerPath;

use crate::node::{DataNode, ExplorerNode};
use crate::trie::PathTrie;
use crate::workspace::{WorkspaceFolders, WorkspaceMembership};
use crate::TRACING_TARGET;

/// Which backing store a path is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathClass {
    /// Inside the workspace: kept in the path trie.
    Workspace,
    /// Inside a compiled archive: kept in the flat read-only map.
    ReadOnly,
    /// Neither; the cache ignores it.
    Outside,
}

/// Cache of materialized explorer nodes, keyed by location.
///
/// Workspace nodes live in a [`PathTrie`] so ancestors can be looked up and whole subtrees
/// dropped when a folder changes. Read-only archive entries never change for the lifetime of a
/// session and are only addressed exactly, so they live in a flat map.
///
/// Every miss is just a miss: callers recompute the node from the language server.
#[derive(Debug)]
pub struct ExplorerNodeCache<W = WorkspaceFolders> {
    workspace: W,
    mutable_nodes: PathTrie<Rc<DataNode>>,
    readonly_nodes: HashMap<String, Rc<DataNode>>,
}

impl<W: WorkspaceMembership> ExplorerNodeCache<W> {
    pub fn new(workspace: W) -> Self {
        Self {
            workspace,
            mutable_nodes: PathTrie::new(),
            readonly_nodes: HashMap::new(),
        }
    }

    pub fn workspace(&self) -> &W {
        &self.workspace
    }

    /// Routes `path` to a store. Paths without an exact cache key are never cached.
    pub fn classify(&self, path: &ExplorerPath) -> PathClass {
        if path.cache_key().is_none() {
            PathClass::Outside
        } else if self.workspace.is_in_workspace(path) {
            PathClass::Workspace
        } else if path.is_read_only() {
            PathClass::ReadOnly
        } else {
            PathClass::Outside
        }
    }

    /// Returns the node cached exactly at `path`.
    pub fn get_data_node(&self, path: &ExplorerPath) -> Option<Rc<DataNode>> {
        let key = path.cache_key()?;
        match self.classify(path) {
            PathClass::Workspace => match self.mutable_nodes.find(&key) {
                Ok(node) => node.and_then(|node| node.payload()).cloned(),
                Err(err) => {
                    tracing::debug!(target: TRACING_TARGET, error = %err, "cache lookup skipped");
                    None
                }
            },
            PathClass::ReadOnly => self.readonly_nodes.get(&*key).cloned(),
            PathClass::Outside => None,
        }
    }

    /// Finds the cached node whose location is equal to or an ancestor of the directory
    /// containing `path`.
    ///
    /// Only workspace paths are considered; archive entries have no meaningful containment.
    pub fn find_best_match_node_by_uri(&self, path: &ExplorerPath) -> Option<Rc<DataNode>> {
        if self.classify(path) != PathClass::Workspace {
            return None;
        }

        let parent = path.parent()?;
        let ancestor = self
            .mutable_nodes
            .find_ancestor_node_with_data(&parent.cache_key()?)?;
        ancestor.payload().cloned()
    }

    /// Caches `node` under its own location. Containers and out-of-domain paths are ignored.
    pub fn save_node(&mut self, node: &ExplorerNode) {
        let ExplorerNode::Data(data) = node else {
            return;
        };

        let path = data.path();
        let class = self.classify(path);
        let Some(key) = path.cache_key().filter(|_| class != PathClass::Outside) else {
            tracing::trace!(
                target: TRACING_TARGET,
                path = %path,
                "ignoring node outside workspace and archives"
            );
            return;
        };
        match class {
            PathClass::Workspace => {
                if let Err(err) = self.mutable_nodes.insert(&key, Rc::clone(data)) {
                    tracing::debug!(target: TRACING_TARGET, error = %err, "node not cached");
                }
            }
            PathClass::ReadOnly => {
                self.readonly_nodes.insert(key.into_owned(), Rc::clone(data));
            }
            PathClass::Outside => {}
        }
    }

    /// Saves each node in order; a later node for the same location replaces an earlier one.
    pub fn save_nodes<'a, I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = &'a ExplorerNode>,
    {
        for node in nodes {
            self.save_node(node);
        }
    }

    /// Invalidates everything cached below `node`.
    ///
    /// `None` drops the whole cache, read-only entries included. For a workspace node, the
    /// cached descendants are dropped and the cached node's resolved children are reset so the
    /// next expansion fetches them again. Archive entries are never invalidated one by one.
    pub fn remove_node_children(&mut self, node: Option<&ExplorerNode>) {
        let Some(node) = node else {
            self.clear_all();
            return;
        };

        let ExplorerNode::Data(data) = node else {
            return;
        };

        let path = data.path();
        if self.classify(path) != PathClass::Workspace {
            return;
        }
        let Some(key) = path.cache_key() else {
            return;
        };

        let trie_node = match self.mutable_nodes.find_mut(&key) {
            Ok(Some(trie_node)) => trie_node,
            Ok(None) => return,
            Err(err) => {
                tracing::debug!(target: TRACING_TARGET, error = %err, "invalidation skipped");
                return;
            }
        };

        let detached = trie_node.remove_children();
        if let Some(cached) = trie_node.payload() {
            cached.clear_children();
        }
        tracing::trace!(target: TRACING_TARGET, path = %path, detached, "invalidated subtree");
    }

    fn clear_all(&mut self) {
        tracing::debug!(
            target: TRACING_TARGET,
            readonly = self.readonly_nodes.len(),
            "clearing explorer node cache"
        );
        self.mutable_nodes.clear_all();
        self.readonly_nodes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.mutable_nodes.is_empty() && self.readonly_nodes.is_empty()
    }

    /// Number of cached workspace nodes. Walks the trie.
    pub fn workspace_len(&self) -> usize {
        self.mutable_nodes.len()
    }

    pub fn readonly_len(&self) -> usize {
        self.readonly_nodes.len()
    }
}

impl Default for ExplorerNodeCache<WorkspaceFolders> {
    fn default() -> Self {
        Self::new(WorkspaceFolders::default())
    }
}
