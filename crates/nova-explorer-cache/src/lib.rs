//! Node cache for the Nova project explorer.
//!
//! Expanding a tree item asks the language server for its children. The resulting nodes are
//! cached here by location so redraws and re-expansions don't hit the server again:
//! - Workspace nodes go into a [`PathTrie`], which answers "closest cached ancestor" queries and
//!   drops whole subtrees when a folder changes.
//! - Read-only nodes inside compiled archives (`jdt:` URIs) go into a flat map.
//!
//! The cache is single-threaded: nodes are shared with the explorer tree through `Rc`.

mod cache;
mod error;
mod node;
mod trie;
mod workspace;

pub use cache::{ExplorerNodeCache, PathClass};
pub use error::InvalidPath;
pub use node::{DataNode, ExplorerNode, NodeData, NodeKind};
pub use nova_explorer_path::ExplorerPath;
pub use trie::{PathTrie, TrieNode};
pub use workspace::{WorkspaceFolders, WorkspaceMembership};

/// Tracing target used by this crate.
pub(crate) const TRACING_TARGET: &str = "nova.explorer.cache";
