//! Path and URI representation for the Nova project explorer.
//!
//! Explorer nodes are addressed by URI strings handed over by the Java language server. This
//! crate turns those strings into an [`ExplorerPath`]:
//! - `file:` URIs and bare absolute paths become lexically normalized local paths.
//! - `jdt:` URIs (class files inside jars, JDK modules, ...) become read-only [`JdtPath`]s.
//! - Anything else is kept verbatim as an opaque URI.

mod jdt;
mod path;

pub use jdt::{JdtPath, JDT_SCHEME};
pub use path::ExplorerPath;

/// Lexically normalizes a local filesystem path using the same rules as `ExplorerPath::local`.
///
/// This does not hit the filesystem and does not resolve symlinks.
pub fn normalize_local_path(path: &std::path::Path) -> std::path::PathBuf {
    crate::path::normalize_local_path(path)
}
