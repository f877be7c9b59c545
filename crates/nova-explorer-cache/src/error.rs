/// A path that cannot address a trie node: it has no segments once separators are stripped
/// (e.g. `""` or `"/"`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid path {path:?}: no path segments")]
pub struct InvalidPath {
    pub path: String,
}

impl InvalidPath {
    pub(crate) fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }
}
