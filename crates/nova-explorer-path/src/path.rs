use std::borrow::Cow;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::jdt::{JdtPath, JDT_SCHEME};

/// The location an explorer node points at.
///
/// Local paths are what workspace membership is decided on. `jdt:` paths name entries inside
/// compiled archives and are read-only. Everything else is carried as an opaque URI so callers
/// can round-trip it, but nothing in Nova interprets it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExplorerPath {
    /// A file or directory on the local OS file system.
    Local(PathBuf),
    /// A class file or package inside a jar / JDK module, addressed by the language server.
    Jdt(JdtPath),
    /// A URI with a scheme Nova does not understand.
    Uri(String),
}

impl ExplorerPath {
    pub fn local(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::Local(normalize_local_path(&path))
    }

    /// Parses a URI (or bare absolute path) as handed over by the language server.
    ///
    /// Parsing never fails: input that cannot be interpreted is kept as [`ExplorerPath::Uri`].
    pub fn parse(uri: impl Into<String>) -> Self {
        let uri = uri.into();

        // Bare absolute paths first: on Windows `C:\x` would otherwise parse as scheme `c`.
        if Path::new(&uri).is_absolute() {
            return Self::local(PathBuf::from(uri));
        }

        let Ok(url) = Url::parse(&uri) else {
            return Self::Uri(uri);
        };

        match url.scheme() {
            // Query and fragment don't take part in the file path.
            "file" => match url.to_file_path() {
                Ok(path) => Self::Local(normalize_local_path(&path)),
                Err(()) => Self::Uri(uri),
            },
            JDT_SCHEME => match JdtPath::from_url(&url) {
                Some(path) => Self::Jdt(path),
                None => Self::Uri(uri),
            },
            _ => Self::Uri(uri),
        }
    }

    /// Scheme tag of this path: `file`, `jdt`, or whatever an opaque URI starts with.
    pub fn scheme(&self) -> &str {
        match self {
            ExplorerPath::Local(_) => "file",
            ExplorerPath::Jdt(_) => JDT_SCHEME,
            ExplorerPath::Uri(uri) => uri.split_once(':').map(|(scheme, _)| scheme).unwrap_or(""),
        }
    }

    /// Whether this path references an entry inside an immutable archive.
    pub fn is_read_only(&self) -> bool {
        matches!(self, ExplorerPath::Jdt(_))
    }

    pub fn as_local_path(&self) -> Option<&Path> {
        match self {
            ExplorerPath::Local(path) => Some(path.as_path()),
            _ => None,
        }
    }

    pub fn as_jdt(&self) -> Option<&JdtPath> {
        match self {
            ExplorerPath::Jdt(path) => Some(path),
            _ => None,
        }
    }

    /// The filesystem-style path string used as a cache key.
    ///
    /// - Local paths render with the platform separator.
    /// - `jdt:` paths render as `/<authority>/<entry>`, without the query.
    /// - Opaque URIs render as-is.
    pub fn fs_path(&self) -> Cow<'_, str> {
        match self {
            ExplorerPath::Local(path) => path.to_string_lossy(),
            ExplorerPath::Jdt(path) => Cow::Owned(path.fs_path()),
            ExplorerPath::Uri(uri) => Cow::Borrowed(uri.as_str()),
        }
    }

    /// The exact key this path is cached under.
    ///
    /// Same text as [`ExplorerPath::fs_path`], except that local paths which are not valid
    /// Unicode have no key: their lossy rendering could collide with another path.
    pub fn cache_key(&self) -> Option<Cow<'_, str>> {
        match self {
            ExplorerPath::Local(path) => path.to_str().map(Cow::Borrowed),
            _ => Some(self.fs_path()),
        }
    }

    /// The directory containing this path, if any.
    pub fn parent(&self) -> Option<ExplorerPath> {
        match self {
            ExplorerPath::Local(path) => path.parent().map(|p| ExplorerPath::Local(p.to_path_buf())),
            ExplorerPath::Jdt(path) => path.parent().map(ExplorerPath::Jdt),
            ExplorerPath::Uri(_) => None,
        }
    }

    /// Converts this path back into a URI string.
    ///
    /// Returns `None` for local paths that are not absolute.
    pub fn to_uri(&self) -> Option<String> {
        match self {
            ExplorerPath::Local(path) => Url::from_file_path(path).ok().map(String::from),
            ExplorerPath::Jdt(path) => Some(path.to_uri()),
            ExplorerPath::Uri(uri) => Some(uri.clone()),
        }
    }
}

impl From<PathBuf> for ExplorerPath {
    fn from(value: PathBuf) -> Self {
        ExplorerPath::local(value)
    }
}

impl From<&Path> for ExplorerPath {
    fn from(value: &Path) -> Self {
        ExplorerPath::local(value.to_path_buf())
    }
}

impl From<JdtPath> for ExplorerPath {
    fn from(value: JdtPath) -> Self {
        ExplorerPath::Jdt(value)
    }
}

impl fmt::Display for ExplorerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplorerPath::Local(path) => write!(f, "{}", path.display()),
            ExplorerPath::Jdt(path) => write!(f, "{path}"),
            ExplorerPath::Uri(uri) => write!(f, "{uri}"),
        }
    }
}

/// Resolves `.` and `..` lexically. `..` never climbs above the root; leading `..` components of
/// a relative path are kept.
pub(crate) fn normalize_local_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                _ if out.has_root() => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_uri_paths_are_logically_normalized() {
        #[cfg(not(windows))]
        let (uri, expected) = ("file:///a/b/../c.java", PathBuf::from("/a/c.java"));

        #[cfg(windows)]
        let (uri, expected) = ("file:///C:/a/b/../c.java", PathBuf::from(r"C:\a\c.java"));

        assert_eq!(ExplorerPath::parse(uri), ExplorerPath::Local(expected));
    }

    #[test]
    #[cfg(not(windows))]
    fn file_uri_percent_escapes_are_decoded() {
        assert_eq!(
            ExplorerPath::parse("file:///proj/My%20App/Main.java"),
            ExplorerPath::Local(PathBuf::from("/proj/My App/Main.java"))
        );
    }

    #[test]
    #[cfg(not(windows))]
    fn file_uri_query_and_fragment_are_dropped() {
        for uri in ["file:///tmp/A.java?query", "file:///tmp/A.java#frag"] {
            assert_eq!(
                ExplorerPath::parse(uri),
                ExplorerPath::Local(PathBuf::from("/tmp/A.java"))
            );
        }
    }

    #[test]
    #[cfg(unix)]
    fn non_unicode_local_paths_have_no_cache_key() {
        let ff = ExplorerPath::parse("file:///proj/%FF.java");
        let fe = ExplorerPath::parse("file:///proj/%FE.java");
        assert!(matches!(ff, ExplorerPath::Local(_)));
        assert_ne!(ff, fe);
        assert_eq!(ff.fs_path(), fe.fs_path());
        assert_eq!(ff.cache_key(), None);
        assert_eq!(fe.cache_key(), None);

        let plain = ExplorerPath::local("/proj/A.java");
        assert_eq!(plain.cache_key().as_deref(), Some("/proj/A.java"));
    }

    #[test]
    #[cfg(not(windows))]
    fn bare_absolute_paths_are_local() {
        assert_eq!(
            ExplorerPath::parse("/proj/./src/../src/Main.java"),
            ExplorerPath::Local(PathBuf::from("/proj/src/Main.java"))
        );
    }

    #[test]
    fn jdt_uris_are_read_only() {
        let path = ExplorerPath::parse("jdt://contents/rt.jar/java.lang/String.class?=app/%3Cjava");
        assert!(path.is_read_only());
        assert_eq!(path.scheme(), "jdt");
        assert_eq!(path.fs_path(), "/contents/rt.jar/java.lang/String.class");

        let jdt = path.as_jdt().expect("jdt path");
        assert_eq!(jdt.query(), Some("=app/%3Cjava"));
    }

    #[test]
    fn jdt_uri_roundtrips() {
        let uri = "jdt://contents/lib.jar/com.example/A%20B.class?=app";
        let path = ExplorerPath::parse(uri);
        assert_eq!(path.to_uri().as_deref(), Some(uri));
        assert_eq!(ExplorerPath::parse(path.to_uri().unwrap()), path);
    }

    #[test]
    fn unknown_schemes_are_opaque() {
        let path = ExplorerPath::parse("untitled:Untitled-1");
        assert_eq!(path, ExplorerPath::Uri("untitled:Untitled-1".to_string()));
        assert_eq!(path.scheme(), "untitled");
        assert!(!path.is_read_only());
        assert_eq!(path.parent(), None);
    }

    #[test]
    fn garbage_is_kept_verbatim() {
        assert_eq!(ExplorerPath::parse(""), ExplorerPath::Uri(String::new()));
        assert_eq!(ExplorerPath::parse("not a uri"), ExplorerPath::Uri("not a uri".into()));
    }

    #[test]
    #[cfg(not(windows))]
    fn local_parent_is_containing_directory() {
        let path = ExplorerPath::local("/proj/src/Main.java");
        assert_eq!(path.parent(), Some(ExplorerPath::local("/proj/src")));
        assert_eq!(ExplorerPath::local("/").parent(), None);
    }

    #[test]
    fn local_paths_clamp_dotdot_at_root() {
        #[cfg(not(windows))]
        let (raw, expected) = ("/a/../../b.java", PathBuf::from("/b.java"));

        #[cfg(windows)]
        let (raw, expected) = (r"C:\a\..\..\b.java", PathBuf::from(r"C:\b.java"));

        assert_eq!(ExplorerPath::local(raw), ExplorerPath::Local(expected));
    }

    #[test]
    #[cfg(not(windows))]
    fn local_paths_roundtrip_through_file_uris() {
        let dir = tempfile::tempdir().unwrap();
        let path = ExplorerPath::local(dir.path().join("Main.java"));
        let uri = path.to_uri().expect("file uri");
        assert!(uri.starts_with("file:///"), "unexpected uri: {uri}");
        assert_eq!(ExplorerPath::parse(uri), path);
    }

    #[test]
    fn leading_dotdot_is_kept_for_relative_paths() {
        assert_eq!(
            ExplorerPath::local("../../a/./b"),
            ExplorerPath::Local(PathBuf::from("../../a/b"))
        );
    }

    #[test]
    fn relative_local_paths_have_no_uri() {
        assert_eq!(ExplorerPath::local("src/Main.java").to_uri(), None);
    }
}
