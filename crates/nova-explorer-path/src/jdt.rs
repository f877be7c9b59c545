use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Scheme used by the Java language server for entries that live inside compiled archives.
pub const JDT_SCHEME: &str = "jdt";

/// A read-only class file reference such as
/// `jdt://contents/rt.jar/java.lang/String.class?=app/%3Cjava.base`.
///
/// The query carries the owning project and container handle. It is kept so the URI can be
/// reproduced, but it is not part of [`JdtPath::fs_path`]: the same class reached through two
/// projects resolves to the same filesystem-style key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JdtPath {
    authority: String,
    entry: String,
    query: Option<String>,
}

impl JdtPath {
    pub fn new(authority: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            entry: normalize_entry(&entry.into()),
            query: None,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.is_empty()).then_some(query);
        self
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Decoded entry path, always starting with `/` unless empty.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Filesystem-style key: `/<authority><entry>`.
    pub fn fs_path(&self) -> String {
        if self.authority.is_empty() {
            return self.entry.clone();
        }
        format!("/{}{}", self.authority, self.entry)
    }

    /// The containing entry, without a query. `None` once the entry is exhausted.
    pub fn parent(&self) -> Option<JdtPath> {
        let (parent, _) = self.entry.rsplit_once('/')?;
        if parent.is_empty() && self.entry.len() <= 1 {
            return None;
        }
        Some(JdtPath {
            authority: self.authority.clone(),
            entry: if parent.is_empty() {
                "/".to_string()
            } else {
                parent.to_string()
            },
            query: None,
        })
    }

    pub fn to_uri(&self) -> String {
        let mut out = format!(
            "{JDT_SCHEME}://{}{}",
            self.authority,
            utf8_percent_encode(&self.entry, ENTRY_ESCAPES)
        );
        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }
        out
    }

    /// Builds a path from a parsed `jdt:` URL. The fragment is dropped.
    ///
    /// Returns `None` for other schemes and for entries that don't decode to UTF-8.
    pub(crate) fn from_url(url: &url::Url) -> Option<Self> {
        if url.scheme() != JDT_SCHEME {
            return None;
        }
        let authority = url.host_str().unwrap_or_default().to_string();
        let entry = percent_decode_str(url.path()).decode_utf8().ok()?;
        let path = JdtPath::new(authority, entry);
        Some(match url.query() {
            Some(query) => path.with_query(query),
            None => path,
        })
    }
}

impl fmt::Display for JdtPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

fn normalize_entry(entry: &str) -> String {
    let entry = if entry.contains('\\') {
        entry.replace('\\', "/")
    } else {
        entry.to_string()
    };
    let segments: Vec<&str> = entry.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(entry.len() + 1);
    for segment in segments {
        out.push('/');
        out.push_str(segment);
    }
    out
}

/// Bytes escaped in a jdt entry: everything outside the RFC 3986 unreserved set, except the
/// path delimiters and sub-delimiters editors leave alone.
const ENTRY_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/')
    .remove(b':')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');
