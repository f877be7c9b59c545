//! Workspace membership: which explorer paths belong to the projects being edited.

use std::path::{Path, PathBuf};

use nova_explorer_config::ExplorerConfig;
use nova_explorer_path::{normalize_local_path, ExplorerPath};

/// Decides whether a path belongs to the active workspace.
///
/// Implemented for [`WorkspaceFolders`] and for any `Fn(&ExplorerPath) -> bool`.
pub trait WorkspaceMembership {
    fn is_in_workspace(&self, path: &ExplorerPath) -> bool;
}

impl<F> WorkspaceMembership for F
where
    F: Fn(&ExplorerPath) -> bool,
{
    fn is_in_workspace(&self, path: &ExplorerPath) -> bool {
        self(path)
    }
}

/// The set of workspace folder roots currently open.
///
/// A local path is in the workspace when it is one of the folders or lies lexically below one.
/// Non-local paths never are.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkspaceFolders {
    folders: Vec<PathBuf>,
}

impl WorkspaceFolders {
    pub fn new<I, P>(folders: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut folders: Vec<PathBuf> = folders
            .into_iter()
            .map(|folder| normalize_local_path(&folder.into()))
            .collect();
        folders.sort();
        folders.dedup();
        Self { folders }
    }

    /// Builds the folder set from config, resolving relative folders against `workspace_root`.
    pub fn from_config(config: &ExplorerConfig, workspace_root: &Path) -> Self {
        Self::new(config.workspace_folders(workspace_root))
    }

    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    /// Returns the innermost folder containing `path`.
    pub fn folder_for(&self, path: &ExplorerPath) -> Option<&Path> {
        let local = path.as_local_path()?;
        self.folders
            .iter()
            .filter(|folder| local.starts_with(folder))
            .max_by_key(|folder| folder.components().count())
            .map(PathBuf::as_path)
    }
}

impl WorkspaceMembership for WorkspaceFolders {
    fn is_in_workspace(&self, path: &ExplorerPath) -> bool {
        self.folder_for(path).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(windows))]
    fn membership_is_component_wise() {
        let folders = WorkspaceFolders::new(["/proj"]);
        assert!(folders.is_in_workspace(&ExplorerPath::local("/proj")));
        assert!(folders.is_in_workspace(&ExplorerPath::local("/proj/src/Main.java")));
        assert!(!folders.is_in_workspace(&ExplorerPath::local("/project/src")));
        assert!(!folders.is_in_workspace(&ExplorerPath::local("/")));
    }

    #[test]
    #[cfg(not(windows))]
    fn innermost_folder_wins() {
        let folders = WorkspaceFolders::new(["/ws", "/ws/nested", "/ws/./nested"]);
        assert_eq!(folders.folders().len(), 2);
        assert_eq!(
            folders.folder_for(&ExplorerPath::local("/ws/nested/A.java")),
            Some(Path::new("/ws/nested"))
        );
        assert_eq!(
            folders.folder_for(&ExplorerPath::local("/ws/other/B.java")),
            Some(Path::new("/ws"))
        );
    }

    #[test]
    fn non_local_paths_are_never_members() {
        let folders = WorkspaceFolders::new(["/"]);
        let jdt = ExplorerPath::parse("jdt://contents/rt.jar/java.lang/String.class");
        assert!(!folders.is_in_workspace(&jdt));
        assert!(!folders.is_in_workspace(&ExplorerPath::parse("untitled:Untitled-1")));
    }

    #[test]
    fn closures_are_oracles() {
        let everything = |_: &ExplorerPath| true;
        assert!(everything.is_in_workspace(&ExplorerPath::parse("untitled:x")));
    }
}
