//! Directory listing for the tree-scoped batch helpers.

use crate::Error;
use std::path::Path;
use walkdir::WalkDir;

/// Produces the flat list of paths a tree-scoped query evaluates.
///
/// Paths are relative to the listed root and `/`-separated; the root itself
/// is the first entry, as `/`.
pub trait DirectoryLister {
    fn list(&self, root: &Path) -> Result<Vec<String>, Error>;
}

/// Recursive listing of every file below a root, via `walkdir`.
#[derive(Debug, Clone, Default)]
pub struct WalkDirLister {
    /// Follow symbolic links while walking.
    pub follow_links: bool,
}

impl DirectoryLister for WalkDirLister {
    fn list(&self, root: &Path) -> Result<Vec<String>, Error> {
        let mut out = vec!["/".to_string()];

        let walker = WalkDir::new(root).min_depth(1).follow_links(self.follow_links).sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|source| Error::Listing { root: root.to_path_buf(), source })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(rel) = entry.path().strip_prefix(root) else {
                continue;
            };
            let rel: Vec<_> = rel.components().map(|c| c.as_os_str().to_string_lossy()).collect();
            out.push(rel.join("/"));
        }

        tracing::debug!(root = %root.display(), entries = out.len(), "listed directory");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn lists_files_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("README.md"), "").unwrap();
        fs::write(root.join("src/lib.rs"), "").unwrap();
        fs::write(root.join("src/nested/mod.rs"), "").unwrap();

        let listed = WalkDirLister::default().list(root).unwrap();
        assert_eq!(listed, vec!["/", "README.md", "src/lib.rs", "src/nested/mod.rs"]);
    }

    #[test]
    fn missing_root_is_a_listing_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = WalkDirLister::default().list(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::Listing { .. }));
    }
}
