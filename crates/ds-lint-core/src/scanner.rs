//! Source file discovery.

use crate::context::is_supported_path;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Directory names that are never descended into.
pub const PRUNED_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", ".next"];

/// Walks a directory tree for lintable files.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    excludes: Vec<glob::Pattern>,
}

impl Scanner {
    /// Creates a scanner with extra glob excludes.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is not a valid glob.
    pub fn new<I, S>(excludes: I) -> Result<Self, glob::PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let excludes = excludes
            .into_iter()
            .map(|p| glob::Pattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { excludes })
    }

    /// Returns every supported file under `root`, sorted.
    ///
    /// Unreadable directories are skipped.
    #[must_use]
    pub fn scan(&self, root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !is_pruned(e, root))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(DirEntry::into_path)
            .filter(|p| is_supported_path(p))
            .filter(|p| {
                let excluded = self.should_exclude(root, p);
                if excluded {
                    debug!("Excluding: {}", p.display());
                }
                !excluded
            })
            .collect();
        files.sort();
        files
    }

    /// Checks a path against the extra excludes.
    ///
    /// Patterns are matched against the path relative to `root`, and
    /// against the full path.
    fn should_exclude(&self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.excludes
            .iter()
            .any(|p| p.matches_path(relative) || p.matches_path(path))
    }
}

fn is_pruned(entry: &DirEntry, root: &Path) -> bool {
    entry.path() != root
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| PRUNED_DIRS.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn finds_supported_files_sorted_and_prunes() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        for f in [
            "src/b.tsx",
            "src/a.jsx",
            "src/util.ts",
            "src/legacy.js",
            "src/theme.css",
            "node_modules/pkg/index.js",
            ".git/hooks/x.js",
            "dist/bundle.js",
            "build/out.js",
            ".next/page.js",
            "src/Build/keep.tsx",
        ] {
            touch(root, f);
        }

        let files = Scanner::default().scan(root);
        assert_eq!(
            relative(root, &files),
            vec![
                "src/Build/keep.tsx",
                "src/a.jsx",
                "src/b.tsx",
                "src/legacy.js",
                "src/util.ts",
            ]
        );
    }

    #[test]
    fn extra_excludes_apply_to_relative_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(root, "src/generated/api.ts");
        touch(root, "src/App.tsx");

        let scanner = Scanner::new(["**/generated/**"]).unwrap();
        assert_eq!(relative(root, &scanner.scan(root)), vec!["src/App.tsx"]);
    }

    #[test]
    fn invalid_glob_is_rejected() {
        assert!(Scanner::new(["[unclosed"]).is_err());
    }
}
