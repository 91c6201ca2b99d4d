// src/fs/mod.rs

//! Filesystem access used by test discovery.
//!
//! Discovery walks directories and reads suite files through [`FileSystem`]
//! so that tests can run it against [`mock::MockFileSystem`].

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod mock;

pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// Entries of a directory, as full paths, in no particular order.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("reading dir {:?}", path))? {
            entries.push(entry?.path());
        }
        Ok(entries)
    }
}

/// Every file below `root` (recursively) accepted by `keep`, sorted by path.
pub fn walk_files(
    fs: &dyn FileSystem,
    root: &Path,
    keep: impl Fn(&Path) -> bool,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            if fs.is_dir(&path) {
                stack.push(path);
            } else if fs.is_file(&path) && keep(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::mock::MockFileSystem;
    use super::*;

    #[test]
    fn walk_is_recursive_and_sorted() {
        let fs = MockFileSystem::new();
        fs.add_file("root/b.txt", "");
        fs.add_file("root/nested/a.txt", "");
        fs.add_file("root/nested/skip.md", "");

        let files = walk_files(&fs, Path::new("root"), |p| {
            p.extension().is_some_and(|ext| ext == "txt")
        })
        .unwrap();

        assert_eq!(
            files,
            vec![PathBuf::from("root/b.txt"), PathBuf::from("root/nested/a.txt")]
        );
    }
}
