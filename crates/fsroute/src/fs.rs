//! Filesystem port for the route builder
//!
//! The builder never touches `std::fs` directly; it lists directories
//! through [`FileSystem`]. [`OsFileSystem`] reads the real disk and
//! [`MemoryFileSystem`] serves a fixed in-memory tree for tests.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Sockets, devices, dangling links; ignored by the builder
    Other,
}

/// One entry returned by [`FileSystem::read_dir`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Bare entry name, e.g. `page.tsx` or `[id]`
    pub name: String,
    /// Full path, as produced by [`FileSystem::join`]
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Directory-listing capability consumed by the builder
pub trait FileSystem {
    /// Lists the immediate children of `path`
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Joins a child name onto a directory path
    fn join(&self, base: &Path, name: &str) -> PathBuf {
        base.join(name)
    }

    /// Get backend name
    fn name(&self) -> &'static str;
}

/// Filesystem backend reading the operating system's disk
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let entry_path = self.join(path, &name);

            // Follow symlinks so linked page directories route like real ones
            let kind = match fs::metadata(&entry_path) {
                Ok(meta) if meta.is_dir() => EntryKind::Directory,
                Ok(meta) if meta.is_file() => EntryKind::File,
                _ => EntryKind::Other,
            };

            entries.push(DirEntry {
                name,
                path: entry_path,
                kind,
            });
        }

        Ok(entries)
    }

    fn name(&self) -> &'static str {
        "os"
    }
}

/// In-memory filesystem backend
///
/// Parent directories are created implicitly when a file is added.
///
/// ```
/// use fsroute::fs::{FileSystem, MemoryFileSystem};
/// use std::path::Path;
///
/// let fs = MemoryFileSystem::new()
///     .with_file("app/page.tsx")
///     .with_file("app/users/[id]/page.tsx");
///
/// let names: Vec<String> = fs
///     .read_dir(Path::new("app"))
///     .unwrap()
///     .into_iter()
///     .map(|e| e.name)
///     .collect();
/// assert_eq!(names, vec!["page.tsx", "users"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    entries: BTreeMap<PathBuf, EntryKind>,
}

impl MemoryFileSystem {
    /// Create an empty in-memory filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, creating every missing parent directory
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.add_parents(path);
        self.entries.insert(path.to_path_buf(), EntryKind::File);
        self
    }

    /// Adds a (possibly empty) directory
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.add_parents(path);
        self.entries.insert(path.to_path_buf(), EntryKind::Directory);
        self
    }

    /// Adds many files at once
    pub fn with_files<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths.into_iter().fold(self, |fs, path| fs.with_file(path))
    }

    /// Number of files and directories stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add_parents(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.entries
                .insert(ancestor.to_path_buf(), EntryKind::Directory);
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        match self.entries.get(path) {
            Some(EntryKind::Directory) => {}
            Some(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("not a directory: {}", path.display()),
                ))
            }
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such directory: {}", path.display()),
                ))
            }
        }

        Ok(self
            .entries
            .iter()
            .filter(|(entry, _)| entry.parent() == Some(path))
            .filter_map(|(entry, kind)| {
                let name = entry.file_name()?.to_string_lossy().into_owned();
                Some(DirEntry {
                    name,
                    path: entry.clone(),
                    kind: *kind,
                })
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
