//! Filesystem capability boundary.
//!
//! Every sysfs/devfs access in this crate goes through the [`FsIo`] trait so
//! that discovery and teardown logic can be exercised against a fake
//! filesystem in tests. [`OsFs`] is the production implementation over
//! `std::fs`.

use std::fs;
use std::io;

/// Filesystem operations consumed by device discovery and teardown.
///
/// Implementations must be stateless: every call is resolved against current
/// filesystem contents, and nothing persists between calls.
pub trait FsIo {
    /// List the entry names of a directory, in directory order.
    fn read_dir(&self, dir: &str) -> io::Result<Vec<String>>;

    /// Stat a path without following a trailing symlink.
    ///
    /// Used as an existence probe for sysfs entries such as
    /// `/sys/block/dm-0/slaves/sda`.
    fn lstat(&self, path: &str) -> io::Result<()>;

    /// Resolve all symlinks in a path, returning the absolute target.
    fn eval_symlinks(&self, path: &str) -> io::Result<String>;

    /// Write raw bytes to a file (sysfs control files already exist).
    fn write_file(&self, path: &str, data: &[u8]) -> io::Result<()>;
}

/// Default [`FsIo`] implementation backed by the host OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFs;

impl FsIo for OsFs {
    fn read_dir(&self, dir: &str) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            names.push(entry?.file_name().to_string_lossy().to_string());
        }
        Ok(names)
    }

    fn lstat(&self, path: &str) -> io::Result<()> {
        fs::symlink_metadata(path).map(|_| ())
    }

    fn eval_symlinks(&self, path: &str) -> io::Result<String> {
        Ok(fs::canonicalize(path)?.to_string_lossy().to_string())
    }

    fn write_file(&self, path: &str, data: &[u8]) -> io::Result<()> {
        fs::write(path, data)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory fake filesystem shared by the unit tests.

    use std::collections::{BTreeMap, HashSet};
    use std::io;
    use std::sync::Mutex;

    use super::FsIo;

    #[derive(Default)]
    pub(crate) struct FakeFs {
        /// Directory path -> entry names, in listing order.
        pub dirs: BTreeMap<String, Vec<String>>,
        /// Symlink path -> fully resolved target.
        pub links: BTreeMap<String, String>,
        /// Paths that lstat reports as present.
        pub files: HashSet<String>,
        /// Write targets that should fail with EACCES.
        pub deny_writes: HashSet<String>,
        /// Log of successful writes: (path, data).
        pub writes: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl FakeFs {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn dir(mut self, path: &str, entries: &[&str]) -> Self {
            self.dirs
                .insert(path.to_string(), entries.iter().map(|e| e.to_string()).collect());
            self
        }

        pub(crate) fn link(mut self, path: &str, target: &str) -> Self {
            self.links.insert(path.to_string(), target.to_string());
            self
        }

        pub(crate) fn file(mut self, path: &str) -> Self {
            self.files.insert(path.to_string());
            self
        }

        pub(crate) fn deny_write(mut self, path: &str) -> Self {
            self.deny_writes.insert(path.to_string());
            self
        }

        pub(crate) fn written_paths(&self) -> Vec<String> {
            self.writes
                .lock()
                .unwrap()
                .iter()
                .map(|(p, _)| p.clone())
                .collect()
        }
    }

    impl FsIo for FakeFs {
        fn read_dir(&self, dir: &str) -> io::Result<Vec<String>> {
            let key = dir.trim_end_matches('/');
            self.dirs
                .get(key)
                .or_else(|| self.dirs.get(dir))
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }

        fn lstat(&self, path: &str) -> io::Result<()> {
            if self.files.contains(path)
                || self.links.contains_key(path)
                || self.dirs.contains_key(path.trim_end_matches('/'))
            {
                Ok(())
            } else {
                Err(io::Error::from(io::ErrorKind::NotFound))
            }
        }

        fn eval_symlinks(&self, path: &str) -> io::Result<String> {
            self.links
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }

        fn write_file(&self, path: &str, data: &[u8]) -> io::Result<()> {
            if self.deny_writes.contains(path) {
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
            self.writes
                .lock()
                .unwrap()
                .push((path.to_string(), data.to_vec()));
            Ok(())
        }
    }
}
