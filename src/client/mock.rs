use crate::client::Platform;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory [`Platform`] for tests. Each file holds a queue of successive
/// contents; the last one is repeated once the queue drains.
#[derive(Debug, Default)]
pub(crate) struct MockPlatform {
    dirs: HashMap<PathBuf, Vec<String>>,
    files: RefCell<HashMap<PathBuf, VecDeque<String>>>,
    reads: RefCell<HashMap<PathBuf, u32>>,
    pub(crate) commands: RefCell<Vec<String>>,
    pub(crate) fail_commands: bool,
}

impl MockPlatform {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_dir(mut self, path: &str, entries: &[&str]) -> Self {
        self.dirs.insert(
            PathBuf::from(path),
            entries.iter().map(|e| e.to_string()).collect(),
        );
        self
    }

    pub(crate) fn with_file(self, path: &str, contents: &[&str]) -> Self {
        self.files.borrow_mut().insert(
            PathBuf::from(path),
            contents.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub(crate) fn read_count(&self, path: &str) -> u32 {
        self.reads
            .borrow()
            .get(Path::new(path))
            .copied()
            .unwrap_or(0)
    }
}

impl Platform for MockPlatform {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        self.dirs
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such directory"))
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        *self.reads.borrow_mut().entry(path.to_path_buf()).or_insert(0) += 1;
        let mut files = self.files.borrow_mut();
        let queue = files
            .get_mut(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))?;
        let text = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        text.ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "empty"))
    }

    fn run_privileged(&self, program: &str, args: &[&str]) -> io::Result<bool> {
        self.commands
            .borrow_mut()
            .push(format!("{} {}", program, args.join(" ")));
        if self.fail_commands {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "not root"));
        }
        Ok(true)
    }

    fn host_name(&self) -> String {
        String::from("thermopi")
    }
}
