use crate::client::Platform;
use log::debug;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;
use subprocess::{Exec, NullFile};
use walkdir::WalkDir;

/// [`Platform`] backed by the real filesystem and process table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysfsClient;

impl SysfsClient {
    pub fn new() -> Self {
        Self
    }
}

impl Platform for SysfsClient {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let start = Instant::now();
        let mut names = Vec::new();
        // Depth 1 only; w1 device entries are symlinks and must not be followed.
        for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
            let entry = entry.map_err(io::Error::from)?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        debug!("list_dir {} took: {} ms", path.display(), start.elapsed().as_millis());
        Ok(names)
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn run_privileged(&self, program: &str, args: &[&str]) -> io::Result<bool> {
        let start = Instant::now();
        // Output is discarded; stdout belongs to the HTML page.
        let status = Exec::cmd(program)
            .args(args)
            .stdout(NullFile)
            .stderr(NullFile)
            .join()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        debug!(
            "{} {} took: {} ms",
            program,
            args.join(" "),
            start.elapsed().as_millis()
        );
        Ok(status.success())
    }

    fn host_name(&self) -> String {
        sysinfo::System::host_name().unwrap_or_else(|| String::from("unknown"))
    }
}
