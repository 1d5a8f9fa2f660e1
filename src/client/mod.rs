//! Narrow capability interface between the sensor logic and the host.
//!
//! Discovery and polling only ever touch the machine through [`Platform`], so
//! they can be driven by an in-memory fake in tests instead of real one-wire
//! hardware.

use std::io;
use std::path::Path;

pub mod sysfs;

#[cfg(test)]
pub(crate) mod mock;

pub trait Platform {
    /// Names of the immediate entries of `path`, in whatever order the
    /// underlying listing returns them.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Full text content of `path`.
    fn read_file(&self, path: &Path) -> io::Result<String>;

    /// Run a privileged helper such as `modprobe`. `Ok(true)` when the
    /// command exited successfully.
    fn run_privileged(&self, program: &str, args: &[&str]) -> io::Result<bool>;

    fn host_name(&self) -> String;
}
