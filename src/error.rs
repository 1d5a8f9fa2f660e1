use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThermoError {
    #[error("Filesystem error on {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unexpected sensor data in {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to load kernel module {module}: {reason}")]
    DriverLoad { module: String, reason: String },

    #[error("Sensor {path} did not report a valid conversion after {attempts} attempts")]
    RetryExhausted { path: PathBuf, attempts: u32 },
}

impl ThermoError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ThermoError::Filesystem {
            path: path.into(),
            source,
        }
    }
}
