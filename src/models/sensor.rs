use std::path::PathBuf;

/// One DS18B20 probe found on the one-wire bus.
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    /// Driver-assigned directory name, e.g. `28-0000075a1b2c`.
    pub device_id: String,
    /// The `w1_slave` file yielding the raw report.
    pub source_path: PathBuf,
    /// Display name assigned at discovery, `Sensor N`.
    pub label: String,
    /// Last converted temperature in fahrenheit; 0.0 until read.
    pub last_value: f64,
    /// Raw reading behind `last_value`, set by the reader only.
    pub(crate) last_millis: Option<i64>,
}

impl Sensor {
    pub fn new(device_id: String, source_path: PathBuf, label: String) -> Self {
        Self {
            device_id,
            source_path,
            label,
            last_value: 0.0,
            last_millis: None,
        }
    }

    /// `None` until a read has succeeded.
    pub fn last_celsius(&self) -> Option<f64> {
        self.last_millis.map(|m| m as f64 / 1000.0)
    }
}
