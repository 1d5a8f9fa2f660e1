use anyhow::{Context, Result};
use config::{Config, File, FileFormat};
use log::{debug, info, LevelFilter};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "w1thermo.ini";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DeviceConfig {
    pub base_path: PathBuf,
    pub family_prefix: String,
    pub slave_file: String,
    pub load_drivers: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("/sys/bus/w1/devices/"),
            family_prefix: "28-".to_string(),
            slave_file: "w1_slave".to_string(),
            load_drivers: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReaderConfig {
    pub poll_interval_ms: u64,
    /// 0 keeps polling until the driver confirms the CRC.
    pub max_attempts: u32,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 200,
            max_attempts: 0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Fastberry Web Thermometer".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// How long and how often to re-read a sensor whose CRC is not confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    /// `None` polls forever.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        ReaderConfig::default().into()
    }
}

impl From<ReaderConfig> for RetryPolicy {
    fn from(reader: ReaderConfig) -> Self {
        Self {
            interval: Duration::from_millis(reader.poll_interval_ms),
            max_attempts: (reader.max_attempts > 0).then_some(reader.max_attempts),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub devices: DeviceConfig,
    #[serde(default)]
    pub reader: ReaderConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_file(DEFAULT_CONFIG_FILE)
    }

    pub fn get_log_level(&self) -> LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Warn,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.reader.clone().into()
    }

    /// Load settings from an INI file. A missing file yields the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        debug!("Loading configuration from {}", config_path.display());

        let config = Config::builder()
            .add_source(
                File::from(config_path)
                    .format(FileFormat::Ini)
                    .required(false),
            )
            .build()
            .context(format!("Failed to load config from {}", config_path.display()))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context(format!("Failed to deserialize config from {}", config_path.display()))?;

        Ok(app_config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_path = path.as_ref();

        let mut config_str = String::new();

        config_str.push_str(&format!(
            "[devices]\nbase_path = {}\nfamily_prefix = {}\nslave_file = {}\nload_drivers = {}\n\n",
            self.devices.base_path.display(),
            self.devices.family_prefix,
            self.devices.slave_file,
            self.devices.load_drivers
        ));

        config_str.push_str(&format!(
            "[reader]\npoll_interval_ms = {}\nmax_attempts = {}\n\n",
            self.reader.poll_interval_ms, self.reader.max_attempts
        ));

        config_str.push_str(&format!("[page]\ntitle = {}\n\n", self.page.title));

        config_str.push_str(&format!("[logging]\nlevel = {}\n", self.logging.level));

        fs::write(config_path, config_str)
            .context(format!("Failed to save config to {}", config_path.display()))?;

        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.devices.base_path, PathBuf::from("/sys/bus/w1/devices/"));
        assert_eq!(config.devices.family_prefix, "28-");
        assert_eq!(config.devices.slave_file, "w1_slave");
        assert!(config.devices.load_drivers);
        assert_eq!(config.reader.poll_interval_ms, 200);
        assert_eq!(config.reader.max_attempts, 0);
        assert_eq!(config.get_log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_default_retry_policy_is_unbounded() {
        let policy = AppConfig::default().retry_policy();
        assert_eq!(policy.interval, Duration::from_millis(200));
        assert_eq!(policy.max_attempts, None);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::from_file(dir.path().join("absent.ini")).unwrap();
        assert_eq!(config.devices.family_prefix, "28-");
        assert_eq!(config.page.title, "Fastberry Web Thermometer");
    }

    #[test]
    fn test_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = "[devices]\nbase_path = /tmp/w1/\nload_drivers = false\n\n[reader]\npoll_interval_ms = 50\nmax_attempts = 10\n\n[logging]\nlevel = debug\n";

        temp_file.write_all(config_content.as_bytes()).unwrap();
        let config = AppConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.devices.base_path, PathBuf::from("/tmp/w1/"));
        assert!(!config.devices.load_drivers);
        // Keys left out keep their defaults
        assert_eq!(config.devices.family_prefix, "28-");
        assert_eq!(config.reader.poll_interval_ms, 50);
        assert_eq!(config.retry_policy().max_attempts, Some(10));
        assert_eq!(config.get_log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_save_config() {
        let mut config = AppConfig::default();
        config.devices.base_path = PathBuf::from("/srv/w1/devices/");
        config.devices.load_drivers = false;
        config.reader.poll_interval_ms = 500;
        config.reader.max_attempts = 3;
        config.page.title = "Greenhouse".to_string();
        config.logging.level = "info".to_string();

        let temp_file = NamedTempFile::new().unwrap();
        config.save(temp_file.path()).unwrap();

        let loaded = AppConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(loaded.devices.base_path, PathBuf::from("/srv/w1/devices/"));
        assert!(!loaded.devices.load_drivers);
        assert_eq!(loaded.reader.poll_interval_ms, 500);
        assert_eq!(loaded.reader.max_attempts, 3);
        assert_eq!(loaded.page.title, "Greenhouse");
        assert_eq!(loaded.get_log_level(), LevelFilter::Info);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[reader]\nmax_attempts = abc\n")
            .unwrap();

        let err = AppConfig::from_file(temp_file.path()).unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains(&temp_file.path().display().to_string()));
    }

    #[test]
    fn test_default_title_survives_save() {
        let temp_file = NamedTempFile::new().unwrap();
        AppConfig::default().save(temp_file.path()).unwrap();

        let loaded = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.page.title, "Fastberry Web Thermometer");
    }

    #[test]
    fn test_unknown_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "verbose".to_string();
        assert_eq!(config.get_log_level(), LevelFilter::Warn);
    }
}
