pub mod client;
pub mod collectors;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod utils;

use crate::client::sysfs::SysfsClient;
use crate::client::Platform;
use crate::collectors::TemperatureService;
use crate::config::AppConfig;
use anyhow::Context;
use log::{debug, info};
use std::io::{self, Write};
use std::time::Instant;

/// Produce one page on standard output from the real one-wire bus.
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    info!("Starting thermometer page");
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(config, &SysfsClient::new(), &mut out).await
}

/// Discover, read and render in one pass. The header is written before
/// discovery, so an error returned from here leaves `out` holding an
/// unterminated document.
pub async fn render<P: Platform, W: Write>(
    config: &AppConfig,
    platform: &P,
    out: &mut W,
) -> anyhow::Result<()> {
    let start = Instant::now();
    dashboard::write_header(out, &config.page.title, &platform.host_name())
        .context("Failed to write page header")?;

    let mut service = TemperatureService::discover(platform, &config.devices)
        .context("Failed to discover sensors")?;
    service
        .read_sensors(platform, &config.retry_policy())
        .await
        .context("Failed to read sensors")?;
    service.log_readings();

    dashboard::write_readings(out, service.sensors()).context("Failed to write readings")?;
    dashboard::write_footer(out).context("Failed to write page footer")?;

    debug!("render took: {} ms", start.elapsed().as_millis());
    Ok(())
}
