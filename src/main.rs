use env_logger::{Builder, Target};
use log::error;
use w1thermo::config::AppConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load configuration first (without logging)
    let config = AppConfig::new().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {:#}", e);
        AppConfig::default()
    });

    // Standard output carries the page, so logs go to stderr
    Builder::new()
        .filter_level(config.get_log_level())
        .target(Target::Stderr)
        .format_timestamp_secs()
        .init();

    if let Err(e) = w1thermo::run(&config).await {
        error!("Application error: {:#}", e);
        return Err(e);
    }
    Ok(())
}
