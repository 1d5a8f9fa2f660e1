use crate::client::Platform;
use crate::config::DeviceConfig;
use crate::error::ThermoError;
use crate::models::Sensor;
use log::{debug, warn};
use std::time::Instant;

/// Kernel modules providing the GPIO bus master and the thermometer driver.
pub const DRIVER_MODULES: [&str; 2] = ["w1-gpio", "w1-therm"];

/// Load one kernel module through `modprobe`. A no-op when already loaded.
pub fn load_driver<P: Platform>(platform: &P, module: &str) -> Result<(), ThermoError> {
    let reason = match platform.run_privileged("modprobe", &[module]) {
        Ok(true) => return Ok(()),
        Ok(false) => "modprobe exited with failure".to_string(),
        Err(e) => e.to_string(),
    };
    Err(ThermoError::DriverLoad {
        module: module.to_string(),
        reason,
    })
}

/// Load every driver in [`DRIVER_MODULES`]. Failures are only logged;
/// discovery goes ahead regardless.
pub fn load_drivers<P: Platform>(platform: &P) {
    for module in DRIVER_MODULES {
        if let Err(e) = load_driver(platform, module) {
            warn!("{}", e);
        }
    }
}

/// List the bus directory and build a [`Sensor`] for each entry of the
/// supported family, labelled `Sensor 1`, `Sensor 2`, ... in listing order.
pub fn discover<P: Platform>(
    platform: &P,
    devices: &DeviceConfig,
) -> Result<Vec<Sensor>, ThermoError> {
    let start = Instant::now();
    if devices.load_drivers {
        load_drivers(platform);
    }

    let entries = platform
        .list_dir(&devices.base_path)
        .map_err(|e| ThermoError::filesystem(&devices.base_path, e))?;

    let mut sensors = Vec::new();
    for entry in entries {
        if !entry.contains(&devices.family_prefix) {
            debug!("Skipping {}: not a {} device", entry, devices.family_prefix);
            continue;
        }
        let source_path = devices.base_path.join(&entry).join(&devices.slave_file);
        let label = format!("Sensor {}", sensors.len() + 1);
        debug!("Discovered {} as {} at {}", entry, label, source_path.display());
        sensors.push(Sensor::new(entry, source_path, label));
    }

    debug!(
        "discover found {} sensors, took: {} ms",
        sensors.len(),
        start.elapsed().as_millis()
    );
    Ok(sensors)
}
