use crate::client::Platform;
use crate::config::{DeviceConfig, RetryPolicy};
use crate::error::ThermoError;
use crate::models::Sensor;
use log::{debug, info};
use std::time::Instant;

pub mod discovery;
pub mod reader;

/// Owns the sensors discovered in one run.
#[derive(Debug, Default)]
pub struct TemperatureService {
    sensors: Vec<Sensor>,
}

impl TemperatureService {
    pub fn discover<P: Platform>(platform: &P, devices: &DeviceConfig) -> Result<Self, ThermoError> {
        Ok(Self {
            sensors: discovery::discover(platform, devices)?,
        })
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// Read every sensor in discovery order. The first failure aborts the pass.
    pub async fn read_sensors<P: Platform>(
        &mut self,
        platform: &P,
        policy: &RetryPolicy,
    ) -> Result<(), ThermoError> {
        let start = Instant::now();
        for sensor in self.sensors.iter_mut() {
            reader::read_sensor(platform, sensor, policy).await?;
        }
        debug!("read_sensors took: {} ms", start.elapsed().as_millis());
        Ok(())
    }

    pub fn log_readings(&self) {
        for sensor in &self.sensors {
            match sensor.last_celsius() {
                Some(celsius) => info!(
                    "{} ({}): {:3.2} °F ({:.3} °C)",
                    sensor.label, sensor.device_id, sensor.last_value, celsius
                ),
                None => info!("{} ({}): not read", sensor.label, sensor.device_id),
            }
        }
    }
}
