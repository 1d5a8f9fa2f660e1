use crate::client::Platform;
use crate::config::RetryPolicy;
use crate::error::ThermoError;
use crate::models::Sensor;
use crate::utils::w1::{millis_to_fahrenheit, parse_slave_report, SlaveReport};
use log::debug;
use std::time::Instant;

/// Progress of polling one `w1_slave` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// `attempt` reads have been made without a CRC confirmation.
    Polling { attempt: u32 },
    Valid(i64),
    Failed { attempts: u32 },
}

impl PollState {
    /// Advance after one more read yielded `report`.
    pub fn next(self, report: SlaveReport, policy: &RetryPolicy) -> PollState {
        match (self, report) {
            (PollState::Polling { .. }, SlaveReport::Valid(millis)) => PollState::Valid(millis),
            (PollState::Polling { attempt }, SlaveReport::Pending) => {
                let attempt = attempt + 1;
                match policy.max_attempts {
                    Some(max) if attempt >= max => PollState::Failed { attempts: attempt },
                    _ => PollState::Polling { attempt },
                }
            }
            (done, _) => done,
        }
    }
}

/// Read `sensor` until the driver confirms the CRC, then store the reading.
/// With an unbounded policy a sensor that never confirms blocks forever.
pub async fn read_sensor<P: Platform>(
    platform: &P,
    sensor: &mut Sensor,
    policy: &RetryPolicy,
) -> Result<f64, ThermoError> {
    let start = Instant::now();
    let path = &sensor.source_path;
    let mut state = PollState::Polling { attempt: 0 };

    let millis = loop {
        let text = platform
            .read_file(path)
            .map_err(|e| ThermoError::filesystem(path, e))?;
        let report = parse_slave_report(&text).map_err(|reason| ThermoError::Parse {
            path: path.clone(),
            reason,
        })?;

        state = state.next(report, policy);
        match state {
            PollState::Valid(millis) => break millis,
            PollState::Failed { attempts } => {
                return Err(ThermoError::RetryExhausted {
                    path: path.clone(),
                    attempts,
                })
            }
            PollState::Polling { attempt } => {
                debug!(
                    "{}: CRC not confirmed (attempt {}): {:?}",
                    sensor.label,
                    attempt,
                    text.lines().next().unwrap_or("")
                );
                tokio::time::sleep(policy.interval).await;
            }
        }
    };

    sensor.last_millis = Some(millis);
    sensor.last_value = millis_to_fahrenheit(millis);
    debug!(
        "read_sensor {} took: {} ms",
        sensor.label,
        start.elapsed().as_millis()
    );
    Ok(sensor.last_value)
}
