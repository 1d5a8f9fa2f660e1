use regex::Regex;
use std::sync::OnceLock;

/// Marker the w1-therm driver puts on line 1 when the CRC check passed.
pub const CRC_OK_MARKER: &str = "YES";
/// Prefix of the raw reading on line 2.
pub const TEMPERATURE_TAG: &str = "t=";

/// Outcome of parsing one `w1_slave` report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlaveReport {
    /// Line 1 carries no CRC confirmation yet; the file has to be re-read.
    Pending,
    /// Validated reading in milli-degrees Celsius.
    Valid(i64),
}

/// Parse the two-line report exposed by the w1-therm driver, e.g.
///
/// ```text
/// 72 01 4b 46 7f ff 0e 10 57 : crc=57 YES
/// 72 01 4b 46 7f ff 0e 10 57 t=23125
/// ```
///
/// Line 2 is only looked at once line 1 contains [`CRC_OK_MARKER`]. The error
/// string describes what was wrong with the content.
pub fn parse_slave_report(text: &str) -> Result<SlaveReport, String> {
    let mut lines = text.lines();
    let status = lines
        .next()
        .ok_or_else(|| "report is empty".to_string())?;
    if !status.contains(CRC_OK_MARKER) {
        return Ok(SlaveReport::Pending);
    }

    let data = lines
        .next()
        .ok_or_else(|| "report has no data line".to_string())?;
    let (_, raw) = data
        .split_once(TEMPERATURE_TAG)
        .ok_or_else(|| format!("no `{}` in data line {:?}", TEMPERATURE_TAG, data))?;

    parse_millis(raw)
        .map(SlaveReport::Valid)
        .ok_or_else(|| format!("no integer after `{}` in {:?}", TEMPERATURE_TAG, raw))
}

// Leading (optionally negative) integer; sub-zero readings come as `t=-1250`.
fn parse_millis(raw: &str) -> Option<i64> {
    static LEADING_INT: OnceLock<Regex> = OnceLock::new();
    let re = LEADING_INT.get_or_init(|| Regex::new(r"^-?\d+").expect("valid regex"));
    re.find(raw.trim()).and_then(|m| m.as_str().parse().ok())
}

#[inline]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Takes a raw temperature in milli-celsius and converts it to fahrenheit.
#[inline]
pub fn millis_to_fahrenheit(millis: i64) -> f64 {
    celsius_to_fahrenheit(millis as f64 / 1000.0)
}
