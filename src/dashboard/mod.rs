//! The HTML page handed back to the web server on standard output.
//!
//! Written in three steps so the header can go out before the sensors are
//! touched. A failure in between leaves the document unterminated.

use crate::models::Sensor;
use std::io::{self, Write};

pub const CONTENT_TYPE_HEADER: &str = "Content-type:text/html\r\n\r\n";

pub fn write_header<W: Write>(out: &mut W, title: &str, host: &str) -> io::Result<()> {
    out.write_all(CONTENT_TYPE_HEADER.as_bytes())?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<title>{}</title>", title)?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>{} on host {}</h1>", title, host)?;
    out.flush()
}

/// One paragraph per sensor, in the order given.
pub fn write_readings<W: Write>(out: &mut W, sensors: &[Sensor]) -> io::Result<()> {
    for sensor in sensors {
        writeln!(out, "<p>")?;
        writeln!(out, "{}: {:3.2}", sensor.label, sensor.last_value)?;
    }
    Ok(())
}

pub fn write_footer<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    out.flush()
}
