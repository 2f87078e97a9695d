// SPDX-License-Identifier: GPL-2.0 OR MIT

//! Helpers of the `rnvdump` tool.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

use std::error::Error;
use std::fmt::Display;
use std::io;
use std::io::Write;
use std::path::Path;

use log::{info, warn, Level, LevelFilter, Metadata, Record, SetLoggerError};

use rnv::phys::{Label, NvDecodeLimits, NvList, PoolLabel};
use rnv::userspace::BlockDevice;

////////////////////////////////////////////////////////////////////////////////

/// Logger writing to stderr.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let level = match record.level() {
                Level::Error => "ERROR",
                Level::Warn => "WARN",
                Level::Info => "INFO",
                Level::Debug => "DEBUG",
                Level::Trace => "TRACE",
            };

            // Nowhere to report a failed write to stderr.
            let _ = writeln!(io::stderr().lock(), "[{level}] {}", record.args());
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/** Installs the stderr logger.
 *
 * `verbose` of 0 logs warnings and errors, 1 adds info, 2 debug, and more
 * adds trace.
 *
 * # Errors
 *
 * Returns [`SetLoggerError`] if a logger is already installed.
 */
pub fn init_logger(verbose: u8) -> Result<(), SetLoggerError> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

////////////////////////////////////////////////////////////////////////////////

/** Decodes `data` as an [`NvList`], and writes its dump.
 *
 * With `summary`, the [`PoolLabel`] of the list is written after the dump.
 * Decoding errors are reported in `out`, and are not returned.
 *
 * # Errors
 *
 * Returns [`io::Error`] if writing to `out` fails.
 */
pub fn report_nv_list<W: Write>(
    out: &mut W,
    data: &[u8],
    limits: &NvDecodeLimits,
    summary: bool,
) -> io::Result<()> {
    let list = match NvList::from_bytes_with_limits(data, limits) {
        Ok(v) => v,
        Err(err) => {
            warn!("could not decode {} bytes: {err}", data.len());
            return writeln!(out, "could not decode metadata container: {err}");
        }
    };

    write!(out, "{list}")?;

    if summary {
        match PoolLabel::from_nv_list(&list) {
            Ok(label) => {
                writeln!(out)?;
                write!(out, "{label}")?;
            }
            Err(err) => writeln!(out, "could not summarize metadata container: {err}")?,
        }
    }

    Ok(())
}

/** Dumps the [`NvList`] of the labels of a device image.
 *
 * With `label`, only that label is dumped, else all [`Label::COUNT`] labels.
 *
 * # Errors
 *
 * Labels that cannot be read are reported in `out`, and the other labels
 * are still dumped.
 *
 * # Errors
 *
 * Returns an error if the device cannot be opened, or writing to `out` fails.
 */
pub fn report_device<W: Write>(
    out: &mut W,
    path: &Path,
    label: Option<usize>,
    limits: &NvDecodeLimits,
) -> Result<(), Box<dyn Error>> {
    let device = BlockDevice::open(path)?;
    info!("{} has {} sectors", path.display(), device.sectors());

    let indices = match label {
        Some(v) => v..v + 1,
        None => 0..Label::COUNT,
    };

    for index in indices {
        writeln!(out, "label {index}:")?;

        match device.read_label(index) {
            Ok(bytes) => match Label::nv_pairs_payload(&bytes) {
                Ok(payload) => report_nv_list(out, payload, limits, true)?,
                Err(err) => report_unreadable(out, index, &err)?,
            },
            Err(err) => report_unreadable(out, index, &err)?,
        }

        writeln!(out)?;
    }

    Ok(())
}

/// Reports a label that could not be read, in place of its dump.
fn report_unreadable<W: Write>(out: &mut W, index: usize, err: &dyn Display) -> io::Result<()> {
    warn!("could not read label {index}: {err}");
    writeln!(out, "could not read label: {err}")
}

/// Dumps a file holding a bare [`NvList`].
///
/// # Errors
///
/// Returns an error if the file cannot be read, or writing to `out` fails.
pub fn report_file<W: Write>(
    out: &mut W,
    path: &Path,
    limits: &NvDecodeLimits,
) -> Result<(), Box<dyn Error>> {
    let data = std::fs::read(path)?;
    report_nv_list(out, &data, limits, false)?;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
