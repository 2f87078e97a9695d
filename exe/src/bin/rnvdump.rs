// SPDX-License-Identifier: GPL-2.0 OR MIT

use std::error::Error;
use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use rnv::phys::{Label, NvDecodeLimits};
use rnv_exe_lib::{init_logger, report_device, report_file};

////////////////////////////////////////////////////////////////////////////////

/// Dump the NV lists of ZFS vdev labels.
#[derive(Parser, Debug)]
#[command(name = "rnvdump", version)]
struct Cli {
    /// Device or image file, or a bare NV list with --raw.
    path: PathBuf,

    /// Input is a bare NV list, starting with its encoding header.
    #[arg(long)]
    raw: bool,

    /// Only dump this label.
    #[arg(
        long,
        conflicts_with = "raw",
        value_parser = clap::value_parser!(u8).range(0..Label::COUNT as i64)
    )]
    label: Option<u8>,

    /// Maximum nesting of lists, from 1 to 64.
    #[arg(
        long,
        default_value_t = NvDecodeLimits::DEFAULT_MAX_DEPTH,
        value_parser = parse_max_depth
    )]
    max_depth: usize,

    /// Decode arrays of nested lists, instead of dumping their bytes.
    #[arg(long)]
    decode_list_arrays: bool,

    /// Log more, repeat for debug and trace.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Largest accepted `--max-depth`.
const MAX_DEPTH_LIMIT: usize = 64;

fn parse_max_depth(value: &str) -> Result<usize, String> {
    let depth: usize = value.parse().map_err(|e| format!("{e}"))?;

    if (1..=MAX_DEPTH_LIMIT).contains(&depth) {
        Ok(depth)
    } else {
        Err(format!("{depth} is not in 1..={MAX_DEPTH_LIMIT}"))
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    init_logger(cli.verbose)?;

    let limits = NvDecodeLimits {
        max_depth: cli.max_depth,
        nv_list_arrays: cli.decode_list_arrays,
        ..NvDecodeLimits::default()
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.raw {
        report_file(&mut out, &cli.path, &limits)?;
    } else {
        report_device(&mut out, &cli.path, cli.label.map(usize::from), &limits)?;
    }

    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("rnvdump: {e}");
        process::exit(1);
    }
}

////////////////////////////////////////////////////////////////////////////////
