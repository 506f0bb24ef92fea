//! This is the main entry point for the FAT32 carving tool.
//!
//! The program opens a FAT32 disk image read-only, prints its boot record, FS Information
//! sector and FAT header, then lists the unallocated clusters whose content starts with a
//! known file signature.

use clap::Parser;
use fat_carver::options::{NameEncoding, RunOptions};
use fat_carver::report::ConsoleReport;
use fat_carver::{SectorReader, recover};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(version, about = "Carve file signatures out of the free clusters of a FAT32 image")]
struct CliArgs {
    /// FAT32 disk image to scan
    image: PathBuf,

    /// Encoding of file names stored in ZIP headers (`utf-8` or `legacy-multibyte`)
    #[arg(long, default_value_t = NameEncoding::Utf8)]
    encoding: NameEncoding,

    /// Run the structural FAT32 checks on the boot record
    #[arg(long)]
    validate: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = stderrlog::new()
        .module(module_path!())
        .module("fat_carver")
        .verbosity(usize::from(args.verbose) + 1)
        .init()
    {
        eprintln!("Failed to initialise logging: {e}");
    }

    let options = RunOptions::new(args.encoding, args.validate);

    let reader = match SectorReader::open(&args.image) {
        Ok(reader) => reader,
        Err(err) => {
            error!("{}: {err}", args.image.display());
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Opened {} ({} bytes, {} sectors)",
        args.image.display(),
        reader.len(),
        reader.sector_count()
    );

    let mut report = ConsoleReport::new();
    match recover(reader, options, &mut report) {
        Ok(_) => {
            report.finish();
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
