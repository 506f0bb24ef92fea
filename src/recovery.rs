//! End-to-end recovery run: parse the volume metadata, report it, then carve.

use getset::CopyGetters;
use log::info;
use std::io;

use crate::disk::SectorReader;
use crate::filesystem::fat::FATVol;
use crate::filesystem::fat_error::FATError;
use crate::options::RunOptions;
use crate::traits::ReportSink;

/// Counters of a completed scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct RecoverySummary {
    /// Clusters whose head sector was probed
    visited: u64,
    /// Probed clusters that could not be read
    skipped: u64,
    hits: u64,
}

/// Runs the whole pipeline over `reader`, streaming results into `sink`.
///
/// Every metadata check runs before the sink sees anything, so a rejected image
/// produces no partial report.
///
/// # Errors
/// - Any `FATError` raised while opening the volume or parsing its metadata.
///   Clusters that cannot be read during the scan are skipped and never surface here.
pub fn recover<R: io::Read + io::Seek, S: ReportSink>(
    reader: SectorReader<R>,
    options: RunOptions,
    sink: &mut S,
) -> Result<RecoverySummary, FATError> {
    let mut vol = FATVol::from(reader, options)?;
    let cursor = vol.scan_cursor()?;

    sink.boot_record(vol.boot_record());
    sink.fs_info(vol.fs_info());
    sink.fat_header(vol.fat_header());

    let mut summary = RecoverySummary::default();
    let mut carver = vol.carver(cursor);
    for hit in carver.by_ref() {
        sink.carve_hit(&hit);
        summary.hits += 1;
    }
    summary.visited = carver.visited();
    summary.skipped = carver.skipped();

    info!(
        "Scan complete: {} cluster(s) probed, {} unreadable, {} hit(s)",
        summary.visited, summary.skipped, summary.hits
    );

    Ok(summary)
}
