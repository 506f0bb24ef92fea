//! Console rendering of a recovery run.

use log::error;

use crate::carving::CarveHit;
use crate::filesystem::boot_record::BootRecord;
use crate::filesystem::fat_area::FatHeaderProbe;
use crate::filesystem::fs_info::FsInfo;
use crate::traits::{LayoutDisplay, ReportSink};

/// Prints every section to stdout as it arrives.
#[derive(Debug, Default)]
pub struct ConsoleReport {
    hits: usize,
}

impl ConsoleReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints the closing line of the carving section.
    pub fn finish(&self) {
        println!("\n{} candidate file(s) found.", self.hits);
    }
}

impl ReportSink for ConsoleReport {
    fn boot_record(&mut self, boot_record: &BootRecord) {
        println!("{boot_record}");
        match boot_record.display_layout(2) {
            Ok(layout) => println!("{layout}"),
            Err(e) => error!("Print layout error: {e}"),
        }
    }

    fn fs_info(&mut self, fs_info: &FsInfo) {
        println!("{fs_info}");
    }

    fn fat_header(&mut self, fat_header: &FatHeaderProbe) {
        println!("{fat_header}");
        println!("Unallocated Cluster Carving:");
        println!("  {:<10} {:<12} Type", "Cluster", "Sector");
    }

    fn carve_hit(&mut self, hit: &CarveHit) {
        self.hits += 1;
        println!("  {:<10} {:<12} {}", hit.cluster(), hit.sector(), hit.label());
    }
}
