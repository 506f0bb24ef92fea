//! Declaration of traits reused across the code.

use crate::carving::CarveHit;
use crate::filesystem::boot_record::BootRecord;
use crate::filesystem::fat_area::FatHeaderProbe;
use crate::filesystem::fs_info::FsInfo;

/// Implementation of the LayoutDisplay trait.
/// It is used to display the layout of a given structure such as a volume.
pub trait LayoutDisplay {
    fn display_layout(&self, indent: u8) -> Result<String, std::fmt::Error>;
}

/// Consumer of the structured results of a recovery run.
///
/// Calls arrive in order: the boot record, the FS Information sector, the FAT header,
/// then one call per hit in ascending cluster order.
pub trait ReportSink {
    fn boot_record(&mut self, boot_record: &BootRecord);
    fn fs_info(&mut self, fs_info: &FsInfo);
    fn fat_header(&mut self, fat_header: &FatHeaderProbe);
    fn carve_hit(&mut self, hit: &CarveHit);
}
