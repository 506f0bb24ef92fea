//! Header entries of the first File Allocation Table.
//!
//! Only the two reserved entries are decoded. They are reported as-is and never
//! used to follow cluster chains.

use binread::{BinRead, BinReaderExt};
use getset::Getters;
use std::fmt;
use std::io;

use super::boot_record::BootRecord;
use super::fat_error::FATError;
use crate::disk::SectorReader;

/// The first two 32-bit entries of FAT #1.
#[derive(BinRead, Debug, Getters, Clone, Copy, PartialEq, Eq)]
#[br(little)]
pub struct FatHeaderProbe {
    /// FAT[0]: echoes the media descriptor in its low byte
    #[get = "pub"]
    media_type: u32,
    /// FAT[1]: end-of-chain marker carrying the clean-shutdown and hard-error bits
    #[get = "pub"]
    partition_status: u32,
}

impl FatHeaderProbe {
    /// Reads the header entries of the FAT starting right after the reserved sectors.
    pub fn from<R: io::Read + io::Seek>(
        reader: &mut SectorReader<R>,
        boot_record: &BootRecord,
    ) -> Result<FatHeaderProbe, FATError> {
        let buf = reader.read(boot_record.fat_start(), 1)?;
        Ok(io::Cursor::new(buf).read_le()?)
    }
}

impl fmt::Display for FatHeaderProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FAT Area:")?;
        writeln!(f, "  {:<26} 0x{:X}", "Media Type", self.media_type)?;
        writeln!(f, "  {:<26} 0x{:X}", "Partition Status", self.partition_status)
    }
}
