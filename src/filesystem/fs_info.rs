//! FAT32 FS Information sector.
//!
//! The FS Information sector caches the free-space accounting of the volume. Its
//! free cluster count and next free cluster hint bound the carving scan.

use binread::{BinRead, BinReaderExt};
use getset::Getters;
use std::fmt;
use std::io;

use super::fat_error::FATError;
use crate::constants::FS_INFO_SECTOR;
use crate::disk::SectorReader;

pub const LEAD_SIGNATURE: u32 = 0x5252_6141;
pub const STRUCT_SIGNATURE: u32 = 0x7272_4161;
pub const TRAIL_SIGNATURE: u32 = 0x0000_55AA;

/// FS Information structure of a FAT32 volume.
///
/// Signatures are kept big-endian so they compare directly against the on-disk byte order.
#[derive(BinRead, Debug, Getters)]
#[br(little)]
pub struct FsInfo {
    /// "RRaA" at offset 0
    #[br(big)]
    #[get = "pub"]
    lead_sig: u32,
    /// "rrAa" at offset 484
    #[br(big, pad_before = 480)]
    #[get = "pub"]
    struc_sig: u32,
    /// Last known count of free clusters
    #[get = "pub"]
    free_count: u32,
    /// Cluster number where the search for free clusters should start
    #[get = "pub"]
    nxt_free: u32,
    #[br(big, pad_before = 12)]
    #[get = "pub"]
    trail_sig: u32,
}

impl FsInfo {
    /// Reads the FS Information structure and checks its three signatures.
    ///
    /// The structure is always read from sector 1; the boot record's FSInfo
    /// field is reported but not followed.
    ///
    /// # Errors
    /// - `FATError::InvalidFsInfo` if any of the signatures does not match
    /// - `FATError::TruncatedRead` if the image ends before the sector
    pub fn from<R: io::Read + io::Seek>(reader: &mut SectorReader<R>) -> Result<FsInfo, FATError> {
        let buf = reader.read(FS_INFO_SECTOR, 1)?;
        let fs_info: FsInfo = io::Cursor::new(buf).read_le()?;

        fs_info.validate()
    }

    fn validate(self) -> Result<Self, FATError> {
        if self.lead_sig != LEAD_SIGNATURE
            || self.struc_sig != STRUCT_SIGNATURE
            || self.trail_sig != TRAIL_SIGNATURE
        {
            return Err(FATError::InvalidFsInfo {
                lead: self.lead_sig,
                structure: self.struc_sig,
                trail: self.trail_sig,
            });
        }

        Ok(self)
    }
}

impl fmt::Display for FsInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FS Info:")?;
        writeln!(f, "  {:<26} 0x{:>04X}: {}", "Free Cluster Count", 0x1E8, self.free_count)?;
        writeln!(f, "  {:<26} 0x{:>04X}: {}", "Next Free Cluster", 0x1EC, self.nxt_free)
    }
}
