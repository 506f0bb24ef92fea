//! FAT32 boot record.
//!
//! This module implements:
//! - Boot sector parsing and signature checking
//! - Media descriptor classification
//! - Optional structural validation according to Microsoft's FAT specification
//! - Display of the decoded fields and of the volume region layout

use binread::{BinRead, BinReaderExt};
use getset::Getters;
use std::fmt::{self, Write as FmtWrite};
use std::io;

use super::fat_error::FATError;
use crate::constants::FAT_COPIES;
use crate::disk::SectorReader;
use crate::traits::LayoutDisplay;

/// Expected boot sector signature, read big-endian.
pub const BOOT_SIGNATURE: u16 = 0x55AA;

/// Kind of media described by the boot record's media byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Disk,
    Floppy,
    Unknown,
}

impl MediaType {
    /// Classifies a media descriptor byte.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0xF8 => MediaType::Disk,
            0xF0 | 0xF9 | 0xFC..=0xFF => MediaType::Floppy,
            _ => MediaType::Unknown,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MediaType::Disk => "DISK",
            MediaType::Floppy => "FLOPPY DISK",
            MediaType::Unknown => "UNKNOWN",
        };
        write!(f, "{s}")
    }
}

/// Boot sector of a FAT32 volume, including its BIOS Parameter Block.
#[derive(BinRead, Debug, Getters)]
#[br(little)]
pub struct BootRecord {
    /// Jump instruction to boot code (must be 0xEB ?? 0x90 or 0xE9 ?? ??)
    jmp: [u8; 3],
    /// OEM identifier (e.g., "MSWIN4.1")
    _oem_name: [u8; 8],
    /// Number of bytes per sector as declared by the volume
    #[get = "pub"]
    bytes_per_sec: u16,
    #[get = "pub"]
    sec_per_clus: u8,
    /// Number of reserved sectors from start of volume
    #[get = "pub"]
    rsvd_sec_cnt: u16,
    #[get = "pub"]
    num_fat: u8,
    /// Maximum number of root directory entries (0 for FAT32)
    root_ent_cnt: u16,
    /// Total sectors for volumes < 32MB (0 for FAT32)
    tot_sec_16: u16,
    /// Media descriptor (0xF8 for fixed disk)
    #[get = "pub"]
    media: u8,
    /// Sectors per FAT for FAT12/FAT16 (0 for FAT32)
    fat_sz_16: u16,
    _sec_per_trk: u16,
    _num_heads: u16,
    /// Number of hidden sectors preceding the partition
    #[get = "pub"]
    hidd_sec: u32,
    #[get = "pub"]
    tot_sec_32: u32,

    // FAT32-specific fields
    /// Sectors per FAT
    #[get = "pub"]
    fat_sz_32: u32,
    _ext_flags: u16,
    _fs_ver: u16,
    /// First cluster of root directory (typically 2)
    #[get = "pub"]
    root_clus: u32,
    /// Sector number of FSINFO structure
    #[get = "pub"]
    fs_info: u16,
    /// Sector number of backup boot sector
    #[get = "pub"]
    bk_boot_sec: u16,
    _reserved: [u8; 12],
    _drv_num: u8,
    _reserved_1: u8,
    /// Extended boot signature (0x29)
    _boot_sig: u8,
    /// Volume serial number
    #[get = "pub"]
    vol_id: u32,
    #[get = "pub"]
    vol_lab: [u8; 11],
    /// Filesystem type label ("FAT32   ")
    #[get = "pub"]
    fil_sys_type: [u8; 8],

    #[br(count = 420)]
    _boot_code: Vec<u8>,
    /// Boot sector signature (0x55 0xAA)
    #[br(big)]
    #[get = "pub"]
    sig: u16,
}

impl BootRecord {
    /// Reads the boot record from sector 0 and checks its signature.
    ///
    /// # Parameters
    /// - `reader`: The disk image
    /// - `validate`: Whether to also run the structural FAT32 checks
    ///
    /// # Errors
    /// - `FATError::NotFatVolume` if the trailing signature is not 0x55AA
    /// - `FATError::TruncatedRead` if the image is shorter than one sector
    /// - Various validation variants if `validate` is true and a check fails
    pub fn from<R: io::Read + io::Seek>(
        reader: &mut SectorReader<R>,
        validate: bool,
    ) -> Result<BootRecord, FATError> {
        let buf = reader.read(0, 1)?;
        let boot_record: BootRecord = io::Cursor::new(buf).read_le()?;

        if boot_record.sig != BOOT_SIGNATURE {
            return Err(FATError::NotFatVolume(boot_record.sig));
        }

        if validate {
            boot_record.validate()
        } else {
            Ok(boot_record)
        }
    }

    pub fn media_type(&self) -> MediaType {
        MediaType::from_byte(self.media)
    }

    /// Volume label with its space padding removed.
    pub fn volume_label(&self) -> String {
        String::from_utf8_lossy(&self.vol_lab).trim_end().to_string()
    }

    /// Filesystem type tag with its space padding removed.
    pub fn file_system_type(&self) -> String {
        String::from_utf8_lossy(&self.fil_sys_type)
            .trim_end()
            .to_string()
    }

    /// Returns the starting sector of the first FAT.
    pub fn fat_start(&self) -> u64 {
        u64::from(self.rsvd_sec_cnt)
    }

    /// Returns the starting sector of the data region, past the two FAT copies.
    pub fn data_start(&self) -> u64 {
        self.fat_start() + FAT_COPIES * u64::from(self.fat_sz_32)
    }

    /// Converts a cluster number to the sector holding its first bytes.
    ///
    /// Cluster numbering starts at 2; the reserved clusters 0 and 1 map to the start of the data region.
    pub fn clus_to_sector(&self, cluster: u32) -> u64 {
        self.data_start() + u64::from(cluster.saturating_sub(2)) * u64::from(self.sec_per_clus)
    }

    /// Validates the boot record according to the FAT32 specification requirements.
    ///
    /// # Errors
    /// - `FATError::InvalidJmp`: If the jump instruction is invalid
    /// - `FATError::InvalidBytesPerSec`: If bytes per sector is not a valid value
    /// - `FATError::InvalidSecPerClus`: If sectors per cluster is not a valid value
    /// - `FATError::InvalidClusSz`: If cluster size exceeds 32 KiB
    /// - `FATError::InvalidRsvdSecCnt`: If reserved sector count is 0
    /// - `FATError::InvalidNumFat`: If number of FATs is 0
    /// - `FATError::InvalidRootEntCnt`: If root directory entries is not 0
    /// - `FATError::InvalidTotSec`: If total sector fields are invalid for FAT32
    /// - `FATError::InvalidFatSz`: If FAT size fields are invalid for FAT32
    /// - `FATError::InvalidRootClus`: If root directory cluster is less than 2
    fn validate(self) -> Result<Self, FATError> {
        if !((self.jmp[0] == 0xEB && self.jmp[2] == 0x90) || self.jmp[0] == 0xE9) {
            return Err(FATError::InvalidJmp(format!(
                "0x{:02X}{:02X}{:02X}",
                self.jmp[0], self.jmp[1], self.jmp[2],
            )));
        }

        const VALID_BYTES_PER_SEC: [u16; 4] = [512, 1024, 2048, 4096];
        if !VALID_BYTES_PER_SEC.contains(&self.bytes_per_sec) {
            return Err(FATError::InvalidBytesPerSec(self.bytes_per_sec));
        }

        const VALID_SEC_PER_CLUS: [u8; 8] = [1, 2, 4, 8, 16, 32, 64, 128];
        if !VALID_SEC_PER_CLUS.contains(&self.sec_per_clus) {
            return Err(FATError::InvalidSecPerClus(self.sec_per_clus));
        }

        if self.bytes_per_sec as u32 * self.sec_per_clus as u32 > 32 * 1024 {
            return Err(FATError::InvalidClusSz(
                self.bytes_per_sec as u32 * self.sec_per_clus as u32,
            ));
        }

        if self.rsvd_sec_cnt == 0 {
            return Err(FATError::InvalidRsvdSecCnt(self.rsvd_sec_cnt));
        }

        if self.num_fat == 0 {
            return Err(FATError::InvalidNumFat(self.num_fat));
        }

        if self.root_ent_cnt != 0 {
            return Err(FATError::InvalidRootEntCnt(self.root_ent_cnt));
        }

        if self.tot_sec_16 != 0 {
            return Err(FATError::InvalidTotSec(String::from(
                "BPB_TotSec16 should be 0 for a FAT32 volume.",
            )));
        }
        if self.tot_sec_32 == 0 {
            return Err(FATError::InvalidTotSec(String::from(
                "BPB_TotSec32 should be greater than 0 for a FAT32 volume.",
            )));
        }

        if self.fat_sz_16 != 0 {
            return Err(FATError::InvalidFatSz(String::from(
                "BPB_FATSz16 should be 0 for a FAT32 volume.",
            )));
        }
        if self.fat_sz_32 == 0 {
            return Err(FATError::InvalidFatSz(String::from(
                "BPB_FATSz32 should be greater than 0 for a FAT32 volume.",
            )));
        }

        if self.root_clus < 2 {
            return Err(FATError::InvalidRootClus(self.root_clus));
        }

        Ok(self)
    }
}

/// Implements the Display trait for BootRecord
impl fmt::Display for BootRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        macro_rules! field {
            ($name:expr, $offset:expr, $val:expr) => {{
                writeln!(f, "  {:<26} 0x{:>04X}: {}", $name, $offset, $val)?;
            }};
        }

        writeln!(f, "Boot Record:")?;

        field!("Bytes Per Sector", 0x0B, self.bytes_per_sec);
        field!("Sector Per Cluster", 0x0D, self.sec_per_clus);
        field!("Reserved Sector Count", 0x0E, self.rsvd_sec_cnt);
        field!("Number Of FATs", 0x10, self.num_fat);
        field!(
            "Media Type",
            0x15,
            format!("0x{:X} ({})", self.media, self.media_type())
        );
        field!("Hidden Sector", 0x1C, self.hidd_sec);
        field!("Total Sector", 0x20, self.tot_sec_32);
        field!("FAT Size", 0x24, self.fat_sz_32);
        field!("Root Dir Cluster", 0x2C, self.root_clus);
        field!("File System Info", 0x30, self.fs_info);
        field!("Boot Record Backup Sec", 0x32, self.bk_boot_sec);
        field!("Volume ID", 0x43, format!("0x{:X}", self.vol_id));
        field!("Volume Label", 0x47, self.volume_label());
        field!("File System Type", 0x52, self.file_system_type());
        field!("Signature", 0x1FE, format!("0x{:04X}", self.sig));

        Ok(())
    }
}

/// Implements the LayoutDisplay trait for BootRecord
impl LayoutDisplay for BootRecord {
    fn display_layout(&self, indent: u8) -> Result<String, fmt::Error> {
        let mut out = String::from("");
        let indent = " ".repeat(indent.into());
        let fat_sz = u64::from(self.fat_sz_32);
        let data_end = u64::from(self.tot_sec_32).max(self.data_start());

        writeln!(out, "{}┌{:─^55}┐", indent, " FAT32 Volume Layout ")?;
        writeln!(
            out,
            "{}├{:^12}┬{:^12}┬{:^12}┬{:^16}┤",
            indent, "Region", "Start", "End", "Description"
        )?;
        writeln!(
            out,
            "{}├{:─<12}┼{:─<12}┼{:─<12}┼{:─<16}┤",
            indent, "", "", "", ""
        )?;
        writeln!(
            out,
            "{}│{:<12}│{:<12}│{:<12}│{:<16}│",
            indent,
            "Reserved",
            0,
            self.fat_start(),
            "Boot + Reserved"
        )?;
        for i in 0..FAT_COPIES {
            let fat_i_start = self.fat_start() + i * fat_sz;
            writeln!(
                out,
                "{}│{:<12}│{:<12}│{:<12}│{:<16}│",
                indent,
                format!("FAT #{}", i + 1),
                fat_i_start,
                fat_i_start + fat_sz,
                "FAT Tables"
            )?;
        }
        writeln!(
            out,
            "{}│{:<12}│{:<12}│{:<12}│{:<16}│",
            indent,
            "Data",
            self.data_start(),
            data_end,
            "Cluster Data"
        )?;
        writeln!(
            out,
            "{}└{:─<12}┴{:─<12}┴{:─<12}┴{:─<16}┘",
            indent, "", "", "", ""
        )?;

        Ok(out)
    }
}
