//! Error types for reading a FAT32 image and carving its unallocated clusters.
//!
//! Errors raised while opening the image or parsing its metadata are fatal for a run: the
//! volume geometry cannot be trusted once one of the metadata sectors is rejected. Read
//! errors on a single cluster during the scan only cause that cluster to be skipped.

use std::io;
use thiserror::Error;

/// Errors that can occur while parsing the volume metadata or scanning clusters.
#[derive(Error, Debug)]
pub enum FATError {
    /// The disk image could not be opened, seeked or read.
    #[error("Cannot read disk image: `{0}`")]
    ImageUnreadable(io::Error),

    /// The image ends before the requested sectors.
    #[error("Truncated read: the image ends before {count} sector(s) starting at sector {sector}")]
    TruncatedRead { sector: u64, count: u32 },

    /// The boot sector signature must be 0x55AA.
    #[error("Invalid boot record signature: `0x{0:04X}`. This is not a FAT32 image. Expected signature: 0x55AA")]
    NotFatVolume(u16),

    /// The three FS Information sector signatures must be 0x52526141, 0x72724161 and 0x000055AA.
    #[error(
        "Invalid FS Info signatures: lead `0x{lead:08X}`, struct `0x{structure:08X}`, trail `0x{trail:08X}`"
    )]
    InvalidFsInfo {
        lead: u32,
        structure: u32,
        trail: u32,
    },

    /// Clusters 0 and 1 are reserved, the data area starts at cluster 2.
    #[error("Invalid next free cluster: `{0}`. The scan cannot start before cluster 2.")]
    InvalidNextFreeCluster(u32),

    /// The first three bytes of a FAT volume must contain a valid x86 jump instruction.
    #[error("Invalid jump instruction `{0}`")]
    InvalidJmp(String),

    /// Bytes per sector must be 512, 1024, 2048 or 4096.
    #[error("Invalid count of bytes per sector: `{0}`. Legal values: 512, 1024, 2048 or 4096")]
    InvalidBytesPerSec(u16),

    /// Sectors per cluster must be a power of 2 up to 128.
    #[error(
        "Invalid number of sector per cluster: `{0}`. Legal values: 1, 2, 4, 8, 16, 32, 64, 128"
    )]
    InvalidSecPerClus(u8),

    /// Total cluster size must not exceed 32 KiB.
    #[error("Invalid cluster size: `{0}`. Any value greater than 32K is invalid.")]
    InvalidClusSz(u32),

    #[error("Invalid count of reserved sectors: `{0}`. Any value greater than 0 is valid.")]
    InvalidRsvdSecCnt(u16),

    #[error("Invalid number of FATs on this volume: `{0}`.")]
    InvalidNumFat(u8),

    /// The FAT32 root directory is a regular cluster chain, so this count must be 0.
    #[error(
        "Invalid count of directory entries in the root directory: `{0}`. It should be 0 for a FAT32 volume. "
    )]
    InvalidRootEntCnt(u16),

    #[error("Invalid total count of sectors on the volume: `{0}`")]
    InvalidTotSec(String),

    #[error("Invalid FAT size:`{0}`")]
    InvalidFatSz(String),

    #[error(
        "Invalid cluster number of the first cluster of the root directory: `{0}`. This value should be greater than 2."
    )]
    InvalidRootClus(u32),

    /// Parsing error occured during structure initialization
    #[error("BinRead Error: `{0}`")]
    BinReadError(binread::Error),
}

/// Converts standard I/O errors into FATError.
impl From<io::Error> for FATError {
    fn from(err: io::Error) -> Self {
        FATError::ImageUnreadable(err)
    }
}

/// Converts BinRead errors into FATError.
impl From<binread::Error> for FATError {
    fn from(err: binread::Error) -> Self {
        FATError::BinReadError(err)
    }
}
