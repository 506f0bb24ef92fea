/// The size of a sector in bytes, used for all image addressing.
pub const SECTOR_SIZE: usize = 512;

/// Number of leading bytes of a cluster handed to the signature matcher.
pub const SIGNATURE_WINDOW: usize = 16;

/// Number of sectors read when inspecting a ZIP local file header.
pub const ZIP_WINDOW_SECTORS: u32 = 20;

/// Sector holding the FS Information structure.
pub const FS_INFO_SECTOR: u64 = 1;

/// Number of FAT copies skipped before the data region when locating free clusters.
pub const FAT_COPIES: u64 = 2;
