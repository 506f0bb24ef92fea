//! FAT32 on-disk metadata: boot record, FS Information sector and FAT header.

pub mod boot_record;
pub mod fat;
pub mod fat_area;
pub mod fat_error;
pub mod fs_info;
