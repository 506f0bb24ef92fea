//! Synthetic FAT32 disk images written to temporary files.

#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

pub const SECTOR: usize = 512;

const RSVD_SEC_CNT: u16 = 32;
const FAT_SZ: u32 = 8;

/// A FAT32 image with one sector per cluster and a free run of `next_free..=free_count`.
pub struct TestImage {
    bytes: Vec<u8>,
}

impl TestImage {
    pub fn new(next_free: u32, free_count: u32) -> Self {
        let total = Self::data_start() + u64::from(free_count) + 24;
        let mut bytes = vec![0u8; total as usize * SECTOR];

        bytes[0..3].copy_from_slice(&[0xEB, 0x58, 0x90]);
        bytes[3..11].copy_from_slice(b"mkfs.fat");
        bytes[11..13].copy_from_slice(&512u16.to_le_bytes());
        bytes[13] = 1;
        bytes[14..16].copy_from_slice(&RSVD_SEC_CNT.to_le_bytes());
        bytes[16] = 2;
        bytes[21] = 0xF8;
        bytes[32..36].copy_from_slice(&(total as u32).to_le_bytes());
        bytes[36..40].copy_from_slice(&FAT_SZ.to_le_bytes());
        bytes[44..48].copy_from_slice(&2u32.to_le_bytes());
        bytes[48..50].copy_from_slice(&1u16.to_le_bytes());
        bytes[50..52].copy_from_slice(&6u16.to_le_bytes());
        bytes[66] = 0x29;
        bytes[71..82].copy_from_slice(b"EVIDENCE   ");
        bytes[82..90].copy_from_slice(b"FAT32   ");
        bytes[510..512].copy_from_slice(&[0x55, 0xAA]);

        let fs_info = SECTOR;
        bytes[fs_info..fs_info + 4].copy_from_slice(b"RRaA");
        bytes[fs_info + 484..fs_info + 488].copy_from_slice(b"rrAa");
        bytes[fs_info + 488..fs_info + 492].copy_from_slice(&free_count.to_le_bytes());
        bytes[fs_info + 492..fs_info + 496].copy_from_slice(&next_free.to_le_bytes());
        bytes[fs_info + 508..fs_info + 512].copy_from_slice(&[0x00, 0x00, 0x55, 0xAA]);

        let fat = RSVD_SEC_CNT as usize * SECTOR;
        bytes[fat..fat + 4].copy_from_slice(&0x0FFF_FFF8u32.to_le_bytes());

        Self { bytes }
    }

    pub fn data_start() -> u64 {
        u64::from(RSVD_SEC_CNT) + 2 * u64::from(FAT_SZ)
    }

    pub fn cluster_sector(cluster: u32) -> u64 {
        Self::data_start() + u64::from(cluster - 2)
    }

    /// Overwrites bytes at `offset` within `sector`.
    pub fn patch(&mut self, sector: u64, offset: usize, data: &[u8]) -> &mut Self {
        let start = sector as usize * SECTOR + offset;
        self.bytes[start..start + data.len()].copy_from_slice(data);
        self
    }

    pub fn put_cluster(&mut self, cluster: u32, data: &[u8]) -> &mut Self {
        self.patch(Self::cluster_sector(cluster), 0, data)
    }

    pub fn write(&self) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&self.bytes).unwrap();
        file.flush().unwrap();
        file
    }
}

/// A ZIP local file header for `name`.
pub fn zip_local_header(version: u16, flags: u16, name: &[u8]) -> Vec<u8> {
    let mut header = vec![0x50, 0x4B, 0x03, 0x04];
    header.extend_from_slice(&version.to_le_bytes());
    header.extend_from_slice(&flags.to_le_bytes());
    header.extend_from_slice(&[0u8; 18]);
    header.extend_from_slice(&(name.len() as u16).to_le_bytes());
    header.extend_from_slice(&0u16.to_le_bytes());
    header.extend_from_slice(name);
    header
}
