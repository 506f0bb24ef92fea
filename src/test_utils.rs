//! Synthetic FAT32 images for unit tests.

use std::io::{self, Cursor, Read, Seek, SeekFrom};

use crate::constants::{FAT_COPIES, SECTOR_SIZE, ZIP_WINDOW_SECTORS};
use crate::disk::SectorReader;

/// Builds a minimal, well-formed FAT32 image in memory.
///
/// Defaults: 1 sector per cluster, 32 reserved sectors, 4 sectors per FAT,
/// next free cluster 3 and a free cluster count of 10.
pub(crate) struct ImageBuilder {
    sec_per_clus: u8,
    rsvd_sec_cnt: u16,
    fat_sz: u32,
    next_free: u32,
    free_count: u32,
    len: Option<usize>,
    patches: Vec<(u64, usize, Vec<u8>)>,
}

impl Default for ImageBuilder {
    fn default() -> Self {
        Self {
            sec_per_clus: 1,
            rsvd_sec_cnt: 32,
            fat_sz: 4,
            next_free: 3,
            free_count: 10,
            len: None,
            patches: Vec::new(),
        }
    }
}

impl ImageBuilder {
    pub fn sectors_per_cluster(mut self, sec_per_clus: u8) -> Self {
        self.sec_per_clus = sec_per_clus;
        self
    }

    pub fn free_clusters(mut self, next_free: u32, free_count: u32) -> Self {
        self.next_free = next_free;
        self.free_count = free_count;
        self
    }

    /// Cuts the image to `len` bytes.
    pub fn truncate(mut self, len: usize) -> Self {
        self.len = Some(len);
        self
    }

    /// Overwrites bytes at `offset` within `sector`.
    pub fn patch(&mut self, sector: u64, offset: usize, bytes: &[u8]) {
        self.patches.push((sector, offset, bytes.to_vec()));
    }

    /// Writes `bytes` at the start of `cluster`.
    pub fn put_cluster(&mut self, cluster: u32, bytes: &[u8]) {
        let sector = self.cluster_sector(cluster);
        self.patch(sector, 0, bytes);
    }

    pub fn data_start(&self) -> u64 {
        u64::from(self.rsvd_sec_cnt) + FAT_COPIES * u64::from(self.fat_sz)
    }

    pub fn cluster_sector(&self, cluster: u32) -> u64 {
        self.data_start() + u64::from(cluster - 2) * u64::from(self.sec_per_clus)
    }

    fn total_sectors(&self) -> u64 {
        let last = u64::from(self.free_count);
        self.data_start() + (last + u64::from(ZIP_WINDOW_SECTORS)) * u64::from(self.sec_per_clus)
    }

    pub fn build(&self) -> Vec<u8> {
        let total = self.total_sectors();
        let mut img = vec![0u8; total as usize * SECTOR_SIZE];

        // Boot record
        img[0..3].copy_from_slice(&[0xEB, 0x58, 0x90]);
        img[3..11].copy_from_slice(b"MSWIN4.1");
        img[11..13].copy_from_slice(&512u16.to_le_bytes());
        img[13] = self.sec_per_clus;
        img[14..16].copy_from_slice(&self.rsvd_sec_cnt.to_le_bytes());
        img[16] = 2;
        img[21] = 0xF8;
        img[32..36].copy_from_slice(&(total as u32).to_le_bytes());
        img[36..40].copy_from_slice(&self.fat_sz.to_le_bytes());
        img[44..48].copy_from_slice(&2u32.to_le_bytes());
        img[48..50].copy_from_slice(&1u16.to_le_bytes());
        img[50..52].copy_from_slice(&6u16.to_le_bytes());
        img[64] = 0x80;
        img[66] = 0x29;
        img[67..71].copy_from_slice(&0x1234_ABCDu32.to_le_bytes());
        img[71..82].copy_from_slice(b"NO NAME    ");
        img[82..90].copy_from_slice(b"FAT32   ");
        img[510..512].copy_from_slice(&[0x55, 0xAA]);

        // FS Information sector
        let fs_info = SECTOR_SIZE;
        img[fs_info..fs_info + 4].copy_from_slice(b"RRaA");
        img[fs_info + 484..fs_info + 488].copy_from_slice(b"rrAa");
        img[fs_info + 488..fs_info + 492].copy_from_slice(&self.free_count.to_le_bytes());
        img[fs_info + 492..fs_info + 496].copy_from_slice(&self.next_free.to_le_bytes());
        img[fs_info + 508..fs_info + 512].copy_from_slice(&[0x00, 0x00, 0x55, 0xAA]);

        // Reserved entries of both FATs
        for i in 0..FAT_COPIES {
            let fat = (u64::from(self.rsvd_sec_cnt) + i * u64::from(self.fat_sz)) as usize
                * SECTOR_SIZE;
            img[fat..fat + 8].copy_from_slice(&[0xF8, 0xFF, 0xFF, 0x0F, 0xFF, 0xFF, 0xFF, 0x0F]);
        }

        for (sector, offset, bytes) in &self.patches {
            let start = *sector as usize * SECTOR_SIZE + offset;
            img[start..start + bytes.len()].copy_from_slice(bytes);
        }

        if let Some(len) = self.len {
            img.truncate(len);
        }

        img
    }

    pub fn reader(&self) -> SectorReader<Cursor<Vec<u8>>> {
        SectorReader::new(Cursor::new(self.build())).unwrap()
    }

    /// A reader whose reads fail with an I/O error when they touch one of `bad_sectors`.
    pub fn failing_reader(&self, bad_sectors: &[u64]) -> SectorReader<FailingSectors> {
        SectorReader::new(FailingSectors {
            inner: Cursor::new(self.build()),
            bad_sectors: bad_sectors.to_vec(),
        })
        .unwrap()
    }
}

/// In-memory image with unreadable sectors.
pub(crate) struct FailingSectors {
    inner: Cursor<Vec<u8>>,
    bad_sectors: Vec<u64>,
}

impl Read for FailingSectors {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let start = self.inner.position();
        let end = start + buf.len() as u64;
        let sector_size = SECTOR_SIZE as u64;
        if self
            .bad_sectors
            .iter()
            .any(|bad| start < (bad + 1) * sector_size && bad * sector_size < end)
        {
            return Err(io::Error::other("EIO"));
        }
        self.inner.read(buf)
    }
}

impl Seek for FailingSectors {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

/// A ZIP local file header for `name` with the given version and general-purpose flag fields.
pub(crate) fn zip_local_header(version: u16, flags: u16, name: &[u8]) -> Vec<u8> {
    let mut header = vec![0x50, 0x4B, 0x03, 0x04];
    header.extend_from_slice(&version.to_le_bytes());
    header.extend_from_slice(&flags.to_le_bytes());
    header.extend_from_slice(&[0u8; 18]);
    header.extend_from_slice(&(name.len() as u16).to_le_bytes());
    header.extend_from_slice(&0u16.to_le_bytes());
    header.extend_from_slice(name);
    header
}
