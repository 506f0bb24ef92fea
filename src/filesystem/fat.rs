//! FAT32 volume session.
//!
//! This module ties the metadata parsers to the carver:
//! - Reading the boot record, the FS Information sector and the FAT header, in that order
//! - Computing the free cluster run to scan
//! - Handing out a carver over that run

use std::fs::File;
use std::io;
use std::path::Path;

use log::info;

use super::boot_record::BootRecord;
use super::fat_area::FatHeaderProbe;
use super::fat_error::FATError;
use super::fs_info::FsInfo;
use crate::carving::{ClusterCarver, ScanCursor, SignatureMatcher, ZipInspector};
use crate::disk::SectorReader;
use crate::options::RunOptions;

/// Structure for a FAT32 volume image.
///
/// The parsed metadata is immutable once the volume is opened.
pub struct FATVol<R: io::Read + io::Seek> {
    reader: SectorReader<R>,
    boot_record: BootRecord,
    fs_info: FsInfo,
    fat_header: FatHeaderProbe,
    options: RunOptions,
}

impl FATVol<File> {
    /// Opens the disk image at `path` and parses its metadata.
    pub fn from_file(path: &Path, options: RunOptions) -> Result<Self, FATError> {
        let reader = SectorReader::open(path)?;
        Self::from(reader, options)
    }
}

impl<R: io::Read + io::Seek> FATVol<R> {
    /// Parses the volume metadata.
    ///
    /// # Errors
    /// - `FATError::NotFatVolume` if the boot record signature is missing
    /// - `FATError::InvalidFsInfo` if the FS Information signatures are missing
    /// - `FATError::TruncatedRead` if the image ends inside one of the metadata sectors
    pub fn from(mut reader: SectorReader<R>, options: RunOptions) -> Result<Self, FATError> {
        let boot_record = BootRecord::from(&mut reader, options.validate_boot_record())?;
        let fs_info = FsInfo::from(&mut reader)?;
        let fat_header = FatHeaderProbe::from(&mut reader, &boot_record)?;

        Ok(Self {
            reader,
            boot_record,
            fs_info,
            fat_header,
            options,
        })
    }

    pub fn boot_record(&self) -> &BootRecord {
        &self.boot_record
    }

    pub fn fs_info(&self) -> &FsInfo {
        &self.fs_info
    }

    pub fn fat_header(&self) -> &FatHeaderProbe {
        &self.fat_header
    }

    /// Returns the free cluster run reported by the FS Information sector.
    pub fn scan_cursor(&self) -> Result<ScanCursor, FATError> {
        ScanCursor::new(&self.boot_record, &self.fs_info)
    }

    /// Returns a carver walking `cursor`.
    pub fn carver(&mut self, cursor: ScanCursor) -> ClusterCarver<'_, R> {
        info!(
            "Carving {} cluster(s) starting at cluster {}",
            cursor.remaining(),
            self.fs_info.nxt_free()
        );

        ClusterCarver::new(
            &mut self.reader,
            cursor,
            SignatureMatcher::default(),
            ZipInspector::new(self.options.name_encoding()),
        )
    }

    /// Returns a carver over the whole free cluster run.
    pub fn carve(&mut self) -> Result<ClusterCarver<'_, R>, FATError> {
        let cursor = self.scan_cursor()?;
        Ok(self.carver(cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ImageBuilder;

    #[test]
    fn parses_all_metadata() {
        let image = ImageBuilder::default().free_clusters(4, 9);
        let vol = FATVol::from(image.reader(), RunOptions::default()).unwrap();

        assert_eq!(*vol.boot_record().rsvd_sec_cnt(), 32);
        assert_eq!(*vol.fs_info().nxt_free(), 4);
        assert_eq!(*vol.fat_header().media_type(), 0x0FFF_FFF8);
        assert_eq!(vol.scan_cursor().unwrap().remaining(), 6);
    }

    #[test]
    fn boot_record_is_checked_before_fs_info() {
        let mut image = ImageBuilder::default();
        image.patch(0, 510, &[0, 0]);
        image.patch(1, 0, &[0, 0, 0, 0]);

        assert!(matches!(
            FATVol::from(image.reader(), RunOptions::default()),
            Err(FATError::NotFatVolume(_))
        ));
    }

    #[test]
    fn image_shorter_than_fat_header_is_fatal() {
        let image = ImageBuilder::default().truncate(2 * 512);

        assert!(matches!(
            FATVol::from(image.reader(), RunOptions::default()),
            Err(FATError::TruncatedRead { sector: 32, count: 1 })
        ));
    }

    #[test]
    fn carve_walks_the_free_run() {
        let mut image = ImageBuilder::default();
        image.put_cluster(3, b"GIF87a");
        image.put_cluster(10, b"7z\xBC\xAF\x27\x1C");
        let mut vol = FATVol::from(image.reader(), RunOptions::default()).unwrap();

        let mut carver = vol.carve().unwrap();
        let hits: Vec<_> = carver.by_ref().collect();
        assert_eq!(carver.visited(), 8);

        let labels: Vec<String> = hits.iter().map(|hit| hit.label().to_string()).collect();
        assert_eq!(labels, vec!["GIF", "7Z"]);
    }
}
