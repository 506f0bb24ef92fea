//! Sector-addressed access to a raw disk image.
//!
//! The image is always addressed in 512-byte units, whatever the volume's own
//! bytes-per-sector field says.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::constants::SECTOR_SIZE;
use crate::filesystem::fat_error::FATError;

/// Read-only view of a disk image as a flat sequence of 512-byte sectors.
#[derive(Debug)]
pub struct SectorReader<R: Read + Seek> {
    inner: R,
    len: u64,
}

impl SectorReader<File> {
    /// Opens the disk image at `path` in read-only mode.
    ///
    /// # Errors
    /// - Returns `FATError::ImageUnreadable` if the file cannot be opened or its size queried.
    pub fn open(path: &Path) -> Result<Self, FATError> {
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl<R: Read + Seek> SectorReader<R> {
    /// Wraps any seekable reader, recording its length.
    pub fn new(mut inner: R) -> Result<Self, FATError> {
        let len = inner.seek(SeekFrom::End(0))?;
        Ok(Self { inner, len })
    }

    /// Returns the size of the image in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if the image holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of complete sectors in the image.
    pub fn sector_count(&self) -> u64 {
        self.len / SECTOR_SIZE as u64
    }

    /// Reads exactly `count` sectors starting at `sector`.
    ///
    /// # Returns
    /// - A buffer of `count * 512` bytes.
    ///
    /// # Errors
    /// - `FATError::TruncatedRead` if the image ends before the last requested byte.
    /// - `FATError::ImageUnreadable` for any other I/O failure.
    pub fn read(&mut self, sector: u64, count: u32) -> Result<Vec<u8>, FATError> {
        let truncated = FATError::TruncatedRead { sector, count };
        let size = count as u64 * SECTOR_SIZE as u64;
        let start = match sector.checked_mul(SECTOR_SIZE as u64) {
            Some(start) => start,
            None => return Err(truncated),
        };
        match start.checked_add(size) {
            Some(end) if end <= self.len => {}
            _ => return Err(truncated),
        }

        let mut buf = vec![0; size as usize];
        self.inner.seek(SeekFrom::Start(start))?;
        self.inner.read_exact(&mut buf).map_err(|err| match err.kind() {
            io::ErrorKind::UnexpectedEof => truncated,
            kind => FATError::ImageUnreadable(io::Error::new(
                kind,
                format!("Failed to read sector {sector}: {err}"),
            )),
        })?;

        Ok(buf)
    }

    /// Reads up to `count` sectors starting at `sector`, stopping at the end of the image.
    ///
    /// The returned buffer may be shorter than `count * 512` bytes, or empty if
    /// `sector` lies past the end of the image.
    pub fn read_available(&mut self, sector: u64, count: u32) -> Result<Vec<u8>, FATError> {
        let start = sector.saturating_mul(SECTOR_SIZE as u64);
        if start >= self.len {
            return Ok(Vec::new());
        }
        let size = (count as u64 * SECTOR_SIZE as u64).min(self.len - start);

        let mut buf = vec![0; size as usize];
        self.inner.seek(SeekFrom::Start(start))?;
        self.inner.read_exact(&mut buf)?;

        Ok(buf)
    }
}
