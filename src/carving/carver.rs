//! Sequential scan of the free cluster run reported by the FS Information sector.
//!
//! The scan trusts `next_free_cluster..=free_cluster_count` to be a contiguous run of
//! unallocated clusters. FAT entries are never consulted, so a cluster in that range
//! that is actually allocated is classified like any other.

use getset::Getters;
use log::{debug, trace, warn};
use std::io;

use super::signature::{FileLabel, SignatureMatcher};
use super::zip::ZipInspector;
use crate::constants::{SECTOR_SIZE, SIGNATURE_WINDOW};
use crate::disk::SectorReader;
use crate::filesystem::boot_record::BootRecord;
use crate::filesystem::fat_error::FATError;
use crate::filesystem::fs_info::FsInfo;

/// A classified cluster.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CarveHit {
    #[get = "pub"]
    cluster: u32,
    /// First sector of the cluster
    #[get = "pub"]
    sector: u64,
    #[get = "pub"]
    label: FileLabel,
}

impl CarveHit {
    pub fn new(cluster: u32, sector: u64, label: FileLabel) -> Self {
        Self {
            cluster,
            sector,
            label,
        }
    }
}

/// Walks `(cluster, sector)` pairs of the free run in ascending order.
#[derive(Debug, Clone)]
pub struct ScanCursor {
    cluster: u64,
    sector: u64,
    last: u64,
    stride: u64,
}

impl ScanCursor {
    /// Starts at the next free cluster and ends after the cluster numbered like the free cluster count.
    ///
    /// # Errors
    /// - `FATError::InvalidNextFreeCluster` if the run is not empty but starts before cluster 2
    pub fn new(boot_record: &BootRecord, fs_info: &FsInfo) -> Result<Self, FATError> {
        let next_free = *fs_info.nxt_free();
        let free_count = *fs_info.free_count();

        let sector = if next_free >= 2 {
            boot_record.clus_to_sector(next_free)
        } else if next_free <= free_count {
            return Err(FATError::InvalidNextFreeCluster(next_free));
        } else {
            boot_record.data_start()
        };

        Ok(Self {
            cluster: u64::from(next_free),
            sector,
            last: u64::from(free_count),
            stride: u64::from(*boot_record.sec_per_clus()),
        })
    }

    /// Number of clusters left to visit.
    pub fn remaining(&self) -> u64 {
        (self.last + 1).saturating_sub(self.cluster)
    }
}

impl Iterator for ScanCursor {
    type Item = (u32, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cluster > self.last {
            return None;
        }

        let item = (self.cluster as u32, self.sector);
        self.cluster += 1;
        self.sector += self.stride;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

/// Yields a `CarveHit` for every cluster of the free run whose head matches a signature.
///
/// A cluster that cannot be read is logged and skipped; the scan goes on with the next one.
/// Dropping the carver between two items aborts the scan; the image is never written.
pub struct ClusterCarver<'a, R: io::Read + io::Seek> {
    reader: &'a mut SectorReader<R>,
    cursor: ScanCursor,
    matcher: SignatureMatcher,
    inspector: ZipInspector,
    visited: u64,
    skipped: u64,
    done: bool,
}

impl<'a, R: io::Read + io::Seek> ClusterCarver<'a, R> {
    pub fn new(
        reader: &'a mut SectorReader<R>,
        cursor: ScanCursor,
        matcher: SignatureMatcher,
        inspector: ZipInspector,
    ) -> Self {
        Self {
            reader,
            cursor,
            matcher,
            inspector,
            visited: 0,
            skipped: 0,
            done: false,
        }
    }

    /// Number of clusters probed so far.
    pub fn visited(&self) -> u64 {
        self.visited
    }

    /// Number of probed clusters that could not be read.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    fn skip(&mut self, cluster: u32, err: FATError) {
        self.skipped += 1;
        match err {
            FATError::TruncatedRead { .. } => warn!("Cluster {cluster} is truncated, skipping it"),
            err => warn!("Cluster {cluster} could not be read, skipping it: {err}"),
        }
    }
}

impl<R: io::Read + io::Seek> Iterator for ClusterCarver<'_, R> {
    type Item = CarveHit;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while let Some((cluster, sector)) = self.cursor.next() {
            if sector.saturating_mul(SECTOR_SIZE as u64) >= self.reader.len() {
                warn!(
                    "Cluster {cluster} starts past the end of the image, {} cluster(s) left unscanned",
                    self.cursor.remaining() + 1
                );
                self.done = true;
                return None;
            }

            self.visited += 1;
            trace!("Probing cluster {cluster} at sector {sector}");

            let head = match self.reader.read(sector, 1) {
                Ok(head) => head,
                Err(err) => {
                    self.skip(cluster, err);
                    continue;
                }
            };

            match self.matcher.classify(
                &head[..SIGNATURE_WINDOW],
                sector,
                self.reader,
                &self.inspector,
            ) {
                Ok(Some(label)) => {
                    debug!("Cluster {cluster} (sector {sector}): {label}");
                    return Some(CarveHit::new(cluster, sector, label));
                }
                Ok(None) => {}
                Err(err) => self.skip(cluster, err),
            }
        }

        self.done = true;
        None
    }
}
