//!
//! FAT Carver: a library and CLI for carving candidate files out of the unallocated
//! clusters of a FAT32 volume image.
//!
//! This crate provides tools for:
//! - Parsing and checking the boot record, the FS Information sector and the FAT header
//! - Classifying cluster contents against a built-in table of file signatures
//! - Refining ZIP hits with their first entry name or their Office document type
//! - Streaming the results to a reporting sink
//!
//! The image is only ever read. Nothing is written back to it.
//!
//! # Re-exports
//! - [`FATVol`]: FAT32 volume session
//! - [`SectorReader`]: sector-addressed image access
//! - [`recover`]: the end-to-end recovery run

pub mod carving;
pub mod constants;
pub mod disk;
pub mod filesystem;
pub mod options;
pub mod recovery;
pub mod report;
pub mod traits;
pub mod utils;

#[cfg(test)]
mod test_utils;

/// Sector-addressed image access (see [`disk::sector_reader::SectorReader`]).
pub use crate::disk::SectorReader;
/// FAT32 volume session (see [`filesystem::fat::FATVol`]).
pub use crate::filesystem::fat::FATVol;
/// Error type of every fallible operation (see [`filesystem::fat_error::FATError`]).
pub use crate::filesystem::fat_error::FATError;
/// End-to-end recovery run (see [`recovery::recover`]).
pub use crate::recovery::{RecoverySummary, recover};
