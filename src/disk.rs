//! Raw disk image access.

pub mod sector_reader;

pub use sector_reader::SectorReader;
