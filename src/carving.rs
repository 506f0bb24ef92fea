//! Signature-based carving of unallocated clusters.

pub mod carver;
pub mod signature;
pub mod zip;

pub use carver::{CarveHit, ClusterCarver, ScanCursor};
pub use signature::{FileLabel, OfficeKind, SignatureMatcher};
pub use zip::ZipInspector;
