//! Built-in file signature registry and the longest-prefix-first matcher.
//!
//! Every entry is a big-endian packed prefix of 2, 3, 4, 6 or 8 bytes. Lookups try the
//! 8-byte key first and fall back to shorter ones, so a specific signature such as the
//! Office ZIP header wins over the generic 4-byte ZIP prefix it starts with.

use std::fmt;
use std::io;

use super::zip::ZipInspector;
use crate::disk::SectorReader;
use crate::filesystem::fat_error::FATError;
use crate::utils::be_key;

/// Prefix lengths probed by the matcher, most specific first.
pub const KEY_LENGTHS: [usize; 5] = [8, 6, 4, 3, 2];

/// What a signature entry resolves to once it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureKind {
    /// Reported as-is.
    Format(&'static str),
    /// Plain ZIP local file header: the inner file name is reported.
    Zip,
    /// ZIP header written by Office: DOCX, PPTX or XLSX.
    OfficeZip,
    /// RIFF container: AVI or WAV depending on the form type.
    Riff,
}

/// One entry of the signature registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureEntry {
    /// Prefix length in bytes
    pub len: usize,
    /// Big-endian packed prefix
    pub value: u64,
    pub kind: SignatureKind,
}

const fn sig(len: usize, value: u64, label: &'static str) -> SignatureEntry {
    SignatureEntry {
        len,
        value,
        kind: SignatureKind::Format(label),
    }
}

const fn container(len: usize, value: u64, kind: SignatureKind) -> SignatureEntry {
    SignatureEntry { len, value, kind }
}

/// The built-in signature catalog.
pub static SIGNATURES: [SignatureEntry; 34] = [
    sig(2, 0x424D, "BMP"),
    sig(3, 0x49492A, "TIF, TIFF"),
    sig(3, 0x4D4D2A, "TIF, TIFF"),
    sig(3, 0x1F8B08, "GZ"),
    sig(3, 0x1F9D90, "TAR.Z"),
    sig(3, 0x425A68, "BZ2, TAR, TBZ2, TB2"),
    sig(3, 0x435753, "SWF"),
    sig(3, 0x464C56, "SWF"),
    sig(3, 0x465753, "SWF"),
    sig(3, 0x494433, "MP3"),
    sig(4, 0x0000_0100, "ICO"),
    sig(4, 0x0000_0200, "CUR"),
    sig(4, 0xFFD8_FFE0, "JPG"),
    sig(4, 0xFFD8_FFE1, "JPG"),
    sig(4, 0xFFD8_FFE8, "JPG"),
    sig(4, 0xD7CD_C69A, "WMF"),
    sig(4, 0x0100_0000, "EMF"),
    // MPEG program stream pack header and video sequence header
    sig(4, 0x0000_01BA, "MPG"),
    sig(4, 0x0000_01B3, "MPG"),
    sig(4, 0x0001_0008, "IMG"),
    sig(4, 0x2550_4446, "PDF"),
    sig(4, 0x414C_5A01, "ALZ"),
    container(4, 0x504B_0304, SignatureKind::Zip),
    container(4, 0x5249_4646, SignatureKind::Riff),
    sig(6, 0x4749_4638_3761, "GIF"),
    sig(6, 0x4749_4638_3961, "GIF"),
    sig(6, 0x377A_BCAF_271C, "7Z"),
    sig(6, 0x4A41_5243_5300, "JAR"),
    sig(8, 0x8950_4E47_0D0A_1A0A, "PNG"),
    sig(8, 0x2521_5053_2D41_646F, "EPS"),
    sig(8, 0x0000_0018_6674_7970, "MP4"),
    container(8, 0x504B_0304_1400_0600, SignatureKind::OfficeZip),
    sig(8, 0x504B_0304_1400_0800, "JAR"),
    sig(8, 0xD0CF_11E0_A1B1_1AE1, "HWP"),
];

/// Office Open XML document flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfficeKind {
    Docx,
    Pptx,
    Xlsx,
}

impl fmt::Display for OfficeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OfficeKind::Docx => "DOCX",
            OfficeKind::Pptx => "PPTX",
            OfficeKind::Xlsx => "XLSX",
        };
        write!(f, "{s}")
    }
}

/// File type assigned to a carved cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLabel {
    Format(&'static str),
    /// ZIP archive, labelled with the first entry's name and uppercased extension
    Zip { name: String, extension: String },
    Office(OfficeKind),
}

impl fmt::Display for FileLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileLabel::Format(label) => write!(f, "{label}"),
            FileLabel::Zip { name, extension } => write!(f, "ZIP <{name}> <{extension}>"),
            FileLabel::Office(kind) => write!(f, "{kind}"),
        }
    }
}

/// Classifies the head of a cluster against a signature table.
#[derive(Debug, Clone, Copy)]
pub struct SignatureMatcher {
    table: &'static [SignatureEntry],
}

impl Default for SignatureMatcher {
    fn default() -> Self {
        Self::new(&SIGNATURES)
    }
}

impl SignatureMatcher {
    pub fn new(table: &'static [SignatureEntry]) -> Self {
        Self { table }
    }

    /// Finds the most specific table entry matching `prefix`.
    ///
    /// Keys are built from the first 8, 6, 4, 3 and 2 bytes and probed in that order.
    /// Key lengths longer than `prefix` are skipped.
    pub fn lookup(&self, prefix: &[u8]) -> Option<&'static SignatureEntry> {
        let table = self.table;
        KEY_LENGTHS.iter().find_map(|&len| {
            let key = be_key(prefix, len)?;
            table
                .iter()
                .find(|entry| entry.len == len && entry.value == key)
        })
    }

    /// Classifies the signature window of the cluster starting at `sector`.
    ///
    /// ZIP entries are handed to `inspector`, which reads further sectors from `reader`.
    ///
    /// # Returns
    /// - `Ok(Some(label))` for a positive match
    /// - `Ok(None)` if nothing matches, which is a normal outcome
    pub fn classify<R: io::Read + io::Seek>(
        &self,
        prefix: &[u8],
        sector: u64,
        reader: &mut SectorReader<R>,
        inspector: &ZipInspector,
    ) -> Result<Option<FileLabel>, FATError> {
        let entry = match self.lookup(prefix) {
            Some(entry) => entry,
            None => return Ok(None),
        };

        match entry.kind {
            SignatureKind::Format(label) => Ok(Some(FileLabel::Format(label))),
            SignatureKind::Zip => inspector.inspect(reader, sector, false),
            SignatureKind::OfficeZip => inspector.inspect(reader, sector, true),
            SignatureKind::Riff => Ok(Some(riff_label(prefix))),
        }
    }
}

/// Resolves a RIFF container from its form type at bytes 8..12.
///
/// Unknown form types keep the WAV label.
fn riff_label(prefix: &[u8]) -> FileLabel {
    match prefix.get(8..12) {
        Some(b"AVI ") => FileLabel::Format("AVI"),
        _ => FileLabel::Format("WAV"),
    }
}
