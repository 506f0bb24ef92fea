//! Inspection of ZIP local file headers found at the head of a cluster.
//!
//! A plain ZIP hit is refined with the name of its first entry. An Office ZIP hit is
//! narrowed down to DOCX, PPTX or XLSX by looking for the part paths each format uses.

use log::debug;
use std::io;

use super::signature::{FileLabel, OfficeKind};
use crate::constants::ZIP_WINDOW_SECTORS;
use crate::disk::SectorReader;
use crate::filesystem::fat_error::FATError;
use crate::options::NameEncoding;
use crate::utils::{contains_bytes, u16_at};

/// Offset of the file name length in a local file header.
const NAME_LEN_OFFSET: usize = 26;
/// Offset of the file name in a local file header.
const NAME_OFFSET: usize = 30;

/// Part paths identifying each Office flavour, in priority order.
const OFFICE_MARKERS: [(&[u8], OfficeKind); 3] = [
    (b"word/document", OfficeKind::Docx),
    (b"ppt/slides", OfficeKind::Pptx),
    (b"xl/worksheets", OfficeKind::Xlsx),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ZipInspector {
    encoding: NameEncoding,
}

impl ZipInspector {
    pub fn new(encoding: NameEncoding) -> Self {
        Self { encoding }
    }

    /// Reads the window starting at `sector` and labels the ZIP found there.
    ///
    /// The window is 20 sectors long, or shorter if the image ends before.
    ///
    /// # Parameters
    /// - `reader`: The disk image
    /// - `sector`: First sector of the local file header
    /// - `office`: Whether the header carries the Office signature
    ///
    /// # Returns
    /// - `Ok(Some(FileLabel::Zip))` with the entry name for a plain ZIP
    /// - `Ok(Some(FileLabel::Office))` if an Office marker is found
    /// - `Ok(None)` if no Office marker is found, or the header does not fit in the window
    pub fn inspect<R: io::Read + io::Seek>(
        &self,
        reader: &mut SectorReader<R>,
        sector: u64,
        office: bool,
    ) -> Result<Option<FileLabel>, FATError> {
        let window = reader.read_available(sector, ZIP_WINDOW_SECTORS)?;

        if office {
            Ok(Self::office_kind(&window).map(FileLabel::Office))
        } else {
            Ok(self.entry_label(&window))
        }
    }

    fn office_kind(window: &[u8]) -> Option<OfficeKind> {
        OFFICE_MARKERS
            .iter()
            .find(|(marker, _)| contains_bytes(window, marker))
            .map(|(_, kind)| *kind)
    }

    fn entry_label(&self, window: &[u8]) -> Option<FileLabel> {
        if window.len() < NAME_OFFSET {
            return None;
        }

        let name_len = u16_at(window, NAME_LEN_OFFSET) as usize;
        let name_end = (NAME_OFFSET + name_len).min(window.len());
        if name_end < NAME_OFFSET + name_len {
            debug!(
                "ZIP entry name runs past the inspection window, keeping {} bytes",
                name_end - NAME_OFFSET
            );
        }
        let name = self.encoding.decode(&window[NAME_OFFSET..name_end]);

        let extension = extension_of(&name);

        Some(FileLabel::Zip { name, extension })
    }
}

/// Uppercased text after the last dot of the last `/`-separated component.
///
/// Leading dots do not start an extension, and a name ending in `/` has none.
fn extension_of(name: &str) -> String {
    let file = name.rsplit('/').next().unwrap_or(name);
    match file.trim_start_matches('.').rsplit_once('.') {
        Some((_, ext)) => ext.to_uppercase(),
        None => String::new(),
    }
}
