//! Run configuration.

use getset::CopyGetters;
use std::fmt;
use std::str::FromStr;

/// Text encoding used to decode file names embedded in ZIP local headers.
///
/// `LegacyMultibyte` is EUC-KR, common for archives written by Korean locale tools.
/// Legacy names decoded as UTF-8 show up with replacement characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameEncoding {
    #[default]
    Utf8,
    LegacyMultibyte,
}

impl NameEncoding {
    /// Decodes `bytes`, replacing malformed sequences instead of failing.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            NameEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            NameEncoding::LegacyMultibyte => {
                let (name, _, _) = encoding_rs::EUC_KR.decode(bytes);
                name.into_owned()
            }
        }
    }
}

impl FromStr for NameEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(NameEncoding::Utf8),
            "legacy-multibyte" | "euc-kr" => Ok(NameEncoding::LegacyMultibyte),
            other => Err(format!(
                "Unknown encoding `{other}`. Expected `utf-8` or `legacy-multibyte`."
            )),
        }
    }
}

impl fmt::Display for NameEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameEncoding::Utf8 => write!(f, "utf-8"),
            NameEncoding::LegacyMultibyte => write!(f, "legacy-multibyte"),
        }
    }
}

/// Options of a recovery run.
#[derive(Debug, Clone, Copy, Default, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct RunOptions {
    /// Encoding of file names found in ZIP headers
    name_encoding: NameEncoding,
    /// Run the structural FAT32 checks on the boot record
    validate_boot_record: bool,
}

impl RunOptions {
    pub fn new(name_encoding: NameEncoding, validate_boot_record: bool) -> Self {
        Self {
            name_encoding,
            validate_boot_record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_encoding_names() {
        assert_eq!("utf-8".parse::<NameEncoding>(), Ok(NameEncoding::Utf8));
        assert_eq!("UTF8".parse::<NameEncoding>(), Ok(NameEncoding::Utf8));
        assert_eq!(
            "legacy-multibyte".parse::<NameEncoding>(),
            Ok(NameEncoding::LegacyMultibyte)
        );
        assert!("latin-1".parse::<NameEncoding>().is_err());
    }

    #[test]
    fn decodes_legacy_names() {
        // "한글.txt" in EUC-KR
        let bytes = [0xC7, 0xD1, 0xB1, 0xDB, b'.', b't', b'x', b't'];
        assert_eq!(NameEncoding::LegacyMultibyte.decode(&bytes), "한글.txt");
        assert!(NameEncoding::Utf8.decode(&bytes).contains('\u{FFFD}'));
    }

    #[test]
    fn defaults_to_utf8_without_validation() {
        let options = RunOptions::default();
        assert_eq!(options.name_encoding(), NameEncoding::Utf8);
        assert!(!options.validate_boot_record());
    }
}
