//! Best-effort transcoding to legacy single-byte code pages.
//!
//! The targets only ever contain Western European business text, so a small
//! declarative table per code page covers the accented characters that
//! differ from the code point, plus the euro sign. ASCII passes through,
//! anything unrepresentable becomes a space byte; transcoding never fails.

use serde::{Deserialize, Serialize};

/// Supported legacy single-byte encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegacyEncoding {
    /// Windows code page 1252 (Western European).
    #[serde(rename = "windows-1252")]
    Windows1252,
    /// ISO 8859-1 (Latin-1).
    #[serde(rename = "iso-8859-1")]
    Iso88591,
    /// DOS code page 850 (Latin-1 hardware code page).
    #[serde(rename = "ibm850")]
    Ibm850,
}

impl LegacyEncoding {
    /// Charset label handed to the caller alongside the bytes.
    pub fn charset_label(&self) -> &'static str {
        match self {
            LegacyEncoding::Windows1252 => "windows-1252",
            LegacyEncoding::Iso88591 => "iso-8859-1",
            LegacyEncoding::Ibm850 => "ibm850",
        }
    }

    /// Character-to-byte table for the code points that do not equal their
    /// byte value in this code page.
    fn table(&self) -> &'static [(char, u8)] {
        match self {
            LegacyEncoding::Windows1252 => WINDOWS_1252,
            LegacyEncoding::Iso88591 => ISO_8859_1,
            LegacyEncoding::Ibm850 => IBM_850,
        }
    }
}

/// Windows-1252: Latin-1 layout plus the euro at 0x80.
static WINDOWS_1252: &[(char, u8)] = &[
    ('á', 0xE1), ('é', 0xE9), ('í', 0xED), ('ó', 0xF3), ('ú', 0xFA),
    ('à', 0xE0), ('è', 0xE8), ('ì', 0xEC), ('ò', 0xF2), ('ù', 0xF9),
    ('Á', 0xC1), ('É', 0xC9), ('Í', 0xCD), ('Ó', 0xD3), ('Ú', 0xDA),
    ('À', 0xC0), ('È', 0xC8), ('Ì', 0xCC), ('Ò', 0xD2), ('Ù', 0xD9),
    ('ñ', 0xF1), ('Ñ', 0xD1), ('ü', 0xFC), ('Ü', 0xDC),
    ('ç', 0xE7), ('Ç', 0xC7),
    ('€', 0x80),
];

/// ISO 8859-1: same accented layout, no euro (it falls through to a space).
static ISO_8859_1: &[(char, u8)] = &[
    ('á', 0xE1), ('é', 0xE9), ('í', 0xED), ('ó', 0xF3), ('ú', 0xFA),
    ('à', 0xE0), ('è', 0xE8), ('ì', 0xEC), ('ò', 0xF2), ('ù', 0xF9),
    ('Á', 0xC1), ('É', 0xC9), ('Í', 0xCD), ('Ó', 0xD3), ('Ú', 0xDA),
    ('À', 0xC0), ('È', 0xC8), ('Ì', 0xCC), ('Ò', 0xD2), ('Ù', 0xD9),
    ('ñ', 0xF1), ('Ñ', 0xD1), ('ü', 0xFC), ('Ü', 0xDC),
    ('ç', 0xE7), ('Ç', 0xC7),
];

/// CP850: accented characters sit in the 0x80-0xEB region.
static IBM_850: &[(char, u8)] = &[
    ('á', 0xA0), ('é', 0x82), ('í', 0xA1), ('ó', 0xA2), ('ú', 0xA3),
    ('à', 0x85), ('è', 0x8A), ('ì', 0x8D), ('ò', 0x95), ('ù', 0x97),
    ('Á', 0xB5), ('É', 0x90), ('Í', 0xD6), ('Ó', 0xE0), ('Ú', 0xE9),
    ('À', 0xB7), ('È', 0xD4), ('Ì', 0xDE), ('Ò', 0xE3), ('Ù', 0xEB),
    ('ñ', 0xA4), ('Ñ', 0xA5), ('ü', 0x81), ('Ü', 0x9A),
    ('ç', 0x87), ('Ç', 0x80),
];

/// Transcode text to a legacy encoding, one character at a time:
/// - code points below 128 pass through unchanged,
/// - table entries map to their code page byte,
/// - any other code point below 256 passes through as-is,
/// - anything else becomes a single space byte.
pub fn to_legacy_bytes(text: &str, encoding: LegacyEncoding) -> Vec<u8> {
    let table = encoding.table();
    let mut bytes = Vec::with_capacity(text.len());

    for c in text.chars() {
        let code = c as u32;
        if code < 0x80 {
            bytes.push(code as u8);
        } else if let Some(&(_, byte)) = table.iter().find(|(ch, _)| *ch == c) {
            bytes.push(byte);
        } else if code < 0x100 {
            bytes.push(code as u8);
        } else {
            bytes.push(b' ');
        }
    }

    bytes
}
