//! Byte-order-mark detection and per-encoding code unit helpers.
//!
//! Everything the classifier and rewriter know about text encodings lives
//! here: which BOM a file carries, how wide one code unit is, and what CR,
//! LF, and NUL look like at that width.

use std::io::{Read, Seek, SeekFrom};

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 little-endian BOM bytes.
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-16 big-endian BOM bytes.
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
/// UTF-32 little-endian BOM bytes.
pub const UTF32_LE_BOM: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];
/// UTF-32 big-endian BOM bytes.
pub const UTF32_BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];

/// Text encoding as determined by BOM sniffing.
///
/// `None` covers both plain ASCII/UTF-8 without a BOM and anything else we
/// cannot identify; those files are treated as streams of 1-byte units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    None,
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl Encoding {
    /// Length in bytes of the BOM prefix to skip.
    #[inline]
    pub const fn bom_len(self) -> usize {
        match self {
            Encoding::None => 0,
            Encoding::Utf8 => UTF8_BOM.len(),
            Encoding::Utf16Le => UTF16_LE_BOM.len(),
            Encoding::Utf16Be => UTF16_BE_BOM.len(),
            Encoding::Utf32Le => UTF32_LE_BOM.len(),
            Encoding::Utf32Be => UTF32_BE_BOM.len(),
        }
    }

    /// Width in bytes of one code unit for this encoding.
    #[inline]
    pub const fn unit_width(self) -> usize {
        match self {
            Encoding::None | Encoding::Utf8 => 1,
            Encoding::Utf16Le | Encoding::Utf16Be => 2,
            Encoding::Utf32Le | Encoding::Utf32Be => 4,
        }
    }

    /// Detect the encoding from the leading bytes of a buffer.
    ///
    /// The 4-byte UTF-32 signatures are checked before the 2-byte UTF-16
    /// ones: `FF FE 00 00` starts with `FF FE` and would otherwise be
    /// misread as UTF-16 LE.
    pub fn detect(buf: &[u8]) -> Encoding {
        if buf.len() >= UTF32_LE_BOM.len() {
            if buf[..UTF32_BE_BOM.len()] == UTF32_BE_BOM {
                return Encoding::Utf32Be;
            }
            if buf[..UTF32_LE_BOM.len()] == UTF32_LE_BOM {
                return Encoding::Utf32Le;
            }
        }

        if buf.len() >= UTF8_BOM.len() && buf[..UTF8_BOM.len()] == UTF8_BOM {
            return Encoding::Utf8;
        }

        if buf.len() >= UTF16_BE_BOM.len() {
            if buf[..UTF16_BE_BOM.len()] == UTF16_BE_BOM {
                return Encoding::Utf16Be;
            }
            if buf[..UTF16_LE_BOM.len()] == UTF16_LE_BOM {
                return Encoding::Utf16Le;
            }
        }

        Encoding::None
    }

    /// True if `unit` is this encoding's representation of carriage return.
    #[inline]
    pub fn is_cr(self, unit: &[u8]) -> bool {
        self.unit_is(unit, b'\r')
    }

    /// True if `unit` is this encoding's representation of line feed.
    #[inline]
    pub fn is_lf(self, unit: &[u8]) -> bool {
        self.unit_is(unit, b'\n')
    }

    /// True if `unit` suggests non-text content.
    ///
    /// An all-zero unit is the NUL character in every supported encoding and
    /// does not occur in text. Zero padding bytes inside a non-zero UTF-16 or
    /// UTF-32 unit are ordinary and do not trip this check.
    #[inline]
    pub fn looks_binary(self, unit: &[u8]) -> bool {
        unit.iter().all(|b| *b == 0)
    }

    fn unit_is(self, unit: &[u8], ascii: u8) -> bool {
        match self {
            Encoding::None | Encoding::Utf8 => unit == [ascii],
            Encoding::Utf16Le => unit == [ascii, 0x00],
            Encoding::Utf16Be => unit == [0x00, ascii],
            Encoding::Utf32Le => unit == [ascii, 0x00, 0x00, 0x00],
            Encoding::Utf32Be => unit == [0x00, 0x00, 0x00, ascii],
        }
    }
}

/// Detect the encoding of a seekable reader and position it just past the BOM.
///
/// Reads up to 4 probe bytes, matches them against the known signatures, and
/// seeks to the first content byte. With no BOM the reader is rewound to its
/// original position.
pub fn detect_and_skip_bom<R: Read + Seek>(reader: &mut R) -> std::io::Result<Encoding> {
    let start = reader.stream_position()?;
    let mut probe = [0u8; 4];
    let mut filled = 0usize;

    while filled < probe.len() {
        match reader.read(&mut probe[filled..])? {
            0 => break,
            n => filled += n,
        }
    }

    let encoding = Encoding::detect(&probe[..filled]);
    reader.seek(SeekFrom::Start(start + encoding.bom_len() as u64))?;
    Ok(encoding)
}
