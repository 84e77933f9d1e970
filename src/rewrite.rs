//! Single-pass CRLF→LF rewrite.
//!
//! The whole file is buffered in memory before any output handle is opened,
//! and the result lands in a sibling temp file that atomically replaces the
//! original. An interrupted run therefore never leaves a half-written file
//! behind.

use crate::encoding::Encoding;
use crate::error::{EolError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// What a successful rewrite did.
#[derive(Debug, Clone, Copy)]
pub struct RewriteOutcome {
    /// Number of CRLF pairs collapsed to LF.
    pub pairs_collapsed: usize,
    /// Total bytes written to the replacement file.
    pub bytes_written: usize,
}

/// Rewrite a file in place, dropping every CR code unit that immediately
/// precedes an LF code unit.
///
/// The BOM, lone CR or LF units, and all other bytes (including any ragged
/// trailing bytes) are preserved verbatim, so
/// `output_len == input_len - unit_width * pairs_collapsed`.
pub fn rewrite(path: &Path) -> Result<RewriteOutcome> {
    let content = fs::read(path).map_err(|e| EolError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    let (output, pairs_collapsed) = convert(&content);

    let outcome = RewriteOutcome {
        pairs_collapsed,
        bytes_written: output.len(),
    };

    if pairs_collapsed == 0 {
        // Nothing to collapse; leave the file untouched
        return Ok(outcome);
    }

    replace_file(path, &output)?;
    debug!(
        path = %path.display(),
        pairs = pairs_collapsed,
        bytes = output.len(),
        "Rewrote line endings"
    );
    Ok(outcome)
}

/// Pure transform over an in-memory byte buffer.
///
/// Returns the converted bytes and the number of CRLF pairs collapsed.
pub fn convert(content: &[u8]) -> (Vec<u8>, usize) {
    let encoding = Encoding::detect(content);
    let width = encoding.unit_width();

    let mut output = Vec::with_capacity(content.len());
    let mut last_write_index = 0usize;
    let mut last_unit_was_cr = false;
    let mut pairs_collapsed = 0usize;

    let mut offset = encoding.bom_len();
    while offset + width <= content.len() {
        let window = &content[offset..offset + width];

        if encoding.is_cr(window) {
            // Held back: dropped only if the next unit turns out to be LF
            last_unit_was_cr = true;
        } else {
            if last_unit_was_cr && encoding.is_lf(window) {
                output.extend_from_slice(&content[last_write_index..offset - width]);
                last_write_index = offset;
                pairs_collapsed += 1;
            }
            last_unit_was_cr = false;
        }

        offset += width;
    }

    // Tail flush: pending bytes, a trailing lone CR, and any ragged bytes
    output.extend_from_slice(&content[last_write_index..]);

    (output, pairs_collapsed)
}

fn replace_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| EolError::Write {
        path: path.display().to_string(),
        source: e,
    })?;

    temp.write_all(bytes).map_err(|e| EolError::Write {
        path: path.display().to_string(),
        source: e,
    })?;

    // Keep the original file's permissions on the replacement
    if let Ok(metadata) = fs::metadata(path) {
        let _ = fs::set_permissions(temp.path(), metadata.permissions());
    }

    temp.persist(path).map_err(|e| EolError::Write {
        path: path.display().to_string(),
        source: e.error,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rewrite_bytes(input: &[u8]) -> (Vec<u8>, RewriteOutcome) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file");
        fs::write(&path, input).unwrap();
        let outcome = rewrite(&path).unwrap();
        (fs::read(&path).unwrap(), outcome)
    }

    #[test]
    fn test_rewrite_simple_crlf() {
        let (out, outcome) = rewrite_bytes(b"a\r\nb");
        assert_eq!(out, b"a\nb");
        assert_eq!(outcome.pairs_collapsed, 1);
        assert_eq!(outcome.bytes_written, 3);
    }

    #[test]
    fn test_rewrite_preserves_lone_cr() {
        let (out, outcome) = rewrite_bytes(b"a\rb");
        assert_eq!(out, b"a\rb");
        assert_eq!(outcome.pairs_collapsed, 0);
    }

    #[test]
    fn test_rewrite_is_noop_on_unix_content() {
        let (out, outcome) = rewrite_bytes(b"a\nb\nc\n");
        assert_eq!(out, b"a\nb\nc\n");
        assert_eq!(outcome.pairs_collapsed, 0);
    }

    #[test]
    fn test_rewrite_multiple_pairs() {
        let (out, outcome) = rewrite_bytes(b"one\r\ntwo\r\nthree\r\n");
        assert_eq!(out, b"one\ntwo\nthree\n");
        assert_eq!(outcome.pairs_collapsed, 3);
    }

    #[test]
    fn test_rewrite_trailing_bytes_after_last_terminator() {
        let (out, _) = rewrite_bytes(b"a\r\nno newline at end");
        assert_eq!(out, b"a\nno newline at end");
    }

    #[test]
    fn test_rewrite_trailing_cr_kept() {
        let (out, outcome) = rewrite_bytes(b"a\r\nb\r");
        assert_eq!(out, b"a\nb\r");
        assert_eq!(outcome.pairs_collapsed, 1);
    }

    #[test]
    fn test_rewrite_keeps_utf8_bom() {
        let mut input = vec![0xEF, 0xBB, 0xBF];
        input.extend_from_slice(b"x\r\ny");
        let (out, outcome) = rewrite_bytes(&input);
        let mut expected = vec![0xEF, 0xBB, 0xBF];
        expected.extend_from_slice(b"x\ny");
        assert_eq!(out, expected);
        assert_eq!(outcome.pairs_collapsed, 1);
    }

    #[test]
    fn test_rewrite_utf16le_drops_cr_unit() {
        // BOM + "a\r\nb" in UTF-16 LE
        let input = [
            0xFF, 0xFE, b'a', 0x00, 0x0D, 0x00, 0x0A, 0x00, b'b', 0x00,
        ];
        let (out, outcome) = rewrite_bytes(&input);
        let expected = [0xFF, 0xFE, b'a', 0x00, 0x0A, 0x00, b'b', 0x00];
        assert_eq!(out, expected);
        assert_eq!(outcome.pairs_collapsed, 1);
        // Byte-length law at 2-byte units
        assert_eq!(out.len(), input.len() - 2);
    }

    #[test]
    fn test_rewrite_utf16be() {
        let input = [
            0xFE, 0xFF, 0x00, b'a', 0x00, 0x0D, 0x00, 0x0A, 0x00, b'b',
        ];
        let (out, _) = rewrite_bytes(&input);
        assert_eq!(out, [0xFE, 0xFF, 0x00, b'a', 0x00, 0x0A, 0x00, b'b']);
    }

    #[test]
    fn test_rewrite_utf32le() {
        let mut input = vec![0xFF, 0xFE, 0x00, 0x00];
        for ch in [b'a', b'\r', b'\n', b'b'] {
            input.extend_from_slice(&[ch, 0x00, 0x00, 0x00]);
        }
        let (out, outcome) = rewrite_bytes(&input);
        let mut expected = vec![0xFF, 0xFE, 0x00, 0x00];
        for ch in [b'a', b'\n', b'b'] {
            expected.extend_from_slice(&[ch, 0x00, 0x00, 0x00]);
        }
        assert_eq!(out, expected);
        assert_eq!(outcome.pairs_collapsed, 1);
        assert_eq!(out.len(), input.len() - 4);
    }

    #[test]
    fn test_rewrite_does_not_pair_across_wrong_width() {
        // A 1-byte CRLF inside UTF-16 content is one 0x0D 0x0A unit, not a pair
        let input = [0xFF, 0xFE, 0x0D, 0x0A, b'a', 0x00];
        let (out, outcome) = rewrite_bytes(&input);
        assert_eq!(out, input);
        assert_eq!(outcome.pairs_collapsed, 0);
    }

    #[test]
    fn test_rewrite_cr_run_collapses_final_pair_only() {
        let (out, outcome) = rewrite_bytes(b"a\r\r\nb");
        assert_eq!(out, b"a\r\nb");
        assert_eq!(outcome.pairs_collapsed, 1);
    }

    #[test]
    fn test_rewrite_byte_length_law() {
        let input = b"a\r\nbb\r\nccc\r\nd\re\nf";
        let (out, outcome) = rewrite_bytes(input);
        assert_eq!(outcome.pairs_collapsed, 3);
        assert_eq!(out.len(), input.len() - 3);
    }

    #[test]
    fn test_rewrite_empty_file() {
        let (out, outcome) = rewrite_bytes(b"");
        assert!(out.is_empty());
        assert_eq!(outcome.pairs_collapsed, 0);
    }

    #[test]
    fn test_rewrite_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = rewrite(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, EolError::Read { .. }));
    }

    #[test]
    fn test_convert_ragged_tail_preserved() {
        // UTF-16 LE with a stray final byte: still copied verbatim
        let input = [0xFF, 0xFE, b'a', 0x00, 0x0D, 0x00, 0x0A, 0x00, b'!'];
        let (out, pairs) = convert(&input);
        assert_eq!(out, [0xFF, 0xFE, b'a', 0x00, 0x0A, 0x00, b'!']);
        assert_eq!(pairs, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrite_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("script.sh");
        fs::write(&path, b"#!/bin/sh\r\necho hi\r\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        rewrite(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        assert_eq!(fs::read(&path).unwrap(), b"#!/bin/sh\necho hi\n");
    }
}
