//! Parsing of WER report files into a flat key/value mapping.
//!
//! Report files in the wild are often UTF-16-flavored or null-padded. Rather
//! than implementing a codec, parsing strips every null byte and then decodes
//! the remainder as UTF-8, dropping byte sequences that do not decode. This
//! lossy recovery is deliberate: partial text from a damaged report is still
//! useful, a hard decode failure is not.
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use crate::io::read_bytes_auto;
use crate::progress::Reporter;

/// Flat key/value mapping parsed from one report file. Duplicate keys: last
/// write wins within one file.
pub type RawRecord = HashMap<String, String>;

/// Remove every null byte. Borrows the input untouched when it has none.
pub fn strip_nulls(bytes: &[u8]) -> Cow<'_, [u8]> {
    match memchr::memchr(0, bytes) {
        None => Cow::Borrowed(bytes),
        Some(first) => {
            let mut out = Vec::with_capacity(bytes.len());
            out.extend_from_slice(&bytes[..first]);
            out.extend(bytes[first..].iter().copied().filter(|&b| b != 0));
            Cow::Owned(out)
        }
    }
}

/// Decode as UTF-8, dropping undecodable byte sequences entirely (no
/// replacement character).
pub fn decode_utf8_ignore(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(s) => {
                out.push_str(s);
                break;
            }
            Err(e) => {
                let valid = e.valid_up_to();
                if let Ok(s) = std::str::from_utf8(&rest[..valid]) {
                    out.push_str(s);
                }
                let skip = match e.error_len() {
                    Some(n) => valid + n,
                    // Truncated sequence at end of input
                    None => rest.len(),
                };
                if skip >= rest.len() {
                    break;
                }
                rest = &rest[skip..];
            }
        }
    }
    out
}

/// Parse decoded report text: each line is trimmed, then split on the first
/// `=`; the left side is the key, the right side the value (kept verbatim).
/// Lines without `=` are ignored. Line breaks are LF, CRLF, or lone CR
/// (CR-only reports do exist; a CRLF yields an empty in-between line, which
/// the no-`=` rule discards).
pub fn parse_wer_contents(contents: &str) -> RawRecord {
    let mut data = RawRecord::new();
    for line in contents.split(['\r', '\n']) {
        let line = line.trim();
        if let Some((key, value)) = line.split_once('=') {
            data.insert(key.to_string(), value.to_string());
        }
    }
    data
}

/// Parse raw file bytes: strip nulls, decode, split into key/value pairs.
pub fn parse_wer_bytes(bytes: &[u8]) -> RawRecord {
    parse_wer_contents(&decode_utf8_ignore(&strip_nulls(bytes)))
}

/// Read and parse one report file. A read failure is reported and yields an
/// empty record; it never aborts the run.
pub fn parse_wer_file(
    path: &Path,
    mmap_threshold_bytes: u64,
    reporter: &dyn Reporter,
) -> RawRecord {
    let bytes = match read_bytes_auto(path, mmap_threshold_bytes) {
        Ok(b) => b,
        Err(e) => {
            reporter.warn(&format!("error reading file {}: {}", path.display(), e));
            return RawRecord::new();
        }
    };
    let data = parse_wer_bytes(&bytes);
    reporter.debug(&format!(
        "parsed {} key(s) from {}",
        data.len(),
        path.display()
    ));
    data
}
