//! Input decoding module
//!
//! Reads the whole input file and decodes it strictly as UTF-8. Files that
//! are not UTF-8 are rejected rather than transcoded; detection is only used
//! to tell the operator what the file most likely is.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::fs;
use std::path::Path;

use crate::error::{Access, FilterError, Result};

/// How much of the file is sampled when guessing its real encoding
const SAMPLE_SIZE: usize = 64 * 1024;

/// Read a file and decode it as UTF-8 text
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| FilterError::from_io(e, path, Access::Read))?;
    log::debug!("read {} bytes from {:?}", bytes.len(), path);
    decode_utf8(&bytes, path)
}

/// Decode bytes as UTF-8, dropping a leading UTF-8 BOM
///
/// A UTF-16 BOM or any invalid sequence yields [`FilterError::Decoding`]
/// with the offset of the first bad byte.
pub fn decode_utf8(bytes: &[u8], path: &Path) -> Result<String> {
    let (encoding, bom_len) = detect_bom(bytes).unwrap_or((UTF_8, 0));

    if encoding != UTF_8 {
        return Err(FilterError::Decoding {
            path: path.to_path_buf(),
            offset: 0,
            guess: Some(encoding.name()),
        });
    }

    let body = &bytes[bom_len..];
    match UTF_8.decode_without_bom_handling_and_without_replacement(body) {
        Some(text) => Ok(text.into_owned()),
        None => {
            let offset = bom_len + Encoding::utf8_valid_up_to(body);
            log::debug!("invalid UTF-8 in {:?} at byte {}", path, offset);
            Err(FilterError::Decoding {
                path: path.to_path_buf(),
                offset,
                guess: guess_encoding(bytes),
            })
        }
    }
}

/// Detect a BOM (Byte Order Mark) and return the encoding plus its length
fn detect_bom(content: &[u8]) -> Option<(&'static Encoding, usize)> {
    Encoding::for_bom(content)
}

/// Guess the encoding of content that failed to decode as UTF-8
///
/// Returns `None` when the detector still thinks it is UTF-8.
pub fn guess_encoding(content: &[u8]) -> Option<&'static str> {
    let sample = &content[..content.len().min(SAMPLE_SIZE)];

    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == content.len());

    let encoding = detector.guess(None, true);
    if encoding == UTF_8 {
        None
    } else {
        Some(encoding.name())
    }
}
