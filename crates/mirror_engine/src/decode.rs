use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// Encodings tried, in order, for files in the c2 dump.
pub const DEFAULT_ENCODINGS: &[&Encoding] = &[UTF_8, WINDOWS_1252];

/// Bytes with no character assigned in the cp1252 code page. WHATWG
/// windows-1252 maps them to C1 controls; a dump page containing one is
/// treated as undecodable.
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("bytes are not valid in any candidate encoding (tried {})", tried.join(", "))]
    Undecodable { tried: Vec<String> },
}

/// Decode raw bytes with the default candidates: UTF-8, then windows-1252.
pub fn decode_html(bytes: &[u8]) -> Result<DecodedHtml, DecodeError> {
    decode_with_candidates(bytes, DEFAULT_ENCODINGS)
}

/// Decode raw bytes with the first candidate that accepts them without replacement characters.
pub fn decode_with_candidates(
    bytes: &[u8],
    candidates: &[&'static Encoding],
) -> Result<DecodedHtml, DecodeError> {
    for enc in candidates {
        if let Some(decoded) = decode_with(bytes, *enc) {
            return Ok(decoded);
        }
    }
    Err(DecodeError::Undecodable {
        tried: candidates.iter().map(|enc| enc.name().to_string()).collect(),
    })
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Option<DecodedHtml> {
    if enc == WINDOWS_1252 && bytes.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
        return None;
    }
    let text = enc.decode_without_bom_handling_and_without_replacement(bytes)?;
    Some(DecodedHtml {
        html: text.into_owned(),
        encoding_label: enc.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::SHIFT_JIS;

    #[test]
    fn utf8_wins_when_valid() {
        let decoded = decode_html("caf\u{e9}".as_bytes()).unwrap();
        assert_eq!(decoded.html, "caf\u{e9}");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn falls_back_to_windows_1252() {
        let decoded = decode_html(b"caf\xe9 \x93quoted\x94").unwrap();
        assert_eq!(decoded.html, "caf\u{e9} \u{201c}quoted\u{201d}");
        assert_eq!(decoded.encoding_label, "windows-1252");
    }

    #[test]
    fn undefined_cp1252_bytes_are_rejected() {
        for byte in CP1252_UNDEFINED {
            let bytes = [b'a', 0xe9, byte, b'b'];
            let err = decode_html(&bytes).unwrap_err();
            assert_eq!(
                err,
                DecodeError::Undecodable {
                    tried: vec!["UTF-8".to_string(), "windows-1252".to_string()],
                }
            );
        }
    }

    #[test]
    fn reports_every_candidate_tried() {
        // 0xFF is neither a UTF-8 nor a Shift_JIS lead byte.
        let err = decode_with_candidates(b"\x80\xff", &[UTF_8, SHIFT_JIS]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Undecodable {
                tried: vec!["UTF-8".to_string(), "Shift_JIS".to_string()],
            }
        );
    }

    #[test]
    fn empty_candidate_list_is_undecodable() {
        assert!(decode_with_candidates(b"plain", &[]).is_err());
    }
}
