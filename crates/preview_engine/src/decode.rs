use bytes::Bytes;
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

/// Decoded document text and the byte form it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static Encoding,
    pub had_bom: bool,
}

impl DecodedText {
    /// Encode `text` back into the source encoding, restoring the BOM if there was one.
    pub fn encode(&self, text: &str) -> Bytes {
        let mut out = Vec::with_capacity(text.len() + 3);
        if self.encoding == UTF_16LE {
            if self.had_bom {
                out.extend_from_slice(b"\xFF\xFE");
            }
            out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
        } else if self.encoding == UTF_16BE {
            if self.had_bom {
                out.extend_from_slice(b"\xFE\xFF");
            }
            out.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
        } else {
            if self.had_bom && self.encoding == UTF_8 {
                out.extend_from_slice(b"\xEF\xBB\xBF");
            }
            let (bytes, _, _) = self.encoding.encode(text);
            out.extend_from_slice(&bytes);
        }
        Bytes::from(out)
    }
}

/// Decode document bytes into text using: BOM -> strict UTF-8 -> chardetng fallback.
pub fn decode_text(bytes: &[u8]) -> Result<String, DecodeError> {
    decode_document(bytes).map(|decoded| decoded.text)
}

/// Like [`decode_text`], but keeps the encoding so the text can be written back.
pub fn decode_document(bytes: &[u8]) -> Result<DecodedText, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding, true);
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(DecodedText {
            text: text.to_string(),
            encoding: UTF_8,
            had_bom: false,
        });
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    if enc == UTF_8 {
        // Detector agrees on UTF-8 but the bytes are not valid UTF-8.
        return Err(DecodeError::DecodeFailure {
            encoding: enc.name().to_string(),
            message: "invalid byte sequence".into(),
        });
    }
    decode_with(bytes, enc, false)
}

fn decode_with(
    bytes: &[u8],
    enc: &'static Encoding,
    had_bom: bool,
) -> Result<DecodedText, DecodeError> {
    // `decode` strips a matching BOM itself.
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: enc.name().to_string(),
            message: "decoding error".into(),
        });
    }
    Ok(DecodedText {
        text: text.into_owned(),
        encoding: enc,
        had_bom,
    })
}
