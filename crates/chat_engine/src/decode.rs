use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use widget_logging::chat_warn;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

/// Decode a client document into text: BOM -> UTF-8 -> chardetng fallback.
pub fn decode_document(bytes: &[u8]) -> Result<String, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if std::str::from_utf8(bytes).is_ok() {
        return decode_with(bytes, UTF_8);
    }

    // Valid multi-byte sequences mean UTF-8 with a few stray bytes; legacy
    // single-byte text almost never forms them.
    let lossy = String::from_utf8_lossy(bytes);
    if lossy
        .chars()
        .any(|ch| !ch.is_ascii() && ch != char::REPLACEMENT_CHARACTER)
    {
        chat_warn!("Document is mostly UTF-8; replacing invalid bytes");
        return Ok(lossy.into_owned());
    }

    // Legacy office exports are often windows-1252 or similar.
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<String, DecodeError> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: enc.name().to_string(),
            message: "decoding error".into(),
        });
    }
    Ok(text.into_owned())
}
