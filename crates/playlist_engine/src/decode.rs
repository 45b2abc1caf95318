use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::{FailureKind, FetchError, FetchedDocument};

/// Decode a fetched body into UTF-8: BOM -> Content-Type charset ->
/// chardetng detection. The upstream listing pages are Chinese and not
/// reliably served as UTF-8, so detection is the common path.
pub fn decode_document(doc: &FetchedDocument) -> Result<String, FetchError> {
    if let Some((encoding, _)) = Encoding::for_bom(&doc.bytes) {
        return decode_with(&doc.bytes, encoding);
    }

    if let Some(label) = doc.content_type.as_deref().and_then(extract_charset) {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            return decode_with(&doc.bytes, encoding);
        }
    }

    // Best-effort detection: accept replacement characters rather than
    // failing the whole source over a stray byte.
    let mut detector = EncodingDetector::new();
    detector.feed(&doc.bytes, true);
    let encoding = detector.guess(None, true);
    let (text, _, _) = encoding.decode(&doc.bytes);
    Ok(text.into_owned())
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let part = part.trim();
            part.strip_prefix("charset=")
                .or_else(|| part.strip_prefix("Charset="))
                .or_else(|| part.strip_prefix("CHARSET="))
                .map(|v| v.trim_matches([' ', '"', '\''].as_ref()))
        })
        .next()
        .map(|s| s.to_string())
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<String, FetchError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(FetchError::new(
            FailureKind::Decode,
            format!("body is not valid {}", encoding.name()),
        ));
    }
    Ok(text.into_owned())
}
