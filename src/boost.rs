//! Stored boost field encoding
//!
//! A per-document score multiplier is kept in a stored-only bytes field and
//! decoded at search time. The layout is an 8-byte big-endian IEEE-754
//! double; it must round-trip bit-exactly.

use byteorder::{BigEndian, ByteOrder};

use crate::explanation::Explanation;
use crate::query::DocumentMatch;
use crate::reader::SearchReader;

/// Name of the stored-only field holding the document boost.
pub const BOOST_FIELD: &str = "boost";

/// Encode a boost multiplier into its 8-byte big-endian form.
pub fn encode_boost(boost: f64) -> [u8; 8] {
    let mut buf = [0u8; 8];
    BigEndian::write_f64(&mut buf, boost);
    buf
}

/// Decode a boost multiplier from its stored bytes.
///
/// Returns `None` unless the slice is exactly 8 bytes.
pub fn decode_boost(raw: &[u8]) -> Option<f64> {
    if raw.len() != 8 {
        return None;
    }
    Some(BigEndian::read_f64(raw))
}

/// Builds a transformation that multiplies each match's score by the boost
/// stored alongside the matched document, defaulting to 1.0 when the field
/// is absent or unreadable.
///
/// When the match carries an explanation it is rebuilt as
/// `custom, doc_boost * orig_score` with the boost value and the original
/// explanation as children. The transformation reads stored fields from the
/// given snapshot; readers are isolated, so lookups mid-iteration are safe.
pub fn boost_transform(
    reader: SearchReader,
) -> impl Fn(Option<DocumentMatch>) -> Option<DocumentMatch> + Send + Sync + 'static {
    move |matched| {
        let mut matched = matched?;
        let mut doc_boost = 1.0_f64;
        let _ = reader.visit_stored_fields(matched.ordinal, |field, value| {
            if field == BOOST_FIELD {
                if let Some(decoded) = decode_boost(value) {
                    doc_boost = decoded;
                }
            }
            true
        });
        let original_score = matched.score;
        matched.score = (f64::from(original_score) * doc_boost) as f32;
        if let Some(original) = matched.explanation.take() {
            let mut rewritten = Explanation::new(matched.score, "custom, doc_boost * orig_score");
            rewritten.add_detail(Explanation::new(
                doc_boost as f32,
                "doc_boost, loaded from field 'boost'",
            ));
            rewritten.add_detail(original);
            matched.explanation = Some(rewritten);
        }
        Some(matched)
    }
}
