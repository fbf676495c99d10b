//! Text encoding of persisted language models.
//!
//! One record per trigram: `trigram _DELIMITER_ weight _ENDLINE_\n`, UTF-8.
//! The trigram may contain any characters, including spaces and newlines,
//! so records are split on the literal markers rather than on lines.

use crate::error::{LingramError, Result};
use crate::trigram::TrigramVector;
use memchr::memmem;
use std::io::Write;

pub const FIELD_DELIMITER: &str = "_DELIMITER_";
pub const RECORD_TERMINATOR: &str = "_ENDLINE_\n";

/// Parse the records of one model file.
pub fn decode(language: &str, data: &[u8]) -> Result<TrigramVector> {
    let text = std::str::from_utf8(data).map_err(|e| {
        LingramError::malformed(language, 0, format!("not valid UTF-8: {}", e))
    })?;

    let records = memmem::Finder::new(RECORD_TERMINATOR.as_bytes());
    let delimiter = memmem::FinderRev::new(FIELD_DELIMITER.as_bytes());

    let mut vector = TrigramVector::new();
    let mut pos = 0;
    let mut record = 0;
    while pos < text.len() {
        record += 1;
        let end = match records.find(&data[pos..]) {
            Some(rel) => pos + rel,
            None => {
                return Err(LingramError::malformed(
                    language,
                    record,
                    "missing _ENDLINE_ terminator",
                ))
            }
        };
        let body = &text[pos..end];
        pos = end + RECORD_TERMINATOR.len();

        // The weight never contains the delimiter, the trigram might
        let split = delimiter
            .rfind(body.as_bytes())
            .ok_or_else(|| LingramError::malformed(language, record, "missing _DELIMITER_"))?;
        let trigram = &body[..split];
        let raw_weight = &body[split + FIELD_DELIMITER.len()..];

        if trigram.chars().count() != 3 {
            return Err(LingramError::malformed(
                language,
                record,
                format!("'{}' is not a trigram", trigram),
            ));
        }
        let weight: f64 = raw_weight.trim().parse().map_err(|_| {
            LingramError::malformed(language, record, format!("bad weight '{}'", raw_weight))
        })?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(LingramError::malformed(
                language,
                record,
                format!("weight {} out of range", weight),
            ));
        }
        if vector.insert(trigram.to_string(), weight).is_some() {
            return Err(LingramError::malformed(
                language,
                record,
                format!("trigram '{}' listed twice", trigram),
            ));
        }
    }
    Ok(vector)
}

/// Write records in descending weight order, ties by trigram, so the
/// output for a given vector is byte-stable.
pub fn encode<W: Write>(vector: &TrigramVector, out: &mut W) -> Result<()> {
    let mut entries: Vec<(&String, &f64)> = vector.iter().collect();
    entries.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (trigram, weight) in entries {
        // `{}` on f64 prints the shortest representation that round-trips
        write!(out, "{}{}{}{}", trigram, FIELD_DELIMITER, weight, RECORD_TERMINATOR)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_records() {
        let data = "the_DELIMITER_0.9_ENDLINE_\ning_DELIMITER_0.436_ENDLINE_\n";
        let v = decode("en", data.as_bytes()).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v["the"], 0.9);
        assert_eq!(v["ing"], 0.436);
    }

    #[test]
    fn decode_multibyte_and_whitespace_trigrams() {
        let data = "ч т_DELIMITER_0.5_ENDLINE_\n\n  _DELIMITER_0.25_ENDLINE_\n";
        let v = decode("ru", data.as_bytes()).unwrap();
        assert_eq!(v["ч т"], 0.5);
        assert_eq!(v["\n  "], 0.25);
    }

    #[test]
    fn decode_empty_file() {
        assert!(decode("en", b"").unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_missing_delimiter() {
        let err = decode("en", b"the0.9_ENDLINE_\n").unwrap_err();
        assert!(matches!(err, LingramError::MalformedModel { record: 1, .. }));
    }

    #[test]
    fn decode_rejects_bad_weight() {
        let data = "the_DELIMITER_0.9_ENDLINE_\ning_DELIMITER_lots_ENDLINE_\n";
        let err = decode("en", data.as_bytes()).unwrap_err();
        assert!(matches!(err, LingramError::MalformedModel { record: 2, .. }));
    }

    #[test]
    fn decode_rejects_negative_weight() {
        let err = decode("en", b"the_DELIMITER_-1_ENDLINE_\n").unwrap_err();
        assert!(matches!(err, LingramError::MalformedModel { .. }));
    }

    #[test]
    fn decode_rejects_truncated_record() {
        let err = decode("en", b"the_DELIMITER_0.9").unwrap_err();
        assert!(err.to_string().contains("_ENDLINE_"));
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let err = decode("en", b"th_DELIMITER_0.9_ENDLINE_\n").unwrap_err();
        assert!(err.to_string().contains("not a trigram"));
    }

    #[test]
    fn encode_is_sorted_by_weight() {
        let v: TrigramVector = [("ing".to_string(), 0.436), ("the".to_string(), 0.9)]
            .into_iter()
            .collect();
        let mut out = Vec::new();
        encode(&v, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "the_DELIMITER_0.9_ENDLINE_\ning_DELIMITER_0.436_ENDLINE_\n"
        );
    }
}
