//! CSV parser for uploaded tick feeds
//!
//! Splits a payload into accepted ticks and rejected rows. Rejections never
//! abort the batch; each malformed row is dropped on its own.

use thiserror::Error;

use super::FieldMapping;
use crate::error::Result;
use crate::store::Tick;

/// Why a row was discarded
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectReason {
    #[error("expected at least {expected} columns, found {found}")]
    MissingColumns { expected: usize, found: usize },

    #[error("{field} is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} is not finite: {value:?}")]
    NonFinite { field: &'static str, value: String },

    #[error("unreadable record: {0}")]
    Unreadable(String),
}

/// A discarded input row
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based line in the payload (the header is line 1)
    pub line: u64,
    pub reason: RejectReason,
}

/// Result of parsing one payload
#[derive(Debug, Clone, Default)]
pub struct ParsedBatch {
    pub accepted: Vec<Tick>,
    pub rejected: Vec<RejectedRow>,
}

/// Parse a CSV payload whose first line is a header.
///
/// Fails only when the payload is not UTF-8; every other problem is recorded
/// per row in [`ParsedBatch::rejected`].
pub fn parse_csv(payload: &[u8], mapping: &FieldMapping) -> Result<ParsedBatch> {
    let text = std::str::from_utf8(payload)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut batch = ParsedBatch::default();

    for (index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                let line = record
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(index as u64 + 2);
                match parse_record(&record, mapping) {
                    Ok(tick) => batch.accepted.push(tick),
                    Err(reason) => batch.rejected.push(RejectedRow { line, reason }),
                }
            }
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(index as u64 + 2);
                batch.rejected.push(RejectedRow {
                    line,
                    reason: RejectReason::Unreadable(e.to_string()),
                });
            }
        }
    }

    Ok(batch)
}

/// Extract one tick from a record by column position
fn parse_record(
    record: &csv::StringRecord,
    mapping: &FieldMapping,
) -> std::result::Result<Tick, RejectReason> {
    let expected = mapping.min_columns();
    if record.len() < expected {
        return Err(RejectReason::MissingColumns {
            expected,
            found: record.len(),
        });
    }

    // Bounds checked above
    let field = |column: usize| record.get(column).unwrap_or_default();

    Ok(Tick {
        time: field(mapping.time).to_string(),
        price: parse_number("price", field(mapping.price))?,
        bid_volume: parse_number("bidVolume", field(mapping.bid_volume))?,
        ask_volume: parse_number("askVolume", field(mapping.ask_volume))?,
    })
}

/// Empty fields read as zero; anything else must be a finite float
fn parse_number(field: &'static str, raw: &str) -> std::result::Result<f64, RejectReason> {
    if raw.is_empty() {
        return Ok(0.0);
    }

    let value: f64 = raw.trim().parse().map_err(|_| RejectReason::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;

    if !value.is_finite() {
        return Err(RejectReason::NonFinite {
            field,
            value: raw.to_string(),
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "ts_recv,ts_event,rtype,publisher_id,instrument_id,action,side,depth,price,size,flags,ts_in_delta,sequence,bid_px_00,ask_px_00,bid_sz_00,ask_sz_00,symbol";

    fn row(time: &str, price: &str, bid: &str, ask: &str) -> String {
        format!(
            "2025-06-11T00:00:00.000000000Z,{time},10,1,5602,A,B,0,{price},1,128,0,1000,{price},{price},{bid},{ask},ESM5"
        )
    }

    fn payload(rows: &[String]) -> Vec<u8> {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        text.into_bytes()
    }

    #[test]
    fn test_parse_well_formed_rows() {
        let data = payload(&[
            row("2025-06-11T10:00:00.000000001Z", "6000.25", "3", "0"),
            row("2025-06-11T10:00:00.000000002Z", "6000.5", "0", "12.5"),
        ]);

        let batch = parse_csv(&data, &FieldMapping::default()).unwrap();
        assert!(batch.rejected.is_empty());
        assert_eq!(
            batch.accepted,
            vec![
                Tick::new("2025-06-11T10:00:00.000000001Z", 6000.25, 3.0, 0.0),
                Tick::new("2025-06-11T10:00:00.000000002Z", 6000.5, 0.0, 12.5),
            ]
        );
    }

    #[test]
    fn test_one_malformed_row_among_ten() {
        let mut rows: Vec<String> = (0..9)
            .map(|i| row(&format!("2025-06-11T10:00:0{}Z", i), "100", "1", "2"))
            .collect();
        rows.insert(4, row("2025-06-11T10:00:10Z", "abc", "1", "2"));

        let batch = parse_csv(&payload(&rows), &FieldMapping::default()).unwrap();
        assert_eq!(batch.accepted.len(), 9);
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].line, 6);
        assert_eq!(
            batch.rejected[0].reason,
            RejectReason::InvalidNumber {
                field: "price",
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_empty_numeric_fields_read_as_zero() {
        let data = payload(&[row("t1", "", "", "4")]);

        let batch = parse_csv(&data, &FieldMapping::default()).unwrap();
        assert_eq!(batch.accepted, vec![Tick::new("t1", 0.0, 0.0, 4.0)]);
    }

    #[test]
    fn test_short_and_non_finite_rows_rejected() {
        let data = payload(&[
            "2025-06-11,t1,10,1".to_string(),
            row("t2", "NaN", "1", "1"),
            row("t3", "100", " ", "1"),
            row("t4", "100", "1", "1"),
        ]);

        let batch = parse_csv(&data, &FieldMapping::default()).unwrap();
        assert_eq!(batch.accepted, vec![Tick::new("t4", 100.0, 1.0, 1.0)]);
        assert_eq!(batch.rejected.len(), 3);
        assert_eq!(
            batch.rejected[0].reason,
            RejectReason::MissingColumns {
                expected: 17,
                found: 4
            }
        );
        assert!(matches!(
            batch.rejected[1].reason,
            RejectReason::NonFinite { field: "price", .. }
        ));
        assert!(matches!(
            batch.rejected[2].reason,
            RejectReason::InvalidNumber { field: "bidVolume", .. }
        ));
    }

    #[test]
    fn test_header_only_and_blank_lines() {
        let batch = parse_csv(HEADER.as_bytes(), &FieldMapping::default()).unwrap();
        assert!(batch.accepted.is_empty());
        assert!(batch.rejected.is_empty());

        let data = format!("{HEADER}\n\n{}\n\n", row("t1", "1", "1", "1"));
        let batch = parse_csv(data.as_bytes(), &FieldMapping::default()).unwrap();
        assert_eq!(batch.accepted.len(), 1);
        assert!(batch.rejected.is_empty());
    }

    #[test]
    fn test_custom_mapping() {
        let mapping = FieldMapping {
            time: 0,
            price: 1,
            bid_volume: 2,
            ask_volume: 3,
        };
        let data = b"time,price,bid,ask\n2025-06-11T10:00:00Z,99.75,4,\n";

        let batch = parse_csv(data, &mapping).unwrap();
        assert_eq!(
            batch.accepted,
            vec![Tick::new("2025-06-11T10:00:00Z", 99.75, 4.0, 0.0)]
        );
    }

    #[test]
    fn test_invalid_utf8_is_payload_error() {
        let data = [b'h', b'\n', 0xff, 0xfe, b'\n'];
        let err = parse_csv(&data, &FieldMapping::default()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::DashboardError::InvalidPayload(_)
        ));
    }
}
