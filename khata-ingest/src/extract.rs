//! Field extraction over one reassembled record block.
//!
//! Expected record shape after reassembly:
//!   23-04-2023 Kotak Mahindra Bank - XX 5999 Money Transfer Personal
//!   Transfer UPI/NEERU WO VIKAS /311322337297/Sent from Paytm S20670355 Rs. 1.0
//!
//! A record without a leading `DD-MM-YYYY` date or a trailing `Rs. <amount>`
//! is not a transaction and is rejected (`None`), never an error.

use anyhow::Result;
use chrono::NaiveDate;
use regex::Regex;

/// Byte ranges of recognized fields inside the original record. The
/// narration is whatever remains after every recorded range is deleted.
/// Ranges always refer to the untouched record; overlapping ranges are
/// merged before removal.
#[derive(Debug, Default, Clone)]
pub struct FieldSpans {
    spans: Vec<(usize, usize)>,
}

impl FieldSpans {
    pub fn push(&mut self, start: usize, end: usize) {
        self.spans.push((start, end));
    }

    /// Delete all recorded ranges from `record`, then collapse whitespace.
    pub fn strip(&self, record: &str) -> String {
        let mut spans = self.spans.clone();
        spans.sort_unstable();

        let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
        for (start, end) in spans {
            match merged.last_mut() {
                Some((_, prev_end)) if start <= *prev_end => *prev_end = (*prev_end).max(end),
                _ => merged.push((start, end)),
            }
        }

        let mut out = String::with_capacity(record.len());
        let mut cursor = 0;
        for (start, end) in merged {
            out.push_str(&record[cursor..start]);
            out.push(' ');
            cursor = end;
        }
        out.push_str(&record[cursor..]);

        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Structured fields pulled from one record.
#[derive(Debug, Clone)]
pub struct Extracted {
    pub date: NaiveDate,
    pub amount: f64,
    /// Empty when the row carried no id token
    pub txn_id: String,
    /// Ranges consumed so far (date, amount tail, txn id)
    pub spans: FieldSpans,
}

/// Pulls date, amount, and transaction id out of reassembled records.
pub struct FieldExtractor {
    tail_re: Regex,
}

const DATE_LEN: usize = 10;

impl FieldExtractor {
    pub fn new() -> Result<Self> {
        // Trailing amount marker, with the id token (one uppercase letter +
        // digits) optionally bound to it. The id group only matches a whole
        // token: anything like "WO123" fails the group, not the record.
        let tail_re = Regex::new(concat!(
            r"(?:(?:^|\s)(?P<txn>[A-Z]\d+)\s+)?",
            r"Rs\.\s*(?P<amt>\d[\d,]*(?:\.\d+)?)$"
        ))?;
        Ok(Self { tail_re })
    }

    /// Extract fields from one record, or `None` when the record is not a
    /// transaction (missing date prefix, missing amount, unparseable amount).
    pub fn extract(&self, record: &str) -> Option<Extracted> {
        let date_text = record.get(..DATE_LEN)?;
        let date = NaiveDate::parse_from_str(date_text, "%d-%m-%Y").ok()?;

        let caps = self.tail_re.captures(record)?;
        let tail = caps.get(0)?;
        let amount: f64 = caps["amt"].replace(",", "").parse().ok()?;
        let txn_id = caps
            .name("txn")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let mut spans = FieldSpans::default();
        spans.push(0, DATE_LEN);
        spans.push(tail.start(), tail.end());

        Some(Extracted {
            date,
            amount,
            txn_id,
            spans,
        })
    }
}
