//! End-to-end statement parser: reassemble, extract, classify.

use anyhow::Result;
use khata_core::{BankIdentity, Transaction};
use std::collections::BTreeMap;

use crate::classify::{SubcategoryPatterns, classify_category, classify_type};
use crate::dedupe::{dedupe, partition_by_month};
use crate::extract::FieldExtractor;
use crate::reassemble::record_blocks;

/// Parses raw statement text into transactions. Patterns compile once at
/// construction; `parse` holds no shared mutable state and is safe to call
/// repeatedly or from multiple threads.
pub struct StatementParser {
    bank: BankIdentity,
    extractor: FieldExtractor,
    subcategories: SubcategoryPatterns,
}

impl StatementParser {
    pub fn new(bank: BankIdentity) -> Result<Self> {
        Ok(Self {
            bank,
            extractor: FieldExtractor::new()?,
            subcategories: SubcategoryPatterns::new()?,
        })
    }

    /// Parse statement text into transactions in document order.
    /// Non-transaction blocks (boilerplate remnants, partial rows) are
    /// dropped silently.
    pub fn parse(&self, text: &str) -> Vec<Transaction> {
        record_blocks(text)
            .filter_map(|block| self.parse_record(&block))
            .collect()
    }

    /// Parse, dedupe (first id occurrence wins), and partition by month.
    pub fn parse_partitioned(&self, text: &str) -> BTreeMap<String, Vec<Transaction>> {
        partition_by_month(dedupe(self.parse(text)))
    }

    fn parse_record(&self, record: &str) -> Option<Transaction> {
        let mut extracted = self.extractor.extract(record)?;

        let kind = classify_type(record);
        let (category, category_span) = classify_category(record);
        let (subcategory, subcategory_span) = self.subcategories.subcategory(record, category);

        if let Some(pos) = record.find(&self.bank.name) {
            extracted.spans.push(pos, pos + self.bank.name.len());
        }
        if let Some((start, end)) = category_span {
            extracted.spans.push(start, end);
        }
        if let Some((start, end)) = subcategory_span {
            extracted.spans.push(start, end);
        }

        let narration = extracted.spans.strip(record);

        Some(Transaction {
            date: extracted.date,
            bank_name: self.bank.name.clone(),
            account_number: self.bank.account_suffix.clone(),
            category,
            subcategory,
            narration,
            txn_id: extracted.txn_id,
            amount: extracted.amount,
            kind,
        })
    }
}
