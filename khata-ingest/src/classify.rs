//! Keyword classification: credit/debit direction, category, subcategory.
//!
//! Everything here is data-driven: ordered keyword tables scanned first-match
//! wins. A miss always degrades to a documented default, never an error.

use anyhow::Result;
use khata_core::{Category, TxnType};
use regex::Regex;

/// Explicit direction markers. These win over any keyword.
const CREDIT_MARKERS: [&str; 3] = ["/CR/", "(CR)", " CR "];
const DEBIT_MARKERS: [&str; 3] = ["/DR/", "(DR)", " DR "];

/// Phrases implying money coming in when no explicit marker is present.
const CREDIT_KEYWORDS: [&str; 6] = [
    "Refund",
    "Investment Income",
    "Payment from",
    "Received from",
    "REV:IMPS",
    "CreditAdj",
];

/// Ordered category vocabulary. First entry whose keyword occurs as a
/// substring wins (vocabulary order, not leftmost-in-text).
const CATEGORY_KEYWORDS: [(&str, Category); 7] = [
    ("Money Transfer", Category::MoneyTransfer),
    ("Shopping", Category::Shopping),
    ("Wallet Topup", Category::WalletTopup),
    ("Bank Charges", Category::BankCharges),
    ("Refund", Category::Refund),
    ("Investment Income", Category::InvestmentIncome),
    ("Self Transfer", Category::SelfTransfer),
];

/// Channel tokens that terminate the subcategory phrase in statement text.
const CHANNEL_TOKENS: &str = "UPI|PCI|NEFT|IMPS|ATM|POS|eCOM|NA";

/// Determine credit/debit. Precedence: explicit CR markers, explicit DR
/// markers, credit keywords, then debit as the default.
pub fn classify_type(record: &str) -> TxnType {
    if CREDIT_MARKERS.iter().any(|m| record.contains(m)) {
        return TxnType::Credit;
    }
    if DEBIT_MARKERS.iter().any(|m| record.contains(m)) {
        return TxnType::Debit;
    }
    if CREDIT_KEYWORDS.iter().any(|k| record.contains(k)) {
        return TxnType::Credit;
    }
    TxnType::Debit
}

/// Scan the vocabulary in order; returns the category and the byte range of
/// the leftmost keyword occurrence (for narration stripping).
pub fn classify_category(record: &str) -> (Category, Option<(usize, usize)>) {
    for (keyword, category) in CATEGORY_KEYWORDS {
        if let Some(pos) = record.find(keyword) {
            return (category, Some((pos, pos + keyword.len())));
        }
    }
    (Category::Unknown, None)
}

/// Precompiled `<category> <phrase> <channel>` patterns, one per vocabulary
/// entry. The captured phrase between the category keyword and the channel
/// token is the subcategory.
pub struct SubcategoryPatterns {
    table: Vec<(Category, Regex)>,
}

impl SubcategoryPatterns {
    pub fn new() -> Result<Self> {
        let mut table = Vec::with_capacity(CATEGORY_KEYWORDS.len());
        for (keyword, category) in CATEGORY_KEYWORDS {
            let pattern = format!(
                r"{}\s+([A-Za-z\s]+?)\s+(?:{})",
                regex::escape(keyword),
                CHANNEL_TOKENS
            );
            table.push((category, Regex::new(&pattern)?));
        }
        Ok(Self { table })
    }

    /// Subcategory text and its capture range. Falls back to the category's
    /// static subcategory when the pattern finds nothing.
    pub fn subcategory(&self, record: &str, category: Category) -> (String, Option<(usize, usize)>) {
        if let Some((_, re)) = self.table.iter().find(|(c, _)| *c == category) {
            if let Some(m) = re.captures(record).and_then(|caps| caps.get(1)) {
                let text = m.as_str().trim();
                if !text.is_empty() {
                    return (text.to_string(), Some((m.start(), m.end())));
                }
            }
        }
        (category.subcategory_fallback().to_string(), None)
    }
}
