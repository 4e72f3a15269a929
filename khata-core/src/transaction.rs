//! Transaction types shared by the statement parser and the dashboards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Credit/debit direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxnType {
    #[serde(rename = "credit")]
    Credit,
    #[serde(rename = "debit")]
    Debit,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Credit => "credit",
            TxnType::Debit => "debit",
        }
    }
}

/// Closed category vocabulary. `Unknown` is the floor value; a transaction
/// never carries a missing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Money Transfer")]
    MoneyTransfer,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Wallet Topup")]
    WalletTopup,
    #[serde(rename = "Bank Charges")]
    BankCharges,
    #[serde(rename = "Refund")]
    Refund,
    #[serde(rename = "Investment Income")]
    InvestmentIncome,
    #[serde(rename = "Self Transfer")]
    SelfTransfer,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Category {
    /// Human-readable label; doubles as the keyword matched in statement text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::MoneyTransfer => "Money Transfer",
            Category::Shopping => "Shopping",
            Category::WalletTopup => "Wallet Topup",
            Category::BankCharges => "Bank Charges",
            Category::Refund => "Refund",
            Category::InvestmentIncome => "Investment Income",
            Category::SelfTransfer => "Self Transfer",
            Category::Unknown => "Unknown",
        }
    }

    /// Static subcategory used when the boundary pattern finds nothing.
    pub fn subcategory_fallback(&self) -> &'static str {
        match self {
            Category::Shopping => "Online Shopping",
            Category::WalletTopup => "Wallet Topup",
            Category::Refund => "Refund",
            Category::BankCharges => "Bank Charges",
            _ => "Unknown",
        }
    }
}

/// Bank/account label stamped onto every parsed transaction.
///
/// Statement text dumps do not carry a reliably extractable bank name; the
/// identity is configured per run, not inferred per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankIdentity {
    /// Display label, e.g. "Kotak Mahindra Bank - XX 5999"
    pub name: String,
    /// Last-4-digit account suffix, e.g. "5999"
    pub account_suffix: String,
}

impl Default for BankIdentity {
    fn default() -> Self {
        Self {
            name: "Kotak Mahindra Bank - XX 5999".to_string(),
            account_suffix: "5999".to_string(),
        }
    }
}

/// Normalized output of the statement parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(with = "statement_date")]
    pub date: NaiveDate,
    pub bank_name: String,
    pub account_number: String,
    pub category: Category,
    pub subcategory: String,
    /// Free-text remainder after structured fields are stripped
    pub narration: String,
    /// Dedup key when non-empty; empty string when the statement row had none
    pub txn_id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TxnType,
}

impl Transaction {
    /// Month partition key, e.g. "2023-04". Zero-padded, so lexicographic
    /// order is chronological order.
    pub fn partition_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    pub fn is_credit(&self) -> bool {
        self.kind == TxnType::Credit
    }

    pub fn is_debit(&self) -> bool {
        self.kind == TxnType::Debit
    }
}

/// Statement dates are day-first (`23-04-2023`); keep that form on the wire.
pub mod statement_date {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%d-%m-%Y";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2023, 4, 23).unwrap(),
            bank_name: "Kotak Mahindra Bank - XX 5999".to_string(),
            account_number: "5999".to_string(),
            category: Category::MoneyTransfer,
            subcategory: "Personal Transfer".to_string(),
            narration: "UPI/NEERU WO VIKAS".to_string(),
            txn_id: "S20670355".to_string(),
            amount: 1.0,
            kind: TxnType::Debit,
        }
    }

    #[test]
    fn test_partition_key_is_zero_padded() {
        assert_eq!(sample().partition_key(), "2023-04");
    }

    #[test]
    fn test_serializes_with_dashboard_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["date"], "23-04-2023");
        assert_eq!(json["bankName"], "Kotak Mahindra Bank - XX 5999");
        assert_eq!(json["accountNumber"], "5999");
        assert_eq!(json["category"], "Money Transfer");
        assert_eq!(json["txnId"], "S20670355");
        assert_eq!(json["type"], "debit");
    }

    #[test]
    fn test_date_round_trips_day_first() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.date, sample().date);
    }

    #[test]
    fn test_category_fallbacks() {
        assert_eq!(Category::Shopping.subcategory_fallback(), "Online Shopping");
        assert_eq!(Category::WalletTopup.subcategory_fallback(), "Wallet Topup");
        assert_eq!(Category::MoneyTransfer.subcategory_fallback(), "Unknown");
        assert_eq!(Category::Unknown.subcategory_fallback(), "Unknown");
    }
}
