//! Pure aggregation helpers consumed by the finance dashboard.
//!
//! All functions are side-effect-free over an in-memory slice; the underlying
//! data is static per build, so there is no caching or incremental update.

use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::transaction::{Category, Transaction, TxnType};

/// Income/expense/savings totals for one bucket (month or year).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FlowStat {
    pub income: f64,
    pub expense: f64,
    pub savings: f64,
}

impl FlowStat {
    fn add(&mut self, txn: &Transaction) {
        match txn.kind {
            TxnType::Credit => self.income += txn.amount,
            TxnType::Debit => self.expense += txn.amount,
        }
        self.savings = self.income - self.expense;
    }
}

/// Per-month income/expense/savings for one calendar year.
/// Index 0 is January. Transactions outside `year` are ignored.
pub fn monthly_stats(txns: &[Transaction], year: i32) -> [FlowStat; 12] {
    let mut months = [FlowStat::default(); 12];
    for txn in txns {
        if txn.date.year() != year {
            continue;
        }
        months[(txn.date.month() - 1) as usize].add(txn);
    }
    months
}

/// Amount totals by category, restricted to one year and one direction.
pub fn category_stats(txns: &[Transaction], year: i32, kind: TxnType) -> BTreeMap<Category, f64> {
    let mut totals = BTreeMap::new();
    for txn in txns {
        if txn.date.year() != year || txn.kind != kind {
            continue;
        }
        *totals.entry(txn.category).or_insert(0.0) += txn.amount;
    }
    totals
}

/// Income/expense/savings bucketed by year.
pub fn yearly_stats(txns: &[Transaction]) -> BTreeMap<i32, FlowStat> {
    let mut years: BTreeMap<i32, FlowStat> = BTreeMap::new();
    for txn in txns {
        years.entry(txn.date.year()).or_default().add(txn);
    }
    years
}

/// Distinct years present across all transactions, descending.
pub fn financial_years(txns: &[Transaction]) -> Vec<i32> {
    let years: BTreeSet<i32> = txns.iter().map(|t| t.date.year()).collect();
    years.into_iter().rev().collect()
}

/// Transactions for an exact year + month (1-indexed).
pub fn transactions_by_month(txns: &[Transaction], year: i32, month: u32) -> Vec<Transaction> {
    txns.iter()
        .filter(|t| t.date.year() == year && t.date.month() == month)
        .cloned()
        .collect()
}

/// Concatenation of month partitions in key order. Keys are zero-padded
/// `YYYY-MM`, so this is chronological.
pub fn all_transactions(partitions: &BTreeMap<String, Vec<Transaction>>) -> Vec<Transaction> {
    partitions.values().flatten().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(date: &str, amount: f64, kind: TxnType, category: Category) -> Transaction {
        Transaction {
            date: NaiveDate::parse_from_str(date, "%d-%m-%Y").unwrap(),
            bank_name: "Kotak Mahindra Bank - XX 5999".to_string(),
            account_number: "5999".to_string(),
            category,
            subcategory: "Unknown".to_string(),
            narration: String::new(),
            txn_id: String::new(),
            amount,
            kind,
        }
    }

    #[test]
    fn test_monthly_stats_march_2024() {
        let txns = vec![
            txn("05-03-2024", 500.0, TxnType::Credit, Category::Refund),
            txn("12-03-2024", 200.0, TxnType::Debit, Category::Shopping),
        ];
        let months = monthly_stats(&txns, 2024);
        assert_eq!(months[2].income, 500.0);
        assert_eq!(months[2].expense, 200.0);
        assert_eq!(months[2].savings, 300.0);
        for (i, m) in months.iter().enumerate() {
            if i != 2 {
                assert_eq!(*m, FlowStat::default());
            }
        }
    }

    #[test]
    fn test_monthly_stats_ignores_other_years() {
        let txns = vec![txn("05-03-2023", 500.0, TxnType::Credit, Category::Refund)];
        let months = monthly_stats(&txns, 2024);
        assert_eq!(months[2], FlowStat::default());
    }

    #[test]
    fn test_category_stats_filters_year_and_kind() {
        let txns = vec![
            txn("01-01-2024", 100.0, TxnType::Debit, Category::Shopping),
            txn("02-01-2024", 40.0, TxnType::Debit, Category::Shopping),
            txn("03-01-2024", 75.0, TxnType::Credit, Category::Refund),
            txn("03-01-2023", 999.0, TxnType::Debit, Category::Shopping),
        ];
        let debits = category_stats(&txns, 2024, TxnType::Debit);
        assert_eq!(debits.get(&Category::Shopping), Some(&140.0));
        assert_eq!(debits.get(&Category::Refund), None);

        let credits = category_stats(&txns, 2024, TxnType::Credit);
        assert_eq!(credits.get(&Category::Refund), Some(&75.0));
    }

    #[test]
    fn test_yearly_stats() {
        let txns = vec![
            txn("01-06-2023", 10.0, TxnType::Debit, Category::Unknown),
            txn("01-06-2024", 30.0, TxnType::Credit, Category::Unknown),
            txn("09-07-2024", 5.0, TxnType::Debit, Category::Unknown),
        ];
        let years = yearly_stats(&txns);
        assert_eq!(years[&2023].expense, 10.0);
        assert_eq!(years[&2024].income, 30.0);
        assert_eq!(years[&2024].savings, 25.0);
    }

    #[test]
    fn test_financial_years_descending() {
        let txns = vec![
            txn("01-06-2023", 1.0, TxnType::Debit, Category::Unknown),
            txn("01-06-2025", 1.0, TxnType::Debit, Category::Unknown),
            txn("01-01-2025", 1.0, TxnType::Debit, Category::Unknown),
            txn("01-06-2024", 1.0, TxnType::Debit, Category::Unknown),
        ];
        assert_eq!(financial_years(&txns), vec![2025, 2024, 2023]);
    }

    #[test]
    fn test_transactions_by_month_exact_filter() {
        let txns = vec![
            txn("01-04-2023", 1.0, TxnType::Debit, Category::Unknown),
            txn("30-04-2023", 2.0, TxnType::Debit, Category::Unknown),
            txn("01-05-2023", 3.0, TxnType::Debit, Category::Unknown),
        ];
        let april = transactions_by_month(&txns, 2023, 4);
        assert_eq!(april.len(), 2);
        assert!(april.iter().all(|t| t.date.month() == 4));
    }

    #[test]
    fn test_all_transactions_in_key_order() {
        let mut partitions = BTreeMap::new();
        partitions.insert(
            "2023-05".to_string(),
            vec![txn("01-05-2023", 3.0, TxnType::Debit, Category::Unknown)],
        );
        partitions.insert(
            "2023-04".to_string(),
            vec![
                txn("01-04-2023", 1.0, TxnType::Debit, Category::Unknown),
                txn("30-04-2023", 2.0, TxnType::Debit, Category::Unknown),
            ],
        );
        let all = all_transactions(&partitions);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].amount, 1.0);
        assert_eq!(all[2].amount, 3.0);
    }
}
