//! khata-core: transaction types and aggregation helpers for the khata pipeline.

pub mod stats;
pub mod transaction;

pub use stats::{
    FlowStat, all_transactions, category_stats, financial_years, monthly_stats,
    transactions_by_month, yearly_stats,
};
pub use transaction::{BankIdentity, Category, Transaction, TxnType};
