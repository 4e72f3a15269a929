//! khata-ingest: bank-statement text reassembly, field extraction,
//! classification, and month partitioning.

pub mod classify;
pub mod dedupe;
pub mod extract;
pub mod reassemble;
pub mod statement;

pub use dedupe::{dedupe, partition_by_month};
pub use reassemble::record_blocks;
pub use statement::StatementParser;
