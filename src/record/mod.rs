//! Ledger values and their aggregation
//!
//! Entry definition, exact cent/centi-km arithmetic, calendar summaries

pub mod entry;
pub mod summary;
