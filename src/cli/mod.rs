//! Terminal and SVG output of the aggregated ledger

pub mod plot;
pub mod table;
