//! Ledger file loading: grammar, validation, error reporting

pub mod error;
pub mod parse;

use crate::record::entry::Entry;

/// Read a ledger file into entries
///
/// Fatal errors yield `None`; either way the details are left in `errs`
/// for the caller to display.
pub fn read_entries(filename: &str, errs: &mut error::Record) -> Option<Vec<Entry>> {
    let contents = match std::fs::read_to_string(filename) {
        Ok(contents) => contents,
        Err(_) => {
            errs.make("File not found")
                .text(format!("Cannot read ledger '{}'", filename))
                .hint("create the file or pass another path");
            return None;
        }
    };
    let entries = parse::extract(filename, errs, &contents);
    if errs.is_fatal() {
        None
    } else {
        Some(entries)
    }
}
