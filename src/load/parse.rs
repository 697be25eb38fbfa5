//! Convert the text of a ledger file into a stream of entries

use pest::Parser;
use pest_derive::*;

/// Wrapper around Pest's `Pair`
type Pair<'i> = pest::iterators::Pair<'i, Rule>;
/// Wrapper around Pest's `Pairs`
type Pairs<'i> = pest::iterators::Pairs<'i, Rule>;

use chrono::NaiveDate;

use crate::load::error;
use crate::record::entry::{Amount, Distance, Entry, Tag};

/// Pest-generated parser
#[derive(Parser)]
#[grammar = "load/flagfall.pest"]
pub struct FlagfallParser;

/// Get the contents of file `path`
///
/// The return value may be non-empty even if some errors (including fatal
/// ones) occured: items that parsed correctly are kept. Caller should
/// determine success not through the return value but by querying `errs`
/// (e.g. `errs.is_fatal()`).
pub fn extract(path: &str, errs: &mut error::Record, contents: &str) -> Vec<Entry> {
    match FlagfallParser::parse(Rule::program, contents) {
        Ok(pairs) => validate(path, errs, pairs),
        Err(e) => {
            errs.make("Parsing failure").from(e.with_path(path));
            Vec::new()
        }
    }
}

// extract contents of wrapper rule
macro_rules! subrule {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No subrule"));
        if items.next().is_some() {
            panic!("Several subrules");
        }
        fst
    }};
}

// get first and rest of inner
macro_rules! decapitate {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No head"));
        (fst, items)
    }};
}

// pair to cents/hundredths contents
// safe to .unwrap() because the grammar validated the number already
macro_rules! parse_hundredths {
    ( $node:expr ) => {
        ($node.as_str().parse::<f64>().unwrap() * 100.0).round() as isize
    };
}

/// Check all years of the ledger
///
/// Sequentially validates each dated record, accumulates the correct ones
/// into the return value, records errors for the rest
pub fn validate(path: &str, errs: &mut error::Record, pairs: Pairs) -> Vec<Entry> {
    let mut entries = Vec::new();
    for pair in pairs {
        match pair.as_rule() {
            Rule::entries_year => {
                let (head, body) = decapitate!(pair);
                assert_eq!(head.as_rule(), Rule::marker_year);
                let year = head.as_str().parse::<i32>().unwrap();
                validate_year(path, errs, year, body, &mut entries);
            }
            Rule::EOI => break,
            _ => unreachable!(),
        }
    }
    entries
}

/// Check a series of entries registered under the same year marker
///
/// The month name is only shape-checked by the grammar (`Xxx`), so an
/// unknown name is reported here
fn validate_year(
    path: &str,
    errs: &mut error::Record,
    year: i32,
    pairs: Pairs,
    out: &mut Vec<Entry>,
) {
    for pair in pairs {
        assert_eq!(pair.as_rule(), Rule::entries_month);
        let (head, body) = decapitate!(pair);
        let loc = (path, head.as_span());
        let month = match month_number(head.as_str()) {
            Some(month) => month,
            None => {
                errs.make("Invalid month")
                    .nonfatal()
                    .span(&loc, "provided here")
                    .hint("months are 'Jan', 'Feb', ..., 'Dec'");
                continue;
            }
        };
        validate_month(path, errs, year, month, body, out);
    }
}

/// Check a series of entries registered under the same month marker
///
/// Date creation can fail (Feb 30 and friends); the bad day is skipped
/// with a warning and the rest of the file goes on
fn validate_month(
    path: &str,
    errs: &mut error::Record,
    year: i32,
    month: u32,
    pairs: Pairs,
    out: &mut Vec<Entry>,
) {
    'pairs: for pair in pairs {
        assert_eq!(pair.as_rule(), Rule::entries_day);
        let (head, body) = decapitate!(pair);
        let loc = (path, head.as_span());
        let day = head.as_str().parse::<u32>().unwrap();
        let date = match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => date,
            None => {
                errs.make("Invalid date")
                    .nonfatal()
                    .span(&loc, "provided here")
                    .text(format!("{}-{:02}-{:02} does not exist", year, month, day))
                    .hint("choose a date that exists");
                continue 'pairs;
            }
        };
        for item in body {
            let record = subrule!(item);
            match record.as_rule() {
                Rule::shift_entry => out.push(read_shift(date, record)),
                Rule::km_entry => out.push(read_odometer(date, record)),
                _ => unreachable!(),
            }
        }
    }
}

/// Parse one day's takings
///
/// Grammar ensures this cannot fail
fn read_shift(date: NaiveDate, pair: Pair) -> Entry {
    let mut items = pair.into_inner();
    let gross = Amount(parse_hundredths!(items.next().unwrap()));
    let fuel = Amount(parse_hundredths!(items.next().unwrap()));
    let fee = Amount(parse_hundredths!(items.next().unwrap()));
    let tag = items.next().map(|t| Tag(subrule!(t).as_str().to_string()));
    Entry::Shift {
        date,
        gross,
        fuel,
        fee,
        tag,
    }
}

/// Parse a meter distance record
///
/// Grammar ensures this cannot fail
fn read_odometer(date: NaiveDate, pair: Pair) -> Entry {
    let km = subrule!(pair);
    Entry::Odometer {
        date,
        km: Distance(parse_hundredths!(km)),
    }
}

/// Translate a 3-letter month name, `None` if not one of the twelve
fn month_number(s: &str) -> Option<u32> {
    Some(match s {
        "Jan" => 1,
        "Feb" => 2,
        "Mar" => 3,
        "Apr" => 4,
        "May" => 5,
        "Jun" => 6,
        "Jul" => 7,
        "Aug" => 8,
        "Sep" => 9,
        "Oct" => 10,
        "Nov" => 11,
        "Dec" => 12,
        _ => return None,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! dt {
        ( $y:expr, $m:expr, $d:expr ) => {
            NaiveDate::from_ymd_opt($y, $m, $d).unwrap()
        };
    }

    fn parse(contents: &str) -> (Vec<Entry>, error::Record) {
        let mut errs = error::Record::new();
        let entries = extract("test.fall", &mut errs, contents);
        (entries, errs)
    }

    #[test]
    fn well_formed_ledger() {
        let (entries, errs) = parse(
            "2025:
              Aug:
                11: shift 245.50 fuel 38.20 fee 36.80 \"weekday\";
                    km 187.3;
                12: shift 198 fuel 30.0 fee 29.70;
            ",
        );
        assert!(!errs.is_fatal());
        assert_eq!(
            entries,
            vec![
                Entry::Shift {
                    date: dt!(2025, 8, 11),
                    gross: Amount(24550),
                    fuel: Amount(3820),
                    fee: Amount(3680),
                    tag: Some(Tag("weekday".to_string())),
                },
                Entry::Odometer {
                    date: dt!(2025, 8, 11),
                    km: Distance(18730),
                },
                Entry::Shift {
                    date: dt!(2025, 8, 12),
                    gross: Amount(19800),
                    fuel: Amount(3000),
                    fee: Amount(2970),
                    tag: None,
                },
            ]
        );
    }

    #[test]
    fn comments_and_empty_file() {
        let (entries, errs) = parse("// nothing yet\n");
        assert!(!errs.is_fatal());
        assert!(entries.is_empty());
    }

    #[test]
    fn invalid_date_skips_day_only() {
        let (entries, errs) = parse(
            "2025:
              Feb:
                30: shift 100 fuel 10 fee 5;
                28: km 42.5;
            ",
        );
        // Feb 30 is reported as a warning, Feb 28 survives
        assert!(!errs.is_fatal());
        assert_eq!(errs.count_warnings(), 1);
        assert_eq!(
            entries,
            vec![Entry::Odometer {
                date: dt!(2025, 2, 28),
                km: Distance(4250),
            }]
        );
    }

    #[test]
    fn invalid_month_is_reported() {
        let (entries, errs) = parse(
            "2025:
              Xyz:
                11: km 10;
            ",
        );
        assert!(!errs.is_fatal());
        assert_eq!(errs.count_warnings(), 1);
        assert!(entries.is_empty());
    }

    #[test]
    fn syntax_error_is_fatal() {
        let (entries, errs) = parse("2025:\n  Aug:\n    11: shift oops;\n");
        assert!(errs.is_fatal());
        assert!(entries.is_empty());
    }
}
