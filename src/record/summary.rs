//! Aggregation of ledger entries over calendar periods
//!
//! A `Calendar` is a sequence of disjoint, increasing periods; registering
//! the entry list accumulates each entry into every period that contains
//! its date. Periods are aligned on natural boundaries (Monday, first of
//! the month, Jan 1) so that a weekly table reads as actual weeks.

use std::fmt;
use std::ops;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::record::entry::{Amount, Distance, Entry};

/// An inclusive range of days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period(pub NaiveDate, pub NaiveDate);

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0 <= date && date <= self.1
    }

    /// Keep only the entries dated within this period
    ///
    /// Calendars aligned on natural boundaries reach past the requested
    /// bounds, so bounding a report means dropping the entries themselves.
    pub fn restrict(&self, entries: Vec<Entry>) -> Vec<Entry> {
        entries
            .into_iter()
            .filter(|e| self.contains(e.date()))
            .collect()
    }

    /// Smallest period containing every entry, `None` when there are none
    pub fn covering(entries: &[Entry]) -> Option<Self> {
        let mut dates = entries.iter().map(Entry::date);
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Period(min, max))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == self.1 {
            write!(f, "{}", self.0.format("%Y-%b-%d"))
        } else {
            write!(
                f,
                "{}..{}",
                self.0.format("%Y-%b-%d"),
                self.1.format("%Y-%b-%d")
            )
        }
    }
}

/// Totals accumulated over one period
#[derive(Debug, Clone)]
pub struct Summary {
    period: Period,
    gross: Amount,
    fuel: Amount,
    fee: Amount,
    net: Amount,
    distance: Distance,
}

impl Summary {
    pub fn over(period: Period) -> Self {
        Self {
            period,
            gross: Amount(0),
            fuel: Amount(0),
            fee: Amount(0),
            net: Amount(0),
            distance: Distance(0),
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn gross(&self) -> Amount {
        self.gross
    }

    pub fn fuel(&self) -> Amount {
        self.fuel
    }

    pub fn fee(&self) -> Amount {
        self.fee
    }

    pub fn net(&self) -> Amount {
        self.net
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }
}

impl ops::AddAssign<&Entry> for Summary {
    fn add_assign(&mut self, entry: &Entry) {
        if !self.period.contains(entry.date()) {
            return;
        }
        match entry {
            Entry::Shift {
                gross, fuel, fee, ..
            } => {
                self.gross += *gross;
                self.fuel += *fuel;
                self.fee += *fee;
                self.net += entry.net();
            }
            Entry::Odometer { km, .. } => {
                self.distance += *km;
            }
        }
    }
}

/// Spacing between consecutive summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Day,
    Week,
    Month,
    Year,
}

impl Step {
    /// Snap a date back to the boundary this step starts on
    fn align(self, date: NaiveDate) -> NaiveDate {
        match self {
            Step::Day => date,
            Step::Week => date - Days::new(u64::from(date.weekday().num_days_from_monday())),
            // day 1 and Jan 1 exist in every month/year
            Step::Month => date.with_day(1).unwrap(),
            Step::Year => date.with_day(1).unwrap().with_month(1).unwrap(),
        }
    }

    /// `count` steps after the given date
    fn jump(self, date: NaiveDate, count: usize) -> NaiveDate {
        match self {
            Step::Day => date + Days::new(count as u64),
            Step::Week => date + Days::new(7 * count as u64),
            Step::Month => date + Months::new(count as u32),
            Step::Year => date + Months::new(12 * count as u32),
        }
    }
}

/// A collection of disjoint ordered summaries
#[derive(Debug)]
pub struct Calendar {
    items: Vec<Summary>,
}

impl Calendar {
    /// Construct from a starting point and a step function
    pub fn from_step<F>(mut start: NaiveDate, step: F) -> Self
    where
        F: Fn(NaiveDate) -> Option<NaiveDate>,
    {
        let mut items = Vec::new();
        while let Some(end) = step(start) {
            assert!(start < end);
            items.push(Summary::over(Period(start, end - Days::new(1))));
            start = end;
        }
        Self { items }
    }

    /// Evenly spaced periods covering `period`, aligned to `step` boundaries
    ///
    /// The last period may extend past the end of `period` so that no entry
    /// within it is dropped.
    pub fn from_spacing(period: Period, step: Step, count: usize) -> Self {
        Self::from_step(step.align(period.0), |date| {
            if date > period.1 {
                None
            } else {
                Some(step.jump(date, count))
            }
        })
    }

    /// Accumulate all entries into all summaries
    pub fn register(&mut self, entries: &[Entry]) {
        for entry in entries {
            for sum in &mut self.items {
                *sum += entry;
            }
        }
    }

    pub fn contents(&self) -> &[Summary] {
        &self.items
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::record::entry::Tag;

    macro_rules! dt {
        ( $y:expr, $m:expr, $d:expr ) => {
            NaiveDate::from_ymd_opt($y, $m, $d).unwrap()
        };
    }

    fn shift(date: NaiveDate, gross: isize, fuel: isize, fee: isize) -> Entry {
        Entry::Shift {
            date,
            gross: Amount(gross),
            fuel: Amount(fuel),
            fee: Amount(fee),
            tag: Some(Tag("test".to_string())),
        }
    }

    #[test]
    fn week_aligned_to_monday() {
        // 2025-Aug-13 is a Wednesday
        let cal = Calendar::from_spacing(
            Period(dt!(2025, 8, 13), dt!(2025, 8, 20)),
            Step::Week,
            1,
        );
        let periods = cal.contents().iter().map(|s| s.period()).collect::<Vec<_>>();
        assert_eq!(
            periods,
            vec![
                Period(dt!(2025, 8, 11), dt!(2025, 8, 17)),
                Period(dt!(2025, 8, 18), dt!(2025, 8, 24)),
            ]
        );
    }

    #[test]
    fn month_covers_tail() {
        let cal = Calendar::from_spacing(
            Period(dt!(2025, 7, 20), dt!(2025, 9, 2)),
            Step::Month,
            1,
        );
        let periods = cal.contents().iter().map(|s| s.period()).collect::<Vec<_>>();
        assert_eq!(
            periods,
            vec![
                Period(dt!(2025, 7, 1), dt!(2025, 7, 31)),
                Period(dt!(2025, 8, 1), dt!(2025, 8, 31)),
                Period(dt!(2025, 9, 1), dt!(2025, 9, 30)),
            ]
        );
    }

    #[test]
    fn register_buckets_by_date() {
        let entries = vec![
            shift(dt!(2025, 8, 11), 24550, 3820, 3680),
            shift(dt!(2025, 8, 18), 19800, 3000, 2970),
            Entry::Odometer {
                date: dt!(2025, 8, 11),
                km: Distance(18730),
            },
        ];
        let mut cal = Calendar::from_spacing(
            Period(dt!(2025, 8, 11), dt!(2025, 8, 24)),
            Step::Week,
            1,
        );
        cal.register(&entries);
        let weeks = cal.contents();
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].gross(), Amount(24550));
        assert_eq!(weeks[0].net(), Amount(17050));
        assert_eq!(weeks[0].distance(), Distance(18730));
        assert_eq!(weeks[1].gross(), Amount(19800));
        assert_eq!(weeks[1].net(), Amount(13830));
        assert_eq!(weeks[1].distance(), Distance(0));
    }

    #[test]
    fn restrict_bounds_the_totals() {
        let bound = Period(dt!(2025, 8, 11), dt!(2025, 8, 20));
        // the second week's period runs to Aug 24, past the bound
        let entries = bound.restrict(vec![
            shift(dt!(2025, 8, 14), 10000, 0, 0),
            shift(dt!(2025, 8, 22), 10000, 0, 0),
        ]);
        let mut cal = Calendar::from_spacing(bound, Step::Week, 1);
        cal.register(&entries);
        let total: isize = cal.contents().iter().map(|s| s.gross().0).sum();
        assert_eq!(total, 10000);
    }

    #[test]
    fn covering_range() {
        let entries = vec![
            shift(dt!(2025, 8, 18), 100, 0, 0),
            shift(dt!(2025, 8, 11), 100, 0, 0),
            shift(dt!(2025, 8, 14), 100, 0, 0),
        ];
        assert_eq!(
            Period::covering(&entries),
            Some(Period(dt!(2025, 8, 11), dt!(2025, 8, 18)))
        );
        assert_eq!(Period::covering(&[]), None);
    }
}
