//! Ledger records: money, distance, and the two kinds of entries
//!
//! Amounts are stored in cents and distances in hundredths of a kilometer,
//! so that per-day accumulation is exact and the derived net income matches
//! a round-to-two-decimals computation.

use std::fmt;
use std::ops;

use chrono::NaiveDate;

/// An amount of money in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(pub isize);

/// A distance in hundredths of a kilometer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Distance(pub isize);

/// Free-form label attached to a shift record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag(pub String);

impl Amount {
    pub fn nonzero(self) -> bool {
        self.0 != 0
    }
}

impl Distance {
    pub fn nonzero(self) -> bool {
        self.0 != 0
    }
}

macro_rules! hundredths_arith {
    ( $T:ident ) => {
        impl ops::Add for $T {
            type Output = Self;
            fn add(self, other: Self) -> Self {
                Self(self.0 + other.0)
            }
        }

        impl ops::Sub for $T {
            type Output = Self;
            fn sub(self, other: Self) -> Self {
                Self(self.0 - other.0)
            }
        }

        impl ops::AddAssign for $T {
            fn add_assign(&mut self, other: Self) {
                self.0 += other.0;
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let sign = if self.0 < 0 { "-" } else { "" };
                let abs = self.0.abs();
                write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
            }
        }
    };
}

hundredths_arith!(Amount);
hundredths_arith!(Distance);

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single ledger record, attached to the day it was made
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// One day's takings: gross income and what fuel and the platform
    /// took out of it
    Shift {
        date: NaiveDate,
        gross: Amount,
        fuel: Amount,
        fee: Amount,
        tag: Option<Tag>,
    },
    /// A trip-distance record from the meter
    Odometer { date: NaiveDate, km: Distance },
}

impl Entry {
    pub fn date(&self) -> NaiveDate {
        match self {
            Entry::Shift { date, .. } => *date,
            Entry::Odometer { date, .. } => *date,
        }
    }

    /// What is left of the gross once fuel and commission are paid
    ///
    /// Distance records carry no money and net out to zero.
    pub fn net(&self) -> Amount {
        match self {
            Entry::Shift {
                gross, fuel, fee, ..
            } => *gross - *fuel - *fee,
            Entry::Odometer { .. } => Amount(0),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! dt {
        ( $y:expr, $m:expr, $d:expr ) => {
            NaiveDate::from_ymd_opt($y, $m, $d).unwrap()
        };
    }

    #[test]
    fn display_hundredths() {
        assert_eq!(format!("{}", Amount(24550)), "245.50");
        assert_eq!(format!("{}", Amount(7)), "0.07");
        assert_eq!(format!("{}", Amount(-305)), "-3.05");
        assert_eq!(format!("{}", Distance(18730)), "187.30");
    }

    #[test]
    fn net_of_a_shift() {
        let entry = Entry::Shift {
            date: dt!(2025, 8, 11),
            gross: Amount(24550),
            fuel: Amount(3820),
            fee: Amount(3680),
            tag: None,
        };
        assert_eq!(entry.net(), Amount(17050));
    }

    #[test]
    fn net_can_go_negative() {
        let entry = Entry::Shift {
            date: dt!(2025, 8, 11),
            gross: Amount(1000),
            fuel: Amount(2500),
            fee: Amount(150),
            tag: None,
        };
        assert_eq!(entry.net(), Amount(-1650));
    }

    #[test]
    fn odometer_nets_zero() {
        let entry = Entry::Odometer {
            date: dt!(2025, 8, 11),
            km: Distance(18730),
        };
        assert_eq!(entry.net(), Amount(0));
    }
}
