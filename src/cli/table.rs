//! Box-drawing tables of period summaries
//!
//! One row per period, one column per accumulated total. Zero cells are
//! left blank so that sparse ledgers stay readable.

use num_traits::FromPrimitive;
use std::fmt;

use crate::record::summary::Summary;

/// Which total each table column displays
#[derive(Debug, Clone, Copy, num_derive::FromPrimitive)]
enum Column {
    Gross = 0,
    Fuel,
    Fee,
    Net,
    Km,
}

impl Column {
    const COUNT: usize = 5;

    fn label(self) -> &'static str {
        match self {
            Column::Gross => "Gross",
            Column::Fuel => "Fuel",
            Column::Fee => "Fee",
            Column::Net => "Net",
            Column::Km => "Km",
        }
    }

    fn cell(self, sum: &Summary) -> BoxFmt {
        match self {
            Column::Gross => BoxFmt::amount(sum.gross()),
            Column::Fuel => BoxFmt::amount(sum.fuel()),
            Column::Fee => BoxFmt::amount(sum.fee()),
            Column::Net => BoxFmt::amount(sum.net()),
            Column::Km => BoxFmt::distance(sum.distance()),
        }
    }
}

pub struct Table<'d> {
    data: &'d [Summary],
    title: Option<String>,
}

struct BoxFmt {
    width: usize,
    text: String,
}

struct ColFmt {
    width: usize,
    label: BoxFmt,
    boxes: Vec<BoxFmt>,
}

struct GridFmt {
    labels: ColFmt,
    columns: Vec<ColFmt>,
}

impl<'d> Table<'d> {
    pub fn from(data: &'d [Summary]) -> Self {
        Self { data, title: None }
    }

    pub fn with_title<S>(mut self, title: S) -> Self
    where
        S: ToString,
    {
        self.title = Some(title.to_string());
        self
    }

    fn to_formatter(&self) -> GridFmt {
        let cols = (0..Column::COUNT)
            .map(|i| Column::from_usize(i).unwrap())
            .map(|c| ColFmt::with_label(BoxFmt::from(c.label().to_string())))
            .collect::<Vec<_>>();
        let mut grid = GridFmt::with_columns(cols);
        for sum in self.data {
            grid.push_line(
                BoxFmt::from(format!("{}", sum.period())),
                (0..Column::COUNT)
                    .map(|i| Column::from_usize(i).unwrap().cell(sum))
                    .collect::<Vec<_>>(),
            );
        }
        grid
    }
}

impl BoxFmt {
    fn from(text: String) -> Self {
        let width = text.len();
        Self { text, width }
    }

    fn amount(a: crate::record::entry::Amount) -> Self {
        if a.nonzero() {
            Self::from(format!("{}", a))
        } else {
            Self::from(String::new())
        }
    }

    fn distance(d: crate::record::entry::Distance) -> Self {
        if d.nonzero() {
            Self::from(format!("{}", d))
        } else {
            Self::from(String::new())
        }
    }
}

impl ColFmt {
    fn with_label(label: BoxFmt) -> Self {
        Self {
            width: label.width,
            label,
            boxes: Vec::new(),
        }
    }

    fn push(&mut self, b: BoxFmt) {
        self.width = self.width.max(b.width);
        self.boxes.push(b);
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }
}

impl GridFmt {
    fn with_columns(columns: Vec<ColFmt>) -> Self {
        Self {
            labels: ColFmt::with_label(BoxFmt::from(String::new())),
            columns,
        }
    }

    fn push_line(&mut self, label: BoxFmt, boxes: Vec<BoxFmt>) {
        self.labels.push(label);
        for (i, b) in boxes.into_iter().enumerate() {
            self.columns[i].push(b);
        }
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "{}", title)?;
        }
        write!(f, "{}", self.to_formatter())
    }
}

const PADDING: &str = "                                                            ";
const HLINE: &str = "────────────────────────────────────────────────────────────";
const VLINE: &str = "│";
const ULCORNER: &str = "┌";
const URCORNER: &str = "┐";
const DLCORNER: &str = "└";
const DRCORNER: &str = "┘";
const LTJOIN: &str = "┤";
const RTJOIN: &str = "├";
const HIJOIN: &str = "┴";
const LOJOIN: &str = "┬";
const CROSS: &str = "┼";

impl GridFmt {
    /// One full horizontal border, with the given corner and join characters
    fn rule(&self, f: &mut fmt::Formatter, left: &str, join: &str, right: &str) -> fmt::Result {
        write!(f, "{}", left)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", join)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", right)
    }
}

impl fmt::Display for GridFmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.rule(f, ULCORNER, LOJOIN, URCORNER)?;
        // header line
        write!(f, "{}", VLINE)?;
        self.labels.write_label(f)?;
        for c in &self.columns {
            write!(f, "{}", VLINE)?;
            c.write_label(f)?;
        }
        writeln!(f, "{}", VLINE)?;
        self.rule(f, RTJOIN, CROSS, LTJOIN)?;
        // one line per period
        for idx in 0..self.labels.len() {
            write!(f, "{}", VLINE)?;
            self.labels.write_item(f, idx, false)?;
            for c in &self.columns {
                write!(f, "{}", VLINE)?;
                c.write_item(f, idx, true)?;
            }
            writeln!(f, "{}", VLINE)?;
        }
        self.rule(f, DLCORNER, HIJOIN, DRCORNER)
    }
}

impl ColFmt {
    fn write_label(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.label.write(f, self.width, true)
    }

    fn write_item(&self, f: &mut fmt::Formatter, idx: usize, right: bool) -> fmt::Result {
        self.boxes[idx].write(f, self.width, right)
    }

    fn hline(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // box-drawing characters are 3 bytes each
        write!(f, "{}", &HLINE[..(self.width + 2) * 3])
    }
}

impl BoxFmt {
    fn write(&self, f: &mut fmt::Formatter, width: usize, right: bool) -> fmt::Result {
        if right {
            write!(
                f,
                " {}{} ",
                &PADDING[..width.saturating_sub(self.width)],
                self.text
            )
        } else {
            write!(
                f,
                " {}{} ",
                self.text,
                &PADDING[..width.saturating_sub(self.width)]
            )
        }
    }
}
