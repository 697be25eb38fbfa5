//! Stacked SVG plot of ledger summaries
//!
//! Each period contributes a horizontal band; stacking fuel, fee and net
//! on top of each other recomposes the gross income visually.

use chrono::{Datelike, NaiveDate};
use svg::{
    node::element::{path::Data, Line, Path},
    Document,
};

use crate::record::entry::Amount;
use crate::record::summary::{Period, Summary};

pub struct Plotter<'d> {
    data: &'d [Summary],
}

impl<'d> Plotter<'d> {
    pub fn from(data: &'d [Summary]) -> Self {
        Self { data }
    }

    /// Render the stacked fuel/fee/net decomposition of gross income
    pub fn save_stacked(&self, file: &str) -> std::io::Result<()> {
        self.stacked_plot().to_band_drawer().render(file)
    }

    fn stacked_plot(&self) -> Plot<Period, CumulativeEntry<Amount>> {
        let mut plot = Plot::new();
        for sum in self.data {
            plot.push(
                sum.period(),
                CumulativeEntry::cumul(vec![Amount(0), sum.fuel(), sum.fee(), sum.net()]),
            );
        }
        plot
    }
}

#[derive(Debug)]
pub struct Plot<X, Y> {
    data: Vec<(X, Y)>,
}

impl<X, Y> Plot<X, Y> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn push(&mut self, x: X, y: Y) {
        self.data.push((x, y));
    }
}

impl<X, Y> Default for Plot<X, Y> {
    fn default() -> Self {
        Self::new()
    }
}

/// Running sums of a group of values, so that each level of the plot
/// sits on top of the previous one
#[derive(Debug)]
struct CumulativeEntry<Y> {
    points: Vec<Y>,
}

impl<Y> CumulativeEntry<Y>
where
    Y: std::ops::AddAssign + Clone,
{
    fn cumul(mut points: Vec<Y>) -> Self {
        for i in 1..points.len() {
            let prev = points[i - 1].clone();
            points[i] += prev;
        }
        Self { points }
    }
}

pub trait Scalar {
    fn to_scalar(&self) -> i64;
}

pub trait ScalarRange {
    fn to_range(&self) -> (i64, i64);
}

pub trait ScalarGroup {
    fn to_group(&self) -> Vec<i64>;
}

impl Scalar for Amount {
    fn to_scalar(&self) -> i64 {
        self.0 as i64
    }
}

impl Scalar for NaiveDate {
    fn to_scalar(&self) -> i64 {
        i64::from(self.num_days_from_ce())
    }
}

impl ScalarRange for Period {
    // half-open on the right so that single-day periods keep a width
    fn to_range(&self) -> (i64, i64) {
        (self.0.to_scalar(), self.1.to_scalar() + 1)
    }
}

impl<Y> ScalarGroup for CumulativeEntry<Y>
where
    Y: Scalar,
{
    fn to_group(&self) -> Vec<i64> {
        self.points.iter().map(|p| p.to_scalar()).collect::<Vec<_>>()
    }
}

impl<X, Y> Plot<X, Y>
where
    X: ScalarRange,
    Y: ScalarGroup,
{
    fn to_band_drawer(&self) -> BandDrawer {
        BandDrawer {
            points: self
                .data
                .iter()
                .map(|(x, y)| (x.to_range(), y.to_group()))
                .collect::<Vec<_>>(),
        }
    }
}

#[derive(Debug)]
struct BandDrawer {
    points: Vec<((i64, i64), Vec<i64>)>,
}

const FWIDTH: f64 = 1000.0;
const FHEIGHT: f64 = 700.0;
const MARGIN: f64 = 20.0;
const STROKE_WIDTH: f64 = 2.0;

// fuel, fee, net
const COLORS: &[&str] = &["firebrick", "goldenrod", "seagreen"];

impl BandDrawer {
    fn render(&self, file: &str) -> std::io::Result<()> {
        if self.points.is_empty() {
            return svg::save(file, &Document::new());
        }
        let (xmin, ymin, width, height) = {
            let mut xmin = i64::MAX;
            let mut ymin = i64::MAX;
            let mut xmax = i64::MIN;
            let mut ymax = i64::MIN;
            for ((start, end), group) in &self.points {
                xmin = xmin.min(*start);
                xmax = xmax.max(*end);
                for pt in group {
                    ymin = ymin.min(*pt);
                    ymax = ymax.max(*pt);
                }
            }
            (xmin, ymin, (xmax - xmin).max(1), (ymax - ymin).max(1))
        };
        let resize_x = |x: i64| (x - xmin) as f64 / width as f64 * FWIDTH;
        let resize_y = |y: i64| (height - (y - ymin)) as f64 / height as f64 * FHEIGHT;
        let levels = self.points[0].1.len();
        let mut document = Document::new();
        for lvl in 0..levels.saturating_sub(1) {
            // forward along the lower level, back along the upper one
            let (first_range, first_group) = &self.points[0];
            let mut band =
                Data::new().move_to((resize_x(first_range.0), resize_y(first_group[lvl])));
            for ((start, end), group) in &self.points {
                band = band
                    .line_to((resize_x(*start), resize_y(group[lvl])))
                    .line_to((resize_x(*end), resize_y(group[lvl])));
            }
            for ((start, end), group) in self.points.iter().rev() {
                band = band
                    .line_to((resize_x(*end), resize_y(group[lvl + 1])))
                    .line_to((resize_x(*start), resize_y(group[lvl + 1])));
            }
            document = document.add(
                Path::new()
                    .set("fill", COLORS[lvl % COLORS.len()])
                    .set("d", band.close()),
            );
        }
        let yaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", 0.0)
            .set("y1", 0.0)
            .set("y2", FHEIGHT)
            .set("stroke", "black")
            .set("stroke-width", STROKE_WIDTH);
        let xaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", FWIDTH)
            .set("y1", resize_y(0))
            .set("y2", resize_y(0))
            .set("stroke", "black")
            .set("stroke-width", STROKE_WIDTH);
        let document = document.add(yaxis).add(xaxis).set(
            "viewBox",
            (-MARGIN, -MARGIN, FWIDTH + 2.0 * MARGIN, FHEIGHT + 2.0 * MARGIN),
        );
        svg::save(file, &document)
    }
}
