//! Command-line interface
//!
//! `rates` prices the legs of a working day, `floor` computes the minimum
//! viable rate over useful kilometers, `quote` gives a flat fare, and
//! `report` aggregates the shift ledger into tables and plots.

mod cli;
mod load;
mod record;
mod tariff;

use clap::{crate_version, value_t, App, AppSettings, Arg, ArgMatches, SubCommand};

use chrono::NaiveDate;

use cli::{plot::Plotter, table::Table};
use record::summary::{Calendar, Period, Step};
use tariff::{Consumption, DayPlan, FuelPrice};

fn main() {
    let matches = App::new("flagfall")
        .about("Taxi tariff calculator and shift ledger")
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(plan_args(
            SubCommand::with_name("rates")
                .about("Price the trip and pickup legs of a working day")
                .arg(
                    Arg::with_name("trip")
                        .long("trip")
                        .value_name("KM")
                        .required(true)
                        .help("Distance with a paying passenger"),
                )
                .arg(
                    Arg::with_name("pickup")
                        .long("pickup")
                        .value_name("KM")
                        .default_value("0")
                        .help("Distance to reach the passenger, no fare running"),
                ),
        ))
        .subcommand(plan_args(
            SubCommand::with_name("floor")
                .about("Minimum viable price per useful kilometer")
                .arg(
                    Arg::with_name("useful")
                        .long("useful")
                        .value_name("KM")
                        .required(true)
                        .help("Fare-generating distance per day"),
                )
                .arg(
                    Arg::with_name("factor")
                        .long("factor")
                        .value_name("F")
                        .help("Real km driven per useful km [default: 1]"),
                ),
        ))
        .subcommand(
            SubCommand::with_name("quote")
                .about("Flat fare for a single ride")
                .arg(
                    Arg::with_name("rate")
                        .long("rate")
                        .value_name("PRICE")
                        .required(true)
                        .help("Price per kilometer"),
                )
                .arg(
                    Arg::with_name("pickup")
                        .long("pickup")
                        .value_name("KM")
                        .default_value("0")
                        .help("Distance to reach the passenger"),
                )
                .arg(
                    Arg::with_name("trip")
                        .long("trip")
                        .value_name("KM")
                        .default_value("0")
                        .help("Distance of the ride itself"),
                ),
        )
        .subcommand(
            SubCommand::with_name("report")
                .about("Aggregate the shift ledger into tables")
                .arg(Arg::with_name("FILE").help("Ledger file [default: shifts.fall]"))
                .arg(
                    Arg::with_name("from")
                        .long("from")
                        .value_name("YYYY-MM-DD")
                        .help("Ignore entries before this date"),
                )
                .arg(
                    Arg::with_name("to")
                        .long("to")
                        .value_name("YYYY-MM-DD")
                        .help("Ignore entries after this date"),
                )
                .arg(
                    Arg::with_name("plot")
                        .long("plot")
                        .value_name("SVG")
                        .help("Also write a stacked daily plot to this file"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("rates", Some(sub)) => run_rates(sub),
        ("floor", Some(sub)) => run_floor(sub),
        ("quote", Some(sub)) => run_quote(sub),
        ("report", Some(sub)) => run_report(sub),
        _ => unreachable!(),
    }
}

/// Cost and goal flags shared by the `rates` and `floor` calculators
fn plan_args<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(
        Arg::with_name("goal")
            .long("goal")
            .value_name("AMOUNT")
            .required(true)
            .help("Monthly net income goal"),
    )
    .arg(
        Arg::with_name("days")
            .long("days")
            .value_name("N")
            .required(true)
            .help("Working days per month"),
    )
    .arg(
        Arg::with_name("commission")
            .long("commission")
            .value_name("PCT")
            .default_value("0")
            .help("Platform commission in percent"),
    )
    .arg(
        Arg::with_name("consumption")
            .long("consumption")
            .value_name("VOL")
            .required(true)
            .help("Fuel burned over 100km"),
    )
    .arg(
        Arg::with_name("consumption-unit")
            .long("consumption-unit")
            .possible_values(&["liters", "gallons"])
            .default_value("liters"),
    )
    .arg(
        Arg::with_name("fuel-price")
            .long("fuel-price")
            .value_name("PRICE")
            .required(true)
            .help("Price of fuel at the pump"),
    )
    .arg(
        Arg::with_name("price-unit")
            .long("price-unit")
            .possible_values(&["liter", "gallon"])
            .default_value("liter"),
    )
}

/// Build the day plan out of the shared flags
fn read_plan(matches: &ArgMatches) -> DayPlan {
    let consumption = value_t!(matches, "consumption", f64).unwrap_or_else(|e| e.exit());
    let consumption = match matches.value_of("consumption-unit") {
        Some("gallons") => Consumption::GallonsPer100Km(consumption),
        _ => Consumption::LitersPer100Km(consumption),
    };
    let fuel_price = value_t!(matches, "fuel-price", f64).unwrap_or_else(|e| e.exit());
    let fuel_price = match matches.value_of("price-unit") {
        Some("gallon") => FuelPrice::PerGallon(fuel_price),
        _ => FuelPrice::PerLiter(fuel_price),
    };
    DayPlan {
        monthly_net_goal: value_t!(matches, "goal", f64).unwrap_or_else(|e| e.exit()),
        working_days: value_t!(matches, "days", u32).unwrap_or_else(|e| e.exit()),
        commission_percent: value_t!(matches, "commission", f64).unwrap_or_else(|e| e.exit()),
        consumption,
        fuel_price,
    }
}

/// One output line with the value in a fixed right-aligned column
fn row(label: &str, precision: usize, value: f64) -> String {
    format!("  {:<18}{:>12.*}", label, precision, value)
}

fn run_rates(matches: &ArgMatches) {
    let plan = read_plan(matches);
    let trip = value_t!(matches, "trip", f64).unwrap_or_else(|e| e.exit());
    let pickup = value_t!(matches, "pickup", f64).unwrap_or_else(|e| e.exit());
    let rates = plan.leg_rates(trip, pickup);
    let commission = format!("commission ({:.1}%)", plan.commission_percent);
    println!("Daily summary");
    println!("{}", row("net goal", 2, rates.daily_net_goal));
    println!("{}", row("total km", 2, rates.total_km));
    println!("{}", row("cost per km", 4, rates.cost_per_km));
    println!("{}", row("fuel cost", 2, rates.fuel_cost_per_day));
    println!("{}", row("gross income", 2, rates.gross_income_per_day));
    println!("{}", row(&commission, 2, rates.commission_amount));
    println!("Rates per km");
    println!("{}", row("trip", 3, rates.price_per_km_trip));
    println!("{}", row("pickup", 3, rates.price_per_km_pickup));
    println!("{}", row("blended", 3, rates.blended_price_per_km));
}

fn run_floor(matches: &ArgMatches) {
    let plan = read_plan(matches);
    let useful = value_t!(matches, "useful", f64).unwrap_or_else(|e| e.exit());
    let factor = if matches.is_present("factor") {
        Some(value_t!(matches, "factor", f64).unwrap_or_else(|e| e.exit()))
    } else {
        None
    };
    let floor = plan.floor_rate(useful, factor);
    let commission = format!("commission ({:.1}%)", plan.commission_percent);
    println!("Daily summary");
    println!("{}", row("net goal", 2, floor.daily_net_goal));
    println!("{}", row("real km", 2, floor.real_km));
    println!("{}", row("cost per km", 4, floor.cost_per_km));
    println!("{}", row("fuel cost", 2, floor.fuel_cost_per_day));
    println!("{}", row("gross income", 2, floor.gross_income_per_day));
    println!("{}", row(&commission, 2, floor.commission_amount));
    println!("Minimum rate");
    println!("{}", row("per useful km", 3, floor.price_per_useful_km));
}

fn run_quote(matches: &ArgMatches) {
    let rate = value_t!(matches, "rate", f64).unwrap_or_else(|e| e.exit());
    let pickup = value_t!(matches, "pickup", f64).unwrap_or_else(|e| e.exit());
    let trip = value_t!(matches, "trip", f64).unwrap_or_else(|e| e.exit());
    println!(
        "{:.2} km at {:.2}/km: {:.2}",
        pickup + trip,
        rate,
        tariff::flat_fare(rate, pickup, trip)
    );
}

fn run_report(matches: &ArgMatches) {
    let filename = matches.value_of("FILE").unwrap_or("shifts.fall");
    let mut errs = load::error::Record::new();
    let entries = load::read_entries(filename, &mut errs);
    print!("{}", errs);
    let entries = match entries {
        Some(entries) => entries,
        None => std::process::exit(1),
    };
    let covered = match Period::covering(&entries) {
        Some(covered) => covered,
        None => {
            println!("Ledger '{}' has no entries yet", filename);
            return;
        }
    };
    let from = read_date(matches, "from").unwrap_or(covered.0);
    let to = read_date(matches, "to").unwrap_or(covered.1);
    if from > to {
        eprintln!("Empty range: {} is after {}", from, to);
        std::process::exit(1);
    }
    let period = Period(from, to);
    let entries = period.restrict(entries);
    let mut cal_day = Calendar::from_spacing(period, Step::Day, 1);
    let mut cal_week = Calendar::from_spacing(period, Step::Week, 1);
    let mut cal_month = Calendar::from_spacing(period, Step::Month, 1);
    let mut cal_year = Calendar::from_spacing(period, Step::Year, 1);
    cal_day.register(&entries);
    cal_week.register(&entries);
    cal_month.register(&entries);
    cal_year.register(&entries);
    println!("{}", Table::from(cal_week.contents()).with_title("Weekly"));
    println!("{}", Table::from(cal_month.contents()).with_title("Monthly"));
    println!("{}", Table::from(cal_year.contents()).with_title("Yearly"));
    if let Some(out) = matches.value_of("plot") {
        if let Err(e) = Plotter::from(cal_day.contents()).save_stacked(out) {
            eprintln!("Cannot write plot '{}': {}", out, e);
            std::process::exit(1);
        }
    }
}

/// Parse an optional `YYYY-MM-DD` bound for the report range
fn read_date(matches: &ArgMatches, name: &str) -> Option<NaiveDate> {
    let s = matches.value_of(name)?;
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            eprintln!("'{}' is not a valid date (expected YYYY-MM-DD)", s);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod test {
    use super::row;

    #[test]
    fn rows_share_the_value_column() {
        let plain = row("net goal", 2, 150.0);
        let pct = row(&format!("commission ({:.1}%)", 15.0), 2, 27.71);
        assert_eq!(plain.len(), pct.len());
        assert!(plain.ends_with("150.00"));
        assert!(pct.ends_with("27.71"));
    }
}
