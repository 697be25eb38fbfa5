//! Per-kilometer tariff derivation
//!
//! Maps a driver's cost and goal parameters (monthly net goal, platform
//! commission, fuel consumption and price) to the rates they need to charge.
//!
//! Everything here is a pure computation on plain numbers: no dates, no
//! ledger, no I/O. Divisions whose denominator can reach zero (working days,
//! trip distance, commission at 100%) degrade to a zero result instead of
//! failing, since a form half-filled with zeroes is a normal intermediate
//! state for the caller.

pub mod fuel;

pub use fuel::{Consumption, FuelPrice};

/// Pickup legs are billed at 80% of raw operating cost: no fare is running,
/// the flat 20% discount is a product decision carried over as-is
pub const PICKUP_DISCOUNT: f64 = 0.8;

/// Cost and goal parameters for an average working day
///
/// The distances driven vary per query and are passed to the individual
/// calculators instead.
#[derive(Debug, Clone, Copy)]
pub struct DayPlan {
    /// net income to clear over a month, in currency units
    pub monthly_net_goal: f64,
    /// days worked per month
    pub working_days: u32,
    /// cut taken by the dispatch platform, in [0, 100)
    pub commission_percent: f64,
    pub consumption: Consumption,
    pub fuel_price: FuelPrice,
}

/// Full per-leg pricing for a day made of a paying trip and an unpaid pickup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegRates {
    pub daily_net_goal: f64,
    pub total_km: f64,
    pub cost_per_km: f64,
    pub fuel_cost_per_day: f64,
    pub gross_income_per_day: f64,
    pub commission_amount: f64,
    pub price_per_km_trip: f64,
    pub price_per_km_pickup: f64,
    pub blended_price_per_km: f64,
}

/// Minimum viable rate over useful (fare-generating) kilometers
///
/// The search factor scales useful km up to the real distance driven,
/// accounting for empty cruising between fares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorRate {
    pub daily_net_goal: f64,
    pub real_km: f64,
    pub cost_per_km: f64,
    pub fuel_cost_per_day: f64,
    pub gross_income_per_day: f64,
    pub commission_amount: f64,
    pub price_per_useful_km: f64,
}

impl DayPlan {
    /// Operating cost of driving one kilometer
    pub fn cost_per_km(&self) -> f64 {
        let liters_per_km = self.consumption.liters_per_100km() / 100.0;
        liters_per_km * self.fuel_price.per_liter()
    }

    /// Net income to clear on an average day
    pub fn daily_net_goal(&self) -> f64 {
        if self.working_days > 0 {
            self.monthly_net_goal / self.working_days as f64
        } else {
            0.0
        }
    }

    /// Gross income needed for the daily goal to survive fuel and commission
    ///
    /// Zero once commission reaches 100%: no gross income compensates the
    /// platform taking everything.
    fn gross_income(&self, fuel_cost: f64) -> f64 {
        if self.commission_percent < 100.0 {
            (self.daily_net_goal() + fuel_cost) / (1.0 - self.commission_percent / 100.0)
        } else {
            0.0
        }
    }

    /// Price the two legs of a day's driving
    pub fn leg_rates(&self, trip_km: f64, pickup_km: f64) -> LegRates {
        let cost_per_km = self.cost_per_km();
        let total_km = trip_km + pickup_km;
        let fuel_cost_per_day = cost_per_km * total_km;
        let daily_net_goal = self.daily_net_goal();
        let gross_income_per_day = self.gross_income(fuel_cost_per_day);
        let commission_amount = gross_income_per_day * (self.commission_percent / 100.0);
        // the paying leg recovers the whole gross income plus the operating
        // cost of the unpaid pickup leg
        let pickup_cost = cost_per_km * pickup_km;
        let price_per_km_trip = if trip_km > 0.0 {
            (gross_income_per_day + pickup_cost) / trip_km
        } else {
            0.0
        };
        let price_per_km_pickup = cost_per_km * PICKUP_DISCOUNT;
        let blended_price_per_km = if total_km > 0.0 {
            (price_per_km_trip * trip_km + price_per_km_pickup * pickup_km) / total_km
        } else {
            0.0
        };
        LegRates {
            daily_net_goal,
            total_km,
            cost_per_km,
            fuel_cost_per_day,
            gross_income_per_day,
            commission_amount,
            price_per_km_trip,
            price_per_km_pickup,
            blended_price_per_km,
        }
    }

    /// Lowest rate per useful km that still meets the daily goal
    ///
    /// `factor` estimates how many kilometers are really driven per useful
    /// kilometer; when absent, useful and real distance coincide.
    pub fn floor_rate(&self, useful_km: f64, factor: Option<f64>) -> FloorRate {
        let real_km = useful_km * factor.unwrap_or(1.0);
        let cost_per_km = self.cost_per_km();
        let fuel_cost_per_day = cost_per_km * real_km;
        let daily_net_goal = self.daily_net_goal();
        let gross_income_per_day = self.gross_income(fuel_cost_per_day);
        let commission_amount = gross_income_per_day * (self.commission_percent / 100.0);
        let price_per_useful_km = if useful_km > 0.0 {
            gross_income_per_day / useful_km
        } else {
            0.0
        };
        FloorRate {
            daily_net_goal,
            real_km,
            cost_per_km,
            fuel_cost_per_day,
            gross_income_per_day,
            commission_amount,
            price_per_useful_km,
        }
    }
}

/// Flat fare quote: one rate applied to the combined distance,
/// pickup and trip alike
pub fn flat_fare(rate: f64, pickup_km: f64, trip_km: f64) -> f64 {
    rate * (pickup_km + trip_km)
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! close {
        ( $lhs:expr, $rhs:expr ) => {
            close!($lhs, $rhs, 1e-9)
        };
        ( $lhs:expr, $rhs:expr, $tol:expr ) => {
            assert!(
                ($lhs - $rhs).abs() < $tol,
                "{} != {}", $lhs, $rhs,
            );
        };
    }

    fn reference_plan() -> DayPlan {
        DayPlan {
            monthly_net_goal: 3000.0,
            working_days: 20,
            commission_percent: 15.0,
            consumption: Consumption::LitersPer100Km(12.0),
            fuel_price: FuelPrice::PerLiter(3.897),
        }
    }

    #[test]
    fn reference_breakdown() {
        let rates = reference_plan().leg_rates(10.0, 5.0);
        close!(rates.daily_net_goal, 150.0);
        close!(rates.cost_per_km, 0.46764);
        close!(rates.total_km, 15.0);
        close!(rates.fuel_cost_per_day, 7.0146);
        close!(rates.gross_income_per_day, (150.0 + 7.0146) / 0.85, 1e-6);
        close!(rates.price_per_km_pickup, 0.374112);
    }

    #[test]
    fn trip_covers_pickup_cost() {
        let rates = reference_plan().leg_rates(10.0, 5.0);
        let pickup_cost = rates.cost_per_km * 5.0;
        close!(
            rates.price_per_km_trip * 10.0,
            rates.gross_income_per_day + pickup_cost,
            1e-6
        );
    }

    #[test]
    fn blended_is_weighted_average() {
        let rates = reference_plan().leg_rates(10.0, 5.0);
        close!(
            rates.blended_price_per_km * rates.total_km,
            rates.price_per_km_trip * 10.0 + rates.price_per_km_pickup * 5.0,
            1e-6
        );
    }

    #[test]
    fn commission_share_of_gross() {
        let rates = reference_plan().leg_rates(10.0, 5.0);
        close!(rates.commission_amount, rates.gross_income_per_day * 0.15, 1e-6);
    }

    #[test]
    fn zero_working_days() {
        let mut plan = reference_plan();
        plan.working_days = 0;
        let rates = plan.leg_rates(10.0, 5.0);
        close!(rates.daily_net_goal, 0.0);
        assert!(rates.gross_income_per_day.is_finite());
    }

    #[test]
    fn full_commission_degrades_to_zero() {
        for pct in [100.0, 120.0] {
            let mut plan = reference_plan();
            plan.commission_percent = pct;
            let rates = plan.leg_rates(10.0, 5.0);
            close!(rates.gross_income_per_day, 0.0);
            close!(rates.commission_amount, 0.0);
        }
    }

    #[test]
    fn zero_trip_km() {
        let rates = reference_plan().leg_rates(0.0, 5.0);
        close!(rates.price_per_km_trip, 0.0);
    }

    #[test]
    fn zero_total_km() {
        let rates = reference_plan().leg_rates(0.0, 0.0);
        close!(rates.total_km, 0.0);
        close!(rates.fuel_cost_per_day, 0.0);
        close!(rates.blended_price_per_km, 0.0);
    }

    #[test]
    fn outputs_finite_and_nonnegative() {
        let rates = reference_plan().leg_rates(10.0, 5.0);
        for v in [
            rates.daily_net_goal,
            rates.total_km,
            rates.cost_per_km,
            rates.fuel_cost_per_day,
            rates.gross_income_per_day,
            rates.commission_amount,
            rates.price_per_km_trip,
            rates.price_per_km_pickup,
            rates.blended_price_per_km,
        ] {
            assert!(v.is_finite());
            assert!(v >= 0.0);
        }
    }

    #[test]
    fn deterministic() {
        let plan = reference_plan();
        assert_eq!(plan.leg_rates(10.0, 5.0), plan.leg_rates(10.0, 5.0));
        assert_eq!(
            plan.floor_rate(120.0, Some(1.3)),
            plan.floor_rate(120.0, Some(1.3))
        );
    }

    #[test]
    fn floor_rate_default_factor() {
        let plan = reference_plan();
        assert_eq!(plan.floor_rate(120.0, None), plan.floor_rate(120.0, Some(1.0)));
    }

    #[test]
    fn floor_rate_scales_real_km() {
        let floor = reference_plan().floor_rate(100.0, Some(1.4));
        close!(floor.real_km, 140.0);
        close!(floor.fuel_cost_per_day, floor.cost_per_km * 140.0, 1e-6);
        close!(
            floor.price_per_useful_km,
            floor.gross_income_per_day / 100.0,
            1e-9
        );
    }

    #[test]
    fn floor_rate_zero_useful_km() {
        let floor = reference_plan().floor_rate(0.0, Some(1.4));
        close!(floor.price_per_useful_km, 0.0);
    }

    #[test]
    fn flat_fare_reference() {
        close!(flat_fare(1.50, 2.5, 8.3), 16.2, 1e-9);
        close!(flat_fare(0.0, 2.5, 8.3), 0.0);
        close!(flat_fare(1.50, 0.0, 0.0), 0.0);
    }
}
