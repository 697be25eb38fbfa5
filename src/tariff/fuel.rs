//! Normalization of fuel units
//!
//! Pump prices and consumption figures can be quoted per liter or per
//! US gallon; everything downstream of this module works in liters.
//! The unit is part of the value, so an unknown unit is unrepresentable
//! instead of falling through a string comparison.

/// Liters in one US gallon
pub const LITERS_PER_GALLON: f64 = 3.78541;

/// Fuel burned by the vehicle over 100km
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Consumption {
    LitersPer100Km(f64),
    GallonsPer100Km(f64),
}

impl Consumption {
    /// Express the consumption in liters per 100km
    pub fn liters_per_100km(self) -> f64 {
        match self {
            Self::LitersPer100Km(v) => v,
            Self::GallonsPer100Km(v) => v * LITERS_PER_GALLON,
        }
    }
}

/// Price of fuel at the pump
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FuelPrice {
    PerLiter(f64),
    PerGallon(f64),
}

impl FuelPrice {
    /// Express the price per liter
    pub fn per_liter(self) -> f64 {
        match self {
            Self::PerLiter(v) => v,
            Self::PerGallon(v) => v / LITERS_PER_GALLON,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! close {
        ( $lhs:expr, $rhs:expr ) => {
            assert!(
                ($lhs - $rhs).abs() < 1e-9,
                "{} != {}", $lhs, $rhs,
            );
        };
    }

    #[test]
    fn liters_are_identity() {
        close!(Consumption::LitersPer100Km(12.0).liters_per_100km(), 12.0);
        close!(FuelPrice::PerLiter(3.897).per_liter(), 3.897);
    }

    #[test]
    fn gallons_convert() {
        close!(Consumption::GallonsPer100Km(3.0).liters_per_100km(), 11.35623);
        close!(FuelPrice::PerGallon(14.75).per_liter(), 14.75 / 3.78541);
    }

    #[test]
    fn round_trip() {
        // converting to the liter basis and back loses nothing
        for v in [0.0, 0.1, 3.0, 12.5, 147.3] {
            close!(
                Consumption::GallonsPer100Km(v).liters_per_100km() / LITERS_PER_GALLON,
                v
            );
            close!(FuelPrice::PerGallon(v).per_liter() * LITERS_PER_GALLON, v);
        }
    }
}
