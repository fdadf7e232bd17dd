use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fuel type of a vehicle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum FuelType {
    Gasoline,
    Diesel,
    Hybrid,
    Electric,
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [
        FuelType::Gasoline,
        FuelType::Diesel,
        FuelType::Hybrid,
        FuelType::Electric,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "Gasoline",
            FuelType::Diesel => "Diesel",
            FuelType::Hybrid => "Hybrid",
            FuelType::Electric => "Electric",
        }
    }

    pub fn is_electric(&self) -> bool {
        matches!(self, FuelType::Electric)
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FuelType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        FuelType::ALL
            .into_iter()
            .find(|fuel| fuel.as_str() == value)
            .ok_or_else(|| Error::UnknownFuelType(value.to_string()))
    }
}

/// Gearbox of a vehicle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Transmission {
    Automatic,
    Manual,
}

impl Transmission {
    pub const ALL: [Transmission; 2] = [Transmission::Automatic, Transmission::Manual];

    pub fn as_str(&self) -> &'static str {
        match self {
            Transmission::Automatic => "Automatic",
            Transmission::Manual => "Manual",
        }
    }
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transmission {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Transmission::ALL
            .into_iter()
            .find(|transmission| transmission.as_str() == value)
            .ok_or_else(|| Error::UnknownTransmission(value.to_string()))
    }
}

/// Inclusive `[min, max]` bounds for a generated value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T> ValueRange<T>
where
    T: PartialOrd + Copy + fmt::Display,
{
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Reject inverted bounds. Incomparable bounds (NaN) are rejected too.
    pub fn validate(&self, what: &str) -> Result<()> {
        match self.min.partial_cmp(&self.max) {
            Some(Ordering::Less | Ordering::Equal) => Ok(()),
            _ => Err(Error::RangeViolation(format!(
                "{what}: min {} must not exceed max {}",
                self.min, self.max
            ))),
        }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}
