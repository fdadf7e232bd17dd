use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{FuelType, ValueRange};

/// Upper bound for any day offset, keeping date arithmetic far from calendar limits.
pub const MAX_OFFSET_DAYS: u32 = 36_500;

/// Constraint bundle for a single model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub price: ValueRange<f64>,
    pub mileage: ValueRange<f64>,
    pub fuel_types: Vec<FuelType>,
    /// Model-specific battery range in kWh; falls back to the catalog-wide range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_kwh: Option<ValueRange<f64>>,
}

impl CategoryDefinition {
    pub fn permits(&self, fuel_type: FuelType) -> bool {
        self.fuel_types.contains(&fuel_type)
    }
}

/// Engine displacement ranges in litres, one per combustion fuel type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineRanges {
    pub gasoline: ValueRange<f64>,
    pub diesel: ValueRange<f64>,
    pub hybrid: ValueRange<f64>,
}

impl EngineRanges {
    /// Displacement range for a combustion fuel type; `None` for electric.
    pub fn for_fuel(&self, fuel_type: FuelType) -> Option<&ValueRange<f64>> {
        match fuel_type {
            FuelType::Gasoline => Some(&self.gasoline),
            FuelType::Diesel => Some(&self.diesel),
            FuelType::Hybrid => Some(&self.hybrid),
            FuelType::Electric => None,
        }
    }
}

/// Electric drivetrain ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricRanges {
    pub battery_kwh: ValueRange<f64>,
    pub charging_hours: ValueRange<f64>,
}

/// Model-independent body dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRanges {
    pub ground_clearance: ValueRange<f64>,
    pub bed_length: ValueRange<f64>,
    pub towing_capacity: ValueRange<u32>,
}

/// Seat count lookup: heavy-duty models get `heavy_duty_seats`, all others `standard_seats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatingRule {
    pub heavy_duty_models: BTreeSet<String>,
    pub heavy_duty_seats: u8,
    pub standard_seats: u8,
}

impl SeatingRule {
    pub fn seats_for(&self, model: &str) -> u8 {
        if self.heavy_duty_models.contains(model) {
            self.heavy_duty_seats
        } else {
            self.standard_seats
        }
    }
}

/// Manufacture/sale date offsets, in days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatePolicy {
    /// Manufacture date is drawn from `today - U(1, max_age_days)`.
    pub max_age_days: u32,
    /// Sale date is drawn from `manufacture + U(min_hold_days, max_hold_days)`.
    pub min_hold_days: u32,
    pub max_hold_days: u32,
}

/// Complete static domain definition consumed by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub models: BTreeMap<String, CategoryDefinition>,
    pub variants: Vec<String>,
    pub colors: Vec<String>,
    pub states: Vec<String>,
    pub engine_litres: EngineRanges,
    pub electric: ElectricRanges,
    pub body: BodyRanges,
    pub seating: SeatingRule,
    pub dates: DatePolicy,
}

impl Catalog {
    /// Look up a model, failing for names outside the taxonomy.
    pub fn category(&self, model: &str) -> Result<&CategoryDefinition> {
        self.models
            .get(model)
            .ok_or_else(|| Error::UnknownModel(model.to_string()))
    }

    /// Battery range for a resolved model: its override, else the catalog-wide range.
    pub fn battery_range<'a>(&'a self, category: &'a CategoryDefinition) -> &'a ValueRange<f64> {
        category
            .battery_kwh
            .as_ref()
            .unwrap_or(&self.electric.battery_kwh)
    }

    /// Check every range and pool. A catalog that passes cannot make generation fail.
    pub fn validate(&self) -> Result<()> {
        if self.models.is_empty() {
            return Err(Error::RangeViolation(
                "taxonomy must declare at least one model".to_string(),
            ));
        }

        for (name, category) in &self.models {
            validate_finite(&category.price, &format!("{name}.price"))?;
            validate_finite(&category.mileage, &format!("{name}.mileage"))?;
            if let Some(battery) = &category.battery_kwh {
                validate_positive(battery, &format!("{name}.battery_kwh"))?;
            }
            if category.fuel_types.is_empty() {
                return Err(Error::RangeViolation(format!(
                    "{name}: model must permit at least one fuel type"
                )));
            }
            let mut seen = BTreeSet::new();
            for fuel_type in &category.fuel_types {
                if !seen.insert(*fuel_type) {
                    return Err(Error::RangeViolation(format!(
                        "{name}: fuel type {fuel_type} listed more than once"
                    )));
                }
            }
        }

        validate_pool(&self.variants, "variants")?;
        validate_pool(&self.colors, "colors")?;
        validate_pool(&self.states, "states")?;

        // The active power group must never round to zero.
        validate_positive(&self.engine_litres.gasoline, "engine_litres.gasoline")?;
        validate_positive(&self.engine_litres.diesel, "engine_litres.diesel")?;
        validate_positive(&self.engine_litres.hybrid, "engine_litres.hybrid")?;
        validate_positive(&self.electric.battery_kwh, "electric.battery_kwh")?;
        validate_positive(&self.electric.charging_hours, "electric.charging_hours")?;
        validate_finite(&self.body.ground_clearance, "body.ground_clearance")?;
        validate_finite(&self.body.bed_length, "body.bed_length")?;
        self.body.towing_capacity.validate("body.towing_capacity")?;

        for model in &self.seating.heavy_duty_models {
            if !self.models.contains_key(model) {
                return Err(Error::UnknownModel(model.clone()));
            }
        }

        if self.dates.max_age_days < 1 {
            return Err(Error::RangeViolation(
                "dates.max_age_days must be at least 1".to_string(),
            ));
        }
        if self.dates.max_age_days > MAX_OFFSET_DAYS || self.dates.max_hold_days > MAX_OFFSET_DAYS {
            return Err(Error::RangeViolation(format!(
                "dates: offsets must not exceed {MAX_OFFSET_DAYS} days"
            )));
        }
        if self.dates.min_hold_days < 1 {
            return Err(Error::RangeViolation(
                "dates.min_hold_days must be at least 1".to_string(),
            ));
        }
        ValueRange::new(self.dates.min_hold_days, self.dates.max_hold_days)
            .validate("dates.hold_days")?;

        Ok(())
    }

    /// Ford pickup catalog used when no custom catalog is configured.
    pub fn ford_trucks() -> Self {
        let models = [
            (
                "Ford F-150",
                34_000.0,
                78_000.0,
                10.0,
                180_000.0,
                &[FuelType::Gasoline, FuelType::Hybrid, FuelType::Electric][..],
            ),
            (
                "Ford F-150 Lightning",
                55_000.0,
                97_000.0,
                8.0,
                120_000.0,
                &[FuelType::Electric][..],
            ),
            (
                "Ford Ranger",
                28_000.0,
                44_000.0,
                10.0,
                160_000.0,
                &[FuelType::Gasoline][..],
            ),
            (
                "Ford Maverick",
                24_000.0,
                39_000.0,
                5.0,
                90_000.0,
                &[FuelType::Gasoline, FuelType::Hybrid][..],
            ),
            (
                "Ford F-250 Super Duty",
                45_000.0,
                99_000.0,
                12.0,
                220_000.0,
                &[FuelType::Gasoline, FuelType::Diesel][..],
            ),
            (
                "Ford F-350 Super Duty",
                50_000.0,
                105_000.0,
                10.0,
                250_000.0,
                &[FuelType::Gasoline, FuelType::Diesel][..],
            ),
            (
                "Ford F-450 Super Duty",
                57_000.0,
                115_000.0,
                10.0,
                260_000.0,
                &[FuelType::Diesel][..],
            ),
            (
                "Ford F-650",
                60_000.0,
                125_000.0,
                10.0,
                180_000.0,
                &[FuelType::Diesel][..],
            ),
            (
                "Ford F-750",
                65_000.0,
                140_000.0,
                8.0,
                180_000.0,
                &[FuelType::Diesel][..],
            ),
        ]
        .into_iter()
        .map(|(name, price_min, price_max, mileage_min, mileage_max, fuels)| {
            (
                name.to_string(),
                CategoryDefinition {
                    price: ValueRange::new(price_min, price_max),
                    mileage: ValueRange::new(mileage_min, mileage_max),
                    fuel_types: fuels.to_vec(),
                    battery_kwh: None,
                },
            )
        })
        .collect();

        Self {
            models,
            variants: strings(&[
                "XL",
                "XLT",
                "Lariat",
                "Platinum",
                "King Ranch",
                "Limited",
                "Tremor",
            ]),
            colors: strings(&[
                "Oxford White",
                "Agate Black",
                "Antimatter Blue",
                "Rapid Red",
                "Stone Gray",
                "Carbonized Gray",
                "Iconic Silver",
            ]),
            states: strings(&[
                "Texas",
                "California",
                "Florida",
                "Oklahoma",
                "Ohio",
                "Michigan",
                "Pennsylvania",
                "Georgia",
            ]),
            engine_litres: EngineRanges {
                gasoline: ValueRange::new(2.3, 7.3),
                diesel: ValueRange::new(6.2, 7.3),
                hybrid: ValueRange::new(2.3, 3.5),
            },
            electric: ElectricRanges {
                battery_kwh: ValueRange::new(95.0, 130.0),
                charging_hours: ValueRange::new(0.75, 10.0),
            },
            body: BodyRanges {
                ground_clearance: ValueRange::new(200.0, 250.0),
                bed_length: ValueRange::new(5.5, 8.0),
                towing_capacity: ValueRange::new(5_000, 37_000),
            },
            seating: SeatingRule {
                heavy_duty_models: [
                    "Ford F-250 Super Duty",
                    "Ford F-350 Super Duty",
                    "Ford F-450 Super Duty",
                    "Ford F-650",
                    "Ford F-750",
                ]
                .into_iter()
                .map(str::to_string)
                .collect(),
                heavy_duty_seats: 6,
                standard_seats: 5,
            },
            dates: DatePolicy {
                max_age_days: 1460,
                min_hold_days: 1,
                max_hold_days: 180,
            },
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::ford_trucks()
    }
}

fn validate_finite(range: &ValueRange<f64>, what: &str) -> Result<()> {
    if !range.min.is_finite() || !range.max.is_finite() {
        return Err(Error::RangeViolation(format!(
            "{what}: bounds must be finite"
        )));
    }
    range.validate(what)?;
    // Uniform float sampling needs a representable span.
    if !(range.max - range.min).is_finite() {
        return Err(Error::RangeViolation(format!(
            "{what}: span between bounds must be finite"
        )));
    }
    Ok(())
}

fn validate_positive(range: &ValueRange<f64>, what: &str) -> Result<()> {
    validate_finite(range, what)?;
    if range.min <= 0.0 {
        return Err(Error::RangeViolation(format!(
            "{what}: min must be greater than zero"
        )));
    }
    Ok(())
}

fn validate_pool(pool: &[String], what: &str) -> Result<()> {
    if pool.is_empty() {
        return Err(Error::RangeViolation(format!(
            "{what}: pool must not be empty"
        )));
    }
    Ok(())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
