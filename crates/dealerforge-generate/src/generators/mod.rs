//! Constrained record generation.
//!
//! Every draw goes through the injected RNG; the generator itself holds no
//! mutable state, so a fixed seed and reference date reproduce a dataset.

pub mod draw;

use chrono::NaiveDate;
use rand::Rng;

use dealerforge_core::{
    Catalog, CategoryDefinition, Error as CoreError, FuelType, PowerSource, Record, Transmission,
};

use crate::errors::GenerationError;
use draw::{MEASURE_PLACES, PRICE_PLACES, pick, sale_window, uniform_int, uniform_rounded};

/// Produces self-consistent records from a validated catalog.
#[derive(Debug, Clone)]
pub struct RecordGenerator {
    catalog: Catalog,
    model_names: Vec<String>,
    reference_date: NaiveDate,
}

impl RecordGenerator {
    /// Validate the catalog up front; range defects never surface mid-generation.
    pub fn new(catalog: Catalog, reference_date: NaiveDate) -> Result<Self, GenerationError> {
        catalog.validate()?;
        let model_names = catalog.models.keys().cloned().collect();
        Ok(Self {
            catalog,
            model_names,
            reference_date,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Generate `count` records in order. `count == 0` yields an empty vector.
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Record> {
        (0..count).map(|_| self.generate_one(rng)).collect()
    }

    pub fn generate_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Record {
        let model = pick(&self.model_names, rng);
        let category = &self.catalog.models[model];
        let idx = rng.random_range(0..category.fuel_types.len());
        let fuel_type = category.fuel_types[idx];
        self.build(model, category, fuel_type, rng)
    }

    /// Generate one record for an explicit model and fuel type.
    pub fn generate_with_fuel<R: Rng + ?Sized>(
        &self,
        model: &str,
        fuel_type: FuelType,
        rng: &mut R,
    ) -> Result<Record, GenerationError> {
        let category = self.catalog.category(model)?;
        if !category.permits(fuel_type) {
            return Err(CoreError::FuelNotPermitted {
                model: model.to_string(),
                fuel_type: fuel_type.to_string(),
            }
            .into());
        }
        Ok(self.build(model, category, fuel_type, rng))
    }

    fn build<R: Rng + ?Sized>(
        &self,
        model: &str,
        category: &CategoryDefinition,
        fuel_type: FuelType,
        rng: &mut R,
    ) -> Record {
        let catalog = &self.catalog;

        let transmission = if fuel_type.is_electric() {
            Transmission::Automatic
        } else {
            Transmission::ALL[rng.random_range(0..Transmission::ALL.len())]
        };

        let variant = pick(&catalog.variants, rng).to_string();
        let color = pick(&catalog.colors, rng).to_string();
        let state = pick(&catalog.states, rng).to_string();

        let price = uniform_rounded(&category.price, PRICE_PLACES, rng);
        let mileage = uniform_rounded(&category.mileage, MEASURE_PLACES, rng);

        let (manufacture_date, sale_date) = sale_window(&catalog.dates, self.reference_date, rng);

        let power = match catalog.engine_litres.for_fuel(fuel_type) {
            Some(litres) => PowerSource::Combustion {
                engine_capacity: uniform_rounded(litres, MEASURE_PLACES, rng),
            },
            None => {
                PowerSource::Electric {
                    battery_capacity: uniform_rounded(
                        catalog.battery_range(category),
                        MEASURE_PLACES,
                        rng,
                    ),
                    charging_time: uniform_rounded(
                        &catalog.electric.charging_hours,
                        MEASURE_PLACES,
                        rng,
                    ),
                }
            }
        };

        let seating_capacity = catalog.seating.seats_for(model);
        let ground_clearance = uniform_rounded(&catalog.body.ground_clearance, MEASURE_PLACES, rng);
        let bed_length = uniform_rounded(&catalog.body.bed_length, MEASURE_PLACES, rng);
        let towing_capacity = uniform_int(&catalog.body.towing_capacity, rng);

        Record {
            model: model.to_string(),
            variant,
            color,
            fuel_type,
            transmission,
            price,
            manufacture_date,
            sale_date,
            state,
            mileage,
            power,
            seating_capacity,
            ground_clearance,
            bed_length,
            towing_capacity,
        }
    }
}
