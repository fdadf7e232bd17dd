use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{FuelType, Transmission};

/// Engine or battery drivetrain. Exactly one group is populated per record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerSource {
    /// Internal combustion or hybrid; displacement in litres.
    Combustion { engine_capacity: f64 },
    /// Battery electric; capacity in kWh and charging time in hours.
    Electric {
        battery_capacity: f64,
        charging_time: f64,
    },
}

impl PowerSource {
    pub fn engine_capacity(&self) -> f64 {
        match self {
            PowerSource::Combustion { engine_capacity } => *engine_capacity,
            PowerSource::Electric { .. } => 0.0,
        }
    }

    pub fn battery_capacity(&self) -> f64 {
        match self {
            PowerSource::Combustion { .. } => 0.0,
            PowerSource::Electric {
                battery_capacity, ..
            } => *battery_capacity,
        }
    }

    pub fn charging_time(&self) -> f64 {
        match self {
            PowerSource::Combustion { .. } => 0.0,
            PowerSource::Electric { charging_time, .. } => *charging_time,
        }
    }

    pub fn is_electric(&self) -> bool {
        matches!(self, PowerSource::Electric { .. })
    }
}

/// One synthetic sale transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub model: String,
    pub variant: String,
    pub color: String,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub price: f64,
    pub manufacture_date: NaiveDate,
    pub sale_date: NaiveDate,
    pub state: String,
    pub mileage: f64,
    pub power: PowerSource,
    pub seating_capacity: u8,
    pub ground_clearance: f64,
    pub bed_length: f64,
    pub towing_capacity: u32,
}

impl Record {
    pub fn to_row(&self) -> RecordRow {
        RecordRow::from(self)
    }
}

/// Flat, persisted shape of a [`Record`]. Field order is the tabular column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RecordRow {
    pub model: String,
    pub variant: String,
    pub color: String,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub price: f64,
    /// ISO 8601 calendar date.
    pub manufacture_date: NaiveDate,
    /// ISO 8601 calendar date, strictly after `manufacture_date`.
    pub sale_date: NaiveDate,
    pub state: String,
    pub mileage: f64,
    /// Litres; zero for electric vehicles.
    pub engine_capacity: f64,
    /// kWh; zero unless electric.
    pub battery_capacity: f64,
    /// Hours; zero unless electric.
    pub charging_time: f64,
    pub seating_capacity: u8,
    pub ground_clearance: f64,
    pub bed_length: f64,
    pub towing_capacity: u32,
}

impl RecordRow {
    /// Field names in declaration order.
    pub const FIELD_NAMES: [&'static str; 17] = [
        "model",
        "variant",
        "color",
        "fuel_type",
        "transmission",
        "price",
        "manufacture_date",
        "sale_date",
        "state",
        "mileage",
        "engine_capacity",
        "battery_capacity",
        "charging_time",
        "seating_capacity",
        "ground_clearance",
        "bed_length",
        "towing_capacity",
    ];
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        Self {
            model: record.model.clone(),
            variant: record.variant.clone(),
            color: record.color.clone(),
            fuel_type: record.fuel_type,
            transmission: record.transmission,
            price: record.price,
            manufacture_date: record.manufacture_date,
            sale_date: record.sale_date,
            state: record.state.clone(),
            mileage: record.mileage,
            engine_capacity: record.power.engine_capacity(),
            battery_capacity: record.power.battery_capacity(),
            charging_time: record.power.charging_time(),
            seating_capacity: record.seating_capacity,
            ground_clearance: record.ground_clearance,
            bed_length: record.bed_length,
            towing_capacity: record.towing_capacity,
        }
    }
}

impl TryFrom<RecordRow> for Record {
    type Error = Error;

    fn try_from(row: RecordRow) -> Result<Self> {
        let power = power_from_row(&row)?;

        if row.sale_date <= row.manufacture_date {
            return Err(Error::InconsistentRecord(format!(
                "sale date {} must be after manufacture date {}",
                row.sale_date, row.manufacture_date
            )));
        }

        Ok(Self {
            model: row.model,
            variant: row.variant,
            color: row.color,
            fuel_type: row.fuel_type,
            transmission: row.transmission,
            price: row.price,
            manufacture_date: row.manufacture_date,
            sale_date: row.sale_date,
            state: row.state,
            mileage: row.mileage,
            power,
            seating_capacity: row.seating_capacity,
            ground_clearance: row.ground_clearance,
            bed_length: row.bed_length,
            towing_capacity: row.towing_capacity,
        })
    }
}

fn power_from_row(row: &RecordRow) -> Result<PowerSource> {
    if row.fuel_type.is_electric() {
        if row.engine_capacity != 0.0 {
            return Err(Error::InconsistentRecord(
                "electric vehicle with non-zero engine capacity".to_string(),
            ));
        }
        if row.battery_capacity <= 0.0 || row.charging_time <= 0.0 {
            return Err(Error::InconsistentRecord(
                "electric vehicle without battery capacity or charging time".to_string(),
            ));
        }
        if row.transmission != Transmission::Automatic {
            return Err(Error::InconsistentRecord(
                "electric vehicle must use an automatic transmission".to_string(),
            ));
        }
        return Ok(PowerSource::Electric {
            battery_capacity: row.battery_capacity,
            charging_time: row.charging_time,
        });
    }

    if row.battery_capacity != 0.0 || row.charging_time != 0.0 {
        return Err(Error::InconsistentRecord(format!(
            "{} vehicle with battery fields populated",
            row.fuel_type
        )));
    }
    if row.engine_capacity <= 0.0 {
        return Err(Error::InconsistentRecord(format!(
            "{} vehicle without engine capacity",
            row.fuel_type
        )));
    }
    Ok(PowerSource::Combustion {
        engine_capacity: row.engine_capacity,
    })
}
