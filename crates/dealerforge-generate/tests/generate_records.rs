use std::collections::BTreeMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use dealerforge_core::{
    Catalog, CategoryDefinition, Error as CoreError, FuelType, PowerSource, Record, Transmission,
    ValueRange,
};
use dealerforge_generate::{GenerationError, RecordGenerator};

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default()
}

fn ford_generator() -> RecordGenerator {
    RecordGenerator::new(Catalog::ford_trucks(), reference_date()).expect("valid catalog")
}

fn alpha_catalog() -> Catalog {
    let mut catalog = Catalog::ford_trucks();
    let mut models = BTreeMap::new();
    models.insert(
        "alpha-model".to_string(),
        CategoryDefinition {
            price: ValueRange::new(10_000.0, 20_000.0),
            mileage: ValueRange::new(0.0, 500.0),
            fuel_types: vec![FuelType::Gasoline],
            battery_kwh: None,
        },
    );
    catalog.models = models;
    catalog.seating.heavy_duty_models.clear();
    catalog
}

fn assert_record_invariants(catalog: &Catalog, record: &Record) {
    let category = catalog
        .category(&record.model)
        .unwrap_or_else(|_| panic!("unknown model {}", record.model));

    assert!(category.permits(record.fuel_type));
    assert!(category.price.contains(record.price));
    assert!(category.mileage.contains(record.mileage));

    let hold = (record.sale_date - record.manufacture_date).num_days();
    assert!(record.sale_date > record.manufacture_date);
    assert!(hold >= i64::from(catalog.dates.min_hold_days));
    assert!(hold <= i64::from(catalog.dates.max_hold_days));

    let row = record.to_row();
    if record.fuel_type == FuelType::Electric {
        assert_eq!(record.transmission, Transmission::Automatic);
        assert_eq!(row.engine_capacity, 0.0);
        assert!(row.battery_capacity > 0.0);
        assert!(row.charging_time > 0.0);
    } else {
        let litres = catalog
            .engine_litres
            .for_fuel(record.fuel_type)
            .expect("combustion range");
        assert!(litres.contains(row.engine_capacity));
        assert!(row.engine_capacity > 0.0);
        assert_eq!(row.battery_capacity, 0.0);
        assert_eq!(row.charging_time, 0.0);
    }

    assert_eq!(
        record.seating_capacity,
        catalog.seating.seats_for(&record.model)
    );
    assert!(catalog.body.ground_clearance.contains(record.ground_clearance));
    assert!(catalog.body.bed_length.contains(record.bed_length));
    assert!(catalog.body.towing_capacity.contains(record.towing_capacity));
}

fn decimals_at_most(value: f64, places: i32) -> bool {
    let factor = 10_f64.powi(places);
    ((value * factor).round() / factor - value).abs() < 1e-9
}

#[test]
fn generated_records_respect_catalog_constraints() {
    let generator = ford_generator();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let records = generator.generate(2_000, &mut rng);

    assert_eq!(records.len(), 2_000);
    for record in &records {
        assert_record_invariants(generator.catalog(), record);
        assert!(decimals_at_most(record.price, 2));
        assert!(decimals_at_most(record.mileage, 1));
    }
}

#[test]
fn every_model_and_fuel_type_is_reached() {
    let generator = ford_generator();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let records = generator.generate(3_000, &mut rng);

    for model in generator.catalog().models.keys() {
        assert!(
            records.iter().any(|record| &record.model == model),
            "model {model} never drawn"
        );
    }
    for fuel in FuelType::ALL {
        assert!(records.iter().any(|record| record.fuel_type == fuel));
    }
}

#[test]
fn lightning_is_always_electric_and_automatic() {
    let generator = ford_generator();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let lightning: Vec<Record> = generator
        .generate(1_000, &mut rng)
        .into_iter()
        .filter(|record| record.model == "Ford F-150 Lightning")
        .collect();

    assert!(!lightning.is_empty());
    for record in lightning {
        assert_eq!(record.fuel_type, FuelType::Electric);
        assert_eq!(record.transmission, Transmission::Automatic);
        assert!(record.power.is_electric());
    }
}

#[test]
fn same_seed_reproduces_the_dataset() {
    let generator = ford_generator();
    let first = generator.generate(50, &mut ChaCha8Rng::seed_from_u64(42));
    let second = generator.generate(50, &mut ChaCha8Rng::seed_from_u64(42));
    let other = generator.generate(50, &mut ChaCha8Rng::seed_from_u64(43));

    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn zero_count_yields_empty_sequence() {
    let generator = ford_generator();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert!(generator.generate(0, &mut rng).is_empty());
}

#[test]
fn single_gasoline_model_only_produces_combustion_records() {
    let generator =
        RecordGenerator::new(alpha_catalog(), reference_date()).expect("valid catalog");
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let records = generator.generate(5, &mut rng);

    assert_eq!(records.len(), 5);
    for record in &records {
        assert_eq!(record.model, "alpha-model");
        assert_eq!(record.fuel_type, FuelType::Gasoline);
        assert!(record.power.engine_capacity() > 0.0);
        assert_eq!(record.power.battery_capacity(), 0.0);
        assert_eq!(record.seating_capacity, 5);
    }
}

#[test]
fn forced_electric_record_uses_battery_and_automatic() {
    let generator = ford_generator();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let record = generator
        .generate_with_fuel("Ford F-150", FuelType::Electric, &mut rng)
        .expect("F-150 permits electric");

    assert_eq!(record.transmission, Transmission::Automatic);
    match record.power {
        PowerSource::Electric {
            battery_capacity,
            charging_time,
        } => {
            assert!((95.0..=130.0).contains(&battery_capacity));
            assert!((0.75..=10.0).contains(&charging_time));
        }
        PowerSource::Combustion { .. } => panic!("expected electric power source"),
    }
    assert_eq!(record.power.engine_capacity(), 0.0);
}

#[test]
fn model_battery_override_is_used() {
    let mut catalog = Catalog::ford_trucks();
    if let Some(category) = catalog.models.get_mut("Ford F-150 Lightning") {
        category.battery_kwh = Some(ValueRange::new(131.0, 131.0));
    }
    let generator = RecordGenerator::new(catalog, reference_date()).expect("valid catalog");
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let record = generator
        .generate_with_fuel("Ford F-150 Lightning", FuelType::Electric, &mut rng)
        .expect("lightning is electric");

    assert_eq!(record.power.battery_capacity(), 131.0);
}

#[test]
fn forced_fuel_outside_model_set_fails_fast() {
    let generator = ford_generator();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let result = generator.generate_with_fuel("Ford Ranger", FuelType::Diesel, &mut rng);

    assert!(matches!(
        result,
        Err(GenerationError::Catalog(CoreError::FuelNotPermitted { .. }))
    ));
}

#[test]
fn unknown_model_fails_fast() {
    let generator = ford_generator();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let result = generator.generate_with_fuel("Ford Pinto", FuelType::Gasoline, &mut rng);

    assert!(matches!(
        result,
        Err(GenerationError::Catalog(CoreError::UnknownModel(_)))
    ));
}

#[test]
fn inverted_range_is_fatal_at_construction() {
    let mut catalog = Catalog::ford_trucks();
    catalog.body.towing_capacity = ValueRange::new(37_000, 5_000);

    let result = RecordGenerator::new(catalog, reference_date());
    assert!(matches!(
        result,
        Err(GenerationError::Catalog(CoreError::RangeViolation(_)))
    ));
}

#[test]
fn unrepresentable_price_span_is_fatal_at_construction() {
    let mut catalog = Catalog::ford_trucks();
    for category in catalog.models.values_mut() {
        category.price = ValueRange::new(-f64::MAX, f64::MAX);
    }

    let result = RecordGenerator::new(catalog, reference_date());
    assert!(matches!(
        result,
        Err(GenerationError::Catalog(CoreError::RangeViolation(_)))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_for_any_seed(seed in any::<u64>(), count in 1_usize..64) {
        let generator = ford_generator();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let records = generator.generate(count, &mut rng);

        prop_assert_eq!(records.len(), count);
        for record in &records {
            assert_record_invariants(generator.catalog(), record);
            prop_assert!(record.manufacture_date < reference_date());
            prop_assert!(Record::try_from(record.to_row()).is_ok());
        }
    }
}
