//! End-to-end scenarios for the juicer machine pipeline.
//!
//! These exercise the behaviors the operator manual promises: the
//! reference yield for a medium ripe orange, all-or-nothing feeding
//! against a small tank, sticky filter clogging, and wear-driven
//! efficiency decay over a full service life.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use juicer_core::{JuicerError, JuicerMachine, MachineCapacityConfig};
use juicer_types::{Fruit, FruitSize, FruitType, MachineState, RipenessLevel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn orange(size: FruitSize, weight: Decimal) -> Fruit {
    Fruit::new(FruitType::Orange, size, RipenessLevel::Ripe, weight).unwrap()
}

fn running_machine_with_tank(tank_capacity_ml: Decimal) -> JuicerMachine {
    let config = MachineCapacityConfig {
        tank_capacity_ml,
        bin_capacity_grams: dec!(2000),
    };
    let mut machine = JuicerMachine::new(&config);
    machine.start().unwrap();
    machine
}

#[test]
fn reference_yield_for_a_medium_ripe_orange() {
    let mut machine = JuicerMachine::default();
    machine.start().unwrap();

    let outcome = machine.feed_fruit(&orange(FruitSize::Medium, dec!(150))).unwrap();

    // Raw yield is 28.85 ml; fresh press and filter each shave off
    // 0.1% or less, so the committed volume stays within a milliliter.
    let juice = outcome.juice.milliliters();
    assert!((juice - dec!(28.85)).abs() <= Decimal::ONE, "juice was {juice}");
    assert!((outcome.waste - dec!(55.5)).abs() <= Decimal::ONE);
}

#[test]
fn overflowing_feed_commits_nothing() {
    let mut machine = running_machine_with_tank(dec!(100));
    let big = orange(FruitSize::Large, dec!(250));

    // First large orange (~58 ml filtered) fits.
    machine.feed_fruit(&big).unwrap();
    let before = machine.metrics().clone();
    assert_eq!(before.fruits_processed, 1);

    // The second would overflow the tank; the pre-check fires before
    // either accumulator is touched.
    let err = machine.feed_fruit(&big).unwrap_err();
    assert!(matches!(err, JuicerError::TankWouldOverflow { .. }));

    let after = machine.metrics();
    assert_eq!(after.fruits_processed, 1);
    assert_eq!(after.total_juice_ml, before.total_juice_ml);
    assert_eq!(after.total_waste_grams, before.total_waste_grams);
    assert_eq!(after.errors, before.errors + 1);
    assert_eq!(machine.waste_bin().waste_count(), 1);

    // The press did run, though: its count commits before the
    // accumulator checks.
    assert_eq!(machine.press_unit().press_count(), 2);
}

#[test]
fn clogged_filter_blocks_feeding_until_cleaned() {
    let mut machine = running_machine_with_tank(dec!(5000));
    let small = orange(FruitSize::Small, dec!(100));

    // Sixteen feeds push the clog level to 80 and park the filter in
    // the sticky clogged state.
    for _ in 0..16 {
        machine.feed_fruit(&small).unwrap();
    }
    assert!(machine.filter_unit().needs_cleaning());
    assert_eq!(machine.metrics().fruits_processed, 16);

    let err = machine.feed_fruit(&small).unwrap_err();
    assert_eq!(err, JuicerError::FilterClogged);
    // The guard fired before the press ran, and guard failures do not
    // count as pipeline errors.
    assert_eq!(machine.press_unit().press_count(), 16);
    assert_eq!(machine.metrics().errors, 0);

    // A cleaning cycle recovers the machine (and returns it to idle).
    machine.clean();
    assert_eq!(machine.state(), MachineState::Idle);
    machine.start().unwrap();
    machine.feed_fruit(&small).unwrap();
    assert_eq!(machine.metrics().fruits_processed, 17);
}

#[test]
fn full_service_life_wears_the_press_to_half_efficiency() {
    let mut machine = running_machine_with_tank(dec!(100000));
    let small = orange(FruitSize::Small, dec!(80));

    for fed in 0..1000 {
        // The filter mesh lives for 500 passes; swap it mid-run.
        if machine.filter_unit().needs_replacement() {
            machine.replace_filter();
        }
        if machine.filter_unit().needs_cleaning() {
            // Periodic cleaning empties the accumulators too, keeping
            // capacity out of the picture. Restart to keep feeding.
            machine.clean();
            machine.start().unwrap();
        }
        machine.feed_fruit(&small).unwrap();
        assert_eq!(machine.metrics().fruits_processed, fed + 1);
    }

    assert_eq!(machine.press_unit().press_count(), 1000);
    assert_eq!(machine.press_unit().efficiency_percentage(), dec!(50.0));

    // The press is now past its service life.
    let err = machine.feed_fruit(&small).unwrap_err();
    assert_eq!(err, JuicerError::MaintenanceRequired { unit: "press" });
    assert_eq!(machine.metrics().errors, 1);

    // Servicing the press puts the machine back in business.
    machine.service_press();
    machine.feed_fruit(&small).unwrap();
    assert_eq!(machine.press_unit().press_count(), 1);
}

#[test]
fn cleaning_always_lands_idle_from_every_state() {
    // From idle.
    let mut machine = JuicerMachine::default();
    machine.clean();
    assert_eq!(machine.state(), MachineState::Idle);
    assert_eq!(machine.metrics().cleaning_cycles, 1);

    // From running.
    machine.start().unwrap();
    machine.clean();
    assert_eq!(machine.state(), MachineState::Idle);

    // From stopped.
    machine.start().unwrap();
    machine.stop().unwrap();
    machine.clean();
    assert_eq!(machine.state(), MachineState::Idle);
    assert_eq!(machine.metrics().cleaning_cycles, 3);
}

#[test]
fn stopped_machine_restarts_through_a_cleaning_cycle() {
    let mut machine = JuicerMachine::default();
    machine.start().unwrap();
    machine.stop().unwrap();

    // start requires idle; a stopped machine must be cleaned first.
    assert!(matches!(
        machine.start(),
        Err(JuicerError::InvalidState { operation: "start", .. }),
    ));
    machine.clean();
    machine.start().unwrap();
    assert_eq!(machine.state(), MachineState::Running);
}
