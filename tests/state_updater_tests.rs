use carbus::config::{MIN_STEER_CHECK_KEY, SPEED_ADJUST_RATIO_KEY};
use carbus::profile::derive_parameters;
use carbus::signals::{ButtonList, ButtonPress, GearState, SignalSnapshot};
use carbus::state::{StateUpdater, VehicleEvent, VehicleState, GAS_RESUME_SPEED};
use carbus::{StaticConfig, VehicleParameters};

fn params_without_steer_check() -> VehicleParameters {
    derive_parameters("minivan-hybrid-2017", &[], &StaticConfig::new()).unwrap()
}

fn params_with_steer_check(identifier: &str) -> VehicleParameters {
    let mut config = StaticConfig::new();
    config.set_bool(MIN_STEER_CHECK_KEY, true);
    config.set_float(SPEED_ADJUST_RATIO_KEY, 1.0);
    derive_parameters(identifier, &[], &config).unwrap()
}

fn snapshot(frame: i64, speed: f32) -> SignalSnapshot {
    SignalSnapshot {
        frame,
        speed_mps: speed,
        cruise_engaged: false,
        brake_pressed: false,
        gas_pressed: false,
        standstill: speed == 0.0,
        steer_rate_limited: false,
        gear: GearState::Drive,
        buttons: ButtonList::new(),
        valid: true,
    }
}

fn engaged_state(speed: f32) -> VehicleState {
    let mut signals = snapshot(10, speed);
    signals.cruise_engaged = true;
    StateUpdater::update(&signals, &VehicleState::uninitialized(), &params_without_steer_check())
}

#[test]
fn test_uninitialized_to_tracking_transition() {
    let previous = VehicleState::uninitialized();
    assert_eq!(previous.frame, VehicleState::UNINITIALIZED_FRAME);

    let state = StateUpdater::update(&snapshot(0, 0.0), &previous, &params_without_steer_check());
    assert!(state.is_initialized());
    assert_eq!(state.frame, 0);
}

#[test]
fn test_brake_hold_fires_below_resume_speed() {
    let mut signals = snapshot(1, 1.0);
    signals.brake_pressed = true;

    let state = StateUpdater::update(
        &signals,
        &VehicleState::uninitialized(),
        &params_without_steer_check(),
    );

    assert!(state.has_event(VehicleEvent::BrakeHold));
}

#[test]
fn test_brake_hold_excludes_below_steer_speed() {
    // high tier: min steer speed 17.5, so speed 1.0 is below both thresholds
    let params = params_with_steer_check("minivan-hybrid-2019");
    let mut signals = snapshot(1, 1.0);
    signals.brake_pressed = true;

    let state = StateUpdater::update(&signals, &VehicleState::uninitialized(), &params);

    // Brake-hold wins; below-steer-speed must NOT also fire this cycle
    assert!(state.has_event(VehicleEvent::BrakeHold));
    assert!(!state.has_event(VehicleEvent::BelowSteerSpeed));
}

#[test]
fn test_below_steer_speed_without_brake() {
    let params = params_with_steer_check("minivan-hybrid-2019");
    let signals = snapshot(1, 10.0); // below 17.5, above resume speed

    let state = StateUpdater::update(&signals, &VehicleState::uninitialized(), &params);

    assert!(state.has_event(VehicleEvent::BelowSteerSpeed));
    assert!(!state.has_event(VehicleEvent::BrakeHold));
}

#[test]
fn test_no_brake_hold_at_speed() {
    let mut signals = snapshot(1, GAS_RESUME_SPEED + 1.0);
    signals.brake_pressed = true;
    signals.cruise_engaged = true;

    let state = StateUpdater::update(
        &signals,
        &VehicleState::uninitialized(),
        &params_without_steer_check(),
    );

    assert!(!state.has_event(VehicleEvent::BrakeHold));
}

#[test]
fn test_engagement_confirmed_on_rising_edge_only() {
    let params = params_without_steer_check();

    let mut signals = snapshot(1, 15.0);
    signals.cruise_engaged = true;

    let first = StateUpdater::update(&signals, &VehicleState::uninitialized(), &params);
    assert!(first.has_event(VehicleEvent::EngagementConfirmed));

    // Held engaged the next cycle: no second edge
    let mut next = snapshot(2, 15.0);
    next.cruise_engaged = true;
    let second = StateUpdater::update(&next, &first, &params);
    assert!(!second.has_event(VehicleEvent::EngagementConfirmed));
}

#[test]
fn test_cancel_takes_priority_over_engagement() {
    let params = params_without_steer_check();

    let mut signals = snapshot(1, 15.0);
    signals.cruise_engaged = true;
    signals.buttons.push(ButtonPress::Cancel).unwrap();

    let state = StateUpdater::update(&signals, &VehicleState::uninitialized(), &params);

    assert!(state.has_event(VehicleEvent::DriverCancel));
    assert!(!state.has_event(VehicleEvent::EngagementConfirmed));
}

#[test]
fn test_disengagement_forced_when_too_fast_to_resume() {
    let params = params_without_steer_check();
    let previous = engaged_state(5.0);

    let signals = snapshot(11, 5.0); // cruise dropped, 5.0 > resume speed
    let state = StateUpdater::update(&signals, &previous, &params);

    assert!(state.has_event(VehicleEvent::DisengagementForced));
}

#[test]
fn test_disengagement_forced_when_already_rolling() {
    let params = params_without_steer_check();
    let previous = engaged_state(1.5);

    // Slow but not standstill, previously engaged: do not silently resume
    let mut signals = snapshot(11, 1.5);
    signals.standstill = false;
    let state = StateUpdater::update(&signals, &previous, &params);

    assert!(state.has_event(VehicleEvent::DisengagementForced));
}

#[test]
fn test_no_disengagement_when_stopped_and_never_engaged() {
    let params = params_without_steer_check();
    let previous = StateUpdater::update(
        &snapshot(10, 0.0),
        &VehicleState::uninitialized(),
        &params,
    );

    let state = StateUpdater::update(&snapshot(11, 0.0), &previous, &params);
    assert!(!state.has_event(VehicleEvent::DisengagementForced));
}

#[test]
fn test_categories_are_independent() {
    // Brake-hold and forced disengagement may fire the same cycle
    let params = params_without_steer_check();
    let previous = engaged_state(1.0);

    let mut signals = snapshot(11, 1.0);
    signals.brake_pressed = true;
    signals.standstill = false;
    let state = StateUpdater::update(&signals, &previous, &params);

    assert!(state.has_event(VehicleEvent::BrakeHold));
    assert!(state.has_event(VehicleEvent::DisengagementForced));
}

#[test]
fn test_invalid_decode_degrades_validity_flag() {
    let params = params_without_steer_check();
    let mut signals = snapshot(1, 10.0);
    signals.valid = false;

    let state = StateUpdater::update(&signals, &VehicleState::uninitialized(), &params);

    // Fail-closed flag, but event derivation still ran
    assert!(!state.bus_valid);
    assert!(state.has_event(VehicleEvent::DisengagementForced));
}

#[test]
fn test_update_is_idempotent_for_identical_inputs() {
    let params = params_with_steer_check("minivan-hybrid-2019");
    let previous = engaged_state(5.0);

    let mut signals = snapshot(11, 5.0);
    signals.brake_pressed = true;

    let first = StateUpdater::update(&signals, &previous, &params);
    let second = StateUpdater::update(&signals, &previous, &params);

    assert_eq!(first.events, second.events);
    assert_eq!(first.frame, second.frame);
    assert_eq!(first.speed_mps, second.speed_mps);
}

#[test]
fn test_signal_fields_are_merged_into_snapshot() {
    let params = params_without_steer_check();
    let mut signals = snapshot(7, 12.5);
    signals.gear = GearState::Low;
    signals.steer_rate_limited = true;
    signals.gas_pressed = true;

    let state = StateUpdater::update(&signals, &VehicleState::uninitialized(), &params);

    assert_eq!(state.frame, 7);
    assert_eq!(state.speed_mps, 12.5);
    assert_eq!(state.gear, GearState::Low);
    assert!(state.steer_rate_limited);
    assert!(state.gas_pressed);
}
