//! Per-cycle vehicle state machine and event derivation.
//!
//! Each control cycle folds one [`SignalSnapshot`] and the previous snapshot
//! into a fresh [`VehicleState`]. The adapter retains exactly one state;
//! event derivation only needs the prior cycle's cruise and standstill flags,
//! so no deeper history exists anywhere in this crate.
//!
//! Invalid decode sources never raise: they clear `bus_valid` and the caller
//! refuses engagement on an invalid snapshot.

use crate::profile::VehicleParameters;
use crate::signals::{ButtonList, ButtonPress, GearState, SignalSnapshot};
use heapless::Vec;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

/// Speed below which a brake-held stop may still resume on gas (m/s).
pub const GAS_RESUME_SPEED: f32 = 2.0;

pub const MAX_EVENTS: usize = 8;

// Every event category must fit in one cycle's list.
const_assert!(MAX_EVENTS >= 5);

/// Discrete control-relevant occurrence detected this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleEvent {
    /// Brake held while slow enough that gas could otherwise resume.
    BrakeHold,
    /// Too slow for the steering actuator to engage.
    BelowSteerSpeed,
    /// Driver pressed the cancel button.
    DriverCancel,
    /// Cruise transitioned disengaged -> engaged this cycle.
    EngagementConfirmed,
    /// Cruise dropped out while moving too fast or already rolling; do not
    /// silently resume.
    DisengagementForced,
}

pub type EventList = Vec<VehicleEvent, MAX_EVENTS>;

/// Canonical vehicle-state snapshot, replaced wholesale each cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleState {
    pub frame: i64,
    pub speed_mps: f32,
    pub cruise_engaged: bool,
    pub brake_pressed: bool,
    pub gas_pressed: bool,
    pub standstill: bool,
    pub steer_rate_limited: bool,
    pub gear: GearState,
    pub buttons: ButtonList,
    pub bus_valid: bool,
    pub events: EventList,
}

impl VehicleState {
    pub const UNINITIALIZED_FRAME: i64 = -1;

    /// State before the first valid decode; never actuated on.
    pub fn uninitialized() -> Self {
        Self {
            frame: Self::UNINITIALIZED_FRAME,
            speed_mps: 0.0,
            cruise_engaged: false,
            brake_pressed: false,
            gas_pressed: false,
            standstill: true,
            steer_rate_limited: false,
            gear: GearState::Unknown,
            buttons: ButtonList::new(),
            bus_valid: false,
            events: EventList::new(),
        }
    }

    /// True once any decoded frame has been observed. Monotonic for the
    /// adapter's lifetime: there is no transition back.
    pub fn is_initialized(&self) -> bool {
        self.frame >= 0
    }

    pub fn has_event(&self, event: VehicleEvent) -> bool {
        self.events.contains(&event)
    }
}

/// The per-cycle state machine.
pub struct StateUpdater;

impl StateUpdater {
    /// Folds one decoded snapshot into a new state and derives its events.
    ///
    /// Pure in its inputs: identical `signals` and `previous` produce an
    /// identical result, events included.
    pub fn update(
        signals: &SignalSnapshot,
        previous: &VehicleState,
        parameters: &VehicleParameters,
    ) -> VehicleState {
        let mut events = EventList::new();

        // Brake-hold and below-steer-speed are mutually exclusive; the
        // override takes precedence.
        if signals.brake_pressed && signals.speed_mps < GAS_RESUME_SPEED {
            let _ = events.push(VehicleEvent::BrakeHold);
        } else if signals.speed_mps < parameters.min_steer_speed {
            let _ = events.push(VehicleEvent::BelowSteerSpeed);
        }

        // An explicit cancel outranks any engage/disengage edge this cycle.
        if signals.button_pressed(ButtonPress::Cancel) {
            let _ = events.push(VehicleEvent::DriverCancel);
        } else if signals.cruise_engaged && !previous.cruise_engaged {
            let _ = events.push(VehicleEvent::EngagementConfirmed);
        } else if !signals.cruise_engaged
            && (signals.speed_mps > GAS_RESUME_SPEED
                || (previous.cruise_engaged && !signals.standstill))
        {
            let _ = events.push(VehicleEvent::DisengagementForced);
        }

        if !signals.valid && previous.bus_valid {
            tracing::warn!(frame = signals.frame, "bus snapshot became invalid");
        }

        VehicleState {
            frame: signals.frame,
            speed_mps: signals.speed_mps,
            cruise_engaged: signals.cruise_engaged,
            brake_pressed: signals.brake_pressed,
            gas_pressed: signals.gas_pressed,
            standstill: signals.standstill,
            steer_rate_limited: signals.steer_rate_limited,
            gear: signals.gear,
            buttons: signals.buttons.clone(),
            bus_valid: signals.valid,
            events,
        }
    }
}
