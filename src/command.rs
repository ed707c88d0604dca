//! High-level command to bus-frame translation.
//!
//! The translator never builds frames itself; it gates on the first-valid-frame
//! guard, assembles the encode context (including the steering limits from the
//! frozen parameter set) and delegates to the vehicle-specific
//! [`CommandEncoder`]. Rate and magnitude clamping happen inside the encoder,
//! parameterized by [`SteerLimits`].

use crate::profile::VehicleParameters;
use crate::signals::FrameList;
use crate::state::{VehicleState, GAS_RESUME_SPEED};
use heapless::Vec;
use serde::{Deserialize, Serialize};

pub const MAX_VENDOR_PAYLOAD: usize = 64;

/// Opaque vendor-specific extension payload, passed through untouched.
pub type VendorPayload = Vec<u8, MAX_VENDOR_PAYLOAD>;

/// Desired actuator values from the upstream controller.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActuatorSetpoints {
    pub steer_torque: f32,
    pub steer_angle_deg: f32,
    pub accel_mps2: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VisualAlert {
    #[default]
    None,
    SteerRequired,
    BrakePressed,
    WrongGear,
    SeatbeltUnbuckled,
    SpeedTooHigh,
}

/// One high-level control command, received once per cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControlRequest {
    pub enabled: bool,
    pub actuators: ActuatorSetpoints,
    pub cancel: bool,
    pub visual_alert: VisualAlert,
    pub vendor_payload: VendorPayload,
}

/// Steering limit knobs the encoder enforces.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SteerLimits {
    pub rate_cost: f32,
    pub actuator_delay_s: f32,
    pub limit_timer_s: f32,
}

impl SteerLimits {
    pub fn from_parameters(parameters: &VehicleParameters) -> Self {
        Self {
            rate_cost: parameters.steer_rate_cost,
            actuator_delay_s: parameters.steer_actuator_delay_s,
            limit_timer_s: parameters.steer_limit_timer_s,
        }
    }
}

/// Everything the vehicle-specific encoder needs for one cycle.
#[derive(Debug)]
pub struct EncodeContext<'a> {
    pub enabled: bool,
    pub state: &'a VehicleState,
    pub actuators: ActuatorSetpoints,
    pub cancel: bool,
    pub visual_alert: VisualAlert,
    pub resume_speed: f32,
    pub limits: SteerLimits,
    pub vendor_payload: &'a VendorPayload,
}

/// Serializes actuator intents into ordered outbound frames.
pub trait CommandEncoder {
    fn encode(&mut self, context: &EncodeContext<'_>) -> FrameList;
}

/// Stateless translation from control request to frame sequence.
pub struct CommandTranslator;

impl CommandTranslator {
    /// Translates one request against the current state.
    ///
    /// Returns an empty sequence until the first valid frame has been
    /// observed: never actuate a vehicle we have not yet heard from.
    pub fn translate<E: CommandEncoder>(
        request: &ControlRequest,
        state: &VehicleState,
        parameters: &VehicleParameters,
        encoder: &mut E,
    ) -> FrameList {
        if !state.is_initialized() {
            return FrameList::new();
        }

        let context = EncodeContext {
            enabled: request.enabled,
            state,
            actuators: request.actuators,
            cancel: request.cancel,
            visual_alert: request.visual_alert,
            resume_speed: GAS_RESUME_SPEED,
            limits: SteerLimits::from_parameters(parameters),
            vendor_payload: &request.vendor_payload,
        };

        encoder.encode(&context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticConfig;
    use crate::profile::derive_parameters;

    struct CountingEncoder {
        calls: u32,
    }

    impl CommandEncoder for CountingEncoder {
        fn encode(&mut self, _context: &EncodeContext<'_>) -> FrameList {
            self.calls += 1;
            FrameList::new()
        }
    }

    #[test]
    fn encoder_is_not_reached_before_first_frame() {
        let params = derive_parameters("suv", &[], &StaticConfig::new()).unwrap();
        let mut encoder = CountingEncoder { calls: 0 };

        let frames = CommandTranslator::translate(
            &ControlRequest::default(),
            &VehicleState::uninitialized(),
            &params,
            &mut encoder,
        );

        assert!(frames.is_empty());
        assert_eq!(encoder.calls, 0);
    }

    #[test]
    fn limits_come_from_the_frozen_parameters() {
        let params = derive_parameters("suv", &[], &StaticConfig::new()).unwrap();
        let limits = SteerLimits::from_parameters(&params);

        assert_eq!(limits.actuator_delay_s, 0.2);
        assert_eq!(limits.rate_cost, 0.4);
        assert_eq!(limits.limit_timer_s, 0.7);
    }
}
