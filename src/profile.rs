//! Vehicle-variant parameter derivation.
//!
//! All per-variant differences live in one static override table looked up at
//! derivation time, so no variant conditionals leak into the cycle path. The
//! result is a frozen [`VehicleParameters`] value: re-deriving builds a new
//! value, nothing mutates in place.

use crate::config::{normalized_speed_adjust_ratio, RuntimeConfig, MIN_STEER_CHECK_KEY};
use crate::dynamics;
use serde::Serialize;
use thiserror::Error;

/// Fixed cargo allowance added to curb mass.
pub const STD_CARGO_KG: f32 = 136.0;

/// Diagnostic message id whose presence in the fingerprint implies a factory
/// blind-spot monitor.
pub const BLIND_SPOT_MONITOR_MSG: u32 = 720;

const BASE_WHEELBASE_M: f32 = 3.089;
const BASE_STEER_RATIO: f32 = 16.2;
const BASE_CURB_MASS_KG: f32 = 1964.0;
const BASE_STEER_ACTUATOR_DELAY_S: f32 = 0.1;
const BASE_STEER_RATE_COST: f32 = 0.4;
const BASE_STEER_LIMIT_TIMER_S: f32 = 0.7;

const MIN_STEER_SPEED_LOW_TIER: f32 = 3.8;
const MIN_STEER_SPEED_HIGH_TIER: f32 = 17.5;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("unsupported vehicle variant: {0}")]
    UnsupportedVariant(String),
}

/// Supported vehicle variants of this family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VehicleVariant {
    MinivanHybrid2017,
    Minivan2018,
    MinivanHybrid2018,
    MinivanHybrid2019,
    Minivan2020,
    Suv,
    Suv2019,
}

impl VehicleVariant {
    pub const ALL: [Self; 7] = [
        Self::MinivanHybrid2017,
        Self::Minivan2018,
        Self::MinivanHybrid2018,
        Self::MinivanHybrid2019,
        Self::Minivan2020,
        Self::Suv,
        Self::Suv2019,
    ];

    /// Canonical identifier used on the variant-selection boundary.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::MinivanHybrid2017 => "minivan-hybrid-2017",
            Self::Minivan2018 => "minivan-2018",
            Self::MinivanHybrid2018 => "minivan-hybrid-2018",
            Self::MinivanHybrid2019 => "minivan-hybrid-2019",
            Self::Minivan2020 => "minivan-2020",
            Self::Suv => "suv",
            Self::Suv2019 => "suv-2019",
        }
    }

    pub fn from_identifier(identifier: &str) -> Result<Self, ProfileError> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.identifier() == identifier)
            .ok_or_else(|| ProfileError::UnsupportedVariant(identifier.into()))
    }

    /// Variants that need the higher re-engagement floor when the
    /// minimum-steer check is enabled.
    fn high_steer_tier(self) -> bool {
        matches!(
            self,
            Self::MinivanHybrid2019 | Self::Minivan2020 | Self::Suv2019
        )
    }
}

/// Breakpoint/value pairs for one speed-scheduled gain.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GainSchedule {
    pub breakpoints: &'static [f32],
    pub values: &'static [f32],
}

/// Active lateral-control tuning for this family.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LateralTuning {
    pub kp: GainSchedule,
    pub ki: GainSchedule,
    pub kf: f32,
}

const LATERAL_TUNING: LateralTuning = LateralTuning {
    kp: GainSchedule {
        breakpoints: &[0.0, 10.0, 30.0],
        values: &[0.03, 0.05, 0.06],
    },
    ki: GainSchedule {
        breakpoints: &[0.0, 30.0],
        values: &[0.02, 0.03],
    },
    kf: 0.000_02,
};

/// Per-variant deviations from the family base constants.
#[derive(Debug, Clone, Copy, Default)]
struct VariantOverrides {
    wheelbase_m: Option<f32>,
    steer_ratio: Option<f32>,
    steer_actuator_delay_s: Option<f32>,
    blind_spot_monitor: bool,
}

fn variant_overrides(variant: VehicleVariant) -> VariantOverrides {
    match variant {
        // Steering-angle-limited platform with a shorter wheelbase and a
        // slower rack; blind-spot monitor is standard equipment.
        VehicleVariant::Suv | VehicleVariant::Suv2019 => VariantOverrides {
            wheelbase_m: Some(2.91),
            steer_ratio: Some(12.7),
            steer_actuator_delay_s: Some(0.2),
            blind_spot_monitor: true,
        },
        _ => VariantOverrides::default(),
    }
}

/// Immutable physical and tuning parameters for one vehicle variant.
///
/// Created once per variant selection and shared read-only across cycles.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleParameters {
    pub variant: VehicleVariant,
    pub wheelbase_m: f32,
    pub steer_ratio: f32,
    pub center_to_front_m: f32,
    pub mass_kg: f32,
    pub rotational_inertia: f32,
    pub tire_stiffness_front: f32,
    pub tire_stiffness_rear: f32,
    pub lateral_tuning: LateralTuning,
    pub steer_actuator_delay_s: f32,
    pub steer_rate_cost: f32,
    pub steer_limit_timer_s: f32,
    pub min_steer_speed: f32,
    pub blind_spot_monitor: bool,
    pub long_range_control: bool,
}

/// Derives the frozen parameter set for a variant identifier.
///
/// Pure and deterministic for a given runtime-config snapshot; an unknown
/// identifier fails loudly since there is no plausible default vehicle.
pub fn derive_parameters(
    identifier: &str,
    fingerprint: &[u32],
    config: &dyn RuntimeConfig,
) -> Result<VehicleParameters, ProfileError> {
    let variant = VehicleVariant::from_identifier(identifier)?;
    Ok(derive_parameters_for(variant, fingerprint, config))
}

/// Derivation body for an already-resolved variant.
pub fn derive_parameters_for(
    variant: VehicleVariant,
    fingerprint: &[u32],
    config: &dyn RuntimeConfig,
) -> VehicleParameters {
    let overrides = variant_overrides(variant);

    let wheelbase_m = overrides.wheelbase_m.unwrap_or(BASE_WHEELBASE_M);
    let steer_ratio = overrides.steer_ratio.unwrap_or(BASE_STEER_RATIO);
    let steer_actuator_delay_s = overrides
        .steer_actuator_delay_s
        .unwrap_or(BASE_STEER_ACTUATOR_DELAY_S);
    let center_to_front_m = wheelbase_m * 0.44;
    let mass_kg = BASE_CURB_MASS_KG + STD_CARGO_KG;

    let min_steer_speed = if config.get_bool(MIN_STEER_CHECK_KEY) {
        let inverse_ratio = 2.0 - normalized_speed_adjust_ratio(config);
        let base_tier = if variant.high_steer_tier() {
            MIN_STEER_SPEED_HIGH_TIER
        } else {
            MIN_STEER_SPEED_LOW_TIER
        };
        base_tier * inverse_ratio
    } else {
        0.0
    };

    let rotational_inertia = dynamics::scale_rotational_inertia(mass_kg, wheelbase_m);
    let (tire_stiffness_front, tire_stiffness_rear) =
        dynamics::scale_tire_stiffness(mass_kg, wheelbase_m, center_to_front_m);

    let blind_spot_monitor =
        overrides.blind_spot_monitor || fingerprint.contains(&BLIND_SPOT_MONITOR_MSG);

    tracing::debug!(
        variant = variant.identifier(),
        min_steer_speed,
        blind_spot_monitor,
        "derived vehicle parameters"
    );

    VehicleParameters {
        variant,
        wheelbase_m,
        steer_ratio,
        center_to_front_m,
        mass_kg,
        rotational_inertia,
        tire_stiffness_front,
        tire_stiffness_rear,
        lateral_tuning: LATERAL_TUNING,
        steer_actuator_delay_s,
        steer_rate_cost: BASE_STEER_RATE_COST,
        steer_limit_timer_s: BASE_STEER_LIMIT_TIMER_S,
        min_steer_speed,
        blind_spot_monitor,
        long_range_control: true,
    }
}

/// Maps a longitudinal acceleration request onto the gas/brake axis.
pub fn compute_gas_brake(accel: f32) -> f32 {
    accel / 3.0
}
