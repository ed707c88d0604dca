//! Inertia and tire-stiffness scaling.
//!
//! Starts from empirically derived reference-sedan values and scales by mass
//! and CG position so every variant ends up with approximately similar dynamic
//! behavior.

const REFERENCE_MASS_KG: f32 = 1326.0 + crate::profile::STD_CARGO_KG;
const REFERENCE_WHEELBASE_M: f32 = 2.70;
const REFERENCE_CENTER_TO_FRONT_M: f32 = REFERENCE_WHEELBASE_M * 0.4;
const REFERENCE_CENTER_TO_REAR_M: f32 = REFERENCE_WHEELBASE_M - REFERENCE_CENTER_TO_FRONT_M;
const REFERENCE_ROTATIONAL_INERTIA: f32 = 2500.0;
const REFERENCE_TIRE_STIFFNESS_FRONT: f32 = 192_150.0;
const REFERENCE_TIRE_STIFFNESS_REAR: f32 = 202_500.0;

/// Scales the reference rotational inertia by mass and wheelbase.
pub fn scale_rotational_inertia(mass_kg: f32, wheelbase_m: f32) -> f32 {
    REFERENCE_ROTATIONAL_INERTIA * mass_kg * wheelbase_m * wheelbase_m
        / (REFERENCE_MASS_KG * REFERENCE_WHEELBASE_M * REFERENCE_WHEELBASE_M)
}

/// Scales the reference lateral slip stiffness by mass and CG position.
///
/// Returns `(front, rear)` stiffness.
pub fn scale_tire_stiffness(mass_kg: f32, wheelbase_m: f32, center_to_front_m: f32) -> (f32, f32) {
    debug_assert!(
        center_to_front_m < wheelbase_m,
        "center-to-front {} must be inside wheelbase {}",
        center_to_front_m,
        wheelbase_m
    );

    let center_to_rear_m = wheelbase_m - center_to_front_m;
    let mass_ratio = mass_kg / REFERENCE_MASS_KG;

    let front = REFERENCE_TIRE_STIFFNESS_FRONT * mass_ratio * (center_to_rear_m / wheelbase_m)
        / (REFERENCE_CENTER_TO_REAR_M / REFERENCE_WHEELBASE_M);
    let rear = REFERENCE_TIRE_STIFFNESS_REAR * mass_ratio * (center_to_front_m / wheelbase_m)
        / (REFERENCE_CENTER_TO_FRONT_M / REFERENCE_WHEELBASE_M);

    (front, rear)
}
