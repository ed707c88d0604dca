//! # Vehicle Control Bus Adapter
//!
//! A per-vehicle control adapter that sits between a generic autonomous-driving
//! control loop and a specific vehicle's sensor/actuator bus.
//!
//! ## Features
//!
//! - **Parameter derivation**: Static geometry/tuning constants plus
//!   runtime-tunable thresholds, frozen into a [`VehicleParameters`] value
//! - **Per-cycle state folding**: Decoded bus signals merged into a canonical
//!   [`VehicleState`] snapshot with discrete control events
//! - **Command translation**: High-level control requests turned into ordered
//!   outbound bus frames, gated on first-valid-frame
//! - **Fail-closed validity**: A single invalid decode source degrades the
//!   whole snapshot's validity flag instead of raising
//! - **Embedded-friendly**: Bounded collections, no heap growth in the cycle path
//!
//! ## Quick Start
//!
//! ```rust
//! use carbus::{derive_parameters, StaticConfig, VehicleState};
//!
//! let config = StaticConfig::new();
//! let params = derive_parameters("minivan-hybrid-2017", &[], &config).unwrap();
//! assert_eq!(params.center_to_front_m, params.wheelbase_m * 0.44);
//!
//! let state = VehicleState::uninitialized();
//! assert!(!state.is_initialized());
//! // each cycle: decode frames externally, then fold the snapshot:
//! // state = StateUpdater::update(&snapshot, &state, &params);
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - Runtime-tunable configuration boundary
//! - [`profile`] - Vehicle-variant parameter derivation
//! - [`dynamics`] - Inertia and tire-stiffness scaling
//! - [`signals`] - Decoded bus signal types and the reader trait
//! - [`state`] - Per-cycle state machine and event derivation
//! - [`command`] - High-level command to bus-frame translation
//! - [`adapter`] - Cycle orchestrator owning the retained state

#![deny(warnings)]
#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapter;
pub mod command;
pub mod config;
pub mod dynamics;
pub mod profile;
pub mod signals;
pub mod state;

// Re-export main public types for convenience
pub use adapter::ControlAdapter;
pub use command::{CommandEncoder, CommandTranslator, ControlRequest};
pub use config::{RuntimeConfig, StaticConfig};
pub use profile::{derive_parameters, ProfileError, VehicleParameters, VehicleVariant};
pub use signals::{BusFrame, BusSignalReader, SignalSnapshot};
pub use state::{StateUpdater, VehicleEvent, VehicleState};
