//! Per-cycle orchestrator.
//!
//! One external scheduler drives decode -> update -> translate once per fixed
//! period. The adapter owns the single retained [`VehicleState`] and assumes
//! exclusive, serialized access to it; a concurrent host must serialize calls
//! into this type itself. Parameters are frozen at construction and shared
//! read-only for the adapter's whole lifetime.

use crate::command::{CommandEncoder, CommandTranslator, ControlRequest};
use crate::config::RuntimeConfig;
use crate::profile::{derive_parameters, ProfileError, VehicleParameters};
use crate::signals::{BusFrame, BusSignalReader, FrameList};
use crate::state::{StateUpdater, VehicleState};

pub struct ControlAdapter<R, E> {
    parameters: VehicleParameters,
    state: VehicleState,
    reader: R,
    encoder: E,
}

impl<R: BusSignalReader, E: CommandEncoder> ControlAdapter<R, E> {
    /// Builds the adapter for one vehicle variant.
    ///
    /// Fails loudly on an unknown identifier; there is no default vehicle to
    /// fall back to.
    pub fn new(
        identifier: &str,
        fingerprint: &[u32],
        config: &dyn RuntimeConfig,
        reader: R,
        encoder: E,
    ) -> Result<Self, ProfileError> {
        let parameters = derive_parameters(identifier, fingerprint, config)?;
        Ok(Self {
            parameters,
            state: VehicleState::uninitialized(),
            reader,
            encoder,
        })
    }

    /// Decodes one cycle's frame batch and folds it into the retained state.
    pub fn update(&mut self, frames: &[BusFrame]) -> &VehicleState {
        let signals = self.reader.decode(frames);
        self.state = StateUpdater::update(&signals, &self.state, &self.parameters);
        &self.state
    }

    /// Translates one control request into outbound frames.
    ///
    /// Empty until the first valid frame has been observed.
    pub fn apply(&mut self, request: &ControlRequest) -> FrameList {
        CommandTranslator::translate(request, &self.state, &self.parameters, &mut self.encoder)
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn parameters(&self) -> &VehicleParameters {
        &self.parameters
    }
}
