//! Decoded bus signal types and the reader boundary.
//!
//! Raw frame decoding lives outside this crate; a [`BusSignalReader`] turns a
//! per-cycle frame batch into one [`SignalSnapshot`]. Everything here is a
//! plain value type so a snapshot can be handed across the boundary and
//! dropped after the cycle.

use heapless::Vec;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

pub const FRAME_DATA_LEN: usize = 8;
pub const MAX_FRAMES_PER_CYCLE: usize = 64;
pub const MAX_BUTTONS: usize = 8;

const_assert!(FRAME_DATA_LEN <= 8); // classic CAN payload bound

/// One raw bus frame, opaque to this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusFrame {
    pub address: u32,
    pub bus: u8,
    pub data: Vec<u8, FRAME_DATA_LEN>,
}

pub type FrameList = Vec<BusFrame, MAX_FRAMES_PER_CYCLE>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GearState {
    Park,
    Reverse,
    Neutral,
    Drive,
    Low,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonPress {
    Cancel,
    ResumeAccel,
    Decel,
    Follow,
}

pub type ButtonList = Vec<ButtonPress, MAX_BUTTONS>;

/// Signals decoded from one cycle's frame batch.
///
/// `frame` is the decoder's monotonic frame counter; -1 means the decoder has
/// not yet seen the message it keys on. `valid` is the AND of every decode
/// source's validity flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalSnapshot {
    pub frame: i64,
    pub speed_mps: f32,
    pub cruise_engaged: bool,
    pub brake_pressed: bool,
    pub gas_pressed: bool,
    pub standstill: bool,
    pub steer_rate_limited: bool,
    pub gear: GearState,
    pub buttons: ButtonList,
    pub valid: bool,
}

impl SignalSnapshot {
    pub fn button_pressed(&self, button: ButtonPress) -> bool {
        self.buttons.contains(&button)
    }
}

/// Per-cycle decoder from raw frames to structured signals.
pub trait BusSignalReader {
    fn decode(&mut self, frames: &[BusFrame]) -> SignalSnapshot;
}
