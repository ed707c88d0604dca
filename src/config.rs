//! Runtime-tunable configuration boundary.
//!
//! Parameter derivation reads a small set of live-tunable scalars (speed-adjust
//! ratio, minimum-steer check flag) from whatever store the host provides. The
//! store is read-only from this crate's perspective: callers capture one
//! snapshot per derivation call, never ambient globals.

use serde::Deserialize;
use std::collections::HashMap;

/// Runtime-tunable speed-adjust ratio, neutral at 1.0.
pub const SPEED_ADJUST_RATIO_KEY: &str = "speed_adjust_ratio";
/// Enables the minimum-steer-speed check during parameter derivation.
pub const MIN_STEER_CHECK_KEY: &str = "steer.check_minimum";

/// Neutral ratio used when the stored value is absent or out of range.
pub const NEUTRAL_SPEED_ADJUST_RATIO: f32 = 1.0;

/// Read-only view over the host's runtime parameter store.
pub trait RuntimeConfig {
    /// Returns the stored float for `key`, or `default` if unset.
    fn get_float(&self, key: &str, default: f32) -> f32;

    /// Returns the stored flag for `key`, false if unset.
    fn get_bool(&self, key: &str) -> bool;
}

/// Returns a speed-adjust ratio normalized into its valid range.
///
/// The store's raw default is a large sentinel meaning "unset"; anything
/// outside [0, 2] falls back to the neutral ratio rather than producing a
/// negative steering threshold downstream.
pub fn normalized_speed_adjust_ratio(config: &dyn RuntimeConfig) -> f32 {
    let ratio = config.get_float(SPEED_ADJUST_RATIO_KEY, NEUTRAL_SPEED_ADJUST_RATIO);
    if (0.0..=2.0).contains(&ratio) {
        ratio
    } else {
        tracing::debug!(ratio, "speed-adjust ratio out of range, using neutral");
        NEUTRAL_SPEED_ADJUST_RATIO
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum ConfigValue {
    Bool(bool),
    Float(f32),
}

/// In-memory [`RuntimeConfig`] implementation.
///
/// Hosts with a persistent store adapt it behind the trait instead; this one
/// covers tests and fixed deployments.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: HashMap<String, ConfigValue>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads key/value pairs from a flat JSON object.
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let values: HashMap<String, ConfigValue> = serde_json::from_str(json_str)?;
        Ok(Self { values })
    }

    pub fn set_float(&mut self, key: &str, value: f32) -> &mut Self {
        self.values.insert(key.into(), ConfigValue::Float(value));
        self
    }

    pub fn set_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.values.insert(key.into(), ConfigValue::Bool(value));
        self
    }
}

impl RuntimeConfig for StaticConfig {
    fn get_float(&self, key: &str, default: f32) -> f32 {
        match self.values.get(key) {
            Some(ConfigValue::Float(v)) => *v,
            _ => default,
        }
    }

    fn get_bool(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(ConfigValue::Bool(true)))
    }
}
