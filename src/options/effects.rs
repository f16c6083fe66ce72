use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Timing of one-shot scene effects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Effects", inline)]
#[serde(default)]
pub struct EffectsOptions {
    /// How long a fireworks burst stays active, in milliseconds.
    #[schemars(title = "Fireworks Duration", range(min = 100, max = 20000))]
    pub fireworks_duration_ms: u64,
}

impl Default for EffectsOptions {
    fn default() -> Self {
        Self {
            fireworks_duration_ms: 3000,
        }
    }
}
