use serde::{Deserialize, Serialize};

pub const DEFAULT_ALERT_THRESHOLD: f32 = 0.7;

/// Decides whether a verdict interrupts the speaker. The comparison is strict:
/// a score equal to the threshold stays quiet.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AlertGate {
    pub threshold: f32,
}

impl Default for AlertGate {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ALERT_THRESHOLD,
        }
    }
}

impl AlertGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn should_alert(&self, bullshit_score: f32) -> bool {
        bullshit_score > self.threshold
    }
}
