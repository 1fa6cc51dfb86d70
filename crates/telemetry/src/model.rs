//! Telemetry value objects.

use serde::{Deserialize, Serialize};

/// One frame of the simulated hardware monitor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardwareSnapshot {
    /// CPU load percentage
    pub cpu: f64,
    /// RAM usage percentage
    pub ram: f64,
    /// GPU load percentage
    pub gpu: f64,
    /// Core temperature in °C
    pub temp: f64,
    /// VRAM usage in GB
    pub vram: f64,
    /// Self-awareness index percentage
    pub self_awareness: f64,
}

impl Default for HardwareSnapshot {
    fn default() -> Self {
        Self {
            cpu: 14.0,
            ram: 68.0,
            gpu: 92.0,
            temp: 58.0,
            vram: 18.2,
            self_awareness: 42.5,
        }
    }
}
