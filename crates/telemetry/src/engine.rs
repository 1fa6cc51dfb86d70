//! The hardware-monitor random walk.
//!
//! Thread-safe via `RwLock`. Each `tick` nudges every gauge by a bounded
//! random step and clamps it to its display band; the walk has no
//! relationship to real load. The awareness gauge can instead be pinned
//! to the real index derived from the knowledge base.

use crate::jitter::Jitter;
use crate::model::HardwareSnapshot;
use aaayafuj_core::shard::awareness_index;
use std::sync::RwLock;

/// The telemetry engine. Create one and tick it on a timer.
pub struct TelemetryEngine {
    snapshot: RwLock<HardwareSnapshot>,
}

impl TelemetryEngine {
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(HardwareSnapshot::default()),
        }
    }

    /// Current gauge values.
    pub fn snapshot(&self) -> HardwareSnapshot {
        *self.snapshot.read().expect("telemetry lock poisoned")
    }

    /// Advance the random walk by one frame.
    pub fn tick(&self, jitter: &mut dyn Jitter) {
        let mut s = self.snapshot.write().expect("telemetry lock poisoned");
        s.cpu = walk(s.cpu, jitter.next_f64(), 10.0, 5.0, 95.0);
        s.ram = walk(s.ram, jitter.next_f64(), 2.0, 60.0, 85.0);
        s.gpu = walk(s.gpu, jitter.next_f64(), 4.0, 80.0, 99.0);
        s.temp = walk(s.temp, jitter.next_f64(), 4.0, 45.0, 85.0);
        s.vram = walk(s.vram, jitter.next_f64(), 0.5, 16.0, 24.0);
        s.self_awareness = walk(s.self_awareness, jitter.next_f64(), 0.1, 0.0, 100.0);
    }

    /// Pin the awareness gauge to the real index for a cycle total.
    pub fn set_awareness_from_cycles(&self, total_cycles: u64) {
        let mut s = self.snapshot.write().expect("telemetry lock poisoned");
        s.self_awareness = awareness_index(total_cycles);
    }
}

impl Default for TelemetryEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// One clamped random-walk step: `value + (j * span - span/2)`.
fn walk(value: f64, j: f64, span: f64, min: f64, max: f64) -> f64 {
    (value + (j * span - span / 2.0)).clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::ScriptedJitter;

    #[test]
    fn tick_respects_bands() {
        let engine = TelemetryEngine::new();
        // Max upward jitter for many frames: every gauge must stay
        // clamped to its band.
        let mut jitter = ScriptedJitter::constant(0.999);
        for _ in 0..100 {
            engine.tick(&mut jitter);
        }
        let s = engine.snapshot();
        assert!(s.cpu <= 95.0);
        assert!(s.ram <= 85.0);
        assert!(s.gpu <= 99.0);
        assert!(s.temp <= 85.0);
        assert!(s.vram <= 24.0);
        assert!(s.self_awareness <= 100.0);

        // And max downward jitter.
        let mut jitter = ScriptedJitter::constant(0.0);
        for _ in 0..200 {
            engine.tick(&mut jitter);
        }
        let s = engine.snapshot();
        assert!(s.cpu >= 5.0);
        assert!(s.ram >= 60.0);
        assert!(s.gpu >= 80.0);
        assert!(s.temp >= 45.0);
        assert!(s.vram >= 16.0);
        assert!(s.self_awareness >= 0.0);
    }

    #[test]
    fn neutral_jitter_holds_steady() {
        let engine = TelemetryEngine::new();
        let before = engine.snapshot();
        let mut jitter = ScriptedJitter::constant(0.5);
        engine.tick(&mut jitter);
        let after = engine.snapshot();
        assert!((before.cpu - after.cpu).abs() < 1e-9);
        assert!((before.vram - after.vram).abs() < 1e-9);
    }

    #[test]
    fn awareness_pin_uses_real_index() {
        let engine = TelemetryEngine::new();
        engine.set_awareness_from_cycles(2_000_000_000);
        assert!((engine.snapshot().self_awareness - 20.0).abs() < 1e-9);
    }
}
