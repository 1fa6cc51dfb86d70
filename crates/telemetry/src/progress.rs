//! Fake-progress step machines.
//!
//! Each simulator is a pure step function over an injected jitter source;
//! a driver (the CLI) ticks it on a timer and renders the state. Nothing
//! here performs the work the progress claims to report.

use crate::jitter::Jitter;

/// Whether a simulator has reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Running,
    Complete,
}

/// The package "download": up to 15 points of progress per tick.
#[derive(Debug, Clone)]
pub struct DownloadSim {
    progress: f64,
}

impl DownloadSim {
    pub fn new() -> Self {
        Self { progress: 0.0 }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn step(&mut self, jitter: &mut dyn Jitter) -> SimState {
        self.progress += jitter.next_f64() * 15.0;
        if self.progress >= 100.0 {
            self.progress = 100.0;
            SimState::Complete
        } else {
            SimState::Running
        }
    }
}

impl Default for DownloadSim {
    fn default() -> Self {
        Self::new()
    }
}

/// The hyper-tune reinforcement sweep: random jumps of up to one
/// twentieth of the target per tick, converging on the target cycle
/// count.
#[derive(Debug, Clone)]
pub struct HyperTuneSim {
    cycles: u64,
    target: u64,
}

impl HyperTuneSim {
    pub fn new(start_cycles: u64, target: u64) -> Self {
        Self {
            cycles: start_cycles,
            target,
        }
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Progress through the sweep, 0–100.
    pub fn percent(&self) -> f64 {
        if self.target == 0 {
            return 100.0;
        }
        (self.cycles as f64 / self.target as f64 * 100.0).min(100.0)
    }

    pub fn step(&mut self, jitter: &mut dyn Jitter) -> SimState {
        let jump = (jitter.next_f64() * (self.target as f64 / 20.0)) as u64 + 1;
        self.cycles = self.cycles.saturating_add(jump);
        if self.cycles >= self.target {
            self.cycles = self.target;
            SimState::Complete
        } else {
            SimState::Running
        }
    }
}

/// The voice forge: slow percentage crawl plus a runaway permutation
/// counter, both cosmetic.
#[derive(Debug, Clone)]
pub struct VoiceForgeSim {
    progress: f64,
    forged_cycles: u64,
}

impl VoiceForgeSim {
    pub fn new() -> Self {
        Self {
            progress: 0.0,
            forged_cycles: 0,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn forged_cycles(&self) -> u64 {
        self.forged_cycles
    }

    pub fn step(&mut self, jitter: &mut dyn Jitter) -> SimState {
        self.progress += jitter.next_f64() * 2.0;
        self.forged_cycles = self
            .forged_cycles
            .saturating_add((jitter.next_f64() * 2_000_000_000.0) as u64);
        if self.progress >= 100.0 {
            self.progress = 100.0;
            SimState::Complete
        } else {
            SimState::Running
        }
    }
}

impl Default for VoiceForgeSim {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::ScriptedJitter;

    #[test]
    fn download_completes_and_clamps() {
        let mut sim = DownloadSim::new();
        let mut jitter = ScriptedJitter::constant(1.0);
        let mut ticks = 0;
        while sim.step(&mut jitter) == SimState::Running {
            ticks += 1;
            assert!(ticks < 100, "download never completed");
        }
        assert_eq!(sim.progress(), 100.0);
        // 15 per tick: complete on the 7th step.
        assert_eq!(ticks, 6);
    }

    #[test]
    fn download_is_deterministic_with_scripted_jitter() {
        let script = vec![0.2, 0.8, 0.5];
        let mut a = DownloadSim::new();
        let mut b = DownloadSim::new();
        let mut ja = ScriptedJitter::new(script.clone());
        let mut jb = ScriptedJitter::new(script);
        for _ in 0..5 {
            a.step(&mut ja);
            b.step(&mut jb);
        }
        assert_eq!(a.progress(), b.progress());
    }

    #[test]
    fn hyper_tune_converges_on_target() {
        let target = 100_000_000_000;
        let mut sim = HyperTuneSim::new(500_000, target);
        let mut jitter = ScriptedJitter::constant(0.9);

        let mut ticks = 0;
        while sim.step(&mut jitter) == SimState::Running {
            ticks += 1;
            assert!(ticks < 1000, "hyper-tune never converged");
        }
        assert_eq!(sim.cycles(), target);
        assert_eq!(sim.percent(), 100.0);
    }

    #[test]
    fn hyper_tune_always_advances() {
        // Even zero jitter jumps by at least one cycle.
        let mut sim = HyperTuneSim::new(0, 1_000);
        let mut jitter = ScriptedJitter::constant(0.0);
        sim.step(&mut jitter);
        assert_eq!(sim.cycles(), 1);
    }

    #[test]
    fn voice_forge_tracks_both_counters() {
        let mut sim = VoiceForgeSim::new();
        let mut jitter = ScriptedJitter::constant(0.5);
        assert_eq!(sim.step(&mut jitter), SimState::Running);
        assert_eq!(sim.progress(), 1.0);
        assert_eq!(sim.forged_cycles(), 1_000_000_000);

        for _ in 0..200 {
            sim.step(&mut jitter);
        }
        assert_eq!(sim.progress(), 100.0);
    }
}
