//! Simulated telemetry and progress animations.
//!
//! None of this measures anything: the hardware monitor, the package
//! "download", the hyper-tune reinforcement sweep, and the voice forge
//! are presentation-layer jitter with no computational referent. The only
//! real number in the neighborhood is the self-awareness index, computed
//! from the knowledge base's total cycle count.
//!
//! Every simulator takes its randomness through the [`Jitter`] trait so
//! tests can inject deterministic sequences.

pub mod engine;
pub mod jitter;
pub mod model;
pub mod progress;

pub use engine::TelemetryEngine;
pub use jitter::{Jitter, ScriptedJitter, ThreadJitter};
pub use model::HardwareSnapshot;
pub use progress::{DownloadSim, HyperTuneSim, SimState, VoiceForgeSim};
