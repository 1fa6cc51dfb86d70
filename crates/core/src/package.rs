//! AI package records — the installable "kernels" listed in settings.
//!
//! Install progress is simulated by the telemetry crate; the records here
//! are plain display state persisted by a `PackageStore`.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageStatus {
    Available,
    Downloading,
    Installed,
    Running,
}

/// Category of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    Core,
    Driver,
    Logic,
}

/// An installable package record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiPackage {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub status: PackageStatus,
    /// 0–100 download progress
    pub progress: f64,
    pub kind: PackageKind,
}

/// The built-in package registry a fresh console ships with.
pub fn builtin_registry() -> Vec<AiPackage> {
    vec![
        AiPackage {
            id: "python.logic".into(),
            name: "Python Logic Kernel".into(),
            version: "2.4.1".into(),
            description: "Universal logic execution shard for complex math.".into(),
            status: PackageStatus::Available,
            progress: 0.0,
            kind: PackageKind::Core,
        },
        AiPackage {
            id: "vision.shards".into(),
            name: "Visual Diffusion Driver".into(),
            version: "5.0.0".into(),
            description: "Enables high-fidelity image synthesis.".into(),
            status: PackageStatus::Available,
            progress: 0.0,
            kind: PackageKind::Driver,
        },
        AiPackage {
            id: "vocal.engine".into(),
            name: "Vocal Resonance Synth".into(),
            version: "1.2.0".into(),
            description: "Human-parity audio synthesis kernel.".into(),
            status: PackageStatus::Installed,
            progress: 100.0,
            kind: PackageKind::Logic,
        },
    ]
}
