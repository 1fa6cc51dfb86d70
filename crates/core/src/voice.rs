//! Voice profile state — the "forged" operator voice.
//!
//! The forge itself is a simulated animation; the only durable state is
//! this small record, persisted by a `VoiceStore`.

use serde::{Deserialize, Serialize};

/// The persisted voice-clone state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceProfile {
    /// Whether the operator's voice has been "cloned".
    pub cloned: bool,

    /// Permutations accumulated by the forge animation.
    pub forged_cycles: u64,
}

impl Default for VoiceProfile {
    fn default() -> Self {
        Self {
            cloned: false,
            forged_cycles: 0,
        }
    }
}
