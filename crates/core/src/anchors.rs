//! The static daily anchor catalog.
//!
//! Five fixed anchors fire at their configured wall-clock time every day;
//! four randomized anchors are jittered by up to ±30 minutes each time the
//! schedule is rebuilt. The orchestrator derives job identifiers from the
//! anchor names (`daily_morning`, `random_random1`, ...), so the names here
//! are stable keys, not display strings.

use serde::{Deserialize, Serialize};

/// A configured daily slot: the nominal wall-clock time a reminder should
/// fire, plus the stable name the job identifier is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorSpec {
    pub name: &'static str,
    pub hour: u32,
    pub minute: u32,
}

/// Anchors scheduled verbatim, one recurring job per entry.
pub const FIXED_ANCHORS: [AnchorSpec; 5] = [
    AnchorSpec { name: "morning", hour: 9, minute: 0 },
    AnchorSpec { name: "afternoon", hour: 13, minute: 0 },
    AnchorSpec { name: "evening", hour: 17, minute: 0 },
    AnchorSpec { name: "night", hour: 21, minute: 0 },
    AnchorSpec { name: "late_night", hour: 23, minute: 0 },
];

/// Anchors used as jitter bases; their scheduled time moves every rebuild.
pub const RANDOM_ANCHORS: [AnchorSpec; 4] = [
    AnchorSpec { name: "random1", hour: 11, minute: 30 },
    AnchorSpec { name: "random2", hour: 15, minute: 30 },
    AnchorSpec { name: "random3", hour: 19, minute: 30 },
    AnchorSpec { name: "random4", hour: 23, minute: 0 },
];
