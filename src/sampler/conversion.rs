use serde::{Deserialize, Serialize};

use crate::constants::{MILLIS_PER_SECOND, NO_VALUE};

/// Convert an engine time in milliseconds to whole seconds, rounding half up.
///
/// Negative inputs (including [`TIME_UNSET`](crate::constants::TIME_UNSET)) map to 0
/// and values past `u32::MAX` seconds saturate.
pub fn millis_to_seconds(ms: i64) -> u32 {
    if ms <= 0 {
        return 0;
    }
    (ms as f64 / MILLIS_PER_SECOND).round() as u32
}

/// Which raw dimensions count as a real value.
///
/// Engines disagree on how they report an unknown dimension: some use the
/// [`NO_VALUE`] sentinel, others report 0 or a negative number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionGate {
    /// Anything but the sentinel is a value; negatives clamp to 0
    #[default]
    NotNoValue,
    /// Only strictly positive dimensions are values
    Positive,
}

impl DimensionGate {
    /// Returns `None` when `raw` is "no value" under this gate.
    pub fn accept(self, raw: i32) -> Option<u32> {
        match self {
            DimensionGate::NotNoValue if raw != NO_VALUE => Some(raw.max(0) as u32),
            DimensionGate::Positive if raw > 0 => Some(raw as u32),
            _ => None,
        }
    }
}
