/// Common types exchanged with playback engines
use serde::{Deserialize, Serialize};

use super::traits::DisplayMetrics;
use crate::constants::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, NO_VALUE};

/// Format of the video track currently being rendered.
///
/// Either dimension may be [`NO_VALUE`] before the first frame is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoFormat {
    pub width: i32,
    pub height: i32,
}

impl VideoFormat {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn unknown() -> Self {
        Self {
            width: NO_VALUE,
            height: NO_VALUE,
        }
    }
}

/// A period of a streaming timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// Offset of the period's start relative to the start of its window.
    /// Negative when the period started before the window (typical at the live edge).
    pub position_in_window_ms: i64,
}

/// The engine's view of the media timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    periods: Vec<Period>,
}

impl Timeline {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(periods: Vec<Period>) -> Self {
        Self { periods }
    }

    pub fn single(position_in_window_ms: i64) -> Self {
        Self {
            periods: vec![Period {
                position_in_window_ms,
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    pub fn period(&self, index: usize) -> Option<&Period> {
        self.periods.get(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

/// Display with a fixed size, for hosts without a queryable display subsystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDisplay {
    size: ScreenSize,
}

impl FixedDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: ScreenSize { width, height },
        }
    }
}

impl DisplayMetrics for FixedDisplay {
    fn screen_size(&self) -> ScreenSize {
        self.size
    }
}
