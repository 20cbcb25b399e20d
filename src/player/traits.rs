use super::types::{ScreenSize, Timeline, VideoFormat};
use crate::utils::SResult;

/// Read-only view of an embedded playback engine.
///
/// Every query may fail transiently (engine released, wrong thread, not
/// prepared yet). Implementations must not change playback state.
pub trait PlaybackEngine: Send + Sync {
    /// Current playback position in milliseconds
    fn current_position_ms(&self) -> SResult<i64>;

    /// Media duration in milliseconds, or [`TIME_UNSET`](crate::constants::TIME_UNSET)
    fn duration_ms(&self) -> SResult<i64>;

    /// Format of the rendered video track, `None` before one is selected
    fn video_format(&self) -> SResult<Option<VideoFormat>>;

    fn current_timeline(&self) -> SResult<Timeline>;

    fn current_period_index(&self) -> SResult<usize>;

    /// Identity of the engine implementation, reported as the player name
    fn runtime_name(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

/// Host display subsystem
pub trait DisplayMetrics: Send + Sync {
    fn screen_size(&self) -> ScreenSize;
}
