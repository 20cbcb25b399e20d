use std::sync::Arc;
use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};

use tracing::trace;

use crate::constants::{NO_VALUE, TIME_UNSET};
use crate::player::{PlaybackEngine, VideoFormat};
use crate::utils::{SResult, SamplerError};

/// Where a sampler gets its raw readings from.
///
/// Values are in the engine's native units; conversion and gating happen in
/// the sampler.
pub trait MetricSource: Send + Sync + 'static {
    /// Playback position in milliseconds, including the live-edge offset when `live`
    fn playhead_ms(&self, live: bool) -> SResult<i64>;

    fn duration_ms(&self) -> SResult<i64>;

    fn video_format(&self) -> SResult<Option<VideoFormat>>;

    /// Name to report when the sampler was not given one
    fn player_name(&self) -> Option<String>;
}

/// Pulls every reading from a live engine handle.
pub struct EngineSource<E: PlaybackEngine + ?Sized> {
    engine: Arc<E>,
}

impl<E: PlaybackEngine + ?Sized> EngineSource<E> {
    pub fn new(engine: Arc<E>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    /// Offset of the current period within the timeline window, 0 on an empty timeline.
    fn live_offset_ms(&self) -> SResult<i64> {
        let timeline = self.engine.current_timeline()?;
        if timeline.is_empty() {
            trace!("Live timeline is empty, no offset applied");
            return Ok(0);
        }

        let index = self.engine.current_period_index()?;
        let period = timeline
            .period(index)
            .ok_or(SamplerError::PeriodOutOfRange {
                index,
                count: timeline.period_count(),
            })?;
        Ok(period.position_in_window_ms.saturating_abs())
    }
}

impl<E: PlaybackEngine + ?Sized + 'static> MetricSource for EngineSource<E> {
    fn playhead_ms(&self, live: bool) -> SResult<i64> {
        let position = self.engine.current_position_ms()?;
        if !live {
            return Ok(position);
        }
        Ok(position.saturating_add(self.live_offset_ms()?))
    }

    fn duration_ms(&self) -> SResult<i64> {
        self.engine.duration_ms()
    }

    fn video_format(&self) -> SResult<Option<VideoFormat>> {
        self.engine.video_format()
    }

    fn player_name(&self) -> Option<String> {
        Some(self.engine.runtime_name())
    }
}

/// Holds readings pushed by an external updater.
///
/// Used when the engine may only be touched from a thread other than the one
/// the analytics SDK samples on: that thread pushes, the sampler only reads.
#[derive(Debug)]
pub struct PushedSource {
    name: String,
    position_ms: AtomicI64,
    duration_ms: AtomicI64,
    width: AtomicI32,
    height: AtomicI32,
}

impl PushedSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position_ms: AtomicI64::new(0),
            duration_ms: AtomicI64::new(TIME_UNSET),
            width: AtomicI32::new(NO_VALUE),
            height: AtomicI32::new(NO_VALUE),
        }
    }

    /// Both values in milliseconds; any live-edge offset must already be applied.
    pub fn update_playhead(&self, position_ms: i64, duration_ms: i64) {
        self.position_ms.store(position_ms, Ordering::Relaxed);
        self.duration_ms.store(duration_ms, Ordering::Relaxed);
    }

    pub fn update_dimensions(&self, width: i32, height: i32) {
        self.width.store(width, Ordering::Relaxed);
        self.height.store(height, Ordering::Relaxed);
    }
}

impl MetricSource for PushedSource {
    fn playhead_ms(&self, _live: bool) -> SResult<i64> {
        Ok(self.position_ms.load(Ordering::Relaxed))
    }

    fn duration_ms(&self) -> SResult<i64> {
        Ok(self.duration_ms.load(Ordering::Relaxed))
    }

    fn video_format(&self) -> SResult<Option<VideoFormat>> {
        Ok(Some(VideoFormat::new(
            self.width.load(Ordering::Relaxed),
            self.height.load(Ordering::Relaxed),
        )))
    }

    fn player_name(&self) -> Option<String> {
        if self.name.is_empty() {
            None
        } else {
            Some(self.name.clone())
        }
    }
}
