//! Best-effort playback metric sampling.
//!
//! A [`MetricSampler`] answers the analytics SDK's [`StreamAdapter`] queries
//! from a [`MetricSource`]. Reads never fail: an unavailable value is reported
//! as the last good one (or 0) and, when a retry context is attached, re-read
//! once in the background so the next query sees a fresh value.

pub mod cache;
pub mod controller;
pub mod conversion;
pub mod source;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, trace};

pub use cache::{Metric, MetricCache};
pub use controller::{RetryController, RetryHandle};
pub use conversion::{DimensionGate, millis_to_seconds};
pub use source::{EngineSource, MetricSource, PushedSource};

use crate::config::SamplerConfig;
use crate::constants::UNKNOWN_PLAYER_NAME;
use crate::player::DisplayMetrics;
use crate::utils::SResult;

/// Static information about the player and the device it renders on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub player_name: String,
    pub player_version: String,
    pub screen_width: u32,
    pub screen_height: u32,
}

/// Snapshot of all numeric metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub position_seconds: u32,
    pub duration_seconds: u32,
    pub width_px: u32,
    pub height_px: u32,
    pub sampled_at: DateTime<Utc>,
}

/// Interface the streaming measurement SDK polls.
///
/// Implementations must return promptly and must never fail.
pub trait StreamAdapter: Send + Sync {
    fn get_meta(&self) -> Meta;
    /// Position in seconds
    fn get_position(&self) -> u32;
    /// Duration in seconds, 0 for live streams
    fn get_duration(&self) -> u32;
    /// Video width in pixels, 0 when unknown
    fn get_width(&self) -> u32;
    /// Video height in pixels, 0 when unknown
    fn get_height(&self) -> u32;
    fn is_casting(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct SamplerOptions {
    /// Reported player name; the source's own name is used when `None`
    pub player_name: Option<String>,
    pub player_version: String,
    pub live: bool,
    pub dimension_gate: DimensionGate,
    pub retry_on_failure: bool,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            player_name: None,
            player_version: env!("CARGO_PKG_VERSION").to_string(),
            live: false,
            dimension_gate: DimensionGate::default(),
            retry_on_failure: true,
        }
    }
}

impl From<&SamplerConfig> for SamplerOptions {
    fn from(config: &SamplerConfig) -> Self {
        Self {
            player_name: config.player.name.clone(),
            player_version: config.player.version.clone(),
            live: config.stream.live,
            dimension_gate: config.sampling.dimension_gate,
            retry_on_failure: config.sampling.retry_on_failure,
        }
    }
}

/// Read one metric from `source` and convert it to its reported unit.
///
/// Shared by the read path and by retries so both apply the same rules.
fn read_metric<S: MetricSource + ?Sized>(
    source: &S,
    metric: Metric,
    live: bool,
    gate: DimensionGate,
) -> SResult<u32> {
    match metric {
        Metric::Position => source.playhead_ms(live).map(millis_to_seconds),
        Metric::Duration if live => Ok(0),
        Metric::Duration => source.duration_ms().map(millis_to_seconds),
        Metric::Width => Ok(source
            .video_format()?
            .and_then(|format| gate.accept(format.width))
            .unwrap_or(0)),
        Metric::Height => Ok(source
            .video_format()?
            .and_then(|format| gate.accept(format.height))
            .unwrap_or(0)),
    }
}

pub struct MetricSampler<S: MetricSource> {
    source: Arc<S>,
    cache: Arc<MetricCache>,
    options: SamplerOptions,
    display: Arc<dyn DisplayMetrics>,
    retry: Option<RetryHandle>,
}

impl<S: MetricSource> MetricSampler<S> {
    pub fn new(source: S, options: SamplerOptions, display: Arc<dyn DisplayMetrics>) -> Self {
        debug!(
            "Creating metric sampler (live: {}, gate: {:?}, retry: {})",
            options.live, options.dimension_gate, options.retry_on_failure
        );
        Self {
            source: Arc::new(source),
            cache: Arc::new(MetricCache::new()),
            options,
            display,
            retry: None,
        }
    }

    /// Attach the context failed reads are retried on
    pub fn with_retry_context(mut self, retry: RetryHandle) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn options(&self) -> &SamplerOptions {
        &self.options
    }

    pub fn is_live(&self) -> bool {
        self.options.live
    }

    /// Last value reported for `metric`, without touching the source
    pub fn cached(&self, metric: Metric) -> u32 {
        self.cache.load(metric)
    }

    /// Read all four metrics at once
    pub fn sample(&self) -> Sample {
        Sample {
            position_seconds: self.get_position(),
            duration_seconds: self.get_duration(),
            width_px: self.get_width(),
            height_px: self.get_height(),
            sampled_at: Utc::now(),
        }
    }

    fn sample_metric(&self, metric: Metric) -> u32 {
        match read_metric(
            self.source.as_ref(),
            metric,
            self.options.live,
            self.options.dimension_gate,
        ) {
            Ok(value) => {
                self.cache.store(metric, value);
                value
            }
            Err(e) => {
                debug!("Failed to read {:?}, reporting cached value: {}", metric, e);
                self.schedule_retry(metric);
                self.cache.load(metric)
            }
        }
    }

    fn schedule_retry(&self, metric: Metric) {
        if !self.options.retry_on_failure {
            return;
        }
        let Some(ref retry) = self.retry else {
            return;
        };

        let source = Arc::clone(&self.source);
        let cache = Arc::clone(&self.cache);
        let live = self.options.live;
        let gate = self.options.dimension_gate;

        let posted = retry.post(move || {
            let value = read_metric(source.as_ref(), metric, live, gate)?;
            cache.store(metric, value);
            trace!("Retried {:?} read: {}", metric, value);
            Ok(())
        });
        if let Err(e) = posted {
            debug!("Could not schedule {:?} retry: {}", metric, e);
        }
    }
}

impl MetricSampler<PushedSource> {
    /// Push the latest position and duration, both in milliseconds
    pub fn set_playhead(&self, position_ms: i64, duration_ms: i64) {
        self.source.update_playhead(position_ms, duration_ms);
    }

    /// Push the latest raw video dimensions
    pub fn set_dimensions(&self, width: i32, height: i32) {
        self.source.update_dimensions(width, height);
    }
}

impl<S: MetricSource> StreamAdapter for MetricSampler<S> {
    fn get_meta(&self) -> Meta {
        let screen = self.display.screen_size();
        let player_name = self
            .options
            .player_name
            .clone()
            .or_else(|| self.source.player_name())
            .unwrap_or_else(|| UNKNOWN_PLAYER_NAME.to_string());

        Meta {
            player_name,
            player_version: self.options.player_version.clone(),
            screen_width: screen.width,
            screen_height: screen.height,
        }
    }

    fn get_position(&self) -> u32 {
        self.sample_metric(Metric::Position)
    }

    fn get_duration(&self) -> u32 {
        self.sample_metric(Metric::Duration)
    }

    fn get_width(&self) -> u32 {
        self.sample_metric(Metric::Width)
    }

    fn get_height(&self) -> u32 {
        self.sample_metric(Metric::Height)
    }

    fn is_casting(&self) -> bool {
        false
    }
}
