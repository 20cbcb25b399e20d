use gstreamer as gst;
use gstreamer::prelude::*;
use tracing::trace;

use super::traits::PlaybackEngine;
use super::types::{Timeline, VideoFormat};
use crate::constants::{NO_VALUE, TIME_UNSET};
use crate::utils::{SResult, SamplerError};

/// [`PlaybackEngine`] over a GStreamer pipeline (usually a `playbin`).
///
/// Only queries the pipeline; unlike the player itself it never forces a state
/// change to make dimensions available.
pub struct GStreamerEngine {
    pipeline: gst::Element,
}

impl GStreamerEngine {
    pub fn new(pipeline: gst::Element) -> Self {
        Self { pipeline }
    }

    fn video_sink(&self) -> Option<gst::Element> {
        self.pipeline.find_property("video-sink")?;
        self.pipeline.property::<Option<gst::Element>>("video-sink")
    }
}

impl PlaybackEngine for GStreamerEngine {
    fn current_position_ms(&self) -> SResult<i64> {
        if self.pipeline.current_state() < gst::State::Paused {
            return Err(SamplerError::EngineUnavailable(
                "pipeline is not prerolled".to_string(),
            ));
        }
        self.pipeline
            .query_position::<gst::ClockTime>()
            .map(|pos| pos.mseconds() as i64)
            .ok_or_else(|| SamplerError::Engine("position query failed".to_string()))
    }

    fn duration_ms(&self) -> SResult<i64> {
        // Live sources answer the duration query with nothing
        Ok(self
            .pipeline
            .query_duration::<gst::ClockTime>()
            .map(|dur| dur.mseconds() as i64)
            .unwrap_or(TIME_UNSET))
    }

    fn video_format(&self) -> SResult<Option<VideoFormat>> {
        let Some(video_sink) = self.video_sink() else {
            trace!("pipeline has no video sink");
            return Ok(None);
        };

        if let Some(sink_pad) = video_sink.static_pad("sink")
            && let Some(caps) = sink_pad.current_caps()
            && let Some(structure) = caps.structure(0)
        {
            let width = structure.get::<i32>("width").unwrap_or(NO_VALUE);
            let height = structure.get::<i32>("height").unwrap_or(NO_VALUE);
            return Ok(Some(VideoFormat::new(width, height)));
        }

        Ok(None)
    }

    fn current_timeline(&self) -> SResult<Timeline> {
        // A pipeline plays a single period whose window starts at the segment start
        if self.pipeline.query_position::<gst::ClockTime>().is_some() {
            Ok(Timeline::single(0))
        } else {
            Ok(Timeline::empty())
        }
    }

    fn current_period_index(&self) -> SResult<usize> {
        Ok(0)
    }

    fn runtime_name(&self) -> String {
        format!("GStreamer {}", gst::version_string())
    }
}
