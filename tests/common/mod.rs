
use reel_telemetry::player::FixedDisplay;
use reel_telemetry::{EngineSource, MetricSampler, SamplerOptions};
use std::sync::Arc;

use mocks::MockEngine;

pub type EngineSampler = MetricSampler<EngineSource<MockEngine>>;

pub fn vod_options() -> SamplerOptions {
    SamplerOptions {
        player_version: "1.0.0".to_string(),
        ..Default::default()
    }
}

pub fn live_options() -> SamplerOptions {
    SamplerOptions {
        live: true,
        ..vod_options()
    }
}

/// Sampler over `engine` without a retry context
pub fn sampler_for(engine: &Arc<MockEngine>, options: SamplerOptions) -> EngineSampler {
    MetricSampler::new(
        EngineSource::new(Arc::clone(engine)),
        options,
        Arc::new(FixedDisplay::new(1920, 1080)),
    )
}
