//! Playback telemetry for Reel.
//!
//! Samples position, duration and video size from a playback engine for
//! streaming measurement SDKs, without ever failing or blocking the caller.

pub mod config;
pub mod constants;
pub mod player;
pub mod sampler;
pub mod utils;

pub use config::SamplerConfig;
pub use sampler::{
    EngineSource, Meta, MetricSampler, PushedSource, RetryController, RetryHandle, Sample,
    SamplerOptions, StreamAdapter,
};
pub use utils::{SResult, SamplerError};
