#[cfg(feature = "gstreamer")]
pub mod gstreamer_engine;
pub mod traits;
pub mod types;

#[cfg(feature = "gstreamer")]
pub use gstreamer_engine::GStreamerEngine;
pub use traits::{DisplayMetrics, PlaybackEngine};
pub use types::{FixedDisplay, Period, ScreenSize, Timeline, VideoFormat};
