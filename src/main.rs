use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use reel_telemetry::constants::{NO_VALUE, TIME_UNSET};
use reel_telemetry::{MetricSampler, PushedSource, SamplerConfig, SamplerOptions, StreamAdapter};

/// One line of replay input, as an external updater would push it
#[derive(Debug, Deserialize)]
struct PlayheadUpdate {
    position_ms: i64,
    #[serde(default = "unset_duration")]
    duration_ms: i64,
    #[serde(default = "no_value")]
    width: i32,
    #[serde(default = "no_value")]
    height: i32,
}

fn unset_duration() -> i64 { TIME_UNSET }
fn no_value() -> i32 { NO_VALUE }

fn main() -> Result<()> {
    // Samples go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reel_telemetry=info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => SamplerConfig::load_from(&path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => SamplerConfig::load()?,
    };

    let source = PushedSource::new("reel-telemetry replay");
    let sampler = MetricSampler::new(
        source,
        SamplerOptions::from(&config),
        Arc::new(config.fixed_display()),
    );

    let meta = sampler.get_meta();
    info!(
        "Replaying playhead updates for {} {} (live: {})",
        meta.player_name,
        meta.player_version,
        sampler.is_live()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut replayed = 0usize;

    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let update: PlayheadUpdate = match serde_json::from_str(&line) {
            Ok(update) => update,
            Err(e) => {
                warn!("Skipping line {}: {}", index + 1, e);
                continue;
            }
        };
        debug!("Pushing {:?}", update);

        sampler.set_playhead(update.position_ms, update.duration_ms);
        sampler.set_dimensions(update.width, update.height);

        serde_json::to_writer(&mut stdout, &sampler.sample())
            .context("Failed to write sample")?;
        writeln!(stdout).context("Failed to write sample")?;
        replayed += 1;
    }

    info!("Replayed {} updates", replayed);
    Ok(())
}
