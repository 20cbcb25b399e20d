use crate::common::mocks::MockEngine;
use crate::common::{EngineSampler, sampler_for, vod_options};
use reel_telemetry::sampler::Metric;
use reel_telemetry::{RetryController, RetryHandle, SamplerOptions, StreamAdapter};
use std::sync::Arc;

fn start_context() -> (RetryHandle, tokio::task::JoinHandle<()>) {
    let (handle, controller) = RetryController::new();
    let join = tokio::spawn(controller.run());
    (handle, join)
}

fn retrying_sampler(engine: &Arc<MockEngine>, retry: &RetryHandle) -> EngineSampler {
    sampler_for(engine, vod_options()).with_retry_context(retry.clone())
}

#[tokio::test]
async fn test_failed_read_is_refreshed_for_next_call() {
    let (retry, _join) = start_context();
    let engine = MockEngine::new().with_position(42_000).into_shared();
    let sampler = retrying_sampler(&engine, &retry);

    engine.fail_next(1);
    assert_eq!(sampler.get_position(), 0);

    retry.flush().await.unwrap();
    assert_eq!(sampler.cached(Metric::Position), 42);

    // Still failing on the read path, but the retry already refreshed the cache
    engine.inject_error("player released");
    assert_eq!(sampler.get_position(), 42);
}

#[tokio::test]
async fn test_failed_dimension_read_is_retried() {
    let (retry, _join) = start_context();
    let engine = MockEngine::new().with_format(640, 360).into_shared();
    let sampler = retrying_sampler(&engine, &retry);

    engine.fail_next(2);
    assert_eq!(sampler.get_width(), 0);
    assert_eq!(sampler.get_height(), 0);

    retry.flush().await.unwrap();
    assert_eq!(sampler.cached(Metric::Width), 640);
    assert_eq!(sampler.cached(Metric::Height), 360);
}

#[tokio::test]
async fn test_no_retry_when_disabled() {
    let (retry, _join) = start_context();
    let engine = MockEngine::new().with_position(42_000).into_shared();
    let options = SamplerOptions {
        retry_on_failure: false,
        ..vod_options()
    };
    let sampler = sampler_for(&engine, options).with_retry_context(retry.clone());

    engine.fail_next(1);
    assert_eq!(sampler.get_position(), 0);

    retry.flush().await.unwrap();
    assert_eq!(sampler.cached(Metric::Position), 0);
    assert_eq!(engine.reads(), 1);
}

#[tokio::test]
async fn test_failing_retry_keeps_context_alive() {
    let (retry, _join) = start_context();
    let engine = MockEngine::new().with_position(42_000).into_shared();
    let sampler = retrying_sampler(&engine, &retry);

    engine.inject_error("decoder crashed");
    assert_eq!(sampler.get_position(), 0);
    retry.flush().await.unwrap();
    assert_eq!(sampler.cached(Metric::Position), 0);
    // Read path plus one retry, no more
    assert_eq!(engine.reads(), 2);

    engine.clear_error();
    engine.fail_next(1);
    assert_eq!(sampler.get_position(), 0);
    retry.flush().await.unwrap();
    assert_eq!(sampler.cached(Metric::Position), 42);
}

#[tokio::test]
async fn test_closed_context_does_not_affect_reads() {
    let (retry, join) = start_context();
    let engine = MockEngine::new().with_position(42_000).into_shared();
    let sampler = retrying_sampler(&engine, &retry);

    retry.shutdown().unwrap();
    join.await.unwrap();

    engine.fail_next(1);
    assert_eq!(sampler.get_position(), 0);
    assert_eq!(sampler.get_position(), 42);
}

#[test]
fn test_retry_on_dedicated_thread() {
    let retry = RetryController::spawn("telemetry-test").unwrap();
    let engine = MockEngine::new()
        .with_position(3_000)
        .with_format(1920, 1080)
        .into_shared();
    let sampler = retrying_sampler(&engine, &retry);

    engine.fail_next(1);
    assert_eq!(sampler.get_height(), 0);

    retry.flush_blocking().unwrap();
    assert_eq!(sampler.cached(Metric::Height), 1080);
    assert_eq!(sampler.get_position(), 3);

    retry.shutdown().unwrap();
}
