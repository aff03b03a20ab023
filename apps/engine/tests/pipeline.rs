//! Image pipeline behavior: retry/backoff, placeholder degradation, and
//! the concurrency cap.

mod support;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use engine::config::ImageServiceConfig;
use engine::images::{ImagePipeline, ImageRequest, RetryPolicy};
use uuid::Uuid;

use support::{FailForPlayer, InFlightProbe, RejectingGenerator, TimeoutGenerator};

fn request_for(player_id: Uuid) -> ImageRequest {
    ImageRequest {
        session_id: Uuid::new_v4(),
        round_no: 1,
        player_id,
        prompt: "A haunted toaster chasing a tax auditor.".to_string(),
        style: "digital painting".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn retryable_failures_exhaust_attempts_then_yield_a_placeholder() {
    let generator = Arc::new(TimeoutGenerator::default());
    let pipeline = ImagePipeline::new(generator.clone(), &ImageServiceConfig::default());

    let player = Uuid::new_v4();
    let outcomes = pipeline.generate_batch(vec![request_for(player)]).await;

    assert_eq!(generator.attempts.load(Ordering::SeqCst), 3);
    assert_eq!(outcomes.len(), 1);
    let (who, outcome) = &outcomes[0];
    assert_eq!(*who, player);
    assert!(outcome.placeholder);
    assert!(outcome.error.is_some());
}

#[tokio::test(start_paused = true)]
async fn rejections_fail_fast_to_the_placeholder_path() {
    let generator = Arc::new(RejectingGenerator::default());
    let pipeline = ImagePipeline::new(generator.clone(), &ImageServiceConfig::default());

    let outcomes = pipeline
        .generate_batch(vec![request_for(Uuid::new_v4())])
        .await;

    assert_eq!(generator.attempts.load(Ordering::SeqCst), 1, "no retries");
    assert!(outcomes[0].1.placeholder);
}

#[tokio::test(start_paused = true)]
async fn one_failure_never_aborts_the_batch() {
    let failing = Uuid::new_v4();
    let healthy = Uuid::new_v4();
    let generator = Arc::new(FailForPlayer { failing });
    let pipeline = ImagePipeline::new(generator, &ImageServiceConfig::default());

    let outcomes = pipeline
        .generate_batch(vec![request_for(failing), request_for(healthy)])
        .await;

    assert_eq!(outcomes.len(), 2, "every request settles");
    let failed = outcomes.iter().find(|(id, _)| *id == failing).unwrap();
    let succeeded = outcomes.iter().find(|(id, _)| *id == healthy).unwrap();
    assert!(failed.1.placeholder);
    assert!(!succeeded.1.placeholder);
}

#[tokio::test(start_paused = true)]
async fn the_concurrency_cap_bounds_in_flight_requests() {
    let probe = Arc::new(InFlightProbe::default());
    let config = ImageServiceConfig {
        max_in_flight: 2,
        ..ImageServiceConfig::default()
    };
    let pipeline = ImagePipeline::new(probe.clone(), &config);

    let requests: Vec<ImageRequest> = (0..6).map(|_| request_for(Uuid::new_v4())).collect();
    let outcomes = pipeline.generate_batch(requests).await;

    assert_eq!(outcomes.len(), 6);
    assert!(outcomes.iter().all(|(_, o)| !o.placeholder));
    assert!(
        probe.peak.load(Ordering::SeqCst) <= 2,
        "cap must bound concurrency"
    );
}

#[tokio::test(start_paused = true)]
async fn a_custom_retry_schedule_is_honored() {
    let generator = Arc::new(TimeoutGenerator::default());
    let pipeline = ImagePipeline::new(generator.clone(), &ImageServiceConfig::default())
        .with_retry_policy(RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(100),
        });

    pipeline
        .generate_batch(vec![request_for(Uuid::new_v4())])
        .await;
    assert_eq!(generator.attempts.load(Ordering::SeqCst), 2);
}
