//! End-to-end behaviour of the delay processor driven by the pipeline.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

use delayed_return::config::{DelayConfig, ProcessingOptions};
use delayed_return::delay::{DelayProcessor, INVALID_HEADER_DETAILS};
use delayed_return::lifecycle;
use delayed_return::pipeline::{Outcome, Pipeline, PipelineError, StageEvent};
use delayed_return::processor::{AllHeaders, ProcessError, RequestProcessor, Stage};

mod common;

fn pipeline() -> Pipeline<DelayProcessor> {
    Pipeline::new(DelayProcessor::new())
}

#[tokio::test(start_paused = true)]
async fn test_missing_header_uses_default_delay() {
    let logs = common::LogCapture::default();
    let _guard = logs.install();

    let report = pipeline()
        .process(common::exchange("req-default", None))
        .await
        .unwrap();

    assert!(report.is_completed());
    assert_eq!(report.stages.len(), 6);
    for record in &report.stages {
        assert!(record.elapsed >= Duration::from_millis(100), "{:?}", record);
    }

    let default_lines = logs.lines_with(&["delayed-time header is not set", "request_id=req-default"]);
    assert_eq!(default_lines.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_250ms_delay_on_every_stage() {
    let logs = common::LogCapture::default();
    let _guard = logs.install();

    let started = Instant::now();
    let report = pipeline()
        .process(common::exchange("req-250", Some("250")))
        .await
        .unwrap();

    assert_eq!(report.outcome, Outcome::Completed);
    assert_eq!(report.request_id, "req-250");
    assert_eq!(report.skipped, 0);

    let stages: Vec<_> = report.stages.iter().map(|r| r.stage).collect();
    assert_eq!(stages, Stage::ALL.to_vec());
    for record in &report.stages {
        assert!(record.elapsed >= Duration::from_millis(250));
        assert_eq!(record.elapsed_ms, 250);
    }
    assert!(started.elapsed() >= Duration::from_millis(6 * 250));

    for stage in Stage::ALL {
        let stage_field = format!("stage={}", stage.name());
        let lines = logs.lines_with(&[
            "Stage delayed",
            "request_id=req-250",
            stage_field.as_str(),
            "delayed_ms=250",
            "elapsed_ms=250",
        ]);
        assert_eq!(lines.len(), 1, "missing log line for {stage}");
    }
    assert!(logs.lines_with(&["delayed-time header is not set"]).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_non_numeric_header_rejected() {
    let started = Instant::now();
    let report = pipeline()
        .process(common::exchange("req-abc", Some("abc")))
        .await
        .unwrap();

    match &report.outcome {
        Outcome::Rejected(response) => {
            assert_eq!(response.status, 400);
            assert_eq!(response.body, "BadRequest");
            assert_eq!(response.details, INVALID_HEADER_DETAILS);
            assert!(response.headers.is_empty());
        }
        Outcome::Completed => panic!("expected rejection"),
    }
    assert_eq!(report.stages.len(), 1);
    assert_eq!(report.stages[0].stage, Stage::RequestHeaders);
    assert_eq!(report.skipped, 5);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_negative_header_rejected_without_sleep() {
    let logs = common::LogCapture::default();
    let _guard = logs.install();

    let started = Instant::now();
    let report = pipeline()
        .process(common::exchange("req-neg", Some("-1")))
        .await
        .unwrap();

    assert!(!report.is_completed());
    assert!(matches!(report.outcome, Outcome::Rejected(ref r) if r.status == 400));
    assert_eq!(report.stages.len(), 1);
    assert_eq!(report.skipped, 5);
    assert_eq!(report.total_elapsed(), Duration::ZERO);
    assert_eq!(started.elapsed(), Duration::ZERO);

    assert!(logs.lines_with(&["Stage delayed"]).is_empty());
    assert_eq!(logs.lines_with(&["Rejecting request", "request_id=req-neg"]).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_requests_are_isolated() {
    let pipeline = pipeline();
    let requests = vec![
        common::exchange("req-a", Some("50")),
        common::exchange("req-b", Some("300")),
        common::exchange("req-c", Some("0")),
        common::exchange("req-d", Some("nope")),
    ];

    let started = Instant::now();
    let reports = pipeline.process_many(requests).await.unwrap();

    // Delays overlap instead of adding up.
    assert!(started.elapsed() >= Duration::from_millis(6 * 300));
    assert!(started.elapsed() < Duration::from_millis(6 * (300 + 50)));

    let ids: Vec<_> = reports.iter().map(|r| r.request_id.as_str()).collect();
    assert_eq!(ids, vec!["req-a", "req-b", "req-c", "req-d"]);

    for (report, expected_ms) in reports.iter().zip([50u64, 300, 0]) {
        assert!(report.is_completed());
        for record in &report.stages {
            assert_eq!(record.elapsed_ms, expected_ms, "{}", report.request_id);
        }
    }
    assert!(!reports[3].is_completed());
}

#[tokio::test(start_paused = true)]
async fn test_failed_request_aborts_requests_in_flight() {
    let logs = common::LogCapture::default();
    let _guard = logs.install();

    let requests = vec![
        vec![StageEvent::ResponseBody(Bytes::from_static(b"early"))],
        common::exchange("req-inflight", Some("100")),
    ];

    let err = pipeline().process_many(requests).await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Processor { source: ProcessError::MissingDelayState { .. }, .. }
    ));

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(logs.lines_with(&["Stage delayed", "request_id=req-inflight"]).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_huge_delay_is_honored() {
    let logs = common::LogCapture::default();
    let _guard = logs.install();

    let max = i64::MAX.to_string();
    let result = tokio::time::timeout(
        Duration::from_secs(3600),
        pipeline().process(common::exchange("req-huge", Some(max.as_str()))),
    )
    .await;

    assert!(result.is_err(), "request finished before its delay");
    assert!(logs.lines_with(&["Stage delayed"]).is_empty());
    assert!(logs.lines_with(&["Rejecting request"]).is_empty());
}

#[tokio::test]
async fn test_real_clock_elapsed_not_below_delay() {
    let started = std::time::Instant::now();
    let report = pipeline()
        .process(common::exchange("req-real", Some("20")))
        .await
        .unwrap();

    assert!(report.is_completed());
    for record in &report.stages {
        assert!(record.elapsed >= Duration::from_millis(20));
    }
    assert!(started.elapsed() >= Duration::from_millis(6 * 20));
}

#[tokio::test(start_paused = true)]
async fn test_generated_request_id_when_header_missing() {
    let mut headers = AllHeaders::new();
    headers.insert("delayed-time", "1");

    let report = pipeline()
        .process(StageEvent::exchange(headers, Bytes::new()))
        .await
        .unwrap();

    assert!(uuid::Uuid::parse_str(&report.request_id).is_ok());
}

#[tokio::test]
async fn test_stage_before_headers_is_fatal() {
    let events = vec![
        StageEvent::ResponseBody(Bytes::from_static(b"early")),
        StageEvent::ResponseTrailers(AllHeaders::new()),
    ];

    let err = pipeline().process(events).await.unwrap_err();
    match err {
        PipelineError::Processor { source, .. } => {
            assert_eq!(source, ProcessError::MissingDelayState { stage: Stage::ResponseBody });
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_repeated_headers_stage_is_fatal() {
    let headers = common::request_headers("req-dup", Some("5"));
    let events = vec![
        StageEvent::RequestHeaders(headers.clone()),
        StageEvent::RequestHeaders(headers),
    ];

    let err = pipeline().process(events).await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Processor { ref request_id, source: ProcessError::DelayAlreadyRecorded }
            if request_id == "req-dup"
    ));
}

#[tokio::test]
async fn test_empty_stream() {
    let err = pipeline().process(Vec::new()).await.unwrap_err();
    assert!(matches!(err, PipelineError::EmptyStream));
}

#[tokio::test(start_paused = true)]
async fn test_processing_options_enable_phase_logs() {
    let logs = common::LogCapture::default();
    let _guard = logs.install();

    let mut config = DelayConfig::default();
    config.processing = ProcessingOptions {
        log_stream: true,
        log_phases: true,
    };
    let pipeline = lifecycle::start(&config, vec!["--verbose".into()]).unwrap();
    assert_eq!(pipeline.processor().name(), "delayed-return");

    pipeline
        .process(common::exchange("req-phases", Some("10")))
        .await
        .unwrap();
    pipeline.finish();

    assert_eq!(logs.lines_with(&["Phase complete", "request_id=req-phases"]).len(), 6);
    assert_eq!(logs.lines_with(&["Stream opened", "request_id=req-phases"]).len(), 1);
    assert_eq!(
        logs.lines_with(&[
            "Stream closed",
            "request_id=req-phases",
            "last_stage=ProcessResponseTrailers",
        ])
        .len(),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn test_phase_logs_off_by_default() {
    let logs = common::LogCapture::default();
    let _guard = logs.install();

    pipeline()
        .process(common::exchange("req-quiet", Some("1")))
        .await
        .unwrap();

    assert!(logs.lines_with(&["Phase complete"]).is_empty());
    assert!(logs.lines_with(&["Stream opened"]).is_empty());
}
