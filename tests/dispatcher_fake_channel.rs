// tests/dispatcher_fake_channel.rs

use std::error::Error;

use tokio::sync::{mpsc, oneshot};

use file_monitor::engine::{DispatchOutcome, DispatchSummary, Dispatcher, EventPipeline};
use file_monitor::types::{Operation, TargetOs};
use file_monitor::watch::{RawEvent, WatchError, WatchStreams};
use file_monitor_test_utils::builders::ConfigBuilder;
use file_monitor_test_utils::fake_channel::FakeChannel;
use file_monitor_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn pipeline() -> EventPipeline {
    let cfg = ConfigBuilder::new()
        .watch("/data")
        .ignore_extension(".tmp")
        .ignore_file("*.log")
        .build();
    EventPipeline::from_config(&cfg)
}

struct Backend {
    events: mpsc::UnboundedSender<RawEvent>,
    errors: mpsc::UnboundedSender<WatchError>,
}

fn backend() -> (Backend, WatchStreams) {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (errors_tx, errors_rx) = mpsc::unbounded_channel();
    (
        Backend {
            events: events_tx,
            errors: errors_tx,
        },
        WatchStreams {
            events: events_rx,
            errors: errors_rx,
        },
    )
}

#[tokio::test]
async fn ignored_event_never_reaches_the_channel() -> TestResult {
    init_tracing();

    let channel = FakeChannel::new();
    let dispatcher = Dispatcher::new(pipeline(), Some(channel.clone()));
    let (backend, streams) = backend();

    backend.events.send(RawEvent::new("/data/file.tmp", Operation::Write))?;
    backend.events.send(RawEvent::new("/data/file.txt", Operation::Write))?;
    drop(backend.events);

    let summary = with_timeout(dispatcher.run(streams)).await;

    assert_eq!(channel.sent_paths(), vec!["/data/file.txt".to_string()]);
    assert_eq!(
        summary,
        DispatchSummary {
            received: 2,
            ignored: 1,
            passed: 1,
            sent: 1,
            failed: 0,
            backend_errors: 0,
        }
    );
    drop(backend.errors);
    Ok(())
}

#[tokio::test]
async fn failed_send_does_not_stop_the_loop() -> TestResult {
    init_tracing();

    let channel = FakeChannel::new().then(Some(500)).then(None);
    let dispatcher = Dispatcher::new(pipeline(), Some(channel.clone()));
    let (backend, streams) = backend();

    backend.events.send(RawEvent::new("/data/a.txt", Operation::Create))?;
    backend.events.send(RawEvent::new("/data/b.txt", Operation::Create))?;
    drop(backend.events);

    let summary = with_timeout(dispatcher.run(streams)).await;

    assert_eq!(
        channel.sent_paths(),
        vec!["/data/a.txt".to_string(), "/data/b.txt".to_string()]
    );
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.sent, 1);
    drop(backend.errors);
    Ok(())
}

#[tokio::test]
async fn handle_event_reports_each_outcome() {
    let channel = FakeChannel::new().then(Some(503));
    let mut dispatcher = Dispatcher::new(pipeline(), Some(channel));

    assert_eq!(
        dispatcher
            .handle_event(RawEvent::new("/data/x.log", Operation::Write))
            .await,
        None
    );
    assert_eq!(
        dispatcher
            .handle_event(RawEvent::new("/data/x.txt", Operation::Write))
            .await,
        Some(DispatchOutcome::Failed("unexpected status code: 503".into()))
    );
    let ok = dispatcher
        .handle_event(RawEvent::new("/data/y.txt", Operation::Write))
        .await;
    assert!(ok.is_some_and(|o| o.sent()));
}

#[tokio::test]
async fn no_channel_still_filters_and_logs() {
    let mut dispatcher = Dispatcher::<FakeChannel>::new(pipeline(), None);

    assert_eq!(
        dispatcher
            .handle_event(RawEvent::new("/data/a.txt", Operation::Remove))
            .await,
        Some(DispatchOutcome::NoChannel)
    );
    assert_eq!(
        dispatcher
            .handle_event(RawEvent::new("/data/a.tmp", Operation::Remove))
            .await,
        None
    );
    let s = dispatcher.summary();
    assert_eq!((s.received, s.ignored, s.passed, s.sent), (2, 1, 1, 0));
}

#[tokio::test]
async fn backend_errors_are_logged_and_processing_continues() -> TestResult {
    init_tracing();

    let channel = FakeChannel::new();
    let dispatcher = Dispatcher::new(pipeline(), Some(channel.clone()));
    let (backend, streams) = backend();

    backend.errors.send(WatchError::new("queue overflow"))?;
    backend.events.send(RawEvent::new("/data/after.txt", Operation::Write))?;
    // Closing the error stream ends the loop once its backlog is drained.
    drop(backend.errors);

    let summary = with_timeout(dispatcher.run(streams)).await;

    assert_eq!(summary.backend_errors, 1);
    assert_eq!(channel.sent_paths(), vec!["/data/after.txt".to_string()]);
    drop(backend.events);
    Ok(())
}

#[tokio::test]
async fn closing_the_error_stream_terminates_the_loop() -> TestResult {
    let dispatcher = Dispatcher::new(pipeline(), Some(FakeChannel::new()));
    let (backend, streams) = backend();

    drop(backend.errors);
    let summary = with_timeout(dispatcher.run(streams)).await;

    assert_eq!(summary, DispatchSummary::default());
    drop(backend.events);
    Ok(())
}

#[tokio::test]
async fn shutdown_signal_stops_a_live_loop() -> TestResult {
    let channel = FakeChannel::new();
    let dispatcher = Dispatcher::new(pipeline(), Some(channel.clone()));
    let (backend, streams) = backend();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(dispatcher.run_until(streams, async {
        let _ = stop_rx.await;
    }));

    backend.events.send(RawEvent::new("/data/one.txt", Operation::Write))?;
    // Wait until the event has been handled before stopping.
    with_timeout(async {
        while channel.sent().is_empty() {
            tokio::task::yield_now().await;
        }
    })
    .await;

    stop_tx.send(()).map_err(|_| "dispatcher already stopped")?;
    let summary = with_timeout(handle).await?;

    assert_eq!(summary.sent, 1);
    drop(backend);
    Ok(())
}

#[tokio::test]
async fn events_are_normalized_for_the_configured_target() {
    let cfg = ConfigBuilder::new()
        .watch("/data")
        .target_os(TargetOs::Windows)
        .build();
    let channel = FakeChannel::new();
    let mut dispatcher = Dispatcher::new(EventPipeline::from_config(&cfg), Some(channel.clone()));

    dispatcher
        .handle_event(RawEvent::new("/data/in/report.txt", Operation::Write))
        .await;

    let sent = channel.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].path, "C:\\data\\in\\report.txt");
    assert_eq!(sent[0].operation, Operation::Write);
}

#[tokio::test]
async fn queued_backend_errors_are_logged_when_events_close() -> TestResult {
    init_tracing();

    let dispatcher = Dispatcher::new(pipeline(), Some(FakeChannel::new()));
    let (backend, streams) = backend();

    backend.errors.send(WatchError::new("queue overflow"))?;
    backend.errors.send(WatchError::new("watch removed"))?;
    drop(backend.events);

    let summary = with_timeout(dispatcher.run(streams)).await;

    assert_eq!(summary.backend_errors, 2);
    drop(backend.errors);
    Ok(())
}
