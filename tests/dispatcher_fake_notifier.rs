// tests/dispatcher_fake_notifier.rs

use std::error::Error;
use std::sync::{Arc, Mutex};

use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use syncwatch::dispatch::{ClassifyRules, Dispatcher, RequestPayload, Verb};
use syncwatch::event::ChangeEvent;
use syncwatch_test_utils::fake_notifier::FakeNotifier;
use syncwatch_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn rules() -> ClassifyRules {
    ClassifyRules::new("mp3", ".Trash")
}

/// Feed the given events through a dispatcher wired to a fake notifier
/// and return everything the notifier was asked to deliver.
async fn drive(
    events: Vec<ChangeEvent>,
    fail_with: Option<u16>,
) -> Result<Vec<RequestPayload>, Box<dyn Error>> {
    let (event_tx, event_rx) = mpsc::channel::<ChangeEvent>(16);
    let sent = Arc::new(Mutex::new(Vec::new()));

    let notifier = match fail_with {
        Some(status) => FakeNotifier::failing(Arc::clone(&sent), status),
        None => FakeNotifier::new(Arc::clone(&sent)),
    };

    let dispatcher = Dispatcher::new(rules(), event_rx, notifier);
    let dispatcher_task = tokio::spawn(dispatcher.run());

    for event in events {
        event_tx.send(event).await?;
    }
    // Closing the channel makes the dispatcher drain and exit.
    drop(event_tx);

    timeout(Duration::from_secs(3), dispatcher_task).await???;

    let payloads = sent.lock().unwrap().clone();
    Ok(payloads)
}

#[tokio::test]
async fn created_file_sends_folder_import_via_post() -> TestResult {
    init_tracing();

    let payloads = drive(vec![ChangeEvent::created("/lib/NewAlbum/01.mp3")], None).await?;

    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].verb(), Verb::Post);
    assert_eq!(
        payloads[0].to_json()?,
        json!({
            "path": "/lib/NewAlbum",
            "recursive": true,
            "songExtension": "mp3",
            "genreFromPath": true,
        })
    );
    Ok(())
}

#[tokio::test]
async fn moved_file_sends_relocation_via_put() -> TestResult {
    init_tracing();

    let payloads = drive(
        vec![ChangeEvent::moved("/lib/A/song.mp3", "/lib/B/song.mp3")],
        None,
    )
    .await?;

    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].verb(), Verb::Put);
    assert_eq!(
        payloads[0].to_json()?,
        json!({
            "newPath": "/lib/B/song.mp3",
            "oldPath": "/lib/A/song.mp3",
            "recursive": false,
            "songExtension": "mp3",
        })
    );
    Ok(())
}

#[tokio::test]
async fn move_into_trash_sends_purge_of_old_path_via_delete() -> TestResult {
    init_tracing();

    let payloads = drive(
        vec![ChangeEvent::moved("/lib/A/song.mp3", "/lib/.Trash/song.mp3")],
        None,
    )
    .await?;

    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].verb(), Verb::Delete);
    // The purge targets where the file used to live, not the trash path.
    assert_eq!(
        payloads[0].to_json()?,
        json!({
            "path": "/lib/A/song.mp3",
            "recursive": false,
            "songExtension": "mp3",
            "genreFromPath": false,
        })
    );
    Ok(())
}

#[tokio::test]
async fn removed_file_sends_purge_via_delete() -> TestResult {
    init_tracing();

    let payloads = drive(vec![ChangeEvent::removed("/lib/A/song.mp3")], None).await?;

    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].verb(), Verb::Delete);
    assert_eq!(
        payloads[0].to_json()?,
        json!({
            "path": "/lib/A/song.mp3",
            "recursive": false,
            "songExtension": "mp3",
            "genreFromPath": false,
        })
    );
    Ok(())
}

#[tokio::test]
async fn rejected_folder_move_sends_nothing() -> TestResult {
    init_tracing();

    let payloads = drive(
        vec![ChangeEvent::moved("/lib/AlbumFolder", "/lib/Other/AlbumFolder").with_dir_hint(true)],
        None,
    )
    .await?;

    assert!(payloads.is_empty());
    Ok(())
}

#[tokio::test]
async fn delivery_failure_does_not_stop_the_loop() -> TestResult {
    init_tracing();

    // Every delivery is rejected by the remote; the dispatcher must keep
    // draining events regardless.
    let payloads = drive(
        vec![
            ChangeEvent::created("/lib/A/01.mp3"),
            ChangeEvent::removed("/lib/B/02.mp3"),
        ],
        Some(500),
    )
    .await?;

    assert_eq!(payloads.len(), 2);
    assert_eq!(payloads[0].verb(), Verb::Post);
    assert_eq!(payloads[1].verb(), Verb::Delete);
    Ok(())
}

#[tokio::test]
async fn shutdown_drains_queued_events_before_exit() -> TestResult {
    init_tracing();

    let (event_tx, event_rx) = mpsc::channel::<ChangeEvent>(4);
    let sent = Arc::new(Mutex::new(Vec::new()));
    let notifier = FakeNotifier::new(Arc::clone(&sent));

    // Backlog is queued before the producer side disappears, as happens
    // when the watcher is stopped on shutdown.
    event_tx
        .send(ChangeEvent::created("/lib/A/01.mp3"))
        .await?;
    event_tx
        .send(ChangeEvent::removed("/lib/B/02.mp3"))
        .await?;
    drop(event_tx);

    let dispatcher = Dispatcher::new(rules(), event_rx, notifier);
    let dispatcher_task = tokio::spawn(dispatcher.run());

    // The dispatcher must deliver everything left in the queue and then
    // exit on its own.
    timeout(Duration::from_secs(3), dispatcher_task).await???;

    let payloads = sent.lock().unwrap().clone();
    assert_eq!(payloads.len(), 2);
    assert_eq!(payloads[0].verb(), Verb::Post);
    assert_eq!(payloads[1].verb(), Verb::Delete);
    Ok(())
}

#[tokio::test]
async fn identical_events_produce_identical_payloads() -> TestResult {
    init_tracing();

    let event = ChangeEvent::moved("/lib/O'Brien/song.mp3", "/lib/B/song.mp3");
    let payloads = drive(vec![event.clone(), event], None).await?;

    assert_eq!(payloads.len(), 2);
    assert_eq!(payloads[0], payloads[1]);
    Ok(())
}

#[tokio::test]
async fn quoted_paths_are_escaped_on_the_wire() -> TestResult {
    init_tracing();

    let payloads = drive(vec![ChangeEvent::removed("/lib/O'Brien/track.mp3")], None).await?;

    assert_eq!(payloads.len(), 1);
    assert_eq!(
        payloads[0].to_json()?["path"],
        json!("/lib/O\\\\'Brien/track.mp3")
    );
    Ok(())
}
