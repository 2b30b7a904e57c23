use std::time::Duration;

use meshi_logdock::{LogEntry, LogLevel};

use super::*;
use crate::config::ToastConfig;

#[derive(Default)]
struct RecordingSink {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingSink {
    fn warnings(&self) -> Vec<String> {
        self.entries
            .lock()
            .expect("sink lock")
            .iter()
            .filter(|e| e.level == LogLevel::Warn)
            .map(|e| e.message.clone())
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn log(&self, entry: LogEntry) {
        self.entries.lock().expect("sink lock").push(entry);
    }
}

fn controller() -> (ToastController, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    (ToastController::with_defaults(sink.clone()), sink)
}

/// Lets spawned timer tasks run after the clock moves.
async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

async fn advance_ms(ms: u64) {
    tokio::time::advance(Duration::from_millis(ms)).await;
    settle().await;
}

fn messages(controller: &ToastController) -> Vec<String> {
    controller.toasts().into_iter().map(|t| t.message).collect()
}

#[tokio::test(start_paused = true)]
async fn unknown_kind_is_dropped_with_warning() {
    let (toasts, sink) = controller();

    assert_eq!(toasts.show("loading", "please wait"), None);

    assert!(toasts.is_empty());
    assert_eq!(
        sink.warnings(),
        vec!["Unknown toast type: \"loading\". Toast will not be shown.".to_owned()]
    );
}

#[tokio::test(start_paused = true)]
async fn toasts_keep_insertion_order() {
    let (toasts, sink) = controller();

    toasts.show("success", "saved");
    toasts.show("error", "failed");
    toasts.info("3 results");

    assert_eq!(messages(&toasts), vec!["saved", "failed", "3 results"]);
    let kinds: Vec<ToastKind> = toasts.toasts().iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![ToastKind::Success, ToastKind::Error, ToastKind::Info]);
    assert!(sink.warnings().is_empty());
}

#[tokio::test(start_paused = true)]
async fn ids_are_unique_and_increasing() {
    let (toasts, _sink) = controller();

    let ids: Vec<ToastId> = (0..5).map(|i| toasts.warning(format!("w{i}"))).collect();

    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test(start_paused = true)]
async fn success_dismisses_after_three_seconds() {
    let (toasts, _sink) = controller();
    toasts.success("posted");

    advance_ms(2999).await;
    assert_eq!(toasts.len(), 1);

    advance_ms(1).await;
    assert!(toasts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn each_kind_uses_its_own_duration() {
    let (toasts, _sink) = controller();
    toasts.success("s");
    toasts.warning("w");
    toasts.error("e");

    advance_ms(3000).await;
    assert_eq!(messages(&toasts), vec!["w", "e"]);

    advance_ms(1000).await;
    assert_eq!(messages(&toasts), vec!["e"]);

    advance_ms(1000).await;
    assert!(toasts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn error_dismisses_after_five_seconds() {
    let (toasts, _sink) = controller();
    toasts.error("failed");

    advance_ms(4999).await;
    assert_eq!(toasts.len(), 1);

    advance_ms(1).await;
    assert!(toasts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn handle_count_tracks_clones_not_timers() {
    let (toasts, _sink) = controller();
    toasts.success("pending timer");
    settle().await;
    assert_eq!(toasts.handle_count(), 1);

    let clone = toasts.clone();
    assert_eq!(toasts.handle_count(), 2);

    drop(clone);
    assert_eq!(toasts.handle_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn remove_is_idempotent() {
    let (toasts, _sink) = controller();
    let id = toasts.info("hello");

    assert!(toasts.remove(id));
    assert!(!toasts.remove(id));
    assert!(!toasts.remove(ToastId::from(999)));
    assert!(toasts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn manual_removal_then_timer_leaves_others_alone() {
    let (toasts, _sink) = controller();
    let first = toasts.success("first");
    advance_ms(1000).await;
    toasts.success("second");

    assert!(toasts.remove(first));
    advance_ms(2000).await;

    // The first toast's timer would have fired here; the second remains.
    assert_eq!(messages(&toasts), vec!["second"]);

    advance_ms(1000).await;
    assert!(toasts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn never_dismiss_stays_until_removed() {
    let registry = ToastRegistry::new(
        ToastKind::ALL
            .into_iter()
            .map(|kind| {
                let dismiss = if kind == ToastKind::Info {
                    Dismiss::Never
                } else {
                    Dismiss::After(Duration::from_millis(100))
                };
                ToastConfig::new(kind, format!("alert-{kind}"), dismiss)
            })
            .collect(),
    )
    .expect("registry");
    let sink: Arc<dyn LogSink> = Arc::new(RecordingSink::default());
    let toasts = ToastController::new(registry, sink);

    let id = toasts.show("info", "loading").expect("known kind");
    advance_ms(60_000).await;
    assert_eq!(toasts.len(), 1);

    assert!(toasts.remove(id));
    assert!(toasts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn interleaved_adds_and_removes_reconcile() {
    let (toasts, _sink) = controller();
    let mut kept = Vec::new();

    for i in 0..20 {
        let id = toasts.error(format!("e{i}"));
        if i % 3 == 0 {
            assert!(toasts.remove(id));
        } else {
            kept.push(format!("e{i}"));
        }
        advance_ms(100).await;
    }

    // 20 toasts added 100ms apart; after 2000ms none has reached 5000ms.
    assert_eq!(messages(&toasts), kept);

    advance_ms(5000).await;
    assert!(toasts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn clones_share_one_collection() {
    let (toasts, _sink) = controller();
    let other = toasts.clone();

    let id = toasts.success("shared");
    assert_eq!(other.len(), 1);
    assert!(other.remove(id));
    assert!(toasts.is_empty());
}

#[test]
fn show_outside_runtime_keeps_toast_without_timer() {
    let (toasts, _sink) = controller();
    toasts.success("no runtime");
    assert_eq!(toasts.len(), 1);
}

#[test]
fn style_for_uses_registry_with_fallback() {
    let (toasts, _sink) = controller();
    assert_eq!(toasts.style_for("warning"), "alert-warning");
    assert_eq!(toasts.style_for("bogus"), crate::FALLBACK_STYLE);
}

#[test]
fn toast_message_serializes_kind_as_type() {
    let message = ToastMessage {
        id: ToastId::from(7),
        kind: ToastKind::Success,
        message: "ok".to_owned(),
    };
    let json = serde_json::to_value(&message).expect("json");
    assert_eq!(json, serde_json::json!({"id": 7, "type": "success", "message": "ok"}));
}
