//! The active-toast collection and its dismissal timers.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use meshi_logdock::LogSink;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::{Dismiss, ToastRegistry};
use crate::ToastKind;

/// Identifier of a toast, unique within one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ToastId(u64);

impl From<u64> for ToastId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastMessage {
    pub id: ToastId,
    #[serde(rename = "type")]
    pub kind: ToastKind,
    pub message: String,
}

struct Entry {
    toast: ToastMessage,
    timer: Option<JoinHandle<()>>,
}

#[derive(Default)]
struct State {
    next_id: u64,
    entries: Vec<Entry>,
}

struct Shared {
    registry: ToastRegistry,
    sink: Arc<dyn LogSink>,
    state: Mutex<State>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn take(&self, id: ToastId) -> Option<Entry> {
        let mut state = self.lock();
        let pos = state.entries.iter().position(|e| e.toast.id == id)?;
        Some(state.entries.remove(pos))
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        for timer in state.entries.iter_mut().filter_map(|e| e.timer.take()) {
            timer.abort();
        }
    }
}

/// Ordered collection of active toasts. Insertion order is display order.
///
/// Clones share the same collection. Timed removals run as Tokio tasks and
/// reconcile against the collection by id, so a toast removed by hand before
/// its timer fires is never removed twice.
#[derive(Clone)]
pub struct ToastController {
    shared: Arc<Shared>,
}

impl fmt::Debug for ToastController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastController")
            .field("active", &self.shared.lock().entries.len())
            .finish_non_exhaustive()
    }
}

impl ToastController {
    #[must_use]
    pub fn new(registry: ToastRegistry, sink: Arc<dyn LogSink>) -> Self {
        Self {
            shared: Arc::new(Shared {
                registry,
                sink,
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// A controller using the default success/error/info/warning configs.
    #[must_use]
    pub fn with_defaults(sink: Arc<dyn LogSink>) -> Self {
        Self::new(ToastRegistry::default(), sink)
    }

    /// Shows a toast of the named kind.
    ///
    /// An unknown kind is reported through the log sink as a warning and
    /// nothing is shown.
    pub fn show(&self, kind: &str, message: impl Into<String>) -> Option<ToastId> {
        match kind.parse::<ToastKind>() {
            Ok(kind) => Some(self.show_kind(kind, message)),
            Err(_) => {
                self.shared.sink.warn(&format!(
                    "Unknown toast type: \"{kind}\". Toast will not be shown."
                ));
                None
            }
        }
    }

    /// Appends a toast and, unless its kind never dismisses, schedules its
    /// removal.
    pub fn show_kind(&self, kind: ToastKind, message: impl Into<String>) -> ToastId {
        let dismiss = self.shared.registry.get(kind).dismiss;

        let mut state = self.shared.lock();
        let id = ToastId(state.next_id);
        state.next_id += 1;

        // The timer cannot observe the collection until this lock is
        // released, by which point the entry is in place.
        let timer = match dismiss {
            Dismiss::After(delay) => self.schedule_removal(id, Instant::now() + delay),
            Dismiss::Never => None,
        };
        state.entries.push(Entry {
            toast: ToastMessage {
                id,
                kind,
                message: message.into(),
            },
            timer,
        });
        drop(state);

        tracing::debug!(%id, %kind, "toast shown");
        id
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.show_kind(ToastKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.show_kind(ToastKind::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.show_kind(ToastKind::Info, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> ToastId {
        self.show_kind(ToastKind::Warning, message)
    }

    /// Removes a toast and cancels its timer. Unknown ids are ignored.
    ///
    /// Returns `true` if the toast was still active.
    pub fn remove(&self, id: ToastId) -> bool {
        match self.shared.take(id) {
            Some(entry) => {
                if let Some(timer) = entry.timer {
                    timer.abort();
                }
                tracing::debug!(%id, "toast removed");
                true
            }
            None => false,
        }
    }

    /// Snapshot of the active toasts in display order.
    #[must_use]
    pub fn toasts(&self) -> Vec<ToastMessage> {
        self.shared
            .lock()
            .entries
            .iter()
            .map(|e| e.toast.clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live handles to this controller's collection, including
    /// `self`. Timer tasks are not counted.
    #[must_use]
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.shared)
    }

    /// Presentation class for a kind name, falling back to the info style.
    #[must_use]
    pub fn style_for(&self, kind: &str) -> &str {
        self.shared.registry.style_for(kind)
    }

    fn schedule_removal(&self, id: ToastId, deadline: Instant) -> Option<JoinHandle<()>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(%id, "no async runtime; toast will not auto-dismiss");
            return None;
        };

        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        Some(runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(shared) = shared.upgrade() {
                if shared.take(id).is_some() {
                    tracing::debug!(%id, "toast dismissed");
                }
            }
        }))
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
