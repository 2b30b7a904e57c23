use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use meshi_logdock::LogSink;
use meshi_toast::ToastController;
use uuid::Uuid;

/// One toast controller per signed-in user.
///
/// Controllers with no active toasts that no request is holding are dropped
/// whenever another user's controller is looked up.
#[derive(Clone)]
pub struct ToastSessions {
    sink: Arc<dyn LogSink>,
    sessions: Arc<Mutex<HashMap<Uuid, ToastController>>>,
}

impl ToastSessions {
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The controller for `user_id`, created on first use.
    pub fn for_user(&self, user_id: Uuid) -> ToastController {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        // A handle count above one means a request still holds the controller
        // and may push a toast into it after an await.
        sessions.retain(|id, controller| {
            *id == user_id || !controller.is_empty() || controller.handle_count() > 1
        });
        sessions
            .entry(user_id)
            .or_insert_with(|| ToastController::with_defaults(Arc::clone(&self.sink)))
            .clone()
    }

    #[cfg(test)]
    fn session_count(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use meshi_logdock::Logger;

    use super::*;

    fn sessions() -> ToastSessions {
        ToastSessions::new(Arc::new(Logger::tracing_only()))
    }

    #[test]
    fn same_user_gets_same_controller() {
        let sessions = sessions();
        let user = Uuid::new_v4();

        let id = sessions.for_user(user).info("hello");
        let again = sessions.for_user(user);

        assert_eq!(again.toasts()[0].id, id);
    }

    #[test]
    fn users_are_isolated() {
        let sessions = sessions();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        sessions.for_user(alice).info("for alice");

        assert!(sessions.for_user(bob).is_empty());
        assert_eq!(sessions.for_user(alice).len(), 1);
    }

    #[test]
    fn idle_sessions_are_pruned() {
        let sessions = sessions();
        let idle = Uuid::new_v4();
        let busy = Uuid::new_v4();

        sessions.for_user(idle);
        sessions.for_user(busy).warning("still here");
        sessions.for_user(Uuid::new_v4());

        // `idle` was pruned; `busy` and the newest lookup remain.
        assert_eq!(sessions.session_count(), 2);
    }

    #[test]
    fn held_empty_session_survives_other_lookups() {
        let sessions = sessions();
        let alice = Uuid::new_v4();

        let held = sessions.for_user(alice);
        sessions.for_user(Uuid::new_v4());
        held.success("place posted");

        let current = sessions.for_user(alice);
        assert_eq!(current.len(), 1);
        assert_eq!(current.toasts()[0].message, "place posted");
    }

    #[test]
    fn released_empty_session_is_pruned() {
        let sessions = sessions();
        let alice = Uuid::new_v4();

        drop(sessions.for_user(alice));
        sessions.for_user(Uuid::new_v4());

        assert_eq!(sessions.session_count(), 1);
    }
}
