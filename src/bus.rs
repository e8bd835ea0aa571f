//! Named notification bus with weak listeners.
//!
//! The bus never owns its listeners: callers keep the `Rc` handle returned
//! by [`NotificationBus::listen`] alive for as long as they want to receive
//! notifications, and dropped listeners are pruned on the next emit. This
//! keeps the bus from pinning sink or widget lifetimes.

use std::rc::{Rc, Weak};

/// Notification name for an encoding change; the value is the new label.
pub const ENCODING_CHANGED: &str = "encoding_changed";

/// A named notification with a single string value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Notification<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Callback type for bus listeners. Receives the notification value.
pub type ListenerFn = dyn Fn(&str);

/// Handle returned by [`NotificationBus::listen`]; dropping it unsubscribes.
pub type ListenerHandle = Rc<ListenerFn>;

/// Registry of weak listeners keyed by notification name.
#[derive(Default)]
pub struct NotificationBus {
    listeners: Vec<(String, Weak<ListenerFn>)>,
}

impl NotificationBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a named notification.
    ///
    /// The returned handle must be kept alive; the bus stores only a weak
    /// reference.
    #[must_use]
    pub fn listen<F>(&mut self, name: &str, callback: F) -> ListenerHandle
    where
        F: Fn(&str) + 'static,
    {
        let handle: ListenerHandle = Rc::new(callback);
        self.listeners
            .push((name.to_string(), Rc::downgrade(&handle)));
        handle
    }

    /// Deliver a notification to every live listener registered under its
    /// name, pruning dead entries.
    pub fn emit(&mut self, note: &Notification<'_>) {
        self.listeners.retain(|(name, weak)| {
            let Some(callback) = weak.upgrade() else {
                return false;
            };
            if name == note.name {
                callback(note.value);
            }
            true
        });
    }

    /// Number of live listeners (dead entries are not counted).
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .count()
    }
}
