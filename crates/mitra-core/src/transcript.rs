//! Conversation log: the ordered, append-only record of chat entries.
//!
//! Display is delegated to a [`ChatSurface`] capability so the log can be
//! driven against a terminal, a GUI, or an in-memory fake in tests. When no
//! surface is attached every operation is a no-op and [`ConversationLog::append_pending`]
//! returns `None`; callers treat a missing handle as "nothing to resolve".

use chrono::{DateTime, Utc};

/// Who authored a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// Whether an entry still shows its loading placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Pending,
    Resolved,
}

/// One entry in the conversation log.
#[derive(Debug, Clone)]
pub struct Message {
    pub sender: Sender,
    pub content: String,
    pub render_state: RenderState,
    pub timestamp: DateTime<Utc>,
}

/// Opaque reference to a pending entry, consumed by [`ConversationLog::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHandle(usize);

/// Display capability the log renders through.
///
/// `append_entry` receives plain text for non-pending entries (user messages
/// are never markup-rendered) and an empty string for pending placeholders;
/// `resolve_entry` receives final markup produced by the session controller.
pub trait ChatSurface: Send + Sync {
    fn append_entry(&self, id: usize, sender: Sender, content: &str, pending: bool);
    fn resolve_entry(&self, id: usize, content: &str);
    fn scroll_to_end(&self);
}

/// Append-only conversation log over an optional display surface.
pub struct ConversationLog {
    surface: Option<Box<dyn ChatSurface>>,
    entries: Vec<Message>,
}

impl ConversationLog {
    /// Log rendering through the given surface.
    pub fn new(surface: Box<dyn ChatSurface>) -> Self {
        Self {
            surface: Some(surface),
            entries: Vec::new(),
        }
    }

    /// Log with no display surface: every operation degrades to a no-op.
    pub fn detached() -> Self {
        Self {
            surface: None,
            entries: Vec::new(),
        }
    }

    /// Whether a display surface is attached. Chat operations are disabled
    /// entirely without one.
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Append a placeholder entry shown as a loading affordance. Returns
    /// `None` when no surface is attached.
    pub fn append_pending(&mut self, sender: Sender) -> Option<EntryHandle> {
        let surface = self.surface.as_ref()?;
        let id = self.entries.len();
        surface.append_entry(id, sender, "", true);
        surface.scroll_to_end();
        self.entries.push(Message {
            sender,
            content: String::new(),
            render_state: RenderState::Pending,
            timestamp: Utc::now(),
        });
        Some(EntryHandle(id))
    }

    /// Replace the placeholder content of `handle` with final markup and clear
    /// its pending state. Resolving the same handle twice is a caller bug; the
    /// log applies last-write-wins rather than panicking.
    pub fn resolve(&mut self, handle: EntryHandle, final_markup: &str) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        let Some(entry) = self.entries.get_mut(handle.0) else {
            return;
        };
        entry.content = final_markup.to_string();
        entry.render_state = RenderState::Resolved;
        surface.resolve_entry(handle.0, final_markup);
        surface.scroll_to_end();
    }

    /// Append a non-pending entry directly. Used for the user's own messages,
    /// which are inserted as plain text and never interpreted as markup.
    pub fn append_final(&mut self, sender: Sender, text: &str) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        let id = self.entries.len();
        surface.append_entry(id, sender, text, false);
        surface.scroll_to_end();
        self.entries.push(Message {
            sender,
            content: text.to_string(),
            render_state: RenderState::Resolved,
            timestamp: Utc::now(),
        });
    }

    /// The recorded entries, oldest first.
    pub fn entries(&self) -> &[Message] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum SurfaceEvent {
        Append {
            id: usize,
            pending: bool,
            content: String,
        },
        Resolve {
            id: usize,
            content: String,
        },
        Scroll,
    }

    #[derive(Clone, Default)]
    struct FakeSurface {
        events: Arc<Mutex<Vec<SurfaceEvent>>>,
    }

    impl ChatSurface for FakeSurface {
        fn append_entry(&self, id: usize, _sender: Sender, content: &str, pending: bool) {
            self.events.lock().unwrap().push(SurfaceEvent::Append {
                id,
                pending,
                content: content.to_string(),
            });
        }

        fn resolve_entry(&self, id: usize, content: &str) {
            self.events.lock().unwrap().push(SurfaceEvent::Resolve {
                id,
                content: content.to_string(),
            });
        }

        fn scroll_to_end(&self) {
            self.events.lock().unwrap().push(SurfaceEvent::Scroll);
        }
    }

    #[test]
    fn pending_entry_resolves_once() {
        let surface = FakeSurface::default();
        let events = surface.events.clone();
        let mut log = ConversationLog::new(Box::new(surface));

        let handle = log.append_pending(Sender::Bot).unwrap();
        log.resolve(handle, "<strong>done</strong>");

        let entry = &log.entries()[0];
        assert_eq!(entry.render_state, RenderState::Resolved);
        assert_eq!(entry.content, "<strong>done</strong>");

        let events = events.lock().unwrap();
        assert_eq!(
            events[0],
            SurfaceEvent::Append {
                id: 0,
                pending: true,
                content: String::new(),
            }
        );
        assert!(events.contains(&SurfaceEvent::Resolve {
            id: 0,
            content: "<strong>done</strong>".to_string(),
        }));
    }

    #[test]
    fn scrolls_after_every_mutation() {
        let surface = FakeSurface::default();
        let events = surface.events.clone();
        let mut log = ConversationLog::new(Box::new(surface));

        log.append_final(Sender::User, "hello");
        let handle = log.append_pending(Sender::Bot).unwrap();
        log.resolve(handle, "hi");

        let scrolls = events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| **e == SurfaceEvent::Scroll)
            .count();
        assert_eq!(scrolls, 3);
    }

    #[test]
    fn detached_log_is_inert() {
        let mut log = ConversationLog::detached();
        assert!(log.append_pending(Sender::Bot).is_none());
        log.append_final(Sender::User, "hello");
        assert!(log.entries().is_empty());
    }

    #[test]
    fn double_resolve_is_last_write_wins() {
        let surface = FakeSurface::default();
        let mut log = ConversationLog::new(Box::new(surface));
        let handle = log.append_pending(Sender::Bot).unwrap();
        log.resolve(handle, "first");
        log.resolve(handle, "second");
        assert_eq!(log.entries()[0].content, "second");
    }
}
