use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::CoreConfig;
use crate::events::{ChatEvent, StoreChange};
use crate::store::{ChatStore, ConversationRow};

/// Thread-safe wrapper for embeddings that spread work across OS threads.
///
/// The bare `ChatStore` is single-threaded by design; this wrapper is the
/// explicit boundary for everything else. One write lock per event keeps
/// each mutation atomic with respect to derivations on other threads: once
/// `apply` returns, every later read observes the event.
#[derive(Clone)]
pub struct SharedChatStore {
    inner: Arc<RwLock<ChatStore>>,
}

impl Default for SharedChatStore {
    fn default() -> Self {
        Self::new(&CoreConfig::default())
    }
}

impl SharedChatStore {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ChatStore::new(config))),
        }
    }

    /// Apply one event under the write lock and return what changed.
    pub fn apply(&self, event: ChatEvent) -> Vec<StoreChange> {
        self.inner.write().handle_event(event)
    }

    /// Run a closure against the store under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&ChatStore) -> R) -> R {
        f(&self.inner.read())
    }

    /// Snapshot the visible rows for a filter query.
    pub fn visible_conversations(&self, query: &str) -> Vec<ConversationRow> {
        self.inner.read().visible_conversations(query)
    }
}
