use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::trace;

use crate::config::CoreConfig;
use crate::events::{ChatEvent, StoreChange};
use crate::store::ChatStore;

/// Cloneable sender half handed to transports and UI adapters. Events from
/// any thread land in one queue and are applied in arrival order on the
/// loop thread, which is what keeps the store single-threaded.
#[derive(Clone)]
pub struct ChatHandle {
    event_tx: Sender<ChatEvent>,
}

impl ChatHandle {
    pub(crate) fn new(event_tx: Sender<ChatEvent>) -> Self {
        Self { event_tx }
    }

    pub fn send(&self, event: ChatEvent) -> Result<(), mpsc::SendError<ChatEvent>> {
        self.event_tx.send(event)
    }
}

type Observer = Box<dyn FnMut(&[StoreChange])>;

/// Owns the store and the inbound queue. All store mutation happens on the
/// thread that calls `process_pending`, so the store needs no locking;
/// producers on other threads only ever touch the channel.
pub struct ChatRuntime {
    store: Rc<RefCell<ChatStore>>,
    event_rx: Receiver<ChatEvent>,
    handle: ChatHandle,
    observers: Vec<Observer>,
}

impl ChatRuntime {
    pub fn new(config: CoreConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel::<ChatEvent>();
        Self {
            store: Rc::new(RefCell::new(ChatStore::new(&config))),
            event_rx,
            handle: ChatHandle::new(event_tx),
            observers: Vec::new(),
        }
    }

    pub fn handle(&self) -> ChatHandle {
        self.handle.clone()
    }

    pub fn store(&self) -> Rc<RefCell<ChatStore>> {
        self.store.clone()
    }

    /// Register an observer for store changes. Observers run on the loop
    /// thread after each processed event; they should read and re-derive,
    /// not mutate.
    pub fn subscribe(&mut self, observer: impl FnMut(&[StoreChange]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Drain the queue, applying events in arrival order. Returns how many
    /// events were processed. Observers are notified once per event that
    /// changed something; no-op events stay silent.
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            let changes = self.store.borrow_mut().handle_event(event);
            processed += 1;
            if !changes.is_empty() {
                for observer in &mut self.observers {
                    observer(&changes);
                }
            }
        }
        if processed > 0 {
            trace!("Processed {} chat events", processed);
        }
        processed
    }
}
