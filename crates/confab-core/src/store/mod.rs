pub mod chat_registry;
pub mod chat_store;
pub mod presence;
pub mod selection;
pub mod visibility;

pub use chat_registry::{ChatRegistry, StoreError};
pub use chat_store::{ChatStore, ConversationRow};
pub use presence::PresenceTracker;
pub use selection::SelectionCoordinator;
pub use visibility::VisibilityState;
