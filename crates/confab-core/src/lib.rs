pub mod config;
pub mod events;
pub mod models;
pub mod runtime;
pub mod search;
pub mod shared;
pub mod store;

// Re-export the embedding surface at crate root for convenience
pub use config::CoreConfig;
pub use events::{ChatEvent, StoreChange};
pub use models::ConversationSummary;
pub use runtime::{ChatHandle, ChatRuntime};
pub use shared::SharedChatStore;
pub use store::{ChatStore, ConversationRow, StoreError};
