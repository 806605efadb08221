pub mod conversation;

pub use conversation::{ConversationSummary, PREVIEW_MAX_CHARS};
