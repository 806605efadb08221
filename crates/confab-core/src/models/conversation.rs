use serde::{Deserialize, Serialize};

/// Longest preview line the list will store; anything longer is cut at a
/// char boundary before it reaches a renderer.
pub const PREVIEW_MAX_CHARS: usize = 120;

/// One row of the chat list as the registry stores it.
///
/// `timestamp` is display-ready text produced upstream; the core never
/// parses or orders by it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// Stable identity; never changes after the conversation is first seen.
    pub id: String,
    /// Display name, the only field the search filter looks at.
    pub name: String,
    pub avatar: Option<String>,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub last_message: String,
    #[serde(default)]
    pub timestamp: String,
    /// Count of messages since the conversation was last opened.
    #[serde(default)]
    pub unread: u32,
}

impl ConversationSummary {
    /// Replace the preview line and its display timestamp.
    pub fn set_preview(&mut self, preview: &str, timestamp: &str) {
        self.last_message = clamp_preview(preview);
        self.timestamp = timestamp.to_string();
    }
}

pub(crate) fn clamp_preview(text: &str) -> String {
    text.chars().take(PREVIEW_MAX_CHARS).collect()
}
