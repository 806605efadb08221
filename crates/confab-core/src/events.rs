use serde::{Deserialize, Serialize};

use crate::models::ConversationSummary;

/// Inbound events from the transport and the user, in arrival order.
///
/// Everything that mutates the store travels through this enum so that
/// independently-updating sources serialize into one queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// Authoritative snapshot of the whole list, in display order.
    ConversationsLoaded {
        conversations: Vec<ConversationSummary>,
    },
    /// A conversation was created or its metadata changed upstream.
    ConversationUpserted { conversation: ConversationSummary },
    /// A new message arrived for a conversation.
    MessageReceived {
        conversation_id: String,
        preview: String,
        timestamp: String,
    },
    /// The user opened a conversation from the list.
    ConversationOpened { conversation_id: String },
    /// A participant started or stopped typing.
    TypingSignal {
        conversation_id: String,
        participant_id: String,
        is_typing: bool,
    },
    /// A conversation's online flag changed.
    PresenceChanged {
        conversation_id: String,
        online: bool,
    },
    /// A conversation was deleted or left.
    ConversationRemoved { conversation_id: String },
}

impl ChatEvent {
    /// Decode a transport frame. Returns None for anything malformed;
    /// the feed should drop and log, never crash.
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }
}

/// What changed in the store after an event was applied. Observers use
/// these to decide what to re-derive; they carry no state themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    /// List membership or a row's display fields changed.
    Conversations,
    /// Typing activity changed for one conversation.
    Typing { conversation_id: String },
    /// The selected conversation changed.
    Selection,
    /// A layout flag changed.
    Visibility,
}
