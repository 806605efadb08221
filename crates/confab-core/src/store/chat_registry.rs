use crate::models::conversation::clamp_preview;
use crate::models::ConversationSummary;

/// Errors surfaced by registry mutations.
///
/// An unknown id is an ordinary outcome, not a failure: live event streams
/// race against removals, so callers normally drop the update and move on.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Unknown conversation: {id}")]
    NotFound { id: String },
}

/// Sub-store for the ordered conversation collection.
///
/// Order is owned by the business layer: initial population order is kept,
/// new conversations append at the end, and nothing here ever re-sorts.
pub struct ChatRegistry {
    conversations: Vec<ConversationSummary>,
}

impl ChatRegistry {
    pub fn new() -> Self {
        Self {
            conversations: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.conversations.clear();
    }

    // ===== Getters =====

    pub fn conversations(&self) -> &[ConversationSummary] {
        &self.conversations
    }

    pub fn get(&self, id: &str) -> Option<&ConversationSummary> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.conversations.iter().any(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    // ===== Mutations =====

    /// Insert a new conversation or update an existing one in place.
    ///
    /// An update keeps the stored unread count: unread only moves through
    /// `apply_message` and `mark_read`, never through metadata pushes.
    pub fn upsert(&mut self, summary: ConversationSummary) {
        let mut summary = summary;
        summary.last_message = clamp_preview(&summary.last_message);
        if let Some(existing) = self.conversations.iter_mut().find(|c| c.id == summary.id) {
            summary.unread = existing.unread;
            *existing = summary;
        } else {
            self.conversations.push(summary);
        }
    }

    /// Replace the whole collection with an authoritative snapshot,
    /// keeping the given order.
    pub fn set_conversations(&mut self, conversations: Vec<ConversationSummary>) {
        self.conversations.clear();
        for mut summary in conversations {
            // Deduplicate by id, first occurrence wins
            if self.conversations.iter().any(|c| c.id == summary.id) {
                continue;
            }
            summary.last_message = clamp_preview(&summary.last_message);
            self.conversations.push(summary);
        }
    }

    /// Record an incoming message: bump unread and refresh the preview.
    pub fn apply_message(
        &mut self,
        id: &str,
        preview: &str,
        timestamp: &str,
    ) -> Result<(), StoreError> {
        let conversation = self.get_mut(id)?;
        conversation.unread = conversation.unread.saturating_add(1);
        conversation.set_preview(preview, timestamp);
        Ok(())
    }

    /// Refresh the preview line without touching unread (message edits).
    pub fn update_preview(
        &mut self,
        id: &str,
        preview: &str,
        timestamp: &str,
    ) -> Result<(), StoreError> {
        self.get_mut(id)?.set_preview(preview, timestamp);
        Ok(())
    }

    /// Zero the unread count when a conversation is opened.
    pub fn mark_read(&mut self, id: &str) -> Result<(), StoreError> {
        self.get_mut(id)?.unread = 0;
        Ok(())
    }

    pub fn set_online(&mut self, id: &str, online: bool) -> Result<(), StoreError> {
        self.get_mut(id)?.online = online;
        Ok(())
    }

    /// Remove a conversation, returning its summary.
    pub fn remove(&mut self, id: &str) -> Result<ConversationSummary, StoreError> {
        let pos = self
            .conversations
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        Ok(self.conversations.remove(pos))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut ConversationSummary, StoreError> {
        self.conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }
}
