use std::collections::HashMap;

/// Sub-store for typing indicators, keyed by conversation then participant.
///
/// The map is sparse: a participant with no entry has never signalled.
/// Through `is_anyone_typing` that reads the same as an explicit stop, but
/// the two stay distinguishable through `participant_state`. Expiring stale
/// signals is the transport's job, not this store's.
pub struct PresenceTracker {
    typing: HashMap<String, HashMap<String, bool>>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self {
            typing: HashMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.typing.clear();
    }

    // ===== Getters =====

    /// True when at least one participant is currently typing.
    /// An unknown conversation id reads as false, not as an error.
    pub fn is_anyone_typing(&self, conversation_id: &str) -> bool {
        self.typing
            .get(conversation_id)
            .map(|participants| participants.values().any(|&t| t))
            .unwrap_or(false)
    }

    /// The recorded flag for one participant: `None` means no signal was
    /// ever received, `Some(false)` an explicit stop.
    pub fn participant_state(&self, conversation_id: &str, participant_id: &str) -> Option<bool> {
        self.typing
            .get(conversation_id)
            .and_then(|participants| participants.get(participant_id))
            .copied()
    }

    /// Participants currently typing in a conversation, in arbitrary order.
    pub fn typing_participants(&self, conversation_id: &str) -> Vec<&str> {
        self.typing
            .get(conversation_id)
            .map(|participants| {
                participants
                    .iter()
                    .filter(|(_, &is_typing)| is_typing)
                    .map(|(id, _)| id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    // ===== Mutations =====

    /// Record a typing signal. Returns whether observable state changed, so
    /// the high-frequency path can skip no-op notifications.
    pub fn set_typing(
        &mut self,
        conversation_id: &str,
        participant_id: &str,
        is_typing: bool,
    ) -> bool {
        if !is_typing && !self.typing.contains_key(conversation_id) {
            // Nothing tracked, nothing to stop.
            return false;
        }
        let participants = self.typing.entry(conversation_id.to_string()).or_default();
        match participants.get_mut(participant_id) {
            Some(current) => {
                if *current == is_typing {
                    return false;
                }
                *current = is_typing;
                true
            }
            None => {
                if !is_typing {
                    // Absent already reads as not typing; keep the map sparse.
                    return false;
                }
                participants.insert(participant_id.to_string(), true);
                true
            }
        }
    }

    /// Drop all typing state for a conversation (removal, reload).
    /// Returns whether anything was tracked for it.
    pub fn clear_conversation(&mut self, conversation_id: &str) -> bool {
        self.typing.remove(conversation_id).is_some()
    }

    /// Keep only conversations the predicate accepts (bulk reloads).
    pub fn retain_conversations(&mut self, keep: impl Fn(&str) -> bool) {
        self.typing.retain(|id, _| keep(id));
    }
}
