use tracing::debug;

use crate::config::CoreConfig;
use crate::events::{ChatEvent, StoreChange};
use crate::models::ConversationSummary;
use crate::search;

use super::chat_registry::{ChatRegistry, StoreError};
use super::presence::PresenceTracker;
use super::selection::SelectionCoordinator;
use super::visibility::VisibilityState;

/// One render-ready row of the visible list: the summary plus the per-row
/// flags derived from typing and selection state.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationRow {
    pub summary: ConversationSummary,
    pub is_typing: bool,
    pub is_selected: bool,
}

/// Reactive chat-list store - single source of truth for everything the
/// list renders. Populated from the transport's snapshot, updated
/// incrementally on new events; renderers read derived projections instead
/// of keeping copies of this state.
pub struct ChatStore {
    registry: ChatRegistry,
    presence: PresenceTracker,
    selection: SelectionCoordinator,
    visibility: VisibilityState,
}

impl ChatStore {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            registry: ChatRegistry::new(),
            presence: PresenceTracker::new(),
            selection: SelectionCoordinator::new(),
            visibility: VisibilityState::new(config.panel_visible, config.mobile_mode),
        }
    }

    /// Apply one inbound event and report what changed.
    ///
    /// Updates referencing unknown conversations degrade to logged no-ops:
    /// the live stream races against removals and that is not a fault.
    pub fn handle_event(&mut self, event: ChatEvent) -> Vec<StoreChange> {
        match event {
            ChatEvent::ConversationsLoaded { conversations } => {
                self.set_conversations(conversations)
            }
            ChatEvent::ConversationUpserted { conversation } => {
                self.upsert_conversation(conversation);
                vec![StoreChange::Conversations]
            }
            ChatEvent::MessageReceived {
                conversation_id,
                preview,
                timestamp,
            } => match self.on_message_received(&conversation_id, &preview, &timestamp) {
                Ok(()) => vec![StoreChange::Conversations],
                Err(StoreError::NotFound { id }) => {
                    debug!("Dropping message for unknown conversation {}", id);
                    Vec::new()
                }
            },
            ChatEvent::ConversationOpened { conversation_id } => {
                match self.open_conversation(&conversation_id) {
                    Ok(changes) => changes,
                    Err(StoreError::NotFound { id }) => {
                        debug!("Ignoring open of unknown conversation {}", id);
                        Vec::new()
                    }
                }
            }
            ChatEvent::TypingSignal {
                conversation_id,
                participant_id,
                is_typing,
            } => {
                if self.on_typing_signal(&conversation_id, &participant_id, is_typing) {
                    vec![StoreChange::Typing { conversation_id }]
                } else {
                    Vec::new()
                }
            }
            ChatEvent::PresenceChanged {
                conversation_id,
                online,
            } => match self.on_presence_change(&conversation_id, online) {
                Ok(()) => vec![StoreChange::Conversations],
                Err(StoreError::NotFound { id }) => {
                    debug!("Dropping presence for unknown conversation {}", id);
                    Vec::new()
                }
            },
            ChatEvent::ConversationRemoved { conversation_id } => {
                self.on_conversation_removed(&conversation_id)
            }
        }
    }

    // ===== Inbound Methods =====

    /// Replace the list with an authoritative snapshot and reconcile
    /// dependent state: a selection pointing nowhere is cleared, typing
    /// state for vanished conversations is pruned.
    pub fn set_conversations(
        &mut self,
        conversations: Vec<ConversationSummary>,
    ) -> Vec<StoreChange> {
        self.registry.set_conversations(conversations);
        let mut changes = vec![StoreChange::Conversations];
        if let Some(selected) = self.selection.current_selection().map(str::to_string) {
            if !self.registry.contains(&selected) {
                self.selection.on_conversation_removed(&selected);
                changes.push(StoreChange::Selection);
            }
        }
        let registry = &self.registry;
        self.presence.retain_conversations(|id| registry.contains(id));
        changes
    }

    /// Insert or update a single conversation from upstream metadata.
    pub fn upsert_conversation(&mut self, conversation: ConversationSummary) {
        self.registry.upsert(conversation);
    }

    /// Record an incoming message: unread goes up and the preview updates,
    /// whether or not the conversation is selected or filtered out.
    pub fn on_message_received(
        &mut self,
        conversation_id: &str,
        preview: &str,
        timestamp: &str,
    ) -> Result<(), StoreError> {
        self.registry.apply_message(conversation_id, preview, timestamp)
    }

    /// Open a conversation: clear its unread count, select it, and mark the
    /// message view active. Membership is checked first, so an unknown id
    /// leaves every sub-store untouched and the selection can never point
    /// at a conversation the registry does not hold.
    pub fn open_conversation(
        &mut self,
        conversation_id: &str,
    ) -> Result<Vec<StoreChange>, StoreError> {
        if !self.registry.contains(conversation_id) {
            return Err(StoreError::NotFound {
                id: conversation_id.to_string(),
            });
        }
        let mut changes = Vec::new();
        self.registry.mark_read(conversation_id)?;
        changes.push(StoreChange::Conversations);
        if self.selection.select(conversation_id) {
            changes.push(StoreChange::Selection);
        }
        if !self.visibility.message_view_active() {
            self.visibility.enter_conversation();
            changes.push(StoreChange::Visibility);
        }
        Ok(changes)
    }

    /// Route a typing signal into the tracker. Returns whether anything
    /// changed. Signals are accepted for conversations the registry does
    /// not hold yet: they can arrive ahead of the conversation's upsert.
    pub fn on_typing_signal(
        &mut self,
        conversation_id: &str,
        participant_id: &str,
        is_typing: bool,
    ) -> bool {
        self.presence.set_typing(conversation_id, participant_id, is_typing)
    }

    /// Update a conversation's online flag.
    pub fn on_presence_change(
        &mut self,
        conversation_id: &str,
        online: bool,
    ) -> Result<(), StoreError> {
        self.registry.set_online(conversation_id, online)
    }

    /// Remove a conversation and reconcile dependent state: selection is
    /// cleared only when it pointed at the removed id, typing state is
    /// dropped wholesale.
    pub fn on_conversation_removed(&mut self, conversation_id: &str) -> Vec<StoreChange> {
        let mut changes = Vec::new();
        match self.registry.remove(conversation_id) {
            Ok(_) => changes.push(StoreChange::Conversations),
            Err(StoreError::NotFound { id }) => {
                debug!("Removal of unknown conversation {}", id);
            }
        }
        if self.selection.on_conversation_removed(conversation_id) {
            changes.push(StoreChange::Selection);
        }
        if self.presence.clear_conversation(conversation_id) {
            changes.push(StoreChange::Typing {
                conversation_id: conversation_id.to_string(),
            });
        }
        changes
    }

    // ===== User Interaction Methods =====

    /// Collapse or reveal the side panel. Returns the new visibility.
    pub fn toggle_panel(&mut self) -> bool {
        self.visibility.toggle_panel()
    }

    /// Environment callback for viewport class changes.
    pub fn set_mobile_mode(&mut self, mobile: bool) {
        self.visibility.set_mobile_mode(mobile);
    }

    /// Navigate back out of the open conversation (mobile back action).
    /// The selection is kept; only the pane focus changes.
    pub fn exit_conversation(&mut self) {
        self.visibility.exit_conversation();
    }

    // ===== Getters =====

    pub fn conversations(&self) -> &[ConversationSummary] {
        self.registry.conversations()
    }

    pub fn registry(&self) -> &ChatRegistry {
        &self.registry
    }

    pub fn presence(&self) -> &PresenceTracker {
        &self.presence
    }

    pub fn selection(&self) -> &SelectionCoordinator {
        &self.selection
    }

    pub fn visibility(&self) -> &VisibilityState {
        &self.visibility
    }

    // ===== Derivation =====

    /// Derive the rows the list should render for a filter query, in
    /// registry order, recomputed from current state on every call.
    ///
    /// Filtering is by display name only. A selected conversation the
    /// query hides stays selected; it just isn't among the rows.
    pub fn visible_conversations(&self, query: &str) -> Vec<ConversationRow> {
        search::filter_conversations(self.registry.conversations(), query)
            .into_iter()
            .map(|summary| ConversationRow {
                is_typing: self.presence.is_anyone_typing(&summary.id),
                is_selected: self.selection.is_selected(&summary.id),
                summary: summary.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, name: &str, unread: u32) -> ConversationSummary {
        ConversationSummary {
            id: id.to_string(),
            name: name.to_string(),
            unread,
            ..Default::default()
        }
    }

    fn seeded_store() -> ChatStore {
        let mut store = ChatStore::new(&CoreConfig::default());
        store.set_conversations(vec![
            summary("a", "Alice", 0),
            summary("b", "Bob", 2),
        ]);
        store
    }

    #[test]
    fn test_message_then_open_round_trip() {
        let mut store = seeded_store();

        let rows = store.visible_conversations("bob");
        assert_eq!(rows.len(), 1, "Filter should keep only Bob");
        assert_eq!(rows[0].summary.id, "b");

        store.handle_event(ChatEvent::MessageReceived {
            conversation_id: "b".to_string(),
            preview: "dinner?".to_string(),
            timestamp: "19:02".to_string(),
        });
        assert_eq!(store.registry().get("b").unwrap().unread, 3);

        let changes = store.handle_event(ChatEvent::ConversationOpened {
            conversation_id: "b".to_string(),
        });
        assert!(changes.contains(&StoreChange::Selection));
        assert_eq!(store.registry().get("b").unwrap().unread, 0);
        assert!(store.selection().is_selected("b"));
        assert!(store.visibility().message_view_active());
    }

    #[test]
    fn test_message_for_selected_conversation_still_counts_unread() {
        let mut store = seeded_store();
        store.open_conversation("a").unwrap();

        let changes = store.handle_event(ChatEvent::MessageReceived {
            conversation_id: "a".to_string(),
            preview: "you there?".to_string(),
            timestamp: "19:10".to_string(),
        });

        assert!(changes.contains(&StoreChange::Conversations));
        assert_eq!(
            store.registry().get("a").unwrap().unread,
            1,
            "Unread counting does not pause while the conversation is open"
        );
        assert!(store.selection().is_selected("a"));
    }

    #[test]
    fn test_typing_aggregate_follows_last_active_participant() {
        let mut store = seeded_store();

        store.on_typing_signal("a", "u1", true);
        assert!(store.visible_conversations("")[0].is_typing);

        store.on_typing_signal("a", "u2", true);
        store.on_typing_signal("a", "u1", false);
        assert!(
            store.visible_conversations("")[0].is_typing,
            "u2 is still typing"
        );

        store.on_typing_signal("a", "u2", false);
        assert!(!store.visible_conversations("")[0].is_typing);
    }

    #[test]
    fn test_open_unknown_conversation_changes_nothing() {
        let mut store = seeded_store();
        store.open_conversation("a").unwrap();

        let result = store.open_conversation("ghost");

        assert!(matches!(result, Err(StoreError::NotFound { .. })));
        assert!(
            store.selection().is_selected("a"),
            "A rejected open must leave the previous selection in place"
        );
        let changes = store.handle_event(ChatEvent::ConversationOpened {
            conversation_id: "ghost".to_string(),
        });
        assert!(
            changes.is_empty(),
            "Via the event path the same open degrades to a silent no-op"
        );
    }

    #[test]
    fn test_message_for_unknown_conversation_is_dropped() {
        let mut store = seeded_store();

        let changes = store.handle_event(ChatEvent::MessageReceived {
            conversation_id: "ghost".to_string(),
            preview: "hello?".to_string(),
            timestamp: "09:00".to_string(),
        });

        assert!(changes.is_empty());
        assert_eq!(store.conversations().len(), 2);
    }

    #[test]
    fn test_removal_reconciles_selection_and_typing() {
        let mut store = seeded_store();
        store.open_conversation("b").unwrap();
        store.on_typing_signal("b", "u1", true);

        let changes = store.handle_event(ChatEvent::ConversationRemoved {
            conversation_id: "b".to_string(),
        });

        assert!(changes.contains(&StoreChange::Conversations));
        assert!(changes.contains(&StoreChange::Selection));
        assert!(!store.registry().contains("b"));
        assert_eq!(store.selection().current_selection(), None);
        assert!(!store.presence().is_anyone_typing("b"));
    }

    #[test]
    fn test_removal_of_unselected_conversation_keeps_selection() {
        let mut store = seeded_store();
        store.open_conversation("a").unwrap();

        store.on_conversation_removed("b");

        assert!(store.selection().is_selected("a"));
    }

    #[test]
    fn test_noop_typing_signal_emits_no_change() {
        let mut store = seeded_store();

        let changes = store.handle_event(ChatEvent::TypingSignal {
            conversation_id: "a".to_string(),
            participant_id: "u1".to_string(),
            is_typing: false,
        });

        assert!(
            changes.is_empty(),
            "A stop for an idle participant should not notify observers"
        );
    }

    #[test]
    fn test_rows_carry_selection_and_typing_flags() {
        let mut store = seeded_store();
        store.open_conversation("a").unwrap();
        store.on_typing_signal("b", "u9", true);

        let rows = store.visible_conversations("");

        assert!(rows[0].is_selected);
        assert!(!rows[0].is_typing);
        assert!(!rows[1].is_selected);
        assert!(rows[1].is_typing);
    }

    #[test]
    fn test_selection_survives_filtering_out() {
        let mut store = seeded_store();
        store.open_conversation("a").unwrap();

        let rows = store.visible_conversations("bob");

        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_selected);
        assert!(
            store.selection().is_selected("a"),
            "Filtering is a view concern and must not touch selection"
        );
    }

    #[test]
    fn test_snapshot_reload_prunes_selection_and_typing() {
        let mut store = seeded_store();
        store.open_conversation("b").unwrap();
        store.on_typing_signal("b", "u1", true);

        let changes = store.handle_event(ChatEvent::ConversationsLoaded {
            conversations: vec![summary("a", "Alice", 0), summary("c", "Carol", 1)],
        });

        assert!(changes.contains(&StoreChange::Selection));
        assert_eq!(store.selection().current_selection(), None);
        assert!(!store.presence().is_anyone_typing("b"));
        assert_eq!(store.conversations().len(), 2);
    }

    #[test]
    fn test_presence_event_updates_online_flag() {
        let mut store = seeded_store();

        store.handle_event(ChatEvent::PresenceChanged {
            conversation_id: "a".to_string(),
            online: true,
        });

        assert!(store.registry().get("a").unwrap().online);
    }

    #[test]
    fn test_upserted_event_appends_then_updates_in_place() {
        let mut store = seeded_store();

        let changes = store.handle_event(ChatEvent::ConversationUpserted {
            conversation: summary("c", "Carol", 0),
        });
        assert_eq!(changes, vec![StoreChange::Conversations]);
        assert_eq!(store.conversations().len(), 3);

        store.handle_event(ChatEvent::ConversationUpserted {
            conversation: summary("c", "Carol A.", 9),
        });
        let carol = store.registry().get("c").unwrap();
        assert_eq!(carol.name, "Carol A.");
        assert_eq!(carol.unread, 0, "Metadata pushes never touch unread");
        assert_eq!(store.conversations().len(), 3);
    }

    #[test]
    fn test_panel_toggle_and_mode_switch() {
        let mut store = seeded_store();

        assert!(!store.toggle_panel(), "Default-visible panel toggles off");
        assert!(store.toggle_panel());

        store.set_mobile_mode(true);
        assert!(store.visibility().mobile_mode());
    }

    #[test]
    fn test_mobile_open_and_back_drive_list_visibility() {
        let config = CoreConfig {
            mobile_mode: true,
            ..Default::default()
        };
        let mut store = ChatStore::new(&config);
        store.upsert_conversation(summary("a", "Alice", 0));

        assert!(store.visibility().shows_chat_list());
        store.open_conversation("a").unwrap();
        assert!(!store.visibility().shows_chat_list());
        store.exit_conversation();
        assert!(store.visibility().shows_chat_list());
        assert!(store.selection().is_selected("a"), "Back keeps the selection");
    }
}
