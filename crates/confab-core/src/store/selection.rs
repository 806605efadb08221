/// Selection state machine: no selection, or exactly one conversation id.
///
/// Selection is filter-independent, so selecting an id the current query
/// hides is valid. Validating the id against the registry belongs to the
/// composed open flow, not here.
#[derive(Debug, Default)]
pub struct SelectionCoordinator {
    selected: Option<String>,
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Getters =====

    pub fn current_selection(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    // ===== Mutations =====

    /// Select a conversation unconditionally, replacing any previous
    /// selection. Returns whether the selection changed.
    pub fn select(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    /// Reconcile against a removal: clears only when the removed id is the
    /// selected one. Returns whether the selection was cleared.
    pub fn on_conversation_removed(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            self.selected = None;
            true
        } else {
            false
        }
    }
}
