/// Cross-cutting layout flags consumed by whatever renders the list.
///
/// The three flags move independently; the one derived rule is that mobile
/// mode shows a single pane at a time, so an open conversation hides the
/// chat list there.
#[derive(Debug)]
pub struct VisibilityState {
    panel_visible: bool,
    mobile_mode: bool,
    message_view_active: bool,
}

impl Default for VisibilityState {
    /// Safe initial state: panel visible, desktop, nothing open.
    fn default() -> Self {
        Self {
            panel_visible: true,
            mobile_mode: false,
            message_view_active: false,
        }
    }
}

impl VisibilityState {
    pub fn new(panel_visible: bool, mobile_mode: bool) -> Self {
        Self {
            panel_visible,
            mobile_mode,
            message_view_active: false,
        }
    }

    // ===== Getters =====

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn mobile_mode(&self) -> bool {
        self.mobile_mode
    }

    pub fn message_view_active(&self) -> bool {
        self.message_view_active
    }

    /// Whether the chat list pane belongs on screen. Desktop always shows
    /// it; mobile hides it while a conversation is open.
    pub fn shows_chat_list(&self) -> bool {
        !(self.mobile_mode && self.message_view_active)
    }

    // ===== Mutations =====

    /// Flip panel visibility; returns the new value.
    pub fn toggle_panel(&mut self) -> bool {
        self.panel_visible = !self.panel_visible;
        self.panel_visible
    }

    /// Set by the embedding environment (viewport probe), not user action.
    pub fn set_mobile_mode(&mut self, mobile: bool) {
        self.mobile_mode = mobile;
    }

    pub fn enter_conversation(&mut self) {
        self.message_view_active = true;
    }

    pub fn exit_conversation(&mut self) {
        self.message_view_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_visible_desktop_with_nothing_open() {
        let visibility = VisibilityState::default();

        assert!(visibility.panel_visible());
        assert!(!visibility.mobile_mode());
        assert!(!visibility.message_view_active());
        assert!(visibility.shows_chat_list());
    }

    #[test]
    fn test_toggle_panel_flips_and_reports_new_value() {
        let mut visibility = VisibilityState::default();

        assert!(!visibility.toggle_panel());
        assert!(visibility.toggle_panel());
        assert!(visibility.panel_visible());
    }

    #[test]
    fn test_desktop_always_shows_chat_list() {
        let mut visibility = VisibilityState::default();
        visibility.enter_conversation();

        assert!(
            visibility.shows_chat_list(),
            "An open conversation must not hide the list on desktop"
        );
    }

    #[test]
    fn test_mobile_hides_list_while_conversation_open() {
        let mut visibility = VisibilityState::default();
        visibility.set_mobile_mode(true);

        assert!(visibility.shows_chat_list());
        visibility.enter_conversation();
        assert!(!visibility.shows_chat_list());
        visibility.exit_conversation();
        assert!(visibility.shows_chat_list());
    }
}
