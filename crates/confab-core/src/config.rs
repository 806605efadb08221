/// Configuration handed to the core by its embedding environment.
///
/// The environment decides these once at construction; the core never
/// probes viewports or other ambient state on its own.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Single-pane layout: an open conversation replaces the chat list.
    pub mobile_mode: bool,
    /// Initial visibility of the collapsible panel.
    pub panel_visible: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            mobile_mode: false,
            panel_visible: true,
        }
    }
}
