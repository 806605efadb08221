//! Chat list filtering.
//!
//! Pure helpers with no access to typing or selection state. Results are
//! derived views over the registry's slice, recomputed on every call; the
//! stored collection is never reordered or mutated here.

use crate::models::ConversationSummary;

/// Check whether a display name matches a filter query.
///
/// Case-insensitive sub-string match with Unicode lowercase folding.
/// The empty query matches every name.
pub fn name_matches(name: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&query.to_lowercase())
}

/// Filter conversations by display name, preserving relative order.
///
/// An empty query returns every entry. Only the display name takes part in
/// matching; ids, previews, and timestamps do not.
pub fn filter_conversations<'a>(
    conversations: &'a [ConversationSummary],
    query: &str,
) -> Vec<&'a ConversationSummary> {
    conversations
        .iter()
        .filter(|c| name_matches(&c.name, query))
        .collect()
}
