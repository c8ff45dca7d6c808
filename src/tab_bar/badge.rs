//! Notification badges

use crate::types::TabDescriptor;

/// Counts above this render as "99+"
pub const BADGE_MAX: u32 = 99;

/// Badge text for a tab, or `None` when the tab has no badge.
///
/// A notification without a count renders as an empty (dot) badge.
pub fn badge_text(descriptor: &TabDescriptor) -> Option<String> {
    if !descriptor.notification {
        return None;
    }
    Some(match descriptor.notification_count {
        Some(count) if count > BADGE_MAX => format!("{}+", BADGE_MAX),
        Some(count) => count.to_string(),
        None => String::new(),
    })
}
