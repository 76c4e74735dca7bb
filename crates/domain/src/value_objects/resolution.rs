//! Resolution marker carried inline in the action text
//!
//! A review counts as resolved iff its action contains the marker. Marking
//! only ever appends; it never reverts.

pub const RESOLUTION_MARKER: &str = "(RESOLVED)";

pub fn is_resolved(action: &str) -> bool {
    action.contains(RESOLUTION_MARKER)
}

/// Action text with the marker appended; unchanged if already present
pub fn with_resolution_marker(action: &str) -> String {
    if is_resolved(action) {
        return action.to_string();
    }
    if action.is_empty() {
        RESOLUTION_MARKER.to_string()
    } else {
        format!("{action} {RESOLUTION_MARKER}")
    }
}
