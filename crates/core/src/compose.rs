//! Action text composition.
//!
//! Every applied action on a report carries an immutable snapshot of the
//! library text plus a free-text manual extension. The displayed final text
//! is derived from the two on every read and never persisted, so a change
//! to the composition rule applies uniformly to historical reports.

/// Compose the final text from a library snapshot and a manual extension.
///
/// Both inputs are trimmed. An empty (or whitespace-only) extension yields
/// exactly the trimmed snapshot; otherwise the result is
/// `"{snapshot} {extension}"` with a single separating space.
pub fn compose_final_text(snapshot: &str, extension: &str) -> String {
    let snap = snapshot.trim();
    let ext = extension.trim();
    if ext.is_empty() {
        snap.to_string()
    } else if snap.is_empty() {
        ext.to_string()
    } else {
        format!("{snap} {ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_extension_yields_trimmed_snapshot() {
        assert_eq!(compose_final_text("  Packing replaced.  ", ""), "Packing replaced.");
    }

    #[test]
    fn whitespace_only_extension_yields_trimmed_snapshot() {
        assert_eq!(compose_final_text("Seat lapped.", "   \t "), "Seat lapped.");
    }

    #[test]
    fn extension_is_appended_with_single_space() {
        assert_eq!(
            compose_final_text("Valve reassembled.", "Torque values verified."),
            "Valve reassembled. Torque values verified."
        );
    }

    #[test]
    fn both_sides_trimmed() {
        assert_eq!(compose_final_text("  a  ", "  b  "), "a b");
    }

    #[test]
    fn empty_snapshot_keeps_extension_only() {
        // Ad-hoc actions have no library snapshot; no stray leading space.
        assert_eq!(compose_final_text("", "Ad-hoc note"), "Ad-hoc note");
    }

    #[test]
    fn both_empty_yields_empty() {
        assert_eq!(compose_final_text("", "  "), "");
    }
}
