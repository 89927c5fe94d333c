use crate::types::UNKNOWN_ACTOR;
use std::collections::HashMap;

/// Render a comma-joined actor group as a display fragment, attaching a
/// tooltip span for every name with a blurb.
///
/// An empty group, or one containing "none" in any case, resolves to the
/// `UNKNOWN ACTOR` sentinel as a whole; so does a group whose every entry
/// filters out. Callers drop records whose fragment carries the sentinel.
pub fn resolve_actor_line(raw: &str, blurbs: &HashMap<String, String>) -> String {
    if raw.trim().is_empty() || raw.to_lowercase().contains("none") {
        return UNKNOWN_ACTOR.to_string();
    }

    let spans: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "[NONE]")
        .map(|name| match blurbs.get(name) {
            Some(blurb) => format!(
                "<span class='actor'>{name}<span class='tooltip' title=\"{blurb}\">{blurb}</span></span>"
            ),
            None => format!("<span class='actor'>{name}</span>"),
        })
        .collect();

    if spans.is_empty() {
        UNKNOWN_ACTOR.to_string()
    } else {
        spans.join(", ")
    }
}
