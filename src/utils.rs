use chrono::{Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static TOOLTIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<span class='tooltip'[^>]*>[^<]*</span>").unwrap());
static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Human "time since posted" label. Posts anchor at noon of their posted
/// date; elapsed time is decomposed into whole hours against `now`.
pub fn time_since_label(posted: NaiveDate, now: NaiveDateTime) -> String {
    let posted_noon = posted.and_hms_opt(12, 0, 0).expect("noon is a valid time");
    let hours = (now - posted_noon).num_hours().max(0);

    if hours < 1 {
        "just now".to_string()
    } else if hours < 24 {
        format!("updated {} hours ago", hours)
    } else {
        format!("updated {}D{}H ago", hours / 24, hours % 24)
    }
}

/// Day header for a date bucket: abbreviated month uppercased plus the day
/// number without padding, e.g. "JAN 5".
pub fn date_header(date: NaiveDate) -> String {
    format!("{} {}", date.format("%b").to_string().to_uppercase(), date.day())
}

/// Reduce an HTML line fragment to plain text for terminal output. Tooltip
/// spans disappear entirely so blurbs don't leak inline; remaining tags are
/// stripped.
pub fn strip_html(fragment: &str) -> String {
    let without_tooltips = TOOLTIP_RE.replace_all(fragment, "");
    HTML_TAG_RE.replace_all(&without_tooltips, "").to_string()
}
