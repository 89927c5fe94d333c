use crate::types::{ActorTier, ParsedRecord, UNKNOWN_TAG, UNTITLED_PROJECT};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// Section marker that opens every article block in the feed.
pub const BLOCK_MARKER: &str = "ARTICLE TITLE:";

static BLOCK_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)ARTICLE TITLE:").unwrap());
static HEADLINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)ARTICLE TITLE:\s*(.+)").unwrap());
static QUOTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"['"“”‘’](.+?)['"“”‘’]"#).unwrap());
static CAPS_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z][A-Z0-9:&'\-]{4,}").unwrap());
static ACRONYM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2,4}$").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)TAG:\s*(.+)").unwrap());
static POSTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)POSTED DATE:\s*(\d{4}-\d{2}-\d{2})").unwrap());
static A_TIER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)A-TIER ACTORS:\s*(.*)").unwrap());
static B_TIER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)B-TIER ACTORS:\s*(.*)").unwrap());
static BLURBS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)BLURBS:\n(.*?)\n(?:Posted Date:|FULL ARTICLE TEXT:)").unwrap());

/// Headline tokens that never stand in for a project title on their own.
const TITLE_STOPWORDS: &[&str] = &[
    "AND", "THE", "WITH", "JOINS", "CAST", "OF", "IN", "TO", "ON", "BY", "FROM", "FOR", "NEW",
    "SERIES", "MOVIE", "PROJECT",
];

/// Split the raw feed into article blocks, each re-prefixed with the
/// opening marker. Text before the first marker is discarded.
pub fn split_blocks(feed: &str) -> Vec<String> {
    BLOCK_SPLIT_RE
        .split(feed.trim())
        .skip(1)
        .map(|segment| format!("{BLOCK_MARKER}{}", segment.trim()))
        .collect()
}

/// Extract all structured fields from one block. Missing sections become
/// sentinels or empty collections; parsing never fails.
pub fn parse_block(block: &str) -> ParsedRecord {
    let (actors, tier) = extract_actors(block);
    ParsedRecord {
        title: extract_title(block),
        tag: extract_tag(block),
        posted: extract_posted_date(block),
        tier,
        actors,
        blurbs: extract_blurbs(block),
    }
}

/// Project title from the headline. A quoted substring wins outright;
/// otherwise the longest surviving ALL-CAPS token does (stopwords and bare
/// 2-4 letter acronyms excluded, first token wins length ties).
pub fn extract_title(block: &str) -> String {
    let headline = match HEADLINE_RE.captures(block) {
        Some(caps) => caps[1].to_string(),
        None => return UNTITLED_PROJECT.to_string(),
    };

    if let Some(quoted) = QUOTED_RE.captures(&headline) {
        return quoted[1].to_uppercase();
    }

    let mut best: Option<&str> = None;
    for m in CAPS_TOKEN_RE.find_iter(&headline) {
        let candidate = m.as_str().trim();
        if TITLE_STOPWORDS.contains(&candidate) || ACRONYM_RE.is_match(candidate) {
            continue;
        }
        if best.map_or(true, |b| candidate.len() > b.len()) {
            best = Some(candidate);
        }
    }

    match best {
        Some(title) => title.to_string(),
        None => UNTITLED_PROJECT.to_string(),
    }
}

pub fn extract_tag(block: &str) -> String {
    TAG_RE
        .captures(block)
        .map(|caps| caps[1].trim().to_uppercase())
        .unwrap_or_else(|| UNKNOWN_TAG.to_string())
}

/// First `POSTED DATE:` line matching YYYY-MM-DD, parsed as a calendar
/// date. Absent or non-calendar dates yield `None`.
pub fn extract_posted_date(block: &str) -> Option<NaiveDate> {
    let caps = POSTED_RE.captures(block)?;
    NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()
}

fn actor_names(line: Option<&str>) -> Vec<String> {
    let raw = match line {
        Some(raw) => raw,
        None => return Vec::new(),
    };
    // `[NONE]` loses its brackets first, then drops as a sentinel token.
    raw.replace(['[', ']'], "")
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case("NONE"))
        .map(str::to_string)
        .collect()
}

/// Actor list with tier preference: a non-empty A-tier line wins, otherwise
/// the B-tier line is used the same way.
fn extract_actors(block: &str) -> (Vec<String>, ActorTier) {
    let a_line = A_TIER_RE.captures(block).map(|caps| caps[1].to_string());
    let a_names = actor_names(a_line.as_deref());
    if !a_names.is_empty() {
        return (a_names, ActorTier::A);
    }

    let b_line = B_TIER_RE.captures(block).map(|caps| caps[1].to_string());
    (actor_names(b_line.as_deref()), ActorTier::B)
}

/// `Name: description` lines from the BLURBS section. The section ends at
/// the next `Posted Date:` or `FULL ARTICLE TEXT:` line; lines missing
/// either half are skipped.
pub fn extract_blurbs(block: &str) -> HashMap<String, String> {
    let mut blurbs = HashMap::new();
    let caps = match BLURBS_RE.captures(block) {
        Some(caps) => caps,
        None => return blurbs,
    };

    for line in caps[1].lines() {
        let (name, description) = match line.split_once(':') {
            Some(parts) => parts,
            None => continue,
        };
        let (name, description) = (name.trim(), description.trim());
        if name.is_empty() || description.is_empty() {
            debug!("Skipping malformed blurb line: {}", line);
            continue;
        }
        blurbs.insert(name.to_string(), description.to_string());
    }

    blurbs
}
