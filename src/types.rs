use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Placeholder title when no candidate survives the headline heuristics.
pub const UNTITLED_PROJECT: &str = "UNTITLED PROJECT";
/// Placeholder tag when the block carries no `TAG:` line.
pub const UNKNOWN_TAG: &str = "UNKNOWN";
/// Placeholder for an actor group that resolves to nothing displayable.
pub const UNKNOWN_ACTOR: &str = "UNKNOWN ACTOR";

/// Actor prominence class. A-tier is preferred; B-tier is the fallback when
/// the A-tier line yields no names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorTier {
    A,
    B,
}

/// Structured fields extracted from one raw article block. Immutable once
/// built; missing sections land as sentinels or empty collections.
#[derive(Debug, Clone)]
pub struct ParsedRecord {
    pub title: String,
    pub tag: String,
    pub posted: Option<NaiveDate>,
    pub tier: ActorTier,
    pub actors: Vec<String>,
    pub blurbs: HashMap<String, String>,
}

/// One renderable report line: an HTML fragment plus the tier flag the
/// presentation side uses for styling.
#[derive(Debug, Clone, Serialize)]
pub struct LineRecord {
    pub html_fragment: String,
    pub is_a_tier: bool,
}

/// All surviving lines for one posted date, in feed order, with the
/// formatted day header.
#[derive(Debug, Clone, Serialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub header: String,
    pub lines: Vec<LineRecord>,
}

/// Per-render dedup state: which actor names have already been shown for
/// each project title. Created at the start of one aggregation pass and
/// dropped at its end; never shared across renders.
#[derive(Debug, Default)]
pub struct RenderContext {
    shown: HashMap<String, HashSet<String>>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter `names` down to those not yet shown for `title`, marking the
    /// survivors as shown. Order is preserved.
    pub fn claim_unshown(&mut self, title: &str, names: &[String]) -> Vec<String> {
        let shown = self.shown.entry(title.to_string()).or_default();
        names
            .iter()
            .filter(|name| shown.insert((*name).clone()))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub follow_redirects: bool,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "casting-report/0.1".to_string(),
            timeout_seconds: 30,
            follow_redirects: true,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
