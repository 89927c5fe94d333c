use crate::parser;
use crate::resolver::resolve_actor_line;
use crate::types::{ActorTier, DateGroup, LineRecord, RenderContext, UNKNOWN_ACTOR};
use crate::utils::{date_header, time_since_label};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Run one full aggregation pass over the fetched feed text: split into
/// blocks, bucket by posted date (newest first), dedup actors per project,
/// and build the renderable line for every surviving record.
///
/// `now` is injected so time labels are deterministic under test. The
/// per-project dedup state lives in a [`RenderContext`] scoped to this one
/// call; a second render starts from scratch.
pub fn aggregate_report(feed: &str, now: NaiveDateTime) -> Vec<DateGroup> {
    let blocks = parser::split_blocks(feed);
    debug!("Split feed into {} blocks", blocks.len());

    let buckets = bucket_by_date(blocks);
    let mut context = RenderContext::new();
    let mut groups = Vec::new();

    for (date, day_blocks) in buckets.iter().rev() {
        let lines: Vec<LineRecord> = day_blocks
            .iter()
            .filter_map(|block| build_line(block, &mut context, now))
            .collect();

        // A bucket whose every record dropped renders no header either.
        if lines.is_empty() {
            debug!("No surviving records for {}", date);
            continue;
        }

        groups.push(DateGroup {
            date: *date,
            header: date_header(*date),
            lines,
        });
    }

    info!("Aggregated {} date groups", groups.len());
    groups
}

/// Bucket blocks by posted date, keeping feed order within each bucket.
/// Undated blocks drop here and contribute nothing downstream.
fn bucket_by_date(blocks: Vec<String>) -> BTreeMap<NaiveDate, Vec<String>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    for block in blocks {
        match parser::extract_posted_date(&block) {
            Some(date) => buckets.entry(date).or_default().push(block),
            None => debug!("Dropping block without a parsable posted date"),
        }
    }
    buckets
}

fn build_line(block: &str, context: &mut RenderContext, now: NaiveDateTime) -> Option<LineRecord> {
    let record = parser::parse_block(block);

    let fresh = context.claim_unshown(&record.title, &record.actors);
    if fresh.is_empty() {
        debug!("Every actor already shown for {}", record.title);
        return None;
    }

    let fragment = resolve_actor_line(&fresh.join(", "), &record.blurbs);
    if fragment.contains(UNKNOWN_ACTOR) {
        return None;
    }

    let posted = record.posted?;
    let label = time_since_label(posted, now);

    Some(LineRecord {
        html_fragment: format!(
            "<span class='bold'>ATTACHED:</span> {fragment}. <em>{}</em>. ({})<span class='timestamp'>{label}</span>",
            record.title, record.tag
        ),
        is_a_tier: record.tier == ActorTier::A,
    })
}
