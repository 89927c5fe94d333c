use casting_report::sink::{render_report, JsonSink, PlainTextSink, ReportSink};
use casting_report::types::{DateGroup, LineRecord, Result};
use casting_report::aggregate_report;
use chrono::NaiveDate;
use tracing::info;

fn report_now() -> chrono::NaiveDateTime {
    // 30h after noon of 2024-01-05, the newest posted date in the fixtures.
    NaiveDate::from_ymd_opt(2024, 1, 6)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

const FIXTURE_FEED: &str = "\
ARTICLE TITLE: 'Heat' Adds Two Stars
TAG: film
A-TIER ACTORS: Jane Doe, John Smith
B-TIER ACTORS: Bit Player
BLURBS:
Jane Doe: Oscar winner
POSTED DATE: 2024-01-05
FULL ARTICLE TEXT: body

ARTICLE TITLE: 'Heat' Rounds Out Ensemble
TAG: film
A-TIER ACTORS: Jane Doe
POSTED DATE: 2024-01-02
FULL ARTICLE TEXT: body

ARTICLE TITLE: 'Heat' Casting Continues
TAG: film
A-TIER ACTORS: Jane Doe, Extra Guy
POSTED DATE: 2024-01-02
FULL ARTICLE TEXT: body

ARTICLE TITLE: 'Limbo' Still In Talks
TAG: drama
A-TIER ACTORS: Someone Dated
FULL ARTICLE TEXT: no posted date on this one

ARTICLE TITLE: 'Ghost' Finds Nobody
TAG: drama
A-TIER ACTORS: [NONE]
B-TIER ACTORS: [NONE]
POSTED DATE: 2024-01-01
FULL ARTICLE TEXT: body

ARTICLE TITLE: 'Fallback' Leans On Character Actors
TAG: limited
A-TIER ACTORS: [NONE]
B-TIER ACTORS: Day Player
POSTED DATE: 2024-01-02
FULL ARTICLE TEXT: body
";

#[test]
fn buckets_render_newest_date_first() {
    let groups = aggregate_report(FIXTURE_FEED, report_now());

    let dates: Vec<NaiveDate> = groups.iter().map(|g| g.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        ]
    );
    assert_eq!(groups[0].header, "JAN 5");
    assert_eq!(groups[1].header, "JAN 2");
}

#[test]
fn undated_blocks_contribute_nothing() {
    let groups = aggregate_report(FIXTURE_FEED, report_now());
    for group in &groups {
        for line in &group.lines {
            assert!(!line.html_fragment.contains("LIMBO"));
            assert!(!line.html_fragment.contains("Someone Dated"));
        }
    }
}

#[test]
fn actor_groups_resolving_unknown_drop_their_whole_bucket() {
    let groups = aggregate_report(FIXTURE_FEED, report_now());

    // 'Ghost' was the only Jan 1 block and had no resolvable actors, so no
    // Jan 1 group renders at all.
    assert!(groups
        .iter()
        .all(|g| g.date != NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
}

#[test]
fn actors_dedup_per_project_across_dates() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    let groups = aggregate_report(FIXTURE_FEED, report_now());

    let all_fragments: Vec<&str> = groups
        .iter()
        .flat_map(|g| g.lines.iter().map(|l| l.html_fragment.as_str()))
        .collect();
    info!("Rendered {} lines", all_fragments.len());

    // Jane Doe appears exactly once, in the newest HEAT record.
    let jane_count = all_fragments
        .iter()
        .filter(|f| f.contains("Jane Doe"))
        .count();
    assert_eq!(jane_count, 1);
    assert!(groups[0].lines[0].html_fragment.contains("Jane Doe"));

    // The Jan 2 repeat of HEAT survives only through its fresh name.
    let jan2_heat: Vec<&&str> = all_fragments
        .iter()
        .filter(|f| f.contains("Extra Guy"))
        .collect();
    assert_eq!(jan2_heat.len(), 1);
    assert!(!jan2_heat[0].contains("Jane Doe"));

    // The all-duplicate Jan 2 block emitted nothing: HEAT appears twice.
    let heat_count = all_fragments.iter().filter(|f| f.contains("HEAT")).count();
    assert_eq!(heat_count, 2);
    Ok(())
}

#[test]
fn a_tier_wins_and_flags_the_line() {
    let groups = aggregate_report(FIXTURE_FEED, report_now());

    let newest = &groups[0].lines[0];
    assert!(newest.is_a_tier);
    assert!(newest.html_fragment.contains("John Smith"));
    // B-tier names never render when A-tier supplied content.
    assert!(!newest.html_fragment.contains("Bit Player"));

    let fallback = groups
        .iter()
        .flat_map(|g| g.lines.iter())
        .find(|l| l.html_fragment.contains("FALLBACK"))
        .expect("B-tier fallback line");
    assert!(!fallback.is_a_tier);
    assert!(fallback.html_fragment.contains("Day Player"));
}

#[test]
fn line_fragment_carries_title_tag_blurb_and_time_label() {
    let groups = aggregate_report(FIXTURE_FEED, report_now());
    let newest = &groups[0].lines[0];

    assert!(newest.html_fragment.starts_with("<span class='bold'>ATTACHED:</span>"));
    assert!(newest.html_fragment.contains("<em>HEAT</em>"));
    assert!(newest.html_fragment.contains("(FILM)"));
    assert!(newest.html_fragment.contains("title=\"Oscar winner\""));
    // Posted Jan 5 noon, now Jan 6 18:00: 30 elapsed hours.
    assert!(newest
        .html_fragment
        .contains("<span class='timestamp'>updated 1D6H ago</span>"));
}

#[test]
fn a_second_render_starts_from_a_fresh_dedup_context() {
    let first = aggregate_report(FIXTURE_FEED, report_now());
    let second = aggregate_report(FIXTURE_FEED, report_now());
    assert_eq!(first.len(), second.len());
    assert_eq!(first[0].lines.len(), second[0].lines.len());
}

#[test]
fn empty_feed_renders_no_groups() {
    assert!(aggregate_report("", report_now()).is_empty());
    assert!(aggregate_report("no markers here at all", report_now()).is_empty());
}

#[test]
fn plain_text_sink_strips_markup_and_marks_a_tier() -> Result<()> {
    let groups = aggregate_report(FIXTURE_FEED, report_now());

    let mut out = Vec::new();
    let mut sink = PlainTextSink::new(&mut out);
    render_report(&groups, &mut sink)?;

    let text = String::from_utf8(out).expect("utf8 output");
    assert!(text.contains("== JAN 5 =="));
    assert!(text.contains("* ATTACHED: Jane Doe, John Smith. HEAT. (FILM)"));
    assert!(!text.contains('<'));
    // Blurb text stays in the tooltip, never inline.
    assert!(!text.contains("Oscar winner"));
    Ok(())
}

#[test]
fn json_sink_emits_one_document_of_date_groups() -> Result<()> {
    let groups = aggregate_report(FIXTURE_FEED, report_now());

    let mut out = Vec::new();
    let mut sink = JsonSink::new(&mut out);
    render_report(&groups, &mut sink)?;

    let value: serde_json::Value = serde_json::from_slice(&out)?;
    let rendered = value.as_array().expect("array of groups");
    assert_eq!(rendered.len(), groups.len());
    assert_eq!(rendered[0]["header"], "JAN 5");
    assert_eq!(rendered[0]["lines"][0]["is_a_tier"], true);
    Ok(())
}

struct CancellingSink {
    emitted: usize,
    limit: usize,
}

impl ReportSink for CancellingSink {
    fn begin_group(&mut self, _group: &DateGroup) -> Result<()> {
        Ok(())
    }

    fn emit_line(&mut self, _line: &LineRecord) -> Result<bool> {
        self.emitted += 1;
        Ok(self.emitted < self.limit)
    }
}

#[test]
fn a_sink_can_cancel_the_render_mid_report() -> Result<()> {
    let groups = aggregate_report(FIXTURE_FEED, report_now());
    let total_lines: usize = groups.iter().map(|g| g.lines.len()).sum();
    assert!(total_lines > 1);

    let mut sink = CancellingSink {
        emitted: 0,
        limit: 1,
    };
    render_report(&groups, &mut sink)?;
    assert_eq!(sink.emitted, 1);
    Ok(())
}
