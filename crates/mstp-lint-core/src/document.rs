//! Topic document processing.
//!
//! Streams a topic file's markup with quick-xml, runs the rule engine
//! over every text-bearing node, and serializes the (possibly modified)
//! document back out.
//!
//! Only nodes whose entire content is a single uninterrupted text run
//! are handled; a node with nested markup inside is skipped, though its
//! own single-text-run children still qualify. Replaced text is written
//! back as escaped character data, so the bold markup produced by the
//! UI-term rule appears escaped in the output — this matches the
//! original serializer's behavior.

use std::collections::HashMap;

use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::engine::{self, RuleEngine, RuleToggles};
use crate::grammar::GrammarCorrector;
use crate::issue::IssueRecord;
use crate::review::{Decision, Reviewer};

/// Elements treated as plain-text-bearing nodes.
const TEXT_TAGS: &[&str] = &["p", "li", "td", "th", "span"];

/// Elements treated as heading nodes.
const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// The outcome of processing one topic document.
#[derive(Debug, Clone)]
pub struct TopicReport {
    /// The serialized document, with accepted replacements applied.
    pub html: String,
    /// Every issue found, paired with the text unit it came from.
    /// Body-node issues come first in document order, then heading
    /// issues in document order.
    pub records: Vec<IssueRecord>,
    /// Whether any replacement was actually applied.
    pub changed: bool,
}

/// A single-text-run element found in the event stream.
struct TextRun {
    /// Index of the `Text` event inside the element.
    text_idx: usize,
    /// Lowercased local tag name.
    tag: String,
    /// Unescaped text content.
    content: String,
}

/// Process one topic document through the rule engine.
///
/// Every concrete suggestion goes through `reviewer.decide`; advisory
/// issues go through `reviewer.observe`. Batch mode passes
/// [`AcceptAll`](crate::review::AcceptAll); review mode passes an
/// interactive reviewer.
#[tracing::instrument(skip_all, fields(html_len = html.len()))]
pub fn process_topic<C, R>(
    html: &str,
    engine: &RuleEngine<C>,
    toggles: &RuleToggles,
    reviewer: &mut R,
) -> Result<TopicReport, quick_xml::Error>
where
    C: GrammarCorrector,
    R: Reviewer,
{
    let events = collect_events(html)?;
    let runs = find_text_runs(&events)?;

    let mut records = Vec::new();
    let mut replacements: HashMap<usize, String> = HashMap::new();

    // Body pass: p, li, td, th, span.
    for run in runs.iter().filter(|r| TEXT_TAGS.contains(&r.tag.as_str())) {
        if run.content.trim().is_empty() {
            continue;
        }
        let evaluation = engine.evaluate(&run.content, toggles);
        let mut unit = run.content.clone();
        for issue in &evaluation.issues {
            match issue.replacement() {
                Some(replacement) => {
                    if reviewer.decide(issue) == Decision::Accept {
                        unit = replacement.to_string();
                    }
                }
                None => reviewer.observe(issue),
            }
            records.push(IssueRecord {
                issue: issue.clone(),
                source: run.content.clone(),
            });
        }
        if unit != run.content {
            replacements.insert(run.text_idx, unit);
        }
    }

    // Heading pass: h1..h6, gated by the headings toggle.
    if toggles.headings {
        for run in runs.iter().filter(|r| HEADING_TAGS.contains(&r.tag.as_str())) {
            if run.content.is_empty() {
                continue;
            }
            let Some(issue) = engine::heading_issue(&run.content) else {
                continue;
            };
            if reviewer.decide(&issue) == Decision::Accept
                && let Some(replacement) = issue.replacement()
            {
                replacements.insert(run.text_idx, replacement.to_string());
            }
            records.push(IssueRecord {
                source: run.content.clone(),
                issue,
            });
        }
    }

    let changed = !replacements.is_empty();
    let html = serialize(events, &replacements)?;

    tracing::debug!(issues = records.len(), changed, "topic processed");
    Ok(TopicReport {
        html,
        records,
        changed,
    })
}

/// Read the whole document into owned events.
fn collect_events(html: &str) -> Result<Vec<Event<'static>>, quick_xml::Error> {
    let mut reader = Reader::from_str(html);
    let mut events = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            event => events.push(event.into_owned()),
        }
    }
    Ok(events)
}

/// Locate Start → Text → End triples: elements whose entire content is a
/// single text run.
fn find_text_runs(events: &[Event<'static>]) -> Result<Vec<TextRun>, quick_xml::Error> {
    let mut runs = Vec::new();
    for (i, event) in events.iter().enumerate() {
        let Event::Start(start) = event else {
            continue;
        };
        let Some(Event::Text(text)) = events.get(i + 1) else {
            continue;
        };
        let Some(Event::End(end)) = events.get(i + 2) else {
            continue;
        };
        if start.local_name().as_ref() != end.local_name().as_ref() {
            continue;
        }
        let tag = String::from_utf8_lossy(start.local_name().as_ref()).to_lowercase();
        if !TEXT_TAGS.contains(&tag.as_str()) && !HEADING_TAGS.contains(&tag.as_str()) {
            continue;
        }
        runs.push(TextRun {
            text_idx: i + 1,
            tag,
            content: text.unescape()?.into_owned(),
        });
    }
    Ok(runs)
}

/// Write events back out, swapping in replacement text where accepted.
fn serialize(
    events: Vec<Event<'static>>,
    replacements: &HashMap<usize, String>,
) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());
    for (i, event) in events.into_iter().enumerate() {
        match replacements.get(&i) {
            Some(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            None => writer.write_event(event)?,
        }
    }
    let bytes = writer.into_inner();
    // The writer only ever receives valid UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{AcceptAll, RejectAll};

    const TOPIC: &str = "<html><body>\
        <h1>Getting Started</h1>\
        <p>Click OK to continue.</p>\
        <p>Mixed <span>inner text</span> content</p>\
        <td>   </td>\
        </body></html>";

    fn engine() -> RuleEngine {
        RuleEngine::new()
    }

    #[test]
    fn bolds_ui_terms_in_text_nodes() {
        let mut toggles = RuleToggles::none();
        toggles.ui = true;
        let report = process_topic(TOPIC, &engine(), &toggles, &mut AcceptAll).unwrap();
        assert!(report.changed);
        // Escaped on write, matching the original serializer.
        assert!(report.html.contains("Click &lt;b&gt;OK&lt;/b&gt; to continue."));
    }

    #[test]
    fn sentence_cases_headings() {
        let mut toggles = RuleToggles::none();
        toggles.headings = true;
        let report = process_topic(TOPIC, &engine(), &toggles, &mut AcceptAll).unwrap();
        assert!(report.html.contains("<h1>Getting started</h1>"));
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn headings_untouched_when_toggle_off() {
        let mut toggles = RuleToggles::none();
        let report = process_topic(TOPIC, &engine(), &toggles, &mut AcceptAll).unwrap();
        assert!(report.html.contains("<h1>Getting Started</h1>"));
        assert!(!report.changed);
    }

    #[test]
    fn nested_markup_is_skipped_but_inner_runs_qualify() {
        let mut engine = engine();
        engine.terms_mut().add_term("inner", "nested");
        let mut toggles = RuleToggles::none();
        toggles.custom_terms = true;
        let report = process_topic(TOPIC, &engine, &toggles, &mut AcceptAll).unwrap();
        // The outer <p> has nested markup and is skipped; the <span>
        // inside it is a single text run and is processed.
        assert!(report.html.contains("<span>nested text</span>"));
        assert!(report.html.contains("Mixed <span>"));
    }

    #[test]
    fn whitespace_only_nodes_are_skipped() {
        let report = process_topic(TOPIC, &engine(), &RuleToggles::all(), &mut AcceptAll).unwrap();
        assert!(report.html.contains("<td>   </td>"));
    }

    #[test]
    fn rejecting_everything_changes_nothing() {
        let report = process_topic(TOPIC, &engine(), &RuleToggles::all(), &mut RejectAll).unwrap();
        assert!(!report.changed);
        assert!(report.html.contains("Click OK to continue."));
        assert!(report.html.contains("<h1>Getting Started</h1>"));
        // Issues are still reported even though nothing was applied.
        assert!(!report.records.is_empty());
    }

    #[test]
    fn body_issues_precede_heading_issues() {
        let report = process_topic(TOPIC, &engine(), &RuleToggles::all(), &mut AcceptAll).unwrap();
        let heading_pos = report
            .records
            .iter()
            .position(|r| r.issue.kind == crate::issue::IssueKind::HeadingCase)
            .expect("heading issue present");
        assert_eq!(heading_pos, report.records.len() - 1);
    }

    #[test]
    fn malformed_markup_is_an_error() {
        let result = process_topic(
            "<p>mismatched</div>",
            &engine(),
            &RuleToggles::all(),
            &mut AcceptAll,
        );
        assert!(result.is_err());
    }

    #[test]
    fn records_carry_the_source_unit() {
        let mut toggles = RuleToggles::none();
        toggles.ui = true;
        let report = process_topic(TOPIC, &engine(), &toggles, &mut AcceptAll).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].source, "Click OK to continue.");
    }
}
