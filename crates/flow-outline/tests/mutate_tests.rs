//! Mutation tests: state rewrites and log appends.

use chrono::{DateTime, TimeZone, Utc};
use flow_outline::{
    Document, Error, Outline, StateSet, append_task_log, find_task, set_task_state,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 4, 5, minute, 0).unwrap()
}

const TAGGED: &str = "* TODO Ship release   :release:urgent:\n:PROPERTIES:\n:ID: r1\n:END:\n";

#[rstest]
#[case::replace("* TODO Ship release   :release:urgent:", "DONE", "* DONE Ship release   :release:urgent:")]
#[case::insert("* Ship release   :release:urgent:", "DONE", "* DONE Ship release   :release:urgent:")]
#[case::same("* DONE Ship release :a:", "DONE", "* DONE Ship release :a:")]
#[case::deep_tabs("***\tIN-PROGRESS\tTabbed :x:", "IN-REVIEW", "***\tIN-REVIEW\tTabbed :x:")]
fn test_set_state_rewrites_only_keyword(
    #[case] heading: &str,
    #[case] state: &str,
    #[case] expected: &str,
) {
    let text = format!("{heading}\n:PROPERTIES:\n:ID: r1\n:END:\n");
    let doc = Document::parse(&text);

    let updated = set_task_state(&doc, "r1", state, &StateSet::default()).unwrap();

    assert_eq!(updated.lines()[0], expected);
    assert_eq!(&updated.lines()[1..], &doc.lines()[1..]);
}

#[test]
fn test_set_state_preserves_crlf_and_missing_trailing_newline() {
    let doc = Document::parse("* TODO A\r\n:PROPERTIES:\r\n:ID: 1\r\n:END:\r\nbody");
    let updated = set_task_state(&doc, "1", "DONE", &StateSet::default()).unwrap();
    assert_eq!(
        updated.to_text(),
        "* DONE A\r\n:PROPERTIES:\r\n:ID: 1\r\n:END:\r\nbody"
    );
}

#[test]
fn test_invalid_state_leaves_document_unmodified() {
    let doc = Document::parse(TAGGED);
    let err = set_task_state(&doc, "r1", "WAITING", &StateSet::default()).unwrap_err();

    assert!(matches!(err, Error::InvalidState { ref state, .. } if state == "WAITING"));
    assert!(err.to_string().contains("BACKLOG, TODO, IN-PROGRESS, IN-REVIEW, DONE, CANCELLED"));
    assert_eq!(doc.to_text(), TAGGED);
}

#[test]
fn test_unknown_task_fails_for_both_mutators() {
    let doc = Document::parse(TAGGED);
    let states = StateSet::default();

    assert_eq!(
        set_task_state(&doc, "nope", "DONE", &states).unwrap_err(),
        Error::TaskNotFound { id: "nope".into() }
    );
    assert_eq!(
        append_task_log(&doc, "nope", "entry", at(0), &states).unwrap_err(),
        Error::TaskNotFound { id: "nope".into() }
    );
}

#[test]
fn test_two_appends_create_one_log_in_order() {
    let states = StateSet::default();
    let doc = Document::parse(
        "* TODO A\n:PROPERTIES:\n:ID: a\n:END:\nNotes.\n\n* TODO B\n:PROPERTIES:\n:ID: b\n:END:\n",
    );

    let once = append_task_log(&doc, "a", "first", at(1), &states).unwrap();
    let twice = append_task_log(&once, "a", "second", at(2), &states).unwrap();

    assert_eq!(
        twice.to_text(),
        "* TODO A\n:PROPERTIES:\n:ID: a\n:END:\nNotes.\n\n** Log\n\n\
         - [2026-03-04T05:01:00.000Z] first\n\n\
         - [2026-03-04T05:02:00.000Z] second\n\
         * TODO B\n:PROPERTIES:\n:ID: b\n:END:\n"
    );
    assert_eq!(twice.to_text().matches("** Log").count(), 1);

    // Task B is untouched and still parses
    let b = find_task(&twice, "b", &states).unwrap();
    assert_eq!(b.title, "B");
}

#[test]
fn test_append_after_existing_bullets() {
    let states = StateSet::default();
    let doc = Document::parse(
        "** IN-PROGRESS Nested :t:\n:PROPERTIES:\n:ID: n\n:END:\n*** Log\n- [old] one\n- [old] two\n*** Agent Context\nctx\n",
    );

    let updated = append_task_log(&doc, "n", "three", at(3), &states).unwrap();

    assert_eq!(
        updated.to_text(),
        "** IN-PROGRESS Nested :t:\n:PROPERTIES:\n:ID: n\n:END:\n*** Log\n- [old] one\n- [old] two\n\n\
         - [2026-03-04T05:03:00.000Z] three\n*** Agent Context\nctx\n"
    );

    let outline = Outline::new(&updated, &states);
    let task = outline.find("n").unwrap();
    assert_eq!(outline.agent_context(&task), "ctx");
}

#[test]
fn test_log_nested_deeper_is_not_reused() {
    let states = StateSet::default();
    let doc = Document::parse(
        "* TODO A\n:PROPERTIES:\n:ID: a\n:END:\n** Notes\n*** Log\nnot this one\n",
    );

    let updated = append_task_log(&doc, "a", "entry", at(4), &states).unwrap();

    assert_eq!(
        updated.to_text(),
        "* TODO A\n:PROPERTIES:\n:ID: a\n:END:\n** Notes\n*** Log\nnot this one\n** Log\n\n\
         - [2026-03-04T05:04:00.000Z] entry\n"
    );
}

#[test]
fn test_injected_heading_cannot_break_outline() {
    let states = StateSet::default();
    let doc = Document::parse(TAGGED);

    let updated = append_task_log(&doc, "r1", "* DONE Fake\n:PROPERTIES:\n:ID: evil\n:END:", at(5), &states)
        .unwrap();

    let outline = Outline::new(&updated, &states);
    assert_eq!(outline.tasks().count(), 1);
    assert!(updated.lines().iter().any(|l| l
        == "- [2026-03-04T05:05:00.000Z] DONE Fake :PROPERTIES: :ID: evil :END:"));
}

#[test]
fn test_append_preserves_cr_line_endings() {
    let states = StateSet::default();
    let doc = Document::parse("* TODO A\r:PROPERTIES:\r:ID: a\r:END:");

    let updated = append_task_log(&doc, "a", "note", at(6), &states).unwrap();

    assert_eq!(
        updated.to_text(),
        "* TODO A\r:PROPERTIES:\r:ID: a\r:END:\r** Log\r\r- [2026-03-04T05:06:00.000Z] note"
    );
}

#[test]
fn test_stray_cr_does_not_convert_lf_file() {
    let states = StateSet::default();
    let doc = Document::parse("* TODO A\n:PROPERTIES:\n:ID: a\n:END:\npasted\rtext\n* TODO B\n");

    let updated = set_task_state(&doc, "a", "DONE", &states).unwrap();

    assert_eq!(
        updated.to_text(),
        "* DONE A\n:PROPERTIES:\n:ID: a\n:END:\npasted\rtext\n* TODO B\n"
    );
}
