//! Round-trip tests for the document model.

use flow_outline::{Document, LineEnding};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case::lf_trailing("* TODO A\n:PROPERTIES:\n:ID: 1\n:END:\n", LineEnding::Lf, true)]
#[case::lf_bare("* TODO A\nbody", LineEnding::Lf, false)]
#[case::crlf_trailing("* TODO A\r\nbody\r\n", LineEnding::CrLf, true)]
#[case::crlf_bare("* TODO A\r\nbody", LineEnding::CrLf, false)]
#[case::cr_trailing("* TODO A\rbody\r", LineEnding::Cr, true)]
#[case::cr_bare("* TODO A\rbody", LineEnding::Cr, false)]
#[case::blank_lines("\n\n\n", LineEnding::Lf, true)]
#[case::lf_with_stray_cr("* TODO A\npasted\rtext\n", LineEnding::Lf, true)]
#[case::crlf_with_stray_cr("* TODO A\r\npasted\rtext\r\n", LineEnding::CrLf, true)]
fn test_round_trip_preserves_bytes(
    #[case] text: &str,
    #[case] ending: LineEnding,
    #[case] trailing: bool,
) {
    let doc = Document::parse(text);

    assert_eq!(doc.line_ending(), ending);
    assert_eq!(doc.has_trailing_newline(), trailing);
    assert_eq!(doc.to_text(), text);
}

#[test]
fn test_display_matches_to_text() {
    let doc = Document::parse("* A\r\n* B");
    assert_eq!(doc.to_string(), "* A\r\n* B");
}

fn line_ending() -> impl Strategy<Value = LineEnding> {
    prop_oneof![
        Just(LineEnding::Lf),
        Just(LineEnding::CrLf),
        Just(LineEnding::Cr),
    ]
}

proptest! {
    #[test]
    fn round_trip_is_identity(
        lines in prop::collection::vec("[^\r\n]{0,12}", 0..12),
        ending in line_ending(),
        trailing in any::<bool>(),
    ) {
        let eol = ending.as_str();
        let mut text = lines.join(eol);
        if trailing {
            text.push_str(eol);
        }

        let doc = Document::parse(&text);
        prop_assert_eq!(doc.to_text(), text);
    }
}
