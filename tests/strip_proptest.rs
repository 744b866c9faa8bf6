use mdstrip_lib::{EMOJI_RANGES, RangeSet, strip};
use proptest::prelude::*;

fn in_table(c: char) -> bool {
    EMOJI_RANGES.iter().any(|r| r.contains(c as u32))
}

/// Text mixing ASCII, accented letters, CJK, and characters from the emoji blocks
fn mixed_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::char::range(' ', '~'),
            1 => prop::char::range('\u{00C0}', '\u{017F}'),
            1 => prop::char::range('\u{4E00}', '\u{4E40}'),
            2 => prop::char::range('\u{2300}', '\u{2BFF}'),
            2 => prop::char::range('\u{1F1E0}', '\u{1FAFF}'),
            1 => Just('\n'),
            1 => Just('\r'),
        ],
        0..200,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn no_table_code_point_survives(s in mixed_text()) {
        let ranges = RangeSet::emoji();
        let result = strip(&s, &ranges);
        prop_assert!(!result.content.chars().any(in_table), "left an emoji in {:?}", result.content);
    }

    #[test]
    fn only_table_code_points_are_removed(s in mixed_text()) {
        let ranges = RangeSet::emoji();
        let result = strip(&s, &ranges);
        let expected: String = s.chars().filter(|&c| !in_table(c)).collect();
        prop_assert_eq!(&*result.content, expected.as_str());
        prop_assert_eq!(result.removed, s.chars().count() - expected.chars().count());
        prop_assert_eq!(result.bytes_removed, s.len() - expected.len());
    }

    #[test]
    fn stripping_is_idempotent(s in mixed_text()) {
        let ranges = RangeSet::emoji();
        let once = strip(&s, &ranges).into_owned();
        let twice = strip(&once, &ranges);
        prop_assert_eq!(twice.removed, 0);
        prop_assert_eq!(&*twice.content, once.as_str());
    }

    #[test]
    fn text_without_emoji_is_unchanged(s in "[a-zA-Z0-9 .,;:!?#*_`\\[\\]()\n-]{0,200}") {
        let ranges = RangeSet::emoji();
        let result = strip(&s, &ranges);
        prop_assert_eq!(result.removed, 0);
        prop_assert_eq!(&*result.content, s.as_str());
    }
}
