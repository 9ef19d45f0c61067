use code_counter_core::classifier::{LineKind, LineScanner};
use code_counter_core::language::{LanguageRule, TokenPair};
use code_counter_core::{LineCounts, classify, count_lines};
use proptest::prelude::*;

fn c_rule() -> LanguageRule {
    LanguageRule::new("c")
        .with_line_comments(["//"])
        .with_block_comments([TokenPair::new("/*", "*/")])
}

fn token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("//"),
            Just("/*"),
            Just("*/"),
            Just("\""),
            Just("'"),
            Just("\\"),
            Just("#"),
            Just("`"),
            Just(" "),
            Just("\t"),
            Just("\n"),
            Just("\r\n"),
            Just("x"),
            Just("日本"),
            Just("\u{feff}"),
        ],
        0..120,
    )
    .prop_map(|parts| parts.concat())
}

fn arbitrary_rule() -> impl Strategy<Value = LanguageRule> {
    (
        prop::collection::vec("[#/;%!-]{1,3}", 0..3),
        prop::collection::vec(("[/*#({<!-]{1,3}", "[/*#)}>!-]{1,3}"), 0..3),
        any::<bool>(),
    )
        .prop_map(|(lines, blocks, nested)| {
            LanguageRule::new("any")
                .with_line_comments(lines)
                .with_block_comments(blocks.into_iter().map(|(b, e)| TokenPair::new(b, e)))
                .with_nested(nested)
        })
}

proptest! {
    #[test]
    fn test_total_matches_line_count(text in token_soup()) {
        let counts = classify(&c_rule(), &text);
        prop_assert_eq!(counts.total(), count_lines(&text));
    }

    #[test]
    fn test_total_matches_line_count_for_any_rule(rule in arbitrary_rule(), text in token_soup()) {
        let counts = classify(&rule, &text);
        prop_assert_eq!(counts.total(), count_lines(&text));
    }

    #[test]
    fn test_whitespace_line_outside_comment_is_blank(
        rule in arbitrary_rule(),
        prefix in prop::collection::vec(token_soup(), 0..5),
        blank in "[ \t]{0,8}",
    ) {
        let mut scanner = LineScanner::new(&rule);
        for line in prefix.iter().flat_map(|chunk| chunk.split('\n')) {
            scanner.process_line(line);
        }
        if !scanner.is_in_block_comment() {
            prop_assert_eq!(scanner.process_line(&blank), LineKind::Blank);
        }
    }

    #[test]
    fn test_classification_is_deterministic(rule in arbitrary_rule(), text in token_soup()) {
        prop_assert_eq!(classify(&rule, &text), classify(&rule, &text));
    }

    #[test]
    fn test_streaming_matches_whole_text(text in token_soup()) {
        let rule = c_rule();
        let mut scanner = LineScanner::new(&rule);
        let mut seen = LineCounts::zero();
        let body = text.strip_prefix('\u{feff}').unwrap_or(text.as_str());
        for line in body.split_inclusive('\n') {
            match scanner.process_line(line) {
                LineKind::Code => seen.code += 1,
                LineKind::Comment => seen.comment += 1,
                LineKind::Blank => seen.blank += 1,
            }
        }
        prop_assert_eq!(scanner.finish(), seen);
        prop_assert_eq!(seen, classify(&rule, &text));
    }
}
