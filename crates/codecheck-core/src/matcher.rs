//! Rule evaluation against one file's content.

use crate::comments::CommentMap;
use crate::rule::CompiledRule;

/// One reportable place where a rule's pattern matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOccurrence<'c> {
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
    /// The matched text.
    pub text: &'c str,
}

/// Returns the matches of `rule` in `content` that should be reported.
///
/// When the rule excludes comments, a match is dropped if its start offset
/// lies inside any comment interval. Scan order is preserved.
#[must_use]
pub fn evaluate<'c>(
    content: &'c str,
    rule: &CompiledRule,
    comments: &CommentMap,
) -> Vec<MatchOccurrence<'c>> {
    let spans = rule.pattern().find_all(content);
    let texts = rule.pattern().find_all_text(content);
    debug_assert_eq!(spans.len(), texts.len());

    spans
        .into_iter()
        .zip(texts)
        .filter(|(span, _)| !(rule.exclude_comments() && comments.contains(span.start)))
        .map(|(span, text)| MatchOccurrence {
            start: span.start,
            end: span.end,
            text,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::{locate, Interval};
    use crate::pattern::Pattern;

    fn rule(pattern: &str, exclude_comments: bool) -> CompiledRule {
        CompiledRule::new("test", Pattern::compile(pattern).unwrap(), "msg")
            .with_exclude_comments(exclude_comments)
    }

    fn block_comments() -> Pattern {
        Pattern::compile(r"/\* .*? \*/").unwrap()
    }

    #[test]
    fn match_inside_comment_is_excluded() {
        let content = "/* BAD */\ncode\n";
        let comments = locate(content, &block_comments());
        assert_eq!(comments.intervals(), &[Interval { start: 0, end: 9 }]);

        assert!(evaluate(content, &rule("BAD", true), &comments).is_empty());
    }

    #[test]
    fn match_inside_comment_is_kept_when_not_excluding() {
        let content = "/* BAD */\ncode\n";
        let comments = locate(content, &block_comments());

        let found = evaluate(content, &rule("BAD", false), &comments);
        assert_eq!(
            found,
            vec![MatchOccurrence {
                start: 3,
                end: 6,
                text: "BAD",
            }]
        );
    }

    #[test]
    fn empty_comment_map_reports_everything() {
        let content = "BAD /* BAD */ BAD";
        let empty = CommentMap::empty();
        assert_eq!(evaluate(content, &rule("BAD", true), &empty).len(), 3);
        assert_eq!(evaluate(content, &rule("BAD", false), &empty).len(), 3);
    }

    #[test]
    fn only_commented_matches_are_dropped() {
        let content = "BAD /* BAD */ BAD\n";
        let comments = locate(content, &block_comments());
        let starts: Vec<usize> = evaluate(content, &rule("BAD", true), &comments)
            .iter()
            .map(|m| m.start)
            .collect();
        assert_eq!(starts, vec![0, 14]);
    }

    #[test]
    fn match_starting_at_comment_end_counts_as_inside() {
        let content = "/* x */BAD";
        let comments = locate(content, &block_comments());
        assert_eq!(comments.intervals()[0].end, 7);
        assert!(evaluate(content, &rule("BAD", true), &comments).is_empty());
    }

    #[test]
    fn match_spanning_into_comment_is_kept() {
        let content = "BAD/* x */";
        let comments = locate(content, &block_comments());
        let found = evaluate(content, &rule(r"BAD/\*", true), &comments);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "BAD/*");
    }

    #[test]
    fn zero_length_matches_are_kept() {
        let content = "a\nb";
        let found = evaluate(content, &rule("(?m)^", true), &CommentMap::empty());
        let starts: Vec<usize> = found.iter().map(|m| m.start).collect();
        assert_eq!(starts, vec![0, 2]);
        assert!(found.iter().all(|m| m.text.is_empty()));
    }
}
