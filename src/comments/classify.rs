//! Keep-or-drop decision for a single detected comment.

use serde::Serialize;
use tracing::debug;

use super::rules::RuleSet;

/// Comments shorter than this (in characters) carry no information.
pub const MIN_COMMENT_CHARS: usize = 3;

/// How far the cleaner is allowed to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Only whole comment lines matching the removal heuristics go.
    #[default]
    Normal,
    /// Every comment goes, including trailing comments after code.
    Aggressive,
}

/// What to do with a line that carries a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Keep,
    DropWholeLine,
    DropInlineSuffix,
}

/// A line split at its comment marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSpan<'a> {
    pub line: usize,
    pub offset: usize,
    /// Everything before the marker.
    pub code: &'a str,
    /// The marker and everything after it.
    pub comment: &'a str,
}

impl<'a> CommentSpan<'a> {
    pub fn new(line: usize, text: &'a str, offset: usize) -> Self {
        let (code, comment) = text.split_at(offset);
        Self {
            line,
            offset,
            code,
            comment,
        }
    }

    pub fn has_code(&self) -> bool {
        !self.code.trim().is_empty()
    }

    /// Comment text without the `//` marker, trimmed.
    pub fn body(&self) -> &'a str {
        self.comment
            .strip_prefix("//")
            .unwrap_or(self.comment)
            .trim()
    }
}

/// Applies a [`RuleSet`] to comment spans.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: RuleSet,
}

impl Classifier {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Classify `line`, whose comment marker sits at byte `offset`.
    pub fn classify(&self, line: &str, offset: usize, mode: Mode) -> Disposition {
        self.classify_span(&CommentSpan::new(0, line, offset), line, mode)
    }

    pub(crate) fn classify_span(&self, span: &CommentSpan<'_>, line: &str, mode: Mode) -> Disposition {
        if mode == Mode::Aggressive {
            return if span.has_code() {
                Disposition::DropInlineSuffix
            } else {
                Disposition::DropWholeLine
            };
        }

        // Normal mode never touches code.
        if span.has_code() {
            return Disposition::Keep;
        }

        let comment = span.comment.trim();
        if let Some(rule) = self.rules.preserving(comment) {
            debug!(line = span.line, rule = rule.name, "kept by preserve rule");
            return Disposition::Keep;
        }

        let trimmed = line.trim();
        if line.contains("/*") || line.contains("*/") || trimmed.starts_with('*') {
            debug!(line = span.line, "kept as part of a block comment");
            return Disposition::Keep;
        }

        if let Some(keyword) = self.rules.important_keyword(line) {
            debug!(line = span.line, keyword, "kept by important keyword");
            return Disposition::Keep;
        }

        if let Some(rule) = self.rules.removing(comment) {
            debug!(line = span.line, rule = rule.name, "dropped by remove rule");
            return Disposition::DropWholeLine;
        }

        let body = span.body();
        if body.starts_with(['@', '-', '*', '=']) {
            return Disposition::Keep;
        }

        if let Some(rule) = self.rules.useless_phrase(body) {
            debug!(line = span.line, rule = rule.name, "dropped as generic narration");
            return Disposition::DropWholeLine;
        }

        if body.chars().count() < MIN_COMMENT_CHARS {
            debug!(line = span.line, "dropped as too short");
            return Disposition::DropWholeLine;
        }

        Disposition::Keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new(RuleSet::compile().unwrap())
    }

    fn normal(line: &str) -> Disposition {
        let offset = line.find("//").unwrap();
        classifier().classify(line, offset, Mode::Normal)
    }

    fn aggressive(line: &str) -> Disposition {
        let offset = line.find("//").unwrap();
        classifier().classify(line, offset, Mode::Aggressive)
    }

    #[test]
    fn todo_comments_are_kept() {
        assert_eq!(normal("// TODO: fix this later"), Disposition::Keep);
    }

    #[test]
    fn bare_chinese_narration_is_dropped() {
        assert_eq!(normal("// 创建组件"), Disposition::DropWholeLine);
        assert_eq!(normal("    // 初始化状态"), Disposition::DropWholeLine);
    }

    #[test]
    fn english_narration_is_dropped() {
        assert_eq!(normal("// Render the list"), Disposition::DropWholeLine);
        assert_eq!(normal("// handle click"), Disposition::DropWholeLine);
    }

    #[test]
    fn preserve_beats_denylist() {
        // `create` is on the denylist, but these match preserve rules first.
        assert_eq!(normal("// TODO: create the index"), Disposition::Keep);
        assert_eq!(normal("// 1. create the index"), Disposition::Keep);
        assert_eq!(normal("// - create the index"), Disposition::Keep);
        assert_eq!(normal("// @returns created index"), Disposition::Keep);
    }

    #[test]
    fn block_comment_fragments_are_kept() {
        assert_eq!(normal("// create /* odd */"), Disposition::Keep);
        assert_eq!(normal("   * // create"), Disposition::Keep);
    }

    #[test]
    fn important_keywords_keep_the_line() {
        assert_eq!(normal("// get the api token"), Disposition::Keep);
        assert_eq!(normal("// 设置配置项"), Disposition::Keep);
    }

    #[test]
    fn empty_and_short_comments_are_dropped() {
        assert_eq!(normal("//"), Disposition::DropWholeLine);
        assert_eq!(normal("//    "), Disposition::DropWholeLine);
        assert_eq!(normal("// ok"), Disposition::DropWholeLine);
        assert_eq!(normal("// 好"), Disposition::DropWholeLine);
    }

    #[test]
    fn sigil_bodies_without_preserve_match_are_kept() {
        assert_eq!(normal("// @"), Disposition::Keep);
        assert_eq!(normal("// =>"), Disposition::Keep);
    }

    #[test]
    fn informative_comments_are_kept() {
        assert_eq!(
            normal("// Safari drops the event when the element is hidden"),
            Disposition::Keep
        );
        assert_eq!(normal("// 兼容旧版浏览器的写法"), Disposition::Keep);
        assert_eq!(
            normal("    // If the token expired the server answers 401, so refresh first"),
            Disposition::Keep
        );
    }

    #[test]
    fn normal_mode_never_touches_trailing_comments() {
        assert_eq!(normal("doWork(); //"), Disposition::Keep);
        assert_eq!(normal("doWork(); // create"), Disposition::Keep);
    }

    #[test]
    fn url_after_closed_string_is_kept() {
        let line = r#"const url = "http://foo"; // see https://bar"#;
        let offset = super::super::scanner::scan(line, Default::default())
            .comment
            .unwrap();
        assert_eq!(classifier().classify(line, offset, Mode::Normal), Disposition::Keep);
    }

    #[test]
    fn aggressive_mode_ignores_every_rule() {
        assert_eq!(aggressive("// TODO: keep me?"), Disposition::DropWholeLine);
        assert_eq!(aggressive("  // Copyright 2024"), Disposition::DropWholeLine);
        assert_eq!(
            aggressive("doWork(); // explanatory note"),
            Disposition::DropInlineSuffix
        );
    }

    #[test]
    fn span_splits_code_and_comment() {
        let span = CommentSpan::new(3, "x = 1; //  note ", 7);
        assert_eq!(span.code, "x = 1; ");
        assert_eq!(span.comment, "//  note ");
        assert_eq!(span.body(), "note");
        assert!(span.has_code());
    }
}
