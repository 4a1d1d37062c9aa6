//! Applies the classifier to every line of a file.

use serde::Serialize;
use tracing::{debug, warn};

use super::classify::{Classifier, CommentSpan, Disposition, Mode};
use super::scanner::{LexState, scan};

/// One line of input, borrowed from the loaded file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Line text without its terminator.
    pub text: &'a str,
    /// `"\n"`, `"\r\n"` or `""` for a final unterminated line.
    pub terminator: &'a str,
}

/// Split `content` into lines, keeping each line's own terminator.
pub fn source_lines(content: &str) -> impl Iterator<Item = SourceLine<'_>> {
    content
        .split_inclusive('\n')
        .enumerate()
        .map(|(idx, raw)| {
            let text = raw
                .strip_suffix("\r\n")
                .or_else(|| raw.strip_suffix('\n'))
                .unwrap_or(raw);
            SourceLine {
                number: idx + 1,
                text,
                terminator: &raw[text.len()..],
            }
        })
}

/// A removed comment, kept for the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalLogEntry {
    pub line: usize,
    /// The original line, trimmed.
    pub text: String,
    /// The part of the line that was dropped, trimmed.
    pub removed: String,
    pub disposition: Disposition,
}

/// Output of one pass over a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    /// Output lines, each with its terminator.
    pub lines: Vec<String>,
    pub removals: Vec<RemovalLogEntry>,
    /// Lines holding a `//` inside a multi-line template literal.
    pub suspects: Vec<usize>,
}

impl Rewrite {
    pub fn changed(&self) -> bool {
        !self.removals.is_empty()
    }

    /// The rewritten file content.
    pub fn content(&self) -> String {
        self.lines.concat()
    }
}

/// Run the scanner and classifier over `lines`.
pub fn process<'a, I>(lines: I, classifier: &Classifier, mode: Mode) -> Rewrite
where
    I: IntoIterator<Item = SourceLine<'a>>,
{
    let mut out = Rewrite::default();
    let mut state = LexState::Code;

    for line in lines {
        let entering = state;
        let scanned = scan(line.text, entering);
        state = scanned.exit;

        if let Some(at) = scanned.suspect {
            warn!(
                line = line.number,
                column = at + 1,
                "`//` inside a multi-line template literal, left untouched"
            );
            out.suspects.push(line.number);
        }

        let Some(offset) = scanned.comment else {
            out.lines.push(format!("{}{}", line.text, line.terminator));
            continue;
        };

        let span = CommentSpan::new(line.number, line.text, offset);
        let mut disposition = classifier.classify_span(&span, line.text, mode);

        // A line that opened inside a literal from the previous line has a
        // prefix we cannot vouch for.
        if disposition == Disposition::DropInlineSuffix && !entering.is_code() {
            warn!(
                line = line.number,
                "trailing comment follows a literal carried over from the previous line, left untouched"
            );
            disposition = Disposition::Keep;
        }

        match disposition {
            Disposition::Keep => {
                out.lines.push(format!("{}{}", line.text, line.terminator));
            }
            Disposition::DropWholeLine => {
                debug!(line = line.number, "removing comment line");
                out.removals.push(RemovalLogEntry {
                    line: line.number,
                    text: line.text.trim().to_string(),
                    removed: span.comment.trim().to_string(),
                    disposition,
                });
            }
            Disposition::DropInlineSuffix => {
                debug!(line = line.number, "removing trailing comment");
                out.lines
                    .push(format!("{}{}", span.code.trim_end(), line.terminator));
                out.removals.push(RemovalLogEntry {
                    line: line.number,
                    text: line.text.trim().to_string(),
                    removed: span.comment.trim().to_string(),
                    disposition,
                });
            }
        }
    }

    out
}

/// Convenience wrapper over [`process`] for whole-file content.
pub fn process_str(content: &str, classifier: &Classifier, mode: Mode) -> Rewrite {
    process(source_lines(content), classifier, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::rules::RuleSet;
    use pretty_assertions::assert_eq;

    fn classifier() -> Classifier {
        Classifier::new(RuleSet::compile().unwrap())
    }

    #[test]
    fn source_lines_keep_terminators() {
        let lines: Vec<_> = source_lines("a\r\nb\nc").collect();
        assert_eq!(lines.len(), 3);
        assert_eq!((lines[0].text, lines[0].terminator), ("a", "\r\n"));
        assert_eq!((lines[1].text, lines[1].terminator), ("b", "\n"));
        assert_eq!((lines[2].text, lines[2].terminator), ("c", ""));
        assert_eq!(lines[2].number, 3);
    }

    #[test]
    fn normal_mode_drops_narration_lines_only() {
        let src = "\
// 创建组件
const a = 1; // create a
// TODO: fix this later
// Safari needs the explicit width here
const url = \"http://foo\"; // see https://bar
";
        let rewrite = process_str(src, &classifier(), Mode::Normal);
        assert_eq!(
            rewrite.content(),
            "\
const a = 1; // create a
// TODO: fix this later
// Safari needs the explicit width here
const url = \"http://foo\"; // see https://bar
"
        );
        assert_eq!(rewrite.removals.len(), 1);
        assert_eq!(rewrite.removals[0].line, 1);
        assert_eq!(rewrite.removals[0].text, "// 创建组件");
        assert_eq!(rewrite.removals[0].disposition, Disposition::DropWholeLine);
    }

    #[test]
    fn aggressive_mode_cuts_trailing_comments() {
        let src = "doWork(); // explanatory note\n  // gone\nconst s = \"a//b\";\r\n";
        let rewrite = process_str(src, &classifier(), Mode::Aggressive);
        assert_eq!(rewrite.lines, vec!["doWork();\n", "const s = \"a//b\";\r\n"]);
        assert_eq!(rewrite.removals.len(), 2);
        assert_eq!(rewrite.removals[0].removed, "// explanatory note");
        assert_eq!(
            rewrite.removals[0].disposition,
            Disposition::DropInlineSuffix
        );
        assert_eq!(rewrite.removals[1].disposition, Disposition::DropWholeLine);
    }

    #[test]
    fn aggressive_mode_keeps_line_count_for_inline_removals() {
        let src = "a(); // one\nb(); // two\n";
        let rewrite = process_str(src, &classifier(), Mode::Aggressive);
        assert_eq!(rewrite.lines.len(), 2);
        assert!(rewrite.lines.iter().all(|l| !l.contains("//")));
    }

    #[test]
    fn normal_mode_is_idempotent() {
        let src = "\
// import things
import x from 'y';
// ok
// Keep this: the server sends dates in local time
function f() {
  // 返回结果
  return 1; // trailing
}
";
        let classifier = classifier();
        let first = process_str(src, &classifier, Mode::Normal);
        assert!(first.changed());
        let second = process_str(&first.content(), &classifier, Mode::Normal);
        assert!(!second.changed());
        assert_eq!(second.content(), first.content());
    }

    #[test]
    fn no_comment_means_no_change() {
        let src = "const a = 'http://x';\nlet b = 2;";
        let rewrite = process_str(src, &classifier(), Mode::Aggressive);
        assert!(!rewrite.changed());
        assert_eq!(rewrite.content(), src);
    }

    #[test]
    fn multi_line_template_markers_are_flagged_not_cut() {
        let src = "const t = `\n  see http://example.com\n`; // create\n";
        let rewrite = process_str(src, &classifier(), Mode::Aggressive);
        // line 3 starts inside the template, so its trailing comment stays too
        assert_eq!(rewrite.suspects, vec![2]);
        assert_eq!(rewrite.removals.len(), 0);
        assert_eq!(rewrite.content(), src);
    }
}
