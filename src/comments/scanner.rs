//! Line scanner that finds the first `//` outside string and template literals.
//!
//! This is a heuristic lexer, not a tokenizer: it knows about the three JS
//! quote characters and backslash escapes inside them, and nothing else.
//! Literal state is carried from one line to the next so that the caller can
//! feed a whole file through it line by line.

/// Lexical state between characters (and between lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexState {
    #[default]
    Code,
    InSingleQuote,
    InDoubleQuote,
    InTemplate,
}

impl LexState {
    fn opened_by(c: char) -> Option<Self> {
        match c {
            '\'' => Some(LexState::InSingleQuote),
            '"' => Some(LexState::InDoubleQuote),
            '`' => Some(LexState::InTemplate),
            _ => None,
        }
    }

    fn closing_quote(self) -> Option<char> {
        match self {
            LexState::Code => None,
            LexState::InSingleQuote => Some('\''),
            LexState::InDoubleQuote => Some('"'),
            LexState::InTemplate => Some('`'),
        }
    }

    pub fn is_code(self) -> bool {
        self == LexState::Code
    }
}

/// Result of scanning one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineScan {
    /// Byte offset of the first `//` found in code state.
    pub comment: Option<usize>,
    /// State at the end of the line, to be fed into the next line.
    pub exit: LexState,
    /// Byte offset of a `//` seen inside a template literal that spans a line
    /// boundary. Never treated as a comment, but worth a warning.
    pub suspect: Option<usize>,
}

/// Scan `line` (without its terminator) starting in `entering` state.
pub fn scan(line: &str, entering: LexState) -> LineScan {
    let mut state = entering;
    let mut escaped = false;
    // Whether the currently open template started on this line.
    let mut template_opened_here = false;
    let mut pending_suspect: Option<usize> = None;
    let mut suspect: Option<usize> = None;

    let mut chars = line.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        match state {
            LexState::Code => {
                if c == '/' && matches!(chars.peek(), Some((_, '/'))) {
                    return LineScan {
                        comment: Some(idx),
                        exit: state,
                        suspect,
                    };
                }
                if let Some(next) = LexState::opened_by(c) {
                    state = next;
                    escaped = false;
                    template_opened_here = next == LexState::InTemplate;
                }
            }
            literal => {
                if escaped {
                    escaped = false;
                    continue;
                }
                if c == '\\' {
                    escaped = true;
                    continue;
                }
                if Some(c) == literal.closing_quote() {
                    if literal == LexState::InTemplate {
                        // A template closed on the line it opened on is an
                        // ordinary single-line literal.
                        if !template_opened_here {
                            suspect = suspect.or(pending_suspect);
                        }
                        pending_suspect = None;
                        template_opened_here = false;
                    }
                    state = LexState::Code;
                    continue;
                }
                if literal == LexState::InTemplate
                    && c == '/'
                    && matches!(chars.peek(), Some((_, '/')))
                    && pending_suspect.is_none()
                {
                    pending_suspect = Some(idx);
                }
            }
        }
    }

    if state == LexState::InTemplate {
        suspect = suspect.or(pending_suspect);
    }

    LineScan {
        comment: None,
        exit: state,
        suspect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset(line: &str) -> Option<usize> {
        scan(line, LexState::Code).comment
    }

    #[test]
    fn finds_whole_line_and_trailing_comments() {
        assert_eq!(offset("// hello"), Some(0));
        assert_eq!(offset("    // indented"), Some(4));
        assert_eq!(offset("doWork(); // note"), Some(10));
        assert_eq!(offset("let x = 1;"), None);
    }

    #[test]
    fn ignores_markers_inside_closed_strings() {
        assert_eq!(offset(r#"const u = "http://example.com";"#), None);
        assert_eq!(offset("const u = 'http://example.com';"), None);
        assert_eq!(offset("const u = `http://example.com`;"), None);
    }

    #[test]
    fn finds_marker_after_string_closes() {
        let line = r#"const url = "http://foo"; // see https://bar"#;
        let found = offset(line).unwrap();
        assert_eq!(&line[found..], "// see https://bar");
    }

    #[test]
    fn other_quote_characters_are_inert_inside_a_literal() {
        assert_eq!(offset(r#"const s = "it's // fine";"#), None);
        assert_eq!(offset(r#"const s = 'say "hi" // there';"#), None);
        let line = r#"const s = "it's"; // real"#;
        assert_eq!(&line[offset(line).unwrap()..], "// real");
    }

    #[test]
    fn escaped_quotes_do_not_close_literals() {
        assert_eq!(offset(r#"const s = "a \" // b";"#), None);
        let line = r#"const s = "a \\"; // c"#;
        assert_eq!(&line[offset(line).unwrap()..], "// c");
    }

    #[test]
    fn only_the_first_marker_counts() {
        let line = "a(); // one // two";
        assert_eq!(offset(line), Some(5));
    }

    #[test]
    fn quotes_inside_the_comment_do_not_change_state() {
        let scan = scan("// don't do this", LexState::Code);
        assert_eq!(scan.exit, LexState::Code);
    }

    #[test]
    fn state_is_carried_across_lines() {
        let first = scan("const t = `line one", LexState::Code);
        assert_eq!(first.exit, LexState::InTemplate);
        assert_eq!(first.comment, None);

        let second = scan("still // inside` + x; // after", first.exit);
        assert_eq!(second.exit, LexState::Code);
        assert_eq!(second.comment, Some(22));
        assert_eq!(second.suspect, Some(6));
    }

    #[test]
    fn flags_markers_in_unterminated_templates() {
        let scan = scan("const t = `see http://x", LexState::Code);
        assert_eq!(scan.comment, None);
        assert_eq!(scan.exit, LexState::InTemplate);
        assert_eq!(scan.suspect, Some(20));
    }

    #[test]
    fn single_line_templates_are_not_suspect() {
        let scan = scan("const t = `http://x`;", LexState::Code);
        assert_eq!(scan.suspect, None);
        assert_eq!(scan.exit, LexState::Code);
    }

    #[test]
    fn multibyte_text_reports_byte_offsets() {
        let line = "let 名 = 1; // 注释";
        let found = offset(line).unwrap();
        assert_eq!(&line[found..], "// 注释");
    }
}
