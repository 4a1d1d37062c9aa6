//! Heuristic removal of `//` comments.
//!
//! - [`scanner`] finds the first `//` on a line that is not inside a literal.
//! - [`classify`] decides whether that comment stays.
//! - [`rewrite`] runs both over a file and records what was removed.
//!
//! Normal mode only removes whole comment lines that look like narration of
//! the code below them. Aggressive mode removes every comment it can see,
//! trailing ones included. Neither mode understands block comments beyond
//! leaving lines that touch `/*`, `*/` or a leading `*` alone.

pub mod classify;
pub mod rewrite;
pub mod rules;
pub mod scanner;

pub use classify::{Classifier, CommentSpan, Disposition, Mode};
pub use rewrite::{RemovalLogEntry, Rewrite, SourceLine, process, process_str, source_lines};
pub use rules::RuleSet;
pub use scanner::{LexState, LineScan, scan};
