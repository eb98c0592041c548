//! First-Difference Reporting
//!
//! Check mode only needs to point a reviewer at where the committed file
//! drifted, so this is a paired line scan rather than a real diff.

use serde::Serialize;
use std::fmt;

/// Which text a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The file on disk
    Existing,
    /// Freshly generated output
    Generated,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existing => f.write_str("existing"),
            Self::Generated => f.write_str("generated"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Difference {
    /// First 1-based line where both texts have a line and they differ.
    Line {
        line: usize,
        existing: String,
        generated: String,
    },
    /// One side is a prefix of the other.
    LineCount {
        shorter: Side,
        longer: Side,
        missing: usize,
    },
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line { line, existing, generated } => {
                writeln!(f, "  First difference at line {}:", line)?;
                writeln!(f, "    existing:  {:?}", existing)?;
                write!(f, "    generated: {:?}", generated)
            }
            Self::LineCount { shorter, longer, missing } => {
                write!(f, "  {} has {} fewer lines than {}", shorter, missing, longer)
            }
        }
    }
}

/// Locate where `existing` and `generated` diverge; `None` if identical.
pub fn first_difference(existing: &str, generated: &str) -> Option<Difference> {
    if existing == generated {
        return None;
    }

    let existing_lines = split_lines(existing);
    let generated_lines = split_lines(generated);

    let paired = existing_lines.iter().zip(&generated_lines).enumerate();
    for (i, (e, g)) in paired {
        if e != g {
            return Some(Difference::Line {
                line: i + 1,
                existing: e.to_string(),
                generated: g.to_string(),
            });
        }
    }

    // Equal counts still land here when only line endings differ
    let (shorter, longer) = if existing_lines.len() < generated_lines.len() {
        (Side::Existing, Side::Generated)
    } else {
        (Side::Generated, Side::Existing)
    };
    Some(Difference::LineCount {
        shorter,
        longer,
        missing: existing_lines.len().abs_diff(generated_lines.len()),
    })
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split on every Unicode line boundary, `\r\n` counting as one.
///
/// Unlike `str::lines`, a lone `\r` (or form feed, NEL, ...) also ends a
/// line. A final terminator does not produce a trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = vec![];
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
