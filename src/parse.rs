//! Rule-definition parser.
//!
//! The format is line-oriented, one rule per non-blank line:
//!
//! ```text
//! cond1, cond2 => concl1, concl2, image=url1, image=url2
//! ```
//!
//! `=>` splits conditions from conclusions and appears exactly once per line.
//! `,` separates fact names, trimmed on both sides. The literal marker
//! `, image=` closes the conclusion list and starts a reference link; repeat
//! it for more links. There is no escaping, so `,` and `=>` cannot appear
//! inside a fact name. Errors carry the 1-based line number and, where it
//! helps, the offending text.

use std::path::Path;

use crate::error::ParseError;
use crate::fact::Fact;
use crate::rule::{Rule, RuleBase};

/// The conditions/conclusions separator token.
const ARROW: &str = "=>";

/// The marker that closes the conclusion list and opens a reference link.
/// Matched literally, leading comma and space included.
const LINK_MARKER: &str = ", image=";

/// Convenience alias for parser results.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Parse rule-definition text into a [`RuleBase`].
///
/// Blank and whitespace-only lines are skipped; everything else must be a
/// well-formed rule. Rules keep their definition order.
pub fn parse_rules(text: &str) -> ParseResult<RuleBase> {
    let mut rules = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        rules.push(parse_line(line, index + 1)?);
    }
    Ok(RuleBase::new(rules))
}

/// Read and parse a rule-definition file.
pub fn load_rules(path: &Path) -> ParseResult<RuleBase> {
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_rules(&text)
}

/// Parse one non-blank, pre-trimmed rule line.
fn parse_line(line: &str, line_no: usize) -> ParseResult<Rule> {
    let segments: Vec<&str> = line.split(ARROW).collect();
    let (lhs, rhs) = match segments.as_slice() {
        [lhs, rhs] => (*lhs, *rhs),
        [_] => {
            return Err(ParseError::MissingSeparator {
                line: line_no,
                text: line.to_string(),
            });
        }
        _ => {
            return Err(ParseError::ExtraSeparator {
                line: line_no,
                text: line.to_string(),
            });
        }
    };

    let conditions = split_facts(lhs, || ParseError::EmptyCondition { line: line_no })?;

    // Everything after the first link marker is reference links, one per
    // further marker. `a,image=u` (no space after the comma) is NOT a marker
    // and yields a conclusion literally named `image=u`.
    let mut pieces = rhs.split(LINK_MARKER);
    let conclusion_segment = pieces.next().unwrap_or(rhs);
    let conclusions = split_facts(conclusion_segment, || ParseError::EmptyConclusion {
        line: line_no,
    })?;

    let mut reference_links = Vec::new();
    for piece in pieces {
        let link = piece.trim();
        if link.is_empty() {
            return Err(ParseError::EmptyReference { line: line_no });
        }
        reference_links.push(link.to_string());
    }

    Rule::new(conditions, conclusions, reference_links)
        .map_err(|source| ParseError::InvalidRule {
            line: line_no,
            source,
        })
}

/// Split a comma-separated fact list, trimming each name.
fn split_facts(segment: &str, empty: impl Fn() -> ParseError) -> ParseResult<Vec<Fact>> {
    segment
        .split(',')
        .map(|item| Fact::new(item).ok_or_else(|| empty()))
        .collect()
}
