//! Rich diagnostic error types for the faultwise engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so rule authors know
//! exactly which line is broken and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the faultwise engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum FaultwiseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

// ---------------------------------------------------------------------------
// Rule construction errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum RuleError {
    #[error("rule has no conditions")]
    #[diagnostic(
        code(faultwise::rule::no_conditions),
        help(
            "Every rule needs at least one condition on the left of `=>`. \
             A rule that fires unconditionally is almost always a data-entry \
             mistake; state the prerequisite explicitly."
        )
    )]
    NoConditions,

    #[error("rule has no conclusions")]
    #[diagnostic(
        code(faultwise::rule::no_conclusions),
        help(
            "Every rule needs at least one conclusion on the right of `=>`. \
             A rule that concludes nothing can never contribute to a diagnosis."
        )
    )]
    NoConclusions,
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error("failed to read rule file {path}: {source}")]
    #[diagnostic(
        code(faultwise::parse::io),
        help("Check that the rule file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: missing `=>` separator in rule \"{text}\"")]
    #[diagnostic(
        code(faultwise::parse::missing_separator),
        help(
            "Each rule line has the form `cond1, cond2 => concl1, concl2`. \
             Add a `=>` between the conditions and the conclusions."
        )
    )]
    MissingSeparator { line: usize, text: String },

    #[error("line {line}: more than one `=>` separator in rule \"{text}\"")]
    #[diagnostic(
        code(faultwise::parse::extra_separator),
        help(
            "A rule line contains exactly one `=>`. There is no escaping, so \
             `=>` cannot appear inside a fact name; split the line into \
             separate rules instead."
        )
    )]
    ExtraSeparator { line: usize, text: String },

    #[error("line {line}: empty condition identifier")]
    #[diagnostic(
        code(faultwise::parse::empty_condition),
        help(
            "Conditions are comma-separated fact names before `=>`. \
             Remove doubled or trailing commas and make sure every name is \
             non-empty."
        )
    )]
    EmptyCondition { line: usize },

    #[error("line {line}: empty conclusion identifier")]
    #[diagnostic(
        code(faultwise::parse::empty_conclusion),
        help(
            "Conclusions are comma-separated fact names after `=>`, before \
             any `, image=` marker. Remove doubled or trailing commas and \
             make sure every name is non-empty."
        )
    )]
    EmptyConclusion { line: usize },

    #[error("line {line}: empty reference link")]
    #[diagnostic(
        code(faultwise::parse::empty_reference),
        help("Each `, image=` marker must be followed by a non-empty link.")
    )]
    EmptyReference { line: usize },

    #[error("line {line}: {source}")]
    #[diagnostic(
        code(faultwise::parse::invalid_rule),
        help("The line parsed but violates a rule invariant. See the inner error.")
    )]
    InvalidRule {
        line: usize,
        #[source]
        source: RuleError,
    },
}

/// Convenience alias for functions returning faultwise results.
pub type FaultwiseResult<T> = std::result::Result<T, FaultwiseError>;
