//! Forward chaining: data-driven derivation to a fixed point.
//!
//! Starting from the reported symptoms, the engine runs full passes over the
//! rule base and fires every rule whose conditions are all known, until a
//! pass produces no change. Firing adds the rule's unseen conclusions to both
//! the known set and the inferred set.
//!
//! Separately from firing, a rule with exactly one condition that is not yet
//! known asks the injected [`Clarify`] strategy whether that condition holds.
//! That is the only point where the engine consults the outside world;
//! everything else is a pure function of the rule base and the symptoms.

use serde::Serialize;

use crate::fact::{Fact, FactSet};
use crate::rule::RuleBase;

/// Yes/no strategy for confirming a missing single-condition prerequisite.
///
/// `conditions` is the asking rule's full condition list, as context for a
/// prompt; `missing` is the condition in question. Implementations must be
/// total: when no answer can be obtained, return `false`. An unanswered
/// clarification is a "no", never an abort.
pub trait Clarify {
    fn confirm(&mut self, conditions: &[Fact], missing: &Fact) -> bool;
}

/// Clarifier that declines every request.
///
/// The right default wherever no interactive surface exists; with it, the
/// forward pass is fully deterministic in its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl Clarify for DenyAll {
    fn confirm(&mut self, _conditions: &[Fact], _missing: &Fact) -> bool {
        false
    }
}

/// Adapter turning a plain decision function into a [`Clarify`] strategy.
///
/// Built with [`clarify_fn`].
pub struct ClarifyFn<F>(F);

/// Wrap a `FnMut(&[Fact], &Fact) -> bool` as a [`Clarify`] implementation.
pub fn clarify_fn<F>(f: F) -> ClarifyFn<F>
where
    F: FnMut(&[Fact], &Fact) -> bool,
{
    ClarifyFn(f)
}

impl<F> Clarify for ClarifyFn<F>
where
    F: FnMut(&[Fact], &Fact) -> bool,
{
    fn confirm(&mut self, conditions: &[Fact], missing: &Fact) -> bool {
        (self.0)(conditions, missing)
    }
}

/// Outcome of one forward-chaining run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InferenceResult {
    /// Every fact established as true: the symptoms as given, confirmed
    /// clarifications, and everything derived from them.
    pub known: FactSet,
    /// The subset of `known` that some rule concluded. Facts already present
    /// in the input never appear here.
    pub inferred: FactSet,
}

/// Data-driven inference engine over one rule base.
///
/// Holds no mutable state. Each [`infer`](ForwardChainer::infer) call builds
/// its fact sets locally, so one chainer (and the rule base it borrows) can
/// serve any number of requests.
pub struct ForwardChainer<'a> {
    rules: &'a RuleBase,
}

impl<'a> ForwardChainer<'a> {
    /// Create a chainer over the given rule base.
    pub fn new(rules: &'a RuleBase) -> Self {
        Self { rules }
    }

    /// Derive the closure of facts reachable from `symptoms`.
    ///
    /// Runs full passes over the rule base in definition order until one
    /// makes no progress, where progress is a fired conclusion that was not
    /// yet known or a confirmed clarification. The loop terminates because
    /// each pass either adds a fact from the finite rule vocabulary or is
    /// the last.
    ///
    /// A still-missing condition is re-asked on every pass; remembering
    /// answers across passes is the clarifier's concern.
    pub fn infer(&self, symptoms: &[Fact], clarify: &mut dyn Clarify) -> InferenceResult {
        let mut result = InferenceResult {
            known: symptoms.iter().cloned().collect(),
            inferred: FactSet::new(),
        };

        let mut passes = 0usize;
        loop {
            passes += 1;
            let mut progressed = false;

            for rule in self.rules {
                // `inferred` stays a subset of `known`, so checking the
                // conditions against `known` alone covers both.
                if rule.is_satisfied_by(&result.known) {
                    for conclusion in rule.conclusions() {
                        if result.known.insert(conclusion.clone()) {
                            result.inferred.insert(conclusion.clone());
                            progressed = true;
                        }
                    }
                }

                // Clarification is independent of firing and applies to
                // single-condition rules only; a partially satisfied
                // multi-condition rule is never asked about.
                if let Some(missing) = rule.single_condition() {
                    if !result.known.contains(missing)
                        && clarify.confirm(rule.conditions(), missing)
                    {
                        // Confirmed facts become known but not inferred: no
                        // rule concluded them.
                        result.known.insert(missing.clone());
                        progressed = true;
                        tracing::debug!(fact = %missing, "clarification confirmed");
                    }
                }
            }

            if !progressed {
                break;
            }
        }

        tracing::debug!(
            passes,
            known = result.known.len(),
            inferred = result.inferred.len(),
            "forward closure reached"
        );
        result
    }
}
