//! Backward chaining: reason from a conclusion back to its supporting rules.
//!
//! Given a target fact, the walk finds every rule that concludes the current
//! hypothesis, records it as a trace step, then queues that rule's conditions
//! as further hypotheses. It is an explicit stack plus seen-set traversal of
//! the rule dependency graph: no recursion, and no state outside the call.

use std::collections::HashSet;

use serde::Serialize;

use crate::fact::Fact;
use crate::rule::{Rule, RuleBase};

/// One step of an explanation trace: the full content of a rule visited on
/// the backward walk, in visitation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceStep {
    /// The visited rule's conclusions. One of them is the hypothesis that
    /// led the walk here.
    pub conclusions: Vec<Fact>,
    /// The conditions that justify those conclusions.
    pub conditions: Vec<Fact>,
    /// Reference links attached to the rule, for display.
    pub reference_links: Vec<String>,
}

impl From<&Rule> for TraceStep {
    fn from(rule: &Rule) -> Self {
        Self {
            conclusions: rule.conclusions().to_vec(),
            conditions: rule.conditions().to_vec(),
            reference_links: rule.reference_links().to_vec(),
        }
    }
}

/// Collect the justification trace for `target`.
///
/// Hypotheses are processed most recently queued first; for each, the rule
/// base is scanned in definition order and every rule concluding it
/// contributes one step. The rule's conditions then become hypotheses of
/// their own. A condition is queued at most once, which bounds the walk on
/// cyclic rule graphs. The same rule can still appear as several steps when
/// distinct hypotheses select it.
///
/// An empty trace means no rule concludes the target. That is a valid
/// outcome, not an error: base symptoms have no justification.
pub fn explain(rules: &RuleBase, target: &Fact) -> Vec<TraceStep> {
    let mut trace = Vec::new();
    let mut stack = vec![target];
    let mut seen: HashSet<&Fact> = HashSet::new();

    while let Some(hypothesis) = stack.pop() {
        for rule in rules {
            if !rule.concludes(hypothesis) {
                continue;
            }
            trace.push(TraceStep::from(rule));
            for condition in rule.conditions() {
                if seen.insert(condition) {
                    stack.push(condition);
                }
            }
        }
    }

    trace
}
