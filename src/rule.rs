//! Production rules and the ordered rule base.
//!
//! A [`Rule`] pairs the conditions that must all hold with the conclusions it
//! establishes, plus opaque reference links surfaced when the rule appears in
//! an explanation. A [`RuleBase`] is the ordered, read-only collection the
//! chaining engines scan; definition order is evaluation order, so logically
//! overlapping rules resolve the same way on every run.

use serde::Serialize;

use crate::error::RuleError;
use crate::fact::{Fact, FactSet};

/// One `conditions => conclusions` production rule.
///
/// Immutable once constructed. `conditions` and `conclusions` are non-empty
/// by construction; `reference_links` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    conditions: Vec<Fact>,
    conclusions: Vec<Fact>,
    reference_links: Vec<String>,
}

impl Rule {
    /// Create a rule, enforcing the non-empty invariants.
    pub fn new(
        conditions: Vec<Fact>,
        conclusions: Vec<Fact>,
        reference_links: Vec<String>,
    ) -> Result<Self, RuleError> {
        if conditions.is_empty() {
            return Err(RuleError::NoConditions);
        }
        if conclusions.is_empty() {
            return Err(RuleError::NoConclusions);
        }
        Ok(Self {
            conditions,
            conclusions,
            reference_links,
        })
    }

    /// The conditions that must all hold for this rule to fire.
    pub fn conditions(&self) -> &[Fact] {
        &self.conditions
    }

    /// The conclusions established when this rule fires.
    pub fn conclusions(&self) -> &[Fact] {
        &self.conclusions
    }

    /// Reference links shown alongside this rule in explanations.
    pub fn reference_links(&self) -> &[String] {
        &self.reference_links
    }

    /// Whether every condition is present in `facts`.
    pub fn is_satisfied_by(&self, facts: &FactSet) -> bool {
        self.conditions.iter().all(|c| facts.contains(c))
    }

    /// Whether `fact` is one of this rule's conclusions.
    pub fn concludes(&self, fact: &Fact) -> bool {
        self.conclusions.contains(fact)
    }

    /// The sole condition, if this rule has exactly one.
    ///
    /// Single-condition rules are the only ones eligible for clarification
    /// during forward chaining.
    pub fn single_condition(&self) -> Option<&Fact> {
        match self.conditions.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut sep = "";
        for condition in &self.conditions {
            write!(f, "{sep}{condition}")?;
            sep = ", ";
        }
        write!(f, " => ")?;
        sep = "";
        for conclusion in &self.conclusions {
            write!(f, "{sep}{conclusion}")?;
            sep = ", ";
        }
        for link in &self.reference_links {
            write!(f, ", image={link}")?;
        }
        Ok(())
    }
}

/// Ordered, immutable collection of rules.
///
/// Holds rules in definition order and never mutates after construction, so
/// a single `RuleBase` can back any number of concurrent diagnosis requests.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RuleBase {
    rules: Vec<Rule>,
}

impl RuleBase {
    /// Create a rule base from rules in definition order.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The rules in definition order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the rule base holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules in definition order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Every distinct fact named by any rule, in first-appearance order
    /// (conditions before conclusions, rule by rule).
    pub fn distinct_facts(&self) -> FactSet {
        let mut facts = FactSet::new();
        for rule in &self.rules {
            for condition in rule.conditions() {
                facts.insert(condition.clone());
            }
            for conclusion in rule.conclusions() {
                facts.insert(conclusion.clone());
            }
        }
        facts
    }
}

impl<'a> IntoIterator for &'a RuleBase {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
