//! Core fact types for the faultwise engine.
//!
//! Facts are the atomic units of the rule system. Every symptom, intermediate
//! condition, and diagnosis is a [`Fact`]: a named proposition identified by a
//! trimmed string token, compared by exact string equality. [`FactSet`] is the
//! insertion-ordered set the chaining engines accumulate facts into.

use std::collections::HashSet;

use serde::Serialize;

/// A named proposition: a symptom, an intermediate condition, or a diagnosis.
///
/// Construction trims surrounding whitespace and rejects the empty token, so
/// a `Fact` is never blank. Comparison is case-sensitive: `Overheat` and
/// `overheat` are distinct facts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Fact(String);

impl Fact {
    /// Create a fact from a raw token.
    ///
    /// Returns `None` if the token is empty after trimming.
    pub fn new(token: &str) -> Option<Self> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Fact(trimmed.to_string()))
        }
    }

    /// The token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Fact {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Insertion-ordered set of facts.
///
/// Pairs a vector (iteration order is first-insertion order) with a hash
/// index (constant-time membership). The deterministic iteration order is
/// what keeps diagnosis output reproducible from run to run, including which
/// inferred fact counts as "first".
///
/// Equality is set equality: two `FactSet`s with the same members are equal
/// regardless of insertion order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FactSet {
    entries: Vec<Fact>,
    #[serde(skip)]
    index: HashSet<Fact>,
}

impl FactSet {
    /// Create an empty fact set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fact. Returns `true` if it was not already present.
    pub fn insert(&mut self, fact: Fact) -> bool {
        if self.index.contains(&fact) {
            return false;
        }
        self.index.insert(fact.clone());
        self.entries.push(fact);
        true
    }

    /// Whether the set contains `fact`.
    pub fn contains(&self, fact: &Fact) -> bool {
        self.index.contains(fact)
    }

    /// Number of distinct facts in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The earliest-inserted fact, if any.
    pub fn first(&self) -> Option<&Fact> {
        self.entries.first()
    }

    /// Iterate over the facts in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Fact> {
        self.entries.iter()
    }
}

impl PartialEq for FactSet {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for FactSet {}

impl FromIterator<Fact> for FactSet {
    fn from_iter<I: IntoIterator<Item = Fact>>(iter: I) -> Self {
        let mut set = FactSet::new();
        for fact in iter {
            set.insert(fact);
        }
        set
    }
}

impl<'a> IntoIterator for &'a FactSet {
    type Item = &'a Fact;
    type IntoIter = std::slice::Iter<'a, Fact>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl std::fmt::Display for FactSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut sep = "";
        for fact in &self.entries {
            write!(f, "{sep}{fact}")?;
            sep = ", ";
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(token: &str) -> Fact {
        Fact::new(token).unwrap()
    }

    #[test]
    fn fact_trims_surrounding_whitespace() {
        assert_eq!(Fact::new("  fever \t").unwrap().as_str(), "fever");
    }

    #[test]
    fn blank_token_is_not_a_fact() {
        assert!(Fact::new("").is_none());
        assert!(Fact::new("   ").is_none());
        assert!(Fact::new("\t\n").is_none());
    }

    #[test]
    fn facts_are_case_sensitive() {
        assert_ne!(fact("Overheat"), fact("overheat"));
    }

    #[test]
    fn insert_deduplicates_and_keeps_order() {
        let mut set = FactSet::new();
        assert!(set.insert(fact("fever")));
        assert!(set.insert(fact("cough")));
        assert!(!set.insert(fact("fever")));
        let order: Vec<&str> = set.iter().map(Fact::as_str).collect();
        assert_eq!(order, ["fever", "cough"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn first_is_earliest_insertion() {
        let set: FactSet = [fact("flu"), fact("bed_rest")].into_iter().collect();
        assert_eq!(set.first(), Some(&fact("flu")));
        assert_eq!(FactSet::new().first(), None);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: FactSet = [fact("x"), fact("y")].into_iter().collect();
        let b: FactSet = [fact("y"), fact("x")].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn display_joins_in_order() {
        let set: FactSet = [fact("flu"), fact("bed_rest")].into_iter().collect();
        assert_eq!(set.to_string(), "flu, bed_rest");
    }

    #[test]
    fn serializes_as_ordered_array() {
        let set: FactSet = [fact("b"), fact("a")].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["b","a"]"#);
    }
}
