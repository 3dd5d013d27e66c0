//! Static analysis of a rule base.
//!
//! Builds the fact dependency graph (an edge per condition → conclusion pair)
//! and reports the structure a rule author cares about before any diagnosis
//! runs: which facts can only arrive as symptoms, which conclusions are
//! terminal diagnoses, and which facts sit on dependency cycles.

use std::collections::{HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use crate::fact::Fact;
use crate::rule::RuleBase;

/// Structural report over one rule base. Produced by [`analyze`].
///
/// All fact lists are sorted, so the report is stable for a given rule base
/// regardless of definition order.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Number of rules in the base.
    pub rule_count: usize,
    /// Number of distinct facts named anywhere.
    pub fact_count: usize,
    /// Facts no rule concludes. These can only enter a diagnosis as reported
    /// symptoms or confirmed clarifications.
    pub input_facts: Vec<Fact>,
    /// Conclusions no rule consumes: the terminal diagnoses.
    pub terminal_facts: Vec<Fact>,
    /// Members of each dependency cycle: strongly connected components of
    /// size greater than one, plus self-loops. The chainers tolerate cycles;
    /// rule authors usually still want to know about them.
    pub cycles: Vec<Vec<Fact>>,
}

impl std::fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "rule base analysis")?;
        writeln!(f, "  rules:           {}", self.rule_count)?;
        writeln!(f, "  distinct facts:  {}", self.fact_count)?;

        writeln!(f, "  symptom vocabulary ({}):", self.input_facts.len())?;
        for fact in &self.input_facts {
            writeln!(f, "    {fact}")?;
        }

        writeln!(f, "  terminal diagnoses ({}):", self.terminal_facts.len())?;
        for fact in &self.terminal_facts {
            writeln!(f, "    {fact}")?;
        }

        if self.cycles.is_empty() {
            writeln!(f, "  dependency cycles: none")?;
        } else {
            writeln!(f, "  dependency cycles ({}):", self.cycles.len())?;
            for members in &self.cycles {
                let joined = members
                    .iter()
                    .map(Fact::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(f, "    {{ {joined} }}")?;
            }
        }
        Ok(())
    }
}

/// Analyze the dependency structure of a rule base.
pub fn analyze(rules: &RuleBase) -> AnalysisReport {
    let mut graph: DiGraph<Fact, ()> = DiGraph::new();
    let mut node_index: HashMap<Fact, NodeIndex> = HashMap::new();

    let mut concluded: HashSet<Fact> = HashSet::new();
    let mut consumed: HashSet<Fact> = HashSet::new();

    for rule in rules {
        for condition in rule.conditions() {
            consumed.insert(condition.clone());
        }
        for conclusion in rule.conclusions() {
            concluded.insert(conclusion.clone());
        }
        for condition in rule.conditions() {
            let from = ensure_node(&mut graph, &mut node_index, condition);
            for conclusion in rule.conclusions() {
                let to = ensure_node(&mut graph, &mut node_index, conclusion);
                // Two rules over the same fact pair add one edge, not two.
                graph.update_edge(from, to, ());
            }
        }
    }

    let all_facts = rules.distinct_facts();

    let mut input_facts: Vec<Fact> = all_facts
        .iter()
        .filter(|fact| !concluded.contains(*fact))
        .cloned()
        .collect();
    input_facts.sort();

    let mut terminal_facts: Vec<Fact> = all_facts
        .iter()
        .filter(|fact| concluded.contains(*fact) && !consumed.contains(*fact))
        .cloned()
        .collect();
    terminal_facts.sort();

    let mut cycles: Vec<Vec<Fact>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|&idx| graph.find_edge(idx, idx).is_some())
        })
        .map(|component| {
            let mut members: Vec<Fact> =
                component.iter().map(|&idx| graph[idx].clone()).collect();
            members.sort();
            members
        })
        .collect();
    cycles.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    AnalysisReport {
        rule_count: rules.len(),
        fact_count: all_facts.len(),
        input_facts,
        terminal_facts,
        cycles,
    }
}

fn ensure_node(
    graph: &mut DiGraph<Fact, ()>,
    node_index: &mut HashMap<Fact, NodeIndex>,
    fact: &Fact,
) -> NodeIndex {
    if let Some(&idx) = node_index.get(fact) {
        return idx;
    }
    let idx = graph.add_node(fact.clone());
    node_index.insert(fact.clone(), idx);
    idx
}
