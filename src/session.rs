//! Session facade: the boundary a presentation shell drives.
//!
//! A [`Session`] owns one loaded rule base and serves diagnosis requests
//! against it. All per-request state (fact sets, traces) is created inside
//! the call and handed back to the caller, so a session is read-only after
//! construction and one session can serve any number of requests.

use std::path::Path;

use serde::Serialize;

use crate::chain::backward::{TraceStep, explain};
use crate::chain::forward::{Clarify, ForwardChainer, InferenceResult};
use crate::error::FaultwiseResult;
use crate::fact::{Fact, FactSet};
use crate::parse;
use crate::rule::RuleBase;

/// One diagnosis request: the reported symptoms and, optionally, which fact
/// the caller wants explained.
#[derive(Debug, Clone, Default)]
pub struct DiagnosisRequest {
    /// The reported symptoms.
    pub symptoms: Vec<Fact>,
    /// Fact to explain. `None` selects the first inferred fact.
    pub explain: Option<Fact>,
}

impl DiagnosisRequest {
    /// Create a request for the given symptoms.
    pub fn new(symptoms: Vec<Fact>) -> Self {
        Self {
            symptoms,
            explain: None,
        }
    }

    /// Explain a specific fact instead of the first inferred one.
    pub fn with_explain(mut self, fact: Fact) -> Self {
        self.explain = Some(fact);
        self
    }
}

/// The complete result of one diagnosis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    /// Every fact established during the run: symptoms, confirmed
    /// clarifications, and derivations.
    pub known: FactSet,
    /// The facts some rule concluded. This is the headline result.
    pub inferred: FactSet,
    /// The fact the trace explains, when one was selected.
    pub explained: Option<Fact>,
    /// Justification steps for `explained`, in visitation order.
    pub trace: Vec<TraceStep>,
}

impl std::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.inferred.is_empty() {
            writeln!(f, "no diagnosis could be inferred from the reported symptoms")?;
        } else {
            writeln!(f, "inferred: {}", self.inferred)?;
        }

        if let Some(ref fact) = self.explained {
            if self.trace.is_empty() {
                writeln!(f, "no rule concludes \"{fact}\"")?;
            } else {
                writeln!(f)?;
                writeln!(f, "why \"{fact}\":")?;
                for step in &self.trace {
                    writeln!(
                        f,
                        "  {} <= {}",
                        join_facts(&step.conclusions),
                        join_facts(&step.conditions)
                    )?;
                    for (i, link) in step.reference_links.iter().enumerate() {
                        writeln!(f, "    {}. {}", i + 1, link)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn join_facts(facts: &[Fact]) -> String {
    facts
        .iter()
        .map(Fact::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A loaded rule base ready to serve diagnosis requests.
pub struct Session {
    rules: RuleBase,
}

impl Session {
    /// Open a session over an already-constructed rule base.
    pub fn new(rules: RuleBase) -> Self {
        tracing::info!(
            rules = rules.len(),
            facts = rules.distinct_facts().len(),
            "session ready"
        );
        Self { rules }
    }

    /// Parse rule-definition text and open a session over it.
    pub fn from_rules_text(text: &str) -> FaultwiseResult<Self> {
        Ok(Self::new(parse::parse_rules(text)?))
    }

    /// Load a rule-definition file and open a session over it.
    pub fn from_rules_file(path: &Path) -> FaultwiseResult<Self> {
        Ok(Self::new(parse::load_rules(path)?))
    }

    /// The rule base this session serves.
    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    /// Run one diagnosis: the forward closure over the symptoms, then the
    /// explanation trace for the selected fact.
    ///
    /// When the request names no fact to explain, the first inferred fact is
    /// selected; if nothing was inferred, `explained` is `None` and the
    /// trace is empty. A fact named explicitly is traced even when the run
    /// inferred nothing.
    pub fn diagnose(&self, request: &DiagnosisRequest, clarify: &mut dyn Clarify) -> Diagnosis {
        let InferenceResult { known, inferred } =
            ForwardChainer::new(&self.rules).infer(&request.symptoms, clarify);

        let explained = request
            .explain
            .clone()
            .or_else(|| inferred.first().cloned());
        let trace = match &explained {
            Some(fact) => explain(&self.rules, fact),
            None => Vec::new(),
        };

        Diagnosis {
            known,
            inferred,
            explained,
            trace,
        }
    }

    /// Justification trace for one fact, independent of any forward run.
    pub fn explain(&self, target: &Fact) -> Vec<TraceStep> {
        explain(&self.rules, target)
    }

    /// Summary statistics about the loaded rules.
    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            rule_count: self.rules.len(),
            fact_count: self.rules.distinct_facts().len(),
            reference_link_count: self
                .rules
                .iter()
                .map(|rule| rule.reference_links().len())
                .sum(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Summary information about a loaded rule base.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub rule_count: usize,
    pub fact_count: usize,
    pub reference_link_count: usize,
}

impl std::fmt::Display for SessionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "faultwise session info")?;
        writeln!(f, "  rules:            {}", self.rule_count)?;
        writeln!(f, "  distinct facts:   {}", self.fact_count)?;
        writeln!(f, "  reference links:  {}", self.reference_link_count)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::forward::{DenyAll, clarify_fn};

    const FLU_RULES: &str = "fever, cough => flu, image=http://a/flu.png\nflu => bed_rest\n";

    fn fact(token: &str) -> Fact {
        Fact::new(token).unwrap()
    }

    fn symptoms(tokens: &[&str]) -> Vec<Fact> {
        tokens.iter().map(|t| fact(t)).collect()
    }

    #[test]
    fn diagnose_explains_the_first_inferred_fact_by_default() {
        let session = Session::from_rules_text(FLU_RULES).unwrap();
        let diagnosis = session.diagnose(
            &DiagnosisRequest::new(symptoms(&["fever", "cough"])),
            &mut DenyAll,
        );

        assert_eq!(diagnosis.explained, Some(fact("flu")));
        assert_eq!(diagnosis.trace.len(), 1);
        assert_eq!(diagnosis.trace[0].conclusions, [fact("flu")]);
    }

    #[test]
    fn diagnose_honors_explicit_explain_target() {
        let session = Session::from_rules_text(FLU_RULES).unwrap();
        let request =
            DiagnosisRequest::new(symptoms(&["fever", "cough"])).with_explain(fact("bed_rest"));
        let diagnosis = session.diagnose(&request, &mut DenyAll);

        assert_eq!(diagnosis.explained, Some(fact("bed_rest")));
        assert_eq!(diagnosis.trace.len(), 2);
    }

    #[test]
    fn nothing_inferred_means_nothing_explained() {
        let session = Session::from_rules_text(FLU_RULES).unwrap();
        let diagnosis =
            session.diagnose(&DiagnosisRequest::new(symptoms(&["sore_toe"])), &mut DenyAll);

        assert!(diagnosis.inferred.is_empty());
        assert_eq!(diagnosis.explained, None);
        assert!(diagnosis.trace.is_empty());
        assert_eq!(diagnosis.known.len(), 1);
    }

    #[test]
    fn clarifier_is_threaded_through_to_the_forward_pass() {
        let session = Session::from_rules_text("overheat => shutdown\n").unwrap();
        let mut always_yes = clarify_fn(|_: &[Fact], _: &Fact| true);
        let diagnosis = session.diagnose(&DiagnosisRequest::new(Vec::new()), &mut always_yes);

        assert!(diagnosis.known.contains(&fact("overheat")));
        assert_eq!(diagnosis.explained, Some(fact("shutdown")));
    }

    #[test]
    fn info_counts_rules_facts_and_links() {
        let session = Session::from_rules_text(FLU_RULES).unwrap();
        let info = session.info();
        assert_eq!(info.rule_count, 2);
        assert_eq!(info.fact_count, 4);
        assert_eq!(info.reference_link_count, 1);
    }

    #[test]
    fn malformed_text_surfaces_the_parse_error() {
        let err = Session::from_rules_text("fever flu\n").unwrap_err();
        assert!(format!("{err}").contains("line 1"));
    }

    #[test]
    fn diagnosis_display_numbers_reference_links() {
        let session = Session::from_rules_text(FLU_RULES).unwrap();
        let request =
            DiagnosisRequest::new(symptoms(&["fever", "cough"])).with_explain(fact("flu"));
        let rendered = session.diagnose(&request, &mut DenyAll).to_string();

        assert!(rendered.contains("inferred: flu, bed_rest"));
        assert!(rendered.contains("why \"flu\":"));
        assert!(rendered.contains("flu <= fever, cough"));
        assert!(rendered.contains("1. http://a/flu.png"));
    }
}
