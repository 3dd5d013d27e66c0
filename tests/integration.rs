//! End-to-end integration tests for the faultwise engine.
//!
//! These tests exercise the full pipeline from rule-definition text through
//! the session facade: forward closure, explanation selection, backward
//! trace content, and the analysis and JSON export surfaces.

use faultwise::analyze::analyze;
use faultwise::chain::backward::TraceStep;
use faultwise::chain::forward::{DenyAll, clarify_fn};
use faultwise::fact::Fact;
use faultwise::session::{DiagnosisRequest, Session};

const FLU_RULES: &str = "\
fever, cough => flu, image=http://a/flu.png
flu => bed_rest
";

const MOTOR_RULES: &str = "\
overheat => shutdown, image=http://m/overheat.png
shutdown, noise => service_visit
";

fn fact(token: &str) -> Fact {
    Fact::new(token).unwrap()
}

fn facts(tokens: &[&str]) -> Vec<Fact> {
    tokens.iter().map(|t| fact(t)).collect()
}

#[test]
fn diagnose_then_explain_the_default_fact() {
    let session = Session::from_rules_text(FLU_RULES).unwrap();
    let diagnosis = session.diagnose(
        &DiagnosisRequest::new(facts(&["fever", "cough"])),
        &mut DenyAll,
    );

    // Forward closure: both conclusions derived, inputs never re-reported.
    let inferred: Vec<&str> = diagnosis.inferred.iter().map(Fact::as_str).collect();
    assert_eq!(inferred, ["flu", "bed_rest"]);
    assert_eq!(diagnosis.known.len(), 4);

    // The first inferred fact is explained by default.
    assert_eq!(diagnosis.explained, Some(fact("flu")));
    assert_eq!(
        diagnosis.trace,
        [TraceStep {
            conclusions: facts(&["flu"]),
            conditions: facts(&["fever", "cough"]),
            reference_links: vec!["http://a/flu.png".into()],
        }]
    );
}

#[test]
fn explaining_a_transitive_conclusion_walks_to_the_symptoms() {
    let session = Session::from_rules_text(FLU_RULES).unwrap();
    let trace = session.explain(&fact("bed_rest"));

    assert_eq!(
        trace,
        [
            TraceStep {
                conclusions: facts(&["bed_rest"]),
                conditions: facts(&["flu"]),
                reference_links: Vec::new(),
            },
            TraceStep {
                conclusions: facts(&["flu"]),
                conditions: facts(&["fever", "cough"]),
                reference_links: vec!["http://a/flu.png".into()],
            },
        ]
    );
}

#[test]
fn clarification_feeds_the_whole_pipeline() {
    let session = Session::from_rules_text(MOTOR_RULES).unwrap();

    // The single-condition rule asks about `overheat`; confirming it lets
    // the rule fire on the following pass, and the derived fact becomes the
    // explained diagnosis.
    let mut always_yes = clarify_fn(|_: &[Fact], _: &Fact| true);
    let diagnosis = session.diagnose(&DiagnosisRequest::new(Vec::new()), &mut always_yes);

    assert!(diagnosis.known.contains(&fact("overheat")));
    let inferred: Vec<&str> = diagnosis.inferred.iter().map(Fact::as_str).collect();
    assert_eq!(inferred, ["shutdown"]);
    assert_eq!(diagnosis.explained, Some(fact("shutdown")));
    assert_eq!(diagnosis.trace.len(), 1);
    assert_eq!(
        diagnosis.trace[0].reference_links,
        ["http://m/overheat.png"]
    );
}

#[test]
fn denied_clarification_changes_the_outcome() {
    let session = Session::from_rules_text(MOTOR_RULES).unwrap();
    let diagnosis = session.diagnose(&DiagnosisRequest::new(facts(&["noise"])), &mut DenyAll);

    assert!(diagnosis.inferred.is_empty());
    assert_eq!(diagnosis.explained, None);
    assert!(diagnosis.trace.is_empty());
}

#[test]
fn diagnosis_is_deterministic_across_runs() {
    let session = Session::from_rules_text(FLU_RULES).unwrap();
    let request = DiagnosisRequest::new(facts(&["fever", "cough"]));

    let first = session.diagnose(&request, &mut DenyAll);
    let second = session.diagnose(&request, &mut DenyAll);

    assert_eq!(first, second);
    let first_order: Vec<&str> = first.inferred.iter().map(Fact::as_str).collect();
    let second_order: Vec<&str> = second.inferred.iter().map(Fact::as_str).collect();
    assert_eq!(first_order, second_order);
}

#[test]
fn unknown_symptoms_produce_an_empty_but_valid_diagnosis() {
    let session = Session::from_rules_text(FLU_RULES).unwrap();
    let diagnosis = session.diagnose(&DiagnosisRequest::new(facts(&["sore_toe"])), &mut DenyAll);

    assert!(diagnosis.inferred.is_empty());
    assert_eq!(diagnosis.known.len(), 1);
    assert!(diagnosis.known.contains(&fact("sore_toe")));
}

#[test]
fn diagnosis_exports_as_json() {
    let session = Session::from_rules_text(FLU_RULES).unwrap();
    let diagnosis = session.diagnose(
        &DiagnosisRequest::new(facts(&["fever", "cough"])),
        &mut DenyAll,
    );

    let value = serde_json::to_value(&diagnosis).unwrap();
    assert_eq!(value["inferred"][0], "flu");
    assert_eq!(value["explained"], "flu");
    assert_eq!(value["trace"][0]["reference_links"][0], "http://a/flu.png");
    assert_eq!(value["known"].as_array().unwrap().len(), 4);
}

#[test]
fn analysis_classifies_the_flu_rule_base() {
    let session = Session::from_rules_text(FLU_RULES).unwrap();
    let report = analyze(session.rules());

    assert_eq!(report.rule_count, 2);
    assert_eq!(report.input_facts, facts(&["cough", "fever"]));
    assert_eq!(report.terminal_facts, facts(&["bed_rest"]));
    assert!(report.cycles.is_empty());
}

#[test]
fn session_info_reflects_the_loaded_rules() {
    let session = Session::from_rules_text(MOTOR_RULES).unwrap();
    let info = session.info();

    assert_eq!(info.rule_count, 2);
    assert_eq!(info.fact_count, 4);
    assert_eq!(info.reference_link_count, 1);

    let rendered = info.to_string();
    assert!(rendered.contains("rules:            2"));
}
