//! faultwise CLI: rule-based fault diagnosis.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use faultwise::analyze::analyze;
use faultwise::chain::backward::TraceStep;
use faultwise::chain::forward::{Clarify, DenyAll};
use faultwise::fact::Fact;
use faultwise::session::{DiagnosisRequest, Session};

#[derive(Parser)]
#[command(name = "faultwise", version, about = "Rule-based fault diagnosis")]
struct Cli {
    /// Rule-definition file, one `conditions => conclusions` rule per line.
    #[arg(long, global = true, default_value = "rules.txt")]
    rules: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a diagnosis from reported symptoms.
    Diagnose {
        /// Comma-separated symptom names, e.g. "fever, cough".
        #[arg(long)]
        symptoms: String,

        /// Explain this fact instead of the first inferred one.
        #[arg(long)]
        explain: Option<String>,

        /// Ask y/n on stdin when a rule is one missing condition short.
        #[arg(long)]
        interactive: bool,

        /// Print the diagnosis as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the justification trace for one fact.
    Explain {
        /// The fact to explain.
        fact: String,

        /// Print the trace as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Parse the rule file and report its dependency structure.
    Check {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show rule base statistics.
    Info,
}

/// Stdin-backed clarifier: asks y/n once per condition and remembers the
/// answer for the rest of the run. Unreadable input counts as "no".
#[derive(Default)]
struct StdinClarifier {
    answers: HashMap<Fact, bool>,
}

impl Clarify for StdinClarifier {
    fn confirm(&mut self, conditions: &[Fact], missing: &Fact) -> bool {
        if let Some(&answer) = self.answers.get(missing) {
            return answer;
        }
        let context = conditions
            .iter()
            .map(Fact::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        print!("additional condition needed for rule [{context}]: {missing} (y/n): ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        let answer = std::io::stdin().read_line(&mut line).is_ok()
            && line.trim().eq_ignore_ascii_case("y");
        self.answers.insert(missing.clone(), answer);
        answer
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let session = Session::from_rules_file(&cli.rules)?;

    match cli.command {
        Commands::Diagnose {
            symptoms,
            explain,
            interactive,
            json,
        } => {
            let symptoms: Vec<Fact> = symptoms.split(',').filter_map(Fact::new).collect();
            if symptoms.is_empty() {
                miette::bail!("no symptoms provided");
            }

            let mut request = DiagnosisRequest::new(symptoms);
            if let Some(raw) = explain {
                match Fact::new(&raw) {
                    Some(fact) => request = request.with_explain(fact),
                    None => miette::bail!("--explain needs a non-empty fact name"),
                }
            }

            let diagnosis = if interactive {
                let mut clarifier = StdinClarifier::default();
                session.diagnose(&request, &mut clarifier)
            } else {
                session.diagnose(&request, &mut DenyAll)
            };

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&diagnosis).into_diagnostic()?
                );
            } else {
                print!("{diagnosis}");
            }
        }

        Commands::Explain { fact, json } => {
            let Some(target) = Fact::new(&fact) else {
                miette::bail!("the fact to explain must not be empty");
            };
            let trace = session.explain(&target);

            if json {
                println!("{}", serde_json::to_string_pretty(&trace).into_diagnostic()?);
            } else if trace.is_empty() {
                println!("no rule concludes \"{target}\"");
            } else {
                print_trace(&trace);
            }
        }

        Commands::Check { json } => {
            let report = analyze(session.rules());
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).into_diagnostic()?
                );
            } else {
                print!("{report}");
            }
        }

        Commands::Info => {
            print!("{}", session.info());
        }
    }

    Ok(())
}

fn print_trace(trace: &[TraceStep]) {
    for step in trace {
        let conclusions = step
            .conclusions
            .iter()
            .map(Fact::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let conditions = step
            .conditions
            .iter()
            .map(Fact::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        println!("{conclusions} <= {conditions}");
        for (i, link) in step.reference_links.iter().enumerate() {
            println!("  {}. {}", i + 1, link);
        }
    }
}
