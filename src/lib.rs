//! # faultwise
//!
//! A rule-based fault-diagnosis engine: forward chaining derives every fact
//! reachable from a set of reported symptoms, and backward chaining
//! reconstructs the justification trail for any derived conclusion.
//!
//! ## Architecture
//!
//! - **Rule model** (`fact`, `rule`): immutable rules over trimmed string
//!   fact tokens, evaluated strictly in definition order
//! - **Parser** (`parse`): the line-oriented `conditions => conclusions`
//!   format with `, image=` reference-link markers and line-numbered errors
//! - **Chaining** (`chain`): fixed-point forward derivation with an
//!   injectable clarification strategy; stack-driven backward explanation
//! - **Session** (`session`): the facade a presentation shell drives, one
//!   loaded rule base serving any number of diagnosis requests
//! - **Analysis** (`analyze`): petgraph-backed dependency reporting for
//!   rule authors
//!
//! ## Library usage
//!
//! ```
//! use faultwise::chain::forward::DenyAll;
//! use faultwise::fact::Fact;
//! use faultwise::session::{DiagnosisRequest, Session};
//!
//! let session = Session::from_rules_text(
//!     "fever, cough => flu, image=http://a/flu.png\n\
//!      flu => bed_rest\n",
//! )
//! .unwrap();
//!
//! let request = DiagnosisRequest::new(vec![
//!     Fact::new("fever").unwrap(),
//!     Fact::new("cough").unwrap(),
//! ]);
//! let diagnosis = session.diagnose(&request, &mut DenyAll);
//!
//! assert!(diagnosis.inferred.contains(&Fact::new("flu").unwrap()));
//! assert_eq!(diagnosis.trace.len(), 1);
//! ```

pub mod analyze;
pub mod chain;
pub mod error;
pub mod fact;
pub mod parse;
pub mod rule;
pub mod session;
