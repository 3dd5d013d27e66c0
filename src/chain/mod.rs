//! Inference engines: forward fact derivation and backward explanation.
//!
//! [`forward`] computes the closure of facts reachable from a set of reported
//! symptoms by repeated rule firing, consulting an injected [`Clarify`]
//! strategy for missing single-condition prerequisites. [`backward`] walks
//! the rules goal-first to assemble the justification trace for one fact.
//!
//! Both engines scan the rule base strictly in definition order and keep all
//! working state request-local, so one shared [`RuleBase`](crate::rule::RuleBase)
//! can serve any number of concurrent requests.

pub mod backward;
pub mod forward;

pub use backward::{TraceStep, explain};
pub use forward::{Clarify, ClarifyFn, DenyAll, ForwardChainer, InferenceResult, clarify_fn};
