//! Rule compilation and verdict engine.
//!
//! Like the rest of the crate, the engine is split into focused submodules
//! under `src/engine/` while `crate::engine::*` stays the stable path.
//!
//! ## How the parts work together
//!
//! ```text
//! rule text ── classify ──┬─ positive lines ──┐
//!           (classify.rs) └─ negative lines ──┤
//!                                             │ Matcher::build   (compiled_rules.rs)
//!                                             │   sort, compile_pattern (compiler.rs)
//!                                             v
//!                               Matcher { merged, rules[] }  x2
//!                                             │
//! path ── normalize ──────────────────────────┼─ Evaluation::run (decision.rs)
//!                                             │   merged hits, longest match on overlap
//!                                             v
//!                               accepts / denies / inspects
//!                                             │ expected != actual
//!                                             v
//!                               MismatchReport -> observer  (diagnose.rs)
//! ```
//!
//! Everything on the left of the matchers runs once per rule set; everything
//! on the right is a pure read-only query and may run from any thread.
//!
//! ## Responsibilities by module
//!
//! - `classify.rs`: splits raw content into ignore / re-include line lists.
//! - `compiler.rs`: turns one pattern line into a regex fragment and flags.
//! - `compiled_rules.rs`: sorted, index-aligned `Matcher` per polarity.
//! - `decision.rs`: path normalization and the precedence algorithm.
//! - `diagnose.rs`: mismatch evidence and the observer capability.
//!
//! ## Debugging
//!
//! Run with `IGNORA_LOG=ignora=trace` to see every compiled fragment.

#[path = "engine/classify.rs"]
mod classify;
#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/compiler.rs"]
mod compiler;
#[path = "engine/decision.rs"]
mod decision;
#[path = "engine/diagnose.rs"]
mod diagnose;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use classify::{ClassifiedLines, classify};
pub use compiled_rules::{CompiledRule, Matcher};
pub use compiler::{CompiledPattern, compile_pattern};
pub use decision::{Evaluation, LongestMatch};
pub use diagnose::{MatchEvidence, MismatchObserver, MismatchReport};
