//! Rule parsing and evaluation engine.
//!
//! ## How the parts work together
//!
//! At a high level, running a rule file against a word is a pipeline:
//!
//! ```text
//! rule line ── parser::parse_rule ──> Rule (Vec<Action>)
//!                                       │
//! subject ──────────────────────────────┼── eval::apply_rule
//!                                       │     - fold actions left to right
//!                                       │     - Opcode::apply per action
//!                                       v
//!                                   String / EvalError
//!
//! many rules ── eval::apply_rules ──> HashSet<String>
//!                 - each rule applied to the *original* subject
//!                 - failing rules dropped, duplicates collapsed
//! ```
//!
//! ## Responsibilities by module
//!
//! - `parser.rs`: variable-width tokenization of one rule line — one opcode
//!   character, exactly arity argument characters, one separator — with
//!   digit-alphabet decoding of positional slots.
//! - `eval.rs`: the left-to-right fold plus the set-producing bulk entry
//!   point.
//!
//! The opcode table itself (arities, argument kinds, transform dispatch)
//! lives in `crate::opcode`; the engine only drives it.
//!
//! ## Debugging
//!
//! Set `MANGLER_DEBUG_RULES=1` to print per-rule application traces during
//! bulk evaluation.

#[path = "engine/eval.rs"]
mod eval;
#[path = "engine/parser.rs"]
mod parser;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub(crate) use eval::{apply_rule, apply_rules};
pub(crate) use parser::parse_rule;
