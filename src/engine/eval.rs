//! Rule evaluation: single application and the set-producing bulk mode.

use std::collections::HashSet;

use crate::Rule;
use crate::error::EvalError;

/// Apply `rule` to `subject`, folding each action over the running string
/// left to right.
///
/// The first failing transform aborts the whole application with its error;
/// there is no partial result. The empty rule returns the subject unchanged.
pub(crate) fn apply_rule(subject: &str, rule: &Rule) -> Result<String, EvalError> {
    let mut current = subject.to_string();
    for action in rule.actions() {
        current = action.opcode.apply(&current, &action.args)?;
    }
    Ok(current)
}

/// Apply every rule independently to the *original* `subject` and collect
/// the distinct successful outputs.
///
/// Each rule's application is a discrete `Result`; failures are filtered out
/// before collection rather than aborting the batch, and two rules that
/// produce the same output collapse to one set member. Callers needing
/// per-rule provenance should call [`apply_rule`] themselves.
pub(crate) fn apply_rules(subject: &str, rules: &[Rule]) -> HashSet<String> {
    let debug = std::env::var_os("MANGLER_DEBUG_RULES").is_some();

    rules
        .iter()
        .map(|rule| (rule, apply_rule(subject, rule)))
        .filter_map(|(rule, result)| match result {
            Ok(candidate) => Some(candidate),
            Err(err) => {
                if debug {
                    eprintln!("[apply_rules:dropped] rule=\"{rule}\" subject=\"{subject}\" error={err}");
                }
                None
            }
        })
        .collect()
}
