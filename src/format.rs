//! Canonical rule-text rendering: the exact inverse of the parser.
//!
//! An action renders as its opcode character immediately followed by its
//! argument characters (no separators inside an action); actions join with a
//! single space. Positional arguments re-encode through the digit alphabet,
//! so `parse(format(r)) == r` holds structurally for every parser-built rule.

use crate::error::FormatError;
use crate::opcode::encode_digit;
use crate::{Action, Arg, Rule};

/// Render one action to its rule-text token.
pub fn format_action(action: &Action) -> Result<String, FormatError> {
    let mut out = String::new();
    out.push(action.opcode.to_char());
    for arg in &action.args {
        match arg {
            Arg::Char(c) => out.push(*c),
            Arg::Pos(value) => out.push(encode_digit(*value).ok_or(FormatError::PositionTooLarge(*value))?),
        }
    }
    Ok(out)
}

/// Render a rule to its canonical one-line text form.
pub(crate) fn format_rule(rule: &Rule) -> Result<String, FormatError> {
    let mut tokens = Vec::with_capacity(rule.actions().len());
    for action in rule.actions() {
        tokens.push(format_action(action)?);
    }
    Ok(tokens.join(" "))
}
