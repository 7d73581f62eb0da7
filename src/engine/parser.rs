//! Variable-width rule-line tokenizer.
//!
//! A rule line is a sequence of actions: one opcode character, followed
//! immediately by exactly as many argument characters as the opcode's
//! declared arity, followed by a single separator character (a space when
//! the line was produced by the formatter). There is no lookahead and no
//! backtracking; the opcode table is the only context consulted.
//!
//! ```text
//! "c $1 sa@"
//!  │ │├┘ │└┴─ two Char args for 's'
//!  │ │└─ Char arg for '$'       separators are the single
//!  │ └─ opcode                  characters between actions
//!  └─ opcode, arity 0
//! ```
//!
//! Positional slots (declared `ArgKind::Pos` in the opcode table) decode
//! through the base-36 digit alphabet; everything else is taken verbatim.
//! The parser operates on one already-trimmed line and knows nothing about
//! comments or blank-line filtering (that is the loader's job).

use crate::error::ParseError;
use crate::opcode::{ArgKind, Opcode, decode_digit};
use crate::{Action, Arg, Rule};

/// Parse one rule line into its action sequence.
///
/// An empty line parses to the empty [`Rule`]. Errors surface with the
/// offending line, character, and char offset; nothing is silently
/// truncated or over-consumed.
pub(crate) fn parse_rule(text: &str) -> Result<Rule, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    let mut actions = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let opcode_char = chars[pos];
        let opcode = Opcode::from_char(opcode_char).ok_or_else(|| ParseError::UnknownOpcode {
            line: text.to_string(),
            opcode: opcode_char,
            offset: pos,
        })?;

        let kinds = opcode.arg_kinds();
        let remaining = chars.len() - pos - 1;
        if remaining < kinds.len() {
            return Err(ParseError::ArgumentUnderflow {
                line: text.to_string(),
                opcode: opcode_char,
                expected: kinds.len(),
                found: remaining,
            });
        }

        let mut args = Vec::with_capacity(kinds.len());
        for (slot, kind) in kinds.iter().enumerate() {
            let offset = pos + 1 + slot;
            let token = chars[offset];
            let arg = match kind {
                ArgKind::Char => Arg::Char(token),
                ArgKind::Pos => Arg::Pos(decode_digit(token).ok_or_else(|| ParseError::InvalidDigit {
                    line: text.to_string(),
                    opcode: opcode_char,
                    digit: token,
                    offset,
                })?),
            };
            args.push(arg);
        }
        actions.push(Action { opcode, args });

        // Advance past the opcode, its arguments, and one separator
        // character (the latter only if input remains).
        pos += 1 + kinds.len() + 1;
    }

    Ok(Rule::new(actions))
}
