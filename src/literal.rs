//! Conversion of literal-encoded ordered-rule lines.
//!
//! Rule sets are sometimes exchanged as one literal action list per line,
//! e.g.:
//!
//! ```text
//! [('c', []), ('$', ['1'])]
//! [('s', ['e', '3'])]
//! [('Z', [1])]
//! ```
//!
//! Each tuple is an (opcode, argument list) pair: character arguments are
//! quoted, already-decoded positions are bare integers. This module parses
//! that encoding back into [`Rule`]s, re-validating arity and position
//! ranges against the opcode table, so the result can be formatted to
//! canonical rule text or applied directly.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::LiteralError;
use crate::opcode::{ArgKind, Opcode, decode_digit};
use crate::{Action, Arg, Rule};

/// One `('X', [args])` tuple. The opcode may be single- or double-quoted
/// (the quote character itself appears double-quoted); the argument list
/// may contain quoted characters and bare integers.
static ACTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\(\s*(?:'(?P<op1>\\.|[^'])'|"(?P<op2>\\.|[^"])")\s*,\s*\[(?P<args>(?:[^\[\]'"]|'(?:\\.|[^'])*'|"(?:\\.|[^"])*")*)\]\s*\)"#,
    )
    .unwrap()
});

/// One argument token inside the list: a quoted character or a bare integer.
static ARG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"'(?P<c1>\\.|[^'])'|"(?P<c2>\\.|[^"])"|(?P<int>-?\d+)"#).unwrap());

/// Parse a block of literal-encoded lines into rules, in input order.
///
/// Blank lines are skipped. Any other line that is not a well-formed action
/// list, or whose actions violate the opcode table's arity or position
/// ranges, fails the whole conversion with its 1-based line number.
pub(crate) fn convert_literal_rules(text: &str) -> Result<Vec<Rule>, LiteralError> {
    let mut rules = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        rules.push(convert_line(line, idx + 1)?);
    }
    Ok(rules)
}

fn convert_line(line: &str, line_no: usize) -> Result<Rule, LiteralError> {
    let malformed = || LiteralError::Malformed { line: line_no, text: line.to_string() };

    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(malformed)?;

    let mut actions = Vec::new();
    let mut cursor = 0;
    for caps in ACTION_RE.captures_iter(inner) {
        let whole = caps.get(0).ok_or_else(malformed)?;
        // Between consecutive tuples only commas and whitespace may appear.
        if !inner[cursor..whole.start()].chars().all(|c| c == ',' || c.is_whitespace()) {
            return Err(malformed());
        }
        cursor = whole.end();

        let quoted = caps.name("op1").or_else(|| caps.name("op2")).ok_or_else(malformed)?;
        let opcode_char = unescape(quoted.as_str()).ok_or_else(malformed)?;
        let opcode =
            Opcode::from_char(opcode_char).ok_or(LiteralError::UnknownOpcode { line: line_no, opcode: opcode_char })?;

        let raw_args = caps.name("args").map(|m| m.as_str()).unwrap_or("");
        let tokens = parse_args(raw_args).ok_or_else(malformed)?;

        let kinds = opcode.arg_kinds();
        if tokens.len() != kinds.len() {
            return Err(LiteralError::BadArity {
                line: line_no,
                opcode: opcode_char,
                expected: kinds.len(),
                found: tokens.len(),
            });
        }

        let mut args = Vec::with_capacity(kinds.len());
        for (kind, token) in kinds.iter().zip(tokens) {
            let arg = match (kind, token) {
                (ArgKind::Char, LiteralArg::Ch(c)) => Arg::Char(c),
                (ArgKind::Pos, LiteralArg::Int(v)) => {
                    let value = usize::try_from(v)
                        .ok()
                        .filter(|v| *v <= 35)
                        .ok_or(LiteralError::BadPosition { line: line_no, opcode: opcode_char, value: v })?;
                    Arg::Pos(value)
                }
                // Positions occasionally arrive still encoded as their
                // digit-alphabet symbol.
                (ArgKind::Pos, LiteralArg::Ch(c)) => Arg::Pos(decode_digit(c).ok_or_else(malformed)?),
                (ArgKind::Char, LiteralArg::Int(_)) => return Err(malformed()),
            };
            args.push(arg);
        }
        actions.push(Action { opcode, args });
    }

    if !inner[cursor..].chars().all(|c| c == ',' || c.is_whitespace()) {
        return Err(malformed());
    }
    Ok(Rule::new(actions))
}

#[derive(Debug, Clone, Copy)]
enum LiteralArg {
    Ch(char),
    Int(i64),
}

/// Tokenize the inside of an argument list, rejecting stray text between
/// tokens.
fn parse_args(raw: &str) -> Option<Vec<LiteralArg>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;
    for caps in ARG_RE.captures_iter(raw) {
        let whole = caps.get(0)?;
        if !raw[cursor..whole.start()].chars().all(|c| c == ',' || c.is_whitespace()) {
            return None;
        }
        cursor = whole.end();

        let token = if let Some(quoted) = caps.name("c1").or_else(|| caps.name("c2")) {
            LiteralArg::Ch(unescape(quoted.as_str())?)
        } else {
            LiteralArg::Int(caps.name("int")?.as_str().parse().ok()?)
        };
        tokens.push(token);
    }
    if !raw[cursor..].chars().all(|c| c == ',' || c.is_whitespace()) {
        return None;
    }
    Some(tokens)
}

/// Resolve a quoted token body to its character, undoing a `\x` escape.
fn unescape(body: &str) -> Option<char> {
    let mut chars = body.chars();
    match (chars.next()?, chars.next()) {
        (c, None) => Some(c),
        ('\\', Some(escaped)) if chars.next().is_none() => Some(escaped),
        _ => None,
    }
}
