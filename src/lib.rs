mod api;
mod engine;
mod error;
mod export;
mod format;
mod literal;
mod loader;
mod opcode;

pub use api::{
    MangleError, apply_rule, apply_rules, convert_literal_rules, export_rules, format_rule, load_rules, mangle,
    parse_rule, parse_rule_lines,
};
pub use error::{EvalError, ExportError, FormatError, LiteralError, LoadError, ParseError};
pub use export::WriteMode;
pub use format::format_action;
pub use opcode::{ArgKind, Opcode};

// --- Core data model --------------------------------------------------------

/// One decoded argument of an [`Action`].
///
/// Which variant a slot holds is fixed by the opcode's declared
/// [`ArgKind`]s: `Char` slots carry the raw rule-text character, `Pos` slots
/// carry the integer decoded from the base-36 digit alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arg {
    /// A literal character, inserted or compared verbatim.
    Char(char),
    /// A position or count decoded from the digit alphabet (0..=35).
    Pos(usize),
}

/// One (opcode, decoded arguments) unit within a [`Rule`].
///
/// Created by the parser (or the literal converter); never mutated after
/// creation. `args.len()` always equals the opcode's arity for parser-built
/// actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    pub opcode: Opcode,
    pub args: Vec<Arg>,
}

/// An ordered sequence of [`Action`]s, applied left to right.
///
/// Immutable once parsed; its only operations are formatting back to the
/// canonical rule text and application to a subject string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rule {
    actions: Vec<Action>,
}

impl Rule {
    /// Build a rule from an already-decoded action sequence.
    pub fn new(actions: Vec<Action>) -> Self {
        Rule { actions }
    }

    /// The actions in application order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// True for the empty rule (an empty line parses to this; applying it
    /// returns the subject unchanged).
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl std::fmt::Display for Rule {
    /// Canonical text form, or `<unencodable rule>` if a hand-built position
    /// exceeds the digit alphabet. Use [`format_rule`] to surface the error.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match format::format_rule(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str("<unencodable rule>"),
        }
    }
}
