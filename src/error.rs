use thiserror::Error;

/// Errors produced while parsing one rule line.
///
/// Each variant carries the offending line plus enough position/token context
/// to diagnose the failure without re-reading the rule file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character was read where an opcode was expected but is not in the
    /// opcode table.
    #[error("unknown opcode '{opcode}' at position {offset} in rule \"{line}\"")]
    UnknownOpcode { line: String, opcode: char, offset: usize },

    /// Fewer characters remain than the opcode's declared arity requires.
    #[error("opcode '{opcode}' expects {expected} argument(s) but only {found} remain in rule \"{line}\"")]
    ArgumentUnderflow { line: String, opcode: char, expected: usize, found: usize },

    /// A positional argument token is not a member of the digit alphabet.
    #[error("invalid digit '{digit}' for opcode '{opcode}' at position {offset} in rule \"{line}\"")]
    InvalidDigit { line: String, opcode: char, digit: char, offset: usize },
}

/// Errors produced while applying a rule to a subject.
///
/// These are fatal to that single application only; bulk application drops
/// the failing rule and continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A transform's positional arithmetic fell outside the subject's bounds.
    #[error("position {index} out of range for subject of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Character code-point arithmetic (shift/increment/decrement) produced a
    /// value that is not a valid Unicode scalar.
    #[error("character arithmetic at position {index} produced an invalid code point")]
    InvalidCodePoint { index: usize },

    /// An action's argument list does not match its opcode's declared slots.
    /// Cannot happen for parser-built rules; guards hand-built actions.
    #[error("arguments for opcode '{opcode}' do not match its declared slots")]
    MalformedAction { opcode: char },
}

/// Errors produced while loading a rule file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line survived comment/blank filtering but failed to parse. Fatal to
    /// the whole load; `line` is 1-based.
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },
}

/// Errors produced while rendering a rule back to canonical text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A positional argument exceeds the 36-symbol digit alphabet.
    #[error("position {0} cannot be encoded in the base-36 digit alphabet")]
    PositionTooLarge(usize),
}

/// Errors produced while converting literal-encoded rule lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    /// The line is not a well-formed list of `('X', [args])` actions.
    #[error("line {line}: malformed action list: {text}")]
    Malformed { line: usize, text: String },

    /// An action names a character outside the opcode table.
    #[error("line {line}: unknown opcode '{opcode}'")]
    UnknownOpcode { line: usize, opcode: char },

    /// A positional argument is negative or exceeds the digit alphabet.
    #[error("line {line}: position {value} out of range for opcode '{opcode}'")]
    BadPosition { line: usize, opcode: char, value: i64 },

    /// An action's argument count does not match the opcode's arity.
    #[error("line {line}: opcode '{opcode}' expects {expected} argument(s), got {found}")]
    BadArity { line: usize, opcode: char, expected: usize, found: usize },
}

/// Errors produced while exporting formatted rules to a file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),
}
