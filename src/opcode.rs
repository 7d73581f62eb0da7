//! Opcode table: the closed catalog of word-mangling transforms.
//!
//! This module is the leaf of the engine: everything else (parser, evaluator,
//! formatter) consults it and nothing here depends on them. It owns three
//! things:
//!
//! - the [`Opcode`] enum, one variant per grammar character, with
//!   `from_char`/`to_char` conversions;
//! - the static argument-slot table ([`Opcode::arg_kinds`]) that declares, per
//!   opcode, how many argument characters follow it in rule text and which of
//!   them decode through the digit alphabet into positions;
//! - the transform dispatch ([`Opcode::apply`]): a pure function from
//!   `(subject, args)` to a new `String`, pattern-matched over the variants so
//!   the compiler checks the catalog is total.
//!
//! All index arithmetic is over `char`s, never bytes, and every out-of-bounds
//! position is an [`EvalError`] rather than a clamp or a panic. The exact
//! slicing boundaries follow the hashcat rule grammar.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::Arg;
use crate::error::EvalError;

/// Kind of one argument slot in rule text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// A literal character, used verbatim (insert/compare).
    Char,
    /// A base-36 digit, decoded into a position or count.
    Pos,
}

/// Map from digit-alphabet symbol (`0`-`9`, `A`-`Z`) to its value 0..=35.
static DIGIT_VALUES: Lazy<HashMap<char, usize>> =
    Lazy::new(|| ('0'..='9').chain('A'..='Z').enumerate().map(|(value, symbol)| (symbol, value)).collect());

/// Decode one digit-alphabet symbol. `None` for out-of-alphabet characters.
pub(crate) fn decode_digit(symbol: char) -> Option<usize> {
    DIGIT_VALUES.get(&symbol).copied()
}

/// Encode a position back into its digit-alphabet symbol (inverse of
/// [`decode_digit`]). `None` for values outside 0..=35.
pub(crate) fn encode_digit(value: usize) -> Option<char> {
    match value {
        0..=9 => char::from_u32('0' as u32 + value as u32),
        10..=35 => char::from_u32('A' as u32 + (value as u32 - 10)),
        _ => None,
    }
}

/// One word-mangling opcode from the hashcat rule grammar.
///
/// The set is closed: [`Opcode::from_char`] rejects anything else, which is
/// what surfaces `ParseError::UnknownOpcode` at the parser level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `:` do nothing.
    Noop,
    /// `l` lowercase all letters.
    Lowercase,
    /// `u` uppercase all letters.
    Uppercase,
    /// `c` capitalize the first letter, lowercase the rest.
    Capitalize,
    /// `C` lowercase the first letter, uppercase the rest.
    InvertCapitalize,
    /// `t` toggle the case of every character.
    ToggleCase,
    /// `T`N toggle the case of the character at position N.
    ToggleAt,
    /// `E` uppercase the first letter of every space-separated word.
    TitleCase,
    /// `r` reverse the word.
    Reverse,
    /// `{` rotate the word left by one.
    RotateLeft,
    /// `}` rotate the word right by one.
    RotateRight,
    /// `d` append the word to itself.
    Duplicate,
    /// `f` append the reversed word.
    Reflect,
    /// `q` duplicate every character in place.
    DuplicateEvery,
    /// `p`N repeat the whole word N times.
    Repeat,
    /// `z`N prepend the first character N times.
    DuplicateFirst,
    /// `Z`N append the last character N times.
    DuplicateLast,
    /// `y`N prepend the first N characters.
    DuplicateBlockFront,
    /// `Y`N append the last N characters.
    DuplicateBlockBack,
    /// `[` delete the first character.
    DeleteFirst,
    /// `]` delete the last character.
    DeleteLast,
    /// `D`N delete the character at position N.
    DeleteAt,
    /// `'`N truncate the word at position N.
    Truncate,
    /// `O`NM delete M characters starting at position N.
    OmitRange,
    /// `x`NM extract M characters starting at position N.
    Extract,
    /// `@`X purge every instance of X.
    Purge,
    /// `$`X append X.
    Append,
    /// `^`X prepend X.
    Prepend,
    /// `i`NX insert X at position N.
    InsertAt,
    /// `o`NX overwrite the character at position N with X.
    OverwriteAt,
    /// `s`XY replace every instance of X with Y.
    Replace,
    /// `L`N bitwise shift the code point at position N left by one.
    ShiftLeft,
    /// `R`N bitwise shift the code point at position N right by one.
    ShiftRight,
    /// `+`N increment the code point at position N.
    Increment,
    /// `-`N decrement the code point at position N.
    Decrement,
    /// `.`N replace the character at position N with its right neighbor.
    ReplaceWithNext,
    /// `,`N replace the character at position N with its left neighbor.
    ReplaceWithPrev,
    /// `k` swap the first two characters.
    SwapFront,
    /// `K` swap the last two characters.
    SwapBack,
    /// `*`NM swap the characters at positions N and M.
    SwapAt,
}

impl Opcode {
    /// Look up the opcode for a grammar character. `None` means the character
    /// is outside the catalog.
    pub fn from_char(c: char) -> Option<Opcode> {
        let op = match c {
            ':' => Opcode::Noop,
            'l' => Opcode::Lowercase,
            'u' => Opcode::Uppercase,
            'c' => Opcode::Capitalize,
            'C' => Opcode::InvertCapitalize,
            't' => Opcode::ToggleCase,
            'T' => Opcode::ToggleAt,
            'E' => Opcode::TitleCase,
            'r' => Opcode::Reverse,
            '{' => Opcode::RotateLeft,
            '}' => Opcode::RotateRight,
            'd' => Opcode::Duplicate,
            'f' => Opcode::Reflect,
            'q' => Opcode::DuplicateEvery,
            'p' => Opcode::Repeat,
            'z' => Opcode::DuplicateFirst,
            'Z' => Opcode::DuplicateLast,
            'y' => Opcode::DuplicateBlockFront,
            'Y' => Opcode::DuplicateBlockBack,
            '[' => Opcode::DeleteFirst,
            ']' => Opcode::DeleteLast,
            'D' => Opcode::DeleteAt,
            '\'' => Opcode::Truncate,
            'O' => Opcode::OmitRange,
            'x' => Opcode::Extract,
            '@' => Opcode::Purge,
            '$' => Opcode::Append,
            '^' => Opcode::Prepend,
            'i' => Opcode::InsertAt,
            'o' => Opcode::OverwriteAt,
            's' => Opcode::Replace,
            'L' => Opcode::ShiftLeft,
            'R' => Opcode::ShiftRight,
            '+' => Opcode::Increment,
            '-' => Opcode::Decrement,
            '.' => Opcode::ReplaceWithNext,
            ',' => Opcode::ReplaceWithPrev,
            'k' => Opcode::SwapFront,
            'K' => Opcode::SwapBack,
            '*' => Opcode::SwapAt,
            _ => return None,
        };
        Some(op)
    }

    /// The grammar character for this opcode (inverse of [`from_char`]).
    ///
    /// [`from_char`]: Opcode::from_char
    pub fn to_char(self) -> char {
        match self {
            Opcode::Noop => ':',
            Opcode::Lowercase => 'l',
            Opcode::Uppercase => 'u',
            Opcode::Capitalize => 'c',
            Opcode::InvertCapitalize => 'C',
            Opcode::ToggleCase => 't',
            Opcode::ToggleAt => 'T',
            Opcode::TitleCase => 'E',
            Opcode::Reverse => 'r',
            Opcode::RotateLeft => '{',
            Opcode::RotateRight => '}',
            Opcode::Duplicate => 'd',
            Opcode::Reflect => 'f',
            Opcode::DuplicateEvery => 'q',
            Opcode::Repeat => 'p',
            Opcode::DuplicateFirst => 'z',
            Opcode::DuplicateLast => 'Z',
            Opcode::DuplicateBlockFront => 'y',
            Opcode::DuplicateBlockBack => 'Y',
            Opcode::DeleteFirst => '[',
            Opcode::DeleteLast => ']',
            Opcode::DeleteAt => 'D',
            Opcode::Truncate => '\'',
            Opcode::OmitRange => 'O',
            Opcode::Extract => 'x',
            Opcode::Purge => '@',
            Opcode::Append => '$',
            Opcode::Prepend => '^',
            Opcode::InsertAt => 'i',
            Opcode::OverwriteAt => 'o',
            Opcode::Replace => 's',
            Opcode::ShiftLeft => 'L',
            Opcode::ShiftRight => 'R',
            Opcode::Increment => '+',
            Opcode::Decrement => '-',
            Opcode::ReplaceWithNext => '.',
            Opcode::ReplaceWithPrev => ',',
            Opcode::SwapFront => 'k',
            Opcode::SwapBack => 'K',
            Opcode::SwapAt => '*',
        }
    }

    /// Declared argument slots, in rule-text order.
    ///
    /// This single table drives both the parser (how many characters to
    /// consume and which to decode) and the formatter (how to re-encode). The
    /// arity of an opcode is `arg_kinds().len()`.
    pub fn arg_kinds(self) -> &'static [ArgKind] {
        use ArgKind::{Char, Pos};
        match self {
            Opcode::Noop
            | Opcode::Lowercase
            | Opcode::Uppercase
            | Opcode::Capitalize
            | Opcode::InvertCapitalize
            | Opcode::ToggleCase
            | Opcode::TitleCase
            | Opcode::Reverse
            | Opcode::RotateLeft
            | Opcode::RotateRight
            | Opcode::Duplicate
            | Opcode::Reflect
            | Opcode::DuplicateEvery
            | Opcode::DeleteFirst
            | Opcode::DeleteLast
            | Opcode::SwapFront
            | Opcode::SwapBack => &[],
            Opcode::ToggleAt
            | Opcode::Repeat
            | Opcode::DuplicateFirst
            | Opcode::DuplicateLast
            | Opcode::DuplicateBlockFront
            | Opcode::DuplicateBlockBack
            | Opcode::DeleteAt
            | Opcode::Truncate
            | Opcode::ShiftLeft
            | Opcode::ShiftRight
            | Opcode::Increment
            | Opcode::Decrement
            | Opcode::ReplaceWithNext
            | Opcode::ReplaceWithPrev => &[Pos],
            Opcode::Purge | Opcode::Append | Opcode::Prepend => &[Char],
            Opcode::OmitRange | Opcode::Extract | Opcode::SwapAt => &[Pos, Pos],
            Opcode::InsertAt | Opcode::OverwriteAt => &[Pos, Char],
            Opcode::Replace => &[Char, Char],
        }
    }

    /// Number of argument characters this opcode consumes in rule text.
    pub fn arity(self) -> usize {
        self.arg_kinds().len()
    }

    /// Apply this opcode's transform to `subject`.
    ///
    /// Pure: produces a new `String`, never mutates in place. `args` must
    /// match [`arg_kinds`]; parser-built actions always do.
    ///
    /// [`arg_kinds`]: Opcode::arg_kinds
    pub fn apply(self, subject: &str, args: &[Arg]) -> Result<String, EvalError> {
        let chars: Vec<char> = subject.chars().collect();
        let n = chars.len();

        match self {
            Opcode::Noop => Ok(subject.to_string()),
            Opcode::Lowercase => Ok(subject.to_lowercase()),
            Opcode::Uppercase => Ok(subject.to_uppercase()),
            Opcode::Capitalize => {
                let mut it = chars.iter();
                match it.next() {
                    None => Ok(String::new()),
                    Some(first) => {
                        let mut out: String = first.to_uppercase().collect();
                        out.extend(it.flat_map(|c| c.to_lowercase()));
                        Ok(out)
                    }
                }
            }
            Opcode::InvertCapitalize => {
                let first = chars.first().ok_or(oob(0, n))?;
                let mut out: String = first.to_lowercase().collect();
                out.extend(chars[1..].iter().flat_map(|c| c.to_uppercase()));
                Ok(out)
            }
            Opcode::ToggleCase => Ok(chars.iter().flat_map(|&c| toggled(c)).collect()),
            Opcode::ToggleAt => {
                let p = self.pos(args, 0)?;
                if p >= n {
                    return Err(oob(p, n));
                }
                let mut out: String = chars[..p].iter().collect();
                out.extend(toggled(chars[p]));
                out.extend(&chars[p + 1..]);
                Ok(out)
            }
            Opcode::TitleCase => {
                let mut words = Vec::new();
                for word in subject.split(' ') {
                    let mut cs = word.chars();
                    let first = cs.next().ok_or(oob(0, 0))?;
                    let mut w: String = first.to_uppercase().collect();
                    w.push_str(cs.as_str());
                    words.push(w);
                }
                Ok(words.join(" "))
            }
            Opcode::Reverse => Ok(chars.iter().rev().collect()),
            Opcode::RotateLeft => {
                let first = chars.first().ok_or(oob(0, n))?;
                let mut out: String = chars[1..].iter().collect();
                out.push(*first);
                Ok(out)
            }
            Opcode::RotateRight => {
                let last = chars.last().ok_or(oob(0, n))?;
                let mut out = String::new();
                out.push(*last);
                out.extend(&chars[..n - 1]);
                Ok(out)
            }
            Opcode::Duplicate => Ok(subject.repeat(2)),
            Opcode::Reflect => {
                let mut out = subject.to_string();
                out.extend(chars.iter().rev());
                Ok(out)
            }
            Opcode::DuplicateEvery => Ok(chars.iter().flat_map(|&c| [c, c]).collect()),
            Opcode::Repeat => {
                let count = self.pos(args, 0)?;
                Ok(subject.repeat(count))
            }
            Opcode::DuplicateFirst => {
                let count = self.pos(args, 0)?;
                let first = chars.first().ok_or(oob(0, n))?;
                let mut out: String = std::iter::repeat_n(*first, count).collect();
                out.push_str(subject);
                Ok(out)
            }
            Opcode::DuplicateLast => {
                let count = self.pos(args, 0)?;
                let last = chars.last().ok_or(oob(0, n))?;
                let mut out = subject.to_string();
                out.extend(std::iter::repeat_n(*last, count));
                Ok(out)
            }
            Opcode::DuplicateBlockFront => {
                // Block length clamps to the subject, matching the grammar's
                // prefix-slice semantics.
                let count = self.pos(args, 0)?;
                let mut out: String = chars[..count.min(n)].iter().collect();
                out.push_str(subject);
                Ok(out)
            }
            Opcode::DuplicateBlockBack => {
                // Count 0 appends the whole word (a suffix slice from the
                // end offset negated, which the reference grammar pins at 0).
                let count = self.pos(args, 0)?;
                let start = if count == 0 { 0 } else { n - count.min(n) };
                let mut out = subject.to_string();
                out.extend(&chars[start..]);
                Ok(out)
            }
            Opcode::DeleteFirst => Ok(chars.iter().skip(1).collect()),
            Opcode::DeleteLast => Ok(chars[..n.saturating_sub(1)].iter().collect()),
            Opcode::DeleteAt => {
                let p = self.pos(args, 0)?;
                if p >= n {
                    return Err(oob(p, n));
                }
                let mut out: String = chars[..p].iter().collect();
                out.extend(&chars[p + 1..]);
                Ok(out)
            }
            Opcode::Truncate => {
                let p = self.pos(args, 0)?;
                if p > n {
                    return Err(oob(p, n));
                }
                Ok(chars[..p].iter().collect())
            }
            Opcode::OmitRange => {
                let start = self.pos(args, 0)?;
                let len = self.pos(args, 1)?;
                if start + len > n {
                    return Err(oob(start + len, n));
                }
                let mut out: String = chars[..start].iter().collect();
                out.extend(&chars[start + len..]);
                Ok(out)
            }
            Opcode::Extract => {
                let start = self.pos(args, 0)?;
                let len = self.pos(args, 1)?;
                if start + len > n {
                    return Err(oob(start + len, n));
                }
                Ok(chars[start..start + len].iter().collect())
            }
            Opcode::Purge => {
                let target = self.ch(args, 0)?;
                Ok(chars.iter().filter(|&&c| c != target).collect())
            }
            Opcode::Append => {
                let mut out = subject.to_string();
                out.push(self.ch(args, 0)?);
                Ok(out)
            }
            Opcode::Prepend => {
                let mut out = String::new();
                out.push(self.ch(args, 0)?);
                out.push_str(subject);
                Ok(out)
            }
            Opcode::InsertAt => {
                let p = self.pos(args, 0)?;
                let c = self.ch(args, 1)?;
                if p > n {
                    return Err(oob(p, n));
                }
                let mut out: String = chars[..p].iter().collect();
                out.push(c);
                out.extend(&chars[p..]);
                Ok(out)
            }
            Opcode::OverwriteAt => {
                let p = self.pos(args, 0)?;
                let c = self.ch(args, 1)?;
                if p >= n {
                    return Err(oob(p, n));
                }
                let mut out: String = chars[..p].iter().collect();
                out.push(c);
                out.extend(&chars[p + 1..]);
                Ok(out)
            }
            Opcode::Replace => {
                let from = self.ch(args, 0)?;
                let to = self.ch(args, 1)?;
                Ok(chars.iter().map(|&c| if c == from { to } else { c }).collect())
            }
            Opcode::ShiftLeft => self.with_code_at(&chars, args, |code| code.checked_shl(1)),
            Opcode::ShiftRight => self.with_code_at(&chars, args, |code| Some(code >> 1)),
            Opcode::Increment => self.with_code_at(&chars, args, |code| code.checked_add(1)),
            Opcode::Decrement => self.with_code_at(&chars, args, |code| code.checked_sub(1)),
            Opcode::ReplaceWithNext => {
                let p = self.pos(args, 0)?;
                if p + 1 >= n {
                    return Err(oob(p + 1, n));
                }
                let mut out: String = chars[..p].iter().collect();
                out.push(chars[p + 1]);
                out.extend(&chars[p + 1..]);
                Ok(out)
            }
            Opcode::ReplaceWithPrev => {
                // Position 0 has no left neighbor; out of bounds rather than
                // a wraparound to the last character.
                let p = self.pos(args, 0)?;
                if p == 0 || p >= n {
                    return Err(oob(p, n));
                }
                let mut out: String = chars[..p].iter().collect();
                out.push(chars[p - 1]);
                out.extend(&chars[p + 1..]);
                Ok(out)
            }
            Opcode::SwapFront => swap_positions(&chars, 0, 1),
            Opcode::SwapBack => {
                if n < 2 {
                    return Err(oob(1, n));
                }
                swap_positions(&chars, n - 2, n - 1)
            }
            Opcode::SwapAt => {
                let a = self.pos(args, 0)?;
                let b = self.pos(args, 1)?;
                swap_positions(&chars, a, b)
            }
        }
    }

    /// Fetch a decoded positional argument; fails on slot mismatch.
    fn pos(self, args: &[Arg], idx: usize) -> Result<usize, EvalError> {
        match args.get(idx) {
            Some(Arg::Pos(v)) => Ok(*v),
            _ => Err(EvalError::MalformedAction { opcode: self.to_char() }),
        }
    }

    /// Fetch a literal character argument; fails on slot mismatch.
    fn ch(self, args: &[Arg], idx: usize) -> Result<char, EvalError> {
        match args.get(idx) {
            Some(Arg::Char(c)) => Ok(*c),
            _ => Err(EvalError::MalformedAction { opcode: self.to_char() }),
        }
    }

    /// Replace the character at the action's position with the result of
    /// code-point arithmetic `op`. Shared by `L`/`R`/`+`/`-`.
    fn with_code_at(self, chars: &[char], args: &[Arg], op: fn(u32) -> Option<u32>) -> Result<String, EvalError> {
        let p = self.pos(args, 0)?;
        let n = chars.len();
        if p >= n {
            return Err(oob(p, n));
        }
        let replaced = op(chars[p] as u32)
            .and_then(char::from_u32)
            .ok_or(EvalError::InvalidCodePoint { index: p })?;
        let mut out: String = chars[..p].iter().collect();
        out.push(replaced);
        out.extend(&chars[p + 1..]);
        Ok(out)
    }
}

fn oob(index: usize, len: usize) -> EvalError {
    EvalError::IndexOutOfRange { index, len }
}

/// Case-toggle one character (multi-char foldings expand in place).
fn toggled(c: char) -> Vec<char> {
    if c.is_uppercase() {
        c.to_lowercase().collect()
    } else if c.is_lowercase() {
        c.to_uppercase().collect()
    } else {
        vec![c]
    }
}

/// Swap the characters at `a` and `b`; argument order does not matter and
/// equal positions are a no-op.
fn swap_positions(chars: &[char], a: usize, b: usize) -> Result<String, EvalError> {
    let n = chars.len();
    if a >= n {
        return Err(oob(a, n));
    }
    if b >= n {
        return Err(oob(b, n));
    }
    let mut out: Vec<char> = chars.to_vec();
    out.swap(a, b);
    Ok(out.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(rule_text: &str, subject: &str) -> Result<String, EvalError> {
        let rule = crate::parse_rule(rule_text).expect("test rule must parse");
        crate::apply_rule(subject, &rule)
    }

    #[test]
    fn transform_examples_matching() {
        // Array of (expected_output, rule_text, subject)
        let cases: Vec<(&str, &str, &str)> = vec![
            ("Password1", ":", "Password1"),
            ("password1", "l", "Password1"),
            ("PASSWORD1", "u", "Password1"),
            ("Password", "c", "pASSWORD"),
            ("pASSWORD", "C", "Password"),
            ("pASSWORD1", "t", "Password1"),
            ("PAssword", "T1", "Password"),
            ("Hello World", "E", "hello world"),
            ("1drowssaP", "r", "Password1"),
            ("assword1P", "{", "Password1"),
            ("1Password", "}", "Password1"),
            ("catcat", "d", "cat"),
            ("cattac", "f", "cat"),
            ("ccaatt", "q", "cat"),
            ("catcatcat", "p3", "cat"),
            ("", "p0", "cat"),
            ("cccat", "z2", "cat"),
            ("cattt", "Z2", "cat"),
            ("cacat", "y2", "cat"),
            ("catcat", "y9", "cat"),
            ("catat", "Y2", "cat"),
            ("catcat", "Y0", "cat"),
            ("at", "[", "cat"),
            ("ca", "]", "cat"),
            ("", "[", ""),
            ("", "]", ""),
            ("hllo", "D1", "hello"),
            ("he", "'2", "hello"),
            ("hello", "'5", "hello"),
            ("ho", "O13", "hello"),
            ("bcd", "x13", "abcdef"),
            ("heo", "@l", "hello"),
            ("cats", "$s", "cat"),
            ("scat", "^s", "cat"),
            ("cart", "i2r", "cat"),
            ("car", "o2r", "cat"),
            ("h3llo", "se3", "hello"),
            ("p@ssword", "sa@", "password"),
            // 'b' (0x62) << 1 = 0xc4 'Ä', 'b' >> 1 = 0x31 '1'
            ("aÄc", "L1", "abc"),
            ("a1c", "R1", "abc"),
            ("abd", "+2", "abc"),
            ("abb", "-2", "abc"),
            ("acc", ".1", "abc"),
            ("aac", ",1", "abc"),
            ("bacd", "k", "abcd"),
            ("abdc", "K", "abcd"),
            ("adcbe", "*13", "abcde"),
            ("adcbe", "*31", "abcde"),
            ("abcde", "*22", "abcde"),
            // Chained actions fold left to right.
            ("Pass1", "c $1", "pass"),
            ("PASS123", "u $1 $2 $3", "pass"),
        ];

        for (expected, rule_text, subject) in cases {
            match apply(rule_text, subject) {
                Ok(got) => assert_eq!(got, expected, "rule {rule_text:?} on {subject:?}"),
                Err(err) => panic!("rule {rule_text:?} on {subject:?} failed: {err}"),
            }
        }
    }

    #[test]
    fn out_of_range_positions_are_errors() {
        let cases: Vec<(&str, &str)> = vec![
            ("T5", "cat"),
            ("D3", "cat"),
            ("'4", "cat"),
            ("O22", "cat"),
            ("x23", "cat"),
            ("i4x", "cat"),
            ("o3x", "cat"),
            ("L3", "cat"),
            ("+3", "cat"),
            (".2", "cat"), // right neighbor of the last char
            (",0", "cat"), // left neighbor of the first char
            (",3", "cat"),
            ("*03", "cat"),
            ("C", ""),
            ("{", ""),
            ("}", ""),
            ("z1", ""),
            ("Z1", ""),
            ("k", "a"),
            ("K", "a"),
        ];

        for (rule_text, subject) in cases {
            let result = apply(rule_text, subject);
            assert!(
                matches!(result, Err(EvalError::IndexOutOfRange { .. })),
                "rule {rule_text:?} on {subject:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn decrement_at_code_point_zero_is_invalid() {
        let rule = crate::parse_rule("-0").unwrap();
        let result = crate::apply_rule("\u{0}ab", &rule);
        assert_eq!(result, Err(EvalError::InvalidCodePoint { index: 0 }));
    }

    #[test]
    fn digit_alphabet_round_trips() {
        for value in 0..36 {
            let symbol = encode_digit(value).unwrap();
            assert_eq!(decode_digit(symbol), Some(value));
        }
        assert_eq!(encode_digit(36), None);
        assert_eq!(decode_digit('a'), None);
        assert_eq!(decode_digit(' '), None);
    }

    #[test]
    fn arity_matches_argument_slots() {
        for c in [':', 'l', 'r', '{', '}', 'k', 'K'] {
            assert_eq!(Opcode::from_char(c).unwrap().arity(), 0);
        }
        for c in ['T', 'p', 'z', 'Z', 'y', 'Y', 'D', '\'', '@', '$', '^', 'L', 'R', '+', '-', '.', ','] {
            assert_eq!(Opcode::from_char(c).unwrap().arity(), 1);
        }
        for c in ['O', 'x', 'i', 'o', 's', '*'] {
            assert_eq!(Opcode::from_char(c).unwrap().arity(), 2);
        }
    }

    #[test]
    fn char_round_trips_over_catalog() {
        let catalog = ":lucCtTErd{}fqpzZyY[]D'Ox@$^iosLR+-.,kK*";
        assert_eq!(catalog.chars().count(), 40);
        for c in catalog.chars() {
            let op = Opcode::from_char(c).unwrap();
            assert_eq!(op.to_char(), c);
        }
        assert_eq!(Opcode::from_char('!'), None);
        assert_eq!(Opcode::from_char('a'), None);
    }
}
