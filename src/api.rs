use std::collections::HashSet;
use std::path::Path;

use crate::error::{EvalError, ExportError, FormatError, LiteralError, LoadError, ParseError};
use crate::{Rule, WriteMode, engine, export, format, literal, loader};

/// Parse one rule line into a [`Rule`].
///
/// The line must already be trimmed; comment and blank filtering belong to
/// [`load_rules`]. An empty line parses to the empty rule.
///
/// # Example
/// ```
/// use mangler::parse_rule;
///
/// let rule = parse_rule("c $1").unwrap();
/// assert_eq!(rule.actions().len(), 2);
/// ```
pub fn parse_rule(text: &str) -> Result<Rule, ParseError> {
    engine::parse_rule(text)
}

/// Apply one rule to a subject, producing the transformed string.
///
/// Evaluation errors (out-of-range positions, invalid code points) propagate
/// to the caller; there is no batch here to protect.
///
/// # Example
/// ```
/// use mangler::{apply_rule, parse_rule};
///
/// let rule = parse_rule("l $1").unwrap();
/// assert_eq!(apply_rule("Password", &rule).unwrap(), "password1");
/// ```
pub fn apply_rule(subject: &str, rule: &Rule) -> Result<String, EvalError> {
    engine::apply_rule(subject, rule)
}

/// Apply every rule independently to `subject` and collect the distinct
/// successful outputs.
///
/// Rules whose application fails are dropped silently; duplicate outputs
/// collapse to one set member. Use [`apply_rule`] when per-rule provenance
/// or failure visibility matters.
///
/// # Example
/// ```
/// use mangler::{apply_rules, parse_rule};
///
/// let rules = vec![parse_rule("u").unwrap(), parse_rule("c $1").unwrap()];
/// let candidates = apply_rules("pass", &rules);
/// assert!(candidates.contains("PASS"));
/// assert!(candidates.contains("Pass1"));
/// ```
pub fn apply_rules(subject: &str, rules: &[Rule]) -> HashSet<String> {
    engine::apply_rules(subject, rules)
}

/// Parse a rule line and apply it to `subject` in one step.
///
/// Convenience for one-off use; parse the rule once with [`parse_rule`] and
/// reuse it when applying to many subjects.
pub fn mangle(subject: &str, rule_text: &str) -> Result<String, MangleError> {
    let rule = engine::parse_rule(rule_text)?;
    Ok(engine::apply_rule(subject, &rule)?)
}

/// Error from [`mangle`]: either side of the parse-then-apply pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MangleError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Render a rule back to its canonical one-line text form.
///
/// Exact inverse of [`parse_rule`]: `parse_rule(&format_rule(r)?) == r` for
/// every rule whose positions fit the digit alphabet (parser-built rules
/// always do).
pub fn format_rule(rule: &Rule) -> Result<String, FormatError> {
    format::format_rule(rule)
}

/// Load and parse every rule in the file at `path`.
///
/// `#`-comment lines and blank lines are skipped; any other unparseable line
/// is fatal to the load and reported with its line number.
pub fn load_rules(path: impl AsRef<Path>) -> Result<Vec<Rule>, LoadError> {
    loader::load_rules(path.as_ref())
}

/// Parse an in-memory sequence of rule-file lines, with the same filtering
/// as [`load_rules`].
pub fn parse_rule_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Vec<Rule>, LoadError> {
    loader::parse_rule_lines(lines)
}

/// Convert literal-encoded ordered-rule lines (one `[('X', [args]), ..]`
/// list per line) into parsed [`Rule`]s.
pub fn convert_literal_rules(text: &str) -> Result<Vec<Rule>, LiteralError> {
    literal::convert_literal_rules(text)
}

/// Write `rules` to `path` in canonical text form, one per line, creating
/// parent directories as needed. Returns the number of lines written.
pub fn export_rules(rules: &[Rule], path: impl AsRef<Path>, mode: WriteMode) -> Result<usize, ExportError> {
    export::export_rules(rules, path.as_ref(), mode)
}
