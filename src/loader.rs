//! Rule-file loading.
//!
//! A rule file is one rule per line; lines starting with `#` are comments
//! and blank lines are padding — both are filtered out here before the
//! parser ever sees them. Loading order is preserved. Any surviving line
//! that fails to parse is fatal to the whole load, reported with its
//! 1-based line number.

use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::{Rule, engine};

/// Load and parse every rule in the file at `path`.
pub(crate) fn load_rules(path: &Path) -> Result<Vec<Rule>, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_rule_lines(text.lines())
}

/// Parse an in-memory sequence of rule-file lines.
///
/// Applies the same comment/blank filtering as [`load_rules`]; line numbers
/// in errors count all input lines, filtered ones included.
pub(crate) fn parse_rule_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Vec<Rule>, LoadError> {
    let debug = std::env::var_os("MANGLER_DEBUG_RULES").is_some();
    let mut rules = Vec::new();

    for (idx, raw) in lines.into_iter().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let rule =
            engine::parse_rule(line).map_err(|source| LoadError::Parse { line: idx + 1, source })?;
        if debug {
            eprintln!("[loader:parsed] line={} actions={} text=\"{line}\"", idx + 1, rule.actions().len());
        }
        rules.push(rule);
    }

    Ok(rules)
}
