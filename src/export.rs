//! Bulk export: write formatted rules one per line to a destination file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::format::format_rule;
use crate::Rule;

/// Whether [`export_rules`] replaces or extends an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Overwrite,
    Append,
}

/// Write `rules` to `path` in canonical text form, one rule per line.
///
/// Intermediate directories are created as needed. Returns the number of
/// lines written.
pub(crate) fn export_rules(rules: &[Rule], path: &Path, mode: WriteMode) -> Result<usize, ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = match mode {
        WriteMode::Overwrite => OpenOptions::new().write(true).create(true).truncate(true).open(path)?,
        WriteMode::Append => OpenOptions::new().append(true).create(true).open(path)?,
    };

    let mut count = 0;
    for rule in rules {
        let line = format_rule(rule)?;
        writeln!(file, "{line}")?;
        count += 1;
    }
    Ok(count)
}
