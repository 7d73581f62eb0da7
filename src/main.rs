use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use mangler::{Rule, WriteMode, apply_rules, convert_literal_rules, export_rules, load_rules};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> Result<(), String> {
    let rules = if config.literal {
        let text = std::fs::read_to_string(&config.rules)
            .map_err(|err| format!("failed to read {}: {err}", config.rules.display()))?;
        convert_literal_rules(&text).map_err(|err| err.to_string())?
    } else {
        load_rules(&config.rules).map_err(|err| err.to_string())?
    };

    if let Some(path) = &config.export {
        let mode = if config.append { WriteMode::Append } else { WriteMode::Overwrite };
        let written = export_rules(&rules, path, mode).map_err(|err| err.to_string())?;
        eprintln!("wrote {written} rules to {}", path.display());
    }

    let words = match &config.words {
        Some(words) => words.clone(),
        None => read_stdin_words()?,
    };

    for word in &words {
        print_candidates(word, &rules);
    }
    Ok(())
}

fn print_candidates(word: &str, rules: &[Rule]) {
    // Deterministic output order for scripting; the underlying set is
    // unordered.
    let mut candidates: Vec<String> = apply_rules(word, rules).into_iter().collect();
    candidates.sort_unstable();
    for candidate in candidates {
        println!("{candidate}");
    }
}

struct CliConfig {
    rules: PathBuf,
    literal: bool,
    export: Option<PathBuf>,
    append: bool,
    words: Option<Vec<String>>,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut rules: Option<PathBuf> = None;
    let mut literal = false;
    let mut export: Option<PathBuf> = None;
    let mut append = false;
    let mut words: Vec<String> = Vec::new();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("mangler {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--literal" => literal = true,
            "--append" => append = true,
            "-r" | "--rules" => {
                let value = args.next().ok_or_else(|| "error: --rules expects a value".to_string())?;
                if rules.is_some() {
                    return Err("error: --rules provided multiple times".to_string());
                }
                rules = Some(PathBuf::from(value));
            }
            "--export" => {
                let value = args.next().ok_or_else(|| "error: --export expects a value".to_string())?;
                export = Some(PathBuf::from(value));
            }
            "--" => {
                words.extend(args);
                break;
            }
            _ if arg.starts_with("--rules=") => {
                if rules.is_some() {
                    return Err("error: --rules provided multiple times".to_string());
                }
                rules = Some(PathBuf::from(arg.trim_start_matches("--rules=")));
            }
            _ if arg.starts_with("--export=") => {
                export = Some(PathBuf::from(arg.trim_start_matches("--export=")));
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => words.push(arg),
        }
    }

    let rules = rules.ok_or_else(|| format!("error: --rules is required\n\n{}", help_text()))?;
    if append && export.is_none() {
        return Err("error: --append requires --export".to_string());
    }

    // No positional words and no export: read words from stdin, but only
    // when something is actually piped in.
    let words = if words.is_empty() {
        if export.is_none() && io::stdin().is_terminal() {
            return Err(format!("error: no input words provided\n\n{}", help_text()));
        }
        None
    } else {
        Some(words)
    };

    Ok(CliConfig { rules, literal, export, append, words })
}

fn read_stdin_words() -> Result<Vec<String>, String> {
    if io::stdin().is_terminal() {
        return Ok(Vec::new());
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("failed to read stdin: {err}"))?;
    Ok(buffer.lines().filter(|line| !line.is_empty()).map(str::to_string).collect())
}

fn help_text() -> String {
    format!(
        "mangler {version}

Hashcat-style word-mangling rule engine CLI.

Usage:
  mangler --rules <file> [OPTIONS] [--] <word...>
  mangler --rules <file> [OPTIONS] < words.txt

Options:
  -r, --rules <file>   Rule file, one rule per line ('#' comments allowed).
  --literal            Treat the rule file as literal-encoded action lists,
                       e.g. [('c', []), ('$', ['1'])].
  --export <path>      Re-export the loaded rules in canonical text form.
  --append             Append to the export file instead of overwriting.
  -h, --help           Show this help message.
  -V, --version        Print version information.

Each input word is run through every rule; the distinct candidates are
printed one per line, sorted. Rules that fail on a word are skipped.

Exit codes:
  0  Success.
  1  Load, conversion, or export error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
