use std::collections::HashSet;
use std::path::PathBuf;

use proptest::prelude::*;

use crate::error::{EvalError, LoadError, ParseError};
use crate::opcode::ArgKind;
use crate::{
    Action, Arg, Opcode, Rule, WriteMode, apply_rule, apply_rules, export_rules, format_rule, load_rules, parse_rule,
    parse_rule_lines,
};

const CATALOG: &str = ":lucCtTErd{}fqpzZyY[]D'Ox@$^iosLR+-.,kK*";

// --- Parser -----------------------------------------------------------------

#[test]
fn parses_positional_and_literal_arguments() {
    let rule = parse_rule("D1").unwrap();
    assert_eq!(rule.actions(), &[Action { opcode: Opcode::DeleteAt, args: vec![Arg::Pos(1)] }]);

    let rule = parse_rule("i2r").unwrap();
    assert_eq!(rule.actions(), &[Action { opcode: Opcode::InsertAt, args: vec![Arg::Pos(2), Arg::Char('r')] }]);

    let rule = parse_rule("sa@").unwrap();
    assert_eq!(rule.actions(), &[Action { opcode: Opcode::Replace, args: vec![Arg::Char('a'), Arg::Char('@')] }]);

    // Letter digits decode through the base-36 alphabet.
    let rule = parse_rule("TA").unwrap();
    assert_eq!(rule.actions(), &[Action { opcode: Opcode::ToggleAt, args: vec![Arg::Pos(10)] }]);

    let rule = parse_rule("*45").unwrap();
    assert_eq!(rule.actions(), &[Action { opcode: Opcode::SwapAt, args: vec![Arg::Pos(4), Arg::Pos(5)] }]);
}

#[test]
fn parses_multi_action_rules_with_single_space_separators() {
    let rule = parse_rule("c $1 $2 $3").unwrap();
    let opcodes: Vec<char> = rule.actions().iter().map(|a| a.opcode.to_char()).collect();
    assert_eq!(opcodes, vec!['c', '$', '$', '$']);
}

#[test]
fn empty_line_parses_to_the_empty_rule() {
    let rule = parse_rule("").unwrap();
    assert!(rule.is_empty());
    assert_eq!(apply_rule("anything", &rule).unwrap(), "anything");
}

#[test]
fn unknown_opcode_is_a_parse_error() {
    assert_eq!(
        parse_rule("!"),
        Err(ParseError::UnknownOpcode { line: "!".to_string(), opcode: '!', offset: 0 })
    );
    // The offset points at the offending character, not the rule start.
    assert_eq!(
        parse_rule("l !"),
        Err(ParseError::UnknownOpcode { line: "l !".to_string(), opcode: '!', offset: 2 })
    );
}

#[test]
fn trailing_opcode_without_arguments_underflows() {
    assert_eq!(
        parse_rule("D"),
        Err(ParseError::ArgumentUnderflow { line: "D".to_string(), opcode: 'D', expected: 1, found: 0 })
    );
    assert_eq!(
        parse_rule("x1"),
        Err(ParseError::ArgumentUnderflow { line: "x1".to_string(), opcode: 'x', expected: 2, found: 1 })
    );
}

#[test]
fn out_of_alphabet_digit_is_a_parse_error() {
    assert_eq!(
        parse_rule("Dz"),
        Err(ParseError::InvalidDigit { line: "Dz".to_string(), opcode: 'D', digit: 'z', offset: 1 })
    );
    assert_eq!(
        parse_rule("T "),
        Err(ParseError::InvalidDigit { line: "T ".to_string(), opcode: 'T', digit: ' ', offset: 1 })
    );
}

// --- Evaluator --------------------------------------------------------------

#[test]
fn apply_folds_actions_left_to_right() {
    let rule = parse_rule("l $1 c").unwrap();
    assert_eq!(apply_rule("PASS", &rule).unwrap(), "Pass1");
}

#[test]
fn apply_has_no_partial_results() {
    // The second action fails; the first one's output must not leak.
    let rule = parse_rule("u D9").unwrap();
    assert_eq!(apply_rule("pass", &rule), Err(EvalError::IndexOutOfRange { index: 9, len: 4 }));
}

#[test]
fn bulk_application_drops_failures_and_deduplicates() {
    let lines = ["c $1", "u", "l u", "D9", ",0"];
    let rules: Vec<Rule> = lines.iter().map(|l| parse_rule(l).unwrap()).collect();
    let out = apply_rules("pass", &rules);
    assert_eq!(out, HashSet::from(["Pass1".to_string(), "PASS".to_string()]));
}

#[test]
fn bulk_application_uses_the_original_subject_for_every_rule() {
    let rules = vec![parse_rule("$1").unwrap(), parse_rule("$2").unwrap()];
    let out = apply_rules("pass", &rules);
    // Not chained: "pass12" must not appear.
    assert_eq!(out, HashSet::from(["pass1".to_string(), "pass2".to_string()]));
}

#[test]
fn swap_is_symmetric_and_noop_on_equal_positions() {
    let subject = "abcdef";
    let len = subject.chars().count();
    for i in 0..len {
        for j in 0..len {
            let ij = Rule::new(vec![Action { opcode: Opcode::SwapAt, args: vec![Arg::Pos(i), Arg::Pos(j)] }]);
            let ji = Rule::new(vec![Action { opcode: Opcode::SwapAt, args: vec![Arg::Pos(j), Arg::Pos(i)] }]);
            let out_ij = apply_rule(subject, &ij).unwrap();
            let out_ji = apply_rule(subject, &ji).unwrap();
            assert_eq!(out_ij, out_ji, "swap {i}<->{j}");
            if i == j {
                assert_eq!(out_ij, subject, "equal-position swap must be a no-op");
            }
        }
    }
}

// --- Loader and export ------------------------------------------------------

#[test]
fn loader_filters_comments_and_blank_lines() {
    let lines = ["# best64 excerpt", "", "c $1", "   ", "u"];
    // "   " is not blank after filtering; it must fail, naming line 4.
    let err = parse_rule_lines(lines).unwrap_err();
    match err {
        LoadError::Parse { line, source } => {
            assert_eq!(line, 4);
            assert!(matches!(source, ParseError::UnknownOpcode { opcode: ' ', .. }));
        }
        other => panic!("expected parse error, got {other:?}"),
    }

    let rules = parse_rule_lines(["# comment", "", "c $1", "u"]).unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(format_rule(&rules[0]).unwrap(), "c $1");
    assert_eq!(format_rule(&rules[1]).unwrap(), "u");
}

#[test]
fn loader_strips_carriage_returns() {
    let rules = parse_rule_lines(["l\r", "# skipped\r", "\r"]).unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(format_rule(&rules[0]).unwrap(), "l");
}

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mangler-test-{}-{name}", std::process::id()))
}

#[test]
fn export_writes_one_rule_per_line_and_creates_directories() {
    let dir = scratch_dir("export");
    let path = dir.join("nested").join("rules.txt");
    let rules: Vec<Rule> = ["c $1", "u", "se3"].iter().map(|l| parse_rule(l).unwrap()).collect();

    let written = export_rules(&rules, &path, WriteMode::Overwrite).unwrap();
    assert_eq!(written, 3);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "c $1\nu\nse3\n");

    // Append extends; overwrite replaces.
    export_rules(&rules[..1], &path, WriteMode::Append).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "c $1\nu\nse3\nc $1\n");
    export_rules(&rules[..1], &path, WriteMode::Overwrite).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "c $1\n");

    let reloaded = load_rules(&path).unwrap();
    assert_eq!(reloaded, &rules[..1]);

    let _ = std::fs::remove_dir_all(&dir);
}

// --- Properties -------------------------------------------------------------

fn arb_action() -> impl Strategy<Value = Action> {
    let opcodes: Vec<Opcode> = CATALOG.chars().map(|c| Opcode::from_char(c).unwrap()).collect();
    prop::sample::select(opcodes).prop_flat_map(|opcode| {
        let slots: Vec<BoxedStrategy<Arg>> = opcode
            .arg_kinds()
            .iter()
            .map(|kind| match kind {
                ArgKind::Pos => (0usize..36).prop_map(Arg::Pos).boxed(),
                ArgKind::Char => prop::char::range(' ', '~').prop_map(Arg::Char).boxed(),
            })
            .collect();
        slots.prop_map(move |args| Action { opcode, args })
    })
}

fn arb_rule() -> impl Strategy<Value = Rule> {
    prop::collection::vec(arb_action(), 0..6).prop_map(Rule::new)
}

proptest! {
    #[test]
    fn format_then_parse_round_trips(rule in arb_rule()) {
        let text = format_rule(&rule).unwrap();
        prop_assert_eq!(parse_rule(&text).unwrap(), rule);
    }

    #[test]
    fn noop_returns_any_subject_unchanged(subject in ".*") {
        let rule = parse_rule(":").unwrap();
        prop_assert_eq!(apply_rule(&subject, &rule).unwrap(), subject);
    }

    #[test]
    fn lowercase_and_uppercase_are_idempotent(subject in ".*") {
        for text in ["l", "u"] {
            let rule = parse_rule(text).unwrap();
            let once = apply_rule(&subject, &rule).unwrap();
            let twice = apply_rule(&once, &rule).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn reverse_of_reverse_is_identity(subject in ".*") {
        let rule = parse_rule("r").unwrap();
        let back = apply_rule(&apply_rule(&subject, &rule).unwrap(), &rule).unwrap();
        prop_assert_eq!(back, subject);
    }

    #[test]
    fn rotate_left_then_right_is_identity(subject in ".+") {
        let left = parse_rule("{").unwrap();
        let right = parse_rule("}").unwrap();
        let rotated = apply_rule(&subject, &left).unwrap();
        prop_assert_eq!(apply_rule(&rotated, &right).unwrap(), subject);
    }
}
