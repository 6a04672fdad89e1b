// CProbe
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Property tests for the invariants every pass must hold on arbitrary input

use cprobe_analysis::{IrEmitter, IrInstruction, SymbolRecord, build_symbol_table, optimize, scan};
use proptest::prelude::*;
use std::collections::HashSet;

/// Top-level item of a generated program
#[derive(Debug, Clone)]
enum Item {
    Global(String),
    Function(String, Vec<String>),
}

fn variable_name() -> impl Strategy<Value = String> {
    "v_[a-z0-9]{1,6}"
}

fn item() -> impl Strategy<Value = Item> {
    prop_oneof![
        variable_name().prop_map(Item::Global),
        ("f_[a-z0-9]{1,6}", prop::collection::vec(variable_name(), 0..4)).prop_map(|(name, body)| Item::Function(name, body)),
    ]
}

fn render(items: &[Item]) -> String {
    let mut lines = Vec::new();
    for item in items {
        match item {
            Item::Global(name) => lines.push(format!("int {name} = 1;")),
            Item::Function(name, body) => {
                lines.push(format!("int {name}() {{"));
                lines.extend(body.iter().map(|var| format!("    char {var};")));
                lines.push("}".to_string());
            }
        }
    }
    lines.join("\n")
}

/// Lines that contain at most one rewrite opportunity each
fn simple_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "x[a-z]{0,3}".prop_map(|n| format!("{n} = {n} + 0;")),
        "x[a-z]{0,3}".prop_map(|n| format!("{n} = {n} * 1;")),
        "x[a-z]{0,3}".prop_map(|n| format!("{n} = {n} * 2;")),
        "x[a-z]{0,3}".prop_map(|n| format!("{n} = {n} / 2;")),
        (0u32..1000, prop::sample::select(vec!['+', '-', '*', '/']), 0u32..1000).prop_map(|(a, op, b)| format!("{a} {op} {b};")),
        ("x[a-z]{0,3}", "x[a-z]{0,3}").prop_map(|(a, b)| format!("{a} = {b};")),
    ]
}

proptest! {
    #[test]
    fn test_scanner_never_repeats_a_token(text in "\\PC{0,200}") {
        let tokens = scan(&text);
        let unique: HashSet<_> = tokens.iter().collect();
        prop_assert_eq!(unique.len(), tokens.len());
    }

    #[test]
    fn test_ir_instructions_come_in_pairs(text in "[a-z0-9 =+*;\\n]{0,120}") {
        let instructions = IrEmitter::new().emit(&text);
        prop_assert_eq!(instructions.len() % 2, 0);

        let mut previous = 0;
        for pair in instructions.chunks(2) {
            match pair {
                [IrInstruction::Compute { temp: computed, .. }, IrInstruction::Assign { temp: assigned, .. }] => {
                    prop_assert_eq!(computed, assigned);
                    prop_assert!(*computed > previous);
                    previous = *computed;
                }
                other => prop_assert!(false, "unpaired instructions: {:?}", other),
            }
        }
    }

    #[test]
    fn test_variable_scope_follows_enclosing_function(items in prop::collection::vec(item(), 0..8)) {
        let records = build_symbol_table(&render(&items));

        let mut expected = Vec::new();
        for item in &items {
            match item {
                Item::Global(name) => expected.push((name.clone(), "global".to_string())),
                Item::Function(name, body) => {
                    expected.push((name.clone(), "global".to_string()));
                    expected.extend(body.iter().map(|var| (var.clone(), name.clone())));
                }
            }
        }

        let actual: Vec<_> = records.iter().map(|r| (r.name().to_string(), r.scope().to_string())).collect();
        prop_assert_eq!(actual, expected);
        prop_assert!(records.iter().filter_map(SymbolRecord::as_function).all(|f| f.scope == "global"));
    }

    #[test]
    fn test_optimizer_reaches_fixed_point(lines in prop::collection::vec(simple_line(), 1..10)) {
        let once = optimize(&lines.join("\n"));
        prop_assert_eq!(optimize(&once), once.clone());
    }
}
