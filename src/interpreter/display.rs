/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      display.rs
 * Purpose:   Text rendering of runtime values for print and diagnostics.
 * 
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * 
 * License:
 * This file is part of the MazeScript project.
 * 
 * MazeScript is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */

use crate::value::Value;

/// ============================================================================
/// value_to_string
/// ============================================================================
/// Converts a MazeScript runtime `Value` into the text `print` writes.
///
/// Arrays nested `max_depth` levels deep are elided as `...`, which also
/// keeps self-containing arrays finite.
///
/// Examples:
///   - Integer(-3)           → "-3"
///   - Array([1, [2]])       → "[1, [2]]"
///   - Closure with (a, b)   → "fn (a, b) { ... }"
///   - Builtin               → "{ builtin function }"
/// ============================================================================
pub fn value_to_string(value: &Value, max_depth: usize) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0, max_depth);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize, max_depth: usize) {
    match value {
        Value::Integer(n) => out.push_str(&n.to_string()),

        Value::Closure(closure) => {
            out.push_str("fn (");
            out.push_str(&closure.lambda.params.join(", "));
            out.push_str(") { ... }");
        }

        Value::Builtin(_) => out.push_str("{ builtin function }"),

        Value::Array(_) if depth >= max_depth => out.push_str("..."),

        Value::Array(values) => {
            out.push('[');
            for (i, element) in values.borrow().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, element, depth + 1, max_depth);
            }
            out.push(']');
        }
    }
}
