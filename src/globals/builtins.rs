/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      builtins.rs
 * Purpose:   Language builtins declared in every global frame.
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

use crate::config::Config;
use crate::error::{ScriptError, ScriptResult};
use crate::interpreter::display::value_to_string;
use crate::interpreter::environment::EnvRef;
use crate::interpreter::OutputLog;
use crate::value::Value;

/// Declares every language builtin into `env`.
///
/// | name      | arity    | result                              |
/// |-----------|----------|-------------------------------------|
/// | `true`    |          | `1`                                 |
/// | `false`   |          | `0`                                 |
/// | `panic`   | variadic | always fails                        |
/// | `print`   | variadic | appends one line to the output log  |
/// | `len`     | 1        | array length                        |
/// | `push`    | 2        | appends to an array                 |
/// | `pop`     | 1        | removes and returns the last element|
/// | `is_int`  | 1        | `1` for integers                    |
/// | `is_arr`  | 1        | `1` for arrays                      |
/// | `is_fun`  | 1        | `1` for closures and builtins       |
pub fn install(env: &EnvRef, config: &Config, output: &OutputLog) -> ScriptResult<()> {
    let mut env = env.borrow_mut();

    env.declare("true", Value::Integer(1))?;
    env.declare("false", Value::Integer(0))?;

    let print_depth = config.print_depth;
    env.declare(
        "panic",
        Value::builtin("panic", None, move |args| {
            Err(panic_error(&args, print_depth))
        }),
    )?;

    let log = output.clone();
    env.declare(
        "print",
        Value::builtin("print", None, move |args| {
            log.push(join_args(&args, print_depth));
            Ok(None)
        }),
    )?;

    env.declare("len", Value::builtin("len", Some(1), builtin_len))?;
    env.declare("push", Value::builtin("push", Some(2), builtin_push))?;
    env.declare("pop", Value::builtin("pop", Some(1), builtin_pop))?;

    env.declare(
        "is_int",
        Value::builtin("is_int", Some(1), |args| {
            Ok(Some(Value::from_bool(matches!(args[0], Value::Integer(_)))))
        }),
    )?;
    env.declare(
        "is_arr",
        Value::builtin("is_arr", Some(1), |args| {
            Ok(Some(Value::from_bool(matches!(args[0], Value::Array(_)))))
        }),
    )?;
    env.declare(
        "is_fun",
        Value::builtin("is_fun", Some(1), |args| {
            Ok(Some(Value::from_bool(args[0].is_function())))
        }),
    )?;

    Ok(())
}

/// Arguments rendered and joined by single spaces.
fn join_args(args: &[Value], print_depth: usize) -> String {
    args.iter()
        .map(|arg| value_to_string(arg, print_depth))
        .collect::<Vec<_>>()
        .join(" ")
}

fn panic_error(args: &[Value], print_depth: usize) -> ScriptError {
    if args.is_empty() {
        ScriptError::panic("Program panicked.")
    } else {
        ScriptError::panic(format!("Program panicked: {}", join_args(args, print_depth)))
    }
}

fn invalid_type(value: &Value, function: &str) -> ScriptError {
    ScriptError::type_error(format!(
        "Invalid type '{}' in {} function.",
        value.type_name(),
        function
    ))
}

/// `len(array)`
fn builtin_len(args: Vec<Value>) -> ScriptResult<Option<Value>> {
    match &args[0] {
        Value::Array(values) => {
            let len = i64::try_from(values.borrow().len())
                .map_err(|_| ScriptError::range_error("Array length exceeds integer range."))?;
            Ok(Some(Value::Integer(len)))
        }
        other => Err(invalid_type(other, "length")),
    }
}

/// `push(array, value)`
fn builtin_push(mut args: Vec<Value>) -> ScriptResult<Option<Value>> {
    let value = args.pop();
    match (&args[0], value) {
        (Value::Array(values), Some(value)) => {
            values.borrow_mut().push(value);
            Ok(None)
        }
        (other, _) => Err(invalid_type(other, "push")),
    }
}

/// `pop(array)`
fn builtin_pop(args: Vec<Value>) -> ScriptResult<Option<Value>> {
    match &args[0] {
        Value::Array(values) => values
            .borrow_mut()
            .pop()
            .map(Some)
            .ok_or_else(|| ScriptError::range_error("Cannot pop from an empty array.")),
        other => Err(invalid_type(other, "pop")),
    }
}
