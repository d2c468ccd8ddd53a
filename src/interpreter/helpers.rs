/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      helpers.rs
 * Purpose:   Integer arithmetic and shared runtime checks.
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

use crate::ast::BinaryOp;
use crate::error::{ScriptError, ScriptResult};
use crate::value::Value;

/// Enforces an exact argument count.
pub fn check_arity(expected: usize, given: usize) -> ScriptResult<()> {
    if given > expected {
        Err(ScriptError::type_error("Too many arguments in function call."))
    } else if given < expected {
        Err(ScriptError::type_error("Too few arguments in function call."))
    } else {
        Ok(())
    }
}

/// `Invalid types 'integer', 'array' in binary operator '<'.`
pub fn binary_type_error(op: BinaryOp, left: &Value, right: &Value) -> ScriptError {
    ScriptError::type_error(format!(
        "Invalid types '{}', '{}' in binary operator '{}'.",
        left.type_name(),
        right.type_name(),
        op
    ))
}

fn overflow(op: impl std::fmt::Display) -> ScriptError {
    ScriptError::range_error(format!("Integer overflow in operator '{}'.", op))
}

/// Integer `+ - * / %` with overflow and zero-divisor checks.
///
/// `/` floors toward negative infinity and `%` takes the sign of the
/// divisor, so `a == b * (a / b) + a % b` for every non-zero `b`.
pub fn arithmetic(op: BinaryOp, a: i64, b: i64) -> ScriptResult<i64> {
    match op {
        BinaryOp::Add => a.checked_add(b).ok_or_else(|| overflow(op)),
        BinaryOp::Subtract => a.checked_sub(b).ok_or_else(|| overflow(op)),
        BinaryOp::Multiply => a.checked_mul(b).ok_or_else(|| overflow(op)),
        BinaryOp::Divide => floor_div(a, b),
        BinaryOp::Modulo => floor_mod(a, b),
        _ => Err(ScriptError::type_error(format!(
            "Invalid arithmetic operator '{}'.",
            op
        ))),
    }
}

pub fn floor_div(a: i64, b: i64) -> ScriptResult<i64> {
    if b == 0 {
        return Err(ScriptError::range_error("Division by zero."));
    }

    let q = a.checked_div(b).ok_or_else(|| overflow(BinaryOp::Divide))?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

pub fn floor_mod(a: i64, b: i64) -> ScriptResult<i64> {
    if b == 0 {
        return Err(ScriptError::range_error("Modulo by zero."));
    }

    // i64::MIN % -1 is 0 but overflows with `%`.
    let r = a.wrapping_rem(b);
    if r != 0 && ((r < 0) != (b < 0)) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

pub fn negate(n: i64) -> ScriptResult<i64> {
    n.checked_neg().ok_or_else(|| overflow("-"))
}
