/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      calls.rs
 * Purpose:   Function calls: builtins and closures.
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

use crate::error::{ScriptError, ScriptResult};
use crate::interpreter::helpers::check_arity;
use crate::interpreter::{ExecSignal, Interpreter};
use crate::stack::ensure_sufficient_stack;
use crate::value::{Closure, Value};

impl Interpreter {
    /// Calls `callee` with already-evaluated arguments.
    ///
    /// - Builtins with a fixed arity are checked before the host code runs;
    ///   a builtin returning nothing yields `0`.
    /// - Closures run their body in one new frame chained to the captured
    ///   frame, with parameters declared in order. The result is the
    ///   returned value, or `0`.
    ///
    /// # Errors
    /// Type error for a non-function callee or a wrong argument count,
    /// Range error when the call depth limit is exceeded, and anything the
    /// callee itself raises.
    pub fn call_value(&self, callee: &Value, args: Vec<Value>) -> ScriptResult<Value> {
        match callee {
            Value::Builtin(builtin) => {
                if let Some(arity) = builtin.arity {
                    check_arity(arity, args.len())?;
                }
                Ok((builtin.func)(args)?.unwrap_or(Value::Integer(0)))
            }

            Value::Closure(closure) => {
                let depth = self.depth.get();
                if depth >= self.config.max_call_depth {
                    return Err(ScriptError::range_error(format!(
                        "Maximum call depth of {} exceeded.",
                        self.config.max_call_depth
                    )));
                }

                self.depth.set(depth + 1);
                let result = ensure_sufficient_stack(|| self.call_closure(closure, args));
                self.depth.set(depth);
                result
            }

            other => Err(ScriptError::type_error(format!(
                "Type '{}' is not callable.",
                other.type_name()
            ))),
        }
    }

    fn call_closure(&self, closure: &Closure, args: Vec<Value>) -> ScriptResult<Value> {
        let params = &closure.lambda.params;
        check_arity(params.len(), args.len())?;

        let frame = self.child_frame(&closure.env);
        {
            let mut locals = frame.borrow_mut();
            for (name, value) in params.iter().zip(args) {
                locals.declare(name, value)?;
            }
        }

        match self.exec_block(&closure.lambda.body, &frame)? {
            ExecSignal::Return(Some(value)) => Ok(value),
            _ => Ok(Value::Integer(0)),
        }
    }
}
