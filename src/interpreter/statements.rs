/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      statements.rs
 * Purpose:   Statement execution and control-flow signals.
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

/*!
 * MazeScript Statement Executor
 * -----------------------------
 *
 * Runs declarations, assignments, and control flow. Expressions are
 * handled by `expressions.rs`, calls by `calls.rs`.
 *
 * Every `if` branch, loop body, and explicit block runs in a fresh child
 * frame. A `for` header gets one frame of its own, shared by the init,
 * predicate, and step clauses.
 */

use crate::ast::{Block, Expr, Stmt};
use crate::error::{ScriptError, ScriptResult};
use crate::interpreter::environment::EnvRef;
use crate::interpreter::{Evaluated, Interpreter};
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

/* ============================================================================
 * Execution Control Signals
 * ============================================================================
 */

/// Internal control flow signal used by the interpreter.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecSignal {
    /// Normal fall-through execution.
    Normal,

    /// Leave the innermost loop.
    Break,

    /// Skip to the innermost loop's next predicate check.
    Continue,

    /// Leave the enclosing function, optionally with a value.
    Return(Option<Value>),
}

/* ============================================================================
 * Statement Execution Entry Point
 * ============================================================================
 */

impl Interpreter {
    /// Runs `block` directly in `env`, stopping at the first non-normal
    /// signal.
    pub fn exec_block(&self, block: &Block, env: &EnvRef) -> ScriptResult<ExecSignal> {
        for stmt in &block.statements {
            let signal = self.exec_stmt(stmt, env)?;
            if signal != ExecSignal::Normal {
                return Ok(signal);
            }
        }
        Ok(ExecSignal::Normal)
    }

    pub fn exec_stmt(&self, stmt: &Stmt, env: &EnvRef) -> ScriptResult<ExecSignal> {
        ensure_sufficient_stack(|| self.exec_stmt_inner(stmt, env))
    }

    fn exec_stmt_inner(&self, stmt: &Stmt, env: &EnvRef) -> ScriptResult<ExecSignal> {
        match stmt {
            Stmt::NoOp => {}

            // Resolved so a bad read (undeclared name, stale index) still fails.
            Stmt::Expression(expr) => {
                self.eval_value(expr, env)?;
            }

            Stmt::Declaration { name, value } => {
                let value = self.eval_value(value, env)?;
                env.borrow_mut().declare(name, value)?;
            }

            Stmt::Assignment { target, value } => self.assign(target, value, env)?,

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let branch = if self.eval_value(condition, env)?.is_truthy() {
                    then_branch
                } else {
                    else_branch
                };
                return self.exec_stmt(branch, &self.child_frame(env));
            }

            Stmt::While { condition, body } => {
                while self.eval_value(condition, env)?.is_truthy() {
                    match self.exec_stmt(body, &self.child_frame(env))? {
                        ExecSignal::Break => break,
                        ExecSignal::Normal | ExecSignal::Continue => {}
                        signal @ ExecSignal::Return(_) => return Ok(signal),
                    }
                }
            }

            Stmt::For {
                init,
                condition,
                step,
                body,
            } => return self.exec_for(init, condition, step, body, env),

            Stmt::Return(value) => {
                let value = value
                    .as_ref()
                    .map(|expr| self.eval_value(expr, env))
                    .transpose()?;
                return Ok(ExecSignal::Return(value));
            }

            Stmt::Continue => return Ok(ExecSignal::Continue),
            Stmt::Break => return Ok(ExecSignal::Break),

            Stmt::Block(block) => return self.exec_block(block, &self.child_frame(env)),
        }

        Ok(ExecSignal::Normal)
    }

    /// Evaluate the right-hand side, then the target place, then store.
    fn assign(&self, target: &Expr, value: &Expr, env: &EnvRef) -> ScriptResult<()> {
        let value = self.eval_value(value, env)?;

        match self.eval(target, env)? {
            Evaluated::Reference(place) => place.write(env, value),
            Evaluated::Value(_) => Err(ScriptError::type_error(
                "Invalid left hand side in assignment.",
            )),
        }
    }

    fn exec_for(
        &self,
        init: &Stmt,
        condition: &Expr,
        step: &Stmt,
        body: &Stmt,
        env: &EnvRef,
    ) -> ScriptResult<ExecSignal> {
        let header = self.child_frame(env);

        let signal = self.exec_stmt(init, &header)?;
        if signal != ExecSignal::Normal {
            return Ok(signal);
        }

        while self.eval_value(condition, &header)?.is_truthy() {
            match self.exec_stmt(body, &self.child_frame(&header))? {
                ExecSignal::Break => break,
                ExecSignal::Normal | ExecSignal::Continue => {}
                signal @ ExecSignal::Return(_) => return Ok(signal),
            }

            let signal = self.exec_stmt(step, &header)?;
            if signal != ExecSignal::Normal {
                return Ok(signal);
            }
        }

        Ok(ExecSignal::Normal)
    }
}
