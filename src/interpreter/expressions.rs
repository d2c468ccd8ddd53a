/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      expressions.rs
 * Purpose:   Expression evaluation.
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

use std::rc::Rc;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{ScriptError, ScriptResult};
use crate::interpreter::environment::EnvRef;
use crate::interpreter::helpers::{arithmetic, binary_type_error, negate};
use crate::interpreter::{Evaluated, Interpreter, Reference};
use crate::stack::ensure_sufficient_stack;
use crate::value::{Closure, Value};

impl Interpreter {
    /// Evaluates `expr` to a value or an unresolved place.
    ///
    /// Names and subscripts produce places; everything else produces a
    /// value. Use [`Interpreter::eval_value`] wherever a concrete value is
    /// needed.
    pub fn eval(&self, expr: &Expr, env: &EnvRef) -> ScriptResult<Evaluated> {
        ensure_sufficient_stack(|| self.eval_inner(expr, env))
    }

    fn eval_inner(&self, expr: &Expr, env: &EnvRef) -> ScriptResult<Evaluated> {
        let value = match expr {
            Expr::Variable(name) => return Ok(Evaluated::Reference(Reference::Variable(name.clone()))),
            Expr::Integer(n) => Value::Integer(*n),

            Expr::Array(elements) => {
                let values = elements
                    .iter()
                    .map(|e| self.eval_value(e, env))
                    .collect::<ScriptResult<Vec<_>>>()?;
                Value::array(values)
            }

            Expr::Lambda(lambda) => Value::Closure(Rc::new(Closure {
                lambda: Rc::clone(lambda),
                env: Rc::clone(env),
            })),

            Expr::Unary { op, operand } => self.eval_unary(*op, operand, env)?,
            Expr::Binary { op, left, right } => self.eval_binary(*op, left, right, env)?,

            Expr::Call { callee, args } => {
                let callee = self.eval_value(callee, env)?;
                if !callee.is_function() {
                    return Err(ScriptError::type_error(format!(
                        "Type '{}' is not callable.",
                        callee.type_name()
                    )));
                }

                let args = args
                    .iter()
                    .map(|a| self.eval_value(a, env))
                    .collect::<ScriptResult<Vec<_>>>()?;
                self.call_value(&callee, args)?
            }

            Expr::Access { array, index } => {
                let array = match self.eval_value(array, env)? {
                    Value::Array(values) => values,
                    other => {
                        return Err(ScriptError::type_error(format!(
                            "Type '{}' is not subscriptable.",
                            other.type_name()
                        )))
                    }
                };

                let index = self.eval_value(index, env)?;
                let index = index.as_int().ok_or_else(|| {
                    ScriptError::type_error(format!(
                        "Type '{}' is not an index.",
                        index.type_name()
                    ))
                })?;

                return Ok(Evaluated::Reference(Reference::element(array, index)?));
            }
        };

        Ok(Evaluated::Value(value))
    }

    /// Evaluates `expr` and reads through any place it produced.
    pub fn eval_value(&self, expr: &Expr, env: &EnvRef) -> ScriptResult<Value> {
        let evaluated = self.eval(expr, env)?;
        self.resolve(evaluated, env)
    }

    pub fn resolve(&self, evaluated: Evaluated, env: &EnvRef) -> ScriptResult<Value> {
        match evaluated {
            Evaluated::Value(value) => Ok(value),
            Evaluated::Reference(place) => place.read(env),
        }
    }

    fn eval_unary(&self, op: UnaryOp, operand: &Expr, env: &EnvRef) -> ScriptResult<Value> {
        let value = self.eval_value(operand, env)?;

        match (op, &value) {
            (UnaryOp::Not, _) => Ok(Value::from_bool(!value.is_truthy())),
            (UnaryOp::Plus, Value::Integer(_)) => Ok(value),
            (UnaryOp::Negate, Value::Integer(n)) => Ok(Value::Integer(negate(*n)?)),
            _ => Err(ScriptError::type_error(format!(
                "Invalid type '{}' in unary operator '{}'.",
                value.type_name(),
                op
            ))),
        }
    }

    fn eval_binary(
        &self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        env: &EnvRef,
    ) -> ScriptResult<Value> {
        // Short-circuit operators yield an operand, not a coerced boolean.
        match op {
            BinaryOp::Or => {
                let left = self.eval_value(left, env)?;
                return if left.is_truthy() { Ok(left) } else { self.eval_value(right, env) };
            }
            BinaryOp::And => {
                let left = self.eval_value(left, env)?;
                return if left.is_truthy() { self.eval_value(right, env) } else { Ok(left) };
            }
            _ => {}
        }

        let left = self.eval_value(left, env)?;
        let right = self.eval_value(right, env)?;

        match (op, &left, &right) {
            (BinaryOp::Equal, _, _) => Ok(Value::from_bool(left == right)),
            (BinaryOp::NotEqual, _, _) => Ok(Value::from_bool(left != right)),

            (BinaryOp::Less, Value::Integer(a), Value::Integer(b)) => Ok(Value::from_bool(a < b)),
            (BinaryOp::Greater, Value::Integer(a), Value::Integer(b)) => Ok(Value::from_bool(a > b)),
            (BinaryOp::LessEqual, Value::Integer(a), Value::Integer(b)) => Ok(Value::from_bool(a <= b)),
            (BinaryOp::GreaterEqual, Value::Integer(a), Value::Integer(b)) => {
                Ok(Value::from_bool(a >= b))
            }

            (BinaryOp::Add, Value::Array(a), Value::Array(b)) => {
                let mut joined = a.borrow().clone();
                joined.extend(b.borrow().iter().cloned());
                Ok(Value::array(joined))
            }

            (
                BinaryOp::Add
                | BinaryOp::Subtract
                | BinaryOp::Multiply
                | BinaryOp::Divide
                | BinaryOp::Modulo,
                Value::Integer(a),
                Value::Integer(b),
            ) => Ok(Value::Integer(arithmetic(op, *a, *b)?)),

            _ => Err(binary_type_error(op, &left, &right)),
        }
    }
}
