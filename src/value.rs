/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      value.rs
 * Purpose:   Runtime values flowing through the interpreter.
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

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::ast::Lambda;
use crate::config::Config;
use crate::error::ScriptResult;
use crate::interpreter::display::value_to_string;
use crate::interpreter::environment::EnvRef;

/// Host callable behind a [`Builtin`].
///
/// Returning `Ok(None)` means "no value"; the caller sees integer `0`.
pub type NativeFn = Rc<dyn Fn(Vec<Value>) -> ScriptResult<Option<Value>>>;

/// MazeScript runtime value representation.
///
/// This is the core type that flows through the interpreter.
/// Every expression ultimately evaluates to one of these.
///
/// Arrays, closures, and builtins are shared handles: cloning a `Value`
/// copies the reference, never the contents.
#[derive(Clone)]
pub enum Value {
    Integer(i64),

    /// Mutable, shared array storage.
    Array(ArrayRef),

    /// A lambda paired with the frame it was created in.
    Closure(Rc<Closure>),

    /// A host-provided function.
    Builtin(Rc<Builtin>),
}

/// Shared handle to array storage.
pub type ArrayRef = Rc<ArrayCell>;

/// Backing storage of an array value.
///
/// Dereferences to the `RefCell` so callers `borrow()` and `borrow_mut()`
/// as usual. Dropping a cell never recurses: nested arrays that become
/// unreachable are flattened into a worklist, so a linked list built from
/// `[item, rest]` pairs can be any length.
pub struct ArrayCell(RefCell<Vec<Value>>);

impl ArrayCell {
    pub fn new(values: Vec<Value>) -> Self {
        ArrayCell(RefCell::new(values))
    }
}

impl Deref for ArrayCell {
    type Target = RefCell<Vec<Value>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Drop for ArrayCell {
    fn drop(&mut self) {
        let mut pending = std::mem::take(self.0.get_mut());
        while let Some(value) = pending.pop() {
            if let Value::Array(child) = value {
                // Shared children stay alive; their last owner unwinds them.
                if let Ok(mut cell) = Rc::try_unwrap(child) {
                    pending.append(cell.0.get_mut());
                }
            }
        }
    }
}

pub struct Closure {
    pub lambda: Rc<Lambda>,
    pub env: EnvRef,
}

pub struct Builtin {
    pub name: String,

    /// Exact argument count, or `None` for variadic builtins.
    pub arity: Option<usize>,

    pub func: NativeFn,
}

impl Value {
    /// Integer `1` or `0`.
    pub fn from_bool(b: bool) -> Self {
        Value::Integer(i64::from(b))
    }

    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(Rc::new(ArrayCell::new(values)))
    }

    /// Wraps a host closure as a callable builtin.
    pub fn builtin<F>(name: impl Into<String>, arity: Option<usize>, func: F) -> Self
    where
        F: Fn(Vec<Value>) -> ScriptResult<Option<Value>> + 'static,
    {
        Value::Builtin(Rc::new(Builtin {
            name: name.into(),
            arity,
            func: Rc::new(func),
        }))
    }

    /// Name used in type error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Array(_) => "array",
            Value::Closure(_) | Value::Builtin(_) => "function",
        }
    }

    /// Boolean coercion used by `!`, `&&`, `||`, and conditions.
    ///
    /// - integers are truthy when non-zero
    /// - arrays are truthy when non-empty
    /// - functions are always truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Integer(n) => *n != 0,
            Value::Array(values) => !values.borrow().is_empty(),
            Value::Closure(_) | Value::Builtin(_) => true,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Closure(_) | Value::Builtin(_))
    }
}

/// Integers by value; arrays and functions by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&value_to_string(self, Config::default().print_depth))
    }
}

impl fmt::Debug for Value {
    /// Never walks a closure's frame; frames may refer back to the closure.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "Integer({})", n),
            Value::Array(_) => write!(f, "Array({})", self),
            Value::Closure(c) => write!(f, "Closure(fn ({}))", c.lambda.params.join(", ")),
            Value::Builtin(b) => write!(f, "Builtin({})", b.name),
        }
    }
}
