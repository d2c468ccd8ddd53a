/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      reference.rs
 * Purpose:   Places an expression can evaluate to, and how they are read
 *            and written.
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
use crate::interpreter::environment::EnvRef;
use crate::value::{ArrayRef, Value};

/// Result of evaluating an expression: a concrete value, or a place that
/// still has to be read (or written) explicitly.
#[derive(Debug, Clone)]
pub enum Evaluated {
    Value(Value),
    Reference(Reference),
}

/// An assignable location.
#[derive(Clone)]
pub enum Reference {
    /// A name, resolved against the frame at read/write time.
    Variable(String),

    /// One slot of an array. The index was in bounds when the reference
    /// was made and is checked again on every access.
    Element {
        array: ArrayRef,
        index: i64,
    },
}

impl Reference {
    /// Bounds-checked reference to `array[index]`.
    pub fn element(array: ArrayRef, index: i64) -> ScriptResult<Self> {
        slot(&array.borrow(), index)?;
        Ok(Reference::Element { array, index })
    }

    pub fn read(&self, env: &EnvRef) -> ScriptResult<Value> {
        match self {
            Reference::Variable(name) => env.borrow().get(name),
            Reference::Element { array, index } => {
                let values = array.borrow();
                let i = slot(&values, *index)?;
                Ok(values[i].clone())
            }
        }
    }

    pub fn write(&self, env: &EnvRef, value: Value) -> ScriptResult<()> {
        match self {
            Reference::Variable(name) => env.borrow_mut().assign(name, value),
            Reference::Element { array, index } => {
                let mut values = array.borrow_mut();
                let i = slot(&values, *index)?;
                values[i] = value;
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Variable(name) => write!(f, "Variable({})", name),
            Reference::Element { index, .. } => write!(f, "Element([{}])", index),
        }
    }
}

/// Converts `index` to a position inside `values`.
fn slot(values: &[Value], index: i64) -> ScriptResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < values.len())
        .ok_or_else(|| {
            ScriptError::range_error(format!(
                "{} is outside the range of array with length {}",
                index,
                values.len()
            ))
        })
}
