/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      mod.rs
 * Purpose:   Tree-walking evaluator and the host entry points.
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

pub mod calls;
pub mod display;
pub mod environment;
pub mod expressions;
pub mod helpers;
pub mod reference;
pub mod statements;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::Block;
use crate::config::Config;
use crate::error::{ScriptError, ScriptResult};
use crate::globals;
use crate::interpreter::environment::{EnvRef, FrameRegistry};
use crate::lexer::tokenize_with;
use crate::parser::parse;
use crate::value::Value;

pub use reference::{Evaluated, Reference};
pub use statements::ExecSignal;

/// Extra global bindings supplied by the host, declared next to the
/// language builtins.
pub type Prelude = HashMap<String, Value>;

/// Shared list of lines written by `print`.
///
/// Cloning shares the same log, so a host can keep one handle while the
/// interpreter writes through another.
#[derive(Debug, Clone, Default)]
pub struct OutputLog(Rc<RefCell<Vec<String>>>);

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: impl Into<String>) {
        self.0.borrow_mut().push(line.into());
    }

    /// Snapshot of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// Evaluation state that outlives any single statement.
pub struct Interpreter {
    config: Config,
    frames: RefCell<FrameRegistry>,

    /// Closure calls currently on the stack.
    depth: Cell<usize>,
}

impl Interpreter {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            frames: RefCell::new(FrameRegistry::new()),
            depth: Cell::new(0),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A fresh frame with no parent.
    pub fn root_frame(&self) -> EnvRef {
        self.frames.borrow_mut().create(None)
    }

    /// A fresh frame chained to `parent`.
    pub fn child_frame(&self, parent: &EnvRef) -> EnvRef {
        self.frames.borrow_mut().create(Some(Rc::clone(parent)))
    }
}

impl Drop for Interpreter {
    fn drop(&mut self) {
        self.frames.get_mut().release_all();
    }
}

/// The `main` function of an evaluated program, ready to be called.
///
/// Keeps the interpreter (and therefore every frame the program created)
/// alive until it is dropped.
pub struct EntryPoint {
    interpreter: Interpreter,
    main: Value,
    output: OutputLog,
}

impl std::fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryPoint")
            .field("main", &self.main)
            .field("output", &self.output)
            .finish()
    }
}

impl EntryPoint {
    /// Calls `main` with `args`, enforcing its arity.
    pub fn call(&self, args: Vec<Value>) -> ScriptResult<Value> {
        self.interpreter.call_value(&self.main, args)
    }

    pub fn main(&self) -> &Value {
        &self.main
    }

    /// Output written by top-level statements and by every `call`.
    pub fn output(&self) -> &OutputLog {
        &self.output
    }
}

/// Runs `source` with default settings and returns its `main`.
///
/// A fresh [`OutputLog`] is created when `output` is `None`.
///
/// # Example
/// ```rust
/// use mazescript::{evaluate, Value};
///
/// let entry = evaluate("var main = fn (x) { print(x); return x * 2; };", None, None).unwrap();
/// assert_eq!(entry.call(vec![Value::Integer(21)]).unwrap(), Value::Integer(42));
/// assert_eq!(entry.output().lines(), vec!["21"]);
/// ```
pub fn evaluate(
    source: &str,
    output: Option<OutputLog>,
    prelude: Option<Prelude>,
) -> ScriptResult<EntryPoint> {
    evaluate_with(
        source,
        &Config::default(),
        output.unwrap_or_default(),
        prelude.unwrap_or_default(),
    )
}

/// Tokenizes, parses, and runs `source` under `config`.
pub fn evaluate_with(
    source: &str,
    config: &Config,
    output: OutputLog,
    prelude: Prelude,
) -> ScriptResult<EntryPoint> {
    let block = parse(tokenize_with(source, config)?)?;
    run_program(&block, config, output, prelude)
}

/// Runs an already parsed program.
///
/// # Pipeline
/// 1. Declare the builtins, then the prelude, in a fresh global frame.
/// 2. Execute the top-level statements in a child of that frame.
/// 3. Look up `main` in the program frame.
///
/// # Errors
/// Any failure raised by the top-level statements, a prelude name that
/// collides with a builtin (Reference), a missing `main` (Reference), or a
/// `main` that is not a function (Type).
#[tracing::instrument(level = "debug", skip_all)]
pub fn run_program(
    block: &Block,
    config: &Config,
    output: OutputLog,
    prelude: Prelude,
) -> ScriptResult<EntryPoint> {
    let interpreter = Interpreter::new(config.clone());

    let globals = interpreter.root_frame();
    globals::builtins::install(&globals, config, &output)?;
    {
        let mut frame = globals.borrow_mut();
        for (name, value) in prelude {
            frame.declare(&name, value)?;
        }
    }

    let program = interpreter.child_frame(&globals);
    match interpreter.exec_block(block, &program)? {
        ExecSignal::Normal => {}
        signal => tracing::debug!(?signal, "top-level jump ended the program early"),
    }

    let main = program.borrow().get("main")?;
    if !main.is_function() {
        return Err(ScriptError::type_error("'main' must be a function."));
    }

    Ok(EntryPoint {
        interpreter,
        main,
        output,
    })
}
