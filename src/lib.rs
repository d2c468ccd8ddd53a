/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
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

//! MazeScript: a small sandboxed scripting language that lets users author
//! maze-solving strategies which run inside the visualizer host.
//!
//! ```text
//! Source → Lexer → Tokens → Parser → IR Block → Interpreter → main(...)
//! ```
//!
//! The host talks to a script through two entry points:
//! - [`evaluate`] runs a program and hands back its `main` function.
//! - [`evaluate_as_solver`] wraps a program as a maze solver that records
//!   every lookup and move as an [`Action`](maze::Action).

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod globals;
pub mod interpreter;
pub mod lexer;
pub mod maze;
pub mod parser;
pub mod span;
pub mod value;

mod stack;

pub use config::Config;
pub use error::{ErrorKind, ScriptError, ScriptResult};
pub use globals::solver::{evaluate_as_solver, evaluate_as_solver_with, Solver, SolverRun};
pub use interpreter::{evaluate, evaluate_with, EntryPoint, OutputLog, Prelude};
pub use lexer::tokenize;
pub use parser::parse;
pub use value::Value;
