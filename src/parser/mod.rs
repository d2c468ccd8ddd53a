/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      mod.rs
 * Purpose:   Parser module layout.
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

/// Core parser orchestration:
/// - Owns the `Parser` struct
/// - Exposes the main `parse(tokens)` entry point
pub mod parser;

/// Statement-level parsing:
/// - declarations, assignments, bare expressions
/// - if / else, while, for
/// - return / continue / break / blocks
pub mod statements;

/// Expression-level parsing:
/// - terms with prefix and postfix operators
/// - infix resolution by operator precedence
/// - lambdas, arrays, calls, subscripts
pub mod expressions;

/// Shared parser helpers:
/// - token lookahead and consumption
/// - "expected X but got Y" diagnostics
pub mod helpers;

/// Re-export the public parse entry point so callers can use:
/// `crate::parser::parse(...)`
pub use parser::{parse, Parser};
