/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      mod.rs
 * Purpose:   Lexer entry points.
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

pub mod keywords;
pub mod lexer;
pub mod token;

pub use lexer::{int_value, Lexer};
pub use token::{Token, TokenKind};

use crate::config::Config;
use crate::error::ScriptResult;

/// Tokenizes `source` with the default tab size.
pub fn tokenize(source: &str) -> ScriptResult<Vec<Token>> {
    tokenize_with(source, &Config::default())
}

/// Tokenizes `source` using the tab size from `config`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn tokenize_with(source: &str, config: &Config) -> ScriptResult<Vec<Token>> {
    let mut lexer = Lexer::new(source, config.tab_size);
    lexer.scan_tokens()?;
    tracing::debug!(tokens = lexer.tokens.len(), "tokenized source");
    Ok(lexer.tokens)
}
