/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      config.rs
 * Purpose:   Tunable limits shared by the lexer, interpreter, and CLI.
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

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Settings for a MazeScript pipeline run.
///
/// Hosts may build one in code with the `with_*` setters or load it from
/// JSON; missing fields fall back to [`Config::default`].
///
/// ```json
/// { "tab_size": 8, "print_depth": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Width of a tab stop when the lexer computes columns.
    pub tab_size: usize,

    /// Arrays nested at least this deep print as `...`.
    pub print_depth: usize,

    /// Maximum number of nested closure calls before a Range failure.
    pub max_call_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_size: 4,
            print_depth: 5,
            max_call_depth: 1000,
        }
    }
}

impl Config {
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size.max(1);
        self
    }

    pub fn with_print_depth(mut self, print_depth: usize) -> Self {
        self.print_depth = print_depth;
        self
    }

    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        let tab_size = config.tab_size;
        Ok(config.with_tab_size(tab_size))
    }

    pub fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text).map_err(std::io::Error::other)
    }
}
