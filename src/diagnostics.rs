/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      diagnostics.rs
 * Purpose:   Compiler-style rendering of MazeScript errors.
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

use std::fmt::Write as _;

use crate::error::ScriptError;
use crate::span::Span;

/// Responsible for rendering human-friendly, compiler-style diagnostics
/// for MazeScript errors.
///
/// This printer:
/// - Formats errors with file/line/column information
/// - Displays the offending source line
/// - Highlights the exact error position using a caret (`^`)
/// - Optionally shows a helpful follow-up hint
///
/// Errors without a span (most runtime failures) render as the header
/// alone.
pub struct DiagnosticPrinter {
    /// Full source code of the file being interpreted.
    source: String,

    /// Name of the source file (e.g. `solver.maze`). Display only.
    file_name: String,

    /// Tab stop width, matching the one the lexer used for columns.
    tab_size: usize,
}

impl DiagnosticPrinter {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
            tab_size: 4,
        }
    }

    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size.max(1);
        self
    }

    /// Renders a diagnostic.
    ///
    /// # Output Example
    /// ```text
    /// error[E_SYNTAX]: Expected name but got ';' at line 2, column 5.
    ///   --> solver.maze:2:5
    ///    |
    ///  2 | var ;
    ///    |     ^
    /// ```
    pub fn render(&self, error: &ScriptError) -> String {
        let mut out = format!("error[{}]: {}", error.code(), error.message);

        if let Some(Span { line, column }) = error.span {
            let src_line = self
                .source
                .lines()
                .nth(line.saturating_sub(1))
                .unwrap_or("");

            let _ = write!(out, "\n  --> {}:{}:{}", self.file_name, line, column);
            out.push_str("\n   |");
            let _ = write!(out, "\n{:>3} | {}", line, self.expand_tabs(src_line));
            let _ = write!(out, "\n   | {}^", " ".repeat(column.saturating_sub(1)));
        } else {
            let _ = write!(out, "\n  --> {}", self.file_name);
        }

        if let Some(help) = &error.help {
            let _ = write!(out, "\n\nhelp: {}", help);
        }

        out
    }

    /// Prints [`DiagnosticPrinter::render`] to stderr.
    pub fn print(&self, error: &ScriptError) {
        eprintln!("{}", self.render(error));
    }

    /// Replaces tabs with spaces up to the next stop so the caret lines up
    /// with lexer columns.
    fn expand_tabs(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut column = 0;
        for ch in line.chars() {
            if ch == '\t' {
                let width = self.tab_size - column % self.tab_size;
                out.push_str(&" ".repeat(width));
                column += width;
            } else {
                out.push(ch);
                column += 1;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_points_at_column() {
        let printer = DiagnosticPrinter::new("demo.maze", "var x = 1;\nvar ;");
        let error = ScriptError::syntax_error("Expected name but got ';'", Span::new(2, 5))
            .with_help("declarations need a name");
        let text = printer.render(&error);
        assert_eq!(
            text,
            "error[E_SYNTAX]: Expected name but got ';'\n  --> demo.maze:2:5\n   |\n  2 | var ;\n   |     ^\n\nhelp: declarations need a name"
        );
    }

    #[test]
    fn tabs_expand_to_lexer_columns() {
        let printer = DiagnosticPrinter::new("t.maze", "\t?").with_tab_size(4);
        let error = ScriptError::syntax_error("Unrecognized token '?'", Span::new(1, 5));
        let text = printer.render(&error);
        assert!(text.ends_with("  1 |     ?\n   |     ^"));
    }

    #[test]
    fn runtime_errors_without_span() {
        let printer = DiagnosticPrinter::new("t.maze", "");
        let text = printer.render(&ScriptError::range_error("Division by zero."));
        assert_eq!(text, "error[E_RANGE]: Division by zero.\n  --> t.maze");
    }
}
