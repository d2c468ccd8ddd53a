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

use std::fmt;

use thiserror::Error;

use crate::span::Span;

pub type ScriptResult<T> = Result<T, ScriptError>;

/// The failure categories a MazeScript evaluation can end with.
///
/// Every kind is fatal: the evaluation that raised it is abandoned and the
/// host decides what to show the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed literal, unrecognized character run, or grammar violation.
    Syntax,

    /// Undeclared name, or a name declared twice in the same frame.
    Reference,

    /// Operand, callee, subscript, or assignment target of the wrong kind,
    /// and wrong argument counts.
    Type,

    /// Division by zero, index out of bounds, popping an empty array,
    /// integer overflow, or exceeding the call depth limit.
    Range,

    /// Raised by the script itself through `panic()`.
    Panic,
}

impl ErrorKind {
    /// Stable error code shown in diagnostics.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "E_SYNTAX",
            ErrorKind::Reference => "E_REFERENCE",
            ErrorKind::Type => "E_TYPE",
            ErrorKind::Range => "E_RANGE",
            ErrorKind::Panic => "E_PANIC",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Reference => "ReferenceError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Range => "RangeError",
            ErrorKind::Panic => "Panic",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ScriptError {
    pub kind: ErrorKind,

    /// Human-readable error message
    pub message: String,

    /// Source location, when the failing construct has one.
    ///
    /// Lexer and parser errors always carry a span. The IR does not keep
    /// positions, so runtime errors usually do not.
    pub span: Option<Span>,

    /// Optional note / help text
    pub help: Option<String>,
}

impl ScriptError {
    /// Generic constructor
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            help: None,
        }
    }

    /// Syntax error (lexing or parsing) at a known position.
    pub fn syntax_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Syntax, message).at(span)
    }

    /// Reference error (undeclared or redeclared name)
    pub fn reference_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Reference, message)
    }

    /// Type error (invalid operation / operand types)
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, message)
    }

    /// Range error (bad index, division by zero, overflow)
    pub fn range_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Range, message)
    }

    /// Failure requested by the script via `panic()`.
    pub fn panic(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Panic, message)
    }

    /// Attach a source position (builder-style).
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}
