/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      token.rs
 * Purpose:   Defines the lexical token vocabulary shared by the lexer and
 *            parser.
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

use crate::span::Span;
use std::fmt;

/// Represents the **category of a lexical token** in MazeScript.
///
/// # Compiler Pipeline Role
/// ```text
/// Source Code → Lexer → TokenKind → Parser → IR
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A user-defined name: `[A-Za-z_][A-Za-z0-9_]*`.
    Name,

    /// An integer literal in base 10, 16 (`0x`) or 2 (`0b`).
    Int,

    // Keywords
    Var,
    Fn,
    If,
    Else,
    While,
    For,
    Return,
    Continue,
    Break,

    // Brackets
    LParen,
    RParen,
    LSquare,
    RSquare,
    LBrace,
    RBrace,

    // Operators
    Less,
    Greater,
    Assign,
    EqEq,
    NotEq,
    LessEq,
    GreaterEq,
    AndAnd,
    OrOr,
    Bang,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Punctuation
    Comma,
    Semicolon,

    /// End-of-file marker.
    ///
    /// Always appended as the **final token** and positioned at the last
    /// line/column the lexer reached.
    Eof,
}

impl TokenKind {
    /// Human-readable name used in "expected X but got Y" diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Name => "name",
            TokenKind::Int => "integer",
            TokenKind::Var => "'var'",
            TokenKind::Fn => "'fn'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::For => "'for'",
            TokenKind::Return => "'return'",
            TokenKind::Continue => "'continue'",
            TokenKind::Break => "'break'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LSquare => "'['",
            TokenKind::RSquare => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Less => "'<'",
            TokenKind::Greater => "'>'",
            TokenKind::Assign => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::LessEq => "'<='",
            TokenKind::GreaterEq => "'>='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Bang => "'!'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Represents a **single lexical token** produced by the lexer.
///
/// # Example Tokens
/// ```text
/// var   →  { kind: Var,  lexeme: "var",   span: 1:1 }
/// x     →  { kind: Name, lexeme: "x",     span: 1:5 }
/// 0xff  →  { kind: Int,  lexeme: "0xff",  span: 1:9 }
/// ```
///
/// Tokens are created once by the lexer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The classified category of the token.
    pub kind: TokenKind,

    /// The exact source text that produced this token.
    pub lexeme: String,

    /// Position of the token's first character.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    /// Prints only the lexeme; `Debug` is for the full structure.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}
