/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      helpers.rs
 * Purpose:   Token cursor helpers shared by the parser.
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
use crate::lexer::keywords::is_keyword;
use crate::lexer::token::{Token, TokenKind};
use crate::parser::parser::{Parser, MAX_NESTING};
use crate::stack::ensure_sufficient_stack;

impl Parser {
    /// Returns the current token without consuming it.
    pub fn peek(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    /// Checks the current token's kind without advancing.
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consumes and returns the current token.
    ///
    /// The end-of-file token is returned repeatedly; the cursor never moves
    /// past it.
    pub fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.current += 1;
        }
        token
    }

    /// Consumes a token that must be of `kind`.
    pub fn expect(&mut self, kind: TokenKind) -> ScriptResult<Token> {
        let token = self.advance();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(expected(kind, &token))
        }
    }

    /// Consumes a name token and returns its text.
    pub fn expect_name(&mut self) -> ScriptResult<String> {
        Ok(self.expect(TokenKind::Name)?.lexeme)
    }

    /// Runs `f` one nesting level deeper.
    ///
    /// Statements and terms are the only recursive grammar rules, so this
    /// bounds the height of every tree the parser builds.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ScriptResult<T>) -> ScriptResult<T> {
        if self.depth >= MAX_NESTING {
            let span = self.peek().span;
            return Err(ScriptError::syntax_error(
                format!("Nesting exceeds {} levels at {}.", MAX_NESTING, span),
                span,
            )
            .with_help("move deeply nested code into separate functions"));
        }

        self.depth += 1;
        let result = ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }
}

/// `Expected X but got Y at line L, column C.`
pub fn expected(kind: TokenKind, found: &Token) -> ScriptError {
    let error = ScriptError::syntax_error(
        format!(
            "Expected {} but got {} at {}.",
            kind.describe(),
            found.kind.describe(),
            found.span
        ),
        found.span,
    );

    match kind {
        TokenKind::Name if is_keyword(&found.lexeme) => error.with_help(format!(
            "'{}' is a keyword and cannot be used as a name",
            found.lexeme
        )),
        TokenKind::Semicolon => error.with_help("every statement ends with ';'"),
        _ => error,
    }
}

/// `Unexpected Y at line L, column C.`
pub fn unexpected(found: &Token) -> ScriptError {
    ScriptError::syntax_error(
        format!("Unexpected {} at {}.", found.kind.describe(), found.span),
        found.span,
    )
}
