/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      statements.rs
 * Purpose:   Statement grammar.
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

use crate::ast::{Block, Expr, Stmt};
use crate::error::ScriptResult;
use crate::lexer::token::TokenKind;
use crate::parser::helpers::unexpected;
use crate::parser::parser::Parser;

impl Parser {
    /// Parses statements until `end` is the current token. Does not
    /// consume `end`.
    pub fn block_until(&mut self, end: TokenKind) -> ScriptResult<Block> {
        let mut statements = Vec::new();
        while !self.check(end) {
            statements.push(self.statement()?);
        }
        Ok(Block::new(statements))
    }

    /// Parses a single statement.
    ///
    /// This is the **main dispatcher** for all statement grammar forms.
    /// It inspects the leading token and routes to the appropriate parser,
    /// falling back to an assignment or bare expression.
    pub fn statement(&mut self) -> ScriptResult<Stmt> {
        self.nested(Self::statement_inner)
    }

    fn statement_inner(&mut self) -> ScriptResult<Stmt> {
        match self.peek().kind {
            TokenKind::Var => self.declaration(),
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::For => self.for_statement(),
            TokenKind::Return => self.return_statement(),

            TokenKind::Continue => {
                self.advance();
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Continue)
            }

            TokenKind::Break => {
                self.advance();
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Break)
            }

            TokenKind::LBrace => {
                self.advance();
                let block = self.block_until(TokenKind::RBrace)?;
                self.expect(TokenKind::RBrace)?;
                Ok(Stmt::Block(block))
            }

            TokenKind::Semicolon => {
                self.advance();
                Ok(Stmt::NoOp)
            }

            _ => self.simple_statement(TokenKind::Semicolon),
        }
    }

    /// `var name = expr ;`
    fn declaration(&mut self) -> ScriptResult<Stmt> {
        self.expect(TokenKind::Var)?;
        let name = self.expect_name()?;
        self.expect(TokenKind::Assign)?;
        let value = self.expression(&[TokenKind::Semicolon])?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Declaration { name, value })
    }

    /// `expr end` or `expr = expr end`.
    ///
    /// `end` is `;` for ordinary statements and `)` for the step clause of
    /// a `for` header.
    fn simple_statement(&mut self, end: TokenKind) -> ScriptResult<Stmt> {
        let left = self.expression(&[end, TokenKind::Assign])?;
        let token = self.advance();

        if token.kind == end {
            Ok(Stmt::Expression(left))
        } else if token.kind == TokenKind::Assign {
            let value = self.expression(&[end])?;
            self.expect(end)?;
            Ok(Stmt::Assignment {
                target: left,
                value,
            })
        } else {
            Err(unexpected(&token))
        }
    }

    /// `if ( expr ) stmt [else stmt]`
    fn if_statement(&mut self) -> ScriptResult<Stmt> {
        self.expect(TokenKind::If)?;
        let condition = self.condition()?;
        let then_branch = self.statement()?;

        let else_branch = if self.check(TokenKind::Else) {
            self.advance();
            self.statement()?
        } else {
            Stmt::NoOp
        };

        Ok(Stmt::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    /// `while ( expr ) stmt`
    fn while_statement(&mut self) -> ScriptResult<Stmt> {
        self.expect(TokenKind::While)?;
        let condition = self.condition()?;
        let body = self.statement()?;
        Ok(Stmt::While {
            condition,
            body: Box::new(body),
        })
    }

    /// `for ( init ; expr ; step ) stmt`
    ///
    /// `init` is a declaration or simple statement (it brings its own `;`),
    /// `step` is a simple statement closed by `)`.
    fn for_statement(&mut self) -> ScriptResult<Stmt> {
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::LParen)?;

        let init = if self.check(TokenKind::Var) {
            self.declaration()?
        } else {
            self.simple_statement(TokenKind::Semicolon)?
        };

        let condition = self.expression(&[TokenKind::Semicolon])?;
        self.expect(TokenKind::Semicolon)?;

        let step = self.simple_statement(TokenKind::RParen)?;
        let body = self.statement()?;

        Ok(Stmt::For {
            init: Box::new(init),
            condition,
            step: Box::new(step),
            body: Box::new(body),
        })
    }

    /// `return ;` or `return expr ;`
    fn return_statement(&mut self) -> ScriptResult<Stmt> {
        self.expect(TokenKind::Return)?;

        if self.check(TokenKind::Semicolon) {
            self.advance();
            return Ok(Stmt::Return(None));
        }

        let value = self.expression(&[TokenKind::Semicolon])?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Return(Some(value)))
    }

    /// `( expr )` around an `if` or `while` predicate.
    fn condition(&mut self) -> ScriptResult<Expr> {
        self.expect(TokenKind::LParen)?;
        let condition = self.expression(&[TokenKind::RParen])?;
        self.expect(TokenKind::RParen)?;
        Ok(condition)
    }
}
