/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      expressions.rs
 * Purpose:   Expression grammar: terms, postfix folding, and infix
 *            resolution by precedence.
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

use std::rc::Rc;

use crate::ast::{BinaryOp, Expr, Lambda, UnaryOp};
use crate::error::{ScriptError, ScriptResult};
use crate::lexer::int_value;
use crate::lexer::token::TokenKind;
use crate::parser::helpers::unexpected;
use crate::parser::parser::Parser;

impl Parser {
    /// Parses a full infix expression up to (not including) any token in
    /// `end`.
    ///
    /// The expression is first collected as a flat `term (op term)*`
    /// sequence and then resolved with the shunting-yard algorithm.
    ///
    /// ```text
    /// 1 + 2 * 3 - 4
    /// operands:  1 2 3 4
    /// operators: + * -
    /// result:    ((1 + (2 * 3)) - 4)
    /// ```
    pub fn expression(&mut self, end: &[TokenKind]) -> ScriptResult<Expr> {
        let mut terms = vec![self.term()?];
        let mut operators = Vec::new();

        while !end.contains(&self.peek().kind) {
            let token = self.advance();
            let op = BinaryOp::from_token(token.kind).ok_or_else(|| unexpected(&token))?;
            operators.push(op);
            terms.push(self.term()?);
        }

        self.resolve_infix(terms, operators)
    }

    /// Shunting-yard over an already-alternating term/operator sequence.
    fn resolve_infix(&self, terms: Vec<Expr>, operators: Vec<BinaryOp>) -> ScriptResult<Expr> {
        let mut terms = terms.into_iter();
        let mut output: Vec<Expr> = terms.next().into_iter().collect();
        let mut pending: Vec<BinaryOp> = Vec::new();

        for (op, term) in operators.into_iter().zip(terms) {
            while let Some(&top) = pending.last() {
                if top.precedence() < op.precedence() {
                    break;
                }
                pending.pop();
                self.reduce(&mut output, top)?;
            }
            pending.push(op);
            output.push(term);
        }

        while let Some(top) = pending.pop() {
            self.reduce(&mut output, top)?;
        }

        match (output.pop(), output.is_empty()) {
            (Some(expr), true) => Ok(expr),
            _ => Err(self.invalid_expression()),
        }
    }

    fn reduce(&self, output: &mut Vec<Expr>, op: BinaryOp) -> ScriptResult<()> {
        let right = output.pop().ok_or_else(|| self.invalid_expression())?;
        let left = output.pop().ok_or_else(|| self.invalid_expression())?;
        output.push(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        });
        Ok(())
    }

    fn invalid_expression(&self) -> ScriptError {
        ScriptError::syntax_error("Invalid expression.", self.peek().span)
    }

    /// Parses one primary expression, with any prefix operators, followed
    /// by zero or more postfix calls and subscripts.
    pub fn term(&mut self) -> ScriptResult<Expr> {
        self.nested(Self::term_inner)
    }

    fn term_inner(&mut self) -> ScriptResult<Expr> {
        let token = self.advance();

        let expr = match token.kind {
            TokenKind::Name => Expr::Variable(token.lexeme),
            TokenKind::Int => Expr::Integer(int_value(&token.lexeme, token.span)?),
            TokenKind::Fn => self.lambda()?,

            TokenKind::LParen => {
                let inner = self.expression(&[TokenKind::RParen])?;
                self.expect(TokenKind::RParen)?;
                inner
            }

            TokenKind::LSquare => {
                let elements = self.list(TokenKind::RSquare, |p| {
                    p.expression(&[TokenKind::Comma, TokenKind::RSquare])
                })?;
                self.expect(TokenKind::RSquare)?;
                Expr::Array(elements)
            }

            kind => match UnaryOp::from_token(kind) {
                Some(op) => Expr::Unary {
                    op,
                    operand: Box::new(self.term()?),
                },
                None => return Err(unexpected(&token)),
            },
        };

        self.postfix(expr)
    }

    /// Folds `(...)` calls and `[...]` subscripts onto `expr`, left to right.
    fn postfix(&mut self, mut expr: Expr) -> ScriptResult<Expr> {
        loop {
            expr = match self.peek().kind {
                TokenKind::LParen => {
                    self.advance();
                    let args = self.list(TokenKind::RParen, |p| {
                        p.expression(&[TokenKind::Comma, TokenKind::RParen])
                    })?;
                    self.expect(TokenKind::RParen)?;
                    Expr::Call {
                        callee: Box::new(expr),
                        args,
                    }
                }
                TokenKind::LSquare => {
                    self.advance();
                    let index = self.expression(&[TokenKind::RSquare])?;
                    self.expect(TokenKind::RSquare)?;
                    Expr::Access {
                        array: Box::new(expr),
                        index: Box::new(index),
                    }
                }
                _ => return Ok(expr),
            };
        }
    }

    /// `fn ( params ) { body }`, with the `fn` already consumed.
    fn lambda(&mut self) -> ScriptResult<Expr> {
        self.expect(TokenKind::LParen)?;
        let params = self.list(TokenKind::RParen, |p| p.expect_name())?;
        self.expect(TokenKind::RParen)?;

        self.expect(TokenKind::LBrace)?;
        let body = self.block_until(TokenKind::RBrace)?;
        self.expect(TokenKind::RBrace)?;

        Ok(Expr::Lambda(Rc::new(Lambda { params, body })))
    }

    /// Comma-separated list ending at `end`. Does not consume `end`, and a
    /// trailing comma is an error.
    pub fn list<T>(
        &mut self,
        end: TokenKind,
        mut element: impl FnMut(&mut Self) -> ScriptResult<T>,
    ) -> ScriptResult<Vec<T>> {
        let mut items = Vec::new();

        if self.check(end) {
            return Ok(items);
        }

        loop {
            items.push(element(self)?);

            if self.check(end) {
                return Ok(items);
            }

            let token = self.advance();
            if token.kind != TokenKind::Comma {
                return Err(unexpected(&token));
            }
        }
    }
}
