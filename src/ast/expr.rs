/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      expr.rs
 * Purpose:   Expression nodes of the MazeScript IR.
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
use std::rc::Rc;

use crate::ast::Block;
use crate::lexer::token::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Variable(String),
    Integer(i64),
    Array(Vec<Expr>),

    /// Shared so closures created from the same literal reuse one body.
    Lambda(Rc<Lambda>),

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },

    Access {
        array: Box<Expr>,
        index: Box<Expr>,
    },
}

impl Expr {
    /// Moves every directly owned child expression into `out`, leaving
    /// leaves in their place.
    fn take_children(&mut self, out: &mut Vec<Expr>) {
        match self {
            Expr::Unary { operand, .. } => out.push(take(operand)),
            Expr::Binary { left, right, .. } => {
                out.push(take(left));
                out.push(take(right));
            }
            Expr::Access { array, index } => {
                out.push(take(array));
                out.push(take(index));
            }
            Expr::Call { callee, args } => {
                out.push(take(callee));
                out.append(args);
            }
            Expr::Array(elements) => out.append(elements),
            Expr::Variable(_) | Expr::Integer(_) | Expr::Lambda(_) => {}
        }
    }
}

fn take(slot: &mut Expr) -> Expr {
    std::mem::replace(slot, Expr::Integer(0))
}

/// Operator chains such as `1 + 1 + ... + 1` or `f()()...()` nest one
/// level per operator, so the tree is torn down with a worklist.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.take_children(&mut pending);
        }
    }
}

/// `fn (params) { body }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lambda {
    pub params: Vec<String>,
    pub body: Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `+`
    Plus,
    /// `-`
    Negate,
}

impl UnaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Negate),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Plus => "+",
            UnaryOp::Negate => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::OrOr => BinaryOp::Or,
            TokenKind::AndAnd => BinaryOp::And,
            TokenKind::EqEq => BinaryOp::Equal,
            TokenKind::NotEq => BinaryOp::NotEqual,
            TokenKind::Less => BinaryOp::Less,
            TokenKind::Greater => BinaryOp::Greater,
            TokenKind::LessEq => BinaryOp::LessEqual,
            TokenKind::GreaterEq => BinaryOp::GreaterEqual,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Subtract,
            TokenKind::Star => BinaryOp::Multiply,
            TokenKind::Slash => BinaryOp::Divide,
            TokenKind::Percent => BinaryOp::Modulo,
            _ => return None,
        };
        Some(op)
    }

    /// Binding strength; higher binds tighter. Every level is
    /// left-associative.
    ///
    /// ```text
    /// 1  ||
    /// 2  &&
    /// 3  == !=
    /// 4  < > <= >=
    /// 5  + -
    /// 6  * / %
    /// ```
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Equal | BinaryOp::NotEqual => 3,
            BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEqual | BinaryOp::GreaterEqual => 4,
            BinaryOp::Add | BinaryOp::Subtract => 5,
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => 6,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
