/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      stmt.rs
 * Purpose:   Statement nodes of the MazeScript IR.
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

use crate::ast::Expr;

/// All executable MazeScript statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /* ----------------------------- */
    /* EXPRESSIONS                   */
    /* ----------------------------- */

    /// A lone `;`, or the missing `else` of an `if`.
    NoOp,

    Expression(Expr),

    /* ----------------------------- */
    /* VARIABLES                     */
    /* ----------------------------- */

    /// `var name = value;`
    Declaration {
        name: String,
        value: Expr,
    },

    /// `target = value;` where `target` must evaluate to a location.
    Assignment {
        target: Expr,
        value: Expr,
    },

    /* ----------------------------- */
    /* CONTROL FLOW                  */
    /* ----------------------------- */

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Box<Stmt>,
    },

    While {
        condition: Expr,
        body: Box<Stmt>,
    },

    For {
        init: Box<Stmt>,
        condition: Expr,
        step: Box<Stmt>,
        body: Box<Stmt>,
    },

    Return(Option<Expr>),
    Continue,
    Break,

    Block(Block),
}

/// An ordered list of statements; the whole program is one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}
