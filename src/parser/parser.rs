/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      parser.rs
 * Purpose:   Recursive-descent parser entry point.
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

use crate::ast::Block;
use crate::error::{ScriptError, ScriptResult};
use crate::lexer::token::{Token, TokenKind};

/// The core MazeScript recursive-descent parser.
///
/// This structure maintains:
/// - The full token stream produced by the lexer
/// - The current cursor position into that stream
///
/// The actual grammar logic is implemented through extension modules
/// (`statements`, `expressions`, `helpers`) via additional `impl Parser` blocks.
pub struct Parser {
    /// Complete list of tokens to be parsed.
    pub tokens: Vec<Token>,

    /// Current cursor position within the token stream.
    ///
    /// Never moves past the end-of-file token.
    pub current: usize,

    /// How many statements and terms are currently open.
    pub depth: usize,
}

/// Deepest statement/term nesting the parser accepts.
pub const MAX_NESTING: usize = 1000;

/// Public entry point for the MazeScript parsing phase.
///
/// # MazeScript Pipeline
/// ```text
/// Source → Lexer → Tokens → Parser → IR Block → Interpreter
/// ```
///
/// # Errors
/// A syntax error when the token stream does not hold exactly one
/// end-of-file marker in last position, or when any grammar rule fails.
///
/// # Example
/// ```rust
/// use mazescript::{parse, tokenize};
///
/// let block = parse(tokenize("var x = 1;").unwrap()).unwrap();
/// assert_eq!(block.statements.len(), 1);
/// ```
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse(tokens: Vec<Token>) -> ScriptResult<Block> {
    let mut parser = Parser::new(tokens)?;
    let block = parser.parse()?;
    tracing::debug!(statements = block.statements.len(), "parsed program");
    Ok(block)
}

impl Parser {
    /// Validates the end-of-file invariant and positions the cursor at the
    /// first token.
    pub fn new(tokens: Vec<Token>) -> ScriptResult<Self> {
        let eof_count = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        let eof_last = tokens.last().is_some_and(|t| t.kind == TokenKind::Eof);

        if eof_count != 1 || !eof_last {
            let span = tokens.last().map(|t| t.span).unwrap_or_default();
            return Err(ScriptError::syntax_error(
                "Token stream must end with exactly one end of file.",
                span,
            ));
        }

        Ok(Self {
            tokens,
            current: 0,
            depth: 0,
        })
    }

    /// Parses the entire token stream into the program block.
    pub fn parse(&mut self) -> ScriptResult<Block> {
        let block = self.block_until(TokenKind::Eof)?;
        self.expect(TokenKind::Eof)?;
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Expr, Lambda, Stmt, UnaryOp};
    use crate::error::ErrorKind;
    use crate::lexer::tokenize;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn program(source: &str) -> Vec<Stmt> {
        parse(tokenize(source).unwrap()).unwrap().statements
    }

    fn syntax_error(source: &str) -> ScriptError {
        let err = tokenize(source)
            .and_then(parse)
            .expect_err("source should not parse");
        assert_eq!(err.kind, ErrorKind::Syntax, "{source}");
        err
    }

    fn int(value: i64) -> Expr {
        Expr::Integer(value)
    }

    fn var(name: &str) -> Expr {
        Expr::Variable(name.to_string())
    }

    fn bin(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn unary(op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    fn call(callee: Expr, args: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: Box::new(callee),
            args,
        }
    }

    fn access(array: Expr, index: Expr) -> Expr {
        Expr::Access {
            array: Box::new(array),
            index: Box::new(index),
        }
    }

    fn assign(target: Expr, value: Expr) -> Stmt {
        Stmt::Assignment { target, value }
    }

    fn decl(name: &str, value: Expr) -> Stmt {
        Stmt::Declaration {
            name: name.to_string(),
            value,
        }
    }

    fn block(statements: Vec<Stmt>) -> Stmt {
        Stmt::Block(Block::new(statements))
    }

    #[test]
    fn empty_program() {
        assert_eq!(program(""), vec![]);
        assert_eq!(program(";"), vec![Stmt::NoOp]);
    }

    #[test]
    fn precedence_and_grouping() {
        assert_eq!(
            program("3 * -1 + 2 % (18 / 2) * 5;"),
            vec![Stmt::Expression(bin(
                BinaryOp::Add,
                bin(BinaryOp::Multiply, int(3), unary(UnaryOp::Negate, int(1))),
                bin(
                    BinaryOp::Multiply,
                    bin(BinaryOp::Modulo, int(2), bin(BinaryOp::Divide, int(18), int(2))),
                    int(5)
                )
            ))]
        );
    }

    #[test]
    fn operators_are_left_associative() {
        assert_eq!(
            program("1 - 2 - 3 || 4 && 5;"),
            vec![Stmt::Expression(bin(
                BinaryOp::Or,
                bin(BinaryOp::Subtract, bin(BinaryOp::Subtract, int(1), int(2)), int(3)),
                bin(BinaryOp::And, int(4), int(5))
            ))]
        );
    }

    #[test]
    fn integer_bases() {
        assert_eq!(
            program("123;12___3;0xf_E8;0b10_10;"),
            vec![
                Stmt::Expression(int(123)),
                Stmt::Expression(int(123)),
                Stmt::Expression(int(4072)),
                Stmt::Expression(int(10)),
            ]
        );
    }

    #[test]
    fn declarations_assignments_and_functions() {
        let source = "
            var x = 10;
            x = 20;
            var f = fn (a, b, c) { return a + b + c; };
            f(1, x, 3);
        ";
        let lambda = Lambda {
            params: vec!["a".into(), "b".into(), "c".into()],
            body: Block::new(vec![Stmt::Return(Some(bin(
                BinaryOp::Add,
                bin(BinaryOp::Add, var("a"), var("b")),
                var("c"),
            )))]),
        };
        assert_eq!(
            program(source),
            vec![
                decl("x", int(10)),
                assign(var("x"), int(20)),
                decl("f", Expr::Lambda(Rc::new(lambda))),
                Stmt::Expression(call(var("f"), vec![int(1), var("x"), int(3)])),
            ]
        );
    }

    #[test]
    fn if_and_while() {
        let source = "
            var x = 0;
            if (1 == 1) x = 3;

            while (x > 0) {
                if (x < 2) {
                    break;
                } else {
                    x = x - 1;
                    continue;
                }
            }
        ";
        assert_eq!(
            program(source),
            vec![
                decl("x", int(0)),
                Stmt::If {
                    condition: bin(BinaryOp::Equal, int(1), int(1)),
                    then_branch: Box::new(assign(var("x"), int(3))),
                    else_branch: Box::new(Stmt::NoOp),
                },
                Stmt::While {
                    condition: bin(BinaryOp::Greater, var("x"), int(0)),
                    body: Box::new(block(vec![Stmt::If {
                        condition: bin(BinaryOp::Less, var("x"), int(2)),
                        then_branch: Box::new(block(vec![Stmt::Break])),
                        else_branch: Box::new(block(vec![
                            assign(var("x"), bin(BinaryOp::Subtract, var("x"), int(1))),
                            Stmt::Continue,
                        ])),
                    }])),
                },
            ]
        );
    }

    #[test]
    fn else_if_chains_nest() {
        let statements = program("if (a) 1; else if (b) 2; else 3;");
        let Stmt::If { else_branch, .. } = &statements[0] else {
            panic!("expected if statement");
        };
        assert!(matches!(**else_branch, Stmt::If { .. }));
    }

    #[test]
    fn for_headers() {
        let source = "
            for (0; 0; 0);
            for (x = 0; x < 10; x = x + 1);
            for (var x = [0]; x; f(x)) {}
        ";
        assert_eq!(
            program(source),
            vec![
                Stmt::For {
                    init: Box::new(Stmt::Expression(int(0))),
                    condition: int(0),
                    step: Box::new(Stmt::Expression(int(0))),
                    body: Box::new(Stmt::NoOp),
                },
                Stmt::For {
                    init: Box::new(assign(var("x"), int(0))),
                    condition: bin(BinaryOp::Less, var("x"), int(10)),
                    step: Box::new(assign(var("x"), bin(BinaryOp::Add, var("x"), int(1)))),
                    body: Box::new(Stmt::NoOp),
                },
                Stmt::For {
                    init: Box::new(decl("x", Expr::Array(vec![int(0)]))),
                    condition: var("x"),
                    step: Box::new(Stmt::Expression(call(var("f"), vec![var("x")]))),
                    body: Box::new(block(vec![])),
                },
            ]
        );
    }

    #[test]
    fn arrays_and_postfix_chains() {
        let source = "
            var arr = [ 1, 2, 3 ];
            arr[0];
            arr[1] = 4;
            arr = [ 1, fn () { return; }, arr ];
            arr[1]();
            arr[2][1];
        ";
        let lambda = Lambda {
            params: vec![],
            body: Block::new(vec![Stmt::Return(None)]),
        };
        assert_eq!(
            program(source),
            vec![
                decl("arr", Expr::Array(vec![int(1), int(2), int(3)])),
                Stmt::Expression(access(var("arr"), int(0))),
                assign(access(var("arr"), int(1)), int(4)),
                assign(
                    var("arr"),
                    Expr::Array(vec![int(1), Expr::Lambda(Rc::new(lambda)), var("arr")])
                ),
                Stmt::Expression(call(access(var("arr"), int(1)), vec![])),
                Stmt::Expression(access(access(var("arr"), int(2)), int(1))),
            ]
        );
    }

    #[test]
    fn every_operator() {
        let source = "0||0;0&&0;0==0;0!=0;0<0;0>0;0<=0;0>=0;0+0;0-0;0*0;0/0;0%0;!0;+0;-0;";
        let binary = [
            BinaryOp::Or,
            BinaryOp::And,
            BinaryOp::Equal,
            BinaryOp::NotEqual,
            BinaryOp::Less,
            BinaryOp::Greater,
            BinaryOp::LessEqual,
            BinaryOp::GreaterEqual,
            BinaryOp::Add,
            BinaryOp::Subtract,
            BinaryOp::Multiply,
            BinaryOp::Divide,
            BinaryOp::Modulo,
        ];
        let mut expected: Vec<Stmt> = binary
            .into_iter()
            .map(|op| Stmt::Expression(bin(op, int(0), int(0))))
            .collect();
        for op in [UnaryOp::Not, UnaryOp::Plus, UnaryOp::Negate] {
            expected.push(Stmt::Expression(unary(op, int(0))));
        }
        assert_eq!(program(source), expected);
    }

    #[test]
    fn prefix_applies_to_postfixed_term() {
        assert_eq!(
            program("-f(1)[2];"),
            vec![Stmt::Expression(unary(
                UnaryOp::Negate,
                access(call(var("f"), vec![int(1)]), int(2))
            ))]
        );
    }

    #[test]
    fn reports_expected_and_found() {
        let err = syntax_error("var ;");
        assert_eq!(err.message, "Expected name but got ';' at line 1, column 5.");

        let err = syntax_error("var x = 1 )");
        assert_eq!(err.message, "Unexpected ')' at line 1, column 11.");
    }

    #[test]
    fn keyword_and_semicolon_errors_carry_help() {
        let err = syntax_error("var while = 1;");
        assert_eq!(err.message, "Expected name but got 'while' at line 1, column 5.");
        assert_eq!(
            err.help.as_deref(),
            Some("'while' is a keyword and cannot be used as a name")
        );

        let err = syntax_error("while (1) { break }");
        assert_eq!(err.help.as_deref(), Some("every statement ends with ';'"));

        assert_eq!(syntax_error("var ;").help, None);
    }

    #[test]
    fn nesting_limit() {
        // The statement and the literal each take one level.
        let source = format!("{}1;", "- ".repeat(MAX_NESTING - 2));
        let mut parser = Parser::new(tokenize(&source).unwrap()).unwrap();
        parser.parse().unwrap();
        assert_eq!(parser.depth, 0);

        let err = syntax_error(&format!("{}1;", "- ".repeat(MAX_NESTING - 1)));
        assert!(err.message.starts_with("Nesting exceeds 1000 levels"));
    }

    #[test]
    fn malformed_programs() {
        for source in [
            "var x = y[2] var;",
            "var x = 1 + (",
            "var x = 1 + var",
            "[1, 2, 3,];",
            "fn (a,) {};",
            "if 1 {}",
            "while (1) ",
            "for (var i = 0; i < 1) {}",
            "return 1",
            "{ break; ",
            "0x;",
            "0b;",
            "0x_;",
        ] {
            syntax_error(source);
        }
    }

    #[test]
    fn token_stream_needs_exactly_one_eof() {
        assert!(parse(vec![]).is_err());

        let mut tokens = tokenize(";").unwrap();
        tokens.push(tokens[1].clone());
        assert!(parse(tokens).is_err());
    }
}
