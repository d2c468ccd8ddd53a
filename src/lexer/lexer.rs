/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      lexer.rs
 * Purpose:   Converts MazeScript source text into a positioned token stream.
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

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ScriptError, ScriptResult};
use crate::lexer::keywords::{keyword, symbol};
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

static INT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9][_0-9a-zA-Z]*$").expect("valid integer pattern"));
static NAME_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_a-zA-Z][_0-9a-zA-Z]*$").expect("valid name pattern"));

fn is_int(text: &str) -> bool {
    INT_RUN.is_match(text)
}

fn is_name(text: &str) -> bool {
    NAME_RUN.is_match(text)
}

/// Greedy, run-based scanner.
///
/// Characters accumulate into a *run* until the run is a complete integer,
/// name, or symbol and appending the next character would stop it being one.
/// Whitespace, newlines, and `#` always end the current run.
pub struct Lexer {
    chars: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
    tab_size: usize,
    run: String,
    run_start: Span,
    in_comment: bool,
    pub tokens: Vec<Token>,
}

impl Lexer {
    /// Creates a lexer over `source`.
    ///
    /// `tab_size` controls how far a tab moves the column; values below 1
    /// are treated as 1.
    pub fn new(source: &str, tab_size: usize) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
            tab_size: tab_size.max(1),
            run: String::new(),
            run_start: Span::default(),
            in_comment: false,
            tokens: Vec::new(),
        }
    }

    /// Performs complete lexical analysis over the entire source input.
    ///
    /// On success `self.tokens` ends with exactly one [`TokenKind::Eof`],
    /// positioned at the last line/column reached.
    ///
    /// # Errors
    /// - A run that is no keyword, symbol, integer, or name.
    /// - A malformed integer literal (see [`int_value`]).
    pub fn scan_tokens(&mut self) -> ScriptResult<()> {
        while self.current <= self.chars.len() {
            let ch = self.chars.get(self.current).copied();
            let mut terminate = false;
            let mut consumed = true;

            match ch {
                None => terminate = true,
                Some('\n') => {
                    self.line += 1;
                    self.column = 1;
                    self.in_comment = false;
                    terminate = true;
                }
                Some(' ') => {
                    self.column += 1;
                    terminate = true;
                }
                Some('\t') => {
                    self.column += self.tab_size - (self.column - 1) % self.tab_size;
                    terminate = true;
                }
                Some('\r') => terminate = true,
                Some(_) if self.in_comment => self.column += 1,
                Some('#') => {
                    self.in_comment = true;
                    self.column += 1;
                    terminate = true;
                }
                Some(c) => {
                    if self.run_ends_before(c) {
                        // Re-read `c` as the start of the next run.
                        terminate = true;
                        consumed = false;
                    } else {
                        self.column += 1;
                        self.run.push(c);
                    }
                }
            }

            if terminate {
                self.finish_run()?;
                self.run_start = Span::new(self.line, self.column);
            }

            if consumed {
                self.current += 1;
            }
        }

        self.tokens.push(Token::new(TokenKind::Eof, "", self.run_start));
        Ok(())
    }

    /// True when the run is complete and `next` would break it.
    fn run_ends_before(&self, next: char) -> bool {
        if self.run.is_empty() {
            return false;
        }

        let mut extended = self.run.clone();
        extended.push(next);

        (is_int(&self.run) && !is_int(&extended))
            || (is_name(&self.run) && !is_name(&extended))
            || (symbol(&self.run).is_some() && symbol(&extended).is_none())
    }

    /// Classifies the pending run and emits it as a token.
    fn finish_run(&mut self) -> ScriptResult<()> {
        if self.run.is_empty() {
            return Ok(());
        }

        let text = std::mem::take(&mut self.run);
        let kind = classify(&text).ok_or_else(|| {
            ScriptError::syntax_error(
                format!("Unrecognized token '{}' at {}.", text, self.run_start),
                self.run_start,
            )
        })?;

        if kind == TokenKind::Int {
            int_value(&text, self.run_start)?;
        }

        self.tokens.push(Token::new(kind, text, self.run_start));
        Ok(())
    }
}

/// Keyword first, then symbol, then integer, then name.
fn classify(text: &str) -> Option<TokenKind> {
    keyword(text).or_else(|| symbol(text)).or_else(|| {
        if is_int(text) {
            Some(TokenKind::Int)
        } else if is_name(text) {
            Some(TokenKind::Name)
        } else {
            None
        }
    })
}

/// Computes the value of an integer literal.
///
/// ```text
/// 100_000  -> 100000
/// 0xF2f    -> 3887
/// 0b10_10  -> 10
/// ```
///
/// # Errors
/// A syntax error at `span` when a digit is invalid for the literal's base,
/// when no digits follow the prefix, or when the value does not fit in `i64`.
pub fn int_value(text: &str, span: Span) -> ScriptResult<i64> {
    let (base, digits) = match text.get(..2) {
        Some("0x" | "0X") => (16, &text[2..]),
        Some("0b" | "0B") => (2, &text[2..]),
        _ => (10, text),
    };

    let mut value: i64 = 0;
    let mut count = 0usize;

    for c in digits.chars().filter(|c| *c != '_') {
        let digit = c.to_digit(base).ok_or_else(|| {
            ScriptError::syntax_error(
                format!("Invalid digit '{}' in integer literal '{}' at {}.", c, text, span),
                span,
            )
        })?;

        value = value
            .checked_mul(i64::from(base))
            .and_then(|v| v.checked_add(i64::from(digit)))
            .ok_or_else(|| {
                ScriptError::syntax_error(
                    format!("Integer literal '{}' is out of range at {}.", text, span),
                    span,
                )
            })?;
        count += 1;
    }

    if count == 0 {
        return Err(ScriptError::syntax_error(
            format!("Integer literal '{}' has no digits at {}.", text, span),
            span,
        ));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn tok(kind: TokenKind, lexeme: &str, line: usize, column: usize) -> Token {
        Token::new(kind, lexeme, Span::new(line, column))
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(tokenize("").unwrap(), vec![tok(TokenKind::Eof, "", 1, 1)]);
    }

    #[test]
    fn keywords_with_positions() {
        let tokens = tokenize("var fn if else while\nreturn continue break for").unwrap();
        assert_eq!(
            tokens,
            vec![
                tok(TokenKind::Var, "var", 1, 1),
                tok(TokenKind::Fn, "fn", 1, 5),
                tok(TokenKind::If, "if", 1, 8),
                tok(TokenKind::Else, "else", 1, 11),
                tok(TokenKind::While, "while", 1, 16),
                tok(TokenKind::Return, "return", 2, 1),
                tok(TokenKind::Continue, "continue", 2, 8),
                tok(TokenKind::Break, "break", 2, 17),
                tok(TokenKind::For, "for", 2, 23),
                tok(TokenKind::Eof, "", 2, 26),
            ]
        );
    }

    #[test]
    fn tabs_advance_to_next_stop() {
        let tokens = tokenize(" \tif\t if\t \n if\t").unwrap();
        assert_eq!(
            tokens,
            vec![
                tok(TokenKind::If, "if", 1, 5),
                tok(TokenKind::If, "if", 1, 10),
                tok(TokenKind::If, "if", 2, 2),
                tok(TokenKind::Eof, "", 2, 5),
            ]
        );
    }

    #[test]
    fn custom_tab_size() {
        let mut lexer = Lexer::new("\tx", 8);
        lexer.scan_tokens().unwrap();
        assert_eq!(lexer.tokens[0], tok(TokenKind::Name, "x", 1, 9));
    }

    #[test]
    fn integers_and_names() {
        let tokens = tokenize("1 \n 100_000 \n 0xF2f \n test \n _test_ \n _1 \n x123").unwrap();
        assert_eq!(
            tokens,
            vec![
                tok(TokenKind::Int, "1", 1, 1),
                tok(TokenKind::Int, "100_000", 2, 2),
                tok(TokenKind::Int, "0xF2f", 3, 2),
                tok(TokenKind::Name, "test", 4, 2),
                tok(TokenKind::Name, "_test_", 5, 2),
                tok(TokenKind::Name, "_1", 6, 2),
                tok(TokenKind::Name, "x123", 7, 2),
                tok(TokenKind::Eof, "", 7, 6),
            ]
        );
    }

    #[test]
    fn every_symbol() {
        let tokens = tokenize("( ) { } [ ] < > = == != <= >= && || ! + - * / % , ;").unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LSquare,
                TokenKind::RSquare,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Assign,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::LessEq,
                TokenKind::GreaterEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Bang,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[22].span, Span::new(1, 51));
        assert_eq!(tokens[23].span, Span::new(1, 52));
    }

    #[test]
    fn adjacent_symbols_match_longest() {
        let tokens = tokenize("+-<=== >=> ===").unwrap();
        assert_eq!(
            tokens,
            vec![
                tok(TokenKind::Plus, "+", 1, 1),
                tok(TokenKind::Minus, "-", 1, 2),
                tok(TokenKind::LessEq, "<=", 1, 3),
                tok(TokenKind::EqEq, "==", 1, 5),
                tok(TokenKind::GreaterEq, ">=", 1, 8),
                tok(TokenKind::Greater, ">", 1, 10),
                tok(TokenKind::EqEq, "==", 1, 12),
                tok(TokenKind::Assign, "=", 1, 14),
                tok(TokenKind::Eof, "", 1, 15),
            ]
        );
    }

    #[test]
    fn names_split_from_symbols() {
        let lexemes: Vec<String> = tokenize("f(x)[0]")
            .unwrap()
            .into_iter()
            .map(|t| t.lexeme)
            .collect();
        assert_eq!(lexemes, vec!["f", "(", "x", ")", "[", "0", "]", ""]);
    }

    #[test]
    fn comments_run_to_end_of_line() {
        let tokens = tokenize("#?test?\n+ # ?test?").unwrap();
        assert_eq!(
            tokens,
            vec![tok(TokenKind::Plus, "+", 2, 1), tok(TokenKind::Eof, "", 2, 11)]
        );
    }

    #[test]
    fn comment_ends_a_run() {
        let tokens = tokenize("x# trailing").unwrap();
        assert_eq!(tokens[0], tok(TokenKind::Name, "x", 1, 1));
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn unrecognized_run_fails() {
        let err = tokenize("var x = ?;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.message, "Unrecognized token '?;' at line 1, column 9.");
        assert_eq!(err.span, Some(Span::new(1, 9)));
    }

    #[test]
    fn malformed_integers_fail_while_lexing() {
        for source in ["0x;", "0b_____;", "0ff;", "0b12;", "0xh;", "10za;"] {
            let err = tokenize(source).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Syntax, "{source}");
        }
    }

    #[test]
    fn integer_values_by_base() {
        let at = Span::default();
        assert_eq!(int_value("123", at).unwrap(), 123);
        assert_eq!(int_value("12___3", at).unwrap(), 123);
        assert_eq!(int_value("0xf_E8", at).unwrap(), 4072);
        assert_eq!(int_value("0B10_10", at).unwrap(), 10);
        assert_eq!(int_value("9223372036854775807", at).unwrap(), i64::MAX);
        assert!(int_value("9223372036854775808", at).is_err());
    }

    #[test]
    fn every_kind_has_a_description() {
        assert_eq!(TokenKind::Name.describe(), "name");
        assert_eq!(TokenKind::Int.describe(), "integer");
        assert_eq!(TokenKind::Eof.describe(), "end of file");
        assert_eq!(TokenKind::LBrace.to_string(), "'{'");
    }
}
