/*
 * ==========================================================================
 * MAZESCRIPT - Scripted solvers for the maze visualizer
 * ==========================================================================
 * 
 * File:      keywords.rs
 * Purpose:   Reserved words and symbol table for MazeScript.
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

use crate::lexer::token::TokenKind;

/// Maps a reserved word to its keyword kind.
///
/// Returns `None` for anything that should lex as a plain name.
///
/// ```text
/// while   -> Some(While)
/// whilst  -> None
/// ```
pub fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "var" => TokenKind::Var,
        "fn" => TokenKind::Fn,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "for" => TokenKind::For,
        "return" => TokenKind::Return,
        "continue" => TokenKind::Continue,
        "break" => TokenKind::Break,
        _ => return None,
    };
    Some(kind)
}

pub fn is_keyword(word: &str) -> bool {
    keyword(word).is_some()
}

/// Maps bracket, operator, and punctuation text to its kind.
///
/// The lexer extends a symbol run only while the longer text is still in
/// this table, which is what makes `<=` win over `<` followed by `=`.
pub fn symbol(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "(" => TokenKind::LParen,
        ")" => TokenKind::RParen,
        "[" => TokenKind::LSquare,
        "]" => TokenKind::RSquare,
        "{" => TokenKind::LBrace,
        "}" => TokenKind::RBrace,
        "<" => TokenKind::Less,
        ">" => TokenKind::Greater,
        "=" => TokenKind::Assign,
        "==" => TokenKind::EqEq,
        "!=" => TokenKind::NotEq,
        "<=" => TokenKind::LessEq,
        ">=" => TokenKind::GreaterEq,
        "&&" => TokenKind::AndAnd,
        "||" => TokenKind::OrOr,
        "!" => TokenKind::Bang,
        "+" => TokenKind::Plus,
        "-" => TokenKind::Minus,
        "*" => TokenKind::Star,
        "/" => TokenKind::Slash,
        "%" => TokenKind::Percent,
        "," => TokenKind::Comma,
        ";" => TokenKind::Semicolon,
        _ => return None,
    };
    Some(kind)
}
