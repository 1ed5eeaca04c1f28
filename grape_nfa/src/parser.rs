//! Turns a pattern into a postfix token stream.
//!
//! Parsing runs in three passes, each feeding the next:
//!
//! 1. [`tokenize`] splits the pattern into [`Token`]s.
//! 2. [`insert_concats`] makes concatenation explicit.
//! 3. [`to_postfix`] reorders the tokens with the shunting-yard algorithm.
//!
//! None of these passes fail. Malformed input degrades to literal tokens
//! (a trailing `\`, an unterminated `[`) or is dropped (unbalanced
//! parentheses). Whatever is still wrong surfaces as a
//! [`CompileError`](crate::CompileError) when the postfix stream is
//! compiled.

use crate::token::{ByteClass, Token};

/// Parse a pattern into postfix tokens ready for
/// [`Compiler::compile`](crate::Compiler::compile).
pub fn parse(pattern: &[u8]) -> Vec<Token> {
    let tokens = tokenize(pattern);
    let tokens = insert_concats(&tokens);
    let postfix = to_postfix(&tokens);
    debug!(
        "parsed pattern of {} bytes into {} postfix tokens",
        pattern.len(),
        postfix.len()
    );
    postfix
}

/// Split a pattern into tokens, left to right.
pub fn tokenize(pattern: &[u8]) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut i = 0;
    while i < pattern.len() {
        let byte = pattern[i];
        match byte {
            b'\\' => match pattern.get(i + 1) {
                Some(&escaped) => {
                    tokens.push(escape(escaped));
                    i += 2;
                    continue;
                }
                // Nothing left to escape.
                None => tokens.push(Token::Literal(b'\\')),
            },
            b'[' if i + 1 < pattern.len() => {
                i = scan_class(pattern, i, &mut tokens);
                continue;
            }
            b'*' => tokens.push(Token::Star),
            b'+' => tokens.push(Token::Plus),
            b'?' => tokens.push(Token::Question),
            b'|' => tokens.push(Token::Alt),
            b'(' => tokens.push(Token::LParen),
            b')' => tokens.push(Token::RParen),
            b'.' => {
                tokens.push(Token::CharClass(ByteClass::any_except_newline()))
            }
            _ => tokens.push(Token::Literal(byte)),
        }
        i += 1;
    }
    tokens
}

/// The token for `\` followed by `byte`.
fn escape(byte: u8) -> Token {
    match byte {
        b'd' => Token::CharClass(ByteClass::digit()),
        b'w' => Token::CharClass(ByteClass::word()),
        _ => Token::Literal(byte),
    }
}

/// Scan a bracketed class whose `[` sits at `open`, push the resulting
/// token(s) and return the index to resume tokenizing at.
///
/// Members are taken verbatim: there are no ranges and no escapes inside a
/// class. When the closing `]` is missing, every byte from `[` to the end
/// of the pattern becomes a literal.
fn scan_class(pattern: &[u8], open: usize, tokens: &mut Vec<Token>) -> usize {
    let mut i = open + 1;
    let mut class = if pattern.get(i) == Some(&b'^') {
        i += 1;
        ByteClass::negated()
    } else {
        ByteClass::new()
    };
    while let Some(&byte) = pattern.get(i) {
        if byte == b']' {
            tokens.push(Token::CharClass(class));
            return i + 1;
        }
        class.insert(byte);
        i += 1;
    }
    debug!("unterminated class at offset {}, treating it as literals", open);
    tokens.extend(pattern[open..].iter().map(|&byte| Token::Literal(byte)));
    pattern.len()
}

/// Insert a [`Token::Concat`] between every pair of adjacent tokens where
/// the first can end an expression and the second can begin one.
pub fn insert_concats(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len() * 2);
    let mut previous: Option<&Token> = None;
    for token in tokens {
        if let Some(prev) = previous {
            if prev.can_end_expr() && token.can_begin_expr() {
                out.push(Token::Concat);
            }
        }
        out.push(token.clone());
        previous = Some(token);
    }
    out
}

/// Convert an infix token stream with explicit concatenation to postfix.
pub fn to_postfix(tokens: &[Token]) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = vec![];
    for token in tokens {
        if token.is_operand() || token.is_postfix_unary() {
            output.push(token.clone());
        } else if token.is_operator() {
            // All operators are left associative, so equal precedence pops.
            while let Some(top) = stack.last() {
                if !top.is_operator() || top.precedence() < token.precedence()
                {
                    break;
                }
                output.extend(stack.pop());
            }
            stack.push(token.clone());
        } else if *token == Token::LParen {
            stack.push(Token::LParen);
        } else if *token == Token::RParen {
            loop {
                match stack.pop() {
                    Some(Token::LParen) => break,
                    Some(op) => output.push(op),
                    None => {
                        debug!("unmatched ')' in pattern, ignoring it");
                        break;
                    }
                }
            }
        }
    }
    while let Some(token) = stack.pop() {
        if token != Token::LParen {
            output.push(token);
        }
    }
    output
}
