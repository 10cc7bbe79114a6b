mod token;
mod errors;

pub use token::*;
pub use errors::*;

use std::rc::Rc;
use crate::language::{self, LineNo};


/// Scan the whole source text, returning every token found (terminated by an EOF token)
/// together with any diagnostics produced along the way.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<LexerError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for result in LexerBuilder::new().build(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(error) => errors.push(error),
        }
    }

    log::debug!("scanned {} tokens ({} errors)", tokens.len(), errors.len());
    (tokens, errors)
}


// Lexer Builder

#[derive(Debug, Clone)]
pub struct LexerOptions {
    skip_comments: bool,
}

#[derive(Debug, Clone)]
pub struct LexerBuilder {
    options: LexerOptions,
}

impl Default for LexerBuilder {
    fn default() -> Self { Self::new() }
}

impl LexerBuilder {
    pub fn new() -> Self {
        LexerBuilder {
            options: LexerOptions {
                skip_comments: true,
            }
        }
    }

    pub fn set_skip_comments(mut self, skip_comments: bool) -> Self {
        self.options.skip_comments = skip_comments;
        self
    }

    pub fn build<'s>(&self, source: &'s str) -> Lexer<'s> {
        Lexer::new(source, self.options.clone())
    }
}


// Lexer

pub struct Lexer<'s> {
    source: &'s str,
    options: LexerOptions,

    start: usize,    // byte offset of the token being scanned
    current: usize,  // byte offset of the next char
    line: LineNo,
    done: bool,      // true once EOF has been emitted
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            None
        } else {
            Some(self.next_token())
        }
    }
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s str, options: LexerOptions) -> Self {
        Lexer {
            source,
            options,
            start: 0,
            current: 0,
            line: 1,
            done: false,
        }
    }

    pub fn line(&self) -> LineNo { self.line }

    pub fn at_eof(&self) -> bool {
        self.current >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.source[self.current..].chars().nth(1)
    }

    // consumes the next char, counting newlines wherever they occur
    fn advance(&mut self) -> Option<char> {
        let next = self.peek()?;
        self.current += next.len_utf8();
        if next == '\n' {
            self.line += 1;
        }
        Some(next)
    }

    // consumes the next char only if it is the expected one
    fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance_if_str(&mut self, expected: &str) -> bool {
        if self.source[self.current..].starts_with(expected) {
            for _ in expected.chars() {
                self.advance();
            }
            true
        } else {
            false
        }
    }

    fn lexeme(&self) -> &'s str {
        &self.source[self.start..self.current]
    }

    fn skip_whitespace(&mut self) {
        while let Some(next) = self.peek() {
            if !next.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        loop {
            self.skip_whitespace();

            let token = self.scan_token()?;
            if token.kind == TokenKind::Comment && self.options.skip_comments {
                continue;
            }
            return Ok(token);
        }
    }

    fn scan_token(&mut self) -> Result<Token, LexerError> {
        self.start = self.current;

        let next = match self.advance() {
            Some(ch) => ch,
            None => {
                self.done = true;
                return Ok(Token::eof(self.line));
            }
        };

        let kind = match next {
            // Punctuation
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,

            // Arithmetic operators
            '+' => TokenKind::OpAdd,
            '-' => TokenKind::OpSub,
            '*' => TokenKind::OpMul,
            '/' => {
                if self.at_comment_start() {
                    return self.scan_comment();
                }
                TokenKind::OpDiv
            },

            // One or two char operators
            '!' => if self.advance_if('=') { TokenKind::OpNE } else { TokenKind::OpNot },
            '=' => if self.advance_if('=') { TokenKind::OpEQ } else { TokenKind::OpAssign },
            '<' => if self.advance_if('=') { TokenKind::OpLE } else { TokenKind::OpLT },
            '>' => if self.advance_if('=') { TokenKind::OpGE } else { TokenKind::OpGT },

            // Literals and identifiers
            '"' => return self.scan_string(),
            ch if ch.is_ascii_digit() => return self.scan_number(),
            ch if is_ident_start(ch) => return Ok(self.scan_identifier()),

            ch => return Err(LexerError::new(ErrorKind::UnexpectedChar(ch), self.line)),
        };

        Ok(self.make_token(kind, None))
    }

    fn make_token(&self, kind: TokenKind, literal: Option<Literal>) -> Token {
        Token::new(kind, self.lexeme(), literal, self.line)
    }

    // checks the char after a '/' that has already been consumed
    fn at_comment_start(&self) -> bool {
        let rest = &self.source[self.start..];
        rest.starts_with(language::LINE_COMMENT) || rest.starts_with(language::BLOCK_COMMENT_START)
    }

    fn scan_comment(&mut self) -> Result<Token, LexerError> {
        let start_line = self.line;

        // line comment, runs until the end of the line (the newline itself is not part of it)
        if self.advance_if('/') {
            while !matches!(self.peek(), Some('\n') | None) {
                self.advance();
            }
            return Ok(Token::new(TokenKind::Comment, self.lexeme(), None, start_line));
        }

        // block comment, may span lines
        self.advance_if('*');
        loop {
            if self.advance_if_str(language::BLOCK_COMMENT_END) {
                return Ok(Token::new(TokenKind::Comment, self.lexeme(), None, start_line));
            }
            if self.advance().is_none() {
                return Err(LexerError::new(ErrorKind::UnterminatedComment, start_line));
            }
        }
    }

    fn scan_string(&mut self) -> Result<Token, LexerError> {
        let start_line = self.line;

        loop {
            match self.advance() {
                Some('"') => break,
                Some(_) => { },  // multi-line strings are allowed
                None => return Err(LexerError::new(ErrorKind::UnterminatedString, start_line)),
            }
        }

        let lexeme = self.lexeme();
        let value = &lexeme[1..lexeme.len()-1];
        let literal = Literal::String(Rc::from(value));
        Ok(Token::new(TokenKind::StringLiteral, lexeme, Some(literal), start_line))
    }

    fn scan_number(&mut self) -> Result<Token, LexerError> {
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
            self.advance();
        }

        // fractional part requires at least one digit after the '.'
        if self.peek() == Some('.') && matches!(self.peek_next(), Some(ch) if ch.is_ascii_digit()) {
            self.advance();
            while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
                self.advance();
            }
        }

        let lexeme = self.lexeme();
        match lexeme.parse::<language::FloatType>() {
            Ok(value) => Ok(self.make_token(TokenKind::NumberLiteral, Some(Literal::Number(value)))),
            Err(..) => Err(LexerError::new(ErrorKind::InvalidNumber(lexeme.to_string()), self.line)),
        }
    }

    fn scan_identifier(&mut self) -> Token {
        while matches!(self.peek(), Some(ch) if is_ident_char(ch)) {
            self.advance();
        }

        let lexeme = self.lexeme();
        match language::lookup_keyword(lexeme) {
            Some(TokenKind::True) => self.make_token(TokenKind::True, Some(Literal::Boolean(true))),
            Some(TokenKind::False) => self.make_token(TokenKind::False, Some(Literal::Boolean(false))),
            Some(TokenKind::Nil) => self.make_token(TokenKind::Nil, Some(Literal::Nil)),
            Some(keyword) => self.make_token(keyword, None),
            None => self.make_token(TokenKind::Identifier, None),
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_char(ch: char) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}
