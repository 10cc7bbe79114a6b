use std::collections::HashMap;
use once_cell::sync::Lazy;
use crate::lexer::TokenKind;


pub type FloatType = f64;  // internal representation for all numbers

pub type LineNo = usize;


pub const MAX_ARGUMENTS: usize = 255;   // applies to both call arguments and declared parameters

pub const MAX_CALL_DEPTH: usize = 256;

// nested blocks, function declarations and sub-expressions
pub const MAX_NESTING: usize = 200;

pub static LINE_COMMENT: &str = "//";

pub static BLOCK_COMMENT_START: &str = "/*";
pub static BLOCK_COMMENT_END:   &str = "*/";


pub static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut keywords = HashMap::new();
    
    keywords.insert("and",      TokenKind::And);
    keywords.insert("or",       TokenKind::Or);
    keywords.insert("true",     TokenKind::True);
    keywords.insert("false",    TokenKind::False);
    keywords.insert("nil",      TokenKind::Nil);
    keywords.insert("let",      TokenKind::Let);
    keywords.insert("var",      TokenKind::Let);
    keywords.insert("if",       TokenKind::If);
    keywords.insert("else",     TokenKind::Else);
    keywords.insert("while",    TokenKind::While);
    keywords.insert("for",      TokenKind::For);
    keywords.insert("break",    TokenKind::Break);
    keywords.insert("continue", TokenKind::Continue);
    keywords.insert("fun",      TokenKind::Fun);
    keywords.insert("return",   TokenKind::Return);
    keywords.insert("print",    TokenKind::Print);
    keywords.insert("class",    TokenKind::Class);
    keywords.insert("this",     TokenKind::This);
    keywords.insert("super",    TokenKind::Super);
    
    keywords
});

pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    KEYWORDS.get(ident).copied()
}
