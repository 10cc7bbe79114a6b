mod errors;
mod tests;

pub mod expr;
pub mod stmt;
pub mod operator;

pub use errors::{ParserError, ParserErrorKind, ErrorKind, ContextTag, Location};

use std::rc::Rc;
use crate::language::{MAX_ARGUMENTS, MAX_NESTING};
use crate::lexer::{Token, TokenKind, Literal};

use expr::{Expr, Ident, Ternary, Call};
use stmt::{Stmt, Branch, FunctionDecl};
use operator::{UnaryOp, BinaryOp, LogicalOp, Precedence, PRECEDENCE_START, PRECEDENCE_END};


/// Parse a whole program. Parsing stops at the first error, which is returned 
/// along with every statement that was completed before it.
pub fn parse(tokens: &[Token]) -> (Vec<Stmt>, Option<ParserError>) {
    Parser::new(tokens).parse_program()
}


// Recursive descent parser

pub struct Parser<'t> {
    tokens: Vec<&'t Token>,
    eof: Token,
    current: usize,
    loop_depth: usize,      // number of enclosing loops in the current function body
    function_depth: usize,
    nesting: usize,         // depth of recursive productions, bounds native stack use
}

type ParseResult<T> = Result<T, ParserError>;

impl<'t> Parser<'t> {
    
    pub fn new(tokens: &'t [Token]) -> Self {
        // comments are never part of the grammar
        let tokens = tokens.iter()
            .filter(|token| token.kind != TokenKind::Comment)
            .collect::<Vec<_>>();
        
        // in case the token stream was not terminated
        let last_line = tokens.last().map_or(1, |token| token.line);
        
        Parser {
            tokens,
            eof: Token::eof(last_line),
            current: 0,
            loop_depth: 0,
            function_depth: 0,
            nesting: 0,
        }
    }
    
    fn peek(&self) -> &Token {
        self.tokens.get(self.current).copied()
            .filter(|token| !token.is_eof())
            .unwrap_or(&self.eof)
    }
    
    fn at_end(&self) -> bool { self.peek().is_eof() }
    
    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }
    
    fn advance(&mut self) -> Token {
        let next = self.peek().clone();
        if !next.is_eof() {
            self.current += 1;
        }
        next
    }
    
    fn advance_if(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }
    
    fn expect(&mut self, kind: TokenKind, error: ErrorKind) -> ParseResult<Token> {
        self.advance_if(kind).ok_or_else(|| self.error(error))
    }
    
    // error located at the next token
    fn error(&self, kind: ErrorKind) -> ParserError {
        ParserError::new(kind, self.peek())
    }
    
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.nesting >= MAX_NESTING {
            return Err(self.error(ErrorKind::TooDeeplyNested));
        }
        
        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }
    
    pub fn parse_program(mut self) -> (Vec<Stmt>, Option<ParserError>) {
        let mut stmts = Vec::new();
        
        while !self.at_end() {
            match self.parse_declaration() {
                Ok(stmt) => stmts.push(stmt),
                Err(error) => {
                    log::debug!("parse aborted after {} statements: {}", stmts.len(), error);
                    return (stmts, Some(error));
                }
            }
        }
        
        log::debug!("parsed {} statements", stmts.len());
        (stmts, None)
    }
    
    /*** Statement Parsing ***/
    
    fn parse_declaration(&mut self) -> ParseResult<Stmt> {
        if self.advance_if(TokenKind::Fun).is_some() {
            let decl = self.nested(Self::parse_function_decl)?;
            return Ok(Stmt::Function(Rc::new(decl)));
        }
        
        if self.advance_if(TokenKind::Let).is_some() {
            return self.parse_let_decl();
        }
        
        self.parse_statement()
    }
    
    fn parse_let_decl(&mut self) -> ParseResult<Stmt> {
        let name = self.parse_ident(ContextTag::LetDecl)?;
        
        let init = match self.advance_if(TokenKind::OpAssign) {
            Some(..) => Some(self.parse_expr()?),
            None => None,
        };
        
        self.expect(TokenKind::Semicolon, ErrorKind::ExpectedSemicolon(ContextTag::LetDecl))?;
        Ok(Stmt::Let { name, init })
    }
    
    fn parse_function_decl(&mut self) -> ParseResult<FunctionDecl> {
        let name = self.parse_ident(ContextTag::FunDecl)?;
        
        self.expect(TokenKind::OpenParen, ErrorKind::ExpectedOpenParen(ContextTag::FunDecl))?;
        
        let mut params = Vec::new();
        if !self.check(TokenKind::CloseParen) {
            loop {
                if params.len() >= MAX_ARGUMENTS {
                    return Err(self.error(ErrorKind::TooManyParameters));
                }
                params.push(self.parse_ident(ContextTag::Params)?);
                
                if self.advance_if(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        
        self.expect(TokenKind::CloseParen, ErrorKind::ExpectedCloseParen(ContextTag::Params))?;
        self.expect(TokenKind::OpenBrace, ErrorKind::ExpectedOpenBrace(ContextTag::FunDecl))?;
        
        // loops enclosing the declaration do not extend into the function body
        let outer_loop_depth = std::mem::replace(&mut self.loop_depth, 0);
        self.function_depth += 1;
        
        let body = self.parse_block_body(ContextTag::FunDecl);
        
        self.function_depth -= 1;
        self.loop_depth = outer_loop_depth;
        
        Ok(FunctionDecl {
            name,
            params: params.into_boxed_slice(),
            body: body?.into_boxed_slice(),
        })
    }
    
    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        self.nested(Self::parse_statement_kind)
    }
    
    fn parse_statement_kind(&mut self) -> ParseResult<Stmt> {
        let next = self.peek();
        match next.kind {
            TokenKind::Print => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semicolon, ErrorKind::ExpectedSemicolon(ContextTag::PrintStmt))?;
                Ok(Stmt::Print(expr))
            },
            
            TokenKind::OpenBrace => {
                self.advance();
                let stmts = self.parse_block_body(ContextTag::Block)?;
                Ok(Stmt::Block(stmts.into_boxed_slice()))
            },
            
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            
            TokenKind::Break | TokenKind::Continue => self.parse_branch_stmt(),
            
            TokenKind::Return => self.parse_return_stmt(),
            
            _ => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semicolon, ErrorKind::ExpectedSemicolon(ContextTag::ExprStmt))?;
                Ok(Stmt::Expression(expr))
            },
        }
    }
    
    // assumes the opening brace has been consumed already
    fn parse_block_body(&mut self, ctx: ContextTag) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !self.check(TokenKind::CloseBrace) && !self.at_end() {
            stmts.push(self.parse_declaration()?);
        }
        
        self.expect(TokenKind::CloseBrace, ErrorKind::ExpectedCloseBrace(ctx))?;
        Ok(stmts)
    }
    
    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        self.advance();
        
        let condition = self.parse_condition(ContextTag::IfStmt)?;
        let then_branch = Box::new(self.parse_statement()?);
        
        let else_branch = match self.advance_if(TokenKind::Else) {
            Some(..) => Some(Box::new(self.parse_statement()?)),
            None => None,
        };
        
        Ok(Stmt::If { condition, then_branch, else_branch })
    }
    
    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        self.advance();
        
        let condition = self.parse_condition(ContextTag::WhileStmt)?;
        let body = Box::new(self.parse_loop_body()?);
        
        Ok(Stmt::While { condition, body })
    }
    
    // parenthesized condition of an if or while statement
    fn parse_condition(&mut self, ctx: ContextTag) -> ParseResult<Expr> {
        self.expect(TokenKind::OpenParen, ErrorKind::ExpectedOpenParen(ctx))?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::CloseParen, ErrorKind::ExpectedCloseParen(ctx))?;
        Ok(condition)
    }
    
    fn parse_loop_body(&mut self) -> ParseResult<Stmt> {
        self.loop_depth += 1;
        let body = self.parse_statement();
        self.loop_depth -= 1;
        body
    }
    
    /// `for` has no node of its own, it is rewritten into an equivalent `while` loop:
    /// `{ init; while (cond) { body; incr; } }`
    fn parse_for_stmt(&mut self) -> ParseResult<Stmt> {
        self.advance();
        
        self.expect(TokenKind::OpenParen, ErrorKind::ExpectedOpenParen(ContextTag::ForStmt))?;
        
        let init = if self.advance_if(TokenKind::Semicolon).is_some() {
            None
        } else if self.advance_if(TokenKind::Let).is_some() {
            Some(self.parse_let_decl()?)
        } else {
            let expr = self.parse_expr()?;
            self.expect(TokenKind::Semicolon, ErrorKind::ExpectedSemicolon(ContextTag::ForStmt))?;
            Some(Stmt::Expression(expr))
        };
        
        let condition = match self.check(TokenKind::Semicolon) {
            false => self.parse_expr()?,
            true => Expr::Literal(Literal::Boolean(true)),
        };
        self.expect(TokenKind::Semicolon, ErrorKind::ExpectedSemicolon(ContextTag::ForStmt))?;
        
        let incr = match self.check(TokenKind::CloseParen) {
            false => Some(self.parse_expr()?),
            true => None,
        };
        self.expect(TokenKind::CloseParen, ErrorKind::ExpectedCloseParen(ContextTag::ForStmt))?;
        
        let mut body = self.parse_loop_body()?;
        
        if let Some(incr) = incr {
            body = Stmt::Block(vec![ body, Stmt::Expression(incr) ].into_boxed_slice());
        }
        
        let mut stmt = Stmt::While { condition, body: Box::new(body) };
        
        if let Some(init) = init {
            stmt = Stmt::Block(vec![ init, stmt ].into_boxed_slice());
        }
        
        Ok(stmt)
    }
    
    fn parse_branch_stmt(&mut self) -> ParseResult<Stmt> {
        let token = self.advance();
        let (branch, error) = match token.kind {
            TokenKind::Break => (Branch::Break, ErrorKind::BreakOutsideLoop),
            _ => (Branch::Continue, ErrorKind::ContinueOutsideLoop),
        };
        
        if self.loop_depth == 0 {
            return Err(ParserError::new(error, &token));
        }
        
        self.expect(TokenKind::Semicolon, ErrorKind::ExpectedSemicolon(ContextTag::BranchStmt))?;
        Ok(Stmt::Branch(branch, token.line))
    }
    
    fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
        let token = self.advance();
        if self.function_depth == 0 {
            return Err(ParserError::new(ErrorKind::ReturnOutsideFunction, &token));
        }
        
        let expr = match self.check(TokenKind::Semicolon) {
            false => Some(self.parse_expr()?),
            true => None,
        };
        
        self.expect(TokenKind::Semicolon, ErrorKind::ExpectedSemicolon(ContextTag::ReturnStmt))?;
        Ok(Stmt::Return(token.line, expr))
    }
    
    fn parse_ident(&mut self, ctx: ContextTag) -> ParseResult<Ident> {
        let token = self.expect(TokenKind::Identifier, ErrorKind::ExpectedIdentifier(ctx))?;
        Ok(Ident::new(token.lexeme.as_str(), token.line))
    }
    
    /*** Expression Parsing ***/
    
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.nested(Self::parse_assignment_expr)
    }
    
    fn parse_assignment_expr(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_or_expr()?;
        
        if let Some(equals) = self.advance_if(TokenKind::OpAssign) {
            // right-associative, so just recurse
            let value = self.nested(Self::parse_assignment_expr)?;
            
            let target = expr.as_assignment_target()
                .ok_or_else(|| ParserError::new(ErrorKind::InvalidAssignmentTarget, &equals))?;
            
            return Ok(Expr::Assignment { target, value: Box::new(value) });
        }
        
        Ok(expr)
    }
    
    fn parse_or_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_and_expr()?;
        
        while self.advance_if(TokenKind::Or).is_some() {
            let rhs = self.parse_and_expr()?;
            expr = Expr::Logical(LogicalOp::Or, Box::new((expr, rhs)));
        }
        
        Ok(expr)
    }
    
    fn parse_and_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_ternary_expr()?;
        
        while self.advance_if(TokenKind::And).is_some() {
            let rhs = self.parse_ternary_expr()?;
            expr = Expr::Logical(LogicalOp::And, Box::new((expr, rhs)));
        }
        
        Ok(expr)
    }
    
    // cond ? a : b, right-associative on the else branch
    fn parse_ternary_expr(&mut self) -> ParseResult<Expr> {
        let condition = self.parse_binop_expr(PRECEDENCE_START)?;
        
        if self.advance_if(TokenKind::Question).is_none() {
            return Ok(condition);
        }
        
        let then_branch = self.nested(Self::parse_ternary_expr)?;
        self.expect(TokenKind::Colon, ErrorKind::ExpectedColon)?;
        let else_branch = self.nested(Self::parse_ternary_expr)?;
        
        Ok(Expr::Ternary(Box::new(Ternary { condition, then_branch, else_branch })))
    }
    
    /*
        Binary operator syntax:
        
        operand[0] := unary ;
        operand[N] := operand[N-1] ( OPERATOR[N] operand[N-1] )* ;
        
        where N is the precedence level. Every level is left-associative.
    */
    
    fn parse_binop_expr(&mut self, level: Precedence) -> ParseResult<Expr> {
        if level == PRECEDENCE_END {
            return self.parse_unary_expr();
        }
        
        let mut expr = self.parse_binop_expr(level - 1)?;
        
        loop {
            let next = self.peek();
            let op = match BinaryOp::from_token(next.kind) {
                Some(op) if op.precedence_level() == level => op,
                _ => break,
            };
            
            let line = self.advance().line;
            let rhs = self.parse_binop_expr(level - 1)?;
            
            expr = Expr::BinaryOp { op, line, operands: Box::new((expr, rhs)) };
        }
        
        Ok(expr)
    }
    
    fn parse_unary_expr(&mut self) -> ParseResult<Expr> {
        let next = self.peek();
        if let Some(op) = UnaryOp::from_token(next.kind) {
            let line = self.advance().line;
            let operand = self.nested(Self::parse_unary_expr)?;
            return Ok(Expr::UnaryOp { op, line, operand: Box::new(operand) });
        }
        
        self.parse_call_expr()
    }
    
    fn parse_call_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary_expr()?;
        
        while self.advance_if(TokenKind::OpenParen).is_some() {
            expr = self.parse_call_args(expr)?;
        }
        
        Ok(expr)
    }
    
    fn parse_call_args(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut args = Vec::new();
        
        if !self.check(TokenKind::CloseParen) {
            loop {
                if args.len() >= MAX_ARGUMENTS {
                    return Err(self.error(ErrorKind::TooManyArguments));
                }
                args.push(self.parse_expr()?);
                
                if self.advance_if(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        
        let paren = self.expect(TokenKind::CloseParen, ErrorKind::ExpectedCloseParen(ContextTag::CallArgs))?;
        
        Ok(Expr::Call(Box::new(Call {
            callee, 
            paren,
            args: args.into_boxed_slice(),
        })))
    }
    
    fn parse_primary_expr(&mut self) -> ParseResult<Expr> {
        let next = self.peek();
        match next.kind {
            TokenKind::True | TokenKind::False | TokenKind::Nil 
            | TokenKind::NumberLiteral | TokenKind::StringLiteral => {
                let token = self.advance();
                let literal = token.literal.unwrap_or(Literal::Nil);
                Ok(Expr::Literal(literal))
            },
            
            TokenKind::Identifier => {
                let token = self.advance();
                Ok(Expr::Variable(Ident::new(token.lexeme.as_str(), token.line)))
            },
            
            TokenKind::OpenParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::CloseParen, ErrorKind::ExpectedCloseParen(ContextTag::Group))?;
                Ok(Expr::Grouping(Box::new(inner)))
            },
            
            TokenKind::Class | TokenKind::This | TokenKind::Super => 
                Err(self.error(ErrorKind::ReservedKeyword)),
            
            _ => Err(self.error(ErrorKind::ExpectedStartOfExpr)),
        }
    }
}
