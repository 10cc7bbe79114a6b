#![cfg(test)]

use crate::lexer::tokenize;
use crate::parser::{parse, ParserError, ErrorKind, ContextTag, Location};
use crate::parser::expr::Expr;
use crate::parser::stmt::Stmt;
use crate::parser::operator::BinaryOp;


fn parse_source(source: &str) -> (Vec<Stmt>, Option<ParserError>) {
    let (tokens, errors) = tokenize(source);
    assert!(errors.is_empty(), "unexpected lexer errors: {:?}", errors);
    parse(&tokens)
}

fn parse_ok(source: &str) -> Vec<Stmt> {
    let (program, error) = parse_source(source);
    assert!(error.is_none(), "unexpected error: {:?}", error);
    program
}

fn parse_err(source: &str) -> ParserError {
    let (_, error) = parse_source(source);
    error.unwrap_or_else(|| panic!("expected parse error for {:?}", source))
}

fn print_expr(source: &str) -> String {
    let program = parse_ok(&format!("{};", source));
    match &program[..] {
        [Stmt::Expression(expr)] => expr.to_string(),
        other => panic!("unexpected output: {:?}", other),
    }
}


#[test]
fn parse_binary_precedence() {
    assert_eq!(print_expr("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(print_expr("(1 + 2) * 3"), "(* (group (+ 1 2)) 3)");
    assert_eq!(print_expr("1 < 2 == 3 >= 4"), "(== (< 1 2) (>= 3 4))");
    assert_eq!(print_expr("-a * !b"), "(* (- a) (! b))");
}

#[test]
fn parse_binary_ops_are_left_associative() {
    assert_eq!(print_expr("1 - 2 - 3"), "(- (- 1 2) 3)");
    assert_eq!(print_expr("8 / 4 / 2"), "(/ (/ 8 4) 2)");
    assert_eq!(print_expr("a == b != c"), "(!= (== a b) c)");
}

#[test]
fn parse_logical_precedence() {
    assert_eq!(print_expr("a or b and c"), "(or a (and b c))");
    assert_eq!(print_expr("a and b or c"), "(or (and a b) c)");
    assert_eq!(print_expr("a or b or c"), "(or (or a b) c)");
}

#[test]
fn parse_ternary_binds_between_logic_and_equality() {
    assert_eq!(print_expr("a and b ? c : d"), "(and a (?: b c d))");
    assert_eq!(print_expr("a == b ? 1 : 2"), "(?: (== a b) 1 2)");
    assert_eq!(print_expr("a ? b : c ? d : e"), "(?: a b (?: c d e))");
}

#[test]
fn parse_ternary_requires_colon() {
    let error = parse_err("print a ? b;");
    assert!(matches!(error.kind(), ErrorKind::ExpectedColon), "unexpected output: {:?}", error);
    assert_eq!(error.location(), &Location::At(";".to_string()));
}

#[test]
fn parse_assignment_is_right_associative() {
    assert_eq!(print_expr("a = b = 3"), "(= a (= b 3))");
    assert_eq!(print_expr("a = b or c"), "(= a (or b c))");
}

#[test]
fn parse_invalid_assignment_target() {
    let error = parse_err("let a = 1;\n(a) = 2;");
    assert!(matches!(error.kind(), ErrorKind::InvalidAssignmentTarget), "unexpected output: {:?}", error);
    assert_eq!(error.line(), 2);
    assert_eq!(error.location(), &Location::At("=".to_string()));
    
    let error = parse_err("a + b = c;");
    assert!(matches!(error.kind(), ErrorKind::InvalidAssignmentTarget), "unexpected output: {:?}", error);
}

#[test]
fn parse_chained_calls() {
    assert_eq!(print_expr("f(1)(2, 3)()"), "(call (call (call f 1) 2 3))");
    
    let program = parse_ok("f(\na,\nb\n);");
    let call = match &program[..] {
        [Stmt::Expression(Expr::Call(call))] => call,
        other => panic!("unexpected output: {:?}", other),
    };
    assert_eq!(call.paren.line, 4);
    assert_eq!(call.args.len(), 2);
}

#[test]
fn parse_argument_and_parameter_limits() {
    let args = vec!["1"; 255].join(", ");
    parse_ok(&format!("f({});", args));
    
    let args = vec!["1"; 256].join(", ");
    let error = parse_err(&format!("f({});", args));
    assert!(matches!(error.kind(), ErrorKind::TooManyArguments), "unexpected output: {:?}", error);
    
    let params = (0..255).map(|idx| format!("p{}", idx)).collect::<Vec<_>>().join(", ");
    parse_ok(&format!("fun f({}) {{ }}", params));
    
    let params = (0..256).map(|idx| format!("p{}", idx)).collect::<Vec<_>>().join(", ");
    let error = parse_err(&format!("fun f({}) {{ }}", params));
    assert!(matches!(error.kind(), ErrorKind::TooManyParameters), "unexpected output: {:?}", error);
}

#[test]
fn parse_for_loop_defaults() {
    let program = parse_ok("for (;;) break;");
    assert_eq!(program[0].to_string(), "(while true (break))");
    
    let program = parse_ok("for (i = 0; i < 2;) print i;");
    assert_eq!(program[0].to_string(), "(block (; (= i 0)) (while (< i 2) (print i)))");
}

#[test]
fn parse_branch_outside_loop() {
    let error = parse_err("print 1;\nbreak;");
    assert!(matches!(error.kind(), ErrorKind::BreakOutsideLoop), "unexpected output: {:?}", error);
    assert_eq!(error.line(), 2);
    
    let error = parse_err("if (true) { continue; }");
    assert!(matches!(error.kind(), ErrorKind::ContinueOutsideLoop), "unexpected output: {:?}", error);
    
    // a function body does not inherit the enclosing loop
    let error = parse_err("while (true) { fun f() { break; } }");
    assert!(matches!(error.kind(), ErrorKind::BreakOutsideLoop), "unexpected output: {:?}", error);
    
    parse_ok("while (true) { if (x) { break; } else { continue; } }");
    parse_ok("fun f() { while (true) { for (;;) { break; } continue; } }");
}

#[test]
fn parse_return_only_inside_functions() {
    let error = parse_err("return 1;");
    assert!(matches!(error.kind(), ErrorKind::ReturnOutsideFunction), "unexpected output: {:?}", error);
    
    parse_ok("fun f() { if (true) return; while (true) { return 2; } }");
}

#[test]
fn parse_missing_terminators() {
    let error = parse_err("print 1");
    assert!(matches!(error.kind(), ErrorKind::ExpectedSemicolon(ContextTag::PrintStmt)), "unexpected output: {:?}", error);
    assert_eq!(error.location(), &Location::End);
    
    let error = parse_err("{ print 1;");
    assert!(matches!(error.kind(), ErrorKind::ExpectedCloseBrace(ContextTag::Block)), "unexpected output: {:?}", error);
    
    let error = parse_err("print (1 + 2;");
    assert!(matches!(error.kind(), ErrorKind::ExpectedCloseParen(ContextTag::Group)), "unexpected output: {:?}", error);
    
    let error = parse_err("let = 3;");
    assert!(matches!(error.kind(), ErrorKind::ExpectedIdentifier(ContextTag::LetDecl)), "unexpected output: {:?}", error);
}

#[test]
fn parse_aborts_on_first_error() {
    let (program, error) = parse_source("print 1;\nprint 2;\nprint ;\nprint 3;");
    
    assert_eq!(program.len(), 2);
    let error = error.unwrap();
    assert!(matches!(error.kind(), ErrorKind::ExpectedStartOfExpr), "unexpected output: {:?}", error);
    assert_eq!(error.line(), 3);
    assert_eq!(error.to_string(), "expected expression at ';'");
}

#[test]
fn parse_limits_nesting_depth() {
    let depth = 10_000;
    
    let sources = [
        format!("print {}1{};", "(".repeat(depth), ")".repeat(depth)),
        format!("print {}1;", "-".repeat(depth)),
        format!("{}{}", "{".repeat(depth), "}".repeat(depth)),
        format!("print {}1;", "true ? 1 : ".repeat(depth)),
        format!("{}1;", "x = ".repeat(depth)),
        format!("{}", "fun f() { ".repeat(depth)),
    ];
    
    for source in sources.iter() {
        let error = parse_err(source);
        assert!(matches!(error.kind(), ErrorKind::TooDeeplyNested), "unexpected output: {:?}", error);
    }
    
    // ordinary nesting is unaffected
    parse_ok(&format!("print {}1{};", "(".repeat(50), ")".repeat(50)));
    parse_ok(&format!("print {}1;", "!".repeat(50)));
    parse_ok(&format!("{}{}", "{".repeat(50), "}".repeat(50)));
}

#[test]
fn parse_rejects_reserved_keywords() {
    let error = parse_err("print this;");
    assert!(matches!(error.kind(), ErrorKind::ReservedKeyword), "unexpected output: {:?}", error);
    
    let error = parse_err("class Foo {}");
    assert!(matches!(error.kind(), ErrorKind::ReservedKeyword), "unexpected output: {:?}", error);
}

#[test]
fn parse_binary_nodes_carry_operator_line() {
    let program = parse_ok("print 1\n+\n2;");
    match &program[..] {
        [Stmt::Print(Expr::BinaryOp { op: BinaryOp::Add, line, .. })] => assert_eq!(*line, 2),
        other => panic!("unexpected output: {:?}", other),
    }
}

#[test]
fn parse_ignores_comment_tokens() {
    use crate::lexer::{LexerBuilder, Token};
    
    let tokens = LexerBuilder::new()
        .set_skip_comments(false)
        .build("print /* inline */ 1; // done")
        .collect::<Result<Vec<Token>, _>>()
        .unwrap();
    
    let (program, error) = parse(&tokens);
    assert!(error.is_none(), "unexpected error: {:?}", error);
    assert_eq!(program.len(), 1);
}
