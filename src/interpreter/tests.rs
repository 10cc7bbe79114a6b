#![cfg(test)]

use std::rc::Rc;
use std::cell::Cell;
use std::thread;

use crate::{parse_source, BuildErrors, SyntaxError};
use crate::parser::ErrorKind as ParserErrorKind;
use crate::stdlib;
use crate::runtime::{Environment, Value, StringSymbol};
use crate::interpreter::Interpreter;
use crate::stdlib::define_native;


type TestInterpreter = Interpreter<Vec<u8>, Vec<u8>>;

fn run_in(globals: Rc<Environment>, source: &str) -> (String, String, usize) {
    let program = match parse_source(source) {
        Ok(program) => program,
        Err(errors) => panic!("unexpected build errors: {:?}", errors),
    };
    
    let mut interpreter = TestInterpreter::new(globals, Vec::new(), Vec::new());
    interpreter.interpret(&program);
    
    let error_count = interpreter.error_count();
    let (stdout, stderr) = interpreter.into_sinks();
    (String::from_utf8(stdout).unwrap(), String::from_utf8(stderr).unwrap(), error_count)
}

fn run(source: &str) -> (String, String) {
    let (stdout, stderr, _) = run_in(stdlib::create_globals(), source);
    (stdout, stderr)
}

// output of a program that is expected to run without errors
fn output(source: &str) -> String {
    let (stdout, stderr) = run(source);
    assert!(stderr.is_empty(), "unexpected errors: {}", stderr);
    stdout
}

// globals containing a native `effect()` that counts its invocations
fn counting_globals() -> (Rc<Environment>, Rc<Cell<usize>>) {
    let globals = stdlib::create_globals();
    let count = Rc::new(Cell::new(0));
    
    let counter = count.clone();
    let effect = native_function!(effect => {
        counter.set(counter.get() + 1);
        Ok(Value::Bool(true))
    });
    define_native(&globals, effect);
    
    (globals, count)
}


#[test_log::test]
fn eval_arithmetic_precedence() {
    assert_eq!(output("print 1 + 2 * 3;"), "7\n");
    assert_eq!(output("print (1 + 2) * 3;"), "9\n");
    assert_eq!(output("print 10 - 4 - 3;"), "3\n");
    assert_eq!(output("print -2 * -3;"), "6\n");
    assert_eq!(output("print 7 / 2;"), "3.5\n");
}

#[test_log::test]
fn eval_number_formatting() {
    assert_eq!(output("print 1.0; print 0.25; print -0.5; print 100;"), "1\n0.25\n-0.5\n100\n");
}

#[test_log::test]
fn eval_string_concatenation() {
    assert_eq!(output(r#"print "foo" + "bar";"#), "foobar\n");
    assert_eq!(output(r#"print "n=" + 1;"#), "n=1\n");
    assert_eq!(output(r#"print 1 + "=n";"#), "1=n\n");
    assert_eq!(output(r#"print "x" + 2.5;"#), "x2.5\n");
}

#[test_log::test]
fn eval_add_rejects_other_types() {
    let (stdout, stderr) = run("print 1 + true;");
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("[line 1] Error: "), "unexpected output: {}", stderr);
    assert!(stderr.contains("'+'"), "unexpected output: {}", stderr);
    
    let (_, stderr) = run(r#"print "a" + nil;"#);
    assert!(stderr.contains("'+'"), "unexpected output: {}", stderr);
}

#[test_log::test]
fn eval_operand_type_errors() {
    let (_, stderr) = run("print -\"text\";");
    assert_eq!(stderr, "[line 1] Error: operand of '-' must be a number, not string\n");
    
    let (_, stderr) = run("print 1 < \"2\";");
    assert_eq!(stderr, "[line 1] Error: operands of '<' must be numbers, not number and string\n");
    
    let (_, stderr) = run("print \"a\" * 2;");
    assert!(stderr.contains("'*'"), "unexpected output: {}", stderr);
}

#[test_log::test]
fn eval_division_by_zero() {
    let (stdout, stderr) = run("print 1 / 0;\nprint 0 / 0;\nprint 1 / 4;");
    assert_eq!(stdout, "0.25\n");
    assert_eq!(stderr, "[line 1] Error: division by zero\n[line 2] Error: division by zero\n");
}

#[test_log::test]
fn eval_nan_equals_itself() {
    let source = "
        let big = 1;
        for (let i = 0; i < 400; i = i + 1) big = big * 10;
        let nan = big - big;
        print nan == nan;
        print nan != nan;
        print nan < nan;
        print big;
        print -big;
        print nan;
    ";
    assert_eq!(output(source), "true\nfalse\nfalse\n+Inf\n-Inf\nNaN\n");
}

#[test_log::test]
fn eval_equality_without_coercion() {
    assert_eq!(output(r#"print 1 == 1; print 1 == "1"; print nil == false; print "a" == "a";"#), "true\nfalse\nfalse\ntrue\n");
    assert_eq!(output("fun f() {} let g = f; print f == g; print f == clock;"), "true\nfalse\n");
}

#[test_log::test]
fn eval_truthiness() {
    let source = r#"
        print !nil; print !false; print !0; print !"";
        if (0) print "zero is truthy";
        if ("") print "empty string is truthy";
    "#;
    assert_eq!(output(source), "true\ntrue\nfalse\nfalse\nzero is truthy\nempty string is truthy\n");
}

#[test_log::test]
fn eval_logical_returns_deciding_operand() {
    assert_eq!(output(r#"print nil or "default"; print 1 and 2; print false and 1; print 0 or 1;"#), "default\n2\nfalse\n0\n");
}

#[test_log::test]
fn eval_logical_short_circuits() {
    let (globals, count) = counting_globals();
    let (stdout, stderr, _) = run_in(globals, "print false and effect(); print true or effect();");
    
    assert!(stderr.is_empty(), "unexpected errors: {}", stderr);
    assert_eq!(stdout, "false\ntrue\n");
    assert_eq!(count.get(), 0);
    
    let (globals, count) = counting_globals();
    run_in(globals, "print true and effect(); print false or effect();");
    assert_eq!(count.get(), 2);
}

#[test_log::test]
fn eval_ternary_evaluates_one_branch() {
    let (globals, count) = counting_globals();
    let (stdout, _, _) = run_in(globals, "print true ? 1 : effect(); print nil ? effect() : 2;");
    
    assert_eq!(stdout, "1\n2\n");
    assert_eq!(count.get(), 0);
    
    assert_eq!(output("let x = 3; print x > 2 ? x < 5 ? \"mid\" : \"high\" : \"low\";"), "mid\n");
}

#[test_log::test]
fn eval_assignment_is_an_expression() {
    assert_eq!(output("let a; let b; a = b = 5; print a; print b; print a = 6;"), "5\n5\n6\n");
}

#[test_log::test]
fn eval_undefined_variable() {
    let (stdout, stderr) = run("print 1;\nprint missing;\nmissing = 2;\nprint 3;");
    assert_eq!(stdout, "1\n3\n");
    assert_eq!(stderr, "[line 2] Error: undefined variable 'missing'\n[line 3] Error: undefined variable 'missing'\n");
}

#[test_log::test]
fn exec_let_defaults_to_nil() {
    assert_eq!(output("let x; print x; var y = 2; print y;"), "nil\n2\n");
}

#[test_log::test]
fn exec_block_scoping() {
    let source = "
        let outer = 1;
        {
            let inner = 2;
            outer = outer + inner;
            let outer = 10;
            print outer;
        }
        print outer;
    ";
    assert_eq!(output(source), "10\n3\n");
    
    let (stdout, stderr) = run("{ let inner = 2; }\nprint inner;");
    assert!(stdout.is_empty());
    assert_eq!(stderr, "[line 2] Error: undefined variable 'inner'\n");
}

#[test_log::test]
fn exec_scope_is_restored_after_runtime_error() {
    let source = "
        let x = \"global\";
        { let x = \"local\"; print x; print 1 / 0; }
        print x;
    ";
    let (stdout, stderr) = run(source);
    assert_eq!(stdout, "local\nglobal\n");
    assert_eq!(stderr, "[line 3] Error: division by zero\n");
}

#[test_log::test]
fn exec_while_loop() {
    assert_eq!(output("let x = 1; while (x < 4) { print x; x = x + 1; }"), "1\n2\n3\n");
}

#[test_log::test]
fn exec_for_loop() {
    assert_eq!(output("for (let i = 0; i < 3; i = i + 1) print i;"), "0\n1\n2\n");
    
    // the loop variable belongs to the loop
    let (_, stderr) = run("for (let i = 0; i < 1; i = i + 1) { }\nprint i;");
    assert_eq!(stderr, "[line 2] Error: undefined variable 'i'\n");
}

#[test_log::test]
fn exec_break_and_continue() {
    let source = "
        let i = 0;
        while (true) {
            i = i + 1;
            if (i == 2) continue;
            if (i > 4) break;
            print i;
        }
        print \"done\";
    ";
    assert_eq!(output(source), "1\n3\n4\ndone\n");
}

#[test_log::test]
fn exec_break_only_exits_innermost_loop() {
    let source = "
        for (let i = 0; i < 2; i = i + 1) {
            let j = 0;
            while (true) {
                if (j == 2) break;
                print i + \":\" + j;
                j = j + 1;
            }
        }
    ";
    assert_eq!(output(source), "0:0\n0:1\n1:0\n1:1\n");
}

#[test_log::test]
fn call_user_function() {
    assert_eq!(output("fun add(a, b) { return a + b; } print add(2, 3);"), "5\n");
    assert_eq!(output("fun noop() { } print noop();"), "nil\n");
    assert_eq!(output("fun early() { return; print 1; } print early();"), "nil\n");
}

#[test_log::test]
fn call_return_unwinds_loops() {
    let source = "
        fun find(limit) {
            for (let i = 0; i < limit; i = i + 1) {
                while (true) {
                    if (i == 3) return i;
                    break;
                }
            }
            return -1;
        }
        print find(10);
        print find(2);
    ";
    assert_eq!(output(source), "3\n-1\n");
}

#[test_log::test]
fn call_recursion() {
    let source = "
        fun fib(n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }
        print fib(15);
    ";
    assert_eq!(output(source), "610\n");
}

#[test_log::test]
fn call_closures_capture_by_reference() {
    let source = "
        fun makeCounter() {
            let count = 0;
            fun increment() {
                count = count + 1;
                return count;
            }
            return increment;
        }
        
        let a = makeCounter();
        let b = makeCounter();
        print a();
        print a();
        print b();
        print a();
    ";
    assert_eq!(output(source), "1\n2\n1\n3\n");
}

#[test_log::test]
fn call_local_helpers_survive_scope_exit() {
    let source = "
        fun outer(n) {
            fun helper(x) { return x * 2; }
            return helper(n);
        }
        print outer(1);
        print outer(2);
        
        fun pair() {
            fun first() { return second(); }
            fun second() { return \"second\"; }
            return first;
        }
        let f = pair();
        print f();
        
        {
            fun inner() { return \"block\"; }
            f = inner;
        }
        print f();
    ";
    assert_eq!(output(source), "2\n4\nsecond\nblock\n");
}

#[test_log::test]
fn call_closures_are_lexically_scoped() {
    let source = "
        let name = \"global\";
        fun show() { print name; }
        fun caller() {
            let name = \"caller\";
            show();
        }
        caller();
    ";
    assert_eq!(output(source), "global\n");
}

#[test_log::test]
fn call_each_invocation_has_fresh_parameters() {
    let source = "
        fun adder(n) {
            fun add(x) { return x + n; }
            return add;
        }
        let add1 = adder(1);
        let add10 = adder(10);
        print add1(5);
        print add10(5);
    ";
    assert_eq!(output(source), "6\n15\n");
}

#[test_log::test]
fn call_arity_mismatch() {
    let (stdout, stderr) = run("fun f(a, b) { print a; }\nf(1);\nprint clock(1);");
    assert!(stdout.is_empty());
    assert_eq!(stderr, concat!(
        "[line 2] Error: f() takes 2 arguments but 1 was given\n",
        "[line 3] Error: clock() takes 0 arguments but 1 was given\n",
    ));
}

#[test_log::test]
fn call_non_callable() {
    let (_, stderr) = run("let x = 1;\nx();\n\"str\"();");
    assert_eq!(stderr, concat!(
        "[line 2] Error: can only call functions, not number\n",
        "[line 3] Error: can only call functions, not string\n",
    ));
}

#[test_log::test]
fn call_error_reports_innermost_line() {
    let source = "fun inner() {\n  return nil + 1;\n}\nfun outer() { return inner(); }\nouter();";
    let (_, stderr) = run(source);
    assert!(stderr.starts_with("[line 2] Error: "), "unexpected output: {}", stderr);
}

#[test_log::test]
fn call_native_function() {
    let (stdout, stderr) = run("let t = clock(); print t > 0; print clock;");
    assert!(stderr.is_empty(), "unexpected errors: {}", stderr);
    assert_eq!(stdout, "true\n<native fn clock>\n");
    
    assert_eq!(output("fun f() {} print f;"), "<fn f>\n");
}

#[test_log::test]
fn call_native_with_params() {
    let globals = stdlib::create_globals();
    let hypot = native_function!(hypot, params(a, b) => {
        match (a, b) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number((a*a + b*b).sqrt())),
            _ => Ok(Value::Nil),
        }
    });
    define_native(&globals, hypot);
    
    let (stdout, stderr, _) = run_in(globals, "print hypot(3, 4); print hypot(1, \"x\");");
    assert!(stderr.is_empty(), "unexpected errors: {}", stderr);
    assert_eq!(stdout, "5\nnil\n");
}

#[test_log::test]
fn call_depth_is_limited() {
    // deep recursion needs more stack than the default test thread provides
    let handle = thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| run("fun recurse(n) { return recurse(n + 1); }\nrecurse(0);\nprint \"after\";"))
        .unwrap();
    
    let (stdout, stderr) = handle.join().unwrap();
    assert_eq!(stdout, "after\n");
    assert_eq!(stderr, "[line 1] Error: stack overflow\n");
}

#[test_log::test]
fn deep_nesting_is_a_syntax_error() {
    let source = format!("print {}1{};", "(".repeat(3000), ")".repeat(3000));
    
    match parse_source(&source) {
        Err(BuildErrors::Syntax(errors)) => assert!(matches!(
            &errors[..], [SyntaxError::Parser(error)] if matches!(error.kind(), ParserErrorKind::TooDeeplyNested)
        ), "unexpected output: {:?}", errors),
        other => panic!("unexpected output: {:?}", other),
    }
    
    let source = format!("print {}1;", "-".repeat(50_000));
    assert!(matches!(parse_source(&source), Err(BuildErrors::Syntax(..))));
}

#[test_log::test]
fn runtime_errors_do_not_stop_the_program() {
    let (stdout, stderr, error_count) = run_in(
        stdlib::create_globals(), 
        "print 1;\nprint nil + 1;\nprint 2;\nprint -nil;\nprint 3;",
    );
    
    assert_eq!(stdout, "1\n2\n3\n");
    assert_eq!(stderr.lines().count(), 2);
    assert_eq!(error_count, 2);
}

#[test_log::test]
fn globals_persist_between_runs() {
    let globals = stdlib::create_globals();
    
    let program = parse_source("let x = 41; fun bump() { x = x + 1; }").unwrap();
    let mut interpreter = TestInterpreter::new(globals.clone(), Vec::new(), Vec::new());
    interpreter.interpret(&program);
    
    let program = parse_source("bump(); print x;").unwrap();
    interpreter.interpret(&program);
    
    assert_eq!(interpreter.stdout().as_slice(), b"42\n");
    assert_eq!(globals.get(StringSymbol::intern("x")).unwrap(), Value::Number(42.0));
}
