use std::io::{self, Write};
use std::process;
use clap::{Command, Arg, ArgMatches};

use glox;
use glox::{Interpreter, BuildErrors};
use glox::source::ModuleSource;
use glox::parser::stmt::Stmt;
use glox::debug::print_program;
use glox::stdlib;

// sysexits.h
const EXIT_DATAERR: i32 = 65;
const EXIT_NOINPUT: i32 = 66;
const EXIT_SOFTWARE: i32 = 70;

type StdInterpreter = Interpreter<io::Stdout, io::Stderr>;

fn main() {
    env_logger::init();
    
    let app = Command::new("glox")
        .version(clap::crate_version!())
        .about("An interpreter for a small dynamically-typed scripting language")
        .arg(
            Arg::new("file")
            .index(1)
            .help("Path to input script file")
            .value_name("FILE")
        )
        .arg(
            Arg::new("cmd")
            .short('c')
            .help("Execute a snippet then exit")
            .value_name("CMD")
        )
        .arg(
            Arg::new("interactive")
            .short('i')
            .help("Drop into an interactive REPL after executing")
        )
        .arg(
            Arg::new("parse_only")
            .short('P')
            .help("Parse and print AST instead of executing")
        );
    
    let version = app.get_version().unwrap_or("").to_string();
    let args = app.get_matches();
    
    let module = 
        if let Some(s) = args.value_of("cmd") {
            Some(ModuleSource::from_string("cmd", s))
        } else {
            args.value_of("file").map(ModuleSource::from_file)
        };
    
    let module = match module {
        Some(module) => module,
        None => {
            let interpreter = Interpreter::new(stdlib::create_globals(), io::stdout(), io::stderr());
            start_repl(&args, &version, interpreter);
            return;
        },
    };
    
    if args.is_present("parse_only") {
        let status = parse_and_print_ast(&args, &module);
        process::exit(status);
    }
    
    let interpreter = match build_and_execute(&args, &module) {
        Ok(interpreter) => interpreter,
        Err(status) => process::exit(status),
    };
    
    if args.is_present("interactive") {
        start_repl(&args, &version, interpreter);
    } else if interpreter.error_count() > 0 {
        process::exit(EXIT_SOFTWARE);
    }
}

fn start_repl(_args: &ArgMatches, version: &str, interpreter: StdInterpreter) {
    println!("\nglox {}\n", version);
    Repl::new(interpreter).run();
}

fn report_build_errors(errors: &BuildErrors, module: &ModuleSource) -> i32 {
    let mut stderr = io::stderr();
    if let Err(error) = glox::print_build_errors(&mut stderr, errors, module) {
        log::error!("could not write errors: {}", error);
    }
    
    match errors {
        BuildErrors::Source(..) => EXIT_NOINPUT,
        BuildErrors::Syntax(..) => EXIT_DATAERR,
    }
}

fn build_and_execute(_args: &ArgMatches, module: &ModuleSource) -> Result<StdInterpreter, i32> {
    let program = glox::build_module(module)
        .map_err(|errors| report_build_errors(&errors, module))?;
    
    let mut interpreter = Interpreter::new(stdlib::create_globals(), io::stdout(), io::stderr());
    interpreter.interpret(&program);
    
    Ok(interpreter)
}

fn parse_and_print_ast(_args: &ArgMatches, module: &ModuleSource) -> i32 {
    match glox::build_module(module) {
        Ok(program) => {
            print!("{}", print_program(&program));
            0
        },
        Err(errors) => report_build_errors(&errors, module),
    }
}


//////// REPL ////////


const PROMT_START: &str = ">>> ";
const PROMT_CONTINUE: &str = "... ";

struct Repl {
    interpreter: StdInterpreter,
}

enum ReadLine {
    Ok(String),
    Empty,
    Restart,
    Quit,
}

impl Repl {
    pub fn new(interpreter: StdInterpreter) -> Self {
        Self { interpreter }
    }
    
    fn read_line(&self, prompt: &'static str) -> ReadLine {
        let mut stdout = io::stdout();
        if stdout.write_all(prompt.as_bytes()).and_then(|_| stdout.flush()).is_err() {
            return ReadLine::Quit;
        }
        
        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Err(error) => {
                println!("Could not read input: {}", error);
                return ReadLine::Restart;
            },
            Ok(0) => return ReadLine::Quit,  // EOF
            Ok(..) => { },
        }
        
        let input = input.trim_end().to_string();
        
        if input.is_empty() {
            return ReadLine::Empty;
        }
        
        if input == "quit" || input.contains('\x04') {
            return ReadLine::Quit;
        }
        
        ReadLine::Ok(input)
    }
    
    pub fn run(&mut self) {
        loop {
            let mut input = String::new();
            
            let parse_result = loop {
                let prompt =
                    if input.is_empty() { PROMT_START }
                    else { PROMT_CONTINUE };
                
                match self.read_line(prompt) {
                    ReadLine::Quit => return,
                    ReadLine::Restart => continue,
                    ReadLine::Empty => {
                        if input.is_empty() { continue }
                        else { break glox::parse_source(&input) }
                    },
                    ReadLine::Ok(line) => {
                        input.push_str(&line);
                        input.push('\n');
                        
                        // If the input only fails because it ended too soon, keep reading
                        let parse_result = glox::parse_source(&input);
                        if !matches!(&parse_result, Err(errors) if errors.is_incomplete()) {
                            break parse_result;
                        }
                    }
                }
            };
            
            let mut program = match parse_result {
                Ok(program) => program,
                Err(errors) => {
                    let module = ModuleSource::from_string("stdin", input);
                    report_build_errors(&errors, &module);
                    continue;
                },
            };
            
            // if the last stmt is an expression statement, convert it into a print
            if let Some(Stmt::Expression(..)) = program.last() {
                if let Some(Stmt::Expression(expr)) = program.pop() {
                    program.push(Stmt::Print(expr));
                }
            }
            
            self.interpreter.interpret(&program);
        }
    }
}
