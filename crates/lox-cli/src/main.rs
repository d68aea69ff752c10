//! Lox CLI - command-line front end for the Lox scanner and parser.
//!
//! Runs a script file or an interactive prompt, printing the scanned
//! token sequence and the parsed expression for each input.

use std::env;
use std::fs;
use std::process;

use lox::scan;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.len() {
        0 => {
            if let Err(e) = run_prompt() {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        1 => run_file(&args[0]),
        _ => {
            println!("Usage: lox [script]");
            process::exit(64);
        }
    }
}

fn run_file(path: &str) {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Could not read {}: {}", path, e);
            process::exit(1);
        }
    };

    if run(&source) {
        process::exit(65);
    }
}

fn run_prompt() -> Result<(), String> {
    println!("Lox - Ctrl+D to quit");

    let mut rl = DefaultEditor::new().map_err(|e| format!("Failed to create editor: {}", e))?;

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str()).ok();
                // Errors are already reported; the prompt keeps going.
                run(&line);
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(e) => {
                return Err(format!("Readline error: {}", e));
            }
        }
    }

    Ok(())
}

/// Scan and parse one chunk of source, printing tokens and the
/// expression tree to stdout and diagnostics to stderr. Returns whether
/// any error occurred.
fn run(source: &str) -> bool {
    let (tokens, scan_errors) = scan(source);

    for error in &scan_errors {
        eprintln!("{}", error);
    }
    for token in &tokens {
        println!("{}", token);
    }

    let mut had_error = !scan_errors.is_empty();

    match lox::parser::parse(tokens) {
        Ok(expr) => println!("{}", expr),
        Err(error) => {
            eprintln!("{}", error);
            had_error = true;
        }
    }

    had_error
}
