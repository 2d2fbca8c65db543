//! End-to-end scenarios through the bytecode pipeline, plus the
//! backend-parity checks for the subset both execution paths support.

use duolox::{Backend, Lox, LoxError};

fn run(backend: Backend, source: &str) -> String {
	let mut output = Vec::new();
	let mut lox = Lox::new(backend, false, &mut output);
	lox.run(source).unwrap();
	drop(lox);
	String::from_utf8(output).expect("output is valid UTF-8")
}

#[test]
fn arithmetic_scenario_matches_the_treewalk_output() {
	assert_eq!(run(Backend::Bytecode, "print 1 + 2 * 3;"), "7\n");
}

#[test]
fn backends_agree_on_arithmetic_and_logic() {
	let shared = [
		"print 1 + 2 * 3;",
		"print (1 + 2) * (3 - 4);",
		"print 9 / 2;",
		"print -(-5);",
		"print 1 + 2 == 3;",
		"print 1 < 2 and 3 >= 3;",
		"print true or false;",
		"print !false;",
		"print nil == nil;",
		"print 1 != \"1\";",
	];
	for source in shared {
		let treewalk = run(Backend::Treewalk, source);
		let bytecode = run(Backend::Bytecode, source);
		assert_eq!(treewalk, bytecode, "backends diverged on {source}");
	}
}

#[test]
fn bare_expressions_also_run() {
	assert_eq!(run(Backend::Bytecode, "2 * 3 + 4"), "10\n");
}

#[test]
fn compile_errors_exit_65() {
	let mut output = Vec::new();
	let mut lox = Lox::new(Backend::Bytecode, false, &mut output);
	let error = lox.run("(1 + 2").expect_err("unclosed grouping must fail");
	assert!(matches!(error, LoxError::Compile(_)));
	assert_eq!(error.exit_code(), 65);
}

#[test]
fn vm_type_errors_exit_70() {
	let mut output = Vec::new();
	let mut lox = Lox::new(Backend::Bytecode, false, &mut output);
	let error = lox.run("!3").expect_err("Not requires a boolean in the VM");
	assert_eq!(error.exit_code(), 70);
}
