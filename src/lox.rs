//! Driver: wires the pipeline stages together and owns the REPL loop.
//!
//! Both backends start at the same scanner and split afterwards. A [`Lox`]
//! session keeps the interpreter (and so the global environment) alive
//! between runs, which is what makes REPL bindings persist across lines.

use std::{fs::read_to_string, io::Write, path::Path, rc::Rc};

use anyhow::Context;
use tracing::debug;

use crate::{
	LoxError,
	ast::Program,
	bytecode::{Compiler, Vm},
	diagnostics::Diagnostics,
	interpreter::Interpreter,
	parser::Parser,
	resolver::Resolver,
	scanner::Scanner,
};

/// Which execution backend runs the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
	#[default]
	Treewalk,
	Bytecode,
}

/// One interpreter session: the diagnostics buffer plus the persistent
/// interpreter state every run shares.
pub struct Lox<W: Write> {
	backend:     Backend,
	disassemble: bool,
	diags:       Diagnostics,
	interpreter: Interpreter<W>,
}

impl<W: Write> Lox<W> {
	pub fn new(backend: Backend, disassemble: bool, output: W) -> Self {
		Self { backend, disassemble, diags: Diagnostics::new(), interpreter: Interpreter::new(output) }
	}

	pub fn diagnostics(&self) -> &Diagnostics { &self.diags }

	pub fn clear_diagnostics(&mut self) { self.diags.clear() }

	/// Run one source buffer through the configured pipeline.
	pub fn run(&mut self, source: &str) -> Result<(), LoxError> {
		match self.backend {
			Backend::Treewalk => self.run_treewalk(source),
			Backend::Bytecode => self.run_bytecode(source),
		}
	}

	fn run_treewalk(&mut self, source: &str) -> Result<(), LoxError> {
		debug!(bytes = source.len(), "running tree-walk pipeline");
		let tokens = Scanner::new(source).scan_tokens(&mut self.diags)?;
		let (ast, root) = Parser::new(source, tokens, &mut self.diags).parse()?;
		let locals = Resolver::new(source, &ast, &mut self.diags).resolve(root)?;
		let program = Rc::new(Program { source: Rc::from(source), ast, root, locals });
		self.interpreter.run(&program)
	}

	fn run_bytecode(&mut self, source: &str) -> Result<(), LoxError> {
		debug!(bytes = source.len(), "running bytecode pipeline");
		let tokens = Scanner::new(source).scan_tokens(&mut self.diags)?;
		let chunk = Compiler::new(source, tokens, &mut self.diags).compile()?;
		if self.disassemble {
			eprint!("{chunk:?}");
		}
		Vm::new(self.interpreter.output_mut()).interpret(&chunk)
	}
}

/// Run a script file; buffered diagnostics and the failure render on stderr.
pub fn run_file(path: &Path, backend: Backend, disassemble: bool) -> Result<(), LoxError> {
	let source =
		read_to_string(path).with_context(|| format!("Failed to open {}", path.display()))?;
	let mut lox = Lox::new(backend, disassemble, std::io::stdout());
	let result = lox.run(&source);
	report(&lox, &result);
	result
}

/// Line-oriented REPL on a persistent global environment. `exit` quits;
/// errors print and the loop continues.
pub fn run_prompt(backend: Backend, disassemble: bool) -> Result<(), LoxError> {
	let stdin = std::io::stdin();
	let mut lox = Lox::new(backend, disassemble, std::io::stdout());
	let mut input = String::new();
	loop {
		print!("> ");
		std::io::stdout().flush()?;

		input.clear();
		match stdin.read_line(&mut input) {
			Ok(0) => {
				println!();
				break;
			}
			Ok(_) => {}
			Err(e) => {
				eprintln!("Failed to read line: {e}");
				continue;
			}
		}

		let line = input.trim();
		if line == "exit" {
			break;
		}
		if line.is_empty() {
			continue;
		}

		let result = lox.run(line);
		report(&lox, &result);
		lox.clear_diagnostics();
	}
	Ok(())
}

fn report<W: Write>(lox: &Lox<W>, result: &Result<(), LoxError>) {
	let mut stderr = std::io::stderr();
	let diags = lox.diagnostics();
	if diags.has_errors() || !diags.warnings().is_empty() {
		let _ = diags.print_diagnostics(&mut stderr);
	}
	// Buffered stage errors are already rendered above; anything else (a
	// runtime or internal failure) carries its own message.
	if let Err(e) = result {
		match e {
			LoxError::ScannerErrors(_)
			| LoxError::ParserErrors(_)
			| LoxError::ResolverErrors(_)
			| LoxError::Compile(_) => {}
			other => {
				let _ = writeln!(stderr, "{other}");
			}
		}
	}
}
