//! Buffered diagnostics.
//!
//! Every pipeline stage reports into one [`Diagnostics`] value instead of
//! writing to stderr on its own. The driver decides when (and where) the
//! buffer is rendered, which keeps the REPL, the file runner and the tests
//! on exactly the same path.

use std::io::Write;

use crate::{LoxError, scanner::SrcLoc};

/// Severity of a single diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	Error,
	Warning,
}

/// One rendered-on-demand diagnostic record.
#[derive(Debug, Clone)]
pub struct Diagnostic {
	severity: Severity,
	/// Machine-readable kind, e.g. `UnexpectedCharacter`.
	kind:     &'static str,
	message:  String,
	loc:      SrcLoc,
	/// Source text near the offending location, quoted in the rendering.
	lexeme:   String,
}

impl Diagnostic {
	pub fn error(kind: &'static str, message: impl Into<String>, loc: SrcLoc, lexeme: impl Into<String>) -> Self {
		Self { severity: Severity::Error, kind, message: message.into(), loc, lexeme: lexeme.into() }
	}

	pub fn warning(kind: &'static str, message: impl Into<String>, loc: SrcLoc, lexeme: impl Into<String>) -> Self {
		Self { severity: Severity::Warning, kind, message: message.into(), loc, lexeme: lexeme.into() }
	}

	pub fn kind(&self) -> &'static str { self.kind }
}

impl std::fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let label = match self.severity {
			Severity::Error => "Error",
			Severity::Warning => "Warning",
		};
		write!(f, "{}({}): {} at {} near '{}'", label, self.kind, self.message, self.loc, self.lexeme)
	}
}

/// Collector shared by the scanner, parser, resolver and compiler.
#[derive(Debug, Default)]
pub struct Diagnostics {
	errors:   Vec<Diagnostic>,
	warnings: Vec<Diagnostic>,
}

impl Diagnostics {
	pub fn new() -> Self { Self::default() }

	pub fn report_error(&mut self, diagnostic: Diagnostic) { self.errors.push(diagnostic) }

	pub fn report_warning(&mut self, diagnostic: Diagnostic) { self.warnings.push(diagnostic) }

	pub fn has_errors(&self) -> bool { !self.errors.is_empty() }

	pub fn error_count(&self) -> usize { self.errors.len() }

	pub fn errors(&self) -> &[Diagnostic] { &self.errors }

	pub fn warnings(&self) -> &[Diagnostic] { &self.warnings }

	/// Render warnings first, then errors, one per line.
	pub fn print_diagnostics<W: Write>(&self, writer: &mut W) -> Result<(), LoxError> {
		for diagnostic in self.warnings.iter().chain(self.errors.iter()) {
			writeln!(writer, "{diagnostic}")?;
		}
		Ok(())
	}

	/// Drop everything collected so far. The REPL calls this between lines.
	pub fn clear(&mut self) {
		self.errors.clear();
		self.warnings.clear();
	}
}
