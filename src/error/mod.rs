pub mod compiler;
pub mod parser;
pub mod resolver;
pub mod runtime;
pub mod scanner;

/// Top-level error type for the whole pipeline.
///
/// Stage errors that come in batches (scanning, parsing, resolution) only
/// surface their count here; the individual records live in the
/// [`crate::diagnostics::Diagnostics`] buffer the stage reported into.
#[derive(thiserror::Error, Debug)]
pub enum LoxError {
	/// Internal interpreter error, should never happen.
	#[error("InternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	#[error("generated {0} scanner errors")]
	ScannerErrors(usize),
	#[error("generated {0} parser errors")]
	ParserErrors(usize),
	#[error("generated {0} resolver errors")]
	ResolverErrors(usize),
	#[error(transparent)]
	Compile(#[from] compiler::CompileError),
	#[error(transparent)]
	Runtime(#[from] runtime::RuntimeError),
	#[error("Failed writing to output: {0}")]
	WriteFailed(#[from] std::io::Error),
}

impl LoxError {
	/// Process exit code for this error, following the sysexits convention
	/// the driver advertises: 65 for anything caught before execution, 70
	/// for runtime failures.
	pub fn exit_code(&self) -> u8 {
		match self {
			LoxError::ScannerErrors(_)
			| LoxError::ParserErrors(_)
			| LoxError::ResolverErrors(_)
			| LoxError::Compile(_) => 65,
			LoxError::Runtime(_) | LoxError::InternalError(_) | LoxError::WriteFailed(_) => 70,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn static_errors_exit_65() {
		assert_eq!(LoxError::ScannerErrors(2).exit_code(), 65);
		assert_eq!(LoxError::ParserErrors(1).exit_code(), 65);
		assert_eq!(LoxError::ResolverErrors(1).exit_code(), 65);
	}

	#[test]
	fn runtime_errors_exit_70() {
		let err = LoxError::Runtime(runtime::RuntimeError::new(
			crate::scanner::SrcLoc { line: 1, col: 1 },
			runtime::RuntimeErrorType::DivisionByZero,
		));
		assert_eq!(err.exit_code(), 70);
	}
}
