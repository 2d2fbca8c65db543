use crate::scanner::SrcLoc;

/// A bytecode-compilation error with its location.
#[derive(thiserror::Error, Debug)]
#[error("{loc}: {type}")]
pub struct CompileError {
	loc:    SrcLoc,
	lexeme: String,
	r#type: CompileErrorType,
}

impl CompileError {
	pub fn new(loc: SrcLoc, lexeme: impl Into<String>, r#type: CompileErrorType) -> Self {
		Self { loc, lexeme: lexeme.into(), r#type }
	}

	pub fn loc(&self) -> SrcLoc { self.loc }

	pub fn lexeme(&self) -> &str { &self.lexeme }

	pub fn name(&self) -> &'static str { self.r#type.name() }

	pub fn message(&self) -> String { self.r#type.to_string() }
}

#[derive(Debug)]
pub enum CompileErrorType {
	/// `)` with no `(` marker left on the operator stack.
	UnmatchedClosingParen,
	/// `(` marker still on the operator stack at end of input.
	UnclosedGrouping,
	ExpectedExpression,
	UnexpectedToken,
	/// The chunk's one-byte constant index space is exhausted.
	TooManyConstants,
}

impl CompileErrorType {
	pub fn name(&self) -> &'static str {
		match self {
			CompileErrorType::UnmatchedClosingParen => "UnmatchedClosingParen",
			CompileErrorType::UnclosedGrouping => "UnclosedGrouping",
			CompileErrorType::ExpectedExpression => "ExpectedExpression",
			CompileErrorType::UnexpectedToken => "UnexpectedToken",
			CompileErrorType::TooManyConstants => "TooManyConstants",
		}
	}
}

impl std::fmt::Display for CompileErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use CompileErrorType::*;
		match self {
			UnmatchedClosingParen => write!(f, "Unmatched ')'"),
			UnclosedGrouping => write!(f, "Unclosed '('"),
			ExpectedExpression => write!(f, "Expected expression"),
			UnexpectedToken => write!(f, "Unexpected token"),
			TooManyConstants => write!(f, "Too many constants in one chunk"),
		}
	}
}
