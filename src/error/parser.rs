use crate::scanner::SrcLoc;

/// Errors that can occur during parsing.
#[derive(thiserror::Error, Debug)]
pub enum ParserError {
	/// Internal interpreter error, should never happen.
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// Errors encountered in the token stream.
	#[error(transparent)]
	ParseError(#[from] ParseError),
}

/// A specific parsing error with its location and offending lexeme.
#[derive(thiserror::Error, Debug)]
#[error("{loc}: {type}")]
pub struct ParseError {
	loc:    SrcLoc,
	lexeme: String,
	r#type: ParseErrorType,
}

impl ParseError {
	pub fn new(loc: SrcLoc, lexeme: impl Into<String>, r#type: ParseErrorType) -> Self {
		Self { loc, lexeme: lexeme.into(), r#type }
	}

	pub fn loc(&self) -> SrcLoc { self.loc }

	pub fn lexeme(&self) -> &str { &self.lexeme }

	pub fn name(&self) -> &'static str { self.r#type.name() }

	pub fn message(&self) -> String { self.r#type.to_string() }

	/// Whether the parser may synchronize and keep going after this error.
	/// Everything else aborts the parse with the first error surfaced.
	pub fn recoverable(&self) -> bool {
		matches!(
			self.r#type,
			ParseErrorType::ExpectedSemiColon
				| ParseErrorType::ExpectedExpression
				| ParseErrorType::ExpectedClosingParen
		)
	}
}

/// Types of parsing errors.
#[derive(Debug)]
pub enum ParseErrorType {
	/// A specific token was required, e.g. `.` after `super`.
	ExpectedToken(&'static str),
	ExpectedExpression,
	ExpectedSemiColon,
	ExpectedClosingParen,
	ExpectedClosingBrace,
	ExpectedOpeningParen,
	ExpectedIdentifier,
	ExpectedBlockStatement,
	/// Assignment target was neither a variable nor a property.
	ExpectedLVal,
	/// More than 255 arguments or parameters.
	TooManyArguments,
	UnexpectedToken,
}

impl ParseErrorType {
	pub fn name(&self) -> &'static str {
		match self {
			ParseErrorType::ExpectedToken(_) => "ExpectedToken",
			ParseErrorType::ExpectedExpression => "ExpectedExpression",
			ParseErrorType::ExpectedSemiColon => "ExpectedSemiColon",
			ParseErrorType::ExpectedClosingParen => "ExpectedClosingParen",
			ParseErrorType::ExpectedClosingBrace => "ExpectedClosingBrace",
			ParseErrorType::ExpectedOpeningParen => "ExpectedOpeningParen",
			ParseErrorType::ExpectedIdentifier => "ExpectedIdentifier",
			ParseErrorType::ExpectedBlockStatement => "ExpectedBlockStatement",
			ParseErrorType::ExpectedLVal => "ExpectedLVal",
			ParseErrorType::TooManyArguments => "TooManyArguments",
			ParseErrorType::UnexpectedToken => "UnexpectedToken",
		}
	}
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			ExpectedToken(what) => write!(f, "Expected {what}"),
			ExpectedExpression => write!(f, "Expected expression"),
			ExpectedSemiColon => write!(f, "Expected ';' after statement"),
			ExpectedClosingParen => write!(f, "Expected ')' after expression"),
			ExpectedClosingBrace => write!(f, "Expected '}}' after block"),
			ExpectedOpeningParen => write!(f, "Expected '('"),
			ExpectedIdentifier => write!(f, "Expected identifier"),
			ExpectedBlockStatement => write!(f, "Expected block"),
			ExpectedLVal => write!(f, "Invalid assignment target"),
			TooManyArguments => write!(f, "Cannot have more than 255 arguments"),
			UnexpectedToken => write!(f, "Unexpected token"),
		}
	}
}
