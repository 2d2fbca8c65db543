use crate::scanner::SrcLoc;

/// A single lexing error with its location.
#[derive(thiserror::Error, Debug)]
#[error("{loc}: {type}")]
pub struct ScanError {
	loc:    SrcLoc,
	r#type: ScanErrorType,
}

impl ScanError {
	pub fn new(loc: SrcLoc, r#type: ScanErrorType) -> Self { Self { loc, r#type } }

	pub fn loc(&self) -> SrcLoc { self.loc }

	pub fn name(&self) -> &'static str { self.r#type.name() }

	pub fn message(&self) -> String { self.r#type.to_string() }
}

#[derive(Debug)]
pub enum ScanErrorType {
	UnexpectedCharacter(char),
	UnterminatedString,
}

impl ScanErrorType {
	pub fn name(&self) -> &'static str {
		match self {
			ScanErrorType::UnexpectedCharacter(_) => "UnexpectedCharacter",
			ScanErrorType::UnterminatedString => "UnterminatedString",
		}
	}
}

impl std::fmt::Display for ScanErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ScanErrorType::UnexpectedCharacter(c) => write!(f, "Unexpected character '{c}'"),
			ScanErrorType::UnterminatedString => write!(f, "Unterminated string"),
		}
	}
}
