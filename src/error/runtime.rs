use crate::scanner::SrcLoc;

/// A runtime failure with the location of the operation that raised it.
#[derive(thiserror::Error, Debug)]
#[error("{loc}: {type}")]
pub struct RuntimeError {
	loc:    SrcLoc,
	r#type: RuntimeErrorType,
}

impl RuntimeError {
	pub fn new(loc: SrcLoc, r#type: RuntimeErrorType) -> Self { Self { loc, r#type } }

	pub fn loc(&self) -> SrcLoc { self.loc }

	pub fn r#type(&self) -> &RuntimeErrorType { &self.r#type }
}

#[derive(Debug)]
pub enum RuntimeErrorType {
	UndefinedVariable(String),
	UndefinedProperty(String),
	/// An operation received a value of the wrong kind.
	TypeMismatch { expected: &'static str, found: &'static str },
	/// Binary operator applied to an unsupported pair of operands.
	InvalidOperands { operator: String },
	/// A single operand rejected by its operator (unary `-` on a
	/// non-number).
	InvalidBinaryOperand { operator: String },
	DivisionByZero,
	NotCallable,
	WrongNumberOfArguments { expected: usize, got: usize },
	MethodNotDefined(String),
}

impl std::fmt::Display for RuntimeErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use RuntimeErrorType::*;
		match self {
			UndefinedVariable(name) => write!(f, "Undefined variable '{name}'"),
			UndefinedProperty(name) => write!(f, "Undefined property '{name}'"),
			TypeMismatch { expected, found } => write!(f, "Expected {expected} but found {found}"),
			InvalidOperands { operator } => write!(f, "Invalid operands for '{operator}'"),
			InvalidBinaryOperand { operator } => write!(f, "Operand does not support '{operator}'"),
			DivisionByZero => write!(f, "Division by zero"),
			NotCallable => write!(f, "Can only call functions and classes"),
			WrongNumberOfArguments { expected, got } => {
				write!(f, "Expected {expected} arguments but got {got}")
			}
			MethodNotDefined(name) => write!(f, "Undefined method '{name}'"),
		}
	}
}

/// Non-local control flow inside the tree-walk evaluator.
///
/// `Return` is a sentinel, never an error: the value travels in the
/// interpreter's return slot and the nearest call frame converts the
/// sentinel back into an ordinary result. Only the other two variants ever
/// reach the driver.
#[derive(Debug)]
pub enum Unwind {
	Return,
	Error(RuntimeError),
	/// Internal interpreter error, should never happen.
	Internal(anyhow::Error),
	/// The output writer failed.
	Write(std::io::Error),
}

impl From<RuntimeError> for Unwind {
	fn from(e: RuntimeError) -> Self { Unwind::Error(e) }
}

impl From<anyhow::Error> for Unwind {
	fn from(e: anyhow::Error) -> Self { Unwind::Internal(e) }
}
