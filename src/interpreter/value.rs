use std::{fmt::Display, rc::Rc};

use RuntimeValue::*;

use crate::{
	interpreter::{callable::Callable, instance::Instance},
	scanner::TokenType,
	utils::RcCell,
};

/// A runtime value in the tree-walk backend.
#[derive(Debug, Clone)]
pub enum RuntimeValue {
	Nil,
	Boolean(bool),
	Number(f64),
	Str(Rc<str>),
	Callable(Callable),
	Instance(RcCell<Instance>),
}

/// Why a binary operation failed; the interpreter attaches the location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOpError {
	InvalidOperands,
	DivisionByZero,
	UnsupportedOperator,
}

impl RuntimeValue {
	/// Only `nil` and `false` are falsy; everything else, including `0` and
	/// the empty string, is truthy.
	pub fn is_truthy(&self) -> bool { !matches!(self, Nil | Boolean(false)) }

	pub fn type_name(&self) -> &'static str {
		match self {
			Nil => "nil",
			Boolean(_) => "boolean",
			Number(_) => "number",
			Str(_) => "string",
			Callable(_) => "callable",
			Instance(_) => "instance",
		}
	}

	/// Apply a binary operator.
	///
	/// `+` doubles as string concatenation (a fresh allocation); all other
	/// arithmetic and comparison operators require two numbers. Equality is
	/// total: operands of different kinds are simply unequal.
	pub fn binary_op(&self, op: TokenType, right: &Self) -> Result<RuntimeValue, BinaryOpError> {
		let value = match (op, self, right) {
			(TokenType::Plus, Number(l), Number(r)) => Number(l + r),
			(TokenType::Plus, Str(l), Str(r)) => Str(format!("{l}{r}").into()),
			(TokenType::Minus, Number(l), Number(r)) => Number(l - r),
			(TokenType::Star, Number(l), Number(r)) => Number(l * r),
			(TokenType::Slash, Number(_), Number(r)) if *r == 0.0 => {
				return Err(BinaryOpError::DivisionByZero);
			}
			(TokenType::Slash, Number(l), Number(r)) => Number(l / r),
			(TokenType::Greater, Number(l), Number(r)) => Boolean(l > r),
			(TokenType::GreaterEqual, Number(l), Number(r)) => Boolean(l >= r),
			(TokenType::Less, Number(l), Number(r)) => Boolean(l < r),
			(TokenType::LessEqual, Number(l), Number(r)) => Boolean(l <= r),
			(TokenType::EqualEqual, l, r) => Boolean(l == r),
			(TokenType::BangEqual, l, r) => Boolean(l != r),
			(
				TokenType::Plus
				| TokenType::Minus
				| TokenType::Star
				| TokenType::Slash
				| TokenType::Greater
				| TokenType::GreaterEqual
				| TokenType::Less
				| TokenType::LessEqual,
				_,
				_,
			) => return Err(BinaryOpError::InvalidOperands),
			_ => return Err(BinaryOpError::UnsupportedOperator),
		};
		Ok(value)
	}
}

impl PartialEq for RuntimeValue {
	/// Values of different kinds never compare equal. Functions, classes
	/// and instances compare by identity.
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Nil, Nil) => true,
			(Boolean(l), Boolean(r)) => l == r,
			(Number(l), Number(r)) => l == r,
			(Str(l), Str(r)) => l == r,
			(Callable(l), Callable(r)) => l.identity_eq(r),
			(Instance(l), Instance(r)) => RcCell::ptr_eq(l, r),
			_ => false,
		}
	}
}

impl Display for RuntimeValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Nil => write!(f, "nil"),
			Boolean(b) => write!(f, "{b}"),
			Number(n) => {
				if n.is_finite() && n.fract() == 0.0 {
					write!(f, "{}", *n as i64)
				} else {
					write!(f, "{n}")
				}
			}
			Str(s) => write!(f, "{s}"),
			Callable(c) => write!(f, "{c}"),
			Instance(i) => write!(f, "{}", i.borrow()),
		}
	}
}
