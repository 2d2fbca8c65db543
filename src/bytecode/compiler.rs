//! Single-pass expression compiler.
//!
//! Consumes tokens straight off the scanner's output and writes bytecode
//! into a [`Chunk`] without building any tree. The compiler flips between
//! two states ("expecting a value" / "got a value") and keeps an explicit
//! operator stack of `(precedence, opcode)` entries: value tokens emit
//! immediately, operators wait on the stack until something of equal or
//! lower precedence (or a group boundary) flushes them, so operands come
//! out in postfix order ready for the stack machine.
//!
//! A leading `print` keyword is accepted and skipped: the VM prints the
//! final value when it hits `Return`, so `print 1 + 2;` and `1 + 2` compile
//! to the same chunk. A `;` terminates the expression like end of input.

use std::{iter::Peekable, vec::IntoIter};

use crate::{
	LoxError,
	bytecode::{chunk::Chunk, opcode::OpCode, value::Value},
	diagnostics::{Diagnostic, Diagnostics},
	error::compiler::{CompileError, CompileErrorType},
	scanner::{Token, TokenType},
};

/// Binding strength, weakest first. `Unary` outranks every binary operator,
/// so pending unaries flush as soon as a binary operator arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
	Or,
	And,
	Equality,
	Comparison,
	Term,
	Factor,
	Unary,
}

/// One slot on the operator stack.
#[derive(Debug, Clone, Copy)]
enum Entry {
	Operator { prec: Precedence, op: OpCode, line: u32 },
	/// `(` marker; nothing pops past it until the matching `)`.
	GroupStart { token: Token },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	ExpectingValue,
	GotValue,
}

pub struct Compiler<'a> {
	source: &'a str,
	tokens: Peekable<IntoIter<Token>>,
	chunk:  Chunk,
	stack:  Vec<Entry>,
	state:  State,
	diags:  &'a mut Diagnostics,
}

impl<'a> Compiler<'a> {
	pub fn new(source: &'a str, tokens: Vec<Token>, diags: &'a mut Diagnostics) -> Self {
		Self {
			source,
			tokens: tokens.into_iter().peekable(),
			chunk: Chunk::new(),
			stack: Vec::new(),
			state: State::ExpectingValue,
			diags,
		}
	}

	pub fn compile(mut self) -> Result<Chunk, LoxError> {
		if self.tokens.peek().is_some_and(|t| t.r#type == TokenType::Print) {
			self.tokens.next();
		}

		while let Some(token) = self.tokens.next() {
			match token.r#type {
				TokenType::Number => {
					let value = token.number(self.source)?;
					self.constant(token, Value::Number(value))?;
				}
				TokenType::String => {
					let value = Value::Str(token.string_contents(self.source).into());
					self.constant(token, value)?;
				}
				TokenType::Nil => self.value_op(token, OpCode::Nil)?,
				TokenType::True => self.value_op(token, OpCode::True)?,
				TokenType::False => self.value_op(token, OpCode::False)?,
				TokenType::LeftParen => {
					if self.state == State::GotValue {
						return Err(self.fail(token, CompileErrorType::UnexpectedToken));
					}
					self.stack.push(Entry::GroupStart { token });
				}
				TokenType::RightParen => self.close_group(token)?,
				TokenType::Minus => {
					if self.state == State::ExpectingValue {
						self.push_unary(token, OpCode::Negate);
					} else {
						self.binary(token, Precedence::Term, OpCode::Subtract)?;
					}
				}
				TokenType::Bang => {
					if self.state == State::ExpectingValue {
						self.push_unary(token, OpCode::Not);
					} else {
						return Err(self.fail(token, CompileErrorType::UnexpectedToken));
					}
				}
				TokenType::Plus => self.binary(token, Precedence::Term, OpCode::Add)?,
				TokenType::Star => self.binary(token, Precedence::Factor, OpCode::Multiply)?,
				TokenType::Slash => self.binary(token, Precedence::Factor, OpCode::Divide)?,
				TokenType::EqualEqual => self.binary(token, Precedence::Equality, OpCode::Equal)?,
				TokenType::BangEqual => self.binary(token, Precedence::Equality, OpCode::NotEqual)?,
				TokenType::Greater => self.binary(token, Precedence::Comparison, OpCode::Greater)?,
				TokenType::GreaterEqual => {
					self.binary(token, Precedence::Comparison, OpCode::GreaterEqual)?;
				}
				TokenType::Less => self.binary(token, Precedence::Comparison, OpCode::Less)?,
				TokenType::LessEqual => self.binary(token, Precedence::Comparison, OpCode::LessEqual)?,
				TokenType::And => self.binary(token, Precedence::And, OpCode::And)?,
				TokenType::Or => self.binary(token, Precedence::Or, OpCode::Or)?,
				TokenType::Semicolon | TokenType::Eof => {
					self.finish(token)?;
					if let Some(extra) =
						self.tokens.next().filter(|t| t.r#type != TokenType::Eof)
					{
						return Err(self.fail(extra, CompileErrorType::UnexpectedToken));
					}
					return Ok(self.chunk);
				}
				_ => return Err(self.fail(token, CompileErrorType::UnexpectedToken)),
			}
		}

		Err(anyhow::anyhow!("token stream ended without Eof").into())
	}

	/// A literal with a constant-pool payload.
	fn constant(&mut self, token: Token, value: Value) -> Result<(), LoxError> {
		if self.state == State::GotValue {
			return Err(self.fail(token, CompileErrorType::UnexpectedToken));
		}
		let Some(idx) = self.chunk.add_constant(value) else {
			return Err(self.fail(token, CompileErrorType::TooManyConstants));
		};
		self.chunk.write(OpCode::Constant as u8, token.loc.line);
		self.chunk.write(idx, token.loc.line);
		self.state = State::GotValue;
		Ok(())
	}

	/// A literal with a dedicated push opcode (`nil`/`true`/`false`).
	fn value_op(&mut self, token: Token, op: OpCode) -> Result<(), LoxError> {
		if self.state == State::GotValue {
			return Err(self.fail(token, CompileErrorType::UnexpectedToken));
		}
		self.chunk.write(op as u8, token.loc.line);
		self.state = State::GotValue;
		Ok(())
	}

	fn push_unary(&mut self, token: Token, op: OpCode) {
		self.stack.push(Entry::Operator { prec: Precedence::Unary, op, line: token.loc.line });
	}

	/// Flush stack entries of equal or higher precedence (left
	/// associativity), stopping at any group marker, then push the incoming
	/// operator.
	fn binary(&mut self, token: Token, prec: Precedence, op: OpCode) -> Result<(), LoxError> {
		if self.state != State::GotValue {
			return Err(self.fail(token, CompileErrorType::ExpectedExpression));
		}
		while let Some(Entry::Operator { prec: top, .. }) = self.stack.last() {
			if *top < prec {
				break;
			}
			self.emit_top();
		}
		self.stack.push(Entry::Operator { prec, op, line: token.loc.line });
		self.state = State::ExpectingValue;
		Ok(())
	}

	/// Pop-and-emit to the matching group marker, then flush the unaries
	/// that were waiting on the whole group.
	fn close_group(&mut self, token: Token) -> Result<(), LoxError> {
		if self.state != State::GotValue {
			return Err(self.fail(token, CompileErrorType::ExpectedExpression));
		}
		loop {
			match self.stack.pop() {
				Some(Entry::Operator { op, line, .. }) => self.chunk.write(op as u8, line),
				Some(Entry::GroupStart { .. }) => break,
				None => return Err(self.fail(token, CompileErrorType::UnmatchedClosingParen)),
			}
		}
		while let Some(Entry::Operator { prec: Precedence::Unary, .. }) = self.stack.last() {
			self.emit_top();
		}
		Ok(())
	}

	/// Drain the stack and emit `Return`. A group marker still on the stack
	/// means an unclosed `(`.
	fn finish(&mut self, token: Token) -> Result<(), LoxError> {
		if self.state != State::GotValue {
			return Err(self.fail(token, CompileErrorType::ExpectedExpression));
		}
		while let Some(entry) = self.stack.pop() {
			match entry {
				Entry::Operator { op, line, .. } => self.chunk.write(op as u8, line),
				Entry::GroupStart { token } => {
					return Err(self.fail(token, CompileErrorType::UnclosedGrouping));
				}
			}
		}
		self.chunk.write(OpCode::Return as u8, token.loc.line);
		Ok(())
	}

	fn emit_top(&mut self) {
		if let Some(Entry::Operator { op, line, .. }) = self.stack.pop() {
			self.chunk.write(op as u8, line);
		}
	}

	fn fail(&mut self, token: Token, r#type: CompileErrorType) -> LoxError {
		let error = CompileError::new(token.loc, token.lexeme(self.source), r#type);
		self.diags.report_error(Diagnostic::error(error.name(), error.message(), error.loc(), error.lexeme()));
		LoxError::Compile(error)
	}
}
