//! Stack-based virtual machine.
//!
//! A tight fetch/dispatch loop over the chunk's bytes: each arm pops its
//! operands, does the work, pushes the result. The VM is stricter than the
//! tree-walk about types on purpose: `Not`, `And` and `Or` insist on
//! booleans where the tree-walk applies truthiness, a divergence kept
//! until the backends unify. Equality never errors; operands of different
//! kinds are just unequal.

use std::io::Write;

use anyhow::{Context, anyhow};
use tracing::trace;

use crate::{
	LoxError,
	bytecode::{chunk::Chunk, opcode::OpCode, value::Value},
	error::runtime::{RuntimeError, RuntimeErrorType},
	scanner::SrcLoc,
};

const STACK_MAX: usize = 256;

macro_rules! arithmetic_op {
	($self:expr, $line:expr, $op:tt) => {{
		let b = $self.pop_number($line)?;
		let a = $self.pop_number($line)?;
		$self.push(Value::Number(a $op b))?;
	}};
}

macro_rules! comparison_op {
	($self:expr, $line:expr, $op:tt) => {{
		let b = $self.pop_number($line)?;
		let a = $self.pop_number($line)?;
		$self.push(Value::Bool(a $op b))?;
	}};
}

macro_rules! logical_op {
	($self:expr, $line:expr, $op:tt) => {{
		let b = $self.pop_bool($line)?;
		let a = $self.pop_bool($line)?;
		$self.push(Value::Bool(a $op b))?;
	}};
}

pub struct Vm<W: Write> {
	output: W,
	stack:  Vec<Value>,
}

impl<W: Write> Vm<W> {
	pub fn new(output: W) -> Self { Self { output, stack: Vec::with_capacity(STACK_MAX) } }

	/// Run a chunk to its `Return`, printing the final value.
	pub fn interpret(&mut self, chunk: &Chunk) -> Result<(), LoxError> {
		self.stack.clear();
		let mut ip = 0;

		while ip < chunk.code.len() {
			let byte = chunk.code[ip];
			let line = chunk.lines[ip];
			ip += 1;

			let op = OpCode::try_from(byte).map_err(|b| anyhow!("invalid opcode byte {b:#04x}"))?;
			trace!(?op, ip, "dispatch");

			match op {
				OpCode::Constant => {
					let idx = *chunk.code.get(ip).context("truncated constant operand")? as usize;
					ip += 1;
					let value =
						chunk.constants.get(idx).with_context(|| format!("no constant at index {idx}"))?;
					self.push(value.clone())?;
				}
				OpCode::Nil => self.push(Value::Nil)?,
				OpCode::True => self.push(Value::Bool(true))?,
				OpCode::False => self.push(Value::Bool(false))?,
				OpCode::Add => arithmetic_op!(self, line, +),
				OpCode::Subtract => arithmetic_op!(self, line, -),
				OpCode::Multiply => arithmetic_op!(self, line, *),
				OpCode::Divide => {
					let b = self.pop_number(line)?;
					let a = self.pop_number(line)?;
					if b == 0.0 {
						return Err(runtime(line, RuntimeErrorType::DivisionByZero));
					}
					self.push(Value::Number(a / b))?;
				}
				OpCode::Negate => {
					let n = self.pop_number(line)?;
					self.push(Value::Number(-n))?;
				}
				OpCode::Not => {
					let b = self.pop_bool(line)?;
					self.push(Value::Bool(!b))?;
				}
				OpCode::Equal => {
					let b = self.pop()?;
					let a = self.pop()?;
					self.push(Value::Bool(a == b))?;
				}
				OpCode::NotEqual => {
					let b = self.pop()?;
					let a = self.pop()?;
					self.push(Value::Bool(a != b))?;
				}
				OpCode::Greater => comparison_op!(self, line, >),
				OpCode::GreaterEqual => comparison_op!(self, line, >=),
				OpCode::Less => comparison_op!(self, line, <),
				OpCode::LessEqual => comparison_op!(self, line, <=),
				OpCode::And => logical_op!(self, line, &&),
				OpCode::Or => logical_op!(self, line, ||),
				OpCode::Jump | OpCode::JumpIfFalse => {
					return Err(anyhow!("jump opcodes are reserved and never emitted").into());
				}
				OpCode::Return => {
					let value = self.pop()?;
					writeln!(self.output, "{value}")?;
					return Ok(());
				}
			}
		}

		Err(anyhow!("chunk ended without Return").into())
	}

	fn push(&mut self, value: Value) -> Result<(), LoxError> {
		if self.stack.len() >= STACK_MAX {
			return Err(anyhow!("value stack overflow").into());
		}
		self.stack.push(value);
		Ok(())
	}

	fn pop(&mut self) -> Result<Value, LoxError> {
		self.stack.pop().context("value stack underflow").map_err(Into::into)
	}

	fn pop_number(&mut self, line: u32) -> Result<f64, LoxError> {
		match self.pop()? {
			Value::Number(n) => Ok(n),
			other => Err(runtime(line, RuntimeErrorType::TypeMismatch {
				expected: "number",
				found:    other.type_name(),
			})),
		}
	}

	fn pop_bool(&mut self, line: u32) -> Result<bool, LoxError> {
		match self.pop()? {
			Value::Bool(b) => Ok(b),
			other => Err(runtime(line, RuntimeErrorType::TypeMismatch {
				expected: "boolean",
				found:    other.type_name(),
			})),
		}
	}
}

fn runtime(line: u32, r#type: RuntimeErrorType) -> LoxError {
	RuntimeError::new(SrcLoc { line, col: 0 }, r#type).into()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{bytecode::compiler::Compiler, diagnostics::Diagnostics, scanner::Scanner};

	fn run(source: &str) -> Result<String, LoxError> {
		let mut diags = Diagnostics::new();
		let tokens = Scanner::new(source).scan_tokens(&mut diags)?;
		let chunk = Compiler::new(source, tokens, &mut diags).compile()?;
		let mut output = Vec::new();
		Vm::new(&mut output).interpret(&chunk)?;
		Ok(String::from_utf8(output).expect("output is valid UTF-8"))
	}

	fn runtime_error(source: &str) -> RuntimeError {
		match run(source) {
			Err(LoxError::Runtime(e)) => e,
			other => panic!("expected a runtime error, got {other:?}"),
		}
	}

	#[test]
	fn arithmetic_matches_the_treewalk() {
		assert_eq!(run("1 + 2 * 3").unwrap(), "7\n");
		assert_eq!(run("(1 + 2) * 3").unwrap(), "9\n");
		assert_eq!(run("10 / 4").unwrap(), "2.5\n");
		assert_eq!(run("-(1 + 2)").unwrap(), "-3\n");
	}

	#[test]
	fn hand_assembled_chunk_executes() {
		let mut chunk = Chunk::new();
		let one = chunk.add_constant(Value::Number(1.0)).unwrap();
		let two = chunk.add_constant(Value::Number(2.0)).unwrap();
		chunk.write(OpCode::Constant as u8, 1);
		chunk.write(one, 1);
		chunk.write(OpCode::Constant as u8, 1);
		chunk.write(two, 1);
		chunk.write(OpCode::Add as u8, 1);
		chunk.write(OpCode::Return as u8, 1);

		let mut output = Vec::new();
		Vm::new(&mut output).interpret(&chunk).unwrap();
		assert_eq!(output, b"3\n");
	}

	#[test]
	fn comparisons_produce_booleans() {
		assert_eq!(run("1 < 2").unwrap(), "true\n");
		assert_eq!(run("2 <= 1").unwrap(), "false\n");
		assert_eq!(run("3 >= 3").unwrap(), "true\n");
	}

	#[test]
	fn equality_across_kinds_is_false() {
		assert_eq!(run("1 == true").unwrap(), "false\n");
		assert_eq!(run("nil == false").unwrap(), "false\n");
		assert_eq!(run("nil != 1").unwrap(), "true\n");
		assert_eq!(run(r#""hi" == "hi""#).unwrap(), "true\n");
	}

	#[test]
	fn logical_opcodes_require_booleans() {
		assert_eq!(run("true and false").unwrap(), "false\n");
		assert_eq!(run("false or true").unwrap(), "true\n");
		assert!(matches!(
			runtime_error("1 and true").r#type(),
			RuntimeErrorType::TypeMismatch { expected: "boolean", .. }
		));
	}

	#[test]
	fn not_rejects_non_booleans() {
		assert_eq!(run("!true").unwrap(), "false\n");
		assert!(matches!(
			runtime_error("!1").r#type(),
			RuntimeErrorType::TypeMismatch { expected: "boolean", .. }
		));
	}

	#[test]
	fn arithmetic_rejects_non_numbers() {
		assert!(matches!(
			runtime_error("true + 1").r#type(),
			RuntimeErrorType::TypeMismatch { expected: "number", .. }
		));
		assert!(matches!(
			runtime_error(r#""a" + "b""#).r#type(),
			RuntimeErrorType::TypeMismatch { expected: "number", .. }
		));
	}

	#[test]
	fn division_by_zero_is_a_runtime_error() {
		assert!(matches!(runtime_error("1 / 0").r#type(), RuntimeErrorType::DivisionByZero));
	}

	#[test]
	fn error_location_uses_the_line_map() {
		let error = runtime_error("1 +\ntrue");
		assert_eq!(error.loc().line, 1); // the '+' drained at Eof carries its own line
	}

	#[test]
	fn reserved_jump_opcodes_are_internal_errors() {
		let mut chunk = Chunk::new();
		chunk.write(OpCode::Jump as u8, 1);
		let mut output = Vec::new();
		let result = Vm::new(&mut output).interpret(&chunk);
		assert!(matches!(result, Err(LoxError::InternalError(_))));
	}

	#[test]
	fn negate_rejects_non_numbers() {
		assert!(matches!(
			runtime_error("-true").r#type(),
			RuntimeErrorType::TypeMismatch { expected: "number", .. }
		));
	}
}
