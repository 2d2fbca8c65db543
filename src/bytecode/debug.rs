//! Chunk disassembler, exposed as the `Debug` rendering of a chunk.

use std::fmt;

use crate::bytecode::{chunk::Chunk, opcode::OpCode};

impl fmt::Debug for Chunk {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut offset = 0;
		while offset < self.code.len() {
			write!(f, "{offset:04} ")?;
			if offset > 0 && self.lines[offset] == self.lines[offset - 1] {
				write!(f, "   | ")?;
			} else {
				write!(f, "{:4} ", self.lines[offset])?;
			}

			match OpCode::try_from(self.code[offset]) {
				Ok(OpCode::Constant) => {
					let idx = self.code.get(offset + 1).copied().unwrap_or_default() as usize;
					match self.constants.get(idx) {
						Some(value) => writeln!(f, "{:<12} {idx:4} '{value}'", "Constant")?,
						None => writeln!(f, "{:<12} {idx:4} <missing>", "Constant")?,
					}
					offset += 2;
				}
				Ok(op) => {
					writeln!(f, "{op:?}")?;
					offset += 1;
				}
				Err(byte) => {
					writeln!(f, "??? {byte:#04x}")?;
					offset += 1;
				}
			}
		}
		Ok(())
	}
}
