//! Bytecode backend: a single-pass expression compiler and the stack VM
//! that executes its chunks. Shares the scanner with the tree-walk
//! pipeline and diverges from there.

pub mod chunk;
pub mod compiler;
mod debug;
pub mod opcode;
pub mod value;
pub mod vm;

pub use chunk::Chunk;
pub use compiler::Compiler;
pub use opcode::OpCode;
pub use value::Value;
pub use vm::Vm;
