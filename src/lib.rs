//! # duolox
//!
//! An interpreter for the Lox language with two execution backends that
//! share one scanner:
//!
//! - **Tree-walk**: recursive-descent parser into flat arenas, a resolver
//!   that precomputes lexical scope distances, and an evaluator with
//!   first-class closures and classes.
//! - **Bytecode**: a single-pass compiler that turns the expression subset
//!   into a chunk of opcodes, executed by a stack VM.
//!
//! ```text
//! source --> Scanner --> tokens
//!                          |
//!        +-----------------+-----------------+
//!        v (tree-walk)                       v (bytecode)
//!     Parser -> Ast -> Resolver -> Interpreter    Compiler -> Chunk -> Vm
//! ```
//!
//! Every stage reports into one [`diagnostics::Diagnostics`] buffer; the
//! driver in [`lox`] renders it and maps errors to exit codes (64 usage,
//! 65 before execution, 70 at runtime).
//!
//! # Example
//!
//! ```
//! use duolox::{Backend, Lox};
//!
//! let mut output = Vec::new();
//! let mut lox = Lox::new(Backend::Treewalk, false, &mut output);
//! lox.run("fun twice(x) { return x * 2; } print twice(21);").unwrap();
//! drop(lox);
//! assert_eq!(output, b"42\n");
//! ```

pub mod ast;
pub mod bytecode;
pub mod cli;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lox;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod utils;

pub use error::LoxError;
pub use lox::{Backend, Lox};
