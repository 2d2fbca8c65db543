use std::path::PathBuf;

use palc::Parser;

/// CLI arguments
#[derive(Parser)]
#[command(name = "duolox", long_about = "A Lox interpreter with tree-walk and bytecode backends")]
pub struct Cli {
	/// Script to run; the REPL starts when omitted
	pub scripts: Vec<PathBuf>,

	/// Compile to bytecode and run on the stack VM instead of the tree-walk
	#[arg(long)]
	pub bytecode: bool,

	/// Dump each compiled chunk to stderr before executing it
	#[arg(long)]
	pub disassemble: bool,
}
