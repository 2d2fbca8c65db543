use std::process::ExitCode;

use duolox::{
	cli::Cli,
	lox::{self, Backend},
};
use palc::Parser;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

fn main() -> ExitCode {
	tracing_subscriber::registry()
		.with(fmt::layer().with_writer(std::io::stderr).with_filter(
			EnvFilter::builder().with_default_directive(LevelFilter::WARN.into()).from_env_lossy(),
		))
		.init();

	let cli = Cli::parse();
	if cli.scripts.len() > 1 {
		eprintln!("Usage: duolox [script]");
		return ExitCode::from(64);
	}
	let backend = if cli.bytecode { Backend::Bytecode } else { Backend::Treewalk };

	let result = match cli.scripts.first() {
		Some(path) => lox::run_file(path, backend, cli.disassemble),
		None => lox::run_prompt(backend, cli.disassemble),
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => ExitCode::from(e.exit_code()),
	}
}
