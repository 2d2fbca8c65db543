use std::{fmt::Display, rc::Rc};

use crate::{
	ast::{Program, Stmt, StmtIdx},
	environment::{EnvRef, Environment},
	error::runtime::RuntimeErrorType,
	interpreter::{class::LoxClass, instance::Instance, value::RuntimeValue},
	scanner::Token,
	utils::RcCell,
};

/// Anything that may appear on the left of a call.
#[derive(Debug, Clone)]
pub enum Callable {
	Function(LoxFunction),
	Native(NativeFunction),
	Class(Rc<LoxClass>),
}

impl Callable {
	pub fn identity_eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Callable::Function(l), Callable::Function(r)) => {
				l.declaration == r.declaration
					&& Rc::ptr_eq(&l.program, &r.program)
					&& RcCell::ptr_eq(&l.closure, &r.closure)
			}
			(Callable::Native(l), Callable::Native(r)) => l.name == r.name,
			(Callable::Class(l), Callable::Class(r)) => Rc::ptr_eq(l, r),
			_ => false,
		}
	}
}

impl Display for Callable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Callable::Function(func) => write!(f, "<fn {}>", func.name()),
			Callable::Native(native) => write!(f, "<native fn {}>", native.name),
			Callable::Class(class) => write!(f, "{}", class.name),
		}
	}
}

/// A user-declared function or method.
///
/// The declaration is an index into the program that parsed it; holding the
/// `Rc<Program>` keeps that arena (and its resolver table) alive for as long
/// as the function value circulates, which is what lets a REPL closure from
/// an earlier line keep running.
#[derive(Debug, Clone)]
pub struct LoxFunction {
	pub declaration:    StmtIdx,
	pub program:        Rc<Program>,
	pub closure:        EnvRef,
	pub is_initializer: bool,
}

impl LoxFunction {
	pub fn name(&self) -> &str {
		match self.program.ast.stmt(self.declaration) {
			Stmt::Function { name, .. } => name.lexeme(&self.program.source),
			_ => "",
		}
	}

	pub fn params(&self) -> &[Token] {
		match self.program.ast.stmt(self.declaration) {
			Stmt::Function { params, .. } => params,
			_ => &[],
		}
	}

	pub fn body(&self) -> Option<StmtIdx> {
		match self.program.ast.stmt(self.declaration) {
			Stmt::Function { body, .. } => Some(*body),
			_ => None,
		}
	}

	pub fn arity(&self) -> usize { self.params().len() }

	/// A copy of this function whose closure additionally binds `this` to
	/// the given instance. Method access goes through here, so a method
	/// plucked off an object remembers the object.
	pub fn bind(&self, instance: RcCell<Instance>) -> LoxFunction {
		let env = Environment::with_parent(self.closure.clone());
		env.borrow_mut().define("this", RuntimeValue::Instance(instance));
		LoxFunction {
			declaration:    self.declaration,
			program:        self.program.clone(),
			closure:        env,
			is_initializer: self.is_initializer,
		}
	}
}

/// A host function exposed to Lox code.
#[derive(Debug, Clone)]
pub struct NativeFunction {
	pub name:  &'static str,
	pub arity: usize,
	pub call:  fn(&[RuntimeValue]) -> Result<RuntimeValue, RuntimeErrorType>,
}

/// Native function definitions.
pub mod native {
	use std::time::{SystemTime, UNIX_EPOCH};

	use super::*;

	/// Milliseconds since the Unix epoch.
	fn clock(_args: &[RuntimeValue]) -> Result<RuntimeValue, RuntimeErrorType> {
		let now = SystemTime::now().duration_since(UNIX_EPOCH).expect("Time went backwards");
		Ok(RuntimeValue::Number(now.as_millis() as f64))
	}

	/// Every native the interpreter installs into the globals.
	pub fn all() -> Vec<NativeFunction> {
		vec![NativeFunction { name: "clock", arity: 0, call: clock }]
	}
}
