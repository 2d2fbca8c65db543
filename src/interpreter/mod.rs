//! Tree-walk evaluator.
//!
//! The interpreter drives execution by walking the arena AST directly. It
//! owns the globals chain and the output writer; everything else travels as
//! parameters: the current [`Program`] (so code from one REPL line keeps
//! evaluating against its own arena and depth table) and the current
//! environment (so scopes restore themselves on every exit path).
//!
//! `return` unwinds through the [`Unwind`] channel: the value parks in the
//! interpreter's return slot, the sentinel propagates like an error, and
//! the nearest call frame turns it back into an ordinary result.

pub mod callable;
pub mod class;
pub mod instance;
pub mod value;

use std::{collections::HashMap, io::Write, rc::Rc};

use tracing::trace;

use crate::{
	LoxError,
	ast::{Expr, ExprIdx, Lit, Program, Stmt, StmtIdx},
	environment::{EnvRef, Environment},
	error::runtime::{RuntimeError, RuntimeErrorType, Unwind},
	interpreter::{
		callable::{Callable, LoxFunction, native},
		class::LoxClass,
		instance::Instance,
		value::{BinaryOpError, RuntimeValue},
	},
	scanner::{Token, TokenType},
	utils::RcCell,
};

pub struct Interpreter<W: Write> {
	output:       W,
	globals:      EnvRef,
	/// Dedicated slot for the value of an in-flight `return`.
	return_value: Option<RuntimeValue>,
}

impl<W: Write> Interpreter<W> {
	pub fn new(output: W) -> Self {
		let globals = Environment::global();
		for native in native::all() {
			globals.borrow_mut().define(native.name, RuntimeValue::Callable(Callable::Native(native)));
		}
		Self { output, globals, return_value: None }
	}

	pub fn output_mut(&mut self) -> &mut W { &mut self.output }

	/// Execute a program's top-level declarations in the global scope.
	pub fn run(&mut self, program: &Rc<Program>) -> Result<(), LoxError> {
		let statements = match program.ast.stmt(program.root) {
			Stmt::Block { statements, .. } => statements.clone(),
			_ => return Err(anyhow::anyhow!("program root is not a block").into()),
		};
		let globals = self.globals.clone();
		for stmt in statements {
			if let Err(unwind) = self.execute(program, stmt, &globals) {
				return Err(match unwind {
					Unwind::Return => anyhow::anyhow!("return unwound past the outermost frame").into(),
					Unwind::Error(e) => e.into(),
					Unwind::Internal(e) => e.into(),
					Unwind::Write(e) => e.into(),
				});
			}
		}
		Ok(())
	}

	fn execute(&mut self, prog: &Rc<Program>, idx: StmtIdx, env: &EnvRef) -> Result<(), Unwind> {
		match prog.ast.stmt(idx) {
			Stmt::Block { statements, .. } => {
				let local = Environment::with_parent(env.clone());
				for stmt in statements {
					self.execute(prog, *stmt, &local)?;
				}
			}
			Stmt::Variable { name, initializer } => {
				let value = match initializer {
					Some(init) => self.evaluate(prog, *init, env)?,
					None => RuntimeValue::Nil,
				};
				env.borrow_mut().define(name.lexeme(&prog.source), value);
			}
			Stmt::Expression { value } => {
				self.evaluate(prog, *value, env)?;
			}
			Stmt::Print { value } => {
				let value = self.evaluate(prog, *value, env)?;
				writeln!(self.output, "{value}").map_err(Unwind::Write)?;
			}
			Stmt::If { condition, then_branch, else_branch } => {
				if self.evaluate(prog, *condition, env)?.is_truthy() {
					self.execute(prog, *then_branch, env)?;
				} else if let Some(else_branch) = else_branch {
					self.execute(prog, *else_branch, env)?;
				}
			}
			Stmt::While { condition, body } => {
				while self.evaluate(prog, *condition, env)?.is_truthy() {
					self.execute(prog, *body, env)?;
				}
			}
			Stmt::Function { name, .. } => {
				// The closure is the environment at declaration time.
				let function = LoxFunction {
					declaration:    idx,
					program:        prog.clone(),
					closure:        env.clone(),
					is_initializer: false,
				};
				env.borrow_mut()
					.define(name.lexeme(&prog.source), RuntimeValue::Callable(Callable::Function(function)));
			}
			Stmt::Return { value, .. } => {
				let value = match value {
					Some(value) => self.evaluate(prog, *value, env)?,
					None => RuntimeValue::Nil,
				};
				self.return_value = Some(value);
				return Err(Unwind::Return);
			}
			Stmt::Class { name, superclass, methods } => {
				self.execute_class_decl(prog, *name, *superclass, methods, env)?;
			}
		}
		Ok(())
	}

	/// Declare a class: the name is defined first (as `nil`) so methods can
	/// refer to the class recursively, then assigned once the class data is
	/// built. A superclass adds one scope binding `super` around every
	/// method closure.
	fn execute_class_decl(
		&mut self,
		prog: &Rc<Program>,
		name: Token,
		superclass: Option<ExprIdx>,
		methods: &[StmtIdx],
		env: &EnvRef,
	) -> Result<(), Unwind> {
		let class_name = name.lexeme(&prog.source);
		env.borrow_mut().define(class_name, RuntimeValue::Nil);

		let superclass_value = match superclass {
			Some(sup_idx) => {
				let value = self.evaluate(prog, sup_idx, env)?;
				match value {
					RuntimeValue::Callable(Callable::Class(class)) => Some(class),
					other => {
						let loc = match prog.ast.expr(sup_idx) {
							Expr::Variable { name } => name.loc,
							_ => name.loc,
						};
						return Err(RuntimeError::new(loc, RuntimeErrorType::TypeMismatch {
							expected: "class",
							found:    other.type_name(),
						})
						.into());
					}
				}
			}
			None => None,
		};

		let class_env = match &superclass_value {
			Some(sup) => {
				let class_env = Environment::with_parent(env.clone());
				class_env
					.borrow_mut()
					.define("super", RuntimeValue::Callable(Callable::Class(sup.clone())));
				class_env
			}
			None => env.clone(),
		};

		let mut method_map = HashMap::new();
		for method_idx in methods {
			if let Stmt::Function { name: method_name, .. } = prog.ast.stmt(*method_idx) {
				let method_name = method_name.lexeme(&prog.source);
				let function = LoxFunction {
					declaration:    *method_idx,
					program:        prog.clone(),
					closure:        class_env.clone(),
					is_initializer: method_name == "init",
				};
				method_map.insert(method_name.to_string(), function);
			}
		}

		let class = Rc::new(LoxClass {
			name:       Rc::from(class_name),
			superclass: superclass_value,
			methods:    method_map,
		});
		if !env.borrow_mut().assign(class_name, RuntimeValue::Callable(Callable::Class(class))) {
			return Err(anyhow::anyhow!("class binding vanished during declaration").into());
		}
		Ok(())
	}

	fn evaluate(&mut self, prog: &Rc<Program>, idx: ExprIdx, env: &EnvRef) -> Result<RuntimeValue, Unwind> {
		match prog.ast.expr(idx) {
			Expr::Literal { value } => Ok(match value {
				Lit::Number(n) => RuntimeValue::Number(*n),
				Lit::Str(s) => RuntimeValue::Str(s.clone()),
				Lit::Bool(b) => RuntimeValue::Boolean(*b),
				Lit::Nil => RuntimeValue::Nil,
			}),
			Expr::Group { expr } => self.evaluate(prog, *expr, env),
			Expr::Unary { op, expr } => {
				let op = *op;
				let value = self.evaluate(prog, *expr, env)?;
				match (op.r#type, value) {
					(TokenType::Minus, RuntimeValue::Number(n)) => Ok(RuntimeValue::Number(-n)),
					(TokenType::Minus, _) => {
						Err(RuntimeError::new(op.loc, RuntimeErrorType::InvalidBinaryOperand {
							operator: op.lexeme(&prog.source).to_string(),
						})
						.into())
					}
					(TokenType::Bang, value) => Ok(RuntimeValue::Boolean(!value.is_truthy())),
					_ => Err(anyhow::anyhow!("unary operator is always '-' or '!'").into()),
				}
			}
			Expr::Binary { left, op, right } => {
				let op = *op;
				let left = self.evaluate(prog, *left, env)?;
				let right = self.evaluate(prog, *right, env)?;
				left.binary_op(op.r#type, &right).map_err(|e| binary_error(prog, op, e))
			}
			Expr::Logical { left, op, right } => {
				let op = *op;
				let right = *right;
				let left_value = self.evaluate(prog, *left, env)?;
				match op.r#type {
					TokenType::Or if left_value.is_truthy() => Ok(left_value),
					TokenType::And if !left_value.is_truthy() => Ok(left_value),
					_ => self.evaluate(prog, right, env),
				}
			}
			Expr::Variable { name } => {
				let name = *name;
				self.lookup_variable(prog, name, name.lexeme(&prog.source), env)
			}
			Expr::This { keyword } => self.lookup_variable(prog, *keyword, "this", env),
			Expr::Assign { name, value } => {
				let name = *name;
				let value = self.evaluate(prog, *value, env)?;
				self.assign_variable(prog, name, value.clone(), env)?;
				Ok(value)
			}
			Expr::Call { callee, paren, args } => {
				let paren = *paren;
				let args = args.clone();
				let callee = self.evaluate(prog, *callee, env)?;
				let mut arg_values = Vec::with_capacity(args.len());
				for arg in args {
					arg_values.push(self.evaluate(prog, arg, env)?);
				}
				self.call_value(callee, arg_values, paren)
			}
			Expr::Get { object, name } => {
				let name = *name;
				let object = self.evaluate(prog, *object, env)?;
				self.get_property(prog, object, name)
			}
			Expr::Set { object, name, value } => {
				let name = *name;
				let value_idx = *value;
				let object = self.evaluate(prog, *object, env)?;
				match object {
					RuntimeValue::Instance(instance) => {
						let value = self.evaluate(prog, value_idx, env)?;
						instance.borrow_mut().set_field(name.lexeme(&prog.source), value.clone());
						Ok(value)
					}
					other => Err(RuntimeError::new(name.loc, RuntimeErrorType::TypeMismatch {
						expected: "instance",
						found:    other.type_name(),
					})
					.into()),
				}
			}
			Expr::Super { keyword, method } => self.eval_super(prog, *keyword, *method, env),
		}
	}

	/// Field lookup shadows method lookup; a found method comes back bound
	/// to the instance it was plucked from.
	fn get_property(
		&mut self,
		prog: &Rc<Program>,
		object: RuntimeValue,
		name: Token,
	) -> Result<RuntimeValue, Unwind> {
		let property = name.lexeme(&prog.source);
		match object {
			RuntimeValue::Instance(instance) => {
				if let Some(value) = instance.borrow().field(property) {
					return Ok(value);
				}
				let method = instance.borrow().class().find_method(property).cloned();
				match method {
					Some(method) => {
						Ok(RuntimeValue::Callable(Callable::Function(method.bind(instance.clone()))))
					}
					None => Err(RuntimeError::new(
						name.loc,
						RuntimeErrorType::UndefinedProperty(property.to_string()),
					)
					.into()),
				}
			}
			other => Err(RuntimeError::new(name.loc, RuntimeErrorType::TypeMismatch {
				expected: "instance",
				found:    other.type_name(),
			})
			.into()),
		}
	}

	/// `super.m`: the superclass sits at the resolved depth, the receiver
	/// one scope closer.
	fn eval_super(
		&mut self,
		prog: &Rc<Program>,
		keyword: Token,
		method: Token,
		env: &EnvRef,
	) -> Result<RuntimeValue, Unwind> {
		let depth = *prog
			.locals
			.get(&keyword)
			.ok_or_else(|| anyhow::anyhow!("'super' escaped the resolver"))?;
		let superclass = match Environment::get_at(env, depth, "super")? {
			RuntimeValue::Callable(Callable::Class(class)) => class,
			_ => return Err(anyhow::anyhow!("'super' is bound to a non-class").into()),
		};
		let this_depth =
			depth.checked_sub(1).ok_or_else(|| anyhow::anyhow!("'super' resolved at depth 0"))?;
		let this = match Environment::get_at(env, this_depth, "this")? {
			RuntimeValue::Instance(instance) => instance,
			_ => return Err(anyhow::anyhow!("'this' is bound to a non-instance").into()),
		};

		let method_name = method.lexeme(&prog.source);
		match superclass.find_method(method_name) {
			Some(found) => Ok(RuntimeValue::Callable(Callable::Function(found.bind(this)))),
			None => Err(RuntimeError::new(
				method.loc,
				RuntimeErrorType::MethodNotDefined(method_name.to_string()),
			)
			.into()),
		}
	}

	/// Resolved references skip exactly the recorded number of scopes;
	/// everything else is a global.
	fn lookup_variable(
		&self,
		prog: &Rc<Program>,
		token: Token,
		name: &str,
		env: &EnvRef,
	) -> Result<RuntimeValue, Unwind> {
		match prog.locals.get(&token) {
			Some(&depth) => Ok(Environment::get_at(env, depth, name)?),
			None => self.globals.borrow().get(name).ok_or_else(|| {
				RuntimeError::new(token.loc, RuntimeErrorType::UndefinedVariable(name.to_string())).into()
			}),
		}
	}

	fn assign_variable(
		&mut self,
		prog: &Rc<Program>,
		token: Token,
		value: RuntimeValue,
		env: &EnvRef,
	) -> Result<(), Unwind> {
		let name = token.lexeme(&prog.source);
		match prog.locals.get(&token) {
			Some(&depth) => Ok(Environment::assign_at(env, depth, name, value)?),
			None => {
				if self.globals.borrow_mut().assign(name, value) {
					Ok(())
				} else {
					Err(RuntimeError::new(
						token.loc,
						RuntimeErrorType::UndefinedVariable(name.to_string()),
					)
					.into())
				}
			}
		}
	}

	fn call_value(
		&mut self,
		callee: RuntimeValue,
		args: Vec<RuntimeValue>,
		paren: Token,
	) -> Result<RuntimeValue, Unwind> {
		match callee {
			RuntimeValue::Callable(Callable::Function(function)) => {
				self.check_arity(function.arity(), args.len(), paren)?;
				self.call_function(&function, args)
			}
			RuntimeValue::Callable(Callable::Native(native)) => {
				self.check_arity(native.arity, args.len(), paren)?;
				(native.call)(&args).map_err(|t| RuntimeError::new(paren.loc, t).into())
			}
			RuntimeValue::Callable(Callable::Class(class)) => {
				self.check_arity(class.arity(), args.len(), paren)?;
				let instance = RcCell::new(Instance::new(class.clone()));
				if let Some(init) = class.find_method("init") {
					self.call_function(&init.bind(instance.clone()), args)?;
				}
				Ok(RuntimeValue::Instance(instance))
			}
			_ => Err(RuntimeError::new(paren.loc, RuntimeErrorType::NotCallable).into()),
		}
	}

	/// Run a function body in a fresh scope chained onto the closure.
	/// Parameters and body statements share that one scope, mirroring how
	/// the resolver counted depths. Initializers yield `this` no matter how
	/// the body returned.
	fn call_function(
		&mut self,
		function: &LoxFunction,
		args: Vec<RuntimeValue>,
	) -> Result<RuntimeValue, Unwind> {
		trace!(name = function.name(), "calling function");
		let env = Environment::with_parent(function.closure.clone());
		for (param, arg) in function.params().iter().copied().zip(args) {
			env.borrow_mut().define(param.lexeme(&function.program.source), arg);
		}

		let body = function.body().ok_or_else(|| anyhow::anyhow!("callable without a declaration"))?;
		let statements = match function.program.ast.stmt(body) {
			Stmt::Block { statements, .. } => statements.clone(),
			_ => return Err(anyhow::anyhow!("function body is always a block").into()),
		};

		let program = function.program.clone();
		let mut result = Ok(());
		for stmt in statements {
			result = self.execute(&program, stmt, &env);
			if result.is_err() {
				break;
			}
		}

		match result {
			Ok(()) => {
				if function.is_initializer {
					Ok(Environment::get_at(&function.closure, 0, "this")?)
				} else {
					Ok(RuntimeValue::Nil)
				}
			}
			Err(Unwind::Return) => {
				let value = self.return_value.take().unwrap_or(RuntimeValue::Nil);
				if function.is_initializer {
					Ok(Environment::get_at(&function.closure, 0, "this")?)
				} else {
					Ok(value)
				}
			}
			Err(e) => Err(e),
		}
	}

	fn check_arity(&self, expected: usize, got: usize, paren: Token) -> Result<(), Unwind> {
		if expected == got {
			Ok(())
		} else {
			Err(RuntimeError::new(paren.loc, RuntimeErrorType::WrongNumberOfArguments { expected, got })
				.into())
		}
	}
}

fn binary_error(prog: &Rc<Program>, op: Token, error: BinaryOpError) -> Unwind {
	match error {
		BinaryOpError::DivisionByZero => {
			RuntimeError::new(op.loc, RuntimeErrorType::DivisionByZero).into()
		}
		BinaryOpError::InvalidOperands => {
			RuntimeError::new(op.loc, RuntimeErrorType::InvalidOperands {
				operator: op.lexeme(&prog.source).to_string(),
			})
			.into()
		}
		BinaryOpError::UnsupportedOperator => anyhow::anyhow!("unknown binary operator").into(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{diagnostics::Diagnostics, parser::Parser, resolver::Resolver, scanner::Scanner};

	fn interpret(source: &str) -> Result<std::string::String, LoxError> {
		let mut diags = Diagnostics::new();
		let tokens = Scanner::new(source).scan_tokens(&mut diags)?;
		let (ast, root) = Parser::new(source, tokens, &mut diags).parse()?;
		let locals = Resolver::new(source, &ast, &mut diags).resolve(root)?;
		let program = Rc::new(Program { source: Rc::from(source), ast, root, locals });
		let mut output = Vec::new();
		Interpreter::new(&mut output).run(&program)?;
		Ok(std::string::String::from_utf8(output).expect("output is valid UTF-8"))
	}

	fn runtime_error(source: &str) -> RuntimeError {
		match interpret(source) {
			Err(LoxError::Runtime(e)) => e,
			other => panic!("expected a runtime error, got {other:?}"),
		}
	}

	#[test]
	fn print_arithmetic() {
		assert_eq!(interpret("print 1 + 2 * 3;").unwrap(), "7\n");
		assert_eq!(interpret("print (1 + 2) * 3;").unwrap(), "9\n");
		assert_eq!(interpret("print 10 / 4;").unwrap(), "2.5\n");
	}

	#[test]
	fn print_strings_and_concat() {
		assert_eq!(interpret(r#"print "hello" + " " + "world";"#).unwrap(), "hello world\n");
	}

	#[test]
	fn mixed_plus_is_invalid() {
		assert!(matches!(runtime_error(r#"print "a" + 1;"#).r#type(), RuntimeErrorType::InvalidOperands { .. }));
	}

	#[test]
	fn division_by_zero_errors() {
		assert!(matches!(runtime_error("print 1 / 0;").r#type(), RuntimeErrorType::DivisionByZero));
	}

	#[test]
	fn unary_minus_requires_a_number() {
		assert!(matches!(
			runtime_error("print -true;").r#type(),
			RuntimeErrorType::InvalidBinaryOperand { operator } if operator == "-"
		));
		assert!(matches!(
			runtime_error(r#"print -"str";"#).r#type(),
			RuntimeErrorType::InvalidBinaryOperand { .. }
		));
	}

	#[test]
	fn truthiness_in_conditions() {
		assert_eq!(interpret("if (0) print \"zero\"; else print \"no\";").unwrap(), "zero\n");
		assert_eq!(interpret("if (\"\") print \"empty\"; else print \"no\";").unwrap(), "empty\n");
		assert_eq!(interpret("if (nil) print \"yes\"; else print \"no\";").unwrap(), "no\n");
	}

	#[test]
	fn equality_across_kinds() {
		assert_eq!(interpret("print 1 == \"1\";").unwrap(), "false\n");
		assert_eq!(interpret("print nil == false;").unwrap(), "false\n");
		assert_eq!(interpret("print \"a\" == \"a\";").unwrap(), "true\n");
	}

	#[test]
	fn variables_and_assignment() {
		assert_eq!(interpret("var a = 1; var b = 2; print a + b;").unwrap(), "3\n");
		assert_eq!(interpret("var a = 1; a = 5; print a;").unwrap(), "5\n");
		assert_eq!(interpret("var a; print a;").unwrap(), "nil\n");
	}

	#[test]
	fn undefined_variable_errors() {
		assert!(matches!(runtime_error("print missing;").r#type(), RuntimeErrorType::UndefinedVariable(_)));
		assert!(matches!(runtime_error("missing = 1;").r#type(), RuntimeErrorType::UndefinedVariable(_)));
	}

	#[test]
	fn blocks_shadow_and_restore() {
		let source = "var a = 1; { var a = 2; print a; } print a;";
		assert_eq!(interpret(source).unwrap(), "2\n1\n");
	}

	#[test]
	fn while_loop() {
		assert_eq!(interpret("var i = 0; while (i < 3) { print i; i = i + 1; }").unwrap(), "0\n1\n2\n");
	}

	#[test]
	fn for_loop_desugars_like_while() {
		let for_output = interpret("for (var i = 0; i < 3; i = i + 1) print i;").unwrap();
		let while_output = interpret("{ var i = 0; while (i < 3) { print i; i = i + 1; } }").unwrap();
		assert_eq!(for_output, while_output);
	}

	#[test]
	fn short_circuit_skips_the_right_side() {
		let source = "fun boom() { print \"boom\"; return true; } print false and boom(); print true or boom();";
		assert_eq!(interpret(source).unwrap(), "false\ntrue\n");
		assert_eq!(interpret("print nil or \"fallback\";").unwrap(), "fallback\n");
	}

	#[test]
	fn function_call_and_return() {
		let source = "fun add(a, b) { return a + b; } print add(1, 2);";
		assert_eq!(interpret(source).unwrap(), "3\n");
	}

	#[test]
	fn function_without_return_yields_nil() {
		assert_eq!(interpret("fun f() {} print f();").unwrap(), "nil\n");
	}

	#[test]
	fn recursion() {
		let source = "fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); } print fib(10);";
		assert_eq!(interpret(source).unwrap(), "55\n");
	}

	#[test]
	fn closures_capture_their_declaration_scope() {
		let source = "fun mk() { var x = 0; fun inc() { x = x + 1; return x; } return inc; } \
		              var f = mk(); print f(); print f();";
		assert_eq!(interpret(source).unwrap(), "1\n2\n");
	}

	#[test]
	fn two_closures_share_one_captured_variable() {
		let source = "fun mk() { var x = 0; fun inc() { x = x + 1; return x; } \
		              fun get() { return x; } print inc(); print get(); } mk();";
		assert_eq!(interpret(source).unwrap(), "1\n1\n");
	}

	#[test]
	fn wrong_arity_errors() {
		assert!(matches!(
			runtime_error("fun f(a) { return a; } f(1, 2);").r#type(),
			RuntimeErrorType::WrongNumberOfArguments { expected: 1, got: 2 }
		));
	}

	#[test]
	fn calling_a_non_callable_errors() {
		assert!(matches!(runtime_error("var x = 1; x();").r#type(), RuntimeErrorType::NotCallable));
	}

	#[test]
	fn class_fields_and_methods() {
		let source = "class Counter { init() { this.n = 0; } bump() { this.n = this.n + 1; return this.n; } } \
		              var c = Counter(); print c.bump(); print c.bump();";
		assert_eq!(interpret(source).unwrap(), "1\n2\n");
	}

	#[test]
	fn fields_shadow_methods() {
		let source = "class A { m() { return \"method\"; } } var a = A(); a.m = 1; print a.m;";
		assert_eq!(interpret(source).unwrap(), "1\n");
	}

	#[test]
	fn bound_method_remembers_its_receiver() {
		let source = "class A { init(name) { this.name = name; } who() { return this.name; } } \
		              var a = A(\"first\"); var m = a.who; var a2 = A(\"second\"); print m();";
		assert_eq!(interpret(source).unwrap(), "first\n");
	}

	#[test]
	fn initializer_always_returns_this() {
		let source = "class A { init() { this.x = 1; return; } } print A().init().x;";
		assert_eq!(interpret(source).unwrap(), "1\n");
	}

	#[test]
	fn inherited_method_dispatch() {
		let source = "class A { greet() { print \"hi\"; } } class B < A {} B().greet();";
		assert_eq!(interpret(source).unwrap(), "hi\n");
	}

	#[test]
	fn super_calls_the_parent_method() {
		let source = "class A { m() { return \"A\"; } } \
		              class B < A { m() { return super.m() + \"B\"; } } print B().m();";
		assert_eq!(interpret(source).unwrap(), "AB\n");
	}

	#[test]
	fn superclass_must_be_a_class() {
		assert!(matches!(
			runtime_error("var NotAClass = 1; class A < NotAClass {}").r#type(),
			RuntimeErrorType::TypeMismatch { expected: "class", .. }
		));
	}

	#[test]
	fn undefined_property_errors() {
		assert!(matches!(
			runtime_error("class A {} print A().missing;").r#type(),
			RuntimeErrorType::UndefinedProperty(_)
		));
	}

	#[test]
	fn property_access_on_non_instance_errors() {
		assert!(matches!(runtime_error("print 1.field;").r#type(), RuntimeErrorType::TypeMismatch { .. }));
	}

	#[test]
	fn missing_super_method_errors() {
		assert!(matches!(
			runtime_error("class A {} class B < A { m() { return super.gone(); } } B().m();").r#type(),
			RuntimeErrorType::MethodNotDefined(_)
		));
	}

	#[test]
	fn clock_native_is_installed() {
		assert_eq!(interpret("print clock() > 0;").unwrap(), "true\n");
	}
}
