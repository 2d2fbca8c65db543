//! Static name resolution.
//!
//! A pass between the parser and the interpreter that computes, for every
//! variable reference, how many scopes separate the reference from its
//! binding. The interpreter later walks exactly that many environment
//! parents, so a closure keeps seeing the scope chain from its declaration
//! site no matter where it is called. References that resolve to no local
//! scope are left out of the table and fall through to the globals.
//!
//! The same pass rejects the static errors: re-declarations, initializers
//! reading themselves, `return` outside functions, value returns from
//! `init`, `this`/`super` misuse and self-inheritance. Locals that are never
//! read come back as warnings.

use std::collections::HashMap;

use crate::{
	LoxError,
	ast::{Ast, Expr, ExprIdx, Stmt, StmtIdx},
	diagnostics::{Diagnostic, Diagnostics},
	error::resolver::{ResolveError, ResolveErrorType},
	scanner::Token,
};

/// What kind of function body is currently being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionKind {
	None,
	Function,
	Method,
	Initializer,
}

/// What kind of class body is currently being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassKind {
	None,
	Class,
	Subclass,
}

/// One name in a scope: declared first, defined once its initializer ran.
struct Binding {
	token:   Token,
	defined: bool,
	used:    bool,
}

pub struct Resolver<'a> {
	source:        &'a str,
	ast:           &'a Ast,
	scopes:        Vec<HashMap<&'a str, Binding>>,
	locals:        HashMap<Token, usize>,
	curr_function: FunctionKind,
	curr_class:    ClassKind,
	error_count:   usize,
	diags:         &'a mut Diagnostics,
}

impl<'a> Resolver<'a> {
	pub fn new(source: &'a str, ast: &'a Ast, diags: &'a mut Diagnostics) -> Self {
		Self {
			source,
			ast,
			scopes: Vec::new(),
			locals: HashMap::new(),
			curr_function: FunctionKind::None,
			curr_class: ClassKind::None,
			error_count: 0,
			diags,
		}
	}

	/// Resolve the whole program and hand back the depth side table.
	///
	/// The root block's statements resolve in the global scope, which is
	/// not represented on the scope stack: anything bound there stays out
	/// of the table.
	pub fn resolve(mut self, root: StmtIdx) -> Result<HashMap<Token, usize>, LoxError> {
		match self.ast.stmt(root) {
			Stmt::Block { statements, .. } => {
				for stmt in statements {
					self.resolve_stmt(*stmt);
				}
			}
			_ => return Err(anyhow::anyhow!("program root is not a block").into()),
		}
		if self.error_count > 0 {
			return Err(LoxError::ResolverErrors(self.error_count));
		}
		Ok(self.locals)
	}

	fn resolve_stmt(&mut self, idx: StmtIdx) {
		match self.ast.stmt(idx) {
			Stmt::Block { statements, .. } => {
				self.begin_scope();
				for stmt in statements {
					self.resolve_stmt(*stmt);
				}
				self.end_scope();
			}
			Stmt::Variable { name, initializer } => {
				self.declare(*name);
				if let Some(init) = initializer {
					self.resolve_expr(*init);
				}
				self.define(*name);
			}
			Stmt::Function { name, params, body } => {
				self.declare(*name);
				self.define(*name);
				self.resolve_function(params, *body, FunctionKind::Function);
			}
			Stmt::Expression { value } | Stmt::Print { value } => self.resolve_expr(*value),
			Stmt::If { condition, then_branch, else_branch } => {
				self.resolve_expr(*condition);
				self.resolve_stmt(*then_branch);
				if let Some(else_branch) = else_branch {
					self.resolve_stmt(*else_branch);
				}
			}
			Stmt::While { condition, body } => {
				self.resolve_expr(*condition);
				self.resolve_stmt(*body);
			}
			Stmt::Return { keyword, value } => {
				if self.curr_function == FunctionKind::None {
					self.report(*keyword, ResolveErrorType::ReturnFromTopLevel);
				}
				if let Some(value) = value {
					if self.curr_function == FunctionKind::Initializer {
						self.report(*keyword, ResolveErrorType::InitializerReturnedValue);
					}
					self.resolve_expr(*value);
				}
			}
			Stmt::Class { name, superclass, methods } => self.resolve_class(*name, *superclass, methods),
		}
	}

	fn resolve_class(&mut self, name: Token, superclass: Option<ExprIdx>, methods: &[StmtIdx]) {
		let enclosing = self.curr_class;
		self.curr_class = ClassKind::Class;

		self.declare(name);
		self.define(name);

		if let Some(sup_idx) = superclass {
			if let Expr::Variable { name: sup_name } = self.ast.expr(sup_idx) {
				if sup_name.lexeme(self.source) == name.lexeme(self.source) {
					self.report(*sup_name, ResolveErrorType::InheritanceCycle);
				}
			}
			self.curr_class = ClassKind::Subclass;
			self.resolve_expr(sup_idx);

			// `super` lives one scope outside the method scopes.
			self.begin_scope();
			self.inject(name, "super");
		}

		self.begin_scope();
		self.inject(name, "this");

		for method in methods {
			if let Stmt::Function { name: method_name, params, body } = self.ast.stmt(*method) {
				let kind = if method_name.lexeme(self.source) == "init" {
					FunctionKind::Initializer
				} else {
					FunctionKind::Method
				};
				self.resolve_function(params, *body, kind);
			}
		}

		self.end_scope();
		if superclass.is_some() {
			self.end_scope();
		}
		self.curr_class = enclosing;
	}

	/// Parameters and body statements share one scope; `body` is always a
	/// block, resolved without pushing a second one so that the recorded
	/// depths line up with the single environment a call creates.
	fn resolve_function(&mut self, params: &[Token], body: StmtIdx, kind: FunctionKind) {
		let enclosing = self.curr_function;
		self.curr_function = kind;

		self.begin_scope();
		for param in params {
			self.declare(*param);
			self.define(*param);
		}
		if let Stmt::Block { statements, .. } = self.ast.stmt(body) {
			for stmt in statements.clone() {
				self.resolve_stmt(stmt);
			}
		}
		self.end_scope();

		self.curr_function = enclosing;
	}

	fn resolve_expr(&mut self, idx: ExprIdx) {
		match self.ast.expr(idx) {
			Expr::Literal { .. } => {}
			Expr::Group { expr } | Expr::Unary { expr, .. } => self.resolve_expr(*expr),
			Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
				self.resolve_expr(*left);
				self.resolve_expr(*right);
			}
			Expr::Call { callee, args, .. } => {
				self.resolve_expr(*callee);
				for arg in args.clone() {
					self.resolve_expr(arg);
				}
			}
			Expr::Get { object, .. } => self.resolve_expr(*object),
			Expr::Set { object, value, .. } => {
				self.resolve_expr(*value);
				self.resolve_expr(*object);
			}
			Expr::Variable { name } => {
				let name = *name;
				if let Some(scope) = self.scopes.last() {
					if scope.get(name.lexeme(self.source)).is_some_and(|b| !b.defined) {
						self.report(name, ResolveErrorType::SelfreferenceInitializer);
					}
				}
				self.resolve_local(name, name.lexeme(self.source));
			}
			Expr::Assign { name, value } => {
				let name = *name;
				self.resolve_expr(*value);
				self.resolve_local(name, name.lexeme(self.source));
			}
			Expr::This { keyword } => {
				let keyword = *keyword;
				if self.curr_class == ClassKind::None {
					self.report(keyword, ResolveErrorType::ThisOutsideClass);
					return;
				}
				self.resolve_local(keyword, "this");
			}
			Expr::Super { keyword, .. } => {
				let keyword = *keyword;
				match self.curr_class {
					ClassKind::Subclass => self.resolve_local(keyword, "super"),
					_ => self.report(keyword, ResolveErrorType::SuperOutsideSubclass),
				}
			}
		}
	}

	/// Record the distance from the reference to the first enclosing scope
	/// that knows the name. Not found means global.
	fn resolve_local(&mut self, token: Token, name: &str) {
		for (depth, scope) in self.scopes.iter_mut().rev().enumerate() {
			if let Some(binding) = scope.get_mut(name) {
				binding.used = true;
				self.locals.insert(token, depth);
				return;
			}
		}
	}

	fn declare(&mut self, name: Token) {
		let lexeme = name.lexeme(self.source);
		let Some(scope) = self.scopes.last_mut() else { return };
		if scope.contains_key(lexeme) {
			self.report(name, ResolveErrorType::VariableRedeclaration);
			return;
		}
		scope.insert(lexeme, Binding { token: name, defined: false, used: false });
	}

	fn define(&mut self, name: Token) {
		let lexeme = name.lexeme(self.source);
		if let Some(binding) = self.scopes.last_mut().and_then(|s| s.get_mut(lexeme)) {
			binding.defined = true;
		}
	}

	/// Insert an implicit binding (`this`/`super`); pre-marked used so it
	/// never trips the unused-local warning.
	fn inject(&mut self, token: Token, name: &'a str) {
		if let Some(scope) = self.scopes.last_mut() {
			scope.insert(name, Binding { token, defined: true, used: true });
		}
	}

	fn begin_scope(&mut self) { self.scopes.push(HashMap::new()) }

	fn end_scope(&mut self) {
		let Some(scope) = self.scopes.pop() else { return };
		for (name, binding) in scope {
			if binding.defined && !binding.used {
				self.diags.report_warning(Diagnostic::warning(
					"UnusedVariable",
					format!("Local variable '{name}' is never read"),
					binding.token.loc,
					name,
				));
			}
		}
	}

	fn report(&mut self, token: Token, r#type: ResolveErrorType) {
		self.error_count += 1;
		let error = ResolveError::new(token.loc, token.lexeme(self.source), r#type);
		self.diags.report_error(Diagnostic::error(error.name(), error.message(), error.loc(), error.lexeme()));
	}
}
