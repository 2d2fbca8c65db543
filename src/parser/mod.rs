//! Recursive-descent parser.
//!
//! The parser turns the token stream into arena indices. Expression
//! precedence runs `assignment -> or -> and -> equality -> comparison ->
//! term -> factor -> unary -> call -> primary`; the left-associative binary
//! levels share one helper that takes the operator set and the next-higher
//! parser. `for` loops are desugared into `while` during parsing, so the
//! rest of the pipeline never sees them.
//!
//! Error handling follows panic mode: the first error in a statement is
//! reported, a panic flag suppresses the cascade that usually follows, and
//! for recoverable errors the parser discards tokens until a `;` or the
//! next declaration keyword before trying again. Everything else aborts the
//! parse with the first error surfaced.

use std::rc::Rc;

use TokenType::*;

use crate::{
	LoxError,
	ast::{Ast, Expr, ExprIdx, Lit, Stmt, StmtIdx},
	diagnostics::{Diagnostic, Diagnostics},
	error::parser::{ParseError, ParseErrorType, ParserError},
	scanner::{Token, TokenType},
};

const MAX_ARGUMENTS: usize = 255;

pub struct Parser<'a> {
	source:      &'a str,
	tokens:      Vec<Token>,
	pos:         usize,
	ast:         Ast,
	error_count: usize,
	panic_mode:  bool,
	diags:       &'a mut Diagnostics,
}

impl<'a> Parser<'a> {
	pub fn new(source: &'a str, tokens: Vec<Token>, diags: &'a mut Diagnostics) -> Self {
		Self { source, tokens, pos: 0, ast: Ast::new(), error_count: 0, panic_mode: false, diags }
	}

	/// Parse the whole token stream into a root block of declarations.
	pub fn parse(mut self) -> Result<(Ast, StmtIdx), LoxError> {
		let first = self.peek();
		let mut statements = Vec::new();
		while !self.check(Eof) {
			match self.parse_declaration() {
				Ok(stmt) => {
					self.panic_mode = false;
					statements.push(stmt);
				}
				Err(ParserError::InternalError(e)) => return Err(e.into()),
				Err(ParserError::ParseError(e)) => {
					self.report(&e);
					if !e.recoverable() {
						return Err(LoxError::ParserErrors(self.error_count));
					}
					self.synchronize();
				}
			}
		}
		if self.error_count > 0 {
			return Err(LoxError::ParserErrors(self.error_count));
		}
		let root = self.ast.alloc_stmt(Stmt::Block { statements, loc: first });
		Ok((self.ast, root))
	}

	fn parse_declaration(&mut self) -> Result<StmtIdx, ParserError> {
		if self.take(&[Class]).is_some() {
			self.class_declaration()
		} else if self.take(&[Fun]).is_some() {
			self.function_declaration()
		} else if self.take(&[Var]).is_some() {
			self.var_declaration()
		} else {
			self.parse_statement()
		}
	}

	/// `class Name [< Super] { method* }`, with the superclass recorded as a
	/// variable reference so the resolver can bind it lexically.
	fn class_declaration(&mut self) -> Result<StmtIdx, ParserError> {
		let name = self.consume(Identifier, ParseErrorType::ExpectedIdentifier)?;

		let superclass = if self.take(&[Less]).is_some() {
			let super_name = self.consume(Identifier, ParseErrorType::ExpectedIdentifier)?;
			Some(self.ast.alloc_expr(Expr::Variable { name: super_name }))
		} else {
			None
		};

		self.consume(LeftBrace, ParseErrorType::ExpectedToken("'{' before class body"))?;
		let mut methods = Vec::new();
		while !self.check(RightBrace) && !self.check(Eof) {
			methods.push(self.function_declaration()?);
		}
		self.consume(RightBrace, ParseErrorType::ExpectedClosingBrace)?;

		Ok(self.ast.alloc_stmt(Stmt::Class { name, superclass, methods }))
	}

	/// A named function: identifier, parameter list, block body. Used for
	/// both `fun` declarations and class methods.
	fn function_declaration(&mut self) -> Result<StmtIdx, ParserError> {
		let name = self.consume(Identifier, ParseErrorType::ExpectedIdentifier)?;
		self.consume(LeftParen, ParseErrorType::ExpectedOpeningParen)?;

		let mut params = Vec::new();
		if !self.check(RightParen) {
			loop {
				if params.len() >= MAX_ARGUMENTS {
					return Err(self.error_at(self.peek(), ParseErrorType::TooManyArguments));
				}
				params.push(self.consume(Identifier, ParseErrorType::ExpectedIdentifier)?);
				if self.take(&[Comma]).is_none() {
					break;
				}
			}
		}
		self.consume(RightParen, ParseErrorType::ExpectedClosingParen)?;

		if !self.check(LeftBrace) {
			return Err(self.error_at(self.peek(), ParseErrorType::ExpectedBlockStatement));
		}
		let brace = self.advance();
		let body = self.block(brace)?;

		Ok(self.ast.alloc_stmt(Stmt::Function { name, params, body }))
	}

	fn var_declaration(&mut self) -> Result<StmtIdx, ParserError> {
		let name = self.consume(Identifier, ParseErrorType::ExpectedIdentifier)?;

		let initializer = if self.take(&[Equal]).is_some() { Some(self.expression()?) } else { None };

		self.consume(Semicolon, ParseErrorType::ExpectedSemiColon)?;
		Ok(self.ast.alloc_stmt(Stmt::Variable { name, initializer }))
	}

	fn parse_statement(&mut self) -> Result<StmtIdx, ParserError> {
		if self.take(&[If]).is_some() {
			self.if_statement()
		} else if self.take(&[While]).is_some() {
			self.while_statement()
		} else if self.take(&[For]).is_some() {
			self.for_statement()
		} else if self.take(&[Print]).is_some() {
			let value = self.expression()?;
			self.consume(Semicolon, ParseErrorType::ExpectedSemiColon)?;
			Ok(self.ast.alloc_stmt(Stmt::Print { value }))
		} else if self.take(&[Return]).is_some() {
			self.return_statement()
		} else if self.check(LeftBrace) {
			let brace = self.advance();
			self.block(brace)
		} else {
			let value = self.expression()?;
			self.consume(Semicolon, ParseErrorType::ExpectedSemiColon)?;
			Ok(self.ast.alloc_stmt(Stmt::Expression { value }))
		}
	}

	fn if_statement(&mut self) -> Result<StmtIdx, ParserError> {
		self.consume(LeftParen, ParseErrorType::ExpectedOpeningParen)?;
		let condition = self.expression()?;
		self.consume(RightParen, ParseErrorType::ExpectedClosingParen)?;

		let then_branch = self.parse_statement()?;
		let else_branch = if self.take(&[Else]).is_some() { Some(self.parse_statement()?) } else { None };

		Ok(self.ast.alloc_stmt(Stmt::If { condition, then_branch, else_branch }))
	}

	fn while_statement(&mut self) -> Result<StmtIdx, ParserError> {
		self.consume(LeftParen, ParseErrorType::ExpectedOpeningParen)?;
		let condition = self.expression()?;
		self.consume(RightParen, ParseErrorType::ExpectedClosingParen)?;
		let body = self.parse_statement()?;

		Ok(self.ast.alloc_stmt(Stmt::While { condition, body }))
	}

	/// `for` has no node of its own; it desugars to
	/// `{ init; while (cond) { body; inc; } }` with a default `true`
	/// condition when omitted.
	fn for_statement(&mut self) -> Result<StmtIdx, ParserError> {
		let keyword = self.previous();
		self.consume(LeftParen, ParseErrorType::ExpectedOpeningParen)?;

		let initializer = if self.take(&[Semicolon]).is_some() {
			None
		} else if self.take(&[Var]).is_some() {
			Some(self.var_declaration()?)
		} else {
			let value = self.expression()?;
			self.consume(Semicolon, ParseErrorType::ExpectedSemiColon)?;
			Some(self.ast.alloc_stmt(Stmt::Expression { value }))
		};

		let condition = if self.check(Semicolon) { None } else { Some(self.expression()?) };
		self.consume(Semicolon, ParseErrorType::ExpectedSemiColon)?;

		let increment = if self.check(RightParen) { None } else { Some(self.expression()?) };
		self.consume(RightParen, ParseErrorType::ExpectedClosingParen)?;

		let mut body = self.parse_statement()?;

		if let Some(inc) = increment {
			let inc_stmt = self.ast.alloc_stmt(Stmt::Expression { value: inc });
			body = self.ast.alloc_stmt(Stmt::Block { statements: vec![body, inc_stmt], loc: keyword });
		}

		let condition =
			condition.unwrap_or_else(|| self.ast.alloc_expr(Expr::Literal { value: Lit::Bool(true) }));
		let while_stmt = self.ast.alloc_stmt(Stmt::While { condition, body });

		Ok(match initializer {
			Some(init) => self.ast.alloc_stmt(Stmt::Block { statements: vec![init, while_stmt], loc: keyword }),
			None => while_stmt,
		})
	}

	fn return_statement(&mut self) -> Result<StmtIdx, ParserError> {
		let keyword = self.previous();
		let value = if self.check(Semicolon) { None } else { Some(self.expression()?) };
		self.consume(Semicolon, ParseErrorType::ExpectedSemiColon)?;

		Ok(self.ast.alloc_stmt(Stmt::Return { keyword, value }))
	}

	/// `{ declaration* }`; the opening brace has already been consumed.
	fn block(&mut self, brace: Token) -> Result<StmtIdx, ParserError> {
		let mut statements = Vec::new();
		while !self.check(RightBrace) && !self.check(Eof) {
			statements.push(self.parse_declaration()?);
		}
		self.consume(RightBrace, ParseErrorType::ExpectedClosingBrace)?;

		Ok(self.ast.alloc_stmt(Stmt::Block { statements, loc: brace }))
	}

	fn expression(&mut self) -> Result<ExprIdx, ParserError> { self.assignment() }

	/// Parse an r-value first; a following `=` turns a `Variable` into an
	/// `Assign` and a `Get` into a `Set`. Anything else on the left is an
	/// invalid assignment target.
	fn assignment(&mut self) -> Result<ExprIdx, ParserError> {
		let expr = self.logical_or()?;

		if let Some(equals) = self.take(&[Equal]) {
			let value = self.assignment()?;
			// Copy the target out first; allocating below needs the arena.
			let target = match self.ast.expr(expr) {
				Expr::Variable { name } => Some((None, *name)),
				Expr::Get { object, name } => Some((Some(*object), *name)),
				_ => None,
			};
			return match target {
				Some((None, name)) => Ok(self.ast.alloc_expr(Expr::Assign { name, value })),
				Some((Some(object), name)) => {
					Ok(self.ast.alloc_expr(Expr::Set { object, name, value }))
				}
				None => Err(self.error_at(equals, ParseErrorType::ExpectedLVal)),
			};
		}

		Ok(expr)
	}

	fn logical_or(&mut self) -> Result<ExprIdx, ParserError> { self.parse_logical(Or, Self::logical_and) }

	fn logical_and(&mut self) -> Result<ExprIdx, ParserError> { self.parse_logical(And, Self::equality) }

	fn equality(&mut self) -> Result<ExprIdx, ParserError> {
		self.parse_binary(&[BangEqual, EqualEqual], Self::comparison)
	}

	fn comparison(&mut self) -> Result<ExprIdx, ParserError> {
		self.parse_binary(&[Greater, GreaterEqual, Less, LessEqual], Self::term)
	}

	fn term(&mut self) -> Result<ExprIdx, ParserError> { self.parse_binary(&[Minus, Plus], Self::factor) }

	fn factor(&mut self) -> Result<ExprIdx, ParserError> { self.parse_binary(&[Slash, Star], Self::unary) }

	/// Left-associative binary level: operator set + next-higher parser.
	fn parse_binary(
		&mut self,
		ops: &[TokenType],
		next: fn(&mut Self) -> Result<ExprIdx, ParserError>,
	) -> Result<ExprIdx, ParserError> {
		let mut expr = next(self)?;
		while let Some(op) = self.take(ops) {
			let right = next(self)?;
			expr = self.ast.alloc_expr(Expr::Binary { left: expr, op, right });
		}
		Ok(expr)
	}

	fn parse_logical(
		&mut self,
		op_type: TokenType,
		next: fn(&mut Self) -> Result<ExprIdx, ParserError>,
	) -> Result<ExprIdx, ParserError> {
		let mut expr = next(self)?;
		while let Some(op) = self.take(&[op_type]) {
			let right = next(self)?;
			expr = self.ast.alloc_expr(Expr::Logical { left: expr, op, right });
		}
		Ok(expr)
	}

	fn unary(&mut self) -> Result<ExprIdx, ParserError> {
		if let Some(op) = self.take(&[Bang, Minus]) {
			let expr = self.unary()?;
			return Ok(self.ast.alloc_expr(Expr::Unary { op, expr }));
		}
		self.call()
	}

	/// Postfix `(args)` and `.name` chains.
	fn call(&mut self) -> Result<ExprIdx, ParserError> {
		let mut expr = self.primary()?;
		loop {
			if self.take(&[LeftParen]).is_some() {
				expr = self.finish_call(expr)?;
			} else if self.take(&[Dot]).is_some() {
				let name = self.consume(Identifier, ParseErrorType::ExpectedIdentifier)?;
				expr = self.ast.alloc_expr(Expr::Get { object: expr, name });
			} else {
				break;
			}
		}
		Ok(expr)
	}

	fn finish_call(&mut self, callee: ExprIdx) -> Result<ExprIdx, ParserError> {
		let mut args = Vec::new();
		if !self.check(RightParen) {
			loop {
				if args.len() >= MAX_ARGUMENTS {
					return Err(self.error_at(self.peek(), ParseErrorType::TooManyArguments));
				}
				args.push(self.expression()?);
				if self.take(&[Comma]).is_none() {
					break;
				}
			}
		}
		let paren = self.consume(RightParen, ParseErrorType::ExpectedClosingParen)?;

		Ok(self.ast.alloc_expr(Expr::Call { callee, paren, args }))
	}

	fn primary(&mut self) -> Result<ExprIdx, ParserError> {
		if self.take(&[False]).is_some() {
			return Ok(self.ast.alloc_expr(Expr::Literal { value: Lit::Bool(false) }));
		}
		if self.take(&[True]).is_some() {
			return Ok(self.ast.alloc_expr(Expr::Literal { value: Lit::Bool(true) }));
		}
		if self.take(&[Nil]).is_some() {
			return Ok(self.ast.alloc_expr(Expr::Literal { value: Lit::Nil }));
		}
		if self.check(Number) {
			let token = self.advance();
			let value = token.number(self.source)?;
			return Ok(self.ast.alloc_expr(Expr::Literal { value: Lit::Number(value) }));
		}
		if self.check(String) {
			let token = self.advance();
			let value = Rc::from(token.string_contents(self.source));
			return Ok(self.ast.alloc_expr(Expr::Literal { value: Lit::Str(value) }));
		}
		if let Some(keyword) = self.take(&[Super]) {
			self.consume(Dot, ParseErrorType::ExpectedToken("'.' after 'super'"))?;
			let method = self.consume(Identifier, ParseErrorType::ExpectedIdentifier)?;
			return Ok(self.ast.alloc_expr(Expr::Super { keyword, method }));
		}
		if let Some(keyword) = self.take(&[This]) {
			return Ok(self.ast.alloc_expr(Expr::This { keyword }));
		}
		if self.check(Identifier) {
			let name = self.advance();
			return Ok(self.ast.alloc_expr(Expr::Variable { name }));
		}
		if self.take(&[LeftParen]).is_some() {
			let expr = self.expression()?;
			self.consume(RightParen, ParseErrorType::ExpectedClosingParen)?;
			return Ok(self.ast.alloc_expr(Expr::Group { expr }));
		}

		Err(self.error_at(self.peek(), ParseErrorType::ExpectedExpression))
	}

	/// Peek at the current token. The stream always ends with `Eof`, which
	/// `advance` never steps past.
	fn peek(&self) -> Token { self.tokens[self.pos] }

	fn previous(&self) -> Token { self.tokens[self.pos.saturating_sub(1)] }

	fn advance(&mut self) -> Token {
		let token = self.peek();
		if token.r#type != Eof {
			self.pos += 1;
		}
		token
	}

	fn check(&self, r#type: TokenType) -> bool { self.peek().r#type == r#type }

	/// Consume and return the current token if its tag is in `types`.
	fn take(&mut self, types: &[TokenType]) -> Option<Token> {
		if types.contains(&self.peek().r#type) { Some(self.advance()) } else { None }
	}

	fn consume(&mut self, r#type: TokenType, error: ParseErrorType) -> Result<Token, ParserError> {
		if self.check(r#type) { Ok(self.advance()) } else { Err(self.error_at(self.peek(), error)) }
	}

	fn error_at(&self, token: Token, r#type: ParseErrorType) -> ParserError {
		ParseError::new(token.loc, token.lexeme(self.source), r#type).into()
	}

	fn report(&mut self, error: &ParseError) {
		if self.panic_mode {
			return;
		}
		self.panic_mode = true;
		self.error_count += 1;
		self.diags.report_error(Diagnostic::error(error.name(), error.message(), error.loc(), error.lexeme()));
	}

	/// Discard tokens until a statement boundary: just past a `;` or right
	/// before the next declaration-starting keyword.
	fn synchronize(&mut self) {
		self.panic_mode = false;
		while !self.check(Eof) {
			if matches!(self.peek().r#type, Class | Fun | Var | For | If | While | Print | Return) {
				return;
			}
			if self.advance().r#type == Semicolon {
				return;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scanner::Scanner;

	fn parse_source(input: &str) -> Result<(Ast, StmtIdx), LoxError> {
		let mut diags = Diagnostics::new();
		let tokens = Scanner::new(input).scan_tokens(&mut diags)?;
		Parser::new(input, tokens, &mut diags).parse()
	}

	fn root_statements(ast: &Ast, root: StmtIdx) -> Vec<StmtIdx> {
		match ast.stmt(root) {
			Stmt::Block { statements, .. } => statements.clone(),
			_ => panic!("root is always a block"),
		}
	}

	/// Parenthesized rendering of an expression, for shape assertions.
	fn print_expr(ast: &Ast, source: &str, idx: ExprIdx) -> std::string::String {
		match ast.expr(idx) {
			Expr::Literal { value } => match value {
				Lit::Number(n) => format!("{n}"),
				Lit::Str(s) => format!("\"{s}\""),
				Lit::Bool(b) => format!("{b}"),
				Lit::Nil => "nil".into(),
			},
			Expr::Variable { name } => name.lexeme(source).into(),
			Expr::Assign { name, value } => {
				format!("(= {} {})", name.lexeme(source), print_expr(ast, source, *value))
			}
			Expr::Binary { left, op, right } | Expr::Logical { left, op, right } => format!(
				"({} {} {})",
				op.lexeme(source),
				print_expr(ast, source, *left),
				print_expr(ast, source, *right)
			),
			Expr::Unary { op, expr } => {
				format!("({} {})", op.lexeme(source), print_expr(ast, source, *expr))
			}
			Expr::Group { expr } => format!("(group {})", print_expr(ast, source, *expr)),
			Expr::Call { callee, args, .. } => {
				let mut out = format!("(call {}", print_expr(ast, source, *callee));
				for arg in args {
					out.push(' ');
					out.push_str(&print_expr(ast, source, *arg));
				}
				out.push(')');
				out
			}
			Expr::Get { object, name } => {
				format!("(get {} {})", print_expr(ast, source, *object), name.lexeme(source))
			}
			Expr::Set { object, name, value } => format!(
				"(set {} {} {})",
				print_expr(ast, source, *object),
				name.lexeme(source),
				print_expr(ast, source, *value)
			),
			Expr::Super { method, .. } => format!("(super {})", method.lexeme(source)),
			Expr::This { .. } => "this".into(),
		}
	}

	fn parse_expr(input: &str, expected: &str) {
		let source = format!("{input};");
		let (ast, root) = parse_source(&source).unwrap();
		let statements = root_statements(&ast, root);
		match ast.stmt(statements[0]) {
			Stmt::Expression { value } => assert_eq!(print_expr(&ast, &source, *value), expected),
			other => panic!("expected an expression statement, got {other:?}"),
		}
	}

	#[test]
	fn parse_precedence() {
		parse_expr("1 + 2 * 3", "(+ 1 (* 2 3))");
		parse_expr("1 + 2 * 3 / 4 - 5", "(- (+ 1 (/ (* 2 3) 4)) 5)");
		parse_expr("3 + 4 * (-2 - 1)", "(+ 3 (* 4 (group (- (- 2) 1))))");
	}

	#[test]
	fn parse_comparison_and_equality() {
		parse_expr("1 < 2", "(< 1 2)");
		parse_expr("1 <= 2 == true", "(== (<= 1 2) true)");
		parse_expr("1 != 2 == 3", "(== (!= 1 2) 3)");
		parse_expr("1 + 2 < 4 - 5", "(< (+ 1 2) (- 4 5))");
	}

	#[test]
	fn parse_unary() {
		parse_expr("-123", "(- 123)");
		parse_expr("!!true", "(! (! true))");
		parse_expr("-1 + 2", "(+ (- 1) 2)");
	}

	#[test]
	fn parse_logical_operators() {
		parse_expr("a or b and c", "(or a (and b c))");
		parse_expr("a and b or c", "(or (and a b) c)");
	}

	#[test]
	fn parse_assignment_targets() {
		parse_expr("a = 1", "(= a 1)");
		parse_expr("a = b = 2", "(= a (= b 2))");
		parse_expr("a.b = 3", "(set a b 3)");
		parse_expr("a.b.c", "(get (get a b) c)");
	}

	#[test]
	fn invalid_assignment_target_is_rejected() {
		assert!(matches!(parse_source("1 + 2 = 3;"), Err(LoxError::ParserErrors(_))));
	}

	#[test]
	fn parse_calls() {
		parse_expr("f()", "(call f)");
		parse_expr("f(1, 2)", "(call f 1 2)");
		parse_expr("f(1)(2)", "(call (call f 1) 2)");
		parse_expr("o.m(1)", "(call (get o m) 1)");
	}

	#[test]
	fn parse_this_and_super() {
		parse_expr("this.x", "(get this x)");
		parse_expr("super.m()", "(call (super m))");
	}

	#[test]
	fn var_declaration_shapes() {
		let source = "var x; var y = 42;";
		let (ast, root) = parse_source(source).unwrap();
		let statements = root_statements(&ast, root);
		assert!(
			matches!(ast.stmt(statements[0]), Stmt::Variable { initializer: None, name } if name.lexeme(source) == "x")
		);
		assert!(matches!(ast.stmt(statements[1]), Stmt::Variable { initializer: Some(_), .. }));
	}

	#[test]
	fn function_body_is_a_block() {
		let source = "fun add(a, b) { return a + b; }";
		let (ast, root) = parse_source(source).unwrap();
		let statements = root_statements(&ast, root);
		match ast.stmt(statements[0]) {
			Stmt::Function { name, params, body } => {
				assert_eq!(name.lexeme(source), "add");
				assert_eq!(params.len(), 2);
				assert!(matches!(ast.stmt(*body), Stmt::Block { .. }));
			}
			other => panic!("expected a function, got {other:?}"),
		}
	}

	#[test]
	fn class_superclass_is_a_variable() {
		let source = "class B < A { m() { return 1; } }";
		let (ast, root) = parse_source(source).unwrap();
		let statements = root_statements(&ast, root);
		match ast.stmt(statements[0]) {
			Stmt::Class { superclass: Some(sup), methods, .. } => {
				assert!(matches!(ast.expr(*sup), Expr::Variable { .. }));
				assert_eq!(methods.len(), 1);
				assert!(matches!(ast.stmt(methods[0]), Stmt::Function { .. }));
			}
			other => panic!("expected a class, got {other:?}"),
		}
	}

	#[test]
	fn for_desugars_to_while() {
		let source = "for (var i = 0; i < 3; i = i + 1) print i;";
		let (ast, root) = parse_source(source).unwrap();
		let statements = root_statements(&ast, root);
		// Outer block: initializer + while.
		let Stmt::Block { statements: outer, .. } = ast.stmt(statements[0]) else {
			panic!("for should desugar to a block");
		};
		assert!(matches!(ast.stmt(outer[0]), Stmt::Variable { .. }));
		let Stmt::While { body, .. } = ast.stmt(outer[1]) else { panic!("expected while") };
		// Inner block: body + increment.
		let Stmt::Block { statements: inner, .. } = ast.stmt(*body) else {
			panic!("loop body should be a block");
		};
		assert!(matches!(ast.stmt(inner[0]), Stmt::Print { .. }));
		assert!(matches!(ast.stmt(inner[1]), Stmt::Expression { .. }));
	}

	#[test]
	fn for_without_clauses_gets_a_true_condition() {
		let source = "for (;;) print 1;";
		let (ast, root) = parse_source(source).unwrap();
		let statements = root_statements(&ast, root);
		let Stmt::While { condition, .. } = ast.stmt(statements[0]) else {
			panic!("clauseless for should desugar to a bare while");
		};
		assert!(matches!(ast.expr(*condition), Expr::Literal { value: Lit::Bool(true) }));
	}

	#[test]
	fn missing_semicolon_recovers_and_keeps_parsing() {
		let mut diags = Diagnostics::new();
		let source = "print 1\nprint 2;";
		let tokens = Scanner::new(source).scan_tokens(&mut diags).unwrap();
		let result = Parser::new(source, tokens, &mut diags).parse();
		assert!(matches!(result, Err(LoxError::ParserErrors(1))));
		assert_eq!(diags.errors()[0].kind(), "ExpectedSemiColon");
	}

	#[test]
	fn cascade_is_suppressed_until_synchronization() {
		let mut diags = Diagnostics::new();
		let source = "var 1 = 2;\nvar x = 3;";
		let tokens = Scanner::new(source).scan_tokens(&mut diags).unwrap();
		let result = Parser::new(source, tokens, &mut diags).parse();
		// ExpectedIdentifier is fatal: first error surfaced, single report.
		assert!(result.is_err());
		assert_eq!(diags.error_count(), 1);
	}
}
