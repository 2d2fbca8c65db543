//! Single-pass state-machine lexer.
//!
//! The scanner walks the source exactly once and hands out tokens that are
//! nothing but a tag plus a byte span and a line/column position; lexemes
//! and literal values are recovered from the source buffer on demand. Lexing
//! is total: whatever the input, the stream ends with an `Eof` token, and
//! every unplaceable byte becomes an `Invalid` token plus a buffered
//! diagnostic.

mod token;

use std::{iter::Peekable, str::CharIndices};

use TokenType::*;
pub use token::{Span, SrcLoc, Token, TokenType};

use crate::{
	LoxError,
	diagnostics::{Diagnostic, Diagnostics},
	error::scanner::{ScanError, ScanErrorType},
};

/// Labels for the scanner's state switch.
enum State {
	Start,
	Comment,
	Str,
	Ident,
	Number,
	NumberAfterDot,
	End,
}

/// A scanner for Lox source code.
pub struct Scanner<'a> {
	/// User input source code.
	source:      &'a str,
	/// User input source code iterator.
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme.
	start:       usize,
	/// Points one past the character most recently consumed.
	cursor:      usize,
	/// Position of the next character to be consumed.
	line:        u32,
	col:         u32,
	/// Position of the first character of the current lexeme.
	start_loc:   SrcLoc,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		Self {
			source,
			source_iter: source.char_indices().peekable(),
			start: 0,
			cursor: 0,
			line: 1,
			col: 1,
			start_loc: SrcLoc { line: 1, col: 1 },
		}
	}

	/// Scan the whole source.
	///
	/// Individual lexing errors land in `diags`; the returned stream is
	/// always terminated by `Eof`. The result is an error iff at least one
	/// diagnostic was produced.
	pub fn scan_tokens(mut self, diags: &mut Diagnostics) -> Result<Vec<Token>, LoxError> {
		let mut tokens = Vec::new();
		let mut errors = 0;
		let mut state = State::Start;
		loop {
			state = match state {
				State::Start => self.start_state(&mut tokens, diags, &mut errors),
				State::Comment => self.comment_state(),
				State::Str => self.string_state(&mut tokens, diags, &mut errors),
				State::Ident => self.identifier_state(&mut tokens),
				State::Number => self.number_state(&mut tokens),
				State::NumberAfterDot => self.number_after_dot_state(&mut tokens),
				State::End => {
					let span = Span::new(self.source.len(), self.source.len());
					tokens.push(Token::new(Eof, span, SrcLoc { line: self.line, col: self.col }));
					break;
				}
			};
		}
		if errors > 0 { Err(LoxError::ScannerErrors(errors)) } else { Ok(tokens) }
	}

	/// Dispatch on the first character of the next lexeme.
	fn start_state(&mut self, tokens: &mut Vec<Token>, diags: &mut Diagnostics, errors: &mut usize) -> State {
		self.skip_whitespace();
		self.begin_lexeme();

		let Some(c) = self.advance() else { return State::End };

		#[rustfmt::skip]
		let r#type = match c {
			'(' => LeftParen,
			')' => RightParen,
			'[' => LeftBracket,
			']' => RightBracket,
			'{' => LeftBrace,
			'}' => RightBrace,
			',' => Comma,
			'.' => Dot,
			'-' => Minus,
			'+' => Plus,
			';' => Semicolon,
			'*' => Star,
			'!' => if self.match_next('=') { BangEqual } else { Bang },
			'=' => if self.match_next('=') { EqualEqual } else { Equal },
			'<' => if self.match_next('=') { LessEqual } else { Less },
			'>' => if self.match_next('=') { GreaterEqual } else { Greater },
			'/' => if self.match_next('/') { return State::Comment } else { Slash },
			'"' => return State::Str,
			c if c.is_ascii_digit() => return State::Number,
			c if c.is_ascii_alphabetic() || c == '_' => return State::Ident,
			c => {
				self.report(diags, errors, ScanError::new(self.start_loc, ScanErrorType::UnexpectedCharacter(c)));
				Invalid
			}
		};

		self.push_token(tokens, r#type);
		State::Start
	}

	/// A `//` comment runs to the end of the line.
	fn comment_state(&mut self) -> State {
		while self.peek().is_some_and(|c| c != '\n') {
			self.advance();
		}
		State::Start
	}

	/// Inside a `"`-delimited string; newlines are allowed.
	fn string_state(&mut self, tokens: &mut Vec<Token>, diags: &mut Diagnostics, errors: &mut usize) -> State {
		while self.peek().is_some_and(|c| c != '"') {
			self.advance();
		}

		if self.peek().is_none() {
			self.report(diags, errors, ScanError::new(self.start_loc, ScanErrorType::UnterminatedString));
			return State::End;
		}

		self.advance(); // The closing "
		self.push_token(tokens, String);
		State::Start
	}

	fn identifier_state(&mut self, tokens: &mut Vec<Token>) -> State {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		let r#type = TokenType::keyword_or_identifier(&self.source[self.start..self.cursor]);
		self.push_token(tokens, r#type);
		State::Start
	}

	/// Digits before a possible decimal point.
	fn number_state(&mut self, tokens: &mut Vec<Token>) -> State {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}

		// A trailing '.' not followed by a digit is not part of the number.
		if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
			self.advance(); // consume '.'
			return State::NumberAfterDot;
		}

		self.push_token(tokens, Number);
		State::Start
	}

	/// Digits of the fractional part.
	fn number_after_dot_state(&mut self, tokens: &mut Vec<Token>) -> State {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}
		self.push_token(tokens, Number);
		State::Start
	}

	fn skip_whitespace(&mut self) {
		while self.peek().is_some_and(|c| matches!(c, ' ' | '\t' | '\r' | '\n')) {
			self.advance();
		}
	}

	/// Mark the start of the next lexeme.
	fn begin_lexeme(&mut self) {
		self.start = self.source_iter.peek().map_or(self.source.len(), |&(i, _)| i);
		self.cursor = self.start;
		self.start_loc = SrcLoc { line: self.line, col: self.col };
	}

	/// Advance to the next character, tracking line and column.
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		if c == '\n' {
			self.line += 1;
			self.col = 1;
		} else {
			self.col += 1;
		}
		Some(c)
	}

	/// Peek the current character.
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Peek the second character ahead.
	fn peek_second(&mut self) -> Option<char> {
		let mut it = self.source_iter.clone();
		it.next()?;
		it.next().map(|(_, c)| c)
	}

	/// Match the next character if it is the expected one.
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	fn push_token(&mut self, tokens: &mut Vec<Token>, r#type: TokenType) {
		tokens.push(Token::new(r#type, Span::new(self.start, self.cursor), self.start_loc));
	}

	fn report(&self, diags: &mut Diagnostics, errors: &mut usize, error: ScanError) {
		let lexeme = &self.source[self.start..self.cursor];
		diags.report_error(Diagnostic::error(error.name(), error.message(), error.loc(), lexeme));
		*errors += 1;
	}
}
