use std::{collections::HashMap, fmt::Display, rc::Rc};

use crate::interpreter::callable::LoxFunction;

/// Class data shared by every instance: the method table and the optional
/// superclass chain. Immutable once the declaration has executed.
#[derive(Debug)]
pub struct LoxClass {
	pub name:       Rc<str>,
	pub superclass: Option<Rc<LoxClass>>,
	pub methods:    HashMap<String, LoxFunction>,
}

impl LoxClass {
	/// Walk the inheritance chain for a method, nearest class first.
	pub fn find_method(&self, name: &str) -> Option<&LoxFunction> {
		self.methods.get(name).or_else(|| self.superclass.as_ref().and_then(|s| s.find_method(name)))
	}

	/// Constructing an instance takes whatever `init` takes.
	pub fn arity(&self) -> usize { self.find_method("init").map_or(0, LoxFunction::arity) }
}

impl Display for LoxClass {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.name) }
}
