use std::{collections::HashMap, fmt::Display, rc::Rc};

use crate::interpreter::{class::LoxClass, value::RuntimeValue};

/// Per-object state: a field map plus a reference to the class.
#[derive(Debug)]
pub struct Instance {
	class:  Rc<LoxClass>,
	fields: HashMap<String, RuntimeValue>,
}

impl Instance {
	pub fn new(class: Rc<LoxClass>) -> Self { Self { class, fields: HashMap::new() } }

	pub fn class(&self) -> &Rc<LoxClass> { &self.class }

	/// Fields shadow methods, so property lookup asks here first.
	pub fn field(&self, name: &str) -> Option<RuntimeValue> { self.fields.get(name).cloned() }

	pub fn set_field(&mut self, name: &str, value: RuntimeValue) {
		self.fields.insert(name.to_string(), value);
	}
}

impl Display for Instance {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} instance", self.class.name)
	}
}
