//! Chained name->value scopes.
//!
//! Each environment owns its own map and a non-owning handle to its parent;
//! the chain always roots in the globals. Local scopes are created on block
//! and call entry and dropped on exit, except when a closure keeps its
//! defining scope alive through the `parent` handle.

use std::collections::HashMap;

use anyhow::Context;

use crate::{interpreter::value::RuntimeValue, utils::RcCell};

pub type EnvRef = RcCell<Environment>;

#[derive(Debug, Default)]
pub struct Environment {
	values: HashMap<String, RuntimeValue>,
	parent: Option<EnvRef>,
}

impl Environment {
	/// A root scope with no parent.
	pub fn global() -> EnvRef { RcCell::new(Self::default()) }

	/// A local scope chained onto `parent`.
	pub fn with_parent(parent: EnvRef) -> EnvRef {
		RcCell::new(Self { values: HashMap::new(), parent: Some(parent) })
	}

	/// Bind a name in this scope, overwriting any previous binding here.
	/// The name is copied; it is the only text the runtime ever copies out
	/// of the source besides string concatenation.
	pub fn define(&mut self, name: &str, value: RuntimeValue) { self.values.insert(name.to_string(), value); }

	/// Read a name from this scope or the nearest enclosing one.
	pub fn get(&self, name: &str) -> Option<RuntimeValue> {
		if let Some(value) = self.values.get(name) {
			return Some(value.clone());
		}
		self.parent.as_ref().and_then(|p| p.borrow().get(name))
	}

	/// Mutate the nearest enclosing scope that already defines `name`.
	/// Returns false when no scope does.
	pub fn assign(&mut self, name: &str, value: RuntimeValue) -> bool {
		if let Some(slot) = self.values.get_mut(name) {
			*slot = value;
			return true;
		}
		match &self.parent {
			Some(parent) => parent.borrow_mut().assign(name, value),
			None => false,
		}
	}

	/// The scope exactly `depth` parents up the chain. The resolver proved
	/// the chain is long enough, so a short chain is an internal error.
	pub fn ancestor(env: &EnvRef, depth: usize) -> anyhow::Result<EnvRef> {
		let mut current = env.clone();
		for _ in 0..depth {
			let parent =
				current.borrow().parent.clone().context("scope chain shorter than resolved depth")?;
			current = parent;
		}
		Ok(current)
	}

	/// Read a name from the scope exactly `depth` parents up.
	pub fn get_at(env: &EnvRef, depth: usize, name: &str) -> anyhow::Result<RuntimeValue> {
		let scope = Self::ancestor(env, depth)?;
		let value = scope.borrow().values.get(name).cloned();
		value.with_context(|| format!("resolved variable '{name}' missing at depth {depth}"))
	}

	/// Write a name in the scope exactly `depth` parents up.
	pub fn assign_at(env: &EnvRef, depth: usize, name: &str, value: RuntimeValue) -> anyhow::Result<()> {
		let scope = Self::ancestor(env, depth)?;
		let mut scope = scope.borrow_mut();
		let slot = scope
			.values
			.get_mut(name)
			.with_context(|| format!("resolved variable '{name}' missing at depth {depth}"))?;
		*slot = value;
		Ok(())
	}
}
