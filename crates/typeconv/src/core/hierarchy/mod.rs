//! Explicit type hierarchy used for ancestor walks.
//!
//! Rust has no runtime class graph, so parent and interface edges are
//! declared up front. Types that were never declared are treated as public
//! leaves whose only ancestor is themselves.
//!
//! # Ancestor order
//!
//! [`TypeHierarchy::ancestors`] returns the type itself followed by its
//! ancestors, closest first. The walk is breadth-first; at each type the
//! parent edge is followed before the interface edges, and interfaces keep
//! their declaration order. A type reachable over several paths is listed
//! at its first (closest) position only.
//!
//! Chains are memoized. Declaring a type drops the memo, since a new edge
//! can lengthen chains of unrelated descendants.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use super::key::TypeKey;

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
	#[default]
	Public,
	/// Not reachable by name from other modules; never registrable.
	Private,
}

/// Declaration of one type's position in the hierarchy.
#[derive(Clone, Debug)]
pub struct TypeDecl {
	pub key: TypeKey,
	pub visibility: Visibility,
	pub parent: Option<TypeKey>,
	pub interfaces: Vec<TypeKey>,
}

impl TypeDecl {
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self::new(TypeKey::of::<T>())
	}

	pub fn new(key: TypeKey) -> Self {
		Self {
			key,
			visibility: Visibility::Public,
			parent: None,
			interfaces: Vec::new(),
		}
	}

	/// Sets the single parent ("superclass") edge.
	pub fn extends<P: ?Sized + 'static>(mut self) -> Self {
		self.parent = Some(TypeKey::of::<P>());
		self
	}

	/// Appends an interface edge.
	pub fn implements<I: ?Sized + 'static>(mut self) -> Self {
		self.interfaces.push(TypeKey::of::<I>());
		self
	}

	pub fn private(mut self) -> Self {
		self.visibility = Visibility::Private;
		self
	}
}

/// Thread-safe store of [`TypeDecl`]s with memoized ancestor chains.
#[derive(Default)]
pub struct TypeHierarchy {
	decls: RwLock<FxHashMap<TypeKey, TypeDecl>>,
	chains: RwLock<FxHashMap<TypeKey, Arc<[TypeKey]>>>,
}

impl TypeHierarchy {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares (or redeclares) a type. Later declarations replace earlier
	/// ones for the same key.
	pub fn declare(&self, decl: TypeDecl) {
		self.decls.write().insert(decl.key, decl);
		self.chains.write().clear();
	}

	pub fn declare_all(&self, decls: impl IntoIterator<Item = TypeDecl>) {
		{
			let mut map = self.decls.write();
			for decl in decls {
				map.insert(decl.key, decl);
			}
		}
		self.chains.write().clear();
	}

	pub fn is_declared(&self, key: TypeKey) -> bool {
		self.decls.read().contains_key(&key)
	}

	pub fn len(&self) -> usize {
		self.decls.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.decls.read().is_empty()
	}

	pub fn is_public(&self, key: TypeKey) -> bool {
		self.decls
			.read()
			.get(&key)
			.is_none_or(|decl| decl.visibility == Visibility::Public)
	}

	/// Returns `key` followed by its ancestors, closest first.
	pub fn ancestors(&self, key: TypeKey) -> Arc<[TypeKey]> {
		if let Some(chain) = self.chains.read().get(&key) {
			return Arc::clone(chain);
		}

		// Memoize while still holding `decls` so a concurrent `declare` cannot
		// clear the memo between our walk and our insert.
		let decls = self.decls.read();
		let chain: Arc<[TypeKey]> = walk(&decls, key).into();
		Arc::clone(
			self.chains
				.write()
				.entry(key)
				.or_insert(chain),
		)
	}

	/// Whether a value of `from` may be used where `to` is expected.
	pub fn is_assignable(&self, from: TypeKey, to: TypeKey) -> bool {
		from == to || self.ancestors(from).contains(&to)
	}

	/// Whether either type is assignable to the other.
	pub fn are_convertible(&self, a: TypeKey, b: TypeKey) -> bool {
		self.is_assignable(a, b) || self.is_assignable(b, a)
	}
}

fn walk(decls: &FxHashMap<TypeKey, TypeDecl>, start: TypeKey) -> Vec<TypeKey> {
	let mut out = Vec::new();
	let mut seen = FxHashSet::default();
	let mut open = VecDeque::from([start]);

	while let Some(cur) = open.pop_front() {
		if !seen.insert(cur) {
			continue;
		}
		out.push(cur);
		if let Some(decl) = decls.get(&cur) {
			open.extend(decl.parent);
			open.extend(decl.interfaces.iter().copied());
		}
	}
	out
}
