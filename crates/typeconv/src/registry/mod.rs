//! The type-converter registry.
//!
//! # Mental model
//!
//! * The table maps a source [`TypeKey`] to a map of destination keys and
//!   converters. At most one converter exists per exact pair.
//! * Registering `S -> D` also files the converter under every ancestor of
//!   `D` that `S` has no entry for yet, so one converter answers lookups for
//!   all of `D`'s supertypes. These derived entries never include `S -> S`
//!   and may later be replaced by an explicit registration of their pair.
//! * Rules sit beside the table, bucketed by [`RuleKind`].
//!
//! # Lookup levels
//!
//! 1. [`exact_converter`](TypeConverterRegistry::exact_converter): the pair as given.
//! 2. [`fuzzy_converter`](TypeConverterRegistry::fuzzy_converter): walk the
//!    source's ancestor chain closest first; the first hit wins.
//! 3. [`rule_based_converter`](TypeConverterRegistry::rule_based_converter):
//!    first rule accepting the pair.
//!
//! Consumers apply them in that order; see
//! [`find_converter`](TypeConverterRegistry::find_converter).
//!
//! # Concurrency
//!
//! Table and rules share one `RwLock`. Registration performs its duplicate
//! check and the whole ancestor insert loop under a single write
//! acquisition, so readers never see half a chain and two writers cannot
//! both believe they registered a pair first. Registrars run outside the
//! lock; between the clear and repopulation of [`reinitialize`](TypeConverterRegistry::reinitialize)
//! readers see an empty registry.

use std::collections::BTreeMap;
use std::ops::ControlFlow;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::core::{
	ConverterKey, RegistryError, RuleKind, TypeConverter, TypeConverterRule, TypeHierarchy, TypeKey,
};
use crate::registrar::Registrar;

mod builder;
mod options;

pub use builder::RegistryBuilder;
pub use options::RegistryOptions;

#[cfg(test)]
mod invariants;

type ConverterMap = FxHashMap<TypeKey, Arc<dyn TypeConverter>>;

#[derive(Default)]
struct RegistryState {
	converters: FxHashMap<TypeKey, ConverterMap>,
	/// Pairs filed as ancestors of another registration.
	derived: FxHashSet<ConverterKey>,
	rules: BTreeMap<RuleKind, Vec<Arc<dyn TypeConverterRule>>>,
}

pub struct TypeConverterRegistry {
	state: RwLock<RegistryState>,
	types: Arc<TypeHierarchy>,
	registrars: Vec<&'static Registrar>,
	options: RegistryOptions,
}

impl TypeConverterRegistry {
	pub fn builder() -> RegistryBuilder {
		RegistryBuilder::new()
	}

	/// Creates an empty registry without running any registrar.
	pub fn new(types: Arc<TypeHierarchy>, options: RegistryOptions) -> Self {
		Self::with_registrars(types, Vec::new(), options)
	}

	pub(crate) fn with_registrars(
		types: Arc<TypeHierarchy>,
		registrars: Vec<&'static Registrar>,
		options: RegistryOptions,
	) -> Self {
		Self {
			state: RwLock::new(RegistryState::default()),
			types,
			registrars,
			options,
		}
	}

	/// The hierarchy used for ancestor walks. Registrars may declare types
	/// through it.
	pub fn types(&self) -> &TypeHierarchy {
		&self.types
	}

	pub fn options(&self) -> &RegistryOptions {
		&self.options
	}

	pub fn registrars(&self) -> &[&'static Registrar] {
		&self.registrars
	}

	/// Registers `converter` for `from -> to` and for every ancestor of `to`
	/// that `from` has no converter for yet.
	///
	/// # Errors
	///
	/// Fails without touching the table when either type is private, when
	/// `from == to`, when `converter` is a rule, or when `from -> to` was
	/// already registered explicitly. A derived entry for `from -> to` is
	/// replaced.
	pub fn register_converter(
		&self,
		from: TypeKey,
		to: TypeKey,
		converter: Arc<dyn TypeConverter>,
	) -> Result<(), RegistryError> {
		if !self.types.is_public(from) {
			return Err(RegistryError::NonPublicSource(from));
		}
		if !self.types.is_public(to) {
			return Err(RegistryError::NonPublicDestination(to));
		}
		if from == to {
			return Err(RegistryError::SameType(from));
		}
		if converter.as_rule().is_some() {
			return Err(RegistryError::RuleViaConverterPath { from, to });
		}
		if self.options.warn_redundant_registration && self.types.are_convertible(from, to) {
			warn!(
				from = %from,
				to = %to,
				"no type converter needed: types are assignable"
			);
		}

		let targets = self.types.ancestors(to);

		let mut guard = self.state.write();
		let state = &mut *guard;
		let requested = ConverterKey::new(from, to);
		if state.lookup(from, to).is_some() && !state.derived.remove(&requested) {
			return Err(RegistryError::Duplicate { from, to });
		}

		let map = state.converters.entry(from).or_default();
		if map.insert(to, Arc::clone(&converter)).is_some() {
			debug!(from = %from, to = %to, "replaced derived type converter");
		} else {
			debug!(from = %from, to = %to, "registered type converter");
		}

		for &target in targets.iter() {
			if target == to || target == from {
				continue;
			}
			match map.get(&target) {
				None => {
					map.insert(target, Arc::clone(&converter));
					state.derived.insert(ConverterKey::new(from, target));
					debug!(from = %from, to = %target, "registered type converter");
				}
				Some(existing) if !Arc::ptr_eq(existing, &converter) => {
					warn!(
						from = %from,
						to = %target,
						requested = %to,
						"ancestor already has a converter; keeping the existing one"
					);
				}
				Some(_) => {}
			}
		}
		Ok(())
	}

	/// Typed shorthand for [`register_converter`](Self::register_converter).
	pub fn register<S: ?Sized + 'static, D: ?Sized + 'static>(
		&self,
		converter: Arc<dyn TypeConverter>,
	) -> Result<(), RegistryError> {
		self.register_converter(TypeKey::of::<S>(), TypeKey::of::<D>(), converter)
	}

	/// Registers `converter` once per source. Not atomic across sources:
	/// stops at the first failure and keeps earlier registrations.
	pub fn register_converter_for_all(
		&self,
		sources: &[TypeKey],
		to: TypeKey,
		converter: Arc<dyn TypeConverter>,
	) -> Result<(), RegistryError> {
		for &from in sources {
			self.register_converter(from, to, Arc::clone(&converter))?;
		}
		Ok(())
	}

	/// Converter filed under exactly `from -> to`, with no hierarchy walk.
	pub fn exact_converter(&self, from: TypeKey, to: TypeKey) -> Option<Arc<dyn TypeConverter>> {
		self.state
			.read()
			.converters
			.get(&from)
			.and_then(|map| map.get(&to))
			.cloned()
	}

	/// First rule, by category then registration order, accepting `from -> to`.
	pub fn rule_based_converter(
		&self,
		from: TypeKey,
		to: TypeKey,
	) -> Option<Arc<dyn TypeConverter>> {
		let state = self.state.read();
		state
			.rules
			.values()
			.flatten()
			.find(|rule| rule.can_convert(from, to, &self.types))
			.map(|rule| Arc::clone(rule) as Arc<dyn TypeConverter>)
	}

	/// Converter of the closest ancestor of `from` (including `from` itself)
	/// that has an entry for `to`.
	pub fn fuzzy_converter(&self, from: TypeKey, to: TypeKey) -> Option<Arc<dyn TypeConverter>> {
		let chain = self.types.ancestors(from);
		let state = self.state.read();

		if self.options.debug_mode {
			let mut matches = Vec::new();
			for &cur in chain.iter() {
				if state.lookup(cur, to).is_some() {
					matches.push(ConverterKey::new(cur, to).to_string());
					if cur == from {
						break;
					}
				}
			}
			if matches.len() > 1 {
				warn!(
					from = %from,
					to = %to,
					?matches,
					"fuzzy type converter lookup is ambiguous"
				);
			}
		}

		chain
			.iter()
			.find_map(|&cur| state.lookup(cur, to))
			.cloned()
	}

	/// Invokes `f` for every registered `(from, to, converter)` triple.
	///
	/// Runs over a copy taken under the read lock, so `f` may take as long as
	/// it likes and may call back into the registry. Iteration order is
	/// unspecified.
	pub fn for_each_converter<F>(&self, mut f: F)
	where
		F: FnMut(TypeKey, TypeKey, &Arc<dyn TypeConverter>) -> ControlFlow<()>,
	{
		let copy = self.state.read().converters.clone();
		for (from, map) in &copy {
			for (to, converter) in map {
				if f(*from, *to, converter).is_break() {
					return;
				}
			}
		}
	}

	/// Number of registered pairs, ancestor entries included.
	pub fn converter_count(&self) -> usize {
		self.state.read().converters.values().map(|map| map.len()).sum()
	}

	pub fn register_rule(&self, rule: Arc<dyn TypeConverterRule>) {
		let kind = rule.kind();
		self.state.write().rules.entry(kind).or_default().push(rule);
		debug!(?kind, "registered type converter rule");
	}

	pub fn rule_count(&self) -> usize {
		self.state.read().rules.values().map(Vec::len).sum()
	}

	/// Drops every converter and rule, then runs the registrars again in
	/// order.
	///
	/// # Errors
	///
	/// The first registrar failure is returned as
	/// [`RegistryError::Registrar`]; registrars that ran before it stay
	/// applied.
	pub fn reinitialize(&self) -> Result<(), RegistryError> {
		{
			let mut state = self.state.write();
			state.converters.clear();
			state.derived.clear();
			state.rules.clear();
		}

		for registrar in &self.registrars {
			registrar.run(self)?;
		}

		debug!(
			converters = self.converter_count(),
			rules = self.rule_count(),
			"type converter registry initialized"
		);
		Ok(())
	}
}

impl RegistryState {
	fn lookup(&self, from: TypeKey, to: TypeKey) -> Option<&Arc<dyn TypeConverter>> {
		self.converters.get(&from).and_then(|map| map.get(&to))
	}
}

impl std::fmt::Debug for TypeConverterRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TypeConverterRegistry")
			.field("converters", &self.converter_count())
			.field("rules", &self.rule_count())
			.field("registrars", &self.registrars)
			.field("options", &self.options)
			.finish()
	}
}
