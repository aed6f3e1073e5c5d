//! Conversion rules: converters that claim a dynamic set of type pairs.
//!
//! Rules are consulted after exact and fuzzy lookups miss. They are grouped
//! by [`RuleKind`]; groups are tried in declaration order of the enum and,
//! within a group, in registration order. The first rule whose
//! [`TypeConverterRule::can_convert`] accepts the pair is used.

use std::any::Any;

use super::converter::{Converted, TypeConverter};
use super::error::ConvertError;
use super::hierarchy::TypeHierarchy;
use super::key::TypeKey;

/// Rule categories, in lookup order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleKind {
	/// One known source, destination decided by the rule.
	FixedSourceAnyDestination,
	/// Source decided by the rule, one known destination.
	AnySourceFixedDestination,
	/// Any source assignable to a base type, one known destination.
	AssignableSourceFixedDestination,
}

pub trait TypeConverterRule: TypeConverter {
	fn kind(&self) -> RuleKind;

	/// Whether this rule handles `from -> to`. `types` resolves
	/// assignability for rules that match on ancestors.
	fn can_convert(&self, from: TypeKey, to: TypeKey, types: &TypeHierarchy) -> bool;
}

type DynConvert<S> = dyn Fn(&S, TypeKey) -> Result<Converted, ConvertError> + Send + Sync;

/// Rule for a fixed source type `S`; `accepts` picks the destinations.
pub struct FixedSourceRule<S> {
	accepts: fn(TypeKey) -> bool,
	convert: Box<DynConvert<S>>,
}

impl<S: Any> FixedSourceRule<S> {
	pub fn new<F>(accepts: fn(TypeKey) -> bool, convert: F) -> Self
	where
		F: Fn(&S, TypeKey) -> Result<Converted, ConvertError> + Send + Sync + 'static,
	{
		Self {
			accepts,
			convert: Box::new(convert),
		}
	}
}

impl<S: Any> TypeConverter for FixedSourceRule<S> {
	fn convert(&self, value: &dyn Any, to: TypeKey) -> Result<Converted, ConvertError> {
		let value = value
			.downcast_ref::<S>()
			.ok_or(ConvertError::SourceMismatch {
				expected: TypeKey::of::<S>(),
			})?;
		(self.convert)(value, to)
	}

	fn as_rule(&self) -> Option<&dyn TypeConverterRule> {
		Some(self)
	}
}

impl<S: Any> TypeConverterRule for FixedSourceRule<S> {
	fn kind(&self) -> RuleKind {
		RuleKind::FixedSourceAnyDestination
	}

	fn can_convert(&self, from: TypeKey, to: TypeKey, _types: &TypeHierarchy) -> bool {
		from.is::<S>() && (self.accepts)(to)
	}
}

type DynProduce<D> = dyn Fn(&dyn Any) -> Result<D, ConvertError> + Send + Sync;

/// Rule for a fixed destination type `D`; `accepts` picks the sources.
pub struct FixedDestinationRule<D> {
	accepts: fn(TypeKey) -> bool,
	convert: Box<DynProduce<D>>,
}

impl<D: Any + Send> FixedDestinationRule<D> {
	pub fn new<F>(accepts: fn(TypeKey) -> bool, convert: F) -> Self
	where
		F: Fn(&dyn Any) -> Result<D, ConvertError> + Send + Sync + 'static,
	{
		Self {
			accepts,
			convert: Box::new(convert),
		}
	}
}

impl<D: Any + Send> TypeConverter for FixedDestinationRule<D> {
	fn convert(&self, value: &dyn Any, _to: TypeKey) -> Result<Converted, ConvertError> {
		Ok(Box::new((self.convert)(value)?))
	}

	fn as_rule(&self) -> Option<&dyn TypeConverterRule> {
		Some(self)
	}
}

impl<D: Any + Send> TypeConverterRule for FixedDestinationRule<D> {
	fn kind(&self) -> RuleKind {
		RuleKind::AnySourceFixedDestination
	}

	fn can_convert(&self, from: TypeKey, to: TypeKey, _types: &TypeHierarchy) -> bool {
		to.is::<D>() && (self.accepts)(from)
	}
}

/// Rule converting any source assignable to `base` into `D`.
pub struct AssignableSourceRule<D> {
	base: TypeKey,
	convert: Box<DynProduce<D>>,
}

impl<D: Any + Send> AssignableSourceRule<D> {
	pub fn new<B, F>(convert: F) -> Self
	where
		B: ?Sized + 'static,
		F: Fn(&dyn Any) -> Result<D, ConvertError> + Send + Sync + 'static,
	{
		Self {
			base: TypeKey::of::<B>(),
			convert: Box::new(convert),
		}
	}

	pub fn base(&self) -> TypeKey {
		self.base
	}
}

impl<D: Any + Send> TypeConverter for AssignableSourceRule<D> {
	fn convert(&self, value: &dyn Any, _to: TypeKey) -> Result<Converted, ConvertError> {
		Ok(Box::new((self.convert)(value)?))
	}

	fn as_rule(&self) -> Option<&dyn TypeConverterRule> {
		Some(self)
	}
}

impl<D: Any + Send> TypeConverterRule for AssignableSourceRule<D> {
	fn kind(&self) -> RuleKind {
		RuleKind::AssignableSourceFixedDestination
	}

	fn can_convert(&self, from: TypeKey, to: TypeKey, types: &TypeHierarchy) -> bool {
		to.is::<D>() && types.is_assignable(from, self.base)
	}
}
