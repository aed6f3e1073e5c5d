//! Value conversion on top of the registry's lookup levels.

use std::any::Any;
use std::sync::Arc;

use tracing::trace;

use crate::core::{ConvertError, Converted, TypeConverter, TypeKey};
use crate::registry::TypeConverterRegistry;


impl TypeConverterRegistry {
	/// Resolves a converter for `from -> to`: exact, then fuzzy, then rules.
	pub fn find_converter(&self, from: TypeKey, to: TypeKey) -> Option<Arc<dyn TypeConverter>> {
		if let Some(converter) = self.exact_converter(from, to) {
			return Some(converter);
		}
		if let Some(converter) = self.fuzzy_converter(from, to) {
			trace!(from = %from, to = %to, "resolved via fuzzy lookup");
			return Some(converter);
		}
		let converter = self.rule_based_converter(from, to)?;
		trace!(from = %from, to = %to, "resolved via rule");
		Some(converter)
	}

	/// Converts a type-erased value whose concrete type is `from`.
	pub fn convert_dyn(
		&self,
		value: &dyn Any,
		from: TypeKey,
		to: TypeKey,
	) -> Result<Converted, ConvertError> {
		let converter = self
			.find_converter(from, to)
			.ok_or(ConvertError::NoConverter { from, to })?;
		converter.convert(value, to)
	}

	/// Converts `value` into a `D`.
	///
	/// # Errors
	///
	/// [`ConvertError::NoConverter`] when no lookup level matches; otherwise
	/// whatever the selected converter reports.
	pub fn convert<S: Any, D: Any>(&self, value: &S) -> Result<D, ConvertError> {
		let to = TypeKey::of::<D>();
		let out = self.convert_dyn(value, TypeKey::of::<S>(), to)?;
		out.downcast::<D>()
			.map(|boxed| *boxed)
			.map_err(|_| ConvertError::OutputMismatch { expected: to })
	}
}
