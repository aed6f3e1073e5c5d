use std::any::Any;
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use super::error::ConvertError;
use super::key::TypeKey;
use super::rule::TypeConverterRule;

/// Boxed output of a conversion.
pub type Converted = Box<dyn Any + Send>;

/// Converts a type-erased value into a value of another type.
///
/// A converter registered under an ancestor of the value's type is reached
/// through fuzzy lookup with the original value, so implementations serving
/// abstract sources must accept every concrete type they claim.
pub trait TypeConverter: Send + Sync + 'static {
	/// Converts `value` into an instance of `to`.
	fn convert(&self, value: &dyn Any, to: TypeKey) -> Result<Converted, ConvertError>;

	/// Returns `Some` when this converter is a rule.
	///
	/// Rules carry their own applicability predicate and are rejected by the
	/// fixed-pair registration path.
	fn as_rule(&self) -> Option<&dyn TypeConverterRule> {
		None
	}
}

/// Converter backed by a typed closure from `&S` to `D`.
pub struct FnConverter<S, D, E, F> {
	f: F,
	_marker: PhantomData<fn(&S) -> Result<D, E>>,
}

impl<S, D, E, F> TypeConverter for FnConverter<S, D, E, F>
where
	S: Any,
	D: Any + Send,
	F: Fn(&S) -> Result<D, E> + Send + Sync + 'static,
	E: Display + 'static,
{
	fn convert(&self, value: &dyn Any, _to: TypeKey) -> Result<Converted, ConvertError> {
		let value = value
			.downcast_ref::<S>()
			.ok_or(ConvertError::SourceMismatch {
				expected: TypeKey::of::<S>(),
			})?;
		match (self.f)(value) {
			Ok(out) => Ok(Box::new(out)),
			Err(err) => Err(ConvertError::Invalid {
				to: TypeKey::of::<D>(),
				reason: err.to_string(),
			}),
		}
	}
}

/// Wraps an infallible closure as a shared converter.
pub fn converter<S, D, F>(f: F) -> Arc<dyn TypeConverter>
where
	S: Any,
	D: Any + Send,
	F: Fn(&S) -> D + Send + Sync + 'static,
{
	try_converter(move |value: &S| Ok::<D, std::convert::Infallible>(f(value)))
}

/// Wraps a fallible closure as a shared converter; the error's display text
/// becomes the [`ConvertError::Invalid`] reason.
pub fn try_converter<S, D, F, E>(f: F) -> Arc<dyn TypeConverter>
where
	S: Any,
	D: Any + Send,
	F: Fn(&S) -> Result<D, E> + Send + Sync + 'static,
	E: Display + 'static,
{
	Arc::new(FnConverter {
		f,
		_marker: PhantomData,
	})
}
