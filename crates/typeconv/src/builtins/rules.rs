use std::any::Any;
use std::sync::Arc;

use super::{Number, Text, is_number};
use crate::core::{
	AssignableSourceRule, ConvertError, Converted, FixedDestinationRule, FixedSourceRule, TypeKey,
};
use crate::registry::TypeConverterRegistry;

macro_rules! parse_number {
	($($t:ty),*) => {
		/// Parses `s` into the numeric primitive identified by `to`.
		fn parse_number(s: &str, to: TypeKey) -> Result<Converted, ConvertError> {
			let s = s.trim();
			$(if to.is::<$t>() {
				return s
					.parse::<$t>()
					.map(|v| Box::new(v) as Converted)
					.map_err(|err| ConvertError::Invalid { to, reason: err.to_string() });
			})*
			Err(ConvertError::Invalid {
				to,
				reason: "not a numeric type".to_owned(),
			})
		}
	};
}
super::for_each_number!(parse_number);

macro_rules! number_is_nonzero {
	($($t:ty),*) => {
		fn number_is_nonzero(value: &dyn Any) -> Result<bool, ConvertError> {
			$(if let Some(v) = value.downcast_ref::<$t>() {
				return Ok(*v != <$t>::default());
			})*
			Err(ConvertError::SourceMismatch {
				expected: TypeKey::of::<dyn Number>(),
			})
		}
	};
}
super::for_each_number!(number_is_nonzero);

fn as_text(value: &dyn Any) -> Option<&str> {
	if let Some(s) = value.downcast_ref::<String>() {
		return Some(s.as_str());
	}
	value.downcast_ref::<&'static str>().copied()
}

fn text_to_bool(value: &dyn Any) -> Result<bool, ConvertError> {
	let text = as_text(value).ok_or(ConvertError::SourceMismatch {
		expected: TypeKey::of::<dyn Text>(),
	})?;
	super::numbers::parse_bool(text).map_err(|reason| ConvertError::Invalid {
		to: TypeKey::of::<bool>(),
		reason,
	})
}

pub(super) fn register(registry: &TypeConverterRegistry) {
	registry.register_rule(Arc::new(FixedSourceRule::<String>::new(
		is_number,
		|s: &String, to| parse_number(s, to),
	)));
	registry.register_rule(Arc::new(FixedSourceRule::<&'static str>::new(
		is_number,
		|s: &&'static str, to| parse_number(s, to),
	)));
	registry.register_rule(Arc::new(FixedDestinationRule::<bool>::new(
		is_number,
		number_is_nonzero,
	)));
	registry.register_rule(Arc::new(AssignableSourceRule::<bool>::new::<dyn Text, _>(
		text_to_bool,
	)));
}
