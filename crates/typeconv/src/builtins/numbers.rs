use std::any::Any;
use std::sync::Arc;

use super::Number;
use crate::core::{
	ConvertError, Converted, RegistryError, TypeConverter, TypeKey, converter, try_converter,
};
use crate::registry::TypeConverterRegistry;

/// Formats any numeric primitive with its `Display` impl.
///
/// Registered on `dyn Number`, so it is reached with concrete numeric
/// values through fuzzy lookup.
pub struct NumberToString;

macro_rules! as_number {
	($($t:ty),*) => {
		fn as_number(value: &dyn Any) -> Option<&dyn Number> {
			$(if let Some(v) = value.downcast_ref::<$t>() {
				return Some(v as &dyn Number);
			})*
			None
		}
	};
}
super::for_each_number!(as_number);

impl TypeConverter for NumberToString {
	fn convert(&self, value: &dyn Any, _to: TypeKey) -> Result<Converted, ConvertError> {
		let number = as_number(value).ok_or(ConvertError::SourceMismatch {
			expected: TypeKey::of::<dyn Number>(),
		})?;
		Ok(Box::new(number.to_string()))
	}
}

pub(super) fn parse_bool(s: &str) -> Result<bool, String> {
	match s.trim().to_ascii_lowercase().as_str() {
		"true" | "yes" | "on" | "1" => Ok(true),
		"false" | "no" | "off" | "0" => Ok(false),
		other => Err(format!("{other:?} is not a boolean")),
	}
}

fn parse_char(s: &str) -> Result<char, String> {
	let mut chars = s.chars();
	match (chars.next(), chars.next()) {
		(Some(c), None) => Ok(c),
		_ => Err(format!("expected exactly one character, got {:?}", s)),
	}
}

pub(super) fn register(registry: &TypeConverterRegistry) -> Result<(), RegistryError> {
	registry.register::<dyn Number, String>(Arc::new(NumberToString))?;
	registry.register::<bool, String>(converter(|b: &bool| b.to_string()))?;
	registry.register::<String, bool>(try_converter(|s: &String| parse_bool(s)))?;
	registry.register::<char, String>(converter(|c: &char| c.to_string()))?;
	registry.register::<String, char>(try_converter(|s: &String| parse_char(s)))?;
	registry.register::<&'static str, String>(converter(|s: &&'static str| (*s).to_owned()))?;
	Ok(())
}
