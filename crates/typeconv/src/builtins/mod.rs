//! Built-in interfaces, hierarchy and registrars for primitive types.
//!
//! Numeric primitives implement the [`Number`] interface and string types
//! implement [`Text`]. Formatting numbers is registered once, on
//! `dyn Number`, and reaches every concrete numeric type through fuzzy
//! lookup. Parsing strings into numbers is a rule, since the destination
//! varies.

use std::fmt::Display;

use crate::core::{RegistryError, TypeDecl, TypeKey};
use crate::registry::TypeConverterRegistry;
use crate::type_converter_registrar;

mod numbers;
mod rules;


pub use numbers::NumberToString;

/// Interface of the numeric primitives.
pub trait Number: Display + Send + Sync + 'static {}

/// Interface of owned and borrowed strings.
pub trait Text: AsRef<str> + Send + Sync + 'static {}

impl Text for String {}
impl Text for &'static str {}

macro_rules! for_each_number {
	($mac:ident) => {
		$mac!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
	};
}
pub(crate) use for_each_number;

macro_rules! impl_number {
	($($t:ty),*) => {
		$(impl Number for $t {})*

		/// Keys of every numeric primitive.
		pub fn number_types() -> Vec<TypeKey> {
			vec![$(TypeKey::of::<$t>()),*]
		}

		fn number_decls() -> Vec<TypeDecl> {
			vec![$(TypeDecl::of::<$t>().implements::<dyn Number>()),*]
		}
	};
}
for_each_number!(impl_number);

pub fn is_number(key: TypeKey) -> bool {
	number_types().contains(&key)
}

/// Hierarchy declarations for the built-in interfaces.
pub fn decls() -> Vec<TypeDecl> {
	let mut decls = number_decls();
	decls.push(TypeDecl::of::<String>().implements::<dyn Text>());
	decls.push(TypeDecl::of::<&'static str>().implements::<dyn Text>());
	decls
}

type_converter_registrar!(PRIMITIVES, {
	name: "builtin::primitives",
	ordinal: 10,
}, register_primitives);

type_converter_registrar!(RULES, {
	name: "builtin::rules",
	ordinal: 20,
}, register_rules);

fn register_primitives(registry: &TypeConverterRegistry) -> Result<(), RegistryError> {
	registry.types().declare_all(decls());
	numbers::register(registry)
}

fn register_rules(registry: &TypeConverterRegistry) -> Result<(), RegistryError> {
	rules::register(registry);
	Ok(())
}
