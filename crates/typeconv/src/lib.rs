//! Thread-safe registry of type converters.
//!
//! A [`TypeConverterRegistry`] maps ordered (source, destination) type pairs
//! to converters and answers lookups at three levels of strictness: exact
//! pair, closest ancestor of the source, and pluggable rules. Types are
//! identified by [`TypeKey`]; parent and interface edges between them are
//! declared on a [`TypeHierarchy`].
//!
//! Registries are assembled explicitly and shared by the application:
//!
//! ```ignore
//! let registry = TypeConverterRegistry::builder()
//!     .with_discovered_registrars()
//!     .build()?;
//! let text: String = registry.convert(&42u16)?;
//! ```
//!
//! Converters come from [`Registrar`]s, either added to the builder by hand
//! or submitted with [`type_converter_registrar!`] and discovered at build
//! time.

pub mod core;
mod macros;
pub mod registrar;
pub mod registry;

mod convert;

#[cfg(feature = "builtins")]
pub mod builtins;

pub use crate::core::{
	AssignableSourceRule, ConvertError, Converted, ConverterKey, FixedDestinationRule,
	FixedSourceRule, FnConverter, RegistryError, RuleKind, TypeConverter, TypeConverterRule,
	TypeDecl, TypeHierarchy, TypeKey, Visibility, converter, try_converter,
};

#[doc(hidden)]
pub use inventory;
pub use registrar::Registrar;
pub use registry::{RegistryBuilder, RegistryOptions, TypeConverterRegistry};
