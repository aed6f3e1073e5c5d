//! Type identity, hierarchy and converter contracts shared by the registry.

pub mod converter;
pub mod error;
pub mod hierarchy;
pub mod key;
pub mod rule;

pub use converter::{Converted, FnConverter, TypeConverter, converter, try_converter};
pub use error::{ConvertError, RegistryError};
pub use hierarchy::{TypeDecl, TypeHierarchy, Visibility};
pub use key::{ConverterKey, TypeKey};
pub use rule::{
	AssignableSourceRule, FixedDestinationRule, FixedSourceRule, RuleKind, TypeConverterRule,
};
