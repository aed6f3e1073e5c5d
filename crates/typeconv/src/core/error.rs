use super::key::TypeKey;

/// Fatal configuration errors raised while populating a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
	#[error("source {0} is not a public type")]
	NonPublicSource(TypeKey),

	#[error("destination {0} is not a public type")]
	NonPublicDestination(TypeKey),

	#[error("source and destination are both {0}; no converter is required")]
	SameType(TypeKey),

	/// A rule was handed to the plain converter path.
	#[error("converter rules must be registered via register_rule: from={from} to={to}")]
	RuleViaConverterPath { from: TypeKey, to: TypeKey },

	#[error("a mapping from {from} to {to} is already defined")]
	Duplicate { from: TypeKey, to: TypeKey },

	/// A registrar failed during construction or reinitialization.
	#[error("registrar {name} failed")]
	Registrar {
		name: &'static str,
		#[source]
		source: Box<RegistryError>,
	},
}

/// Failure to convert a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
	/// Exact, fuzzy and rule lookups all missed.
	#[error("no converter from {from} to {to}")]
	NoConverter { from: TypeKey, to: TypeKey },

	/// The converter was reached with a value of a type it cannot read.
	#[error("converter expected a {expected} value")]
	SourceMismatch { expected: TypeKey },

	/// The converter accepted the value's type but not the value.
	#[error("cannot convert value to {to}: {reason}")]
	Invalid { to: TypeKey, reason: String },

	/// The converter produced something other than the requested type.
	#[error("converter produced a value that is not a {expected}")]
	OutputMismatch { expected: TypeKey },
}
