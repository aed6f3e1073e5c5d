use serde::{Deserialize, Serialize};

/// Diagnostic knobs for a [`TypeConverterRegistry`](super::TypeConverterRegistry).
///
/// Meant to be embedded in an application's own config; every field has a
/// default so partial tables deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
	/// Enumerate every fuzzy match along the source chain and warn when more
	/// than one ancestor could serve the lookup. Defaults to on in debug
	/// builds.
	pub debug_mode: bool,
	/// Warn when a converter is registered between types that are already
	/// assignable to one another.
	pub warn_redundant_registration: bool,
}

impl RegistryOptions {
	/// Options for the current build profile.
	#[inline]
	pub fn for_build() -> Self {
		Self {
			debug_mode: cfg!(debug_assertions),
			warn_redundant_registration: true,
		}
	}
}

impl Default for RegistryOptions {
	fn default() -> Self {
		Self::for_build()
	}
}
