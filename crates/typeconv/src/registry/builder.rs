use std::sync::Arc;

use tracing::debug;

use super::{RegistryOptions, TypeConverterRegistry};
use crate::core::{RegistryError, TypeDecl, TypeHierarchy};
use crate::registrar::{self, Registrar};

/// Assembles a [`TypeConverterRegistry`].
///
/// The registry is populated by running the collected registrars in the
/// order they were added; the same list is replayed by
/// [`TypeConverterRegistry::reinitialize`].
#[derive(Default)]
pub struct RegistryBuilder {
	types: Option<Arc<TypeHierarchy>>,
	decls: Vec<TypeDecl>,
	registrars: Vec<&'static Registrar>,
	options: Option<RegistryOptions>,
}

impl RegistryBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Shares an existing hierarchy instead of creating a fresh one.
	pub fn with_types(mut self, types: Arc<TypeHierarchy>) -> Self {
		self.types = Some(types);
		self
	}

	pub fn declare(mut self, decl: TypeDecl) -> Self {
		self.decls.push(decl);
		self
	}

	pub fn with_options(mut self, options: RegistryOptions) -> Self {
		self.options = Some(options);
		self
	}

	/// Appends a registrar. A registrar whose name is already present is
	/// skipped.
	pub fn with_registrar(mut self, registrar: &'static Registrar) -> Self {
		self.push_registrar(registrar);
		self
	}

	/// Appends every registrar submitted via
	/// [`type_converter_registrar!`](crate::type_converter_registrar), sorted
	/// by ordinal then name.
	pub fn with_discovered_registrars(mut self) -> Self {
		for registrar in registrar::discovered() {
			self.push_registrar(registrar);
		}
		self
	}

	fn push_registrar(&mut self, registrar: &'static Registrar) {
		if self.registrars.iter().any(|r| r.name == registrar.name) {
			debug!(name = registrar.name, "registrar already added; skipping");
			return;
		}
		self.registrars.push(registrar);
	}

	/// Builds the registry and runs every registrar once.
	///
	/// # Errors
	///
	/// Propagates the first registrar failure.
	pub fn build(self) -> Result<TypeConverterRegistry, RegistryError> {
		let types = self.types.unwrap_or_default();
		types.declare_all(self.decls);
		let registry = TypeConverterRegistry::with_registrars(
			types,
			self.registrars,
			self.options.unwrap_or_default(),
		);
		registry.reinitialize()?;
		Ok(registry)
	}
}
