use crate::core::RegistryError;
use crate::registry::TypeConverterRegistry;

/// A provider of converters and rules.
///
/// Registrars run once when a registry is built and again on every
/// [`TypeConverterRegistry::reinitialize`]. They are either handed to
/// [`RegistryBuilder::with_registrar`](crate::RegistryBuilder::with_registrar)
/// directly or submitted through [`type_converter_registrar!`] and picked up
/// by [`RegistryBuilder::with_discovered_registrars`](crate::RegistryBuilder::with_discovered_registrars).
pub struct Registrar {
	/// Unique name; also used to break ordinal ties.
	pub name: &'static str,
	/// Lower ordinals run first among discovered registrars.
	pub ordinal: u16,
	pub register: fn(&TypeConverterRegistry) -> Result<(), RegistryError>,
}

impl Registrar {
	pub const fn new(
		name: &'static str,
		ordinal: u16,
		register: fn(&TypeConverterRegistry) -> Result<(), RegistryError>,
	) -> Self {
		Self {
			name,
			ordinal,
			register,
		}
	}

	/// Runs the registrar, tagging any failure with its name.
	pub fn run(&self, registry: &TypeConverterRegistry) -> Result<(), RegistryError> {
		(self.register)(registry).map_err(|err| RegistryError::Registrar {
			name: self.name,
			source: Box::new(err),
		})
	}
}

impl std::fmt::Debug for Registrar {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registrar")
			.field("name", &self.name)
			.field("ordinal", &self.ordinal)
			.finish_non_exhaustive()
	}
}

/// Discovery handle submitted by [`type_converter_registrar!`].
pub struct RegistrarReg(pub &'static Registrar);

inventory::collect!(RegistrarReg);

/// All submitted registrars, sorted by ordinal then name.
pub fn discovered() -> Vec<&'static Registrar> {
	let mut registrars: Vec<&'static Registrar> = inventory::iter::<RegistrarReg>
		.into_iter()
		.map(|reg| reg.0)
		.collect();
	registrars.sort_by(|a, b| a.ordinal.cmp(&b.ordinal).then_with(|| a.name.cmp(b.name)));
	registrars
}
