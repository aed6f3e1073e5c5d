//! Registration macros.

/// Declares a [`Registrar`](crate::Registrar) static and submits it for
/// discovery.
///
/// ```ignore
/// type_converter_registrar!(GEO, {
///     name: "geo::units",
///     ordinal: 50,
/// }, register_units);
/// ```
#[macro_export]
macro_rules! type_converter_registrar {
	($static_name:ident, {
		name: $name:expr
		$(, ordinal: $ordinal:expr)?
		$(,)?
	}, $register:expr) => {
		pub static $static_name: $crate::Registrar = $crate::Registrar::new(
			$name,
			$crate::__reg_opt!($({$ordinal})?, 100),
			$register,
		);

		$crate::inventory::submit! { $crate::registrar::RegistrarReg(&$static_name) }
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __reg_opt {
	({$val:expr}, $default:expr) => {
		$val
	};
	(, $default:expr) => {
		$default
	};
}
