use std::any::{TypeId, type_name};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque identifier of a type taking part in conversions.
///
/// Identity is the underlying [`TypeId`]; the name is carried for
/// diagnostics only. Trait objects are valid keys, so `dyn Trait` plays
/// the role of an interface in a [`TypeHierarchy`](super::TypeHierarchy).
#[derive(Clone, Copy)]
pub struct TypeKey {
	id: TypeId,
	name: &'static str,
}

impl TypeKey {
	/// Returns the key for `T`.
	#[inline]
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: type_name::<T>(),
		}
	}

	#[inline]
	pub fn type_id(&self) -> TypeId {
		self.id
	}

	/// Fully qualified type name as reported by [`std::any::type_name`].
	#[inline]
	pub fn name(&self) -> &'static str {
		self.name
	}

	#[inline]
	pub fn is<T: ?Sized + 'static>(&self) -> bool {
		self.id == TypeId::of::<T>()
	}
}

impl PartialEq for TypeKey {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl PartialOrd for TypeKey {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for TypeKey {
	fn cmp(&self, other: &Self) -> Ordering {
		self.id.cmp(&other.id)
	}
}

impl fmt::Debug for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TypeKey({})", self.name)
	}
}

impl fmt::Display for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// An ordered (source, destination) pair identifying one conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConverterKey {
	pub from: TypeKey,
	pub to: TypeKey,
}

impl ConverterKey {
	pub fn new(from: TypeKey, to: TypeKey) -> Self {
		Self { from, to }
	}
}

impl fmt::Display for ConverterKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}->{}]", self.from, self.to)
	}
}
