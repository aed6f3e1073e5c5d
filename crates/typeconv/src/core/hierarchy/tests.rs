use pretty_assertions::assert_eq;

use super::*;

struct Animal;
struct Dog;
struct Puppy;
trait Pet {}
trait Loud {}
trait Named {}

fn zoo() -> TypeHierarchy {
	let types = TypeHierarchy::new();
	types.declare_all([
		TypeDecl::of::<Puppy>().extends::<Dog>().implements::<dyn Named>(),
		TypeDecl::of::<Dog>()
			.extends::<Animal>()
			.implements::<dyn Pet>()
			.implements::<dyn Loud>(),
		TypeDecl::of::<dyn Pet>().implements::<dyn Named>(),
	]);
	types
}

#[test]
fn undeclared_type_is_its_own_only_ancestor() {
	let types = TypeHierarchy::new();
	let chain = types.ancestors(TypeKey::of::<u32>());
	assert_eq!(&*chain, &[TypeKey::of::<u32>()]);
	assert!(types.is_public(TypeKey::of::<u32>()));
}

#[test]
fn chain_is_breadth_first_parent_before_interfaces() {
	let types = zoo();
	let chain = types.ancestors(TypeKey::of::<Puppy>());
	assert_eq!(
		&*chain,
		&[
			TypeKey::of::<Puppy>(),
			TypeKey::of::<Dog>(),
			TypeKey::of::<dyn Named>(),
			TypeKey::of::<Animal>(),
			TypeKey::of::<dyn Pet>(),
			TypeKey::of::<dyn Loud>(),
		]
	);
}

#[test]
fn shared_ancestor_listed_once_at_closest_position() {
	let types = zoo();
	let chain = types.ancestors(TypeKey::of::<Puppy>());
	let named = chain
		.iter()
		.filter(|k| **k == TypeKey::of::<dyn Named>())
		.count();
	assert_eq!(named, 1);
}

#[test]
fn redeclaring_invalidates_memoized_chains() {
	let types = zoo();
	let before = types.ancestors(TypeKey::of::<Dog>());
	assert!(!before.contains(&TypeKey::of::<String>()));

	types.declare(TypeDecl::of::<Animal>().extends::<String>());
	let after = types.ancestors(TypeKey::of::<Dog>());
	assert!(after.contains(&TypeKey::of::<String>()));
}

#[test]
fn assignability_follows_the_chain() {
	let types = zoo();
	let puppy = TypeKey::of::<Puppy>();
	let animal = TypeKey::of::<Animal>();
	assert!(types.is_assignable(puppy, animal));
	assert!(!types.is_assignable(animal, puppy));
	assert!(types.are_convertible(animal, puppy));
	assert!(!types.are_convertible(animal, TypeKey::of::<dyn Loud>()));
}

#[test]
fn private_declaration_is_not_public() {
	let types = TypeHierarchy::new();
	types.declare(TypeDecl::of::<Dog>().private());
	assert!(!types.is_public(TypeKey::of::<Dog>()));
	assert_eq!(types.len(), 1);
}

mod props {
	use proptest::prelude::*;

	use super::*;

	struct N<const I: usize>;

	fn key(i: usize) -> TypeKey {
		match i {
			0 => TypeKey::of::<N<0>>(),
			1 => TypeKey::of::<N<1>>(),
			2 => TypeKey::of::<N<2>>(),
			3 => TypeKey::of::<N<3>>(),
			4 => TypeKey::of::<N<4>>(),
			_ => TypeKey::of::<N<5>>(),
		}
	}

	proptest! {
		#[test]
		fn chain_starts_with_self_and_has_no_duplicates(
			edges in proptest::collection::vec((0usize..6, 0usize..6, any::<bool>()), 0..20),
			start in 0usize..6,
		) {
			let mut decls: FxHashMap<TypeKey, TypeDecl> = FxHashMap::default();
			for (child, ancestor, is_parent) in edges {
				let decl = decls.entry(key(child)).or_insert_with(|| TypeDecl::new(key(child)));
				if is_parent {
					decl.parent = Some(key(ancestor));
				} else {
					decl.interfaces.push(key(ancestor));
				}
			}
			let types = TypeHierarchy::new();
			types.declare_all(decls.into_values());

			let chain = types.ancestors(key(start));
			prop_assert_eq!(chain[0], key(start));
			let unique: FxHashSet<_> = chain.iter().copied().collect();
			prop_assert_eq!(unique.len(), chain.len());
		}
	}
}
