//! Concurrency invariants of the registry.

use std::io;
use std::sync::{Arc, Barrier, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use super::tests::{A1, A2, A3, B, B1, fixture_types, registry, tagged};
use super::*;
use crate::core::converter;

struct Src<const I: usize>;

macro_rules! disjoint_sources {
	($($i:literal),*) => {
		[$(TypeKey::of::<Src<$i>>()),*]
	};
}

/// Concurrent registration of disjoint pairs loses no update.
#[test]
fn test_no_lost_updates() {
	let reg = registry();
	let sources = disjoint_sources!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15);
	let barrier = Barrier::new(sources.len());

	std::thread::scope(|s| {
		for &from in &sources {
			let reg = &reg;
			let barrier = &barrier;
			s.spawn(move || {
				barrier.wait();
				reg.register_converter(from, TypeKey::of::<B>(), tagged("t"))
					.unwrap();
			});
		}
	});

	// Each source files `B`, `B1` and `dyn B2`.
	assert_eq!(reg.converter_count(), sources.len() * 3);
	for from in sources {
		assert!(reg.exact_converter(from, TypeKey::of::<B>()).is_some());
	}
}

/// Racing registrations of one pair: exactly one wins and its converter is
/// the one filed for the whole ancestor chain.
#[test]
fn test_single_winner_for_racing_duplicates() {
	const THREADS: usize = 8;
	let reg = registry();
	let barrier = Barrier::new(THREADS);
	let converters: Vec<_> = (0..THREADS).map(|_| tagged("racer")).collect();

	let wins: usize = std::thread::scope(|s| {
		let handles: Vec<_> = converters
			.iter()
			.map(|c| {
				let reg = &reg;
				let barrier = &barrier;
				s.spawn(move || {
					barrier.wait();
					reg.register::<A1, B>(Arc::clone(c)).is_ok()
				})
			})
			.collect();
		handles
			.into_iter()
			.map(|h| usize::from(h.join().unwrap()))
			.sum()
	});
	assert_eq!(wins, 1);

	let winner = reg
		.exact_converter(TypeKey::of::<A1>(), TypeKey::of::<B>())
		.unwrap();
	for ancestor in reg.types().ancestors(TypeKey::of::<B>()).iter() {
		let filed = reg.exact_converter(TypeKey::of::<A1>(), *ancestor).unwrap();
		assert!(Arc::ptr_eq(&filed, &winner));
	}
}

/// Readers running beside a writer see either none or all of a chain.
#[test]
fn test_readers_never_see_partial_chains() {
	let reg = registry();
	let sources = disjoint_sources!(0, 1, 2, 3, 4, 5, 6, 7);

	std::thread::scope(|s| {
		s.spawn(|| {
			for from in sources {
				reg.register_converter(from, TypeKey::of::<B>(), tagged("w"))
					.unwrap();
			}
		});
		s.spawn(|| {
			for _ in 0..1_000 {
				let count = reg.converter_count();
				assert_eq!(count % 3, 0, "observed a half-filed chain");
			}
		});
	});
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
	fn text(&self) -> String {
		String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
	}
}

impl io::Write for Captured {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.lock().unwrap().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl<'a> MakeWriter<'a> for Captured {
	type Writer = Captured;

	fn make_writer(&'a self) -> Self::Writer {
		self.clone()
	}
}

fn capture_warnings(f: impl FnOnce()) -> String {
	let sink = Captured::default();
	let subscriber = tracing_subscriber::fmt()
		.with_writer(sink.clone())
		.with_max_level(tracing::Level::WARN)
		.with_ansi(false)
		.finish();
	tracing::subscriber::with_default(subscriber, f);
	sink.text()
}

#[test]
fn test_ambiguous_fuzzy_match_is_reported_in_debug_mode() {
	let debug = TypeConverterRegistry::new(
		fixture_types(),
		RegistryOptions {
			debug_mode: true,
			..RegistryOptions::for_build()
		},
	);
	let far = tagged("far");
	let near = tagged("near");
	debug.register::<A1, B>(Arc::clone(&far)).unwrap();
	debug.register::<A2, B>(Arc::clone(&near)).unwrap();

	let mut found = None;
	let logs = capture_warnings(|| {
		found = debug.fuzzy_converter(TypeKey::of::<A3>(), TypeKey::of::<B>());
	});
	assert!(logs.contains("ambiguous"), "logs: {logs}");
	assert!(Arc::ptr_eq(&found.unwrap(), &near));

	// An exact hit on the source itself is never ambiguous.
	let logs = capture_warnings(|| {
		debug.fuzzy_converter(TypeKey::of::<A2>(), TypeKey::of::<B>());
	});
	assert!(!logs.contains("ambiguous"), "logs: {logs}");
}

#[test]
fn test_ambiguity_check_is_silent_outside_debug_mode() {
	let quiet = TypeConverterRegistry::new(
		fixture_types(),
		RegistryOptions {
			debug_mode: false,
			..RegistryOptions::for_build()
		},
	);
	quiet.register::<A1, B>(tagged("far")).unwrap();
	quiet.register::<A2, B>(tagged("near")).unwrap();

	let logs = capture_warnings(|| {
		quiet.fuzzy_converter(TypeKey::of::<A3>(), TypeKey::of::<B>());
	});
	assert!(!logs.contains("ambiguous"), "logs: {logs}");
}

#[test]
fn test_redundant_registration_warns() {
	let reg = registry();
	let logs = capture_warnings(|| {
		reg.register::<A3, A1>(converter(|_: &A3| A1)).unwrap();
	});
	assert!(logs.contains("no type converter needed"), "logs: {logs}");
}

#[test]
fn test_ancestor_collision_warns_and_keeps_existing() {
	let reg = registry();
	let parent = tagged("parent");
	reg.register::<A1, B1>(Arc::clone(&parent)).unwrap();

	let logs = capture_warnings(|| {
		reg.register::<A1, B>(tagged("child")).unwrap();
	});
	assert!(
		logs.contains("ancestor already has a converter"),
		"logs: {logs}"
	);
	let kept = reg
		.exact_converter(TypeKey::of::<A1>(), TypeKey::of::<B1>())
		.unwrap();
	assert!(Arc::ptr_eq(&kept, &parent));
}
