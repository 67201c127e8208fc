//! Handler registry and loader integration tests
//! Run with: cargo test --test registry_test

use async_trait::async_trait;
use reflex_bot::application::errors::HandlerError;
use reflex_bot::application::messaging::MessageContext;
use reflex_bot::handlers::{Handler, HandlerLoader, HandlerRegistry};
use std::fs;
use std::sync::{Arc, Once};
use tempfile::TempDir;

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

struct NoopHandler {
    name: &'static str,
}

#[async_trait]
impl Handler for NoopHandler {
    fn name(&self) -> &str {
        self.name
    }

    async fn handle(&self, _ctx: &MessageContext) -> Result<bool, HandlerError> {
        Ok(false)
    }
}

#[test]
fn scan_filters_by_extension_and_reserved_name() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("greet.so"), b"not a real library").unwrap();
    fs::write(dir.path().join("init.so"), b"reserved").unwrap();
    fs::write(dir.path().join("notes.txt"), b"wrong extension").unwrap();
    fs::write(dir.path().join("pong.so.disabled"), b"disabled").unwrap();
    fs::create_dir(dir.path().join("sub.so")).unwrap();

    let loader = HandlerLoader::new(dir.path());
    let found = loader.scan().unwrap();

    assert_eq!(found, vec![dir.path().join("greet.so")]);
}

#[test]
fn scan_is_sorted_by_file_name() {
    let dir = TempDir::new().unwrap();
    for name in ["zebra.so", "alpha.so", "middle.so"] {
        fs::write(dir.path().join(name), b"x").unwrap();
    }

    let loader = HandlerLoader::new(dir.path());
    let names: Vec<String> = loader
        .scan()
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["alpha.so", "middle.so", "zebra.so"]);
}

#[test]
fn renaming_off_the_extension_disables_a_handler_file() {
    let dir = TempDir::new().unwrap();
    let active = dir.path().join("pong.so");
    let disabled = dir.path().join("pong.so.disabled");
    fs::write(&active, b"x").unwrap();

    let loader = HandlerLoader::new(dir.path());
    assert_eq!(loader.scan().unwrap().len(), 1);

    fs::rename(&active, &disabled).unwrap();
    assert!(loader.scan().unwrap().is_empty());

    fs::rename(&disabled, &active).unwrap();
    assert_eq!(loader.scan().unwrap().len(), 1);
}

#[test]
fn missing_directory_scans_empty() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("never-created");

    let loader = HandlerLoader::new(&gone);
    assert!(loader.scan().unwrap().is_empty());
}

#[test]
fn load_skips_files_that_are_not_libraries() {
    ensure_init();

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken-a.so"), b"garbage").unwrap();
    fs::write(dir.path().join("broken-b.so"), b"more garbage").unwrap();

    let registry = HandlerRegistry::new(HandlerLoader::new(dir.path()));
    let loaded = registry.load().expect("load should not fail on bad files");

    assert_eq!(loaded, 0);
    assert!(registry.is_empty());
}

#[test]
fn builtin_registration_keeps_order_and_rejects_duplicates() {
    let dir = TempDir::new().unwrap();
    let registry = HandlerRegistry::new(HandlerLoader::new(dir.path()));

    for name in ["one", "two", "three"] {
        registry.register(Arc::new(NoopHandler { name })).unwrap();
    }

    assert_eq!(registry.names(), vec!["one", "two", "three"]);

    let duplicate = registry.register(Arc::new(NoopHandler { name: "two" }));
    assert!(duplicate.is_err());
    assert_eq!(registry.names(), vec!["one", "two", "three"]);
}

#[test]
fn load_is_idempotent_for_an_unchanged_directory() {
    let dir = TempDir::new().unwrap();
    let registry = HandlerRegistry::new(HandlerLoader::new(dir.path()));
    registry
        .register(Arc::new(NoopHandler { name: "builtin" }))
        .unwrap();

    registry.load().unwrap();
    let first = registry.names();

    registry.load().unwrap();
    let second = registry.names();

    assert_eq!(first, second);
    assert_eq!(first, vec!["builtin"]);
}

#[test]
fn needs_reload_tracks_directory_changes() {
    let dir = TempDir::new().unwrap();
    let registry = HandlerRegistry::new(HandlerLoader::new(dir.path()));
    registry.load().unwrap();

    assert!(!registry.needs_reload());

    fs::write(dir.path().join("new.so"), b"x").unwrap();
    assert!(registry.needs_reload());
}
