//! Integration tests for module discovery.
//!
//! These tests build throwaway module trees on disk and verify the
//! explorer's traversal, failure tolerance and duplicate handling.

use plugforge_core::Plugin;
use plugforge_runtime::{
    Explorer, LoadedModule, LoadingStatusObserver, ManifestLoader, NullStatusObserver,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Observer that records everything it is told.
#[derive(Debug, Default)]
struct RecordingObserver {
    events: Vec<String>,
    done_calls: usize,
}

impl LoadingStatusObserver for RecordingObserver {
    fn event(&mut self, description: &str) {
        self.events.push(description.to_string());
    }

    fn done(&mut self) {
        self.done_calls += 1;
    }
}

fn explorer() -> Explorer<ManifestLoader> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    Explorer::new(ManifestLoader::new())
}

fn write_module(dir: &Path, file: &str, id: &str, name: &str) -> PathBuf {
    let manifest = format!(
        r#"
[plugin]
id = "{id}"
name = "{name}"
description = "test module {name}"
version = "0.1.0"

[lifecycle]
create = true
remove = true

[[configurations]]
id = "1c0ffee0-{suffix}-4abc-8def-000000000001"
name = "{name}-default"
"#,
        suffix = &id[..4],
    );

    let path = dir.join(file);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, manifest).unwrap();
    path
}

const ID_A: &str = "aaaaaaaa-0000-4000-8000-000000000001";
const ID_B: &str = "bbbbbbbb-0000-4000-8000-000000000002";
const ID_C: &str = "cccccccc-0000-4000-8000-000000000003";

#[test]
fn test_distinct_ids_all_registered() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "alpha.plug", ID_A, "alpha");
    write_module(dir.path(), "beta.plug", ID_B, "beta");

    let mut explorer = explorer();
    explorer
        .explore_path(dir.path(), "plug", false, &mut NullStatusObserver)
        .unwrap();

    assert_eq!(explorer.len(), 2);

    // Every module is reachable and enumerable through the capability
    // interface.
    for module in explorer.modules_mut() {
        let first = module.first().expect("shipped configuration");
        assert!(first.name().ends_with("-default"));
        assert!(module.next().is_none());
    }
}

#[test]
fn test_first_seen_wins_on_collision() {
    let dir = TempDir::new().unwrap();
    // Lexicographic traversal loads "a_first" before "b_second".
    write_module(dir.path(), "a_first.plug", ID_A, "first");
    write_module(dir.path(), "b_second.plug", ID_A, "second");

    let mut explorer = explorer();
    let err = explorer
        .explore_path(dir.path(), "plug", false, &mut NullStatusObserver)
        .unwrap_err();

    // The later arrival is reported, not the survivor.
    assert_eq!(err.len(), 1);
    assert_eq!(err.infos()[0].name(), "second");

    // The first-seen module stays registered and usable.
    assert_eq!(explorer.len(), 1);
    let id = ID_A.parse().unwrap();
    let survivor = explorer.get_mut(&id).unwrap();
    assert_eq!(survivor.identity().name(), "first");
    let config_id = survivor.first().unwrap().id();
    assert!(survivor.get(&config_id, None).is_ok());
}

#[test]
fn test_recursive_vs_flat() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "top.plug", ID_A, "top");
    write_module(dir.path(), "nested/mid.plug", ID_B, "mid");
    write_module(dir.path(), "nested/deeper/leaf.plug", ID_C, "leaf");

    let mut flat = explorer();
    flat.explore_path(dir.path(), "plug", false, &mut NullStatusObserver)
        .unwrap();
    assert_eq!(flat.len(), 1);

    let mut recursive = explorer();
    recursive
        .explore_path(dir.path(), "plug", true, &mut NullStatusObserver)
        .unwrap();
    assert_eq!(recursive.len(), 3);
}

#[test]
fn test_ignore_list_beats_extension_match() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "alpha.plug", ID_A, "alpha");
    write_module(dir.path(), "legacy_bridge.plug", ID_B, "bridge");

    let mut explorer = explorer().with_ignored(["legacy_bridge"]);
    let mut observer = RecordingObserver::default();
    explorer
        .explore_path(dir.path(), "plug", false, &mut observer)
        .unwrap();

    assert_eq!(explorer.len(), 1);
    assert!(observer
        .events
        .iter()
        .any(|e| e.starts_with("ignored") && e.contains("legacy_bridge")));
}

#[test]
fn test_bad_candidate_does_not_abort() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "a_good.plug", ID_A, "good");
    std::fs::write(dir.path().join("b_broken.plug"), "not a manifest [").unwrap();
    write_module(dir.path(), "c_later.plug", ID_B, "later");

    let mut explorer = explorer();
    let mut observer = RecordingObserver::default();
    explorer
        .explore_path(dir.path(), "plug", false, &mut observer)
        .unwrap();

    // The bad candidate is reported and skipped; the ones after it still
    // load.
    assert_eq!(explorer.len(), 2);
    assert!(observer
        .events
        .iter()
        .any(|e| e.starts_with("rejected") && e.contains("b_broken.plug")));
}

#[test]
fn test_done_called_exactly_once() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "a.plug", ID_A, "a");
    write_module(dir.path(), "b.plug", ID_A, "a-again");

    // Failure run: done still fires once, before the error is produced.
    let mut observer = RecordingObserver::default();
    let mut explorer = explorer();
    assert!(explorer
        .explore_path(dir.path(), "plug", false, &mut observer)
        .is_err());
    assert_eq!(observer.done_calls, 1);

    // Success run over an empty tree.
    let empty = TempDir::new().unwrap();
    let mut observer = RecordingObserver::default();
    let mut explorer = self::explorer();
    explorer
        .explore_path(empty.path(), "plug", false, &mut observer)
        .unwrap();
    assert_eq!(observer.done_calls, 1);
}

#[test]
fn test_missing_root_is_tolerated() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "alpha.plug", ID_A, "alpha");

    let roots = vec![PathBuf::from("/nonexistent/modules"), dir.path().into()];
    let mut observer = RecordingObserver::default();
    let mut explorer = explorer();
    explorer
        .explore(&roots, "plug", false, &mut observer)
        .unwrap();

    assert_eq!(explorer.len(), 1);
    assert!(observer
        .events
        .iter()
        .any(|e| e.starts_with("unreadable directory")));
}

#[test]
fn test_two_path_tree_scenario() {
    // plugA at the root, plugB one level down: both register, no error.
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "plugA.plug", ID_A, "A");
    write_module(dir.path(), "sub/plugB.plug", ID_B, "B");

    let mut explorer = explorer();
    explorer
        .explore_path(dir.path(), ".plug", true, &mut NullStatusObserver)
        .unwrap();
    assert_eq!(explorer.len(), 2);

    // Adding plugC with A's id: A and B stay registered, the error lists
    // exactly C's identity.
    write_module(dir.path(), "sub2/plugC.plug", ID_A, "C");

    let mut explorer = self::explorer();
    let err = explorer
        .explore_path(dir.path(), ".plug", true, &mut NullStatusObserver)
        .unwrap_err();

    assert_eq!(explorer.len(), 2);
    assert_eq!(err.len(), 1);
    assert_eq!(err.infos()[0].name(), "C");
    assert_eq!(err.infos()[0].id(), ID_A.parse().unwrap());
}

#[test]
fn test_duplicates_pool_across_roots() {
    let root1 = TempDir::new().unwrap();
    let root2 = TempDir::new().unwrap();
    write_module(root1.path(), "original.plug", ID_A, "original");
    write_module(root2.path(), "copy.plug", ID_A, "copy");
    write_module(root2.path(), "copy2.plug", ID_A, "copy2");

    let roots = vec![root1.path().to_path_buf(), root2.path().to_path_buf()];
    let mut explorer = explorer();
    let err = explorer
        .explore(&roots, "plug", false, &mut NullStatusObserver)
        .unwrap_err();

    // One shared accumulator across roots; repeat collisions on the same
    // id are appended, not collapsed.
    let names: Vec<_> = err.infos().iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["copy", "copy2"]);
    assert_eq!(explorer.len(), 1);
}

#[test]
fn test_registry_persists_across_explore_calls() {
    let root1 = TempDir::new().unwrap();
    let root2 = TempDir::new().unwrap();
    write_module(root1.path(), "original.plug", ID_A, "original");
    write_module(root2.path(), "copy.plug", ID_A, "copy");

    let mut explorer = explorer();
    explorer
        .explore_path(root1.path(), "plug", false, &mut NullStatusObserver)
        .unwrap();

    // A second call on the same explorer still collides with the earlier
    // registration.
    let err = explorer
        .explore_path(root2.path(), "plug", false, &mut NullStatusObserver)
        .unwrap_err();
    assert_eq!(err.infos()[0].name(), "copy");
    assert_eq!(explorer.len(), 1);
}

#[test]
fn test_case_insensitive_extension() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "alpha.PLUG", ID_A, "alpha");

    let mut explorer = explorer();
    explorer
        .explore_path(dir.path(), "plug", false, &mut NullStatusObserver)
        .unwrap();
    assert_eq!(explorer.len(), 1);
}

/// The explorer stays generic over the loading mechanism: a module type
/// needs nothing beyond `LoadedModule`.
#[test]
fn test_loader_seam_is_generic() {
    use plugforge_core::{Info, PluginInfo, Version};
    use plugforge_runtime::{ModuleLoader, RuntimeError};

    struct StubModule(PluginInfo);

    impl LoadedModule for StubModule {
        fn identity(&self) -> &PluginInfo {
            &self.0
        }
    }

    struct StubLoader;

    impl ModuleLoader for StubLoader {
        type Module = StubModule;

        fn load(&self, path: &Path) -> Result<StubModule, RuntimeError> {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            let id = format!("{:0>8}-0000-4000-8000-00000000000f", stem.len())
                .parse()
                .unwrap();
            Ok(StubModule(PluginInfo::new(
                Info::new(id, stem, ""),
                Version::new(0, 1, 0),
            )))
        }
    }

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("ab.stub"), "").unwrap();
    std::fs::write(dir.path().join("xyz.stub"), "").unwrap();

    let mut explorer = Explorer::new(StubLoader);
    explorer
        .explore_path(dir.path(), "stub", false, &mut NullStatusObserver)
        .unwrap();
    assert_eq!(explorer.len(), 2);
}
