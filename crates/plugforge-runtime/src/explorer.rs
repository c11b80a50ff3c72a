//! The discovery engine.
//!
//! [`Explorer`] walks filesystem roots, filters candidates by extension,
//! loads each one through its [`ModuleLoader`], and owns the registry of
//! modules it loaded. Individual failures never abort a run: a rejected
//! candidate is reported to the observer and skipped, and identity
//! collisions are pooled and raised once at the end, with the first-seen
//! module for each id staying registered.

use crate::error::DuplicateIds;
use crate::loader::{LoadedModule, ModuleLoader};
use crate::observer::LoadingStatusObserver;
use plugforge_core::{PluginInfo, UniqueId};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Module file stems that are never treated as candidates. The host
/// runtime's own artifacts share the module extension in shipped layouts.
const DEFAULT_IGNORED: [&str; 3] = ["plugforge_core", "plugforge_runtime", "plugforge_host"];

/// Walks directory trees and loads the modules found there.
///
/// The explorer is single-threaded within one [`explore`](Self::explore)
/// call and exclusively owns the loaded modules. Ids registered by earlier
/// calls on the same explorer still win against later calls; the duplicate
/// accumulator itself is per call. Hosts wanting parallel scans run
/// separate explorers over disjoint path sets and merge the results
/// themselves.
pub struct Explorer<L: ModuleLoader> {
    loader: L,
    ignored: HashSet<String>,
    modules: Vec<L::Module>,
    index: HashMap<UniqueId, usize>,
}

impl<L: ModuleLoader> Explorer<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            ignored: DEFAULT_IGNORED.iter().map(|s| s.to_string()).collect(),
            modules: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Replace the ignore list. Matching is by file stem,
    /// case-insensitive, regardless of extension match.
    pub fn with_ignored<I, S>(mut self, stems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored = stems
            .into_iter()
            .map(|s| s.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Search `paths` in order for modules matching `extension` and load
    /// them.
    ///
    /// `extension` may be given with or without a leading dot and is
    /// matched case-insensitively. With `recursive`, sub-directories are
    /// descended depth-first before returning to siblings; entries are
    /// processed in name order so a run is reproducible given the same
    /// filesystem state.
    ///
    /// Collisions from all paths of this call are pooled. If any occurred
    /// the call fails with the full list, while every first-seen module
    /// stays registered and usable. `observer.done()` is invoked exactly
    /// once, after all paths are processed.
    pub fn explore(
        &mut self,
        paths: &[PathBuf],
        extension: &str,
        recursive: bool,
        observer: &mut dyn LoadingStatusObserver,
    ) -> Result<(), DuplicateIds> {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        let mut duplicates = DuplicateIds::new();

        for path in paths {
            self.explore_dir(path, &extension, recursive, observer, &mut duplicates);
        }

        observer.done();

        if duplicates.is_empty() {
            Ok(())
        } else {
            Err(duplicates)
        }
    }

    /// Single-root convenience form of [`explore`](Self::explore).
    pub fn explore_path(
        &mut self,
        path: impl Into<PathBuf>,
        extension: &str,
        recursive: bool,
        observer: &mut dyn LoadingStatusObserver,
    ) -> Result<(), DuplicateIds> {
        self.explore(&[path.into()], extension, recursive, observer)
    }

    fn explore_dir(
        &mut self,
        dir: &Path,
        extension: &str,
        recursive: bool,
        observer: &mut dyn LoadingStatusObserver,
        duplicates: &mut DuplicateIds,
    ) {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("failed to read {}: {}", dir.display(), err);
                observer.event(&format!("unreadable directory {}: {err}", dir.display()));
                return;
            }
        };

        // read_dir order is platform-dependent; sort for reproducibility.
        let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
        paths.sort();

        for path in paths {
            if path.is_dir() {
                if recursive {
                    self.explore_dir(&path, extension, recursive, observer, duplicates);
                }
                continue;
            }

            if self.is_ignored(&path) {
                debug!("ignoring {}", path.display());
                observer.event(&format!("ignored {}", path.display()));
                continue;
            }

            if !matches_extension(&path, extension) {
                continue;
            }

            self.load_candidate(&path, observer, duplicates);
        }
    }

    fn load_candidate(
        &mut self,
        path: &Path,
        observer: &mut dyn LoadingStatusObserver,
        duplicates: &mut DuplicateIds,
    ) {
        observer.event(&format!("found {}", path.display()));

        let module = match self.loader.load(path) {
            Ok(module) => module,
            Err(err) => {
                warn!("rejected {}: {}", path.display(), err);
                observer.event(&format!("rejected {}: {err}", path.display()));
                return;
            }
        };

        let declared = module.identity().clone();
        if self.index.contains_key(&declared.id()) {
            // First-seen wins; the newcomer is reported and dropped.
            warn!("duplicate module id {}", declared);
            observer.event(&format!("duplicate id {declared}"));
            duplicates.push(declared.info().clone());
            return;
        }

        observer.event(&format!("loaded {declared}"));
        self.index.insert(declared.id(), self.modules.len());
        self.modules.push(module);
    }

    fn is_ignored(&self, path: &Path) -> bool {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| self.ignored.contains(&stem.to_ascii_lowercase()))
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Look up a registered module by its declared id.
    pub fn get(&self, id: &UniqueId) -> Option<&L::Module> {
        self.index.get(id).map(|&i| &self.modules[i])
    }

    pub fn get_mut(&mut self, id: &UniqueId) -> Option<&mut L::Module> {
        let i = *self.index.get(id)?;
        Some(&mut self.modules[i])
    }

    /// Registered modules, in registration order.
    pub fn modules(&self) -> impl Iterator<Item = &L::Module> {
        self.modules.iter()
    }

    pub fn modules_mut(&mut self) -> impl Iterator<Item = &mut L::Module> {
        self.modules.iter_mut()
    }

    /// Declared identities of all registered modules, in registration
    /// order.
    pub fn infos(&self) -> Vec<PluginInfo> {
        self.modules.iter().map(|m| m.identity().clone()).collect()
    }
}

fn matches_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}
