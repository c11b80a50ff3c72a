//! Loading candidate modules.
//!
//! Discovery is independent of how a module is physically realized: the
//! [`ModuleLoader`] trait is the single seam turning a candidate path into
//! a loaded module or a failure. [`ManifestLoader`] is the default
//! realization: a candidate file is a TOML manifest, and the loaded
//! [`ManifestPlugin`] keeps its configurations in a state file so the
//! lifecycle operations survive restarts. Hosts with another loading
//! mechanism (shared libraries, subprocesses) implement their own loader
//! and reuse the same explorer.

use crate::capability::CapabilitySet;
use crate::error::{RuntimeError, RuntimeResult};
use crate::manifest::{runtime_version, Lifecycle, PluginKind, PluginManifest};
use crate::store::{ConfigRecord, ConfigStore};
use plugforge_core::{
    Info, InfoCursor, Plugin, PluginError, PluginInfo, PluginResult, UniqueId,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A module produced by a loader.
pub trait LoadedModule {
    /// Identity and version the module declared at load time.
    fn identity(&self) -> &PluginInfo;
}

/// Turns a candidate path into a loaded module, or fails.
pub trait ModuleLoader {
    type Module: LoadedModule;

    fn load(&self, path: &Path) -> RuntimeResult<Self::Module>;
}

/// Default loader: a candidate file is a TOML manifest.
#[derive(Debug, Default)]
pub struct ManifestLoader {
    state_dir: Option<PathBuf>,
}

impl ManifestLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep state files in `dir`, named by module id, instead of next to
    /// each module file.
    pub fn with_state_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: Some(dir.into()),
        }
    }

    fn state_path(&self, module_path: &Path, id: UniqueId) -> PathBuf {
        match &self.state_dir {
            Some(dir) => dir.join(format!("{id}.state.toml")),
            None => module_path.with_extension("state.toml"),
        }
    }
}

impl ModuleLoader for ManifestLoader {
    type Module = ManifestPlugin;

    fn load(&self, path: &Path) -> RuntimeResult<ManifestPlugin> {
        let manifest = PluginManifest::from_file(path)?;

        let current = runtime_version();
        if !manifest.compatible_with(&current) {
            return Err(RuntimeError::Incompatible {
                required: manifest.plugin.requires.clone(),
                current,
            });
        }

        let identity = manifest.plugin_info();
        debug!("loading {} from {}", identity, path.display());

        let seeds = manifest
            .configurations
            .iter()
            .map(|seed| {
                ConfigRecord::new(
                    Info::new(seed.id, seed.name.as_str(), seed.description.as_str()),
                    seed.args.clone(),
                )
            })
            .collect();

        let store = ConfigStore::open(self.state_path(path, identity.id()), seeds)?;

        info!("loaded {}", identity);
        Ok(ManifestPlugin {
            identity,
            kind: manifest.plugin.kind,
            capabilities: manifest.capability_set(),
            lifecycle: manifest.lifecycle,
            store,
            cursor: InfoCursor::new(),
        })
    }
}

/// A loaded manifest-driven module.
pub struct ManifestPlugin {
    identity: PluginInfo,
    kind: PluginKind,
    capabilities: CapabilitySet,
    lifecycle: Lifecycle,
    store: ConfigStore,
    cursor: InfoCursor,
}

impl ManifestPlugin {
    pub fn kind(&self) -> PluginKind {
        self.kind
    }

    /// Capabilities this module declared, for host services to check.
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }
}

impl LoadedModule for ManifestPlugin {
    fn identity(&self) -> &PluginInfo {
        &self.identity
    }
}

fn persist_err(err: RuntimeError) -> PluginError {
    match err {
        RuntimeError::Io(err) => PluginError::Io(err),
        other => PluginError::internal(other.to_string()),
    }
}

impl Plugin for ManifestPlugin {
    type Config = ConfigRecord;

    fn plugin_info(&self) -> &PluginInfo {
        &self.identity
    }

    fn first(&mut self) -> Option<Info> {
        let infos = self.store.infos();
        self.cursor.first(&infos).cloned()
    }

    fn next(&mut self) -> Option<Info> {
        let infos = self.store.infos();
        self.cursor.next(&infos).cloned()
    }

    fn get(
        &mut self,
        id: &UniqueId,
        create_args: Option<&[String]>,
    ) -> PluginResult<ConfigRecord> {
        let record = self.store.get(id).ok_or(PluginError::NotFound(*id))?;

        // Extra args apply to this materialization only; nothing persists.
        let mut record = record.clone();
        if let Some(args) = create_args {
            record.args.extend(args.iter().cloned());
        }
        Ok(record)
    }

    fn can_create(&self) -> bool {
        self.lifecycle.create
    }

    fn create(&mut self, create_args: Option<&[String]>) -> PluginResult<ConfigRecord> {
        if !self.lifecycle.create {
            return Err(PluginError::unsupported("create"));
        }

        // First arg names the configuration, the rest are its parameters.
        let args = create_args.unwrap_or(&[]);
        let name = args
            .first()
            .cloned()
            .unwrap_or_else(|| "untitled".to_string());
        let params = args.get(1..).unwrap_or(&[]).to_vec();

        let record = ConfigRecord::new(Info::new(UniqueId::new(), name, ""), params);
        self.store.insert(record.clone()).map_err(persist_err)?;
        Ok(record)
    }

    fn can_edit(&self, id: &UniqueId) -> bool {
        self.lifecycle.edit && self.store.contains(id)
    }

    fn edit(&mut self, id: &UniqueId) -> PluginResult<ConfigRecord> {
        if !self.lifecycle.edit {
            return Err(PluginError::unsupported("edit"));
        }
        self.store
            .touch(id)
            .map_err(persist_err)?
            .ok_or(PluginError::NotFound(*id))
    }

    fn can_remove(&self, id: &UniqueId) -> bool {
        self.lifecycle.remove && self.store.contains(id)
    }

    fn remove(&mut self, id: &UniqueId) -> PluginResult<()> {
        if !self.lifecycle.remove {
            return Err(PluginError::unsupported("remove"));
        }
        if self.store.remove(id).map_err(persist_err)? {
            Ok(())
        } else {
            Err(PluginError::NotFound(*id))
        }
    }

    fn has_window(&self, id: &UniqueId) -> bool {
        self.lifecycle.window && self.store.contains(id)
    }
}
