//! # plugforge-runtime
//!
//! Module discovery and loading for plugforge.
//!
//! This crate provides:
//! - Manifest parsing for candidate modules
//! - The loading seam ([`ModuleLoader`]) with a manifest-driven default
//! - The discovery engine ([`Explorer`]) that walks directory trees,
//!   tolerates bad candidates and pools identity collisions
//! - Progress observation and the duplicate aggregate raised at the end
//!   of a run
//!
//! ## Failure model
//!
//! A single bad or colliding module never blocks loading of the good
//! ones. Load failures are reported to the observer and skipped;
//! collisions keep the first-seen module registered and are raised once,
//! in aggregate, after all paths are processed. A caller of
//! [`Explorer::explore`] therefore either gets a fully populated,
//! duplicate-free registry, or the usable first-seen registrations plus
//! the complete list of what was rejected and why.

pub mod capability;
pub mod config;
pub mod error;
pub mod explorer;
pub mod loader;
pub mod manifest;
pub mod observer;
pub mod paths;
pub mod store;

pub use capability::{Capability, CapabilitySet};
pub use config::DiscoveryConfig;
pub use error::{DuplicateIds, RuntimeError, RuntimeResult};
pub use explorer::Explorer;
pub use loader::{LoadedModule, ManifestLoader, ManifestPlugin, ModuleLoader};
pub use manifest::{PluginKind, PluginManifest};
pub use observer::{LoadingStatusObserver, NullStatusObserver, TracingStatusObserver};
pub use store::{ConfigRecord, ConfigStore};
