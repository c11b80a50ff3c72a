//! # plugforge-core
//!
//! Core traits and types for plugforge plugins.
//!
//! This crate defines:
//! - The identity model every pluggable entity carries ([`UniqueId`],
//!   [`Info`], [`Version`], [`PluginInfo`])
//! - The capability contract a plugin of any kind implements ([`Plugin`])
//! - The error kinds configuration operations surface ([`PluginError`])
//!
//! A plugin manages a set of *configurations*: named, identified instances
//! it can enumerate through the stateful [`first`](Plugin::first)/
//! [`next`](Plugin::next) cursor and, capability permitting, create, edit
//! and remove. Nothing in this crate performs I/O; discovery and loading
//! live in `plugforge-runtime`.

pub mod cursor;
pub mod error;
pub mod id;
pub mod info;
pub mod plugin;

pub use cursor::InfoCursor;
pub use error::{PluginError, PluginResult};
pub use id::UniqueId;
pub use info::{Info, PluginInfo, Version};
pub use plugin::Plugin;
