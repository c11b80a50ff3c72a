//! The generic capability contract every plugin implements.

use crate::error::PluginResult;
use crate::id::UniqueId;
use crate::info::{Info, PluginInfo};

/// The contract a plugin of any kind satisfies, generic over the
/// configuration type it manages.
///
/// A configuration is a named, identified instance the plugin can
/// enumerate, hand out and, capability permitting, create, edit and
/// remove. The host never inspects [`Config`](Self::Config); values
/// returned by `get`/`create`/`edit` are owned by the caller for the
/// duration of use and released on scope exit.
///
/// Enumeration is a stateful cursor owned by the plugin instance:
/// [`first`](Self::first) resets it, [`next`](Self::next) advances it, and
/// calling `next` before any `first` behaves as `first`. Instances are not
/// meant to be shared between concurrent enumerators; callers needing that
/// use separate instances or external locking.
///
/// The `can_*` checks are advisory. Callers must consult them before
/// calling the mutating operation, but the operation may still be refused
/// with an explanatory error, a `remove` of an in-use configuration for
/// example.
pub trait Plugin {
    /// The configuration type this plugin manages.
    type Config;

    /// Declared identity and version of this plugin module.
    fn plugin_info(&self) -> &PluginInfo;

    /// Identity of the first enumerable configuration, resetting the
    /// cursor, or `None` when the plugin has none.
    fn first(&mut self) -> Option<Info>;

    /// Identity of the configuration after the cursor position, advancing
    /// it, or `None` when exhausted.
    fn next(&mut self) -> Option<Info>;

    /// Fetch an existing configuration by id.
    ///
    /// `create_args` is a plugin-interpreted argument vector applied to
    /// this materialization only; `None` is equivalent to an empty list.
    /// Fails with [`PluginError::NotFound`](crate::PluginError::NotFound)
    /// for ids the plugin does not know.
    fn get(&mut self, id: &UniqueId, create_args: Option<&[String]>)
        -> PluginResult<Self::Config>;

    /// Whether this plugin can create new configurations.
    fn can_create(&self) -> bool;

    /// Create a new configuration.
    ///
    /// Fails with [`PluginError::Unsupported`](crate::PluginError::Unsupported)
    /// when [`can_create`](Self::can_create) is false, with no side effect.
    /// `None` args are equivalent to an empty list.
    fn create(&mut self, create_args: Option<&[String]>) -> PluginResult<Self::Config>;

    /// Whether the configuration can be edited.
    fn can_edit(&self, id: &UniqueId) -> bool;

    /// Edit a configuration and return the edited value.
    fn edit(&mut self, id: &UniqueId) -> PluginResult<Self::Config>;

    /// Whether the configuration can be removed.
    fn can_remove(&self, id: &UniqueId) -> bool;

    /// Remove a configuration.
    fn remove(&mut self, id: &UniqueId) -> PluginResult<()>;

    /// Whether the configuration offers an interactive editor window.
    fn has_window(&self, _id: &UniqueId) -> bool {
        false
    }
}
