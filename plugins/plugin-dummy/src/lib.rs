//! # plugin-dummy
//!
//! A dummy plugin implementation for testing and development.
//!
//! The plugin manages an in-memory set of configurations and persists
//! nothing. It implements the `Plugin` trait to demonstrate the capability
//! contract, including the advisory nature of the `can_*` checks, and to
//! give the other crates a statically linked module to test against.
//! Statically linked registration is a valid realization of the module
//! contract; nothing requires a plugin to arrive through discovery.

use plugforge_core::{
    Info, InfoCursor, Plugin, PluginError, PluginInfo, PluginResult, UniqueId, Version,
};

const PLUGIN_ID: &str = "0d0d0d0d-0000-4000-8000-000000000001";
const INBOX_ID: &str = "0d0d0d0d-0000-4000-8000-000000000011";
const DRAFTS_ID: &str = "0d0d0d0d-0000-4000-8000-000000000022";

/// One in-memory configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub info: Info,
    pub args: Vec<String>,
    pub revision: u32,
}

impl Note {
    pub fn id(&self) -> UniqueId {
        self.info.id()
    }
}

/// A plugin over an in-memory configuration set.
///
/// The default instance supports the full lifecycle and ships two
/// configurations, one of which ("inbox") is pinned: `can_remove` answers
/// true for it, but `remove` refuses with an explanatory error.
pub struct DummyPlugin {
    identity: PluginInfo,
    notes: Vec<Note>,
    pinned: UniqueId,
    windowed: UniqueId,
    writable: bool,
    cursor: InfoCursor,
}

fn fixture_id(s: &str) -> UniqueId {
    s.parse().expect("fixture id is well-formed")
}

impl DummyPlugin {
    /// Create a writable dummy plugin with its fixture configurations.
    pub fn new() -> Self {
        Self::with_writable(true)
    }

    /// Create a dummy plugin whose `can_create` is false; mutating
    /// operations are refused.
    pub fn read_only() -> Self {
        Self::with_writable(false)
    }

    fn with_writable(writable: bool) -> Self {
        let inbox = fixture_id(INBOX_ID);
        let drafts = fixture_id(DRAFTS_ID);

        let notes = vec![
            Note {
                info: Info::new(inbox, "inbox", "pinned scratch space"),
                args: vec![],
                revision: 0,
            },
            Note {
                info: Info::new(drafts, "drafts", "editable scratch space"),
                args: vec!["draft".to_string()],
                revision: 0,
            },
        ];

        Self {
            identity: PluginInfo::new(
                Info::new(fixture_id(PLUGIN_ID), "dummy", "in-memory test plugin"),
                Version::new(0, 1, 0),
            ),
            notes,
            pinned: inbox,
            windowed: drafts,
            writable,
            cursor: InfoCursor::new(),
        }
    }

    /// Id of the pinned configuration whose removal is always refused.
    pub fn pinned_id(&self) -> UniqueId {
        self.pinned
    }

    fn find(&self, id: &UniqueId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id() == *id)
    }

    fn infos(&self) -> Vec<Info> {
        self.notes.iter().map(|n| n.info.clone()).collect()
    }
}

impl Default for DummyPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for DummyPlugin {
    type Config = Note;

    fn plugin_info(&self) -> &PluginInfo {
        &self.identity
    }

    fn first(&mut self) -> Option<Info> {
        let infos = self.infos();
        self.cursor.first(&infos).cloned()
    }

    fn next(&mut self) -> Option<Info> {
        let infos = self.infos();
        self.cursor.next(&infos).cloned()
    }

    fn get(&mut self, id: &UniqueId, create_args: Option<&[String]>) -> PluginResult<Note> {
        let note = self.find(id).ok_or(PluginError::NotFound(*id))?;

        let mut note = note.clone();
        if let Some(args) = create_args {
            note.args.extend(args.iter().cloned());
        }
        Ok(note)
    }

    fn can_create(&self) -> bool {
        self.writable
    }

    fn create(&mut self, create_args: Option<&[String]>) -> PluginResult<Note> {
        if !self.writable {
            return Err(PluginError::unsupported("create"));
        }

        let args = create_args.unwrap_or(&[]);
        let name = args
            .first()
            .cloned()
            .unwrap_or_else(|| "untitled".to_string());

        let note = Note {
            info: Info::new(UniqueId::new(), name, ""),
            args: args.get(1..).unwrap_or(&[]).to_vec(),
            revision: 0,
        };
        self.notes.push(note.clone());
        Ok(note)
    }

    fn can_edit(&self, id: &UniqueId) -> bool {
        self.writable && self.find(id).is_some()
    }

    fn edit(&mut self, id: &UniqueId) -> PluginResult<Note> {
        if !self.writable {
            return Err(PluginError::unsupported("edit"));
        }

        let note = self
            .notes
            .iter_mut()
            .find(|n| n.info.id() == *id)
            .ok_or(PluginError::NotFound(*id))?;
        note.revision += 1;
        Ok(note.clone())
    }

    fn can_remove(&self, id: &UniqueId) -> bool {
        // Advisory: answers true for the pinned configuration too.
        self.writable && self.find(id).is_some()
    }

    fn remove(&mut self, id: &UniqueId) -> PluginResult<()> {
        if !self.writable {
            return Err(PluginError::unsupported("remove"));
        }
        if self.find(id).is_none() {
            return Err(PluginError::NotFound(*id));
        }
        if *id == self.pinned {
            return Err(PluginError::internal("configuration is in use"));
        }

        self.notes.retain(|n| n.id() != *id);
        Ok(())
    }

    fn has_window(&self, id: &UniqueId) -> bool {
        *id == self.windowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let plugin = DummyPlugin::new();
        assert_eq!(plugin.plugin_info().name(), "dummy");
        assert_eq!(plugin.plugin_info().version(), &Version::new(0, 1, 0));
    }

    #[test]
    fn test_cursor_walk_and_reset() {
        let mut plugin = DummyPlugin::new();

        let first = plugin.first().unwrap();
        assert_eq!(first.name(), "inbox");
        assert_eq!(plugin.next().unwrap().name(), "drafts");
        assert!(plugin.next().is_none());

        // first(); next(); first() yields the same as a standalone first().
        plugin.next();
        assert_eq!(plugin.first().unwrap(), first);
    }

    #[test]
    fn test_next_before_first() {
        let mut plugin = DummyPlugin::new();
        assert_eq!(plugin.next().unwrap().name(), "inbox");
    }

    #[test]
    fn test_get_known_and_unknown() {
        let mut plugin = DummyPlugin::new();
        let id = plugin.first().unwrap().id();

        let note = plugin.get(&id, None).unwrap();
        assert_eq!(note.info.name(), "inbox");

        let missing = plugin.get(&UniqueId::new(), None);
        assert!(matches!(missing, Err(PluginError::NotFound(_))));
    }

    #[test]
    fn test_create_lifecycle() {
        let mut plugin = DummyPlugin::new();
        assert!(plugin.can_create());

        let args = vec!["watchlist".to_string(), "AAPL".to_string()];
        let note = plugin.create(Some(&args)).unwrap();
        assert_eq!(note.info.name(), "watchlist");
        assert_eq!(note.args, vec!["AAPL"]);

        let fetched = plugin.get(&note.id(), None).unwrap();
        assert_eq!(fetched, note);

        // None args are equivalent to an empty list.
        let untitled = plugin.create(None).unwrap();
        assert_eq!(untitled.info.name(), "untitled");
    }

    #[test]
    fn test_read_only_refuses_without_side_effect() {
        let mut plugin = DummyPlugin::read_only();
        assert!(!plugin.can_create());

        let result = plugin.create(Some(&["x".to_string()]));
        assert!(matches!(result, Err(PluginError::Unsupported { .. })));

        // No side effect: the fixture set is unchanged.
        assert_eq!(plugin.first().unwrap().name(), "inbox");
        assert_eq!(plugin.next().unwrap().name(), "drafts");
        assert!(plugin.next().is_none());

        let id = plugin.first().unwrap().id();
        assert!(!plugin.can_edit(&id));
        assert!(matches!(
            plugin.edit(&id),
            Err(PluginError::Unsupported { .. })
        ));
        assert!(matches!(
            plugin.remove(&id),
            Err(PluginError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_edit_bumps_revision() {
        let mut plugin = DummyPlugin::new();
        let id = plugin.first().unwrap().id();
        assert!(plugin.can_edit(&id));

        let edited = plugin.edit(&id).unwrap();
        assert_eq!(edited.revision, 1);
        assert_eq!(plugin.edit(&id).unwrap().revision, 2);

        let missing = plugin.edit(&UniqueId::new());
        assert!(matches!(missing, Err(PluginError::NotFound(_))));
    }

    #[test]
    fn test_remove_is_advisory() {
        let mut plugin = DummyPlugin::new();
        let pinned = plugin.pinned_id();

        // The capability check says yes, the operation still refuses.
        assert!(plugin.can_remove(&pinned));
        let err = plugin.remove(&pinned).unwrap_err();
        assert!(matches!(err, PluginError::Internal(_)));
        assert!(plugin.get(&pinned, None).is_ok());

        // A regular configuration removes fine.
        plugin.first();
        let drafts = plugin.next().unwrap().id();
        plugin.remove(&drafts).unwrap();
        assert!(matches!(
            plugin.get(&drafts, None),
            Err(PluginError::NotFound(_))
        ));
    }

    #[test]
    fn test_window_flag() {
        let mut plugin = DummyPlugin::new();
        let inbox = plugin.first().unwrap().id();
        let drafts = plugin.next().unwrap().id();

        assert!(!plugin.has_window(&inbox));
        assert!(plugin.has_window(&drafts));
    }
}
