//! Well-known module directories.
//!
//! Hosts that do not configure explicit search paths look for modules in
//! the following locations, in order:
//!
//! 1. the directories named by `PLUGFORGE_PATH`
//! 2. the user module directory (`$XDG_DATA_HOME/plugforge/modules` on
//!    Linux)
//! 3. fixed system locations

use std::path::PathBuf;

/// Environment variable naming extra module directories, in the
/// platform's path-list syntax.
pub const PATH_VAR: &str = "PLUGFORGE_PATH";

/// The user module directory, when a home directory can be resolved.
pub fn user_modules_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "plugforge")
        .map(|dirs| dirs.data_dir().join("modules"))
}

/// System module directories that exist on this host, `PLUGFORGE_PATH`
/// entries first.
pub fn system_modules_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(joined) = std::env::var(PATH_VAR) {
        for dir in std::env::split_paths(&joined) {
            if dir.exists() && !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
    }

    let defaults = [
        "/usr/local/share/plugforge/modules",
        "/usr/share/plugforge/modules",
    ];

    for dir in defaults {
        let path = PathBuf::from(dir);
        if path.exists() && !dirs.contains(&path) {
            dirs.push(path);
        }
    }

    dirs
}

/// All search paths in priority order: user modules first, then system.
pub fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(user) = user_modules_dir() {
        paths.push(user);
    }
    paths.extend(system_modules_dirs());

    paths
}
