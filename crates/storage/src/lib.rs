//! On-disk side of the sprite editor: sprite file I/O and prettify, the
//! recently-used file list, and persisted editor settings.

mod files;
mod recent;
mod settings;

pub use files::{
    copy_missing_files, prettify, prettify_file, read_sprite, safe_file_name, write_sprite,
};
pub use recent::{RecentFiles, DEFAULT_MAX_RECENT, RECENT_SEPARATOR};
pub use settings::{default_settings_path, load_settings, EditorSettings, SETTINGS_PATH_ENV};
