use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use shared::error::{SpriteError, SpriteResult};
use tracing::{debug, info};

pub fn read_sprite(path: &Path) -> SpriteResult<String> {
    let text = fs::read_to_string(path).map_err(|err| SpriteError::io(path, err))?;
    debug!(path = %path.display(), bytes = text.len(), "read sprite file");
    Ok(text)
}

/// Writes `json` followed by a newline, replacing any existing file.
pub fn write_sprite(path: &Path, json: &str) -> SpriteResult<()> {
    let mut text = String::with_capacity(json.len() + 1);
    text.push_str(json);
    text.push('\n');
    fs::write(path, text).map_err(|err| SpriteError::io(path, err))?;
    info!(path = %path.display(), "wrote sprite file");
    Ok(())
}

/// Re-emits any JSON document indented, keeping key order.
pub fn prettify(text: &str) -> SpriteResult<String> {
    let value: Value = serde_json::from_str(text)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn prettify_file(path: &Path) -> SpriteResult<()> {
    let pretty = prettify(&read_sprite(path)?)?;
    fs::write(path, pretty).map_err(|err| SpriteError::io(path, err))?;
    info!(path = %path.display(), "prettified sprite file");
    Ok(())
}

/// Last path component, splitting on both separators so paths recorded on
/// another platform still display sensibly.
pub fn safe_file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Copies each file in `files` into `dir` unless a file of the same name is
/// already there. Returns the destinations that were written.
pub fn copy_missing_files(files: &[PathBuf], dir: &Path) -> SpriteResult<Vec<PathBuf>> {
    let mut copied = Vec::new();
    for source in files {
        let Some(name) = source.file_name() else {
            continue;
        };
        let target = dir.join(name);
        if target.exists() {
            continue;
        }
        fs::copy(source, &target).map_err(|err| SpriteError::io(source, err))?;
        debug!(from = %source.display(), to = %target.display(), "copied image");
        copied.push(target);
    }
    Ok(copied)
}

#[cfg(test)]
#[path = "tests/files_tests.rs"]
mod tests;
