use std::path::{Path, PathBuf};

use shared::{
    document::SpriteDocument,
    domain::{GroupKind, NodeTag, PickMode, DEFAULT_STATE, KNOWN_STATE_PARAMETERS},
    error::{SpriteError, SpriteResult},
};
use sprite_tree::{parse_sprite, write_json, NodeId, SpriteTree};
use storage::{
    copy_missing_files, read_sprite, safe_file_name, write_sprite, EditorSettings, RecentFiles,
};
use tracing::{debug, info, warn};

use crate::{
    preview::PreviewImage,
    viewer::SpriteViewer,
    wizard::{build_wizard_tree, WizardInput},
};

/// One editing window: the tree being edited, what is selected in it, and
/// the image used for picks.
pub struct EditorSession {
    settings: EditorSettings,
    settings_path: Option<PathBuf>,
    recent: RecentFiles,
    tree: Option<SpriteTree>,
    document: Option<SpriteDocument>,
    source_path: Option<PathBuf>,
    selected: Option<NodeId>,
    pick_mode: PickMode,
    preview: Option<PreviewImage>,
    loaded_images: Vec<PathBuf>,
}

impl EditorSession {
    /// `settings_path` is where the MRU list is persisted; `None` keeps it in
    /// memory only.
    pub fn new(settings: EditorSettings, settings_path: Option<PathBuf>) -> Self {
        let recent = settings.recent();
        Self {
            settings,
            settings_path,
            recent,
            tree: None,
            document: None,
            source_path: None,
            selected: None,
            pick_mode: PickMode::None,
            preview: None,
            loaded_images: Vec::new(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(EditorSettings::default(), None)
    }

    pub fn tree(&self) -> Option<&SpriteTree> {
        self.tree.as_ref()
    }

    /// Document the current tree was built from; `None` for wizard trees.
    pub fn document(&self) -> Option<&SpriteDocument> {
        self.document.as_ref()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn recent(&self) -> &RecentFiles {
        &self.recent
    }

    pub fn pick_mode(&self) -> PickMode {
        self.pick_mode
    }

    pub fn preview(&self) -> Option<&PreviewImage> {
        self.preview.as_ref()
    }

    pub fn loaded_images(&self) -> &[PathBuf] {
        &self.loaded_images
    }

    pub fn known_parameters(&self) -> &'static [&'static str] {
        &KNOWN_STATE_PARAMETERS
    }

    /// Replaces the current tree with the sprite at `path`. On any failure
    /// the previous tree stays loaded.
    pub fn open(&mut self, path: &Path) -> SpriteResult<()> {
        let text = read_sprite(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| safe_file_name(&path.to_string_lossy()).to_string());
        let (document, tree) = parse_sprite(&file_name, &text)?;

        self.tree = Some(tree);
        self.document = Some(document);
        self.source_path = Some(path.to_path_buf());
        self.selected = None;
        self.pick_mode = PickMode::None;
        info!(path = %path.display(), "opened sprite");

        self.load_default_image(path);
        self.remember(path);
        Ok(())
    }

    fn load_default_image(&mut self, sprite: &Path) {
        let Some(uri) = self
            .tree
            .as_ref()
            .and_then(|tree| {
                tree.resolve_path(&[DEFAULT_STATE, "uri"])
                    .and_then(|parameter| tree.children(parameter).first().copied())
                    .and_then(|value| tree.label(value))
            })
            .filter(|uri| !uri.is_empty())
            .map(str::to_string)
        else {
            return;
        };

        let dir = sprite.parent().unwrap_or_else(|| Path::new(""));
        let image = dir.join(&uri);
        if !image.exists() {
            debug!(image = %image.display(), "default state image not found next to sprite");
            return;
        }
        if let Err(err) = self.open_image(&image) {
            warn!(image = %image.display(), error = %err, "failed to load default state image");
        }
    }

    fn remember(&mut self, path: &Path) {
        if !self.recent.insert(&path.to_string_lossy()) {
            return;
        }
        self.settings.set_recent(&self.recent);
        let Some(settings_path) = &self.settings_path else {
            return;
        };
        if let Err(err) = self.settings.save(settings_path) {
            warn!(path = %settings_path.display(), error = %err, "failed to persist recent files");
        }
    }

    pub fn new_from_wizard(&mut self, input: &WizardInput) -> SpriteResult<()> {
        let tree = build_wizard_tree(input)?;
        info!(
            file = tree.file_name(),
            states = tree.states().len(),
            "created sprite from wizard"
        );
        self.tree = Some(tree);
        self.document = None;
        self.source_path = None;
        self.selected = None;
        self.pick_mode = PickMode::None;
        Ok(())
    }

    pub fn select(&mut self, id: NodeId) -> SpriteResult<()> {
        self.tree().ok_or_else(no_tree)?.get(id)?;
        self.selected = Some(id);
        Ok(())
    }

    /// Selects the node at `path`, given as labels below the file node.
    pub fn select_path<S: AsRef<str>>(&mut self, path: &[S]) -> SpriteResult<NodeId> {
        let tree = self.tree().ok_or_else(no_tree)?;
        let id = tree.resolve_path(path).ok_or_else(|| {
            let joined: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
            SpriteError::selection(&[], format!("No node at '{}'.", joined.join("\\")))
        })?;
        self.selected = Some(id);
        Ok(id)
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn editing(
        &mut self,
        required: &[NodeTag],
        message: &str,
    ) -> SpriteResult<(&mut SpriteTree, NodeId)> {
        let Some(selected) = self.selected else {
            return Err(SpriteError::selection(required, message));
        };
        let tree = self.tree.as_mut().ok_or_else(no_tree)?;
        Ok((tree, selected))
    }

    pub fn add_parameter(&mut self, name: &str) -> SpriteResult<NodeId> {
        let (tree, state) = self.editing(
            &[NodeTag::State],
            "Please select a STATE in the tree to add the parameter to.",
        )?;
        tree.add_parameter(state, name)
    }

    pub fn add_group(&mut self, kind: GroupKind) -> SpriteResult<NodeId> {
        let (tree, state) = self.editing(
            &[NodeTag::State],
            "Please select a STATE in the tree to add the group to.",
        )?;
        tree.add_group(state, kind)
    }

    pub fn add_group_element(&mut self) -> SpriteResult<NodeId> {
        let (tree, index) = self.editing(
            &[NodeTag::Index],
            "Please select a group or group entry in the tree.",
        )?;
        tree.add_group_element(index)
    }

    pub fn push_list_value(&mut self, text: &str) -> SpriteResult<NodeId> {
        let (tree, parameter) = self.editing(
            &[NodeTag::Parameter],
            "Please select an 'actions' or 'flags' parameter in the tree.",
        )?;
        tree.push_list_value(parameter, text)
    }

    pub fn set_value(&mut self, text: &str) -> SpriteResult<NodeId> {
        let (tree, id) = self.editing(
            &[NodeTag::Parameter, NodeTag::Value],
            "Please select a valid Tree Node to place the value in.",
        )?;
        tree.set_value(id, text)
    }

    pub fn rename(&mut self, label: &str) -> SpriteResult<()> {
        let (tree, id) = self.editing(
            &[
                NodeTag::File,
                NodeTag::State,
                NodeTag::Parameter,
                NodeTag::Value,
            ],
            "Please select a node in the tree to rename.",
        )?;
        tree.rename(id, label)
    }

    /// Removes the selected subtree and clears the selection.
    pub fn remove_selected(&mut self) -> SpriteResult<()> {
        let (tree, id) = self.editing(
            &[
                NodeTag::State,
                NodeTag::Parameter,
                NodeTag::Index,
                NodeTag::Value,
            ],
            "Please select a node in the tree to delete.",
        )?;
        tree.remove(id)?;
        self.selected = None;
        Ok(())
    }

    pub fn move_up(&mut self) -> SpriteResult<bool> {
        let (tree, state) = self.editing(
            &[NodeTag::State],
            "Please select a STATE in the tree to move.",
        )?;
        tree.move_up(state)
    }

    pub fn move_down(&mut self) -> SpriteResult<bool> {
        let (tree, state) = self.editing(
            &[NodeTag::State],
            "Please select a STATE in the tree to move.",
        )?;
        tree.move_down(state)
    }

    /// Inserts the incremented copy after the selected state and selects it.
    pub fn increment_state(&mut self) -> SpriteResult<NodeId> {
        let (tree, state) = self.editing(
            &[NodeTag::State],
            "Please select a STATE in the tree to increment.",
        )?;
        let id = tree.increment_state(state)?;
        self.selected = Some(id);
        Ok(id)
    }

    /// Drops every state but keeps the file node.
    pub fn clear(&mut self) {
        if let Some(tree) = self.tree.as_mut() {
            tree.clear();
        }
        self.selected = None;
        self.pick_mode = PickMode::None;
    }

    pub fn request_pick(&mut self, mode: PickMode) -> SpriteResult<()> {
        if mode == PickMode::None {
            self.pick_mode = PickMode::None;
            return Ok(());
        }
        let required = [NodeTag::Parameter, NodeTag::Value];
        let tag = self
            .selected
            .and_then(|id| self.tree.as_ref().and_then(|tree| tree.tag(id)));
        if !tag.is_some_and(|tag| required.contains(&tag)) {
            return Err(SpriteError::selection(
                &required,
                "Please select a Parameter or Value in the tree before picking from the image.",
            ));
        }
        self.pick_mode = mode;
        Ok(())
    }

    /// Resolves a click at `(x, y)` on the preview image. Returns the text
    /// written, or `None` when no pick was armed.
    pub fn apply_pick(&mut self, x: u32, y: u32) -> SpriteResult<Option<String>> {
        let text = match self.pick_mode {
            PickMode::None => return Ok(None),
            PickMode::Color => self
                .preview
                .as_ref()
                .ok_or_else(|| SpriteError::Image("No image is loaded to pick from.".into()))?
                .color_hex(x, y)?,
            PickMode::X => x.to_string(),
            PickMode::Y => y.to_string(),
        };
        self.set_value(&text)?;
        debug!(mode = ?self.pick_mode, value = %text, "applied pick");
        self.pick_mode = PickMode::None;
        Ok(Some(text))
    }

    /// Loads `path` as the preview image. Each location is remembered once
    /// for the test-sprite copy.
    pub fn open_image(&mut self, path: &Path) -> SpriteResult<()> {
        let preview = PreviewImage::load(path)?;
        if !self.loaded_images.iter().any(|known| known == path) {
            self.loaded_images.push(path.to_path_buf());
        }
        self.preview = Some(preview);
        Ok(())
    }

    /// Writes the preview image's file name into the selected Parameter.
    pub fn use_image_uri(&mut self) -> SpriteResult<NodeId> {
        let uri = self
            .preview
            .as_ref()
            .map(PreviewImage::uri)
            .ok_or_else(|| SpriteError::Image("No image is loaded.".into()))?;
        let (tree, parameter) = self.editing(
            &[NodeTag::Parameter],
            "Please select the 'uri' Parameter in the tree.",
        )?;
        if tree.tag(parameter) != Some(NodeTag::Parameter) {
            return Err(SpriteError::selection(
                &[NodeTag::Parameter],
                "Please select the 'uri' Parameter in the tree.",
            ));
        }
        tree.set_value(parameter, &uri)
    }

    pub fn to_json(&self) -> SpriteResult<String> {
        let tree = self
            .tree
            .as_ref()
            .ok_or_else(|| SpriteError::Validation("Cannot write empty sprite!".into()))?;
        write_json(tree)
    }

    /// Writes the tree to `path` and makes it the session's source.
    pub fn save(&mut self, path: &Path) -> SpriteResult<()> {
        let json = self.to_json()?;
        write_sprite(path, &json)?;
        self.source_path = Some(path.to_path_buf());
        self.remember(path);
        Ok(())
    }

    fn working_dir(&self) -> SpriteResult<PathBuf> {
        match self.source_path.as_deref().and_then(Path::parent) {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.to_path_buf()),
            _ => std::env::current_dir().map_err(|err| SpriteError::io(".", err)),
        }
    }

    /// Writes the tree to the configured test file next to the sprite and
    /// copies any loaded images that are not already there.
    pub fn stage_test_sprite(&self) -> SpriteResult<PathBuf> {
        let json = self.to_json()?;
        let dir = self.working_dir()?;
        let target = dir.join(&self.settings.test_file_name);
        write_sprite(&target, &json)?;
        let copied = copy_missing_files(&self.loaded_images, &dir)?;
        info!(
            path = %target.display(),
            copied_images = copied.len(),
            "staged test sprite"
        );
        Ok(target)
    }

    pub fn test_sprite(&self, viewer: &dyn SpriteViewer) -> SpriteResult<PathBuf> {
        let staged = self.stage_test_sprite()?;
        viewer.launch(&staged)?;
        Ok(staged)
    }
}

fn no_tree() -> SpriteError {
    SpriteError::Validation("No sprite is open.".into())
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
