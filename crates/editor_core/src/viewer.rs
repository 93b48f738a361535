use std::{path::Path, process::Command};

use shared::error::{SpriteError, SpriteResult};
use tracing::info;

/// External program that plays a staged sprite file.
pub trait SpriteViewer {
    fn launch(&self, sprite: &Path) -> SpriteResult<()>;
}

pub struct MissingViewer;

impl SpriteViewer for MissingViewer {
    fn launch(&self, sprite: &Path) -> SpriteResult<()> {
        Err(SpriteError::Validation(format!(
            "no sprite viewer configured; test file staged at {}",
            sprite.display()
        )))
    }
}

/// Spawns `program <sprite>` without waiting for it.
pub struct CommandViewer {
    program: String,
}

impl CommandViewer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SpriteViewer for CommandViewer {
    fn launch(&self, sprite: &Path) -> SpriteResult<()> {
        Command::new(&self.program)
            .arg(sprite)
            .spawn()
            .map_err(|err| SpriteError::io(&self.program, err))?;
        info!(viewer = %self.program, sprite = %sprite.display(), "launched sprite viewer");
        Ok(())
    }
}
