use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use editor_core::{CommandViewer, EditorSession, WizardInput};
use shared::{domain::GroupKind, error::UserMessage, SpriteError};
use sprite_tree::render_outline;
use storage::{default_settings_path, load_settings, prettify_file};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sprite_editor",
    about = "Inspect and edit sprite definition files"
)]
struct Cli {
    /// Settings file; defaults to the per-user config directory.
    #[arg(long)]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the sprite as an indented tree.
    Show { path: PathBuf },
    /// Parse the sprite and report fields that are not part of the schema.
    Validate { path: PathBuf },
    /// Rewrite the sprite the way the editor saves it.
    Normalize {
        path: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Re-indent any JSON file in place.
    Prettify { path: PathBuf },
    /// Create a new sprite from wizard answers.
    New {
        output: PathBuf,
        #[arg(long = "sprite-version")]
        version: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long = "action")]
        actions: Vec<String>,
        #[arg(long = "flag")]
        flags: Vec<String>,
        #[arg(long = "state")]
        states: Vec<String>,
    },
    /// Insert the next numbered copy of a state after it.
    Increment {
        path: PathBuf,
        state: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Add a credits, fixtures or spawn entry to a state.
    AddGroup {
        path: PathBuf,
        state: String,
        kind: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Set a value; `node` is a `/`-separated label path such as
    /// `SPRITE_STATE_DEFAULT/uri`. Missing scalar parameters are created.
    Set {
        path: PathBuf,
        node: String,
        value: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List recently opened sprites.
    Recent,
    /// Stage the sprite as the test file and hand it to the viewer.
    Test {
        path: PathBuf,
        #[arg(long)]
        image: Vec<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        match err.downcast_ref::<SpriteError>() {
            Some(sprite_err) => {
                let message = UserMessage::from(sprite_err);
                eprintln!("error[{:?}]: {err:#}", message.code);
            }
            None => eprintln!("error: {err:#}"),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings_path = cli.settings.unwrap_or_else(default_settings_path);
    let settings = load_settings(&settings_path);
    let mut session = EditorSession::new(settings, Some(settings_path));

    match cli.command {
        Command::Show { path } => {
            open(&mut session, &path)?;
            let tree = session.tree().context("sprite has no tree")?;
            print!("{}", render_outline(tree));
        }
        Command::Validate { path } => {
            open(&mut session, &path)?;
            let document = session.document().context("sprite has no document")?;
            if document.ignored_fields.is_empty() {
                println!("{}: ok", path.display());
            } else {
                for field in &document.ignored_fields {
                    println!("{}: ignored field {field}", path.display());
                }
            }
            if !document.is_valid() {
                bail!("sprite is missing SPRITE_META_DATA or SPRITE_STATE_DEFAULT");
            }
        }
        Command::Normalize { path, output } => {
            open(&mut session, &path)?;
            save(&mut session, output.as_deref().unwrap_or(&path))?;
        }
        Command::Prettify { path } => {
            prettify_file(&path)
                .with_context(|| format!("failed to prettify {}", path.display()))?;
        }
        Command::New {
            output,
            version,
            author,
            description,
            url,
            actions,
            flags,
            states,
        } => {
            let name = output
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .context("output path has no file name")?;
            session.new_from_wizard(&WizardInput {
                name,
                version,
                author,
                description,
                url,
                actions,
                flags,
                states,
            })?;
            save(&mut session, &output)?;
        }
        Command::Increment {
            path,
            state,
            output,
        } => {
            open(&mut session, &path)?;
            session.select_path(&[state.as_str()])?;
            let id = session.increment_state()?;
            if let Some(tree) = session.tree() {
                println!("added {}", tree.label(id).unwrap_or_default());
            }
            save(&mut session, output.as_deref().unwrap_or(&path))?;
        }
        Command::AddGroup {
            path,
            state,
            kind,
            output,
        } => {
            let Some(kind) = GroupKind::from_name(&kind) else {
                bail!("unknown group '{kind}'; expected credits, fixtures or spawn");
            };
            open(&mut session, &path)?;
            session.select_path(&[state.as_str()])?;
            let container = session.add_group(kind)?;
            session.select(container)?;
            session.add_group_element()?;
            save(&mut session, output.as_deref().unwrap_or(&path))?;
        }
        Command::Set {
            path,
            node,
            value,
            output,
        } => {
            open(&mut session, &path)?;
            let labels: Vec<&str> = node.split('/').filter(|l| !l.is_empty()).collect();
            if session.select_path(labels.as_slice()).is_err() {
                let Some((parameter, state)) = labels.split_last() else {
                    bail!("node path is empty");
                };
                session.select_path(state)?;
                let id = session.add_parameter(parameter)?;
                session.select(id)?;
            }
            session.set_value(&value)?;
            save(&mut session, output.as_deref().unwrap_or(&path))?;
        }
        Command::Recent => {
            for (name, path) in session.recent().labelled() {
                println!("{name}\t{path}");
            }
        }
        Command::Test { path, image } => {
            open(&mut session, &path)?;
            for image in &image {
                session
                    .open_image(image)
                    .with_context(|| format!("failed to load image {}", image.display()))?;
            }
            match &session.settings().viewer_command {
                Some(program) => {
                    let staged = session.test_sprite(&CommandViewer::new(program.clone()))?;
                    println!("launched viewer on {}", staged.display());
                }
                None => {
                    let staged = session.stage_test_sprite()?;
                    warn!(
                        path = %staged.display(),
                        "no viewer_command configured; test file staged only"
                    );
                }
            }
        }
    }

    Ok(())
}

fn open(session: &mut EditorSession, path: &Path) -> Result<()> {
    session
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))
}

fn save(session: &mut EditorSession, path: &Path) -> Result<()> {
    session
        .save(path)
        .with_context(|| format!("failed to save {}", path.display()))?;
    info!(path = %path.display(), "saved sprite");
    Ok(())
}
