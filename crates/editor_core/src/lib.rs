//! Editor session over a sprite tree: selection, structural edits,
//! pick-from-image, the new-sprite wizard, and the test-sprite hand-off.

mod preview;
mod session;
mod viewer;
mod wizard;

pub use preview::PreviewImage;
pub use session::EditorSession;
pub use viewer::{CommandViewer, MissingViewer, SpriteViewer};
pub use wizard::{build_wizard_tree, WizardInput};
