pub mod config;
pub mod edit;
pub mod info;
pub mod parse;
pub mod scan;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use idscan_core::config::EditorConfig;
use idscan_core::editor::{Editor, EditorRequest};
use idscan_core::frame::FrameKind;
use idscan_core::geometry::Point;
use idscan_core::io::load_image;
use idscan_core::session::SessionStore;
use tracing::debug;

/// Options shared by the commands that open an editor.
#[derive(Args)]
pub struct EditorArgs {
    /// Input photo (PNG, JPEG, WebP or BMP)
    pub file: PathBuf,

    /// Frame to fit the photo into (photo-3x4, id-card, plate)
    #[arg(short, long, default_value = "id-card")]
    pub frame: FrameKind,

    /// Editor config TOML (see `idscan config`)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Session file holding saved edits per slot
    #[arg(long)]
    pub sessions: Option<PathBuf>,

    /// Slot name inside the session file
    #[arg(long, default_value = "front-id-photo")]
    pub slot: String,

    /// Scan box left edge, in display pixels
    #[arg(long, requires = "box_y", allow_negative_numbers = true)]
    pub box_x: Option<f64>,

    /// Scan box top edge, in display pixels
    #[arg(long, requires = "box_x", allow_negative_numbers = true)]
    pub box_y: Option<f64>,
}

impl EditorArgs {
    pub fn load_config(&self) -> Result<EditorConfig> {
        let Some(ref path) = self.config else {
            return Ok(EditorConfig::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = EditorConfig::from_toml(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        debug!(path = %path.display(), "Loaded editor config");
        Ok(config)
    }

    pub fn load_sessions(&self) -> Result<Option<SessionStore>> {
        self.sessions
            .as_deref()
            .map(load_store)
            .transpose()
    }

    /// Open an editor on the input photo, restoring this slot's session if
    /// one is stored, then apply the `--box-x/--box-y` override.
    pub fn open_editor(&self, store: Option<&SessionStore>) -> Result<Editor> {
        let original = load_image(&self.file)
            .with_context(|| format!("Failed to load {}", self.file.display()))?;
        let prior_session = store.and_then(|s| s.get(&self.slot)).cloned();
        if prior_session.is_some() {
            println!("Restoring session '{}'", self.slot);
        }

        let mut editor = Editor::open(EditorRequest {
            original: Arc::new(original),
            frame: self.frame,
            prior_session,
            config: self.load_config()?,
        })?;

        if let (Some(x), Some(y)) = (self.box_x, self.box_y) {
            editor.move_selection(Point::new(x, y));
        }
        Ok(editor)
    }
}

pub fn load_store(path: &Path) -> Result<SessionStore> {
    SessionStore::load(path)
        .with_context(|| format!("Failed to read sessions from {}", path.display()))
}
