use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use idscan_core::io::load_image;
use idscan_core::scan::AutofillForm;

use super::EditorArgs;
use crate::summary::print_scan_summary;

#[derive(Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub editor: EditorArgs,

    /// Previously edited image to scan whole if the scan box finds nothing.
    /// Without it the current edit is rasterized and used instead.
    #[arg(long)]
    pub edited: Option<PathBuf>,
}

pub fn run(args: &ScanArgs) -> Result<()> {
    let store = args.editor.load_sessions()?;
    let editor = args.editor.open_editor(store.as_ref())?;

    let fallback = match args.edited {
        Some(ref path) => load_image(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => editor.confirm()?.edited,
    };

    let outcome = editor.scan(Some(&fallback));
    let mut form = AutofillForm::default();
    let status = form.apply(&outcome);

    print_scan_summary(&outcome, &form, status);
    Ok(())
}
