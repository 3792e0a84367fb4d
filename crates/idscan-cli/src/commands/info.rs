use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use idscan_core::frame::{EditorLayout, FrameKind};
use idscan_core::io::load_image;
use idscan_core::raster::native_upscale;
use idscan_core::transform::TransformState;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,

    /// Only show this frame
    #[arg(short, long)]
    pub frame: Option<FrameKind>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let img = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let (w, h) = img.dimensions();

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", w, h);
    println!();

    let frames: Vec<FrameKind> = match args.frame {
        Some(kind) => vec![kind],
        None => FrameKind::ALL.to_vec(),
    };

    for kind in frames {
        let layout = EditorLayout::centered(kind, 0.0);
        let state = TransformState::new(layout.fit_scale(w, h));
        let upscale = native_upscale(&state, &layout);
        let size = kind.size();
        println!(
            "{:<10} {:>4}x{:<4} fit {:.3}  output {}x{}{}",
            kind.name(),
            size.width,
            size.height,
            state.fit_scale(),
            ((size.width * upscale).round() as u32).max(1),
            ((size.height * upscale).round() as u32).max(1),
            if kind.has_scan_box() { "  [scan box]" } else { "" }
        );
    }

    Ok(())
}
