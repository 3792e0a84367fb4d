use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use idscan_core::geometry::Point;
use idscan_core::io::save_png;

use super::EditorArgs;

#[derive(Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub editor: EditorArgs,

    /// Zoom in percent (50-300)
    #[arg(long)]
    pub zoom: Option<i32>,

    /// Absolute rotation in degrees (0-360)
    #[arg(long)]
    pub rotate: Option<i32>,

    /// Quarter turns to apply; negative turns left
    #[arg(long, allow_negative_numbers = true)]
    pub turns: Option<i32>,

    /// Horizontal pan offset in display pixels
    #[arg(long, allow_negative_numbers = true)]
    pub pan_x: Option<f64>,

    /// Vertical pan offset in display pixels
    #[arg(long, allow_negative_numbers = true)]
    pub pan_y: Option<f64>,

    /// Discard any stored edit for the slot before applying options
    #[arg(long)]
    pub reset: bool,

    /// Output PNG path
    #[arg(short, long, default_value = "edited.png")]
    pub output: PathBuf,
}

pub fn run(args: &EditArgs) -> Result<()> {
    let mut store = args.editor.load_sessions()?;
    let mut editor = args.editor.open_editor(store.as_ref())?;

    if args.reset {
        editor.reset();
    }
    if let Some(zoom) = args.zoom {
        editor.set_zoom(zoom);
    }
    if let Some(degrees) = args.rotate {
        editor.set_rotation(degrees);
    }
    if let Some(turns) = args.turns {
        let steps = effective_turns(turns);
        for _ in 0..steps.unsigned_abs() {
            if steps < 0 {
                editor.rotate_left();
            } else {
                editor.rotate_right();
            }
        }
    }
    if args.pan_x.is_some() || args.pan_y.is_some() {
        let current = editor.transform().pan_offset();
        editor.set_pan(Point::new(
            args.pan_x.unwrap_or(current.x),
            args.pan_y.unwrap_or(current.y),
        ));
    }

    let t = editor.transform();
    println!(
        "Frame {} | zoom {}% | rotation {}\u{b0} | pan ({:.1}, {:.1})",
        editor.frame(),
        t.zoom_percent(),
        t.normalized_rotation(),
        t.pan_offset().x,
        t.pan_offset().y
    );

    let outcome = editor.confirm()?;
    save_png(&outcome.edited, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;
    println!(
        "Saved {}x{} to {}",
        outcome.edited.width(),
        outcome.edited.height(),
        args.output.display()
    );
    if let Some(native) = outcome.selection_native {
        println!(
            "Scan box covers {}x{} at ({}, {}) of the original",
            native.width, native.height, native.x, native.y
        );
    }

    if let (Some(path), Some(store)) = (args.editor.sessions.as_ref(), store.as_mut()) {
        store.insert(args.editor.slot.clone(), outcome.session);
        store
            .save(path)
            .with_context(|| format!("Failed to save sessions to {}", path.display()))?;
        println!("Session '{}' saved to {}", args.editor.slot, path.display());
    }

    Ok(())
}

/// Whole turns are dropped; the sign is kept so left stays left.
fn effective_turns(turns: i32) -> i32 {
    turns % 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_turns_bounded() {
        assert_eq!(effective_turns(5), 1);
        assert_eq!(effective_turns(-6), -2);
        assert_eq!(effective_turns(4), 0);
        assert_eq!(effective_turns(i32::MIN), 0);
        assert_eq!(effective_turns(i32::MAX), 3);
    }
}
