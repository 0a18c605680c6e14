//! Export rendered panels as SVG or PNG files.

use std::path::Path;

use anyhow::{Context, Result};

use crate::scene::{to_svg, Panel};


const BACKGROUND: &str = "#ffffff";

// Raster output is drawn at twice the SVG size for sharp text
const SCALE_FACTOR: f32 = 2.0;


/// Export a panel as SVG.
pub fn export_svg(panel: &Panel, output_path: &Path) -> Result<()> {
    std::fs::write(output_path, to_svg(panel))
        .with_context(|| format!("Failed to write SVG to {}", output_path.display()))?;

    Ok(())
}


/// Export a panel as PNG.
pub fn export_png(panel: &Panel, output_path: &Path) -> Result<()> {
    let svg_content = to_svg(panel);

    // Parse SVG
    let tree = resvg::usvg::Tree::from_str(
        &svg_content,
        &resvg::usvg::Options::default(),
    ).context("Failed to parse SVG")?;

    // Render to pixmap
    let size = tree.size();
    let width = (size.width() * SCALE_FACTOR).ceil() as u32;
    let height = (size.height() * SCALE_FACTOR).ceil() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .context("Empty panel cannot be exported as PNG")?;

    let bg = hex_to_rgb(BACKGROUND);
    pixmap.fill(tiny_skia::Color::from_rgba8(bg.0, bg.1, bg.2, 255));

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(SCALE_FACTOR, SCALE_FACTOR),
        &mut pixmap.as_mut(),
    );

    pixmap.save_png(output_path)
        .with_context(|| format!("Failed to save PNG to {}", output_path.display()))?;

    Ok(())
}


fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
            .unwrap_or(0)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}


/// Open a file with the system default application.
pub fn open_file(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.to_string_lossy()])
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    Ok(())
}
