//! Palette swatch rendering.

use crate::color::Rgb;
use crate::error::{StyleError, StyleResult};
use crate::palette::{Palette, PaletteKind};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const BAR_WIDTH: u32 = 120;
const BAR_HEIGHT: u32 = 160;
const TITLE_HEIGHT: u32 = 40;
const LABEL_HEIGHT: u32 = 40;
const MARGIN: u32 = 10;

fn render_error<E: std::fmt::Display>(e: E) -> StyleError {
    StyleError::Render {
        reason: e.to_string(),
    }
}

/// Render `palette` as a row of color bars into an SVG file.
///
/// Each bar shows the color as written in the palette file, in white on dark
/// colors and black on light ones. Named palettes get their labels under the
/// bars, continuous palettes their stop positions.
pub fn render_swatch(palette: &Palette, output: &Path) -> StyleResult<()> {
    let colors = palette.colors();
    let rgbs = palette.rgb_colors()?;
    let captions: Vec<String> = match palette.kind() {
        PaletteKind::Discrete(_) => Vec::new(),
        PaletteKind::Named(entries) => entries.iter().map(|(label, _)| label.clone()).collect(),
        PaletteKind::Continuous(stops) => stops.iter().map(|s| format!("{:.2}", s.position)).collect(),
    };

    let width = BAR_WIDTH * rgbs.len() as u32 + 2 * MARGIN;
    let height = TITLE_HEIGHT + BAR_HEIGHT + LABEL_HEIGHT + MARGIN;

    let root = SVGBackend::new(output, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let centered = Pos::new(HPos::Center, VPos::Center);
    let title_style = ("sans-serif", 18).into_font().color(&BLACK).pos(centered);
    root.draw_text(
        &format!("Palette: {}", palette.name()),
        &title_style,
        ((width / 2) as i32, (TITLE_HEIGHT / 2) as i32),
    )
    .map_err(render_error)?;

    for (i, (rgb, code)) in rgbs.iter().zip(&colors).enumerate() {
        let x0 = (MARGIN + BAR_WIDTH * i as u32) as i32;
        let x1 = x0 + BAR_WIDTH as i32;
        let y0 = TITLE_HEIGHT as i32;
        let y1 = y0 + BAR_HEIGHT as i32;
        let fill = RGBColor(rgb.r, rgb.g, rgb.b);

        root.draw(&Rectangle::new([(x0, y0), (x1, y1)], fill.filled()))
            .map_err(render_error)?;

        let text_color = text_color_for(rgb);
        let code_style = ("sans-serif", 14)
            .into_font()
            .style(FontStyle::Bold)
            .color(&text_color)
            .pos(centered);
        root.draw_text(code, &code_style, ((x0 + x1) / 2, (y0 + y1) / 2))
            .map_err(render_error)?;

        if let Some(caption) = captions.get(i) {
            let caption_style = ("sans-serif", 13)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Top));
            root.draw_text(caption, &caption_style, ((x0 + x1) / 2, y1 + 8))
                .map_err(render_error)?;
        }
    }

    root.present().map_err(render_error)?;
    log::info!("Palette '{}' swatch written to {}", palette.name(), output.display());
    Ok(())
}

fn text_color_for(background: &Rgb) -> RGBColor {
    if background.luminance() < 0.5 {
        WHITE
    } else {
        BLACK
    }
}
