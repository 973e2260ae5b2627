//! # plotstyle
//!
//! YAML-defined color palettes and plot themes for a plotting backend.
//!
//! The crate loads palette and theme documents from local files or URLs,
//! writes themes into the backend's global parameter table, registers
//! palettes as colormaps and hands out stable label colors, so a category
//! keeps its color across every figure of a project.
//!
//! Two ways in:
//!
//! - the free functions below, which act on a process-wide
//!   [`StyleManager`] holding the bundled defaults and an in-process
//!   [`PlotState`];
//! - an explicit [`StyleContext`] for callers that bring their own
//!   [`PlotBackend`] or want isolated state.
//!
//! ```no_run
//! use plotstyle::{StyleOverrides, get_mapped_palette, load_project_palettes, set_project_style};
//!
//! load_project_palettes("https://example.com/lab/palettes.yaml")?;
//! set_project_style("paper", StyleOverrides::none().set("font.size", 9))?;
//!
//! let colors = get_mapped_palette(["wt", "ko"], "genotype", None)?;
//! assert!(colors.get("wt").is_some());
//! # Ok::<(), plotstyle::StyleError>(())
//! ```

pub mod backend;
pub mod color;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod logger;
pub mod manager;
pub mod mapping;
pub mod palette;
pub mod settings;
pub mod styling;
pub mod swatch;
pub mod theme;
pub mod validation;

pub use backend::{Colormap, ColormapKind, ParamValue, PlotBackend, PlotState};
pub use color::Rgb;
pub use error::{StyleError, StyleResult};
pub use loader::ConfigSource;
pub use manager::{LoadOutcome, StyleContext, StyleManager};
pub use mapping::{LabelColorMap, LabelSet};
pub use palette::{Palette, PaletteKind};
pub use settings::StyleSettings;
pub use styling::{AppliedStyle, StyleOverrides};
pub use theme::Theme;

use std::path::Path;

/// Apply theme `theme_name` to the global plotting state.
pub fn set_project_style(
    theme_name: &str,
    overrides: impl Into<StyleOverrides>,
) -> StyleResult<AppliedStyle> {
    let overrides = overrides.into();
    StyleManager::with_global(|manager| manager.set_style(theme_name, &overrides))
}

/// Replace the global palette set. See [`StyleContext::load_palettes`].
pub fn load_project_palettes(source: impl Into<ConfigSource>) -> StyleResult<LoadOutcome> {
    let source = source.into();
    StyleManager::with_global(|manager| manager.context_mut().load_palettes(source))
}

/// Replace the global theme set. See [`StyleContext::load_themes`].
pub fn load_project_themes(source: impl Into<ConfigSource>) -> StyleResult<LoadOutcome> {
    let source = source.into();
    StyleManager::with_global(|manager| manager.context_mut().load_themes(source))
}

/// Colors of palette `name`.
pub fn get_palette(name: &str) -> StyleResult<Vec<String>> {
    StyleManager::with_global(|manager| manager.context().palette_colors(name))
}

pub fn get_theme(name: &str) -> StyleResult<Theme> {
    StyleManager::with_global(|manager| manager.context().get_theme(name).cloned())
}

/// Stable label colors from the global label cache.
pub fn get_mapped_palette(
    labels: impl LabelSet,
    mapping_name: &str,
    palette_name: Option<&str>,
) -> StyleResult<LabelColorMap> {
    StyleManager::with_global(|manager| {
        manager
            .context_mut()
            .get_mapped_palette(labels, mapping_name, palette_name)
    })
}

/// Return palette `name`, writing an SVG swatch to `output` if given.
pub fn display_project_palette(name: &str, output: Option<&Path>) -> StyleResult<Palette> {
    StyleManager::with_global(|manager| manager.context().display_palette(name, output))
}

pub fn palette_names() -> StyleResult<Vec<String>> {
    StyleManager::with_global(|manager| Ok(manager.context().palette_names()))
}

pub fn theme_names() -> StyleResult<Vec<String>> {
    StyleManager::with_global(|manager| Ok(manager.context().theme_names()))
}

pub fn forget_mapping(mapping_name: &str) -> StyleResult<bool> {
    StyleManager::with_global(|manager| Ok(manager.context_mut().forget_mapping(mapping_name)))
}

/// Read access to the global plotting state.
pub fn with_plot_state<F, R>(f: F) -> StyleResult<R>
where
    F: FnOnce(&PlotState) -> R,
{
    StyleManager::with_global(|manager| Ok(f(manager.backend())))
}
