use crate::backend::{PlotBackend, PlotState};
use crate::defaults::{DEFAULT_PALETTES, DEFAULT_PALETTES_NAME, DEFAULT_THEMES, DEFAULT_THEMES_NAME};
use crate::error::{StyleError, StyleResult};
use crate::loader::{ConfigLoader, ConfigSource};
use crate::mapping::{LabelColorMap, LabelMapper, LabelSet};
use crate::palette::{Palette, PaletteRegistry};
use crate::settings::StyleSettings;
use crate::styling::{AppliedStyle, StyleOverrides, apply_style};
use crate::swatch::render_swatch;
use crate::theme::{Theme, ThemeRegistry};
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

static GLOBAL_STYLE_MANAGER: OnceCell<Mutex<StyleManager>> = OnceCell::new();

/// Result of a palette or theme load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The registry was replaced with `count` entries.
    Loaded { count: usize },
    /// The source could not be fetched; the last good set stays, or the
    /// bundled set if nothing was loaded before.
    KeptPrevious { reason: String },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Palettes, themes and label mappings for one plotting session.
#[derive(Debug, Clone)]
pub struct StyleContext {
    settings: StyleSettings,
    loader: ConfigLoader,
    palettes: PaletteRegistry,
    themes: ThemeRegistry,
    mapper: LabelMapper,
}

impl StyleContext {
    /// Context holding the bundled palettes and themes.
    pub fn new(settings: StyleSettings) -> Self {
        let mut context = Self::empty(settings);

        if let Err(e) = context.load_palettes(ConfigSource::Bundled(DEFAULT_PALETTES_NAME)) {
            log::error!("Bundled palettes could not be loaded: {e}");
        }
        if let Err(e) = context.load_themes(ConfigSource::Bundled(DEFAULT_THEMES_NAME)) {
            log::error!("Bundled themes could not be loaded: {e}");
        }

        context
    }

    /// Context with no palettes or themes loaded.
    pub fn empty(settings: StyleSettings) -> Self {
        Self {
            loader: ConfigLoader::new(settings.fetch_timeout()),
            settings,
            palettes: PaletteRegistry::new(),
            themes: ThemeRegistry::new(),
            mapper: LabelMapper::new(),
        }
    }

    pub fn settings(&self) -> &StyleSettings {
        &self.settings
    }

    pub fn palettes(&self) -> &PaletteRegistry {
        &self.palettes
    }

    pub fn themes(&self) -> &ThemeRegistry {
        &self.themes
    }

    /// Replace the palette set with the document at `source`.
    ///
    /// A fetch failure keeps the current palettes, or loads the bundled ones
    /// when none are loaded yet, and is only logged. Read, parse and shape
    /// errors are returned and also keep the current set.
    pub fn load_palettes(&mut self, source: impl Into<ConfigSource>) -> StyleResult<LoadOutcome> {
        let source = source.into();
        let Some(mapping) = self.fetch(&source, "palettes")? else {
            if self.palettes.is_empty() {
                self.palettes =
                    PaletteRegistry::from_yaml_str(DEFAULT_PALETTES, DEFAULT_PALETTES_NAME)?;
                log::warn!("No palettes loaded yet, using the bundled palettes");
            }
            return Ok(LoadOutcome::KeptPrevious {
                reason: format!("could not fetch {source}"),
            });
        };

        self.palettes = PaletteRegistry::from_mapping(&mapping, &source.to_string())?;
        log::info!("Loaded {} palettes from {source}", self.palettes.len());
        Ok(LoadOutcome::Loaded {
            count: self.palettes.len(),
        })
    }

    /// Replace the theme set with the document at `source`.
    pub fn load_themes(&mut self, source: impl Into<ConfigSource>) -> StyleResult<LoadOutcome> {
        let source = source.into();
        let Some(mapping) = self.fetch(&source, "themes")? else {
            if self.themes.is_empty() {
                self.themes = ThemeRegistry::from_yaml_str(DEFAULT_THEMES, DEFAULT_THEMES_NAME)?;
                log::warn!("No themes loaded yet, using the bundled themes");
            }
            return Ok(LoadOutcome::KeptPrevious {
                reason: format!("could not fetch {source}"),
            });
        };

        self.themes = ThemeRegistry::from_mapping(&mapping, &source.to_string())?;
        log::info!("Loaded {} themes from {source}", self.themes.len());
        Ok(LoadOutcome::Loaded {
            count: self.themes.len(),
        })
    }

    fn fetch(&self, source: &ConfigSource, what: &str) -> StyleResult<Option<serde_yaml::Mapping>> {
        match self.loader.load(source) {
            Ok(mapping) => Ok(Some(mapping)),
            Err(e) if e.is_recoverable() => {
                log::warn!("{e}; keeping previously loaded {what}");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn get_palette(&self, name: &str) -> StyleResult<&Palette> {
        self.palettes.get(name)
    }

    /// Colors of palette `name` in palette order.
    pub fn palette_colors(&self, name: &str) -> StyleResult<Vec<String>> {
        self.palettes.colors(name)
    }

    pub fn get_theme(&self, name: &str) -> StyleResult<&Theme> {
        self.themes.get(name)
    }

    pub fn palette_names(&self) -> Vec<String> {
        self.palettes.names()
    }

    pub fn theme_names(&self) -> Vec<String> {
        self.themes.names()
    }

    /// Apply theme `theme_name` with `overrides` to `backend`.
    pub fn set_style<B: PlotBackend + ?Sized>(
        &self,
        backend: &mut B,
        theme_name: &str,
        overrides: &StyleOverrides,
    ) -> StyleResult<AppliedStyle> {
        let theme = self.themes.get(theme_name)?;
        apply_style(backend, theme, overrides, &self.palettes, &self.settings)
    }

    /// Stable colors for `labels` under `mapping_name`.
    ///
    /// Without a palette name the configured default palette is used.
    pub fn get_mapped_palette(
        &mut self,
        labels: impl LabelSet,
        mapping_name: &str,
        palette_name: Option<&str>,
    ) -> StyleResult<LabelColorMap> {
        let palette_name = palette_name.unwrap_or(self.settings.default_palette());
        let palette = self.palettes.get(palette_name)?;
        self.mapper
            .map(labels, mapping_name, palette, self.settings.unseen_color())
    }

    pub fn forget_mapping(&mut self, mapping_name: &str) -> bool {
        self.mapper.forget(mapping_name)
    }

    /// Look up palette `name` and, when `output` is given, write its swatch.
    pub fn display_palette(&self, name: &str, output: Option<&Path>) -> StyleResult<Palette> {
        let palette = self.palettes.get(name)?;
        if let Some(output) = output {
            render_swatch(palette, output)?;
        }
        Ok(palette.clone())
    }
}

impl Default for StyleContext {
    fn default() -> Self {
        Self::new(StyleSettings::default())
    }
}

/// Process-wide style state: a [`StyleContext`] and the plotting state it
/// styles.
///
/// The manager is meant for single-threaded scripts; the mutex only makes the
/// static possible.
#[derive(Debug)]
pub struct StyleManager {
    context: StyleContext,
    backend: PlotState,
}

impl StyleManager {
    pub fn new(settings: StyleSettings) -> Self {
        Self {
            context: StyleContext::new(settings),
            backend: PlotState::new(),
        }
    }

    /// Initialize the global manager with explicit settings.
    ///
    /// Must run before anything touches the global manager.
    pub fn init_global(settings: StyleSettings) -> StyleResult<()> {
        GLOBAL_STYLE_MANAGER
            .set(Mutex::new(Self::new(settings)))
            .map_err(|_| StyleError::State {
                reason: "style manager already initialized".to_string(),
            })?;

        log::info!("Global style manager initialized");
        Ok(())
    }

    /// The global manager, created from discovered settings on first use.
    pub fn global() -> &'static Mutex<StyleManager> {
        GLOBAL_STYLE_MANAGER.get_or_init(|| {
            let settings = StyleSettings::discover().unwrap_or_else(|e| {
                log::warn!("{e}; using default settings");
                StyleSettings::default()
            });
            Mutex::new(Self::new(settings))
        })
    }

    fn lock_global() -> StyleResult<MutexGuard<'static, StyleManager>> {
        Self::global().lock().map_err(|_| StyleError::State {
            reason: "style manager lock poisoned".to_string(),
        })
    }

    /// Run `f` with exclusive access to the global manager.
    pub fn with_global<F, R>(f: F) -> StyleResult<R>
    where
        F: FnOnce(&mut StyleManager) -> StyleResult<R>,
    {
        let mut manager = Self::lock_global()?;
        f(&mut manager)
    }

    pub fn context(&self) -> &StyleContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut StyleContext {
        &mut self.context
    }

    pub fn backend(&self) -> &PlotState {
        &self.backend
    }

    pub fn set_style(&mut self, theme_name: &str, overrides: &StyleOverrides) -> StyleResult<AppliedStyle> {
        self.context.set_style(&mut self.backend, theme_name, overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ParamValue;
    use claims::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_new_context_has_bundled_defaults() {
        let context = StyleContext::default();

        assert!(context.palette_names().contains(&"default".to_string()));
        assert!(context.theme_names().contains(&"paper".to_string()));
    }

    #[test]
    fn test_load_palettes_from_file() {
        let mut context = StyleContext::default();
        let file = yaml_file("vibrant: [red, green, blue]\n");

        let outcome = assert_ok!(context.load_palettes(file.path()));

        assert_eq!(outcome, LoadOutcome::Loaded { count: 1 });
        assert_eq!(
            assert_ok!(context.palette_colors("vibrant")),
            vec!["red", "green", "blue"]
        );
        assert!(context.get_palette("default").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut context = StyleContext::default();

        let err = assert_err!(context.load_themes("/definitely/not/here/themes.yaml"));
        assert!(matches!(err, StyleError::Io { .. }));
        assert!(context.themes().contains("paper"));
    }

    #[test]
    fn test_parse_error_keeps_previous_registry() {
        let mut context = StyleContext::default();
        let file = yaml_file("vibrant: [red, green\n");

        assert!(matches!(
            context.load_palettes(file.path()),
            Err(StyleError::Parse { .. })
        ));
        assert!(context.palettes().contains("default"));
    }

    #[test]
    fn test_unreachable_url_keeps_previous_themes() {
        let settings = StyleSettings::default().with_fetch_timeout(std::time::Duration::from_secs(2));
        let mut context = StyleContext::new(settings);
        let before = context.theme_names();

        let outcome = assert_ok!(context.load_themes("http://127.0.0.1:1/themes.yaml"));

        assert!(!outcome.is_loaded());
        assert_eq!(context.theme_names(), before);
    }

    #[test]
    fn test_unreachable_url_on_empty_context_uses_bundled() {
        let settings = StyleSettings::default().with_fetch_timeout(std::time::Duration::from_secs(2));
        let mut context = StyleContext::empty(settings);

        let outcome = assert_ok!(context.load_palettes("http://127.0.0.1:1/palettes.yaml"));
        assert!(matches!(outcome, LoadOutcome::KeptPrevious { .. }));
        assert_eq!(context.palette_names(), StyleContext::default().palette_names());

        assert_ok!(context.load_themes("http://127.0.0.1:1/themes.yaml"));
        assert!(context.themes().contains("paper"));
    }

    #[test]
    fn test_set_style_on_explicit_backend() {
        let context = StyleContext::default();
        let mut state = PlotState::new();
        let overrides = StyleOverrides::none().set("font.size", 20);

        assert_ok!(context.set_style(&mut state, "paper", &overrides));

        assert_eq!(state.param("font.size"), Some(&ParamValue::Int(20)));
        assert_eq!(state.param("font.family"), Some(&ParamValue::Text("serif".to_string())));
        assert!(state.colormap("project_heat_r").is_some());
    }

    #[test]
    fn test_set_unknown_theme() {
        let context = StyleContext::default();
        let mut state = PlotState::new();

        let err = assert_err!(context.set_style(&mut state, "poster", &StyleOverrides::none()));
        assert!(matches!(err, StyleError::NotFound { kind: "Theme", .. }));
    }

    #[test]
    fn test_mapped_palette_uses_default_palette() {
        let mut context = StyleContext::default();
        let default_colors = assert_ok!(context.palette_colors("default"));

        let map = assert_ok!(context.get_mapped_palette(["x", "y"], "groups", None));

        assert_eq!(map.get("x"), Some(default_colors[0].as_str()));
        assert_eq!(map.get("y"), Some(default_colors[1].as_str()));
    }

    #[test]
    fn test_mapped_palette_unknown_palette() {
        let mut context = StyleContext::default();

        assert!(matches!(
            context.get_mapped_palette(["x"], "groups", Some("nope")),
            Err(StyleError::NotFound { kind: "Palette", .. })
        ));
    }

    #[test]
    fn test_display_palette_without_output() {
        let context = StyleContext::default();

        let palette = assert_ok!(context.display_palette("conditions", None));
        assert_eq!(palette.color_for_label("treated"), Some("#d62728"));
    }

    #[test]
    fn test_custom_settings_flow_through() {
        let settings = StyleSettings::default()
            .with_default_palette("vibrant")
            .with_unseen_color("#000000")
            .with_colormap_prefix("lab_");
        let mut context = StyleContext::new(settings);
        let mut state = PlotState::new();

        let applied = assert_ok!(context.set_style(&mut state, "default", &StyleOverrides::none()));
        assert_eq!(applied.color_cycle.as_deref(), Some("vibrant"));
        assert!(state.colormap("lab_vibrant").is_some());
        assert!(state.colormap("project_vibrant").is_none());

        let map = assert_ok!(context.get_mapped_palette(["a"], "m", None));
        assert_eq!(map.get("a"), Some("#ee7733"));

        let named = assert_ok!(context.get_mapped_palette(["other"], "n", Some("conditions")));
        assert_eq!(named.get("other"), Some("#000000"));
    }
}
