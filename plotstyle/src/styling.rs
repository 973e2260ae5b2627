use crate::backend::{Colormap, ParamValue, PlotBackend};
use crate::color::Rgb;
use crate::error::StyleResult;
use crate::palette::PaletteRegistry;
use crate::settings::StyleSettings;
use crate::theme::Theme;

/// Caller-supplied parameters applied on top of a theme.
///
/// Setting the same key twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverrides {
    entries: Vec<(String, ParamValue)>,
}

impl StyleOverrides {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: String, value: ParamValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for StyleOverrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = Self::default();
        for (key, value) in iter {
            overrides.insert(key.into(), value.into());
        }
        overrides
    }
}

impl<K: Into<String>, V: Into<ParamValue>, const N: usize> From<[(K, V); N]> for StyleOverrides {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> From<Vec<(K, V)>> for StyleOverrides {
    fn from(entries: Vec<(K, V)>) -> Self {
        entries.into_iter().collect()
    }
}

/// Summary of what a successful [`apply_style`] wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedStyle {
    pub theme: String,
    pub parameters: Vec<String>,
    pub colormaps: Vec<String>,
    pub color_cycle: Option<String>,
}

/// Theme parameters with the overrides laid on top.
///
/// Theme order is kept; keys only present in the overrides are appended in
/// override order.
pub fn merge_params(theme: &Theme, overrides: &StyleOverrides) -> Vec<(String, ParamValue)> {
    let mut merged: Vec<(String, ParamValue)> = theme
        .params()
        .iter()
        .map(|(key, value)| {
            let value = overrides.get(key).unwrap_or(value);
            (key.clone(), value.clone())
        })
        .collect();

    for (key, value) in overrides.iter() {
        if theme.get(key).is_none() {
            merged.push((key.to_string(), value.clone()));
        }
    }
    merged
}

/// Write a theme, the palette colormaps and the default color cycle into the
/// backend.
///
/// Everything that can fail (unknown keys, mistyped values, unparseable
/// palette colors) is checked before the first write, so an error leaves the
/// backend untouched.
pub fn apply_style<B: PlotBackend + ?Sized>(
    backend: &mut B,
    theme: &Theme,
    overrides: &StyleOverrides,
    palettes: &PaletteRegistry,
    settings: &StyleSettings,
) -> StyleResult<AppliedStyle> {
    let merged = merge_params(theme, overrides);
    for (key, value) in &merged {
        backend.validate_param(key, value)?;
    }

    let cycle = color_cycle(palettes, settings)?;
    let colormaps = build_colormaps(palettes, settings)?;

    let mut parameters = Vec::with_capacity(merged.len());
    for (key, value) in merged {
        backend.set_param(&key, value)?;
        parameters.push(key);
    }

    let cycle_name = cycle.map(|(name, colors)| {
        backend.set_color_cycle(colors);
        name
    });

    let colormap_names: Vec<String> = colormaps.iter().map(|c| c.name().to_string()).collect();
    for colormap in colormaps {
        backend.register_colormap(colormap);
    }

    log::info!(
        "Applied theme '{}' ({} parameters, {} colormaps)",
        theme.name(),
        parameters.len(),
        colormap_names.len()
    );

    Ok(AppliedStyle {
        theme: theme.name().to_string(),
        parameters,
        colormaps: colormap_names,
        color_cycle: cycle_name,
    })
}

fn color_cycle(
    palettes: &PaletteRegistry,
    settings: &StyleSettings,
) -> StyleResult<Option<(String, Vec<Rgb>)>> {
    let preferred = settings.default_palette();
    let palette = match palettes.get(preferred) {
        Ok(palette) => Some(palette),
        Err(_) => palettes.first(),
    };

    match palette {
        Some(palette) => {
            if palette.name() != preferred {
                log::debug!(
                    "Palette '{preferred}' not loaded, using '{}' for the color cycle",
                    palette.name()
                );
            }
            Ok(Some((palette.name().to_string(), palette.rgb_colors()?)))
        }
        None => {
            log::warn!("No palettes loaded, color cycle left unchanged");
            Ok(None)
        }
    }
}

fn build_colormaps(palettes: &PaletteRegistry, settings: &StyleSettings) -> StyleResult<Vec<Colormap>> {
    let prefix = settings.colormap_prefix();
    let mut colormaps = Vec::new();

    for palette in palettes.iter() {
        let colormap = palette.to_colormap(&format!("{prefix}{}", palette.name()))?;
        if settings.register_reversed() {
            let reversed = colormap.reversed(format!("{}_r", colormap.name()));
            colormaps.push(colormap);
            colormaps.push(reversed);
        } else {
            colormaps.push(colormap);
        }
    }
    Ok(colormaps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::PlotState;
    use crate::error::StyleError;
    use claims::*;

    fn theme() -> Theme {
        Theme::new(
            "paper",
            [
                ("font.size", ParamValue::Int(8)),
                ("axes.grid", ParamValue::Bool(true)),
            ],
        )
    }

    fn palettes() -> PaletteRegistry {
        PaletteRegistry::from_yaml_str(
            "default: [red, green, blue]\nheat:\n  stops:\n    - [0.0, black]\n    - [1.0, white]",
            "test",
        )
        .unwrap()
    }

    #[test]
    fn test_overrides_last_value_wins() {
        let overrides = StyleOverrides::none()
            .set("font.size", 9)
            .set("font.size", 11);

        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get("font.size"), Some(&ParamValue::Int(11)));
    }

    #[test]
    fn test_merge_params_order() {
        let overrides = StyleOverrides::from([("lines.linewidth", 2.0), ("font.size", 12.0)]);
        let merged = merge_params(&theme(), &overrides);

        assert_eq!(
            merged,
            vec![
                ("font.size".to_string(), ParamValue::Float(12.0)),
                ("axes.grid".to_string(), ParamValue::Bool(true)),
                ("lines.linewidth".to_string(), ParamValue::Float(2.0)),
            ]
        );
    }

    #[test]
    fn test_apply_style_writes_everything() {
        let mut state = PlotState::new();
        let applied = assert_ok!(apply_style(
            &mut state,
            &theme(),
            &StyleOverrides::none(),
            &palettes(),
            &StyleSettings::default()
        ));

        assert_eq!(state.param("font.size"), Some(&ParamValue::Int(8)));
        assert_eq!(state.param("axes.grid"), Some(&ParamValue::Bool(true)));
        assert_eq!(state.color_cycle().len(), 3);
        assert_eq!(applied.color_cycle.as_deref(), Some("default"));
        assert_eq!(
            applied.colormaps,
            vec!["project_default", "project_default_r", "project_heat", "project_heat_r"]
        );
        assert!(state.colormap("project_heat").is_some_and(|c| !c.is_qualitative()));
        assert!(state.colormap("project_default").is_some_and(Colormap::is_qualitative));
    }

    #[test]
    fn test_unknown_parameter_leaves_state_untouched() {
        let mut state = PlotState::new();
        let before = state.clone();
        let overrides = StyleOverrides::none().set("font.sizee", 3);

        let err = assert_err!(apply_style(
            &mut state,
            &theme(),
            &overrides,
            &palettes(),
            &StyleSettings::default()
        ));

        assert!(matches!(err, StyleError::InvalidParameter { ref key, .. } if key == "font.sizee"));
        assert_eq!(state.params(), before.params());
        assert!(state.colormaps().is_empty());
    }

    #[test]
    fn test_bad_palette_color_leaves_state_untouched() {
        let mut state = PlotState::new();
        let palettes = PaletteRegistry::from_yaml_str("default: [red, notacolor]", "test").unwrap();

        let err = assert_err!(apply_style(
            &mut state,
            &theme(),
            &StyleOverrides::none(),
            &palettes,
            &StyleSettings::default()
        ));

        assert!(matches!(err, StyleError::InvalidColor { .. }));
        assert_eq!(state.param("font.size"), Some(&ParamValue::Float(10.0)));
    }

    #[test]
    fn test_color_cycle_falls_back_to_first_palette() {
        let mut state = PlotState::new();
        let palettes = PaletteRegistry::from_yaml_str("warm: [red, orange]", "test").unwrap();

        let applied = assert_ok!(apply_style(
            &mut state,
            &theme(),
            &StyleOverrides::none(),
            &palettes,
            &StyleSettings::default()
        ));

        assert_eq!(applied.color_cycle.as_deref(), Some("warm"));
        assert_eq!(state.color_cycle(), &[Rgb::new(255, 0, 0), Rgb::new(255, 165, 0)]);
    }

    #[test]
    fn test_no_palettes_keeps_cycle() {
        let mut state = PlotState::new();

        let applied = assert_ok!(apply_style(
            &mut state,
            &theme(),
            &StyleOverrides::none(),
            &PaletteRegistry::new(),
            &StyleSettings::default()
        ));

        assert_none!(applied.color_cycle);
        assert!(state.color_cycle().is_empty());
    }

    #[test]
    fn test_apply_style_is_idempotent() {
        let overrides = StyleOverrides::from(vec![("font.size", 14)]);
        let settings = StyleSettings::default();
        let mut state = PlotState::new();

        assert_ok!(apply_style(&mut state, &theme(), &overrides, &palettes(), &settings));
        let first = state.clone();
        assert_ok!(apply_style(&mut state, &theme(), &overrides, &palettes(), &settings));

        assert_eq!(state.params(), first.params());
        assert_eq!(state.color_cycle(), first.color_cycle());
        assert_eq!(
            state.colormaps().names().collect::<Vec<_>>(),
            first.colormaps().names().collect::<Vec<_>>()
        );
    }
}
