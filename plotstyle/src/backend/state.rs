use super::colormap::{Colormap, ColormapRegistry};
use super::params::{KNOWN_PARAMS, ParamValue, param_kind};
use super::PlotBackend;
use crate::color::Rgb;
use crate::error::{StyleError, StyleResult};
use std::collections::BTreeMap;

/// In-process plotting state: parameter table, colormaps and color cycle.
#[derive(Debug, Clone)]
pub struct PlotState {
    params: BTreeMap<String, ParamValue>,
    colormaps: ColormapRegistry,
    color_cycle: Vec<Rgb>,
}

impl PlotState {
    /// State holding the default value of every known parameter.
    pub fn new() -> Self {
        let params = KNOWN_PARAMS
            .iter()
            .map(|(key, _, default)| (key.to_string(), default.to_value()))
            .collect();

        Self {
            params,
            colormaps: ColormapRegistry::new(),
            color_cycle: Vec::new(),
        }
    }

    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    pub fn params(&self) -> &BTreeMap<String, ParamValue> {
        &self.params
    }

    pub fn colormaps(&self) -> &ColormapRegistry {
        &self.colormaps
    }

    pub fn colormap(&self, name: &str) -> Option<&Colormap> {
        self.colormaps.get(name)
    }

    pub fn color_cycle(&self) -> &[Rgb] {
        &self.color_cycle
    }

    /// Restore every parameter to its default; colormaps and cycle are kept.
    pub fn reset_params(&mut self) {
        self.params = Self::new().params;
    }
}

impl Default for PlotState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotBackend for PlotState {
    fn validate_param(&self, key: &str, value: &ParamValue) -> StyleResult<()> {
        let kind = param_kind(key).ok_or_else(|| StyleError::InvalidParameter {
            key: key.to_string(),
            reason: "unknown parameter".to_string(),
        })?;

        if !kind.accepts(value) {
            return Err(StyleError::InvalidParameter {
                key: key.to_string(),
                reason: kind.describe_mismatch(value),
            });
        }
        Ok(())
    }

    fn set_param(&mut self, key: &str, value: ParamValue) -> StyleResult<()> {
        self.validate_param(key, &value)?;
        log::debug!("Setting parameter {key} = {value}");
        self.params.insert(key.to_string(), value);
        Ok(())
    }

    fn register_colormap(&mut self, colormap: Colormap) {
        log::debug!("Registering colormap '{}'", colormap.name());
        self.colormaps.register(colormap);
    }

    fn set_color_cycle(&mut self, colors: Vec<Rgb>) {
        self.color_cycle = colors;
    }
}
