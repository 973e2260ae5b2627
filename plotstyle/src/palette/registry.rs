use crate::error::{StyleError, StyleResult};
use crate::loader::{key_to_string, parse_document, value_kind};
use crate::palette::types::Palette;
use serde_yaml::Mapping;

/// Loaded palettes in document order.
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    palettes: Vec<Palette>,
}

impl PaletteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed palette document.
    ///
    /// Fails on the first palette with an invalid shape; nothing is kept from
    /// a partially valid document.
    pub fn from_mapping(mapping: &Mapping, source_name: &str) -> StyleResult<Self> {
        let palettes = mapping
            .iter()
            .map(|(name, value)| {
                let name = key_to_string(name).ok_or_else(|| StyleError::Parse {
                    source_name: source_name.to_string(),
                    reason: format!("palette name must be a scalar, found {}", value_kind(name)),
                })?;
                Palette::from_value(&name, value, source_name)
            })
            .collect::<StyleResult<Vec<_>>>()?;

        Ok(Self { palettes })
    }

    pub fn from_yaml_str(text: &str, source_name: &str) -> StyleResult<Self> {
        let mapping = parse_document(text, source_name)?;
        Self::from_mapping(&mapping, source_name)
    }

    pub fn get(&self, name: &str) -> StyleResult<&Palette> {
        self.palettes
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| StyleError::not_found("Palette", name, self.names()))
    }

    /// Color sequence of a palette.
    pub fn colors(&self, name: &str) -> StyleResult<Vec<String>> {
        let palette = self.get(name)?;
        Ok(palette.colors().into_iter().map(str::to_string).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.palettes.iter().any(|p| p.name() == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.palettes.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn first(&self) -> Option<&Palette> {
        self.palettes.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.iter()
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}
