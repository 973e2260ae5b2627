use crate::error::{StyleError, StyleResult};
use crate::loader::{key_to_string, parse_document, value_kind};
use crate::theme::types::Theme;
use serde_yaml::Mapping;

/// Loaded themes in document order.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_mapping(mapping: &Mapping, source_name: &str) -> StyleResult<Self> {
        let themes = mapping
            .iter()
            .map(|(name, value)| {
                let name = key_to_string(name).ok_or_else(|| StyleError::Parse {
                    source_name: source_name.to_string(),
                    reason: format!("theme name must be a scalar, found {}", value_kind(name)),
                })?;
                Theme::from_value(&name, value, source_name)
            })
            .collect::<StyleResult<Vec<_>>>()?;

        Ok(Self { themes })
    }

    pub fn from_yaml_str(text: &str, source_name: &str) -> StyleResult<Self> {
        let mapping = parse_document(text, source_name)?;
        Self::from_mapping(&mapping, source_name)
    }

    pub fn get(&self, name: &str) -> StyleResult<&Theme> {
        self.themes
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| StyleError::not_found("Theme", name, self.names()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.iter().any(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.themes.iter().map(|t| t.name().to_string()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
