use crate::backend::ParamValue;
use crate::error::{StyleError, StyleResult};
use crate::loader::{key_to_string, value_kind};
use crate::theme::validation::ParamKeyValidator;
use crate::validation::Validator;
use serde_yaml::{Mapping, Value};

/// Named set of plotting parameters, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    name: String,
    params: Vec<(String, ParamValue)>,
}

impl Theme {
    pub fn new<K: Into<String>>(
        name: &str,
        params: impl IntoIterator<Item = (K, ParamValue)>,
    ) -> Self {
        let mut theme = Self {
            name: name.to_string(),
            params: Vec::new(),
        };
        for (key, value) in params {
            theme.upsert(key.into(), value);
        }
        theme
    }

    /// Build a theme from its YAML mapping.
    ///
    /// Nested mappings are flattened into dotted names; a later entry for the
    /// same flattened name replaces the earlier one.
    pub fn from_value(name: &str, value: &Value, source_name: &str) -> StyleResult<Self> {
        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(StyleError::Parse {
                    source_name: source_name.to_string(),
                    reason: format!(
                        "theme '{name}': expected a mapping, found {}",
                        value_kind(other)
                    ),
                });
            }
        };

        let mut theme = Self {
            name: name.to_string(),
            params: Vec::new(),
        };
        theme.flatten_into("", mapping, source_name)?;
        Ok(theme)
    }

    fn flatten_into(&mut self, prefix: &str, mapping: &Mapping, source_name: &str) -> StyleResult<()> {
        let shape_error = |reason: String| StyleError::Parse {
            source_name: source_name.to_string(),
            reason: format!("theme '{}': {reason}", self.name),
        };

        let mut entries = Vec::new();
        for (key, value) in mapping {
            let key = key_to_string(key).ok_or_else(|| {
                shape_error(format!("parameter name must be a scalar, found {}", value_kind(key)))
            })?;
            let full_key = if prefix.is_empty() {
                key
            } else {
                format!("{prefix}.{key}")
            };
            ParamKeyValidator
                .validate(&full_key)
                .map_err(|e| shape_error(e.to_string()))?;
            entries.push((full_key, value));
        }

        for (full_key, value) in entries {
            match value {
                Value::Mapping(inner) => self.flatten_into(&full_key, inner, source_name)?,
                other => {
                    let param = ParamValue::from_yaml(other).ok_or_else(|| StyleError::Parse {
                        source_name: source_name.to_string(),
                        reason: format!(
                            "theme '{}': '{full_key}' must be a scalar or a list of scalars, found {}",
                            self.name,
                            value_kind(other)
                        ),
                    })?;
                    self.upsert(full_key, param);
                }
            }
        }
        Ok(())
    }

    fn upsert(&mut self, key: String, value: ParamValue) {
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[(String, ParamValue)] {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
