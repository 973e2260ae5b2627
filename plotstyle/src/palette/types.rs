use crate::backend::Colormap;
use crate::color::{Rgb, parse_colors};
use crate::error::{StyleError, StyleResult};
use crate::loader::{key_to_string, value_kind};
use crate::palette::validation::{PaletteValidationError, PaletteValidator};
use crate::validation::Validator;
use serde_yaml::Value;

/// Key that marks a mapping as a continuous palette.
pub const STOPS_KEY: &str = "stops";

#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    pub position: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaletteKind {
    /// Ordered list of colors.
    Discrete(Vec<String>),
    /// Ordered label to color assignments.
    Named(Vec<(String, String)>),
    /// Gradient stops sorted by position in `[0, 1]`.
    Continuous(Vec<ColorStop>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    kind: PaletteKind,
}

impl Palette {
    pub fn new(name: &str, kind: PaletteKind) -> Result<Self, PaletteValidationError> {
        let palette = Self {
            name: name.to_string(),
            kind,
        };
        PaletteValidator.validate(&palette)?;
        Ok(palette)
    }

    pub fn discrete<S: Into<String>>(
        name: &str,
        colors: impl IntoIterator<Item = S>,
    ) -> Result<Self, PaletteValidationError> {
        Self::new(
            name,
            PaletteKind::Discrete(colors.into_iter().map(Into::into).collect()),
        )
    }

    /// Build a palette from its YAML definition.
    ///
    /// - sequence: discrete palette
    /// - mapping with only a `stops` sequence: continuous palette
    /// - any other mapping: named palette
    pub fn from_value(name: &str, value: &Value, source_name: &str) -> StyleResult<Self> {
        let shape_error = |reason: String| StyleError::Parse {
            source_name: source_name.to_string(),
            reason: format!("palette '{name}': {reason}"),
        };

        let kind = match value {
            Value::Sequence(items) => PaletteKind::Discrete(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        color_string(item).ok_or_else(|| {
                            shape_error(format!(
                                "color #{i} must be a string, found {}",
                                value_kind(item)
                            ))
                        })
                    })
                    .collect::<StyleResult<Vec<_>>>()?,
            ),
            Value::Mapping(mapping) if is_continuous(mapping) => {
                let stops = match mapping.get(STOPS_KEY) {
                    Some(Value::Sequence(stops)) => stops,
                    _ => return Err(shape_error("'stops' must be a sequence".to_string())),
                };
                PaletteKind::Continuous(
                    stops
                        .iter()
                        .enumerate()
                        .map(|(i, stop)| {
                            parse_stop(stop).ok_or_else(|| {
                                shape_error(format!(
                                    "stop #{i} must be a [position, color] pair"
                                ))
                            })
                        })
                        .collect::<StyleResult<Vec<_>>>()?,
                )
            }
            Value::Mapping(mapping) => PaletteKind::Named(
                mapping
                    .iter()
                    .map(|(label, color)| -> StyleResult<(String, String)> {
                        let label = key_to_string(label).ok_or_else(|| {
                            shape_error(format!("label must be a scalar, found {}", value_kind(label)))
                        })?;
                        let color = color_string(color).ok_or_else(|| {
                            shape_error(format!(
                                "color of '{label}' must be a string, found {}",
                                value_kind(color)
                            ))
                        })?;
                        Ok((label, color))
                    })
                    .collect::<StyleResult<Vec<_>>>()?,
            ),
            other => {
                return Err(shape_error(format!(
                    "expected a sequence or a mapping, found {}",
                    value_kind(other)
                )));
            }
        };

        Self::new(name, kind).map_err(|e| shape_error(e.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &PaletteKind {
        &self.kind
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self.kind, PaletteKind::Continuous(_))
    }

    /// Colors in palette order; continuous palettes yield their stop colors.
    pub fn colors(&self) -> Vec<&str> {
        match &self.kind {
            PaletteKind::Discrete(colors) => colors.iter().map(String::as_str).collect(),
            PaletteKind::Named(entries) => entries.iter().map(|(_, c)| c.as_str()).collect(),
            PaletteKind::Continuous(stops) => stops.iter().map(|s| s.color.as_str()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match &self.kind {
            PaletteKind::Discrete(colors) => colors.len(),
            PaletteKind::Named(entries) => entries.len(),
            PaletteKind::Continuous(stops) => stops.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Color assigned to `label` by a named palette.
    pub fn color_for_label(&self, label: &str) -> Option<&str> {
        match &self.kind {
            PaletteKind::Named(entries) => entries
                .iter()
                .find(|(l, _)| l == label)
                .map(|(_, c)| c.as_str()),
            _ => None,
        }
    }

    /// Parsed colors in palette order.
    pub fn rgb_colors(&self) -> StyleResult<Vec<Rgb>> {
        parse_colors(&self.colors())
    }

    /// Colormap for this palette: linear for continuous palettes, listed
    /// (qualitative) otherwise.
    pub fn to_colormap(&self, colormap_name: &str) -> StyleResult<Colormap> {
        match &self.kind {
            PaletteKind::Continuous(stops) => {
                let stops = stops
                    .iter()
                    .map(|stop| Ok((stop.position, Rgb::parse(&stop.color)?)))
                    .collect::<StyleResult<Vec<_>>>()?;
                Ok(Colormap::linear(colormap_name, stops))
            }
            _ => Ok(Colormap::listed(colormap_name, self.rgb_colors()?)),
        }
    }
}

fn is_continuous(mapping: &serde_yaml::Mapping) -> bool {
    mapping.len() == 1 && matches!(mapping.get(STOPS_KEY), Some(Value::Sequence(_)))
}

fn color_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        // Grey levels may be written unquoted
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_stop(value: &Value) -> Option<ColorStop> {
    match value {
        Value::Sequence(pair) if pair.len() == 2 => Some(ColorStop {
            position: pair[0].as_f64()?,
            color: color_string(&pair[1])?,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_discrete_from_sequence() {
        let palette = assert_ok!(Palette::from_value("vibrant", &yaml("[red, green, blue]"), "t"));

        assert_eq!(palette.colors(), vec!["red", "green", "blue"]);
        assert!(!palette.is_continuous());
    }

    #[test]
    fn test_named_from_mapping_keeps_order() {
        let palette = assert_ok!(Palette::from_value(
            "conditions",
            &yaml("treated: '#d62728'\ncontrol: '#7f7f7f'\n1: blue"),
            "t"
        ));

        assert_eq!(palette.colors(), vec!["#d62728", "#7f7f7f", "blue"]);
        assert_eq!(palette.color_for_label("control"), Some("#7f7f7f"));
        assert_eq!(palette.color_for_label("1"), Some("blue"));
        assert_none!(palette.color_for_label("unknown"));
    }

    #[test]
    fn test_continuous_from_stops() {
        let palette = assert_ok!(Palette::from_value(
            "heat",
            &yaml("stops:\n  - [0.0, black]\n  - [1, white]"),
            "t"
        ));

        assert!(palette.is_continuous());
        assert_eq!(palette.colors(), vec!["black", "white"]);

        let cmap = assert_ok!(palette.to_colormap("project_heat"));
        assert!(!cmap.is_qualitative());
        assert_eq!(cmap.sample(1.0), Some(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn test_single_stops_label_is_named() {
        let palette = assert_ok!(Palette::from_value("signals", &yaml("stops: '#ffffff'"), "t"));

        assert!(!palette.is_continuous());
        assert_eq!(palette.color_for_label("stops"), Some("#ffffff"));
    }

    #[test]
    fn test_shape_errors() {
        assert_err!(Palette::from_value("p", &yaml("[]"), "t"));
        assert_err!(Palette::from_value("p", &yaml("[[red]]"), "t"));
        assert_err!(Palette::from_value("p", &yaml("just-a-string"), "t"));
        assert_err!(Palette::from_value("p", &yaml("stops: [[0.5, red]]"), "t"));
        assert_err!(Palette::from_value("p", &yaml("stops: [[1.0, red], [0.0, blue]]"), "t"));
        assert_err!(Palette::from_value("p", &yaml("stops: [[0.0, red], [1.5, blue]]"), "t"));
        assert_err!(Palette::from_value("p", &yaml("stops: [red, blue]"), "t"));
    }

    #[test]
    fn test_invalid_color_surfaces_at_colormap_time() {
        let palette = assert_ok!(Palette::from_value("p", &yaml("[red, nope]"), "t"));
        let result = palette.to_colormap("project_p");

        assert!(matches!(result, Err(StyleError::InvalidColor { ref value }) if value == "nope"));
    }
}
