use serde_yaml::Value;
use std::fmt;

/// A single style parameter value as stored in the backend's parameter table.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Convert a YAML scalar or a sequence of scalars.
    ///
    /// Mappings, nested sequences, nulls and tagged values have no parameter
    /// representation and yield `None`.
    pub fn from_yaml(value: &Value) -> Option<Self> {
        match value {
            Value::Sequence(items) => items
                .iter()
                .map(Self::scalar_from_yaml)
                .collect::<Option<Vec<_>>>()
                .map(ParamValue::List),
            other => Self::scalar_from_yaml(other),
        }
    }

    fn scalar_from_yaml(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(ParamValue::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(ParamValue::Int)
                .or_else(|| n.as_f64().map(ParamValue::Float)),
            Value::String(s) => Some(ParamValue::Text(s.clone())),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, ParamValue::Int(_) | ParamValue::Float(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(i) => Some(*i as f64),
            ParamValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "boolean",
            ParamValue::Int(_) => "integer",
            ParamValue::Float(_) => "float",
            ParamValue::Text(_) => "string",
            ParamValue::List(_) => "list",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Text(s) => write!(f, "{s}"),
            ParamValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Value shapes a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    Number,
    Text,
    /// Number or keyword, e.g. `12` or `"large"` for font sizes.
    NumberOrText,
    NumberList,
    TextList,
}

impl ParamKind {
    pub fn accepts(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (ParamKind::Bool, ParamValue::Bool(_)) => true,
            (ParamKind::Number, v) => v.is_number(),
            (ParamKind::Text, ParamValue::Text(_)) => true,
            (ParamKind::NumberOrText, v) => v.is_number() || v.as_str().is_some(),
            (ParamKind::NumberList, ParamValue::List(items)) => {
                items.iter().all(ParamValue::is_number)
            }
            (ParamKind::TextList, ParamValue::List(items)) => {
                items.iter().all(|i| i.as_str().is_some())
            }
            // A single family name stands for a one-element list
            (ParamKind::TextList, ParamValue::Text(_)) => true,
            _ => false,
        }
    }

    pub fn describe_mismatch(&self, value: &ParamValue) -> String {
        let expected = match self {
            ParamKind::Bool => "a boolean",
            ParamKind::Number => "a number",
            ParamKind::Text => "a string",
            ParamKind::NumberOrText => "a number or a size keyword",
            ParamKind::NumberList => "a list of numbers",
            ParamKind::TextList => "a string or a list of strings",
        };
        format!("expected {expected}, got {} '{value}'", value.kind_name())
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum ParamDefault {
    Bool(bool),
    Number(f64),
    Text(&'static str),
    Numbers(&'static [f64]),
    Texts(&'static [&'static str]),
}

impl ParamDefault {
    pub(crate) fn to_value(self) -> ParamValue {
        match self {
            ParamDefault::Bool(b) => ParamValue::Bool(b),
            ParamDefault::Number(n) => ParamValue::Float(n),
            ParamDefault::Text(s) => ParamValue::Text(s.to_string()),
            ParamDefault::Numbers(ns) => {
                ParamValue::List(ns.iter().map(|n| ParamValue::Float(*n)).collect())
            }
            ParamDefault::Texts(ts) => {
                ParamValue::List(ts.iter().map(|t| ParamValue::Text(t.to_string())).collect())
            }
        }
    }
}

/// Every parameter the backend knows, with its accepted shape and default.
pub(crate) const KNOWN_PARAMS: &[(&str, ParamKind, ParamDefault)] = &[
    // === Figure ===
    ("figure.figsize", ParamKind::NumberList, ParamDefault::Numbers(&[6.4, 4.8])),
    ("figure.dpi", ParamKind::Number, ParamDefault::Number(100.0)),
    ("figure.facecolor", ParamKind::Text, ParamDefault::Text("white")),
    ("figure.edgecolor", ParamKind::Text, ParamDefault::Text("white")),
    ("figure.autolayout", ParamKind::Bool, ParamDefault::Bool(false)),
    ("figure.titlesize", ParamKind::NumberOrText, ParamDefault::Text("large")),
    // === Font and text ===
    ("font.family", ParamKind::TextList, ParamDefault::Texts(&["sans-serif"])),
    ("font.sans-serif", ParamKind::TextList, ParamDefault::Texts(&["DejaVu Sans"])),
    ("font.serif", ParamKind::TextList, ParamDefault::Texts(&["DejaVu Serif"])),
    ("font.size", ParamKind::Number, ParamDefault::Number(10.0)),
    ("font.weight", ParamKind::NumberOrText, ParamDefault::Text("normal")),
    ("text.color", ParamKind::Text, ParamDefault::Text("black")),
    ("text.usetex", ParamKind::Bool, ParamDefault::Bool(false)),
    // === Axes ===
    ("axes.facecolor", ParamKind::Text, ParamDefault::Text("white")),
    ("axes.edgecolor", ParamKind::Text, ParamDefault::Text("black")),
    ("axes.linewidth", ParamKind::Number, ParamDefault::Number(0.8)),
    ("axes.grid", ParamKind::Bool, ParamDefault::Bool(false)),
    ("axes.axisbelow", ParamKind::Text, ParamDefault::Text("line")),
    ("axes.titlesize", ParamKind::NumberOrText, ParamDefault::Text("large")),
    ("axes.titleweight", ParamKind::NumberOrText, ParamDefault::Text("normal")),
    ("axes.labelsize", ParamKind::NumberOrText, ParamDefault::Text("medium")),
    ("axes.labelweight", ParamKind::NumberOrText, ParamDefault::Text("normal")),
    ("axes.labelcolor", ParamKind::Text, ParamDefault::Text("black")),
    ("axes.spines.top", ParamKind::Bool, ParamDefault::Bool(true)),
    ("axes.spines.right", ParamKind::Bool, ParamDefault::Bool(true)),
    ("axes.spines.bottom", ParamKind::Bool, ParamDefault::Bool(true)),
    ("axes.spines.left", ParamKind::Bool, ParamDefault::Bool(true)),
    // === Grid ===
    ("grid.color", ParamKind::Text, ParamDefault::Text("#b0b0b0")),
    ("grid.linestyle", ParamKind::Text, ParamDefault::Text("-")),
    ("grid.linewidth", ParamKind::Number, ParamDefault::Number(0.8)),
    ("grid.alpha", ParamKind::Number, ParamDefault::Number(1.0)),
    // === Lines ===
    ("lines.linewidth", ParamKind::Number, ParamDefault::Number(1.5)),
    ("lines.linestyle", ParamKind::Text, ParamDefault::Text("-")),
    ("lines.markersize", ParamKind::Number, ParamDefault::Number(6.0)),
    // === Legend ===
    ("legend.frameon", ParamKind::Bool, ParamDefault::Bool(true)),
    ("legend.fontsize", ParamKind::NumberOrText, ParamDefault::Text("medium")),
    ("legend.loc", ParamKind::Text, ParamDefault::Text("best")),
    // === Ticks ===
    ("xtick.labelsize", ParamKind::NumberOrText, ParamDefault::Text("medium")),
    ("ytick.labelsize", ParamKind::NumberOrText, ParamDefault::Text("medium")),
    ("xtick.color", ParamKind::Text, ParamDefault::Text("black")),
    ("ytick.color", ParamKind::Text, ParamDefault::Text("black")),
    ("xtick.direction", ParamKind::Text, ParamDefault::Text("out")),
    ("ytick.direction", ParamKind::Text, ParamDefault::Text("out")),
    // === Images ===
    ("image.cmap", ParamKind::Text, ParamDefault::Text("viridis")),
    // === Output ===
    ("savefig.dpi", ParamKind::NumberOrText, ParamDefault::Text("figure")),
    ("savefig.format", ParamKind::Text, ParamDefault::Text("png")),
    ("savefig.bbox", ParamKind::Text, ParamDefault::Text("standard")),
    ("savefig.facecolor", ParamKind::Text, ParamDefault::Text("auto")),
    ("savefig.transparent", ParamKind::Bool, ParamDefault::Bool(false)),
    ("pdf.fonttype", ParamKind::Number, ParamDefault::Number(3.0)),
    ("ps.fonttype", ParamKind::Number, ParamDefault::Number(3.0)),
    ("svg.fonttype", ParamKind::Text, ParamDefault::Text("path")),
];

/// Accepted shape of a known parameter, `None` for unknown keys.
pub fn param_kind(key: &str) -> Option<ParamKind> {
    KNOWN_PARAMS
        .iter()
        .find(|(name, _, _)| *name == key)
        .map(|(_, kind, _)| *kind)
}
