use thiserror::Error;

/// Errors produced while loading, looking up or applying palettes and themes.
///
/// Fetch failures are the only recoverable category: load calls downgrade them
/// to a warning and keep the previously loaded configuration. Every other
/// variant is surfaced to the caller as-is, because it points at a mistake in
/// the calling code or in a configuration file.
///
/// # Error Categories
///
/// ## Loading Errors
/// - [`Fetch`] - Remote document could not be downloaded
/// - [`Io`] - Local document could not be read
/// - [`Parse`] - Document is not valid YAML or has the wrong shape
///
/// ## Lookup Errors
/// - [`NotFound`] - Unknown palette, theme or label mapping
/// - [`EmptyLabels`] - Nothing to map
///
/// ## Apply-Time Errors
/// - [`InvalidParameter`] - Style parameter unknown to the plotting backend
/// - [`InvalidColor`] - Color string that cannot be interpreted
/// - [`Render`] - Swatch rendering failed
///
/// ## Infrastructure Errors
/// - [`Settings`] - Settings file could not be loaded
/// - [`State`] - Process-wide manager unavailable
///
/// # Examples
///
/// ```no_run
/// use plotstyle::{StyleError, get_palette};
///
/// match get_palette("vibrant") {
///     Ok(colors) => println!("{} colors", colors.len()),
///     Err(StyleError::NotFound { available, .. }) => {
///         eprintln!("Pick one of: {}", available.join(", "));
///     }
///     Err(other) => eprintln!("{other}"),
/// }
/// ```
///
/// [`Fetch`]: StyleError::Fetch
/// [`Io`]: StyleError::Io
/// [`Parse`]: StyleError::Parse
/// [`NotFound`]: StyleError::NotFound
/// [`EmptyLabels`]: StyleError::EmptyLabels
/// [`InvalidParameter`]: StyleError::InvalidParameter
/// [`InvalidColor`]: StyleError::InvalidColor
/// [`Render`]: StyleError::Render
/// [`Settings`]: StyleError::Settings
/// [`State`]: StyleError::State
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    /// Remote configuration could not be fetched.
    ///
    /// Covers connection failures, timeouts, non-2xx responses and unreadable
    /// bodies.
    #[error("Failed to fetch '{url}': {reason}")]
    Fetch { url: String, reason: String },

    /// Local configuration file could not be read.
    #[error("Failed to read '{path}': {reason}")]
    Io { path: String, reason: String },

    /// Configuration document is malformed or has the wrong shape.
    #[error("Failed to parse '{source_name}': {reason}")]
    Parse { source_name: String, reason: String },

    /// Lookup by name failed.
    ///
    /// `available` lists the names that would have succeeded, in registry
    /// order.
    #[error("{kind} '{name}' not found. Available: {}", available.join(", "))]
    NotFound {
        kind: &'static str,
        name: String,
        available: Vec<String>,
    },

    /// A label mapping was requested without any labels.
    #[error("Mapping '{mapping}' needs at least one label")]
    EmptyLabels { mapping: String },

    /// Style parameter rejected by the plotting backend.
    #[error("Invalid style parameter '{key}': {reason}")]
    InvalidParameter { key: String, reason: String },

    /// Color string that is neither a hex code nor a known color name.
    #[error("Invalid color: '{value}'")]
    InvalidColor { value: String },

    /// Palette swatch could not be drawn.
    #[error("Failed to render swatch: {reason}")]
    Render { reason: String },

    /// Settings file could not be loaded or deserialized.
    #[error("Settings error: {reason}")]
    Settings { reason: String },

    /// Process-wide style manager is unavailable.
    #[error("Style manager error: {reason}")]
    State { reason: String },
}

impl StyleError {
    /// Whether load calls may fall back to the previous configuration.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StyleError::Fetch { .. })
    }

    pub(crate) fn not_found<I, S>(kind: &'static str, name: &str, available: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StyleError::NotFound {
            kind,
            name: name.to_string(),
            available: available.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result type alias for style operations
pub type StyleResult<T> = Result<T, StyleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_available_names() {
        let error = StyleError::not_found("Palette", "nonexistent", ["default", "vibrant"]);
        let message = error.to_string();

        assert!(message.contains("Palette 'nonexistent' not found"));
        assert!(message.contains("default, vibrant"));
    }

    #[test]
    fn test_only_fetch_errors_are_recoverable() {
        let fetch = StyleError::Fetch {
            url: "https://example.invalid/palettes.yaml".to_string(),
            reason: "timeout".to_string(),
        };
        let parse = StyleError::Parse {
            source_name: "palettes.yaml".to_string(),
            reason: "bad indent".to_string(),
        };

        assert!(fetch.is_recoverable());
        assert!(!parse.is_recoverable());
    }
}
