/// Default palette document embedded in the binary
pub const DEFAULT_PALETTES: &str = include_str!("../resources/palettes.yaml");

/// Default theme document embedded in the binary
pub const DEFAULT_THEMES: &str = include_str!("../resources/themes.yaml");

pub const DEFAULT_PALETTES_NAME: &str = "palettes.yaml";
pub const DEFAULT_THEMES_NAME: &str = "themes.yaml";

/// Embedded document registered under `name`.
pub fn bundled(name: &str) -> Option<&'static str> {
    match name {
        DEFAULT_PALETTES_NAME => Some(DEFAULT_PALETTES),
        DEFAULT_THEMES_NAME => Some(DEFAULT_THEMES),
        _ => None,
    }
}
