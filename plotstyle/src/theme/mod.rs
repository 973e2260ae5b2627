//! # Themes
//!
//! A theme document maps theme names to plotting parameters. Parameters may
//! be written flat (`font.size: 9`) or nested (`axes: { grid: true }`); both
//! end up as the same dotted name.

pub mod registry;
pub mod types;
pub mod validation;

pub use registry::ThemeRegistry;
pub use types::Theme;
pub use validation::ThemeValidationError;
