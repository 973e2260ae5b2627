//! # Palettes
//!
//! A palette document is a YAML mapping from palette name to definition. The
//! definition's shape decides the palette kind:
//!
//! ```yaml
//! vibrant: ["#ee7733", "#0077bb", "#33bbee"]   # discrete
//! conditions:                                  # named
//!   control: "#7f7f7f"
//!   treated: "#d62728"
//! heat:                                        # continuous
//!   stops:
//!     - [0.0, "#000004"]
//!     - [1.0, "#fcfdbf"]
//! ```
//!
//! Discrete and named palettes become qualitative colormaps; continuous ones
//! become linear gradients.

pub mod registry;
pub mod types;
pub mod validation;

pub use registry::PaletteRegistry;
pub use types::{ColorStop, Palette, PaletteKind};
pub use validation::PaletteValidationError;
