//! # Plotting Backend Interface
//!
//! The style layer never draws plots. It talks to the plotting library through
//! [`PlotBackend`], which exposes the three pieces of global state a theme can
//! touch:
//!
//! - the **parameter table** (string keys to scalar/list values),
//! - the **colormap registry** (named continuous or qualitative scales),
//! - the **default color cycle** used for successive series.
//!
//! [`PlotState`] is the in-process implementation. It carries a fixed schema
//! of known parameter keys, so misspelled or mistyped theme entries are
//! rejected when a style is applied.

pub mod colormap;
pub mod params;
pub mod state;

pub use colormap::{Colormap, ColormapKind, ColormapRegistry};
pub use params::{ParamKind, ParamValue, param_kind};
pub use state::PlotState;

use crate::color::Rgb;
use crate::error::StyleResult;

/// Global styling state of a plotting library.
pub trait PlotBackend {
    /// Check a parameter without writing it.
    fn validate_param(&self, key: &str, value: &ParamValue) -> StyleResult<()>;

    /// Write one parameter into the global table.
    fn set_param(&mut self, key: &str, value: ParamValue) -> StyleResult<()>;

    /// Register (or replace) a named colormap.
    fn register_colormap(&mut self, colormap: Colormap);

    /// Replace the default color cycle.
    fn set_color_cycle(&mut self, colors: Vec<Rgb>);
}
