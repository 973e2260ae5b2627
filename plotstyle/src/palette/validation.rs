use crate::palette::types::{Palette, PaletteKind};
use crate::validation::Validator;

/// Shape violations in a palette definition
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaletteValidationError {
    #[error("palette has no colors")]
    Empty,
    #[error("continuous palette needs at least 2 stops, found {found}")]
    TooFewStops { found: usize },
    #[error("stop #{index} position {position} is outside [0, 1]")]
    StopOutOfRange { index: usize, position: f64 },
    #[error("stop #{index} position {position} is lower than the previous stop {previous}")]
    StopsNotSorted {
        index: usize,
        position: f64,
        previous: f64,
    },
    #[error("label #{index} is empty")]
    EmptyLabel { index: usize },
}

/// Validator for palette shape invariants.
///
/// Color strings are not checked here; they are parsed when the palette is
/// turned into a colormap or rendered.
pub struct PaletteValidator;

impl Validator<Palette> for PaletteValidator {
    type Error = PaletteValidationError;

    fn validate(&self, input: &Palette) -> Result<(), Self::Error> {
        match input.kind() {
            PaletteKind::Discrete(colors) => {
                if colors.is_empty() {
                    return Err(PaletteValidationError::Empty);
                }
            }
            PaletteKind::Named(entries) => {
                if entries.is_empty() {
                    return Err(PaletteValidationError::Empty);
                }
                if let Some(index) = entries.iter().position(|(label, _)| label.is_empty()) {
                    return Err(PaletteValidationError::EmptyLabel { index });
                }
            }
            PaletteKind::Continuous(stops) => {
                if stops.len() < 2 {
                    return Err(PaletteValidationError::TooFewStops { found: stops.len() });
                }

                let mut previous = 0.0;
                for (index, stop) in stops.iter().enumerate() {
                    if !(0.0..=1.0).contains(&stop.position) {
                        return Err(PaletteValidationError::StopOutOfRange {
                            index,
                            position: stop.position,
                        });
                    }
                    if stop.position < previous {
                        return Err(PaletteValidationError::StopsNotSorted {
                            index,
                            position: stop.position,
                            previous,
                        });
                    }
                    previous = stop.position;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::types::ColorStop;

    fn stop(position: f64) -> ColorStop {
        ColorStop {
            position,
            color: "black".to_string(),
        }
    }

    #[test]
    fn test_palette_validator() {
        assert!(Palette::discrete("ok", ["red"]).is_ok());
        assert_eq!(
            Palette::discrete("empty", Vec::<String>::new()),
            Err(PaletteValidationError::Empty)
        );

        assert!(Palette::new("g", PaletteKind::Continuous(vec![stop(0.0), stop(0.5), stop(0.5), stop(1.0)])).is_ok());
        assert_eq!(
            Palette::new("g", PaletteKind::Continuous(vec![stop(0.0)])),
            Err(PaletteValidationError::TooFewStops { found: 1 })
        );
        assert!(matches!(
            Palette::new("g", PaletteKind::Continuous(vec![stop(0.6), stop(0.2)])),
            Err(PaletteValidationError::StopsNotSorted { index: 1, .. })
        ));
        assert!(matches!(
            Palette::new("g", PaletteKind::Continuous(vec![stop(-0.1), stop(1.0)])),
            Err(PaletteValidationError::StopOutOfRange { index: 0, .. })
        ));
        assert_eq!(
            Palette::new("n", PaletteKind::Named(vec![(String::new(), "red".to_string())])),
            Err(PaletteValidationError::EmptyLabel { index: 0 })
        );
    }
}
