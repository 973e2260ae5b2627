use crate::color::Rgb;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum ColormapKind {
    /// Gradient through `(position, color)` stops sorted by position.
    Linear(Vec<(f64, Rgb)>),
    /// Qualitative map with one flat band per color.
    Listed(Vec<Rgb>),
}

/// A named color scale registered with the plotting backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    kind: ColormapKind,
}

impl Colormap {
    pub fn linear(name: impl Into<String>, stops: Vec<(f64, Rgb)>) -> Self {
        Self {
            name: name.into(),
            kind: ColormapKind::Linear(stops),
        }
    }

    pub fn listed(name: impl Into<String>, colors: Vec<Rgb>) -> Self {
        Self {
            name: name.into(),
            kind: ColormapKind::Listed(colors),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ColormapKind {
        &self.kind
    }

    pub fn is_qualitative(&self) -> bool {
        matches!(self.kind, ColormapKind::Listed(_))
    }

    /// Color at `t` in `[0, 1]`; values outside are clamped.
    ///
    /// Returns `None` only for a colormap without colors.
    pub fn sample(&self, t: f64) -> Option<Rgb> {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match &self.kind {
            ColormapKind::Listed(colors) => {
                if colors.is_empty() {
                    return None;
                }
                let index = ((t * colors.len() as f64) as usize).min(colors.len() - 1);
                colors.get(index).copied()
            }
            ColormapKind::Linear(stops) => {
                let (first, last) = (stops.first()?, stops.last()?);
                if t <= first.0 {
                    return Some(first.1);
                }
                if t >= last.0 {
                    return Some(last.1);
                }
                stops.windows(2).find_map(|pair| {
                    let ((p0, c0), (p1, c1)) = (pair[0], pair[1]);
                    if t < p0 || t > p1 {
                        return None;
                    }
                    let span = p1 - p0;
                    let frac = if span > 0.0 { (t - p0) / span } else { 1.0 };
                    Some(c0.lerp(&c1, frac))
                })
            }
        }
    }

    /// The same scale traversed backwards, under a new name.
    pub fn reversed(&self, name: impl Into<String>) -> Self {
        let kind = match &self.kind {
            ColormapKind::Linear(stops) => ColormapKind::Linear(
                stops
                    .iter()
                    .rev()
                    .map(|(position, color)| (1.0 - position, *color))
                    .collect(),
            ),
            ColormapKind::Listed(colors) => {
                ColormapKind::Listed(colors.iter().rev().copied().collect())
            }
        };
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Name-keyed colormap store; registering an existing name replaces it.
#[derive(Debug, Clone, Default)]
pub struct ColormapRegistry {
    colormaps: BTreeMap<String, Colormap>,
}

impl ColormapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a colormap, returning the one it replaced.
    pub fn register(&mut self, colormap: Colormap) -> Option<Colormap> {
        self.colormaps.insert(colormap.name.clone(), colormap)
    }

    pub fn get(&self, name: &str) -> Option<&Colormap> {
        self.colormaps.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.colormaps.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colormaps.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colormaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colormaps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb = Rgb::new(0, 0, 0);
    const WHITE: Rgb = Rgb::new(255, 255, 255);
    const RED: Rgb = Rgb::new(255, 0, 0);

    #[test]
    fn test_linear_sampling() {
        let cmap = Colormap::linear("grey", vec![(0.0, BLACK), (1.0, WHITE)]);

        assert_eq!(cmap.sample(0.0), Some(BLACK));
        assert_eq!(cmap.sample(1.0), Some(WHITE));
        assert_eq!(cmap.sample(0.5), Some(Rgb::new(128, 128, 128)));
        assert_eq!(cmap.sample(-3.0), Some(BLACK));
    }

    #[test]
    fn test_linear_sampling_with_interior_stop() {
        let cmap = Colormap::linear("heat", vec![(0.0, BLACK), (0.25, RED), (1.0, WHITE)]);

        assert_eq!(cmap.sample(0.25), Some(RED));
        assert_eq!(cmap.sample(0.125), Some(Rgb::new(128, 0, 0)));
    }

    #[test]
    fn test_listed_sampling_uses_flat_bands() {
        let cmap = Colormap::listed("q", vec![BLACK, RED, WHITE]);

        assert_eq!(cmap.sample(0.0), Some(BLACK));
        assert_eq!(cmap.sample(0.4), Some(RED));
        assert_eq!(cmap.sample(1.0), Some(WHITE));
        assert_eq!(Colormap::listed("empty", vec![]).sample(0.5), None);
    }

    #[test]
    fn test_reversed() {
        let cmap = Colormap::linear("heat", vec![(0.0, BLACK), (0.25, RED), (1.0, WHITE)]);
        let reversed = cmap.reversed("heat_r");

        assert_eq!(reversed.name(), "heat_r");
        assert_eq!(
            reversed.kind(),
            &ColormapKind::Linear(vec![(0.0, WHITE), (0.75, RED), (1.0, BLACK)])
        );
        assert_eq!(reversed.sample(0.0), cmap.sample(1.0));
    }

    #[test]
    fn test_registry_replaces_by_name() {
        let mut registry = ColormapRegistry::new();

        assert!(registry.register(Colormap::listed("q", vec![BLACK])).is_none());
        assert!(registry.register(Colormap::listed("q", vec![WHITE])).is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("q").and_then(|c| c.sample(0.0)), Some(WHITE));
    }
}
