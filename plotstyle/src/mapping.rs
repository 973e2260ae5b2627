//! # Stable Label Mapping
//!
//! Category labels are mapped to palette colors once per mapping name and the
//! assignment is cached for the rest of the process. Later calls only add new
//! labels, so a label keeps its color across figures that share a mapping
//! name.

use crate::error::{StyleError, StyleResult};
use crate::palette::{Palette, PaletteKind};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Collection of category labels in assignment order.
///
/// Ordered collections keep first-encountered order and drop duplicates.
/// `HashSet` input is sorted, since its iteration order is not stable.
pub trait LabelSet {
    fn into_ordered_labels(self) -> Vec<String>;
}

fn first_seen<S: AsRef<str>>(labels: impl IntoIterator<Item = S>) -> Vec<String> {
    let mut seen = HashSet::new();
    labels
        .into_iter()
        .filter_map(|label| {
            let label = label.as_ref();
            seen.insert(label.to_string()).then(|| label.to_string())
        })
        .collect()
}

fn sorted<S: AsRef<str>>(labels: impl IntoIterator<Item = S>) -> Vec<String> {
    let mut labels: Vec<String> = labels.into_iter().map(|l| l.as_ref().to_string()).collect();
    labels.sort();
    labels
}

impl<S: AsRef<str>> LabelSet for &[S] {
    fn into_ordered_labels(self) -> Vec<String> {
        first_seen(self)
    }
}

impl<S: AsRef<str>, const N: usize> LabelSet for [S; N] {
    fn into_ordered_labels(self) -> Vec<String> {
        first_seen(self)
    }
}

impl<S: AsRef<str>, const N: usize> LabelSet for &[S; N] {
    fn into_ordered_labels(self) -> Vec<String> {
        first_seen(self)
    }
}

impl<S: AsRef<str>> LabelSet for Vec<S> {
    fn into_ordered_labels(self) -> Vec<String> {
        first_seen(self)
    }
}

impl<S: AsRef<str>> LabelSet for &Vec<S> {
    fn into_ordered_labels(self) -> Vec<String> {
        first_seen(self)
    }
}

impl<S: AsRef<str>> LabelSet for HashSet<S> {
    fn into_ordered_labels(self) -> Vec<String> {
        sorted(self)
    }
}

impl<S: AsRef<str>> LabelSet for &HashSet<S> {
    fn into_ordered_labels(self) -> Vec<String> {
        sorted(self)
    }
}

impl<S: AsRef<str>> LabelSet for BTreeSet<S> {
    fn into_ordered_labels(self) -> Vec<String> {
        first_seen(self)
    }
}

impl<S: AsRef<str>> LabelSet for &BTreeSet<S> {
    fn into_ordered_labels(self) -> Vec<String> {
        first_seen(self)
    }
}

/// Ordered label to color mapping returned by [`LabelMapper::map`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelColorMap {
    entries: Vec<(String, String)>,
}

impl LabelColorMap {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| c.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn colors(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, c)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, c)| (l.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for LabelColorMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[derive(Debug, Clone)]
struct CachedMapping {
    palette_name: String,
    assignments: HashMap<String, String>,
    // Number of labels that took a color by position
    next_index: usize,
}

/// Per-name cache of label color assignments.
#[derive(Debug, Clone, Default)]
pub struct LabelMapper {
    mappings: HashMap<String, CachedMapping>,
}

impl LabelMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colors for `labels` under `mapping_name`, extending the cached
    /// assignment with any labels not seen before.
    ///
    /// Positional palettes hand out colors in order and wrap around. Named
    /// palettes use the palette's color for a label and `unseen_color` for
    /// labels they do not define.
    pub fn map(
        &mut self,
        labels: impl LabelSet,
        mapping_name: &str,
        palette: &Palette,
        unseen_color: &str,
    ) -> StyleResult<LabelColorMap> {
        let labels = labels.into_ordered_labels();
        if labels.is_empty() && !self.mappings.contains_key(mapping_name) {
            return Err(StyleError::EmptyLabels {
                mapping: mapping_name.to_string(),
            });
        }

        let cached = self
            .mappings
            .entry(mapping_name.to_string())
            .or_insert_with(|| CachedMapping {
                palette_name: palette.name().to_string(),
                assignments: HashMap::new(),
                next_index: 0,
            });

        if cached.palette_name != palette.name() {
            log::warn!(
                "Mapping '{mapping_name}' was built from palette '{}', new labels will use '{}'",
                cached.palette_name,
                palette.name()
            );
            cached.palette_name = palette.name().to_string();
        }

        let colors = palette.colors();
        let mut unseen = Vec::new();
        for label in &labels {
            if cached.assignments.contains_key(label) {
                continue;
            }

            let color = match palette.kind() {
                PaletteKind::Named(_) => match palette.color_for_label(label) {
                    Some(color) => color.to_string(),
                    None => {
                        unseen.push(label.as_str());
                        unseen_color.to_string()
                    }
                },
                // Palettes hold at least one color
                _ => {
                    let color = colors[cached.next_index % colors.len()];
                    cached.next_index += 1;
                    color.to_string()
                }
            };
            cached.assignments.insert(label.clone(), color);
        }

        if !unseen.is_empty() {
            log::info!(
                "Labels not in palette '{}' mapped to {unseen_color}: {}",
                palette.name(),
                unseen.join(", ")
            );
        }

        let entries = labels
            .into_iter()
            .filter_map(|label| {
                let color = cached.assignments.get(&label)?.clone();
                Some((label, color))
            })
            .collect();

        Ok(LabelColorMap { entries })
    }

    /// Drop the cached assignment for `mapping_name`.
    pub fn forget(&mut self, mapping_name: &str) -> bool {
        self.mappings.remove(mapping_name).is_some()
    }

    pub fn contains(&self, mapping_name: &str) -> bool {
        self.mappings.contains_key(mapping_name)
    }
}
