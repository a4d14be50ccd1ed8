//! Scene label taxonomy.
//!
//! The class-label list and its outdoor subset are fixed at engine
//! construction and never mutated afterwards, so they are read
//! concurrently without locking.

/// Curated outdoor scene labels.
pub const OUTDOOR_LABELS: &[&str] = &[
    "sky",
    "outdoor",
    "nature",
    "tree",
    "forest",
    "park",
    "street",
    "road",
    "sidewalk",
    "building_exterior",
    "garden",
    "beach",
    "ocean",
    "mountain",
    "hill",
    "field",
    "meadow",
    "lake",
    "river",
    "waterfall",
    "sunrise",
    "sunset",
    "cloud",
    "sun",
    "rain",
    "snow_outdoor",
    "desert",
    "canyon",
    "cliff",
    "bridge",
    "parking_lot",
    "playground",
    "stadium",
    "campus",
    "courtyard",
    "patio",
    "balcony",
    "rooftop",
    "trail",
    "path",
];

/// Indoor labels included for contrast in the default class list.
pub const INDOOR_LABELS: &[&str] = &[
    "indoor",
    "room",
    "bedroom",
    "bathroom",
    "kitchen",
    "office",
    "living_room",
    "hallway",
    "basement",
    "attic",
    "closet",
];

/// A fixed class-label list partitioned into an outdoor set and an
/// indoor/other remainder.
#[derive(Debug, Clone)]
pub struct LabelTaxonomy {
    labels: Vec<String>,
    outdoor: Vec<bool>,
}

impl LabelTaxonomy {
    /// Builds a taxonomy from a label list and its outdoor subset.
    ///
    /// Labels not named in `outdoor_set` are treated as indoor/other.
    #[must_use]
    pub fn new(labels: Vec<String>, outdoor_set: &[&str]) -> Self {
        let outdoor = labels
            .iter()
            .map(|label| outdoor_set.contains(&label.as_str()))
            .collect();
        Self { labels, outdoor }
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the taxonomy has no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label at a class index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range; callers index with positions
    /// produced by the backend's score vector, which is validated against
    /// the taxonomy at construction.
    #[must_use]
    pub fn label(&self, index: usize) -> &str {
        &self.labels[index]
    }

    /// Whether the class at `index` counts as outdoor evidence.
    #[must_use]
    pub fn is_outdoor(&self, index: usize) -> bool {
        self.outdoor.get(index).copied().unwrap_or(false)
    }

    /// All labels in class-index order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of classes in the outdoor set.
    #[must_use]
    pub fn outdoor_count(&self) -> usize {
        self.outdoor.iter().filter(|&&o| o).count()
    }
}

impl Default for LabelTaxonomy {
    /// The built-in taxonomy: the curated outdoor labels followed by the
    /// indoor contrast set.
    fn default() -> Self {
        let labels = OUTDOOR_LABELS
            .iter()
            .chain(INDOOR_LABELS)
            .map(|label| (*label).to_string())
            .collect();
        Self::new(labels, OUTDOOR_LABELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy_shape() {
        let taxonomy = LabelTaxonomy::default();
        assert_eq!(taxonomy.len(), OUTDOOR_LABELS.len() + INDOOR_LABELS.len());
        assert_eq!(taxonomy.outdoor_count(), OUTDOOR_LABELS.len());
    }

    #[test]
    fn test_outdoor_partition() {
        let taxonomy = LabelTaxonomy::default();
        // Outdoor labels come first in the default list.
        assert_eq!(taxonomy.label(0), "sky");
        assert!(taxonomy.is_outdoor(0));
        // Indoor labels follow.
        assert_eq!(taxonomy.label(OUTDOOR_LABELS.len()), "indoor");
        assert!(!taxonomy.is_outdoor(OUTDOOR_LABELS.len()));
    }

    #[test]
    fn test_out_of_range_index_is_not_outdoor() {
        let taxonomy = LabelTaxonomy::default();
        assert!(!taxonomy.is_outdoor(taxonomy.len() + 10));
    }

    #[test]
    fn test_custom_taxonomy() {
        let taxonomy = LabelTaxonomy::new(
            vec!["cave".to_string(), "summit".to_string()],
            &["summit"],
        );
        assert_eq!(taxonomy.len(), 2);
        assert!(!taxonomy.is_outdoor(0));
        assert!(taxonomy.is_outdoor(1));
    }
}
