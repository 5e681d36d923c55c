//! Ordered point annotations and their marker map.
//!
//! The store is the only owner of [`Annotation`]s. Ordinals are derived
//! (always `index + 1`) and are rewritten after every delete. Each committed
//! annotation gets a [`MarkerHandle`]; the flat [`MarkerMap`] kept next to
//! the list resolves a hit marker back to its annotation index.

mod marker;

use glam::Vec3;

pub use marker::{MarkerHandle, MarkerMap};

use crate::error::InteractionError;

/// A visitor-authored point of interest on the model surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    ordinal: usize,
    title: String,
    description: String,
    position: Vec3,
    marker: MarkerHandle,
}

impl Annotation {
    /// 1-based position in the list.
    #[must_use]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Title (never empty).
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description (placeholder text when the author left it empty).
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Surface point in model space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Handle of the 3D marker drawn for this annotation.
    #[must_use]
    pub fn marker(&self) -> MarkerHandle {
        self.marker
    }
}

/// Ordered collection of annotations.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    entries: Vec<Annotation>,
    markers: MarkerMap,
    next_marker: u32,
    default_description: String,
}

impl AnnotationStore {
    /// Create an empty store. `default_description` replaces empty
    /// descriptions on add.
    #[must_use]
    pub fn new(default_description: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            markers: MarkerMap::default(),
            next_marker: 0,
            default_description: default_description.into(),
        }
    }

    /// Append an annotation at the staged `position`.
    ///
    /// # Errors
    ///
    /// [`InteractionError::EmptyTitle`] if the trimmed title is empty,
    /// [`InteractionError::NoStagedPosition`] if `position` is `None`. The
    /// store is unchanged on error.
    pub fn add(
        &mut self,
        title: &str,
        description: &str,
        position: Option<Vec3>,
    ) -> Result<&Annotation, InteractionError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(InteractionError::EmptyTitle);
        }
        let position = position.ok_or(InteractionError::NoStagedPosition)?;

        let description = description.trim();
        let description = if description.is_empty() {
            self.default_description.clone()
        } else {
            description.to_owned()
        };

        let marker = MarkerHandle::new(self.next_marker);
        self.next_marker += 1;
        let index = self.entries.len();
        self.markers.insert(marker, index);
        self.entries.push(Annotation {
            ordinal: index + 1,
            title: title.to_owned(),
            description,
            position,
            marker,
        });
        log::debug!("annotation {} '{}' at {position}", index + 1, title);
        Ok(&self.entries[index])
    }

    /// Remove the annotation at `index`, renumber the rest and rebuild the
    /// marker map.
    ///
    /// # Errors
    ///
    /// [`InteractionError::IndexOutOfRange`] if `index >= len()`.
    pub fn delete_at(
        &mut self,
        index: usize,
    ) -> Result<Annotation, InteractionError> {
        if index >= self.entries.len() {
            return Err(InteractionError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let removed = self.entries.remove(index);
        for (i, entry) in self.entries.iter_mut().enumerate().skip(index) {
            entry.ordinal = i + 1;
        }
        self.markers
            .rebuild(self.entries.iter().map(Annotation::marker));
        Ok(removed)
    }

    /// Annotation at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Annotation> {
        self.entries.get(index)
    }

    /// Number of annotations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no annotations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All annotations in order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.entries.iter()
    }

    /// Marker handle → index map for hit-testing.
    #[must_use]
    pub fn markers(&self) -> &MarkerMap {
        &self.markers
    }

    /// Index of the annotation owning `marker`.
    #[must_use]
    pub fn index_of_marker(&self, marker: MarkerHandle) -> Option<usize> {
        self.markers.get(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(n: usize) -> AnnotationStore {
        let mut store = AnnotationStore::new("No description provided.");
        for i in 0..n {
            let _ = store
                .add(&format!("stop {i}"), "", Some(Vec3::splat(i as f32)))
                .unwrap();
        }
        store
    }

    fn assert_ordinals(store: &AnnotationStore) {
        for (i, a) in store.iter().enumerate() {
            assert_eq!(a.ordinal(), i + 1);
            assert_eq!(store.index_of_marker(a.marker()), Some(i));
        }
        assert_eq!(store.markers().len(), store.len());
    }

    #[test]
    fn add_assigns_next_ordinal_and_default_description() {
        let mut store = AnnotationStore::new("placeholder");
        let a = store.add("  Handle ", "", Some(Vec3::X)).unwrap();
        assert_eq!(a.ordinal(), 1);
        assert_eq!(a.title(), "Handle");
        assert_eq!(a.description(), "placeholder");
        let b = store.add("Spout", "chipped rim", Some(Vec3::Y)).unwrap();
        assert_eq!(b.ordinal(), 2);
        assert_eq!(b.description(), "chipped rim");
    }

    #[test]
    fn empty_title_is_rejected_without_mutation() {
        let mut store = store_with(2);
        assert_eq!(
            store.add("   ", "desc", Some(Vec3::ZERO)).unwrap_err(),
            InteractionError::EmptyTitle
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn missing_position_is_rejected() {
        let mut store = store_with(0);
        assert_eq!(
            store.add("title", "", None).unwrap_err(),
            InteractionError::NoStagedPosition
        );
        assert!(store.is_empty());
    }

    #[test]
    fn delete_renumbers_following_entries() {
        let mut store = store_with(4);
        let removed = store.delete_at(1).unwrap();
        assert_eq!(removed.title(), "stop 1");
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(1).unwrap().title(), "stop 2");
        assert_ordinals(&store);
    }

    #[test]
    fn delete_out_of_range_is_noop() {
        let mut store = store_with(2);
        assert_eq!(
            store.delete_at(2).unwrap_err(),
            InteractionError::IndexOutOfRange { index: 2, len: 2 }
        );
        assert_eq!(store.len(), 2);
        assert_ordinals(&store);
    }

    #[test]
    fn ordinals_stay_dense_over_mixed_sequences() {
        let mut store = store_with(0);
        // Deterministic pseudo-random add/delete interleaving.
        let mut seed = 7u32;
        for step in 0..200 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            if store.is_empty() || seed % 3 != 0 {
                let _ = store
                    .add(&format!("s{step}"), "", Some(Vec3::ZERO))
                    .unwrap();
            } else {
                let idx = (seed as usize / 7) % store.len();
                let _ = store.delete_at(idx).unwrap();
            }
            assert_ordinals(&store);
        }
    }

    #[test]
    fn marker_handles_are_never_reused() {
        let mut store = store_with(2);
        let first = store.get(0).unwrap().marker();
        let _ = store.delete_at(0).unwrap();
        let added = store.add("new", "", Some(Vec3::ZERO)).unwrap().marker();
        assert_ne!(added, first);
        assert_eq!(store.index_of_marker(first), None);
    }
}
