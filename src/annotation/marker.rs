use rustc_hash::FxHashMap;

/// Opaque id of a 3D marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(u32);

impl MarkerHandle {
    /// Reserved handle of the placement hover preview. Never registered in
    /// a [`MarkerMap`], so it can never be hit-tested.
    pub const PREVIEW: Self = Self(u32::MAX);

    pub(crate) fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw id.
    #[must_use]
    pub fn id(self) -> u32 {
        self.0
    }

    /// True for the placement preview.
    #[must_use]
    pub fn is_preview(self) -> bool {
        self == Self::PREVIEW
    }
}

/// Flat marker handle → annotation index mapping.
#[derive(Debug, Clone, Default)]
pub struct MarkerMap {
    index_of: FxHashMap<MarkerHandle, usize>,
}

impl MarkerMap {
    pub(crate) fn insert(&mut self, marker: MarkerHandle, index: usize) {
        if marker.is_preview() {
            return;
        }
        let _ = self.index_of.insert(marker, index);
    }

    /// Re-assign indices from the current annotation order.
    pub(crate) fn rebuild(
        &mut self,
        markers_in_order: impl Iterator<Item = MarkerHandle>,
    ) {
        self.index_of.clear();
        for (index, marker) in markers_in_order.enumerate() {
            self.insert(marker, index);
        }
    }

    /// Annotation index for `marker`.
    #[must_use]
    pub fn get(&self, marker: MarkerHandle) -> Option<usize> {
        self.index_of.get(&marker).copied()
    }

    /// Registered (handle, index) pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerHandle, usize)> + '_ {
        self.index_of.iter().map(|(&m, &i)| (m, i))
    }

    /// Number of registered markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index_of.len()
    }

    /// True when no markers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index_of.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_is_never_registered() {
        let mut map = MarkerMap::default();
        map.insert(MarkerHandle::PREVIEW, 0);
        map.insert(MarkerHandle::new(3), 0);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(MarkerHandle::PREVIEW), None);
        assert_eq!(map.get(MarkerHandle::new(3)), Some(0));
    }
}
