//! The set of dataset rows currently acting as medoids.

/// Ordered, duplicate-free medoid row indices with O(1) membership.
///
/// The position of an index in [`SelectedSet::indices`] is its *slot*; cluster
/// assignments refer to slots. Once the build phase is done, the swap phase
/// uses [`SelectedSet::replace`], which keeps every other slot where it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedSet {
    indices: Vec<usize>,
    member: Vec<bool>,
    capacity: usize,
}

impl SelectedSet {
    /// An empty set holding at most `capacity` of `n_points` rows.
    pub fn with_capacity(capacity: usize, n_points: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            member: vec![false; n_points],
            capacity,
        }
    }

    /// Whether `index` is selected.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.member.get(index).copied().unwrap_or(false)
    }

    /// Append `index`. Returns `false` (and changes nothing) if it is already
    /// selected, out of range, or the set is full.
    pub fn insert(&mut self, index: usize) -> bool {
        if self.is_full() || index >= self.member.len() || self.member[index] {
            return false;
        }
        self.member[index] = true;
        self.indices.push(index);
        true
    }

    /// Remove `index`, keeping the order of the others. Returns `false` if it
    /// was not selected.
    pub fn remove(&mut self, index: usize) -> bool {
        match self.position(index) {
            Some(slot) => {
                self.indices.remove(slot);
                self.member[index] = false;
                true
            }
            None => false,
        }
    }

    /// Put `index` into `slot` in place of the current medoid there.
    ///
    /// Returns `false` if `slot` is not occupied or `index` is already
    /// selected or out of range.
    pub fn replace(&mut self, slot: usize, index: usize) -> bool {
        if slot >= self.indices.len() || index >= self.member.len() || self.member[index] {
            return false;
        }
        let old = std::mem::replace(&mut self.indices[slot], index);
        self.member[old] = false;
        self.member[index] = true;
        true
    }

    /// Slot of `index`, if selected.
    pub fn position(&self, index: usize) -> Option<usize> {
        if !self.contains(index) {
            return None;
        }
        self.indices.iter().position(|&i| i == index)
    }

    /// Selected rows in slot order.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of selected rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing is selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether `len() == capacity()`.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.indices.len() >= self.capacity
    }

    /// Maximum number of medoids.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of rows the set indexes into.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.member.len()
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        for &i in &self.indices {
            self.member[i] = false;
        }
        self.indices.clear();
    }
}
