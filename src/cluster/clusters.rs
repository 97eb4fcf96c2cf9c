//! A candidate clustering: medoids, assignments, and total cost.

use super::distance_matrix::DistanceMatrix;
use super::selected_set::SelectedSet;
use crate::distance::Scalar;
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2, Axis};
use std::cmp::Ordering;

/// Medoid selection plus the nearest-medoid assignment of every point.
///
/// `cost` is always the sum of each point's distance to its assigned medoid,
/// summed in point order. Clusterings compare by cost alone: lower is better.
///
/// The default value has no medoids and a cost of `T::max_value()`. It
/// compares worse than any clustering with medoids, whatever that cost is
/// (including `inf`).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clusters<T> {
    selected: SelectedSet,
    /// Slot of the assigned medoid, per point.
    assignments: Vec<usize>,
    /// Distance to the assigned medoid, per point.
    nearest: Vec<T>,
    /// Distance to the closest medoid in any other slot, per point.
    second: Vec<T>,
    cost: T,
}

impl<T: Scalar> Default for Clusters<T> {
    fn default() -> Self {
        Self {
            selected: SelectedSet::default(),
            assignments: Vec::new(),
            nearest: Vec::new(),
            second: Vec::new(),
            cost: T::max_value(),
        }
    }
}

impl<T: Scalar> Clusters<T> {
    /// An unassigned clustering of `n_points` points into `n_clusters`.
    pub fn new(n_points: usize, n_clusters: usize) -> Self {
        Self {
            selected: SelectedSet::with_capacity(n_clusters, n_points),
            assignments: vec![0; n_points],
            nearest: vec![T::infinity(); n_points],
            second: vec![T::infinity(); n_points],
            cost: T::max_value(),
        }
    }

    /// Assign every point to its nearest medoid and recompute the cost.
    ///
    /// Ties go to the lowest slot.
    pub fn assign_all(&mut self, dist: &DistanceMatrix<T>) -> Result<()> {
        if self.selected.is_empty() {
            return Err(Error::InvalidParameter {
                name: "medoids",
                message: "no medoids selected",
            });
        }
        let n = self.assignments.len();
        if dist.len() != n {
            return Err(Error::shape((n, n), (dist.len(), dist.len())));
        }

        let medoids = self.selected.indices();
        let mut cost = T::zero();
        for i in 0..n {
            let row = dist.row(i);
            // Slot 0 is taken outright so that infinite distances still assign.
            let mut best_slot = 0;
            let mut best = row[medoids[0]];
            let mut second = T::infinity();

            for (slot, &m) in medoids.iter().enumerate().skip(1) {
                let d = row[m];
                if d < best {
                    second = best;
                    best = d;
                    best_slot = slot;
                } else if d < second {
                    second = d;
                }
            }

            self.assignments[i] = best_slot;
            self.nearest[i] = best;
            self.second[i] = second;
            cost = cost + best;
        }

        self.cost = cost;
        Ok(())
    }

    /// Total cost if the medoid in `slot` were replaced by row `candidate`.
    ///
    /// Requires a prior [`Clusters::assign_all`]. The value is bit-identical
    /// to the cost [`Clusters::swap`] would produce for the same move.
    ///
    /// # Panics
    ///
    /// If `candidate` is out of bounds for `dist`.
    pub fn swap_cost(&self, dist: &DistanceMatrix<T>, slot: usize, candidate: usize) -> T {
        let mut cost = T::zero();
        for (i, &assigned) in self.assignments.iter().enumerate() {
            let to_candidate = dist.get(i, candidate);
            let kept = if assigned == slot {
                self.second[i]
            } else {
                self.nearest[i]
            };
            cost = cost + if to_candidate < kept { to_candidate } else { kept };
        }
        cost
    }

    /// Replace the medoid in `slot` with row `candidate` and reassign.
    pub fn swap(&mut self, dist: &DistanceMatrix<T>, slot: usize, candidate: usize) -> Result<()> {
        if !self.selected.replace(slot, candidate) {
            return Err(Error::InvalidParameter {
                name: "candidate",
                message: "swap needs an occupied slot and an unselected row",
            });
        }
        self.assign_all(dist)
    }

    /// Sum of distances from each point to its medoid.
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Medoid row indices in slot order.
    #[inline]
    pub fn medoids(&self) -> &[usize] {
        self.selected.indices()
    }

    /// Slot of the assigned medoid for every point.
    #[inline]
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Cluster label per point (same as [`Clusters::assignments`]).
    #[inline]
    pub fn labels(&self) -> &[usize] {
        &self.assignments
    }

    /// Distance from each point to its medoid.
    pub fn point_costs(&self) -> &[T] {
        &self.nearest
    }

    /// The medoid selection.
    pub fn selected(&self) -> &SelectedSet {
        &self.selected
    }

    /// Mutable medoid selection. Call [`Clusters::assign_all`] after editing.
    pub fn selected_mut(&mut self) -> &mut SelectedSet {
        &mut self.selected
    }

    /// Requested number of clusters.
    pub fn n_clusters(&self) -> usize {
        self.selected.capacity()
    }

    /// Number of clustered points.
    pub fn n_points(&self) -> usize {
        self.assignments.len()
    }

    /// Whether no medoids are selected (e.g. the default "no result" value).
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Points per cluster, by slot.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.selected.len()];
        for &slot in &self.assignments {
            if let Some(size) = sizes.get_mut(slot) {
                *size += 1;
            }
        }
        sizes
    }

    /// Points assigned to `slot`, ascending.
    pub fn members(&self, slot: usize) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| (s == slot).then_some(i))
            .collect()
    }

    /// Coordinates of the medoids, one row per slot.
    pub fn medoid_rows(&self, data: ArrayView2<'_, T>) -> Array2<T> {
        data.select(Axis(0), self.selected.indices())
    }

    /// Strictly lower cost than `other`.
    ///
    /// A clustering with medoids always beats an empty one.
    #[inline]
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Less)
    }
}

impl<T: Scalar> PartialEq for Clusters<T> {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl<T: Scalar> PartialOrd for Clusters<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Greater),
            (false, true) => Some(Ordering::Less),
            (false, false) => self.cost.partial_cmp(&other.cost),
        }
    }
}
