//! Binary-searched sorted vector.

use super::{Comparator, OrderedSet};
use std::cmp::Ordering;

/// Ordered set backed by a sorted `Vec`.
///
/// Lookups are O(log n) and range results come out in ascending order.
/// Inserts shift the tail, so this suits sets that are built once and
/// queried many times.
#[derive(Debug, Clone)]
pub struct SortedArray<T, C> {
    values: Vec<T>,
    comparator: C,
}

impl<T: Clone, C: Comparator<T>> SortedArray<T, C> {
    /// Creates an empty set.
    pub fn new(comparator: C) -> Self {
        Self {
            values: Vec::new(),
            comparator,
        }
    }

    /// First position whose value is not less than `reference`.
    fn lower_bound(&self, reference: &T) -> usize {
        self.values
            .partition_point(|v| self.comparator.compare(v, reference) == Ordering::Less)
    }

    /// First position whose value is greater than `reference`.
    fn upper_bound(&self, reference: &T) -> usize {
        self.values
            .partition_point(|v| self.comparator.compare(v, reference) != Ordering::Greater)
    }
}

impl<T, C> OrderedSet<T> for SortedArray<T, C>
where
    T: Clone + Send + Sync,
    C: Comparator<T>,
{
    fn insert(&mut self, value: T) -> bool {
        let at = self.lower_bound(&value);
        if let Some(existing) = self.values.get(at) {
            if self.comparator.equals(existing, &value) {
                return false;
            }
        }
        self.values.insert(at, value);
        true
    }

    fn greater_than(&self, reference: &T) -> Vec<T> {
        self.values[self.upper_bound(reference)..].to_vec()
    }

    fn greater_than_or_equal(&self, reference: &T) -> Vec<T> {
        self.values[self.lower_bound(reference)..].to_vec()
    }

    fn less_than(&self, reference: &T) -> Vec<T> {
        self.values[..self.lower_bound(reference)].to_vec()
    }

    fn less_than_or_equal(&self, reference: &T) -> Vec<T> {
        self.values[..self.upper_bound(reference)].to_vec()
    }

    fn values(&self) -> Vec<T> {
        self.values.clone()
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}
