//! Ordered value sets for range matches.
//!
//! `NUMBER` and `DATE` indexes keep their decoded key values in an ordered
//! set so `GT`/`GTE`/`LT`/`LTE` conditions never scan the exact-match table.
//! The set is generic over the value type and a [`Comparator`], so one
//! traversal serves both numbers and dates.
//!
//! # Implementations
//!
//! - [`OrderedTree`]: unbalanced binary search tree (default)
//! - [`SortedArray`]: binary-searched vector

mod sorted;
mod tree;

pub use sorted::SortedArray;
pub use tree::OrderedTree;

use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

/// Three-way ordering capability injected into ordered sets.
///
/// Two values comparing `Equal` are the same set member; the second one
/// inserted is dropped.
pub trait Comparator<T>: Send + Sync {
    /// Compares two values.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Returns true if `a` sorts after `b`.
    fn bigger_than(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    /// Returns true if `a` sorts before `b`.
    fn smaller_than(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Returns true if `a` and `b` are the same member.
    fn equals(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

/// Natural ordering of finite `f64` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberOrder;

impl Comparator<f64> for NumberOrder {
    fn compare(&self, a: &f64, b: &f64) -> Ordering {
        a.total_cmp(b)
    }
}

/// Unit that dates are truncated to before comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateGranularity {
    /// Calendar day.
    #[default]
    Day,
    /// Calendar month.
    Month,
    /// Calendar year.
    Year,
}

/// Calendar ordering of dates at a fixed granularity.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateOrder {
    granularity: DateGranularity,
}

impl DateOrder {
    /// Creates a date ordering at the given granularity.
    #[must_use]
    pub const fn new(granularity: DateGranularity) -> Self {
        Self { granularity }
    }

    fn truncate(&self, date: &NaiveDate) -> (i32, u32, u32) {
        match self.granularity {
            DateGranularity::Day => (date.year(), date.month(), date.day()),
            DateGranularity::Month => (date.year(), date.month(), 1),
            DateGranularity::Year => (date.year(), 1, 1),
        }
    }
}

impl Comparator<NaiveDate> for DateOrder {
    fn compare(&self, a: &NaiveDate, b: &NaiveDate) -> Ordering {
        self.truncate(a).cmp(&self.truncate(b))
    }
}

/// A set of values supporting open and closed range extraction.
///
/// Results are in traversal order of the implementation, not necessarily
/// sorted; callers that need sorted output sort themselves.
pub trait OrderedSet<T>: Send + Sync {
    /// Inserts a value. Returns false (and changes nothing) if an equal
    /// value is already present.
    fn insert(&mut self, value: T) -> bool;

    /// Values strictly greater than `reference`.
    fn greater_than(&self, reference: &T) -> Vec<T>;

    /// Values greater than or equal to `reference`.
    fn greater_than_or_equal(&self, reference: &T) -> Vec<T>;

    /// Values strictly less than `reference`.
    fn less_than(&self, reference: &T) -> Vec<T>;

    /// Values less than or equal to `reference`.
    fn less_than_or_equal(&self, reference: &T) -> Vec<T>;

    /// Every value in the set.
    fn values(&self) -> Vec<T>;

    /// Number of distinct values.
    fn len(&self) -> usize;

    /// Returns true if the set holds no values.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every value.
    fn clear(&mut self);
}
