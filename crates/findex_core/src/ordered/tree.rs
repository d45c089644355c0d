//! Unbalanced binary search tree.

use super::{Comparator, OrderedSet};
use std::cmp::Ordering;

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    left: Option<usize>,
    right: Option<usize>,
}

/// Which way a range extends from its reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Bigger,
    Smaller,
}

/// Pending traversal work.
#[derive(Debug, Clone, Copy)]
enum Step {
    /// Compare this node against the reference and prune.
    Walk(usize),
    /// Every value in this subtree qualifies.
    Whole(usize),
}

/// Binary search tree over values ordered by a [`Comparator`].
///
/// Nodes live in an arena (`Vec`) and link by index; the first inserted
/// value is the root. No rebalancing is done: depth depends on insertion
/// order and degrades to O(n) for sorted input. All traversals use an
/// explicit stack, so a degenerate tree costs time but not call stack.
///
/// Inserting a value equal to one already in the tree is a no-op.
///
/// # Range extraction
///
/// A range query walks the tree once. At a node inside the range, the node
/// and its whole subtree on the far side of the reference are collected
/// without further comparisons, and only the near-side child is walked. At
/// a node outside the range only the child towards the range is walked.
/// Output is in pre-order: node, collected subtree, then walked child.
///
/// # Example
///
/// ```rust
/// use findex_core::ordered::{NumberOrder, OrderedSet, OrderedTree};
///
/// let mut tree = OrderedTree::new(NumberOrder);
/// for v in [17.0, 25.0, 3.0, 19.0] {
///     tree.insert(v);
/// }
/// assert_eq!(tree.greater_than(&18.0), vec![25.0, 19.0]);
/// ```
#[derive(Debug, Clone)]
pub struct OrderedTree<T, C> {
    nodes: Vec<Node<T>>,
    comparator: C,
}

impl<T: Clone, C: Comparator<T>> OrderedTree<T, C> {
    /// Creates an empty tree.
    pub fn new(comparator: C) -> Self {
        Self {
            nodes: Vec::new(),
            comparator,
        }
    }

    /// Returns true if a value equal to `value` is in the tree.
    pub fn contains(&self, value: &T) -> bool {
        let mut at = if self.nodes.is_empty() { None } else { Some(0) };
        while let Some(i) = at {
            let node = &self.nodes[i];
            at = match self.comparator.compare(value, &node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Length of the longest root-to-leaf path (0 for an empty tree).
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = Vec::new();
        if !self.nodes.is_empty() {
            stack.push((0usize, 1usize));
        }
        while let Some((i, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[i];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        deepest
    }

    fn root_step(&self, step: fn(usize) -> Step) -> Vec<Step> {
        if self.nodes.is_empty() {
            Vec::new()
        } else {
            vec![step(0)]
        }
    }

    fn collect(&self, mut stack: Vec<Step>, reference: Option<(&T, Direction, bool)>) -> Vec<T> {
        let mut out = Vec::new();

        while let Some(step) = stack.pop() {
            match step {
                Step::Whole(i) => {
                    let node = &self.nodes[i];
                    out.push(node.value.clone());
                    // right below left so left pops first
                    stack.extend(node.right.map(Step::Whole));
                    stack.extend(node.left.map(Step::Whole));
                }
                Step::Walk(i) => {
                    let Some((reference, direction, inclusive)) = reference else {
                        continue;
                    };
                    let node = &self.nodes[i];
                    let ord = self.comparator.compare(&node.value, reference);

                    let (in_range, far, near) = match direction {
                        Direction::Bigger => (ord != Ordering::Less, node.right, node.left),
                        Direction::Smaller => (ord != Ordering::Greater, node.left, node.right),
                    };

                    if in_range {
                        if ord != Ordering::Equal || inclusive {
                            out.push(node.value.clone());
                        }
                        // near side runs after the far subtree is drained
                        stack.extend(near.map(Step::Walk));
                        stack.extend(far.map(Step::Whole));
                    } else {
                        stack.extend(far.map(Step::Walk));
                    }
                }
            }
        }

        out
    }

    fn range(&self, reference: &T, direction: Direction, inclusive: bool) -> Vec<T> {
        self.collect(self.root_step(Step::Walk), Some((reference, direction, inclusive)))
    }
}

impl<T, C> OrderedSet<T> for OrderedTree<T, C>
where
    T: Clone + Send + Sync,
    C: Comparator<T>,
{
    fn insert(&mut self, value: T) -> bool {
        if self.nodes.is_empty() {
            self.nodes.push(Node {
                value,
                left: None,
                right: None,
            });
            return true;
        }

        let next = self.nodes.len();
        let mut at = 0;
        loop {
            let node = &mut self.nodes[at];
            let slot = match self.comparator.compare(&value, &node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
            match *slot {
                Some(child) => at = child,
                None => {
                    *slot = Some(next);
                    break;
                }
            }
        }

        self.nodes.push(Node {
            value,
            left: None,
            right: None,
        });
        true
    }

    fn greater_than(&self, reference: &T) -> Vec<T> {
        self.range(reference, Direction::Bigger, false)
    }

    fn greater_than_or_equal(&self, reference: &T) -> Vec<T> {
        self.range(reference, Direction::Bigger, true)
    }

    fn less_than(&self, reference: &T) -> Vec<T> {
        self.range(reference, Direction::Smaller, false)
    }

    fn less_than_or_equal(&self, reference: &T) -> Vec<T> {
        self.range(reference, Direction::Smaller, true)
    }

    fn values(&self) -> Vec<T> {
        self.collect(self.root_step(Step::Whole), None)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }
}
