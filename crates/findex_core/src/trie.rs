//! Character trie for prefix, fuzzy and wildcard lookups.

use crate::error::CoreResult;
use crate::pattern::Pattern;
use std::collections::{BTreeMap, BTreeSet, HashSet};

const ROOT: usize = 0;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: BTreeMap<char, usize>,
    terminal: bool,
    parent: usize,
    edge: char,
}

/// Set of lower-cased keys stored one character per edge.
///
/// Nodes live in an arena; children are kept sorted so every lookup
/// returns keys in lexicographic order, a node's key before its
/// descendants.
///
/// # Example
///
/// ```rust
/// use findex_core::Trie;
///
/// let mut trie = Trie::new();
/// for word in ["hello", "hell", "halloween", "helsinki"] {
///     trie.insert(word);
/// }
/// assert_eq!(trie.find_all_starting_with("hel"), vec!["hell", "hello", "helsinki"]);
/// assert_eq!(trie.find_fuzzy("helloween", 1), vec!["halloween"]);
/// ```
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    words: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Creates an empty trie.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            words: 0,
        }
    }

    /// Inserts a key, lower-cased. Returns false if it was already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let mut at = ROOT;
        for c in word.to_lowercase().chars() {
            at = match self.nodes[at].children.get(&c) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode {
                        parent: at,
                        edge: c,
                        ..TrieNode::default()
                    });
                    self.nodes[at].children.insert(c, child);
                    child
                }
            };
        }

        let node = &mut self.nodes[at];
        if node.terminal {
            return false;
        }
        node.terminal = true;
        self.words += 1;
        true
    }

    /// Returns true if the key is stored.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.descend(&word.to_lowercase())
            .is_some_and(|at| self.nodes[at].terminal)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words
    }

    /// Returns true if no key is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Every stored key beginning with `prefix`, the prefix included if it
    /// is a key itself.
    #[must_use]
    pub fn find_all_starting_with(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        let Some(start) = self.descend(&prefix) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(at) = stack.pop() {
            let node = &self.nodes[at];
            // reversed so the smallest child pops first
            stack.extend(node.children.values().rev());
            if node.terminal {
                out.push(self.key_of(at));
            }
        }
        out
    }

    /// Every stored key within `max_distance` edits of `word`.
    ///
    /// Edits are single-character substitutions, insertions and deletions.
    /// The search spends its budget while walking the trie, so branches
    /// that cannot come back within budget are never expanded.
    #[must_use]
    pub fn find_fuzzy(&self, word: &str, max_distance: usize) -> Vec<String> {
        let input: Vec<char> = word.to_lowercase().chars().collect();
        let mut found = BTreeSet::new();
        let mut seen = HashSet::new();
        let mut stack = vec![(ROOT, 0usize, 0usize)];

        while let Some((at, pos, spent)) = stack.pop() {
            if !seen.insert((at, pos, spent)) {
                continue;
            }
            let node = &self.nodes[at];
            let remaining = max_distance - spent;

            // unread input must be deletable within budget
            if node.terminal && input.len() - pos <= remaining {
                found.insert(at);
            }

            let current = input.get(pos).copied();
            if let Some(c) = current {
                if let Some(&child) = node.children.get(&c) {
                    stack.push((child, pos + 1, spent));
                }
            }

            if remaining == 0 {
                continue;
            }

            for (&c, &child) in &node.children {
                // substitution
                if current.is_some_and(|ic| ic != c) {
                    stack.push((child, pos + 1, spent + 1));
                }
                // insertion
                stack.push((child, pos, spent + 1));
            }

            // deletion
            if current.is_some() {
                stack.push((at, pos + 1, spent + 1));
            }
        }

        self.keys_at(found)
    }

    /// Every stored key matching the wildcard `pattern` as a whole.
    ///
    /// See [`crate::pattern`] for the syntax.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::InvalidPattern`] if the pattern does not
    /// parse; nothing is searched in that case.
    pub fn find_all_matching(&self, pattern: &str) -> CoreResult<Vec<String>> {
        let pattern = Pattern::parse(&pattern.to_lowercase())?;
        Ok(self.find_matching(&pattern))
    }

    /// Every stored key matching an already parsed pattern.
    ///
    /// Keys are stored lower-cased, so literals in the pattern only match
    /// if they are lower-case too.
    #[must_use]
    pub fn find_matching(&self, pattern: &Pattern) -> Vec<String> {
        let tokens = pattern.tokens();
        let mut found = BTreeSet::new();
        let mut seen = HashSet::new();
        let mut stack = vec![(ROOT, 0usize)];

        while let Some((at, pos)) = stack.pop() {
            // a node fixes the path, so (node, position) fixes the outcome
            if !seen.insert((at, pos)) {
                continue;
            }
            let node = &self.nodes[at];

            let Some(token) = tokens.get(pos) else {
                if node.terminal {
                    found.insert(at);
                }
                continue;
            };

            if token.quantifier.allows_zero() {
                stack.push((at, pos + 1));
            }
            for (&c, &child) in &node.children {
                if !token.atom.matches(c) {
                    continue;
                }
                if token.quantifier.repeats() {
                    stack.push((child, pos));
                }
                stack.push((child, pos + 1));
            }
        }

        self.keys_at(found)
    }

    /// Keys spelled by the paths to the given nodes, sorted.
    fn keys_at(&self, nodes: BTreeSet<usize>) -> Vec<String> {
        let mut keys: Vec<String> = nodes.into_iter().map(|at| self.key_of(at)).collect();
        keys.sort();
        keys
    }

    fn key_of(&self, mut at: usize) -> String {
        let mut edges = Vec::new();
        while at != ROOT {
            let node = &self.nodes[at];
            edges.push(node.edge);
            at = node.parent;
        }
        edges.into_iter().rev().collect()
    }

    fn descend(&self, word: &str) -> Option<usize> {
        word.chars()
            .try_fold(ROOT, |at, c| self.nodes[at].children.get(&c).copied())
    }
}
