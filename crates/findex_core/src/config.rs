//! Engine configuration.

/// Structure that holds `NUMBER` and `DATE` values for range matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderedBackend {
    /// Unbalanced binary search tree.
    #[default]
    Tree,
    /// Binary-searched sorted vector.
    SortedArray,
}

/// Configuration for an [`crate::IndexEngine`].
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Ordered set implementation for range matches.
    pub ordered_backend: OrderedBackend,

    /// Whether a condition on an undeclared index is an error instead of
    /// an empty result.
    pub strict_declarations: bool,
}

impl EngineConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ordered set implementation.
    #[must_use]
    pub const fn ordered_backend(mut self, backend: OrderedBackend) -> Self {
        self.ordered_backend = backend;
        self
    }

    /// Sets whether undeclared indexes are rejected.
    #[must_use]
    pub const fn strict_declarations(mut self, value: bool) -> Self {
        self.strict_declarations = value;
        self
    }
}
