//! Tree engine configuration

/// Capacity settings for a tree.
///
/// # Examples
///
/// ```
/// use tree_engine::TreeConfig;
///
/// let config = TreeConfig::default().with_node_limit(128);
/// assert_eq!(config.node_limit, Some(128));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeConfig {
    /// Maximum number of live nodes; `None` is bounded only by the id space
    pub node_limit: Option<usize>,
}

impl TreeConfig {
    /// Bound the number of live nodes
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }
}
