use crate::node::Variant;

/// Settings a [`Tree`](crate::Tree) is created with. None of them can change afterwards.
///
/// # Examples
///
/// ```
/// use multibst::{Tree, TreeConfig, Variant};
///
/// let config = TreeConfig::default()
///     .variant(Variant::Splay)
///     .sentinel(50)
///     .capacity(64);
/// let tree = Tree::<String>::with_config(config).unwrap();
///
/// assert_eq!(tree.variant(), Variant::Splay);
/// assert_eq!(tree.sentinel_key(), 50);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    /// The balancing strategy.
    pub variant: Variant,
    /// The key of the node the tree is created with. It can never be deleted.
    pub sentinel: i64,
    /// How many nodes to make room for up front.
    pub capacity: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Avl,
            sentinel: 0,
            capacity: 0,
        }
    }
}

impl TreeConfig {
    /// Sets the balancing strategy.
    pub fn variant(self, variant: Variant) -> Self {
        Self { variant, ..self }
    }

    /// Sets the sentinel key.
    pub fn sentinel(self, sentinel: i64) -> Self {
        Self { sentinel, ..self }
    }

    /// Sets how many nodes to preallocate.
    pub fn capacity(self, capacity: usize) -> Self {
        Self { capacity, ..self }
    }
}
