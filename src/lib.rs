//! This crate is an ordered container of `i64` keys built on one binary tree engine that can be
//! balanced in several ways.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored keys. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a key less than its own
//!    key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a key greater than its
//!    own key.
//!
//! Searching for a key takes `O(height)`. How the height is kept in check is what the
//! [`Variant`] of a [`Tree`] decides:
//!
//! - [`Variant::Binary`] and [`Variant::Unbalanced`] never rotate, so the height depends entirely
//!   on the order keys arrive in.
//! - [`Variant::Avl`] keeps a balance factor per node and rotates to keep the two subtrees of every
//!   node within one level of each other, bounding the height to `O(lg N)`.
//! - [`Variant::Splay`] rotates every inserted or accessed key up to the root, keeping recently
//!   touched keys cheap to reach.
//!
//! Every tree is created around a sentinel key which it holds for its whole life.
//!
//! # Examples
//!
//! ```
//! use multibst::{Tree, Variant};
//!
//! let mut tree = Tree::new(Variant::Avl, 0).unwrap();
//! for key in 1..=100 {
//!     tree.insert(key).unwrap();
//! }
//!
//! assert_eq!(tree.len(), 101);
//! assert!(tree.height() <= 8);
//! assert!(tree.in_order().eq(0..=100));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod avl;
mod config;
mod error;
mod node;
mod path;
mod rotate;
mod splay;
mod traverse;
mod tree;

#[cfg(test)]
mod test;

pub use config::TreeConfig;
pub use error::TreeError;
pub use node::{Direction, NodeId, NodeRef, Variant};
pub use path::PathStack;
pub use traverse::{BreadthFirst, InOrder, PostOrder, PreOrder};
pub use tree::Tree;
