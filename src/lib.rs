//! This crate exposes a plain, unbalanced Binary Search Tree (BST) over
//! a generic ordered key along with a handful of structural queries.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores the key
//! that was inserted and will sometimes have child `Node`s. The most
//! important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Keys are unique. Inserting a key that is already present is rejected
//! with [`TreeError::DuplicateKey`] and leaves the tree untouched.
//!
//! Nothing here rebalances the tree so the shape depends entirely on the
//! insertion order. Every operation walks the tree iteratively, so even a
//! completely skewed tree (e.g. built from sorted input) won't exhaust the
//! call stack.
//!
//! ## Queries
//!
//! Besides membership and sorted iteration the tree can answer a few
//! questions about its shape:
//!
//! - how many leaves it has ([`Tree::count_leaf_nodes`]),
//! - which nodes have exactly one child ([`Tree::single_parent_keys`]),
//! - how deep a key sits ([`Tree::node_level`]),
//! - which key shares a parent with a key ([`Tree::find_sibling`]),
//! - which keys sit at the same depth under a different parent
//!   ([`Tree::find_cousins`]).
//!
//! # Examples
//!
//! ```
//! use bstree::{Tree, TreeError};
//!
//! let mut tree: Tree<i32> = [50, 30, 70, 20, 40, 60, 80].into_iter().collect();
//!
//! assert_eq!(tree.insert(40), Err(TreeError::DuplicateKey));
//! assert_eq!(tree.node_level(&40), Some(2));
//! assert_eq!(tree.find_sibling(&20), Some(&40));
//! assert_eq!(tree.find_cousins(&20), Ok(vec![&60, &80]));
//!
//! assert_eq!(tree.delete(&30), Ok(30));
//! assert_eq!(tree.in_order_traversal(), vec![&20, &40, &50, &60, &70, &80]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod cli;
mod error;
mod query;
mod tree;
mod util;

pub use error::{Result, TreeError};
pub use query::Iter;
pub use tree::Tree;
