//! The tree itself: node ownership, navigation, insertion and deletion.
//!
//! Every node is owned by its parent through a `Box` (the root is owned by
//! the [`Tree`]). Nodes don't know their parents. Whenever a parent is needed
//! it is found by descending from the root again, or, for mutation, by
//! descending with a cursor over the owning link itself.
//!
//! # Examples
//!
//! ```
//! use bstree::{Tree, TreeError};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.retrieve(&1));
//! assert_eq!(tree.delete(&1), Err(TreeError::EmptyTree));
//!
//! tree.insert(1).unwrap();
//! assert!(tree.retrieve(&1));
//!
//! // Keys are unique.
//! assert_eq!(tree.insert(1), Err(TreeError::DuplicateKey));
//!
//! // Deleting a node hands back its key.
//! assert_eq!(tree.delete(&1), Ok(1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::error::{Result, TreeError};
use crate::util::Degree;

/// An owning, possibly empty, pointer to a subtree.
type Link<K> = Option<Box<Node<K>>>;

pub(crate) struct Node<K> {
    pub(crate) key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn new_boxed(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
        })
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Both children, left first, skipping the empty ones.
    pub(crate) fn children(&self) -> impl Iterator<Item = &Self> {
        self.left().into_iter().chain(self.right())
    }

    pub(crate) fn degree(&self) -> Degree {
        match (&self.left, &self.right) {
            (None, None) => Degree::Leaf,
            (Some(_), None) => Degree::OnlyLeft,
            (None, Some(_)) => Degree::OnlyRight,
            (Some(_), Some(_)) => Degree::Full,
        }
    }

    /// Returns the link holding this node's in-order predecessor, i.e. the
    /// largest key of the left subtree. The predecessor never has a right
    /// child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    fn find_predecessor(&mut self) -> &mut Link<K> {
        assert!(
            self.left.is_some(),
            "predecessor requested for a node without a left child"
        );

        let mut slot = &mut self.left;
        while slot.as_ref().is_some_and(|node| node.right.is_some()) {
            slot = match slot {
                Some(node) => &mut node.right,
                None => unreachable!("loop condition checked the slot"),
            };
        }
        slot
    }

    /// Removes the node held in `slot` and returns its key, or `None` if the
    /// slot is empty.
    ///
    /// A node with at most one child is unlinked directly and its child (if
    /// any) takes its place. A node with two children stays where it is: its
    /// predecessor is unlinked instead (which recurses at most once because
    /// the predecessor has no right child) and the predecessor's key
    /// overwrites this node's key.
    fn unlink(slot: &mut Link<K>) -> Option<K> {
        let degree = slot.as_ref()?.degree();
        trace!(?degree, "unlinking node");

        match degree {
            Degree::Leaf => slot.take().map(|node| node.key),
            Degree::OnlyLeft => {
                let child = slot.as_mut().and_then(|node| node.left.take());
                mem::replace(slot, child).map(|node| node.key)
            }
            Degree::OnlyRight => {
                let child = slot.as_mut().and_then(|node| node.right.take());
                mem::replace(slot, child).map(|node| node.key)
            }
            Degree::Full => {
                let node = slot.as_mut()?;
                let predecessor = Self::unlink(node.find_predecessor())
                    .expect("a node with a left child has a predecessor");
                Some(mem::replace(&mut node.key, predecessor))
            }
        }
    }
}

/// A plain (unbalanced) Binary Search Tree of unique keys. This can be used
/// for inserting, finding, and deleting keys as well as asking questions
/// about the tree's shape.
pub struct Tree<K> {
    root: Link<K>,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    // Dropping the root `Box` directly would recurse once per level.
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    /// Inserts every key in turn. Keys already in the tree are skipped.
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            let _ = self.insert(key);
        }
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Whether the tree has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }
}

impl<K> Tree<K>
where
    K: Ord,
{
    /// Inserts the given key into the tree. Keys are unique so inserting a
    /// key that is already present does nothing and returns
    /// [`TreeError::DuplicateKey`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.insert("b"), Ok(()));
    /// assert_eq!(tree.insert("a"), Ok(()));
    /// assert_eq!(tree.insert("b"), Err(TreeError::DuplicateKey));
    ///
    /// assert_eq!(tree.in_order_traversal(), vec![&"a", &"b"]);
    /// ```
    pub fn insert(&mut self, key: K) -> Result<()> {
        let mut slot = &mut self.root;
        let mut depth = 0usize;
        while let Some(node) = slot {
            slot = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => {
                    debug!(depth, "rejected duplicate key");
                    return Err(TreeError::DuplicateKey);
                }
                Ordering::Greater => &mut node.right,
            };
            depth += 1;
        }

        *slot = Some(Node::new_boxed(key));
        debug!(depth, "inserted node");
        Ok(())
    }

    /// Deletes the node containing the given key from the tree and returns
    /// the key that was removed.
    ///
    /// When the node has two children it is not unlinked. Instead its
    /// in-order predecessor is deleted and the predecessor's key replaces
    /// the node's key, which keeps the BST ordering intact.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{Tree, TreeError};
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.delete(&2), Ok(2));
    /// assert_eq!(tree.delete(&2), Err(TreeError::KeyNotFound));
    /// assert_eq!(tree.in_order_traversal(), vec![&1, &3]);
    /// ```
    pub fn delete(&mut self, key: &K) -> Result<K> {
        if self.is_empty() {
            debug!("refused delete on an empty tree");
            return Err(TreeError::EmptyTree);
        }

        match Node::unlink(self.slot_mut(key)) {
            Some(removed) => {
                debug!("deleted node");
                Ok(removed)
            }
            None => {
                debug!("refused delete of a missing key");
                Err(TreeError::KeyNotFound)
            }
        }
    }

    /// Finds the node holding `key`, if any.
    pub(crate) fn find(&self, key: &K) -> Option<&Node<K>> {
        let mut node = self.root();
        while let Some(current) = node {
            node = match key.cmp(&current.key) {
                Ordering::Less => current.left(),
                Ordering::Equal => return Some(current),
                Ordering::Greater => current.right(),
            };
        }
        None
    }

    /// Finds the node whose left or right child holds `key`. The root has no
    /// parent, so looking up the root's key gives `None`, as does a key that
    /// isn't in the tree.
    pub(crate) fn find_parent(&self, key: &K) -> Option<&Node<K>> {
        let mut node = self.root();
        while let Some(current) = node {
            let child = match key.cmp(&current.key) {
                Ordering::Less => current.left(),
                // Only reachable on the root: every other node is checked
                // as a child before the descent reaches it.
                Ordering::Equal => return None,
                Ordering::Greater => current.right(),
            };
            if child.is_some_and(|child| child.key == *key) {
                trace!("found parent");
                return Some(current);
            }
            node = child;
        }
        None
    }

    /// Returns the link that owns the node holding `key`, or the empty link
    /// where `key` would be attached if it isn't in the tree.
    fn slot_mut(&mut self, key: &K) -> &mut Link<K> {
        let mut slot = &mut self.root;
        while slot.as_ref().is_some_and(|node| node.key != *key) {
            slot = match slot {
                Some(node) => match key.cmp(&node.key) {
                    Ordering::Less => &mut node.left,
                    _ => &mut node.right,
                },
                None => unreachable!("loop condition checked the slot"),
            };
        }
        slot
    }
}
