//! Read-only questions about a [`Tree`]: membership, sorted iteration and
//! the shape queries (leaves, single parents, levels, siblings, cousins).

use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::mem;

use crate::error::{Result, TreeError};
use crate::tree::{Node, Tree};
use crate::util::Degree;

/// An in-order (i.e. ascending) iterator over the keys of a [`Tree`].
///
/// The traversal keeps an explicit stack of the nodes whose left subtree
/// has been visited, so it needs `O(height)` memory and never recurses.
pub struct Iter<'a, K> {
    nodes: Nodes<'a, K>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|node| &node.key)
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the nodes themselves.
pub(crate) struct Nodes<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> Nodes<'a, K> {
    fn new(root: Option<&'a Node<K>>) -> Self {
        let mut nodes = Self { stack: Vec::new() };
        nodes.push_left_spine(root);
        nodes
    }

    /// Pushes `node` and all of its left descendants so the smallest ends
    /// up on top of the stack.
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, K> Iterator for Nodes<'a, K> {
    type Item = &'a Node<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node)
    }
}

/// Level-order iterator yielding every depth of the tree as one `Vec`,
/// nodes ordered left to right.
pub(crate) struct Levels<'a, K> {
    current: Vec<&'a Node<K>>,
}

impl<'a, K> Iterator for Levels<'a, K> {
    type Item = Vec<&'a Node<K>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_empty() {
            return None;
        }
        let below: Vec<_> = self
            .current
            .iter()
            .flat_map(|&node| node.children())
            .collect();
        Some(mem::replace(&mut self.current, below))
    }
}

impl<K> Tree<K> {
    /// Iterates over the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree: Tree<_> = [2, 3, 1].into_iter().collect();
    /// let mut keys = tree.iter();
    ///
    /// assert_eq!(keys.next(), Some(&1));
    /// assert_eq!(keys.next(), Some(&2));
    /// assert_eq!(keys.next(), Some(&3));
    /// assert_eq!(keys.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            nodes: self.nodes(),
        }
    }

    /// Collects the keys visiting the left subtree, then the node, then the
    /// right subtree. The result is sorted in ascending order.
    pub fn in_order_traversal(&self) -> Vec<&K> {
        self.iter().collect()
    }

    /// The number of keys in the tree. This isn't tracked, so it costs a
    /// full traversal.
    pub fn len(&self) -> usize {
        self.nodes().count()
    }

    /// The number of levels in the tree: 0 when empty, 1 for a lone root.
    pub fn height(&self) -> usize {
        self.levels().count()
    }

    /// Counts the nodes that have no children. The count is recomputed on
    /// every call.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree: Tree<_> = [5, 3, 7].into_iter().collect();
    /// assert_eq!(tree.count_leaf_nodes(), 2);
    ///
    /// tree.insert(6).unwrap();
    /// assert_eq!(tree.count_leaf_nodes(), 2);
    ///
    /// tree.insert(8).unwrap();
    /// assert_eq!(tree.count_leaf_nodes(), 3);
    /// ```
    pub fn count_leaf_nodes(&self) -> usize {
        self.nodes()
            .filter(|node| node.degree() == Degree::Leaf)
            .count()
    }

    /// Keys of the nodes that have exactly one child, in ascending order.
    pub fn single_parent_keys(&self) -> Vec<&K> {
        self.nodes()
            .filter(|node| node.degree().is_single_parent())
            .map(|node| &node.key)
            .collect()
    }

    pub(crate) fn nodes(&self) -> Nodes<'_, K> {
        Nodes::new(self.root())
    }

    pub(crate) fn levels(&self) -> Levels<'_, K> {
        Levels {
            current: self.root().into_iter().collect(),
        }
    }
}

impl<K> Tree<K>
where
    K: Ord,
{
    /// Whether `key` is stored in the tree.
    pub fn retrieve(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// How many edges separate `key` from the root (the root is at level 0).
    /// Returns `None` if the key isn't in the tree.
    pub fn node_level(&self, key: &K) -> Option<usize> {
        let mut level = 0;
        let mut node = self.root();
        while let Some(current) = node {
            node = match key.cmp(&current.key) {
                Ordering::Less => current.left(),
                Ordering::Equal => return Some(level),
                Ordering::Greater => current.right(),
            };
            level += 1;
        }
        None
    }

    /// Returns the key of the other child of `key`'s parent.
    ///
    /// There is no sibling (`None`) when `key` is the root, when its parent
    /// has only one child, or when `key` isn't in the tree at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 7, 6].into_iter().collect();
    ///
    /// assert_eq!(tree.find_sibling(&3), Some(&7));
    /// assert_eq!(tree.find_sibling(&7), Some(&3));
    /// assert_eq!(tree.find_sibling(&6), None);
    /// assert_eq!(tree.find_sibling(&5), None);
    /// ```
    pub fn find_sibling(&self, key: &K) -> Option<&K> {
        let parent = self.find_parent(key)?;
        match (parent.left(), parent.right()) {
            (Some(left), Some(right)) if left.key == *key => Some(&right.key),
            (Some(left), Some(_)) => Some(&left.key),
            _ => None,
        }
    }

    /// Returns the keys at the same level as `key` whose parent isn't
    /// `key`'s parent, ordered left to right.
    ///
    /// This is the same set (and order) one gets by walking every
    /// left/right path of length `node_level(key)` from the root and
    /// keeping the live endpoints other than `key` and its sibling. Rather
    /// than trying all `2^level` paths, it scans the level above `key` once
    /// and collects the children of every node there except `key`'s parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{Tree, TreeError};
    ///
    /// let tree: Tree<_> = [50, 30, 70, 20, 40, 60, 80].into_iter().collect();
    ///
    /// assert_eq!(tree.find_cousins(&40), Ok(vec![&60, &80]));
    /// assert_eq!(tree.find_cousins(&70), Ok(vec![]));
    /// assert_eq!(tree.find_cousins(&45), Err(TreeError::KeyNotFound));
    /// ```
    pub fn find_cousins(&self, key: &K) -> Result<Vec<&K>> {
        if self.is_empty() {
            return Err(TreeError::EmptyTree);
        }
        let level = self.node_level(key).ok_or(TreeError::KeyNotFound)?;
        if level == 0 {
            return Ok(Vec::new());
        }

        let parent = self.find_parent(key).map(|parent| &parent.key);
        let grandparents_level = self.levels().nth(level - 1).unwrap_or_default();
        Ok(grandparents_level
            .into_iter()
            .filter(|node| Some(&node.key) != parent)
            .flat_map(|node| node.children())
            .map(|node| &node.key)
            .collect())
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::{cousins_by_paths, Op};

    quickcheck::quickcheck! {
        fn leaves_match_recursive_count(xs: Vec<i16>) -> bool {
            fn leaves(node: Option<&Node<i16>>) -> usize {
                match node {
                    None => 0,
                    Some(node) if node.left().is_none() && node.right().is_none() => 1,
                    Some(node) => leaves(node.left()) + leaves(node.right()),
                }
            }

            let tree: Tree<i16> = xs.into_iter().collect();
            tree.count_leaf_nodes() == leaves(tree.root())
        }
    }

    quickcheck::quickcheck! {
        fn cousins_match_path_enumeration(xs: Vec<u8>) -> bool {
            // Keep the trees shallow enough for the exponential oracle.
            let tree: Tree<u8> = xs.into_iter().take(16).collect();
            tree.iter().all(|key| {
                let level = tree.node_level(key).unwrap_or(0);
                level > 10 || tree.find_cousins(key) == Ok(cousins_by_paths(&tree, key))
            })
        }
    }

    quickcheck::quickcheck! {
        fn levels_follow_parents(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();
            for op in ops {
                match op {
                    Op::Insert(k) => {
                        let _ = tree.insert(k);
                        set.insert(k);
                    }
                    Op::Delete(k) => {
                        let _ = tree.delete(&k);
                        set.remove(&k);
                    }
                    Op::Traverse => {}
                }
            }

            set.iter().all(|key| match tree.find_parent(key) {
                None => tree.node_level(key) == Some(0),
                Some(parent) => tree.node_level(key) == tree.node_level(&parent.key).map(|l| l + 1),
            })
        }
    }
}
