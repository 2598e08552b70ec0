use bstree::{Tree, TreeError};
use quickcheck_macros::quickcheck;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, set: &mut BTreeSet<K>)
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                let _ = bst.insert(k.clone());
                set.insert(k.clone());
            }
            Op::Delete(k) => {
                let _ = bst.delete(k);
                set.remove(k);
            }
        }
    }
}

/// The in-order walk is strictly ascending exactly when every node's left
/// subtree is smaller and its right subtree larger.
fn is_strictly_ascending<K: Ord>(tree: &Tree<K>) -> bool {
    let keys = tree.in_order_traversal();
    keys.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    is_strictly_ascending(&tree)
        && tree.iter().eq(set.iter())
        && set.iter().all(|key| tree.retrieve(key))
}

#[quickcheck]
fn inserts_come_out_sorted(xs: Vec<i32>) -> bool {
    let tree: Tree<i32> = xs.iter().copied().collect();
    let unique: BTreeSet<_> = xs.into_iter().collect();

    is_strictly_ascending(&tree) && tree.len() == unique.len()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.retrieve(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.retrieve(x))
}

#[quickcheck]
fn duplicate_insert_is_a_no_op(xs: Vec<i8>, dup: usize) -> bool {
    if xs.is_empty() {
        return true;
    }
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    let before: Vec<i8> = tree.iter().copied().collect();
    let levels: Vec<_> = before.iter().map(|k| tree.node_level(k)).collect();

    let again = xs[dup % xs.len()];
    tree.insert(again) == Err(TreeError::DuplicateKey)
        && tree.iter().copied().eq(before.iter().copied())
        && before.iter().map(|k| tree.node_level(k)).eq(levels)
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    for delete in &deletes {
        let _ = tree.delete(delete);
    }

    let mut still_present = xs;
    still_present.retain(|x| !deletes.contains(x));

    is_strictly_ascending(&tree)
        && deletes.iter().all(|x| !tree.retrieve(x))
        && still_present.iter().all(|x| tree.retrieve(x))
}

#[quickcheck]
fn deleting_everything_empties_the_tree(xs: Vec<i16>, rotate: usize) -> bool {
    let mut tree: Tree<i16> = xs.iter().copied().collect();
    let unique: BTreeSet<i16> = xs.iter().copied().collect();
    let mut order: Vec<i16> = unique.into_iter().collect();
    if !order.is_empty() {
        // Start somewhere in the middle so deletions hit inner nodes too.
        let mid = rotate % order.len();
        order.rotate_left(mid);
        if rotate % 2 == 1 {
            order.reverse();
        }
    }

    order.iter().all(|k| tree.delete(k) == Ok(*k))
        && tree.is_empty()
        && xs.iter().all(|k| !tree.retrieve(k))
        && tree.delete(&0) == Err(TreeError::EmptyTree)
}

#[quickcheck]
fn siblings_share_a_level(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();

    tree.iter().all(|key| match tree.find_sibling(key) {
        None => true,
        Some(sibling) => {
            tree.node_level(key) == tree.node_level(sibling)
                && tree.find_sibling(sibling) == Some(key)
        }
    })
}

#[quickcheck]
fn cousins_share_a_level(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();

    tree.iter().all(|key| {
        let cousins = tree.find_cousins(key).unwrap();
        cousins.iter().all(|cousin| {
            tree.node_level(cousin) == tree.node_level(key)
                && *cousin != key
                && tree.find_sibling(key) != Some(*cousin)
        })
    })
}
