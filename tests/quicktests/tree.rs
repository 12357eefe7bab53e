use multibst::{NodeRef, Tree, Variant};

use std::collections::BTreeSet;

use crate::Op;

const VARIANTS: [Variant; 4] = [
    Variant::Binary,
    Variant::Unbalanced,
    Variant::Avl,
    Variant::Splay,
];

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops(ops: &[Op], tree: &mut Tree, keys: &mut BTreeSet<i64>) {
    for op in ops {
        match *op {
            Op::Insert(key) => {
                let key = i64::from(key);
                assert_eq!(tree.insert(key).is_ok(), keys.insert(key));
            }
            Op::Delete(key) => {
                let key = i64::from(key);
                let removable = key != tree.sentinel_key() && keys.remove(&key);
                assert_eq!(tree.delete(key).is_ok(), removable);
            }
        }
    }
}

fn new_tree(variant: Variant) -> (Tree, BTreeSet<i64>) {
    crate::common::init_tracing();
    let tree = Tree::new(variant, 0).unwrap();
    let keys = std::iter::once(0).collect();
    (tree, keys)
}

fn avl_height(node: Option<NodeRef<'_, ()>>) -> Option<i64> {
    let node = match node {
        Some(node) => node,
        None => return Some(0),
    };
    let left = avl_height(node.left())?;
    let right = avl_height(node.right())?;
    let balanced = (right - left).abs() <= 1 && right - left == i64::from(node.balance_factor());
    if balanced {
        Some(left.max(right) + 1)
    } else {
        None
    }
}

#[quickcheck]
fn in_order_is_strictly_ascending(ops: Vec<Op>) -> bool {
    VARIANTS.iter().all(|&variant| {
        let (mut tree, mut keys) = new_tree(variant);
        do_ops(&ops, &mut tree, &mut keys);

        let in_order = tree.in_order().collect::<Vec<_>>();
        in_order.windows(2).all(|w| w[0] < w[1]) && in_order.iter().eq(keys.iter())
    })
}

#[quickcheck]
fn node_count_follows_successful_ops(ops: Vec<Op>) -> bool {
    VARIANTS.iter().all(|&variant| {
        let (mut tree, _) = new_tree(variant);
        let mut expected = 1;
        for op in &ops {
            match *op {
                Op::Insert(key) => {
                    if tree.insert(i64::from(key)).is_ok() {
                        expected += 1;
                    }
                }
                Op::Delete(key) => {
                    if tree.delete(i64::from(key)).is_ok() {
                        expected -= 1;
                    }
                }
            }
        }
        tree.len() == expected && tree.root().tree_len() == expected
    })
}

#[quickcheck]
fn avl_balance_factors_are_heights(ops: Vec<Op>) -> bool {
    let (mut tree, mut keys) = new_tree(Variant::Avl);
    ops.iter().all(|op| {
        do_ops(std::slice::from_ref(op), &mut tree, &mut keys);
        avl_height(Some(tree.root())).is_some()
    })
}

#[quickcheck]
fn splay_insert_lands_at_root(xs: Vec<i8>) -> bool {
    let (mut tree, _) = new_tree(Variant::Splay);
    xs.into_iter().map(i64::from).all(|x| match tree.insert(x) {
        Ok(()) => tree.depth(x) == Some(0),
        Err(_) => tree.contains(x),
    })
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    VARIANTS.iter().all(|&variant| {
        let (mut tree, mut keys) = new_tree(variant);
        for &x in &xs {
            let _ = tree.insert(i64::from(x));
            keys.insert(i64::from(x));
        }

        nots.iter()
            .map(|&x| i64::from(x))
            .filter(|x| !keys.contains(x))
            .all(|x| tree.find(x).is_none())
    })
}

#[quickcheck]
fn destroy_releases_everything(xs: Vec<i8>) -> bool {
    VARIANTS.iter().all(|&variant| {
        let (mut tree, mut keys) = new_tree(variant);
        for &x in &xs {
            let _ = tree.insert(i64::from(x));
            keys.insert(i64::from(x));
        }
        tree.destroy() == keys.len()
    })
}
