use bst::owned::Tree;

use std::collections::BTreeSet;

use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same keys in both.
fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, set: &mut BTreeSet<K>)
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                assert_eq!(bst.insert(k.clone()), set.insert(k.clone()));
            }
            Op::Delete(k) => {
                assert_eq!(bst.delete(k).is_some(), set.remove(k));
            }
            Op::Rebalance => {
                bst.rebalance();
                assert!(bst.is_balanced());
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.len() == set.len() && tree.in_order() == set.iter().collect::<Vec<_>>()
}

#[quickcheck]
fn fuzz_from_constructed_tree(xs: Vec<i8>, ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::from_values(xs.clone());
    let mut set: BTreeSet<_> = xs.into_iter().collect();

    do_ops(&ops, &mut tree, &mut set);
    set.iter().all(|key| tree.contains(key)) && tree.in_order().len() == set.len()
}

#[quickcheck]
fn construction_is_sorted_and_balanced(xs: Vec<i16>) -> bool {
    let tree = Tree::from_values(xs.clone());
    let expected: Vec<_> = xs.iter().collect::<BTreeSet<_>>().into_iter().collect();

    let height_is_minimal = match tree.height() {
        None => tree.is_empty(),
        // A tree of height h can hold at most 2^(h+1) - 1 keys, and minimal means
        // one level less couldn't hold them all.
        Some(h) => tree.len() < 1 << (h + 1) && tree.len() >= 1 << h,
    };

    tree.in_order() == expected && tree.is_balanced() && height_is_minimal
}

#[quickcheck]
fn in_order_is_strictly_ascending(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    for delete in &deletes {
        tree.delete(delete);
    }

    tree.in_order().windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    let added: BTreeSet<_> = xs.into_iter().collect();
    let nots: BTreeSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn insert_then_delete_round_trips(xs: Vec<i8>, key: i8) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    tree.delete(&key);
    let before: Vec<i8> = tree.in_order().into_iter().copied().collect();

    tree.insert(key);
    tree.delete(&key);
    tree.in_order().into_iter().copied().collect::<Vec<_>>() == before
}

#[quickcheck]
fn traversals_visit_every_key(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    fn sorted(mut keys: Vec<&i8>) -> Vec<&i8> {
        keys.sort();
        keys
    }

    let in_order = tree.in_order();
    sorted(tree.level_order()) == in_order
        && sorted(tree.pre_order()) == in_order
        && sorted(tree.post_order()) == in_order
}

#[quickcheck]
fn depth_of_found_node_is_path_length(xs: Vec<i8>, key: i8) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    match tree.find(&key) {
        None => !xs.contains(&key),
        Some(node) => {
            // Count the edges of the search path independently.
            let mut edges = 0;
            let mut current = tree.root();
            while let Some(n) = current {
                if n.key() == &key {
                    break;
                }
                current = if &key < n.key() { n.left() } else { n.right() };
                edges += 1;
            }
            tree.depth(node) == Some(edges)
        }
    }
}

#[quickcheck]
fn rebalance_keeps_keys(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    let before: Vec<i8> = tree.in_order().into_iter().copied().collect();

    tree.rebalance();
    tree.is_balanced() && tree.in_order().into_iter().copied().collect::<Vec<_>>() == before
}
