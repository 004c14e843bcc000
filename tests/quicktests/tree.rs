use avl::{Order, Tree};
use quickcheck_macros::quickcheck;

use std::collections::{BTreeMap, HashSet};

use crate::{init_logging, Op};

/// Applies a set of operations to a tree and a multiset (a map of counts).
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same values in both.
fn do_ops<T>(ops: &[Op<T>], tree: &mut Tree<T>, counts: &mut BTreeMap<T, usize>)
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                tree.insert(x.clone());
                *counts.entry(x.clone()).or_default() += 1;
            }
            Op::Remove(x) => {
                let removed = tree.remove(x);
                match counts.get_mut(x) {
                    Some(count) => {
                        assert!(removed);
                        *count -= 1;
                        if *count == 0 {
                            counts.remove(x);
                        }
                    }
                    None => assert!(!removed),
                }
            }
        }
    }
}

/// The worst case height of an AVL tree holding `len` values, rounded up a little.
fn max_height(len: usize) -> f64 {
    1.45 * ((len + 2) as f64).log2()
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    init_logging();
    let mut tree = Tree::new();
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts);
    let expected = counts
        .iter()
        .flat_map(|(x, count)| std::iter::repeat(x).take(*count));

    tree.validate().is_ok()
        && tree.len() == counts.values().sum::<usize>()
        && tree.iter().eq(expected)
}

#[quickcheck]
fn stays_balanced(ops: Vec<Op<i16>>) -> bool {
    let mut tree = Tree::new();
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts);

    fn balanced(node: Option<avl::NodeRef<'_, i16>>) -> bool {
        match node {
            None => true,
            Some(n) => {
                n.balance_factor().abs() <= 1 && balanced(n.left()) && balanced(n.right())
            }
        }
    }
    balanced(tree.root()) && (tree.height() as f64) <= max_height(tree.len())
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let mut visited = Vec::new();
    tree.traverse(Order::InOrder, |x| visited.push(*x));

    let mut sorted = xs;
    sorted.sort_unstable();

    visited == sorted && tree.iter().copied().eq(sorted.iter().copied())
}

#[quickcheck]
fn traversals_visit_every_value_once(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    [Order::PreOrder, Order::InOrder, Order::PostOrder]
        .into_iter()
        .all(|order| {
            let mut visited = Vec::new();
            tree.traverse(order, |x| visited.push(*x));
            visited.sort_unstable();

            let mut expected = xs.clone();
            expected.sort_unstable();
            visited == expected
        })
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while tree.remove(delete) {}
    }

    let mut still_present = xs;
    still_present.retain(|x| !deletes.contains(x));

    deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
        && tree.len() == still_present.len()
        && tree.validate().is_ok()
}

#[quickcheck]
fn removing_everything_empties_the_tree(xs: HashSet<i16>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.remove(x)) && tree.is_empty() && tree.root().is_none()
}

#[quickcheck]
fn removing_absent_value_changes_nothing(xs: Vec<i8>, absent: i8) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().filter(|x| *x != absent).collect();
    let len = tree.len();

    !tree.remove(&absent) && tree.len() == len
}

#[test]
fn ascending_inserts_are_logarithmic() {
    init_logging();
    let mut tree = Tree::new();
    for x in 0..1000 {
        tree.insert(x);
        assert!((tree.height() as f64) <= max_height(tree.len()));
    }

    // Delete every other value from the bottom up and check we stay balanced.
    for x in (0..1000).step_by(2) {
        assert!(tree.remove(&x));
    }
    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(tree.len(), 500);
    assert!((tree.height() as f64) <= max_height(tree.len()));
}
