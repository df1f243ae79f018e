use proptest::prelude::*;

use super::*;

/// Height of the subtree at `x`, asserting the AVL balance condition on the way.
fn checked_avl_height<T: Tree>(tree: &T, x: Option<NodeIndex<T::Ix>>) -> usize {
    let Some(x) = x else { return 0 };
    let lh = checked_avl_height(tree, tree.left(x));
    let rh = checked_avl_height(tree, tree.right(x));
    assert!(lh.abs_diff(rh) <= 1, "balance factor {lh} - {rh}");
    lh.max(rh) + 1
}

/// Black height of the subtree at `x`, asserting no red node has a red child.
fn checked_black_height<K>(tree: &RbTree<K>, x: Option<NodeIndex>) -> usize {
    let Some(x) = x else { return 1 };
    let (l, r) = (tree.left(x), tree.right(x));
    if tree.color(x) == Color::Red {
        for child in [l, r].into_iter().flatten() {
            assert_eq!(tree.color(child), Color::Black, "red node with red child");
        }
    }
    let lh = checked_black_height(tree, l);
    let rh = checked_black_height(tree, r);
    assert_eq!(lh, rh, "black height differs");
    lh + usize::from(tree.color(x) == Color::Black)
}

fn check_rb<K>(tree: &RbTree<K>) {
    if !tree.is_empty() {
        assert_eq!(tree.root_color(), Some(Color::Black));
    }
    let _ignore = checked_black_height(tree, Tree::root(tree));
}

/// Pre-order keys paired with their colors.
fn rb_snapshot<K: Clone>(tree: &RbTree<K>) -> Vec<(K, Color)> {
    let mut out = Vec::new();
    let mut stack: Vec<_> = Tree::root(tree).into_iter().collect();
    while let Some(x) = stack.pop() {
        out.push((tree.key(x).clone(), tree.color(x)));
        stack.extend(tree.right(x));
        stack.extend(tree.left(x));
    }
    out
}

#[test]
fn avl_insert_sequence_rebalances_to_expected_root() {
    let mut tree = AvlTree::new();
    for k in [26, 21, 30, 50, 60, 66, 68, 70] {
        tree.insert(k);
    }
    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        [21, 26, 30, 50, 60, 66, 68, 70]
    );
    assert_eq!(tree.root_key(), Some(&50));
    assert_eq!(
        tree.pre_order().copied().collect::<Vec<_>>(),
        [50, 26, 21, 30, 66, 60, 68, 70]
    );
    assert_eq!(
        tree.post_order().copied().collect::<Vec<_>>(),
        [21, 30, 26, 60, 70, 68, 66, 50]
    );
    assert_eq!(tree.height(), 4);
}

#[test]
fn rb_insert_sequence_keeps_colors_valid() {
    let tree: RbTree<_> = [3, 5, 8, 7, 15, 19, 18, 30, 33].into_iter().collect();
    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        [3, 5, 7, 8, 15, 18, 19, 30, 33]
    );
    assert_eq!(tree.root_color(), Some(Color::Black));
    check_rb(&tree);
    use Color::{Black as B, Red as R};
    assert_eq!(
        rb_snapshot(&tree),
        [
            (8, B),
            (5, R),
            (3, B),
            (7, B),
            (18, R),
            (15, B),
            (30, B),
            (19, R),
            (33, R)
        ]
    );
}

#[test]
fn rb_single_key_is_black_leaf() {
    let mut tree = RbTree::new();
    tree.insert("k");
    let root = Tree::root(&tree).unwrap();
    assert_eq!(tree.color(root), Color::Black);
    assert_eq!(tree.left(root), None);
    assert_eq!(tree.right(root), None);
    assert_eq!(tree.parent(root), None);
}

#[test]
fn duplicate_insert_leaves_trees_identical() {
    let mut avl: AvlTree<_> = [26, 21, 30, 50, 60, 66, 68, 70].into_iter().collect();
    let before: Vec<_> = avl.pre_order().copied().collect();
    for k in [26, 50, 70] {
        avl.insert(k);
    }
    assert_eq!(avl.pre_order().copied().collect::<Vec<_>>(), before);
    assert_eq!(avl.len(), 8);

    let mut rb: RbTree<_> = [3, 5, 8, 7, 15, 19, 18, 30, 33].into_iter().collect();
    let before = rb_snapshot(&rb);
    for k in [3, 8, 33] {
        rb.insert(k);
    }
    assert_eq!(rb_snapshot(&rb), before);
    assert_eq!(rb.len(), 9);
}

#[test]
fn absent_key_is_ignored() {
    let mut avl = AvlTree::<i32>::new();
    let mut rb = RbTree::<i32>::new();
    avl.insert_opt(None);
    rb.insert_opt(None);
    assert!(avl.is_empty() && rb.is_empty());
    assert_eq!(avl.root_key(), None);
    assert_eq!(rb.root_key(), None);
}

#[test]
fn empty_trees_traverse_nothing() {
    let avl = AvlTree::<u8>::default();
    let rb = RbTree::<u8>::default();
    assert_eq!(avl.pre_order().count() + avl.post_order().count(), 0);
    assert_eq!(rb.pre_order().count() + rb.post_order().count(), 0);
    assert_eq!((&avl).into_iter().next(), None);
    assert_eq!((&rb).into_iter().next(), None);
    assert_eq!(avl.first(), None);
    assert_eq!(rb.last(), None);
}

#[test]
fn narrow_index_type_is_usable() {
    let mut avl = AvlTree::<u8, u16>::with_capacity(256);
    let mut rb = RbTree::<u8, u16>::with_capacity(256);
    avl.extend(0..=u8::MAX);
    rb.extend((0..=u8::MAX).rev());
    assert_eq!(avl.len(), 256);
    assert_eq!(rb.len(), 256);
    assert!(avl.iter().copied().eq(0..=u8::MAX));
    assert!(rb.iter().copied().eq(0..=u8::MAX));
}

const N_VALUES: usize = 200;

proptest! {
    /// In-order traversal yields the distinct inserted keys in ascending order.
    #[test]
    fn prop_in_order_is_sorted(values in prop::collection::vec(any::<i16>(), 0..N_VALUES)) {
        let mut want = values.clone();
        want.sort_unstable();
        want.dedup();

        let avl: AvlTree<_> = values.iter().copied().collect();
        let rb: RbTree<_> = values.iter().copied().collect();

        prop_assert_eq!(avl.iter().copied().collect::<Vec<_>>(), want.clone());
        prop_assert_eq!(rb.iter().copied().collect::<Vec<_>>(), want.clone());
        prop_assert_eq!(avl.len(), want.len());
        prop_assert_eq!(rb.len(), want.len());
        prop_assert_eq!(avl.first(), want.first());
        prop_assert_eq!(rb.last(), want.last());
    }

    /// Every insertion leaves the AVL tree balanced, and the height within the
    /// classic AVL bound.
    #[test]
    fn prop_avl_balanced_after_each_insert(values in prop::collection::vec(any::<u16>(), 1..N_VALUES)) {
        let mut t = AvlTree::new();
        for v in values {
            t.insert(v);
            let h = checked_avl_height(&t, Tree::root(&t));
            prop_assert_eq!(h, t.height());
            let bound = 1.4405 * ((t.len() + 2) as f64).log2();
            prop_assert!((h as f64) < bound, "height {} over bound {}", h, bound);
        }
    }

    /// Every insertion leaves the red-black properties intact.
    #[test]
    fn prop_rb_properties_after_each_insert(values in prop::collection::vec(any::<u16>(), 1..N_VALUES)) {
        let mut t = RbTree::new();
        for v in values {
            t.insert(v);
            check_rb(&t);
            prop_assert!(t.contains(&v));
        }
    }

    /// Re-inserting present keys changes neither shape nor colors.
    #[test]
    fn prop_duplicates_are_no_ops(
        values in prop::collection::vec(any::<u8>(), 1..N_VALUES),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..20),
    ) {
        let mut avl: AvlTree<_> = values.iter().copied().collect();
        let mut rb: RbTree<_> = values.iter().copied().collect();
        let avl_before: Vec<_> = avl.pre_order().copied().collect();
        let rb_before = rb_snapshot(&rb);

        for p in picks {
            let k = *p.get(&values);
            avl.insert(k);
            rb.insert(k);
        }

        prop_assert_eq!(avl.pre_order().copied().collect::<Vec<_>>(), avl_before);
        prop_assert_eq!(rb_snapshot(&rb), rb_before);
    }
}

#[cfg(feature = "graphviz")]
#[test]
fn tree_draw_is_ok() {
    let rb: RbTree<_> = [3, 5, 8, 7, 15, 19, 18, 30, 33].into_iter().collect();
    let mut buf = Vec::new();
    rb.write_dot(&mut buf).unwrap();
    let dot = String::from_utf8(buf).unwrap();
    assert!(dot.starts_with("digraph {"));
    assert!(dot.contains(r#"[label="8"; fillcolor = black; fontcolor = white];"#));
    assert!(dot.contains(r#"[label="33"; fillcolor = red; fontcolor = white];"#));

    let avl: AvlTree<_> = [2, 1, 3].into_iter().collect();
    let mut buf = Vec::new();
    avl.write_dot(&mut buf).unwrap();
    let dot = String::from_utf8(buf).unwrap();
    assert!(dot.contains("n0 -> n1;"));
    assert!(dot.contains("n0 -> n2;"));

    let path = std::env::temp_dir().join("balanced_tree_draw_is_ok.dot");
    rb.draw(&path).unwrap();
    avl.draw(&path).unwrap();
    let _ignore = std::fs::remove_file(path);
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_avl_tree() {
    use serde_json::{json, Value};

    let tree: AvlTree<i32> = [2, 1, 3].into_iter().collect();

    let serialized = serde_json::to_string(&tree).unwrap();
    let expected = json!({
        "nodes": [
            { "left": 1, "right": 2, "key": 2 },
            { "left": null, "right": null, "key": 1 },
            { "left": null, "right": null, "key": 3 }
        ],
        "root": 0
    });
    let actual: Value = serde_json::from_str(&serialized).unwrap();
    assert_eq!(expected, actual);

    let mut deserialized: AvlTree<i32> = serde_json::from_str(&serialized).unwrap();
    assert!(deserialized.iter().eq(tree.iter()));
    deserialized.insert(4);
    assert_eq!(deserialized.last(), Some(&4));
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_rb_tree() {
    use serde_json::{json, Value};

    let tree: RbTree<i32> = [2, 1, 3].into_iter().collect();

    let serialized = serde_json::to_string(&tree).unwrap();
    let expected = json!({
        "nodes": [
            // sentinel node
            { "left": 0, "right": 0, "parent": 0, "color": "Black", "key": null },
            { "left": 2, "right": 3, "parent": 0, "color": "Black", "key": 2 },
            { "left": 0, "right": 0, "parent": 1, "color": "Red", "key": 1 },
            { "left": 0, "right": 0, "parent": 1, "color": "Red", "key": 3 }
        ],
        "root": 1,
        "len": 3
    });
    let actual: Value = serde_json::from_str(&serialized).unwrap();
    assert_eq!(expected, actual);

    let deserialized: RbTree<i32> = serde_json::from_str(&serialized).unwrap();
    assert_eq!(rb_snapshot(&deserialized), rb_snapshot(&tree));
}
