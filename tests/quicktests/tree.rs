use rebalance_bst::{Node, Tree};

use std::collections::BTreeSet;

/// Checks that every node sits strictly between the bounds its ancestors impose on it.
fn is_search_tree<K: Ord>(tree: &Tree<K>) -> bool {
    let mut pending: Vec<(&Node<K>, Option<&K>, Option<&K>)> =
        tree.root().map(|root| (root, None, None)).into_iter().collect();

    while let Some((node, low, high)) = pending.pop() {
        let key = node.key();
        if low.map_or(false, |low| key <= low) || high.map_or(false, |high| key >= high) {
            return false;
        }
        if let Some(left) = node.left() {
            pending.push((left, low, Some(key)));
        }
        if let Some(right) = node.right() {
            pending.push((right, Some(key), high));
        }
    }
    true
}

/// Number of nodes in a possibly absent subtree.
fn subtree_len<K>(node: Option<&Node<K>>) -> usize {
    let mut pending: Vec<&Node<K>> = node.into_iter().collect();
    let mut count = 0;
    while let Some(node) = pending.pop() {
        count += 1;
        pending.extend(node.children());
    }
    count
}

fn sorted<K: Ord>(mut keys: Vec<K>) -> Vec<K> {
    keys.sort();
    keys
}

/// Inserts `xs` one by one into an empty tree, skipping the balanced build.
fn inserted(xs: &[i16]) -> Tree<i16> {
    let mut tree = Tree::new();
    for x in xs {
        tree.insert(*x);
    }
    tree
}

quickcheck::quickcheck! {
    fn build_is_search_tree(xs: Vec<i16>) -> bool {
        let tree: Tree<_> = xs.into_iter().collect();
        is_search_tree(&tree)
    }
}

quickcheck::quickcheck! {
    fn build_is_balanced(xs: Vec<i16>) -> bool {
        let tree: Tree<_> = xs.into_iter().collect();
        tree.is_balanced() && tree.balanced_hint()
    }
}

quickcheck::quickcheck! {
    fn build_sizes_differ_by_at_most_one(xs: Vec<i16>) -> bool {
        let tree: Tree<_> = xs.into_iter().collect();

        let mut even = true;
        tree.level_order_with(|node| {
            even &= subtree_len(node.left()).abs_diff(subtree_len(node.right())) <= 1;
        });
        even && subtree_len(tree.root()) == tree.len()
    }
}

quickcheck::quickcheck! {
    fn rebalance_sizes_differ_by_at_most_one(xs: Vec<i16>) -> bool {
        let mut tree = inserted(&xs);
        tree.rebalance();

        let mut even = true;
        tree.level_order_with(|node| {
            even &= subtree_len(node.left()).abs_diff(subtree_len(node.right())) <= 1;
        });
        even
    }
}

quickcheck::quickcheck! {
    fn build_keeps_unique_keys(xs: Vec<i16>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let unique: BTreeSet<_> = xs.iter().collect();

        tree.len() == unique.len() && tree.inorder().into_iter().eq(unique)
    }
}

quickcheck::quickcheck! {
    fn traversals_hold_the_same_keys(xs: Vec<i16>) -> bool {
        let tree = inserted(&xs);
        let inorder = tree.inorder();

        sorted(tree.level_order()) == inorder
            && sorted(tree.preorder()) == inorder
            && sorted(tree.postorder()) == inorder
            && inorder.windows(2).all(|pair| pair[0] < pair[1])
    }
}

quickcheck::quickcheck! {
    fn insert_rejects_existing_keys(xs: Vec<i16>) -> bool {
        let mut tree = inserted(&xs);
        let before = tree.preorder().into_iter().copied().collect::<Vec<_>>();

        let all_rejected = xs.iter().all(|x| !tree.insert(*x));
        let after = tree.preorder().into_iter().copied().collect::<Vec<_>>();

        all_rejected && before == after && is_search_tree(&tree)
    }
}

quickcheck::quickcheck! {
    fn delete_removes_exactly_one_key(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
        let mut tree = inserted(&xs);

        deletes.iter().all(|key| {
            let before = tree.len();
            if tree.delete(key) {
                tree.find(key).is_none()
                    && tree.inorder().len() == before - 1
                    && !tree.inorder().contains(&key)
                    && is_search_tree(&tree)
            } else {
                tree.len() == before && !tree.contains(key)
            }
        })
    }
}

quickcheck::quickcheck! {
    fn deleting_present_keys_keeps_order(xs: Vec<i16>) -> bool {
        let mut tree = inserted(&xs);

        // Delete every other present key, which hits all three delete cases along the way.
        let keys: Vec<i16> = tree.level_order().into_iter().copied().step_by(2).collect();
        keys.iter().all(|key| tree.delete(key) && is_search_tree(&tree))
    }
}

quickcheck::quickcheck! {
    fn rebalance_restores_balance(xs: Vec<i16>, extra: Vec<i16>) -> bool {
        let mut tree: Tree<_> = xs.into_iter().collect();
        for x in sorted(extra) {
            tree.insert(x);
        }
        let before = tree.inorder().into_iter().copied().collect::<Vec<_>>();

        tree.rebalance();
        let after = tree.inorder().into_iter().copied().collect::<Vec<_>>();

        tree.is_balanced() && before == after && is_search_tree(&tree)
    }
}

quickcheck::quickcheck! {
    fn depth_matches_level(xs: Vec<i16>) -> bool {
        let tree = inserted(&xs);

        // A node's depth is the number of levels above it.
        let mut level = vec![];
        let mut frontier: Vec<&Node<i16>> = tree.root().into_iter().collect();
        while !frontier.is_empty() {
            level.push(frontier.clone());
            frontier = frontier.into_iter().flat_map(Node::children).collect();
        }

        level.iter().enumerate().all(|(depth, nodes)| {
            nodes.iter().all(|node| tree.depth(node) == Some(depth))
        })
    }
}

quickcheck::quickcheck! {
    fn height_bounds_depth(xs: Vec<i16>) -> bool {
        let tree = inserted(&xs);
        let deepest = tree
            .level_order()
            .into_iter()
            .filter_map(|key| tree.find(key))
            .filter_map(|node| tree.depth(node))
            .max();

        tree.height() == deepest.map_or(-1, |depth| depth as isize)
    }
}
