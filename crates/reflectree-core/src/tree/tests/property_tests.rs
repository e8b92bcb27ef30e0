use proptest::prelude::*;

use crate::tree::{
    ids::NodeId,
    search_tree::Tree,
    tests::support::{scored, solution},
};

/// Build a tree where node `i + 1` hangs under the node picked by `parents[i]`.
fn build_tree(parents: &[usize]) -> (Tree, Vec<NodeId>) {
    let mut tree = Tree::new();
    let mut ids = vec![tree.root_id()];
    for (i, pick) in parents.iter().enumerate() {
        let parent = ids[pick % ids.len()];
        let id = tree
            .add_node(scored(1), Some(solution(&format!("n{i}"))), parent)
            .expect("parent exists");
        ids.push(id);
    }
    (tree, ids)
}

proptest! {
    #[test]
    fn value_is_the_mean_of_all_rewards(rewards in proptest::collection::vec(0u8..=9u8, 1..64)) {
        let mut tree = Tree::new();
        let parent = tree.add_node(scored(1), Some(solution("p")), tree.root_id()).expect("parent");

        let mut total = 0.0;
        for score in &rewards {
            let reward = f64::from(*score) / 10.0;
            total += reward;
            let leaf = tree.add_node(scored(*score), Some(solution("leaf")), parent).expect("leaf");
            tree.backpropagate(leaf, reward).expect("backpropagate");
        }

        let node = tree.node(parent).expect("parent");
        prop_assert_eq!(node.visits(), rewards.len() as u64);
        prop_assert!((node.value() - total / rewards.len() as f64).abs() < 1e-9);
    }

    #[test]
    fn hierarchy_is_idempotent_and_matches_parent_links(parents in proptest::collection::vec(0usize..64, 0..48)) {
        let (mut tree, ids) = build_tree(&parents);

        tree.establish_hierarchy().expect("first pass");
        let once: Vec<Vec<NodeId>> = tree.nodes().map(|n| n.children().to_vec()).collect();
        let added = tree.establish_hierarchy().expect("second pass");
        let twice: Vec<Vec<NodeId>> = tree.nodes().map(|n| n.children().to_vec()).collect();

        prop_assert_eq!(added, 0);
        prop_assert_eq!(&once, &twice);

        for node in tree.nodes() {
            let mut expected: Vec<NodeId> = tree
                .nodes()
                .filter(|candidate| candidate.parent() == Some(node.id()))
                .map(|candidate| candidate.id())
                .collect();
            let mut actual = node.children().to_vec();
            expected.sort();
            actual.sort();
            prop_assert_eq!(expected, actual);
        }
        prop_assert_eq!(ids.len(), tree.node_count());
    }

    #[test]
    fn child_depth_is_parent_depth_plus_one(parents in proptest::collection::vec(0usize..64, 1..48)) {
        let (tree, ids) = build_tree(&parents);

        for id in ids.iter().skip(1) {
            let node = tree.node(*id).expect("node");
            let parent = node.parent().expect("non-root has a parent");
            let depth = tree.depth(*id).expect("depth");
            prop_assert_eq!(depth, tree.depth(parent).expect("parent depth") + 1);

            let path: Vec<NodeId> = tree.trajectory(*id).expect("trajectory").map(|n| n.id()).collect();
            prop_assert_eq!(path.len(), depth);
            prop_assert_eq!(path.first().copied(), Some(*id));
            prop_assert_eq!(path.last().copied(), Some(NodeId::ROOT));
        }
    }
}
