use crate::node::AvlNode;

/// Check stored heights and the AVL condition of every node, plus the overall
/// height bound. Returns the number of nodes.
pub(crate) fn validate<K, V>(root: Option<&AvlNode<K, V>>) -> usize {
    fn walk<K, V>(node: Option<&AvlNode<K, V>>, count: &mut usize) -> u32 {
        let Some(node) = node else {
            return 0;
        };
        *count += 1;
        let left = walk(node.left(), count);
        let right = walk(node.right(), count);
        assert_eq!(
            node.height(),
            1 + left.max(right),
            "stored height must match children"
        );
        assert!(
            left.abs_diff(right) <= 1,
            "unbalanced node: left height {left}, right height {right}"
        );
        left.max(right) + 1
    }

    let mut count = 0;
    let height = walk(root, &mut count);
    let bound = 1.44 * ((count + 2) as f64).log2();
    assert!(
        f64::from(height) <= bound,
        "height {height} exceeds AVL bound {bound:.2} for {count} nodes"
    );
    count
}
