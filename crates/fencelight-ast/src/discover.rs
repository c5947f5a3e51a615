//! Read-only code fence discovery and in-place splicing.

use crate::node::{CodeBlock, Node};

/// A code fence found in a tree, with enough location data to replace it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedCodeBlock {
    /// Child indices from the root to the parent container.
    pub parent: Vec<usize>,
    /// Index within the parent's children.
    pub position: usize,
    pub block: CodeBlock,
}

impl LocatedCodeBlock {
    /// Full child-index path from the root to the fence itself.
    ///
    /// Sorting by this path orders fences in document order.
    #[must_use]
    pub fn path(&self) -> Vec<usize> {
        let mut path = self.parent.clone();
        path.push(self.position);
        path
    }
}

impl Node {
    /// Collect every code fence in document order. Does not mutate.
    #[must_use]
    pub fn code_blocks(&self) -> Vec<LocatedCodeBlock> {
        let mut found = Vec::new();
        let mut path = Vec::new();
        collect(self, &mut path, &mut found);
        found
    }

    /// Child collection at `path` (indices from this node).
    pub fn collection_mut(&mut self, path: &[usize]) -> Option<&mut Vec<Node>> {
        let mut node = self;
        for &index in path {
            node = node.children_mut()?.get_mut(index)?;
        }
        node.children_mut()
    }

    /// Replace the fence at `located` with `replacement`.
    ///
    /// Returns `false` and leaves the tree untouched when the location no
    /// longer holds the same code fence.
    pub fn splice(&mut self, located: &LocatedCodeBlock, replacement: Vec<Node>) -> bool {
        let Some(children) = self.collection_mut(&located.parent) else {
            return false;
        };
        match children.get(located.position) {
            Some(Node::Code(block)) if *block == located.block => {}
            _ => return false,
        }
        let _removed: Vec<Node> = children
            .splice(located.position..=located.position, replacement)
            .collect();
        true
    }
}

fn collect(node: &Node, path: &mut Vec<usize>, found: &mut Vec<LocatedCodeBlock>) {
    let Some(children) = node.children() else {
        return;
    };
    for (position, child) in children.iter().enumerate() {
        match child {
            Node::Code(block) => found.push(LocatedCodeBlock {
                parent: path.clone(),
                position,
                block: block.clone(),
            }),
            Node::Element { .. } => {
                path.push(position);
                collect(child, path, found);
                path.pop();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ElementKind;
    use pretty_assertions::assert_eq;

    fn sample() -> Node {
        Node::root(vec![
            Node::text("intro"),
            Node::code(Some("rust"), None, "a"),
            Node::element(
                ElementKind::BlockQuote,
                vec![Node::text("quote"), Node::code(Some("js"), Some("{1}"), "b")],
            ),
            Node::code(None, None, "c"),
        ])
    }

    #[test]
    fn test_code_blocks_document_order() {
        let blocks = sample().code_blocks();

        let summary: Vec<_> = blocks
            .iter()
            .map(|b| (b.parent.clone(), b.position, b.block.value.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![(vec![], 1, "a"), (vec![2], 1, "b"), (vec![], 3, "c")]
        );
    }

    #[test]
    fn test_path_orders_like_document() {
        let blocks = sample().code_blocks();
        let paths: Vec<_> = blocks.iter().map(LocatedCodeBlock::path).collect();
        assert_eq!(paths, vec![vec![1], vec![2, 1], vec![3]]);
        assert!(paths.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_code_blocks_does_not_mutate() {
        let tree = sample();
        let before = tree.clone();
        let _ = tree.code_blocks();
        assert_eq!(tree, before);
    }

    #[test]
    fn test_splice_replaces_single_node() {
        let mut tree = sample();
        let located = tree.code_blocks().remove(0);

        assert!(tree.splice(&located, vec![Node::html("1"), Node::html("2")]));

        let children = tree.children().unwrap();
        assert_eq!(children.len(), 5);
        assert_eq!(children[1], Node::html("1"));
        assert_eq!(children[2], Node::html("2"));
        assert_eq!(children[4], Node::code(None, None, "c"));
    }

    #[test]
    fn test_splice_nested() {
        let mut tree = sample();
        let located = tree.code_blocks().remove(1);

        assert!(tree.splice(&located, vec![Node::html("x")]));

        let quote = &tree.children().unwrap()[2];
        assert_eq!(quote.children().unwrap()[1], Node::html("x"));
    }

    #[test]
    fn test_splice_stale_location_is_noop() {
        let mut tree = sample();
        let blocks = tree.code_blocks();
        // Shift the second top-level fence by expanding the first one.
        assert!(tree.splice(&blocks[0], vec![Node::html("1"), Node::html("2")]));
        let before = tree.clone();

        assert!(!tree.splice(&blocks[2], vec![Node::html("y")]));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_collection_mut_invalid_path() {
        let mut tree = sample();
        assert!(tree.collection_mut(&[7]).is_none());
        assert!(tree.collection_mut(&[0]).is_none());
    }
}
