//! Fluent assertion API for report trees

use crate::mcpat::lexing::TokenKind;
use crate::mcpat::parsing::{NodeId, ParseTree};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a whole tree
pub fn assert_tree(tree: &ParseTree) -> TreeAssertion<'_> {
    TreeAssertion { tree }
}

// ============================================================================
// Tree Assertions
// ============================================================================

pub struct TreeAssertion<'a> {
    tree: &'a ParseTree,
}

impl<'a> TreeAssertion<'a> {
    fn root(&self) -> NodeAssertion<'a> {
        NodeAssertion {
            tree: self.tree,
            id: self.tree.root(),
            context: "root".to_string(),
        }
    }

    /// Assert the number of top-level nodes
    pub fn child_count(self, expected: usize) -> Self {
        self.root().child_count(expected);
        self
    }

    /// Assert on a top-level node by index
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        self.root().child(index, assertion);
        self
    }

    /// Assert on the top-level component with the given label
    pub fn component<F>(self, label: &str, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        self.root().component(label, assertion);
        self
    }

    /// Assert no top-level component carries the given label
    pub fn no_component(self, label: &str) -> Self {
        self.root().no_component(label);
        self
    }
}

// ============================================================================
// Node Assertions
// ============================================================================

pub struct NodeAssertion<'a> {
    tree: &'a ParseTree,
    id: NodeId,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn kind(self, expected: TokenKind) -> Self {
        let actual = self.tree.kind(self.id);
        assert_eq!(
            actual, expected,
            "{}: Expected kind {}, found {} ('{}')",
            self.context, expected, actual, self.tree.label(self.id)
        );
        self
    }

    pub fn label(self, expected: &str) -> Self {
        let actual = self.tree.label(self.id);
        assert_eq!(
            actual, expected,
            "{}: Expected label '{}', found '{}'",
            self.context, expected, actual
        );
        self
    }

    pub fn value(self, expected: &str) -> Self {
        let actual = self.tree.value(self.id);
        assert_eq!(
            actual,
            Some(expected),
            "{}: Expected value '{}' on '{}', found {:?}",
            self.context,
            expected,
            self.tree.label(self.id),
            actual
        );
        self
    }

    /// Assert the number of children
    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.tree.children(self.id).len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {} children: [{}]",
            self.context,
            expected,
            actual,
            summarize_children(self.tree, self.id)
        );
        self
    }

    /// Assert on a specific child by index
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let children = self.tree.children(self.id);
        assert!(
            index < children.len(),
            "{}: Child index {} out of bounds (node has {} children)",
            self.context,
            index,
            children.len()
        );
        assertion(NodeAssertion {
            tree: self.tree,
            id: children[index],
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }

    /// Assert on the child component with the given label
    pub fn component<F>(self, label: &str, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let Some(id) = self.tree.find_child(self.id, TokenKind::Component, label) else {
            panic!(
                "{}: Expected a component '{}', found: [{}]",
                self.context,
                label,
                summarize_children(self.tree, self.id)
            );
        };
        assertion(NodeAssertion {
            tree: self.tree,
            id,
            context: format!("{}/{}", self.context, label),
        });
        self
    }

    /// Assert on the child parameter with the given label
    pub fn parameter<F>(self, label: &str, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let Some(id) = self.tree.find_child(self.id, TokenKind::Parameter, label) else {
            panic!(
                "{}: Expected a parameter '{}', found: [{}]",
                self.context,
                label,
                summarize_children(self.tree, self.id)
            );
        };
        assertion(NodeAssertion {
            tree: self.tree,
            id,
            context: format!("{}/{}", self.context, label),
        });
        self
    }

    pub fn no_component(self, label: &str) -> Self {
        assert!(
            self.tree
                .find_child(self.id, TokenKind::Component, label)
                .is_none(),
            "{}: Expected no component '{}', found: [{}]",
            self.context,
            label,
            summarize_children(self.tree, self.id)
        );
        self
    }

    /// Assert a direct attribute child's value
    pub fn attribute(self, label: &str, expected: &str) -> Self {
        let actual = self
            .tree
            .find_child(self.id, TokenKind::Attribute, label)
            .and_then(|id| self.tree.value(id));
        assert_eq!(
            actual,
            Some(expected),
            "{}: Expected attribute '{} = {}', found {:?}",
            self.context,
            label,
            expected,
            actual
        );
        self
    }

    /// Assert the labels of the component children, in order
    pub fn component_labels(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .tree
            .children(self.id)
            .iter()
            .filter(|&&c| self.tree.kind(c) == TokenKind::Component)
            .map(|&c| self.tree.label(c))
            .collect();
        assert_eq!(
            actual, expected,
            "{}: Component children differ",
            self.context
        );
        self
    }
}

fn summarize_children(tree: &ParseTree, id: NodeId) -> String {
    tree.children(id)
        .iter()
        .map(|&c| {
            let label = tree.label(c);
            if label.is_empty() {
                tree.kind(c).to_string()
            } else {
                format!("{} '{}'", tree.kind(c), label)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Tests for Assertions (these tests inspect raw trees)
// ============================================================================
