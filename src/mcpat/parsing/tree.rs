//! Parse tree arena
//!
//! All nodes of one report live in a single [`ParseTree`]; nodes refer to each other by
//! [`NodeId`]. A node's children are an ordered id list and its parent is a plain id kept
//! in sync by the mutation methods below, so upward lookups never fight ownership.
//!
//! Detaching a node (taking it out of its parent's child list) does not free it, it just
//! becomes unreachable. Every traversal starts from the root, so detached nodes are
//! invisible to the rest of the pipeline.

use crate::mcpat::lexing::{LexedLine, TokenKind};
use serde::Serialize;
use std::collections::BTreeSet;

/// Index of a node inside its [`ParseTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One node: a token kind, its payload, and where it came from.
///
/// `depth` and `line_number` are `None` for synthetic nodes (the root, and nodes created
/// by the passes). The root's missing depth sorts below every real depth.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    pub kind: TokenKind,
    pub payload: Vec<String>,
    pub depth: Option<usize>,
    pub line_number: Option<usize>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl ParseNode {
    /// First payload field: the label for word-shape kinds, the whole line otherwise.
    pub fn label(&self) -> &str {
        self.payload.first().map(String::as_str).unwrap_or("")
    }

    /// Second payload field, if the kind carries one.
    pub fn value(&self) -> Option<&str> {
        self.payload.get(1).map(String::as_str)
    }
}

/// Structural snapshot of a subtree (kind, payload and children only).
///
/// Two trees with equal outlines are the same tree as far as the pipeline is concerned;
/// arena layout and detached nodes are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outline {
    pub kind: TokenKind,
    pub payload: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Outline>,
}

#[derive(Debug, Clone)]
pub struct ParseTree {
    nodes: Vec<ParseNode>,
    root: NodeId,
}

impl Default for ParseTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseTree {
    /// An empty tree: just the synthetic root.
    pub fn new() -> Self {
        let root = ParseNode {
            kind: TokenKind::Root,
            payload: Vec::new(),
            depth: None,
            line_number: None,
            parent: None,
            children: Vec::new(),
        };
        ParseTree {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &ParseNode {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> TokenKind {
        self.nodes[id.0].kind
    }

    pub fn label(&self, id: NodeId) -> &str {
        self.nodes[id.0].label()
    }

    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].value()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Create a detached node.
    pub fn add_node(
        &mut self,
        kind: TokenKind,
        payload: Vec<String>,
        depth: Option<usize>,
        line_number: Option<usize>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ParseNode {
            kind,
            payload,
            depth,
            line_number,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached node from a lexed line.
    pub fn add_line(&mut self, line: &LexedLine) -> NodeId {
        self.add_node(
            line.token.kind,
            line.token.payload.clone(),
            Some(line.depth),
            Some(line.line_number),
        )
    }

    /// Create a detached synthetic node with the given label (and value).
    pub fn add_synthetic(&mut self, kind: TokenKind, payload: &[&str]) -> NodeId {
        let payload = payload.iter().map(|s| s.to_string()).collect();
        self.add_node(kind, payload, None, None)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert `children` into `parent`'s child list starting at `index`.
    pub fn insert_children(&mut self, parent: NodeId, index: usize, children: Vec<NodeId>) {
        for &child in &children {
            self.nodes[child.0].parent = Some(parent);
        }
        let list = &mut self.nodes[parent.0].children;
        let index = index.min(list.len());
        list.splice(index..index, children);
    }

    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.insert_children(parent, index, vec![child]);
    }

    /// Detach and return the child at `index`.
    pub fn remove_child(&mut self, parent: NodeId, index: usize) -> NodeId {
        let child = self.nodes[parent.0].children.remove(index);
        self.nodes[child.0].parent = None;
        child
    }

    /// Detach and return all children of `id`.
    pub fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for &child in &children {
            self.nodes[child.0].parent = None;
        }
        children
    }

    /// Replace the whole child list of `id`.
    pub fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        self.take_children(id);
        for &child in &children {
            self.nodes[child.0].parent = Some(id);
        }
        self.nodes[id.0].children = children;
    }

    /// Replace the label (first payload field) of a node.
    pub fn rename(&mut self, id: NodeId, label: &str) {
        let payload = &mut self.nodes[id.0].payload;
        match payload.first_mut() {
            Some(first) => *first = label.to_string(),
            None => payload.push(label.to_string()),
        }
    }

    /// Change a node's kind, keeping its payload and children.
    pub fn set_kind(&mut self, id: NodeId, kind: TokenKind) {
        self.nodes[id.0].kind = kind;
    }

    /// Deep-copy a subtree into new detached nodes, keeping line numbers.
    pub fn copy_subtree(&mut self, id: NodeId) -> NodeId {
        let source = self.nodes[id.0].clone();
        let copy = self.add_node(
            source.kind,
            source.payload,
            source.depth,
            source.line_number,
        );
        for child in source.children {
            let child_copy = self.copy_subtree(child);
            self.append_child(copy, child_copy);
        }
        copy
    }

    /// Position of `child` in its parent's child list.
    pub fn position(&self, child: NodeId) -> Option<usize> {
        let parent = self.parent(child)?;
        self.children(parent).iter().position(|&c| c == child)
    }

    /// First child of `parent` with the given kind and label.
    pub fn find_child(&self, parent: NodeId, kind: TokenKind, label: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.kind(c) == kind && self.label(c) == label)
    }

    /// All reachable nodes below `id`, in pre-order (excluding `id`).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Every reachable node including the root, in pre-order.
    pub fn reachable(&self) -> Vec<NodeId> {
        let mut out = vec![self.root];
        out.extend(self.descendants(self.root));
        out
    }

    /// Distinct source lines of the reachable attribute nodes.
    ///
    /// Reshaping may copy attributes (the split load/store queue); copies keep their
    /// original line number, so this set measures how much report data is still in the
    /// tree, not how many nodes hold it.
    pub fn attribute_lines(&self) -> BTreeSet<usize> {
        self.reachable()
            .into_iter()
            .filter(|&id| self.kind(id) == TokenKind::Attribute)
            .filter_map(|id| self.node(id).line_number)
            .collect()
    }

    /// Structural snapshot of the subtree at `id`.
    pub fn outline_of(&self, id: NodeId) -> Outline {
        let node = self.node(id);
        Outline {
            kind: node.kind,
            payload: node.payload.clone(),
            children: node
                .children
                .iter()
                .map(|&child| self.outline_of(child))
                .collect(),
        }
    }

    pub fn outline(&self) -> Outline {
        self.outline_of(self.root)
    }
}
