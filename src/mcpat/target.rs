//! Target hierarchy
//!
//! The simulator-side component tree that results are written into. It is built by
//! whoever owns the machine model; this crate only fills the per-node result slot and
//! never adds, removes or reorders nodes.
//!
//! Hierarchies can be built in code ([`TargetTree::new`] + [`TargetTree::add_child`]) or
//! described declaratively as a [`ComponentSpec`] in YAML or JSON:
//!
//! ```yaml
//! name: root
//! type: root
//! children:
//!   - name: system
//!     type: system
//!     children:
//!       - name: core0
//!         type: core
//!       - name: l2
//!         type: shared-cache-l2
//!         optional: true
//! ```

use crate::mcpat::importing::record::ResultRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of component categories; selects the translator used for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    Root,
    System,
    Core,
    InstructionFetchUnit,
    InstructionCache,
    BranchTargetBuffer,
    BranchPredictor,
    LoadStoreUnit,
    DataCache,
    LoadQueue,
    StoreQueue,
    MemoryManagementUnit,
    Itlb,
    Dtlb,
    ExecutionUnit,
    RegisterFiles,
    IntegerRegisterFile,
    FloatRegisterFile,
    InstructionScheduler,
    InstructionWindow,
    FpInstructionWindow,
    IntegerAlu,
    FloatingPointUnit,
    ComplexAlu,
    L1Directory,
    L2Directory,
    SharedCacheL2,
    SharedCacheL3,
    Interconnect,
    MemoryController,
    Nic,
    Pcie,
    FlashController,
    Generic,
}

impl ComponentType {
    pub const ALL: [ComponentType; 34] = [
        ComponentType::Root,
        ComponentType::System,
        ComponentType::Core,
        ComponentType::InstructionFetchUnit,
        ComponentType::InstructionCache,
        ComponentType::BranchTargetBuffer,
        ComponentType::BranchPredictor,
        ComponentType::LoadStoreUnit,
        ComponentType::DataCache,
        ComponentType::LoadQueue,
        ComponentType::StoreQueue,
        ComponentType::MemoryManagementUnit,
        ComponentType::Itlb,
        ComponentType::Dtlb,
        ComponentType::ExecutionUnit,
        ComponentType::RegisterFiles,
        ComponentType::IntegerRegisterFile,
        ComponentType::FloatRegisterFile,
        ComponentType::InstructionScheduler,
        ComponentType::InstructionWindow,
        ComponentType::FpInstructionWindow,
        ComponentType::IntegerAlu,
        ComponentType::FloatingPointUnit,
        ComponentType::ComplexAlu,
        ComponentType::L1Directory,
        ComponentType::L2Directory,
        ComponentType::SharedCacheL2,
        ComponentType::SharedCacheL3,
        ComponentType::Interconnect,
        ComponentType::MemoryController,
        ComponentType::Nic,
        ComponentType::Pcie,
        ComponentType::FlashController,
        ComponentType::Generic,
    ];
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Declarative description of a (sub)hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default = "default_export", skip_serializing_if = "is_exported")]
    pub export: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentSpec>,
}

fn default_export() -> bool {
    true
}

fn is_exported(export: &bool) -> bool {
    *export
}

impl ComponentSpec {
    pub fn new(name: &str, kind: ComponentType) -> Self {
        ComponentSpec {
            name: name.to_string(),
            kind,
            optional: false,
            export: true,
            children: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.export = false;
        self
    }

    pub fn child(mut self, child: ComponentSpec) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(usize);

#[derive(Debug, Clone)]
pub struct TargetNode {
    pub name: String,
    pub kind: ComponentType,
    /// Absence from a report is not an error (on top of the type's own optionality)
    pub optional: bool,
    /// `false` excludes the node and its subtree from importing
    pub exported: bool,
    pub result: Option<ResultRecord>,
    parent: Option<TargetId>,
    children: Vec<TargetId>,
}

#[derive(Debug, Clone)]
pub struct TargetTree {
    nodes: Vec<TargetNode>,
    root: TargetId,
}

impl TargetTree {
    /// A hierarchy with only a root node.
    pub fn new(root_name: &str) -> Self {
        TargetTree {
            nodes: vec![TargetNode {
                name: root_name.to_string(),
                kind: ComponentType::Root,
                optional: false,
                exported: true,
                result: None,
                parent: None,
                children: Vec::new(),
            }],
            root: TargetId(0),
        }
    }

    pub fn root(&self) -> TargetId {
        self.root
    }

    pub fn add_child(&mut self, parent: TargetId, name: &str, kind: ComponentType) -> TargetId {
        let id = TargetId(self.nodes.len());
        self.nodes.push(TargetNode {
            name: name.to_string(),
            kind,
            optional: false,
            exported: true,
            result: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: TargetId) -> &TargetNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: TargetId) -> &mut TargetNode {
        &mut self.nodes[id.0]
    }

    pub fn children(&self, id: TargetId) -> &[TargetId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: TargetId) -> Option<TargetId> {
        self.nodes[id.0].parent
    }

    pub fn result(&self, id: TargetId) -> Option<&ResultRecord> {
        self.nodes[id.0].result.as_ref()
    }

    pub fn set_result(&mut self, id: TargetId, result: Option<ResultRecord>) {
        self.nodes[id.0].result = result;
    }

    /// Slash-separated names from the root, e.g. `root/system/core0`.
    pub fn path(&self, id: TargetId) -> String {
        let mut names = vec![self.nodes[id.0].name.as_str()];
        let mut current = self.parent(id);
        while let Some(parent) = current {
            names.push(self.nodes[parent.0].name.as_str());
            current = self.parent(parent);
        }
        names.reverse();
        names.join("/")
    }

    /// Look a node up by its [`path`](Self::path).
    pub fn find(&self, path: &str) -> Option<TargetId> {
        let mut parts = path.split('/');
        if parts.next()? != self.nodes[self.root.0].name {
            return None;
        }
        parts.try_fold(self.root, |current, name| {
            self.children(current)
                .iter()
                .copied()
                .find(|&c| self.nodes[c.0].name == name)
        })
    }

    /// All nodes in pre-order, root first.
    pub fn pre_order(&self) -> Vec<TargetId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn from_spec(spec: &ComponentSpec) -> Self {
        let mut tree = TargetTree::new(&spec.name);
        let root = tree.root;
        tree.nodes[root.0].kind = spec.kind;
        tree.nodes[root.0].optional = spec.optional;
        tree.nodes[root.0].exported = spec.export;
        tree.add_specs(root, &spec.children);
        tree
    }

    fn add_specs(&mut self, parent: TargetId, specs: &[ComponentSpec]) {
        for spec in specs {
            let id = self.add_child(parent, &spec.name, spec.kind);
            self.nodes[id.0].optional = spec.optional;
            self.nodes[id.0].exported = spec.export;
            self.add_specs(id, &spec.children);
        }
    }

    pub fn to_spec(&self) -> ComponentSpec {
        self.spec_of(self.root)
    }

    fn spec_of(&self, id: TargetId) -> ComponentSpec {
        let node = &self.nodes[id.0];
        ComponentSpec {
            name: node.name.clone(),
            kind: node.kind,
            optional: node.optional,
            export: node.exported,
            children: node.children.iter().map(|&c| self.spec_of(c)).collect(),
        }
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        let spec: ComponentSpec = serde_yaml::from_str(text)?;
        Ok(Self::from_spec(&spec))
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let spec: ComponentSpec = serde_json::from_str(text)?;
        Ok(Self::from_spec(&spec))
    }
}
