use std::collections::BTreeMap;

use serde::Serialize;

use crate::value::PropValue;

pub type Properties = BTreeMap<String, PropValue>;

/// Index of a node inside its [`UiTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiNode {
    pub kind: String,
    pub name: String,
    pub properties: Properties,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl UiNode {
    fn new(kind: impl Into<String>, name: impl Into<String>, properties: Properties) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            properties,
            children: Vec::new(),
            parent: None,
        }
    }
}

/// One recovered window: a rooted tree stored as a flat arena.
///
/// Built only through [`UiTreeBuilder`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct UiTree {
    nodes: Vec<UiNode>,
}

impl UiTree {
    pub fn root_id(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn root(&self) -> &UiNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: NodeId) -> &UiNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.root().name
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &UiNode> + '_ {
        self.nodes[id.0]
            .children
            .iter()
            .map(move |child| &self.nodes[child.0])
    }

    pub fn parent(&self, id: NodeId) -> Option<&UiNode> {
        self.nodes[id.0].parent.map(|parent| &self.nodes[parent.0])
    }

    /// Pre-order walk from the root, children in discovery order.
    pub fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            order.push(id);
            for child in self.nodes[id.0].children.iter().rev() {
                stack.push(*child);
            }
        }
        order
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.walk()
            .into_iter()
            .find(|id| self.nodes[id.0].name == name)
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        self.snapshot_from(NodeId::ROOT)
    }

    fn snapshot_from(&self, id: NodeId) -> NodeSnapshot {
        let node = &self.nodes[id.0];
        NodeSnapshot {
            kind: node.kind.clone(),
            name: node.name.clone(),
            properties: node.properties.clone(),
            children: node
                .children
                .iter()
                .map(|child| self.snapshot_from(*child))
                .collect(),
        }
    }
}

/// Owned nested view of a subtree, for serialization and assertions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSnapshot {
    pub kind: String,
    pub name: String,
    pub properties: Properties,
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|child| child.name.as_str()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct UiTreeBuilder {
    nodes: Vec<UiNode>,
}

impl UiTreeBuilder {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            nodes: vec![UiNode::new(kind, name, Properties::new())],
        }
    }

    pub fn root_id(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Adds a node that is not attached anywhere yet.
    pub fn add_detached(
        &mut self,
        kind: impl Into<String>,
        name: impl Into<String>,
        properties: Properties,
    ) -> NodeId {
        self.nodes.push(UiNode::new(kind, name, properties));
        NodeId(self.nodes.len() - 1)
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        kind: impl Into<String>,
        name: impl Into<String>,
        properties: Properties,
    ) -> NodeId {
        let id = self.add_detached(kind, name, properties);
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Links `child` under `parent`. Returns `false` without changing anything
    /// when `child` is the root, is already attached, or is an ancestor of
    /// `parent`.
    pub fn attach(&mut self, child: NodeId, parent: NodeId) -> bool {
        if child == NodeId::ROOT || self.nodes[child.0].parent.is_some() {
            return false;
        }
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return false;
            }
            cursor = self.nodes[current.0].parent;
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        true
    }

    pub fn set_property(&mut self, id: NodeId, name: impl Into<String>, value: PropValue) {
        self.nodes[id.0].properties.insert(name.into(), value);
    }

    pub fn node(&self, id: NodeId) -> &UiNode {
        &self.nodes[id.0]
    }

    /// Nodes still detached at this point are placed under the root, in
    /// creation order.
    pub fn finish(mut self) -> UiTree {
        for index in 1..self.nodes.len() {
            if self.nodes[index].parent.is_none() {
                self.nodes[index].parent = Some(NodeId::ROOT);
                self.nodes[0].children.push(NodeId(index));
            }
        }
        UiTree { nodes: self.nodes }
    }
}
