use anyhow::{bail, Result};
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Graph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Sentinel kind for dependency targets that cannot be found in the catalog.
pub const UNRESOLVED_KIND: &str = "N/A";

/// A catalog object (or dangling reference) as seen by the call graph.
///
/// Identity is the (bucket_name, object_name) pair; `kind` and `exists` are
/// fixed when the node is first registered and never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphNode {
    pub bucket_name: String,
    pub object_name: String,
    pub kind: String,
    pub exists: bool,
}

impl GraphNode {
    pub fn new(bucket_name: String, object_name: String, kind: String, exists: bool) -> Self {
        Self {
            bucket_name,
            object_name,
            kind,
            exists,
        }
    }
}

/// Directed "depends on" relation between two graph nodes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependsOn;

pub type DependencyGraph = Graph<GraphNode, DependsOn, Directed>;

/// A pair of node indices describing one edge in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeEndpoints {
    pub from: NodeIndex,
    pub to: NodeIndex,
}

/// Owns the call graph for one report request.
///
/// Nodes are deduplicated by (bucket, name) identity with first-insertion-wins
/// semantics; edges are an ordered, non-deduplicated sequence. The holder is
/// append-only and discarded after the report is produced.
pub struct CallGraphHolder {
    graph: DependencyGraph,
    node_map: HashMap<(String, String), NodeIndex>,
}

impl CallGraphHolder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Register a node, returning the index of the stored node.
    ///
    /// If the identity is already present the existing node is returned
    /// unchanged: `kind` and `exists` from a repeat call are ignored.
    pub fn add_node(&mut self, bucket: &str, name: &str, kind: &str, exists: bool) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&(bucket.to_string(), name.to_string())) {
            return index;
        }
        let index = self.graph.add_node(GraphNode::new(
            bucket.to_string(),
            name.to_string(),
            kind.to_string(),
            exists,
        ));
        self.node_map
            .insert((bucket.to_string(), name.to_string()), index);
        index
    }

    /// Append a directed depends-on edge between two registered nodes.
    ///
    /// Passing an index that does not belong to this holder is a caller bug
    /// and fails fast rather than silently dropping the edge. Self-loops and
    /// duplicate edges are stored as-is.
    pub fn add_depends_on_edge(&mut self, from: NodeIndex, to: NodeIndex) -> Result<EdgeIndex> {
        if self.graph.node_weight(from).is_none() {
            bail!("edge source {:?} is not a node of this call graph", from);
        }
        if self.graph.node_weight(to).is_none() {
            bail!("edge target {:?} is not a node of this call graph", to);
        }
        Ok(self.graph.add_edge(from, to, DependsOn))
    }

    /// Look up a registered node index by identity.
    pub fn node_index(&self, bucket: &str, name: &str) -> Option<NodeIndex> {
        self.node_map
            .get(&(bucket.to_string(), name.to_string()))
            .copied()
    }

    pub fn node(&self, index: NodeIndex) -> Option<&GraphNode> {
        self.graph.node_weight(index)
    }

    /// All nodes, in no particular order.
    pub fn node_set(&self) -> Vec<&GraphNode> {
        self.graph.node_weights().collect()
    }

    /// Edge endpoint pairs in insertion order.
    pub fn edges(&self) -> Vec<EdgeEndpoints> {
        self.graph
            .edge_references()
            .map(|edge| EdgeEndpoints {
                from: edge.source(),
                to: edge.target(),
            })
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Distinct bucket names across all stored nodes, callers and callees alike.
    pub fn bucket_set(&self) -> BTreeSet<String> {
        self.graph
            .node_weights()
            .map(|node| node.bucket_name.clone())
            .collect()
    }

    /// Distinct object names across all stored nodes.
    pub fn object_set(&self) -> BTreeSet<String> {
        self.graph
            .node_weights()
            .map(|node| node.object_name.clone())
            .collect()
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }
}

impl Default for CallGraphHolder {
    fn default() -> Self {
        Self::new()
    }
}
