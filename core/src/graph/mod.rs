pub mod serialization;

use crate::{
    errors::{BioGraphsError, Result},
    serializer::{load_resource, save_resource},
    types::{AttributeValue, Edge, NodeId, NodeType, RelationType},
    util::is_unit_interval,
};
use smartstring::alias::String as SmartString;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

pub const LABEL: &str = "label";
pub const NAME: &str = "name";
pub const INFO: &str = "info";
pub const SEQUENCE: &str = "sequence";
pub const CELLULAR_COMPONENTS: &str = "cellular_components";
pub const MOLECULAR_FUNCTIONS: &str = "molecular_functions";
pub const BIOLOGICAL_PROCESSES: &str = "biological_processes";
/// Numeric vector with one normalized expression rank per tissue.
pub const EXPRESSION_DATA: &str = "expression_data";
pub const METABOLITES: &str = "metabolites";
pub const PATHWAYS: &str = "pathways";

/// Type and attributes of a single node.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NodeData {
    pub node_type: NodeType,
    pub attributes: BTreeMap<SmartString, AttributeValue>,
}

impl NodeData {
    pub fn new(node_type: NodeType) -> NodeData {
        NodeData {
            node_type,
            attributes: BTreeMap::new(),
        }
    }

    /// Builder style helper to add an attribute.
    pub fn with_attribute<V: Into<AttributeValue>>(mut self, name: &str, value: V) -> NodeData {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Returns the text list attribute `name` or an empty slice if this node does not have it.
    pub fn text_list(&self, name: &str) -> &[String] {
        self.get(name)
            .and_then(|v| v.as_text_list())
            .unwrap_or_default()
    }
}

/// Attributes of an edge.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EdgeData<R> {
    /// Confidence score in [0, 1]. Interaction edges always have one.
    pub score: Option<f64>,
    pub relation: Option<R>,
}

impl<R> EdgeData<R> {
    pub fn scored(score: f64) -> EdgeData<R> {
        EdgeData {
            score: Some(score),
            relation: None,
        }
    }

    pub fn with_relation(mut self, relation: R) -> EdgeData<R> {
        self.relation = Some(relation);
        self
    }
}

/// Some general statistical numbers about a graph.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GraphStatistic {
    pub directed: bool,
    pub nodes: usize,
    pub edges: usize,
    pub avg_degree: f64,
    pub max_degree: usize,
    /// Number of nodes without any edge.
    pub isolated_nodes: usize,
}

impl std::fmt::Display for GraphStatistic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "nodes={}, edges={}, avg_degree={:.2}, max_degree={}, isolated_nodes={}",
            self.nodes, self.edges, self.avg_degree, self.max_degree, self.isolated_nodes
        )?;
        if self.directed {
            write!(f, ", directed")?;
        }
        Ok(())
    }
}

/// A representation of a graph including node attributes and attributed edges.
///
/// Nodes are kept in a map from their identifier to the attribute record and edges in
/// an adjacency map which carries the edge attributes. Undirected edges are stored in
/// both directions, directed graphs additionally keep an inverse adjacency to find the
/// predecessors of a node.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(bound(deserialize = "R: RelationType"))]
pub struct Graph<R: RelationType> {
    directed: bool,
    nodes: BTreeMap<NodeId, NodeData>,
    edges: BTreeMap<NodeId, BTreeMap<NodeId, EdgeData<R>>>,
    inverse_edges: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl<R: RelationType> Graph<R> {
    /// Create a new and empty graph.
    pub fn new(directed: bool) -> Graph<R> {
        Graph {
            directed,
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            inverse_edges: BTreeMap::new(),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Add a node or replace the type and attributes of an existing one.
    pub fn add_node<S: Into<NodeId>>(&mut self, id: S, data: NodeData) {
        self.nodes.insert(id.into(), data);
    }

    /// Add an edge between two existing nodes. An existing edge between the same nodes is replaced.
    pub fn add_edge<S, T>(&mut self, source: S, target: T, data: EdgeData<R>) -> Result<()>
    where
        S: Into<NodeId>,
        T: Into<NodeId>,
    {
        let source = source.into();
        let target = target.into();
        for n in [&source, &target] {
            if !self.nodes.contains_key(n) {
                return Err(BioGraphsError::MissingNode(n.clone()));
            }
        }
        if let Some(score) = data.score {
            if !is_unit_interval(score) {
                return Err(BioGraphsError::InvalidEdgeScore {
                    from: source,
                    to: target,
                    score,
                });
            }
        }

        if self.directed {
            self.inverse_edges
                .entry(target.clone())
                .or_default()
                .insert(source.clone());
        } else if source != target {
            self.edges
                .entry(target.clone())
                .or_default()
                .insert(source.clone(), data.clone());
        }
        self.edges.entry(source).or_default().insert(target, data);
        Ok(())
    }

    /// Remove the edge between `source` and `target` and return its attributes.
    pub fn remove_edge(&mut self, source: &str, target: &str) -> Option<EdgeData<R>> {
        let removed = self.edges.get_mut(source)?.remove(target)?;
        if self.directed {
            if let Some(ingoing) = self.inverse_edges.get_mut(target) {
                ingoing.remove(source);
            }
        } else if let Some(outgoing) = self.edges.get_mut(target) {
            outgoing.remove(source);
        }
        Some(removed)
    }

    /// Remove a node and all edges where it is the source or the target.
    pub fn remove_node(&mut self, id: &str) -> Option<NodeData> {
        let removed = self.nodes.remove(id)?;
        if let Some(outgoing) = self.edges.remove(id) {
            for target in outgoing.keys() {
                if self.directed {
                    if let Some(ingoing) = self.inverse_edges.get_mut(target) {
                        ingoing.remove(id);
                    }
                } else if let Some(back) = self.edges.get_mut(target) {
                    back.remove(id);
                }
            }
        }
        if let Some(ingoing) = self.inverse_edges.remove(id) {
            for source in ingoing {
                if let Some(outgoing) = self.edges.get_mut(&source) {
                    outgoing.remove(id);
                }
            }
        }
        Some(removed)
    }

    pub fn node(&self, id: &str) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    pub fn node_attribute(&self, id: &str, name: &str) -> Option<&AttributeValue> {
        self.nodes.get(id).and_then(|n| n.get(name))
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get the attributes of the edge from `source` to `target`.
    /// For undirected graphs the order of the two nodes is irrelevant.
    pub fn edge(&self, source: &str, target: &str) -> Option<&EdgeData<R>> {
        self.edges.get(source).and_then(|outgoing| outgoing.get(target))
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.edge(source, target).is_some()
    }

    /// Iterate over all edges. Undirected edges are only returned once, with the
    /// smaller node identifier as source.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId, &EdgeData<R>)> + '_ {
        let directed = self.directed;
        self.edges.iter().flat_map(move |(source, outgoing)| {
            outgoing
                .iter()
                .filter(move |(target, _)| directed || source <= *target)
                .map(move |(target, data)| (source, target, data))
        })
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, &NodeData)> + '_ {
        self.nodes.iter()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.nodes.keys()
    }

    pub fn successors<'a>(&'a self, id: &str) -> Box<dyn Iterator<Item = &'a NodeId> + 'a> {
        match self.edges.get(id) {
            Some(outgoing) => Box::new(outgoing.keys()),
            None => Box::new(std::iter::empty()),
        }
    }

    pub fn predecessors<'a>(&'a self, id: &str) -> Box<dyn Iterator<Item = &'a NodeId> + 'a> {
        if !self.directed {
            return self.successors(id);
        }
        match self.inverse_edges.get(id) {
            Some(ingoing) => Box::new(ingoing.iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    /// Adjacent nodes: the successors for directed graphs, all connected nodes otherwise.
    pub fn neighbors<'a>(&'a self, id: &str) -> Box<dyn Iterator<Item = &'a NodeId> + 'a> {
        self.successors(id)
    }

    /// Number of edges incident to the node, a self loop is counted twice.
    pub fn degree(&self, id: &str) -> usize {
        let outgoing = self.edges.get(id).map(|o| o.len()).unwrap_or(0);
        let self_loop = usize::from(self.contains_edge(id, id));
        if self.directed {
            let ingoing = self.inverse_edges.get(id).map(|i| i.len()).unwrap_or(0);
            outgoing + ingoing
        } else {
            outgoing + self_loop
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Returns `true` if at least one node carries the attribute `name`.
    pub fn has_node_attribute(&self, name: &str) -> bool {
        self.nodes.values().any(|n| n.attributes.contains_key(name))
    }

    /// Create a new graph that only contains the given nodes and the edges between them.
    /// Identifiers that are not part of this graph are ignored.
    pub fn subgraph<'a, I>(&self, nodes: I) -> Graph<R>
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        let mut result = Graph::new(self.directed);
        for id in nodes {
            if let Some(data) = self.nodes.get(id) {
                result.nodes.insert(id.clone(), data.clone());
            }
        }
        for (source, outgoing) in &self.edges {
            if !result.nodes.contains_key(source) {
                continue;
            }
            for (target, data) in outgoing {
                if result.nodes.contains_key(target) {
                    result
                        .edges
                        .entry(source.clone())
                        .or_default()
                        .insert(target.clone(), data.clone());
                    if self.directed {
                        result
                            .inverse_edges
                            .entry(target.clone())
                            .or_default()
                            .insert(source.clone());
                    }
                }
            }
        }
        result
    }

    /// Remove all edges with a score less than or equal to `score_threshold`.
    ///
    /// Nodes which have no edges left afterwards are removed as well. Edges without a
    /// score are kept.
    pub fn remove_edges_by_threshold(&mut self, score_threshold: f64) {
        let to_remove: Vec<Edge> = self
            .edges()
            .filter(|(_, _, data)| matches!(data.score, Some(s) if s <= score_threshold))
            .map(|(source, target, _)| Edge {
                source: source.clone(),
                target: target.clone(),
            })
            .collect();
        for e in to_remove {
            self.remove_edge(&e.source, &e.target);
        }

        let orphans: Vec<NodeId> = self
            .nodes
            .keys()
            .filter(|n| self.degree(n) == 0)
            .cloned()
            .collect();
        for n in orphans {
            self.nodes.remove(&n);
        }
    }

    pub fn statistics(&self) -> GraphStatistic {
        let mut max_degree = 0;
        let mut sum_degree = 0;
        let mut isolated_nodes = 0;
        for id in self.nodes.keys() {
            let degree = self.degree(id);
            max_degree = max_degree.max(degree);
            sum_degree += degree;
            if degree == 0 {
                isolated_nodes += 1;
            }
        }
        let avg_degree = if self.nodes.is_empty() {
            0.0
        } else {
            sum_degree as f64 / self.nodes.len() as f64
        };
        GraphStatistic {
            directed: self.directed,
            nodes: self.nodes.len(),
            edges: self.edge_count(),
            avg_degree,
            max_degree,
            isolated_nodes,
        }
    }

    /// Save the graph to a single file at `location`.
    pub fn save_to(&self, location: &Path) -> Result<()> {
        save_resource(self, location)
    }

    /// Load a graph that has been written with [save_to(...)](#method.save_to).
    pub fn load_from(location: &Path) -> Result<Graph<R>> {
        let graph: Graph<R> = load_resource(location)?;
        debug!(
            "Loaded graph from {} with {} nodes",
            location.to_string_lossy(),
            graph.node_count()
        );
        Ok(graph)
    }
}
