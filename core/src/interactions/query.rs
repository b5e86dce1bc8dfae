use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use regex::Regex;
use serde_json::Value;
use strum::IntoEnumIterator;

use super::InteractionGraph;
use crate::{
    errors::{BioGraphsError, Result},
    graph::{NodeData, EXPRESSION_DATA, INFO, METABOLITES, PATHWAYS, SEQUENCE},
    mappings::Mappings,
    ontology::Ontology,
    types::NodeId,
    util::is_unit_interval,
};

/// Set expression over gene ontology terms.
///
/// The JSON form is either a single GO id (`"GO:0006096"`) or a list starting with
/// one of the operators `and`, `or` and `not`, followed by the operands, which can
/// be nested queries themselves:
///
/// ```json
/// ["and", ["or", "GO:1", "GO:2"], ["not", "GO:3"], "GO:4"]
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OntologyQuery {
    /// Proteins annotated with the term in any of the ontologies.
    Term(String),
    And(Vec<OntologyQuery>),
    Or(Vec<OntologyQuery>),
    /// All proteins of the graph, minus the ones matched by any operand.
    Not(Vec<OntologyQuery>),
}

impl OntologyQuery {
    pub fn from_json(value: &Value) -> Result<OntologyQuery> {
        match value {
            Value::String(term) => Ok(OntologyQuery::Term(term.clone())),
            Value::Array(items) => match items.as_slice() {
                [] => Err(BioGraphsError::InvalidOntologyQuery(
                    "empty list".to_string(),
                )),
                [Value::String(op)] if is_operator(op) => {
                    Err(BioGraphsError::InvalidOntologyQuery(format!(
                        "operator '{}' without operands",
                        op
                    )))
                }
                [Value::String(term)] => Ok(OntologyQuery::Term(term.clone())),
                [Value::String(op), operands @ ..] => {
                    let operands = operands
                        .iter()
                        .map(OntologyQuery::from_json)
                        .collect::<Result<Vec<_>>>()?;
                    match op.as_str() {
                        "and" => Ok(OntologyQuery::And(operands)),
                        "or" => Ok(OntologyQuery::Or(operands)),
                        "not" => Ok(OntologyQuery::Not(operands)),
                        _ => Err(BioGraphsError::InvalidOntologyQuery(format!(
                            "unknown operator '{}', expected and, or or not",
                            op
                        ))),
                    }
                }
                [first, ..] => Err(BioGraphsError::InvalidOntologyQuery(format!(
                    "the first list element must be an operator, got {}",
                    first
                ))),
            },
            _ => Err(BioGraphsError::InvalidOntologyQuery(format!(
                "expected a GO id or a list, got {}",
                value
            ))),
        }
    }

    pub fn to_json(&self) -> Value {
        let list = |op: &str, operands: &[OntologyQuery]| {
            let mut items = vec![Value::String(op.to_string())];
            items.extend(operands.iter().map(|o| o.to_json()));
            Value::Array(items)
        };
        match self {
            OntologyQuery::Term(term) => Value::String(term.clone()),
            OntologyQuery::And(operands) => list("and", operands),
            OntologyQuery::Or(operands) => list("or", operands),
            OntologyQuery::Not(operands) => list("not", operands),
        }
    }

    /// Find all nodes of `graph` that satisfy the query.
    pub fn evaluate(&self, graph: &InteractionGraph, mappings: &Mappings) -> BTreeSet<NodeId> {
        match self {
            OntologyQuery::Term(go_id) => mappings
                .proteins_for_term(go_id)
                .into_iter()
                .filter(|p| graph.graph().contains_node(p))
                .cloned()
                .collect(),
            OntologyQuery::And(operands) => {
                let mut operands = operands.iter();
                let mut result = match operands.next() {
                    Some(first) => first.evaluate(graph, mappings),
                    None => return BTreeSet::new(),
                };
                for o in operands {
                    let matched = o.evaluate(graph, mappings);
                    result.retain(|n| matched.contains(n));
                }
                result
            }
            OntologyQuery::Or(operands) => operands
                .iter()
                .flat_map(|o| o.evaluate(graph, mappings))
                .collect(),
            OntologyQuery::Not(operands) => {
                let mut result: BTreeSet<NodeId> = graph.graph().node_ids().cloned().collect();
                for o in operands {
                    for n in o.evaluate(graph, mappings) {
                        result.remove(&n);
                    }
                }
                result
            }
        }
    }
}

fn is_operator(value: &str) -> bool {
    matches!(value, "and" | "or" | "not")
}

impl FromStr for OntologyQuery {
    type Err = BioGraphsError;

    /// Parse the JSON form of a query. Input which is not valid JSON is taken as a
    /// single GO id.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BioGraphsError::InvalidOntologyQuery(
                "empty query".to_string(),
            ));
        }
        match serde_json::from_str::<Value>(s) {
            Ok(value) => OntologyQuery::from_json(&value),
            Err(_) => Ok(OntologyQuery::Term(s.to_string())),
        }
    }
}

impl fmt::Display for OntologyQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// Selects which node attributes a regular expression search looks at.
///
/// The textual form is an underscore separated combination of `i` (info text),
/// `p` (pathways), `m` (metabolite names) and `o` (names of the gene ontology terms).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchScope {
    pub info: bool,
    pub pathways: bool,
    pub metabolites: bool,
    pub ontology: bool,
}

impl Default for SearchScope {
    fn default() -> Self {
        SearchScope {
            info: true,
            pathways: true,
            metabolites: true,
            ontology: true,
        }
    }
}

impl FromStr for SearchScope {
    type Err = BioGraphsError;

    fn from_str(s: &str) -> Result<Self> {
        let mut scope = SearchScope {
            info: false,
            pathways: false,
            metabolites: false,
            ontology: false,
        };
        for part in s.split('_') {
            match part {
                "i" => scope.info = true,
                "p" => scope.pathways = true,
                "m" => scope.metabolites = true,
                "o" => scope.ontology = true,
                _ => return Err(BioGraphsError::InvalidSearchScope(s.to_string())),
            }
        }
        Ok(scope)
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts = [
            (self.info, "i"),
            (self.pathways, "p"),
            (self.metabolites, "m"),
            (self.ontology, "o"),
        ];
        write!(
            f,
            "{}",
            parts.iter().filter(|(set, _)| *set).map(|(_, p)| p).join("_")
        )
    }
}

/// Restrictions applied to every sub graph query.
#[derive(Clone, Debug, PartialEq)]
pub struct SubgraphFilter {
    /// Only keep nodes with an expression in this tissue above `expression_threshold`.
    pub tissue: Option<String>,
    /// Edges with a score less than or equal to this value are removed, and the nodes
    /// which are isolated afterwards.
    pub score_threshold: f64,
    pub expression_threshold: f64,
}

impl Default for SubgraphFilter {
    fn default() -> Self {
        SubgraphFilter {
            tissue: None,
            score_threshold: 0.0,
            expression_threshold: 0.0,
        }
    }
}

impl InteractionGraph {
    /// Expression value of a node in the tissue with the given index.
    pub(crate) fn expression(&self, node: &str, tissue_index: usize) -> Option<f64> {
        self.graph()
            .node_attribute(node, EXPRESSION_DATA)?
            .as_numbers()?
            .get(tissue_index)
            .copied()
    }

    /// Keep the nodes whose expression in `tissue` is strictly greater than `threshold`.
    ///
    /// Nodes which are not part of the graph or have no expression data are dropped.
    pub fn restrict_by_tissue_threshold<'a, I>(
        &self,
        mappings: &Mappings,
        nodes: I,
        tissue: &str,
        threshold: f64,
    ) -> Result<BTreeSet<NodeId>>
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        let idx = mappings.tissue_index(tissue)?;
        Ok(nodes
            .into_iter()
            .filter(|n| matches!(self.expression(n, idx), Some(e) if e > threshold))
            .cloned()
            .collect())
    }

    fn filtered_subgraph(
        &self,
        mappings: &Mappings,
        nodes: BTreeSet<NodeId>,
        filter: &SubgraphFilter,
    ) -> Result<InteractionGraph> {
        if !is_unit_interval(filter.score_threshold) {
            return Err(BioGraphsError::InvalidScoreThreshold(filter.score_threshold));
        }
        let nodes = match &filter.tissue {
            Some(tissue) => self.restrict_by_tissue_threshold(
                mappings,
                &nodes,
                tissue,
                filter.expression_threshold,
            )?,
            None => nodes,
        };
        let mut result = self.graph().subgraph(&nodes);
        result.remove_edges_by_threshold(filter.score_threshold);
        debug!(
            "Sub graph query matched {} nodes, {} remain after filtering",
            nodes.len(),
            result.node_count()
        );
        Ok(InteractionGraph::from_graph(result))
    }

    fn nodes_by_text<F>(&self, regex: &Regex, text: F) -> BTreeSet<NodeId>
    where
        F: Fn(&NodeData) -> Option<String>,
    {
        self.graph()
            .nodes()
            .filter(|(_, data)| matches!(text(data), Some(t) if regex.is_match(&t)))
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn nodes_by_term_name(&self, mappings: &Mappings, regex: &Regex) -> BTreeSet<NodeId> {
        let mut result = BTreeSet::new();
        for ontology in Ontology::iter() {
            for (go_id, proteins) in mappings.go_protein_sets(ontology) {
                if matches!(mappings.go_name(go_id), Some(name) if regex.is_match(name)) {
                    result.extend(
                        proteins
                            .iter()
                            .filter(|p| self.graph().contains_node(p))
                            .cloned(),
                    );
                }
            }
        }
        result
    }

    /// All nodes where one of the attributes selected by `scope` matches `regex`.
    pub fn nodes_by_regex(
        &self,
        mappings: &Mappings,
        regex: &Regex,
        scope: &SearchScope,
    ) -> BTreeSet<NodeId> {
        let mut result = BTreeSet::new();
        if scope.info {
            result.extend(self.nodes_by_text(regex, |n| {
                n.get(INFO).and_then(|v| v.as_text()).map(|t| t.to_string())
            }));
        }
        if scope.pathways {
            result.extend(self.nodes_by_text(regex, |n| Some(n.text_list(PATHWAYS).join(" "))));
        }
        if scope.metabolites {
            result.extend(self.nodes_by_text(regex, |n| {
                Some(
                    n.text_list(METABOLITES)
                        .iter()
                        .filter_map(|m| mappings.metabolite_name(m))
                        .join(" "),
                )
            }));
        }
        if scope.ontology {
            result.extend(self.nodes_by_term_name(mappings, regex));
        }
        result
    }

    /// Search `regex` in the node attributes selected by `scope` and create the sub graph
    /// of the matching nodes.
    pub fn sub_graph_by_node_regex_search(
        &self,
        mappings: &Mappings,
        regex: &str,
        scope: &SearchScope,
        filter: &SubgraphFilter,
    ) -> Result<InteractionGraph> {
        let regex = Regex::new(regex)?;
        let nodes = self.nodes_by_regex(mappings, &regex, scope);
        self.filtered_subgraph(mappings, nodes, filter)
    }

    /// Create the sub graph of all nodes matching the ontology query.
    pub fn sub_graph_by_node_ontology_search(
        &self,
        mappings: &Mappings,
        query: &OntologyQuery,
        filter: &SubgraphFilter,
    ) -> Result<InteractionGraph> {
        let nodes = query.evaluate(self, mappings);
        self.filtered_subgraph(mappings, nodes, filter)
    }

    /// All nodes whose amino acid sequence matches `regex`.
    pub fn nodes_by_sequence_regex(&self, regex: &str) -> Result<BTreeSet<NodeId>> {
        let regex = Regex::new(regex)?;
        Ok(self.nodes_by_text(&regex, |n| {
            n.get(SEQUENCE).and_then(|v| v.as_text()).map(|t| t.to_string())
        }))
    }

    /// Nodes reachable from `start` with at most `diameter` steps. Directed graphs are
    /// only followed along the edge direction.
    pub fn propagate<'a, I>(&self, start: I, diameter: usize) -> BTreeSet<NodeId>
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();
        for n in start {
            if self.graph().contains_node(n) && visited.insert(n.clone()) {
                queue.push_back((n.clone(), 0));
            }
        }
        while let Some((node, distance)) = queue.pop_front() {
            if distance == diameter {
                continue;
            }
            for adjacent in self.graph().neighbors(&node) {
                if visited.insert(adjacent.clone()) {
                    queue.push_back((adjacent.clone(), distance + 1));
                }
            }
        }
        visited
    }

    /// Create the sub graph of all nodes within `diameter` steps of the given nodes.
    pub fn sub_graph_from_node_propagation<'a, I>(
        &self,
        mappings: &Mappings,
        nodes: I,
        diameter: usize,
        filter: &SubgraphFilter,
    ) -> Result<InteractionGraph>
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        let nodes = self.propagate(nodes, diameter);
        self.filtered_subgraph(mappings, nodes, filter)
    }
}
