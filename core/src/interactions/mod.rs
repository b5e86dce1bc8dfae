//! The protein-protein interaction graph and the queries to extract sub graphs from it.

mod analysis;
mod query;

pub use analysis::{TermPresence, TissueExpression};
pub use query::{OntologyQuery, SearchScope, SubgraphFilter};

use crate::{
    errors::{BioGraphsError, Result},
    graph::Graph,
    resources::DataLocations,
    types::InteractionLink,
};

fn kind_name(directed: bool) -> &'static str {
    if directed {
        "directed"
    } else {
        "undirected"
    }
}

/// Graph of protein-protein interactions.
///
/// Nodes are proteins identified by their UniProt accession. Every edge has a score in
/// [0, 1] and, in the directed graph, the [InteractionLink] describing the mode of
/// action.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionGraph {
    graph: Graph<InteractionLink>,
}

impl InteractionGraph {
    /// Load the packaged directed or undirected interaction graph.
    pub fn load(locations: &DataLocations, directed: bool) -> Result<InteractionGraph> {
        let path = locations.interaction_graph(directed);
        let graph: Graph<InteractionLink> = Graph::load_from(&path)?;
        if graph.is_directed() != directed {
            return Err(BioGraphsError::UnexpectedGraphKind {
                path: path.to_string_lossy().to_string(),
                expected: kind_name(directed),
                actual: kind_name(graph.is_directed()),
            });
        }
        info!(
            "Loaded {} interaction graph ({})",
            kind_name(directed),
            graph.statistics()
        );
        Ok(InteractionGraph { graph })
    }

    /// Store the graph at the packaged location matching its directedness.
    pub fn save_to(&self, locations: &DataLocations) -> Result<()> {
        self.graph
            .save_to(&locations.interaction_graph(self.is_directed()))
    }

    pub fn from_graph(graph: Graph<InteractionLink>) -> InteractionGraph {
        InteractionGraph { graph }
    }

    pub fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    pub fn graph(&self) -> &Graph<InteractionLink> {
        &self.graph
    }

    pub fn into_graph(self) -> Graph<InteractionLink> {
        self.graph
    }
}

#[cfg(test)]
mod tests;
