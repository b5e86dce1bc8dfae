use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
    errors::{BioGraphsError, Result},
    graph::{Graph, BIOLOGICAL_PROCESSES, CELLULAR_COMPONENTS, MOLECULAR_FUNCTIONS, NAME},
    resources::DataLocations,
    types::{NodeId, OntologyRelation},
};

/// One of the three gene ontologies.
///
/// Parsing accepts both the full name and the short alias (`bp`, `cc`, `mf`).
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumString,
    EnumIter,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Ontology {
    #[strum(to_string = "biological_processes", serialize = "bp")]
    BiologicalProcesses,
    #[strum(to_string = "cell_components", serialize = "cc")]
    CellComponents,
    #[strum(to_string = "molecular_functions", serialize = "mf")]
    MolecularFunctions,
}

impl Ontology {
    /// Parse an ontology name or alias.
    pub fn from_name(name: &str) -> Result<Ontology> {
        Ontology::from_str(name).map_err(|_| BioGraphsError::InvalidOntologyName(name.to_string()))
    }

    pub fn alias(&self) -> &'static str {
        match self {
            Ontology::BiologicalProcesses => "bp",
            Ontology::CellComponents => "cc",
            Ontology::MolecularFunctions => "mf",
        }
    }

    /// Name of the protein node attribute that lists the GO ids of this ontology.
    pub fn node_attribute(&self) -> &'static str {
        match self {
            Ontology::BiologicalProcesses => BIOLOGICAL_PROCESSES,
            Ontology::CellComponents => CELLULAR_COMPONENTS,
            Ontology::MolecularFunctions => MOLECULAR_FUNCTIONS,
        }
    }

    pub fn all() -> Vec<Ontology> {
        Ontology::iter().collect()
    }
}

/// The term graph of a single gene ontology.
///
/// Nodes are GO terms with a `name` attribute, edges point from the more specific to
/// the more general term and carry the [OntologyRelation].
#[derive(Clone, Debug)]
pub struct OntologyGraph {
    ontology: Ontology,
    graph: Graph<OntologyRelation>,
}

impl OntologyGraph {
    /// Load the packaged graph for the ontology given by its name or alias.
    pub fn load(locations: &DataLocations, name: &str) -> Result<OntologyGraph> {
        let ontology = Ontology::from_name(name)?;
        OntologyGraph::open(locations, ontology)
    }

    pub fn open(locations: &DataLocations, ontology: Ontology) -> Result<OntologyGraph> {
        let path = locations.ontology_graph(ontology);
        let graph = Graph::load_from(&path)?;
        info!(
            "Loaded {} ontology with {} terms",
            ontology,
            graph.node_count()
        );
        Ok(OntologyGraph { ontology, graph })
    }

    pub fn from_graph(ontology: Ontology, graph: Graph<OntologyRelation>) -> OntologyGraph {
        OntologyGraph { ontology, graph }
    }

    pub fn name(&self) -> Ontology {
        self.ontology
    }

    pub fn graph(&self) -> &Graph<OntologyRelation> {
        &self.graph
    }

    pub fn into_graph(self) -> Graph<OntologyRelation> {
        self.graph
    }

    /// Human readable name of a GO term.
    pub fn term_name(&self, go_id: &str) -> Option<&str> {
        self.graph.node_attribute(go_id, NAME)?.as_text()
    }

    /// The more general terms of `go_id` together with the relation to them.
    pub fn parents<'a>(
        &'a self,
        go_id: &'a str,
    ) -> impl Iterator<Item = (&'a NodeId, Option<OntologyRelation>)> + 'a {
        self.graph.successors(go_id).map(move |parent| {
            let relation = self
                .graph
                .edge(go_id, parent)
                .and_then(|e| e.relation);
            (parent, relation)
        })
    }

    /// The more specific terms of `go_id`.
    pub fn children<'a>(&'a self, go_id: &str) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.graph.predecessors(go_id)
    }
}
