#![warn(clippy::panic)]
#![warn(clippy::expect_used)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod covid;
pub mod dataset;
pub mod errors;
pub mod graph;
pub mod interactions;
pub mod mappings;
pub mod ontology;
pub mod resources;
pub mod serializer;
pub mod types;
pub mod util;

pub use covid::CovidData;
pub use dataset::{DatasetConfig, PPInteractionDataset};
pub use graph::Graph;
pub use interactions::InteractionGraph;
pub use mappings::Mappings;
pub use ontology::{Ontology, OntologyGraph};
pub use resources::DataLocations;
