//! Locations of the packaged data files.

use std::path::{Path, PathBuf};

use crate::mappings::MappingName;
use crate::ontology::Ontology;

pub const GRAPHS_FOLDER: &str = "graphs";
pub const INTERACTIONS_FOLDER: &str = "interactions";
pub const ONTOLOGY_FOLDER: &str = "ontology";
pub const MAPPINGS_FOLDER: &str = "mappings";
pub const COVID_FOLDER: &str = "covid";

pub const DIRECTED_INTERACTIONS_FILE_NAME: &str = "pp_interactions_directed.bin";
pub const UNDIRECTED_INTERACTIONS_FILE_NAME: &str = "pp_interactions_undirected.bin";
pub const COVID_DATA_FILE_NAME: &str = "covid_data.bin";
pub const INTERACTING_NODES_FILE_NAME: &str = "interacting_nodes.bin";
pub const COVID_TABLE_FILE_NAME: &str = "covid19.csv";

const RESOURCE_EXTENSION: &str = "bin";

/// The layout of a data directory.
///
/// ```plain
/// <root>/graphs/interactions/pp_interactions_{directed,undirected}.bin
/// <root>/graphs/ontology/{biological_processes,cell_components,molecular_functions}.bin
/// <root>/mappings/<table>.bin
/// <root>/covid/{covid_data.bin,interacting_nodes.bin,covid19.csv}
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataLocations {
    root: PathBuf,
}

impl Default for DataLocations {
    fn default() -> Self {
        DataLocations::new("data")
    }
}

impl DataLocations {
    pub fn new<P: Into<PathBuf>>(root: P) -> DataLocations {
        DataLocations { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn interaction_graph(&self, directed: bool) -> PathBuf {
        let file_name = if directed {
            DIRECTED_INTERACTIONS_FILE_NAME
        } else {
            UNDIRECTED_INTERACTIONS_FILE_NAME
        };
        self.root
            .join(GRAPHS_FOLDER)
            .join(INTERACTIONS_FOLDER)
            .join(file_name)
    }

    pub fn ontology_graph(&self, ontology: Ontology) -> PathBuf {
        self.root
            .join(GRAPHS_FOLDER)
            .join(ONTOLOGY_FOLDER)
            .join(ontology.as_ref())
            .with_extension(RESOURCE_EXTENSION)
    }

    pub fn mapping(&self, name: MappingName) -> PathBuf {
        self.root
            .join(MAPPINGS_FOLDER)
            .join(name.file_stem())
            .with_extension(RESOURCE_EXTENSION)
    }

    pub fn covid_data(&self) -> PathBuf {
        self.root.join(COVID_FOLDER).join(COVID_DATA_FILE_NAME)
    }

    pub fn covid_interacting_nodes(&self) -> PathBuf {
        self.root.join(COVID_FOLDER).join(INTERACTING_NODES_FILE_NAME)
    }

    pub fn covid_table(&self) -> PathBuf {
        self.root.join(COVID_FOLDER).join(COVID_TABLE_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_layout() {
        let locations = DataLocations::new("/srv/biographs");
        assert_eq!(
            PathBuf::from("/srv/biographs/graphs/interactions/pp_interactions_directed.bin"),
            locations.interaction_graph(true)
        );
        assert_eq!(
            PathBuf::from("/srv/biographs/graphs/ontology/cell_components.bin"),
            locations.ontology_graph(Ontology::CellComponents)
        );
        assert_eq!(
            PathBuf::from("/srv/biographs/mappings/string_go_to_name.bin"),
            locations.mapping(MappingName::GoToName)
        );
        assert_eq!(
            PathBuf::from("/srv/biographs/covid/covid19.csv"),
            locations.covid_table()
        );
    }
}
