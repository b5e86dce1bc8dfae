//! Annotations of proteins relevant for SARS-CoV-2 infections.

use std::collections::BTreeMap;
use std::io::Read;

use crate::{
    errors::{BioGraphsError, Result},
    resources::DataLocations,
    serializer::{load_resource, save_resource},
    types::NodeId,
    util::split_go_annotations,
};

/// Annotation record of a single protein.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CovidProtein {
    /// `true` for human proteins, `false` for viral ones.
    pub human: bool,
    pub sequence: String,
    pub molecular_functions: Vec<String>,
    pub cellular_components: Vec<String>,
    pub biological_processes: Vec<String>,
    pub info: Option<String>,
}

/// Per-protein annotations and the proteins which are used for evaluation because they
/// are known to interact with the virus.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CovidData {
    proteins: BTreeMap<NodeId, CovidProtein>,
    interacting_nodes: Vec<NodeId>,
}

impl CovidData {
    pub fn new(proteins: BTreeMap<NodeId, CovidProtein>, interacting_nodes: Vec<NodeId>) -> Self {
        CovidData {
            proteins,
            interacting_nodes,
        }
    }

    pub fn load(locations: &DataLocations) -> Result<CovidData> {
        let proteins: BTreeMap<NodeId, CovidProtein> = load_resource(&locations.covid_data())?;
        let interacting_nodes: Vec<NodeId> =
            load_resource(&locations.covid_interacting_nodes())?;
        info!(
            "Loaded covid data for {} proteins and {} interacting nodes",
            proteins.len(),
            interacting_nodes.len()
        );
        Ok(CovidData {
            proteins,
            interacting_nodes,
        })
    }

    pub fn save_to(&self, locations: &DataLocations) -> Result<()> {
        save_resource(&self.proteins, &locations.covid_data())?;
        save_resource(&self.interacting_nodes, &locations.covid_interacting_nodes())?;
        Ok(())
    }

    /// Parse the packaged protein table (`covid19.csv`).
    pub fn read_table(locations: &DataLocations) -> Result<ParsedProteinTable> {
        let path = locations.covid_table();
        let f = std::fs::File::open(&path).map_err(|source| BioGraphsError::LoadingResource {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        parse_uniprot_table(f, &UniprotColumns::default())
    }

    pub fn get(&self, protein: &str) -> Option<&CovidProtein> {
        self.proteins.get(protein)
    }

    pub fn contains(&self, protein: &str) -> bool {
        self.proteins.contains_key(protein)
    }

    pub fn keys(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.proteins.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &CovidProtein)> + '_ {
        self.proteins.iter()
    }

    pub fn len(&self) -> usize {
        self.proteins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proteins.is_empty()
    }

    pub fn interacting_nodes(&self) -> &[NodeId] {
        &self.interacting_nodes
    }
}

/// Header names of the columns of a UniProt table export.
#[derive(Clone, Debug)]
pub struct UniprotColumns {
    pub delimiter: u8,
    pub entry: String,
    pub entry_name: String,
    pub sequence: String,
    pub molecular_functions: String,
    pub cellular_components: String,
    pub biological_processes: String,
    pub function: String,
}

impl Default for UniprotColumns {
    fn default() -> Self {
        UniprotColumns {
            delimiter: b',',
            entry: "Entry".to_string(),
            entry_name: "Entry name".to_string(),
            sequence: "Sequence".to_string(),
            molecular_functions: "Gene ontology (molecular function)".to_string(),
            cellular_components: "Gene ontology (cellular component)".to_string(),
            biological_processes: "Gene ontology (biological process)".to_string(),
            function: "Function [CC]".to_string(),
        }
    }
}

/// Result of parsing a protein table: the records and the names of all GO terms that
/// have been mentioned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedProteinTable {
    pub proteins: BTreeMap<NodeId, CovidProtein>,
    pub go_to_name: BTreeMap<String, String>,
}

const FUNCTION_PREFIX: &str = "FUNCTION: ";

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| BioGraphsError::MissingColumn(name.to_string()))
}

/// Build covid protein records from a UniProt table export.
///
/// A protein counts as human if its entry name contains `HUMAN`. Gene ontology cells
/// are lists of `name [GO:id]` separated by `"; "`, the function text has its
/// `FUNCTION: ` prefix removed. Empty cells produce empty lists or no info.
pub fn parse_uniprot_table<R: Read>(
    input: R,
    columns: &UniprotColumns,
) -> Result<ParsedProteinTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(columns.delimiter)
        .has_headers(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let entry = column_index(&headers, &columns.entry)?;
    let entry_name = column_index(&headers, &columns.entry_name)?;
    let sequence = column_index(&headers, &columns.sequence)?;
    let mf = column_index(&headers, &columns.molecular_functions)?;
    let cc = column_index(&headers, &columns.cellular_components)?;
    let bp = column_index(&headers, &columns.biological_processes)?;
    let function = column_index(&headers, &columns.function)?;

    let mut result = ParsedProteinTable::default();
    for record in reader.records() {
        let record = record?;
        let cell = |idx: usize| record.get(idx).unwrap_or_default().trim();

        let mut go_ids = |idx: usize| -> Vec<String> {
            split_go_annotations(cell(idx))
                .into_iter()
                .map(|(id, name)| {
                    result.go_to_name.insert(id.clone(), name);
                    id
                })
                .collect()
        };
        let molecular_functions = go_ids(mf);
        let cellular_components = go_ids(cc);
        let biological_processes = go_ids(bp);

        let info = match cell(function) {
            "" => None,
            text => Some(text.strip_prefix(FUNCTION_PREFIX).unwrap_or(text).to_string()),
        };

        let protein = CovidProtein {
            human: cell(entry_name).contains("HUMAN"),
            sequence: cell(sequence).to_string(),
            molecular_functions,
            cellular_components,
            biological_processes,
            info,
        };
        result.proteins.insert(cell(entry).into(), protein);
    }
    debug!("Parsed {} proteins from table", result.proteins.len());
    Ok(result)
}
