//! Immutable lookup tables which are shared by the graphs.

use std::collections::{BTreeMap, BTreeSet};

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
    errors::{BioGraphsError, Result},
    ontology::Ontology,
    resources::DataLocations,
    serializer::{load_resource, save_resource},
    types::NodeId,
};

/// Maps a GO id to the set of proteins annotated with it.
pub type GoProteinSets = BTreeMap<String, BTreeSet<NodeId>>;

/// Names of all available mapping tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, EnumString, EnumIter, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum MappingName {
    BiologicalProcessesUnion,
    CellComponentsUnion,
    CovidGoToName,
    MetabolitesIdToName,
    MolecularFunctionsUnion,
    GeneToProteins,
    GoToName,
    TissueNumMapping,
}

impl MappingName {
    /// File name (without extension) of the table in the mappings folder.
    pub fn file_stem(&self) -> &'static str {
        match self {
            MappingName::BiologicalProcessesUnion => "biological_processes_union_dict",
            MappingName::CellComponentsUnion => "cell_components_union_dict",
            MappingName::CovidGoToName => "covid_go_to_name",
            MappingName::MetabolitesIdToName => "metabolites_id_to_name",
            MappingName::MolecularFunctionsUnion => "molecular_functions_union_dict",
            MappingName::GeneToProteins => "string_gene_to_proteins",
            MappingName::GoToName => "string_go_to_name",
            MappingName::TissueNumMapping => "tissue_num_mapping",
        }
    }
}

/// All mapping tables. The tables are loaded once and can't be changed afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mappings {
    biological_processes_union: GoProteinSets,
    cell_components_union: GoProteinSets,
    molecular_functions_union: GoProteinSets,
    covid_go_to_name: BTreeMap<String, String>,
    metabolites_id_to_name: BTreeMap<String, String>,
    gene_to_proteins: BTreeMap<String, Vec<NodeId>>,
    go_to_name: BTreeMap<String, String>,
    tissue_num_mapping: BTreeMap<String, usize>,
}

impl Mappings {
    /// Load all mapping tables from the data directory.
    pub fn load(locations: &DataLocations) -> Result<Mappings> {
        let result = Mappings {
            biological_processes_union: load_resource(
                &locations.mapping(MappingName::BiologicalProcessesUnion),
            )?,
            cell_components_union: load_resource(
                &locations.mapping(MappingName::CellComponentsUnion),
            )?,
            molecular_functions_union: load_resource(
                &locations.mapping(MappingName::MolecularFunctionsUnion),
            )?,
            covid_go_to_name: load_resource(&locations.mapping(MappingName::CovidGoToName))?,
            metabolites_id_to_name: load_resource(
                &locations.mapping(MappingName::MetabolitesIdToName),
            )?,
            gene_to_proteins: load_resource(&locations.mapping(MappingName::GeneToProteins))?,
            go_to_name: load_resource(&locations.mapping(MappingName::GoToName))?,
            tissue_num_mapping: load_resource(&locations.mapping(MappingName::TissueNumMapping))?,
        };
        debug!(
            "Loaded mappings with {} GO names and {} tissues",
            result.go_to_name.len(),
            result.tissue_num_mapping.len()
        );
        Ok(result)
    }

    /// Write all tables into the data directory.
    pub fn save_to(&self, locations: &DataLocations) -> Result<()> {
        save_resource(
            &self.biological_processes_union,
            &locations.mapping(MappingName::BiologicalProcessesUnion),
        )?;
        save_resource(
            &self.cell_components_union,
            &locations.mapping(MappingName::CellComponentsUnion),
        )?;
        save_resource(
            &self.molecular_functions_union,
            &locations.mapping(MappingName::MolecularFunctionsUnion),
        )?;
        save_resource(
            &self.covid_go_to_name,
            &locations.mapping(MappingName::CovidGoToName),
        )?;
        save_resource(
            &self.metabolites_id_to_name,
            &locations.mapping(MappingName::MetabolitesIdToName),
        )?;
        save_resource(
            &self.gene_to_proteins,
            &locations.mapping(MappingName::GeneToProteins),
        )?;
        save_resource(&self.go_to_name, &locations.mapping(MappingName::GoToName))?;
        save_resource(
            &self.tissue_num_mapping,
            &locations.mapping(MappingName::TissueNumMapping),
        )?;
        Ok(())
    }

    pub fn names() -> Vec<MappingName> {
        MappingName::iter().collect()
    }

    pub fn biological_processes_union(&self) -> &GoProteinSets {
        &self.biological_processes_union
    }

    pub fn cell_components_union(&self) -> &GoProteinSets {
        &self.cell_components_union
    }

    pub fn molecular_functions_union(&self) -> &GoProteinSets {
        &self.molecular_functions_union
    }

    pub fn covid_go_to_name(&self) -> &BTreeMap<String, String> {
        &self.covid_go_to_name
    }

    pub fn metabolites_id_to_name(&self) -> &BTreeMap<String, String> {
        &self.metabolites_id_to_name
    }

    pub fn gene_to_proteins(&self) -> &BTreeMap<String, Vec<NodeId>> {
        &self.gene_to_proteins
    }

    pub fn go_to_name(&self) -> &BTreeMap<String, String> {
        &self.go_to_name
    }

    pub fn tissue_num_mapping(&self) -> &BTreeMap<String, usize> {
        &self.tissue_num_mapping
    }

    /// The GO id to protein table of the given ontology.
    pub fn go_protein_sets(&self, ontology: Ontology) -> &GoProteinSets {
        match ontology {
            Ontology::BiologicalProcesses => &self.biological_processes_union,
            Ontology::CellComponents => &self.cell_components_union,
            Ontology::MolecularFunctions => &self.molecular_functions_union,
        }
    }

    /// All proteins annotated with `go_id` in any of the ontologies.
    pub fn proteins_for_term(&self, go_id: &str) -> BTreeSet<&NodeId> {
        Ontology::iter()
            .filter_map(|o| self.go_protein_sets(o).get(go_id))
            .flatten()
            .collect()
    }

    /// Name of a GO term, also considering the terms only used by covid proteins.
    pub fn go_name(&self, go_id: &str) -> Option<&str> {
        self.go_to_name
            .get(go_id)
            .or_else(|| self.covid_go_to_name.get(go_id))
            .map(|n| n.as_str())
    }

    pub fn metabolite_name(&self, metabolite_id: &str) -> Option<&str> {
        self.metabolites_id_to_name
            .get(metabolite_id)
            .map(|n| n.as_str())
    }

    pub fn proteins_for_gene(&self, gene: &str) -> &[NodeId] {
        self.gene_to_proteins
            .get(gene)
            .map(|p| p.as_slice())
            .unwrap_or_default()
    }

    /// Position of the tissue in the expression vectors.
    pub fn tissue_index(&self, tissue: &str) -> Result<usize> {
        self.tissue_num_mapping
            .get(tissue)
            .copied()
            .ok_or_else(|| BioGraphsError::UnknownTissue(tissue.to_string()))
    }

    /// Inverse of the tissue mapping.
    pub fn tissue_names_by_index(&self) -> BTreeMap<usize, &str> {
        self.tissue_num_mapping
            .iter()
            .map(|(name, idx)| (*idx, name.as_str()))
            .collect()
    }
}

/// Assembles a [Mappings] value, e.g. when packaging new data.
#[derive(Default)]
pub struct MappingsBuilder {
    mappings: Mappings,
}

impl MappingsBuilder {
    pub fn biological_processes_union(mut self, table: GoProteinSets) -> Self {
        self.mappings.biological_processes_union = table;
        self
    }

    pub fn cell_components_union(mut self, table: GoProteinSets) -> Self {
        self.mappings.cell_components_union = table;
        self
    }

    pub fn molecular_functions_union(mut self, table: GoProteinSets) -> Self {
        self.mappings.molecular_functions_union = table;
        self
    }

    pub fn covid_go_to_name(mut self, table: BTreeMap<String, String>) -> Self {
        self.mappings.covid_go_to_name = table;
        self
    }

    pub fn metabolites_id_to_name(mut self, table: BTreeMap<String, String>) -> Self {
        self.mappings.metabolites_id_to_name = table;
        self
    }

    pub fn gene_to_proteins(mut self, table: BTreeMap<String, Vec<NodeId>>) -> Self {
        self.mappings.gene_to_proteins = table;
        self
    }

    pub fn go_to_name(mut self, table: BTreeMap<String, String>) -> Self {
        self.mappings.go_to_name = table;
        self
    }

    pub fn tissue_num_mapping(mut self, table: BTreeMap<String, usize>) -> Self {
        self.mappings.tissue_num_mapping = table;
        self
    }

    pub fn build(self) -> Mappings {
        self.mappings
    }
}
