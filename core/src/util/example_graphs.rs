use std::collections::{BTreeMap, BTreeSet};

use crate::errors::Result;
use crate::graph::{
    EdgeData, Graph, NodeData, BIOLOGICAL_PROCESSES, CELLULAR_COMPONENTS, EXPRESSION_DATA, INFO,
    LABEL, METABOLITES, MOLECULAR_FUNCTIONS, NAME, PATHWAYS, SEQUENCE,
};
use crate::mappings::{Mappings, MappingsBuilder};
use crate::types::{InteractionLink, NodeId, NodeType, OntologyRelation};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn protein(
    node_type: NodeType,
    info: &str,
    sequence: &str,
    cc: &[&str],
    mf: &[&str],
    bp: &[&str],
    expression: Vec<f64>,
) -> NodeData {
    NodeData::new(node_type)
        .with_attribute(INFO, info)
        .with_attribute(SEQUENCE, sequence)
        .with_attribute(CELLULAR_COMPONENTS, strings(cc))
        .with_attribute(MOLECULAR_FUNCTIONS, strings(mf))
        .with_attribute(BIOLOGICAL_PROCESSES, strings(bp))
        .with_attribute(EXPRESSION_DATA, expression)
}

/// Creates an example interaction graph with the following structure (scores on the
/// edges, `P5` has no interactions):
///
/// ```plain
/// +----+  0.9 activation  +----+
/// | P1 | ---------------> | P2 |
/// +----+                  +----+
///    |                       |
///    | 0.75 catalysis        | 0.4 binding
///    v                       v
/// +----+  <------------------+
/// | P3 |
/// +----+
///    |
///    | 0.6 inhibition
///    v
/// +----+        +----+
/// | P4 |        | P5 |
/// +----+        +----+
/// ```
///
/// Expression vectors have one entry per tissue of [create_example_mappings].
pub(crate) fn create_small_interaction_graph(directed: bool) -> Result<Graph<InteractionLink>> {
    let mut g = Graph::new(directed);

    g.add_node(
        "P1",
        protein(
            NodeType::MetabolomeProtein,
            "Serine/threonine-protein kinase that phosphorylates glucose transporters",
            "MKTAYIAKQRQISFVKSHFSRQ",
            &["GO:0005737"],
            &["GO:0004672"],
            &["GO:0006468"],
            vec![0.9, 0.1, 0.0],
        )
        .with_attribute(LABEL, "KIN1_HUMAN")
        .with_attribute(METABOLITES, strings(&["HMDB0000001"]))
        .with_attribute(PATHWAYS, strings(&["Glycolysis"])),
    );
    g.add_node(
        "P2",
        protein(
            NodeType::OtherProtein,
            "Transcription factor binding to promoter regions",
            "MAAGHLLRRSPQ",
            &["GO:0005634"],
            &["GO:0003700"],
            &["GO:0006355"],
            vec![0.2, 0.8, 0.0],
        )
        .with_attribute(LABEL, "TF2_HUMAN"),
    );
    g.add_node(
        "P3",
        protein(
            NodeType::MetabolomeProtein,
            "Hexokinase catalysing the first step of glucose metabolism",
            "MIASHLLAYFFTELNHDQVQKVDQYLYHMRLSDETLLEISKRFRKEMEKG",
            &["GO:0005737"],
            &["GO:0004396"],
            &["GO:0006096", "GO:0006468"],
            vec![0.7, 0.0, 0.3],
        )
        .with_attribute(LABEL, "HXK1_HUMAN")
        .with_attribute(METABOLITES, strings(&["HMDB0000122"]))
        .with_attribute(PATHWAYS, strings(&["Glycolysis", "Gluconeogenesis"])),
    );
    g.add_node(
        "P4",
        protein(
            NodeType::OtherProtein,
            "Membrane receptor for peptide hormones",
            "MGNCQAGHNLHLCLAHHPPLVCATLILLLLGLSG",
            &["GO:0005886"],
            &[],
            &["GO:0007165"],
            vec![0.0, 0.5, 0.6],
        )
        .with_attribute(LABEL, "REC4_HUMAN"),
    );
    g.add_node(
        "P5",
        protein(
            NodeType::OtherProtein,
            "Uncharacterized protein",
            "MSTNPKPQRKTKRNTNRRPQDVKFPGG",
            &[],
            &[],
            &[],
            vec![0.1, 0.1, 0.1],
        )
        .with_attribute(LABEL, "UNC5_HUMAN"),
    );

    g.add_edge(
        "P1",
        "P2",
        EdgeData::scored(0.9).with_relation(InteractionLink::Activation),
    )?;
    g.add_edge(
        "P1",
        "P3",
        EdgeData::scored(0.75).with_relation(InteractionLink::Catalysis),
    )?;
    g.add_edge(
        "P2",
        "P3",
        EdgeData::scored(0.4).with_relation(InteractionLink::Binding),
    )?;
    g.add_edge(
        "P3",
        "P4",
        EdgeData::scored(0.6).with_relation(InteractionLink::Inhibition),
    )?;

    Ok(g)
}

/// Three nodes `A`, `B` and `C` with the edges `A-B` (score 0.9) and `B-C` (score 0.4).
pub(crate) fn create_abc_graph(directed: bool) -> Result<Graph<InteractionLink>> {
    let mut g = Graph::new(directed);
    for (id, seq) in [("A", "MAAA"), ("B", "MBBB"), ("C", "MCCC")] {
        g.add_node(id, NodeData::new(NodeType::OtherProtein).with_attribute(SEQUENCE, seq));
    }
    g.add_edge(
        "A",
        "B",
        EdgeData::scored(0.9).with_relation(InteractionLink::Binding),
    )?;
    g.add_edge(
        "B",
        "C",
        EdgeData::scored(0.4).with_relation(InteractionLink::Expression),
    )?;
    Ok(g)
}

/// Small excerpt of the biological process ontology. Edges point from the more
/// specific to the more general term.
///
/// ```plain
/// GO:0006096 glycolytic process --is_a--> GO:0008152 metabolic process
/// GO:0006468 protein phosphorylation --is_a--> GO:0008152 metabolic process
/// GO:0006355 regulation of transcription --regulates--> GO:0006351 transcription
/// ```
pub(crate) fn create_small_ontology() -> Result<Graph<OntologyRelation>> {
    let mut g = Graph::new(true);
    for (id, name) in [
        ("GO:0006096", "glycolytic process"),
        ("GO:0008152", "metabolic process"),
        ("GO:0006468", "protein phosphorylation"),
        ("GO:0006355", "regulation of transcription"),
        ("GO:0006351", "transcription"),
    ] {
        g.add_node(
            id,
            NodeData::new(NodeType::OntologyTerm).with_attribute(NAME, name),
        );
    }
    g.add_edge(
        "GO:0006096",
        "GO:0008152",
        EdgeData {
            score: None,
            relation: Some(OntologyRelation::IsA),
        },
    )?;
    g.add_edge(
        "GO:0006468",
        "GO:0008152",
        EdgeData {
            score: None,
            relation: Some(OntologyRelation::IsA),
        },
    )?;
    g.add_edge(
        "GO:0006355",
        "GO:0006351",
        EdgeData {
            score: None,
            relation: Some(OntologyRelation::Regulates),
        },
    )?;
    Ok(g)
}

fn protein_set(ids: &[&str]) -> BTreeSet<NodeId> {
    ids.iter().map(|id| NodeId::from(*id)).collect()
}

fn name_table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Mapping tables matching [create_small_interaction_graph].
pub(crate) fn create_example_mappings() -> Mappings {
    let mut bp = BTreeMap::new();
    bp.insert("GO:0006468".to_string(), protein_set(&["P1", "P3"]));
    bp.insert("GO:0006355".to_string(), protein_set(&["P2"]));
    bp.insert("GO:0006096".to_string(), protein_set(&["P3"]));
    bp.insert("GO:0007165".to_string(), protein_set(&["P4"]));

    let mut cc = BTreeMap::new();
    cc.insert("GO:0005737".to_string(), protein_set(&["P1", "P3"]));
    cc.insert("GO:0005634".to_string(), protein_set(&["P2"]));
    cc.insert("GO:0005886".to_string(), protein_set(&["P4"]));

    let mut mf = BTreeMap::new();
    mf.insert("GO:0004672".to_string(), protein_set(&["P1"]));
    mf.insert("GO:0003700".to_string(), protein_set(&["P2"]));
    mf.insert("GO:0004396".to_string(), protein_set(&["P3"]));

    let mut tissues = BTreeMap::new();
    tissues.insert("lung".to_string(), 0);
    tissues.insert("liver".to_string(), 1);
    tissues.insert("heart".to_string(), 2);

    let mut genes = BTreeMap::new();
    genes.insert("HK1".to_string(), vec![NodeId::from("P3")]);
    genes.insert("KIN1".to_string(), vec![NodeId::from("P1")]);

    MappingsBuilder::default()
        .biological_processes_union(bp)
        .cell_components_union(cc)
        .molecular_functions_union(mf)
        .go_to_name(name_table(&[
            ("GO:0005737", "cytoplasm"),
            ("GO:0005634", "nucleus"),
            ("GO:0005886", "plasma membrane"),
            ("GO:0004672", "protein kinase activity"),
            ("GO:0003700", "DNA-binding transcription factor activity"),
            ("GO:0004396", "hexokinase activity"),
            ("GO:0006468", "protein phosphorylation"),
            ("GO:0006355", "regulation of transcription"),
            ("GO:0006096", "glycolytic process"),
            ("GO:0007165", "signal transduction"),
        ]))
        .covid_go_to_name(name_table(&[("GO:0019031", "viral envelope")]))
        .metabolites_id_to_name(name_table(&[
            ("HMDB0000001", "1-Methylhistidine"),
            ("HMDB0000122", "D-Glucose"),
        ]))
        .gene_to_proteins(genes)
        .tissue_num_mapping(tissues)
        .build()
}
