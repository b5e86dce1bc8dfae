use std::collections::BTreeSet;
use std::str::FromStr;

use super::*;
use crate::mappings::Mappings;
use crate::ontology::Ontology;
use crate::types::NodeId;
use crate::util::example_graphs::{create_example_mappings, create_small_interaction_graph};
use pretty_assertions::assert_eq;
use regex::Regex;

fn example(directed: bool) -> (InteractionGraph, Mappings) {
    let g = create_small_interaction_graph(directed).unwrap();
    (InteractionGraph::from_graph(g), create_example_mappings())
}

fn ids(nodes: &[&str]) -> BTreeSet<NodeId> {
    nodes.iter().map(|n| NodeId::from(*n)).collect()
}

fn node_set(g: &InteractionGraph) -> BTreeSet<NodeId> {
    g.graph().node_ids().cloned().collect()
}

fn term(go_id: &str) -> OntologyQuery {
    OntologyQuery::Term(go_id.to_string())
}

#[test]
fn load_checks_directedness() {
    let tmp = tempfile::tempdir().unwrap();
    let locations = DataLocations::new(tmp.path());
    let (g, _) = example(true);
    g.save_to(&locations).unwrap();

    let loaded = InteractionGraph::load(&locations, true).unwrap();
    assert_eq!(g, loaded);
    assert!(loaded.is_directed());

    assert!(matches!(
        InteractionGraph::load(&locations, false),
        Err(BioGraphsError::LoadingResource { .. })
    ));

    g.graph()
        .save_to(&locations.interaction_graph(false))
        .unwrap();
    assert!(matches!(
        InteractionGraph::load(&locations, false),
        Err(BioGraphsError::UnexpectedGraphKind {
            expected: "undirected",
            actual: "directed",
            ..
        })
    ));
}

#[test]
fn parse_ontology_query() {
    let q =
        OntologyQuery::from_str(r#"["and", ["or", "GO:1", "GO:2"], ["not", "GO:3"], "GO:4"]"#)
            .unwrap();
    assert_eq!(
        OntologyQuery::And(vec![
            OntologyQuery::Or(vec![term("GO:1"), term("GO:2")]),
            OntologyQuery::Not(vec![term("GO:3")]),
            term("GO:4"),
        ]),
        q
    );
    assert_eq!(q, OntologyQuery::from_str(&q.to_string()).unwrap());

    assert_eq!(term("GO:0006096"), OntologyQuery::from_str("GO:0006096").unwrap());
    assert_eq!(
        term("GO:0006096"),
        OntologyQuery::from_str(r#"["GO:0006096"]"#).unwrap()
    );
}

#[test]
fn reject_malformed_ontology_queries() {
    for q in [
        r#"["xor", "GO:1", "GO:2"]"#,
        "[]",
        r#"["and"]"#,
        "5",
        r#"[1, "GO:1"]"#,
        r#"["or", "GO:1", {"a": 1}]"#,
        "  ",
    ] {
        assert!(
            matches!(
                OntologyQuery::from_str(q),
                Err(BioGraphsError::InvalidOntologyQuery(_))
            ),
            "query {} should be rejected",
            q
        );
    }
}

#[test]
fn evaluate_ontology_query() {
    let (g, m) = example(true);

    assert_eq!(ids(&["P1", "P3"]), term("GO:0006468").evaluate(&g, &m));
    assert_eq!(
        ids(&["P3"]),
        OntologyQuery::And(vec![term("GO:0006468"), term("GO:0006096")]).evaluate(&g, &m)
    );
    assert_eq!(
        ids(&["P1", "P3"]),
        OntologyQuery::And(vec![term("GO:0006468"), term("GO:0005737")]).evaluate(&g, &m)
    );
    assert_eq!(
        ids(&["P2", "P4"]),
        OntologyQuery::Or(vec![term("GO:0006355"), term("GO:0007165")]).evaluate(&g, &m)
    );
    assert_eq!(
        ids(&["P2", "P4", "P5"]),
        OntologyQuery::Not(vec![term("GO:0006468")]).evaluate(&g, &m)
    );
    assert_eq!(
        ids(&["P4", "P5"]),
        OntologyQuery::Not(vec![term("GO:0006468"), term("GO:0005634")]).evaluate(&g, &m)
    );
    assert!(term("GO:9999999").evaluate(&g, &m).is_empty());
}

#[test]
fn parse_search_scope() {
    let scope = SearchScope::from_str("i_p").unwrap();
    assert!(scope.info);
    assert!(scope.pathways);
    assert!(!scope.metabolites);
    assert!(!scope.ontology);
    assert_eq!("i_p", scope.to_string());

    assert_eq!(SearchScope::default(), SearchScope::from_str("o_m_i_p").unwrap());
    assert_eq!("i_p_m_o", SearchScope::default().to_string());

    for invalid in ["", "x", "i__p", "info"] {
        assert!(matches!(
            SearchScope::from_str(invalid),
            Err(BioGraphsError::InvalidSearchScope(_))
        ));
    }
}

#[test]
fn tissue_threshold_is_strict() {
    let (g, m) = example(true);
    let all = node_set(&g);

    assert_eq!(
        ids(&["P1", "P3"]),
        g.restrict_by_tissue_threshold(&m, &all, "lung", 0.5).unwrap()
    );
    assert_eq!(
        ids(&["P1", "P3"]),
        g.restrict_by_tissue_threshold(&m, &all, "lung", 0.2).unwrap()
    );
    assert_eq!(
        ids(&["P2", "P4"]),
        g.restrict_by_tissue_threshold(&m, &all, "liver", 0.1).unwrap()
    );
    assert!(matches!(
        g.restrict_by_tissue_threshold(&m, &all, "brain", 0.5),
        Err(BioGraphsError::UnknownTissue(_))
    ));
}

#[test]
fn regex_search_scopes() {
    let (g, m) = example(true);
    let search = |pattern: &str, scope: &str| {
        g.nodes_by_regex(
            &m,
            &Regex::new(pattern).unwrap(),
            &SearchScope::from_str(scope).unwrap(),
        )
    };

    assert_eq!(ids(&["P1", "P3"]), search("glucose", "i"));
    assert_eq!(ids(&["P3"]), search("Gluconeogenesis", "p"));
    assert_eq!(ids(&["P3"]), search("Glucose", "m"));
    assert_eq!(ids(&["P2"]), search("transcription", "o"));
    assert_eq!(ids(&["P1", "P3"]), search("kinase", "o"));
    assert_eq!(ids(&["P1", "P2", "P3"]), search("kinase|promoter", "i_o"));
    assert!(search("Gluconeogenesis", "i_m_o").is_empty());
}

#[test]
fn regex_search_sub_graph() {
    let (g, m) = example(true);

    let result = g
        .sub_graph_by_node_regex_search(
            &m,
            "glucose",
            &SearchScope::from_str("i").unwrap(),
            &SubgraphFilter::default(),
        )
        .unwrap();
    assert_eq!(ids(&["P1", "P3"]), node_set(&result));
    assert_eq!(1, result.graph().edge_count());
    assert!(result.graph().contains_edge("P1", "P3"));

    // a single matching node has no edges and is removed
    let result = g
        .sub_graph_by_node_regex_search(
            &m,
            "Gluconeogenesis",
            &SearchScope::default(),
            &SubgraphFilter::default(),
        )
        .unwrap();
    assert_eq!(0, result.graph().node_count());

    assert!(matches!(
        g.sub_graph_by_node_regex_search(
            &m,
            "(",
            &SearchScope::default(),
            &SubgraphFilter::default()
        ),
        Err(BioGraphsError::Regex(_))
    ));
}

#[test]
fn ontology_search_sub_graph() {
    let (g, m) = example(true);
    let query = OntologyQuery::Or(vec![term("GO:0005737"), term("GO:0005634")]);

    let result = g
        .sub_graph_by_node_ontology_search(&m, &query, &SubgraphFilter::default())
        .unwrap();
    assert_eq!(ids(&["P1", "P2", "P3"]), node_set(&result));
    assert_eq!(3, result.graph().edge_count());

    let filter = SubgraphFilter {
        tissue: Some("lung".to_string()),
        expression_threshold: 0.5,
        ..Default::default()
    };
    let result = g
        .sub_graph_by_node_ontology_search(&m, &query, &filter)
        .unwrap();
    assert_eq!(ids(&["P1", "P3"]), node_set(&result));

    let filter = SubgraphFilter {
        score_threshold: 0.8,
        ..Default::default()
    };
    let result = g
        .sub_graph_by_node_ontology_search(&m, &query, &filter)
        .unwrap();
    assert_eq!(ids(&["P1", "P2"]), node_set(&result));

    let filter = SubgraphFilter {
        score_threshold: 1.5,
        ..Default::default()
    };
    assert!(matches!(
        g.sub_graph_by_node_ontology_search(&m, &query, &filter),
        Err(BioGraphsError::InvalidScoreThreshold(_))
    ));
}

#[test]
fn sequence_regex() {
    let (g, _) = example(false);
    assert_eq!(ids(&["P3"]), g.nodes_by_sequence_regex("^MI").unwrap());
    assert_eq!(ids(&["P2", "P3", "P4"]), g.nodes_by_sequence_regex("LL").unwrap());
    assert!(g.nodes_by_sequence_regex("[").is_err());
}

#[test]
fn propagation_follows_edge_direction() {
    let (directed, _) = example(true);
    let (undirected, _) = example(false);
    let p1 = ids(&["P1"]);
    let p4 = ids(&["P4"]);

    assert_eq!(ids(&["P1"]), directed.propagate(&p1, 0));
    assert_eq!(ids(&["P1", "P2", "P3"]), directed.propagate(&p1, 1));
    assert_eq!(ids(&["P1", "P2", "P3", "P4"]), directed.propagate(&p1, 2));
    assert_eq!(ids(&["P4"]), directed.propagate(&p4, 2));

    assert_eq!(ids(&["P3", "P4"]), undirected.propagate(&p4, 1));
    assert_eq!(ids(&["P1", "P2", "P3", "P4"]), undirected.propagate(&p4, 2));
    assert!(undirected.propagate(&ids(&["X"]), 3).is_empty());
}

#[test]
fn propagation_sub_graph() {
    let (g, m) = example(true);
    let start = ids(&["P1"]);

    let result = g
        .sub_graph_from_node_propagation(&m, &start, 1, &SubgraphFilter::default())
        .unwrap();
    assert_eq!(ids(&["P1", "P2", "P3"]), node_set(&result));
    assert_eq!(3, result.graph().edge_count());

    let filter = SubgraphFilter {
        score_threshold: 0.5,
        ..Default::default()
    };
    let result = g
        .sub_graph_from_node_propagation(&m, &start, 1, &filter)
        .unwrap();
    assert_eq!(ids(&["P1", "P2", "P3"]), node_set(&result));
    assert_eq!(2, result.graph().edge_count());
    assert!(!result.graph().contains_edge("P2", "P3"));
}

#[test]
fn rank_tissues() {
    let (g, m) = example(true);
    let ranked = g.rank_tissues_by_expression(&m, &ids(&["P1", "P2", "X"]), 10);
    assert_eq!(2, ranked.len());
    assert_eq!("lung", ranked[0].tissue);
    assert!((ranked[0].mean - 0.55).abs() < 1e-9);
    assert_eq!("liver", ranked[1].tissue);
    assert!((ranked[1].mean - 0.45).abs() < 1e-9);

    let ranked = g.rank_tissues_by_expression(&m, &ids(&["P1", "P2"]), 1);
    assert_eq!(1, ranked.len());
    assert!(g
        .rank_tissues_by_expression(&m, &BTreeSet::new(), 10)
        .is_empty());
}

#[test]
fn most_present_biological_processes() {
    let (g, m) = example(true);

    let terms = g
        .most_present_terms(&m, Ontology::BiologicalProcesses, "lung", 0, 10)
        .unwrap();
    let order: Vec<&str> = terms.iter().map(|t| t.go_id.as_str()).collect();
    assert_eq!(
        vec!["GO:0006468", "GO:0006096", "GO:0006355", "GO:0007165"],
        order
    );
    assert!((terms[0].score - 0.8).abs() < 1e-9);
    assert_eq!(Some("protein phosphorylation"), terms[0].name.as_deref());

    let terms = g
        .most_present_terms(&m, Ontology::BiologicalProcesses, "lung", 1, 10)
        .unwrap();
    assert_eq!(1, terms.len());
    assert_eq!("GO:0006468", terms[0].go_id);

    let sub = InteractionGraph::from_graph(g.graph().subgraph(&ids(&["P1"])));
    let terms = sub
        .most_present_terms(&m, Ontology::BiologicalProcesses, "lung", 0, 2)
        .unwrap();
    assert_eq!(2, terms.len());
    assert_eq!("GO:0006468", terms[0].go_id);
    assert!((terms[0].score - 0.45).abs() < 1e-9);

    assert!(matches!(
        g.most_present_terms(&m, Ontology::CellComponents, "brain", 0, 10),
        Err(BioGraphsError::UnknownTissue(_))
    ));
}

#[test]
fn node_summaries() {
    let (g, m) = example(true);

    let mut out = Vec::new();
    g.write_node_summaries(&m, &SearchScope::from_str("i_m").unwrap(), 1, &mut out)
        .unwrap();
    assert_eq!(
        "P1 : metabolome_protein\n\
         info : Serine/threonine-protein kinase that phosphorylates glucose transporters\n\
         associated metabolites :\n\
         \t1-Methylhistidine\n\n",
        String::from_utf8(out).unwrap()
    );

    let mut out = Vec::new();
    g.write_node_summaries(&m, &SearchScope::from_str("o").unwrap(), 2, &mut out)
        .unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("cellular components :\n\tcytoplasm\n"));
    assert!(out.contains("\tprotein kinase activity\n"));
    assert!(out.contains("P2 : other_protein\n"));
    assert!(!out.contains("P3"));
}
