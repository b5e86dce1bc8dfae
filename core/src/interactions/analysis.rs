use std::io::Write;

use super::{InteractionGraph, SearchScope};
use crate::{
    errors::Result,
    graph::{EXPRESSION_DATA, INFO, METABOLITES, PATHWAYS},
    mappings::Mappings,
    ontology::Ontology,
    types::NodeId,
};

/// Mean expression of a set of nodes in a tissue.
#[derive(Clone, Debug, PartialEq)]
pub struct TissueExpression {
    pub tissue: String,
    pub mean: f64,
}

/// How strongly a gene ontology term is represented in a sub graph.
#[derive(Clone, Debug, PartialEq)]
pub struct TermPresence {
    pub go_id: String,
    pub name: Option<String>,
    /// Summed expression of the sub graph proteins annotated with the term, divided by
    /// the number of all proteins annotated with it.
    pub score: f64,
}

impl InteractionGraph {
    /// Rank the tissues by the mean expression of the given nodes.
    ///
    /// Only the first `limit` tissues are considered and of these only the ones with a
    /// positive mean are returned. Nodes without expression data are ignored.
    pub fn rank_tissues_by_expression<'a, I>(
        &self,
        mappings: &Mappings,
        nodes: I,
        limit: usize,
    ) -> Vec<TissueExpression>
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        let vectors: Vec<&[f64]> = nodes
            .into_iter()
            .filter_map(|n| {
                self.graph()
                    .node_attribute(n, EXPRESSION_DATA)?
                    .as_numbers()
            })
            .collect();
        let width = vectors.iter().map(|v| v.len()).max().unwrap_or(0);

        let mut means: Vec<(usize, f64)> = (0..width)
            .map(|idx| {
                let (sum, count) = vectors
                    .iter()
                    .filter_map(|v| v.get(idx))
                    .fold((0.0, 0usize), |(sum, count), e| (sum + e, count + 1));
                (idx, sum / count as f64)
            })
            .collect();
        means.sort_by(|a, b| b.1.total_cmp(&a.1));

        let tissues = mappings.tissue_names_by_index();
        means
            .into_iter()
            .take(limit)
            .filter(|(_, mean)| *mean > 0.0)
            .filter_map(|(idx, mean)| {
                let tissue = tissues.get(&idx)?;
                Some(TissueExpression {
                    tissue: tissue.to_string(),
                    mean,
                })
            })
            .collect()
    }

    /// Find the terms of `ontology` which are most present in this graph for the given
    /// tissue. Terms with `size_threshold` or less proteins are skipped.
    pub fn most_present_terms(
        &self,
        mappings: &Mappings,
        ontology: Ontology,
        tissue: &str,
        size_threshold: usize,
        limit: usize,
    ) -> Result<Vec<TermPresence>> {
        let tissue_index = mappings.tissue_index(tissue)?;

        let mut result: Vec<TermPresence> = mappings
            .go_protein_sets(ontology)
            .iter()
            .filter(|(_, proteins)| proteins.len() > size_threshold)
            .map(|(go_id, proteins)| {
                let sum: f64 = proteins
                    .iter()
                    .filter_map(|p| self.expression(p, tissue_index))
                    .sum();
                TermPresence {
                    go_id: go_id.clone(),
                    name: mappings.go_name(go_id).map(|n| n.to_string()),
                    score: sum / proteins.len() as f64,
                }
            })
            .collect();
        result.sort_by(|a, b| b.score.total_cmp(&a.score));
        result.truncate(limit);
        Ok(result)
    }

    /// Write a human readable report of the first `limit` nodes, showing the
    /// attributes selected by `scope`.
    pub fn write_node_summaries<W: Write>(
        &self,
        mappings: &Mappings,
        scope: &SearchScope,
        limit: usize,
        out: &mut W,
    ) -> Result<()> {
        let term_name = |go_id: &str| mappings.go_name(go_id).unwrap_or(go_id).to_string();

        for (id, data) in self.graph().nodes().take(limit) {
            writeln!(out, "{} : {}", id, data.node_type)?;
            if scope.info {
                let info = data.get(INFO).and_then(|v| v.as_text()).unwrap_or_default();
                writeln!(out, "info : {}", info)?;
            }
            if scope.ontology {
                for (title, ontology) in [
                    ("cellular components", Ontology::CellComponents),
                    ("molecular functions", Ontology::MolecularFunctions),
                    ("biological processes", Ontology::BiologicalProcesses),
                ] {
                    writeln!(out, "{} :", title)?;
                    for go_id in data.text_list(ontology.node_attribute()) {
                        writeln!(out, "\t{}", term_name(go_id.as_str()))?;
                    }
                }
            }
            if scope.metabolites {
                writeln!(out, "associated metabolites :")?;
                for m in data.text_list(METABOLITES) {
                    writeln!(out, "\t{}", mappings.metabolite_name(m).unwrap_or(m))?;
                }
            }
            if scope.pathways {
                writeln!(out, "associated pathways :")?;
                for p in data.text_list(PATHWAYS) {
                    writeln!(out, "\t{}", p)?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
