//! Datasets of interacting and non-interacting protein pairs for machine learning.

use std::io::Write;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    errors::{BioGraphsError, Result},
    graph::Graph,
    types::{AttributeValue, InteractionLink, NodeId},
    util::is_unit_interval,
};

/// Parameters for building a [PPInteractionDataset].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DatasetConfig {
    /// Edges with a score greater than or equal to this value are positive samples.
    pub score_threshold: f64,
    /// Node attribute that represents a protein in a sample.
    pub node_attribute: String,
    /// Use the edge score as label instead of `1.0` for positive samples.
    pub regression: bool,
    /// Number of negative samples relative to the number of positive samples.
    pub no_interactions_ratio: f64,
    /// Seed for drawing the negative samples. Without a seed the random generator is
    /// initialized from the operating system.
    pub seed: Option<u64>,
}

impl DatasetConfig {
    pub fn new<S: Into<String>>(score_threshold: f64, node_attribute: S) -> DatasetConfig {
        DatasetConfig {
            score_threshold,
            node_attribute: node_attribute.into(),
            regression: false,
            no_interactions_ratio: 1.0,
            seed: None,
        }
    }

    fn validate(&self) -> Result<()> {
        if !is_unit_interval(self.score_threshold) {
            return Err(BioGraphsError::InvalidScoreThreshold(self.score_threshold));
        }
        if !self.no_interactions_ratio.is_finite() || self.no_interactions_ratio < 0.0 {
            return Err(BioGraphsError::InvalidNegativeRatio(
                self.no_interactions_ratio,
            ));
        }
        Ok(())
    }
}

/// A pair of proteins selected for the dataset.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SampledPair {
    pub source: NodeId,
    pub target: NodeId,
    /// Only set for datasets of directed graphs.
    pub relation: Option<InteractionLink>,
    pub label: f64,
}

/// A single sample of a [PPInteractionDataset].
#[derive(Clone, Debug, PartialEq)]
pub struct Sample<'g> {
    /// Attribute value of the first protein or `None` if the protein does not have it.
    pub a: Option<&'g AttributeValue>,
    pub b: Option<&'g AttributeValue>,
    pub relation: Option<InteractionLink>,
    pub label: f64,
}

/// Pairs of proteins of an interaction graph with a label describing whether they interact.
///
/// The positive samples are all edges with a score of at least the configured
/// threshold, labelled with their score (regression) or `1.0` (classification). They
/// are followed by `⌊ratio * positives⌋` negative samples with the label `0.0`, which
/// are drawn uniformly from the unordered pairs of proteins that are not connected in
/// any direction. A protein paired with itself counts as such a pair unless it has a
/// self loop. No unordered pair is drawn twice. If the graph has fewer unconnected
/// pairs, all of them are used.
#[derive(Clone, Debug)]
pub struct PPInteractionDataset<'g> {
    graph: &'g Graph<InteractionLink>,
    node_attribute: String,
    pairs: Vec<SampledPair>,
    positives: usize,
}

impl<'g> PPInteractionDataset<'g> {
    pub fn new(
        graph: &'g Graph<InteractionLink>,
        config: &DatasetConfig,
    ) -> Result<PPInteractionDataset<'g>> {
        config.validate()?;
        if graph.node_count() > 0 && !graph.has_node_attribute(&config.node_attribute) {
            return Err(BioGraphsError::UnknownNodeAttribute(
                config.node_attribute.clone(),
            ));
        }

        let directed = graph.is_directed();
        let mut pairs: Vec<SampledPair> = graph
            .edges()
            .filter_map(|(source, target, data)| {
                let score = data.score.filter(|s| *s >= config.score_threshold)?;
                Some(SampledPair {
                    source: source.clone(),
                    target: target.clone(),
                    relation: if directed { data.relation } else { None },
                    label: if config.regression { score } else { 1.0 },
                })
            })
            .collect();
        let positives = pairs.len();

        let requested = (config.no_interactions_ratio * positives as f64).floor() as usize;
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let negatives = sample_unconnected_pairs(graph, requested, &mut rng);
        if negatives.len() < requested {
            warn!(
                "Requested {} negative samples, but the graph only has {} unconnected pairs",
                requested,
                negatives.len()
            );
        }
        let negative_relation = if directed {
            Some(InteractionLink::NotLinked)
        } else {
            None
        };
        pairs.extend(negatives.into_iter().map(|(source, target)| SampledPair {
            source: source.clone(),
            target: target.clone(),
            relation: negative_relation,
            label: 0.0,
        }));

        info!(
            "Created dataset with {} positive and {} negative samples (threshold {}, attribute {})",
            positives,
            pairs.len() - positives,
            config.score_threshold,
            config.node_attribute
        );

        Ok(PPInteractionDataset {
            graph,
            node_attribute: config.node_attribute.clone(),
            pairs,
            positives,
        })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    pub fn node_attribute(&self) -> &str {
        &self.node_attribute
    }

    /// Get the sample at position `index`. Positive samples come first.
    pub fn get(&self, index: usize) -> Result<Sample<'g>> {
        let pair = self
            .pairs
            .get(index)
            .ok_or(BioGraphsError::IndexOutOfRange {
                index,
                len: self.pairs.len(),
            })?;
        Ok(self.sample(pair))
    }

    pub fn iter(&self) -> impl Iterator<Item = Sample<'g>> + '_ {
        self.pairs.iter().map(move |p| self.sample(p))
    }

    /// All sampled pairs in dataset order.
    pub fn pairs(&self) -> &[SampledPair] {
        &self.pairs
    }

    pub fn positives(&self) -> &[SampledPair] {
        &self.pairs[..self.positives]
    }

    pub fn negatives(&self) -> &[SampledPair] {
        &self.pairs[self.positives..]
    }

    fn sample(&self, pair: &SampledPair) -> Sample<'g> {
        Sample {
            a: self.graph.node_attribute(&pair.source, &self.node_attribute),
            b: self.graph.node_attribute(&pair.target, &self.node_attribute),
            relation: pair.relation,
            label: pair.label,
        }
    }

    /// Write the dataset as CSV with the columns `source`, `target`, `a`, `b`,
    /// `relation` and `label`. Missing values are written as empty fields.
    pub fn write_csv<W: Write>(&self, output: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(output);
        writer.write_record(["source", "target", "a", "b", "relation", "label"])?;
        for pair in &self.pairs {
            let sample = self.sample(pair);
            let display = |v: Option<&AttributeValue>| v.map(|v| v.to_string()).unwrap_or_default();
            writer.write_record([
                pair.source.to_string(),
                pair.target.to_string(),
                display(sample.a),
                display(sample.b),
                pair.relation.map(|r| r.to_string()).unwrap_or_default(),
                pair.label.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Draw up to `count` pairs of nodes which are not connected in any direction. A node
/// paired with itself is a candidate unless it has a self loop.
///
/// Sparse requests use rejection sampling, otherwise all candidate pairs are
/// enumerated and a random subset is selected. Both draw each unordered pair with the
/// same probability and store it in a random orientation.
fn sample_unconnected_pairs<'a, R: Rng>(
    graph: &'a Graph<InteractionLink>,
    count: usize,
    rng: &mut R,
) -> Vec<(&'a NodeId, &'a NodeId)> {
    let nodes: Vec<&NodeId> = graph.node_ids().collect();
    let index: FxHashMap<&NodeId, usize> = nodes.iter().enumerate().map(|(i, n)| (*n, i)).collect();
    let connected: FxHashSet<(usize, usize)> = graph
        .edges()
        .filter_map(|(source, target, _)| {
            let s = *index.get(source)?;
            let t = *index.get(target)?;
            Some((s.min(t), s.max(t)))
        })
        .collect();

    let n = nodes.len();
    let available = (n * (n + 1) / 2).saturating_sub(connected.len());
    let count = count.min(available);
    if count == 0 {
        return Vec::new();
    }

    let oriented = |a: usize, b: usize, rng: &mut R| {
        if rng.gen::<bool>() {
            (nodes[a], nodes[b])
        } else {
            (nodes[b], nodes[a])
        }
    };

    let mut result = Vec::with_capacity(count);
    if count.saturating_mul(2) <= available {
        let mut sampled: FxHashSet<(usize, usize)> = FxHashSet::default();
        while result.len() < count {
            let a = rng.gen_range(0..n);
            let b = rng.gen_range(0..n);
            // only the ordered draw (min, max) counts, so self pairs are not underrepresented
            if a > b {
                continue;
            }
            if connected.contains(&(a, b)) || !sampled.insert((a, b)) {
                continue;
            }
            result.push(oriented(a, b, &mut *rng));
        }
    } else {
        let candidates: Vec<(usize, usize)> = (0..n)
            .flat_map(|a| (a..n).map(move |b| (a, b)))
            .filter(|key| !connected.contains(key))
            .collect();
        for i in rand::seq::index::sample(&mut *rng, candidates.len(), count).iter() {
            let (a, b) = candidates[i];
            result.push(oriented(a, b, &mut *rng));
        }
    }
    result
}
