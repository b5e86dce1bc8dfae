use thiserror::Error;

use crate::types::NodeId;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BioGraphsError {
    #[error("could not load resource from file {path}: {source}")]
    LoadingResource {
        path: String,
        source: std::io::Error,
    },
    #[error("resource file {path} is corrupt: {source}")]
    CorruptResource {
        path: String,
        source: bincode::Error,
    },
    #[error("graph in {path} is {actual}, but a {expected} graph was requested")]
    UnexpectedGraphKind {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("score threshold must be in [0, 1], but got {0}")]
    InvalidScoreThreshold(f64),
    #[error("negative sampling ratio must be a finite, non-negative number, but got {0}")]
    InvalidNegativeRatio(f64),
    #[error("no node in the graph has the attribute '{0}'")]
    UnknownNodeAttribute(String),
    #[error("sample index {index} is out of range for a dataset of size {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid ontology name {0}, expected one of biological_processes, cell_components, molecular_functions (or bp, cc, mf)")]
    InvalidOntologyName(String),
    #[error("invalid search scope '{0}', expected an underscore separated combination of i, p, m and o")]
    InvalidSearchScope(String),
    #[error("invalid ontology query: {0}")]
    InvalidOntologyQuery(String),
    #[error("tissue {0} is not part of the tissue mapping")]
    UnknownTissue(String),
    #[error("node {0} is missing")]
    MissingNode(NodeId),
    #[error("edge score {score} between {from} and {to} is outside of [0, 1]")]
    InvalidEdgeScore { from: NodeId, to: NodeId, score: f64 },
    #[error("column {0} is missing in the protein table")]
    MissingColumn(String),
    #[error(transparent)]
    BincodeSerialization(#[from] bincode::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    PersistingTemporaryFile(#[from] tempfile::PersistError),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, BioGraphsError>;
