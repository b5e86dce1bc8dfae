use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Unique identifier of a node, e.g. a UniProt accession or a GO id.
pub type NodeId = smartstring::alias::String;

/// Edge between a source and target node which are identified by their ID.
///
/// For undirected graphs the orientation carries no meaning.
#[derive(Serialize, Deserialize, Eq, PartialEq, PartialOrd, Ord, Clone, Debug, Hash, Default)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new<S: Into<NodeId>, T: Into<NodeId>>(source: S, target: T) -> Edge {
        Edge {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn inverse(&self) -> Edge {
        Edge {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// The closed set of node categories.
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
#[strum(serialize_all = "snake_case")]
pub enum NodeType {
    /// Protein referenced in the metabolome, carries `metabolites` and `pathways`.
    MetabolomeProtein,
    /// Any other protein.
    OtherProtein,
    /// A term of one of the gene ontologies.
    OntologyTerm,
}

/// Value of a single node attribute.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum AttributeValue {
    Text(String),
    TextList(Vec<String>),
    Numbers(Vec<f64>),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            AttributeValue::TextList(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_numbers(&self) -> Option<&[f64]> {
        match self {
            AttributeValue::Numbers(n) => Some(n),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(val: &str) -> Self {
        AttributeValue::Text(val.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(val: String) -> Self {
        AttributeValue::Text(val)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(val: Vec<String>) -> Self {
        AttributeValue::TextList(val)
    }
}

impl From<Vec<f64>> for AttributeValue {
    fn from(val: Vec<f64>) -> Self {
        AttributeValue::Numbers(val)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AttributeValue::Text(t) => write!(f, "{}", t),
            AttributeValue::TextList(l) => write!(f, "{}", l.join(", ")),
            AttributeValue::Numbers(n) => {
                let mut first = true;
                for v in n {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

/// Kind of relation an edge of a graph can carry.
pub trait RelationType:
    Copy + Debug + fmt::Display + FromStr + Eq + Hash + Ord + Serialize + DeserializeOwned + Send + Sync
{
    fn all_relation_types() -> Vec<Self>;
}

/// Mode of action between two interacting proteins.
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
#[strum(serialize_all = "snake_case")]
pub enum InteractionLink {
    Activation,
    Binding,
    Catalysis,
    Expression,
    Inhibition,
    Ptmod,
    Reaction,
    /// Marks a pair of proteins which are not connected in the graph.
    NotLinked,
}

impl RelationType for InteractionLink {
    fn all_relation_types() -> Vec<Self> {
        InteractionLink::iter().collect()
    }
}

/// Relation between two gene ontology terms.
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
#[strum(serialize_all = "snake_case")]
pub enum OntologyRelation {
    IsA,
    PartOf,
    Regulates,
    PositivelyRegulates,
    NegativelyRegulates,
    HasPart,
    OccursIn,
}

impl RelationType for OntologyRelation {
    fn all_relation_types() -> Vec<Self> {
        OntologyRelation::iter().collect()
    }
}
