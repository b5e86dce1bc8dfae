//! Export of graphs into formats understood by other tools.

pub mod cytoscape;
pub mod graphml;
