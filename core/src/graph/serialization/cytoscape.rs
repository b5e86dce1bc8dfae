use crate::{
    errors::Result,
    graph::{EdgeData, Graph, NodeData},
    types::{AttributeValue, RelationType},
};
use serde_json::{json, Map, Value};

fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::Text(t) => Value::String(t.clone()),
        AttributeValue::TextList(l) => json!(l),
        AttributeValue::Numbers(n) => json!(n),
    }
}

fn node_element(id: &str, node: &NodeData) -> Value {
    let mut data = Map::new();
    for (name, value) in &node.attributes {
        data.insert(name.to_string(), attribute_to_json(value));
    }
    data.insert("node_type".to_string(), json!(node.node_type.as_ref()));
    data.insert("id".to_string(), json!(id));
    data.insert("value".to_string(), json!(id));
    data.insert("name".to_string(), json!(id));
    json!({ "data": data })
}

fn edge_element<R: RelationType>(source: &str, target: &str, edge: &EdgeData<R>) -> Value {
    let mut data = Map::new();
    if let Some(score) = edge.score {
        data.insert("score".to_string(), json!(score));
    }
    if let Some(relation) = edge.relation {
        data.insert("relation".to_string(), json!(relation.to_string()));
    }
    data.insert("source".to_string(), json!(source));
    data.insert("target".to_string(), json!(target));
    json!({ "data": data })
}

/// Create the Cytoscape JSON representation (`.cyjs`) of a graph.
pub fn to_cytoscape<R: RelationType>(graph: &Graph<R>) -> Value {
    let nodes: Vec<Value> = graph
        .nodes()
        .map(|(id, node)| node_element(id, node))
        .collect();
    let edges: Vec<Value> = graph
        .edges()
        .map(|(source, target, edge)| edge_element(source, target, edge))
        .collect();
    json!({
        "data": [],
        "directed": graph.is_directed(),
        "multigraph": false,
        "elements": {
            "nodes": nodes,
            "edges": edges,
        }
    })
}

/// Write a graph as Cytoscape JSON to `output`.
pub fn export<R: RelationType, W: std::io::Write>(graph: &Graph<R>, output: W) -> Result<()> {
    serde_json::to_writer(output, &to_cytoscape(graph))?;
    Ok(())
}
