use crate::{
    errors::Result,
    graph::Graph,
    types::RelationType,
};
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use std::collections::BTreeMap;

const NODE_TYPE_KEY: &str = "node_type";
const SCORE_KEY: &str = "score";
const RELATION_KEY: &str = "relation";

/// Maps the attribute names to the GraphML key IDs.
struct KeyIds {
    node: BTreeMap<String, String>,
    score: String,
    relation: String,
}

fn write_key<W: std::io::Write>(
    writer: &mut Writer<W>,
    id: &str,
    domain: &str,
    name: &str,
    attr_type: &str,
) -> Result<()> {
    let mut key_start = BytesStart::new("key");
    key_start.push_attribute(("id", id));
    key_start.push_attribute(("for", domain));
    key_start.push_attribute(("attr.name", name));
    key_start.push_attribute(("attr.type", attr_type));
    writer.write_event(Event::Empty(key_start))?;
    Ok(())
}

fn export_keys<R: RelationType, W: std::io::Write>(
    graph: &Graph<R>,
    writer: &mut Writer<W>,
) -> Result<KeyIds> {
    let mut names: Vec<String> = vec![NODE_TYPE_KEY.to_string()];
    for (_, data) in graph.nodes() {
        for name in data.attributes.keys() {
            if !names.iter().any(|n| n == name.as_str()) {
                names.push(name.to_string());
            }
        }
    }
    names[1..].sort();

    let mut node = BTreeMap::new();
    for (i, name) in names.into_iter().enumerate() {
        let id = format!("k{}", i);
        write_key(writer, &id, "node", &name, "string")?;
        node.insert(name, id);
    }

    let score = format!("k{}", node.len());
    write_key(writer, &score, "edge", SCORE_KEY, "double")?;
    let relation = format!("k{}", node.len() + 1);
    write_key(writer, &relation, "edge", RELATION_KEY, "string")?;

    Ok(KeyIds {
        node,
        score,
        relation,
    })
}

fn write_data<W: std::io::Write>(writer: &mut Writer<W>, key: &str, value: &str) -> Result<()> {
    let mut data_start = BytesStart::new("data");
    data_start.push_attribute(("key", key));
    writer.write_event(Event::Start(data_start))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new("data")))?;
    Ok(())
}

fn export_nodes<R: RelationType, W: std::io::Write>(
    graph: &Graph<R>,
    writer: &mut Writer<W>,
    keys: &KeyIds,
) -> Result<()> {
    for (id, data) in graph.nodes() {
        let mut node_start = BytesStart::new("node");
        node_start.push_attribute(("id", id.as_str()));
        writer.write_event(Event::Start(node_start))?;

        if let Some(key) = keys.node.get(NODE_TYPE_KEY) {
            write_data(writer, key, data.node_type.as_ref())?;
        }
        for (name, value) in &data.attributes {
            if let Some(key) = keys.node.get(name.as_str()) {
                write_data(writer, key, &value.to_string())?;
            }
        }

        writer.write_event(Event::End(BytesEnd::new("node")))?;
    }
    Ok(())
}

fn export_edges<R: RelationType, W: std::io::Write>(
    graph: &Graph<R>,
    writer: &mut Writer<W>,
    keys: &KeyIds,
) -> Result<()> {
    for (source, target, data) in graph.edges() {
        let mut edge_start = BytesStart::new("edge");
        edge_start.push_attribute(("source", source.as_str()));
        edge_start.push_attribute(("target", target.as_str()));
        writer.write_event(Event::Start(edge_start))?;
        if let Some(score) = data.score {
            write_data(writer, &keys.score, &score.to_string())?;
        }
        if let Some(relation) = data.relation {
            write_data(writer, &keys.relation, &relation.to_string())?;
        }
        writer.write_event(Event::End(BytesEnd::new("edge")))?;
    }
    Ok(())
}

/// Write the graph as GraphML. Every node attribute gets its own key, list and
/// numeric values are written as comma separated text.
pub fn export<R: RelationType, W: std::io::Write>(graph: &Graph<R>, output: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(output, b' ', 4);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut graphml_start = BytesStart::new("graphml");
    graphml_start.push_attribute(("xmlns", "http://graphml.graphdrawing.org/xmlns"));
    writer.write_event(Event::Start(graphml_start))?;

    let keys = export_keys(graph, &mut writer)?;

    let mut graph_start = BytesStart::new("graph");
    graph_start.push_attribute((
        "edgedefault",
        if graph.is_directed() {
            "directed"
        } else {
            "undirected"
        },
    ));
    writer.write_event(Event::Start(graph_start))?;

    export_nodes(graph, &mut writer, &keys)?;
    export_edges(graph, &mut writer, &keys)?;

    writer.write_event(Event::End(BytesEnd::new("graph")))?;
    writer.write_event(Event::End(BytesEnd::new("graphml")))?;

    Ok(())
}
