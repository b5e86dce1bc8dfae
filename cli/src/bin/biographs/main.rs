#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod settings;

use anyhow::{anyhow, Context, Result};
use biographs_core::{
    dataset::DatasetConfig,
    graph::serialization::{cytoscape, graphml},
    graph::Graph,
    interactions::{OntologyQuery, SearchScope, SubgraphFilter},
    types::{NodeId, RelationType},
    CovidData, DataLocations, InteractionGraph, Mappings, Ontology, OntologyGraph,
    PPInteractionDataset,
};
use clap::{App, AppSettings, Arg, ArgGroup, ArgMatches, SubCommand};
use settings::Settings;
use simplelog::{LevelFilter, SimpleLogger, TermLogger};
use std::io::{BufWriter, Write};
use std::str::FromStr;

fn parse_value<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .value_of(name)
        .map(|v| {
            v.parse::<T>()
                .with_context(|| format!("invalid value '{}' for --{}", v, name))
        })
        .transpose()
}

/// Write to the file given by `--output` or to the standard output.
fn output(matches: &ArgMatches) -> Result<Box<dyn Write>> {
    match matches.value_of("output") {
        Some(path) => {
            let f = std::fs::File::create(path)
                .with_context(|| format!("could not create output file {}", path))?;
            Ok(Box::new(BufWriter::new(f)))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

fn directed_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("directed")
        .long("directed")
        .help("Use the directed interaction graph instead of the undirected one")
}

fn output_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("output")
        .short("o")
        .long("output")
        .takes_value(true)
        .help("Output file, the standard output is used if not given")
}

fn info(locations: &DataLocations, matches: &ArgMatches) -> Result<()> {
    if let Some(name) = matches.value_of("ontology") {
        let ontology = OntologyGraph::load(locations, name)?;
        println!(
            "{} ontology: {}",
            ontology.name(),
            ontology.graph().statistics()
        );
    } else {
        let directed = matches.is_present("directed");
        let g = InteractionGraph::load(locations, directed)?;
        println!(
            "{} interaction graph: {}",
            if directed { "directed" } else { "undirected" },
            g.graph().statistics()
        );
    }
    if matches.is_present("covid") {
        let covid = CovidData::load(locations)?;
        let human = covid.iter().filter(|(_, p)| p.human).count();
        println!(
            "covid data: {} proteins ({} human), {} interacting nodes",
            covid.len(),
            human,
            covid.interacting_nodes().len()
        );
    }
    Ok(())
}

fn sample(locations: &DataLocations, settings: &Settings, matches: &ArgMatches) -> Result<()> {
    let defaults = &settings.sampler;
    let config = DatasetConfig {
        score_threshold: parse_value(matches, "threshold")?.unwrap_or(defaults.score_threshold),
        node_attribute: matches
            .value_of("attribute")
            .unwrap_or(&defaults.node_attribute)
            .to_string(),
        regression: matches.is_present("regression") || defaults.regression,
        no_interactions_ratio: parse_value(matches, "ratio")?
            .unwrap_or(defaults.no_interactions_ratio),
        seed: parse_value(matches, "seed")?.or(defaults.seed),
    };

    let g = InteractionGraph::load(locations, matches.is_present("directed"))?;
    let dataset = PPInteractionDataset::new(g.graph(), &config)?;
    let mut out = output(matches)?;
    dataset.write_csv(&mut out)?;
    out.flush()?;
    Ok(())
}

fn search(locations: &DataLocations, matches: &ArgMatches) -> Result<()> {
    let g = InteractionGraph::load(locations, matches.is_present("directed"))?;
    let mappings = Mappings::load(locations)?;

    let filter = SubgraphFilter {
        tissue: matches.value_of("tissue").map(|t| t.to_string()),
        score_threshold: parse_value(matches, "score-threshold")?.unwrap_or(0.0),
        expression_threshold: parse_value(matches, "expression-threshold")?.unwrap_or(0.0),
    };
    let scope: SearchScope = parse_value(matches, "scope")?.unwrap_or_default();

    let result = if let Some(regex) = matches.value_of("regex") {
        g.sub_graph_by_node_regex_search(&mappings, regex, &scope, &filter)?
    } else if let Some(query) = matches.value_of("ontology-query") {
        let query = OntologyQuery::from_str(query)?;
        g.sub_graph_by_node_ontology_search(&mappings, &query, &filter)?
    } else if let Some(nodes) = matches.values_of("propagate") {
        let nodes: Vec<NodeId> = nodes.map(NodeId::from).collect();
        let diameter = parse_value(matches, "diameter")?.unwrap_or(1);
        g.sub_graph_from_node_propagation(&mappings, &nodes, diameter, &filter)?
    } else {
        return Err(anyhow!("no search given"));
    };
    info!("Result: {}", result.graph().statistics());

    let limit = parse_value(matches, "limit")?.unwrap_or(30);
    let mut out = output(matches)?;
    result.write_node_summaries(&mappings, &scope, limit, &mut out)?;

    if matches.is_present("rank-tissues") {
        writeln!(out, "Tissues with the highest expression:")?;
        for t in result.rank_tissues_by_expression(&mappings, result.graph().node_ids(), limit) {
            writeln!(out, "\t{} : {:.4}", t.tissue, t.mean)?;
        }
    }
    if let Some(ontology) = matches.value_of("most-present") {
        let ontology = Ontology::from_name(ontology)?;
        let tissue = filter
            .tissue
            .as_deref()
            .ok_or_else(|| anyhow!("--most-present requires --tissue"))?;
        let size_threshold = parse_value(matches, "size-threshold")?.unwrap_or(0);
        writeln!(out, "Most affected {}:", ontology)?;
        for term in
            result.most_present_terms(&mappings, ontology, tissue, size_threshold, limit)?
        {
            writeln!(
                out,
                "\t{} ({}) : {:.4}",
                term.name.as_deref().unwrap_or_default(),
                term.go_id,
                term.score
            )?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_graph<R: RelationType, W: Write>(graph: &Graph<R>, format: &str, out: W) -> Result<()> {
    match format {
        "graphml" => graphml::export(graph, out)?,
        _ => cytoscape::export(graph, out)?,
    }
    Ok(())
}

fn export(locations: &DataLocations, matches: &ArgMatches) -> Result<()> {
    let format = matches.value_of("format").unwrap_or("cytoscape");
    let mut out = output(matches)?;
    if let Some(name) = matches.value_of("ontology") {
        let ontology = OntologyGraph::load(locations, name)?;
        write_graph(ontology.graph(), format, &mut out)?;
    } else {
        let g = InteractionGraph::load(locations, matches.is_present("directed"))?;
        write_graph(g.graph(), format, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let matches = App::new("biographs")
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Inspect the packaged biological graphs and build interaction datasets.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .long("config")
                .takes_value(true)
                .help("Configuration file in TOML format"),
        )
        .arg(
            Arg::with_name("data-dir")
                .long("data-dir")
                .takes_value(true)
                .help("Directory containing the packaged data"),
        )
        .arg(
            Arg::with_name("debug")
                .short("d")
                .long("debug")
                .help("Enables debug output")
                .takes_value(false),
        )
        .subcommand(
            SubCommand::with_name("info")
                .about("Print statistics of a packaged graph")
                .arg(directed_arg())
                .arg(
                    Arg::with_name("ontology")
                        .long("ontology")
                        .takes_value(true)
                        .help("Show the ontology graph (name or bp, cc, mf) instead"),
                )
                .arg(
                    Arg::with_name("covid")
                        .long("covid")
                        .help("Also summarize the covid data"),
                ),
        )
        .subcommand(
            SubCommand::with_name("sample")
                .about("Write an interaction dataset as CSV")
                .arg(directed_arg())
                .arg(output_arg())
                .arg(
                    Arg::with_name("threshold")
                        .long("threshold")
                        .takes_value(true)
                        .help("Minimal score of the positive edges"),
                )
                .arg(
                    Arg::with_name("attribute")
                        .long("attribute")
                        .takes_value(true)
                        .help("Node attribute representing a protein"),
                )
                .arg(
                    Arg::with_name("regression")
                        .long("regression")
                        .help("Label positive samples with their score"),
                )
                .arg(
                    Arg::with_name("ratio")
                        .long("ratio")
                        .takes_value(true)
                        .help("Number of negative samples per positive sample"),
                )
                .arg(
                    Arg::with_name("seed")
                        .long("seed")
                        .takes_value(true)
                        .help("Seed for the negative sampling"),
                ),
        )
        .subcommand(
            SubCommand::with_name("search")
                .about("Extract a sub graph of the interaction graph")
                .arg(directed_arg())
                .arg(output_arg())
                .arg(
                    Arg::with_name("regex")
                        .long("regex")
                        .takes_value(true)
                        .help("Regular expression searched in the node attributes"),
                )
                .arg(
                    Arg::with_name("ontology-query")
                        .long("ontology-query")
                        .takes_value(true)
                        .help("GO id or JSON query like [\"and\", \"GO:1\", [\"not\", \"GO:2\"]]"),
                )
                .arg(
                    Arg::with_name("propagate")
                        .long("propagate")
                        .takes_value(true)
                        .multiple(true)
                        .help("Start nodes for the neighborhood propagation"),
                )
                .group(
                    ArgGroup::with_name("query")
                        .args(&["regex", "ontology-query", "propagate"])
                        .required(true),
                )
                .arg(
                    Arg::with_name("scope")
                        .long("scope")
                        .takes_value(true)
                        .help("Attributes to search and print, e.g. i_p_m_o"),
                )
                .arg(
                    Arg::with_name("diameter")
                        .long("diameter")
                        .takes_value(true)
                        .help("Number of propagation steps"),
                )
                .arg(Arg::with_name("tissue").long("tissue").takes_value(true))
                .arg(
                    Arg::with_name("expression-threshold")
                        .long("expression-threshold")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("score-threshold")
                        .long("score-threshold")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("limit")
                        .long("limit")
                        .takes_value(true)
                        .help("Maximal number of printed nodes, tissues and terms"),
                )
                .arg(
                    Arg::with_name("rank-tissues")
                        .long("rank-tissues")
                        .help("Print the tissues where the result is expressed most"),
                )
                .arg(
                    Arg::with_name("most-present")
                        .long("most-present")
                        .takes_value(true)
                        .help("Print the most present terms of this ontology"),
                )
                .arg(
                    Arg::with_name("size-threshold")
                        .long("size-threshold")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("export")
                .about("Export a graph as Cytoscape JSON or GraphML")
                .arg(directed_arg())
                .arg(output_arg())
                .arg(
                    Arg::with_name("ontology")
                        .long("ontology")
                        .takes_value(true)
                        .help("Export the ontology graph (name or bp, cc, mf) instead"),
                )
                .arg(
                    Arg::with_name("format")
                        .long("format")
                        .takes_value(true)
                        .possible_values(&["cytoscape", "graphml"]),
                ),
        )
        .get_matches();

    let settings = Settings::with_file(matches.value_of_lossy("config"))?;

    let log_filter = if matches.is_present("debug") || settings.logging.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_config = simplelog::ConfigBuilder::new().build();
    if let Err(e) = TermLogger::init(
        log_filter,
        log_config.clone(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Error, can't initialize the terminal log output: {}.\nWill degrade to a more simple logger", e);
        if let Err(e_simple) = SimpleLogger::init(log_filter, log_config) {
            eprintln!("Simple logging failed too: {}", e_simple);
        }
    }

    let locations = DataLocations::new(matches.value_of("data-dir").unwrap_or(&settings.data.dir));
    debug!("Using data directory {}", locations.root().to_string_lossy());

    match matches.subcommand() {
        ("info", Some(sub)) => info(&locations, sub),
        ("sample", Some(sub)) => sample(&locations, &settings, sub),
        ("search", Some(sub)) => search(&locations, sub),
        ("export", Some(sub)) => export(&locations, sub),
        _ => Err(anyhow!("unknown command")),
    }
}
