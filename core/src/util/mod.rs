#[cfg(test)]
pub(crate) mod example_graphs;

/// Returns `true` if `value` is a number in [0, 1]. `NaN` is never inside the interval.
pub fn is_unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Split a UniProt style gene ontology cell ("name a [GO:1]; name b [GO:2]") into
/// `(GO id, name)` pairs.
pub fn split_go_annotations(cell: &str) -> Vec<(String, String)> {
    cell.split("; ")
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            let entry = entry.trim();
            match entry.rsplit_once(" [") {
                Some((name, id)) => (id.trim_end_matches(']').to_string(), name.to_string()),
                None => (entry.trim_end_matches(']').trim_start_matches('[').to_string(), String::new()),
            }
        })
        .collect()
}
