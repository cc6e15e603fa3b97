use petgraph::algo::{connected_components, dijkstra, tarjan_scc};
use petgraph::graph::{Graph, UnGraph};
use petgraph::{EdgeType, Undirected};

use super::model::MailGraph;
use crate::error::GraphError;

/// Degree per node position. Every edge counts once at each end, so a
/// self-loop adds 2 and the total is always twice the edge count.
pub fn degrees(graph: &MailGraph) -> Vec<usize> {
    let mut degree = vec![0; graph.node_count()];
    for (a, b) in graph.edge_positions() {
        degree[a] += 1;
        degree[b] += 1;
    }
    degree
}

/// `histogram[d]` is the number of nodes with degree `d`
pub fn degree_histogram(graph: &MailGraph) -> Vec<usize> {
    let degree = degrees(graph);
    let max = degree.iter().copied().max().unwrap_or(0);
    let mut histogram = vec![0; if degree.is_empty() { 0 } else { max + 1 }];
    for d in degree {
        histogram[d] += 1;
    }
    histogram
}

/// The `k` highest-degree addresses, ties broken alphabetically
pub fn top_degrees(graph: &MailGraph, k: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = degrees(graph)
        .into_iter()
        .enumerate()
        .map(|(pos, d)| (graph.address(pos).to_string(), d))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}

/// `(log10 degree, log10 count)` for every non-zero histogram bucket with degree > 0
pub fn log_log_points(histogram: &[usize]) -> Vec<(f64, f64)> {
    histogram
        .iter()
        .enumerate()
        .filter(|&(degree, &count)| degree > 0 && count > 0)
        .map(|(degree, &count)| ((degree as f64).log10(), (count as f64).log10()))
        .collect()
}

/// Edge density. Parallel edges are counted, so a multigraph can exceed 1.
pub fn density(graph: &MailGraph) -> f64 {
    let n = graph.node_count() as f64;
    if n <= 1.0 {
        return 0.0;
    }
    let e = graph.edge_count() as f64;
    if graph.kind().is_directed() {
        e / (n * (n - 1.0))
    } else {
        e / (n * (n - 1.0) / 2.0)
    }
}

/// Undirected copy of the graph structure, weights dropped. Node indices
/// match the stored graph.
fn undirected(graph: &MailGraph) -> UnGraph<(), ()> {
    graph
        .inner()
        .map(|_, _| (), |_, _| ())
        .into_edge_type::<Undirected>()
}

/// Whether every address can reach every other one. Directed graphs must be
/// strongly connected.
pub fn is_connected(graph: &MailGraph) -> bool {
    if graph.kind().is_directed() {
        tarjan_scc(graph.inner()).len() <= 1
    } else {
        connected_components(&undirected(graph)) <= 1
    }
}

/// Local clustering coefficient per node, on the undirected projection
pub fn clustering(graph: &MailGraph) -> Vec<f64> {
    let adjacency = graph.neighbor_sets();
    adjacency
        .iter()
        .map(|neighbors| {
            let k = neighbors.len();
            if k < 2 {
                return 0.0;
            }
            // Count each neighbor pair once
            let links = neighbors
                .iter()
                .flat_map(|&u| adjacency[u].iter().map(move |&w| (u, w)))
                .filter(|&(u, w)| u < w && neighbors.contains(&w))
                .count();
            2.0 * links as f64 / (k * (k - 1)) as f64
        })
        .collect()
}

/// Mean clustering coefficient over all nodes, isolated ones included
pub fn average_clustering(graph: &MailGraph) -> f64 {
    let coefficients = clustering(graph);
    if coefficients.is_empty() {
        return 0.0;
    }
    coefficients.iter().sum::<f64>() / coefficients.len() as f64
}

/// Sum of hop counts from every node to every other node. Fails on the first
/// source, in node order, that cannot reach some target.
fn distance_total<N, E, Ty: EdgeType>(
    g: &Graph<N, E, Ty>,
    graph: &MailGraph,
) -> Result<usize, GraphError> {
    let mut total = 0;
    for source in g.node_indices() {
        let distances = dijkstra(g, source, None, |_| 1usize);
        if let Some(target) = g.node_indices().find(|t| !distances.contains_key(t)) {
            return Err(GraphError::Disconnected {
                from: graph.address(source.index()).to_string(),
                to: graph.address(target.index()).to_string(),
            });
        }
        total += distances.values().sum::<usize>();
    }
    Ok(total)
}

/// Mean hop count over all ordered pairs of distinct nodes.
/// Directed graphs follow edge direction, so they must be strongly connected.
pub fn average_shortest_path_length(graph: &MailGraph) -> Result<f64, GraphError> {
    let n = graph.node_count();
    match n {
        0 => return Err(GraphError::Empty),
        1 => return Ok(0.0),
        _ => {}
    }

    let total = if graph.kind().is_directed() {
        distance_total(graph.inner(), graph)?
    } else {
        distance_total(&undirected(graph), graph)?
    };

    Ok(total as f64 / (n * (n - 1)) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphKind;
    use crate::mail::Message;
    use std::rc::Rc;

    fn graph(kind: GraphKind, edges: &[(&str, &str)]) -> MailGraph {
        let message = Rc::new(Message::default());
        let mut g = MailGraph::new(kind);
        for (a, b) in edges {
            g.add_edge(a, b, Rc::clone(&message));
        }
        g
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_degree_sum_is_twice_edges() {
        let g = graph(
            GraphKind::Simple,
            &[("a", "b"), ("a", "c"), ("b", "c"), ("c", "d")],
        );
        let degree = degrees(&g);
        assert_eq!(degree, [2, 2, 3, 1]);
        assert_eq!(degree.iter().sum::<usize>(), 2 * g.edge_count());
        assert_eq!(degree_histogram(&g), [0, 1, 2, 1]);
    }

    #[test]
    fn test_multigraph_degree_counts_parallel_edges() {
        let g = graph(GraphKind::Multi, &[("a", "b"), ("a", "b"), ("b", "b")]);
        assert_eq!(degrees(&g), [2, 4]);
        assert_eq!(
            top_degrees(&g, 5),
            [("b".to_string(), 4), ("a".to_string(), 2)]
        );
    }

    #[test]
    fn test_top_degrees_truncates_and_breaks_ties() {
        let g = graph(
            GraphKind::Simple,
            &[("hub", "e"), ("hub", "d"), ("hub", "c"), ("hub", "b"), ("hub", "a"), ("hub", "f")],
        );
        let top = top_degrees(&g, 5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0], ("hub".to_string(), 6));
        let rest: Vec<&str> = top[1..].iter().map(|(a, _)| a.as_str()).collect();
        assert_eq!(rest, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_density() {
        let simple = graph(GraphKind::Simple, &[("a", "b"), ("b", "c")]);
        assert!(close(density(&simple), 2.0 / 3.0));

        let directed = graph(GraphKind::Multi, &[("a", "b"), ("b", "c")]);
        assert!(close(density(&directed), 2.0 / 6.0));

        let single = graph(GraphKind::Simple, &[("a", "a")]);
        assert_eq!(density(&single), 0.0);
    }

    #[test]
    fn test_clustering() {
        // Triangle a-b-c with a pendant d on c
        let g = graph(
            GraphKind::Simple,
            &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")],
        );
        let c = clustering(&g);
        assert!(close(c[0], 1.0));
        assert!(close(c[1], 1.0));
        assert!(close(c[2], 1.0 / 3.0));
        assert!(close(c[3], 0.0));
        assert!(close(average_clustering(&g), (1.0 + 1.0 + 1.0 / 3.0) / 4.0));

        assert_eq!(average_clustering(&MailGraph::new(GraphKind::Simple)), 0.0);
    }

    #[test]
    fn test_average_shortest_path_undirected() {
        let path = graph(GraphKind::Simple, &[("a", "b"), ("b", "c")]);
        // pairs: ab=1 ac=2 bc=1, both directions
        assert!(close(average_shortest_path_length(&path).unwrap(), 8.0 / 6.0));
    }

    #[test]
    fn test_average_shortest_path_directed_needs_strong_connectivity() {
        let one_way = graph(GraphKind::Multi, &[("a", "b")]);
        assert_eq!(
            average_shortest_path_length(&one_way),
            Err(GraphError::Disconnected {
                from: "b".to_string(),
                to: "a".to_string()
            })
        );

        let cycle = graph(GraphKind::Multi, &[("a", "b"), ("b", "c"), ("c", "a")]);
        // each node reaches one at distance 1 and one at distance 2
        assert!(close(average_shortest_path_length(&cycle).unwrap(), 1.5));
    }

    #[test]
    fn test_average_shortest_path_edge_cases() {
        let empty = MailGraph::new(GraphKind::Simple);
        assert_eq!(average_shortest_path_length(&empty), Err(GraphError::Empty));

        let mut lonely = graph(GraphKind::Simple, &[("a", "a")]);
        lonely.remove_self_loops();
        assert_eq!(average_shortest_path_length(&lonely), Ok(0.0));

        let split = graph(GraphKind::Simple, &[("a", "b"), ("c", "d")]);
        assert!(matches!(
            average_shortest_path_length(&split),
            Err(GraphError::Disconnected { .. })
        ));
    }

    #[test]
    fn test_is_connected_per_kind() {
        // A reply makes the pair strongly connected; a pure recipient does not
        let one_way = graph(GraphKind::Multi, &[("a", "b"), ("a", "c")]);
        assert!(!is_connected(&one_way));
        let replied = graph(
            GraphKind::Multi,
            &[("a", "b"), ("a", "c"), ("b", "a"), ("c", "a")],
        );
        assert!(is_connected(&replied));

        assert!(is_connected(&graph(GraphKind::Simple, &[("a", "b"), ("a", "c")])));
        assert!(!is_connected(&graph(GraphKind::Simple, &[("a", "b"), ("c", "d")])));
    }

    #[test]
    fn test_average_shortest_path_ignores_parallel_edges_and_loops() {
        let g = graph(
            GraphKind::Multi,
            &[("a", "b"), ("a", "b"), ("b", "a"), ("a", "a")],
        );
        assert!(close(average_shortest_path_length(&g).unwrap(), 1.0));
        assert!(close(clustering(&g)[0], 0.0));
    }

    #[test]
    fn test_log_log_points_skip_zeroes() {
        let points = log_log_points(&[3, 10, 0, 1]);
        assert_eq!(points.len(), 2);
        assert!(close(points[0].0, 0.0) && close(points[0].1, 1.0));
        assert!(close(points[1].0, 3f64.log10()) && close(points[1].1, 0.0));
    }
}
